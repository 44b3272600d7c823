//! The layout tree: node lifecycle, mutation, layout passes and incremental queries.

use log::trace;
use trellis_core::{Layout, LayoutInput, MeasureFunc, NodeArena, NodeId, TreeResult};
use trellis_layout_util::{LayoutHost as _, resolve_box};
use trellis_style::{AvailableSpace, Direction, Display, Point, Size, Style};

use crate::dispatch::LayoutPass;
use crate::rounding::finalize_layouts;

/// Tree-wide settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Round every layout to whole pixels after each pass.
    pub use_rounding: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self { use_rounding: true }
    }
}

/// A forest of styled nodes and their computed layouts.
#[derive(Debug, Default)]
pub struct LayoutTree {
    /// Node storage, edges, caches and dirty flags.
    pub(crate) arena: NodeArena,
    /// Tree-wide settings.
    pub(crate) config: TreeConfig,
}

impl LayoutTree {
    /// An empty tree with rounding enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty tree with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: NodeArena::with_capacity(capacity),
            config: TreeConfig::default(),
        }
    }

    /// An empty tree with the given settings.
    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            arena: NodeArena::new(),
            config,
        }
    }

    /// Current settings.
    pub const fn config(&self) -> TreeConfig {
        self.config
    }

    /// Round layouts from the next pass on.
    pub const fn enable_rounding(&mut self) {
        self.config.use_rounding = true;
    }

    /// Hand out unrounded layouts from the next pass on.
    pub const fn disable_rounding(&mut self) {
        self.config.use_rounding = false;
    }

    // ----- lifecycle -----

    /// Create a leaf node.
    pub fn new_leaf(&mut self, style: Style) -> NodeId {
        self.arena.new_leaf(style)
    }

    /// Create a leaf node whose content size comes from `measure`.
    pub fn new_leaf_with_measure(&mut self, style: Style, measure: MeasureFunc) -> NodeId {
        self.arena.new_leaf_with_measure(style, measure)
    }

    /// Create a node with `children`, detaching them from any previous parent.
    pub fn new_with_children(&mut self, style: Style, children: &[NodeId]) -> TreeResult<NodeId> {
        self.arena.new_with_children(style, children)
    }

    /// Destroy a node, detaching it from its parent and orphaning its children.
    pub fn remove(&mut self, node: NodeId) -> TreeResult<NodeId> {
        self.arena.remove(node)
    }

    /// Destroy every node.
    pub fn clear(&mut self) {
        self.arena.clear();
    }

    /// Number of live nodes.
    pub fn total_node_count(&self) -> usize {
        self.arena.total_node_count()
    }

    // ----- style and measurement -----

    /// Style of a node.
    pub fn style(&self, node: NodeId) -> TreeResult<&Style> {
        self.arena.style(node)
    }

    /// Replace the style of a node, dirtying it and its ancestors.
    pub fn set_style(&mut self, node: NodeId, style: Style) -> TreeResult<()> {
        self.arena.set_style(node, style)
    }

    /// Measurement callback of a node.
    pub fn measure_func(&self, node: NodeId) -> TreeResult<Option<&MeasureFunc>> {
        self.arena.measure_func(node)
    }

    /// Replace or remove the measurement callback of a node.
    pub fn set_measure_func(&mut self, node: NodeId, measure: Option<MeasureFunc>) -> TreeResult<()> {
        self.arena.set_measure_func(node, measure)
    }

    // ----- children -----

    /// Append `child` to `parent`.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        self.arena.add_child(parent, child)
    }

    /// Insert `child` at `child_index` among the children of `parent`.
    pub fn insert_child_at_index(
        &mut self,
        parent: NodeId,
        child_index: usize,
        child: NodeId,
    ) -> TreeResult<()> {
        self.arena.insert_child_at_index(parent, child_index, child)
    }

    /// Detach `child` from `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<NodeId> {
        self.arena.remove_child(parent, child)
    }

    /// Detach the child at `child_index`.
    pub fn remove_child_at_index(&mut self, parent: NodeId, child_index: usize) -> TreeResult<NodeId> {
        self.arena.remove_child_at_index(parent, child_index)
    }

    /// Swap the child at `child_index` for `new_child`, returning the old child.
    pub fn replace_child_at_index(
        &mut self,
        parent: NodeId,
        child_index: usize,
        new_child: NodeId,
    ) -> TreeResult<NodeId> {
        self.arena.replace_child_at_index(parent, child_index, new_child)
    }

    /// Replace the whole child list of `parent`.
    pub fn set_children(&mut self, parent: NodeId, children: &[NodeId]) -> TreeResult<()> {
        self.arena.set_children(parent, children)
    }

    /// Parent of a node.
    pub fn parent(&self, node: NodeId) -> TreeResult<Option<NodeId>> {
        self.arena.parent(node)
    }

    /// Children of a node in order.
    pub fn children(&self, node: NodeId) -> TreeResult<&[NodeId]> {
        self.arena.children(node)
    }

    /// Number of children of a node.
    pub fn child_count(&self, node: NodeId) -> TreeResult<usize> {
        self.arena.child_count(node)
    }

    /// Child of `parent` at `child_index`.
    pub fn child_at_index(&self, parent: NodeId, child_index: usize) -> TreeResult<NodeId> {
        self.arena.child_at_index(parent, child_index)
    }

    // ----- dirty tracking and incremental consumption -----

    /// Flag a node for relayout.
    pub fn mark_dirty(&mut self, node: NodeId) -> TreeResult<()> {
        self.arena.mark_dirty(node)
    }

    /// True when the node changed since its last layout.
    pub fn dirty(&self, node: NodeId) -> TreeResult<bool> {
        self.arena.dirty(node)
    }

    /// True when the last pass produced a layout not yet acknowledged.
    pub fn has_new_layout(&self, node: NodeId) -> TreeResult<bool> {
        self.arena.has_new_layout(node)
    }

    /// True when a descendant was dirtied since the last subtree acknowledgement.
    pub fn has_dirty_descendant(&self, node: NodeId) -> TreeResult<bool> {
        self.arena.has_dirty_descendant(node)
    }

    /// True when an external walker has to visit this node.
    pub fn needs_visit(&self, node: NodeId) -> TreeResult<bool> {
        self.arena.needs_visit(node)
    }

    /// True when the node or a descendant holds an unacknowledged layout.
    pub fn has_unconsumed_layout(&self, node: NodeId) -> TreeResult<bool> {
        self.arena.has_unconsumed_layout(node)
    }

    /// Clear `has_new_layout` on a node.
    pub fn acknowledge_layout(&mut self, node: NodeId) -> TreeResult<()> {
        self.arena.acknowledge_layout(node)
    }

    /// Clear `has_new_layout` and `has_dirty_descendant` on a node.
    pub fn acknowledge_subtree(&mut self, node: NodeId) -> TreeResult<()> {
        self.arena.acknowledge_subtree(node)
    }

    /// Direction of a node with `inherit` resolved.
    pub fn resolved_direction(&self, node: NodeId) -> TreeResult<Direction> {
        self.arena.resolved_direction(node)
    }

    // ----- layout -----

    /// Lay out the tree rooted at `root` within `available_space`.
    ///
    /// Every node of the subtree is re-stamped with `has_new_layout`, even when its
    /// geometry did not change. Fails before touching any state if `root` is unknown.
    pub fn compute_layout(&mut self, root: NodeId, available_space: Size<AvailableSpace>) -> TreeResult<()> {
        let style = self.arena.style(root)?.clone();
        let span = tracing::debug_span!("compute_layout", ?root, ?available_space);
        let _entered = span.enter();

        let parent_size = available_space.into_options();
        let resolved = resolve_box(&style, parent_size);
        let margin = resolved.margin_or_zero();
        // A block root fills the available width like any in-flow block box.
        let stretched_width = match (style.display, resolved.size.width, available_space.width) {
            (Display::Block, None, AvailableSpace::Definite(width)) => {
                Some((width - margin.horizontal_axis_sum()).max(0.0))
            }
            _ => None,
        };
        let known_dimensions = Size {
            width: stretched_width,
            height: None,
        };

        let mut pass = LayoutPass::new(&mut self.arena);
        let output = pass.compute_child_layout(
            root,
            LayoutInput::perform(known_dimensions, parent_size, available_space),
        );
        pass.set_unrounded_layout(
            root,
            &Layout {
                order: 0,
                location: Point::ZERO,
                size: output.size,
                content_size: output.content_size,
                scrollbar_size: resolved.scrollbar_gutter,
                border: resolved.border,
                padding: resolved.padding,
                margin,
            },
        );
        trace!(target: "trellis::tree", "root {root:?} size={:?}", output.size);

        finalize_layouts(&mut self.arena, root, self.config.use_rounding);
        Ok(())
    }

    /// Layout of a node from the last pass, rounded when rounding is enabled.
    pub fn layout(&self, node: NodeId) -> TreeResult<&Layout> {
        self.arena.final_layout(node)
    }

    /// Layout of a node from the last pass before rounding.
    pub fn unrounded_layout(&self, node: NodeId) -> TreeResult<&Layout> {
        self.arena.unrounded_layout(node)
    }
}

#[cfg(test)]
mod tests {
    use trellis_core::TreeError;
    use trellis_style::Dimension;

    use super::*;

    #[test]
    /// # Panics
    /// Panics if an unknown root mutates any state.
    fn unknown_root_fails_fast() -> TreeResult<()> {
        let mut tree = LayoutTree::new();
        let node = tree.new_leaf(Style::default());
        tree.remove(node)?;
        let other = tree.new_leaf(Style::default());
        assert_eq!(
            tree.compute_layout(node, Size::MAX_CONTENT),
            Err(TreeError::InvalidNode(node))
        );
        assert!(!tree.has_new_layout(other)?);
        Ok(())
    }

    #[test]
    /// # Panics
    /// Panics if a block root does not fill the available width.
    fn block_root_stretches() -> TreeResult<()> {
        let mut tree = LayoutTree::new();
        let root = tree.new_leaf(Style {
            display: Display::Block,
            size: Size::new(Dimension::Auto, Dimension::length(10.0)),
            ..Style::default()
        });
        tree.compute_layout(root, Size::definite(320.0, 200.0))?;
        assert_eq!(tree.layout(root)?.size, Size::new(320.0, 10.0));
        Ok(())
    }

    #[test]
    /// # Panics
    /// Panics if toggling rounding is not reflected in the config.
    fn rounding_toggles() {
        let mut tree = LayoutTree::with_config(TreeConfig { use_rounding: false });
        assert!(!tree.config().use_rounding);
        tree.enable_rounding();
        assert!(tree.config().use_rounding);
        tree.disable_rounding();
        assert_eq!(tree.config(), TreeConfig { use_rounding: false });
    }
}
