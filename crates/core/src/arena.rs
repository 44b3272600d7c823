//! Node arena: ownership of every node, parent/child edges, and dirty tracking.
//!
//! The arena is a rooted forest. Edges are stored on both ends; every mutation keeps
//! them in sync and re-parenting always detaches first. Any change to a node's style,
//! children or measurement callback clears its cache and the caches of all of its
//! ancestors, since their sizes may have depended on it.

use core::fmt;
use core::mem::take;

use log::trace;
use slotmap::{SecondaryMap, SlotMap};
use trellis_style::{Direction, Style};

use crate::cache::Cache;
use crate::error::{TreeError, TreeResult};
use crate::layout::Layout;
use crate::node::{MeasureFunc, NodeData, NodeId};

/// Storage for a forest of styled nodes.
#[derive(Default)]
pub struct NodeArena {
    /// Per-node data.
    nodes: SlotMap<NodeId, NodeData>,
    /// Ordered child lists.
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    /// Parent edges.
    parents: SecondaryMap<NodeId, Option<NodeId>>,
    /// Measurement callbacks of leaves sized by external content.
    measure_funcs: SecondaryMap<NodeId, MeasureFunc>,
}

impl fmt::Debug for NodeArena {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("NodeArena")
            .field("nodes", &self.nodes.len())
            .field("measured", &self.measure_funcs.len())
            .finish_non_exhaustive()
    }
}

impl NodeArena {
    /// An empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty arena with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
            children: SecondaryMap::with_capacity(capacity),
            parents: SecondaryMap::with_capacity(capacity),
            measure_funcs: SecondaryMap::new(),
        }
    }

    // ----- lifecycle -----

    /// Create a leaf node.
    pub fn new_leaf(&mut self, style: Style) -> NodeId {
        let node = self.nodes.insert(NodeData::new(style));
        self.children.insert(node, Vec::new());
        self.parents.insert(node, None);
        node
    }

    /// Create a leaf node sized by `measure`.
    pub fn new_leaf_with_measure(&mut self, style: Style, measure: MeasureFunc) -> NodeId {
        let node = self.new_leaf(style);
        self.measure_funcs.insert(node, measure);
        node
    }

    /// Create a node and attach `children` to it in order.
    ///
    /// Children that already have a parent are detached from it first.
    pub fn new_with_children(&mut self, style: Style, children: &[NodeId]) -> TreeResult<NodeId> {
        for &child in children {
            self.check(child)?;
        }
        let node = self.new_leaf(style);
        for &child in children {
            self.attach(node, child);
        }
        Ok(node)
    }

    /// Remove a node, detaching it from its parent and orphaning its children.
    ///
    /// The children stay alive as roots of their own trees.
    pub fn remove(&mut self, node: NodeId) -> TreeResult<NodeId> {
        self.check(node)?;
        if let Some(parent) = self.parent_of(node) {
            if let Some(siblings) = self.children.get_mut(parent) {
                siblings.retain(|&sibling| sibling != node);
            }
            self.mark_dirty_internal(parent);
        }
        let orphans = self.children.remove(node).unwrap_or_default();
        for orphan in orphans {
            if let Some(slot) = self.parents.get_mut(orphan) {
                *slot = None;
            }
            self.mark_dirty_internal(orphan);
        }
        self.parents.remove(node);
        self.measure_funcs.remove(node);
        self.nodes.remove(node);
        trace!(target: "trellis::tree", "removed node {node:?}");
        Ok(node)
    }

    /// Remove every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.children.clear();
        self.parents.clear();
        self.measure_funcs.clear();
    }

    /// Number of live nodes.
    pub fn total_node_count(&self) -> usize {
        self.nodes.len()
    }

    /// True when `node` refers to a live node.
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    // ----- style and measurement -----

    /// Style of a node.
    pub fn style(&self, node: NodeId) -> TreeResult<&Style> {
        self.data(node).map(|data| &data.style)
    }

    /// Replace the style of a node.
    pub fn set_style(&mut self, node: NodeId, style: Style) -> TreeResult<()> {
        self.data_mut(node)?.style = style;
        self.mark_dirty_internal(node);
        Ok(())
    }

    /// Measurement callback of a node, if any.
    pub fn measure_func(&self, node: NodeId) -> TreeResult<Option<&MeasureFunc>> {
        self.check(node)?;
        Ok(self.measure_funcs.get(node))
    }

    /// True when the node has a measurement callback.
    pub fn has_measure_func(&self, node: NodeId) -> bool {
        self.measure_funcs.contains_key(node)
    }

    /// Replace (or remove, with `None`) the measurement callback of a node.
    pub fn set_measure_func(&mut self, node: NodeId, measure: Option<MeasureFunc>) -> TreeResult<()> {
        self.check(node)?;
        match measure {
            Some(func) => {
                self.measure_funcs.insert(node, func);
            }
            None => {
                self.measure_funcs.remove(node);
            }
        }
        self.mark_dirty_internal(node);
        Ok(())
    }

    // ----- children -----

    /// Append `child` to `parent`'s children.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        let child_count = self.child_count(parent).map_err(|_| TreeError::InvalidParent(parent))?;
        self.insert_child_at_index(parent, child_count, child)
    }

    /// Insert `child` at `child_index` among `parent`'s children.
    ///
    /// `child_index` may equal the child count (append). If `child` is already attached
    /// somewhere it is detached first; re-inserting under the same parent moves it.
    pub fn insert_child_at_index(
        &mut self,
        parent: NodeId,
        child_index: usize,
        child: NodeId,
    ) -> TreeResult<()> {
        self.check_parent(parent)?;
        self.check(child)?;
        self.check_acyclic(parent, child)?;
        let child_count = self.child_list(parent)?.len();
        let already_here = self.parent_of(child) == Some(parent);
        let limit = if already_here { child_count - 1 } else { child_count };
        if child_index > limit {
            return Err(TreeError::ChildIndexOutOfBounds {
                parent,
                child_index,
                child_count,
            });
        }
        self.detach(child);
        if let Some(list) = self.children.get_mut(parent) {
            list.insert(child_index, child);
        }
        if let Some(slot) = self.parents.get_mut(child) {
            *slot = Some(parent);
        }
        self.mark_dirty_internal(parent);
        Ok(())
    }

    /// Detach `child` from `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<NodeId> {
        self.check_parent(parent)?;
        self.check(child)?;
        let index = self
            .child_list(parent)?
            .iter()
            .position(|&candidate| candidate == child)
            .ok_or(TreeError::NotAChild { parent, child })?;
        self.remove_child_at_index(parent, index)
    }

    /// Detach and return the child at `child_index`.
    pub fn remove_child_at_index(&mut self, parent: NodeId, child_index: usize) -> TreeResult<NodeId> {
        let child = self.child_at_index(parent, child_index)?;
        if let Some(list) = self.children.get_mut(parent) {
            list.remove(child_index);
        }
        if let Some(slot) = self.parents.get_mut(child) {
            *slot = None;
        }
        self.mark_dirty_internal(parent);
        Ok(child)
    }

    /// Replace the child at `child_index` with `new_child`, returning the detached child.
    pub fn replace_child_at_index(
        &mut self,
        parent: NodeId,
        child_index: usize,
        new_child: NodeId,
    ) -> TreeResult<NodeId> {
        let old_child = self.child_at_index(parent, child_index)?;
        self.check(new_child)?;
        if old_child == new_child {
            return Ok(old_child);
        }
        self.check_acyclic(parent, new_child)?;
        self.detach(new_child);
        // Detaching may have shifted the list when the new child was a later sibling.
        let position = self
            .child_list(parent)?
            .iter()
            .position(|&candidate| candidate == old_child)
            .ok_or(TreeError::NotAChild {
                parent,
                child: old_child,
            })?;
        if let Some(slot) = self.children.get_mut(parent).and_then(|list| list.get_mut(position)) {
            *slot = new_child;
        }
        if let Some(slot) = self.parents.get_mut(new_child) {
            *slot = Some(parent);
        }
        if let Some(slot) = self.parents.get_mut(old_child) {
            *slot = None;
        }
        self.mark_dirty_internal(parent);
        Ok(old_child)
    }

    /// Replace the whole child list of `parent`.
    ///
    /// New children are detached from their previous parents; children no longer
    /// present become roots.
    pub fn set_children(&mut self, parent: NodeId, children: &[NodeId]) -> TreeResult<()> {
        self.check_parent(parent)?;
        for &child in children {
            self.check(child)?;
            self.check_acyclic(parent, child)?;
        }
        let previous = self.children.get_mut(parent).map(take).unwrap_or_default();
        for old_child in previous {
            if let Some(slot) = self.parents.get_mut(old_child) {
                *slot = None;
            }
        }
        for &child in children {
            if self.parent_of(child) == Some(parent) {
                // Duplicate in the new list; keep the first occurrence.
                continue;
            }
            self.attach(parent, child);
        }
        self.mark_dirty_internal(parent);
        Ok(())
    }

    /// Parent of a node, `None` for roots.
    pub fn parent(&self, node: NodeId) -> TreeResult<Option<NodeId>> {
        self.check(node)?;
        Ok(self.parent_of(node))
    }

    /// Children of a node in order.
    pub fn children(&self, node: NodeId) -> TreeResult<&[NodeId]> {
        self.child_list(node).map(Vec::as_slice)
    }

    /// Number of children of a node.
    pub fn child_count(&self, node: NodeId) -> TreeResult<usize> {
        self.child_list(node).map(Vec::len)
    }

    /// Child at `child_index`.
    pub fn child_at_index(&self, parent: NodeId, child_index: usize) -> TreeResult<NodeId> {
        let list = self.child_list(parent).map_err(|_| TreeError::InvalidParent(parent))?;
        list.get(child_index)
            .copied()
            .ok_or(TreeError::ChildIndexOutOfBounds {
                parent,
                child_index,
                child_count: list.len(),
            })
    }

    // ----- dirty tracking -----

    /// Flag a node for relayout, clearing its cache and those of its ancestors.
    pub fn mark_dirty(&mut self, node: NodeId) -> TreeResult<()> {
        self.check(node)?;
        self.mark_dirty_internal(node);
        Ok(())
    }

    /// True when the node's inputs changed since its last layout.
    pub fn dirty(&self, node: NodeId) -> TreeResult<bool> {
        self.data(node).map(|data| data.is_dirty)
    }

    /// True when a layout pass produced a layout the caller has not acknowledged.
    pub fn has_new_layout(&self, node: NodeId) -> TreeResult<bool> {
        self.data(node).map(|data| data.has_new_layout)
    }

    /// True when some descendant was dirtied since the last [`Self::acknowledge_subtree`].
    pub fn has_dirty_descendant(&self, node: NodeId) -> TreeResult<bool> {
        self.data(node).map(|data| data.has_dirty_descendant)
    }

    /// True when an external walker has to look at this node or below it.
    pub fn needs_visit(&self, node: NodeId) -> TreeResult<bool> {
        self.data(node)
            .map(|data| data.has_new_layout || data.has_dirty_descendant)
    }

    /// True when the node or any node below it still has an unacknowledged layout.
    pub fn has_unconsumed_layout(&self, node: NodeId) -> TreeResult<bool> {
        self.check(node)?;
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if self.nodes.get(current).is_some_and(|data| data.has_new_layout) {
                return Ok(true);
            }
            if let Some(list) = self.children.get(current) {
                stack.extend(list.iter().copied());
            }
        }
        Ok(false)
    }

    /// Clear `has_new_layout` on one node.
    pub fn acknowledge_layout(&mut self, node: NodeId) -> TreeResult<()> {
        self.data_mut(node)?.has_new_layout = false;
        Ok(())
    }

    /// Clear both `has_new_layout` and `has_dirty_descendant` on one node.
    ///
    /// Meant to be called bottom-up by a walker that has consumed the subtree.
    pub fn acknowledge_subtree(&mut self, node: NodeId) -> TreeResult<()> {
        let data = self.data_mut(node)?;
        data.has_new_layout = false;
        data.has_dirty_descendant = false;
        Ok(())
    }

    // ----- direction -----

    /// Direction of a node after resolving `inherit` through its ancestors.
    pub fn resolved_direction(&self, node: NodeId) -> TreeResult<Direction> {
        self.check(node)?;
        let mut current = Some(node);
        while let Some(candidate) = current {
            match self.nodes.get(candidate).map(|data| data.style.direction) {
                Some(Direction::Inherit) => current = self.parent_of(candidate),
                Some(direction) => return Ok(direction),
                None => break,
            }
        }
        Ok(Direction::Ltr)
    }

    // ----- layout storage, used by the layout pass -----

    /// Layout as stored by the algorithms, before rounding.
    pub fn unrounded_layout(&self, node: NodeId) -> TreeResult<&Layout> {
        self.data(node).map(|data| &data.unrounded_layout)
    }

    /// Layout handed out to callers.
    pub fn final_layout(&self, node: NodeId) -> TreeResult<&Layout> {
        self.data(node).map(|data| &data.final_layout)
    }

    /// Store the unrounded layout of a node; marks it clean.
    pub fn set_unrounded_layout(&mut self, node: NodeId, layout: Layout) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.unrounded_layout = layout;
            data.is_dirty = false;
        }
    }

    /// Store the caller-visible layout of a node and stamp it as new.
    pub fn set_final_layout(&mut self, node: NodeId, layout: Layout) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.final_layout = layout;
            data.has_new_layout = true;
        }
    }

    /// Cache of a node.
    pub fn cache(&self, node: NodeId) -> Option<&Cache> {
        self.nodes.get(node).map(|data| &data.cache)
    }

    /// Mutable cache of a node.
    pub fn cache_mut(&mut self, node: NodeId) -> Option<&mut Cache> {
        self.nodes.get_mut(node).map(|data| &mut data.cache)
    }

    // ----- internals -----

    /// Fail with [`TreeError::InvalidNode`] for stale handles.
    fn check(&self, node: NodeId) -> TreeResult<()> {
        if self.nodes.contains_key(node) {
            Ok(())
        } else {
            Err(TreeError::InvalidNode(node))
        }
    }

    /// Fail with [`TreeError::InvalidParent`] for stale parent handles.
    fn check_parent(&self, parent: NodeId) -> TreeResult<()> {
        if self.nodes.contains_key(parent) {
            Ok(())
        } else {
            Err(TreeError::InvalidParent(parent))
        }
    }

    /// Fail when `child` is `parent` or one of its ancestors.
    fn check_acyclic(&self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        let mut current = Some(parent);
        while let Some(ancestor) = current {
            if ancestor == child {
                return Err(TreeError::CycleDetected { parent, child });
            }
            current = self.parent_of(ancestor);
        }
        Ok(())
    }

    fn data(&self, node: NodeId) -> TreeResult<&NodeData> {
        self.nodes.get(node).ok_or(TreeError::InvalidNode(node))
    }

    fn data_mut(&mut self, node: NodeId) -> TreeResult<&mut NodeData> {
        self.nodes.get_mut(node).ok_or(TreeError::InvalidNode(node))
    }

    fn child_list(&self, node: NodeId) -> TreeResult<&Vec<NodeId>> {
        self.children.get(node).ok_or(TreeError::InvalidNode(node))
    }

    fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.parents.get(node).copied().flatten()
    }

    /// Remove `child` from its current parent's list, if any.
    fn detach(&mut self, child: NodeId) {
        if let Some(old_parent) = self.parent_of(child) {
            if let Some(list) = self.children.get_mut(old_parent) {
                list.retain(|&sibling| sibling != child);
            }
            if let Some(slot) = self.parents.get_mut(child) {
                *slot = None;
            }
            self.mark_dirty_internal(old_parent);
        }
    }

    /// Detach `child` and append it to `parent` without validation.
    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        if let Some(list) = self.children.get_mut(parent) {
            list.push(child);
        }
        if let Some(slot) = self.parents.get_mut(child) {
            *slot = Some(parent);
        }
    }

    /// Dirty `node` and every ancestor; ancestors learn they have a dirty descendant.
    fn mark_dirty_internal(&mut self, node: NodeId) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.mark_dirty();
        }
        let mut current = self.parent_of(node);
        while let Some(ancestor) = current {
            if let Some(data) = self.nodes.get_mut(ancestor) {
                data.mark_dirty();
                data.has_dirty_descendant = true;
            }
            current = self.parent_of(ancestor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    /// # Panics
    /// Panics if child-list mutations leave edges out of sync.
    fn child_mutations_keep_edges_in_sync() -> TreeResult<()> {
        init();
        let mut arena = NodeArena::new();
        let first = arena.new_leaf(Style::default());
        let second = arena.new_leaf(Style::default());
        let third = arena.new_leaf(Style::default());
        let parent = arena.new_with_children(Style::default(), &[first, second])?;

        arena.insert_child_at_index(parent, 1, third)?;
        assert_eq!(arena.children(parent)?, &[first, third, second]);
        assert_eq!(arena.parent(third)?, Some(parent));

        let removed = arena.remove_child_at_index(parent, 0)?;
        assert_eq!(removed, first);
        assert_eq!(arena.parent(first)?, None);

        let replaced = arena.replace_child_at_index(parent, 0, first)?;
        assert_eq!(replaced, third);
        assert_eq!(arena.children(parent)?, &[first, second]);
        assert_eq!(arena.parent(third)?, None);

        arena.set_children(parent, &[second, third])?;
        assert_eq!(arena.children(parent)?, &[second, third]);
        assert_eq!(arena.parent(first)?, None);
        assert_eq!(arena.child_count(parent)?, 2);
        Ok(())
    }

    #[test]
    /// # Panics
    /// Panics if re-parenting does not detach from the previous parent.
    fn reparenting_detaches_first() -> TreeResult<()> {
        let mut arena = NodeArena::new();
        let child = arena.new_leaf(Style::default());
        let old_parent = arena.new_with_children(Style::default(), &[child])?;
        let new_parent = arena.new_leaf(Style::default());
        arena.add_child(new_parent, child)?;
        assert!(arena.children(old_parent)?.is_empty());
        assert_eq!(arena.parent(child)?, Some(new_parent));
        Ok(())
    }

    #[test]
    /// # Panics
    /// Panics if structural misuse is not reported.
    fn structural_errors() -> TreeResult<()> {
        let mut arena = NodeArena::new();
        let child = arena.new_leaf(Style::default());
        let stranger = arena.new_leaf(Style::default());
        let parent = arena.new_with_children(Style::default(), &[child])?;

        assert_eq!(
            arena.remove_child(parent, stranger),
            Err(TreeError::NotAChild {
                parent,
                child: stranger
            })
        );
        assert_eq!(
            arena.child_at_index(parent, 3),
            Err(TreeError::ChildIndexOutOfBounds {
                parent,
                child_index: 3,
                child_count: 1
            })
        );
        assert_eq!(
            arena.add_child(child, parent),
            Err(TreeError::CycleDetected {
                parent: child,
                child: parent
            })
        );
        arena.remove(stranger)?;
        assert_eq!(arena.style(stranger).err(), Some(TreeError::InvalidNode(stranger)));
        assert_eq!(
            arena.add_child(stranger, child),
            Err(TreeError::InvalidParent(stranger))
        );
        Ok(())
    }

    #[test]
    /// # Panics
    /// Panics if removing a node does not orphan its children.
    fn remove_orphans_children() -> TreeResult<()> {
        let mut arena = NodeArena::new();
        let leaf = arena.new_leaf(Style::default());
        let middle = arena.new_with_children(Style::default(), &[leaf])?;
        let root = arena.new_with_children(Style::default(), &[middle])?;
        arena.remove(middle)?;
        assert!(arena.children(root)?.is_empty());
        assert_eq!(arena.parent(leaf)?, None);
        assert_eq!(arena.total_node_count(), 2);
        Ok(())
    }

    #[test]
    /// # Panics
    /// Panics if dirtiness does not propagate up the ancestor chain.
    fn dirtiness_propagates_to_ancestors() -> TreeResult<()> {
        let mut arena = NodeArena::new();
        let leaf = arena.new_leaf(Style::default());
        let middle = arena.new_with_children(Style::default(), &[leaf])?;
        let root = arena.new_with_children(Style::default(), &[middle])?;
        for node in [leaf, middle, root] {
            arena.set_unrounded_layout(node, Layout::new());
            arena.set_final_layout(node, Layout::new());
            arena.acknowledge_subtree(node)?;
        }
        assert!(!arena.dirty(root)?);

        arena.mark_dirty(leaf)?;
        assert!(arena.dirty(leaf)?);
        assert!(arena.dirty(middle)?);
        assert!(arena.dirty(root)?);
        assert!(arena.has_dirty_descendant(root)?);
        assert!(!arena.has_dirty_descendant(leaf)?);
        assert!(arena.needs_visit(middle)?);

        arena.acknowledge_subtree(middle)?;
        assert!(!arena.needs_visit(middle)?);
        Ok(())
    }

    #[test]
    /// # Panics
    /// Panics if `inherit` does not resolve through ancestors.
    fn direction_inherits_from_ancestors() -> TreeResult<()> {
        let mut arena = NodeArena::new();
        let leaf = arena.new_leaf(Style::default());
        let middle = arena.new_with_children(Style::default(), &[leaf])?;
        let root = arena.new_with_children(
            Style {
                direction: Direction::Rtl,
                ..Style::default()
            },
            &[middle],
        )?;
        assert_eq!(arena.resolved_direction(leaf)?, Direction::Rtl);
        arena.remove_child(root, middle)?;
        assert_eq!(arena.resolved_direction(leaf)?, Direction::Ltr);
        Ok(())
    }
}
