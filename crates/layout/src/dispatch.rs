//! Routing layout calls to the algorithm of each node's display type, through the cache.

use log::trace;
use trellis_core::{Layout, LayoutInput, LayoutOutput, NodeArena, NodeId, SizingMode};
use trellis_layout_block::compute_block_layout;
use trellis_layout_flex::compute_flexbox_layout;
use trellis_layout_grid::compute_grid_layout;
use trellis_layout_util::LayoutHost;
use trellis_style::{Direction, Display, Size, Style};

use crate::leaf::compute_leaf_layout;

/// Style handed out for handles that no longer exist.
static FALLBACK_STYLE: Style = Style::DEFAULT;

/// The arena seen by the layout algorithms during one pass.
#[derive(Debug)]
pub struct LayoutPass<'arena> {
    arena: &'arena mut NodeArena,
}

impl<'arena> LayoutPass<'arena> {
    /// Start a pass over `arena`.
    pub const fn new(arena: &'arena mut NodeArena) -> Self {
        Self { arena }
    }

    /// Run the algorithm for `node` without looking at its cache.
    fn compute_uncached(&mut self, node: NodeId, inputs: LayoutInput) -> LayoutOutput {
        let display = self.style(node).display;
        if display == Display::None {
            self.hide_subtree(node);
            return LayoutOutput::HIDDEN;
        }
        if self.child_count(node) == 0 {
            let measure = self.arena.measure_func(node).ok().flatten();
            return compute_leaf_layout(inputs, self.style(node), measure);
        }
        match display {
            Display::Block => compute_block_layout(self, node, inputs),
            Display::Flex => compute_flexbox_layout(self, node, inputs),
            Display::Grid => compute_grid_layout(self, node, inputs),
            Display::None => LayoutOutput::HIDDEN,
        }
    }

    /// Give every descendant of a `display: none` node an empty layout.
    fn hide_subtree(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            let children = self.child_ids(current);
            for (index, child) in children.iter().enumerate() {
                self.arena.set_unrounded_layout(*child, Layout::with_order(index as u32));
                if let Some(cache) = self.arena.cache_mut(*child) {
                    cache.clear();
                }
            }
            stack.extend(children);
        }
    }
}

impl LayoutHost for LayoutPass<'_> {
    fn child_ids(&self, node: NodeId) -> Vec<NodeId> {
        self.arena.children(node).map(<[NodeId]>::to_vec).unwrap_or_default()
    }

    fn child_count(&self, node: NodeId) -> usize {
        self.arena.child_count(node).unwrap_or(0)
    }

    fn style(&self, node: NodeId) -> &Style {
        self.arena.style(node).unwrap_or(&FALLBACK_STYLE)
    }

    fn direction(&self, node: NodeId) -> Direction {
        self.arena.resolved_direction(node).unwrap_or(Direction::Ltr)
    }

    /// Store a layout, extending the content size to the border box on visible axes
    /// and pinning it to the border box on clipped ones.
    fn set_unrounded_layout(&mut self, node: NodeId, layout: &Layout) {
        let overflow = self.style(node).overflow;
        let content_size = Size {
            width: if overflow.x.is_visible() {
                layout.content_size.width.max(layout.size.width)
            } else {
                layout.size.width
            },
            height: if overflow.y.is_visible() {
                layout.content_size.height.max(layout.size.height)
            } else {
                layout.size.height
            },
        };
        self.arena.set_unrounded_layout(
            node,
            Layout {
                content_size,
                ..*layout
            }
            .sanitized(),
        );
    }

    /// Content-size requests bypass the cache.
    fn compute_child_layout(&mut self, node: NodeId, inputs: LayoutInput) -> LayoutOutput {
        let cacheable = inputs.sizing_mode == SizingMode::InherentSize;
        if cacheable
            && let Some(cached) = self.arena.cache(node).and_then(|cache| {
                cache.get(inputs.known_dimensions, inputs.available_space, inputs.run_mode)
            })
        {
            trace!(target: "trellis::cache", "hit {node:?} {:?}", inputs.run_mode);
            return cached;
        }

        let output = self.compute_uncached(node, inputs);
        if cacheable && let Some(cache) = self.arena.cache_mut(node) {
            cache.store(inputs.known_dimensions, inputs.available_space, inputs.run_mode, output);
        }
        output
    }
}
