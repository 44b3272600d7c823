//! The dispatcher trait layout algorithms use to reach the node tree.
//!
//! The façade crate implements [`LayoutHost`]; the block, flex and grid crates only
//! depend on this trait, which lets them lay out children of any display type without
//! depending on each other.

use trellis_core::{Layout, LayoutInput, LayoutOutput, NodeId, RequestedAxis};
use trellis_style::{AbsoluteAxis, AvailableSpace, Direction, Size, Style};

/// Access to the tree being laid out.
pub trait LayoutHost {
    /// Children of `node` in source order.
    fn child_ids(&self, node: NodeId) -> Vec<NodeId>;

    /// Number of children of `node`.
    fn child_count(&self, node: NodeId) -> usize;

    /// Style of `node`.
    fn style(&self, node: NodeId) -> &Style;

    /// Direction of `node` with `inherit` resolved; never [`Direction::Inherit`].
    fn direction(&self, node: NodeId) -> Direction;

    /// Store the unrounded layout of `node`.
    fn set_unrounded_layout(&mut self, node: NodeId, layout: &Layout);

    /// Lay out or measure `node`, dispatching on its display type and consulting its cache.
    fn compute_child_layout(&mut self, node: NodeId, inputs: LayoutInput) -> LayoutOutput;

    /// Border-box size of `child` along `axis`.
    fn measure_child_size(
        &mut self,
        child: NodeId,
        known_dimensions: Size<Option<f32>>,
        parent_size: Size<Option<f32>>,
        available_space: Size<AvailableSpace>,
        axis: AbsoluteAxis,
    ) -> f32 {
        let requested = match axis {
            AbsoluteAxis::Horizontal => RequestedAxis::Horizontal,
            AbsoluteAxis::Vertical => RequestedAxis::Vertical,
        };
        let inputs = LayoutInput {
            known_dimensions,
            ..LayoutInput::measure(requested, available_space, parent_size)
        };
        self.compute_child_layout(child, inputs).size.get(axis)
    }

    /// Border-box size of `child` on both axes.
    fn measure_child(
        &mut self,
        child: NodeId,
        known_dimensions: Size<Option<f32>>,
        parent_size: Size<Option<f32>>,
        available_space: Size<AvailableSpace>,
    ) -> Size<f32> {
        let inputs = LayoutInput {
            known_dimensions,
            ..LayoutInput::measure(RequestedAxis::Both, available_space, parent_size)
        };
        self.compute_child_layout(child, inputs).size
    }

    /// Give a `display: none` child and its subtree an empty layout.
    fn hide_child(&mut self, child: NodeId, order: u32) {
        self.compute_child_layout(
            child,
            LayoutInput::perform(Size::NONE, Size::NONE, Size::MAX_CONTENT),
        );
        self.set_unrounded_layout(child, &Layout::with_order(order));
    }

    /// Fully lay out `child`, storing the layouts of its descendants.
    fn perform_child_layout(
        &mut self,
        child: NodeId,
        known_dimensions: Size<Option<f32>>,
        parent_size: Size<Option<f32>>,
        available_space: Size<AvailableSpace>,
    ) -> LayoutOutput {
        self.compute_child_layout(
            child,
            LayoutInput::perform(known_dimensions, parent_size, available_space),
        )
    }
}
