//! Flex items and their flex base sizes.
//!
//! Spec: §4: Flex Items and §9.2: Line Length Determination
//! <https://www.w3.org/TR/css-flexbox-1/#flex-items>

use log::trace;
use trellis_core::NodeId;
use trellis_layout_util::{LayoutHost, MaybeMath as _, relative_offset, resolve_box};
use trellis_style::{
    AlignItems, AvailableSpace, BoxSizing, Display, Overflow, Point, Rect, Size, Style,
};

use crate::chapter7::FlexAxes;

/// An in-flow child of a flex container and the sizes computed for it.
#[derive(Debug, Clone)]
pub struct FlexItem {
    /// Child node.
    pub node: NodeId,
    /// Source order among all children.
    pub order: u32,
    /// Preferred border-box size.
    pub size: Size<Option<f32>>,
    /// Minimum border-box size.
    pub min_size: Size<Option<f32>>,
    /// Maximum border-box size.
    pub max_size: Size<Option<f32>>,
    /// Margins, `auto` resolved to zero until alignment assigns them.
    pub margin: Rect<f32>,
    /// Which margins are `auto`.
    pub margin_is_auto: Rect<bool>,
    /// Resolved padding.
    pub padding: Rect<f32>,
    /// Resolved border.
    pub border: Rect<f32>,
    /// Scrollbar gutter of the item.
    pub scrollbar_gutter: Size<f32>,
    /// Used cross-axis alignment.
    pub align_self: AlignItems,
    /// `flex-grow`.
    pub flex_grow: f32,
    /// `flex-shrink`.
    pub flex_shrink: f32,
    /// Overflow of the item, for content-size propagation.
    pub overflow: Point<Overflow>,
    /// Relative-positioning offset.
    pub relative_offset: Point<f32>,

    /// Flex base size (border box).
    pub flex_basis: f32,
    /// Used minimum main size, including the automatic minimum.
    pub resolved_min_main: f32,
    /// Flex base size clamped by the main-axis min/max.
    pub hypothetical_inner_main: f32,
    /// Hypothetical cross size (border box).
    pub hypothetical_cross: f32,
    /// Main size after resolving flexible lengths.
    pub target_main: f32,
    /// Cross size after stretching.
    pub target_cross: f32,
    /// Clamping adjustment of the current flexing iteration.
    pub violation: f32,
    /// Excluded from further flexing.
    pub frozen: bool,
    /// Border-box offset from the line's main-start edge.
    pub offset_main: f32,
    /// Border-box offset from the line's cross-start edge.
    pub offset_cross: f32,
}

impl FlexItem {
    /// Main-axis margin sum.
    #[inline]
    pub fn margin_main_sum(&self, axes: FlexAxes) -> f32 {
        self.margin.main_axis_sum(axes.direction)
    }

    /// Cross-axis margin sum.
    #[inline]
    pub fn margin_cross_sum(&self, axes: FlexAxes) -> f32 {
        self.margin.cross_axis_sum(axes.direction)
    }

    /// Flex base size plus main margins.
    #[inline]
    pub fn outer_flex_basis(&self, axes: FlexAxes) -> f32 {
        self.flex_basis + self.margin_main_sum(axes)
    }

    /// Hypothetical main size plus main margins.
    #[inline]
    pub fn hypothetical_outer_main(&self, axes: FlexAxes) -> f32 {
        self.hypothetical_inner_main + self.margin_main_sum(axes)
    }

    /// Target main size plus main margins.
    #[inline]
    pub fn outer_target_main(&self, axes: FlexAxes) -> f32 {
        self.target_main + self.margin_main_sum(axes)
    }

    /// Clamp a main size by the item's min/max; the minimum wins.
    #[inline]
    pub fn clamp_main(&self, value: f32, axes: FlexAxes) -> f32 {
        value
            .maybe_min(self.max_size.main(axes.direction))
            .max(self.resolved_min_main)
    }

    /// Clamp a cross size by the item's min/max; the minimum wins.
    #[inline]
    pub fn clamp_cross(&self, value: f32, axes: FlexAxes) -> f32 {
        value.maybe_clamp(
            self.min_size.cross(axes.direction),
            self.max_size.cross(axes.direction),
        )
    }

    /// True when the item stretches to its line's cross size.
    #[inline]
    pub fn stretches(&self, axes: FlexAxes) -> bool {
        self.align_self == AlignItems::Stretch
            && self.size.cross(axes.direction).is_none()
            && !axes.cross_leading(self.margin_is_auto)
            && !axes.cross_trailing(self.margin_is_auto)
    }
}

/// Container-side inputs for building items.
#[derive(Debug, Clone, Copy)]
pub struct ItemContext {
    /// Resolved axes of the container.
    pub axes: FlexAxes,
    /// Inner size of the container where known; the percentage basis for items.
    pub inner_known: Size<Option<f32>>,
    /// Space available to the items.
    pub inner_available: Size<AvailableSpace>,
    /// Container's `align-items`.
    pub align_items: AlignItems,
}

/// Children of a flex container sorted by role.
#[derive(Debug, Default)]
pub struct CollectedChildren {
    /// In-flow items.
    pub items: Vec<FlexItem>,
    /// Absolutely positioned children with their source order.
    pub absolute: Vec<(NodeId, u32)>,
    /// `display: none` children with their source order.
    pub hidden: Vec<(NodeId, u32)>,
}

/// Build the flex items of `node` and compute their flex base sizes.
pub fn collect_flex_items(
    tree: &mut impl LayoutHost,
    node: NodeId,
    context: ItemContext,
) -> CollectedChildren {
    let mut collected = CollectedChildren::default();
    for (index, child) in tree.child_ids(node).into_iter().enumerate() {
        let order = index as u32;
        let style = tree.style(child).clone();
        if style.display == Display::None {
            collected.hidden.push((child, order));
        } else if style.is_absolutely_positioned() {
            collected.absolute.push((child, order));
        } else {
            let item = build_item(tree, child, order, &style, context);
            collected.items.push(item);
        }
    }
    collected
}

/// Resolve one item's style and determine its flex base size.
///
/// Spec: §9.2 step 3 <https://www.w3.org/TR/css-flexbox-1/#algo-main-item>
fn build_item(
    tree: &mut impl LayoutHost,
    child: NodeId,
    order: u32,
    style: &Style,
    context: ItemContext,
) -> FlexItem {
    let axes = context.axes;
    let direction = axes.direction;
    let resolved = resolve_box(style, context.inner_known);
    let margin_is_auto = style.margin.auto_edges();
    let margin = resolved.margin_or_zero();
    let padding_border = resolved.padding_border();
    let padding_border_main = padding_border.main_axis_sum(direction);
    let align_self = match style.align_self.unwrap_or(context.align_items) {
        AlignItems::Start => AlignItems::FlexStart,
        AlignItems::End => AlignItems::FlexEnd,
        other => other,
    };

    let mut item = FlexItem {
        node: child,
        order,
        size: resolved.size,
        min_size: resolved.min_size,
        max_size: resolved.max_size,
        margin,
        margin_is_auto,
        padding: resolved.padding,
        border: resolved.border,
        scrollbar_gutter: resolved.scrollbar_gutter,
        align_self,
        flex_grow: style.flex_grow.max(0.0),
        flex_shrink: style.flex_shrink.max(0.0),
        overflow: style.overflow,
        relative_offset: relative_offset(style, context.inner_known),
        flex_basis: 0.0,
        resolved_min_main: padding_border_main,
        hypothetical_inner_main: 0.0,
        hypothetical_cross: 0.0,
        target_main: 0.0,
        target_cross: 0.0,
        violation: 0.0,
        frozen: false,
        offset_main: 0.0,
        offset_cross: 0.0,
    };

    // Cross size to measure content with: the item's own, or the stretched line size
    // of a single-line container with a definite cross size.
    let stretched_cross = if item.stretches(axes) && !axes.is_wrapping {
        context
            .inner_known
            .cross(direction)
            .map(|cross| item.clamp_cross((cross - item.margin_cross_sum(axes)).max(0.0), axes))
    } else {
        None
    };
    let known_cross = item.size.cross(direction).or(stretched_cross);
    let measure_known = Size::from_main_cross(direction, None, known_cross);
    let measure_available = axes.available(
        context
            .inner_available
            .main(direction)
            .map_definite_value(|space| space - item.margin_main_sum(axes)),
        context
            .inner_available
            .cross(direction)
            .map_definite_value(|space| space - item.margin_cross_sum(axes)),
    );

    let box_sizing_adjustment = match style.box_sizing {
        BoxSizing::BorderBox => 0.0,
        BoxSizing::ContentBox => padding_border_main,
    };
    let explicit_basis = style
        .flex_basis
        .resolve(context.inner_known.main(direction))
        .map(|basis| basis + box_sizing_adjustment);
    let flex_basis = match explicit_basis.or(item.size.main(direction)) {
        Some(basis) => basis,
        None => tree.measure_child_size(
            child,
            measure_known,
            context.inner_known,
            measure_available,
            direction.main_axis(),
        ),
    };
    item.flex_basis = flex_basis.max(padding_border_main);

    // Spec: §4.5: Automatic Minimum Size of Flex Items
    let specified_min = if direction.is_row() {
        &style.min_size.width
    } else {
        &style.min_size.height
    };
    item.resolved_min_main = if specified_min.is_auto() {
        let automatic = style
            .overflow_in(direction.main_axis())
            .maybe_into_automatic_min_size()
            .unwrap_or_else(|| {
                let min_content = tree.measure_child_size(
                    child,
                    measure_known,
                    context.inner_known,
                    axes.available(AvailableSpace::MinContent, measure_available.cross(direction)),
                    direction.main_axis(),
                );
                item.size
                    .main(direction)
                    .map_or(min_content, |size| size.min(min_content))
                    .maybe_min(item.max_size.main(direction))
            });
        automatic.max(padding_border_main)
    } else {
        item.min_size.main(direction).unwrap_or(padding_border_main)
    };
    item.hypothetical_inner_main = item.clamp_main(item.flex_basis, axes);

    trace!(
        target: "trellis::flex",
        "item {child:?} basis={} min={} hypothetical={}",
        item.flex_basis,
        item.resolved_min_main,
        item.hypothetical_inner_main
    );
    item
}
