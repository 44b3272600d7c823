//! Pixel snapping of the computed tree.
//!
//! Edges are rounded in absolute coordinates and every length is taken as the
//! difference of two rounded edges, so boxes that touch before rounding still touch
//! after it.

use log::trace;
use trellis_core::{Layout, NodeArena, NodeId};
use trellis_style::{Point, Rect, Size};

/// Derive the final layout of every node under `root` from its unrounded layout.
///
/// Every visited node is stamped with `has_new_layout`.
pub fn finalize_layouts(arena: &mut NodeArena, root: NodeId, use_rounding: bool) {
    // (node, absolute rounded content-box origin of its parent)
    let mut stack = vec![(root, Point::ZERO)];
    let mut visited = 0usize;
    while let Some((node, parent_origin)) = stack.pop() {
        let Ok(unrounded) = arena.unrounded_layout(node).copied() else {
            continue;
        };
        let (layout, content_origin) = if use_rounding {
            round_layout(&unrounded, parent_origin)
        } else {
            (unrounded, Point::ZERO)
        };
        arena.set_final_layout(node, layout.sanitized());
        visited += 1;
        if let Ok(children) = arena.children(node) {
            stack.extend(children.iter().map(|child| (*child, content_origin)));
        }
    }
    trace!(target: "trellis::tree", "finalized {visited} layouts (rounding: {use_rounding})");
}

/// Round one layout whose parent content box sits at `parent_origin`.
///
/// Returns the rounded layout and the absolute origin of its own content box. Edges
/// saturate at `±f32::MAX`, so huge boxes never produce NaN.
fn round_layout(unrounded: &Layout, parent_origin: Point<f32>) -> (Layout, Point<f32>) {
    let edge = |value: f32| value.clamp(-f32::MAX, f32::MAX);
    let snap = |from: f32, to: f32| edge(edge(to).round() - edge(from).round());
    let left = edge(parent_origin.x + unrounded.location.x);
    let top = edge(parent_origin.y + unrounded.location.y);
    let right = edge(left + unrounded.size.width);
    let bottom = edge(top + unrounded.size.height);
    let border = unrounded.border;
    let padding = unrounded.padding;

    let layout = Layout {
        order: unrounded.order,
        location: Point::new(
            edge(left.round() - parent_origin.x),
            edge(top.round() - parent_origin.y),
        ),
        size: Size::new(snap(left, right), snap(top, bottom)),
        content_size: Size::new(
            snap(left, left + unrounded.content_size.width),
            snap(top, top + unrounded.content_size.height),
        ),
        scrollbar_size: Size::new(
            snap(right - unrounded.scrollbar_size.width, right),
            snap(bottom - unrounded.scrollbar_size.height, bottom),
        ),
        border: Rect::new(
            snap(left, left + border.left),
            snap(right - border.right, right),
            snap(top, top + border.top),
            snap(bottom - border.bottom, bottom),
        ),
        padding: Rect::new(
            snap(left + border.left, left + border.left + padding.left),
            snap(right - border.right - padding.right, right - border.right),
            snap(top + border.top, top + border.top + padding.top),
            snap(bottom - border.bottom - padding.bottom, bottom - border.bottom),
        ),
        margin: unrounded.margin.map(f32::round),
    };
    let content_origin = Point::new(
        edge(left + border.left + padding.left).round(),
        edge(top + border.top + padding.top).round(),
    );
    (layout, content_origin)
}
