//! Spec: §9: Flex Layout Algorithm <https://www.w3.org/TR/css-flexbox-1/#layout-algorithm>

mod alignment;
mod cross_size;
mod flexible_lengths;
mod lines;

pub use alignment::{align_cross_axis, align_lines, align_main_axis, flex_justify_content};
pub use cross_size::{
    calculate_line_cross_sizes, determine_container_cross_size, determine_hypothetical_cross_sizes,
    determine_used_cross_sizes, stretch_lines,
};
pub use flexible_lengths::resolve_flexible_lengths;
pub use lines::{FlexLine, collect_flex_lines, determine_container_main_size};
