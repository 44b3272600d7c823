//! Public façade of the trellis layout engine.
//!
//! [`LayoutTree`] owns the node arena, dispatches each node to the block, flex or grid
//! algorithm by its display type, measures leaves, and runs the rounding pass that
//! turns the algorithms' float geometry into pixel-aligned layouts.
//!
//! ```
//! use trellis_layout::{AvailableSpace, Dimension, LayoutTree, Size, Style, TreeResult};
//!
//! fn main() -> TreeResult<()> {
//!     let mut tree = LayoutTree::new();
//!     let child = tree.new_leaf(Style {
//!         flex_grow: 1.0,
//!         ..Style::default()
//!     });
//!     let root = tree.new_with_children(
//!         Style {
//!             size: Size::new(Dimension::length(200.0), Dimension::length(100.0)),
//!             ..Style::default()
//!         },
//!         &[child],
//!     )?;
//!     tree.compute_layout(root, Size::new(AvailableSpace::MaxContent, AvailableSpace::MaxContent))?;
//!     assert_eq!(tree.layout(child)?.size, Size::new(200.0, 100.0));
//!     Ok(())
//! }
//! ```

mod dispatch;
mod leaf;
mod print;
mod rounding;
mod tree;

pub use tree::{LayoutTree, TreeConfig};
pub use trellis_core::{Layout, MeasureFunc, NodeId, TreeError, TreeResult};
pub use trellis_layout_grid::{AutoRepeatStrategy, auto_repetition_count};
pub use trellis_style::*;
