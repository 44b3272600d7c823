//! Node arena, measurement cache and layout records for the trellis layout engine.
//!
//! The arena owns every node; callers hold [`NodeId`] handles. Layout algorithms
//! never see the arena directly, they go through the host trait in
//! `trellis_layout_util`.

mod arena;
mod cache;
mod error;
mod layout;
mod node;

pub use arena::NodeArena;
pub use cache::Cache;
pub use error::{TreeError, TreeResult};
pub use layout::{Layout, LayoutInput, LayoutOutput, RequestedAxis, RunMode, SizingMode};
pub use node::{MeasureFunc, NodeId};
