//! Layout utility types and traits for the dispatch system.
//!
//! This crate defines the abstraction that lets the block, flex and grid algorithms
//! lay out each other's boxes without circular crate dependencies, plus the box-model
//! arithmetic they share.

mod box_model;
mod host;
mod maybe_math;
mod positioning;

pub use box_model::{ResolvedBox, relative_offset, resolve_box};
pub use host::LayoutHost;
pub use maybe_math::MaybeMath;
pub use positioning::{AbsoluteContainer, content_size_contribution, layout_absolute_child};
