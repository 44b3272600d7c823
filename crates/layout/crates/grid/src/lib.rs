//! CSS Grid Layout Module Level 2: grid formatting context.
//! Spec: <https://www.w3.org/TR/css-grid-2/>
//!
//! Tracks of both axes live in one list per axis with a gutter entry at every grid
//! line, so spanned sizes and offsets include the gaps between tracks.

mod alignment;
mod explicit;
mod implicit;
mod layout;
mod placement;
mod track_sizing;
mod types;

pub use explicit::{AutoRepeatStrategy, auto_repetition_count, explicit_track_count};
pub use layout::compute_grid_layout;
