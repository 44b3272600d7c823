//! Style model for the trellis layout engine.
//!
//! Value kinds are closed sum types per category ([`Dimension`], [`LengthPercentage`],
//! [`LengthPercentageAuto`]); `calc()` is the only dynamic piece and lives behind
//! [`CalcExpression`]. Nothing here depends on the node tree.

mod alignment;
mod available_space;
mod calc;
mod flex;
mod geometry;
mod grid;
mod resolve;
mod style;
mod values;

pub use alignment::{AlignContent, AlignItems, AlignSelf, JustifyContent, JustifyItems, JustifySelf};
pub use available_space::AvailableSpace;
pub use calc::CalcExpression;
pub use flex::{FlexDirection, FlexWrap};
pub use geometry::{AbsoluteAxis, Line, Point, Rect, Size};
pub use grid::{
    GridAutoFlow, GridPlacement, GridTrackRepetition, MaxTrackSizingFunction,
    MinTrackSizingFunction, NonRepeatedTrackSizingFunction, TrackSizingFunction, TrackSizingPair,
};
pub use style::{BoxSizing, Direction, Display, Overflow, Position, Style};
pub use values::{Dimension, LengthPercentage, LengthPercentageAuto};
