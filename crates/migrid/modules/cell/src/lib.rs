//! Per-component placement constraints.
//!
//! [`CellConstraints`] is the editable view of one component's constraint string
//! (`"cell 1 2 3 4, alignx right, growy"`). Components without an explicit `cell` are
//! positioned by [`FlowContext`], which replays the implicit flow of the layout.

#![forbid(unsafe_code)]

mod constraints;
mod flow;
mod rect;
mod tokens;

pub use constraints::CellConstraints;
pub use flow::{FlowContext, FlowDirection};
pub use rect::CellRect;
pub use tokens::{DockSide, GapToken, LineBreak, Split};
