//! Constraint mini-language syntax.
//!
//! Placement strings (`"cell 1 2 3 4, alignx right, growy"`) and dimension strings
//! (`"[100px]10[grow,fill]"`) share one lexical layer: `cssparser` turns the text into
//! tokens, and this crate groups them into comma separated [`Segment`]s and bracket
//! bodies. The raw text of every segment is kept so that anything the higher layers do
//! not understand can be written back unchanged.

#![forbid(unsafe_code)]

mod brackets;
mod error;
mod number;
mod segment;

pub use brackets::{BracketList, split_bracket_groups};
pub use error::{ConstraintError, ParseError};
pub use number::format_number;
pub use segment::{Atom, Segment, split_segments};
