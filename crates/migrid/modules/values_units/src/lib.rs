//! Size expressions and units of the constraint language.
//!
//! A size is written `100px`, `2.5cm`, `30%`, `10sp`, a keyword such as `pref`, or left
//! out entirely (the component decides). Physical and screen relative units depend on
//! the host display, which is passed in as [`DisplayMetrics`] rather than read from a
//! global.

#![forbid(unsafe_code)]

mod metrics;
mod size;

pub use metrics::{DisplayMetrics, Orientation, UnitContext};
pub use size::{Length, LengthUnit, Size, SizeKeyword, to_unit_string};
