//! Column and row dimension specs.
//!
//! A dimension string such as `"[100px]10[min:pref:max,fill,grow]"` describes one track
//! per bracket group plus the gaps between them. [`DimensionSpec`] models one group and
//! [`DimensionList`] the whole string, storing every gap exactly once per boundary.

#![forbid(unsafe_code)]

mod alignment;
mod list;
mod spec;

pub use alignment::{AxisAlignment, ColumnAlignment, RowAlignment};
pub use list::DimensionList;
pub use spec::{ColumnSpec, DEFAULT_WEIGHT, DimensionSpec, RowSpec};
