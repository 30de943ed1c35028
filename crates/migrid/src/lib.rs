//! Grid constraint layouts.
//!
//! A layout is described by a column string, a row string and one constraint string per
//! component:
//!
//! ```text
//! columns: "[100px][grow,fill]"
//! rows:    "[]10[]"
//! button:  "cell 1 0, alignx right"
//! ```
//!
//! [`parse_layout`] reads the first two into a [`GridModel`], components are attached
//! with [`GridModel::parse_and_attach`], and the model is then edited structurally
//! (insert, delete, move or split columns and rows, drag components between cells) and
//! written back with [`GridModel::serialize`] and [`GridModel::cell_string`]. Pixel
//! positions come from [`GridModel::resolve_geometry`].

#![forbid(unsafe_code)]

mod layout_constraints;

use core::fmt::Debug;
use core::hash::Hash;

pub use layout_constraints::LayoutConstraints;
pub use migrid_cell::{
    CellConstraints, CellRect, DockSide, FlowContext, FlowDirection, GapToken, LineBreak, Split,
};
pub use migrid_dimension::{
    AxisAlignment, ColumnAlignment, ColumnSpec, DimensionList, DimensionSpec, RowAlignment, RowSpec,
};
pub use migrid_geometry::{
    AxisGeometry, ComponentSizes, GeometryConfig, GridGeometry, Insets, Interval, PixelRect,
    SizeProvider, resolve,
};
pub use migrid_grid::{AxisEdit, GridAxis, GridError, GridModel, LayoutConfig, SpanRemap};
pub use migrid_syntax::{ConstraintError, ParseError};
pub use migrid_values_units::{
    DisplayMetrics, Length, LengthUnit, Orientation, Size, SizeKeyword, UnitContext, to_unit_string,
};

/// Parse column and row dimension strings with the default layout settings.
///
/// # Errors
/// Fails when either string is malformed.
pub fn parse_layout<Id>(column_spec: &str, row_spec: &str) -> Result<GridModel<Id>, ParseError>
where
    Id: Clone + Eq + Hash + Debug,
{
    parse_layout_with(column_spec, row_spec, LayoutConfig::default())
}

/// Parse column and row dimension strings with explicit layout settings.
///
/// # Errors
/// Fails when either string is malformed.
pub fn parse_layout_with<Id>(
    column_spec: &str,
    row_spec: &str,
    config: LayoutConfig,
) -> Result<GridModel<Id>, ParseError>
where
    Id: Clone + Eq + Hash + Debug,
{
    GridModel::parse(column_spec, row_spec, config)
}

/// Parse a complete layout: its own constraint string on top of `base`, then the
/// column and row strings.
///
/// # Errors
/// Fails when any of the three strings is malformed.
pub fn parse_constrained_layout<Id>(
    layout: &str,
    column_spec: &str,
    row_spec: &str,
    base: LayoutConfig,
) -> Result<(GridModel<Id>, LayoutConstraints), ParseError>
where
    Id: Clone + Eq + Hash + Debug,
{
    let constraints = LayoutConstraints::parse(layout)?;
    let mut model = GridModel::parse(column_spec, row_spec, base)?;
    let mut config = base;
    constraints.apply_to(&mut config, model.column_count());
    model.set_config(config);
    log::debug!("layout constraints `{constraints}` applied: {config:?}");
    Ok((model, constraints))
}
