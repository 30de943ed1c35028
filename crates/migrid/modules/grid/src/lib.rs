//! Structural grid model.
//!
//! [`GridModel`] owns the column and row specs of a layout together with the placement
//! of every component, and keeps them consistent while columns, rows and components are
//! inserted, deleted, moved and split. Every coordinate shift goes through
//! [`AxisEdit::remap`], so the straddling rules live in one place.

#![forbid(unsafe_code)]

mod config;
mod error;
mod model;
mod placement;
mod remap;
mod structure;

pub use config::LayoutConfig;
pub use error::{GridAxis, GridError};
pub use model::GridModel;
pub use remap::{AxisEdit, SpanRemap};
