//! Errors of structural edits.

use core::fmt::{Display, Formatter, Result as FmtResult};

use migrid_syntax::ConstraintError;
use thiserror::Error;

/// Axis a structural edit works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridAxis {
    Column,
    Row,
}

impl Display for GridAxis {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        formatter.write_str(match self {
            Self::Column => "column",
            Self::Row => "row",
        })
    }
}

/// Failure of a grid operation. The model is unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("{axis} index {index} out of range for {count} {axis}s")]
    IndexOutOfRange {
        axis: GridAxis,
        index: usize,
        count: usize,
    },
    /// The component has no placement in this grid.
    #[error("unknown component {0}")]
    UnknownComponent(String),
    /// The component already has a placement in this grid.
    #[error("component {0} is already placed")]
    DuplicateComponent(String),
    #[error(transparent)]
    Constraint(#[from] ConstraintError),
}
