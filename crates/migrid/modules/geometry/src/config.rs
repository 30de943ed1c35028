//! Geometry settings.

use migrid_values_units::DisplayMetrics;
use serde::{Deserialize, Serialize};

/// Space between the container edge and the grid, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl Insets {
    /// The same inset on every side.
    pub fn uniform(inset: i32) -> Self {
        Self {
            top: inset,
            left: inset,
            bottom: inset,
            right: inset,
        }
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::uniform(7)
    }
}

/// Inputs of geometry resolution that do not come from the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub insets: Insets,
    /// Gap between columns where no explicit gap is written.
    pub column_gap: i32,
    /// Gap between rows where no explicit gap is written.
    pub row_gap: i32,
    /// Width of a column nothing gives a size to.
    pub virtual_column_width: i32,
    /// Height of a row nothing gives a size to.
    pub virtual_row_height: i32,
    pub metrics: DisplayMetrics,
    /// Container width and height, the reference for percentages.
    pub container_size: Option<(f32, f32)>,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            insets: Insets::default(),
            column_gap: 5,
            row_gap: 5,
            virtual_column_width: 25,
            virtual_row_height: 25,
            metrics: DisplayMetrics::default(),
            container_size: None,
        }
    }
}
