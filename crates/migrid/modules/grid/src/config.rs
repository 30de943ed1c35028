//! Layout-wide settings.

use std::env;

use migrid_cell::FlowDirection;
use migrid_geometry::{GeometryConfig, Insets};
use migrid_values_units::DisplayMetrics;
use serde::{Deserialize, Serialize};

/// Settings that apply to a whole layout rather than one component.
///
/// The flow direction used to be a platform-wide default; here it is threaded
/// explicitly into parsing and geometry resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Direction implicitly placed components advance in.
    pub flow: FlowDirection,
    /// Wrap the flow after this many cells.
    pub wrap_after: Option<usize>,
    pub geometry: GeometryConfig,
}

impl LayoutConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `MIGRID_FLOW`: `x` or `y` (default: `x`)
    /// - `MIGRID_WRAP`: wrap the flow after this many cells
    /// - `MIGRID_GAP_PX`: default column and row gap (default: 5)
    /// - `MIGRID_INSET_PX`: inset on every side (default: 7)
    /// - `MIGRID_VIRTUAL_PX`: size of empty columns and rows (default: 25)
    /// - `MIGRID_DPI`: display resolution (default: 96)
    ///
    /// Missing or malformed values fall back to the defaults.
    #[inline]
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`Self::from_env`], reading variables through `lookup`.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = |key: &str| lookup(key).and_then(|value| value.trim().parse::<i32>().ok());
        let mut config = Self::default();
        match lookup("MIGRID_FLOW").as_deref().map(str::trim) {
            Some("y" | "Y" | "flowy") => config.flow = FlowDirection::Vertical,
            Some("x" | "X" | "flowx") => config.flow = FlowDirection::Horizontal,
            _ => {}
        }
        config.wrap_after = lookup("MIGRID_WRAP")
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|limit| *limit > 0);
        if let Some(gap) = parsed("MIGRID_GAP_PX").filter(|gap| *gap >= 0) {
            config.geometry.column_gap = gap;
            config.geometry.row_gap = gap;
        }
        if let Some(inset) = parsed("MIGRID_INSET_PX").filter(|inset| *inset >= 0) {
            config.geometry.insets = Insets::uniform(inset);
        }
        if let Some(size) = parsed("MIGRID_VIRTUAL_PX").filter(|size| *size > 0) {
            config.geometry.virtual_column_width = size;
            config.geometry.virtual_row_height = size;
        }
        if let Some(dpi) = lookup("MIGRID_DPI")
            .and_then(|value| value.trim().parse::<f32>().ok())
            .filter(|dpi| *dpi > 0.0)
        {
            config.geometry.metrics = DisplayMetrics {
                dpi_x: dpi,
                dpi_y: dpi,
                ..config.geometry.metrics
            };
        }
        config
    }
}
