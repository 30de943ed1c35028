use serde::{Deserialize, Serialize};

/// Direction a size is measured in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Widths, column positions.
    Horizontal,
    /// Heights, row positions.
    Vertical,
}

/// Host display characteristics used to evaluate physical and screen relative units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayMetrics {
    /// Horizontal resolution in dots per inch.
    pub dpi_x: f32,
    /// Vertical resolution in dots per inch.
    pub dpi_y: f32,
    /// Screen width in pixels, the base of horizontal `sp` values.
    pub screen_width: f32,
    /// Screen height in pixels, the base of vertical `sp` values.
    pub screen_height: f32,
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self {
            dpi_x: 96.0,
            dpi_y: 96.0,
            screen_width: 1920.0,
            screen_height: 1080.0,
        }
    }
}

impl DisplayMetrics {
    /// Resolution along `orientation`.
    pub fn dpi(&self, orientation: Orientation) -> f32 {
        match orientation {
            Orientation::Horizontal => self.dpi_x,
            Orientation::Vertical => self.dpi_y,
        }
    }

    /// Screen extent along `orientation`.
    pub fn screen_extent(&self, orientation: Orientation) -> f32 {
        match orientation {
            Orientation::Horizontal => self.screen_width,
            Orientation::Vertical => self.screen_height,
        }
    }
}

/// Everything needed to turn a length into pixels along one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitContext {
    pub metrics: DisplayMetrics,
    pub orientation: Orientation,
    /// Reference length for percentages; `None` leaves percentages unresolved.
    pub percent_base: Option<f32>,
}

impl UnitContext {
    /// A context without a percentage base.
    pub fn new(metrics: DisplayMetrics, orientation: Orientation) -> Self {
        Self {
            metrics,
            orientation,
            percent_base: None,
        }
    }

    /// Sets the reference length percentages are taken of.
    #[must_use]
    pub fn with_percent_base(mut self, base: f32) -> Self {
        self.percent_base = Some(base);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// # Panics
    /// Panics if missing fields do not fall back to defaults.
    #[test]
    fn metrics_deserialize_with_defaults() {
        let metrics: DisplayMetrics =
            serde_json::from_str(r#"{"dpi_x": 144.0}"#).unwrap_or_default();
        assert!((metrics.dpi_x - 144.0).abs() < f32::EPSILON);
        assert!((metrics.dpi_y - 96.0).abs() < f32::EPSILON);
        assert!((metrics.screen_extent(Orientation::Vertical) - 1080.0).abs() < f32::EPSILON);
    }
}
