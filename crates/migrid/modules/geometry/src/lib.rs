//! Pixel geometry of a grid.
//!
//! [`resolve`] turns dimension specs, placements and component sizes into absolute
//! column and row intervals. The result is a read-only projection: it never changes the
//! model it was computed from and is recomputed whenever geometry is needed.

#![forbid(unsafe_code)]

mod axis;
mod config;
mod geometry;
mod types;

pub use axis::AxisGeometry;
pub use config::{GeometryConfig, Insets};
pub use geometry::{GridGeometry, resolve};
pub use migrid_cell::CellRect;
pub use types::{ComponentSizes, Interval, PixelRect, SizeProvider};
