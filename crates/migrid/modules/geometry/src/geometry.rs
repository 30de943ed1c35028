//! Resolution of a whole grid and the queries answered from the result.

use migrid_cell::{CellConstraints, CellRect};
use migrid_dimension::{ColumnAlignment, DimensionList, RowAlignment};
use migrid_values_units::{Orientation, UnitContext};

use crate::axis::{AxisGeometry, TrackDemand, track_gaps, track_sizes};
use crate::{GeometryConfig, Interval, PixelRect, SizeProvider};

/// Pixel geometry of a grid plus the cells of every placed component.
#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry<Id> {
    columns: AxisGeometry,
    rows: AxisGeometry,
    /// Placed components in insertion order.
    cells: Vec<(Id, CellRect)>,
}

impl<Id> GridGeometry<Id> {
    pub fn column_count(&self) -> usize {
        self.columns.count()
    }

    pub fn row_count(&self) -> usize {
        self.rows.count()
    }

    pub fn columns(&self) -> &AxisGeometry {
        &self.columns
    }

    pub fn rows(&self) -> &AxisGeometry {
        &self.rows
    }

    pub fn column_intervals(&self) -> &[Interval] {
        self.columns.intervals()
    }

    pub fn row_intervals(&self) -> &[Interval] {
        self.rows.intervals()
    }

    /// Interval of column `index`, extrapolated past the last column.
    pub fn column_interval(&self, index: usize) -> Interval {
        self.columns.interval(index)
    }

    /// Interval of row `index`, extrapolated past the last row.
    pub fn row_interval(&self, index: usize) -> Interval {
        self.rows.interval(index)
    }

    /// Pixel rectangle from the start of the first covered column and row to the end
    /// of the last, one pixel wider and taller than the covered intervals.
    pub fn cells_rectangle(&self, rect: CellRect) -> PixelRect {
        let first_column = self.column_interval(rect.x);
        let last_column = self.column_interval(rect.right().saturating_sub(1).max(rect.x));
        let first_row = self.row_interval(rect.y);
        let last_row = self.row_interval(rect.bottom().saturating_sub(1).max(rect.y));
        PixelRect {
            x: first_column.start,
            y: first_row.start,
            width: last_column.end().saturating_sub(first_column.start).saturating_add(1),
            height: last_row.end().saturating_sub(first_row.start).saturating_add(1),
        }
    }

    /// Column containing the horizontal position `pixel`.
    pub fn column_at(&self, pixel: i32) -> Option<usize> {
        self.columns.index_at(pixel)
    }

    /// Row containing the vertical position `pixel`.
    pub fn row_at(&self, pixel: i32) -> Option<usize> {
        self.rows.index_at(pixel)
    }

    /// Cell under the point (`x`, `y`).
    pub fn cell_at(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        Some((self.column_at(x)?, self.row_at(y)?))
    }

    /// The first component, in insertion order, covering the cell.
    pub fn occupant_at(&self, column: usize, row: usize) -> Option<&Id> {
        self.cells
            .iter()
            .find(|(_, rect)| rect.contains(column, row))
            .map(|(id, _)| id)
    }

    /// Every placed component with its cells.
    pub fn placements(&self) -> impl Iterator<Item = (&Id, CellRect)> {
        self.cells.iter().map(|(id, rect)| (id, *rect))
    }
}

impl<Id: PartialEq> GridGeometry<Id> {
    /// Cells covered by `id`; `None` if it is docked or unknown.
    pub fn component_cells(&self, id: &Id) -> Option<CellRect> {
        self.cells
            .iter()
            .find(|(candidate, _)| candidate == id)
            .map(|(_, rect)| *rect)
    }
}

fn unit_context(config: &GeometryConfig, orientation: Orientation) -> UnitContext {
    let context = UnitContext::new(config.metrics, orientation);
    match (config.container_size, orientation) {
        (Some((width, _)), Orientation::Horizontal) => context.with_percent_base(width),
        (Some((_, height)), Orientation::Vertical) => context.with_percent_base(height),
        (None, _) => context,
    }
}

/// Compute the pixel geometry of a grid.
///
/// Docked placements take no cell and are ignored. `provider` is asked once for each
/// remaining component. Neither the specs nor the placements are modified.
pub fn resolve<'model, Id, P>(
    columns: &DimensionList<ColumnAlignment>,
    rows: &DimensionList<RowAlignment>,
    placements: impl IntoIterator<Item = (&'model Id, &'model CellConstraints)>,
    config: &GeometryConfig,
    provider: &P,
) -> GridGeometry<Id>
where
    Id: Clone + 'model,
    P: SizeProvider<Id> + ?Sized,
{
    let mut cells = Vec::new();
    let mut column_demands = Vec::new();
    let mut row_demands = Vec::new();
    for (id, constraints) in placements {
        if constraints.is_docked() {
            continue;
        }
        let rect = constraints.cell_rect();
        let sizes = provider.sizes(id);
        let cap = |size: i32, max: Option<i32>| max.map_or(size, |limit| size.min(limit));
        column_demands.push(TrackDemand {
            start: rect.x,
            span: rect.width,
            minimum: sizes.min_width,
            preferred: cap(sizes.preferred_width, sizes.max_width),
        });
        row_demands.push(TrackDemand {
            start: rect.y,
            span: rect.height,
            minimum: sizes.min_height,
            preferred: cap(sizes.preferred_height, sizes.max_height),
        });
        cells.push((id.clone(), rect));
    }

    let column_count = cells
        .iter()
        .map(|(_, rect)| rect.right())
        .fold(columns.len(), usize::max);
    let row_count = cells
        .iter()
        .map(|(_, rect)| rect.bottom())
        .fold(rows.len(), usize::max);

    let horizontal = unit_context(config, Orientation::Horizontal);
    let vertical = unit_context(config, Orientation::Vertical);
    let column_axis = AxisGeometry::build(
        &track_sizes(columns, &column_demands, column_count, &horizontal, config.virtual_column_width),
        &track_gaps(columns, column_count, &horizontal, config.column_gap),
        config.insets.left,
        config.column_gap,
        config.virtual_column_width,
    );
    let row_axis = AxisGeometry::build(
        &track_sizes(rows, &row_demands, row_count, &vertical, config.virtual_row_height),
        &track_gaps(rows, row_count, &vertical, config.row_gap),
        config.insets.top,
        config.row_gap,
        config.virtual_row_height,
    );
    tracing::debug!(
        "resolved grid geometry: columns={} width={}, rows={} height={}, components={}",
        column_axis.count(),
        column_axis.extent(),
        row_axis.count(),
        row_axis.extent(),
        cells.len()
    );

    GridGeometry {
        columns: column_axis,
        rows: row_axis,
        cells,
    }
}
