//! Implicit placement of components that carry no `cell` token.

use serde::{Deserialize, Serialize};

use crate::{CellConstraints, CellRect, Split};

/// Direction in which implicitly placed components advance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowDirection {
    /// Left to right, wrapping to the next row.
    #[default]
    Horizontal,
    /// Top to bottom, wrapping to the next column.
    Vertical,
}

/// Cursor over the grid that replays the layout's implicit flow.
///
/// Positions are tracked as (along the flow, across the flow) so both directions share
/// one algorithm. Explicit cells should be [`reserved`](Self::reserve) before any
/// component is placed so that the flow steps around them.
#[derive(Debug, Clone)]
pub struct FlowContext {
    direction: FlowDirection,
    wrap_after: Option<usize>,
    cursor: (usize, usize),
    /// Rectangles already taken, in grid coordinates.
    reserved: Vec<CellRect>,
    wrap_pending: bool,
    /// Components still to be put into the cell of the last split.
    split_remaining: usize,
    last_cell: Option<(usize, usize)>,
}

impl FlowContext {
    /// Create a new flow starting at cell (0, 0).
    pub fn new(direction: FlowDirection, wrap_after: Option<usize>) -> Self {
        Self {
            direction,
            wrap_after: wrap_after.filter(|limit| *limit > 0),
            cursor: (0, 0),
            reserved: Vec::new(),
            wrap_pending: false,
            split_remaining: 0,
            last_cell: None,
        }
    }

    /// Mark every cell of `rect` as taken.
    pub fn reserve(&mut self, rect: CellRect) {
        self.reserved.push(rect);
    }

    /// Grid cell (x, y) for a flow position.
    fn to_grid(&self, along: usize, across: usize) -> (usize, usize) {
        match self.direction {
            FlowDirection::Horizontal => (along, across),
            FlowDirection::Vertical => (across, along),
        }
    }

    /// Extent of `rect` as (along, across).
    fn oriented(&self, rect: CellRect) -> (usize, usize) {
        match self.direction {
            FlowDirection::Horizontal => (rect.width, rect.height),
            FlowDirection::Vertical => (rect.height, rect.width),
        }
    }

    fn next_line(&mut self) {
        self.cursor = (0, self.cursor.1 + 1);
        self.wrap_pending = false;
    }

    /// Grid rectangle covering `span_along` x `span_across` cells at the cursor.
    fn candidate(&self, span_along: usize, span_across: usize) -> CellRect {
        let (x, y) = self.to_grid(self.cursor.0, self.cursor.1);
        match self.direction {
            FlowDirection::Horizontal => CellRect::new(x, y, span_along, span_across),
            FlowDirection::Vertical => CellRect::new(x, y, span_across, span_along),
        }
    }

    /// First position along the flow past a reserved rectangle blocking the cursor.
    fn blocked_until(&self, span_along: usize, span_across: usize) -> Option<usize> {
        let candidate = self.candidate(span_along, span_across);
        self.reserved
            .iter()
            .find(|rect| rect.overlaps(&candidate))
            .map(|rect| match self.direction {
                FlowDirection::Horizontal => rect.right(),
                FlowDirection::Vertical => rect.bottom(),
            })
    }

    /// Move the cursor forward until a free area of the given extent is found, jumping
    /// past each blocking rectangle at once.
    fn advance_to_free(&mut self, span_along: usize, span_across: usize) {
        loop {
            if let Some(limit) = self.wrap_after
                && self.cursor.0 > 0
                && self.cursor.0 + span_along > limit
            {
                self.next_line();
                continue;
            }
            match self.blocked_until(span_along, span_across) {
                Some(end) => self.cursor.0 = end,
                None => return,
            }
        }
    }

    /// Record a placement and move the cursor past it.
    fn finish(&mut self, rect: CellRect, constraints: &CellConstraints) {
        let (along, across) = match self.direction {
            FlowDirection::Horizontal => (rect.x, rect.y),
            FlowDirection::Vertical => (rect.y, rect.x),
        };
        let (span_along, _) = self.oriented(rect);
        self.cursor = (along + span_along, across);
        self.last_cell = Some((rect.x, rect.y));
        self.split_remaining = match constraints.split() {
            Some(Split::Remaining) => usize::MAX,
            Some(Split::Count(count)) => (count as usize).saturating_sub(1),
            None => 0,
        };
        self.wrap_pending = constraints.wrap().is_some()
            || self
                .wrap_after
                .is_some_and(|limit| self.cursor.0 >= limit);
    }

    /// Cell (x, y) where `constraints` lands, advancing the flow.
    pub fn place(&mut self, constraints: &CellConstraints) -> (usize, usize) {
        let rect = constraints.cell_rect();
        if constraints.is_explicit() {
            self.reserve(rect);
            self.finish(rect, constraints);
            return (rect.x, rect.y);
        }
        if self.split_remaining > 0
            && let Some(cell) = self.last_cell
        {
            self.split_remaining -= 1;
            if constraints.wrap().is_some() {
                self.split_remaining = 0;
                self.wrap_pending = true;
            }
            return cell;
        }
        if self.wrap_pending || constraints.newline().is_some() {
            self.next_line();
        }
        let (span_along, span_across) = self.oriented(rect);
        for _ in 0..constraints.skip().unwrap_or(0) {
            self.advance_to_free(1, 1);
            self.cursor.0 += 1;
        }
        self.advance_to_free(span_along, span_across);
        let (x, y) = self.to_grid(self.cursor.0, self.cursor.1);
        let placed = CellRect::new(x, y, rect.width, rect.height);
        self.reserve(placed);
        self.finish(placed, constraints);
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow(direction: FlowDirection, wrap_after: Option<usize>, texts: &[&str]) -> Vec<(usize, usize)> {
        let mut placements: Vec<CellConstraints> = texts
            .iter()
            .map(|text| {
                CellConstraints::parse(text)
                    .map(|(constraints, _)| constraints)
                    .unwrap_or_default()
            })
            .collect();
        let mut context = FlowContext::new(direction, wrap_after);
        for constraints in placements.iter().filter(|constraints| constraints.is_explicit()) {
            context.reserve(constraints.cell_rect());
        }
        placements
            .iter_mut()
            .map(|constraints| {
                constraints.apply_flow(&mut context);
                (constraints.x(), constraints.y())
            })
            .collect()
    }

    /// # Panics
    /// Panics if wrap and newline do not start a new row.
    #[test]
    fn wraps_and_breaks_lines() {
        let cells = flow(FlowDirection::Horizontal, None, &["", "wrap", "", "newline", ""]);
        assert_eq!(cells, vec![(0, 0), (1, 0), (0, 1), (0, 2), (1, 2)]);
    }

    /// # Panics
    /// Panics if explicit cells are not stepped around.
    #[test]
    fn flows_around_explicit_cells() {
        let cells = flow(FlowDirection::Horizontal, None, &["", "cell 1 0", "", "skip", ""]);
        assert_eq!(cells, vec![(0, 0), (1, 0), (2, 0), (4, 0), (5, 0)]);
        let reserved = flow(FlowDirection::Horizontal, None, &["", "", "cell 1 0"]);
        assert_eq!(reserved, vec![(0, 0), (2, 0), (1, 0)]);
    }

    /// # Panics
    /// Panics if split groups do not share a cell.
    #[test]
    fn split_keeps_components_together() {
        let cells = flow(FlowDirection::Horizontal, None, &["split 2", "", "", "split", "", "wrap", ""]);
        assert_eq!(
            cells,
            vec![(0, 0), (0, 0), (1, 0), (2, 0), (2, 0), (2, 0), (0, 1)]
        );
    }

    /// # Panics
    /// Panics if the wrap limit or vertical flow is ignored.
    #[test]
    fn wrap_limit_and_vertical_flow() {
        let cells = flow(FlowDirection::Horizontal, Some(2), &["", "spanx 2", "", ""]);
        assert_eq!(cells, vec![(0, 0), (0, 1), (0, 2), (1, 2)]);
        let vertical = flow(FlowDirection::Vertical, None, &["", "", "wrap", ""]);
        assert_eq!(vertical, vec![(0, 0), (0, 1), (0, 2), (1, 0)]);
    }

    /// # Panics
    /// Panics if a huge explicit cell is not stepped over in one jump.
    #[test]
    fn huge_reservations_are_skipped() {
        let cells = flow(FlowDirection::Horizontal, None, &["cell 0 0 60000 60000", "", "cell 60000 0", ""]);
        assert_eq!(cells, vec![(0, 0), (60001, 0), (60000, 0), (60002, 0)]);
        let vertical = flow(FlowDirection::Vertical, None, &["", "cell 0 1 3 50000", ""]);
        assert_eq!(vertical, vec![(0, 0), (0, 1), (0, 50001)]);
    }

    /// # Panics
    /// Panics if the flow direction does not round-trip through serde.
    #[test]
    fn flow_direction_serde() {
        let json = serde_json::to_string(&FlowDirection::Vertical).unwrap_or_default();
        assert_eq!(json, "\"vertical\"");
    }
}
