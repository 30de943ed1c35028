//! Rectangles measured in grid cells.

/// Cells occupied by a placement: `width` columns from `x` and `height` rows from `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl CellRect {
    /// Create a new cell rectangle.
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A single cell.
    pub fn cell(x: usize, y: usize) -> Self {
        Self::new(x, y, 1, 1)
    }

    /// First column after the rectangle.
    pub fn right(&self) -> usize {
        self.x + self.width
    }

    /// First row after the rectangle.
    pub fn bottom(&self) -> usize {
        self.y + self.height
    }

    /// Check if the cell at (`column`, `row`) lies inside.
    pub fn contains(&self, column: usize, row: usize) -> bool {
        (self.x..self.right()).contains(&column) && (self.y..self.bottom()).contains(&row)
    }

    /// Check if this rectangle shares at least one cell with another.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Every covered cell as `(column, row)`, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.y..self.bottom()).flat_map(move |row| (self.x..self.right()).map(move |column| (column, row)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// # Panics
    /// Panics if containment or overlap is computed wrongly.
    #[test]
    fn containment_and_overlap() {
        let area = CellRect::new(1, 1, 2, 3);
        assert!(area.contains(2, 3));
        assert!(!area.contains(3, 1));
        assert!(area.overlaps(&CellRect::cell(2, 2)));
        assert!(!area.overlaps(&CellRect::cell(0, 0)));
        assert_eq!(area.cells().count(), 6);
        assert_eq!(area.right(), 3);
        assert_eq!(area.bottom(), 4);
    }
}
