//! Column and row edits.

use core::fmt::Debug;
use core::hash::Hash;

use migrid_cell::CellRect;
use migrid_dimension::{AxisAlignment, DimensionList, DimensionSpec};

use crate::{AxisEdit, GridAxis, GridError, GridModel, SpanRemap};

/// Apply `edit` to the specs of one axis.
fn edit_list<A: AxisAlignment>(list: &mut DimensionList<A>, edit: AxisEdit) {
    match edit {
        AxisEdit::Insert(index) => list.insert(index, DimensionSpec::default()),
        AxisEdit::Delete(index) => {
            list.remove(index);
        }
        AxisEdit::Split(index) => {
            list.duplicate(index);
        }
        AxisEdit::Move { from, to } => {
            list.move_spec(from, to);
        }
    }
}

/// `rect` with its extent along `axis` replaced.
fn with_span(rect: CellRect, axis: GridAxis, start: usize, span: usize) -> CellRect {
    match axis {
        GridAxis::Column => CellRect::new(start, rect.y, span, rect.height),
        GridAxis::Row => CellRect::new(rect.x, start, rect.width, span),
    }
}

fn check_index(axis: GridAxis, index: usize, count: usize) -> Result<(), GridError> {
    if index < count {
        Ok(())
    } else {
        Err(GridError::IndexOutOfRange { axis, index, count })
    }
}

fn span_of(rect: CellRect, axis: GridAxis) -> (usize, usize) {
    match axis {
        GridAxis::Column => (rect.x, rect.width),
        GridAxis::Row => (rect.y, rect.height),
    }
}

impl<Id> GridModel<Id>
where
    Id: Clone + Eq + Hash + Debug,
{
    /// Insert a default column at `index`, shifting or widening placements.
    ///
    /// # Errors
    /// Fails when `index` is greater than the column count.
    pub fn insert_column(&mut self, index: usize) -> Result<(), GridError> {
        self.edit_axis(GridAxis::Column, AxisEdit::Insert(index))
    }

    /// Insert a default row at `index`, shifting or widening placements.
    ///
    /// # Errors
    /// Fails when `index` is greater than the row count.
    pub fn insert_row(&mut self, index: usize) -> Result<(), GridError> {
        self.edit_axis(GridAxis::Row, AxisEdit::Insert(index))
    }

    /// Delete column `index`. Placements owning only that column are parked as
    /// orphans, see [`Self::take_orphans`].
    ///
    /// # Errors
    /// Fails when `index` is not an existing column.
    pub fn delete_column(&mut self, index: usize) -> Result<(), GridError> {
        self.edit_axis(GridAxis::Column, AxisEdit::Delete(index))
    }

    /// Delete row `index`. Placements owning only that row are parked as orphans.
    ///
    /// # Errors
    /// Fails when `index` is not an existing row.
    pub fn delete_row(&mut self, index: usize) -> Result<(), GridError> {
        self.edit_axis(GridAxis::Row, AxisEdit::Delete(index))
    }

    /// Reset column `index` to the default spec. Placements are untouched.
    ///
    /// # Errors
    /// Fails when `index` is not an existing column.
    pub fn clear_column(&mut self, index: usize) -> Result<(), GridError> {
        check_index(GridAxis::Column, index, self.columns.len())?;
        self.columns.reset(index);
        log::debug!("cleared column {index}");
        Ok(())
    }

    /// Reset row `index` to the default spec. Placements are untouched.
    ///
    /// # Errors
    /// Fails when `index` is not an existing row.
    pub fn clear_row(&mut self, index: usize) -> Result<(), GridError> {
        check_index(GridAxis::Row, index, self.rows.len())?;
        self.rows.reset(index);
        log::debug!("cleared row {index}");
        Ok(())
    }

    /// Duplicate column `index` into two neighbors.
    ///
    /// # Errors
    /// Fails when `index` is not an existing column.
    pub fn split_column(&mut self, index: usize) -> Result<(), GridError> {
        self.edit_axis(GridAxis::Column, AxisEdit::Split(index))
    }

    /// Duplicate row `index` into two neighbors.
    ///
    /// # Errors
    /// Fails when `index` is not an existing row.
    pub fn split_row(&mut self, index: usize) -> Result<(), GridError> {
        self.edit_axis(GridAxis::Row, AxisEdit::Split(index))
    }

    /// Move column `from` to position `to`, remapping every placement.
    ///
    /// # Errors
    /// Fails when either index is not an existing column.
    pub fn move_column(&mut self, from: usize, to: usize) -> Result<(), GridError> {
        self.edit_axis(GridAxis::Column, AxisEdit::Move { from, to })
    }

    /// Move row `from` to position `to`, remapping every placement.
    ///
    /// # Errors
    /// Fails when either index is not an existing row.
    pub fn move_row(&mut self, from: usize, to: usize) -> Result<(), GridError> {
        self.edit_axis(GridAxis::Row, AxisEdit::Move { from, to })
    }

    /// Drop columns and rows no placement covers, first at the end of each axis and
    /// then at the start. Never removes the last column or row and never adds any.
    pub fn normalize_spanning(&mut self) {
        let columns = self.trim_axis(GridAxis::Column);
        let rows = self.trim_axis(GridAxis::Row);
        if columns + rows > 0 {
            log::debug!(
                "normalized grid: removed {columns} columns and {rows} rows, now {}x{}",
                self.columns.len(),
                self.rows.len()
            );
        }
    }

    fn trim_axis(&mut self, axis: GridAxis) -> usize {
        let mut removed = 0;
        while self.track_count(axis) > 1 && !self.is_track_used(axis, self.track_count(axis) - 1) {
            let last = self.track_count(axis) - 1;
            self.edit_specs(axis, AxisEdit::Delete(last));
            removed += 1;
        }
        if self.track_count(axis) > 1 && !self.is_track_used(axis, 0) {
            self.make_cells_explicit();
            while self.track_count(axis) > 1 && !self.is_track_used(axis, 0) {
                self.edit_specs(axis, AxisEdit::Delete(0));
                self.remap_placements(axis, AxisEdit::Delete(0));
                removed += 1;
            }
        }
        removed
    }

    fn is_track_used(&self, axis: GridAxis, index: usize) -> bool {
        self.placements
            .values()
            .filter(|constraints| !constraints.is_docked())
            .any(|constraints| {
                let (start, span) = span_of(constraints.cell_rect(), axis);
                (start..start + span).contains(&index)
            })
    }

    pub(crate) fn check_edit(&self, axis: GridAxis, edit: AxisEdit) -> Result<(), GridError> {
        let count = self.track_count(axis);
        match edit {
            AxisEdit::Insert(index) => check_index(axis, index, count + 1),
            AxisEdit::Delete(index) | AxisEdit::Split(index) => check_index(axis, index, count),
            AxisEdit::Move { from, to } => {
                check_index(axis, from, count)?;
                check_index(axis, to, count)
            }
        }
    }

    /// Validate `edit`, then apply it to the specs and every placement.
    pub(crate) fn edit_axis(&mut self, axis: GridAxis, edit: AxisEdit) -> Result<(), GridError> {
        self.check_edit(axis, edit)?;
        self.make_cells_explicit();
        self.edit_specs(axis, edit);
        self.remap_placements(axis, edit);
        self.fit_to_placements();
        log::debug!(
            "{axis} edit {edit:?}: grid is now {}x{}",
            self.columns.len(),
            self.rows.len()
        );
        Ok(())
    }

    fn edit_specs(&mut self, axis: GridAxis, edit: AxisEdit) {
        match axis {
            GridAxis::Column => edit_list(&mut self.columns, edit),
            GridAxis::Row => edit_list(&mut self.rows, edit),
        }
    }

    /// Move every non-docked placement through `edit`, parking the orphans.
    fn remap_placements(&mut self, axis: GridAxis, edit: AxisEdit) {
        let mut moved = Vec::new();
        let mut orphaned = Vec::new();
        for (id, constraints) in &self.placements {
            if constraints.is_docked() {
                continue;
            }
            let rect = constraints.cell_rect();
            let (start, span) = span_of(rect, axis);
            match edit.remap(start, span) {
                SpanRemap::Keep {
                    start: new_start,
                    span: new_span,
                } => moved.push((id.clone(), with_span(rect, axis, new_start, new_span))),
                SpanRemap::Orphaned => orphaned.push(id.clone()),
            }
        }
        let heirs = self.marker_heirs(&orphaned);
        for id in orphaned {
            if let Some(mut constraints) = self.placements.shift_remove(&id) {
                constraints.set_horizontal_split(None);
                log::warn!("{axis} edit {edit:?} orphaned component {id:?}");
                self.orphans.push((id, constraints));
            }
        }
        for (id, rect) in moved {
            if let Some(constraints) = self.placements.get_mut(&id)
                && let Err(error) = constraints.set_cell_rect(rect)
            {
                log::warn!("could not move {id:?} to {rect:?}: {error}");
            }
        }
        for (heir, marker) in heirs {
            if let Some(constraints) = self.placements.get_mut(&heir) {
                constraints.set_horizontal_split(Some(marker));
            }
        }
    }

    /// For every split group led by one of `orphaned`, the first surviving member and
    /// the flow marker it takes over.
    fn marker_heirs(&self, orphaned: &[Id]) -> Vec<(Id, bool)> {
        orphaned
            .iter()
            .filter_map(|id| {
                let constraints = self.placements.get(id)?;
                let marker = constraints.horizontal_split()?;
                let group = self.cell_group(constraints.x(), constraints.y());
                if group.first() != Some(id) {
                    return None;
                }
                group
                    .into_iter()
                    .find(|member| !orphaned.contains(member))
                    .map(|heir| (heir, marker))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::LayoutConfig;

    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn model(columns: &str, rows: &str, placements: &[(u32, &str)]) -> GridModel<u32> {
        init();
        let mut model = GridModel::parse(columns, rows, LayoutConfig::default()).unwrap_or_default();
        for (id, text) in placements {
            assert!(model.parse_and_attach(*id, text).is_ok());
        }
        model
    }

    fn cell(model: &GridModel<u32>, id: u32) -> String {
        model.cell_string(&id).unwrap_or_default()
    }

    /// # Panics
    /// Panics if splitting a column disturbs its single-column occupants.
    #[test]
    fn split_column_widens_spans() {
        let mut grid = model(
            "[100px][200px][300px]",
            "[][]",
            &[(1, "cell 1 1"), (2, "cell 1 0 2 1"), (3, "cell 2 0")],
        );
        assert!(grid.split_column(1).is_ok());
        assert_eq!(grid.serialize().0, "[100px][200px][200px][300px]");
        assert_eq!(cell(&grid, 1), "cell 1 1");
        assert_eq!(cell(&grid, 2), "cell 1 0 3 1");
        assert_eq!(cell(&grid, 3), "cell 3 0");
    }

    /// # Panics
    /// Panics if moving a column does not remap spans through the permutation.
    #[test]
    fn move_column_remaps_placements() {
        let mut grid = model(
            "[10px][20px][30px][40px][50px]",
            "[][][][][]",
            &[
                (1, "cell 0 0"),
                (2, "cell 0 1 2 1"),
                (3, "cell 3 2"),
                (4, "cell 2 3 3 1"),
                (5, "cell 4 4"),
            ],
        );
        assert!(grid.move_column(3, 1).is_ok());
        assert_eq!(grid.serialize().0, "[10px][40px][20px][30px][50px]");
        assert_eq!(cell(&grid, 1), "cell 0 0");
        assert_eq!(cell(&grid, 2), "cell 0 1 3 1");
        assert_eq!(cell(&grid, 3), "cell 1 2");
        assert_eq!(cell(&grid, 4), "cell 3 3 2 1");
        assert_eq!(cell(&grid, 5), "cell 4 4");
    }

    /// # Panics
    /// Panics if deleting a column does not shift, shrink and orphan placements.
    #[test]
    fn delete_column_orphans_single_owners() {
        let mut grid = model(
            "[][][]",
            "[]",
            &[(1, "cell 1 0"), (2, "cell 0 0 3 1"), (3, "cell 2 0"), (4, "dock west")],
        );
        assert!(grid.delete_column(1).is_ok());
        assert_eq!(grid.column_count(), 2);
        assert_eq!(cell(&grid, 2), "cell 0 0 2 1");
        assert_eq!(cell(&grid, 3), "cell 1 0");
        assert_eq!(cell(&grid, 4), "dock west");
        assert!(grid.constraints(&1).is_none());
        let orphans = grid.take_orphans();
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans.first().map(|(id, _)| *id), Some(1));
        assert!(grid.take_orphans().is_empty());
    }

    /// # Panics
    /// Panics if orphaning a split group's leaders drops the group's flow direction.
    #[test]
    fn orphaned_leaders_pass_marker_to_survivor() {
        let mut grid = model(
            "[][][]",
            "[]",
            &[(1, "cell 1 0,flowy"), (2, "cell 1 0"), (3, "cell 1 0 2 1")],
        );
        assert!(grid.delete_column(1).is_ok());
        assert_eq!(cell(&grid, 3), "flowy,cell 1 0");
        let orphans: Vec<u32> = grid.take_orphans().into_iter().map(|(id, _)| id).collect();
        assert_eq!(orphans, vec![1, 2]);
    }

    /// # Panics
    /// Panics if splitting a row disturbs its single-row occupants.
    #[test]
    fn split_row_widens_spans() {
        let mut grid = model(
            "[][]",
            "[10px][20px][30px]",
            &[(1, "cell 1 1"), (2, "cell 0 1 1 2"), (3, "cell 1 2")],
        );
        assert!(grid.split_row(1).is_ok());
        assert_eq!(grid.serialize().1, "[10px][20px][20px][30px]");
        assert_eq!(cell(&grid, 1), "cell 1 1");
        assert_eq!(cell(&grid, 2), "cell 0 1 1 3");
        assert_eq!(cell(&grid, 3), "cell 1 3");
    }

    /// # Panics
    /// Panics if moving a row does not remap spans through the permutation.
    #[test]
    fn move_row_remaps_placements() {
        let mut grid = model(
            "[][]",
            "[10px][20px][30px]",
            &[(1, "cell 0 0"), (2, "cell 0 1 1 2"), (3, "cell 1 2")],
        );
        assert!(grid.move_row(2, 0).is_ok());
        assert_eq!(grid.serialize().1, "[30px][10px][20px]");
        assert_eq!(cell(&grid, 1), "cell 0 1");
        assert_eq!(cell(&grid, 2), "cell 0 2");
        assert_eq!(cell(&grid, 3), "cell 1 0");
    }

    /// # Panics
    /// Panics if clearing a row touches placements or other rows.
    #[test]
    fn clear_row_only_resets_spec() {
        let mut grid = model("[]", "[10px,top][20px]", &[(1, "cell 0 1")]);
        assert!(grid.clear_row(1).is_ok());
        assert_eq!(grid.serialize().1, "[10px,top][]");
        assert_eq!(cell(&grid, 1), "cell 0 1");
    }

    /// # Panics
    /// Panics if inserting and deleting a row does not restore the placements.
    #[test]
    fn insert_then_delete_restores() {
        let mut grid = model("[][]", "[][][]", &[(1, "cell 0 0"), (2, "cell 1 2"), (3, "")]);
        grid.make_cells_explicit();
        let before: Vec<String> = [1, 2, 3].iter().map(|id| cell(&grid, *id)).collect();
        assert!(grid.insert_row(1).is_ok());
        assert_eq!(cell(&grid, 2), "cell 1 3");
        assert!(grid.delete_row(1).is_ok());
        let after: Vec<String> = [1, 2, 3].iter().map(|id| cell(&grid, *id)).collect();
        assert_eq!(before, after);
        assert_eq!(grid.row_count(), 3);
    }

    /// # Panics
    /// Panics if out of range edits are not rejected or change the model.
    #[test]
    fn rejects_out_of_range_edits() {
        let mut grid = model("[][]", "[]", &[(1, "")]);
        let before = grid.serialize();
        assert_eq!(
            grid.delete_column(2),
            Err(GridError::IndexOutOfRange {
                axis: GridAxis::Column,
                index: 2,
                count: 2
            })
        );
        assert!(grid.insert_column(3).is_err());
        assert!(grid.move_row(0, 1).is_err());
        assert!(grid.clear_row(1).is_err());
        assert_eq!(grid.serialize(), before);
        assert_eq!(cell(&grid, 1), "");
        assert!(grid.insert_column(2).is_ok());
        assert_eq!(grid.column_count(), 3);
    }

    /// # Panics
    /// Panics if clearing a column touches placements.
    #[test]
    fn clear_column_only_resets_spec() {
        let mut grid = model("[100px,grow][]", "[]", &[(1, "cell 0 0")]);
        assert!(grid.clear_column(0).is_ok());
        assert_eq!(grid.serialize().0, "[][]");
        assert_eq!(cell(&grid, 1), "cell 0 0");
    }

    /// # Panics
    /// Panics if normalizing keeps empty tracks or is not idempotent.
    #[test]
    fn normalize_trims_empty_tracks() {
        let mut grid = model("[a][b][c][d]", "[][][]", &[(1, "cell 1 1"), (2, "cell 2 1")]);
        grid.normalize_spanning();
        assert_eq!(grid.serialize(), ("[b][c]".to_owned(), "[]".to_owned()));
        assert_eq!(cell(&grid, 1), "cell 0 0");
        assert_eq!(cell(&grid, 2), "cell 1 0");
        let once = grid.serialize();
        grid.normalize_spanning();
        assert_eq!(grid.serialize(), once);
    }

    /// # Panics
    /// Panics if deleting the last column leaves the grid without columns.
    #[test]
    fn deleting_last_column_keeps_one() {
        let mut grid = model("[100px]", "[]", &[]);
        assert!(grid.delete_column(0).is_ok());
        assert_eq!(grid.serialize().0, "[]");
    }
}
