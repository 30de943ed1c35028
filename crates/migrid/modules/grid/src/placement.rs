//! Interactive placement: dragging components onto cells and into split groups.

use core::fmt::Debug;
use core::hash::Hash;

use migrid_cell::{CellConstraints, CellRect};
use migrid_syntax::ConstraintError;

use crate::{AxisEdit, GridAxis, GridError, GridModel};

impl<Id> GridModel<Id>
where
    Id: Clone + Eq + Hash + Debug,
{
    /// Place `id` exactly on `rect`, appending columns and rows when it reaches past
    /// the grid. Other placements do not move.
    ///
    /// # Errors
    /// Fails for an unknown component or an empty rectangle.
    pub fn set_cell_range(&mut self, id: &Id, rect: CellRect) -> Result<(), GridError> {
        let mut edited = self.placement(id)?.clone();
        edited.set_cell_rect(rect)?;
        self.make_cells_explicit();
        *self.placement_mut(id)? = edited;
        self.fit_to_placements();
        log::debug!("{id:?} now covers {rect:?}");
        Ok(())
    }

    /// Drop `id` on the cell (`x`, `y`) as a 1x1 placement.
    ///
    /// With `grow_x` or `grow_y` a new column or row is inserted at the target first.
    /// Dropping on an occupied cell makes `id` the first of its split group.
    ///
    /// # Errors
    /// Fails for an unknown component, or when a column or row should be inserted
    /// past the end of the grid.
    pub fn move_component(
        &mut self,
        id: &Id,
        x: usize,
        y: usize,
        grow_x: bool,
        grow_y: bool,
    ) -> Result<(), GridError> {
        self.placement(id)?;
        self.check_growth(x, y, grow_x, grow_y)?;
        self.make_cells_explicit();
        self.release_split_marker(id);
        self.drop_at(id, x, y, grow_x, grow_y)
    }

    /// Add a new component `id` on the cell (`x`, `y`), see [`Self::move_component`].
    ///
    /// # Errors
    /// Fails when `id` is already placed, or when a column or row should be inserted
    /// past the end of the grid.
    pub fn create_component(
        &mut self,
        id: Id,
        x: usize,
        y: usize,
        grow_x: bool,
        grow_y: bool,
    ) -> Result<(), GridError> {
        if self.contains(&id) {
            return Err(GridError::DuplicateComponent(format!("{id:?}")));
        }
        self.check_growth(x, y, grow_x, grow_y)?;
        self.make_cells_explicit();
        self.placements.insert(id.clone(), CellConstraints::at(x, y));
        self.drop_at(&id, x, y, grow_x, grow_y)
    }

    /// Add a new component `id` to the cell of `target`, before or after it.
    ///
    /// # Errors
    /// Fails when `id` is already placed, `target` is unknown or docked.
    pub fn split_create(&mut self, id: Id, target: &Id, horizontal: bool, before: bool) -> Result<(), GridError> {
        if self.contains(&id) {
            return Err(GridError::DuplicateComponent(format!("{id:?}")));
        }
        let rect = self.split_target(target)?;
        self.make_cells_explicit();
        self.placements.insert(id.clone(), CellConstraints::default());
        self.join_split(&id, target, rect, horizontal, before)
    }

    /// Move `id` into the cell of `target`, before or after it.
    ///
    /// # Errors
    /// Fails when either component is unknown or `target` is docked.
    pub fn split_move(&mut self, id: &Id, target: &Id, horizontal: bool, before: bool) -> Result<(), GridError> {
        self.placement(id)?;
        let rect = self.split_target(target)?;
        if id == target {
            return Ok(());
        }
        self.make_cells_explicit();
        self.release_split_marker(id);
        self.join_split(id, target, rect, horizontal, before)
    }

    fn check_growth(&self, x: usize, y: usize, grow_x: bool, grow_y: bool) -> Result<(), GridError> {
        if grow_x {
            self.check_edit(GridAxis::Column, AxisEdit::Insert(x))?;
        }
        if grow_y {
            self.check_edit(GridAxis::Row, AxisEdit::Insert(y))?;
        }
        Ok(())
    }

    fn split_target(&self, target: &Id) -> Result<CellRect, GridError> {
        let constraints = self.placement(target)?;
        if constraints.is_docked() {
            return Err(ConstraintError::InvalidArgument(format!(
                "{target:?} is docked and has no cell to split"
            ))
            .into());
        }
        Ok(constraints.cell_rect())
    }

    fn drop_at(&mut self, id: &Id, x: usize, y: usize, grow_x: bool, grow_y: bool) -> Result<(), GridError> {
        let current = self.placement(id)?.cell_rect();
        self.placement_mut(id)?
            .set_cell_rect(CellRect::cell(current.x, current.y))?;
        if grow_x {
            self.edit_axis(GridAxis::Column, AxisEdit::Insert(x))?;
        }
        if grow_y {
            self.edit_axis(GridAxis::Row, AxisEdit::Insert(y))?;
        }
        let group: Vec<Id> = self
            .cell_group(x, y)
            .into_iter()
            .filter(|member| member != id)
            .collect();
        let marker = self.take_group_marker(&group);
        let constraints = self.placement_mut(id)?;
        constraints.set_cell_rect(CellRect::cell(x, y))?;
        constraints.set_horizontal_split(marker);
        if let Some(first) = group.first() {
            self.reorder(id, first, true);
        }
        self.fit_to_placements();
        log::debug!("dropped {id:?} on cell ({x}, {y}) ahead of {} others", group.len());
        Ok(())
    }

    /// Put `id` into the split group of `target`, which covers `rect`.
    ///
    /// Joining along the group's direction places `id` next to `target`; joining across
    /// it makes `id` the first of the group with its own direction. Only the first
    /// member keeps the span of `rect`, the others take its top-left cell.
    fn join_split(
        &mut self,
        id: &Id,
        target: &Id,
        rect: CellRect,
        horizontal: bool,
        before: bool,
    ) -> Result<(), GridError> {
        let group: Vec<Id> = self
            .cell_group(rect.x, rect.y)
            .into_iter()
            .filter(|member| member != id)
            .collect();
        let Some(first) = group.first().cloned() else {
            return Err(GridError::UnknownComponent(format!("{target:?}")));
        };
        let group_horizontal = self.placement(&first)?.is_horizontal_split(self.config.flow);
        self.placement_mut(id)?
            .set_cell_rect(CellRect::cell(rect.x, rect.y))?;

        if group_horizontal == horizontal {
            self.reorder(id, target, before);
            let leads = self.cell_group(rect.x, rect.y).first() == Some(id);
            let marker = if leads { self.take_group_marker(&group) } else { None };
            let constraints = self.placement_mut(id)?;
            if leads {
                constraints.set_cell_rect(rect)?;
            }
            constraints.set_horizontal_split(marker);
        } else {
            self.take_group_marker(&group);
            self.reorder(id, &first, true);
            let constraints = self.placement_mut(id)?;
            constraints.set_cell_rect(rect)?;
            constraints.set_horizontal_split(Some(horizontal));
        }
        log::debug!(
            "{id:?} joined the split group of {target:?} ({} members)",
            group.len() + 1
        );
        Ok(())
    }

    /// Clear the flow markers of `group`, returning the one its first member carried.
    fn take_group_marker(&mut self, group: &[Id]) -> Option<bool> {
        let marker = group
            .first()
            .and_then(|first| self.placements.get(first))
            .and_then(CellConstraints::horizontal_split);
        for member in group {
            if let Some(constraints) = self.placements.get_mut(member) {
                constraints.set_horizontal_split(None);
            }
        }
        marker
    }

    /// Move `id` in insertion order to just before or after `anchor`.
    fn reorder(&mut self, id: &Id, anchor: &Id, before: bool) {
        let (Some(from), Some(to)) = (
            self.placements.get_index_of(id),
            self.placements.get_index_of(anchor),
        ) else {
            return;
        };
        let destination = match (before, from < to) {
            (true, true) => to - 1,
            (true, false) | (false, true) => to,
            (false, false) => to + 1,
        };
        self.placements.move_index(from, destination);
    }
}

#[cfg(test)]
mod tests {
    use crate::LayoutConfig;

    use super::*;

    fn model(placements: &[(&'static str, &str)]) -> GridModel<&'static str> {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut model = GridModel::parse("[][]", "[][]", LayoutConfig::default()).unwrap_or_default();
        for (id, text) in placements {
            assert!(model.parse_and_attach(*id, text).is_ok());
        }
        model
    }

    fn cell(model: &GridModel<&'static str>, id: &'static str) -> String {
        model.cell_string(&id).unwrap_or_default()
    }

    /// # Panics
    /// Panics if a cell range does not grow the grid or moves other components.
    #[test]
    fn cell_range_grows_grid() {
        let mut grid = model(&[("a", ""), ("b", "")]);
        assert!(grid.set_cell_range(&"a", CellRect::new(2, 1, 2, 3)).is_ok());
        assert_eq!(cell(&grid, "a"), "cell 2 1 2 3");
        assert_eq!(cell(&grid, "b"), "cell 1 0");
        assert_eq!((grid.column_count(), grid.row_count()), (4, 4));
        assert!(grid.set_cell_range(&"a", CellRect::new(0, 0, 0, 1)).is_err());
        assert_eq!(cell(&grid, "a"), "cell 2 1 2 3");
    }

    /// # Panics
    /// Panics if a moved component is not collapsed or does not lead its new cell.
    #[test]
    fn move_component_collapses_and_leads() {
        let mut grid = model(&[("a", "cell 0 0 2 1"), ("b", "cell 1 1,flowy"), ("c", "cell 1 1")]);
        assert!(grid.move_component(&"a", 1, 1, false, false).is_ok());
        assert_eq!(grid.occupants(1, 1), vec!["a", "b", "c"]);
        assert_eq!(cell(&grid, "a"), "flowy,cell 1 1");
        assert_eq!(cell(&grid, "b"), "cell 1 1");
        assert!(grid.occupants(0, 0).is_empty());
    }

    /// # Panics
    /// Panics if growing drops do not insert a column before placing.
    #[test]
    fn move_component_with_growth_inserts_column() {
        let mut grid = model(&[("a", "cell 0 0"), ("b", "cell 1 0")]);
        assert!(grid.move_component(&"a", 1, 0, true, false).is_ok());
        assert_eq!(grid.column_count(), 3);
        assert_eq!(cell(&grid, "a"), "cell 1 0");
        assert_eq!(cell(&grid, "b"), "cell 2 0");
        assert!(grid.move_component(&"a", 4, 0, true, false).is_err());
        assert!(grid.move_component(&"missing", 0, 0, false, false).is_err());
    }

    /// # Panics
    /// Panics if creating a component reuses an id or ignores the target cell.
    #[test]
    fn create_component_places_new_id() {
        let mut grid = model(&[("a", "")]);
        assert!(grid.create_component("b", 0, 1, false, true).is_ok());
        assert_eq!(cell(&grid, "b"), "cell 0 1");
        assert_eq!(grid.row_count(), 3);
        assert!(matches!(
            grid.create_component("a", 1, 1, false, false),
            Err(GridError::DuplicateComponent(_))
        ));
    }

    /// # Panics
    /// Panics if split groups do not follow the flow marker rules.
    #[test]
    fn split_groups_keep_one_marker() {
        let mut grid = model(&[("a", "cell 1 0,flowy"), ("b", "cell 1 0")]);
        assert!(grid.split_create("c", &"b", false, false).is_ok());
        assert_eq!(grid.occupants(1, 0), vec!["a", "b", "c"]);
        assert_eq!(cell(&grid, "c"), "cell 1 0");

        assert!(grid.split_create("d", &"b", false, true).is_ok());
        assert_eq!(grid.occupants(1, 0), vec!["a", "d", "b", "c"]);

        assert!(grid.split_move(&"c", &"a", false, true).is_ok());
        assert_eq!(grid.occupants(1, 0), vec!["c", "a", "d", "b"]);
        assert_eq!(cell(&grid, "c"), "flowy,cell 1 0");
        assert_eq!(cell(&grid, "a"), "cell 1 0");

        assert!(grid.split_create("e", &"d", true, false).is_ok());
        assert_eq!(grid.occupants(1, 0), vec!["e", "c", "a", "d", "b"]);
        assert_eq!(cell(&grid, "e"), "flowx,cell 1 0");
        assert_eq!(cell(&grid, "c"), "cell 1 0");
    }

    /// # Panics
    /// Panics if a trailing split member copies the span of a wide target.
    #[test]
    fn split_members_span_only_when_leading() {
        let mut grid = model(&[("a", "cell 0 0 2 1")]);
        assert!(grid.split_create("b", &"a", true, false).is_ok());
        assert_eq!(cell(&grid, "b"), "cell 0 0");
        assert_eq!(cell(&grid, "a"), "cell 0 0 2 1");

        assert!(grid.split_create("c", &"a", true, true).is_ok());
        assert_eq!(cell(&grid, "c"), "cell 0 0 2 1");
        assert_eq!(grid.occupants(0, 0), vec!["c", "a", "b"]);

        assert!(grid.split_create("d", &"b", false, false).is_ok());
        assert_eq!(cell(&grid, "d"), "flowy,cell 0 0 2 1");
        assert_eq!(grid.occupants(0, 0), vec!["d", "c", "a", "b"]);
    }

    /// # Panics
    /// Panics if docked components accept split members.
    #[test]
    fn docked_target_rejects_split() {
        let mut grid = model(&[("a", "dock north")]);
        assert!(matches!(
            grid.split_create("b", &"a", true, true),
            Err(GridError::Constraint(ConstraintError::InvalidArgument(_)))
        ));
        assert!(!grid.contains(&"b"));
    }
}
