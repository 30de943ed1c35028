//! The grid model: specs, placements and the invariants tying them together.

use core::fmt::Debug;
use core::hash::Hash;

use indexmap::IndexMap;
use migrid_cell::{CellConstraints, FlowContext};
use migrid_dimension::{ColumnAlignment, ColumnSpec, DimensionList, RowAlignment, RowSpec};
use migrid_geometry::{GridGeometry, SizeProvider, resolve};
use migrid_syntax::{ConstraintError, ParseError};

use crate::{GridAxis, GridError, LayoutConfig};

/// Columns, rows and the placement of every component of one layout.
///
/// Placements are kept in insertion order, which is also the order of components
/// sharing a cell. After every operation the grid covers every placement and has at
/// least one column and one row.
#[derive(Debug, Clone)]
pub struct GridModel<Id> {
    pub(crate) columns: DimensionList<ColumnAlignment>,
    pub(crate) rows: DimensionList<RowAlignment>,
    pub(crate) placements: IndexMap<Id, CellConstraints>,
    pub(crate) orphans: Vec<(Id, CellConstraints)>,
    pub(crate) config: LayoutConfig,
}

impl<Id> GridModel<Id>
where
    Id: Clone + Eq + Hash + Debug,
{
    /// An empty 1x1 grid.
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    /// An empty 1x1 grid using `config`.
    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            columns: DimensionList::with_len(1),
            rows: DimensionList::with_len(1),
            placements: IndexMap::new(),
            orphans: Vec::new(),
            config,
        }
    }

    /// Build a grid from column and row dimension strings.
    ///
    /// # Errors
    /// Fails when either string is malformed.
    pub fn parse(column_spec: &str, row_spec: &str, config: LayoutConfig) -> Result<Self, ParseError> {
        let mut model = Self::with_config(config);
        model.columns = DimensionList::parse(column_spec)?;
        model.rows = DimensionList::parse(row_spec)?;
        model.fit_to_placements();
        log::debug!(
            "parsed layout with {} columns and {} rows",
            model.columns.len(),
            model.rows.len()
        );
        Ok(model)
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Replace the layout settings and reflow implicit placements.
    pub fn set_config(&mut self, config: LayoutConfig) {
        self.config = config;
        self.reflow();
    }

    pub fn columns(&self) -> &DimensionList<ColumnAlignment> {
        &self.columns
    }

    pub fn rows(&self) -> &DimensionList<RowAlignment> {
        &self.rows
    }

    /// Mutable access to one column spec; the count cannot change through it.
    pub fn column_mut(&mut self, index: usize) -> Option<&mut ColumnSpec> {
        self.columns.get_mut(index)
    }

    /// Mutable access to one row spec; the count cannot change through it.
    pub fn row_mut(&mut self, index: usize) -> Option<&mut RowSpec> {
        self.rows.get_mut(index)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Column and row dimension strings.
    pub fn serialize(&self) -> (String, String) {
        (self.columns.to_string(), self.rows.to_string())
    }

    /// Parse `text` and place `id` with it, growing the grid as needed.
    ///
    /// Unrecognized tokens are kept on the placement.
    ///
    /// # Errors
    /// Fails on a malformed numeric argument; the model is unchanged.
    pub fn parse_and_attach(&mut self, id: Id, text: &str) -> Result<(), ParseError> {
        let (constraints, unrecognized) = CellConstraints::parse(text)?;
        if !unrecognized.is_empty() {
            log::debug!("{id:?}: keeping {} unrecognized tokens", unrecognized.len());
        }
        self.placements.insert(id, constraints);
        self.reflow();
        Ok(())
    }

    /// Replace the constraints of `id` with the parse of `text`.
    ///
    /// # Errors
    /// Fails for an unknown component, or when `text` is malformed or holds no
    /// recognized token; the placement is then unchanged.
    pub fn set_constraints_string(&mut self, id: &Id, text: &str) -> Result<(), GridError> {
        self.edit_constraints(id, |constraints| constraints.set_string(text))
    }

    /// Apply `edit` to a copy of the constraints of `id` and keep the result only if it
    /// succeeds.
    ///
    /// # Errors
    /// Fails for an unknown component or when `edit` fails.
    pub fn edit_constraints<F>(&mut self, id: &Id, edit: F) -> Result<(), GridError>
    where
        F: FnOnce(&mut CellConstraints) -> Result<(), ConstraintError>,
    {
        let current = self.placement(id)?;
        let mut edited = current.clone();
        edit(&mut edited)?;
        if let Some(slot) = self.placements.get_mut(id) {
            *slot = edited;
        }
        self.reflow();
        Ok(())
    }

    pub fn constraints(&self, id: &Id) -> Option<&CellConstraints> {
        self.placements.get(id)
    }

    /// The constraint string of `id`.
    pub fn cell_string(&self, id: &Id) -> Option<String> {
        self.placements.get(id).map(ToString::to_string)
    }

    /// Placed components in insertion order.
    pub fn components(&self) -> impl Iterator<Item = &Id> {
        self.placements.keys()
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.placements.contains_key(id)
    }

    /// Remove `id` from the grid, returning its constraints.
    pub fn remove_component(&mut self, id: &Id) -> Option<CellConstraints> {
        self.release_split_marker(id);
        let removed = self.placements.shift_remove(id);
        if removed.is_some() {
            log::debug!("removed component {id:?}");
            self.reflow();
        }
        removed
    }

    /// Components covering the cell (`x`, `y`), in split order.
    pub fn occupants(&self, x: usize, y: usize) -> Vec<Id> {
        self.placements
            .iter()
            .filter(|(_, constraints)| !constraints.is_docked() && constraints.cell_rect().contains(x, y))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Placements dropped by deleting the only column or row they occupied.
    pub fn take_orphans(&mut self) -> Vec<(Id, CellConstraints)> {
        core::mem::take(&mut self.orphans)
    }

    /// Give every non-docked placement explicit `cell` coordinates at its current
    /// flow position.
    pub fn make_cells_explicit(&mut self) {
        let mut context = self.flow_context();
        for constraints in self.placements.values_mut() {
            constraints.make_explicit_cell(&mut context);
        }
        self.fit_to_placements();
    }

    /// Compute pixel geometry for the current model.
    pub fn resolve_geometry<P>(&self, provider: &P) -> GridGeometry<Id>
    where
        P: SizeProvider<Id> + ?Sized,
    {
        resolve(
            &self.columns,
            &self.rows,
            &self.placements,
            &self.config.geometry,
            provider,
        )
    }

    pub(crate) fn placement(&self, id: &Id) -> Result<&CellConstraints, GridError> {
        self.placements
            .get(id)
            .ok_or_else(|| GridError::UnknownComponent(format!("{id:?}")))
    }

    pub(crate) fn placement_mut(&mut self, id: &Id) -> Result<&mut CellConstraints, GridError> {
        self.placements
            .get_mut(id)
            .ok_or_else(|| GridError::UnknownComponent(format!("{id:?}")))
    }

    pub(crate) fn track_count(&self, axis: GridAxis) -> usize {
        match axis {
            GridAxis::Column => self.columns.len(),
            GridAxis::Row => self.rows.len(),
        }
    }

    /// A flow context with every explicit cell already reserved.
    fn flow_context(&self) -> FlowContext {
        let mut context = FlowContext::new(self.config.flow, self.config.wrap_after);
        for constraints in self.placements.values() {
            if constraints.is_explicit() && !constraints.is_docked() {
                context.reserve(constraints.cell_rect());
            }
        }
        context
    }

    /// Recompute the positions of implicit placements.
    pub(crate) fn reflow(&mut self) {
        let mut context = self.flow_context();
        for constraints in self.placements.values_mut() {
            constraints.apply_flow(&mut context);
        }
        self.fit_to_placements();
    }

    /// Grow the specs to cover every placement, never below one column and row.
    pub(crate) fn fit_to_placements(&mut self) {
        let (right, bottom) = self
            .placements
            .values()
            .filter(|constraints| !constraints.is_docked())
            .map(CellConstraints::cell_rect)
            .fold((1, 1), |(right, bottom), rect| {
                (right.max(rect.right()), bottom.max(rect.bottom()))
            });
        self.columns.ensure_len(right);
        self.rows.ensure_len(bottom);
    }

    /// Non-docked components whose top-left cell is (`x`, `y`), in split order.
    pub(crate) fn cell_group(&self, x: usize, y: usize) -> Vec<Id> {
        self.placements
            .iter()
            .filter(|(_, constraints)| {
                !constraints.is_docked() && constraints.x() == x && constraints.y() == y
            })
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Hand the split marker of `id` to the next member of its cell if `id` leads it,
    /// and clear the marker on `id`.
    pub(crate) fn release_split_marker(&mut self, id: &Id) {
        let Some(constraints) = self.placements.get(id) else {
            return;
        };
        let marker = constraints.horizontal_split();
        let group = self.cell_group(constraints.x(), constraints.y());
        if let [first, next, ..] = group.as_slice()
            && first == id
            && marker.is_some()
            && let Some(successor) = self.placements.get_mut(next)
        {
            successor.set_horizontal_split(marker);
        }
        if let Some(released) = self.placements.get_mut(id) {
            released.set_horizontal_split(None);
        }
    }
}

impl<Id> Default for GridModel<Id>
where
    Id: Clone + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
