//! The ordered specs of one axis together with the gaps between them.

use core::fmt::{Display, Formatter, Result as FmtResult};

use migrid_syntax::{ParseError, split_bracket_groups};
use migrid_values_units::Size;

use crate::{AxisAlignment, DimensionSpec};

/// All columns (or rows) of a grid.
///
/// Gaps live on boundaries: `gaps[0]` precedes the first track, `gaps[i]` sits between
/// tracks `i - 1` and `i`, and the last slot trails the final track. Since two
/// neighbors read the same slot, their shared gap cannot disagree.
#[derive(Clone, Debug, PartialEq)]
pub struct DimensionList<A> {
    specs: Vec<DimensionSpec<A>>,
    gaps: Vec<Option<Size>>,
}

impl<A: AxisAlignment> Default for DimensionList<A> {
    fn default() -> Self {
        Self {
            specs: Vec::new(),
            gaps: vec![None],
        }
    }
}

impl<A: AxisAlignment> DimensionList<A> {
    /// `count` default tracks with no gaps.
    pub fn with_len(count: usize) -> Self {
        let mut list = Self::default();
        list.ensure_len(count);
        list
    }

    /// Parse a dimension string such as `"[100px]10[grow]"`.
    ///
    /// # Errors
    /// Fails on unbalanced brackets or a malformed numeric argument inside a group.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let groups = split_bracket_groups(text)?;
        let specs = groups
            .bodies
            .iter()
            .map(|body| DimensionSpec::parse(body))
            .collect::<Result<Vec<_>, _>>()?;
        let gaps = groups
            .gaps
            .iter()
            .map(|gap| gap.as_deref().map(Size::parse_lenient))
            .collect();
        Ok(Self { specs, gaps })
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DimensionSpec<A>> {
        self.specs.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut DimensionSpec<A>> {
        self.specs.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DimensionSpec<A>> {
        self.specs.iter()
    }

    /// Gap written before track `index`.
    pub fn gap_before(&self, index: usize) -> Option<&Size> {
        self.gaps.get(index).and_then(Option::as_ref)
    }

    /// Gap written after track `index`; the same slot as `gap_before(index + 1)`.
    pub fn gap_after(&self, index: usize) -> Option<&Size> {
        self.gap_before(index + 1)
    }

    /// Returns `false` when `index` is not a boundary of this list.
    pub fn set_gap_before(&mut self, index: usize, gap: Option<Size>) -> bool {
        self.gaps.get_mut(index).map(|slot| *slot = gap).is_some()
    }

    /// Returns `false` when `index` is not a track of this list.
    pub fn set_gap_after(&mut self, index: usize, gap: Option<Size>) -> bool {
        index < self.len() && self.set_gap_before(index + 1, gap)
    }

    /// Insert `spec` at `index` (clamped to the end) with an empty boundary after it.
    pub fn insert(&mut self, index: usize, spec: DimensionSpec<A>) {
        let at = index.min(self.len());
        self.specs.insert(at, spec);
        self.gaps.insert(at + 1, None);
    }

    /// Remove the track at `index` together with the boundary after it. The trailing
    /// boundary survives removal of the last track.
    pub fn remove(&mut self, index: usize) -> Option<DimensionSpec<A>> {
        if index >= self.len() {
            return None;
        }
        let boundary = if index + 1 == self.len() { index } else { index + 1 };
        self.gaps.remove(boundary);
        Some(self.specs.remove(index))
    }

    /// Place a copy of track `index` right after it, separated by an empty boundary.
    pub fn duplicate(&mut self, index: usize) -> bool {
        let Some(copy) = self.specs.get(index).cloned() else {
            return false;
        };
        self.specs.insert(index + 1, copy);
        self.gaps.insert(index + 1, None);
        true
    }

    /// Move track `from` to position `to`. Boundary gaps stay where they are.
    pub fn move_spec(&mut self, from: usize, to: usize) -> bool {
        if from >= self.len() || to >= self.len() {
            return false;
        }
        let spec = self.specs.remove(from);
        self.specs.insert(to, spec);
        true
    }

    /// Restore track `index` to the default spec.
    pub fn reset(&mut self, index: usize) -> bool {
        self.specs
            .get_mut(index)
            .map(|spec| *spec = DimensionSpec::default())
            .is_some()
    }

    /// Append default tracks until there are at least `count`; the trailing gap stays last.
    pub fn ensure_len(&mut self, count: usize) {
        while self.len() < count {
            self.specs.push(DimensionSpec::default());
            let trailing = self.gaps.len() - 1;
            self.gaps.insert(trailing, None);
        }
    }
}

impl<A: AxisAlignment> Display for DimensionList<A> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        for (index, spec) in self.specs.iter().enumerate() {
            if let Some(gap) = self.gap_before(index) {
                write!(formatter, "{gap}")?;
            }
            write!(formatter, "{spec}")?;
        }
        if let Some(gap) = self.gap_before(self.len()) {
            write!(formatter, "{gap}")?;
        }
        Ok(())
    }
}
