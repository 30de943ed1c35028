//! Coordinate remapping shared by every structural edit.

/// One structural edit along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisEdit {
    /// A new track appears at this index.
    Insert(usize),
    /// The track at this index disappears.
    Delete(usize),
    /// The track at this index is duplicated into two neighbors.
    Split(usize),
    /// The track at `from` is taken out and reinserted at `to`.
    Move { from: usize, to: usize },
}

/// Where a placement's span ends up after an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanRemap {
    Keep { start: usize, span: usize },
    /// The placement occupied only the deleted track.
    Orphaned,
}

impl AxisEdit {
    /// New position of the placement covering `span` tracks from `start`.
    ///
    /// Inserting inside a span widens it; inserting at or before its start shifts it.
    /// Splitting a track widens every span that covers it, except a placement owning
    /// only that track, which stays in the first copy. Moving maps every owned track
    /// through the permutation and takes the bounding range.
    pub fn remap(self, start: usize, span: usize) -> SpanRemap {
        let end = start + span;
        let (start, span) = match self {
            Self::Insert(index) if start >= index => (start + 1, span),
            Self::Insert(index) if index < end => (start, span + 1),
            Self::Delete(index) if start > index => (start - 1, span),
            Self::Delete(index) if start == index && span == 1 => return SpanRemap::Orphaned,
            Self::Delete(index) if index < end => (start, span - 1),
            Self::Split(index) if start > index => (start + 1, span),
            Self::Split(index) if index < end && span > 1 => (start, span + 1),
            Self::Move { from, to } => Self::move_span(from, to, start, end),
            Self::Insert(_) | Self::Delete(_) | Self::Split(_) => (start, span),
        };
        SpanRemap::Keep { start, span }
    }

    fn move_span(from: usize, to: usize, start: usize, end: usize) -> (usize, usize) {
        let permute = |index: usize| {
            if index == from {
                to
            } else if from < to && index > from && index <= to {
                index - 1
            } else if to < from && index >= to && index < from {
                index + 1
            } else {
                index
            }
        };
        let mut owned = (start..end).filter(|index| *index != from).map(permute);
        let Some(first) = owned.next() else {
            return (permute(from), end - start);
        };
        let (low, high) = owned.fold((first, first), |(low, high), index| {
            (low.min(index), high.max(index))
        });
        (low, high - low + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keep(start: usize, span: usize) -> SpanRemap {
        SpanRemap::Keep { start, span }
    }

    /// # Panics
    /// Panics if insertion shifts instead of widening straddling spans.
    #[test]
    fn insert_shifts_or_widens() {
        assert_eq!(AxisEdit::Insert(1).remap(0, 1), keep(0, 1));
        assert_eq!(AxisEdit::Insert(1).remap(1, 1), keep(2, 1));
        assert_eq!(AxisEdit::Insert(1).remap(0, 2), keep(0, 3));
        assert_eq!(AxisEdit::Insert(2).remap(0, 2), keep(0, 2));
    }

    /// # Panics
    /// Panics if deletion does not shift, shrink or orphan correctly.
    #[test]
    fn delete_shifts_shrinks_or_orphans() {
        assert_eq!(AxisEdit::Delete(1).remap(2, 1), keep(1, 1));
        assert_eq!(AxisEdit::Delete(1).remap(1, 1), SpanRemap::Orphaned);
        assert_eq!(AxisEdit::Delete(1).remap(0, 3), keep(0, 2));
        assert_eq!(AxisEdit::Delete(1).remap(1, 2), keep(1, 1));
        assert_eq!(AxisEdit::Delete(3).remap(0, 2), keep(0, 2));
    }

    /// # Panics
    /// Panics if splitting moves single-track owners or misses spans.
    #[test]
    fn split_widens_spans_through_index() {
        assert_eq!(AxisEdit::Split(1).remap(1, 1), keep(1, 1));
        assert_eq!(AxisEdit::Split(1).remap(1, 2), keep(1, 3));
        assert_eq!(AxisEdit::Split(1).remap(0, 2), keep(0, 3));
        assert_eq!(AxisEdit::Split(1).remap(2, 1), keep(3, 1));
        assert_eq!(AxisEdit::Split(1).remap(0, 1), keep(0, 1));
    }

    /// # Panics
    /// Panics if a moved column does not carry spans through the permutation.
    #[test]
    fn move_remaps_through_permutation() {
        let edit = AxisEdit::Move { from: 3, to: 1 };
        assert_eq!(edit.remap(0, 1), keep(0, 1));
        assert_eq!(edit.remap(0, 2), keep(0, 3));
        assert_eq!(edit.remap(3, 1), keep(1, 1));
        assert_eq!(edit.remap(2, 3), keep(3, 2));
        assert_eq!(edit.remap(4, 1), keep(4, 1));
        let forward = AxisEdit::Move { from: 0, to: 2 };
        assert_eq!(forward.remap(0, 1), keep(2, 1));
        assert_eq!(forward.remap(1, 2), keep(0, 2));
        assert_eq!(forward.remap(0, 2), keep(0, 1));
    }
}
