//! Track sizing along one axis.

use migrid_dimension::{AxisAlignment, DimensionList};
use migrid_values_units::{Size, SizeKeyword, UnitContext};

use crate::Interval;

/// What one placed component asks of the tracks it covers on an axis.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TrackDemand {
    pub start: usize,
    pub span: usize,
    pub minimum: i32,
    pub preferred: i32,
}

impl TrackDemand {
    fn covers(&self, index: usize) -> bool {
        (self.start..self.start + self.span).contains(&index)
    }
}

/// Share of `size` each of `span` tracks has to provide.
fn share(size: i32, span: usize) -> i32 {
    let per_track = size.max(0).unsigned_abs().div_ceil(span.max(1) as u32);
    i32::try_from(per_track).unwrap_or(i32::MAX)
}

fn pixels(size: Option<&Size>, context: &UnitContext) -> Option<i32> {
    size.and_then(|value| value.to_pixels(context))
        .map(|value| value.round() as i32)
}

/// Size in pixels of every track of `list`, padded to `count` tracks.
pub(crate) fn track_sizes<A: AxisAlignment>(
    list: &DimensionList<A>,
    demands: &[TrackDemand],
    count: usize,
    context: &UnitContext,
    virtual_size: i32,
) -> Vec<i32> {
    (0..count)
        .map(|index| {
            let spec = list.get(index);
            let covering: Vec<&TrackDemand> =
                demands.iter().filter(|demand| demand.covers(index)).collect();
            let content = |pick: fn(&TrackDemand) -> i32| {
                covering
                    .iter()
                    .map(|demand| share(pick(demand), demand.span))
                    .max()
                    .unwrap_or(0)
            };
            let concrete = pixels(spec.map(|track| track.preferred()), context);
            let mut size = match (concrete, spec.map(|track| track.preferred())) {
                (Some(fixed), _) => fixed,
                _ if covering.is_empty() => virtual_size,
                (None, Some(Size::Keyword(SizeKeyword::Min))) => content(|demand| demand.minimum),
                (None, Some(Size::Keyword(SizeKeyword::Null))) => 0,
                (None, _) => content(|demand| demand.preferred),
            };
            if let Some(max) = pixels(spec.and_then(|track| track.max()), context) {
                size = size.min(max);
            }
            if let Some(min) = pixels(spec.and_then(|track| track.min()), context) {
                size = size.max(min);
            }
            tracing::trace!(
                "track {index}: size={size}, covering={}, concrete={concrete:?}",
                covering.len()
            );
            size.max(0)
        })
        .collect()
}

/// Pixel gap before every track: the leading offset for track 0, then the boundary
/// gaps between neighbors.
pub(crate) fn track_gaps<A: AxisAlignment>(
    list: &DimensionList<A>,
    count: usize,
    context: &UnitContext,
    default_gap: i32,
) -> Vec<i32> {
    (0..count)
        .map(|index| {
            let fallback = if index == 0 { 0 } else { default_gap };
            pixels(list.gap_before(index), context).unwrap_or(fallback)
        })
        .collect()
}

/// Resolved intervals of one axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisGeometry {
    intervals: Vec<Interval>,
    origin: i32,
    gap: i32,
    virtual_size: i32,
}

impl AxisGeometry {
    pub(crate) fn build(sizes: &[i32], gaps: &[i32], origin: i32, gap: i32, virtual_size: i32) -> Self {
        let mut cursor = origin;
        let intervals = sizes
            .iter()
            .zip(gaps)
            .map(|(size, before)| {
                let interval = Interval::new(cursor.saturating_add(*before), *size);
                cursor = interval.end();
                interval
            })
            .collect();
        Self {
            intervals,
            origin,
            gap,
            virtual_size,
        }
    }

    pub fn count(&self) -> usize {
        self.intervals.len()
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Interval of track `index`. Indices past the last track get virtual-size
    /// intervals continuing after it, so drop targets outside the grid have a position.
    pub fn interval(&self, index: usize) -> Interval {
        if let Some(interval) = self.intervals.get(index) {
            return *interval;
        }
        let beyond = i32::try_from(index - self.intervals.len()).unwrap_or(i32::MAX);
        let start = self.intervals.last().map_or(self.origin, |last| last.end().saturating_add(self.gap));
        Interval::new(
            start.saturating_add(beyond.saturating_mul(self.virtual_size.saturating_add(self.gap))),
            self.virtual_size,
        )
    }

    /// Track whose interval contains `pixel`; `None` inside gaps and outside the grid.
    pub fn index_at(&self, pixel: i32) -> Option<usize> {
        self.intervals
            .iter()
            .position(|interval| interval.contains(pixel))
    }

    /// Distance from the origin to the end of the last track.
    pub fn extent(&self) -> i32 {
        self.intervals
            .last()
            .map_or(0, |last| last.end().saturating_sub(self.origin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migrid_dimension::ColumnAlignment;
    use migrid_values_units::{DisplayMetrics, Orientation};

    fn context() -> UnitContext {
        UnitContext::new(DisplayMetrics::default(), Orientation::Horizontal)
    }

    fn demand(start: usize, span: usize, preferred: i32) -> TrackDemand {
        TrackDemand {
            start,
            span,
            minimum: preferred / 2,
            preferred,
        }
    }

    /// # Panics
    /// Panics if track sizes ignore concrete sizes, content or the virtual size.
    #[test]
    fn sizes_tracks_from_specs_and_content() {
        let list = DimensionList::<ColumnAlignment>::parse("[100px][][min][10px:pref:40px][1in]")
            .unwrap_or_default();
        let demands = [demand(1, 1, 30), demand(2, 2, 61)];
        let sizes = track_sizes(&list, &demands, 6, &context(), 25);
        assert_eq!(sizes, vec![100, 30, 15, 31, 96, 25]);
    }

    /// # Panics
    /// Panics if intervals are not laid out after insets and gaps.
    #[test]
    fn lays_out_intervals() {
        let list = DimensionList::<ColumnAlignment>::parse("3[10px]20[10px][10px]").unwrap_or_default();
        let gaps = track_gaps(&list, 3, &context(), 5);
        assert_eq!(gaps, vec![3, 20, 5]);
        let axis = AxisGeometry::build(&[10, 10, 10], &gaps, 7, 5, 25);
        assert_eq!(
            axis.intervals(),
            [Interval::new(10, 10), Interval::new(40, 10), Interval::new(55, 10)]
        );
        assert_eq!(axis.interval(4), Interval::new(100, 25));
        assert_eq!(axis.index_at(45), Some(1));
        assert_eq!(axis.index_at(52), None);
        assert_eq!(axis.extent(), 58);
    }
}
