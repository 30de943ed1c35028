//! Pixel-space value types and the component size callback.

/// A half-open pixel range `[start, start + length)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub start: i32,
    pub length: i32,
}

impl Interval {
    /// Create a new interval.
    pub fn new(start: i32, length: i32) -> Self {
        Self { start, length }
    }

    /// First pixel after the interval, saturating at `i32::MAX`.
    pub fn end(&self) -> i32 {
        self.start.saturating_add(self.length)
    }

    /// Check if `pixel` falls inside.
    pub fn contains(&self, pixel: i32) -> bool {
        (self.start..self.end()).contains(&pixel)
    }
}

/// A rectangle in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Sizes a component reports for itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ComponentSizes {
    pub min_width: i32,
    pub min_height: i32,
    pub preferred_width: i32,
    pub preferred_height: i32,
    pub max_width: Option<i32>,
    pub max_height: Option<i32>,
}

impl ComponentSizes {
    /// A component preferring `width` x `height` with no minimum or maximum.
    pub fn preferred(width: i32, height: i32) -> Self {
        Self {
            preferred_width: width,
            preferred_height: height,
            ..Self::default()
        }
    }

    /// A component whose minimum, preferred and maximum sizes all agree.
    pub fn fixed(width: i32, height: i32) -> Self {
        Self {
            min_width: width,
            min_height: height,
            preferred_width: width,
            preferred_height: height,
            max_width: Some(width),
            max_height: Some(height),
        }
    }

    #[must_use]
    pub fn with_minimum(mut self, width: i32, height: i32) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }

    #[must_use]
    pub fn with_maximum(mut self, width: i32, height: i32) -> Self {
        self.max_width = Some(width);
        self.max_height = Some(height);
        self
    }
}

/// Source of component sizes, typically a live widget toolkit.
///
/// Answering may be expensive; the resolver asks at most once per component per call.
pub trait SizeProvider<Id: ?Sized> {
    fn sizes(&self, id: &Id) -> ComponentSizes;
}

impl<Id: ?Sized, F> SizeProvider<Id> for F
where
    F: Fn(&Id) -> ComponentSizes,
{
    fn sizes(&self, id: &Id) -> ComponentSizes {
        self(id)
    }
}
