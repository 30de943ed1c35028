//! Size expressions: lengths with units, keywords and verbatim leftovers.

use core::fmt::{Display, Formatter, Result as FmtResult};

use migrid_syntax::{Atom, ParseError, Segment, format_number};

use crate::UnitContext;

const MM_PER_INCH: f32 = 25.4;
const CM_PER_INCH: f32 = 2.54;
const POINTS_PER_INCH: f32 = 72.0;

/// Units a length can be written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    /// A bare number, read as pixels.
    Unitless,
    Pixels,
    /// Logical pixels, scaled like pixels at the reference resolution.
    LogicalPixels,
    Millimeters,
    Centimeters,
    Inches,
    Points,
    /// Percentage of a reference length (usually the container).
    Percent,
    /// Percentage of the screen extent along the axis.
    ScreenPercent,
}

impl LengthUnit {
    /// Maps a lowercase unit suffix to a unit.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Some(match suffix {
            "" => Self::Unitless,
            "px" => Self::Pixels,
            "lp" | "lpx" | "lpy" => Self::LogicalPixels,
            "mm" => Self::Millimeters,
            "cm" => Self::Centimeters,
            "in" => Self::Inches,
            "pt" => Self::Points,
            "%" => Self::Percent,
            "sp" => Self::ScreenPercent,
            _ => return None,
        })
    }

    /// The suffix this unit is written with.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Unitless => "",
            Self::Pixels => "px",
            Self::LogicalPixels => "lp",
            Self::Millimeters => "mm",
            Self::Centimeters => "cm",
            Self::Inches => "in",
            Self::Points => "pt",
            Self::Percent => "%",
            Self::ScreenPercent => "sp",
        }
    }

    /// How many pixels one unit is worth, if that does not depend on a reference length.
    fn pixels_per_unit(self, context: &UnitContext) -> Option<f32> {
        let dpi = context.metrics.dpi(context.orientation);
        match self {
            Self::Unitless | Self::Pixels | Self::LogicalPixels => Some(1.0),
            Self::Millimeters => Some(dpi / MM_PER_INCH),
            Self::Centimeters => Some(dpi / CM_PER_INCH),
            Self::Inches => Some(dpi),
            Self::Points => Some(dpi / POINTS_PER_INCH),
            Self::Percent => context.percent_base.map(|base| base / 100.0),
            Self::ScreenPercent => {
                Some(context.metrics.screen_extent(context.orientation) / 100.0)
            }
        }
    }
}

/// A number with a unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Length {
    pub value: f32,
    pub unit: LengthUnit,
}

impl Length {
    pub fn new(value: f32, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    /// Plain pixels.
    pub fn px(value: f32) -> Self {
        Self::new(value, LengthUnit::Pixels)
    }

    /// Pixel value of this length, `None` for percentages without a base.
    pub fn to_pixels(self, context: &UnitContext) -> Option<f32> {
        self.unit
            .pixels_per_unit(context)
            .map(|scale| self.value * scale)
    }
}

impl Display for Length {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        write!(formatter, "{}{}", format_number(self.value), self.unit.suffix())
    }
}

/// Size keywords that refer to the component's own sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SizeKeyword {
    Min,
    Pref,
    Max,
    /// `n` / `null`: explicitly no size.
    Null,
}

impl SizeKeyword {
    fn from_ident(ident: &str) -> Option<Self> {
        match ident.to_ascii_lowercase().as_str() {
            "min" => Some(Self::Min),
            "pref" | "p" => Some(Self::Pref),
            "max" => Some(Self::Max),
            "n" | "null" => Some(Self::Null),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Pref => "pref",
            Self::Max => "max",
            Self::Null => "n",
        }
    }
}

/// One size expression.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Size {
    /// Ask the component.
    #[default]
    Default,
    Length(Length),
    Keyword(SizeKeyword),
    /// Text kept exactly as written because it is not a single recognized size.
    Raw(String),
}

impl Size {
    /// Parse a single size expression.
    ///
    /// # Errors
    /// Returns [`ParseError::InvalidSize`] unless `text` is exactly one number, length,
    /// percentage or size keyword.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidSize {
            text: text.trim().to_owned(),
        };
        let segment = Segment::from_text(text);
        let [atom] = segment.atoms.as_slice() else {
            return Err(invalid());
        };
        match atom {
            Atom::Number { value, .. } => Ok(Self::Length(Length::new(*value, LengthUnit::Unitless))),
            Atom::Dimension { value, unit } => LengthUnit::from_suffix(unit)
                .map(|parsed| Self::Length(Length::new(*value, parsed)))
                .ok_or_else(invalid),
            Atom::Percentage(value) => Ok(Self::Length(Length::new(*value, LengthUnit::Percent))),
            Atom::Ident(ident) if ident.eq_ignore_ascii_case("default") => Ok(Self::Default),
            Atom::Ident(ident) => SizeKeyword::from_ident(ident)
                .map(Self::Keyword)
                .ok_or_else(invalid),
            Atom::Colon | Atom::Other => Err(invalid()),
        }
    }

    /// Parse a size, keeping unrecognized text verbatim instead of failing.
    pub fn parse_lenient(text: &str) -> Self {
        Self::parse(text).unwrap_or_else(|_| Self::Raw(text.trim().to_owned()))
    }

    /// Pixel value of a concrete length.
    pub fn to_pixels(&self, context: &UnitContext) -> Option<f32> {
        match self {
            Self::Length(length) => length.to_pixels(context),
            Self::Default | Self::Keyword(_) | Self::Raw(_) => None,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

impl Display for Size {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Default => formatter.write_str("default"),
            Self::Length(length) => length.fmt(formatter),
            Self::Keyword(keyword) => formatter.write_str(keyword.as_str()),
            Self::Raw(raw) => formatter.write_str(raw),
        }
    }
}

/// Express `pixels` in `unit`, e.g. `38` pixels as `"1.01cm"` at 96 dpi.
///
/// Returns `None` for percentages when `context` has no reference length.
pub fn to_unit_string(pixels: i32, unit: LengthUnit, context: &UnitContext) -> Option<String> {
    let scale = unit.pixels_per_unit(context)?;
    if scale <= 0.0 {
        return None;
    }
    Some(Length::new(pixels as f32 / scale, unit).to_string())
}

impl From<Length> for Size {
    fn from(length: Length) -> Self {
        Self::Length(length)
    }
}
