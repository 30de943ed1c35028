//! Track alignment keywords.
//!
//! Icons and display names for these values belong to the editor, not here.

use core::fmt::Debug;

use migrid_values_units::Orientation;

/// Behavior shared by column and row alignments.
pub trait AxisAlignment: Copy + Default + Eq + Debug {
    /// Axis the alignment applies to.
    const ORIENTATION: Orientation;

    /// The value a lowercase keyword denotes on this axis.
    fn from_keyword(keyword: &str) -> Option<Self>;

    /// The keyword written for this value; `None` for `Default` and `Unknown`.
    fn keyword(self) -> Option<&'static str>;

    /// The sentinel for syntax that cannot be interpreted.
    fn unknown() -> Self;

    fn is_unknown(self) -> bool {
        self == Self::unknown()
    }
}

/// Horizontal alignment of a column or of a component within its cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColumnAlignment {
    /// Inherit (from the column, or the layout's default).
    #[default]
    Default,
    Left,
    Center,
    Right,
    Fill,
    Leading,
    Trailing,
    Unknown,
}

impl AxisAlignment for ColumnAlignment {
    const ORIENTATION: Orientation = Orientation::Horizontal;

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            "fill" => Some(Self::Fill),
            "leading" => Some(Self::Leading),
            "trailing" => Some(Self::Trailing),
            _ => None,
        }
    }

    fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Left => Some("left"),
            Self::Center => Some("center"),
            Self::Right => Some("right"),
            Self::Fill => Some("fill"),
            Self::Leading => Some("leading"),
            Self::Trailing => Some("trailing"),
            Self::Default | Self::Unknown => None,
        }
    }

    fn unknown() -> Self {
        Self::Unknown
    }
}

/// Vertical alignment of a row or of a component within its cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RowAlignment {
    #[default]
    Default,
    Top,
    Center,
    Bottom,
    Fill,
    Baseline,
    Unknown,
}

impl AxisAlignment for RowAlignment {
    const ORIENTATION: Orientation = Orientation::Vertical;

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "top" => Some(Self::Top),
            "center" => Some(Self::Center),
            "bottom" => Some(Self::Bottom),
            "fill" => Some(Self::Fill),
            "baseline" => Some(Self::Baseline),
            _ => None,
        }
    }

    fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Top => Some("top"),
            Self::Center => Some("center"),
            Self::Bottom => Some("bottom"),
            Self::Fill => Some("fill"),
            Self::Baseline => Some("baseline"),
            Self::Default | Self::Unknown => None,
        }
    }

    fn unknown() -> Self {
        Self::Unknown
    }
}
