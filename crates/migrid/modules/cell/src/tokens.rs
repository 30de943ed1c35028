//! Small value types carried by a placement.

use core::fmt::{Display, Formatter, Result as FmtResult};

/// Grid edge a docked component is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DockSide {
    North,
    South,
    East,
    West,
}

impl DockSide {
    /// Side named by a lowercase keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "north" => Some(Self::North),
            "south" => Some(Self::South),
            "east" => Some(Self::East),
            "west" => Some(Self::West),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }
}

/// How many components share the cell of the component that starts a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Split {
    /// Bare `split`: every following component until the next wrap.
    Remaining,
    /// `split n`: this component and the next `n - 1`.
    Count(u32),
}

/// One gap token, with its arguments kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GapToken {
    /// Canonical keyword, e.g. `gapx`.
    pub keyword: String,
    /// Argument text, e.g. `10px push`.
    pub args: String,
}

impl GapToken {
    /// Builds a token from the keyword found in the input.
    ///
    /// `gap` and `gapleft` become `gapx` and `gaptop` becomes `gapy`. `gapright` becomes
    /// `gapx` only when it is not the only token of its string; `gapbottom` keeps its
    /// name.
    pub fn normalized(keyword: &str, args: &str, has_siblings: bool) -> Self {
        let canonical = match keyword {
            "gap" | "gapleft" => "gapx",
            "gaptop" => "gapy",
            "gapright" if has_siblings => "gapx",
            other => other,
        };
        Self {
            keyword: canonical.to_owned(),
            args: args.to_owned(),
        }
    }

    /// Whether `keyword` names a gap token.
    pub fn is_gap_keyword(keyword: &str) -> bool {
        matches!(
            keyword,
            "gap"
                | "gapx"
                | "gapy"
                | "gapleft"
                | "gapright"
                | "gaptop"
                | "gapbottom"
                | "gapbefore"
                | "gapafter"
        )
    }
}

impl Display for GapToken {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        if self.args.is_empty() {
            formatter.write_str(&self.keyword)
        } else {
            write!(formatter, "{} {}", self.keyword, self.args)
        }
    }
}

/// A `wrap` or `newline` token with its optional gap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LineBreak {
    pub gap: Option<String>,
}

impl LineBreak {
    pub(crate) fn write(&self, keyword: &str) -> String {
        self.gap
            .as_ref()
            .map_or_else(|| keyword.to_owned(), |gap| format!("{keyword} {gap}"))
    }
}
