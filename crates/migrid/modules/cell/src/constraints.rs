//! The editable constraint string of one component.

use core::fmt::{Display, Formatter, Result as FmtResult};

use migrid_dimension::{AxisAlignment, ColumnAlignment, DEFAULT_WEIGHT, RowAlignment};
use migrid_syntax::{Atom, ConstraintError, ParseError, Segment, format_number, split_segments};

use crate::{CellRect, DockSide, FlowContext, FlowDirection, GapToken, LineBreak, Split};

/// Placement of one component in the grid.
///
/// Every recognized keyword maps onto a typed field; anything else is kept in input
/// order and written back after the recognized tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct CellConstraints {
    cell: CellRect,
    /// `true` when the coordinates come from a `cell` token rather than the flow.
    explicit_cell: bool,
    dock: Option<DockSide>,
    /// `flowx` (`Some(true)`) or `flowy` (`Some(false)`).
    horizontal_split: Option<bool>,
    split: Option<Split>,
    horizontal_alignment: ColumnAlignment,
    vertical_alignment: RowAlignment,
    /// Alignment tokens that could not be interpreted, kept verbatim.
    alignment_raw: Vec<String>,
    grow_x: Option<f32>,
    grow_y: Option<f32>,
    hide_mode: Option<u8>,
    gaps: Vec<GapToken>,
    skip: Option<usize>,
    newline: Option<LineBreak>,
    wrap: Option<LineBreak>,
    extras: Vec<String>,
}

impl Default for CellConstraints {
    fn default() -> Self {
        Self {
            cell: CellRect::cell(0, 0),
            explicit_cell: false,
            dock: None,
            horizontal_split: None,
            split: None,
            horizontal_alignment: ColumnAlignment::Default,
            vertical_alignment: RowAlignment::Default,
            alignment_raw: Vec::new(),
            grow_x: None,
            grow_y: None,
            hide_mode: None,
            gaps: Vec::new(),
            skip: None,
            newline: None,
            wrap: None,
            extras: Vec::new(),
        }
    }
}

/// Spans requested with `span`/`spanx`/`spany`; a sized `cell` token overrides them.
#[derive(Default)]
struct PendingSpan {
    width: Option<usize>,
    height: Option<usize>,
    cell_sized: bool,
}

fn counts(segment: &Segment) -> Result<Vec<usize>, ParseError> {
    segment
        .integer_args()?
        .into_iter()
        .map(|value| usize::try_from(value).map_err(|_| segment.invalid_number()))
        .collect()
}

fn positive(segment: &Segment, value: usize) -> Result<usize, ParseError> {
    if value == 0 {
        Err(segment.invalid_number())
    } else {
        Ok(value)
    }
}

fn weights(segment: &Segment) -> Result<Vec<f32>, ParseError> {
    let values = segment.number_args()?;
    if values.iter().any(|value| *value < 0.0) {
        return Err(segment.invalid_number());
    }
    Ok(values)
}

fn column_keyword(word: &str) -> Option<ColumnAlignment> {
    ColumnAlignment::from_keyword(&word.to_ascii_lowercase())
}

fn row_keyword(word: &str) -> Option<RowAlignment> {
    RowAlignment::from_keyword(&word.to_ascii_lowercase())
}

fn line_break(segment: &Segment) -> LineBreak {
    let gap = segment.args_raw();
    LineBreak {
        gap: (!gap.is_empty()).then(|| gap.to_owned()),
    }
}

fn check_weight(weight: Option<f32>) -> Result<(), ConstraintError> {
    match weight {
        Some(value) if !(value.is_finite() && value >= 0.0) => Err(ConstraintError::InvalidArgument(
            format!("grow weight must be a non-negative number, got {value}"),
        )),
        _ => Ok(()),
    }
}

fn check_extent(name: &str, value: usize) -> Result<(), ConstraintError> {
    if value == 0 {
        Err(ConstraintError::InvalidArgument(format!("{name} must be at least 1")))
    } else {
        Ok(())
    }
}

impl CellConstraints {
    /// A placement explicitly in the single cell (`x`, `y`).
    pub fn at(x: usize, y: usize) -> Self {
        Self {
            cell: CellRect::cell(x, y),
            explicit_cell: true,
            ..Self::default()
        }
    }

    /// Parse a constraint string, returning the tokens that were kept verbatim.
    ///
    /// # Errors
    /// Returns a [`ParseError`] for a malformed numeric argument, e.g. `cell a b`.
    pub fn parse(text: &str) -> Result<(Self, Vec<String>), ParseError> {
        Self::parse_counting(text).map(|(constraints, _)| {
            let unrecognized = constraints.extras.clone();
            (constraints, unrecognized)
        })
    }

    fn parse_counting(text: &str) -> Result<(Self, usize), ParseError> {
        let mut constraints = Self::default();
        let mut span = PendingSpan::default();
        let segments = split_segments(text);
        let has_siblings = segments.len() > 1;
        let mut recognized = 0;
        for segment in &segments {
            if constraints.apply_segment(segment, has_siblings, &mut span)? {
                recognized += 1;
            } else {
                log::warn!("keeping constraint `{}` verbatim", segment.raw);
                constraints.extras.push(segment.raw.clone());
            }
        }
        if constraints.is_docked() {
            constraints.cell = CellRect::cell(0, 0);
            constraints.explicit_cell = false;
        } else if !span.cell_sized {
            constraints.cell.width = span.width.unwrap_or(constraints.cell.width);
            constraints.cell.height = span.height.unwrap_or(constraints.cell.height);
        }
        Ok((constraints, recognized))
    }

    /// Applies one segment; `false` means it was not recognized.
    #[allow(clippy::too_many_lines, reason = "one arm per keyword")]
    fn apply_segment(
        &mut self,
        segment: &Segment,
        has_siblings: bool,
        span: &mut PendingSpan,
    ) -> Result<bool, ParseError> {
        let Some(keyword) = segment.keyword() else {
            return Ok(false);
        };
        match keyword.as_str() {
            "dock" => {
                let Some(side) = segment
                    .args()
                    .first()
                    .and_then(Atom::ident)
                    .and_then(|word| DockSide::from_keyword(&word.to_ascii_lowercase()))
                else {
                    return Ok(false);
                };
                self.dock = Some(side);
            }
            word if segment.atoms.len() == 1 && DockSide::from_keyword(word).is_some() => {
                self.dock = DockSide::from_keyword(word);
            }
            "cell" => {
                let values = counts(segment)?;
                let [x, y, width, height] = match values.as_slice() {
                    [] => [0, 0, 1, 1],
                    [x] => [*x, 0, 1, 1],
                    [x, y] => [*x, *y, 1, 1],
                    [x, y, width] => [*x, *y, positive(segment, *width)?, 1],
                    [x, y, width, height] => [
                        *x,
                        *y,
                        positive(segment, *width)?,
                        positive(segment, *height)?,
                    ],
                    _ => return Err(segment.invalid_number()),
                };
                self.cell = CellRect::new(x, y, width, height);
                self.explicit_cell = true;
                span.cell_sized = values.len() > 2;
            }
            "flowx" => self.horizontal_split = Some(true),
            "flowy" => self.horizontal_split = Some(false),
            "split" => {
                self.split = Some(match segment.integer_args()?.as_slice() {
                    [] => Split::Remaining,
                    [count] if *count > 0 => Split::Count(count.unsigned_abs()),
                    _ => return Err(segment.invalid_number()),
                });
            }
            "span" | "spanx" | "spany" => {
                let values = counts(segment)?;
                match (keyword.as_str(), values.as_slice()) {
                    (_, []) => return Ok(false),
                    ("span", [width]) | ("spanx", [width]) => {
                        span.width = Some(positive(segment, *width)?);
                    }
                    ("span", [width, height]) => {
                        span.width = Some(positive(segment, *width)?);
                        span.height = Some(positive(segment, *height)?);
                    }
                    ("spany", [height]) => span.height = Some(positive(segment, *height)?),
                    _ => return Err(segment.invalid_number()),
                }
            }
            "grow" => match weights(segment)?.as_slice() {
                [] => (self.grow_x, self.grow_y) = (Some(DEFAULT_WEIGHT), Some(DEFAULT_WEIGHT)),
                [both] => (self.grow_x, self.grow_y) = (Some(*both), Some(*both)),
                [x, y] => (self.grow_x, self.grow_y) = (Some(*x), Some(*y)),
                _ => return Err(segment.invalid_number()),
            },
            "growx" | "growy" => {
                let weight = match weights(segment)?.as_slice() {
                    [] => DEFAULT_WEIGHT,
                    [weight] => *weight,
                    _ => return Err(segment.invalid_number()),
                };
                if keyword == "growx" {
                    self.grow_x = Some(weight);
                } else {
                    self.grow_y = Some(weight);
                }
            }
            "alignx" | "ax" => {
                match segment.args().first().and_then(Atom::ident).and_then(column_keyword) {
                    Some(alignment) if segment.args().len() == 1 => self.horizontal_alignment = alignment,
                    _ => self.keep_alignment(segment, true, false),
                }
            }
            "aligny" | "ay" => {
                match segment.args().first().and_then(Atom::ident).and_then(row_keyword) {
                    Some(alignment) if segment.args().len() == 1 => self.vertical_alignment = alignment,
                    _ => self.keep_alignment(segment, false, true),
                }
            }
            "align" | "al" => self.apply_align(segment),
            word if GapToken::is_gap_keyword(word) => {
                self.gaps
                    .push(GapToken::normalized(word, segment.args_raw(), has_siblings));
            }
            "hidemode" => match segment.integer_args()?.as_slice() {
                [mode] if (0..=3).contains(mode) => self.hide_mode = u8::try_from(*mode).ok(),
                _ => return Err(segment.invalid_number()),
            },
            "skip" => {
                self.skip = Some(match counts(segment)?.as_slice() {
                    [] => 1,
                    [count] => *count,
                    _ => return Err(segment.invalid_number()),
                });
            }
            "wrap" => self.wrap = Some(line_break(segment)),
            "newline" => self.newline = Some(line_break(segment)),
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// `align x [y]`. A single word goes to whichever axis knows it, columns first.
    fn apply_align(&mut self, segment: &Segment) {
        let words: Option<Vec<&str>> = segment.args().iter().map(Atom::ident).collect();
        match words.as_deref() {
            Some([word]) => {
                if let Some(alignment) = column_keyword(word) {
                    self.horizontal_alignment = alignment;
                } else if let Some(alignment) = row_keyword(word) {
                    self.vertical_alignment = alignment;
                } else {
                    self.keep_alignment(segment, true, true);
                }
            }
            Some([first, second]) => match (column_keyword(first), row_keyword(second)) {
                (Some(horizontal), Some(vertical)) => {
                    self.horizontal_alignment = horizontal;
                    self.vertical_alignment = vertical;
                }
                _ => self.keep_alignment(segment, true, true),
            },
            _ => self.keep_alignment(segment, true, true),
        }
    }

    fn keep_alignment(&mut self, segment: &Segment, horizontal: bool, vertical: bool) {
        log::warn!("alignment `{}` cannot be interpreted", segment.raw);
        if horizontal {
            self.horizontal_alignment = ColumnAlignment::Unknown;
        }
        if vertical {
            self.vertical_alignment = RowAlignment::Unknown;
        }
        self.alignment_raw.push(segment.raw.clone());
    }

    /// Replace every field with the parse of `text`. An empty string clears everything.
    ///
    /// # Errors
    /// Fails without modifying `self` when `text` is malformed or holds no recognized
    /// token at all.
    pub fn set_string(&mut self, text: &str) -> Result<(), ConstraintError> {
        let (parsed, recognized) = Self::parse_counting(text)?;
        if recognized == 0 && !text.trim().is_empty() {
            return Err(ParseError::NothingRecognized {
                text: text.trim().to_owned(),
            }
            .into());
        }
        *self = parsed;
        Ok(())
    }

    pub fn x(&self) -> usize {
        self.cell.x
    }

    pub fn y(&self) -> usize {
        self.cell.y
    }

    pub fn width(&self) -> usize {
        self.cell.width
    }

    pub fn height(&self) -> usize {
        self.cell.height
    }

    pub fn cell_rect(&self) -> CellRect {
        self.cell
    }

    /// Whether the coordinates were written with a `cell` token.
    pub fn is_explicit(&self) -> bool {
        self.explicit_cell
    }

    pub fn is_docked(&self) -> bool {
        self.dock.is_some()
    }

    /// Set the column; the placement becomes an explicit cell.
    pub fn set_x(&mut self, x: usize) {
        self.cell.x = x;
        self.explicit_cell = true;
    }

    /// Set the row; the placement becomes an explicit cell.
    pub fn set_y(&mut self, y: usize) {
        self.cell.y = y;
        self.explicit_cell = true;
    }

    /// # Errors
    /// Rejects a width of zero.
    pub fn set_width(&mut self, width: usize) -> Result<(), ConstraintError> {
        check_extent("width", width)?;
        self.cell.width = width;
        Ok(())
    }

    /// # Errors
    /// Rejects a height of zero.
    pub fn set_height(&mut self, height: usize) -> Result<(), ConstraintError> {
        check_extent("height", height)?;
        self.cell.height = height;
        Ok(())
    }

    /// Move by `delta` columns, stopping at column 0.
    pub fn update_x(&mut self, delta: isize) {
        self.set_x(self.cell.x.saturating_add_signed(delta));
    }

    /// Move by `delta` rows, stopping at row 0.
    pub fn update_y(&mut self, delta: isize) {
        self.set_y(self.cell.y.saturating_add_signed(delta));
    }

    /// Grow or shrink by `delta` columns, never below one.
    pub fn update_width(&mut self, delta: isize) {
        self.cell.width = self.cell.width.saturating_add_signed(delta).max(1);
    }

    /// Grow or shrink by `delta` rows, never below one.
    pub fn update_height(&mut self, delta: isize) {
        self.cell.height = self.cell.height.saturating_add_signed(delta).max(1);
    }

    /// Place the component explicitly on `rect`, undocking it.
    ///
    /// # Errors
    /// Rejects an empty rectangle.
    pub fn set_cell_rect(&mut self, rect: CellRect) -> Result<(), ConstraintError> {
        check_extent("width", rect.width)?;
        check_extent("height", rect.height)?;
        self.cell = rect;
        self.explicit_cell = true;
        self.dock = None;
        Ok(())
    }

    pub fn dock_side(&self) -> Option<DockSide> {
        self.dock
    }

    /// Dock the component; a docked component takes no grid cell.
    pub fn set_dock_side(&mut self, side: Option<DockSide>) {
        if side.is_some() {
            self.cell = CellRect::cell(0, 0);
            self.explicit_cell = false;
        }
        self.dock = side;
    }

    /// Explicit split direction: `Some(true)` for `flowx`, `Some(false)` for `flowy`.
    pub fn horizontal_split(&self) -> Option<bool> {
        self.horizontal_split
    }

    pub fn set_horizontal_split(&mut self, horizontal: Option<bool>) {
        self.horizontal_split = horizontal;
    }

    /// Whether components split into this cell flow horizontally, given the layout default.
    pub fn is_horizontal_split(&self, default: FlowDirection) -> bool {
        self.horizontal_split
            .unwrap_or(default == FlowDirection::Horizontal)
    }

    pub fn split(&self) -> Option<Split> {
        self.split
    }

    pub fn set_split(&mut self, split: Option<Split>) {
        self.split = split;
    }

    pub fn horizontal_alignment(&self) -> ColumnAlignment {
        self.horizontal_alignment
    }

    pub fn vertical_alignment(&self) -> RowAlignment {
        self.vertical_alignment
    }

    /// # Errors
    /// Rejects `Unknown`.
    pub fn set_horizontal_alignment(&mut self, alignment: ColumnAlignment) -> Result<(), ConstraintError> {
        if alignment.is_unknown() {
            return Err(ConstraintError::InvalidArgument(
                "cannot set an unknown horizontal alignment".to_owned(),
            ));
        }
        self.drop_alignment_raw();
        self.horizontal_alignment = alignment;
        Ok(())
    }

    /// # Errors
    /// Rejects `Unknown`.
    pub fn set_vertical_alignment(&mut self, alignment: RowAlignment) -> Result<(), ConstraintError> {
        if alignment.is_unknown() {
            return Err(ConstraintError::InvalidArgument(
                "cannot set an unknown vertical alignment".to_owned(),
            ));
        }
        self.drop_alignment_raw();
        self.vertical_alignment = alignment;
        Ok(())
    }

    fn drop_alignment_raw(&mut self) {
        self.alignment_raw.clear();
        if self.horizontal_alignment.is_unknown() {
            self.horizontal_alignment = ColumnAlignment::Default;
        }
        if self.vertical_alignment.is_unknown() {
            self.vertical_alignment = RowAlignment::Default;
        }
    }

    pub fn grow_x(&self) -> Option<f32> {
        self.grow_x
    }

    pub fn grow_y(&self) -> Option<f32> {
        self.grow_y
    }

    /// # Errors
    /// Rejects negative or non-finite weights.
    pub fn set_grow_x(&mut self, weight: Option<f32>) -> Result<(), ConstraintError> {
        check_weight(weight)?;
        self.grow_x = weight;
        Ok(())
    }

    /// # Errors
    /// Rejects negative or non-finite weights.
    pub fn set_grow_y(&mut self, weight: Option<f32>) -> Result<(), ConstraintError> {
        check_weight(weight)?;
        self.grow_y = weight;
        Ok(())
    }

    pub fn hide_mode(&self) -> Option<u8> {
        self.hide_mode
    }

    /// # Errors
    /// Rejects modes above 3.
    pub fn set_hide_mode(&mut self, mode: Option<u8>) -> Result<(), ConstraintError> {
        if mode.is_some_and(|value| value > 3) {
            return Err(ConstraintError::InvalidArgument(
                "hidemode must be between 0 and 3".to_owned(),
            ));
        }
        self.hide_mode = mode;
        Ok(())
    }

    pub fn gaps(&self) -> &[GapToken] {
        &self.gaps
    }

    pub fn skip(&self) -> Option<usize> {
        self.skip
    }

    pub fn newline(&self) -> Option<&LineBreak> {
        self.newline.as_ref()
    }

    pub fn wrap(&self) -> Option<&LineBreak> {
        self.wrap.as_ref()
    }

    pub fn set_wrap(&mut self, wrap: Option<LineBreak>) {
        self.wrap = wrap;
    }

    /// Tokens kept verbatim because they were not understood.
    pub fn extras(&self) -> &[String] {
        &self.extras
    }

    /// Position the component where the implicit flow puts it, keeping it implicit.
    ///
    /// Docked components take no cell and are left alone.
    pub fn apply_flow(&mut self, context: &mut FlowContext) {
        if self.is_docked() {
            return;
        }
        let (x, y) = context.place(self);
        self.cell.x = x;
        self.cell.y = y;
    }

    /// Turn the flow position into explicit `cell` coordinates.
    pub fn make_explicit_cell(&mut self, context: &mut FlowContext) {
        if self.is_docked() {
            return;
        }
        self.apply_flow(context);
        self.explicit_cell = true;
    }

    fn position_tokens(&self, tokens: &mut Vec<String>) {
        let CellRect {
            x,
            y,
            width,
            height,
        } = self.cell;
        if self.explicit_cell {
            if width == 1 && height == 1 {
                tokens.push(format!("cell {x} {y}"));
            } else {
                tokens.push(format!("cell {x} {y} {width} {height}"));
            }
        } else if width > 1 && height > 1 {
            tokens.push(format!("span {width} {height}"));
        } else if width > 1 {
            tokens.push(format!("spanx {width}"));
        } else if height > 1 {
            tokens.push(format!("spany {height}"));
        }
    }

    fn grow_tokens(&self, tokens: &mut Vec<String>) {
        let weighted = |keyword: &str, weight: f32| {
            if (weight - DEFAULT_WEIGHT).abs() < f32::EPSILON {
                keyword.to_owned()
            } else {
                format!("{keyword} {}", format_number(weight))
            }
        };
        match (self.grow_x, self.grow_y) {
            (Some(x), Some(y)) if (x - y).abs() < f32::EPSILON => tokens.push(weighted("grow", x)),
            (grow_x, grow_y) => {
                tokens.extend(grow_x.map(|weight| weighted("growx", weight)));
                tokens.extend(grow_y.map(|weight| weighted("growy", weight)));
            }
        }
    }
}

impl Display for CellConstraints {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        let mut tokens: Vec<String> = self.gaps.iter().map(ToString::to_string).collect();
        if let Some(side) = self.dock {
            tokens.push(format!("dock {}", side.keyword()));
        }
        match self.horizontal_split {
            Some(true) => tokens.push("flowx".to_owned()),
            Some(false) => tokens.push("flowy".to_owned()),
            None => {}
        }
        match self.split {
            Some(Split::Remaining) => tokens.push("split".to_owned()),
            Some(Split::Count(count)) => tokens.push(format!("split {count}")),
            None => {}
        }
        if !self.is_docked() {
            self.position_tokens(&mut tokens);
        }
        tokens.extend(self.alignment_raw.iter().cloned());
        if let Some(keyword) = self.horizontal_alignment.keyword() {
            tokens.push(format!("alignx {keyword}"));
        }
        if let Some(keyword) = self.vertical_alignment.keyword() {
            tokens.push(format!("aligny {keyword}"));
        }
        self.grow_tokens(&mut tokens);
        if let Some(mode) = self.hide_mode {
            tokens.push(format!("hidemode {mode}"));
        }
        match self.skip {
            Some(1) => tokens.push("skip".to_owned()),
            Some(count) => tokens.push(format!("skip {count}")),
            None => {}
        }
        if let Some(newline) = &self.newline {
            tokens.push(newline.write("newline"));
        }
        if let Some(wrap) = &self.wrap {
            tokens.push(wrap.write("wrap"));
        }
        tokens.extend(self.extras.iter().cloned());
        formatter.write_str(&tokens.join(","))
    }
}
