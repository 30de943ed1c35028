//! Container level constraints: `"insets 10, gap 5 10, flowy, wrap 3"`.

use core::fmt::{Display, Formatter, Result as FmtResult};

use migrid_cell::FlowDirection;
use migrid_grid::LayoutConfig;
use migrid_syntax::{ParseError, Segment, split_segments};
use migrid_values_units::{Orientation, Size, UnitContext};

/// The constraint string of a whole layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutConstraints {
    /// One inset for every side, or top, left, bottom and right.
    insets: Option<Vec<Size>>,
    gap_x: Option<Size>,
    gap_y: Option<Size>,
    flow: Option<FlowDirection>,
    /// `Some(None)` wraps after the number of columns.
    wrap: Option<Option<usize>>,
    extras: Vec<String>,
}

fn sizes(segment: &Segment) -> Option<Vec<Size>> {
    segment
        .args_raw()
        .split_whitespace()
        .map(|part| Size::parse(part).ok())
        .collect()
}

fn pixels(size: &Size, context: &UnitContext) -> Option<i32> {
    size.to_pixels(context).map(|value| value.round() as i32)
}

impl LayoutConstraints {
    /// Parse a layout constraint string. Unknown tokens are kept verbatim.
    ///
    /// # Errors
    /// Fails when `wrap` has a non-integer argument.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut constraints = Self::default();
        for segment in split_segments(text) {
            if !constraints.apply_segment(&segment)? {
                log::warn!("keeping layout constraint `{}` verbatim", segment.raw);
                constraints.extras.push(segment.raw);
            }
        }
        Ok(constraints)
    }

    fn apply_segment(&mut self, segment: &Segment) -> Result<bool, ParseError> {
        let Some(keyword) = segment.keyword() else {
            return Ok(false);
        };
        match keyword.as_str() {
            "insets" | "ins" => match sizes(segment) {
                Some(parsed) if parsed.len() == 1 || parsed.len() == 4 => self.insets = Some(parsed),
                _ => return Ok(false),
            },
            "gap" => match sizes(segment).as_deref() {
                Some([both]) => {
                    self.gap_x = Some(both.clone());
                    self.gap_y = Some(both.clone());
                }
                Some([horizontal, vertical]) => {
                    self.gap_x = Some(horizontal.clone());
                    self.gap_y = Some(vertical.clone());
                }
                _ => return Ok(false),
            },
            "gapx" | "gapy" => {
                let Some(Ok([gap])) = sizes(segment).map(<[Size; 1]>::try_from) else {
                    return Ok(false);
                };
                if keyword == "gapx" {
                    self.gap_x = Some(gap);
                } else {
                    self.gap_y = Some(gap);
                }
            }
            "flowx" if segment.args().is_empty() => self.flow = Some(FlowDirection::Horizontal),
            "flowy" if segment.args().is_empty() => self.flow = Some(FlowDirection::Vertical),
            "wrap" => {
                let count = match segment.integer_args()?.as_slice() {
                    [] => None,
                    [count] => Some(usize::try_from(*count).map_err(|_| segment.invalid_number())?),
                    _ => return Err(segment.invalid_number()),
                };
                self.wrap = Some(count);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    pub fn flow(&self) -> Option<FlowDirection> {
        self.flow
    }

    pub fn wrap(&self) -> Option<Option<usize>> {
        self.wrap
    }

    pub fn extras(&self) -> &[String] {
        &self.extras
    }

    /// Write these constraints into `config`.
    ///
    /// A bare `wrap` wraps after `column_count` cells. Sizes that do not resolve to
    /// pixels leave the configured value alone.
    pub fn apply_to(&self, config: &mut LayoutConfig, column_count: usize) {
        let geometry = &mut config.geometry;
        let horizontal = UnitContext::new(geometry.metrics, Orientation::Horizontal);
        let vertical = UnitContext::new(geometry.metrics, Orientation::Vertical);
        let sides = match self.insets.as_deref() {
            Some([all]) => Some([all, all, all, all]),
            Some([top, left, bottom, right]) => Some([top, left, bottom, right]),
            _ => None,
        };
        if let Some([top, left, bottom, right]) = sides {
            let insets = &mut geometry.insets;
            insets.top = pixels(top, &vertical).unwrap_or(insets.top);
            insets.left = pixels(left, &horizontal).unwrap_or(insets.left);
            insets.bottom = pixels(bottom, &vertical).unwrap_or(insets.bottom);
            insets.right = pixels(right, &horizontal).unwrap_or(insets.right);
        }
        if let Some(gap) = self.gap_x.as_ref().and_then(|gap| pixels(gap, &horizontal)) {
            geometry.column_gap = gap;
        }
        if let Some(gap) = self.gap_y.as_ref().and_then(|gap| pixels(gap, &vertical)) {
            geometry.row_gap = gap;
        }
        if let Some(flow) = self.flow {
            config.flow = flow;
        }
        if let Some(wrap) = self.wrap {
            config.wrap_after = Some(wrap.unwrap_or(column_count)).filter(|limit| *limit > 0);
        }
    }
}

impl Display for LayoutConstraints {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        let mut tokens = Vec::new();
        if let Some(insets) = &self.insets {
            let values: Vec<String> = insets.iter().map(ToString::to_string).collect();
            tokens.push(format!("insets {}", values.join(" ")));
        }
        match (&self.gap_x, &self.gap_y) {
            (Some(horizontal), Some(vertical)) if horizontal == vertical => {
                tokens.push(format!("gap {horizontal}"));
            }
            (Some(horizontal), Some(vertical)) => tokens.push(format!("gap {horizontal} {vertical}")),
            (horizontal, vertical) => {
                tokens.extend(horizontal.iter().map(|gap| format!("gapx {gap}")));
                tokens.extend(vertical.iter().map(|gap| format!("gapy {gap}")));
            }
        }
        match self.flow {
            Some(FlowDirection::Horizontal) => tokens.push("flowx".to_owned()),
            Some(FlowDirection::Vertical) => tokens.push("flowy".to_owned()),
            None => {}
        }
        match self.wrap {
            Some(Some(count)) => tokens.push(format!("wrap {count}")),
            Some(None) => tokens.push("wrap".to_owned()),
            None => {}
        }
        tokens.extend(self.extras.iter().cloned());
        formatter.write_str(&tokens.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// # Panics
    /// Panics if layout tokens are not read or written canonically.
    #[test]
    fn parses_and_writes_layout_tokens() {
        let constraints = LayoutConstraints::parse("wrap 3, flowy, gap 4px 8px, insets 10px, debug")
            .unwrap_or_default();
        assert_eq!(constraints.flow(), Some(FlowDirection::Vertical));
        assert_eq!(constraints.wrap(), Some(Some(3)));
        assert_eq!(constraints.extras(), ["debug"]);
        assert_eq!(
            constraints.to_string(),
            "insets 10px,gap 4px 8px,flowy,wrap 3,debug"
        );
        let single = LayoutConstraints::parse("gapx 2px, gapy 2px").unwrap_or_default();
        assert_eq!(single.to_string(), "gap 2px");
        assert!(LayoutConstraints::parse("wrap many").is_err());
    }

    /// # Panics
    /// Panics if applying constraints does not update the configuration.
    #[test]
    fn applies_to_layout_config() {
        let constraints = LayoutConstraints::parse("insets 1px 2px 3px 4px, gapy 9px, wrap")
            .unwrap_or_default();
        let mut config = LayoutConfig::default();
        constraints.apply_to(&mut config, 4);
        let insets = config.geometry.insets;
        assert_eq!((insets.top, insets.left, insets.bottom, insets.right), (1, 2, 3, 4));
        assert_eq!(config.geometry.column_gap, 5);
        assert_eq!(config.geometry.row_gap, 9);
        assert_eq!(config.wrap_after, Some(4));
    }

    /// # Panics
    /// Panics if malformed insets are not kept verbatim.
    #[test]
    fn malformed_insets_stay_verbatim() {
        let constraints = LayoutConstraints::parse("insets 1px 2px").unwrap_or_default();
        assert_eq!(constraints.extras(), ["insets 1px 2px"]);
        assert_eq!(constraints.to_string(), "insets 1px 2px");
    }
}
