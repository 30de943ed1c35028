//! One bracket group of a dimension string: `[min:pref:max,align,grow N,...]`.

use core::fmt::{Display, Formatter, Result as FmtResult};

use migrid_syntax::{ConstraintError, ParseError, Segment, format_number, split_segments};
use migrid_values_units::{DisplayMetrics, LengthUnit, Size, UnitContext, to_unit_string};

use crate::{AxisAlignment, ColumnAlignment, RowAlignment};

/// Weight or priority assumed when a keyword carries no explicit number.
pub const DEFAULT_WEIGHT: f32 = 100.0;

pub type ColumnSpec = DimensionSpec<ColumnAlignment>;
pub type RowSpec = DimensionSpec<RowAlignment>;

/// Size, alignment and resize behavior of one column or row.
///
/// Gaps are not stored here; [`crate::DimensionList`] keeps one gap per boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct DimensionSpec<A> {
    min: Option<Size>,
    preferred: Size,
    max: Option<Size>,
    alignment: A,
    /// Alignment text kept verbatim while `alignment` is `Unknown`.
    alignment_raw: Option<String>,
    grow: Option<f32>,
    grow_priority: Option<f32>,
    shrink: Option<f32>,
    shrink_priority: Option<f32>,
    /// Tokens this model does not interpret, in input order.
    extras: Vec<String>,
}

impl<A: AxisAlignment> Default for DimensionSpec<A> {
    fn default() -> Self {
        Self {
            min: None,
            preferred: Size::Default,
            max: None,
            alignment: A::default(),
            alignment_raw: None,
            grow: None,
            grow_priority: None,
            shrink: None,
            shrink_priority: None,
            extras: Vec::new(),
        }
    }
}

/// The parsed `min:pref:max` parts.
type SizeTriple = (Option<Size>, Size, Option<Size>);

fn parse_size_triple(text: &str) -> Result<SizeTriple, ParseError> {
    let parts: Vec<&str> = text.split(':').map(str::trim).collect();
    if parts.len() > 3 || parts.iter().all(|part| part.is_empty()) {
        return Err(ParseError::InvalidSize {
            text: text.trim().to_owned(),
        });
    }
    let parse_part = |part: &str| -> Result<Option<Size>, ParseError> {
        if part.is_empty() {
            Ok(None)
        } else {
            Size::parse(part).map(Some)
        }
    };
    match parts.as_slice() {
        [preferred] => Ok((None, parse_part(preferred)?.unwrap_or_default(), None)),
        [min, preferred] => Ok((parse_part(min)?, parse_part(preferred)?.unwrap_or_default(), None)),
        [min, preferred, max] => Ok((
            parse_part(min)?,
            parse_part(preferred)?.unwrap_or_default(),
            parse_part(max)?,
        )),
        _ => Err(ParseError::InvalidSize {
            text: text.trim().to_owned(),
        }),
    }
}

/// Reads the single optional number of `grow`/`shrink`-style keywords.
fn optional_weight(segment: &Segment) -> Result<Option<f32>, ParseError> {
    match segment.number_args()?.as_slice() {
        [] => Ok(None),
        [weight] if *weight >= 0.0 => Ok(Some(*weight)),
        _ => Err(segment.invalid_number()),
    }
}

fn required_weight(segment: &Segment) -> Result<f32, ParseError> {
    optional_weight(segment)?.ok_or_else(|| segment.invalid_number())
}

fn check_weight(name: &str, weight: Option<f32>) -> Result<(), ConstraintError> {
    match weight {
        Some(value) if !(value.is_finite() && value >= 0.0) => Err(ConstraintError::InvalidArgument(
            format!("{name} must be a non-negative number, got {value}"),
        )),
        _ => Ok(()),
    }
}

impl<A: AxisAlignment> DimensionSpec<A> {
    /// Parse the body of one bracket group (without the brackets).
    ///
    /// Tokens this model does not understand are kept and written back unchanged.
    ///
    /// # Errors
    /// Returns a [`ParseError`] for a malformed numeric argument such as `grow x`.
    pub fn parse(body: &str) -> Result<Self, ParseError> {
        Self::parse_counting(body).map(|(spec, _)| spec)
    }

    /// Parses `body` and reports how many tokens were understood.
    fn parse_counting(body: &str) -> Result<(Self, usize), ParseError> {
        let mut spec = Self::default();
        let mut recognized = 0;
        let mut size_seen = false;
        for segment in split_segments(body) {
            if spec.apply_segment(&segment, &mut size_seen)? {
                recognized += 1;
            } else {
                log::warn!("keeping dimension token `{}` verbatim", segment.raw);
                spec.extras.push(segment.raw);
            }
        }
        Ok((spec, recognized))
    }

    /// Applies one segment; `false` means it was not recognized.
    fn apply_segment(&mut self, segment: &Segment, size_seen: &mut bool) -> Result<bool, ParseError> {
        let keyword = segment.keyword();
        if segment.atoms.len() == 1
            && let Some(alignment) = keyword.as_deref().and_then(A::from_keyword)
        {
            self.alignment = alignment;
            self.alignment_raw = None;
            return Ok(true);
        }
        match keyword.as_deref() {
            Some("align" | "al") => {
                let named = match segment.args() {
                    [value] => value
                        .ident()
                        .map(str::to_ascii_lowercase)
                        .and_then(|word| A::from_keyword(&word)),
                    _ => None,
                };
                if let Some(alignment) = named {
                    self.alignment = alignment;
                    self.alignment_raw = None;
                } else {
                    log::warn!("alignment `{}` cannot be interpreted", segment.raw);
                    self.alignment = A::unknown();
                    self.alignment_raw = Some(segment.raw.clone());
                }
            }
            Some("grow") => {
                self.grow = Some(optional_weight(segment)?.unwrap_or(DEFAULT_WEIGHT));
            }
            Some("growprio" | "gp") => self.grow_priority = Some(required_weight(segment)?),
            Some("shrink" | "sh") => {
                self.shrink = Some(optional_weight(segment)?.unwrap_or(DEFAULT_WEIGHT));
            }
            Some("shrinkprio" | "shp") => self.shrink_priority = Some(required_weight(segment)?),
            _ if !*size_seen => match parse_size_triple(&segment.raw) {
                Ok((min, preferred, max)) => {
                    self.min = min;
                    self.preferred = preferred;
                    self.max = max;
                    *size_seen = true;
                }
                Err(_) => return Ok(false),
            },
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Replace every field with the parse of `body`.
    ///
    /// Surrounding brackets are accepted and stripped. An empty body resets to defaults.
    ///
    /// # Errors
    /// Fails without modifying `self` when `body` is malformed or is non-empty but holds
    /// no recognized token at all.
    pub fn set_string(&mut self, body: &str) -> Result<(), ConstraintError> {
        let trimmed = body.trim();
        let inner = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .unwrap_or(trimmed);
        let (spec, recognized) = Self::parse_counting(inner)?;
        if recognized == 0 && !inner.trim().is_empty() {
            return Err(ParseError::NothingRecognized {
                text: inner.to_owned(),
            }
            .into());
        }
        *self = spec;
        Ok(())
    }

    pub fn min(&self) -> Option<&Size> {
        self.min.as_ref()
    }

    pub fn preferred(&self) -> &Size {
        &self.preferred
    }

    pub fn max(&self) -> Option<&Size> {
        self.max.as_ref()
    }

    /// The size triple as written, `None` when every part is default.
    pub fn size(&self) -> Option<String> {
        let part = |size: Option<&Size>| size.map_or_else(String::new, ToString::to_string);
        let preferred = (!self.preferred.is_default()).then_some(&self.preferred);
        if self.max.is_some() {
            Some(format!(
                "{}:{}:{}",
                part(self.min.as_ref()),
                part(preferred),
                part(self.max.as_ref())
            ))
        } else if self.min.is_some() {
            Some(format!("{}:{}", part(self.min.as_ref()), part(preferred)))
        } else {
            preferred.map(ToString::to_string)
        }
    }

    /// Set the size from `min:pref:max` text; one part sets only the preferred size,
    /// two set minimum and preferred. `None` restores the defaults.
    ///
    /// # Errors
    /// Fails without modifying `self` when a part is not a size or nothing is given.
    pub fn set_size(&mut self, text: Option<&str>) -> Result<(), ConstraintError> {
        let (min, preferred, max) = match text {
            Some(text) => parse_size_triple(text)?,
            None => (None, Size::Default, None),
        };
        self.min = min;
        self.preferred = preferred;
        self.max = max;
        Ok(())
    }

    pub fn set_min(&mut self, min: Option<Size>) {
        self.min = min;
    }

    pub fn set_preferred(&mut self, preferred: Size) {
        self.preferred = preferred;
    }

    pub fn set_max(&mut self, max: Option<Size>) {
        self.max = max;
    }

    pub fn alignment(&self) -> A {
        self.alignment
    }

    /// # Errors
    /// Rejects `Unknown`, which only parsing may produce.
    pub fn set_alignment(&mut self, alignment: A) -> Result<(), ConstraintError> {
        if alignment.is_unknown() {
            return Err(ConstraintError::InvalidArgument(
                "cannot set an unknown alignment".to_owned(),
            ));
        }
        self.alignment = alignment;
        self.alignment_raw = None;
        Ok(())
    }

    /// Grow weight; `None` when the track does not grow.
    pub fn grow(&self) -> Option<f32> {
        self.grow
    }

    /// # Errors
    /// Rejects negative or non-finite weights.
    pub fn set_grow(&mut self, weight: Option<f32>) -> Result<(), ConstraintError> {
        check_weight("grow weight", weight)?;
        self.grow = weight;
        Ok(())
    }

    /// Effective grow priority.
    pub fn grow_priority(&self) -> f32 {
        self.grow_priority.unwrap_or(DEFAULT_WEIGHT)
    }

    /// # Errors
    /// Rejects negative or non-finite priorities.
    pub fn set_grow_priority(&mut self, priority: Option<f32>) -> Result<(), ConstraintError> {
        check_weight("grow priority", priority)?;
        self.grow_priority = priority;
        Ok(())
    }

    /// Effective shrink weight; tracks shrink unless told otherwise.
    pub fn shrink(&self) -> f32 {
        self.shrink.unwrap_or(DEFAULT_WEIGHT)
    }

    /// # Errors
    /// Rejects negative or non-finite weights.
    pub fn set_shrink(&mut self, weight: Option<f32>) -> Result<(), ConstraintError> {
        check_weight("shrink weight", weight)?;
        self.shrink = weight;
        Ok(())
    }

    pub fn shrink_priority(&self) -> f32 {
        self.shrink_priority.unwrap_or(DEFAULT_WEIGHT)
    }

    /// # Errors
    /// Rejects negative or non-finite priorities.
    pub fn set_shrink_priority(&mut self, priority: Option<f32>) -> Result<(), ConstraintError> {
        check_weight("shrink priority", priority)?;
        self.shrink_priority = priority;
        Ok(())
    }

    /// Tokens kept verbatim because they were not understood.
    pub fn extras(&self) -> &[String] {
        &self.extras
    }

    /// The bracket body in canonical token order, without brackets.
    pub fn body(&self) -> String {
        let mut tokens = Vec::new();
        if let Some(size) = self.size() {
            tokens.push(size);
        }
        match (&self.alignment_raw, self.alignment.keyword()) {
            (Some(raw), _) if self.alignment.is_unknown() => tokens.push(raw.clone()),
            (_, Some(keyword)) => tokens.push(keyword.to_owned()),
            _ => {}
        }
        if let Some(grow) = self.grow {
            tokens.push(weighted("grow", grow));
        }
        let explicit = |value: Option<f32>| value.filter(|weight| !is_default_weight(*weight));
        if let Some(priority) = explicit(self.grow_priority) {
            tokens.push(format!("growprio {}", format_number(priority)));
        }
        if let Some(shrink) = explicit(self.shrink) {
            tokens.push(format!("shrink {}", format_number(shrink)));
        }
        if let Some(priority) = explicit(self.shrink_priority) {
            tokens.push(format!("shrinkprio {}", format_number(priority)));
        }
        tokens.extend(self.extras.iter().cloned());
        tokens.join(",")
    }

    /// Express `pixels` in `unit` along this spec's axis.
    pub fn to_unit_string(
        pixels: i32,
        unit: LengthUnit,
        metrics: DisplayMetrics,
        percent_base: Option<f32>,
    ) -> Option<String> {
        let mut context = UnitContext::new(metrics, A::ORIENTATION);
        if let Some(base) = percent_base {
            context = context.with_percent_base(base);
        }
        to_unit_string(pixels, unit, &context)
    }
}

fn is_default_weight(weight: f32) -> bool {
    (weight - DEFAULT_WEIGHT).abs() < f32::EPSILON
}

fn weighted(keyword: &str, weight: f32) -> String {
    if is_default_weight(weight) {
        keyword.to_owned()
    } else {
        format!("{keyword} {}", format_number(weight))
    }
}

impl<A: AxisAlignment> Display for DimensionSpec<A> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        write!(formatter, "[{}]", self.body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migrid_values_units::{Length, SizeKeyword};

    /// # Panics
    /// Panics if a full bracket body does not parse into its fields.
    #[test]
    fn parses_every_field() {
        let spec = ColumnSpec::parse("10px:50%:pref, right, grow 50, growprio 200, shrink 0, shp 5")
            .unwrap_or_default();
        assert_eq!(spec.min(), Some(&Size::Length(Length::px(10.0))));
        assert_eq!(spec.max(), Some(&Size::Keyword(SizeKeyword::Pref)));
        assert_eq!(spec.alignment(), ColumnAlignment::Right);
        assert_eq!(spec.grow(), Some(50.0));
        assert_eq!(spec.grow_priority(), 200.0);
        assert_eq!(spec.shrink(), 0.0);
        assert_eq!(spec.shrink_priority(), 5.0);
        assert_eq!(
            spec.body(),
            "10px:50%:pref,right,grow 50,growprio 200,shrink 0,shrinkprio 5"
        );
    }

    /// # Panics
    /// Panics if default weights are written out.
    #[test]
    fn elides_default_weights() {
        let plain = RowSpec::parse("grow").unwrap_or_default();
        let mut explicit = RowSpec::default();
        assert_eq!(explicit.set_grow(Some(100.0)), Ok(()));
        assert_eq!(explicit.set_grow_priority(Some(100.0)), Ok(()));
        assert_eq!(explicit.set_shrink(Some(100.0)), Ok(()));
        assert_eq!(explicit.body(), plain.body());
        assert_eq!(explicit.body(), "grow");
        assert_eq!(explicit.set_grow(None), Ok(()));
        assert_eq!(explicit.body(), "");
        assert_eq!(RowSpec::parse("grow 100").unwrap_or_default().body(), "grow");
    }

    /// # Panics
    /// Panics if set_size does not map part counts onto min/pref/max.
    #[test]
    fn set_size_maps_parts() {
        let mut spec = ColumnSpec::default();
        assert_eq!(spec.set_size(Some("100px")), Ok(()));
        assert_eq!(spec.min(), None);
        assert_eq!(spec.preferred(), &Size::Length(Length::px(100.0)));
        assert_eq!(spec.set_size(Some("10px:100px")), Ok(()));
        assert_eq!(spec.size().as_deref(), Some("10px:100px"));
        assert_eq!(spec.set_size(Some("10px::200px")), Ok(()));
        assert_eq!(spec.preferred(), &Size::Default);
        assert_eq!(spec.size().as_deref(), Some("10px::200px"));
        assert!(spec.set_size(Some("10px:wide")).is_err());
        assert_eq!(spec.size().as_deref(), Some("10px::200px"));
        assert!(spec.set_size(Some("")).is_err());
        assert_eq!(spec.set_size(None), Ok(()));
        assert_eq!(spec.size(), None);
    }

    /// # Panics
    /// Panics if unknown alignment syntax is not preserved or can be set directly.
    #[test]
    fn unknown_alignment_is_preserved() {
        let mut spec = ColumnSpec::parse("align 30%").unwrap_or_default();
        assert_eq!(spec.alignment(), ColumnAlignment::Unknown);
        assert_eq!(spec.to_string(), "[align 30%]");
        assert!(spec.set_alignment(ColumnAlignment::Unknown).is_err());
        assert_eq!(spec.set_alignment(ColumnAlignment::Leading), Ok(()));
        assert_eq!(spec.to_string(), "[leading]");
    }

    /// # Panics
    /// Panics if unrecognized tokens are dropped or reordered.
    #[test]
    fn keeps_unknown_tokens_after_known_ones() {
        let spec = RowSpec::parse("sizegroup a, top, 20px").unwrap_or_default();
        assert_eq!(spec.body(), "20px,top,sizegroup a");
        assert_eq!(spec.extras(), ["sizegroup a".to_owned()]);
    }

    /// # Panics
    /// Panics if malformed numbers are accepted.
    #[test]
    fn rejects_malformed_weights() {
        assert!(ColumnSpec::parse("grow much").is_err());
        assert!(ColumnSpec::parse("growprio").is_err());
        let mut spec = ColumnSpec::default();
        assert!(spec.set_grow(Some(-1.0)).is_err());
        assert_eq!(spec.grow(), None);
    }

    /// # Panics
    /// Panics if set_string accepts text with no recognized token or is not atomic.
    #[test]
    fn set_string_requires_a_recognized_token() {
        let mut spec = ColumnSpec::parse("100px").unwrap_or_default();
        assert!(spec.set_string("nonsense").is_err());
        assert_eq!(spec.body(), "100px");
        assert_eq!(spec.set_string("[fill,grow]"), Ok(()));
        assert_eq!(spec.body(), "fill,grow");
        assert_eq!(spec.set_string(""), Ok(()));
        assert_eq!(spec.body(), "");
    }

    /// # Panics
    /// Panics if unit conversion ignores the axis.
    #[test]
    fn unit_strings_follow_axis() {
        let metrics = DisplayMetrics {
            screen_width: 1000.0,
            screen_height: 500.0,
            ..DisplayMetrics::default()
        };
        assert_eq!(
            ColumnSpec::to_unit_string(100, LengthUnit::ScreenPercent, metrics, None).as_deref(),
            Some("10sp")
        );
        assert_eq!(
            RowSpec::to_unit_string(100, LengthUnit::ScreenPercent, metrics, None).as_deref(),
            Some("20sp")
        );
        assert_eq!(
            RowSpec::to_unit_string(50, LengthUnit::Percent, metrics, Some(200.0)).as_deref(),
            Some("25%")
        );
    }
}
