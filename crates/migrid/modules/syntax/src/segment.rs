//! Comma separated segments of a constraint string.

use cssparser::{Delimiter, ParseError as CssParseError, Parser, ParserInput, Token};

use crate::ParseError;

/// One lexical unit inside a segment.
#[derive(Clone, Debug, PartialEq)]
pub enum Atom {
    /// A bare word such as `cell` or `north`.
    Ident(String),
    /// A unitless number; `int_value` is set when the source had no fraction.
    Number { value: f32, int_value: Option<i32> },
    /// A number immediately followed by a unit, e.g. `100px`. The unit is lowercased.
    Dimension { value: f32, unit: String },
    /// A percentage, expressed in percent (`50%` is `50.0`).
    Percentage(f32),
    /// The `:` separating `min:pref:max`.
    Colon,
    /// Anything else: punctuation, functions, nested blocks.
    Other,
}

impl Atom {
    fn from_token(token: &Token<'_>) -> Self {
        match *token {
            Token::Ident(ref name) => Self::Ident(name.as_ref().to_owned()),
            Token::Number {
                value, int_value, ..
            } => Self::Number { value, int_value },
            Token::Dimension {
                value, ref unit, ..
            } => Self::Dimension {
                value,
                unit: unit.as_ref().to_ascii_lowercase(),
            },
            Token::Percentage {
                unit_value,
                int_value,
                ..
            } => Self::Percentage(int_value.map_or(unit_value * 100.0, |whole| whole as f32)),
            Token::Colon => Self::Colon,
            _ => Self::Other,
        }
    }

    /// The identifier text, if this atom is one.
    pub fn ident(&self) -> Option<&str> {
        match self {
            Self::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// Case-insensitive identifier comparison.
    pub fn is_ident(&self, keyword: &str) -> bool {
        self.ident()
            .is_some_and(|name| name.eq_ignore_ascii_case(keyword))
    }

    /// The value of an integral number atom.
    pub fn as_integer(&self) -> Option<i32> {
        match *self {
            Self::Number { int_value, .. } => int_value,
            _ => None,
        }
    }

    /// The value of any unitless number atom.
    pub fn as_number(&self) -> Option<f32> {
        match *self {
            Self::Number { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// A comma separated piece of a constraint string together with its source text.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    /// Trimmed source text of the segment.
    pub raw: String,
    /// Lexed content of the segment.
    pub atoms: Vec<Atom>,
}

impl Segment {
    /// Lexes a standalone piece of text as one segment, ignoring commas.
    pub fn from_text(text: &str) -> Self {
        let mut input = ParserInput::new(text);
        let mut parser = Parser::new(&mut input);
        let atoms = collect_atoms(&mut parser).unwrap_or_default();
        Self {
            raw: text.trim().to_owned(),
            atoms,
        }
    }

    /// The leading keyword, lowercased.
    pub fn keyword(&self) -> Option<String> {
        self.atoms
            .first()
            .and_then(Atom::ident)
            .map(str::to_ascii_lowercase)
    }

    /// Atoms after the leading keyword.
    pub fn args(&self) -> &[Atom] {
        self.atoms.get(1..).unwrap_or(&[])
    }

    /// Source text after the leading keyword.
    pub fn args_raw(&self) -> &str {
        self.raw
            .split_once(char::is_whitespace)
            .map_or("", |(_, rest)| rest.trim())
    }

    /// Reads every argument as an integer.
    ///
    /// # Errors
    /// Returns [`ParseError::InvalidNumber`] when an argument is not an integer.
    pub fn integer_args(&self) -> Result<Vec<i32>, ParseError> {
        self.args()
            .iter()
            .map(|atom| atom.as_integer().ok_or_else(|| self.invalid_number()))
            .collect()
    }

    /// Reads every argument as a number.
    ///
    /// # Errors
    /// Returns [`ParseError::InvalidNumber`] when an argument is not a number.
    pub fn number_args(&self) -> Result<Vec<f32>, ParseError> {
        self.args()
            .iter()
            .map(|atom| atom.as_number().ok_or_else(|| self.invalid_number()))
            .collect()
    }

    /// Builds the error reported for a bad numeric argument of this segment.
    pub fn invalid_number(&self) -> ParseError {
        ParseError::InvalidNumber {
            keyword: self.keyword().unwrap_or_default(),
            found: self.args_raw().to_owned(),
        }
    }
}

fn collect_atoms<'src>(segment: &mut Parser<'src, '_>) -> Result<Vec<Atom>, CssParseError<'src, ()>> {
    let mut atoms = Vec::new();
    while let Ok(token) = segment.next() {
        atoms.push(Atom::from_token(token));
    }
    Ok(atoms)
}

/// Split `text` on top-level commas. Empty segments are dropped.
pub fn split_segments(text: &str) -> Vec<Segment> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut segments = Vec::new();
    loop {
        let start = parser.position();
        let atoms = parser
            .parse_until_before(Delimiter::Comma, collect_atoms)
            .unwrap_or_default();
        let raw = parser.slice_from(start).trim();
        if !raw.is_empty() {
            segments.push(Segment {
                raw: raw.to_owned(),
                atoms,
            });
        }
        if parser.next().is_err() {
            break;
        }
    }
    segments
}
