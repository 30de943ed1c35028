//! Bracket groups of a column or row dimension string.

use cssparser::{ParseError as CssParseError, Parser, ParserInput, Token};

use crate::ParseError;

/// A dimension string split into its bracket bodies and the gaps around them.
///
/// `gaps` always holds one more entry than `bodies`: `gaps[0]` precedes the first group,
/// `gaps[i]` sits between groups `i - 1` and `i`, and the last entry trails the final group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BracketList {
    /// Text inside each `[...]`, without the brackets.
    pub bodies: Vec<String>,
    /// Trimmed text between groups, `None` where there was nothing.
    pub gaps: Vec<Option<String>>,
}

enum Piece {
    Group,
    Stray,
    Gap,
    End,
}

fn read_block_body<'src>(block: &mut Parser<'src, '_>) -> Result<String, CssParseError<'src, ()>> {
    let start = block.position();
    while block.next_including_whitespace_and_comments().is_ok() {}
    Ok(block.slice_from(start).to_owned())
}

fn gap_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Split a dimension string such as `"[100px]10[grow]"` into bracket groups.
///
/// # Errors
/// Returns [`ParseError::UnterminatedBracket`] when a group is never closed and
/// [`ParseError::UnbalancedBracket`] for a `]` without an opening bracket.
pub fn split_bracket_groups(text: &str) -> Result<BracketList, ParseError> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut list = BracketList::default();
    let mut gap_start = parser.position();
    loop {
        let token_start = parser.position();
        let piece = match parser.next_including_whitespace_and_comments() {
            Ok(Token::SquareBracketBlock) => Piece::Group,
            Ok(Token::CloseSquareBracket) => Piece::Stray,
            Ok(_) => Piece::Gap,
            Err(_) => Piece::End,
        };
        match piece {
            Piece::Gap => {}
            Piece::End => break,
            Piece::Stray => {
                return Err(ParseError::UnbalancedBracket {
                    offset: token_start.byte_index(),
                });
            }
            Piece::Group => {
                list.gaps
                    .push(gap_text(parser.slice(gap_start..token_start)));
                let body = parser
                    .parse_nested_block(read_block_body)
                    .unwrap_or_default();
                if !parser.slice_from(token_start).ends_with(']') {
                    return Err(ParseError::UnterminatedBracket {
                        offset: token_start.byte_index(),
                    });
                }
                list.bodies.push(body);
                gap_start = parser.position();
            }
        }
    }
    list.gaps.push(gap_text(parser.slice_from(gap_start)));
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// # Panics
    /// Panics if groups or gaps are split incorrectly.
    #[test]
    fn splits_groups_and_gaps() {
        let list = split_bracket_groups("[100px]10px[ grow, fill ][]").unwrap_or_default();
        assert_eq!(list.bodies, vec!["100px", " grow, fill ", ""]);
        assert_eq!(
            list.gaps,
            vec![None, Some("10px".to_owned()), None, None]
        );
    }

    /// # Panics
    /// Panics if an empty string produces groups.
    #[test]
    fn empty_input_has_a_single_gap_slot() {
        let list = split_bracket_groups("  ").unwrap_or_default();
        assert!(list.bodies.is_empty());
        assert_eq!(list.gaps, vec![None]);
    }

    /// # Panics
    /// Panics if malformed brackets are accepted.
    #[test]
    fn rejects_unbalanced_brackets() {
        assert_eq!(
            split_bracket_groups("[100px][200px"),
            Err(ParseError::UnterminatedBracket { offset: 7 })
        );
        assert_eq!(
            split_bracket_groups("[100px]]"),
            Err(ParseError::UnbalancedBracket { offset: 7 })
        );
    }
}
