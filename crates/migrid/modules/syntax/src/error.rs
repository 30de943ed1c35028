//! Error taxonomy shared by every constraint model.

use thiserror::Error;

/// Malformed constraint text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `[` group was still open when the input ended.
    #[error("unterminated bracket group starting at byte {offset}")]
    UnterminatedBracket { offset: usize },
    /// A `]` appeared without a matching `[`.
    #[error("unexpected `]` at byte {offset}")]
    UnbalancedBracket { offset: usize },
    /// A keyword argument that must be numeric was not.
    #[error("`{keyword}` expects numeric arguments, found `{found}`")]
    InvalidNumber { keyword: String, found: String },
    /// The text held no token the grammar recognizes.
    #[error("`{text}` contains no recognized constraint")]
    NothingRecognized { text: String },
    /// A size expression could not be read.
    #[error("invalid size `{text}`")]
    InvalidSize { text: String },
}

/// Failure of a model setter.
///
/// Setters validate before they mutate, so receiving this error means the model is
/// exactly as it was before the call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConstraintError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A well formed but semantically illegal request.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
