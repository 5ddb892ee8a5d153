use thiserror::Error;

/// Errors raised while parsing a structural path such as `HTML[1]/DIV[3]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathParseError {
    #[error("path is empty")]
    Empty,

    #[error("path contains an empty segment")]
    EmptySegment,

    #[error("segment '{0}' is missing its closing bracket")]
    Unclosed(String),

    #[error("segment '{0}' has no tag name")]
    MissingTag(String),

    #[error("segment '{0}' has an invalid sibling index (must be a positive integer)")]
    InvalidIndex(String),
}
