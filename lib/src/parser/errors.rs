use thiserror::Error;

/// Errors returned while parsing a pattern string.
///
/// Offsets are byte positions within the pattern string and point at the
/// construct that caused the problem.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// A metacharacter appeared where an atomic pattern was expected.
    #[error("unexpected `{found}` at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    /// The pattern ended where more input was required.
    #[error("unexpected end of pattern")]
    UnexpectedEnd,

    /// A `(` group was never closed.
    #[error("unclosed group, `(` at offset {offset}")]
    UnclosedGroup { offset: usize },

    /// A `)` without a matching `(`.
    #[error("unmatched `)` at offset {offset}")]
    UnmatchedCloseParen { offset: usize },

    /// A `[` character class was never closed.
    #[error("unclosed character class, `[` at offset {offset}")]
    UnclosedClass { offset: usize },

    /// A class range `X-Y` whose start is greater than its end.
    #[error("invalid range `{start}-{end}` at offset {offset}")]
    InvalidRange { start: char, end: char, offset: usize },

    /// A `{...}` bound that is not of the form `{m,n}`, `{m,}` or `{,n}`,
    /// or whose numbers do not fit in `usize`.
    #[error("invalid bound at offset {offset}")]
    InvalidBound { offset: usize },

    /// A `{m,n}` bound whose minimum is greater than its maximum.
    #[error("reversed bound `{{{min},{max}}}` at offset {offset}")]
    ReversedBound { min: usize, max: usize, offset: usize },
}
