// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Error returned by layout construction and layout queries.
///
/// Carries a non-exhaustive [`ErrorKind`] plus the offending index or range and the number of
/// characters in the paragraph or line at the time of failure. Indices are signed so that the
/// `-1` hit position can be reported verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    start: isize,
    end: isize,
    len: usize,
    source: Option<attributed_text::Error>,
}

#[expect(
    clippy::len_without_is_empty,
    reason = "`Error::len` reports text length context; an `is_empty` method would be misleading and unused."
)]
impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The offending index, or the start of the offending range.
    pub fn start(&self) -> isize {
        self.start
    }

    /// The end of the offending range; equal to [`Error::start`] for single indices.
    pub fn end(&self) -> isize {
        self.end
    }

    /// The number of characters in the text the request was made against.
    pub fn len(&self) -> usize {
        self.len
    }

    fn new(kind: ErrorKind, start: isize, end: isize, len: usize) -> Self {
        Self {
            kind,
            start,
            end,
            len,
            source: None,
        }
    }

    pub(crate) fn empty_text() -> Self {
        Self::new(ErrorKind::EmptyText, 0, 0, 0)
    }

    pub(crate) fn index_out_of_bounds(index: usize, len: usize) -> Self {
        let index = signed(index);
        Self::new(ErrorKind::IndexOutOfBounds, index, index, len)
    }

    pub(crate) fn invalid_hit(char_index: isize, len: usize) -> Self {
        Self::new(ErrorKind::InvalidHit, char_index, char_index, len)
    }

    pub(crate) fn invalid_range(start: usize, end: usize, len: usize) -> Self {
        Self::new(ErrorKind::InvalidRange, signed(start), signed(end), len)
    }

    pub(crate) fn invalid_width(len: usize) -> Self {
        Self::new(ErrorKind::InvalidWidth, 0, 0, len)
    }

    pub(crate) fn component_mismatch(expected: usize, actual: usize) -> Self {
        Self::new(
            ErrorKind::ComponentMismatch,
            signed(actual),
            signed(actual),
            expected,
        )
    }

    pub(crate) fn already_justified(len: usize) -> Self {
        Self::new(ErrorKind::AlreadyJustified, 0, 0, len)
    }
}

fn signed(index: usize) -> isize {
    isize::try_from(index).unwrap_or(isize::MAX)
}

impl From<attributed_text::Error> for Error {
    fn from(err: attributed_text::Error) -> Self {
        Self {
            kind: ErrorKind::Text,
            start: signed(err.start()),
            end: signed(err.end()),
            len: err.len(),
            source: Some(err),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ErrorKind::EmptyText => write!(f, "text must contain at least one character"),
            ErrorKind::IndexOutOfBounds => write!(
                f,
                "index {} out of bounds for len {}",
                self.start, self.len
            ),
            ErrorKind::InvalidHit => write!(
                f,
                "hit at character {} out of range for len {}",
                self.start, self.len
            ),
            ErrorKind::InvalidRange => write!(
                f,
                "invalid range {}..{} for len {}",
                self.start, self.end, self.len
            ),
            ErrorKind::InvalidWidth => write!(f, "justification width must be positive"),
            ErrorKind::ComponentMismatch => write!(
                f,
                "components cover {} characters but the line has {}",
                self.start, self.len
            ),
            ErrorKind::AlreadyJustified => write!(f, "layout is already justified"),
            ErrorKind::Text => match &self.source {
                Some(source) => write!(f, "text error: {source}"),
                None => write!(f, "text error"),
            },
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|err| err as &(dyn core::error::Error + 'static))
    }
}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Layout was requested for a paragraph with no characters.
    EmptyText,
    /// A character index lies outside the text.
    IndexOutOfBounds,
    /// A hit's insertion index lies outside `0..=len`.
    InvalidHit,
    /// A range is reversed or extends past the text.
    InvalidRange,
    /// A justification width was zero, negative or NaN.
    InvalidWidth,
    /// The components handed to the line assembler do not cover its characters exactly.
    ComponentMismatch,
    /// A justified layout was asked to justify again.
    AlreadyJustified,
    /// A paragraph edit or range was rejected by the attributed text store.
    Text,
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};

    #[test]
    fn wraps_attributed_text_errors() {
        let text = attributed_text::AttributedText::<()>::new("abc");
        let err: Error = text.delete_char(7).unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Text);
        assert_eq!(err.start(), 7);
        assert_eq!(err.len(), 3);
        assert!(core::error::Error::source(&err).is_some());
    }

    #[test]
    fn display_names_the_problem() {
        let err = Error::invalid_hit(-3, 5);
        assert_eq!(err.to_string(), "hit at character -3 out of range for len 5");
        let err = Error::component_mismatch(4, 6);
        assert_eq!(err.to_string(), "components cover 6 characters but the line has 4");
    }
}
