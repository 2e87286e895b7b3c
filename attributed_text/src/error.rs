// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::ops::Range;

/// A rejected range or edit position.
///
/// Edit positions are reported as the empty range at that position. Offsets and the length are
/// counted in characters.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    range: Range<usize>,
    /// Character count of the text the request was made against.
    len: usize,
}

#[expect(
    clippy::len_without_is_empty,
    reason = "`len` is the length of the text that rejected the request, not of the error."
)]
impl Error {
    fn new(kind: ErrorKind, range: Range<usize>, len: usize) -> Self {
        Self { kind, range, len }
    }

    /// What went wrong.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Start of the rejected range.
    pub fn start(&self) -> usize {
        self.range.start
    }

    /// End of the rejected range.
    pub fn end(&self) -> usize {
        self.range.end
    }

    /// Character count of the text.
    pub fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn invalid_bounds(start: usize, end: usize, len: usize) -> Self {
        Self::new(ErrorKind::InvalidBounds, start..end, len)
    }

    pub(crate) fn invalid_range(start: usize, end: usize, len: usize) -> Self {
        Self::new(ErrorKind::InvalidRange, start..end, len)
    }

    pub(crate) fn invalid_position(position: usize, len: usize) -> Self {
        Self::new(ErrorKind::InvalidPosition, position..position, len)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Range { start, end } = self.range;
        let len = self.len;
        match self.kind {
            ErrorKind::InvalidBounds => {
                write!(f, "range {start}..{end} extends past the {len} characters")
            }
            ErrorKind::InvalidRange => write!(f, "range {start}..{end} is reversed"),
            ErrorKind::InvalidPosition => {
                write!(f, "cannot edit at {start} in text of {len} characters")
            }
        }
    }
}

impl core::error::Error for Error {}

/// The category of an [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The range ends past the text.
    InvalidBounds,
    /// The range starts after it ends.
    InvalidRange,
    /// An insertion or deletion position lies outside the text.
    InvalidPosition,
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};
    use alloc::string::ToString;

    #[test]
    fn positions_are_empty_ranges() {
        let err = Error::invalid_position(9, 4);
        assert_eq!(err.kind(), ErrorKind::InvalidPosition);
        assert_eq!((err.start(), err.end(), err.len()), (9, 9, 4));
        assert_eq!(err.to_string(), "cannot edit at 9 in text of 4 characters");
    }
}
