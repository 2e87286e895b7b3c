// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::Error;

/// A character range checked against a text's length.
///
/// Holds `start <= end <= len` for the text it was made from. It does not remember that text;
/// reuse it only with text at least as long.
///
/// ```
/// use attributed_text::{AttributedText, TextRange};
///
/// let mut text = AttributedText::new("naïve");
/// let range = TextRange::new(text.chars(), 2..5).unwrap();
/// text.apply_attribute(range, "emphasis");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextRange {
    start: usize,
    end: usize,
}

impl TextRange {
    /// Checks `range` against `text`.
    pub fn new(text: &[char], range: Range<usize>) -> Result<Self, Error> {
        validate_range(text.len(), &range)?;
        Ok(Self {
            start: range.start,
            end: range.end,
        })
    }

    /// First character offset.
    #[must_use]
    pub const fn start(self) -> usize {
        self.start
    }

    /// One past the last character offset.
    #[must_use]
    pub const fn end(self) -> usize {
        self.end
    }

    /// Number of characters covered.
    #[must_use]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    /// Whether no characters are covered.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// The plain range.
    #[must_use]
    pub fn as_range(self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<TextRange> for Range<usize> {
    fn from(value: TextRange) -> Self {
        value.as_range()
    }
}

pub(crate) fn validate_range(len: usize, range: &Range<usize>) -> Result<(), Error> {
    if range.start > range.end {
        Err(Error::invalid_range(range.start, range.end, len))
    } else if range.end > len {
        Err(Error::invalid_bounds(range.start, range.end, len))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::TextRange;
    use crate::ErrorKind;
    use alloc::vec::Vec;

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    #[test]
    fn empty_and_full_ranges_are_valid() {
        let text = chars("abc");
        assert!(TextRange::new(&text, 0..0).unwrap().is_empty());
        assert!(TextRange::new(&text, 3..3).is_ok());
        assert_eq!(TextRange::new(&text, 0..3).unwrap().len(), 3);
    }

    #[test]
    #[expect(clippy::reversed_empty_ranges, reason = "Testing a reversed range.")]
    fn reversed_range() {
        let err = TextRange::new(&chars("abc"), 2..1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
        assert_eq!((err.start(), err.end()), (2, 1));
    }

    #[test]
    fn offsets_count_characters_not_bytes() {
        let text = chars("naïve");
        assert!(TextRange::new(&text, 2..5).is_ok());
        let err = TextRange::new(&text, 4..6).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBounds);
        assert_eq!(err.len(), 5);
    }
}
