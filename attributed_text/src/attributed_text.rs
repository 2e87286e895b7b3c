// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::Range;

use crate::{CharIterator, Error, TextRange};

/// A block of text with attributes applied to ranges within the text.
///
/// Text is stored as shared, immutable characters; every index in this API counts characters.
/// Editing never mutates in place: [`insert_char`](Self::insert_char) and
/// [`delete_char`](Self::delete_char) return a new value, leaving the original untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributedText<Attr: Debug> {
    text: Arc<[char]>,
    attributes: Vec<(Range<usize>, Attr)>,
}

impl<Attr: Debug> AttributedText<Attr> {
    /// Plain text with no attributes.
    pub fn new(text: &str) -> Self {
        Self::from_chars(text.chars().collect::<Vec<_>>())
    }

    /// Plain text over an existing character buffer.
    pub fn from_chars(text: impl Into<Arc<[char]>>) -> Self {
        Self {
            text: text.into(),
            attributes: Vec::default(),
        }
    }

    /// Borrow the characters.
    pub fn chars(&self) -> &[char] {
        &self.text
    }

    /// Returns a shared handle to the characters.
    pub fn shared_chars(&self) -> Arc<[char]> {
        self.text.clone()
    }

    /// Returns the character at `index`, if any.
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.text.get(index).copied()
    }

    /// Returns the length of the text, in characters.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns a cursor over the characters in `range`.
    pub fn char_iter(&self, range: Range<usize>) -> Result<CharIterator<'_>, Error> {
        CharIterator::with_range(&self.text, range)
    }

    /// Apply `attribute` over `range`, which was validated against this text.
    pub fn apply_attribute(&mut self, range: TextRange, attribute: Attr) {
        debug_assert!(
            range.end() <= self.text.len(),
            "TextRange validated against a shorter text"
        );
        self.attributes.push((range.as_range(), attribute));
    }

    /// Validate `range` against this text, then apply `attribute` over it.
    pub fn try_apply_attribute(
        &mut self,
        range: Range<usize>,
        attribute: Attr,
    ) -> Result<(), Error> {
        let range = TextRange::new(&self.text, range)?;
        self.apply_attribute(range, attribute);
        Ok(())
    }

    /// Every applied span with its attribute, oldest first.
    pub fn attributes_iter(&self) -> impl ExactSizeIterator<Item = (&Range<usize>, &Attr)> {
        self.attributes.iter().map(|(range, attr)| (range, attr))
    }

    /// Attributes covering the character at `index`, in application order.
    ///
    /// Conflicts are left to the caller; the last item wins when resolving.
    pub fn attributes_at(&self, index: usize) -> impl DoubleEndedIterator<Item = &Attr> {
        self.attributes
            .iter()
            .filter(move |(span, _)| span.contains(&index))
            .map(|(_, attr)| attr)
    }

    /// Attributes overlapping any character of `range`.
    pub fn attributes_for_range(&self, range: Range<usize>) -> impl Iterator<Item = &Attr> {
        self.attributes
            .iter()
            .filter(move |(span, _)| span.start < range.end && range.start < span.end)
            .map(|(_, attr)| attr)
    }

    /// Returns the number of attribute spans applied to the text.
    pub fn attributes_len(&self) -> usize {
        self.attributes.len()
    }

    /// Remove all applied attribute spans.
    pub fn clear_attributes(&mut self) {
        self.attributes.clear();
    }

    pub(crate) fn attribute_at_idx(&self, idx: usize) -> Option<(&Range<usize>, &Attr)> {
        self.attributes.get(idx).map(|(range, attr)| (range, attr))
    }
}

impl<Attr: Debug + Clone> AttributedText<Attr> {
    /// Returns a copy of this text with `ch` inserted before the character at `position`.
    ///
    /// The new character takes the attributes of the character before it, or of the character
    /// after it when inserted at the very start.
    pub fn insert_char(&self, position: usize, ch: char) -> Result<Self, Error> {
        let len = self.text.len();
        if position > len {
            return Err(Error::invalid_position(position, len));
        }
        let mut text = Vec::with_capacity(len + 1);
        text.extend_from_slice(&self.text[..position]);
        text.push(ch);
        text.extend_from_slice(&self.text[position..]);

        let attributes = self
            .attributes
            .iter()
            .map(|(range, attr)| {
                let range = if position == 0 {
                    if range.start == 0 && range.end > 0 {
                        0..range.end + 1
                    } else {
                        range.start + 1..range.end + 1
                    }
                } else if range.start >= position {
                    range.start + 1..range.end + 1
                } else if range.end >= position {
                    range.start..range.end + 1
                } else {
                    range.clone()
                };
                (range, attr.clone())
            })
            .collect();
        Ok(Self {
            text: text.into(),
            attributes,
        })
    }

    /// Returns a copy of this text with the character at `position` removed.
    ///
    /// Spans that only covered the removed character are dropped.
    pub fn delete_char(&self, position: usize) -> Result<Self, Error> {
        let len = self.text.len();
        if position >= len {
            return Err(Error::invalid_position(position, len));
        }
        let mut text = Vec::with_capacity(len - 1);
        text.extend_from_slice(&self.text[..position]);
        text.extend_from_slice(&self.text[position + 1..]);

        let shift = |index: usize| if index > position { index - 1 } else { index };
        let attributes = self
            .attributes
            .iter()
            .filter_map(|(range, attr)| {
                let shifted = shift(range.start)..shift(range.end);
                if shifted.is_empty() && !range.is_empty() {
                    None
                } else {
                    Some((shifted, attr.clone()))
                }
            })
            .collect();
        Ok(Self {
            text: text.into(),
            attributes,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{AttributedText, ErrorKind, TextRange};
    use alloc::format;
    use alloc::vec::Vec;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAttribute {
        Keep,
        Remove,
    }

    #[test]
    fn attributes_at() {
        let mut at = AttributedText::new("Hello!");

        assert!(at.try_apply_attribute(1..3, TestAttribute::Keep).is_ok());
        assert!(at.try_apply_attribute(2..5, TestAttribute::Remove).is_ok());

        assert!(at.attributes_at(0).collect::<Vec<_>>().is_empty());
        assert_eq!(
            at.attributes_at(2).collect::<Vec<_>>(),
            [&TestAttribute::Keep, &TestAttribute::Remove]
        );
        assert_eq!(at.attributes_at(2).next_back(), Some(&TestAttribute::Remove));
    }

    #[expect(
        clippy::reversed_empty_ranges,
        reason = "Reversed ranges are what is being rejected."
    )]
    #[test]
    fn rejected_ranges_leave_the_text_unchanged() {
        let mut at = AttributedText::new("Hello!");
        at.try_apply_attribute(0..6, TestAttribute::Keep).unwrap();

        let err = at.try_apply_attribute(4..3, TestAttribute::Keep).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
        assert_eq!(format!("{err}"), "range 4..3 is reversed");

        let err = at.try_apply_attribute(7..8, TestAttribute::Keep).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBounds);
        assert_eq!((err.start(), err.end(), err.len()), (7, 8, 6));
        assert_eq!(format!("{err}"), "range 7..8 extends past the 6 characters");

        assert_eq!(at.attributes_len(), 1);
    }

    #[test]
    fn indices_count_characters() {
        let mut at = AttributedText::new("éclair");
        assert_eq!(at.len(), 6);
        at.apply_attribute(TextRange::new(at.chars(), 0..1).unwrap(), TestAttribute::Keep);
        assert_eq!(at.attributes_at(0).count(), 1);
        assert_eq!(at.attributes_at(1).count(), 0);
    }

    #[test]
    fn insert_extends_preceding_span() {
        let mut at = AttributedText::new("abcd");
        at.try_apply_attribute(0..2, TestAttribute::Keep).unwrap();
        at.try_apply_attribute(2..4, TestAttribute::Remove).unwrap();

        let edited = at.insert_char(2, 'x').unwrap();
        assert_eq!(edited.chars(), ['a', 'b', 'x', 'c', 'd']);
        let spans: Vec<_> = edited.attributes_iter().map(|(r, _)| r.clone()).collect();
        assert_eq!(spans, [0..3, 3..5]);
        // The original is untouched.
        assert_eq!(at.len(), 4);
    }

    #[test]
    fn insert_at_start_extends_first_span() {
        let mut at = AttributedText::new("abcd");
        at.try_apply_attribute(0..2, TestAttribute::Keep).unwrap();
        at.try_apply_attribute(2..4, TestAttribute::Remove).unwrap();

        let edited = at.insert_char(0, 'x').unwrap();
        let spans: Vec<_> = edited.attributes_iter().map(|(r, _)| r.clone()).collect();
        assert_eq!(spans, [0..3, 3..5]);
    }

    #[test]
    fn delete_shrinks_and_drops_spans() {
        let mut at = AttributedText::new("abcd");
        at.try_apply_attribute(0..2, TestAttribute::Keep).unwrap();
        at.try_apply_attribute(2..3, TestAttribute::Remove).unwrap();

        let edited = at.delete_char(2).unwrap();
        assert_eq!(edited.chars(), ['a', 'b', 'd']);
        let spans: Vec<_> = edited.attributes_iter().map(|(r, _)| r.clone()).collect();
        assert_eq!(spans, [0..2]);

        let edited = at.delete_char(0).unwrap();
        let spans: Vec<_> = edited.attributes_iter().map(|(r, _)| r.clone()).collect();
        assert_eq!(spans, [0..1, 1..2]);
    }

    #[test]
    fn edits_reject_bad_positions() {
        let at = AttributedText::<TestAttribute>::new("ab");
        assert_eq!(
            at.insert_char(3, 'x').unwrap_err().kind(),
            ErrorKind::InvalidPosition
        );
        assert_eq!(
            at.delete_char(2).unwrap_err().kind(),
            ErrorKind::InvalidPosition
        );
        assert!(at.insert_char(2, 'x').is_ok());
    }
}
