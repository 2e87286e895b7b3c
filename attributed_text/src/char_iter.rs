// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::Error;
use crate::text_range::validate_range;

/// A bidirectional cursor over a fixed range of characters.
///
/// The cursor sits on an index in `begin..=end`; sitting on `end` means "past the last
/// character" and reads as `None`. Navigation methods move the cursor and return the
/// character under it.
#[derive(Clone, Debug)]
pub struct CharIterator<'a> {
    text: &'a [char],
    begin: usize,
    end: usize,
    pos: usize,
}

impl<'a> CharIterator<'a> {
    /// Creates a cursor over all of `text`, positioned at the first character.
    pub fn new(text: &'a [char]) -> Self {
        Self {
            text,
            begin: 0,
            end: text.len(),
            pos: 0,
        }
    }

    /// Creates a cursor over `range` of `text`, positioned at `range.start`.
    pub fn with_range(text: &'a [char], range: Range<usize>) -> Result<Self, Error> {
        validate_range(text.len(), &range)?;
        Ok(Self {
            text,
            begin: range.start,
            end: range.end,
            pos: range.start,
        })
    }

    /// Moves to the first character of the range and returns it.
    pub fn first(&mut self) -> Option<char> {
        self.pos = self.begin;
        self.current()
    }

    /// Moves to the last character of the range and returns it.
    ///
    /// An empty range leaves the cursor at its end.
    pub fn last(&mut self) -> Option<char> {
        self.pos = if self.end > self.begin {
            self.end - 1
        } else {
            self.end
        };
        self.current()
    }

    /// Returns the character under the cursor.
    pub fn current(&self) -> Option<char> {
        if self.pos < self.end {
            self.text.get(self.pos).copied()
        } else {
            None
        }
    }

    /// Advances one character and returns the new current character.
    ///
    /// At the last character this moves the cursor to the end and returns `None`.
    pub fn next_char(&mut self) -> Option<char> {
        if self.pos + 1 < self.end {
            self.pos += 1;
            self.current()
        } else {
            self.pos = self.end;
            None
        }
    }

    /// Steps back one character and returns it; `None` (without moving) at the beginning.
    pub fn previous(&mut self) -> Option<char> {
        if self.pos > self.begin {
            self.pos -= 1;
            self.current()
        } else {
            None
        }
    }

    /// Moves the cursor to `index` and returns the character there.
    pub fn set_index(&mut self, index: usize) -> Result<Option<char>, Error> {
        if index < self.begin || index > self.end {
            return Err(Error::invalid_bounds(index, index, self.end));
        }
        self.pos = index;
        Ok(self.current())
    }

    /// The current index.
    pub fn index(&self) -> usize {
        self.pos
    }

    /// The first index of the range.
    pub fn begin_index(&self) -> usize {
        self.begin
    }

    /// The end index of the range (exclusive).
    pub fn end_index(&self) -> usize {
        self.end
    }

    /// The characters of the whole range, independent of the cursor.
    pub fn as_slice(&self) -> &'a [char] {
        &self.text[self.begin..self.end]
    }
}
