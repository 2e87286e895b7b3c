// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use attributed_text::CharIterator;
use icu_segmenter::LineSegmenter;
use icu_segmenter::options::LineBreakOptions;

use super::TextMeasurer;
use crate::context::LayoutContext;
use crate::error::Error;
use crate::layout::TextLayout;
use crate::style::Paragraph;

/// Line break opportunities of a paragraph, as character offsets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LineBreaks {
    /// Sorted; always starts with 0 and ends with the character count.
    boundaries: Vec<usize>,
}

impl LineBreaks {
    pub(crate) fn new(chars: &[char]) -> Self {
        let mut iter = CharIterator::new(chars);
        let mut text = String::with_capacity(chars.len());
        // Byte offset of each character, plus the end.
        let mut offsets = Vec::with_capacity(chars.len() + 1);
        let mut current = iter.first();
        while let Some(ch) = current {
            offsets.push(text.len());
            text.push(ch);
            current = iter.next_char();
        }
        offsets.push(text.len());

        let segmenter = LineSegmenter::new_auto(LineBreakOptions::default());
        let mut boundaries: Vec<usize> = segmenter
            .segment_str(&text)
            .filter_map(|byte| offsets.binary_search(&byte).ok())
            .collect();
        if boundaries.first() != Some(&0) {
            boundaries.insert(0, 0);
        }
        if boundaries.last() != Some(&chars.len()) {
            boundaries.push(chars.len());
        }
        Self { boundaries }
    }

    /// Whether a line may break before the character at `offset`.
    pub(crate) fn is_boundary(&self, offset: usize) -> bool {
        self.boundaries.binary_search(&offset).is_ok()
    }

    /// The last boundary before `offset`, or 0.
    pub(crate) fn preceding(&self, offset: usize) -> usize {
        let index = self.boundaries.partition_point(|&b| b < offset);
        index
            .checked_sub(1)
            .map_or(0, |index| self.boundaries[index])
    }

    /// The first boundary after `offset`, or the end of the text.
    pub(crate) fn following(&self, offset: usize) -> usize {
        let index = self.boundaries.partition_point(|&b| b <= offset);
        self.boundaries
            .get(index)
            .copied()
            .unwrap_or_else(|| self.boundaries.last().copied().unwrap_or(0))
    }
}

/// Breaks a paragraph into lines that fit a wrapping width.
///
/// Lines end at line break opportunities; a word wider than the wrapping width is split
/// unless the caller requires whole words.
#[derive(Clone, Debug)]
pub struct LineBreakMeasurer {
    measurer: TextMeasurer,
    breaks: LineBreaks,
    position: usize,
}

impl LineBreakMeasurer {
    /// Creates a measurer positioned at the start of `paragraph`.
    pub fn new(paragraph: &Paragraph, cx: LayoutContext) -> Result<Self, Error> {
        let measurer = TextMeasurer::new(paragraph, cx)?;
        let breaks = LineBreaks::new(measurer.chars());
        Ok(Self {
            measurer,
            breaks,
            position: 0,
        })
    }

    /// The underlying measurer.
    pub fn measurer(&self) -> &TextMeasurer {
        &self.measurer
    }

    /// The offset the next line starts at.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves to `position`.
    pub fn set_position(&mut self, position: usize) -> Result<(), Error> {
        let len = self.measurer.chars().len();
        if position > len {
            return Err(Error::index_out_of_bounds(position, len));
        }
        self.position = position;
        Ok(())
    }

    /// End of the next line that fits `width`.
    pub fn next_offset(&mut self, width: f32) -> Result<usize, Error> {
        let len = self.measurer.chars().len();
        self.next_offset_limited(width, len, false)
    }

    /// End of the next line that fits `width`, stopping at `offset_limit`.
    ///
    /// When not even the first word fits, `require_next_word` returns the current position
    /// instead of splitting the word.
    pub fn next_offset_limited(
        &mut self,
        width: f32,
        offset_limit: usize,
        require_next_word: bool,
    ) -> Result<usize, Error> {
        let len = self.measurer.chars().len();
        let position = self.position;
        let mut next = position;
        if position < len {
            if offset_limit <= position {
                return Err(Error::invalid_range(position, offset_limit, len));
            }
            let overflow = self.measurer.line_break_index(position, width)?;
            if overflow == len {
                next = len;
            } else if self.measurer.chars()[overflow].is_whitespace() {
                next = self.breaks.following(overflow);
            } else {
                // The overflow is inside a word; back up to the break before it.
                next = self.breaks.preceding(overflow + 1);
                if next <= position {
                    next = if require_next_word {
                        position
                    } else {
                        (position + 1).max(overflow)
                    };
                }
            }
        }
        Ok(next.min(offset_limit))
    }

    /// Lays out the next line that fits `width` and advances past it.
    ///
    /// Returns `None` at the end of the paragraph.
    pub fn next_layout(&mut self, width: f32) -> Result<Option<TextLayout>, Error> {
        let len = self.measurer.chars().len();
        self.next_layout_limited(width, len, false)
    }

    /// Lays out the next line that fits `width`, stopping at `offset_limit`.
    ///
    /// Returns `None` at the end of the paragraph, or when `require_next_word` is set and the
    /// next word does not fit.
    pub fn next_layout_limited(
        &mut self,
        width: f32,
        offset_limit: usize,
        require_next_word: bool,
    ) -> Result<Option<TextLayout>, Error> {
        if self.position >= self.measurer.chars().len() {
            return Ok(None);
        }
        let limit = self.next_offset_limited(width, offset_limit, require_next_word)?;
        if limit == self.position {
            return Ok(None);
        }
        let layout = self.measurer.layout(self.position, limit)?;
        self.position = limit;
        Ok(Some(layout))
    }

    /// Updates for `paragraph`, which has a character inserted at `pos`, and moves to the
    /// start.
    pub fn insert_char(&mut self, paragraph: &Paragraph, pos: usize) -> Result<(), Error> {
        self.measurer.insert_char(paragraph, pos)?;
        self.reset();
        Ok(())
    }

    /// Updates for `paragraph`, which has the character at `pos` removed, and moves to the
    /// start.
    pub fn delete_char(&mut self, paragraph: &Paragraph, pos: usize) -> Result<(), Error> {
        self.measurer.delete_char(paragraph, pos)?;
        self.reset();
        Ok(())
    }

    fn reset(&mut self) {
        self.breaks = LineBreaks::new(self.measurer.chars());
        self.position = 0;
    }
}
