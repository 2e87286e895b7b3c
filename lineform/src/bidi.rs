// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bidi levels and visual ordering, resolved through `unicode-bidi`.

use std::ops::Range;

use text_primitives::BidiEmbedding;
use unicode_bidi::{BidiClass, BidiInfo, Level};

/// Per-character bidi levels of a paragraph.
///
/// Explicit embeddings, overrides and isolates are realised by bracketing their spans with the
/// matching control characters before analysis; the controls themselves get no entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BidiAnalysis {
    base_level: u8,
    levels: Vec<u8>,
    classes: Vec<BidiClass>,
}

impl BidiAnalysis {
    /// Analyses `chars`.
    ///
    /// `base_level` forces the paragraph direction; `None` takes it from the first strong
    /// character. `embeddings` are sorted, non-overlapping spans of explicit embeddings.
    pub fn new(
        chars: &[char],
        base_level: Option<u8>,
        embeddings: &[(Range<usize>, BidiEmbedding)],
    ) -> Self {
        let mut opens = vec![None; chars.len()];
        let mut closes = vec![None; chars.len()];
        for (range, embedding) in embeddings {
            let Some((open, close)) = embedding.controls() else {
                continue;
            };
            if range.start < range.end && range.end <= chars.len() {
                opens[range.start] = Some(open);
                closes[range.end - 1] = Some(close);
            }
        }

        let mut text = String::with_capacity(chars.len() + embeddings.len() * 2);
        let mut offsets = Vec::with_capacity(chars.len());
        for (index, &ch) in chars.iter().enumerate() {
            if let Some(open) = opens[index] {
                text.push(open);
            }
            offsets.push(text.len());
            text.push(ch);
            if let Some(close) = closes[index] {
                text.push(close);
            }
        }

        let forced = base_level.and_then(|level| Level::new(level).ok());
        let info = BidiInfo::new(&text, forced);
        let base_level = forced
            .or_else(|| info.paragraphs.first().map(|paragraph| paragraph.level))
            .map_or(0, |level| level.number());
        let levels = offsets
            .iter()
            .map(|&offset| info.levels[offset].number())
            .collect();
        let classes = offsets
            .iter()
            .map(|&offset| info.original_classes[offset])
            .collect();
        Self {
            base_level,
            levels,
            classes,
        }
    }

    /// Whether any character in `chars` can produce right-to-left levels.
    pub fn requires_bidi(chars: &[char]) -> bool {
        chars.iter().any(|&ch| {
            use BidiClass::*;
            matches!(
                unicode_bidi::bidi_class(ch),
                R | AL | AN | RLE | RLO | RLI | FSI
            )
        })
    }

    /// The paragraph embedding level.
    pub fn base_level(&self) -> u8 {
        self.base_level
    }

    /// Whether the paragraph runs left to right.
    pub fn is_left_to_right(&self) -> bool {
        self.base_level & 1 == 0
    }

    /// Whether every character is at level zero, so no reordering can happen.
    pub fn is_trivial(&self) -> bool {
        self.levels.iter().all(|&level| level == 0)
    }

    /// Number of characters analysed.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether no characters were analysed.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Resolved paragraph levels, one per character.
    pub fn levels(&self) -> &[u8] {
        &self.levels
    }

    /// Level of the character at `index`, or the base level past the end.
    pub fn level_at(&self, index: usize) -> u8 {
        self.levels.get(index).copied().unwrap_or(self.base_level)
    }

    /// Bidi class of the character at `index` before resolution.
    pub fn class_at(&self, index: usize) -> Option<BidiClass> {
        self.classes.get(index).copied()
    }

    /// Levels of a line covering `range`.
    ///
    /// Segment and paragraph separators, and any whitespace run that precedes them or ends the
    /// line, are reset to the paragraph level.
    pub fn line_levels(&self, range: Range<usize>) -> Vec<u8> {
        let end = range.end.min(self.levels.len());
        let start = range.start.min(end);
        let mut levels = self.levels[start..end].to_vec();
        let classes = &self.classes[start..end];
        let mut trailing = true;
        for index in (0..levels.len()).rev() {
            use BidiClass::*;
            match classes[index] {
                S | B => {
                    levels[index] = self.base_level;
                    trailing = true;
                }
                WS | FSI | LRI | RLI | PDI | BN | LRE | RLE | LRO | RLO | PDF if trailing => {
                    levels[index] = self.base_level;
                }
                _ => trailing = false,
            }
        }
        levels
    }

    /// The analysis of a line covering `range`, with line levels applied.
    pub fn line(&self, range: Range<usize>) -> Self {
        let end = range.end.min(self.levels.len());
        let start = range.start.min(end);
        Self {
            base_level: self.base_level,
            levels: self.line_levels(start..end),
            classes: self.classes[start..end].to_vec(),
        }
    }

    /// Updates the analysis for a character inserted at `index` into all-left-to-right text.
    pub(crate) fn insert_trivial(&mut self, index: usize, ch: char) {
        let index = index.min(self.levels.len());
        self.levels.insert(index, 0);
        self.classes.insert(index, unicode_bidi::bidi_class(ch));
    }

    /// Updates the analysis for a character removed at `index` from all-left-to-right text.
    pub(crate) fn delete_trivial(&mut self, index: usize) {
        if index < self.levels.len() {
            self.levels.remove(index);
            self.classes.remove(index);
        }
    }
}

/// Visual-to-logical map for `levels`, or `None` when the order is the identity.
pub(crate) fn reorder_visual(levels: &[u8]) -> Option<Vec<usize>> {
    let mut max_level = 0;
    let mut lowest_odd_level = 255;
    for &level in levels {
        max_level = max_level.max(level);
        if level & 1 != 0 && level < lowest_odd_level {
            lowest_odd_level = level;
        }
    }
    if lowest_odd_level > max_level {
        return None;
    }

    let mut order: Vec<usize> = (0..levels.len()).collect();
    let count = order.len();
    for level in (lowest_odd_level..=max_level).rev() {
        let mut i = 0;
        while i < count {
            if levels[order[i]] >= level {
                let mut end = i + 1;
                while end < count && levels[order[end]] >= level {
                    end += 1;
                }
                order[i..end].reverse();
                i = end;
            }
            i += 1;
        }
    }
    Some(order)
}

/// Inverse of a permutation.
pub(crate) fn inverse(map: &[usize]) -> Vec<usize> {
    let mut inverse = vec![0; map.len()];
    for (from, &to) in map.iter().enumerate() {
        inverse[to] = from;
    }
    inverse
}

#[cfg(test)]
mod tests {
    use super::{BidiAnalysis, inverse, reorder_visual};
    use text_primitives::{BidiDirection, BidiEmbedding};

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    #[test]
    fn hebrew_inside_latin() {
        let text = chars("ab\u{5D0}\u{5D1}f");
        let bidi = BidiAnalysis::new(&text, None, &[]);
        assert!(bidi.is_left_to_right());
        assert!(!bidi.is_trivial());
        assert_eq!(bidi.levels(), &[0, 0, 1, 1, 0]);
        let order = reorder_visual(bidi.levels()).unwrap();
        assert_eq!(order, vec![0, 1, 3, 2, 4]);
        assert_eq!(inverse(&order), vec![0, 1, 3, 2, 4]);
    }

    #[test]
    fn latin_in_rtl_paragraph_keeps_order() {
        let text = chars("abc");
        let bidi = BidiAnalysis::new(&text, Some(1), &[]);
        assert!(!bidi.is_left_to_right());
        assert_eq!(bidi.levels(), &[2, 2, 2]);
        assert_eq!(reorder_visual(bidi.levels()), None);
    }

    #[test]
    fn plain_latin_needs_no_reordering() {
        let text = chars("hello");
        let bidi = BidiAnalysis::new(&text, None, &[]);
        assert!(bidi.is_trivial());
        assert_eq!(reorder_visual(bidi.levels()), None);
        assert!(!BidiAnalysis::requires_bidi(&text));
        assert!(BidiAnalysis::requires_bidi(&chars("a\u{5D0}")));
    }

    #[test]
    fn override_and_trailing_whitespace() {
        let text = chars("ab  ");
        let embedding = BidiEmbedding::Override(BidiDirection::Rtl);
        let bidi = BidiAnalysis::new(&text, Some(0), &[(0..4, embedding)]);
        assert_eq!(bidi.len(), 4);
        assert_eq!(bidi.levels(), &[1, 1, 1, 1]);
        assert_eq!(bidi.line_levels(0..4), vec![1, 1, 0, 0]);
        assert_eq!(bidi.line(0..3).levels(), &[1, 1, 0]);
    }

    #[test]
    fn trivial_edits_track_length() {
        let mut bidi = BidiAnalysis::new(&chars("ab"), None, &[]);
        bidi.insert_trivial(1, 'x');
        assert_eq!(bidi.levels(), &[0, 0, 0]);
        bidi.delete_trivial(0);
        assert_eq!(bidi.len(), 2);
    }
}
