// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::ops::Range;

use peniko::kurbo::{BezPath, Rect, Vec2};

use super::{Cell, CoreMetrics, cell_positions, justify_cells};
use crate::error::Error;
use crate::justify::JustificationInfo;
use crate::shape::ShapedRun;
use crate::style::{Decoration, Font};
use crate::util::{append_path, append_rect, rect, union_rect};

/// A run of characters at one bidi level, shaped with one font.
#[derive(Clone, Debug, PartialEq)]
pub struct TextComponent {
    font: Font,
    level: u8,
    metrics: CoreMetrics,
    decoration: Decoration,
    chars: Vec<char>,
    cells: Vec<Cell>,
    /// Left edge of each cell, in logical order.
    positions: Vec<f32>,
    caret_stops: Vec<bool>,
    justification: Vec<JustificationInfo>,
    /// Ink bounds of each glyph relative to its cell origin.
    ink: Vec<Rect>,
    outlines: Vec<Option<BezPath>>,
    advance: f32,
}

impl TextComponent {
    /// Builds a component from the shaper's output for `chars`.
    ///
    /// Fails if the shaper did not return exactly one entry per character.
    pub fn new(
        font: Font,
        chars: &[char],
        level: u8,
        decoration: Decoration,
        run: ShapedRun,
    ) -> Result<Self, Error> {
        if run.chars.len() != chars.len() {
            return Err(Error::component_mismatch(chars.len(), run.chars.len()));
        }
        let metrics = run.metrics;
        let size = font.size();
        let mut cells = Vec::with_capacity(chars.len());
        let mut caret_stops = Vec::with_capacity(chars.len());
        let mut justification = Vec::with_capacity(chars.len());
        let mut ink = Vec::with_capacity(chars.len());
        let mut outlines = Vec::with_capacity(chars.len());
        for (&ch, shaped) in chars.iter().zip(run.chars) {
            let advance = shaped.advance.max(0.0);
            cells.push(Cell {
                advance,
                offset: 0.0,
            });
            caret_stops.push(shaped.caret_stop && advance != 0.0);
            justification.push(
                shaped
                    .justification
                    .unwrap_or_else(|| default_justification(ch, advance, size)),
            );
            ink.push(shaped.ink.unwrap_or_else(|| {
                if ch.is_whitespace() {
                    Rect::ZERO
                } else {
                    rect(0.0, -metrics.ascent, advance, metrics.descent)
                }
            }));
            outlines.push(shaped.outline);
        }
        let mut component = Self {
            font,
            level,
            metrics,
            decoration,
            chars: chars.to_vec(),
            cells,
            positions: Vec::new(),
            caret_stops,
            justification,
            ink,
            outlines,
            advance: 0.0,
        };
        component.relayout();
        Ok(component)
    }

    fn relayout(&mut self) {
        self.positions = cell_positions(&self.cells, self.is_rtl());
        self.advance = self.cells.iter().map(|cell| cell.advance).sum();
    }

    fn is_rtl(&self) -> bool {
        self.level & 1 != 0
    }

    /// The font the characters are shaped with.
    pub fn font(&self) -> &Font {
        &self.font
    }

    /// The characters, in logical order.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub(crate) fn char_count(&self) -> usize {
        self.chars.len()
    }

    pub(crate) fn level(&self) -> u8 {
        self.level
    }

    pub(crate) fn metrics(&self) -> &CoreMetrics {
        &self.metrics
    }

    pub(crate) fn decoration(&self) -> Decoration {
        self.decoration
    }

    pub(crate) fn advance(&self) -> f32 {
        self.advance
    }

    pub(crate) fn char_advance(&self, index: usize) -> f32 {
        self.cells.get(index).map_or(0.0, |cell| cell.advance)
    }

    pub(crate) fn char_x(&self, index: usize) -> f32 {
        self.positions.get(index).copied().unwrap_or(self.advance)
    }

    pub(crate) fn caret_at_offset_is_valid(&self, index: usize) -> bool {
        if index == 0 || index >= self.chars.len() {
            return true;
        }
        matches!(self.chars[index], '\t' | '\n' | '\r') || self.caret_stops[index]
    }

    pub(crate) fn char_visual_bounds(&self, index: usize) -> Rect {
        let (Some(ink), Some(cell)) = (self.ink.get(index), self.cells.get(index)) else {
            return Rect::ZERO;
        };
        let x = self.positions[index] + cell.offset;
        *ink + Vec2::new(x.into(), 0.0)
    }

    pub(crate) fn visual_bounds(&self) -> Rect {
        let ink = (0..self.chars.len())
            .map(|index| self.char_visual_bounds(index))
            .filter(|bounds| !bounds.is_zero_area())
            .fold(None, union_rect)
            .unwrap_or(Rect::ZERO);
        self.decoration
            .extend_bounds(ink, &self.metrics, self.advance)
    }

    pub(crate) fn outline(&self) -> BezPath {
        let mut path = BezPath::new();
        for index in 0..self.chars.len() {
            let x = self.positions[index] + self.cells[index].offset;
            let shift = Vec2::new(x.into(), 0.0);
            match &self.outlines[index] {
                Some(outline) => {
                    let mut glyph = outline.clone();
                    glyph.apply_affine(peniko::kurbo::Affine::translate(shift));
                    append_path(&mut path, &glyph);
                }
                None => {
                    let ink = self.ink[index];
                    if !ink.is_zero_area() {
                        append_rect(&mut path, ink + shift);
                    }
                }
            }
        }
        for stroke in self.decoration.strokes(&self.metrics, self.advance) {
            append_rect(&mut path, stroke);
        }
        path
    }

    pub(crate) fn justification_info(&self, index: usize) -> JustificationInfo {
        self.justification
            .get(index)
            .copied()
            .unwrap_or(JustificationInfo::NONE)
    }

    pub(crate) fn subset(&self, range: Range<usize>, level: Option<u8>) -> Self {
        let end = range.end.min(self.chars.len());
        let start = range.start.min(end);
        let mut subset = Self {
            font: self.font.clone(),
            level: level.unwrap_or(self.level),
            metrics: self.metrics,
            decoration: self.decoration,
            chars: self.chars[start..end].to_vec(),
            cells: self.cells[start..end].to_vec(),
            positions: Vec::new(),
            caret_stops: self.caret_stops[start..end].to_vec(),
            justification: self.justification[start..end].to_vec(),
            ink: self.ink[start..end].to_vec(),
            outlines: self.outlines[start..end].to_vec(),
            advance: 0.0,
        };
        subset.relayout();
        subset
    }

    pub(crate) fn apply_justification_deltas(&self, deltas: &[f32]) -> (Self, bool) {
        let mut justified = self.clone();
        let chars = &self.chars;
        let clamped = justify_cells(
            &mut justified.cells,
            self.is_rtl(),
            |index| chars[index].is_whitespace(),
            deltas,
        );
        justified.relayout();
        (justified, clamped)
    }
}

/// Justification used when the shaper supplies none: spaces stretch and shrink, ideographs
/// stretch, everything else holds still.
fn default_justification(ch: char, advance: f32, size: f32) -> JustificationInfo {
    if advance == 0.0 {
        JustificationInfo::NONE
    } else if ch.is_whitespace() {
        JustificationInfo::whitespace(size)
    } else if is_ideographic(ch) {
        JustificationInfo::ideographic(size)
    } else {
        JustificationInfo::NONE
    }
}

/// CJK unified ideographs, Hangul syllables and CJK compatibility ideographs.
fn is_ideographic(ch: char) -> bool {
    matches!(
        u32::from(ch),
        0x4E00..=0x9FFF | 0xAC00..=0xD7AF | 0xF900..=0xFAFF
    )
}
