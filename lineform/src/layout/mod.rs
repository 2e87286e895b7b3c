// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The immutable layout of one line of styled text.

mod caret;
mod highlight;
mod hit;

use core::fmt;
use core::hash::{Hash, Hasher};

use peniko::kurbo::{Affine, BezPath, Rect};
use text_primitives::Baseline;

use crate::analysis::{ParagraphAnalysis, paragraph_baseline};
use crate::context::LayoutContext;
use crate::error::Error;
use crate::line::{LayoutPath, TextLine};
use crate::shape::make_components;
use crate::style::{Paragraph, TextAttribute};

pub use caret::CaretShapes;
pub use hit::{CaretPolicy, DefaultCaretPolicy, TextHit};

use hit::signed;

/// A laid out line of styled text.
///
/// Answers metric, caret, highlight and hit-testing queries. Justifying produces a new layout;
/// a layout never changes after construction.
#[derive(Clone, Debug)]
pub struct TextLayout {
    line: TextLine,
    baseline: Baseline,
    justify_ratio: f32,
    justified: bool,
    visible_advance: f32,
}

impl TextLayout {
    /// Lays out `text` with `attributes` applied to all of it.
    pub fn new(
        text: &str,
        attributes: impl IntoIterator<Item = TextAttribute>,
        cx: &LayoutContext,
    ) -> Result<Self, Error> {
        let mut paragraph = Paragraph::new(text);
        let len = paragraph.len();
        for attribute in attributes {
            paragraph.try_apply_attribute(0..len, attribute)?;
        }
        Self::from_paragraph(&paragraph, cx)
    }

    /// Lays out a whole paragraph on one line.
    pub fn from_paragraph(paragraph: &Paragraph, cx: &LayoutContext) -> Result<Self, Error> {
        let analysis = ParagraphAnalysis::new(paragraph, cx)?;
        let len = analysis.chars.len();
        let levels = analysis.bidi.line_levels(0..len);
        let components = make_components(cx, &analysis.styled, &analysis.chars, &levels, 0..len)?;
        let (baseline, offsets) = paragraph_baseline(components.first());
        let line = TextLine::new(
            components,
            offsets,
            analysis.chars,
            levels,
            analysis.bidi.is_left_to_right(),
            *cx.options(),
        )?;
        Ok(Self::from_line(line, baseline, analysis.justification))
    }

    pub(crate) fn from_line(line: TextLine, baseline: Baseline, justify_ratio: f32) -> Self {
        let visible_advance = visible_advance(&line);
        Self {
            line,
            baseline,
            justify_ratio,
            justified: false,
            visible_advance,
        }
    }

    /// The assembled line.
    pub fn line(&self) -> &TextLine {
        &self.line
    }

    /// Distance from the baseline to the top of the line.
    pub fn ascent(&self) -> f32 {
        self.line.metrics().ascent
    }

    /// Distance from the baseline to the bottom of the line.
    pub fn descent(&self) -> f32 {
        self.line.metrics().descent
    }

    /// Gap below the descent.
    pub fn leading(&self) -> f32 {
        self.line.metrics().leading
    }

    /// Width of the line.
    pub fn advance(&self) -> f32 {
        self.line.metrics().advance
    }

    /// Width of the line without trailing whitespace.
    pub fn visible_advance(&self) -> f32 {
        self.visible_advance
    }

    /// The baseline the line aligns to.
    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    /// Offsets of the standard baselines from the line's baseline.
    pub fn baseline_offsets(&self) -> [f32; Baseline::STANDARD_COUNT] {
        *self.line.baseline_offsets()
    }

    /// Number of characters.
    pub fn char_count(&self) -> usize {
        self.line.char_count()
    }

    /// Whether the base direction is left to right.
    pub fn is_left_to_right(&self) -> bool {
        self.line.is_left_to_right()
    }

    /// Whether this layout was produced by [`TextLayout::justified`].
    pub fn is_justified(&self) -> bool {
        self.justified
    }

    /// Bidi level of the character at `index`.
    ///
    /// `-1` and `len` report the base level.
    pub fn character_level(&self, index: isize) -> Result<u8, Error> {
        if index < -1 || index > signed(self.char_count()) {
            return Err(Error::invalid_hit(index, self.char_count()));
        }
        Ok(self.level_at(index))
    }

    fn level_at(&self, index: isize) -> u8 {
        match usize::try_from(index) {
            Ok(index) if index < self.char_count() => self.line.char_level(index),
            _ => u8::from(!self.is_left_to_right()),
        }
    }

    /// Ink bounds of the line.
    pub fn bounds(&self) -> Rect {
        self.line.visual_bounds()
    }

    /// Logical bounds widened for slanted glyphs; the default for caret and highlight
    /// queries.
    pub fn natural_bounds(&self) -> Rect {
        self.line.italic_bounds()
    }

    /// The path the baseline follows, when a baseline transform bends it.
    pub fn layout_path(&self) -> Option<&LayoutPath> {
        self.line.layout_path()
    }

    /// Outline of the text, mapped along the layout path and then transformed by `transform`.
    pub fn outline(&self, transform: Affine) -> BezPath {
        let mut outline = self.map_shape(self.line.outline());
        outline.apply_affine(transform);
        outline
    }

    /// A copy of this layout justified to `width`.
    ///
    /// Trailing whitespace takes no part. How much of the difference is distributed comes from
    /// the paragraph's justification ratio. A justified layout cannot be justified again.
    pub fn justified(&self, width: f32) -> Result<Self, Error> {
        let len = self.char_count();
        if width.is_nan() || width <= 0.0 {
            return Err(Error::invalid_width(len));
        }
        if self.justified {
            return Err(Error::already_justified(len));
        }
        let mut limit = len;
        while limit > 0 && self.line.is_char_whitespace(limit - 1) {
            limit -= 1;
        }
        let line = self.line.justified(width, self.justify_ratio, 0..limit)?;
        Ok(Self {
            justified: true,
            ..Self::from_line(line, self.baseline, self.justify_ratio)
        })
    }

    pub(crate) fn map_shape(&self, shape: BezPath) -> BezPath {
        match self.line.layout_path() {
            Some(path) => path.map_path(&shape),
            None => shape,
        }
    }
}

fn visible_advance(line: &TextLine) -> f32 {
    let len = line.char_count();
    let advance = line.metrics().advance;
    let is_space = |visual: usize| line.is_char_whitespace(line.visual_to_logical(visual));
    if line.is_left_to_right() {
        match (0..len).rev().find(|&visual| !is_space(visual)) {
            None => 0.0,
            Some(visual) if visual == len - 1 => advance,
            Some(visual) => {
                let index = line.visual_to_logical(visual);
                line.char_x_position(index) + line.char_advance(index)
            }
        }
    } else {
        match (0..len).find(|&visual| !is_space(visual)) {
            None => 0.0,
            Some(0) => advance,
            Some(visual) => advance - line.char_x_position(line.visual_to_logical(visual)),
        }
    }
}

impl PartialEq for TextLayout {
    fn eq(&self, other: &Self) -> bool {
        self.line == other.line
    }
}

impl Hash for TextLayout {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.line.chars().hash(state);
        self.line.components().len().hash(state);
        self.line.is_left_to_right().hash(state);
    }
}

impl fmt::Display for TextLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self.line.chars().iter().collect();
        write!(
            f,
            "TextLayout({text:?}, advance: {}, ascent: {}, descent: {}, leading: {}, {})",
            self.advance(),
            self.ascent(),
            self.descent(),
            self.leading(),
            if self.is_left_to_right() { "ltr" } else { "rtl" },
        )
    }
}
