// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental measurement of long paragraphs.
//!
//! [`TextMeasurer`] finds where lines break and lays out arbitrary ranges of a paragraph
//! without shaping all of it up front. It keeps a window of shaped components around the
//! positions asked about, sized from the lines laid out so far, and updates cheaply when a
//! single character is inserted or deleted.

mod line_break;

use text_primitives::{Baseline, BidiEmbedding};
use unicode_bidi::BidiClass;

use crate::analysis::{ParagraphAnalysis, embeddings, paragraph_baseline};
use crate::bidi::BidiAnalysis;
use crate::component::Component;
use crate::context::LayoutContext;
use crate::error::Error;
use crate::layout::TextLayout;
use crate::line::TextLine;
use crate::shape::make_components;
use crate::style::{Paragraph, TextStyle};

pub use line_break::LineBreakMeasurer;
use line_break::LineBreaks;

/// Estimated number of lines the component window covers, in average line lengths.
const WINDOW_LINES: f32 = 2.1;

/// Measures and lays out ranges of one paragraph.
#[derive(Clone, Debug)]
pub struct TextMeasurer {
    cx: LayoutContext,
    analysis: ParagraphAnalysis,
    baseline: Baseline,
    baseline_offsets: [f32; Baseline::STANDARD_COUNT],
    /// Components covering `component_start..component_limit`.
    components: Vec<Component>,
    component_start: usize,
    component_limit: usize,
    have_layout_window: bool,
    /// Lines laid out before the end of the paragraph, and their total length.
    layout_count: usize,
    layout_char_count: usize,
    breaks: Option<LineBreaks>,
}

impl TextMeasurer {
    /// Creates a measurer for `paragraph`.
    pub fn new(paragraph: &Paragraph, cx: LayoutContext) -> Result<Self, Error> {
        let analysis = ParagraphAnalysis::new(paragraph, &cx)?;
        let (baseline, baseline_offsets) = first_baseline(&cx, &analysis)?;
        let len = analysis.chars.len();
        Ok(Self {
            cx,
            analysis,
            baseline,
            baseline_offsets,
            components: Vec::new(),
            component_start: len,
            component_limit: len,
            have_layout_window: false,
            layout_count: 0,
            layout_char_count: 0,
            breaks: None,
        })
    }

    /// The paragraph characters, after numeric shaping.
    pub fn chars(&self) -> &[char] {
        &self.analysis.chars
    }

    fn invalidate_components(&mut self) {
        let len = self.analysis.chars.len();
        self.components.clear();
        self.component_start = len;
        self.component_limit = len;
        self.have_layout_window = false;
        self.breaks = None;
    }

    fn ensure_components(&mut self, start: usize, limit: usize) -> Result<(), Error> {
        if start < self.component_start || limit > self.component_limit {
            self.generate_components(start, limit)?;
        }
        Ok(())
    }

    fn generate_components(&mut self, start: usize, limit: usize) -> Result<(), Error> {
        log::debug!("shaping component window {start}..{limit}");
        self.components = make_components(
            &self.cx,
            &self.analysis.styled,
            &self.analysis.chars,
            self.analysis.bidi.levels(),
            start..limit,
        )?;
        self.component_start = start;
        self.component_limit = limit;
        Ok(())
    }

    fn make_layout_window(&mut self, start: usize) -> Result<(), Error> {
        let len = self.analysis.chars.len();
        let mut window_start = start;
        let mut window_limit = len;
        if self.layout_count > 0 && !self.have_layout_window {
            let average = (self.layout_char_count / self.layout_count).max(1);
            let estimate = (average as f32 * WINDOW_LINES) as usize;
            window_limit = (start + estimate).min(len);
        }
        if start > 0 || window_limit < len {
            let breaks = self
                .breaks
                .get_or_insert_with(|| LineBreaks::new(&self.analysis.chars));
            if start > 0 && !breaks.is_boundary(start) {
                window_start = breaks.preceding(start);
            }
            if window_limit < len && !breaks.is_boundary(window_limit) {
                window_limit = breaks.following(window_limit);
            }
        }
        self.ensure_components(window_start, window_limit)?;
        self.have_layout_window = true;
        Ok(())
    }

    /// Index of the first character, at or after `start`, that does not fit in `max_advance`.
    ///
    /// Returns the character count when the rest of the paragraph fits.
    pub fn line_break_index(&mut self, start: usize, max_advance: f32) -> Result<usize, Error> {
        let len = self.analysis.chars.len();
        if start >= len {
            return Err(Error::index_out_of_bounds(start, len));
        }
        if !self.have_layout_window || start < self.component_start || start >= self.component_limit
        {
            self.make_layout_window(start)?;
        }
        if let Some(index) = self.line_break_in_window(start, max_advance) {
            return Ok(index);
        }
        if self.component_limit < len {
            self.generate_components(start, len)?;
            if let Some(index) = self.line_break_in_window(start, max_advance) {
                return Ok(index);
            }
        }
        Ok(len)
    }

    /// The line break inside the current window, or `None` if everything in it fits.
    fn line_break_in_window(&self, start: usize, max_advance: f32) -> Option<usize> {
        let mut position = start;
        let mut width = max_advance;
        let mut component_start = self.component_start;
        for component in &self.components {
            let count = component.char_count();
            let component_limit = component_start + count;
            if component_limit > position {
                let local = position - component_start;
                let line_break = component.line_break_index(local, width);
                if line_break < count {
                    return Some(component_start + line_break);
                }
                width -= component.advance_between(local, count);
                position = component_limit;
            }
            component_start = component_limit;
        }
        None
    }

    /// Start of the whitespace that ends `start..limit` and runs against the base direction.
    fn trailing_counter_whitespace_start(&self, start: usize, limit: usize) -> usize {
        let bidi = &self.analysis.bidi;
        if bidi.is_trivial() {
            return start;
        }
        let base = bidi.base_level() & 1;
        for index in (start..limit).rev() {
            if bidi.level_at(index) & 1 == base || bidi.class_at(index) != Some(BidiClass::WS) {
                return index + 1;
            }
        }
        start
    }

    /// Subsets of the window components covering `start..limit`.
    ///
    /// Trailing whitespace against the base direction is split off and forced to the base
    /// level.
    fn components_on_range(&self, start: usize, limit: usize) -> Vec<Component> {
        let base_level = self.analysis.bidi.base_level();
        let mut break_at = self.trailing_counter_whitespace_start(start, limit);
        let mut forced = None;
        if break_at == start {
            forced = Some(base_level);
            break_at = limit;
        }
        let mut components = Vec::new();
        let mut position = start;
        let mut component_start = self.component_start;
        for component in &self.components {
            if position >= limit {
                break;
            }
            let component_limit = component_start + component.char_count();
            while position >= component_start && position < component_limit.min(limit) {
                let end = component_limit.min(break_at);
                components.push(
                    component.subset(position - component_start..end - component_start, forced),
                );
                position = end;
                if position == break_at {
                    break_at = limit;
                    forced = Some(base_level);
                }
            }
            component_start = component_limit;
        }
        components
    }

    fn make_line(&self, start: usize, limit: usize) -> Result<TextLine, Error> {
        TextLine::new(
            self.components_on_range(start, limit),
            self.baseline_offsets,
            self.analysis.chars[start..limit].to_vec(),
            self.analysis.bidi.line_levels(start..limit),
            self.analysis.bidi.is_left_to_right(),
            *self.cx.options(),
        )
    }

    fn check_range(&self, start: usize, limit: usize) -> Result<(), Error> {
        let len = self.analysis.chars.len();
        if start >= limit || limit > len {
            return Err(Error::invalid_range(start, limit, len));
        }
        Ok(())
    }

    /// Advance of a line holding `start..limit`.
    pub fn advance_between(&mut self, start: usize, limit: usize) -> Result<f32, Error> {
        self.check_range(start, limit)?;
        self.ensure_components(start, limit)?;
        Ok(self.make_line(start, limit)?.metrics().advance)
    }

    /// Lays out `start..limit` as one line.
    pub fn layout(&mut self, start: usize, limit: usize) -> Result<TextLayout, Error> {
        self.check_range(start, limit)?;
        self.ensure_components(start, limit)?;
        let line = self.make_line(start, limit)?;
        if limit < self.analysis.chars.len() {
            self.layout_char_count += limit - start;
            self.layout_count += 1;
        }
        Ok(TextLayout::from_line(
            line,
            self.baseline,
            self.analysis.justification,
        ))
    }

    /// Updates for `paragraph`, which equals the measured paragraph with one character
    /// inserted at `pos`.
    ///
    /// Falls back to measuring `paragraph` from scratch when it is not such an edit or when
    /// numeric shaping is involved.
    pub fn insert_char(&mut self, paragraph: &Paragraph, pos: usize) -> Result<(), Error> {
        let len = self.analysis.chars.len();
        if pos > len {
            return Err(Error::index_out_of_bounds(pos, len));
        }
        let ch = match paragraph.char_at(pos) {
            Some(ch) if paragraph.len() == len + 1 && !self.needs_full_analysis(paragraph) => ch,
            _ => return self.reinitialize(paragraph),
        };
        self.analysis.chars.insert(pos, ch);
        let explicit = TextStyle::at(paragraph, pos).embedding != BidiEmbedding::None;
        if explicit || !self.analysis.bidi.is_trivial() || BidiAnalysis::requires_bidi(&[ch]) {
            self.reanalyze_bidi(paragraph);
        } else {
            self.analysis.bidi.insert_trivial(pos, ch);
        }
        self.analysis.styled = self
            .analysis
            .styled
            .insert_char(paragraph, pos, self.cx.resolver());
        self.invalidate_components();
        Ok(())
    }

    /// Updates for `paragraph`, which equals the measured paragraph with the character at
    /// `pos` removed.
    pub fn delete_char(&mut self, paragraph: &Paragraph, pos: usize) -> Result<(), Error> {
        let len = self.analysis.chars.len();
        if paragraph.is_empty() {
            return Err(Error::empty_text());
        }
        if pos >= len {
            return Err(Error::index_out_of_bounds(pos, len));
        }
        if paragraph.len() + 1 != len || self.needs_full_analysis(paragraph) {
            return self.reinitialize(paragraph);
        }
        self.analysis.chars.remove(pos);
        if !self.analysis.bidi.is_trivial() {
            self.reanalyze_bidi(paragraph);
        } else {
            self.analysis.bidi.delete_trivial(pos);
        }
        self.analysis.styled = self
            .analysis
            .styled
            .delete_char(paragraph, pos, self.cx.resolver());
        self.invalidate_components();
        Ok(())
    }

    /// Whether edits must start over: numeric shaping depends on context and explicit
    /// directions depend on the whole paragraph.
    fn needs_full_analysis(&self, paragraph: &Paragraph) -> bool {
        self.analysis.numeric_shaping
            || self.analysis.explicit_bidi
            || TextStyle::at(paragraph, 0).numeric_shaping.is_some()
    }

    fn reanalyze_bidi(&mut self, paragraph: &Paragraph) {
        let base_level = TextStyle::at(paragraph, 0).run_direction.level();
        let embeddings = embeddings(paragraph);
        self.analysis.explicit_bidi = base_level.is_some() || !embeddings.is_empty();
        self.analysis.bidi = BidiAnalysis::new(&self.analysis.chars, base_level, &embeddings);
    }

    fn reinitialize(&mut self, paragraph: &Paragraph) -> Result<(), Error> {
        log::debug!("measuring edited paragraph from scratch");
        let analysis = ParagraphAnalysis::new(paragraph, &self.cx)?;
        let (baseline, baseline_offsets) = first_baseline(&self.cx, &analysis)?;
        self.analysis = analysis;
        self.baseline = baseline;
        self.baseline_offsets = baseline_offsets;
        self.invalidate_components();
        Ok(())
    }
}

fn first_baseline(
    cx: &LayoutContext,
    analysis: &ParagraphAnalysis,
) -> Result<(Baseline, [f32; Baseline::STANDARD_COUNT]), Error> {
    let first = make_components(
        cx,
        &analysis.styled,
        &analysis.chars,
        analysis.bidi.levels(),
        0..1,
    )?;
    Ok(paragraph_baseline(first.first()))
}
