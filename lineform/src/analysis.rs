// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paragraph-wide analysis shared by layouts and measurers.

use std::ops::Range;

use text_primitives::{Baseline, BidiEmbedding};

use crate::bidi::BidiAnalysis;
use crate::component::Component;
use crate::context::LayoutContext;
use crate::error::Error;
use crate::segment::StyledParagraph;
use crate::style::{Paragraph, TextStyle};

/// Everything about a paragraph that does not depend on where its lines break.
#[derive(Clone, Debug)]
pub(crate) struct ParagraphAnalysis {
    /// Characters after paragraph numeric shaping.
    pub(crate) chars: Vec<char>,
    pub(crate) bidi: BidiAnalysis,
    pub(crate) styled: StyledParagraph,
    /// Justification ratio read from the first character.
    pub(crate) justification: f32,
    /// Whether numeric shaping rewrote the characters.
    pub(crate) numeric_shaping: bool,
    /// Whether the paragraph has explicit embeddings or a forced direction.
    pub(crate) explicit_bidi: bool,
}

impl ParagraphAnalysis {
    pub(crate) fn new(paragraph: &Paragraph, cx: &LayoutContext) -> Result<Self, Error> {
        if paragraph.is_empty() {
            return Err(Error::empty_text());
        }
        let first = TextStyle::at(paragraph, 0);
        let mut chars = paragraph.chars().to_vec();
        let numeric_shaping = match first.numeric_shaping.clone() {
            Some(mut shaper) => {
                shaper.shape(&mut chars);
                true
            }
            None => false,
        };
        let base_level = first.run_direction.level();
        let embeddings = embeddings(paragraph);
        let bidi = BidiAnalysis::new(&chars, base_level, &embeddings);
        Ok(Self {
            chars,
            bidi,
            styled: StyledParagraph::new(paragraph, cx.resolver()),
            justification: first.justification,
            numeric_shaping,
            explicit_bidi: base_level.is_some() || !embeddings.is_empty(),
        })
    }
}

/// Spans of explicit bidi embeddings, in order.
pub(crate) fn embeddings(paragraph: &Paragraph) -> Vec<(Range<usize>, BidiEmbedding)> {
    TextStyle::runs(paragraph)
        .into_iter()
        .filter(|(_, style)| style.embedding != BidiEmbedding::None)
        .fold(Vec::new(), |mut spans, (range, style)| {
            match spans.last_mut() {
                Some((last, embedding))
                    if last.end == range.start && *embedding == style.embedding =>
                {
                    last.end = range.end;
                }
                _ => spans.push((range, style.embedding)),
            }
            spans
        })
}

/// The baseline a paragraph aligns to and its standard baseline offsets, taken from the
/// component holding the first character.
///
/// Offsets are normalised so the chosen baseline sits at zero.
pub(crate) fn paragraph_baseline(
    first: Option<&Component>,
) -> (Baseline, [f32; Baseline::STANDARD_COUNT]) {
    let Some(first) = first else {
        return (Baseline::Roman, [0.0; Baseline::STANDARD_COUNT]);
    };
    let metrics = first.metrics();
    let baseline = match first {
        Component::Graphic(graphic) => graphic.graphic().paragraph_baseline(),
        Component::Text(_) if metrics.baseline.is_floating() => Baseline::Roman,
        Component::Text(_) => metrics.baseline,
    };
    let mut offsets = metrics.baseline_offsets;
    let origin = baseline.index().map_or(0.0, |index| offsets[index]);
    if origin != 0.0 {
        for offset in &mut offsets {
            *offset -= origin;
        }
    }
    (baseline, offsets)
}

#[cfg(test)]
mod tests {
    use super::embeddings;
    use crate::style::{Paragraph, TextAttribute};
    use text_primitives::{BidiDirection, BidiEmbedding};

    #[test]
    fn adjacent_equal_embeddings_merge() {
        let mut paragraph = Paragraph::new("abcdef");
        let rtl = TextAttribute::BidiEmbedding(BidiEmbedding::Embed(BidiDirection::Rtl));
        paragraph.try_apply_attribute(0..2, rtl.clone()).unwrap();
        paragraph.try_apply_attribute(2..4, rtl).unwrap();
        paragraph
            .try_apply_attribute(2..3, TextAttribute::Size(20.0))
            .unwrap();
        let spans = embeddings(&paragraph);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].0, 0..4);
    }
}
