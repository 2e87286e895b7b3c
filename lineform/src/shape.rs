// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shaping and font resolution collaborators, and the component factory built on them.

use std::ops::Range;
use std::sync::Arc;

use peniko::kurbo::{BezPath, Rect};

use crate::component::{Component, CoreMetrics, GraphicComponent, TextComponent};
use crate::context::LayoutContext;
use crate::error::Error;
use crate::justify::JustificationInfo;
use crate::segment::{RenderUnit, StyledParagraph};
use crate::style::{DEFAULT_FAMILY, Font, TextStyle};

/// Turns characters in one font into per-character metrics.
///
/// Implementations must return exactly one [`ShapedChar`] per input character, in logical order.
pub trait Shaper: core::fmt::Debug + Send + Sync {
    /// Shapes `chars`, all at bidi `level`, with `font`.
    fn shape(&self, font: &Font, chars: &[char], level: u8) -> ShapedRun;
}

/// Output of a [`Shaper`] for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapedRun {
    /// Vertical metrics of the font.
    pub metrics: CoreMetrics,
    /// One entry per input character.
    pub chars: Vec<ShapedChar>,
}

/// Shaping result of a single character.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapedChar {
    /// Horizontal advance.
    pub advance: f32,
    /// Whether a caret may be placed before this character.
    ///
    /// Characters inside ligatures and combining sequences clear this.
    pub caret_stop: bool,
    /// Justification behavior; `None` picks a default from the character.
    pub justification: Option<JustificationInfo>,
    /// Ink bounds relative to the character origin; `None` uses the full cell.
    pub ink: Option<Rect>,
    /// Glyph outline relative to the character origin.
    pub outline: Option<BezPath>,
}

impl ShapedChar {
    /// A caret stop with the given advance and default everything else.
    pub fn new(advance: f32) -> Self {
        Self {
            advance,
            caret_stop: true,
            justification: None,
            ink: None,
            outline: None,
        }
    }

    /// Returns this character with its caret stop set.
    pub fn with_caret_stop(mut self, caret_stop: bool) -> Self {
        self.caret_stop = caret_stop;
        self
    }

    /// Returns this character with explicit justification behavior.
    pub fn with_justification(mut self, info: JustificationInfo) -> Self {
        self.justification = Some(info);
        self
    }

    /// Returns this character with explicit ink bounds.
    pub fn with_ink(mut self, ink: Rect) -> Self {
        self.ink = Some(ink);
        self
    }

    /// Returns this character with an outline.
    pub fn with_outline(mut self, outline: BezPath) -> Self {
        self.outline = Some(outline);
        self
    }
}

/// Picks fonts for characters whose style names no family.
pub trait FontResolver: core::fmt::Debug + Send + Sync {
    /// Index of the font that renders `ch`.
    ///
    /// Consecutive characters with the same index share a run.
    fn font_index(&self, ch: char) -> usize;

    /// The font at `index`, sized and styled for `style`.
    fn font(&self, index: usize, style: &TextStyle) -> Font;
}

/// Resolves every character to one font in the default family.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultFontResolver;

impl FontResolver for DefaultFontResolver {
    fn font_index(&self, _ch: char) -> usize {
        0
    }

    fn font(&self, _index: usize, style: &TextStyle) -> Font {
        style.font_in_family(Arc::from(DEFAULT_FAMILY))
    }
}

/// Creates the components covering `range` of `chars`.
///
/// A new component starts at every styled run boundary and every level change. `levels` holds
/// one level per character of `chars`.
pub(crate) fn make_components(
    cx: &LayoutContext,
    styled: &StyledParagraph,
    chars: &[char],
    levels: &[u8],
    range: Range<usize>,
) -> Result<Vec<Component>, Error> {
    let mut components = Vec::new();
    let mut start = range.start;
    while start < range.end {
        let run_end = styled.run_limit(start).min(range.end);
        let decoration = styled.decoration_at(start);
        let unit = styled.unit_at(start);
        while start < run_end {
            let level = levels.get(start).copied().unwrap_or(0);
            let end = (start + 1..run_end)
                .find(|&index| levels.get(index).copied().unwrap_or(0) != level)
                .unwrap_or(run_end);
            let component = match unit {
                RenderUnit::Graphic(graphic) => Component::Graphic(GraphicComponent::new(
                    graphic.clone(),
                    decoration,
                    level,
                    end - start,
                )),
                RenderUnit::Font(font) => {
                    let run_chars = &chars[start..end];
                    let shaped = cx.shaper().shape(font, run_chars, level);
                    Component::Text(TextComponent::new(
                        font.clone(),
                        run_chars,
                        level,
                        decoration,
                        shaped,
                    )?)
                }
            };
            components.push(component);
            start = end;
        }
    }
    Ok(components)
}
