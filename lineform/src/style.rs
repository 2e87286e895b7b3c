// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paragraph attributes and the styles resolved from them.

use std::sync::Arc;

use std::ops::Range;

use attributed_text::{AttributeSegmentsWorkspace, AttributedText};
use numeric_shaping::NumericShaper;
use peniko::kurbo::{Affine, BezPath, Rect, Shape};
use text_primitives::{BaseDirection, Baseline, BidiEmbedding, FontPosture, FontWeight, Underline};

use crate::component::CoreMetrics;
use crate::util::rect;

/// A paragraph of text together with its attribute spans.
pub type Paragraph = AttributedText<TextAttribute>;

/// The font size used when no [`TextAttribute::Size`] applies.
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// The family used when neither a family nor a resolver-specific choice applies.
pub const DEFAULT_FAMILY: &str = "Default";

/// A single attribute applied to a span of a [`Paragraph`].
///
/// When spans overlap, the most recently applied value of each kind wins.
#[derive(Clone, Debug, PartialEq)]
pub enum TextAttribute {
    /// Font family name.
    Family(Arc<str>),
    /// Font weight.
    Weight(FontWeight),
    /// Font posture (slant).
    Posture(FontPosture),
    /// Font size in layout units.
    Size(f32),
    /// An explicit font; overrides family, weight, posture and size.
    Font(Font),
    /// Underline style.
    Underline(Underline),
    /// Whether to strike the text through.
    Strikethrough(bool),
    /// Replaces each character of the span with a graphic.
    Replacement(GraphicReplacement),
    /// Baseline transform applied to the run.
    Transform(Affine),
    /// How much of the extra space a justified line takes up, clamped to `0..=1`.
    ///
    /// Read from the first character of the paragraph.
    Justification(f32),
    /// Base direction of the paragraph.
    ///
    /// Read from the first character of the paragraph.
    RunDirection(BaseDirection),
    /// Explicit bidi embedding, override or isolate for the span.
    BidiEmbedding(BidiEmbedding),
    /// Digit shaping applied to the whole paragraph before layout.
    ///
    /// Read from the first character of the paragraph.
    NumericShaping(NumericShaper),
}

/// The effective style at one position of a paragraph.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font family, if one was set.
    pub family: Option<Arc<str>>,
    /// Font weight.
    pub weight: FontWeight,
    /// Font posture.
    pub posture: FontPosture,
    /// Font size.
    pub size: f32,
    /// Explicit font, if one was set.
    pub font: Option<Font>,
    /// Underline style.
    pub underline: Underline,
    /// Strikethrough.
    pub strikethrough: bool,
    /// Graphic replacement, if one was set.
    pub replacement: Option<GraphicReplacement>,
    /// Baseline transform, if one was set.
    pub transform: Option<Affine>,
    /// Justification ratio in `0..=1`.
    pub justification: f32,
    /// Base direction.
    pub run_direction: BaseDirection,
    /// Explicit embedding.
    pub embedding: BidiEmbedding,
    /// Numeric shaping.
    pub numeric_shaping: Option<NumericShaper>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            family: None,
            weight: FontWeight::default(),
            posture: FontPosture::default(),
            size: DEFAULT_FONT_SIZE,
            font: None,
            underline: Underline::default(),
            strikethrough: false,
            replacement: None,
            transform: None,
            justification: 1.0,
            run_direction: BaseDirection::default(),
            embedding: BidiEmbedding::default(),
            numeric_shaping: None,
        }
    }
}

impl TextStyle {
    /// Folds attributes, in application order, into a style.
    pub fn resolve<'a>(attributes: impl IntoIterator<Item = &'a TextAttribute>) -> Self {
        let mut style = Self::default();
        for attribute in attributes {
            style.apply(attribute);
        }
        style
    }

    /// Resolves the style of the character at `index`.
    pub fn at(paragraph: &Paragraph, index: usize) -> Self {
        Self::resolve(paragraph.attributes_at(index))
    }

    /// Splits `paragraph` into maximal ranges sharing one resolved style.
    pub fn runs(paragraph: &Paragraph) -> Vec<(Range<usize>, Self)> {
        let mut workspace = AttributeSegmentsWorkspace::new();
        let mut segments = workspace.segments(paragraph);
        let mut runs: Vec<(Range<usize>, Self)> = Vec::new();
        while let Some(range) = segments.next() {
            let style = Self::resolve(segments.active_spans().iter().map(|(_, attr)| attr));
            match runs.last_mut() {
                Some((last, last_style)) if *last_style == style => last.end = range.end,
                _ => runs.push((range, style)),
            }
        }
        runs
    }

    fn apply(&mut self, attribute: &TextAttribute) {
        match attribute {
            TextAttribute::Family(family) => self.family = Some(family.clone()),
            TextAttribute::Weight(weight) => self.weight = *weight,
            TextAttribute::Posture(posture) => self.posture = *posture,
            TextAttribute::Size(size) => {
                if size.is_finite() && *size > 0.0 {
                    self.size = *size;
                }
            }
            TextAttribute::Font(font) => self.font = Some(font.clone()),
            TextAttribute::Underline(underline) => self.underline = *underline,
            TextAttribute::Strikethrough(strike) => self.strikethrough = *strike,
            TextAttribute::Replacement(graphic) => self.replacement = Some(graphic.clone()),
            TextAttribute::Transform(transform) => self.transform = Some(*transform),
            TextAttribute::Justification(ratio) => {
                self.justification = if ratio.is_nan() {
                    1.0
                } else {
                    ratio.clamp(0.0, 1.0)
                };
            }
            TextAttribute::RunDirection(direction) => self.run_direction = *direction,
            TextAttribute::BidiEmbedding(embedding) => self.embedding = *embedding,
            TextAttribute::NumericShaping(shaper) => self.numeric_shaping = Some(shaper.clone()),
        }
    }

    /// The decoration this style draws.
    pub fn decoration(&self) -> Decoration {
        Decoration {
            underline: self.underline,
            strikethrough: self.strikethrough,
        }
    }

    /// The font this style names directly, without consulting a resolver.
    ///
    /// An explicit font wins; otherwise a font is built from the family when one is set. The
    /// style's transform applies on top of any transform the explicit font already carries.
    pub fn explicit_font(&self) -> Option<Font> {
        if let Some(font) = &self.font {
            let transform = match (self.transform, font.transform) {
                (Some(outer), Some(inner)) => Some(outer * inner),
                (outer, inner) => outer.or(inner),
            };
            return Some(font.clone().with_transform(transform));
        }
        let family = self.family.clone()?;
        Some(self.font_in_family(family))
    }

    /// Builds a font in `family` from this style's size, weight, posture and transform.
    pub fn font_in_family(&self, family: Arc<str>) -> Font {
        Font {
            family,
            size: self.size,
            weight: self.weight,
            posture: self.posture,
            transform: self.transform,
        }
    }
}

/// A resolved font: a family at a size with a weight, posture and baseline transform.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    family: Arc<str>,
    size: f32,
    weight: FontWeight,
    posture: FontPosture,
    transform: Option<Affine>,
}

impl Font {
    /// Creates a regular upright font.
    pub fn new(family: impl Into<Arc<str>>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            weight: FontWeight::REGULAR,
            posture: FontPosture::REGULAR,
            transform: None,
        }
    }

    /// Returns this font with a different weight.
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Returns this font with a different posture.
    pub fn with_posture(mut self, posture: FontPosture) -> Self {
        self.posture = posture;
        self
    }

    /// Returns this font with a baseline transform.
    pub fn with_transform(mut self, transform: Option<Affine>) -> Self {
        self.transform = transform;
        self
    }

    /// The family name.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// The size in layout units.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// The weight.
    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    /// The posture.
    pub fn posture(&self) -> FontPosture {
        self.posture
    }

    /// The baseline transform, if any.
    pub fn transform(&self) -> Option<Affine> {
        self.transform
    }
}

/// Underline and strikethrough drawn over a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Decoration {
    /// Underline style.
    pub underline: Underline,
    /// Strikethrough.
    pub strikethrough: bool,
}

impl Decoration {
    /// A decoration that draws nothing.
    pub const PLAIN: Self = Self {
        underline: Underline::None,
        strikethrough: false,
    };

    /// Returns `true` if this decoration draws nothing.
    pub fn is_plain(self) -> bool {
        self == Self::PLAIN
    }

    /// The rectangles drawn for a run of `advance` with `metrics`, relative to the run origin.
    pub fn strokes(self, metrics: &CoreMetrics, advance: f32) -> Vec<Rect> {
        let mut strokes = Vec::new();
        let thickness = metrics.underline_thickness;
        let mut y = metrics.underline_offset;
        for _ in 0..self.underline.strokes() {
            strokes.push(rect(0.0, y, advance, y + thickness));
            y += 2.0 * thickness;
        }
        if self.strikethrough {
            let y = metrics.strikethrough_offset;
            strokes.push(rect(
                0.0,
                y,
                advance,
                y + metrics.strikethrough_thickness,
            ));
        }
        strokes
    }

    /// Grows `bounds` to include the decoration strokes.
    pub fn extend_bounds(self, bounds: Rect, metrics: &CoreMetrics, advance: f32) -> Rect {
        self.strokes(metrics, advance)
            .into_iter()
            .fold(bounds, |acc, stroke| acc.union(stroke))
    }
}

/// A graphic drawn in place of each character of a span.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphicReplacement {
    ascent: f32,
    descent: f32,
    advance: f32,
    alignment: Baseline,
    outline: Option<BezPath>,
}

impl GraphicReplacement {
    /// Creates a box-shaped graphic of the given extents.
    ///
    /// Negative extents are treated as zero.
    pub fn new(ascent: f32, descent: f32, advance: f32, alignment: Baseline) -> Self {
        Self {
            ascent: ascent.max(0.0),
            descent: descent.max(0.0),
            advance: advance.max(0.0),
            alignment,
            outline: None,
        }
    }

    /// Creates a graphic from a shape drawn with its origin on the baseline.
    ///
    /// Ascent, descent and advance are taken from the shape's bounding box.
    pub fn from_shape(outline: BezPath, alignment: Baseline) -> Self {
        let bounds = outline.bounding_box();
        Self {
            ascent: (-bounds.y0 as f32).max(0.0),
            descent: (bounds.y1 as f32).max(0.0),
            advance: (bounds.x1 as f32).max(0.0),
            alignment,
            outline: Some(outline),
        }
    }

    /// Distance above the alignment baseline.
    pub fn ascent(&self) -> f32 {
        self.ascent
    }

    /// Distance below the alignment baseline.
    pub fn descent(&self) -> f32 {
        self.descent
    }

    /// Advance of one replaced character.
    pub fn advance(&self) -> f32 {
        self.advance
    }

    /// Baseline the graphic aligns to.
    pub fn alignment(&self) -> Baseline {
        self.alignment
    }

    /// The shape drawn, relative to the graphic origin.
    pub fn outline(&self) -> BezPath {
        match &self.outline {
            Some(outline) => outline.clone(),
            None => self.bounds().to_path(0.1),
        }
    }

    /// The visual bounds relative to the graphic origin.
    pub fn bounds(&self) -> Rect {
        match &self.outline {
            Some(outline) => outline.bounding_box(),
            None => rect(0.0, -self.ascent, self.advance, self.descent),
        }
    }

    /// Metrics of a run made of this graphic.
    pub fn core_metrics(&self) -> CoreMetrics {
        let ascent = self.ascent;
        let descent = self.descent;
        CoreMetrics {
            ascent,
            descent,
            leading: 0.0,
            baseline: self.alignment,
            baseline_offsets: [0.0, -ascent / 2.0, -ascent],
            strikethrough_offset: -descent / 2.0,
            strikethrough_thickness: descent / 12.0,
            underline_offset: descent / 3.0,
            underline_thickness: descent / 12.0,
            superscript_offset: 0.0,
            italic_angle: 0.0,
        }
    }

    /// The standard baseline a paragraph starting with this graphic uses.
    pub fn paragraph_baseline(&self) -> Baseline {
        if self.alignment.is_floating() {
            Baseline::Roman
        } else {
            self.alignment
        }
    }
}
