// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line assembly.
//!
//! A [`TextLine`] places components, given in logical order, along a shared baseline in visual
//! order. It owns the line metrics and answers per-character geometry queries by locating the
//! component that holds a character.

mod path;

use std::ops::Range;

use peniko::kurbo::{Affine, BezPath, Point, Rect, Shape, Vec2};
use text_primitives::Baseline;

use crate::bidi::{inverse, reorder_visual};
use crate::component::{Component, CoreMetrics};
use crate::context::LayoutOptions;
use crate::error::Error;
use crate::justify::{JustificationInfo, Justifier};
use crate::util::{append_path, union_rect};

pub use path::LayoutPath;
pub(crate) use path::LayoutPathBuilder;

/// Aggregate metrics of a line.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineMetrics {
    /// Distance from the baseline to the top of the tallest component.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the deepest component.
    pub descent: f32,
    /// Gap below the descent.
    pub leading: f32,
    /// Width of the line, including italic padding at its end.
    pub advance: f32,
}

impl LineMetrics {
    /// Ascent plus descent plus leading.
    pub fn height(&self) -> f32 {
        self.ascent + self.descent + self.leading
    }
}

/// A per-character quantity read from the component holding the character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CharMetric {
    Advance,
    XPosition,
    YPosition,
    PositionPlusAdvance,
}

/// A line of components placed along a baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    /// Logical order.
    components: Vec<Component>,
    /// First character of each component, followed by the character count.
    starts: Vec<usize>,
    /// Logical component index for each visual position.
    component_order: Vec<usize>,
    /// Visual position of each logical component.
    component_visual: Vec<usize>,
    baseline_offsets: [f32; Baseline::STANDARD_COUNT],
    chars: Vec<char>,
    levels: Vec<u8>,
    visual_to_logical: Option<Vec<usize>>,
    logical_to_visual: Option<Vec<usize>>,
    is_ltr: bool,
    options: LayoutOptions,
    metrics: LineMetrics,
    /// Origin of each component in visual order, then the end of the line.
    locs: Vec<(f32, f32)>,
    path: Option<LayoutPath>,
}

impl TextLine {
    /// Assembles a line.
    ///
    /// `components` are in logical order and must cover `chars` exactly; `levels` holds one bidi
    /// level per character. `baseline_offsets` are relative to the line's own baseline.
    pub fn new(
        components: Vec<Component>,
        baseline_offsets: [f32; Baseline::STANDARD_COUNT],
        chars: Vec<char>,
        levels: Vec<u8>,
        is_ltr: bool,
        options: LayoutOptions,
    ) -> Result<Self, Error> {
        if chars.is_empty() {
            return Err(Error::empty_text());
        }
        let covered: usize = components.iter().map(Component::char_count).sum();
        if covered != chars.len() {
            return Err(Error::component_mismatch(chars.len(), covered));
        }
        if levels.len() != chars.len() {
            return Err(Error::component_mismatch(chars.len(), levels.len()));
        }
        let components: Vec<Component> = components
            .into_iter()
            .filter(|component| component.char_count() > 0)
            .collect();

        let visual_to_logical = reorder_visual(&levels);
        let logical_to_visual = visual_to_logical.as_deref().map(inverse);

        let mut starts = Vec::with_capacity(components.len() + 1);
        let mut start = 0;
        for component in &components {
            starts.push(start);
            start += component.char_count();
        }
        starts.push(start);

        let mut component_order: Vec<usize> = (0..components.len()).collect();
        if let Some(l2v) = &logical_to_visual {
            component_order.sort_by_key(|&index| l2v[starts[index]]);
        }
        let component_visual = inverse(&component_order);

        let mut line = Self {
            components,
            starts,
            component_order,
            component_visual,
            baseline_offsets,
            chars,
            levels,
            visual_to_logical,
            logical_to_visual,
            is_ltr,
            options,
            metrics: LineMetrics::default(),
            locs: Vec::new(),
            path: None,
        };
        line.compute_metrics();
        line.compute_locations();
        line.compute_path();
        Ok(line)
    }

    fn compute_metrics(&mut self) {
        let mut ascent: f32 = 0.0;
        let mut descent: f32 = 0.0;
        let mut leading: f32 = 0.0;
        let mut floating = false;
        let mut max_graphic_height: f32 = 0.0;
        let mut max_graphic_height_with_leading: f32 = 0.0;
        for component in &self.components {
            let m = component.metrics();
            match m.baseline.index() {
                Some(index) => {
                    let offset = self.baseline_offsets[index];
                    ascent = ascent.max(-offset + m.ascent);
                    let graphic_descent = offset + m.descent;
                    descent = descent.max(graphic_descent);
                    leading = leading.max(graphic_descent + m.leading);
                }
                None => {
                    floating = true;
                    let height = m.ascent + m.descent;
                    max_graphic_height = max_graphic_height.max(height);
                    max_graphic_height_with_leading =
                        max_graphic_height_with_leading.max(height + m.leading);
                }
            }
        }
        if floating && self.options.fit_floating_graphics {
            if max_graphic_height > ascent + descent {
                descent = max_graphic_height - ascent;
            }
            if max_graphic_height_with_leading > ascent + leading {
                leading = max_graphic_height_with_leading - ascent;
            }
        }
        leading -= descent;
        self.metrics = LineMetrics {
            ascent,
            descent,
            leading,
            advance: 0.0,
        };
    }

    fn effective_offset(&self, m: &CoreMetrics) -> f32 {
        m.effective_baseline_offset(
            &self.baseline_offsets,
            self.metrics.ascent,
            self.metrics.descent,
        )
    }

    fn compute_locations(&mut self) {
        let mut locs = Vec::with_capacity(self.components.len() + 1);
        let mut x = 0.0;
        let mut y = 0.0;
        let mut prev: Option<&CoreMetrics> = None;
        for &logical in &self.component_order {
            let component = &self.components[logical];
            let cm = component.metrics();
            let cb = self.effective_offset(cm);
            if let Some(pm) = prev {
                if (pm.italic_angle != 0.0 || cm.italic_angle != 0.0) && !pm.same_slant_context(cm)
                {
                    // Push the components apart until their slanted edges no longer overlap
                    // within the vertical range they share.
                    let pb = self.effective_offset(pm);
                    let top = (pb - pm.ascent).max(cb - cm.ascent);
                    let bottom = (pb + pm.descent).min(cb + cm.descent);
                    let at_top = pm.italic_angle * (pb - top) - cm.italic_angle * (cb - top);
                    let at_bottom =
                        pm.italic_angle * (pb - bottom) - cm.italic_angle * (cb - bottom);
                    x += at_top.max(at_bottom);
                }
            }
            y = cb;
            locs.push((x, y));
            x += component.advance();
            prev = Some(cm);
        }
        if let Some(pm) = prev {
            if pm.italic_angle != 0.0 {
                let pb = self.effective_offset(pm) + pm.superscript_offset;
                let reach = if pm.italic_angle > 0.0 {
                    pb + pm.ascent
                } else {
                    pb - pm.descent
                };
                x += reach * pm.italic_angle;
            }
        }
        locs.push((x, y));
        self.metrics.advance = x;
        self.locs = locs;
    }

    fn compute_path(&mut self) {
        let transforms: Vec<Option<Affine>> = self
            .components
            .iter()
            .map(Component::baseline_transform)
            .collect();
        if transforms.iter().all(Option::is_none) {
            return;
        }
        let mut builder = LayoutPathBuilder::default();
        builder.move_to(Point::new(self.locs[0].0.into(), 0.0));
        let mut translation = Vec2::ZERO;
        for (visual, &logical) in self.component_order.iter().enumerate() {
            let transform = transforms[logical];
            let shift = transform.map_or(Vec2::ZERO, Affine::translation);
            if shift != translation {
                builder.move_to(builder.current() + (shift - translation));
                translation = shift;
            }
            let step = Vec2::new(
                f64::from(self.locs[visual + 1].0 - self.locs[visual].0),
                0.0,
            );
            let step = match transform {
                Some(transform) => {
                    let [a, b, c, d, _, _] = transform.as_coeffs();
                    Vec2::new(a * step.x + c * step.y, b * step.x + d * step.y)
                }
                None => step,
            };
            builder.line_to(builder.current() + step);
        }
        let fallback = transforms[self.component_order[0]].unwrap_or(Affine::IDENTITY);
        self.path = Some(builder.finish(fallback));
    }

    /// Number of characters.
    pub fn char_count(&self) -> usize {
        self.chars.len()
    }

    /// Characters, in logical order.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Components, in logical order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Line metrics.
    pub fn metrics(&self) -> LineMetrics {
        self.metrics
    }

    /// Offsets of the standard baselines.
    pub fn baseline_offsets(&self) -> &[f32; Baseline::STANDARD_COUNT] {
        &self.baseline_offsets
    }

    /// Whether the line's base direction is left to right.
    pub fn is_left_to_right(&self) -> bool {
        self.is_ltr
    }

    /// The options the line was assembled with.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// The path the baseline follows, when any component has a baseline transform.
    pub fn layout_path(&self) -> Option<&LayoutPath> {
        self.path.as_ref()
    }

    /// Origin of the component at visual position `visual`.
    pub fn component_location(&self, visual: usize) -> Option<Point> {
        self.locs
            .get(visual)
            .map(|&(x, y)| Point::new(x.into(), y.into()))
    }

    /// Logical component index and offset inside it of the character at `index`.
    fn locate(&self, index: usize) -> Option<(usize, usize)> {
        let component = self.starts.windows(2).position(|w| index < w[1])?;
        Some((component, index - self.starts[component]))
    }

    pub(crate) fn char_metric(&self, index: usize, metric: CharMetric) -> f32 {
        let Some((logical, local)) = self.locate(index) else {
            return match metric {
                CharMetric::Advance | CharMetric::YPosition => 0.0,
                CharMetric::XPosition | CharMetric::PositionPlusAdvance => self.metrics.advance,
            };
        };
        let component = &self.components[logical];
        let (x, y) = self.locs[self.component_visual[logical]];
        match metric {
            CharMetric::Advance => component.char_advance(local),
            CharMetric::XPosition => x + component.char_x(local),
            CharMetric::YPosition => y + component.char_y(local),
            CharMetric::PositionPlusAdvance => {
                x + component.char_x(local) + component.char_advance(local)
            }
        }
    }

    /// Core metrics of the component holding the character at `index`.
    pub fn char_core_metrics(&self, index: usize) -> Option<&CoreMetrics> {
        let (logical, _) = self.locate(index)?;
        Some(self.components[logical].metrics())
    }

    /// Advance of the character at `index`.
    pub fn char_advance(&self, index: usize) -> f32 {
        self.char_metric(index, CharMetric::Advance)
    }

    /// Left edge of the character at `index`.
    pub fn char_x_position(&self, index: usize) -> f32 {
        self.char_metric(index, CharMetric::XPosition)
    }

    /// Baseline offset of the character at `index`.
    pub fn char_y_position(&self, index: usize) -> f32 {
        self.char_metric(index, CharMetric::YPosition)
    }

    /// Position of the leading or trailing edge of the character at `index`.
    pub fn char_line_position(&self, index: usize, leading: bool) -> f32 {
        let metric = if self.is_char_ltr(index) == leading {
            CharMetric::XPosition
        } else {
            CharMetric::PositionPlusAdvance
        };
        self.char_metric(index, metric)
    }

    /// Ascent of the character at `index`.
    pub fn char_ascent(&self, index: usize) -> f32 {
        self.char_core_metrics(index).map_or(0.0, |m| m.ascent)
    }

    /// Descent of the character at `index`.
    pub fn char_descent(&self, index: usize) -> f32 {
        self.char_core_metrics(index).map_or(0.0, |m| m.descent)
    }

    /// Italic angle of the character at `index`.
    pub fn char_angle(&self, index: usize) -> f32 {
        self.char_core_metrics(index).map_or(0.0, |m| m.italic_angle)
    }

    /// Superscript shift of the character at `index`.
    pub fn char_shift(&self, index: usize) -> f32 {
        self.char_core_metrics(index)
            .map_or(0.0, |m| m.superscript_offset)
    }

    /// Bidi level of the character at `index`; the base level outside the line.
    pub fn char_level(&self, index: usize) -> u8 {
        self.levels
            .get(index)
            .copied()
            .unwrap_or(if self.is_ltr { 0 } else { 1 })
    }

    /// Whether the character at `index` runs left to right.
    pub fn is_char_ltr(&self, index: usize) -> bool {
        self.char_level(index) & 1 == 0
    }

    /// Whether the character at `index` is whitespace.
    pub fn is_char_whitespace(&self, index: usize) -> bool {
        self.chars.get(index).is_some_and(|ch| ch.is_whitespace())
    }

    /// Whether a caret may sit before the character at `index`.
    pub fn caret_at_offset_is_valid(&self, index: usize) -> bool {
        match self.locate(index) {
            Some((logical, local)) => self.components[logical].caret_at_offset_is_valid(local),
            None => true,
        }
    }

    /// Logical index of the character at visual position `visual`.
    pub fn visual_to_logical(&self, visual: usize) -> usize {
        self.visual_to_logical
            .as_ref()
            .and_then(|map| map.get(visual).copied())
            .unwrap_or(visual)
    }

    /// Visual position of the character at logical `index`.
    pub fn logical_to_visual(&self, index: usize) -> usize {
        self.logical_to_visual
            .as_ref()
            .and_then(|map| map.get(index).copied())
            .unwrap_or(index)
    }

    /// Ink bounds of the character at `index`, in line space.
    pub fn char_bounds(&self, index: usize) -> Rect {
        let Some((logical, local)) = self.locate(index) else {
            return Rect::ZERO;
        };
        let (x, y) = self.locs[self.component_visual[logical]];
        self.components[logical].char_visual_bounds(local) + Vec2::new(x.into(), y.into())
    }

    fn placed(&self) -> impl Iterator<Item = (&Component, Vec2)> + '_ {
        self.component_order
            .iter()
            .zip(&self.locs)
            .map(|(&logical, &(x, y))| (&self.components[logical], Vec2::new(x.into(), y.into())))
    }

    /// Union of the components' ink and decoration bounds, mapped along the layout path.
    pub fn visual_bounds(&self) -> Rect {
        self.placed()
            .map(|(component, origin)| {
                let bounds = component.visual_bounds() + origin;
                match &self.path {
                    Some(path) => path.map_rect(bounds).bounding_box(),
                    None => bounds,
                }
            })
            .fold(None, union_rect)
            .unwrap_or(Rect::ZERO)
    }

    /// Union of the components' logical bounds widened for slanted glyphs.
    pub fn italic_bounds(&self) -> Rect {
        self.placed()
            .map(|(component, origin)| component.italic_bounds() + origin)
            .fold(None, union_rect)
            .unwrap_or(Rect::ZERO)
    }

    /// Outline of every component in line space, before mapping along the layout path.
    pub fn outline(&self) -> BezPath {
        let mut outline = BezPath::new();
        for (component, origin) in self.placed() {
            append_path(
                &mut outline,
                &component.outline(origin.x as f32, origin.y as f32),
            );
        }
        outline
    }

    /// Sum of the advances of the characters in `start..limit`.
    pub fn advance_between(&self, start: usize, limit: usize) -> f32 {
        advance_between(&self.components, start, limit)
    }

    /// A copy of this line justified towards `width`.
    ///
    /// Only characters in `range` take part; `ratio` scales the distance to `width`. Further
    /// passes run, up to [`LayoutOptions::max_justification_passes`], while a pass had to
    /// clamp an advance.
    pub fn justified(&self, width: f32, ratio: f32, range: Range<usize>) -> Result<Self, Error> {
        let len = self.chars.len();
        if range.start > range.end || range.end > len {
            return Err(Error::invalid_range(range.start, range.end, len));
        }
        let mut components = self.components.clone();
        let mut positions = vec![0; components.len()];
        let mut info_count = 0;
        for &logical in &self.component_order {
            positions[logical] = info_count;
            info_count += components[logical].char_count();
        }
        let in_range = |index: usize| {
            self.starts[index + 1] > range.start && self.starts[index] < range.end
        };

        let max_passes = self.options.max_justification_passes.max(1);
        let mut pass = 0;
        loop {
            pass += 1;
            let justify_advance = advance_between(&components, range.start, range.end);
            let delta = (width - justify_advance) * ratio;

            let mut infos: Vec<Option<JustificationInfo>> = vec![None; info_count];
            for (index, component) in components.iter().enumerate() {
                if !in_range(index) {
                    continue;
                }
                let start = self.starts[index];
                let local = range.start.saturating_sub(start)
                    ..range.end.min(self.starts[index + 1]) - start;
                let component_infos = component.justification_infos(local);
                let at = positions[index];
                infos[at..at + component_infos.len()].copy_from_slice(&component_infos);
            }
            let info_start = infos.iter().position(Option::is_some).unwrap_or(info_count);
            let info_limit = infos
                .iter()
                .rposition(Option::is_some)
                .map_or(info_start, |index| index + 1);
            let deltas = Justifier::new(&infos, info_start, info_limit).justify(delta);

            let mut want_rejustify = false;
            for (index, component) in components.iter_mut().enumerate() {
                if !in_range(index) {
                    continue;
                }
                let at = positions[index] * 2;
                let count = component.char_count() * 2;
                let (justified, clamped) =
                    component.apply_justification_deltas(&deltas[at..at + count]);
                *component = justified;
                want_rejustify |= clamped;
            }
            if !want_rejustify || pass >= max_passes {
                break;
            }
            log::debug!("justification pass {pass} clamped an advance, running another");
        }

        Self::new(
            components,
            self.baseline_offsets,
            self.chars.clone(),
            self.levels.clone(),
            self.is_ltr,
            self.options,
        )
    }
}

/// Sum of the advances of the characters in `start..limit` across `components`.
pub(crate) fn advance_between(components: &[Component], start: usize, limit: usize) -> f32 {
    let mut advance = 0.0;
    let mut component_start = 0;
    for component in components {
        let count = component.char_count();
        let component_limit = component_start + count;
        if component_limit > start {
            let from = start.saturating_sub(component_start);
            let to = count.min(limit.saturating_sub(component_start));
            if from < to {
                advance += component.advance_between(from, to);
            }
            if component_limit >= limit {
                break;
            }
        }
        component_start = component_limit;
    }
    advance
}

#[cfg(test)]
mod tests {
    use super::TextLine;
    use crate::component::{Component, CoreMetrics, GraphicComponent, TextComponent};
    use crate::context::LayoutOptions;
    use crate::shape::{ShapedChar, ShapedRun};
    use crate::style::{Decoration, Font, GraphicReplacement};
    use crate::ErrorKind;
    use text_primitives::Baseline;

    fn text(chars: &str, level: u8, angle: f32) -> Component {
        let chars: Vec<char> = chars.chars().collect();
        let run = ShapedRun {
            metrics: CoreMetrics {
                ascent: 8.0,
                descent: 2.0,
                leading: 1.0,
                italic_angle: angle,
                ..CoreMetrics::default()
            },
            chars: chars.iter().map(|_| ShapedChar::new(10.0)).collect(),
        };
        Component::Text(
            TextComponent::new(Font::new("Mono", 10.0), &chars, level, Decoration::PLAIN, run)
                .unwrap(),
        )
    }

    fn line(components: Vec<Component>, text: &str, levels: Vec<u8>) -> TextLine {
        TextLine::new(
            components,
            [0.0, -3.0, -6.0],
            text.chars().collect(),
            levels,
            true,
            LayoutOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn char_counts_must_match() {
        let err = TextLine::new(
            vec![text("ab", 0, 0.0)],
            [0.0; 3],
            "abc".chars().collect(),
            vec![0; 3],
            true,
            LayoutOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ComponentMismatch);
    }

    #[test]
    fn simple_metrics() {
        let l = line(vec![text("ab", 0, 0.0), text("cd", 0, 0.0)], "abcd", vec![0; 4]);
        let m = l.metrics();
        assert_eq!(m.ascent, 8.0);
        assert_eq!(m.descent, 2.0);
        assert_eq!(m.leading, 1.0);
        assert_eq!(m.advance, 40.0);
        assert_eq!(l.char_x_position(2), 20.0);
        assert_eq!(l.char_line_position(2, false), 30.0);
        assert_eq!(l.advance_between(1, 3), 20.0);
    }

    #[test]
    fn rtl_component_is_placed_in_visual_order() {
        let l = line(
            vec![text("ab", 0, 0.0), text("\u{5D0}\u{5D1}", 1, 0.0), text("f", 0, 0.0)],
            "ab\u{5D0}\u{5D1}f",
            vec![0, 0, 1, 1, 0],
        );
        assert_eq!(l.logical_to_visual(2), 3);
        assert_eq!(l.visual_to_logical(3), 2);
        // Alef is the rightmost of the two Hebrew letters.
        assert_eq!(l.char_x_position(2), 30.0);
        assert_eq!(l.char_x_position(3), 20.0);
        assert_eq!(l.char_line_position(2, true), 40.0);
        assert!(!l.is_char_ltr(2));
    }

    #[test]
    fn slant_change_adds_correction_and_padding() {
        let l = line(vec![text("a", 0, 0.0), text("b", 0, 0.25)], "ab", vec![0; 2]);
        // Upright then slanted: the slanted bottom would cut back into the upright glyph.
        let loc = l.component_location(1).unwrap();
        assert_eq!(loc.x, 10.5);
        // Trailing padding covers the top of the last slanted glyph.
        assert_eq!(l.metrics().advance, 10.5 + 10.0 + 2.0);
    }

    #[test]
    fn floating_graphic_grows_descent() {
        let graphic = GraphicReplacement::new(20.0, 0.0, 5.0, Baseline::Top);
        let l = line(
            vec![
                text("a", 0, 0.0),
                Component::Graphic(GraphicComponent::new(graphic, Decoration::PLAIN, 0, 1)),
            ],
            "a\u{FFFC}",
            vec![0; 2],
        );
        assert_eq!(l.metrics().ascent, 8.0);
        assert_eq!(l.metrics().descent, 12.0);
        // Hangs from the top of the line.
        assert_eq!(l.char_y_position(1), 12.0);
    }

    #[test]
    fn justification_fills_the_width() {
        let l = line(vec![text("a b c", 0, 0.0)], "a b c", vec![0; 5]);
        assert_eq!(l.metrics().advance, 50.0);
        let j = l.justified(60.0, 1.0, 0..5).unwrap();
        assert!((j.metrics().advance - 60.0).abs() < 1e-3);
        // Letters keep their width; the spaces took the extra room.
        assert_eq!(j.char_advance(0), 10.0);
        assert!((j.char_advance(1) - 15.0).abs() < 1e-3);
    }
}
