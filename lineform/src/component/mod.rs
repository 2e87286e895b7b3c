// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering components: the shaped pieces a line is assembled from.
//!
//! A component covers a contiguous logical range of characters at a single bidi level, rendered
//! either with one font ([`TextComponent`]) or as a repeated embedded graphic
//! ([`GraphicComponent`]). Components are immutable; subsetting and justification produce new
//! components.

mod graphic;
mod text;

use std::ops::Range;

use peniko::kurbo::{Affine, BezPath, Rect};
use text_primitives::Baseline;

use crate::justify::JustificationInfo;
use crate::style::Decoration;

pub use graphic::GraphicComponent;
pub use text::TextComponent;

/// Vertical metrics of a run.
///
/// Offsets are measured downwards from the run's own baseline, so ascent-side values are
/// negative offsets and positive extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoreMetrics {
    /// Distance from the baseline to the top of the run.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the run.
    pub descent: f32,
    /// Recommended gap below the descent.
    pub leading: f32,
    /// The baseline the run is aligned to.
    pub baseline: Baseline,
    /// Offsets of the standard baselines relative to the run's baseline.
    pub baseline_offsets: [f32; Baseline::STANDARD_COUNT],
    /// Offset of the strikethrough from the baseline.
    pub strikethrough_offset: f32,
    /// Thickness of the strikethrough.
    pub strikethrough_thickness: f32,
    /// Offset of the underline from the baseline.
    pub underline_offset: f32,
    /// Thickness of the underline.
    pub underline_thickness: f32,
    /// Vertical shift applied for superscript or subscript.
    pub superscript_offset: f32,
    /// Horizontal shift per unit of height; positive leans to the right.
    pub italic_angle: f32,
}

impl Default for CoreMetrics {
    fn default() -> Self {
        Self {
            ascent: 0.0,
            descent: 0.0,
            leading: 0.0,
            baseline: Baseline::Roman,
            baseline_offsets: [0.0; Baseline::STANDARD_COUNT],
            strikethrough_offset: 0.0,
            strikethrough_thickness: 0.0,
            underline_offset: 0.0,
            underline_thickness: 0.0,
            superscript_offset: 0.0,
            italic_angle: 0.0,
        }
    }
}

impl CoreMetrics {
    /// Total height including leading.
    pub fn height(&self) -> f32 {
        self.ascent + self.descent + self.leading
    }

    /// Offset of this run's baseline from the line baseline.
    ///
    /// Standard baselines read the line's offset table; floating baselines hang from the line's
    /// ascent or stand on its descent.
    pub fn effective_baseline_offset(
        &self,
        line_offsets: &[f32; Baseline::STANDARD_COUNT],
        line_ascent: f32,
        line_descent: f32,
    ) -> f32 {
        match self.baseline {
            Baseline::Top => -line_ascent + self.ascent,
            Baseline::Bottom => line_descent - self.descent,
            baseline => baseline
                .index()
                .and_then(|index| line_offsets.get(index).copied())
                .unwrap_or(0.0),
        }
    }

    /// Whether two runs can be placed next to each other without italic correction.
    pub(crate) fn same_slant_context(&self, other: &Self) -> bool {
        self.italic_angle == other.italic_angle
            && self.baseline == other.baseline
            && self.superscript_offset == other.superscript_offset
    }
}

/// One rendering component of a line.
#[derive(Clone, Debug, PartialEq)]
pub enum Component {
    /// Characters rendered with one font.
    Text(TextComponent),
    /// Characters each replaced by a graphic.
    Graphic(GraphicComponent),
}

macro_rules! dispatch {
    ($self:ident, $c:ident => $body:expr) => {
        match $self {
            Component::Text($c) => $body,
            Component::Graphic($c) => $body,
        }
    };
}

impl Component {
    /// Number of characters covered.
    pub fn char_count(&self) -> usize {
        dispatch!(self, c => c.char_count())
    }

    /// Bidi level of every character.
    pub fn level(&self) -> u8 {
        dispatch!(self, c => c.level())
    }

    /// Whether characters run right to left.
    pub fn is_rtl(&self) -> bool {
        self.level() & 1 != 0
    }

    /// Vertical metrics.
    pub fn metrics(&self) -> &CoreMetrics {
        dispatch!(self, c => c.metrics())
    }

    /// Decoration drawn over the component.
    pub fn decoration(&self) -> Decoration {
        dispatch!(self, c => c.decoration())
    }

    /// Baseline transform, if any.
    pub fn baseline_transform(&self) -> Option<Affine> {
        match self {
            Self::Text(c) => c.font().transform(),
            Self::Graphic(_) => None,
        }
    }

    /// Total advance.
    pub fn advance(&self) -> f32 {
        dispatch!(self, c => c.advance())
    }

    /// Advance of the character at logical `index`.
    pub fn char_advance(&self, index: usize) -> f32 {
        dispatch!(self, c => c.char_advance(index))
    }

    /// Left edge of the character at logical `index`, relative to the component origin.
    pub fn char_x(&self, index: usize) -> f32 {
        dispatch!(self, c => c.char_x(index))
    }

    /// Vertical position of the character at logical `index` relative to the baseline.
    pub fn char_y(&self, _index: usize) -> f32 {
        0.0
    }

    /// Whether a caret may sit before the character at logical `index`.
    pub fn caret_at_offset_is_valid(&self, index: usize) -> bool {
        dispatch!(self, c => c.caret_at_offset_is_valid(index))
    }

    /// Ink bounds of the character at logical `index`, relative to the component origin.
    pub fn char_visual_bounds(&self, index: usize) -> Rect {
        dispatch!(self, c => c.char_visual_bounds(index))
    }

    /// Bounds from the origin to the advance, between ascent and descent plus leading.
    pub fn logical_bounds(&self) -> Rect {
        let m = self.metrics();
        crate::util::rect(0.0, -m.ascent, self.advance(), m.descent + m.leading)
    }

    /// Logical bounds widened to contain slanted glyphs.
    pub fn italic_bounds(&self) -> Rect {
        let m = self.metrics();
        let angle = m.italic_angle;
        let top = -m.ascent;
        let bottom = m.descent;
        let mut left = 0.0;
        let mut right = self.advance();
        if angle > 0.0 {
            left -= angle * (bottom - m.superscript_offset);
            right -= angle * (top - m.superscript_offset);
        } else if angle < 0.0 {
            left -= angle * (top - m.superscript_offset);
            right -= angle * (bottom - m.superscript_offset);
        }
        crate::util::rect(left, top, right, bottom)
    }

    /// Union of the ink bounds and the decoration.
    pub fn visual_bounds(&self) -> Rect {
        dispatch!(self, c => c.visual_bounds())
    }

    /// Outline positioned with its origin at `(x, y)`.
    pub fn outline(&self, x: f32, y: f32) -> BezPath {
        let mut path = dispatch!(self, c => c.outline());
        path.apply_affine(Affine::translate((f64::from(x), f64::from(y))));
        path
    }

    /// Index of the first character, at or after `start`, that does not fit in `width`.
    ///
    /// Returns [`Component::char_count`] when everything from `start` fits.
    pub fn line_break_index(&self, start: usize, width: f32) -> usize {
        let mut width = width;
        let mut index = start;
        while index < self.char_count() {
            width -= self.char_advance(index);
            if width < 0.0 {
                break;
            }
            index += 1;
        }
        index
    }

    /// Sum of the advances of the logical range `start..limit`.
    pub fn advance_between(&self, start: usize, limit: usize) -> f32 {
        (start..limit.min(self.char_count()))
            .map(|index| self.char_advance(index))
            .sum()
    }

    /// A component covering `range`, optionally forced to another bidi level.
    pub fn subset(&self, range: Range<usize>, level: Option<u8>) -> Self {
        match self {
            Self::Text(c) => Self::Text(c.subset(range, level)),
            Self::Graphic(c) => Self::Graphic(c.subset(range, level)),
        }
    }

    /// Justification infos in visual order; characters outside `range` get `None`.
    pub fn justification_infos(&self, range: Range<usize>) -> Vec<Option<JustificationInfo>> {
        let count = self.char_count();
        (0..count)
            .map(|visual| {
                let logical = if self.is_rtl() { count - 1 - visual } else { visual };
                if range.contains(&logical) {
                    Some(dispatch!(self, c => c.justification_info(logical)))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Applies two deltas per character, in visual order.
    ///
    /// Returns the justified component and whether an advance had to be clamped at zero, in
    /// which case another justification pass can recover the lost space.
    pub fn apply_justification_deltas(&self, deltas: &[f32]) -> (Self, bool) {
        match self {
            Self::Text(c) => {
                let (c, clamped) = c.apply_justification_deltas(deltas);
                (Self::Text(c), clamped)
            }
            Self::Graphic(c) => {
                let (c, clamped) = c.apply_justification_deltas(deltas);
                (Self::Graphic(c), clamped)
            }
        }
    }
}

/// Advance and glyph shift of one character cell.
///
/// Justification widens cells; `offset` moves the glyph inside its widened cell.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub(crate) struct Cell {
    pub(crate) advance: f32,
    pub(crate) offset: f32,
}

/// Left edges of `cells` laid out in the direction given by `rtl`.
pub(crate) fn cell_positions(cells: &[Cell], rtl: bool) -> Vec<f32> {
    let mut positions = vec![0.0; cells.len()];
    let mut x = 0.0;
    let mut place = |i: usize| {
        positions[i] = x;
        x += cells[i].advance;
    };
    if rtl {
        (0..cells.len()).rev().for_each(&mut place);
    } else {
        (0..cells.len()).for_each(&mut place);
    }
    positions
}

/// Applies per-side deltas, given in visual order, to logically ordered cells.
///
/// Whitespace cells only grow their advance; other cells also move their glyph by the left
/// delta. Returns `true` if an advance went negative and was clamped.
pub(crate) fn justify_cells(
    cells: &mut [Cell],
    rtl: bool,
    is_whitespace: impl Fn(usize) -> bool,
    deltas: &[f32],
) -> bool {
    let count = cells.len();
    let mut clamped = false;
    for visual in 0..count {
        let logical = if rtl { count - 1 - visual } else { visual };
        let left = deltas.get(visual * 2).copied().unwrap_or(0.0);
        let right = deltas.get(visual * 2 + 1).copied().unwrap_or(0.0);
        let cell = &mut cells[logical];
        if !is_whitespace(logical) {
            cell.offset += left;
        }
        cell.advance += left + right;
        if cell.advance < 0.0 {
            cell.advance = 0.0;
            clamped = true;
        }
    }
    clamped
}
