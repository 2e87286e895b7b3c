// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::ops::Range;

use peniko::kurbo::{Affine, BezPath, Rect, Vec2};

use super::{Cell, CoreMetrics, cell_positions, justify_cells};
use crate::justify::JustificationInfo;
use crate::style::{Decoration, GraphicReplacement};
use crate::util::{append_path, append_rect, union_rect};

/// A run of characters each drawn as the same embedded graphic.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphicComponent {
    graphic: GraphicReplacement,
    decoration: Decoration,
    level: u8,
    metrics: CoreMetrics,
    cells: Vec<Cell>,
    positions: Vec<f32>,
    advance: f32,
}

impl GraphicComponent {
    /// Creates a component replacing `count` characters with `graphic`.
    pub fn new(
        graphic: GraphicReplacement,
        decoration: Decoration,
        level: u8,
        count: usize,
    ) -> Self {
        let metrics = graphic.core_metrics();
        let cells = vec![
            Cell {
                advance: graphic.advance(),
                offset: 0.0,
            };
            count
        ];
        let mut component = Self {
            graphic,
            decoration,
            level,
            metrics,
            cells,
            positions: Vec::new(),
            advance: 0.0,
        };
        component.relayout();
        component
    }

    fn relayout(&mut self) {
        self.positions = cell_positions(&self.cells, self.level & 1 != 0);
        self.advance = self.cells.iter().map(|cell| cell.advance).sum();
    }

    /// The graphic drawn for every character.
    pub fn graphic(&self) -> &GraphicReplacement {
        &self.graphic
    }

    pub(crate) fn char_count(&self) -> usize {
        self.cells.len()
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

    pub(crate) fn caret_at_offset_is_valid(&self, _index: usize) -> bool {
        true
    }

    fn origin(&self, index: usize) -> Vec2 {
        let x = self.positions[index] + self.cells[index].offset;
        Vec2::new(x.into(), 0.0)
    }

    pub(crate) fn char_visual_bounds(&self, index: usize) -> Rect {
        if index >= self.cells.len() {
            return Rect::ZERO;
        }
        self.graphic.bounds() + self.origin(index)
    }

    pub(crate) fn visual_bounds(&self) -> Rect {
        let bounds = (0..self.cells.len())
            .map(|index| self.char_visual_bounds(index))
            .fold(None, union_rect)
            .unwrap_or(Rect::ZERO);
        self.decoration
            .extend_bounds(bounds, &self.metrics, self.advance)
    }

    pub(crate) fn outline(&self) -> BezPath {
        let mut path = BezPath::new();
        let shape = self.graphic.outline();
        for index in 0..self.cells.len() {
            let mut placed = shape.clone();
            placed.apply_affine(Affine::translate(self.origin(index)));
            append_path(&mut path, &placed);
        }
        for stroke in self.decoration.strokes(&self.metrics, self.advance) {
            append_rect(&mut path, stroke);
        }
        path
    }

    pub(crate) fn justification_info(&self, _index: usize) -> JustificationInfo {
        JustificationInfo::graphic(self.graphic.advance())
    }

    pub(crate) fn subset(&self, range: Range<usize>, level: Option<u8>) -> Self {
        let end = range.end.min(self.cells.len());
        let start = range.start.min(end);
        let mut subset = Self {
            graphic: self.graphic.clone(),
            decoration: self.decoration,
            level: level.unwrap_or(self.level),
            metrics: self.metrics,
            cells: self.cells[start..end].to_vec(),
            positions: Vec::new(),
            advance: 0.0,
        };
        subset.relayout();
        subset
    }

    pub(crate) fn apply_justification_deltas(&self, deltas: &[f32]) -> (Self, bool) {
        let mut justified = self.clone();
        let clamped = justify_cells(
            &mut justified.cells,
            self.level & 1 != 0,
            |_| false,
            deltas,
        );
        justified.relayout();
        (justified, clamped)
    }
}

#[cfg(test)]
mod tests {
    use super::GraphicComponent;
    use crate::style::{Decoration, GraphicReplacement};
    use peniko::kurbo::Shape;
    use text_primitives::Baseline;

    fn boxes(count: usize) -> GraphicComponent {
        let graphic = GraphicReplacement::new(6.0, 2.0, 5.0, Baseline::Roman);
        GraphicComponent::new(graphic, Decoration::PLAIN, 0, count)
    }

    #[test]
    fn every_character_takes_the_graphic_advance() {
        let c = boxes(3);
        assert_eq!(c.advance(), 15.0);
        assert_eq!(c.char_x(2), 10.0);
        assert!((0..3).all(|i| c.caret_at_offset_is_valid(i)));
    }

    #[test]
    fn bounds_cover_each_copy() {
        let c = boxes(2);
        let bounds = c.visual_bounds();
        assert_eq!(bounds.x0, 0.0);
        assert_eq!(bounds.x1, 10.0);
        assert_eq!(bounds.y0, -6.0);
        assert_eq!(bounds.y1, 2.0);
        assert_eq!(c.outline().bounding_box(), bounds);
    }

    #[test]
    fn justification_widens_cells() {
        let c = boxes(2);
        let (j, clamped) = c.apply_justification_deltas(&[0.0, 1.0, 1.0, 0.0]);
        assert!(!clamped);
        assert_eq!(j.advance(), 12.0);
        assert_eq!(j.char_x(1), 6.0);
    }
}
