// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carets: the mapping between hits and visual caret positions, caret geometry and keyboard
//! navigation.
//!
//! A caret position is an index in `0..=len` counting character boundaries from the left of
//! the line, independent of the text direction.

use peniko::kurbo::{BezPath, Point, Rect};

use super::hit::{CaretPolicy, TextHit, signed};
use super::TextLayout;
use crate::error::Error;

/// Caret shapes at one insertion offset.
///
/// `weak` is present when the two hits at the offset sit at different positions, which
/// happens at direction boundaries.
#[derive(Clone, Debug, PartialEq)]
pub struct CaretShapes {
    /// The caret of the strong hit.
    pub strong: BezPath,
    /// The caret of the other hit, when it is drawn elsewhere.
    pub weak: Option<BezPath>,
}

impl TextLayout {
    /// The visual caret position of `hit`.
    ///
    /// Hits before the first or after the last character map to the matching end of the line.
    pub fn hit_to_caret(&self, hit: TextHit) -> usize {
        let len = self.char_count();
        let ltr = self.is_left_to_right();
        let Ok(index) = usize::try_from(hit.char_index()) else {
            return if ltr { 0 } else { len };
        };
        if index >= len {
            return if ltr { len } else { 0 };
        }
        let mut visual = self.line.logical_to_visual(index);
        if hit.is_leading() != self.line.is_char_ltr(index) {
            visual += 1;
        }
        visual
    }

    /// A hit at the visual caret position `caret`.
    ///
    /// Not necessarily the strong hit at that position.
    pub fn caret_to_hit(&self, caret: usize) -> TextHit {
        let len = self.char_count();
        if caret == 0 || caret >= len {
            if (caret >= len) == self.is_left_to_right() {
                TextHit::leading(signed(len))
            } else {
                TextHit::trailing(-1)
            }
        } else {
            let index = self.line.visual_to_logical(caret);
            if self.line.is_char_ltr(index) {
                TextHit::leading(signed(index))
            } else {
                TextHit::trailing(signed(index))
            }
        }
    }

    /// Whether a caret may sit at visual position `caret`.
    pub fn caret_is_valid(&self, caret: usize) -> bool {
        let len = self.char_count();
        if caret == 0 || caret >= len {
            return true;
        }
        let mut index = self.line.visual_to_logical(caret);
        if !self.line.is_char_ltr(index) {
            index = self.line.visual_to_logical(caret - 1);
            if self.line.is_char_ltr(index) {
                return true;
            }
        }
        self.line.caret_at_offset_is_valid(index)
    }

    pub(super) fn check_hit(&self, hit: TextHit) -> Result<(), Error> {
        let insertion = hit.insertion_index();
        if insertion < 0 || insertion > signed(self.char_count()) {
            return Err(Error::invalid_hit(hit.char_index(), self.char_count()));
        }
        Ok(())
    }

    fn check_offset(&self, offset: usize) -> Result<(), Error> {
        if offset > self.char_count() {
            return Err(Error::index_out_of_bounds(offset, self.char_count()));
        }
        Ok(())
    }

    /// Position and slope of the caret at `caret`.
    ///
    /// The first value is the x coordinate where the caret crosses the baseline, the second
    /// the horizontal change per unit of height; `x(y) = info[0] - info[1] * y`.
    pub(super) fn caret_info_at(&self, caret: usize, bounds: Rect) -> [f32; 2] {
        let line = &self.line;
        let len = self.char_count();
        let slanted = |index: usize, pos: f32| {
            let angle = line.char_angle(index);
            if angle == 0.0 {
                return (pos, pos);
            }
            let pos = pos + angle * line.char_shift(index);
            (
                pos + angle * line.char_ascent(index),
                pos - angle * line.char_descent(index),
            )
        };
        let ((top1, bottom1), (top2, bottom2)) = if caret == 0 || caret >= len {
            let edge = if caret >= len {
                let index = line.visual_to_logical(len - 1);
                slanted(
                    index,
                    line.char_x_position(index) + line.char_advance(index),
                )
            } else {
                let index = line.visual_to_logical(0);
                slanted(index, line.char_x_position(index))
            };
            (edge, edge)
        } else {
            let left = line.visual_to_logical(caret - 1);
            let right = line.visual_to_logical(caret);
            (
                slanted(
                    left,
                    line.char_x_position(left) + line.char_advance(left),
                ),
                slanted(right, line.char_x_position(right)),
            )
        };
        let top = (top1 + top2) / 2.0;
        let bottom = (bottom1 + bottom2) / 2.0;
        let height = bounds.height() as f32;
        let slope = if height == 0.0 {
            0.0
        } else {
            (top - bottom) / height
        };
        [top + slope * bounds.y0 as f32, slope]
    }

    /// Position and slope of the caret for `hit`, against the natural bounds.
    pub fn caret_info(&self, hit: TextHit) -> Result<[f32; 2], Error> {
        self.caret_info_in(hit, self.natural_bounds())
    }

    /// Position and slope of the caret for `hit`, spanning `bounds`.
    pub fn caret_info_in(&self, hit: TextHit, bounds: Rect) -> Result<[f32; 2], Error> {
        self.check_hit(hit)?;
        Ok(self.caret_info_at(self.hit_to_caret(hit), bounds))
    }

    /// Points of the caret line at `caret` from the top of `bounds` to its bottom.
    ///
    /// When `clip` is set, the line bends to stay within the horizontal extent of `bounds`.
    pub(super) fn caret_points(&self, caret: usize, bounds: Rect, clip: bool) -> Vec<Point> {
        let [pos, slope] = self.caret_info_at(caret, bounds);
        let (pos, slope) = (f64::from(pos), f64::from(slope));
        let x_at = |y: f64| pos - slope * y;
        let mut points = vec![Point::new(x_at(bounds.y0), bounds.y0)];
        if clip && slope != 0.0 {
            let mut crossings: Vec<Point> = [bounds.x0, bounds.x1]
                .into_iter()
                .map(|x| Point::new(x, (pos - x) / slope))
                .filter(|p| p.y > bounds.y0 && p.y < bounds.y1)
                .collect();
            crossings.sort_by(|a, b| a.y.total_cmp(&b.y));
            points.extend(crossings);
        }
        points.push(Point::new(x_at(bounds.y1), bounds.y1));
        if clip {
            for point in &mut points {
                point.x = point.x.clamp(bounds.x0, bounds.x1);
            }
        }
        points
    }

    /// The caret for `hit`, against the natural bounds.
    pub fn caret_shape(&self, hit: TextHit) -> Result<BezPath, Error> {
        self.caret_shape_in(hit, self.natural_bounds())
    }

    /// The caret for `hit`, spanning `bounds` and mapped along the layout path.
    pub fn caret_shape_in(&self, hit: TextHit, bounds: Rect) -> Result<BezPath, Error> {
        self.check_hit(hit)?;
        let points = self.caret_points(self.hit_to_caret(hit), bounds, false);
        Ok(self.map_shape(polyline(&points, false)))
    }

    /// The strong and weak carets at insertion `offset`, against the natural bounds.
    pub fn caret_shapes(
        &self,
        offset: usize,
        policy: &dyn CaretPolicy,
    ) -> Result<CaretShapes, Error> {
        self.caret_shapes_in(offset, self.natural_bounds(), policy)
    }

    /// The strong and weak carets at insertion `offset`, spanning `bounds`.
    pub fn caret_shapes_in(
        &self,
        offset: usize,
        bounds: Rect,
        policy: &dyn CaretPolicy,
    ) -> Result<CaretShapes, Error> {
        self.check_offset(offset)?;
        let hit1 = TextHit::after_offset(signed(offset));
        let hit2 = hit1.other_hit();
        let caret1 = self.hit_to_caret(hit1);
        let caret2 = self.hit_to_caret(hit2);
        let shape =
            |caret| self.map_shape(polyline(&self.caret_points(caret, bounds, false), false));
        if caret1 == caret2 {
            return Ok(CaretShapes {
                strong: shape(caret1),
                weak: None,
            });
        }
        let (strong, weak) = if policy.strong_caret(hit1, hit2, self) == hit1 {
            (caret1, caret2)
        } else {
            (caret2, caret1)
        };
        Ok(CaretShapes {
            strong: shape(strong),
            weak: Some(shape(weak)),
        })
    }

    /// The hit one caret position to the right of `hit`, skipping positions inside clusters.
    ///
    /// Returns `None` at the right end of the line.
    pub fn next_right_hit(&self, hit: TextHit) -> Result<Option<TextHit>, Error> {
        self.check_hit(hit)?;
        let mut caret = self.hit_to_caret(hit);
        if caret >= self.char_count() {
            return Ok(None);
        }
        loop {
            caret += 1;
            if self.caret_is_valid(caret) {
                break;
            }
        }
        Ok(Some(self.caret_to_hit(caret)))
    }

    /// The hit one caret position to the left of `hit`, skipping positions inside clusters.
    ///
    /// Returns `None` at the left end of the line.
    pub fn next_left_hit(&self, hit: TextHit) -> Result<Option<TextHit>, Error> {
        self.check_hit(hit)?;
        let mut caret = self.hit_to_caret(hit);
        if caret == 0 {
            return Ok(None);
        }
        loop {
            caret -= 1;
            if self.caret_is_valid(caret) {
                break;
            }
        }
        Ok(Some(self.caret_to_hit(caret)))
    }

    /// The strong hit right of the strong caret at insertion `offset`.
    pub fn next_right_hit_from(
        &self,
        offset: usize,
        policy: &dyn CaretPolicy,
    ) -> Result<Option<TextHit>, Error> {
        self.next_hit_from(offset, policy, true)
    }

    /// The strong hit left of the strong caret at insertion `offset`.
    pub fn next_left_hit_from(
        &self,
        offset: usize,
        policy: &dyn CaretPolicy,
    ) -> Result<Option<TextHit>, Error> {
        self.next_hit_from(offset, policy, false)
    }

    fn next_hit_from(
        &self,
        offset: usize,
        policy: &dyn CaretPolicy,
        right: bool,
    ) -> Result<Option<TextHit>, Error> {
        self.check_offset(offset)?;
        let hit1 = TextHit::after_offset(signed(offset));
        let hit2 = hit1.other_hit();
        let strong = policy.strong_caret(hit1, hit2, self);
        let next = if right {
            self.next_right_hit(strong)?
        } else {
            self.next_left_hit(strong)?
        };
        Ok(next.map(|next| policy.strong_caret(self.visual_other_hit(next), next, self)))
    }

    /// The hit at the same visual position as `hit`, on the neighbouring character.
    pub fn visual_other_hit(&self, hit: TextHit) -> TextHit {
        let line = &self.line;
        let len = self.char_count();
        let ltr = self.is_left_to_right();
        let hit_index = hit.char_index();
        let (index, leading) = match usize::try_from(hit_index) {
            Ok(index) if index < len => {
                let mut visual = signed(line.logical_to_visual(index));
                let moved_right = if line.is_char_ltr(index) == hit.is_leading() {
                    visual -= 1;
                    false
                } else {
                    visual += 1;
                    true
                };
                match usize::try_from(visual) {
                    Ok(visual) if visual < len => {
                        let index = line.visual_to_logical(visual);
                        (signed(index), moved_right == line.is_char_ltr(index))
                    }
                    _ => {
                        let index = if moved_right == ltr { signed(len) } else { -1 };
                        (index, index == signed(len))
                    }
                }
            }
            _ => {
                let before = hit_index < 0;
                let visual = if ltr == before { 0 } else { len - 1 };
                let index = line.visual_to_logical(visual);
                let leading = if ltr == before {
                    line.is_char_ltr(index)
                } else {
                    !line.is_char_ltr(index)
                };
                (signed(index), leading)
            }
        };
        if leading {
            TextHit::leading(index)
        } else {
            TextHit::trailing(index)
        }
    }
}

/// A path through `points`, optionally closed.
pub(super) fn polyline(points: &[Point], close: bool) -> BezPath {
    let mut path = BezPath::new();
    let mut points = points.iter();
    if let Some(&first) = points.next() {
        path.move_to(first);
        for &point in points {
            path.line_to(point);
        }
        if close {
            path.close_path();
        }
    }
    path
}
