// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection highlights and the logical ranges behind a visual selection.

use std::ops::Range;

use peniko::kurbo::{BezPath, Point, Rect, Shape};
use smallvec::SmallVec;

use super::TextLayout;
use super::caret::polyline;
use super::hit::{TextHit, signed};
use crate::error::Error;
use crate::util::{append_path, append_rect};

impl TextLayout {
    /// The region between two caret positions, closed into one shape.
    fn caret_bounding_shape(&self, caret0: usize, caret1: usize, bounds: Rect) -> BezPath {
        let (caret0, caret1) = (caret0.min(caret1), caret0.max(caret1));
        bounding_shape(
            &self.caret_points(caret0, bounds, true),
            &self.caret_points(caret1, bounds, true),
        )
    }

    fn left_shape(&self, bounds: Rect) -> BezPath {
        let edge = [Point::new(bounds.x0, bounds.y1), Point::new(bounds.x0, bounds.y0)];
        bounding_shape(&edge, &self.caret_points(0, bounds, true))
    }

    fn right_shape(&self, bounds: Rect) -> BezPath {
        let edge = [Point::new(bounds.x1, bounds.y1), Point::new(bounds.x1, bounds.y0)];
        bounding_shape(&self.caret_points(self.char_count(), bounds, true), &edge)
    }

    /// Highlight between two hits in visual order, against the natural bounds.
    pub fn visual_highlight_shape(
        &self,
        first: TextHit,
        second: TextHit,
    ) -> Result<BezPath, Error> {
        self.visual_highlight_shape_in(first, second, self.natural_bounds())
    }

    /// Highlight covering every caret position between two hits, spanning `bounds`.
    ///
    /// When either hit sits at an end of the line, the highlight extends to that side of
    /// `bounds`.
    pub fn visual_highlight_shape_in(
        &self,
        first: TextHit,
        second: TextHit,
        bounds: Rect,
    ) -> Result<BezPath, Error> {
        self.check_hit(first)?;
        self.check_hit(second)?;
        let first = self.hit_to_caret(first);
        let second = self.hit_to_caret(second);
        let len = self.char_count();
        let mut result = self.caret_bounding_shape(first, second, bounds);
        if first == 0 || second == 0 {
            append_nonempty(&mut result, &self.left_shape(bounds));
        }
        if first == len || second == len {
            append_nonempty(&mut result, &self.right_shape(bounds));
        }
        Ok(self.map_shape(result))
    }

    /// Highlight of the logical range between two offsets, against the natural bounds.
    pub fn logical_highlight_shape(&self, first: usize, second: usize) -> Result<BezPath, Error> {
        self.logical_highlight_shape_in(first, second, self.natural_bounds())
    }

    /// Highlight of the characters between two insertion offsets, spanning `bounds`.
    ///
    /// A bidi range may produce several disjoint pieces. Ranges touching the start or end of
    /// the text extend to the matching side of `bounds`.
    pub fn logical_highlight_shape_in(
        &self,
        first: usize,
        second: usize,
        bounds: Rect,
    ) -> Result<BezPath, Error> {
        let (start, end) = (first.min(second), first.max(second));
        let len = self.char_count();
        if end > len {
            return Err(Error::invalid_range(start, end, len));
        }
        let mut carets: SmallVec<[usize; 10]> = SmallVec::new();
        if start < end {
            let mut index = start;
            while index < end {
                carets.push(self.hit_to_caret(TextHit::leading(signed(index))));
                let ltr = self.line.is_char_ltr(index);
                index += 1;
                while index < end && self.line.is_char_ltr(index) == ltr {
                    index += 1;
                }
                carets.push(self.hit_to_caret(TextHit::trailing(signed(index) - 1)));
            }
        } else {
            let caret = self.hit_to_caret(TextHit::leading(signed(start)));
            carets.extend([caret, caret]);
        }

        let mut result = BezPath::new();
        for pair in carets.chunks_exact(2) {
            append_path(
                &mut result,
                &self.caret_bounding_shape(pair[0], pair[1], bounds),
            );
        }
        if start != end {
            let ltr = self.is_left_to_right();
            if (ltr && start == 0) || (!ltr && end == len) {
                append_nonempty(&mut result, &self.left_shape(bounds));
            }
            if (ltr && end == len) || (!ltr && start == 0) {
                append_nonempty(&mut result, &self.right_shape(bounds));
            }
        }
        Ok(self.map_shape(result))
    }

    /// The logical ranges of the characters between two hits in visual order.
    pub fn logical_ranges_for_visual_selection(
        &self,
        first: TextHit,
        second: TextHit,
    ) -> Result<Vec<Range<usize>>, Error> {
        self.check_hit(first)?;
        self.check_hit(second)?;
        let len = self.char_count();
        let first = self.hit_to_caret(first);
        let second = self.hit_to_caret(second);
        let mut included = vec![false; len];
        for visual in first.min(second)..first.max(second) {
            included[self.line.visual_to_logical(visual)] = true;
        }
        let mut ranges: Vec<Range<usize>> = Vec::new();
        for (index, &selected) in included.iter().enumerate() {
            if !selected {
                continue;
            }
            match ranges.last_mut() {
                Some(range) if range.end == index => range.end += 1,
                _ => ranges.push(index..index + 1),
            }
        }
        Ok(ranges)
    }

    /// Union of the ink bounds of the characters in `first..limit`, mapped along the layout
    /// path.
    pub fn black_box_bounds(&self, first: usize, limit: usize) -> Result<BezPath, Error> {
        let (start, end) = (first.min(limit), first.max(limit));
        let len = self.char_count();
        if end > len {
            return Err(Error::invalid_range(start, end, len));
        }
        let mut result = BezPath::new();
        for index in start..end {
            let bounds = self.line.char_bounds(index);
            if bounds.area() != 0.0 {
                append_rect(&mut result, bounds);
            }
        }
        Ok(self.map_shape(result))
    }
}

/// Closes `path0` and `path1` into one shape, walking `path1` backwards when both run the
/// same way.
fn bounding_shape(path0: &[Point], path1: &[Point]) -> BezPath {
    let upwards = |path: &[Point]| match (path.first(), path.last()) {
        (Some(first), Some(last)) => first.y > last.y,
        _ => false,
    };
    let mut points = path0.to_vec();
    if upwards(path0) == upwards(path1) {
        points.extend(path1.iter().rev());
    } else {
        points.extend_from_slice(path1);
    }
    polyline(&points, true)
}

fn append_nonempty(path: &mut BezPath, shape: &BezPath) {
    if shape.bounding_box().area() != 0.0 {
        append_path(path, shape);
    }
}
