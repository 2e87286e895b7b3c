// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::kurbo::{Affine, BezPath, PathEl, Point, Rect, Shape, Vec2};

/// The baseline of a line whose components carry baseline transforms.
///
/// Line coordinates are `(advance, offset)` pairs: the distance along the path and the distance
/// to its right, perpendicular to the path. A line without transforms maps identically.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutPath {
    segments: Vec<PathSegment>,
    /// Used when the path has no extent.
    fallback: Affine,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PathSegment {
    start: Point,
    end: Point,
    /// Distance along the path at `start`.
    advance: f64,
}

impl PathSegment {
    fn length(&self) -> f64 {
        (self.end - self.start).hypot()
    }

    fn direction(&self) -> Vec2 {
        (self.end - self.start) / self.length()
    }
}

/// Builds a [`LayoutPath`] from move and line commands.
#[derive(Debug, Default)]
pub(crate) struct LayoutPathBuilder {
    segments: Vec<PathSegment>,
    current: Point,
    advance: f64,
}

impl LayoutPathBuilder {
    pub(crate) fn move_to(&mut self, point: Point) {
        self.current = point;
    }

    pub(crate) fn line_to(&mut self, point: Point) {
        let segment = PathSegment {
            start: self.current,
            end: point,
            advance: self.advance,
        };
        let length = segment.length();
        if length > 0.0 {
            self.advance += length;
            self.segments.push(segment);
        }
        self.current = point;
    }

    pub(crate) fn current(&self) -> Point {
        self.current
    }

    pub(crate) fn finish(self, fallback: Affine) -> LayoutPath {
        LayoutPath {
            segments: self.segments,
            fallback,
        }
    }
}

impl LayoutPath {
    /// Total length of the path.
    pub fn length(&self) -> f64 {
        self.segments
            .last()
            .map_or(0.0, |segment| segment.advance + segment.length())
    }

    /// Maps a line coordinate to a point.
    ///
    /// Advances before the start or past the end extend the first or last segment.
    pub fn path_to_point(&self, advance: f64, offset: f64) -> Point {
        let Some(first) = self.segments.first() else {
            return self.fallback * Point::new(advance, offset);
        };
        let segment = self
            .segments
            .iter()
            .rev()
            .find(|segment| segment.advance <= advance)
            .unwrap_or(first);
        let direction = segment.direction();
        let normal = Vec2::new(-direction.y, direction.x);
        segment.start + direction * (advance - segment.advance) + normal * offset
    }

    /// Maps a point to the nearest line coordinate.
    pub fn point_to_path(&self, point: Point) -> (f64, f64) {
        if self.segments.is_empty() {
            let mapped = self.fallback.inverse() * point;
            return (mapped.x, mapped.y);
        }
        let last = self.segments.len() - 1;
        let mut best = (f64::INFINITY, 0.0, 0.0);
        for (index, segment) in self.segments.iter().enumerate() {
            let direction = segment.direction();
            let to_point = point - segment.start;
            let mut along = to_point.dot(direction);
            if index != 0 {
                along = along.max(0.0);
            }
            if index != last {
                along = along.min(segment.length());
            }
            let foot = segment.start + direction * along;
            let distance = (point - foot).hypot();
            if distance < best.0 {
                let normal = Vec2::new(-direction.y, direction.x);
                best = (distance, segment.advance + along, to_point.dot(normal));
            }
        }
        (best.1, best.2)
    }

    /// Maps a line-space point.
    pub fn map_point(&self, point: Point) -> Point {
        self.path_to_point(point.x, point.y)
    }

    /// Maps every point of a line-space path.
    ///
    /// Control points are mapped individually, so curves are approximated.
    pub fn map_path(&self, path: &BezPath) -> BezPath {
        let map = |p: Point| self.map_point(p);
        path.elements()
            .iter()
            .map(|element| match *element {
                PathEl::MoveTo(p) => PathEl::MoveTo(map(p)),
                PathEl::LineTo(p) => PathEl::LineTo(map(p)),
                PathEl::QuadTo(p1, p2) => PathEl::QuadTo(map(p1), map(p2)),
                PathEl::CurveTo(p1, p2, p3) => PathEl::CurveTo(map(p1), map(p2), map(p3)),
                PathEl::ClosePath => PathEl::ClosePath,
            })
            .collect()
    }

    /// Maps a line-space rectangle to a closed path.
    pub fn map_rect(&self, rect: Rect) -> BezPath {
        self.map_path(&rect.to_path(0.1))
    }
}
