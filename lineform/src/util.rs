// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Misc helpers.

use peniko::kurbo::{BezPath, Rect, Shape};

/// Builds a rectangle from `f32` edges.
pub(crate) fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Rect {
    Rect::new(x0.into(), y0.into(), x1.into(), y1.into())
}

/// Grows an optional accumulated rectangle to include `b`.
pub(crate) fn union_rect(a: Option<Rect>, b: Rect) -> Option<Rect> {
    match a {
        Some(a) => Some(a.union(b)),
        None => Some(b),
    }
}

/// Appends the closed outline of `rect` to `path`.
pub(crate) fn append_rect(path: &mut BezPath, rect: Rect) {
    path.extend(rect.path_elements(0.1));
}

/// Appends every element of `other` to `path`.
pub(crate) fn append_path(path: &mut BezPath, other: &BezPath) {
    path.extend(other.elements().iter().copied());
}
