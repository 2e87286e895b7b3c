// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::kurbo::Rect;

use crate::testing::{MonospaceResolver, MonospaceShaper};
use crate::{LayoutContext, Paragraph, TextAttribute, TextLayout};

pub(crate) const EPSILON: f32 = 1e-3;

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A context shaping with the monospace test shaper.
pub(crate) fn context() -> LayoutContext {
    init_logging();
    LayoutContext::new(MonospaceShaper::new()).with_resolver(MonospaceResolver)
}

/// A paragraph of `text` at `size`.
pub(crate) fn paragraph(text: &str, size: f32) -> Paragraph {
    let mut paragraph = Paragraph::new(text);
    paragraph
        .try_apply_attribute(0..paragraph.len(), TextAttribute::Size(size))
        .unwrap();
    paragraph
}

/// A single line layout of `text` at `size`.
pub(crate) fn layout(text: &str, size: f32) -> TextLayout {
    TextLayout::from_paragraph(&paragraph(text, size), &context()).unwrap()
}

#[track_caller]
pub(crate) fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

#[track_caller]
pub(crate) fn assert_rect_close(actual: Rect, expected: Rect) {
    let close = |a: f64, b: f64| (a - b).abs() < f64::from(EPSILON);
    assert!(
        close(actual.x0, expected.x0)
            && close(actual.y0, expected.y0)
            && close(actual.x1, expected.x1)
            && close(actual.y1, expected.y1),
        "expected {expected:?}, got {actual:?}"
    );
}
