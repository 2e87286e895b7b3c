// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::utils::{assert_close, context, init_logging, layout, paragraph};
use crate::testing::{MonospaceResolver, MonospaceShaper};
use crate::{
    ErrorKind, JustificationInfo, LayoutContext, Priority, Stretch, TextAttribute, TextLayout,
};

fn unlimited_context() -> LayoutContext {
    init_logging();
    let stretch = Stretch::new(Priority::Interchar, f32::INFINITY, f32::INFINITY, false);
    let info = JustificationInfo {
        weight: 1.0,
        grow: stretch,
        shrink: stretch,
    };
    LayoutContext::new(MonospaceShaper::with_justification(info)).with_resolver(MonospaceResolver)
}

#[test]
fn justify_to_a_wider_width() {
    let layout =
        TextLayout::from_paragraph(&paragraph("0123456789", 10.0), &unlimited_context()).unwrap();
    assert_close(layout.advance(), 100.0);
    let justified = layout.justified(150.0).unwrap();
    assert!(justified.is_justified());
    assert_close(justified.advance(), 150.0);
    assert_eq!(justified.char_count(), 10);
    // The first character keeps its left edge.
    assert_close(justified.line().char_x_position(0), 0.0);
}

#[test]
fn justify_to_a_narrower_width() {
    let layout =
        TextLayout::from_paragraph(&paragraph("0123456789", 10.0), &unlimited_context()).unwrap();
    let justified = layout.justified(91.0).unwrap();
    assert_close(justified.advance(), 91.0);
}

#[test]
fn justify_to_the_current_width_changes_nothing() {
    let layout = layout("a b c", 10.0);
    let justified = layout.justified(layout.advance()).unwrap();
    assert_close(justified.advance(), layout.advance());
    for index in 0..layout.char_count() {
        assert_close(
            justified.line().char_x_position(index),
            layout.line().char_x_position(index),
        );
    }
}

#[test]
fn spaces_take_the_extra_room() {
    let layout = layout("a b c", 10.0);
    let justified = layout.justified(60.0).unwrap();
    assert_close(justified.advance(), 60.0);
    assert_close(justified.line().char_advance(0), 10.0);
    assert_close(justified.line().char_advance(1), 15.0);
    assert_close(justified.line().char_advance(3), 15.0);
}

#[test]
fn trailing_whitespace_is_left_alone() {
    let layout = layout("a b ", 10.0);
    let justified = layout.justified(50.0).unwrap();
    assert_close(justified.visible_advance(), 50.0);
    assert_close(justified.line().char_advance(3), 10.0);
}

#[test]
fn justification_ratio_scales_the_change() {
    let layout = TextLayout::new(
        "a b c",
        [TextAttribute::Size(10.0), TextAttribute::Justification(0.5)],
        &context(),
    )
    .unwrap();
    let justified = layout.justified(60.0).unwrap();
    assert_close(justified.advance(), 55.0);
}

#[test]
fn justified_layouts_cannot_be_justified_again() {
    let justified = layout("a b c", 10.0).justified(60.0).unwrap();
    let err = justified.justified(70.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyJustified);
}

#[test]
fn invalid_widths_are_rejected() {
    let layout = layout("a b c", 10.0);
    for width in [0.0, -5.0, f32::NAN] {
        let err = layout.justified(width).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidWidth);
    }
}
