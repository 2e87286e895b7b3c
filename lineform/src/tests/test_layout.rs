// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use numeric_shaping::{DigitRange, NumericShaper};
use peniko::kurbo::{Affine, Rect, Shape};
use text_primitives::{Baseline, FontPosture};

use super::utils::{assert_close, assert_rect_close, context, layout, paragraph};
use crate::{ErrorKind, GraphicReplacement, TextAttribute, TextHit, TextLayout};

#[test]
fn metrics_of_a_plain_line() {
    let layout = layout("Hello", 10.0);
    assert_eq!(layout.char_count(), 5);
    assert_close(layout.ascent(), 8.0);
    assert_close(layout.descent(), 2.0);
    assert_close(layout.leading(), 0.0);
    assert_close(layout.advance(), 50.0);
    assert_close(layout.visible_advance(), 50.0);
    assert_eq!(layout.baseline(), Baseline::Roman);
    let offsets = layout.baseline_offsets();
    assert_close(offsets[1], -3.0);
    assert_close(offsets[2], -6.0);
    assert!(layout.is_left_to_right());
    assert!(!layout.is_justified());
}

#[test]
fn trailing_whitespace_is_not_visible() {
    let layout = layout("ab  ", 10.0);
    assert_close(layout.advance(), 40.0);
    assert_close(layout.visible_advance(), 20.0);
}

#[test]
fn mixed_sizes_take_the_largest_extents() {
    let mut paragraph = paragraph("abcd", 10.0);
    paragraph
        .try_apply_attribute(2..4, TextAttribute::Size(20.0))
        .unwrap();
    let layout = TextLayout::from_paragraph(&paragraph, &context()).unwrap();
    assert_close(layout.ascent(), 16.0);
    assert_close(layout.descent(), 4.0);
    assert_close(layout.advance(), 60.0);
    assert_close(layout.line().char_x_position(3), 40.0);
}

#[test]
fn graphic_replacement_sits_on_the_baseline() {
    let mut paragraph = paragraph("a\u{FFFC}b", 10.0);
    let graphic = GraphicReplacement::new(12.0, 0.0, 7.0, Baseline::Roman);
    paragraph
        .try_apply_attribute(1..2, TextAttribute::Replacement(graphic))
        .unwrap();
    let layout = TextLayout::from_paragraph(&paragraph, &context()).unwrap();
    assert_close(layout.ascent(), 12.0);
    assert_close(layout.descent(), 2.0);
    assert_close(layout.advance(), 27.0);
    assert_close(layout.line().char_x_position(2), 17.0);
}

#[test]
fn empty_text_is_rejected() {
    let err = TextLayout::new("", [], &context()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyText);
}

#[test]
fn attributes_apply_to_the_whole_text() {
    let layout = TextLayout::new("abc", [TextAttribute::Size(20.0)], &context()).unwrap();
    assert_close(layout.advance(), 60.0);
}

#[test]
fn numeric_shaping_rewrites_digits() {
    let shaper = NumericShaper::unconditional(DigitRange::Thai);
    let layout = TextLayout::new("a12", [TextAttribute::NumericShaping(shaper)], &context()).unwrap();
    assert_eq!(layout.line().chars(), &['a', '\u{E51}', '\u{E52}']);
}

#[test]
fn bounds_cover_the_glyphs() {
    let layout = layout("Hello", 10.0);
    assert_rect_close(layout.natural_bounds(), Rect::new(0.0, -8.0, 50.0, 2.0));
    assert_rect_close(layout.bounds(), Rect::new(0.0, -8.0, 50.0, 2.0));
}

#[test]
fn slanted_text_widens_natural_bounds() {
    let layout = TextLayout::new(
        "ab",
        [
            TextAttribute::Size(10.0),
            TextAttribute::Posture(FontPosture::from_slope(0.25)),
        ],
        &context(),
    )
    .unwrap();
    let bounds = layout.natural_bounds();
    assert_close(bounds.x0 as f32, -0.5);
    assert_close(bounds.x1 as f32, 22.0);
}

#[test]
fn outline_is_transformed() {
    let layout = layout("Hello", 10.0);
    let outline = layout.outline(Affine::translate((5.0, 1.0)));
    assert_rect_close(outline.bounding_box(), Rect::new(5.0, -7.0, 55.0, 3.0));
}

#[test]
fn baseline_transform_creates_a_layout_path() {
    assert!(layout("Hello", 10.0).layout_path().is_none());
    let layout = TextLayout::new(
        "Hello",
        [
            TextAttribute::Size(10.0),
            TextAttribute::Transform(Affine::translate((0.0, 4.0))),
        ],
        &context(),
    )
    .unwrap();
    assert!(layout.layout_path().is_some());
}

#[test]
fn hit_testing_picks_the_nearest_edge() {
    let layout = layout("Hello World", 10.0);
    assert_eq!(layout.hit_test_char(52.0, 0.0), TextHit::leading(5));
    assert_eq!(layout.hit_test_char(58.0, 0.0), TextHit::trailing(5));
    assert_eq!(layout.hit_test_char(1.0, -4.0), TextHit::leading(0));
}

#[test]
fn hit_testing_outside_the_line() {
    let layout = layout("Hello World", 10.0);
    assert_eq!(layout.hit_test_char(1000.0, 0.0), TextHit::trailing(10));
    assert_eq!(layout.hit_test_char(-5.0, 0.0), TextHit::leading(0));
}

#[test]
fn hit_testing_each_character_start() {
    let layout = layout("Lorem ipsum", 10.0);
    for index in 0..layout.char_count() {
        let x = layout.line().char_x_position(index) + 1.0;
        assert_eq!(
            layout.hit_test_char(x, 0.0),
            TextHit::leading(index as isize),
            "character {index}"
        );
    }
}

#[test]
fn hit_testing_exact_character_edges() {
    let layout = layout("Hello World", 10.0);
    assert_eq!(layout.hit_test_char(10.0, 0.0), TextHit::leading(1));
    for index in 0..layout.char_count() {
        let x = layout.line().char_x_position(index);
        assert_eq!(
            layout.hit_test_char(x, 0.0),
            TextHit::leading(index as isize),
            "character {index}"
        );
    }
}

#[test]
fn character_levels_cover_the_ends() {
    let layout = layout("abc", 10.0);
    assert_eq!(layout.character_level(-1).unwrap(), 0);
    assert_eq!(layout.character_level(3).unwrap(), 0);
    let err = layout.character_level(4).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidHit);
}

#[test]
fn black_box_bounds_follow_the_characters() {
    let layout = layout("Hello", 10.0);
    let bounds = layout.black_box_bounds(1, 3).unwrap().bounding_box();
    assert_rect_close(bounds, Rect::new(10.0, -8.0, 30.0, 2.0));
    let err = layout.black_box_bounds(0, 6).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRange);
}

#[test]
fn display_and_equality() {
    let first = layout("Hello", 10.0);
    let second = layout("Hello", 10.0);
    assert_eq!(first, second);
    assert_ne!(first, layout("Hellp", 10.0));
    assert!(first.to_string().starts_with("TextLayout(\"Hello\", advance: 50"));
}
