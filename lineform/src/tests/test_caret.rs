// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::kurbo::{Rect, Shape};
use text_primitives::FontPosture;

use super::utils::{assert_close, assert_rect_close, context, layout};
use crate::{DefaultCaretPolicy, ErrorKind, TextAttribute, TextHit, TextLayout};

#[test]
fn carets_round_trip() {
    for text in ["Hello", "ab\u{5D0}\u{5D1}f", "\u{5D0}\u{5D1} 12 \u{5D2}", "e\u{301}a"] {
        let layout = layout(text, 10.0);
        for caret in 0..=layout.char_count() {
            let hit = layout.caret_to_hit(caret);
            assert_eq!(layout.hit_to_caret(hit), caret, "{text:?} caret {caret}");
        }
    }
}

#[test]
fn hits_past_the_ends_map_to_line_ends() {
    let layout = layout("abc", 10.0);
    assert_eq!(layout.hit_to_caret(TextHit::trailing(-1)), 0);
    assert_eq!(layout.hit_to_caret(TextHit::leading(3)), 3);
    assert_eq!(layout.caret_to_hit(0), TextHit::trailing(-1));
    assert_eq!(layout.caret_to_hit(3), TextHit::leading(3));
    assert_eq!(layout.caret_to_hit(1), TextHit::leading(1));
}

#[test]
fn caret_info_of_upright_text() {
    let layout = layout("abc", 10.0);
    let [x, slope] = layout.caret_info(TextHit::leading(1)).unwrap();
    assert_close(x, 10.0);
    assert_close(slope, 0.0);
    let [x, _] = layout.caret_info(TextHit::trailing(2)).unwrap();
    assert_close(x, 30.0);
}

#[test]
fn caret_info_of_slanted_text() {
    let layout = TextLayout::new(
        "ab",
        [
            TextAttribute::Size(10.0),
            TextAttribute::Posture(FontPosture::from_slope(0.25)),
        ],
        &context(),
    )
    .unwrap();
    let [x, slope] = layout.caret_info(TextHit::leading(0)).unwrap();
    assert_close(x, 0.0);
    assert_close(slope, 0.25);
    // The caret leans right towards the top of the line.
    let caret = layout.caret_shape(TextHit::leading(0)).unwrap();
    assert_rect_close(caret.bounding_box(), Rect::new(-0.5, -8.0, 2.0, 2.0));
}

#[test]
fn invalid_hits_are_rejected() {
    let layout = layout("abc", 10.0);
    let err = layout.caret_info(TextHit::leading(5)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidHit);
    let err = layout.caret_shape(TextHit::trailing(-2)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidHit);
    let err = layout.caret_shapes(4, &DefaultCaretPolicy).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IndexOutOfBounds);
}

#[test]
fn caret_shape_spans_the_bounds() {
    let layout = layout("abc", 10.0);
    let bounds = Rect::new(0.0, -20.0, 30.0, 5.0);
    let caret = layout.caret_shape_in(TextHit::leading(2), bounds).unwrap();
    assert_rect_close(caret.bounding_box(), Rect::new(20.0, -20.0, 20.0, 5.0));
}

#[test]
fn single_caret_inside_a_run() {
    let layout = layout("abc", 10.0);
    let shapes = layout.caret_shapes(1, &DefaultCaretPolicy).unwrap();
    assert!(shapes.weak.is_none());
    assert_close(shapes.strong.bounding_box().x0 as f32, 10.0);
}

#[test]
fn split_caret_at_a_direction_boundary() {
    let layout = layout("ab\u{5D0}\u{5D1}f", 10.0);
    let shapes = layout.caret_shapes(2, &DefaultCaretPolicy).unwrap();
    // The strong caret follows the left-to-right "b".
    assert_close(shapes.strong.bounding_box().x0 as f32, 20.0);
    let weak = shapes.weak.expect("direction boundary has two carets");
    assert_close(weak.bounding_box().x0 as f32, 40.0);
}

#[test]
fn strong_hit_prefers_lower_levels() {
    let layout = layout("ab\u{5D0}\u{5D1}f", 10.0);
    let strong = layout.strong_hit(TextHit::leading(2), TextHit::trailing(1));
    assert_eq!(strong, TextHit::trailing(1));
    let plain = self::layout("abc", 10.0);
    assert_eq!(
        plain.strong_hit(TextHit::trailing(0), TextHit::leading(1)),
        TextHit::leading(1)
    );
}

#[test]
fn arrow_keys_walk_the_carets() {
    let layout = layout("abc", 10.0);
    let mut hit = TextHit::leading(0);
    let mut carets = vec![layout.hit_to_caret(hit)];
    while let Some(next) = layout.next_right_hit(hit).unwrap() {
        hit = next;
        carets.push(layout.hit_to_caret(hit));
    }
    assert_eq!(carets, [0, 1, 2, 3]);
    assert_eq!(layout.next_left_hit(TextHit::leading(0)).unwrap(), None);
    assert_eq!(
        layout.next_left_hit(TextHit::leading(2)).unwrap(),
        Some(TextHit::leading(1))
    );
}

#[test]
fn arrow_keys_skip_combining_marks() {
    let layout = layout("e\u{301}a", 10.0);
    assert!(!layout.caret_is_valid(1));
    assert_eq!(
        layout.next_right_hit(TextHit::leading(0)).unwrap(),
        Some(TextHit::leading(2))
    );
    assert_eq!(
        layout.next_left_hit(TextHit::leading(2)).unwrap(),
        Some(TextHit::trailing(-1))
    );
}

#[test]
fn arrow_keys_from_an_offset() {
    let layout = layout("abc", 10.0);
    let next = layout.next_right_hit_from(1, &DefaultCaretPolicy).unwrap();
    assert_eq!(next.map(|hit| hit.insertion_index()), Some(2));
    let previous = layout.next_left_hit_from(1, &DefaultCaretPolicy).unwrap();
    assert_eq!(previous.map(|hit| hit.insertion_index()), Some(0));
    assert_eq!(layout.next_left_hit_from(0, &DefaultCaretPolicy).unwrap(), None);
}

#[test]
fn visual_other_hit_shares_the_position() {
    let layout = layout("abc", 10.0);
    assert_eq!(layout.visual_other_hit(TextHit::leading(1)), TextHit::trailing(0));
    assert_eq!(layout.visual_other_hit(TextHit::trailing(0)), TextHit::leading(1));
    for caret in 0..=layout.char_count() {
        let hit = layout.caret_to_hit(caret);
        assert_eq!(layout.hit_to_caret(layout.visual_other_hit(hit)), caret);
    }
}
