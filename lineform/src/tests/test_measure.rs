// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use text_primitives::Underline;

use super::utils::{assert_close, context, paragraph};
use crate::{ErrorKind, LineBreakMeasurer, Paragraph, TextAttribute, TextLayout, TextMeasurer};

fn line_texts(measurer: &mut LineBreakMeasurer, width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    while let Some(layout) = measurer.next_layout(width).unwrap() {
        lines.push(layout.line().chars().iter().collect());
    }
    lines
}

#[test]
fn whole_paragraph_fits() {
    let mut measurer = TextMeasurer::new(&paragraph("Hello World", 10.0), context()).unwrap();
    assert_eq!(measurer.line_break_index(0, 110.0).unwrap(), 11);
    assert_close(measurer.advance_between(0, 11).unwrap(), 110.0);
    let layout = measurer.layout(0, 11).unwrap();
    assert_eq!(layout.char_count(), 11);
    assert_close(layout.advance(), 110.0);
}

#[test]
fn break_index_is_the_first_overflowing_character() {
    let mut measurer = TextMeasurer::new(&paragraph("Hello World", 10.0), context()).unwrap();
    assert_eq!(measurer.line_break_index(0, 35.0).unwrap(), 3);
    assert_eq!(measurer.line_break_index(4, 20.0).unwrap(), 6);
    assert_eq!(measurer.line_break_index(0, 5.0).unwrap(), 0);
}

#[test]
fn measured_lines_match_full_layouts() {
    let text = "one two three";
    let mut measurer = TextMeasurer::new(&paragraph(text, 10.0), context()).unwrap();
    let partial = measurer.layout(4, 7).unwrap();
    let whole = TextLayout::from_paragraph(&paragraph("two", 10.0), &context()).unwrap();
    assert_eq!(partial.line().chars(), whole.line().chars());
    assert_close(partial.advance(), whole.advance());
    assert_close(partial.ascent(), whole.ascent());
}

#[test]
fn window_follows_the_lines() {
    let mut measurer =
        TextMeasurer::new(&paragraph("aaa bbb ccc ddd eee", 10.0), context()).unwrap();
    measurer.layout(0, 4).unwrap();
    assert_eq!(measurer.line_break_index(4, 40.0).unwrap(), 8);
    assert_eq!(measurer.line_break_index(12, 40.0).unwrap(), 16);
    assert_eq!(measurer.line_break_index(16, 100.0).unwrap(), 19);
    // Everything past the estimated window still fits.
    assert_eq!(measurer.line_break_index(4, 1000.0).unwrap(), 19);
}

#[test]
fn measurer_range_errors() {
    let mut measurer = TextMeasurer::new(&paragraph("abc", 10.0), context()).unwrap();
    let err = measurer.line_break_index(3, 10.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IndexOutOfBounds);
    let err = measurer.layout(2, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRange);
    let err = measurer.advance_between(0, 4).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRange);
    let err = TextMeasurer::new(&Paragraph::new(""), context()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyText);
}

#[test]
fn lines_break_at_spaces() {
    let mut measurer =
        LineBreakMeasurer::new(&paragraph("aaa bbb ccc ddd eee", 10.0), context()).unwrap();
    assert_eq!(
        line_texts(&mut measurer, 40.0),
        ["aaa ", "bbb ", "ccc ", "ddd ", "eee"]
    );
    assert_eq!(measurer.position(), 19);
    assert_eq!(measurer.next_layout(40.0).unwrap(), None);
}

#[test]
fn long_words_are_split_unless_whole_words_are_required() {
    let mut measurer = LineBreakMeasurer::new(&paragraph("Hello World", 10.0), context()).unwrap();
    assert_eq!(measurer.next_offset_limited(30.0, 11, true).unwrap(), 0);
    assert!(measurer.next_layout_limited(30.0, 11, true).unwrap().is_none());
    assert_eq!(measurer.next_offset(30.0).unwrap(), 3);
    let layout = measurer.next_layout(30.0).unwrap().unwrap();
    assert_eq!(layout.char_count(), 3);
    assert_eq!(measurer.position(), 3);
}

#[test]
fn offset_limit_cuts_the_line() {
    let mut measurer = LineBreakMeasurer::new(&paragraph("Hello World", 10.0), context()).unwrap();
    assert_eq!(measurer.next_offset_limited(200.0, 4, false).unwrap(), 4);
    measurer.set_position(6).unwrap();
    assert_eq!(measurer.next_offset(200.0).unwrap(), 11);
    let err = measurer.set_position(12).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IndexOutOfBounds);
}

#[test]
fn insert_matches_a_fresh_measurer() {
    let mut original = paragraph("aaaabbbb", 10.0);
    original
        .try_apply_attribute(4..8, TextAttribute::Underline(Underline::Single))
        .unwrap();
    let edited = original.insert_char(2, 'x').unwrap();

    let mut measurer = TextMeasurer::new(&original, context()).unwrap();
    measurer.layout(0, 8).unwrap();
    measurer.insert_char(&edited, 2).unwrap();
    let mut fresh = TextMeasurer::new(&edited, context()).unwrap();

    assert_eq!(measurer.chars(), fresh.chars());
    assert_eq!(measurer.layout(0, 9).unwrap(), fresh.layout(0, 9).unwrap());
    assert_eq!(measurer.line_break_index(0, 45.0).unwrap(), 4);
}

#[test]
fn inserting_right_to_left_text_reanalyzes() {
    let original = paragraph("abc", 10.0);
    let edited = original.insert_char(3, '\u{5D0}').unwrap();
    let mut measurer = TextMeasurer::new(&original, context()).unwrap();
    measurer.insert_char(&edited, 3).unwrap();
    let layout = measurer.layout(0, 4).unwrap();
    assert_eq!(layout.character_level(3).unwrap(), 1);
    assert!(layout.is_left_to_right());
}

#[test]
fn insert_past_the_end_reports_the_measured_length() {
    let original = paragraph("abc", 10.0);
    let edited = original.insert_char(3, 'd').unwrap();
    let mut measurer = TextMeasurer::new(&original, context()).unwrap();
    let err = measurer.insert_char(&edited, 5).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IndexOutOfBounds);
    assert_eq!(err.start(), 5);
    assert_eq!(err.len(), 3);
    assert_eq!(measurer.chars(), &['a', 'b', 'c']);
}

#[test]
fn delete_matches_a_fresh_measurer() {
    let original = paragraph("abcd", 10.0);
    let edited = original.delete_char(1).unwrap();
    let mut measurer = TextMeasurer::new(&original, context()).unwrap();
    measurer.delete_char(&edited, 1).unwrap();
    assert_eq!(measurer.chars(), &['a', 'c', 'd']);
    assert_close(measurer.layout(0, 3).unwrap().advance(), 30.0);
}

#[test]
fn deleting_the_last_character_fails() {
    let original = paragraph("a", 10.0);
    let edited = original.delete_char(0).unwrap();
    let mut measurer = TextMeasurer::new(&original, context()).unwrap();
    let err = measurer.delete_char(&edited, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyText);
    assert_eq!(measurer.chars(), &['a']);
}

#[test]
fn unrelated_paragraph_is_measured_from_scratch() {
    let original = paragraph("abc", 10.0);
    let replacement = paragraph("wxyz!", 10.0);
    let mut measurer = TextMeasurer::new(&original, context()).unwrap();
    measurer.insert_char(&replacement, 1).unwrap();
    assert_eq!(measurer.chars(), replacement.chars());
}

#[test]
fn line_break_measurer_edits_restart_at_the_top() {
    let original = paragraph("aaa bbb", 10.0);
    let mut measurer = LineBreakMeasurer::new(&original, context()).unwrap();
    assert_eq!(line_texts(&mut measurer, 40.0), ["aaa ", "bbb"]);
    let edited = original.insert_char(7, 'b').unwrap();
    measurer.insert_char(&edited, 7).unwrap();
    assert_eq!(measurer.position(), 0);
    assert_eq!(line_texts(&mut measurer, 40.0), ["aaa ", "bbbb"]);
    let edited = edited.delete_char(0).unwrap();
    measurer.delete_char(&edited, 0).unwrap();
    assert_eq!(line_texts(&mut measurer, 40.0), ["aa ", "bbbb"]);
}
