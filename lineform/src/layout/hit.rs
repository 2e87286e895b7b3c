// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use peniko::kurbo::{Point, Rect};

use super::TextLayout;

/// One edge of a character.
///
/// `char_index` ranges over `-1..=len`: `trailing(-1)` and `leading(len)` are the hits before
/// the first and after the last character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextHit {
    char_index: isize,
    leading: bool,
}

impl TextHit {
    /// The leading edge of the character at `char_index`.
    pub fn leading(char_index: isize) -> Self {
        Self {
            char_index,
            leading: true,
        }
    }

    /// The trailing edge of the character at `char_index`.
    pub fn trailing(char_index: isize) -> Self {
        Self {
            char_index,
            leading: false,
        }
    }

    /// The hit on the character after the insertion offset `offset`.
    pub fn after_offset(offset: isize) -> Self {
        Self::leading(offset)
    }

    /// The hit on the character before the insertion offset `offset`.
    pub fn before_offset(offset: isize) -> Self {
        Self::trailing(offset - 1)
    }

    /// Index of the character hit.
    pub fn char_index(&self) -> isize {
        self.char_index
    }

    /// Whether the leading edge was hit.
    pub fn is_leading(&self) -> bool {
        self.leading
    }

    /// The insertion offset this hit corresponds to.
    pub fn insertion_index(&self) -> isize {
        if self.leading {
            self.char_index
        } else {
            self.char_index + 1
        }
    }

    /// The hit on the other side of the same insertion offset.
    #[must_use]
    pub fn other_hit(&self) -> Self {
        if self.leading {
            Self::trailing(self.char_index - 1)
        } else {
            Self::leading(self.char_index + 1)
        }
    }

    /// The same edge of the character `delta` positions away.
    #[must_use]
    pub fn offset_hit(&self, delta: isize) -> Self {
        Self {
            char_index: self.char_index + delta,
            leading: self.leading,
        }
    }
}

impl fmt::Display for TextHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edge = if self.leading { 'L' } else { 'T' };
        write!(f, "TextHit[{}{edge}]", self.char_index)
    }
}

/// Chooses which of two hits at one insertion offset is the strong one.
pub trait CaretPolicy {
    /// Returns `hit1` or `hit2`.
    fn strong_caret(&self, hit1: TextHit, hit2: TextHit, layout: &TextLayout) -> TextHit;
}

/// The lower bidi level wins; on a tie the leading edge wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultCaretPolicy;

impl CaretPolicy for DefaultCaretPolicy {
    fn strong_caret(&self, hit1: TextHit, hit2: TextHit, layout: &TextLayout) -> TextHit {
        layout.strong_hit(hit1, hit2)
    }
}

impl TextLayout {
    /// The stronger of two hits under the default policy.
    pub fn strong_hit(&self, hit1: TextHit, hit2: TextHit) -> TextHit {
        let level1 = self.level_at(hit1.char_index());
        let level2 = self.level_at(hit2.char_index());
        if level1 == level2 {
            if hit2.is_leading() && !hit1.is_leading() {
                hit2
            } else {
                hit1
            }
        } else if level1 < level2 {
            hit1
        } else {
            hit2
        }
    }

    /// The hit closest to the point `(x, y)`, measured against the natural bounds.
    pub fn hit_test_char(&self, x: f32, y: f32) -> TextHit {
        self.hit_test_char_in(x, y, self.natural_bounds())
    }

    /// The hit closest to the point `(x, y)`.
    ///
    /// Points left or right of `bounds` hit the visual ends of the line. Otherwise the nearest
    /// character centre wins, with horizontal distance counting more than vertical distance,
    /// and the side of its slanted centre line picks the edge. A point exactly between two
    /// centres hits the left edge of the right-hand character.
    pub fn hit_test_char_in(&self, x: f32, y: f32, bounds: Rect) -> TextHit {
        let line = &self.line;
        let (x, y) = match line.layout_path() {
            Some(path) => {
                let (advance, offset) =
                    path.point_to_path(Point::new(f64::from(x), f64::from(y)));
                (advance as f32, offset as f32)
            }
            None => (x, y),
        };
        let len = line.char_count();
        let last = signed(len) - 1;
        let ltr = self.is_left_to_right();
        if f64::from(x) < bounds.x0 {
            return if ltr {
                TextHit::leading(0)
            } else {
                TextHit::trailing(last)
            };
        }
        if f64::from(x) >= bounds.x1 {
            return if ltr {
                TextHit::trailing(last)
            } else {
                TextHit::leading(0)
            };
        }

        let mut distance = f32::MAX;
        let mut index = 0;
        let mut trail = None;
        let (mut icx, mut icy, mut ia) = (0.0, 0.0, 0.0);
        for i in 0..len {
            if !line.caret_at_offset_is_valid(i) {
                continue;
            }
            if trail.is_none() {
                trail = Some(i);
            }
            let Some(metrics) = line.char_core_metrics(i) else {
                continue;
            };
            let dy = (metrics.descent - metrics.ascent) / 2.0;
            let cy = line.char_y_position(i) + metrics.superscript_offset + dy;
            let cx = line.char_x_position(i) + line.char_advance(i) / 2.0
                - dy * metrics.italic_angle;
            let dx = cx - x;
            let nd = (4.0 * dx * dx + (cy - y) * (cy - y)).sqrt();
            // A point on the boundary between two characters belongs to the one on its right.
            if nd < distance || (nd <= distance && cx > x) {
                distance = nd;
                index = i;
                trail = None;
                icx = cx;
                icy = cy;
                ia = metrics.italic_angle;
            }
        }
        let left = x < icx - (y - icy) * ia;
        if line.is_char_ltr(index) == left {
            TextHit::leading(signed(index))
        } else {
            TextHit::trailing(signed(trail.unwrap_or(len)) - 1)
        }
    }
}

pub(crate) fn signed(index: usize) -> isize {
    isize::try_from(index).unwrap_or(isize::MAX)
}
