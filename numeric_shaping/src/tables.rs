// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::OnceLock;

use icu_properties::CodePointMapData;
use icu_properties::props::BidiClass;

/// Sorted, disjoint, half-open `[start, end)` intervals of strong-directional code points.
fn strong_table() -> &'static [(u32, u32)] {
    static TABLE: OnceLock<Vec<(u32, u32)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let map = CodePointMapData::<BidiClass>::new();
        let mut ranges: Vec<(u32, u32)> = [
            BidiClass::LeftToRight,
            BidiClass::RightToLeft,
            BidiClass::ArabicLetter,
        ]
        .into_iter()
        .flat_map(|class| map.iter_ranges_for_value(class))
        .map(|r| (*r.start(), *r.end() + 1))
        .collect();
        ranges.sort_unstable();
        merge_adjacent(ranges)
    })
}

fn merge_adjacent(ranges: Vec<(u32, u32)>) -> Vec<(u32, u32)> {
    let mut merged: Vec<(u32, u32)> = Vec::with_capacity(ranges.len());
    for (start, end) in ranges {
        match merged.last_mut() {
            Some(last) if last.1 >= start => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

/// A single-slot cache over a sorted interval table.
///
/// Text tends to stay in one script for a while, so the interval (or gap) that answered the
/// previous lookup usually answers the next one too. Each owner keeps its own cursor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntervalCursor {
    /// Index of the first interval whose end is past the last looked-up code point.
    last: usize,
}

impl IntervalCursor {
    /// Creates a cursor positioned at the start of the table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `cp` lies within one of `table`'s intervals.
    ///
    /// `table` must be sorted and disjoint.
    pub fn contains(&mut self, table: &[(u32, u32)], cp: u32) -> bool {
        if !self.is_hit(table, cp) {
            self.last = table.partition_point(|&(_, end)| end <= cp);
        }
        table.get(self.last).is_some_and(|&(start, _)| start <= cp)
    }

    fn is_hit(&self, table: &[(u32, u32)], cp: u32) -> bool {
        let lower = match self.last.checked_sub(1) {
            Some(prev) => match table.get(prev) {
                Some(&(_, end)) => end,
                None => return false,
            },
            None => 0,
        };
        let upper = table.get(self.last).map_or(u32::MAX, |&(_, end)| end);
        lower <= cp && cp < upper
    }
}

/// Returns `true` if `ch` has a strong bidi class (L, R or AL).
///
/// The cursor caches the last interval consulted; pass the same cursor for consecutive
/// characters of one text.
pub fn is_strong_directional(ch: char, cursor: &mut IntervalCursor) -> bool {
    cursor.contains(strong_table(), u32::from(ch))
}
