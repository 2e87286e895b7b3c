// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Splitting attributed text into runs of uniform styling.
//!
//! Attribute spans may overlap freely. The segmenter cuts the text at every span edge and
//! reports, for each piece, the spans that cover it.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::Range;

use crate::AttributedText;

/// Scratch storage for [`AttributeSegments`].
///
/// Keep one around when segmenting many paragraphs so the buffers are only allocated once.
#[derive(Clone, Debug, Default)]
pub struct AttributeSegmentsWorkspace {
    /// Sorted, deduplicated character offsets where some span starts or ends.
    edges: Vec<usize>,
    /// Per attribute: indices into `edges` of its start and end.
    extents: Vec<(usize, usize)>,
    /// Non-empty attributes ordered by their starting edge.
    by_start: Vec<usize>,
    active: Vec<usize>,
}

impl AttributeSegmentsWorkspace {
    /// Create a workspace with no retained storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start segmenting `text`, reusing this workspace's buffers.
    pub fn segments<'w, 'a, Attr: Debug>(
        &'w mut self,
        text: &'a AttributedText<Attr>,
    ) -> AttributeSegments<'w, 'a, Attr> {
        self.reset(text);
        AttributeSegments {
            text,
            workspace: self,
            segment: 0,
            started: 0,
        }
    }

    fn reset<Attr: Debug>(&mut self, text: &AttributedText<Attr>) {
        self.edges.clear();
        self.extents.clear();
        self.by_start.clear();
        self.active.clear();
        if text.is_empty() {
            return;
        }

        self.edges.extend([0, text.len()]);
        self.edges.extend(
            text.attributes_iter()
                .flat_map(|(range, _)| [range.start, range.end]),
        );
        self.edges.sort_unstable();
        self.edges.dedup();

        let edges = &self.edges;
        let edge_of = |offset: usize| edges.binary_search(&offset).unwrap_or(edges.len());
        for (range, _) in text.attributes_iter() {
            self.extents.push((edge_of(range.start), edge_of(range.end)));
        }
        self.by_start.extend(
            self.extents
                .iter()
                .enumerate()
                .filter(|(_, (start, end))| start < end)
                .map(|(id, _)| id),
        );
        // Stable, so ties stay in application order.
        let extents = &self.extents;
        self.by_start.sort_by_key(|&id| extents[id].0);
    }
}

/// Iterator over the uniformly styled pieces of an [`AttributedText`].
///
/// Yields non-empty character ranges that tile the text in order. After each call to `next`,
/// [`AttributeSegments::active_spans`] lists the spans covering the yielded range.
///
/// # Examples
///
/// ```
/// use attributed_text::{AttributeSegmentsWorkspace, AttributedText, TextRange};
///
/// let mut text = AttributedText::new("weight");
/// text.apply_attribute(TextRange::new(text.chars(), 0..3).unwrap(), "bold");
/// text.apply_attribute(TextRange::new(text.chars(), 2..6).unwrap(), "red");
///
/// let mut workspace = AttributeSegmentsWorkspace::new();
/// let mut segments = workspace.segments(&text);
/// let mut pieces = Vec::new();
/// while let Some(range) = segments.next() {
///     let names: Vec<_> = segments.active_spans().iter().map(|(_, name)| *name).collect();
///     pieces.push((range, names));
/// }
/// assert_eq!(
///     pieces,
///     [(0..2, vec!["bold"]), (2..3, vec!["bold", "red"]), (3..6, vec!["red"])]
/// );
/// ```
///
/// Empty spans never become active, though their position still cuts the text.
#[derive(Debug)]
pub struct AttributeSegments<'w, 'a, Attr: Debug> {
    text: &'a AttributedText<Attr>,
    workspace: &'w mut AttributeSegmentsWorkspace,
    /// Index of the next segment, which starts at `edges[segment]`.
    segment: usize,
    /// How many of `by_start` have been activated.
    started: usize,
}

impl<'a, Attr: Debug> AttributeSegments<'_, 'a, Attr> {
    fn enter_segment(&mut self, segment: usize) {
        let ws = &mut *self.workspace;
        let extents = &ws.extents;
        ws.active.retain(|&id| extents[id].1 > segment);
        let mut added = false;
        while let Some(&id) = ws.by_start.get(self.started) {
            if extents[id].0 > segment {
                break;
            }
            ws.active.push(id);
            self.started += 1;
            added = true;
        }
        if added {
            ws.active.sort_unstable();
        }
    }

    /// The spans covering the range most recently returned by `next`.
    ///
    /// Empty before the first segment and once the iterator is exhausted.
    pub fn active_spans(&self) -> ActiveSpans<'_, 'a, Attr> {
        ActiveSpans {
            ids: &self.workspace.active,
            text: self.text,
        }
    }
}

impl<Attr: Debug> Iterator for AttributeSegments<'_, '_, Attr> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let segment = self.segment;
        let Some(&[start, end]) = self.workspace.edges.get(segment..segment + 2) else {
            self.workspace.active.clear();
            return None;
        };
        self.enter_segment(segment);
        self.segment += 1;
        Some(start..end)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len();
        (remaining, Some(remaining))
    }
}

impl<Attr: Debug> ExactSizeIterator for AttributeSegments<'_, '_, Attr> {
    fn len(&self) -> usize {
        self.workspace.edges.len().saturating_sub(self.segment + 1)
    }
}

/// The spans covering one segment, in the order they were applied.
///
/// Later spans take precedence, so resolve styles by walking this in reverse.
#[derive(Clone, Debug)]
pub struct ActiveSpans<'s, 'a, Attr: Debug> {
    ids: &'s [usize],
    text: &'a AttributedText<Attr>,
}

impl<'s, 'a, Attr: Debug> ActiveSpans<'s, 'a, Attr> {
    /// Iterate over `(range, attribute)` pairs in application order.
    pub fn iter(&self) -> ActiveSpansIter<'s, 'a, Attr> {
        ActiveSpansIter {
            ids: self.ids.iter(),
            text: self.text,
        }
    }

    /// Whether no span covers the segment.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of covering spans.
    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

impl<'s, 'a, Attr: Debug> IntoIterator for &ActiveSpans<'s, 'a, Attr> {
    type Item = (&'a Range<usize>, &'a Attr);
    type IntoIter = ActiveSpansIter<'s, 'a, Attr>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator returned by [`ActiveSpans::iter`].
#[derive(Clone, Debug)]
pub struct ActiveSpansIter<'s, 'a, Attr: Debug> {
    ids: core::slice::Iter<'s, usize>,
    text: &'a AttributedText<Attr>,
}

impl<'a, Attr: Debug> Iterator for ActiveSpansIter<'_, 'a, Attr> {
    type Item = (&'a Range<usize>, &'a Attr);

    fn next(&mut self) -> Option<Self::Item> {
        self.ids
            .next()
            .and_then(|&id| self.text.attribute_at_idx(id))
    }
}

impl<Attr: Debug> DoubleEndedIterator for ActiveSpansIter<'_, '_, Attr> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ids
            .next_back()
            .and_then(|&id| self.text.attribute_at_idx(id))
    }
}
