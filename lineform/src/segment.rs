// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segmentation of a paragraph into decoration runs and render unit runs.

use crate::shape::FontResolver;
use crate::style::{Decoration, Font, GraphicReplacement, Paragraph, TextStyle};

/// What a run of characters is drawn with.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderUnit {
    /// Glyphs from a font.
    Font(Font),
    /// A graphic repeated for every character.
    Graphic(GraphicReplacement),
}

impl RenderUnit {
    /// The unit a character with `style` is drawn with.
    ///
    /// A graphic replacement wins, then a font named by the style, then the resolver's choice
    /// for `ch`.
    fn for_char(style: &TextStyle, ch: char, resolver: &dyn FontResolver) -> Self {
        if let Some(graphic) = &style.replacement {
            return Self::Graphic(graphic.clone());
        }
        if let Some(font) = style.explicit_font() {
            return Self::Font(font);
        }
        let font = resolver.font(resolver.font_index(ch), style);
        Self::Font(font.with_transform(style.transform))
    }
}

/// A partition of `0..len` into runs of equal values.
#[derive(Clone, Debug, PartialEq)]
pub enum Runs<T> {
    /// One value covering everything.
    Single(T),
    /// Several runs; `starts` is strictly increasing, begins at zero and ends with the length.
    Multiple {
        /// Run starts followed by the total length.
        starts: Vec<usize>,
        /// One value per run; adjacent values differ.
        values: Vec<T>,
    },
}

impl<T: PartialEq> Runs<T> {
    fn build(items: impl IntoIterator<Item = (usize, T)>, len: usize, fallback: T) -> Self {
        let mut starts = Vec::new();
        let mut values: Vec<T> = Vec::new();
        for (start, value) in items {
            if values.last() != Some(&value) {
                starts.push(start);
                values.push(value);
            }
        }
        if values.len() <= 1 {
            return Self::Single(values.pop().unwrap_or(fallback));
        }
        starts.push(len);
        Self::Multiple { starts, values }
    }

    /// Number of runs.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multiple { values, .. } => values.len(),
        }
    }

    /// Always `false`; a partition has at least one run.
    pub fn is_empty(&self) -> bool {
        false
    }

    fn run_index(&self, index: usize) -> usize {
        match self {
            Self::Single(_) => 0,
            Self::Multiple { starts, values } => starts
                .partition_point(|&start| start <= index)
                .saturating_sub(1)
                .min(values.len() - 1),
        }
    }

    /// The value of the run containing `index`.
    pub fn value_at(&self, index: usize) -> &T {
        match self {
            Self::Single(value) => value,
            Self::Multiple { values, .. } => &values[self.run_index(index)],
        }
    }

    /// End of the run containing `index`, given the partition covers `0..len`.
    pub fn limit(&self, index: usize, len: usize) -> usize {
        match self {
            Self::Single(_) => len,
            Self::Multiple { starts, .. } => starts[self.run_index(index) + 1],
        }
    }

    /// Start of every run.
    pub fn starts(&self) -> Vec<usize> {
        match self {
            Self::Single(_) => vec![0],
            Self::Multiple { starts, .. } => starts[..starts.len() - 1].to_vec(),
        }
    }

    fn shift_after(&mut self, pos: usize, insert: bool) {
        if let Self::Multiple { starts, .. } = self {
            for start in starts.iter_mut().rev() {
                if *start <= pos {
                    break;
                }
                if insert {
                    *start += 1;
                } else {
                    *start -= 1;
                }
            }
        }
    }
}

/// A paragraph split into decoration runs and render unit runs.
///
/// The two partitions are independent; a styled run is a range over which both are constant.
#[derive(Clone, Debug, PartialEq)]
pub struct StyledParagraph {
    len: usize,
    decorations: Runs<Decoration>,
    units: Runs<RenderUnit>,
}

impl StyledParagraph {
    /// Segments `paragraph`, resolving fonts for unstyled text through `resolver`.
    pub fn new(paragraph: &Paragraph, resolver: &dyn FontResolver) -> Self {
        let chars = paragraph.chars();
        let mut decorations = Vec::new();
        let mut units = Vec::new();
        for (range, style) in TextStyle::runs(paragraph) {
            decorations.push((range.start, style.decoration()));
            if style.replacement.is_some() || style.explicit_font().is_some() {
                let unit = RenderUnit::for_char(&style, chars[range.start], resolver);
                units.push((range.start, unit));
                continue;
            }
            // Group code points by resolved font.
            let mut start = range.start;
            while start < range.end {
                let index = resolver.font_index(chars[start]);
                let end = (start + 1..range.end)
                    .find(|&i| resolver.font_index(chars[i]) != index)
                    .unwrap_or(range.end);
                let font = resolver.font(index, &style).with_transform(style.transform);
                units.push((start, RenderUnit::Font(font)));
                start = end;
            }
        }
        let len = chars.len();
        let fallback_font = resolver.font(0, &TextStyle::default());
        Self {
            len,
            decorations: Runs::build(decorations, len, Decoration::PLAIN),
            units: Runs::build(units, len, RenderUnit::Font(fallback_font)),
        }
    }

    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the paragraph is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The segmentation after the character at `pos` of `paragraph` was inserted.
    ///
    /// When the new character continues the runs around it, run starts past the insertion point
    /// move up by one; otherwise the paragraph is segmented again.
    pub fn insert_char(
        &self,
        paragraph: &Paragraph,
        pos: usize,
        resolver: &dyn FontResolver,
    ) -> Self {
        let Some(ch) = paragraph.char_at(pos) else {
            return Self::new(paragraph, resolver);
        };
        if paragraph.len() != self.len + 1 {
            return Self::new(paragraph, resolver);
        }
        let relative = pos.saturating_sub(1);
        let style = TextStyle::at(paragraph, pos);
        if *self.decorations.value_at(relative) != style.decoration()
            || *self.units.value_at(relative) != RenderUnit::for_char(&style, ch, resolver)
        {
            log::debug!("insert at {pos} changes style runs, segmenting again");
            return Self::new(paragraph, resolver);
        }
        let mut patched = self.clone();
        patched.len += 1;
        patched.decorations.shift_after(relative, true);
        patched.units.shift_after(relative, true);
        patched
    }

    /// The segmentation after the character at `pos` was removed, giving `paragraph`.
    ///
    /// Run starts past `pos` move down by one, unless the removed character was a run on its
    /// own, in which case the paragraph is segmented again.
    pub fn delete_char(
        &self,
        paragraph: &Paragraph,
        pos: usize,
        resolver: &dyn FontResolver,
    ) -> Self {
        if pos >= self.len || paragraph.len() + 1 != self.len {
            return Self::new(paragraph, resolver);
        }
        let single = matches!(
            (&self.decorations, &self.units),
            (Runs::Single(_), Runs::Single(_))
        );
        if !single
            && self.run_limit(pos) == pos + 1
            && (pos == 0 || self.run_limit(pos - 1) == pos)
        {
            log::debug!("delete at {pos} removes a whole run, segmenting again");
            return Self::new(paragraph, resolver);
        }
        let mut patched = self.clone();
        patched.len -= 1;
        patched.decorations.shift_after(pos, false);
        patched.units.shift_after(pos, false);
        patched
    }

    /// End of the styled run containing `index`.
    pub fn run_limit(&self, index: usize) -> usize {
        self.decorations
            .limit(index, self.len)
            .min(self.units.limit(index, self.len))
    }

    /// Decoration at `index`.
    pub fn decoration_at(&self, index: usize) -> Decoration {
        *self.decorations.value_at(index)
    }

    /// Render unit at `index`.
    pub fn unit_at(&self, index: usize) -> &RenderUnit {
        self.units.value_at(index)
    }

    /// Styled runs: ranges over which both the decoration and the render unit are constant.
    pub fn runs(&self) -> impl Iterator<Item = core::ops::Range<usize>> + '_ {
        let mut start = 0;
        core::iter::from_fn(move || {
            if start >= self.len {
                return None;
            }
            let end = self.run_limit(start);
            let range = start..end;
            start = end;
            Some(range)
        })
    }

    /// Starts of the decoration runs.
    pub fn decoration_starts(&self) -> Vec<usize> {
        self.decorations.starts()
    }

    /// Starts of the render unit runs.
    pub fn unit_starts(&self) -> Vec<usize> {
        self.units.starts()
    }

    /// The decoration partition.
    pub fn decorations(&self) -> &Runs<Decoration> {
        &self.decorations
    }

    /// The render unit partition.
    pub fn units(&self) -> &Runs<RenderUnit> {
        &self.units
    }
}
