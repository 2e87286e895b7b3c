// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A deterministic shaper and font resolver that need no font data.
//!
//! Every character is one em wide, except combining marks which take no space and are not
//! caret stops. Metrics scale with the font size, so layouts can be checked with plain
//! arithmetic.

use std::sync::Arc;

use text_primitives::Baseline;

use crate::component::CoreMetrics;
use crate::justify::JustificationInfo;
use crate::shape::{FontResolver, ShapedChar, ShapedRun, Shaper};
use crate::style::{Font, TextStyle};

/// Shapes every character to a fixed-width cell of the font size.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonospaceShaper {
    justification: Option<JustificationInfo>,
}

impl MonospaceShaper {
    /// A shaper using the default justification behavior of each character.
    pub fn new() -> Self {
        Self::default()
    }

    /// A shaper that gives every spacing character `info`.
    pub fn with_justification(info: JustificationInfo) -> Self {
        Self {
            justification: Some(info),
        }
    }

    /// Vertical metrics for a font of `size` slanted by `angle`.
    pub fn metrics(size: f32, angle: f32) -> CoreMetrics {
        CoreMetrics {
            ascent: size * 0.8,
            descent: size * 0.2,
            leading: 0.0,
            baseline: Baseline::Roman,
            baseline_offsets: [0.0, -size * 0.3, -size * 0.6],
            strikethrough_offset: -size * 0.3,
            strikethrough_thickness: size * 0.05,
            underline_offset: size * 0.1,
            underline_thickness: size * 0.05,
            superscript_offset: 0.0,
            italic_angle: angle,
        }
    }
}

impl Shaper for MonospaceShaper {
    fn shape(&self, font: &Font, chars: &[char], _level: u8) -> ShapedRun {
        let size = font.size();
        let chars = chars
            .iter()
            .map(|&ch| {
                if is_combining_mark(ch) {
                    return ShapedChar::new(0.0).with_caret_stop(false);
                }
                let shaped = ShapedChar::new(size);
                match self.justification {
                    Some(info) => shaped.with_justification(info),
                    None => shaped,
                }
            })
            .collect();
        ShapedRun {
            metrics: Self::metrics(size, font.posture().slope()),
            chars,
        }
    }
}

fn is_combining_mark(ch: char) -> bool {
    matches!(u32::from(ch), 0x0300..=0x036F)
}

/// Resolves Latin text, right-to-left scripts and CJK to three distinct fonts.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonospaceResolver;

impl MonospaceResolver {
    /// Family names by font index.
    pub const FAMILIES: [&'static str; 3] = ["Mono", "Mono RTL", "Mono CJK"];
}

impl FontResolver for MonospaceResolver {
    fn font_index(&self, ch: char) -> usize {
        match u32::from(ch) {
            0x0590..=0x06FF => 1,
            0x3000..=0x9FFF | 0xAC00..=0xD7AF | 0xF900..=0xFAFF => 2,
            _ => 0,
        }
    }

    fn font(&self, index: usize, style: &TextStyle) -> Font {
        let family = Self::FAMILIES.get(index).copied().unwrap_or(Self::FAMILIES[0]);
        style.font_in_family(Arc::from(family))
    }
}

#[cfg(test)]
mod tests {
    use super::{MonospaceResolver, MonospaceShaper};
    use crate::shape::{FontResolver, Shaper};
    use crate::style::{Font, TextStyle};

    #[test]
    fn marks_take_no_space() {
        let run = MonospaceShaper::new().shape(&Font::new("Mono", 10.0), &['e', '\u{301}'], 0);
        assert_eq!(run.chars[0].advance, 10.0);
        assert_eq!(run.chars[1].advance, 0.0);
        assert!(!run.chars[1].caret_stop);
    }

    #[test]
    fn scripts_resolve_to_separate_fonts() {
        let resolver = MonospaceResolver;
        assert_eq!(resolver.font_index('a'), 0);
        assert_eq!(resolver.font_index('\u{5D0}'), 1);
        assert_eq!(resolver.font_index('\u{4E00}'), 2);
        let font = resolver.font(1, &TextStyle::default());
        assert_eq!(font.family(), "Mono RTL");
    }
}
