// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// An explicit bidirectional embedding applied to a span of text.
///
/// These map to the Unicode explicit formatting characters (embeddings, overrides and
/// isolates). They are expressed as style properties rather than literal control characters;
/// layout inserts the corresponding controls when it runs the bidi algorithm.
///
/// For background on bidi behavior see UAX #9:
/// <https://www.unicode.org/reports/tr9/>
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum BidiEmbedding {
    /// No explicit embedding.
    #[default]
    None,
    /// Raise the embedding level in the given direction (LRE/RLE).
    Embed(BidiDirection),
    /// Force the direction of every character in the span (LRO/RLO).
    Override(BidiDirection),
    /// Isolate the span from its surroundings (LRI/RLI).
    Isolate(BidiDirection),
}

impl BidiEmbedding {
    /// Returns the control characters that open and close this embedding, if any.
    pub fn controls(self) -> Option<(char, char)> {
        const PDF: char = '\u{202C}';
        const PDI: char = '\u{2069}';
        Some(match self {
            Self::None => return None,
            Self::Embed(BidiDirection::Ltr) => ('\u{202A}', PDF),
            Self::Embed(BidiDirection::Rtl) => ('\u{202B}', PDF),
            Self::Override(BidiDirection::Ltr) => ('\u{202D}', PDF),
            Self::Override(BidiDirection::Rtl) => ('\u{202E}', PDF),
            Self::Isolate(BidiDirection::Ltr) => ('\u{2066}', PDI),
            Self::Isolate(BidiDirection::Rtl) => ('\u{2067}', PDI),
        })
    }

    /// Returns `true` if this embedding pushes right-to-left.
    pub fn is_rtl(self) -> bool {
        matches!(
            self,
            Self::Embed(BidiDirection::Rtl)
                | Self::Override(BidiDirection::Rtl)
                | Self::Isolate(BidiDirection::Rtl)
        )
    }
}

/// Direction choice used by explicit embeddings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BidiDirection {
    /// Left-to-right.
    Ltr,
    /// Right-to-left.
    Rtl,
}

#[cfg(test)]
mod tests {
    use super::{BidiDirection, BidiEmbedding};

    #[test]
    fn none_has_no_controls() {
        assert_eq!(BidiEmbedding::None.controls(), None);
        assert!(!BidiEmbedding::None.is_rtl());
    }

    #[test]
    fn isolates_close_with_pdi() {
        let (open, close) = BidiEmbedding::Isolate(BidiDirection::Rtl)
            .controls()
            .unwrap();
        assert_eq!(open, '\u{2067}');
        assert_eq!(close, '\u{2069}');
    }

    #[test]
    fn overrides_close_with_pdf() {
        let (open, close) = BidiEmbedding::Override(BidiDirection::Ltr)
            .controls()
            .unwrap();
        assert_eq!(open, '\u{202D}');
        assert_eq!(close, '\u{202C}');
    }
}
