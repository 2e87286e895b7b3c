// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// The reference line a run of text is aligned to.
///
/// The first three are the standard baselines carried in a font's baseline table. `Top` and
/// `Bottom` are "floating" alignments used by embedded graphics: the graphic hangs from the top
/// of the line or sits on its bottom, whatever the line's final height turns out to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Baseline {
    /// The alphabetic baseline used by most Latin, Greek and Cyrillic text.
    #[default]
    Roman,
    /// The ideographic centre line.
    Center,
    /// The hanging baseline used by Devanagari and related scripts.
    Hanging,
    /// Align the top of the run with the top of the line.
    Top,
    /// Align the bottom of the run with the bottom of the line.
    Bottom,
}

impl Baseline {
    /// The number of standard (non-floating) baselines.
    pub const STANDARD_COUNT: usize = 3;

    /// Returns the index of this baseline in a standard baseline offset table.
    ///
    /// Floating baselines have no entry and return `None`.
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Roman => Some(0),
            Self::Center => Some(1),
            Self::Hanging => Some(2),
            Self::Top | Self::Bottom => None,
        }
    }

    /// Returns `true` for the alignments that are resolved against the final line height.
    pub fn is_floating(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::Baseline;

    #[test]
    fn standard_baselines_have_indices() {
        assert_eq!(Baseline::Roman.index(), Some(0));
        assert_eq!(Baseline::Center.index(), Some(1));
        assert_eq!(Baseline::Hanging.index(), Some(2));
        assert_eq!(Baseline::Top.index(), None);
        assert!(Baseline::Bottom.is_floating());
        assert!(!Baseline::Hanging.is_floating());
    }
}
