// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::hash::{Hash, Hasher};

use crate::{DigitRange, DigitRanges, Error, IntervalCursor, is_strong_directional};

/// Converts ASCII digits (`'0'..='9'`) into the digits of another script.
///
/// Shaping mutates the caller's buffer in place and only ever rewrites ASCII digits, so shaping
/// already-shaped text is a no-op. A contextual shaper also keeps lookup caches, which is why
/// the shaping methods take `&mut self`; equality and hashing ignore them.
#[derive(Clone, Debug)]
pub struct NumericShaper {
    mode: Mode,
    strong_cursor: IntervalCursor,
    /// The range that answered the last block lookup.
    current: DigitRange,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Mode {
    Unconditional(DigitRange),
    Contextual {
        ranges: DigitRanges,
        default: DigitRange,
        /// `ranges` sorted by block start, for lookup by code point.
        lookup: Vec<DigitRange>,
    },
}

impl NumericShaper {
    /// A shaper that maps every digit into `range`.
    pub fn unconditional(range: DigitRange) -> Self {
        Self::with_mode(Mode::Unconditional(range))
    }

    /// A contextual shaper over `ranges`, with European digits before any strong character.
    pub fn contextual(ranges: impl Into<DigitRanges>) -> Self {
        Self::contextual_with_default(ranges, DigitRange::European)
    }

    /// A contextual shaper over `ranges` whose context before any strong character is
    /// `default`.
    ///
    /// When both the basic and extended variants of a script are configured, the extended
    /// variant is used: Eastern Arabic over Arabic, Tai Tham Tham over Tai Tham Hora.
    pub fn contextual_with_default(ranges: impl Into<DigitRanges>, default: DigitRange) -> Self {
        let mut ranges = ranges.into();
        if ranges.contains(DigitRange::EasternArabic) {
            ranges.remove(DigitRange::Arabic);
        }
        if ranges.contains(DigitRange::TaiThamTham) {
            ranges.remove(DigitRange::TaiThamHora);
        }
        let mut lookup: Vec<DigitRange> = ranges.iter().collect();
        lookup.sort_by_key(|r| r.block().start);
        let default = resolve_context(ranges, default);
        Self::with_mode(Mode::Contextual {
            ranges,
            default,
            lookup,
        })
    }

    /// Builds a shaper from its legacy mask.
    ///
    /// With [`DigitRanges::CONTEXTUAL_MASK`] set, the remaining bits are the contextual ranges.
    /// Otherwise exactly one range bit must be set.
    pub fn from_mask(mask: u32) -> Result<Self, Error> {
        let ranges = DigitRanges::from_mask(mask)?;
        if mask & DigitRanges::CONTEXTUAL_MASK != 0 {
            return Ok(Self::contextual(ranges));
        }
        let mut iter = ranges.iter();
        match (iter.next(), iter.next()) {
            (Some(range), None) => Ok(Self::unconditional(range)),
            _ => Err(Error::invalid_mask(mask)),
        }
    }

    fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            strong_cursor: IntervalCursor::new(),
            current: DigitRange::European,
        }
    }

    /// Returns `true` if this shaper follows the script of the surrounding text.
    pub fn is_contextual(&self) -> bool {
        matches!(self.mode, Mode::Contextual { .. })
    }

    /// The ranges this shaper can produce.
    pub fn ranges(&self) -> DigitRanges {
        match &self.mode {
            Mode::Unconditional(range) => (*range).into(),
            Mode::Contextual { ranges, .. } => *ranges,
        }
    }

    /// The legacy mask of this shaper, including the contextual bit.
    ///
    /// Ranges without a legacy bit are not represented.
    pub fn mask(&self) -> u32 {
        match &self.mode {
            Mode::Unconditional(range) => range.legacy_bit().unwrap_or(0),
            Mode::Contextual { ranges, .. } => ranges.mask() | DigitRanges::CONTEXTUAL_MASK,
        }
    }

    /// Shapes every digit in `text`.
    pub fn shape(&mut self, text: &mut [char]) {
        let context = match &self.mode {
            Mode::Unconditional(range) => *range,
            Mode::Contextual { default, .. } => *default,
        };
        self.shape_slice(text, context);
    }

    /// Shapes the digits in `text[start..start + count]`.
    pub fn shape_range(&mut self, text: &mut [char], start: usize, count: usize) -> Result<(), Error> {
        let slice = checked_slice(text, start, count)?;
        self.shape(slice);
        Ok(())
    }

    /// Shapes the digits in `text[start..start + count]`, starting in `context`.
    ///
    /// An unconditional shaper ignores the context. A context that is not one of this shaper's
    /// ranges starts in European digits.
    pub fn shape_with_context(
        &mut self,
        text: &mut [char],
        start: usize,
        count: usize,
        context: DigitRange,
    ) -> Result<(), Error> {
        let slice = checked_slice(text, start, count)?;
        let context = match &self.mode {
            Mode::Unconditional(range) => *range,
            Mode::Contextual { ranges, .. } => resolve_context(*ranges, context),
        };
        self.shape_slice(slice, context);
        Ok(())
    }

    fn shape_slice(&mut self, text: &mut [char], context: DigitRange) {
        let Self {
            mode,
            strong_cursor,
            current,
        } = self;
        match mode {
            Mode::Unconditional(range) => {
                for ch in text.iter_mut() {
                    if let Some(shaped) = range.shape_digit(*ch) {
                        *ch = shaped;
                    }
                }
            }
            Mode::Contextual { lookup, .. } => {
                let mut range = context;
                for ch in text.iter_mut() {
                    if let Some(shaped) = range.shape_digit(*ch) {
                        *ch = shaped;
                        continue;
                    }
                    if is_strong_directional(*ch, strong_cursor) {
                        range = range_for_code_point(lookup, current, u32::from(*ch));
                    }
                }
            }
        }
    }
}

fn checked_slice(text: &mut [char], start: usize, count: usize) -> Result<&mut [char], Error> {
    let len = text.len();
    start
        .checked_add(count)
        .and_then(|end| text.get_mut(start..end))
        .ok_or_else(|| Error::out_of_bounds(start, count, len))
}

/// Maps a requested starting context onto the configured ranges.
fn resolve_context(ranges: DigitRanges, context: DigitRange) -> DigitRange {
    let context = match context {
        DigitRange::Arabic if ranges.contains(DigitRange::EasternArabic) => {
            DigitRange::EasternArabic
        }
        DigitRange::TaiThamHora if ranges.contains(DigitRange::TaiThamTham) => {
            DigitRange::TaiThamTham
        }
        other => other,
    };
    if ranges.contains(context) {
        context
    } else {
        DigitRange::European
    }
}

/// Finds the configured range whose block contains `cp`, falling back to European.
fn range_for_code_point(lookup: &[DigitRange], current: &mut DigitRange, cp: u32) -> DigitRange {
    if current.in_block(cp) {
        return *current;
    }
    let candidates = lookup.partition_point(|r| r.block().start <= cp);
    match lookup[..candidates]
        .iter()
        .filter(|r| r.in_block(cp))
        .min_by_key(|r| r.digit_base())
    {
        Some(&range) => {
            *current = range;
            range
        }
        None => DigitRange::European,
    }
}

impl PartialEq for NumericShaper {
    fn eq(&self, other: &Self) -> bool {
        self.mode == other.mode
    }
}

impl Eq for NumericShaper {}

impl Hash for NumericShaper {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mode.hash(state);
    }
}

impl fmt::Display for NumericShaper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.mode {
            Mode::Unconditional(range) => write!(f, "NumericShaper[{range}]"),
            Mode::Contextual {
                ranges, default, ..
            } => {
                f.write_str("NumericShaper[contextual:")?;
                for (i, range) in ranges.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    write!(f, "{sep}{range}")?;
                }
                write!(f, "; default: {default}]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NumericShaper;
    use crate::{DigitRange, DigitRanges, ErrorKind};

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn unconditional_shapes_every_digit() {
        let mut shaper = NumericShaper::unconditional(DigitRange::Thai);
        let mut text = chars("a1b2");
        shaper.shape(&mut text);
        assert_eq!(text, chars("a\u{0E51}b\u{0E52}"));
        assert!(!shaper.is_contextual());
    }

    #[test]
    fn unconditional_is_idempotent() {
        let mut shaper = NumericShaper::unconditional(DigitRange::Devanagari);
        let mut text = chars("2024");
        shaper.shape(&mut text);
        let once = text.clone();
        shaper.shape(&mut text);
        assert_eq!(text, once);
    }

    #[test]
    fn contextual_follows_last_strong_script() {
        let mut shaper = NumericShaper::contextual(DigitRange::Arabic | DigitRange::Thai);
        let mut text = chars("1 \u{0623} 2");
        shaper.shape(&mut text);
        assert_eq!(text[0], '1');
        assert_eq!(text[4], '\u{0662}');

        let mut text = chars("\u{0E01}3 a4");
        shaper.shape(&mut text);
        assert_eq!(text, chars("\u{0E01}\u{0E53} a4"));
    }

    #[test]
    fn contextual_without_strong_characters_keeps_default() {
        let mut shaper = NumericShaper::contextual(DigitRange::Arabic | DigitRange::Thai);
        let mut text = chars("12 + 34");
        shaper.shape(&mut text);
        assert_eq!(text, chars("12 + 34"));
    }

    #[test]
    fn contextual_default_applies_before_strong_characters() {
        let mut shaper =
            NumericShaper::contextual_with_default(DigitRange::Arabic | DigitRange::Thai, DigitRange::Thai);
        let mut text = chars("5a5");
        shaper.shape(&mut text);
        assert_eq!(text, chars("\u{0E55}a5"));
    }

    #[test]
    fn unsupported_context_falls_back_to_european() {
        let mut shaper = NumericShaper::contextual(DigitRanges::from(DigitRange::Arabic));
        let mut text = chars("\u{0E01}7");
        shaper.shape(&mut text);
        assert_eq!(text, chars("\u{0E01}7"));

        let mut text = chars("9");
        shaper
            .shape_with_context(&mut text, 0, 1, DigitRange::Thai)
            .unwrap();
        assert_eq!(text, chars("9"));
    }

    #[test]
    fn extended_arabic_wins() {
        let mut shaper =
            NumericShaper::contextual(DigitRange::Arabic | DigitRange::EasternArabic);
        assert!(!shaper.ranges().contains(DigitRange::Arabic));
        let mut text = chars("\u{0628}4");
        shaper.shape(&mut text);
        assert_eq!(text[1], '\u{06F4}');

        let mut text = chars("4");
        shaper
            .shape_with_context(&mut text, 0, 1, DigitRange::Arabic)
            .unwrap();
        assert_eq!(text[0], '\u{06F4}');
    }

    #[test]
    fn tai_tham_tham_wins() {
        let shaper =
            NumericShaper::contextual(DigitRange::TaiThamHora | DigitRange::TaiThamTham);
        assert!(shaper.ranges().contains(DigitRange::TaiThamTham));
        assert!(!shaper.ranges().contains(DigitRange::TaiThamHora));
    }

    #[test]
    fn shape_range_only_touches_the_range() {
        let mut shaper = NumericShaper::unconditional(DigitRange::Arabic);
        let mut text = chars("1234");
        shaper.shape_range(&mut text, 1, 2).unwrap();
        assert_eq!(text, chars("1\u{0662}\u{0663}4"));
        let err = shaper.shape_range(&mut text, 3, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        assert!(shaper.shape_range(&mut text, usize::MAX, 2).is_err());
    }

    #[test]
    fn mask_round_trip() {
        let shaper = NumericShaper::from_mask(DigitRanges::CONTEXTUAL_MASK | 0b10).unwrap();
        assert!(shaper.is_contextual());
        assert_eq!(shaper.mask(), DigitRanges::CONTEXTUAL_MASK | 0b10);

        let shaper = NumericShaper::from_mask(1 << 12).unwrap();
        assert_eq!(shaper, NumericShaper::unconditional(DigitRange::Thai));

        let err = NumericShaper::from_mask(0b110).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMask);
        assert!(NumericShaper::from_mask(0).is_err());
    }

    #[test]
    fn equality_ignores_caches() {
        let mut a = NumericShaper::contextual(DigitRange::Arabic | DigitRange::Thai);
        let b = a.clone();
        let mut text = chars("\u{0623}1\u{0E01}2");
        a.shape(&mut text);
        assert_eq!(a, b);
    }

    #[test]
    fn display_lists_ranges() {
        let shaper = NumericShaper::contextual(DigitRange::Arabic | DigitRange::Thai);
        assert_eq!(
            shaper.to_string(),
            "NumericShaper[contextual: ARABIC, THAI; default: EUROPEAN]"
        );
        assert_eq!(
            NumericShaper::unconditional(DigitRange::Lao).to_string(),
            "NumericShaper[LAO]"
        );
    }
}
