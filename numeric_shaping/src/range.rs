// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::ops::{BitOr, BitOrAssign};

use crate::Error;

/// A script whose native digits ASCII digits can be shaped into.
///
/// The first nineteen ranges, from [`European`](Self::European) to
/// [`Mongolian`](Self::Mongolian), also have a bit in the legacy integer mask representation
/// (see [`DigitRanges::mask`]); their discriminant is their bit position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum DigitRange {
    /// ASCII digits, the fallback for any unsupported context.
    European = 0,
    /// Arabic-Indic digits.
    Arabic,
    /// Extended (Persian and Urdu) Arabic-Indic digits.
    EasternArabic,
    /// Devanagari digits.
    Devanagari,
    /// Bengali digits.
    Bengali,
    /// Gurmukhi digits.
    Gurmukhi,
    /// Gujarati digits.
    Gujarati,
    /// Oriya digits.
    Oriya,
    /// Tamil digits.
    Tamil,
    /// Telugu digits.
    Telugu,
    /// Kannada digits.
    Kannada,
    /// Malayalam digits.
    Malayalam,
    /// Thai digits.
    Thai,
    /// Lao digits.
    Lao,
    /// Tibetan digits.
    Tibetan,
    /// Myanmar digits.
    Myanmar,
    /// Ethiopic digits. Ethiopic has no zero, so `'0'` is never shaped.
    Ethiopic,
    /// Khmer digits.
    Khmer,
    /// Mongolian digits.
    Mongolian,
    /// N'Ko digits.
    Nko,
    /// Myanmar Shan digits.
    MyanmarShan,
    /// Limbu digits.
    Limbu,
    /// New Tai Lue digits.
    NewTaiLue,
    /// Balinese digits.
    Balinese,
    /// Sundanese digits.
    Sundanese,
    /// Lepcha digits.
    Lepcha,
    /// Ol Chiki digits.
    OlChiki,
    /// Vai digits.
    Vai,
    /// Saurashtra digits.
    Saurashtra,
    /// Kayah Li digits.
    KayahLi,
    /// Cham digits.
    Cham,
    /// Tai Tham Hora digits.
    TaiThamHora,
    /// Tai Tham Tham digits.
    TaiThamTham,
    /// Javanese digits.
    Javanese,
    /// Meetei Mayek digits.
    MeeteiMayek,
}

/// `(first digit, numeric value of first digit, block start, block end)`, indexed by range.
const RANGE_DATA: [(u32, u8, u32, u32); DigitRange::COUNT] = [
    (0x0030, 0, 0x0000, 0x0300),
    (0x0660, 0, 0x0600, 0x0780),
    (0x06F0, 0, 0x0600, 0x0780),
    (0x0966, 0, 0x0900, 0x0980),
    (0x09E6, 0, 0x0980, 0x0A00),
    (0x0A66, 0, 0x0A00, 0x0A80),
    (0x0AE6, 0, 0x0A80, 0x0B00),
    (0x0B66, 0, 0x0B00, 0x0B80),
    (0x0BE6, 0, 0x0B80, 0x0C00),
    (0x0C66, 0, 0x0C00, 0x0C80),
    (0x0CE6, 0, 0x0C80, 0x0D00),
    (0x0D66, 0, 0x0D00, 0x0D80),
    (0x0E50, 0, 0x0E00, 0x0E80),
    (0x0ED0, 0, 0x0E80, 0x0F00),
    (0x0F20, 0, 0x0F00, 0x1000),
    (0x1040, 0, 0x1000, 0x1080),
    (0x1369, 1, 0x1200, 0x1380),
    (0x17E0, 0, 0x1780, 0x1800),
    (0x1810, 0, 0x1800, 0x1900),
    (0x07C0, 0, 0x07C0, 0x0800),
    (0x1090, 0, 0x1000, 0x10A0),
    (0x1946, 0, 0x1900, 0x1950),
    (0x19D0, 0, 0x1980, 0x19E0),
    (0x1B50, 0, 0x1B00, 0x1B80),
    (0x1BB0, 0, 0x1B80, 0x1BC0),
    (0x1C40, 0, 0x1C00, 0x1C50),
    (0x1C50, 0, 0x1C50, 0x1C80),
    (0xA620, 0, 0xA500, 0xA640),
    (0xA8D0, 0, 0xA880, 0xA8E0),
    (0xA900, 0, 0xA900, 0xA930),
    (0xAA50, 0, 0xAA00, 0xAA60),
    (0x1A80, 0, 0x1A20, 0x1AB0),
    (0x1A90, 0, 0x1A20, 0x1AB0),
    (0xA9D0, 0, 0xA980, 0xA9E0),
    (0xABF0, 0, 0xABC0, 0xAC00),
];

const NAMES: [&str; DigitRange::COUNT] = [
    "EUROPEAN",
    "ARABIC",
    "EASTERN_ARABIC",
    "DEVANAGARI",
    "BENGALI",
    "GURMUKHI",
    "GUJARATI",
    "ORIYA",
    "TAMIL",
    "TELUGU",
    "KANNADA",
    "MALAYALAM",
    "THAI",
    "LAO",
    "TIBETAN",
    "MYANMAR",
    "ETHIOPIC",
    "KHMER",
    "MONGOLIAN",
    "NKO",
    "MYANMAR_SHAN",
    "LIMBU",
    "NEW_TAI_LUE",
    "BALINESE",
    "SUNDANESE",
    "LEPCHA",
    "OL_CHIKI",
    "VAI",
    "SAURASHTRA",
    "KAYAH_LI",
    "CHAM",
    "TAI_THAM_HORA",
    "TAI_THAM_THAM",
    "JAVANESE",
    "MEETEI_MAYEK",
];

impl DigitRange {
    /// Number of ranges.
    pub const COUNT: usize = 35;

    /// Number of ranges representable in the legacy mask.
    pub const LEGACY_COUNT: usize = 19;

    /// Every range, in discriminant order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::European,
        Self::Arabic,
        Self::EasternArabic,
        Self::Devanagari,
        Self::Bengali,
        Self::Gurmukhi,
        Self::Gujarati,
        Self::Oriya,
        Self::Tamil,
        Self::Telugu,
        Self::Kannada,
        Self::Malayalam,
        Self::Thai,
        Self::Lao,
        Self::Tibetan,
        Self::Myanmar,
        Self::Ethiopic,
        Self::Khmer,
        Self::Mongolian,
        Self::Nko,
        Self::MyanmarShan,
        Self::Limbu,
        Self::NewTaiLue,
        Self::Balinese,
        Self::Sundanese,
        Self::Lepcha,
        Self::OlChiki,
        Self::Vai,
        Self::Saurashtra,
        Self::KayahLi,
        Self::Cham,
        Self::TaiThamHora,
        Self::TaiThamTham,
        Self::Javanese,
        Self::MeeteiMayek,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// The code point of this range's first digit.
    pub fn digit_base(self) -> u32 {
        RANGE_DATA[self.index()].0
    }

    /// The numeric value of the first digit: 1 for Ethiopic, 0 for everything else.
    pub fn numeric_base(self) -> u8 {
        RANGE_DATA[self.index()].1
    }

    /// The Unicode block used to recognise this range's script in context.
    pub fn block(self) -> core::ops::Range<u32> {
        let (_, _, start, end) = RANGE_DATA[self.index()];
        start..end
    }

    /// Returns `true` if `cp` lies in this range's block.
    pub fn in_block(self, cp: u32) -> bool {
        self.block().contains(&cp)
    }

    /// The smallest ASCII digit this range shapes.
    pub fn min_digit(self) -> char {
        if self.numeric_base() == 0 { '0' } else { '1' }
    }

    /// Shapes one ASCII digit, returning `None` if `ch` is not a digit this range shapes.
    pub fn shape_digit(self, ch: char) -> Option<char> {
        if ch < self.min_digit() || ch > '9' {
            return None;
        }
        let offset = u32::from(ch) - u32::from(self.min_digit());
        char::from_u32(self.digit_base() + offset)
    }

    /// The bit this range occupies in the legacy mask, if it has one.
    pub fn legacy_bit(self) -> Option<u32> {
        (self.index() < Self::LEGACY_COUNT).then(|| 1 << self.index())
    }

    /// The conventional upper-case name of this range.
    pub fn name(self) -> &'static str {
        NAMES[self.index()]
    }
}

impl fmt::Display for DigitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl BitOr for DigitRange {
    type Output = DigitRanges;

    fn bitor(self, rhs: Self) -> DigitRanges {
        DigitRanges::from(self) | rhs
    }
}

/// A set of [`DigitRange`]s.
///
/// This is the canonical representation of a shaper's configuration. The 32-bit legacy mask is
/// derived on demand by [`mask`](Self::mask) and parsed by [`from_mask`](Self::from_mask); ranges
/// without a legacy bit are dropped by that conversion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DigitRanges(u64);

impl DigitRanges {
    /// Mask bit marking a contextual shaper in the legacy representation.
    pub const CONTEXTUAL_MASK: u32 = 1 << 31;

    /// Legacy mask of every range that has a bit.
    pub const ALL_RANGES: u32 = (1 << DigitRange::LEGACY_COUNT) - 1;

    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every range.
    pub fn all() -> Self {
        DigitRange::ALL.into_iter().collect()
    }

    /// Parses a legacy range mask. The contextual bit is ignored; unknown bits are an error.
    pub fn from_mask(mask: u32) -> Result<Self, Error> {
        let ranges = mask & !Self::CONTEXTUAL_MASK;
        if ranges & !Self::ALL_RANGES != 0 {
            return Err(Error::invalid_mask(mask));
        }
        Ok(Self(u64::from(ranges)))
    }

    /// The legacy mask of these ranges, without the contextual bit.
    pub fn mask(self) -> u32 {
        self.iter().filter_map(DigitRange::legacy_bit).fold(0, |m, b| m | b)
    }

    /// Returns `true` if `range` is in the set.
    pub fn contains(self, range: DigitRange) -> bool {
        self.0 & (1 << range.index()) != 0
    }

    /// Adds `range` to the set.
    pub fn insert(&mut self, range: DigitRange) {
        self.0 |= 1 << range.index();
    }

    /// Removes `range` from the set.
    pub fn remove(&mut self, range: DigitRange) {
        self.0 &= !(1 << range.index());
    }

    /// Number of ranges in the set.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the ranges in discriminant order.
    pub fn iter(self) -> impl Iterator<Item = DigitRange> {
        DigitRange::ALL.into_iter().filter(move |r| self.contains(*r))
    }
}

impl From<DigitRange> for DigitRanges {
    fn from(range: DigitRange) -> Self {
        Self(1 << range.index())
    }
}

impl FromIterator<DigitRange> for DigitRanges {
    fn from_iter<I: IntoIterator<Item = DigitRange>>(iter: I) -> Self {
        let mut set = Self::empty();
        set.extend(iter);
        set
    }
}

impl Extend<DigitRange> for DigitRanges {
    fn extend<I: IntoIterator<Item = DigitRange>>(&mut self, iter: I) {
        for range in iter {
            self.insert(range);
        }
    }
}

impl BitOr<DigitRange> for DigitRanges {
    type Output = Self;

    fn bitor(mut self, rhs: DigitRange) -> Self {
        self.insert(rhs);
        self
    }
}

impl BitOr for DigitRanges {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign<DigitRange> for DigitRanges {
    fn bitor_assign(&mut self, rhs: DigitRange) {
        self.insert(rhs);
    }
}
