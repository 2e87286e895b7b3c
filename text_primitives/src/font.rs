// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Stroke thickness requested for a run, on the usual 1 to 1000 weight axis.
///
/// Fractional weights are allowed so that variable fonts can be addressed precisely.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct FontWeight(f32);

impl FontWeight {
    /// 100
    pub const THIN: Self = Self(100.0);
    /// 300
    pub const LIGHT: Self = Self(300.0);
    /// 400, the default.
    pub const REGULAR: Self = Self(400.0);
    /// 500
    pub const MEDIUM: Self = Self(500.0);
    /// 600
    pub const SEMI_BOLD: Self = Self(600.0);
    /// 700
    pub const BOLD: Self = Self(700.0);
    /// 900
    pub const BLACK: Self = Self(900.0);

    const KEYWORDS: [(&'static str, Self); 8] = [
        ("thin", Self::THIN),
        ("light", Self::LIGHT),
        ("regular", Self::REGULAR),
        ("normal", Self::REGULAR),
        ("medium", Self::MEDIUM),
        ("semi-bold", Self::SEMI_BOLD),
        ("bold", Self::BOLD),
        ("black", Self::BLACK),
    ];

    /// Wraps a raw weight.
    pub fn new(weight: f32) -> Self {
        Self(weight)
    }

    /// The raw weight.
    pub fn value(self) -> f32 {
        self.0
    }

    /// Reads a keyword such as `"bold"` or a number such as `"650"`.
    ///
    /// ```
    /// use text_primitives::FontWeight;
    ///
    /// assert_eq!(FontWeight::parse("Semi-Bold"), Some(FontWeight::SEMI_BOLD));
    /// assert_eq!(FontWeight::parse("650"), Some(FontWeight::new(650.0)));
    /// assert_eq!(FontWeight::parse("chunky"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::KEYWORDS
            .iter()
            .find(|(keyword, _)| keyword.eq_ignore_ascii_case(s))
            .map(|&(_, weight)| weight)
            .or_else(|| s.parse::<f32>().ok().filter(|w| w.is_finite()).map(Self))
    }

    /// Whether a font resolver should pick a bold face for this weight.
    pub fn is_bold(self) -> bool {
        self.0 >= Self::SEMI_BOLD.0
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::REGULAR
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// How far a run leans, as horizontal run per unit of vertical rise.
///
/// Upright text has a slope of zero and positive slopes lean right. Carets and italic bounds
/// are skewed by exactly this value.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct FontPosture(f32);

impl FontPosture {
    /// No slant.
    pub const REGULAR: Self = Self(0.0);

    /// A typical oblique, about eleven degrees.
    pub const OBLIQUE: Self = Self(0.2);

    /// Wraps a slope.
    pub fn from_slope(slope: f32) -> Self {
        Self(slope)
    }

    /// The slope.
    pub fn slope(self) -> f32 {
        self.0
    }

    /// Whether the slope is non-zero.
    pub fn is_slanted(self) -> bool {
        self.0 != 0.0
    }
}

#[cfg(test)]
mod tests {
    use crate::{FontPosture, FontWeight};

    #[test]
    fn weights_parse_from_keywords_and_numbers() {
        assert_eq!(FontWeight::parse(" bold "), Some(FontWeight::BOLD));
        assert_eq!(FontWeight::parse("NORMAL"), Some(FontWeight::REGULAR));
        assert_eq!(FontWeight::parse("inf"), None);
        assert_eq!(FontWeight::parse("425.5").map(FontWeight::value), Some(425.5));
    }

    #[test]
    fn boldness_starts_at_semi_bold() {
        assert!(FontWeight::SEMI_BOLD.is_bold());
        assert!(!FontWeight::MEDIUM.is_bold());
        assert!(!FontWeight::default().is_bold());
    }

    #[test]
    fn posture_defaults_upright() {
        assert_eq!(FontPosture::default(), FontPosture::REGULAR);
        assert!(!FontPosture::default().is_slanted());
        assert!(FontPosture::from_slope(-0.1).is_slanted());
    }
}
