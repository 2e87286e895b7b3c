// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// The style of an underline decoration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Underline {
    /// No underline.
    #[default]
    None,
    /// A single line at the font's underline offset.
    Single,
    /// Two thin lines.
    Double,
    /// A dotted line, as used for input method highlights.
    Dotted,
}

impl Underline {
    /// Returns the stroke count used to compute the decoration's vertical extent.
    pub fn strokes(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Single | Self::Dotted => 1,
            Self::Double => 2,
        }
    }
}
