// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// The paragraph's base direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum BaseDirection {
    /// Choose direction from the first strong character.
    #[default]
    Auto,
    /// Left-to-right.
    Ltr,
    /// Right-to-left.
    Rtl,
}

impl BaseDirection {
    /// Returns the paragraph embedding level implied by this direction, if it is not automatic.
    pub fn level(self) -> Option<u8> {
        match self {
            Self::Auto => None,
            Self::Ltr => Some(0),
            Self::Rtl => Some(1),
        }
    }
}
