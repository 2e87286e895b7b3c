// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numeric shaping converts ASCII digits into the native digits of other scripts.
//!
//! A [`NumericShaper`] either maps every digit into one [`DigitRange`] (unconditional shaping)
//! or tracks the script of the most recent strong-directional character and shapes digits into
//! that script's range when it is one of the configured [`DigitRanges`] (contextual shaping).
//!
//! ```
//! use numeric_shaping::{DigitRange, NumericShaper};
//!
//! let mut shaper = NumericShaper::contextual(DigitRange::Arabic | DigitRange::Thai);
//! let mut text: Vec<char> = "1 \u{0623} 2".chars().collect();
//! shaper.shape(&mut text);
//! assert_eq!(text[0], '1');
//! assert_eq!(text[4], '\u{0662}');
//! ```
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod range;
mod shaper;
mod tables;

pub use error::{Error, ErrorKind};
pub use range::{DigitRange, DigitRanges};
pub use shaper::NumericShaper;
pub use tables::{IntervalCursor, is_strong_directional};
