// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fundamental text property types.
//!
//! This crate is a lightweight, `no_std`-friendly vocabulary layer shared by the paragraph
//! storage and line layout crates. It focuses on small, typed representations of the "leaf"
//! concepts attached to styled text: weights, slopes, baselines, decorations and directions.
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
//!
//! ## Example
//!
//! ```
//! use text_primitives::{Baseline, BidiEmbedding, BidiDirection, FontWeight};
//!
//! assert_eq!(FontWeight::parse("bold"), Some(FontWeight::BOLD));
//! assert!(Baseline::Top.is_floating());
//! assert!(BidiEmbedding::Embed(BidiDirection::Rtl).is_rtl());
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
#![no_std]

mod baseline;
mod bidi;
mod decoration;
mod font;
mod text;

pub use baseline::Baseline;
pub use bidi::{BidiDirection, BidiEmbedding};
pub use decoration::Underline;
pub use font::{FontPosture, FontWeight};
pub use text::BaseDirection;
