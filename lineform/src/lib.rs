// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout of a single paragraph of styled text.
//!
//! A [`Paragraph`] is split into styled runs by the [`StyledParagraph`] segmenter, turned into
//! [`Component`]s by an external [`Shaper`], assembled into a [`TextLine`] and finally wrapped in
//! the immutable [`TextLayout`] facade, which answers metric, caret, highlight and hit-testing
//! queries. [`TextMeasurer`] and [`LineBreakMeasurer`] break long paragraphs into lines and keep
//! the work incremental under single-character edits.
//!
//! ## Features
//!
//! - `testing`: Exposes [`testing::MonospaceShaper`] and [`testing::MonospaceResolver`], a
//!   deterministic shaper and font resolver pair that needs no font data.
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

mod analysis;
mod bidi;
mod context;
mod error;
mod segment;
mod shape;
mod util;

pub mod component;
pub mod justify;
pub mod layout;
pub mod line;
pub mod measure;
pub mod style;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use peniko::kurbo;

pub use bidi::BidiAnalysis;
pub use component::{Component, CoreMetrics};
pub use context::{LayoutContext, LayoutOptions};
pub use error::{Error, ErrorKind};
pub use justify::{JustificationInfo, Justifier, Priority, Stretch};
pub use layout::{CaretPolicy, CaretShapes, DefaultCaretPolicy, TextHit, TextLayout};
pub use line::{LayoutPath, LineMetrics, TextLine};
pub use measure::{LineBreakMeasurer, TextMeasurer};
pub use segment::{RenderUnit, Runs, StyledParagraph};
pub use shape::{DefaultFontResolver, FontResolver, ShapedChar, ShapedRun, Shaper};
pub use style::{Decoration, Font, GraphicReplacement, Paragraph, TextAttribute, TextStyle};

#[cfg(test)]
mod tests;
