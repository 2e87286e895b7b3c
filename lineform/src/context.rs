// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared collaborators and options for building layouts.

use std::sync::Arc;

use crate::shape::{DefaultFontResolver, FontResolver, Shaper};

/// Options controlling line assembly and justification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Upper bound on justification passes.
    ///
    /// A further pass runs only when the previous one clamped an advance at zero.
    pub max_justification_passes: usize,
    /// Whether graphics on the top or bottom baseline may grow the line's ascent or descent.
    pub fit_floating_graphics: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            max_justification_passes: 2,
            fit_floating_graphics: true,
        }
    }
}

/// The shaper, font resolver and options used to build layouts.
///
/// Cheap to clone; the collaborators are shared.
#[derive(Clone, Debug)]
pub struct LayoutContext {
    shaper: Arc<dyn Shaper>,
    resolver: Arc<dyn FontResolver>,
    options: LayoutOptions,
}

impl LayoutContext {
    /// Creates a context around `shaper` with the [`DefaultFontResolver`].
    pub fn new(shaper: impl Shaper + 'static) -> Self {
        Self {
            shaper: Arc::new(shaper),
            resolver: Arc::new(DefaultFontResolver),
            options: LayoutOptions::default(),
        }
    }

    /// Returns this context with a different font resolver.
    pub fn with_resolver(mut self, resolver: impl FontResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Returns this context with different options.
    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    /// The shaper.
    pub fn shaper(&self) -> &dyn Shaper {
        &*self.shaper
    }

    /// The font resolver.
    pub fn resolver(&self) -> &dyn FontResolver {
        &*self.resolver
    }

    /// The options.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }
}
