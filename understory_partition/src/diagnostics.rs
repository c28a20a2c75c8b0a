// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Non-fatal diagnostics raised while coloring a layout.
//!
//! Nothing reported here changes control flow: layout always completes. Every
//! diagnostic is also logged through `tracing` at `warn` level; a
//! [`DiagnosticSink`] lets callers collect them as values instead.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// A single non-fatal problem.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Diagnostic {
    /// No color is mapped for a category; the sentinel color was used.
    UnknownCategory {
        /// The category that missed.
        category: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCategory { category } => {
                write!(f, "color map does not exist for value of type {category:?}")
            }
        }
    }
}

/// A callback sink for diagnostics.
///
/// `()` discards everything.
pub trait DiagnosticSink {
    /// Called when `category` has no color mapped.
    fn unknown_category(&mut self, category: &str);
}

impl DiagnosticSink for () {
    fn unknown_category(&mut self, _category: &str) {}
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn unknown_category(&mut self, category: &str) {
        (**self).unknown_category(category);
    }
}

/// Records diagnostics in the order they were raised.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagnosticLog {
    entries: Vec<Diagnostic>,
}

impl DiagnosticLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded diagnostics, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Number of recorded diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clears all recorded diagnostics.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates over the distinct categories that missed, in first-seen order.
    pub fn unknown_categories(&self) -> impl Iterator<Item = &str> + '_ {
        let mut seen = hashbrown::HashSet::new();
        self.entries.iter().filter_map(move |d| match d {
            Diagnostic::UnknownCategory { category } => {
                seen.insert(category.as_str()).then_some(category.as_str())
            }
        })
    }
}

impl DiagnosticSink for DiagnosticLog {
    fn unknown_category(&mut self, category: &str) {
        self.entries.push(Diagnostic::UnknownCategory {
            category: category.into(),
        });
    }
}
