// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Category to color resolution.
//!
//! A [`ColorMap`] maps category names to color strings. Categories with no
//! entry resolve to [`EMPTY_DEFAULT_COLOR`], the fixed color of the reserved
//! [`EMPTY_CATEGORY`]. A color the caller configures for [`EMPTY_CATEGORY`]
//! only applies to nodes named `"empty"`.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use peniko::Color;
use peniko::color::{Srgb, parse_color};

use crate::diagnostics::DiagnosticSink;

/// Reserved fallback category.
///
/// Hosts that pad or mask their data should use this name so the padding
/// picks up the configured "empty" color.
pub const EMPTY_CATEGORY: &str = "empty";

/// Color injected for [`EMPTY_CATEGORY`] when the map has none.
pub const EMPTY_DEFAULT_COLOR: &str = "#eeeeee";

/// Mapping from category name to a color string.
///
/// Empty color strings count as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ColorMap {
    colors: HashMap<String, String>,
}

impl ColorMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the color for a category, returning the previous one.
    pub fn insert(
        &mut self,
        category: impl Into<String>,
        color: impl Into<String>,
    ) -> Option<String> {
        self.colors.insert(category.into(), color.into())
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, category: impl Into<String>, color: impl Into<String>) -> Self {
        self.insert(category, color);
        self
    }

    /// Returns the configured color for a category, ignoring empty strings.
    #[must_use]
    pub fn get(&self, category: &str) -> Option<&str> {
        self.colors
            .get(category)
            .map(String::as_str)
            .filter(|c| !c.is_empty())
    }

    /// Returns `true` if a non-empty color is configured for the category.
    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    /// Number of entries, including any with empty colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns `true` if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Iterates over `(category, color)` entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.colors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Injects [`EMPTY_DEFAULT_COLOR`] for [`EMPTY_CATEGORY`] if it is missing.
    ///
    /// Returns `true` if the map changed. Calling this again is a no-op.
    pub fn ensure_empty_color(&mut self) -> bool {
        if self.contains(EMPTY_CATEGORY) {
            return false;
        }
        self.colors.insert(EMPTY_CATEGORY.into(), EMPTY_DEFAULT_COLOR.into());
        true
    }

    /// Resolves a category to a color, logging a warning on a miss.
    ///
    /// See [`resolve_with`](Self::resolve_with).
    pub fn resolve(&mut self, category: &str) -> &str {
        self.resolve_with(category, &mut ())
    }

    /// Resolves a category to a color.
    ///
    /// The sentinel entry is injected first if missing. A category with no
    /// color resolves to [`EMPTY_DEFAULT_COLOR`], is logged with
    /// `tracing::warn!`, and is reported to `sink`. The missing category is
    /// never added to the map.
    pub fn resolve_with(&mut self, category: &str, sink: &mut impl DiagnosticSink) -> &str {
        self.ensure_empty_color();
        if !self.contains(category) {
            tracing::warn!(category, "color map does not exist for category");
            sink.unknown_category(category);
            return EMPTY_DEFAULT_COLOR;
        }
        self.get(category).unwrap_or(EMPTY_DEFAULT_COLOR)
    }

    /// Parses the color a category resolves to.
    pub fn parse(&self, category: &str) -> Result<Color, ColorParseError> {
        parse_fill(self.get(category).unwrap_or(EMPTY_DEFAULT_COLOR))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ColorMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            colors: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Error returned when a fill string is not a CSS color.
#[derive(Clone, PartialEq, Eq)]
pub struct ColorParseError {
    /// The rejected color string.
    pub input: String,
    /// Why the parser rejected it.
    pub reason: String,
}

impl fmt::Debug for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ColorParseError {{ input: {:?}, reason: {:?} }}",
            self.input, self.reason
        )
    }
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color {:?}: {}", self.input, self.reason)
    }
}

impl core::error::Error for ColorParseError {}

/// Parses a fill string as a CSS color.
pub(crate) fn parse_fill(fill: &str) -> Result<Color, ColorParseError> {
    parse_color(fill)
        .map(|c| c.to_alpha_color::<Srgb>())
        .map_err(|e| ColorParseError {
            input: fill.into(),
            reason: alloc::format!("{e}"),
        })
}

/// Maps position `index` in a sequence of `len` colors to a `[0, 1]` offset.
///
/// The first entry maps to `0` and the last to `1`. Sequences of zero or one
/// entries map to `0`.
#[must_use]
pub fn gradient_offset(index: usize, len: usize) -> f64 {
    if len <= 1 {
        return 0.0;
    }
    index as f64 / (len - 1) as f64
}

/// Returns `len` copies of [`EMPTY_CATEGORY`], for padding category series.
#[must_use]
pub fn empty_categories(len: usize) -> Vec<&'static str> {
    alloc::vec![EMPTY_CATEGORY; len]
}
