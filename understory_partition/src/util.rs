// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::string::String;

/// Fewest fractional digits written for path data.
const MIN_DECIMALS: usize = 3;

/// Most fractional digits written for path data.
const MAX_DECIMALS: usize = 15;

/// Fractional digits needed so that `scale` keeps at least six significant
/// digits.
///
/// Used with the largest coordinate of a path, so that small geometry keeps
/// its shape while rounding noise near zero still prints as `0`.
pub(crate) fn decimals_for(scale: f64) -> usize {
    let mut s = scale.abs();
    let mut decimals = MIN_DECIMALS;
    if !s.is_finite() || s == 0.0 {
        return decimals;
    }
    s *= 1e3;
    while s < 1e5 && decimals < MAX_DECIMALS {
        s *= 10.0;
        decimals += 1;
    }
    decimals
}

/// Formats a scalar for path data: at most `decimals` fractional digits, no
/// trailing zeros, and no negative zero.
pub(crate) fn fmt_scalar(v: f64, decimals: usize) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    let mut s = format!("{v:.decimals$}");
    while s.contains('.') && s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" {
        s.remove(0);
    }
    s
}
