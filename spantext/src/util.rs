// Copyright 2025 the Spantext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Misc helpers.

#[cfg(feature = "libm")]
#[allow(unused_imports, reason = "unused when `std` is also enabled")]
use core_maths::CoreFloat;

/// Length of the vector `(x, y)`.
pub(crate) fn hypot(x: f64, y: f64) -> f64 {
    (x * x + y * y).sqrt()
}

pub(crate) fn ceil(x: f64) -> f64 {
    x.ceil()
}

#[cfg(test)]
pub(crate) fn nearly_eq(x: f64, y: f64) -> bool {
    (x - y).abs() < 1e-9
}
