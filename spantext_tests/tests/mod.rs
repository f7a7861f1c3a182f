// Copyright 2025 the Spantext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `spantext`.
//!
//! - The `util` module contains shared utility functions and assertion macros that are needed
//!   by different test modules. It is declared first so its macros are visible everywhere.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests.
//! - Tests are grouped by topic, and test names start with their topic (`measure_*`,
//!   `draw_*`, `snapshot_*`, ...).
//! - Every test runs against `spantext_dev::RecordingSurface` with the default
//!   `FixedMeasurer`: at `10px`, each character advances 6px with an ascent of 8px and a
//!   descent of 2px.

#![allow(missing_docs, reason = "we don't need docs for testing")]

#[macro_use]
mod util;

mod draw;
mod snapshot;
