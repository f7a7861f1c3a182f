// Copyright 2025 the Spantext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spantext measures and draws multi-span, multi-line styled text on a 2D drawing surface.
//!
//! A surface (see [`Surface`]) knows how to measure and paint a single run of text in a single
//! style. Spantext composes those single-run capabilities across heterogeneous runs:
//!
//! - [`text`] normalizes the input into [`Span`]s and splits them into lines.
//! - [`resolve`] turns partial styles into total ones, falling back through the document style
//!   and the surface's ambient state.
//! - [`metrics`] measures each span, aggregates spans into lines and lines into a block.
//! - [`draw`] positions and paints every span.
//! - [`cache`] memoizes whole layouts, and [`snapshot`] pre-renders a styled text into an
//!   offscreen bitmap that is re-blitted until the ambient scale drifts.
//!
//! ## Features
//!
//! - `std` (enabled by default): Get floating point functions from the standard library
//!   (likely using your target's libc).
//! - `libm`: Use floating point implementations from [libm].
//! - `debug_metrics`: Enables [`debug::draw_text_metrics`].
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//!
//! ## Example
//!
//! ```ignore
//! use spantext::{Span, SpanStyle, StyledText, TextStyle, TextAlign};
//!
//! let text = StyledText::from(vec![
//!     Span::from("Hello, "),
//!     Span::new("world", SpanStyle::new().scale(2.0)),
//! ]);
//! let style = TextStyle::new().align(TextAlign::Center);
//! let metrics = spantext::measure(&mut surface, &text, Some(&style))?;
//! spantext::draw_styled_text(&mut surface, &text, 10.0, 20.0, Some(&style))?;
//! ```
//!
//! [libm]: https://crates.io/crates/libm

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
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("spantext requires either the `std` or `libm` feature to be enabled");

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use core_maths as _;

extern crate alloc;

pub use peniko;
pub use peniko::kurbo;

mod error;
mod util;

pub mod cache;
#[cfg(feature = "debug_metrics")]
pub mod debug;
pub mod draw;
pub mod layout;
pub mod metrics;
pub mod resolve;
pub mod snapshot;
pub mod style;
pub mod surface;
pub mod text;

pub use cache::{DEFAULT_CACHE_CAPACITY, LruCache, MetricsCache};
pub use draw::{Drawable, draw, draw_layout, draw_styled_text};
pub use error::{Error, ErrorKind, Property};
pub use layout::{TextLayout, compute_layout, layout, measure};
pub use metrics::{LineMetrics, SpanMetrics, TextMetrics};
pub use resolve::{ResolvedSpanStyle, ResolvedStyle, Shadow, resolve_style};
pub use snapshot::{DrawMetrics, Snapshot, SnapshotOptions};
pub use style::{
    Direction, DirectionSetting, FontDescriptor, FontKerning, FontStretch, Length, Paint,
    PhysicalAlign, SpanStyle, TextAlign, TextBaseline, TextStyle,
};
pub use surface::{Offscreen, RunMetrics, StateGuard, Surface, SurfaceState};
pub use text::{Span, SpanInput, StyledText};
