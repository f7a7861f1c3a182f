// Copyright 2025 the Spantext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The measurement pipeline: normalize, split into lines, measure lines, aggregate.

use alloc::vec::Vec;

use crate::error::Error;
use crate::metrics::{LineMetrics, TextMetrics, aggregate_lines, measure_line};
use crate::resolve::{ResolvedStyle, resolve_style};
use crate::style::TextStyle;
use crate::surface::{StateGuard, Surface};
use crate::text::{Span, StyledText, split_lines};

/// A measured styled text, ready to be drawn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextLayout {
    /// Normalized spans, line breaks included.
    pub spans: Vec<Span>,
    /// Spans split into lines.
    pub lines: Vec<Vec<Span>>,
    /// Metrics of each line.
    pub line_metrics: Vec<LineMetrics>,
    /// Metrics of the whole text.
    pub metrics: TextMetrics,
}

impl TextLayout {
    /// Returns an iterator over lines and their metrics.
    pub fn lines(&self) -> impl Iterator<Item = (&[Span], &LineMetrics)> + '_ {
        self.lines
            .iter()
            .map(Vec::as_slice)
            .zip(&self.line_metrics)
    }
}

/// Lays out `text` in an already resolved style.
pub fn compute_layout<S: Surface + ?Sized>(
    surface: &mut S,
    text: &StyledText,
    style: &ResolvedStyle,
) -> TextLayout {
    let spans = text.spans();
    let lines = split_lines(&spans);
    let line_metrics: Vec<_> = lines
        .iter()
        .map(|line| measure_line(&mut *surface, line, style))
        .collect();
    let metrics = aggregate_lines(&line_metrics);
    TextLayout {
        spans,
        lines,
        line_metrics,
        metrics,
    }
}

/// Lays out `text`, resolving `style` against the current state of `surface`.
///
/// The state of `surface` is unchanged on return.
///
/// # Errors
///
/// Fails when the style can't be resolved; see [`resolve_style`].
pub fn layout<S: Surface + ?Sized>(
    surface: &mut S,
    text: &StyledText,
    style: Option<&TextStyle>,
) -> Result<TextLayout, Error> {
    let mut surface = StateGuard::new(surface);
    let resolved = resolve_style(style, Some(surface.state()), surface.host_direction())?;
    Ok(compute_layout(&mut *surface, text, &resolved))
}

/// Measures `text`, resolving `style` against the current state of `surface`.
///
/// # Errors
///
/// Fails when the style can't be resolved; see [`resolve_style`].
pub fn measure<S: Surface + ?Sized>(
    surface: &mut S,
    text: &StyledText,
    style: Option<&TextStyle>,
) -> Result<TextMetrics, Error> {
    layout(surface, text, style).map(|layout| layout.metrics)
}
