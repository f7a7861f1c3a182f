// Copyright 2025 the Spantext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measurement of spans and lines, and aggregation of lines into a block.

use smallvec::SmallVec;

use crate::resolve::{ResolvedSpanStyle, ResolvedStyle};
use crate::style::{DirectionSetting, PhysicalAlign, TextAlign, TextBaseline};
use crate::surface::{StateGuard, Surface};
use crate::text::Span;

/// Box metrics of a run, a line or a whole block of text.
///
/// Vertical fields are distances from the baseline; horizontal fields are distances from the
/// alignment point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    /// Advance width.
    pub width: f64,
    /// Distance from the alignment point to the left edge of the ink.
    pub actual_left: f64,
    /// Distance from the alignment point to the right edge of the ink.
    pub actual_right: f64,
    /// Distance from the baseline to the top of the ink.
    pub actual_ascent: f64,
    /// Distance from the baseline to the bottom of the ink.
    pub actual_descent: f64,
    /// Font ascent.
    pub font_ascent: f64,
    /// Font descent.
    pub font_descent: f64,
}

impl TextMetrics {
    /// All-zero metrics.
    pub const ZERO: Self = Self {
        width: 0.0,
        actual_left: 0.0,
        actual_right: 0.0,
        actual_ascent: 0.0,
        actual_descent: 0.0,
        font_ascent: 0.0,
        font_descent: 0.0,
    };

    /// Height of the ink box.
    #[inline]
    pub fn actual_height(&self) -> f64 {
        self.actual_ascent + self.actual_descent
    }

    /// Height of the font box.
    #[inline]
    pub fn font_height(&self) -> f64 {
        self.font_ascent + self.font_descent
    }

    /// Multiplies every field by `scale`.
    pub fn scaled(&self, scale: f64) -> Self {
        Self {
            width: self.width * scale,
            actual_left: self.actual_left * scale,
            actual_right: self.actual_right * scale,
            actual_ascent: self.actual_ascent * scale,
            actual_descent: self.actual_descent * scale,
            font_ascent: self.font_ascent * scale,
            font_descent: self.font_descent * scale,
        }
    }
}

/// Metrics of one span within a line.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpanMetrics {
    /// Scaled box metrics.
    pub metrics: TextMetrics,
    /// Scaled distance from the baseline to the top of the em box.
    pub em_ascent: f64,
    /// Scaled distance from the baseline to the bottom of the em box.
    pub em_descent: f64,
    /// Resolved vertical offset, in pixels.
    pub top_px: f64,
}

/// Metrics of one line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineMetrics {
    /// Aggregated box metrics; the horizontal ink bounds are corrected for alignment.
    pub metrics: TextMetrics,
    /// Distance from the baseline to the top of the tallest em box.
    pub em_ascent: f64,
    /// Distance from the baseline to the bottom of the lowest em box.
    pub em_descent: f64,
    /// Resolved line height, in pixels.
    pub line_height: f64,
    /// Metrics of each span, in order.
    pub spans: SmallVec<[SpanMetrics; 2]>,
}

/// Approximates em box extents from the nominal font size.
///
/// Only exact for [`Top`](TextBaseline::Top), [`Middle`](TextBaseline::Middle) and
/// [`Bottom`](TextBaseline::Bottom). The other baselines are treated like the nearest of those
/// edges, which is a rough fallback for surfaces that don't report em metrics.
pub fn approximate_em_extents(font_size: f64, baseline: TextBaseline) -> (f64, f64) {
    match baseline {
        TextBaseline::Bottom | TextBaseline::Alphabetic | TextBaseline::Ideographic => {
            (font_size, 0.0)
        }
        TextBaseline::Middle => (font_size / 2.0, font_size / 2.0),
        TextBaseline::Top | TextBaseline::Hanging => (0.0, font_size),
    }
}

/// Measures one span of a line.
///
/// Sets the font of `surface` to the one in `style`; callers are expected to scope that change.
/// `baseline` is the surface baseline used for the em box approximation.
pub fn measure_span<S: Surface + ?Sized>(
    surface: &mut S,
    text: &str,
    style: &ResolvedSpanStyle,
    baseline: TextBaseline,
) -> SpanMetrics {
    let state = surface.state_mut();
    state.font = style.font.clone();
    state.font_kerning = style.font_kerning;
    state.font_stretch = style.font_stretch;

    let run = surface.measure_text(text);
    let (em_ascent, em_descent) = match (run.em_height_ascent, run.em_height_descent) {
        (Some(ascent), Some(descent)) => (ascent, descent),
        _ => approximate_em_extents(style.font.size_px(), baseline),
    };
    let metrics = if text.is_empty() {
        TextMetrics::ZERO
    } else {
        run.metrics.scaled(style.scale)
    };
    SpanMetrics {
        metrics,
        em_ascent: em_ascent * style.scale,
        em_descent: em_descent * style.scale,
        top_px: style.top.to_px(metrics.actual_height()),
    }
}

/// Measures one line of spans.
///
/// Spans are measured left aligned and left to right; the document alignment is applied to
/// the horizontal ink bounds of the result afterwards. A line without spans has all-zero metrics
/// and no height.
pub fn measure_line<S: Surface + ?Sized>(
    surface: &mut S,
    line: &[Span],
    style: &ResolvedStyle,
) -> LineMetrics {
    if line.is_empty() {
        return LineMetrics::default();
    }

    let mut surface = StateGuard::new(surface);
    let state = surface.state_mut();
    state.text_align = TextAlign::Left;
    state.direction = DirectionSetting::Ltr;
    state.text_baseline = style.baseline;

    let spans: SmallVec<[SpanMetrics; 2]> = line
        .iter()
        .map(|span| {
            let span_style = style.span(span.style.as_ref());
            measure_span(&mut *surface, &span.text, &span_style, style.baseline)
        })
        .collect();

    let mut result = LineMetrics::default();
    let m = &mut result.metrics;
    for span in &spans {
        let top = span.top_px;
        m.width += span.metrics.width;
        m.actual_ascent = m.actual_ascent.max(span.metrics.actual_ascent - top);
        m.actual_descent = m.actual_descent.max(span.metrics.actual_descent + top);
        m.font_ascent = m.font_ascent.max(span.metrics.font_ascent - top);
        m.font_descent = m.font_descent.max(span.metrics.font_descent + top);
        result.em_ascent = result.em_ascent.max(span.em_ascent - top);
        result.em_descent = result.em_descent.max(span.em_descent + top);
    }

    let (first, last) = match (spans.first(), spans.last()) {
        (Some(first), Some(last)) => (first.metrics, last.metrics),
        _ => (TextMetrics::ZERO, TextMetrics::ZERO),
    };
    let overflow_left = first.actual_left.max(0.0);
    let overflow_right = (last.actual_right - last.width).max(0.0);
    let width = m.width;
    (m.actual_left, m.actual_right) = match style.align.to_physical(style.direction) {
        PhysicalAlign::Left => (overflow_left, width + overflow_right),
        PhysicalAlign::Center => (width / 2.0 + overflow_left, width / 2.0 + overflow_right),
        PhysicalAlign::Right => (width + overflow_left, overflow_right),
    };

    result.line_height = style
        .line_height
        .to_px(result.em_ascent + result.em_descent);
    result.spans = spans;

    log::trace!(
        "measured line of {} spans: width {}, height {}",
        line.len(),
        result.metrics.width,
        result.line_height
    );
    result
}

/// Combines line metrics into the metrics of a block.
///
/// The block starts at the ascent of its first line and ends at the descent of its last line.
/// Consecutive lines are half their line heights apart each, so for line heights `h1`, `h2` and
/// `h3` the lines contribute `h1 / 2 + h2 + h3 / 2` between those two edges. Width and
/// horizontal ink bounds are the maximum over lines.
pub fn aggregate_lines(lines: &[LineMetrics]) -> TextMetrics {
    let (Some(first), Some(last)) = (lines.first(), lines.last()) else {
        return TextMetrics::ZERO;
    };

    let spacing: f64 = lines
        .windows(2)
        .map(|pair| (pair[0].line_height + pair[1].line_height) / 2.0)
        .sum();

    let mut result = TextMetrics {
        actual_ascent: first.metrics.actual_ascent,
        font_ascent: first.metrics.font_ascent,
        actual_descent: spacing + last.metrics.actual_descent,
        font_descent: spacing + last.metrics.font_descent,
        ..TextMetrics::ZERO
    };
    for line in lines {
        result.width = result.width.max(line.metrics.width);
        result.actual_left = result.actual_left.max(line.metrics.actual_left);
        result.actual_right = result.actual_right.max(line.metrics.actual_right);
    }
    result
}
