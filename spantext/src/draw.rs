// Copyright 2025 the Spantext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positioning and painting of laid out text.

use crate::error::Error;
use crate::layout::{TextLayout, compute_layout};
use crate::resolve::{ResolvedSpanStyle, ResolvedStyle, resolve_style};
use crate::snapshot::Snapshot;
use crate::style::{DirectionSetting, PhysicalAlign, TextAlign, TextBaseline, TextStyle};
use crate::surface::{StateGuard, Surface};
use crate::text::StyledText;

/// Something [`draw`] can paint.
#[derive(Debug)]
pub enum Drawable<'a, O> {
    /// Styled text, laid out on every draw.
    Text {
        /// The text.
        text: &'a StyledText,
        /// Document style; unset properties come from the target surface.
        style: Option<&'a TextStyle>,
    },
    /// A pre-rendered snapshot.
    Snapshot(&'a mut Snapshot<O>),
}

impl<'a, O> From<&'a StyledText> for Drawable<'a, O> {
    fn from(text: &'a StyledText) -> Self {
        Self::Text { text, style: None }
    }
}

impl<'a, O> From<&'a mut Snapshot<O>> for Drawable<'a, O> {
    fn from(snapshot: &'a mut Snapshot<O>) -> Self {
        Self::Snapshot(snapshot)
    }
}

/// Draws styled text or a snapshot at `(x, y)`.
///
/// Styled text takes unset properties from the current state of `surface`. A snapshot only
/// takes the transform from it; its style was fixed when it was created.
///
/// # Errors
///
/// See [`draw_styled_text`] and [`Snapshot::draw_to`].
pub fn draw<S: Surface>(
    surface: &mut S,
    drawable: Drawable<'_, S::Offscreen>,
    x: f64,
    y: f64,
) -> Result<(), Error> {
    match drawable {
        Drawable::Text { text, style } => draw_styled_text(surface, text, x, y, style),
        Drawable::Snapshot(snapshot) => snapshot.draw_to(surface, x, y),
    }
}

/// Lays out and draws `text` at `(x, y)`, resolving `style` against the current state of
/// `surface`.
///
/// The state of `surface` is unchanged on return.
///
/// # Errors
///
/// Fails when the style can't be resolved; see [`resolve_style`].
pub fn draw_styled_text<S: Surface + ?Sized>(
    surface: &mut S,
    text: &StyledText,
    x: f64,
    y: f64,
    style: Option<&TextStyle>,
) -> Result<(), Error> {
    let resolved = resolve_style(style, Some(surface.state()), surface.host_direction())?;
    let layout = compute_layout(surface, text, &resolved);
    draw_layout(surface, x, y, &resolved, &layout);
    Ok(())
}

/// Draws a layout computed with `style` at `(x, y)`.
///
/// Lines are aligned around `x` according to the resolved alignment and direction. The
/// baseline decides what `y` refers to: for [`Top`](TextBaseline::Top),
/// [`Middle`](TextBaseline::Middle) and [`Bottom`](TextBaseline::Bottom) it is that edge of the
/// whole block's ink box; otherwise it is that baseline of the first line.
///
/// Spans of different sizes within a line share a visual center rather than a baseline. For the
/// edge-relative baselines that center is the middle of the ink box; otherwise it is the middle
/// of the font box, so spans in the same font keep a common baseline.
pub fn draw_layout<S: Surface + ?Sized>(
    surface: &mut S,
    x: f64,
    y: f64,
    style: &ResolvedStyle,
    layout: &TextLayout,
) {
    let mut surface = StateGuard::new(surface);
    surface.translate(x, y);

    let edge_relative = style.baseline.is_edge_relative();
    let state = surface.state_mut();
    state.text_align = TextAlign::Left;
    state.direction = DirectionSetting::Ltr;
    state.text_baseline = if edge_relative {
        TextBaseline::Top
    } else {
        style.baseline
    };

    let extent = layout.metrics.actual_height();
    let mut y_start = match style.baseline {
        TextBaseline::Middle => -extent / 2.0,
        TextBaseline::Bottom => -extent,
        _ => 0.0,
    };
    let align = style.align.to_physical(style.direction);

    let mut previous_height = None;
    for (line, line_metrics) in layout.lines() {
        if let Some(previous) = previous_height {
            y_start += (previous + line_metrics.line_height) / 2.0;
        }
        previous_height = Some(line_metrics.line_height);

        let lm = &line_metrics.metrics;
        let mut x_start = match align {
            PhysicalAlign::Left => 0.0,
            PhysicalAlign::Center => -lm.width / 2.0,
            PhysicalAlign::Right => -lm.width,
        };
        for (span, span_metrics) in line.iter().zip(&line_metrics.spans) {
            let sm = &span_metrics.metrics;
            let centering = if edge_relative {
                (lm.actual_height() - sm.actual_height()) / 2.0
            } else {
                ((lm.font_descent - lm.font_ascent) - (sm.font_descent - sm.font_ascent)) / 2.0
            };
            let span_style = style.span(span.style.as_ref());
            draw_span(
                &mut *surface,
                &span.text,
                &span_style,
                x_start,
                y_start + span_metrics.top_px + centering,
            );
            x_start += sm.width;
        }
    }
}

fn draw_span<S: Surface + ?Sized>(
    surface: &mut S,
    text: &str,
    style: &ResolvedSpanStyle,
    x: f64,
    y: f64,
) {
    let mut surface = StateGuard::new(surface);
    surface.translate(x, y);
    let state = surface.state_mut();
    state.font = style.font.clone();
    state.font_kerning = style.font_kerning;
    state.font_stretch = style.font_stretch;
    state.fill = style.fill.clone();
    state.shadow_blur = style.shadow.blur;
    state.shadow_color = style.shadow.color;
    state.shadow_offset_x = style.shadow.offset_x;
    state.shadow_offset_y = style.shadow.offset_y;
    surface.scale(style.scale, style.scale);
    surface.fill_text(text, 0.0, 0.0);
    if style.has_stroke() {
        let state = surface.state_mut();
        state.stroke = style.stroke.clone();
        state.line_width = style.stroke_width;
        surface.stroke_text(text, 0.0, 0.0);
    }
}
