// Copyright 2025 the Spantext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual guides for inspecting metrics.

use peniko::Color;
use peniko::kurbo::Rect;

use crate::metrics::TextMetrics;
use crate::style::Paint;
use crate::surface::{StateGuard, Surface};

const BASELINE: Color = Color::from_rgba8(0, 0, 0, 255);
const ASCENT: Color = Color::from_rgba8(255, 0, 0, 255);
const DESCENT: Color = Color::from_rgba8(255, 165, 0, 255);
const LEFT: Color = Color::from_rgba8(0, 0, 255, 255);
const RIGHT: Color = Color::from_rgba8(0, 128, 0, 255);

/// Draws one pixel wide guides for `metrics` of text drawn at `(x, y)`.
///
/// Horizontal guides span the advance width: the baseline in black, the ink ascent in red and
/// the ink descent in orange. Vertical guides span the ink height: the left ink bound in blue and
/// the right ink bound in green.
pub fn draw_text_metrics<S: Surface + ?Sized>(
    surface: &mut S,
    metrics: &TextMetrics,
    x: f64,
    y: f64,
) {
    let mut surface = StateGuard::new(surface);
    let top = y - metrics.actual_ascent;
    let height = metrics.actual_height();
    let guides = [
        (Rect::new(x, y, x + metrics.width, y + 1.0), BASELINE),
        (Rect::new(x, top, x + metrics.width, top + 1.0), ASCENT),
        (
            Rect::new(
                x,
                y + metrics.actual_descent,
                x + metrics.width,
                y + metrics.actual_descent + 1.0,
            ),
            DESCENT,
        ),
        (
            Rect::new(
                x - metrics.actual_left,
                top,
                x - metrics.actual_left + 1.0,
                top + height,
            ),
            LEFT,
        ),
        (
            Rect::new(
                x + metrics.actual_right,
                top,
                x + metrics.actual_right + 1.0,
                top + height,
            ),
            RIGHT,
        ),
    ];
    for (rect, color) in guides {
        surface.fill_rect(rect, &Paint::from(color));
    }
}
