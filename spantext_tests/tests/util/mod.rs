// Copyright 2025 the Spantext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::kurbo::Point;
use spantext::{FontDescriptor, Span, SpanStyle, TextAlign, TextBaseline, TextStyle};
use spantext_dev::RecordingSurface;

/// Asserts that two `f64` values are equal up to rounding error.
macro_rules! assert_close {
    ($left:expr, $right:expr $(,)?) => {{
        let (left, right): (f64, f64) = ($left, $right);
        assert!(
            (left - right).abs() < 1e-9,
            "`{}` is {left}, expected {right}",
            stringify!($left)
        );
    }};
}

/// Asserts that two points are equal up to rounding error.
macro_rules! assert_point_close {
    ($left:expr, $right:expr $(,)?) => {{
        let (left, right): (peniko::kurbo::Point, peniko::kurbo::Point) = ($left, $right);
        assert!(
            (left - right).hypot() < 1e-9,
            "`{}` is {left:?}, expected {right:?}",
            stringify!($left)
        );
    }};
}

/// A fresh recording surface on a left-to-right host.
pub(crate) fn surface() -> RecordingSurface {
    RecordingSurface::new()
}

/// A left aligned style with the top baseline, where the draw position is the top left corner.
pub(crate) fn top_left() -> TextStyle {
    TextStyle::new()
        .align(TextAlign::Left)
        .baseline(TextBaseline::Top)
}

/// A span in a font of the given pixel size.
pub(crate) fn sized(text: &str, size: f64) -> Span {
    let font: FontDescriptor = format!("{size}px sans-serif").parse().expect("valid font");
    Span::new(text, SpanStyle::new().font(font))
}

/// Shorthand for a point.
pub(crate) fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}
