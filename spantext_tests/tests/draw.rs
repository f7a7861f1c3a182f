// Copyright 2025 the Spantext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positioning and painting of spans.

use peniko::Color;
use spantext::{
    Direction, Drawable, FontDescriptor, Length, Paint, RunMetrics, Span, SpanStyle, StyledText,
    Surface, TextAlign, TextBaseline, TextStyle, draw, draw_styled_text, layout,
};
use spantext_dev::{Command, FixedMeasurer, RecordingSurface, TextMeasurer};

use crate::util::{pt, sized, surface, top_left};

const RED: Color = Color::from_rgba8(255, 0, 0, 255);
const BLUE: Color = Color::from_rgba8(0, 0, 255, 255);

fn fill_states(commands: &[Command]) -> Vec<&spantext::SurfaceState> {
    commands
        .iter()
        .filter_map(|command| match command {
            Command::FillText { state, .. } => Some(state),
            _ => None,
        })
        .collect()
}

#[test]
fn draw_hi_at_top_left() {
    let mut surface = surface();
    draw_styled_text(&mut surface, &"Hi".into(), 0.0, 0.0, Some(&top_left())).unwrap();
    assert_eq!(surface.filled_text(), [("Hi", pt(0.0, 0.0))]);
    let state = fill_states(surface.commands())[0];
    assert_eq!(state.text_align, TextAlign::Left);
    assert_eq!(state.text_baseline, TextBaseline::Top);
    assert_eq!(state.font, FontDescriptor::default());
}

#[test]
fn draw_center_starts_lines_at_minus_half_width() {
    let fonts = [10.0, 14.0, 33.0];
    let scales = [1.0, 0.5, 3.0];
    for (size, scale) in fonts.into_iter().zip(scales) {
        let mut surface = surface();
        let mut first = sized("Hi", size);
        if let Some(style) = first.style.as_mut() {
            style.scale = Some(scale);
        }
        let text = StyledText::from(vec![first, Span::from(" there\nHello")]);
        let style = top_left().align(TextAlign::Center);
        let layout = layout(&mut surface, &text, Some(&style)).unwrap();
        draw_styled_text(&mut surface, &text, 100.0, 50.0, Some(&style)).unwrap();

        let filled = surface.filled_text();
        assert_eq!(filled.len(), 3);
        let line_0 = layout.line_metrics[0].metrics.width;
        let line_1 = layout.line_metrics[1].metrics.width;
        assert_close!(filled[0].1.x, 100.0 - line_0 / 2.0);
        assert_close!(filled[2].1.x, 100.0 - line_1 / 2.0);
    }
}

#[test]
fn draw_right_and_logical_alignment() {
    let cases = [
        (TextAlign::Right, Direction::Ltr, 88.0),
        (TextAlign::End, Direction::Ltr, 88.0),
        (TextAlign::Start, Direction::Rtl, 88.0),
        (TextAlign::End, Direction::Rtl, 100.0),
        (TextAlign::Left, Direction::Rtl, 100.0),
    ];
    for (align, direction, x) in cases {
        let mut surface = surface();
        let style = top_left().align(align).direction(direction);
        draw_styled_text(&mut surface, &"Hi".into(), 100.0, 0.0, Some(&style)).unwrap();
        assert_eq!(surface.filled_text(), [("Hi", pt(x, 0.0))], "{align} {direction}");
    }
}

#[test]
fn draw_honors_ambient_alignment_and_direction() {
    let mut surface = surface();
    surface.state_mut().text_align = TextAlign::Center;
    surface.state_mut().text_baseline = TextBaseline::Top;
    draw_styled_text(&mut surface, &"Hi".into(), 100.0, 0.0, None).unwrap();
    assert_eq!(surface.filled_text(), [("Hi", pt(94.0, 0.0))]);

    let mut surface = crate::util::surface();
    surface.set_host_direction(Some(Direction::Rtl));
    surface.state_mut().text_baseline = TextBaseline::Top;
    draw_styled_text(&mut surface, &"Hi".into(), 100.0, 0.0, None).unwrap();
    assert_eq!(surface.filled_text(), [("Hi", pt(88.0, 0.0))]);
}

#[test]
fn draw_baseline_sets_vertical_start() {
    let cases = [
        (TextBaseline::Top, 0.0, TextBaseline::Top),
        (TextBaseline::Middle, -5.0, TextBaseline::Top),
        (TextBaseline::Bottom, -10.0, TextBaseline::Top),
        (TextBaseline::Alphabetic, 0.0, TextBaseline::Alphabetic),
        (TextBaseline::Hanging, 0.0, TextBaseline::Hanging),
        (TextBaseline::Ideographic, 0.0, TextBaseline::Ideographic),
    ];
    for (baseline, y, painted_baseline) in cases {
        let mut surface = surface();
        let style = top_left().baseline(baseline);
        draw_styled_text(&mut surface, &"Hi".into(), 0.0, 0.0, Some(&style)).unwrap();
        assert_eq!(surface.filled_text(), [("Hi", pt(0.0, y))], "{baseline}");
        let state = fill_states(surface.commands())[0];
        assert_eq!(state.text_baseline, painted_baseline, "{baseline}");
    }
}

#[test]
fn draw_middle_centers_whole_block() {
    let mut surface = surface();
    let style = top_left().baseline(TextBaseline::Middle);
    // Ascent 8, then a 10px pitch, then descent 2: 20px tall.
    draw_styled_text(&mut surface, &"a\nb".into(), 0.0, 0.0, Some(&style)).unwrap();
    let filled = surface.filled_text();
    assert_eq!(filled, [("a", pt(0.0, -10.0)), ("b", pt(0.0, 0.0))]);
}

#[test]
fn draw_lines_advance_by_average_line_height() {
    let mut surface = surface();
    let text = StyledText::from(vec![Span::from("a\n"), sized("b\nc", 30.0)]);
    draw_styled_text(&mut surface, &text, 0.0, 0.0, Some(&top_left())).unwrap();
    let filled = surface.filled_text();
    // Line heights are 10, 30 and 30. The second line starts with an empty fragment.
    assert_eq!(
        filled,
        [
            ("a", pt(0.0, 0.0)),
            ("", pt(0.0, 35.0)),
            ("b", pt(0.0, 20.0)),
            ("c", pt(0.0, 50.0)),
        ]
    );
}

#[test]
fn draw_mixed_sizes_share_visual_center() {
    let text = StyledText::from(vec![Span::from("a"), sized("b", 20.0)]);

    let mut surface = surface();
    draw_styled_text(&mut surface, &text, 0.0, 0.0, Some(&top_left())).unwrap();
    // The line is 20px tall; the 10px span is centered in it.
    assert_eq!(surface.filled_text(), [("a", pt(0.0, 5.0)), ("b", pt(6.0, 0.0))]);

    let mut surface = crate::util::surface();
    let style = top_left().baseline(TextBaseline::Alphabetic);
    draw_styled_text(&mut surface, &text, 0.0, 0.0, Some(&style)).unwrap();
    // Line spans 16 above to 4 below the baseline, the small span 8 above to 2 below.
    assert_eq!(surface.filled_text(), [("a", pt(0.0, -3.0)), ("b", pt(6.0, 0.0))]);
}

/// Lowercase runs have short ink; every run shares the same font box.
#[derive(Clone, Debug, Default)]
struct XHeightMeasurer(FixedMeasurer);

impl TextMeasurer for XHeightMeasurer {
    fn measure(&self, text: &str, font: &FontDescriptor) -> RunMetrics {
        let mut run = self.0.measure(text, font);
        if !text.is_empty() && text.chars().all(char::is_lowercase) {
            run.metrics.actual_ascent = 0.5 * font.size_px();
        }
        run
    }
}

#[test]
fn draw_same_font_spans_share_baseline() {
    let text = StyledText::from(vec![Span::from("a"), Span::from("H")]);
    for baseline in [
        TextBaseline::Alphabetic,
        TextBaseline::Hanging,
        TextBaseline::Ideographic,
    ] {
        let mut surface = RecordingSurface::with_measurer(XHeightMeasurer::default());
        let style = top_left().baseline(baseline);
        draw_styled_text(&mut surface, &text, 0.0, 0.0, Some(&style)).unwrap();
        assert_eq!(
            surface.filled_text(),
            [("a", pt(0.0, 0.0)), ("H", pt(6.0, 0.0))],
            "{baseline}"
        );
    }
}

#[test]
fn draw_top_offset_moves_span() {
    let mut surface = surface();
    let text = StyledText::from(vec![
        Span::from("a"),
        Span::new("b", SpanStyle::new().top(Length::Px(4.0))),
    ]);
    draw_styled_text(&mut surface, &text, 0.0, 0.0, Some(&top_left())).unwrap();
    // The line grows to 14px, so both 10px spans get 2px of centering.
    assert_eq!(surface.filled_text(), [("a", pt(0.0, 2.0)), ("b", pt(6.0, 6.0))]);
}

#[test]
fn draw_applies_span_style() {
    let mut surface = surface();
    let text = StyledText::from(vec![
        Span::from("a"),
        Span::new(
            "b",
            SpanStyle::new()
                .fill(RED)
                .scale(2.0)
                .shadow_blur(3.0)
                .shadow_color(BLUE)
                .shadow_offset_x(1.0)
                .shadow_offset_y(-1.0),
        ),
    ]);
    let style = top_left().fill(BLUE);
    draw_styled_text(&mut surface, &text, 0.0, 0.0, Some(&style)).unwrap();
    let states = fill_states(surface.commands());
    assert_eq!(states[0].fill, Paint::from(BLUE));
    assert_eq!(states[0].transform.as_coeffs()[0], 1.0);
    assert_eq!(states[1].fill, Paint::from(RED));
    assert_eq!(states[1].transform.as_coeffs()[0], 2.0);
    assert_eq!(states[1].transform.as_coeffs()[3], 2.0);
    assert_eq!(states[1].shadow_blur, 3.0);
    assert_eq!(states[1].shadow_color, BLUE);
    assert_eq!(
        (states[1].shadow_offset_x, states[1].shadow_offset_y),
        (1.0, -1.0)
    );
    assert_eq!(surface.filled_text()[1].1.x, 6.0);
}

#[test]
fn draw_strokes_only_visible_strokes() {
    let strokes = |style: TextStyle| {
        let mut surface = surface();
        draw_styled_text(&mut surface, &"Hi".into(), 0.0, 0.0, Some(&style)).unwrap();
        surface
            .commands()
            .iter()
            .filter_map(|command| match command {
                Command::StrokeText { state, .. } => Some((state.stroke.clone(), state.line_width)),
                _ => None,
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(
        strokes(top_left().stroke(RED).stroke_width(2.0)),
        [(Paint::from(RED), 2.0)]
    );
    assert!(strokes(top_left().stroke(RED).stroke_width(0.0)).is_empty());
    assert!(strokes(top_left().stroke(Paint::TRANSPARENT).stroke_width(2.0)).is_empty());
    assert!(strokes(top_left().stroke(Paint::None).stroke_width(2.0)).is_empty());
    assert!(strokes(top_left()).is_empty(), "no stroke paint by default");
}

#[test]
fn draw_stroke_falls_back_to_ambient() {
    let mut surface = surface();
    surface.state_mut().stroke = Paint::from(BLUE);
    draw_styled_text(&mut surface, &"Hi".into(), 0.0, 0.0, Some(&top_left())).unwrap();
    let stroked = surface.commands().iter().any(|command| {
        matches!(command, Command::StrokeText { state, .. } if state.line_width == 1.0)
    });
    assert!(stroked, "ambient stroke with the ambient line width should be used");
}

#[test]
fn draw_restores_surface_state() {
    let mut surface = surface();
    surface.state_mut().text_align = TextAlign::End;
    surface.state_mut().fill = Paint::from(RED);
    surface.translate(5.0, 5.0);
    let before = surface.state().clone();
    let text = StyledText::from(vec![sized("a\nb", 20.0), Span::from("c")]);
    let style = TextStyle::new().stroke(BLUE).stroke_width(1.0);
    draw_styled_text(&mut surface, &text, 1.0, 2.0, Some(&style)).unwrap();
    assert_eq!(surface.state(), &before);
    assert_eq!(surface.depth(), 0);
}

#[test]
fn draw_dispatches_on_drawable() {
    let mut surface = surface();
    let text = StyledText::from("Hi");
    let style = top_left();
    draw(
        &mut surface,
        Drawable::Text {
            text: &text,
            style: Some(&style),
        },
        3.0,
        4.0,
    )
    .unwrap();
    assert_eq!(surface.filled_text(), [("Hi", pt(3.0, 4.0))]);
}
