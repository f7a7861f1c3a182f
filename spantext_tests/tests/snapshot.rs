// Copyright 2025 the Spantext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pre-rendered snapshots.

use peniko::Color;
use peniko::kurbo::Point;
use spantext::{
    Drawable, ErrorKind, Offscreen, Paint, Snapshot, SnapshotOptions, StyledText, Surface,
    TextStyle, draw,
};
use spantext_dev::{Command, RecordingSurface};

use crate::util::{pt, surface};

fn snapshot(text: &str, style: Option<&TextStyle>) -> Snapshot<RecordingSurface> {
    Snapshot::new(text, style, SnapshotOptions::default()).unwrap()
}

/// The single blit recorded on `surface`, with its origin, its size and the offscreen commands.
fn blit(surface: &RecordingSurface) -> (Point, (u32, u32), &[Command]) {
    let mut blits = surface
        .commands()
        .iter()
        .filter(|command| matches!(command, Command::DrawOffscreen { .. }));
    let blit = blits.next().expect("expected a blit");
    assert!(blits.next().is_none(), "expected exactly one blit");
    let Command::DrawOffscreen {
        width,
        height,
        commands,
        ..
    } = blit
    else {
        unreachable!()
    };
    (
        blit.origin().expect("blits have an origin"),
        (*width, *height),
        commands.as_slice(),
    )
}

#[test]
fn snapshot_first_draw_renders_at_identity() {
    let mut surface = surface();
    let mut snapshot = snapshot("Hi", None);
    assert!(snapshot.is_dirty());
    assert_eq!(snapshot.scale(), None);
    assert!(snapshot.metrics().is_none());

    snapshot.draw_to(&mut surface, 10.0, 20.0).unwrap();
    assert!(!snapshot.is_dirty());
    assert_eq!(snapshot.scale(), Some((1.0, 1.0)));
    assert_eq!(snapshot.metrics().map(|m| m.width), Some(12.0));
    let offscreen = snapshot.offscreen().unwrap();
    assert_eq!(offscreen.resize_count(), 1);
    assert_eq!((offscreen.width(), offscreen.height()), (15, 13));

    let (origin, size, commands) = blit(&surface);
    // One pixel of slack left of and above the ink box.
    assert_point_close!(origin, pt(9.0, 11.0));
    assert_eq!(size, (15, 13));
    let filled: Vec<_> = commands.iter().filter_map(Command::origin).collect();
    assert_eq!(filled, [pt(1.0, 9.0)]);
    assert_eq!(surface.depth(), 0);
}

#[test]
fn snapshot_redraw_only_blits() {
    let mut surface = surface();
    let mut snapshot = snapshot("Hi", None);
    snapshot.draw_to(&mut surface, 0.0, 0.0).unwrap();
    let measured = snapshot.offscreen().unwrap().measure_count();
    surface.take_commands();

    snapshot.draw_to(&mut surface, 5.0, 5.0).unwrap();
    let offscreen = snapshot.offscreen().unwrap();
    assert_eq!(offscreen.resize_count(), 1);
    assert_eq!(offscreen.measure_count(), measured);
    let (origin, _, _) = blit(&surface);
    assert_point_close!(origin, pt(4.0, -4.0));
}

#[test]
fn snapshot_rebuilds_only_past_tolerance() {
    let mut surface = surface();
    let mut snapshot = snapshot("Hi", None);
    snapshot.draw_to(&mut surface, 0.0, 0.0).unwrap();

    surface.save();
    surface.scale(1.25 - 1e-6, 1.0);
    snapshot.draw_to(&mut surface, 0.0, 0.0).unwrap();
    surface.restore();
    assert_eq!(snapshot.offscreen().unwrap().resize_count(), 1);
    assert_eq!(snapshot.scale(), Some((1.0, 1.0)));

    surface.save();
    surface.scale(1.0, 1.3);
    snapshot.draw_to(&mut surface, 0.0, 0.0).unwrap();
    surface.restore();
    assert_eq!(snapshot.offscreen().unwrap().resize_count(), 2);
    let (sx, sy) = snapshot.scale().unwrap();
    assert_close!(sx, 1.0);
    assert_close!(sy, 1.3);

    // Shrinking counts too.
    surface.save();
    surface.scale(1.0, 0.5);
    snapshot.draw_to(&mut surface, 0.0, 0.0).unwrap();
    surface.restore();
    assert_eq!(snapshot.offscreen().unwrap().resize_count(), 3);
}

#[test]
fn snapshot_blit_cancels_render_scale() {
    let mut surface = surface();
    let mut snapshot = snapshot("Hi", None);
    surface.scale(2.0, 2.0);
    snapshot.draw_to(&mut surface, 10.0, 20.0).unwrap();
    let dm = *snapshot.draw_metrics().unwrap();
    assert_eq!((dm.scale_x, dm.scale_y), (2.0, 2.0));
    assert_eq!(dm.bitmap_size(), (30, 26));

    let (origin, size, _) = blit(&surface);
    assert_eq!(size, (30, 26));
    // Two bitmap pixels of slack are one user unit, or two device pixels.
    assert_point_close!(origin, pt(18.0, 22.0));
}

#[test]
fn snapshot_tolerance_is_configurable() {
    let mut surface = surface();
    let options = SnapshotOptions {
        scale_tolerance: 2.0,
    };
    let mut snapshot: Snapshot<RecordingSurface> = Snapshot::new("Hi", None, options).unwrap();
    snapshot.draw_to(&mut surface, 0.0, 0.0).unwrap();
    surface.scale(1.9, 1.9);
    snapshot.draw_to(&mut surface, 0.0, 0.0).unwrap();
    assert_eq!(snapshot.offscreen().unwrap().resize_count(), 1);

    snapshot.set_scale_tolerance(1.5);
    assert_eq!(snapshot.scale_tolerance(), 1.5);
    snapshot.draw_to(&mut surface, 0.0, 0.0).unwrap();
    assert_eq!(snapshot.offscreen().unwrap().resize_count(), 2);
}

#[test]
fn snapshot_invalidate_rebuilds_at_same_scale() {
    let mut surface = surface();
    let mut snapshot = snapshot("Hi", None);
    surface.scale(2.0, 2.0);
    snapshot.draw_to(&mut surface, 0.0, 0.0).unwrap();

    snapshot.invalidate();
    assert!(snapshot.is_dirty());
    assert!(snapshot.metrics().is_none());
    assert!(snapshot.draw_metrics().is_none());
    assert_eq!(snapshot.scale(), Some((2.0, 2.0)));

    let mut identity = crate::util::surface();
    snapshot.prerender(&mut identity).unwrap();
    // Identity is outside the tolerance of 2x, so the scale is adopted as well.
    assert_eq!(snapshot.scale(), Some((1.0, 1.0)));
    assert!(!snapshot.is_dirty());
    assert!(snapshot.metrics().is_some(), "prerender measures");
    assert_eq!(snapshot.offscreen().unwrap().resize_count(), 2);
    assert!(identity.commands().is_empty(), "prerender must not draw");
}

#[test]
fn snapshot_padding_covers_shadow_and_stroke() {
    let mut surface = surface();
    let style = TextStyle::new()
        .stroke(Color::from_rgba8(255, 0, 0, 255))
        .stroke_width(2.0)
        .shadow_blur(1.0)
        .shadow_color(Color::from_rgba8(0, 0, 0, 128))
        .shadow_offset_x(3.0)
        .shadow_offset_y(-2.0);
    let mut snapshot = snapshot("Hi", Some(&style));
    surface.scale(2.0, 2.0);
    snapshot.draw_to(&mut surface, 0.0, 0.0).unwrap();

    let dm = snapshot.draw_metrics().unwrap();
    assert_eq!(dm.padding_left, 2.0);
    assert_eq!(dm.padding_right, 12.0);
    assert_eq!(dm.padding_top, 12.0);
    assert_eq!(dm.padding_bottom, 2.0);
    assert_eq!(dm.width, 42.0);
    assert_eq!(dm.height, 38.0);
    assert_eq!(dm.bitmap_size(), (42, 38));

    let (_, _, commands) = blit(&surface);
    assert!(
        commands
            .iter()
            .any(|command| matches!(command, Command::StrokeText { .. })),
        "the stroke should be rendered into the bitmap"
    );
}

#[test]
fn snapshot_empty_text_draws_nothing() {
    let mut surface = surface();
    let mut snapshot = snapshot("", None);
    snapshot.draw_to(&mut surface, 0.0, 0.0).unwrap();
    assert!(!snapshot.is_dirty());
    assert!(snapshot.draw_metrics().is_none());
    assert!(surface.commands().is_empty());
}

#[test]
fn snapshot_reports_unavailable_offscreen() {
    let mut surface = surface();
    surface.set_offscreen_available(false);
    let mut snapshot = snapshot("Hi", None);
    let err = snapshot.draw_to(&mut surface, 0.0, 0.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OffscreenUnavailable);
    assert!(snapshot.is_dirty());
    assert!(surface.commands().is_empty());
    assert_eq!(surface.depth(), 0);
}

#[test]
fn snapshot_ignores_ambient_style_of_target() {
    let mut surface = surface();
    surface.state_mut().fill = Paint::from(Color::from_rgba8(255, 0, 0, 255));
    surface.state_mut().font = "40px serif".parse().unwrap();
    let mut snapshot = snapshot("Hi", None);
    snapshot.draw_to(&mut surface, 0.0, 0.0).unwrap();

    assert_eq!(snapshot.metrics().map(|m| m.width), Some(12.0));
    let (_, _, commands) = blit(&surface);
    let Some(Command::FillText { state, .. }) = commands.first() else {
        panic!("expected the text to be filled first");
    };
    assert_eq!(state.fill, Paint::from(Color::from_rgba8(0, 0, 0, 255)));
}

#[test]
fn snapshot_draws_through_drawable() {
    let mut surface = surface();
    let mut snapshot: Snapshot<RecordingSurface> =
        Snapshot::new(StyledText::from("Hi"), None, SnapshotOptions::default()).unwrap();
    draw(&mut surface, Drawable::from(&mut snapshot), 10.0, 20.0).unwrap();
    let (origin, _, _) = blit(&surface);
    assert_point_close!(origin, pt(9.0, 11.0));
    assert_eq!(snapshot.text(), &StyledText::from("Hi"));
}
