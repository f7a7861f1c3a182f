// Copyright 2025 the Spantext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pre-rendered styled text.
//!
//! Laying out and painting many spans is expensive. A [`Snapshot`] paints its text once into an
//! offscreen bitmap and then only blits that bitmap. The bitmap is rendered at the scale of the
//! target transform and is only rebuilt when that scale drifts beyond a tolerance, or after an
//! explicit [`invalidate`](Snapshot::invalidate).

use peniko::kurbo::Affine;

use crate::draw::draw_layout;
use crate::error::Error;
use crate::layout::{TextLayout, compute_layout};
use crate::metrics::TextMetrics;
use crate::resolve::{ResolvedStyle, resolve_style};
use crate::style::TextStyle;
use crate::surface::{Offscreen, StateGuard, Surface};
use crate::text::StyledText;
use crate::util::{ceil, hypot};

/// Options for [`Snapshot::new`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapshotOptions {
    /// Largest ratio between the scale the bitmap was rendered at and the scale of the target
    /// that is tolerated before rebuilding, on either axis.
    pub scale_tolerance: f64,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            scale_tolerance: 1.25,
        }
    }
}

/// Geometry of a snapshot bitmap.
///
/// Paddings leave room for shadows and strokes, which extend past the ink box, plus one pixel
/// of slack on the left and top. All values are in bitmap pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DrawMetrics {
    /// Horizontal render scale.
    pub scale_x: f64,
    /// Vertical render scale.
    pub scale_y: f64,
    /// Unrounded bitmap width.
    pub width: f64,
    /// Unrounded bitmap height.
    pub height: f64,
    /// Space left of the ink box.
    pub padding_left: f64,
    /// Space right of the ink box.
    pub padding_right: f64,
    /// Space above the ink box.
    pub padding_top: f64,
    /// Space below the ink box.
    pub padding_bottom: f64,
}

impl DrawMetrics {
    /// Computes the bitmap geometry for text with `metrics` in `style` at scale `(sx, sy)`.
    pub fn new(sx: f64, sy: f64, metrics: &TextMetrics, style: &ResolvedStyle) -> Self {
        let shadow = &style.base.shadow;
        let spread = shadow.blur + style.base.stroke_width;
        let padding_left = ((spread - shadow.offset_x).max(0.0) + 1.0) * sx;
        let padding_right = (spread + shadow.offset_x).max(0.0) * sx;
        let padding_top = ((spread - shadow.offset_y).max(0.0) + 1.0) * sy;
        let padding_bottom = (spread + shadow.offset_y).max(0.0) * sy;
        Self {
            scale_x: sx,
            scale_y: sy,
            width: (metrics.actual_left + metrics.actual_right + 2.0) * sx
                + padding_left
                + padding_right,
            height: (metrics.actual_ascent + metrics.actual_descent + 2.0) * sy
                + padding_top
                + padding_bottom,
            padding_left,
            padding_right,
            padding_top,
            padding_bottom,
        }
    }

    /// Bitmap size in whole pixels.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "bitmap sizes are far below u32::MAX"
    )]
    pub fn bitmap_size(&self) -> (u32, u32) {
        (
            ceil(self.width.max(0.0)) as u32,
            ceil(self.height.max(0.0)) as u32,
        )
    }
}

/// A styled text pre-rendered into an offscreen bitmap of type `O`.
///
/// The style is resolved once, on creation, without any ambient surface state. Drawing only
/// uses the transform of the target.
#[derive(Debug)]
pub struct Snapshot<O> {
    text: StyledText,
    style: ResolvedStyle,
    scale_tolerance: f64,
    dirty: bool,
    /// Scale the bitmap was last rendered at; `None` before the first draw.
    scale: Option<(f64, f64)>,
    offscreen: Option<O>,
    layout: Option<TextLayout>,
    draw_metrics: Option<DrawMetrics>,
}

impl<O: Offscreen> Snapshot<O> {
    /// Creates a snapshot of `text`.
    ///
    /// Nothing is rendered until the first draw.
    ///
    /// # Errors
    ///
    /// Fails when `style` can't be resolved; see [`resolve_style`].
    pub fn new(
        text: impl Into<StyledText>,
        style: Option<&TextStyle>,
        options: SnapshotOptions,
    ) -> Result<Self, Error> {
        Ok(Self {
            text: text.into(),
            style: resolve_style(style, None, None)?,
            scale_tolerance: options.scale_tolerance,
            dirty: true,
            scale: None,
            offscreen: None,
            layout: None,
            draw_metrics: None,
        })
    }

    /// The text.
    pub fn text(&self) -> &StyledText {
        &self.text
    }

    /// The resolved style.
    pub fn style(&self) -> &ResolvedStyle {
        &self.style
    }

    /// Whether the next draw rebuilds the bitmap.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The scale the bitmap was last rendered at, or `None` if it was never drawn.
    pub fn scale(&self) -> Option<(f64, f64)> {
        self.scale
    }

    /// The tolerated scale ratio.
    pub fn scale_tolerance(&self) -> f64 {
        self.scale_tolerance
    }

    /// Sets the tolerated scale ratio. Takes effect on the next draw.
    pub fn set_scale_tolerance(&mut self, scale_tolerance: f64) {
        self.scale_tolerance = scale_tolerance;
    }

    /// Metrics of the text as last rendered, or `None` while dirty.
    ///
    /// Nothing is measured before the first draw. Call [`prerender`](Self::prerender) with the
    /// target surface first to read metrics without drawing.
    pub fn metrics(&self) -> Option<&TextMetrics> {
        self.layout.as_ref().map(|layout| &layout.metrics)
    }

    /// Layout of the text as last rendered, or `None` while dirty.
    pub fn layout(&self) -> Option<&TextLayout> {
        self.layout.as_ref()
    }

    /// Geometry of the bitmap, or `None` while dirty or when the text has no extent.
    pub fn draw_metrics(&self) -> Option<&DrawMetrics> {
        self.draw_metrics.as_ref()
    }

    /// The offscreen target, once created.
    pub fn offscreen(&self) -> Option<&O> {
        self.offscreen.as_ref()
    }

    /// Discards the rendered bitmap; the next draw rebuilds it at the last used scale.
    pub fn invalidate(&mut self) {
        self.dirty = true;
        self.layout = None;
        self.draw_metrics = None;
    }

    /// Adopts the scale of `transform` if this is the first draw or it drifted too far from the
    /// last used scale. Returns whether the scale was adopted.
    fn observe_scale(&mut self, transform: Affine) -> bool {
        let [a, b, c, d, _, _] = transform.as_coeffs();
        let (sx, sy) = (hypot(a, b), hypot(c, d));
        let drifted = match self.scale {
            None => true,
            Some((old_x, old_y)) => {
                let ratio = |new: f64, old: f64| new.max(old) / new.min(old);
                ratio(sx, old_x) > self.scale_tolerance || ratio(sy, old_y) > self.scale_tolerance
            }
        };
        if drifted {
            log::debug!("snapshot adopts scale ({sx}, {sy})");
            self.scale = Some((sx, sy));
            self.invalidate();
        }
        drifted
    }

    /// Brings the bitmap up to date with the scale of `target`, without drawing it.
    ///
    /// # Errors
    ///
    /// Fails when `target` can't create an offscreen, or the offscreen can't be resized.
    pub fn prerender<S>(&mut self, target: &mut S) -> Result<(), Error>
    where
        S: Surface<Offscreen = O> + ?Sized,
    {
        self.observe_scale(target.state().transform);
        if self.dirty {
            self.rebuild(target)?;
        }
        Ok(())
    }

    fn rebuild<S>(&mut self, target: &mut S) -> Result<(), Error>
    where
        S: Surface<Offscreen = O> + ?Sized,
    {
        let (sx, sy) = self.scale.unwrap_or((1.0, 1.0));
        let offscreen = match self.offscreen.take() {
            Some(offscreen) => offscreen,
            None => target.create_offscreen()?,
        };
        let offscreen = self.offscreen.insert(offscreen);

        let layout = {
            let mut offscreen = StateGuard::new(&mut *offscreen);
            offscreen.scale(sx, sy);
            compute_layout(&mut *offscreen, &self.text, &self.style)
        };
        let metrics = layout.metrics;
        let draw_metrics = DrawMetrics::new(sx, sy, &metrics, &self.style);
        let (width, height) = draw_metrics.bitmap_size();
        let degenerate = metrics.actual_left + metrics.actual_right <= 0.0
            || metrics.actual_height() <= 0.0
            || width == 0
            || height == 0;

        if degenerate {
            log::debug!("snapshot has no extent, skipping render");
            self.draw_metrics = None;
        } else {
            offscreen.resize(width, height)?;
            let mut offscreen = StateGuard::new(&mut *offscreen);
            offscreen.translate(draw_metrics.padding_left, draw_metrics.padding_top);
            offscreen.scale(sx, sy);
            offscreen.translate(metrics.actual_left, metrics.actual_ascent);
            draw_layout(&mut *offscreen, 0.0, 0.0, &self.style, &layout);
            log::debug!("snapshot rendered into {width}x{height} bitmap");
            self.draw_metrics = Some(draw_metrics);
        }
        self.layout = Some(layout);
        self.dirty = false;
        Ok(())
    }

    /// Draws the snapshot with `target` so that its origin lands on `(x, y)`.
    ///
    /// Rebuilds the bitmap first if it's dirty or the scale of `target` drifted. Text without
    /// extent draws nothing.
    ///
    /// # Errors
    ///
    /// Fails when `target` can't create an offscreen, or the offscreen can't be resized.
    pub fn draw_to<S>(&mut self, target: &mut S, x: f64, y: f64) -> Result<(), Error>
    where
        S: Surface<Offscreen = O> + ?Sized,
    {
        self.prerender(target)?;
        let (Some(offscreen), Some(dm), Some(layout)) =
            (&self.offscreen, &self.draw_metrics, &self.layout)
        else {
            return Ok(());
        };
        let metrics = &layout.metrics;
        let mut target = StateGuard::new(target);
        target.translate(x - metrics.actual_left, y - metrics.actual_ascent);
        target.scale(1.0 / dm.scale_x, 1.0 / dm.scale_y);
        target.translate(-dm.padding_left, -dm.padding_top);
        target.draw_offscreen(offscreen, 0.0, 0.0);
        Ok(())
    }
}
