// Copyright 2025 the Spantext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing surface contract.
//!
//! Spantext doesn't shape or rasterize text itself. A [`Surface`] measures and paints one run of
//! text in the font described by its current [`SurfaceState`], and keeps a stack of saved states
//! like a canvas 2D context does.

use core::fmt;
use core::ops::{Deref, DerefMut};

use peniko::Color;
use peniko::kurbo::{Affine, Rect};

use crate::error::Error;
use crate::metrics::TextMetrics;
use crate::style::{
    Direction, DirectionSetting, FontDescriptor, FontKerning, FontStretch, Paint, TextAlign,
    TextBaseline,
};

/// The mutable drawing state of a surface.
///
/// Besides controlling how runs are measured and painted, this is the ambient style that
/// unset document properties fall back to.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceState {
    /// Current transform.
    pub transform: Affine,
    /// Current font.
    pub font: FontDescriptor,
    /// Current kerning mode.
    pub font_kerning: FontKerning,
    /// Current width variant.
    pub font_stretch: FontStretch,
    /// Alignment of runs relative to the paint position.
    pub text_align: TextAlign,
    /// Baseline of runs relative to the paint position.
    pub text_baseline: TextBaseline,
    /// Run direction.
    pub direction: DirectionSetting,
    /// Fill paint.
    pub fill: Paint,
    /// Stroke paint.
    pub stroke: Paint,
    /// Stroke width.
    pub line_width: f64,
    /// Shadow blur radius.
    pub shadow_blur: f64,
    /// Shadow color.
    pub shadow_color: Color,
    /// Horizontal shadow offset.
    pub shadow_offset_x: f64,
    /// Vertical shadow offset.
    pub shadow_offset_y: f64,
}

impl Default for SurfaceState {
    /// The initial state of a canvas 2D context, except that no stroke paint is set.
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            font: FontDescriptor::default(),
            font_kerning: FontKerning::Auto,
            font_stretch: FontStretch::Normal,
            text_align: TextAlign::Start,
            text_baseline: TextBaseline::Alphabetic,
            direction: DirectionSetting::Inherit,
            fill: Paint::from(Color::from_rgba8(0, 0, 0, 255)),
            stroke: Paint::None,
            line_width: 1.0,
            shadow_blur: 0.0,
            shadow_color: Color::from_rgba8(0, 0, 0, 0),
            shadow_offset_x: 0.0,
            shadow_offset_y: 0.0,
        }
    }
}

/// Metrics of a single run, as reported by a surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunMetrics {
    /// Box metrics of the run, relative to the surface's alignment and baseline.
    pub metrics: TextMetrics,
    /// Distance from the baseline to the top of the em box, if the surface knows it.
    pub em_height_ascent: Option<f64>,
    /// Distance from the baseline to the bottom of the em box, if the surface knows it.
    pub em_height_descent: Option<f64>,
}

/// A 2D drawing surface that can measure and paint single-style runs of text.
pub trait Surface {
    /// Offscreen render target created by this surface.
    type Offscreen: Offscreen;

    /// Returns the current drawing state.
    fn state(&self) -> &SurfaceState;

    /// Returns the current drawing state for modification.
    fn state_mut(&mut self) -> &mut SurfaceState;

    /// Pushes a copy of the current state.
    fn save(&mut self);

    /// Pops the state pushed by the matching [`save`](Self::save).
    ///
    /// Does nothing if the stack is empty.
    fn restore(&mut self);

    /// Returns the effective direction of the element hosting this surface, if there is one.
    ///
    /// Consulted when the state's direction is [`DirectionSetting::Inherit`].
    fn host_direction(&self) -> Option<Direction> {
        None
    }

    /// Measures `text` in the current font, alignment and baseline.
    fn measure_text(&mut self, text: &str) -> RunMetrics;

    /// Fills `text` at `(x, y)` in the current state.
    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    /// Strokes `text` at `(x, y)` in the current state.
    fn stroke_text(&mut self, text: &str, x: f64, y: f64);

    /// Fills `rect` with `paint`.
    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    /// Creates an empty offscreen render target.
    ///
    /// # Errors
    ///
    /// Implementations return [`Error::offscreen_unavailable`] when no target can be created.
    fn create_offscreen(&mut self) -> Result<Self::Offscreen, Error>;

    /// Draws the contents of `offscreen` with its top-left corner at `(x, y)`.
    fn draw_offscreen(&mut self, offscreen: &Self::Offscreen, x: f64, y: f64);

    /// Appends a translation to the current transform.
    fn translate(&mut self, x: f64, y: f64) {
        let state = self.state_mut();
        state.transform *= Affine::translate((x, y));
    }

    /// Appends a scale to the current transform.
    fn scale(&mut self, x: f64, y: f64) {
        let state = self.state_mut();
        state.transform *= Affine::scale_non_uniform(x, y);
    }
}

/// A surface backed by a bitmap that can be drawn onto another surface.
pub trait Offscreen: Surface {
    /// Resizes the bitmap to `width` by `height` pixels.
    ///
    /// Like resizing a canvas, this clears its contents and resets the drawing state.
    ///
    /// # Errors
    ///
    /// Implementations return [`Error::offscreen_unavailable`] when the bitmap can't be
    /// allocated.
    fn resize(&mut self, width: u32, height: u32) -> Result<(), Error>;

    /// Bitmap width in pixels.
    fn width(&self) -> u32;

    /// Bitmap height in pixels.
    fn height(&self) -> u32;
}

/// Saves the state of a surface and restores it when dropped.
///
/// Derefs to the surface, so it can be used in place of it.
pub struct StateGuard<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: Surface + ?Sized> StateGuard<'a, S> {
    /// Saves the state of `surface`.
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: Surface + ?Sized> fmt::Debug for StateGuard<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateGuard").finish_non_exhaustive()
    }
}

impl<S: Surface + ?Sized> Drop for StateGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

impl<S: Surface + ?Sized> Deref for StateGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for StateGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}
