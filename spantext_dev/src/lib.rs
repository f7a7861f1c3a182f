// Copyright 2025 the Spantext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Spantext Dev
//!
//! This crate provides utilities for developing Spantext: a deterministic text measurer and a
//! [`Surface`] that records what is painted on it instead of rasterizing.

use peniko::kurbo::{Affine, Point, Rect};
use spantext::{
    Direction, Error, FontDescriptor, Offscreen, Paint, RunMetrics, Surface, SurfaceState,
    TextMetrics,
};

/// Measures single runs of text.
pub trait TextMeasurer {
    /// Measures `text` in `font`.
    fn measure(&self, text: &str, font: &FontDescriptor) -> RunMetrics;
}

/// A measurer where every character has the same metrics, as fractions of the font size.
///
/// The default gives a 10px font an advance of 6px per character, an ascent of 8px and a
/// descent of 2px. Em metrics aren't reported.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedMeasurer {
    /// Advance of each character.
    pub advance: f64,
    /// Ink and font ascent.
    pub ascent: f64,
    /// Ink and font descent.
    pub descent: f64,
    /// Ink overhang on both sides of the advance box.
    pub overhang: f64,
}

impl Default for FixedMeasurer {
    fn default() -> Self {
        Self {
            advance: 0.6,
            ascent: 0.8,
            descent: 0.2,
            overhang: 0.0,
        }
    }
}

impl TextMeasurer for FixedMeasurer {
    fn measure(&self, text: &str, font: &FontDescriptor) -> RunMetrics {
        let size = font.size_px();
        let chars = text.chars().count() as f64;
        let width = self.advance * size * chars;
        let overhang = self.overhang * size;
        RunMetrics {
            metrics: TextMetrics {
                width,
                actual_left: overhang,
                actual_right: width + overhang,
                actual_ascent: self.ascent * size,
                actual_descent: self.descent * size,
                font_ascent: self.ascent * size,
                font_descent: self.descent * size,
            },
            em_height_ascent: None,
            em_height_descent: None,
        }
    }
}

/// A paint operation recorded by a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// A call to [`Surface::fill_text`].
    FillText {
        /// The text.
        text: String,
        /// Position in local coordinates.
        x: f64,
        /// Position in local coordinates.
        y: f64,
        /// State at the time of the call.
        state: SurfaceState,
    },
    /// A call to [`Surface::stroke_text`].
    StrokeText {
        /// The text.
        text: String,
        /// Position in local coordinates.
        x: f64,
        /// Position in local coordinates.
        y: f64,
        /// State at the time of the call.
        state: SurfaceState,
    },
    /// A call to [`Surface::fill_rect`].
    FillRect {
        /// The rectangle in local coordinates.
        rect: Rect,
        /// The paint.
        paint: Paint,
        /// Transform at the time of the call.
        transform: Affine,
    },
    /// A call to [`Surface::draw_offscreen`].
    DrawOffscreen {
        /// Position in local coordinates.
        x: f64,
        /// Position in local coordinates.
        y: f64,
        /// Bitmap width.
        width: u32,
        /// Bitmap height.
        height: u32,
        /// What was painted on the offscreen.
        commands: Vec<Command>,
        /// Transform at the time of the call.
        transform: Affine,
    },
}

impl Command {
    /// The device space position of a text or offscreen command.
    pub fn origin(&self) -> Option<Point> {
        match self {
            Self::FillText { x, y, state, .. } | Self::StrokeText { x, y, state, .. } => {
                Some(state.transform * Point::new(*x, *y))
            }
            Self::DrawOffscreen { x, y, transform, .. } => Some(*transform * Point::new(*x, *y)),
            Self::FillRect { .. } => None,
        }
    }
}

/// A surface that records paint commands and measures with a [`TextMeasurer`].
///
/// It is its own offscreen type; offscreens inherit the measurer.
#[derive(Clone, Debug)]
pub struct RecordingSurface<M = FixedMeasurer> {
    measurer: M,
    state: SurfaceState,
    stack: Vec<SurfaceState>,
    commands: Vec<Command>,
    host_direction: Option<Direction>,
    width: u32,
    height: u32,
    measure_count: usize,
    resize_count: usize,
    offscreen_available: bool,
}

impl RecordingSurface<FixedMeasurer> {
    /// Creates a surface with the default [`FixedMeasurer`] and a left-to-right host.
    pub fn new() -> Self {
        Self::with_measurer(FixedMeasurer::default())
    }
}

impl Default for RecordingSurface<FixedMeasurer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: TextMeasurer> RecordingSurface<M> {
    /// Creates a surface with the given measurer and a left-to-right host.
    pub fn with_measurer(measurer: M) -> Self {
        Self {
            measurer,
            state: SurfaceState::default(),
            stack: Vec::new(),
            commands: Vec::new(),
            host_direction: Some(Direction::Ltr),
            width: 0,
            height: 0,
            measure_count: 0,
            resize_count: 0,
            offscreen_available: true,
        }
    }

    /// Sets the direction of the host, or detaches the surface from any host.
    pub fn set_host_direction(&mut self, direction: Option<Direction>) {
        self.host_direction = direction;
    }

    /// Makes [`Surface::create_offscreen`] and [`Offscreen::resize`] fail.
    pub fn set_offscreen_available(&mut self, available: bool) {
        self.offscreen_available = available;
    }

    /// Recorded commands, in order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Removes and returns the recorded commands.
    pub fn take_commands(&mut self) -> Vec<Command> {
        core::mem::take(&mut self.commands)
    }

    /// Recorded [`Command::FillText`] commands, as text and device space position.
    pub fn filled_text(&self) -> Vec<(&str, Point)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                Command::FillText { text, .. } => Some((text.as_str(), command.origin()?)),
                _ => None,
            })
            .collect()
    }

    /// Number of saved states.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Number of calls to [`Surface::measure_text`].
    pub fn measure_count(&self) -> usize {
        self.measure_count
    }

    /// Number of successful calls to [`Offscreen::resize`].
    pub fn resize_count(&self) -> usize {
        self.resize_count
    }
}

impl<M: TextMeasurer + Clone> Surface for RecordingSurface<M> {
    type Offscreen = Self;

    fn state(&self) -> &SurfaceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SurfaceState {
        &mut self.state
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn host_direction(&self) -> Option<Direction> {
        self.host_direction
    }

    fn measure_text(&mut self, text: &str) -> RunMetrics {
        self.measure_count += 1;
        self.measurer.measure(text, &self.state.font)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.commands.push(Command::FillText {
            text: text.into(),
            x,
            y,
            state: self.state.clone(),
        });
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64) {
        self.commands.push(Command::StrokeText {
            text: text.into(),
            x,
            y,
            state: self.state.clone(),
        });
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.commands.push(Command::FillRect {
            rect,
            paint: paint.clone(),
            transform: self.state.transform,
        });
    }

    fn create_offscreen(&mut self) -> Result<Self, Error> {
        if !self.offscreen_available {
            return Err(Error::offscreen_unavailable());
        }
        let mut offscreen = Self::with_measurer(self.measurer.clone());
        offscreen.host_direction = None;
        Ok(offscreen)
    }

    fn draw_offscreen(&mut self, offscreen: &Self, x: f64, y: f64) {
        self.commands.push(Command::DrawOffscreen {
            x,
            y,
            width: offscreen.width,
            height: offscreen.height,
            commands: offscreen.commands.clone(),
            transform: self.state.transform,
        });
    }
}

impl<M: TextMeasurer + Clone> Offscreen for RecordingSurface<M> {
    fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if !self.offscreen_available {
            return Err(Error::offscreen_unavailable());
        }
        self.width = width;
        self.height = height;
        self.commands.clear();
        self.stack.clear();
        self.state = SurfaceState::default();
        self.resize_count += 1;
        Ok(())
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}
