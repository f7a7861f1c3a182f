// Copyright 2025 the Spantext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partial style records and their value types.
//!
//! A [`SpanStyle`] carries the properties a single span may override. A [`TextStyle`] is the
//! document-level base style: every span property plus the layout-only properties (alignment,
//! baseline, direction and line height) that apply to the text as a whole.
//!
//! Every field is optional. Unset fields fall back, in order, to the document style, the ambient
//! state of the drawing surface, and fixed defaults; see [`resolve`](crate::resolve).

mod font;
mod values;


pub use font::FontDescriptor;
pub use values::{
    Direction, DirectionSetting, FontKerning, FontStretch, Length, Paint, PhysicalAlign,
    TextAlign, TextBaseline,
};

use peniko::Color;

/// Style properties that a single span may override.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpanStyle {
    /// Paint used to fill glyphs.
    pub fill: Option<Paint>,
    /// Paint used to stroke glyph outlines.
    pub stroke: Option<Paint>,
    /// Width of the glyph stroke, in pixels.
    pub stroke_width: Option<f64>,
    /// The font.
    pub font: Option<FontDescriptor>,
    /// The kerning mode.
    pub font_kerning: Option<FontKerning>,
    /// The width variant.
    pub font_stretch: Option<FontStretch>,
    /// Uniform scale applied to the span's metrics and glyphs.
    pub scale: Option<f64>,
    /// Vertical offset of the span; positive values move it down.
    pub top: Option<Length>,
    /// Shadow blur radius.
    pub shadow_blur: Option<f64>,
    /// Shadow color.
    pub shadow_color: Option<Color>,
    /// Horizontal shadow offset.
    pub shadow_offset_x: Option<f64>,
    /// Vertical shadow offset.
    pub shadow_offset_y: Option<f64>,
}

/// The document-level base style.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextStyle {
    /// Span properties that apply to every span that doesn't override them.
    pub span: SpanStyle,
    /// Horizontal alignment of every line.
    pub align: Option<TextAlign>,
    /// The baseline the draw position refers to.
    pub baseline: Option<TextBaseline>,
    /// Direction used to map logical alignments to physical ones.
    pub direction: Option<Direction>,
    /// Distance between consecutive lines; percentages refer to the line's em box.
    pub line_height: Option<Length>,
}

macro_rules! span_setters {
    ($($(#[$meta:meta])* $name:ident: $ty:ty,)+) => {
        impl SpanStyle {
            $(
                $(#[$meta])*
                #[inline]
                pub fn $name(mut self, value: impl Into<$ty>) -> Self {
                    self.$name = Some(value.into());
                    self
                }
            )+
        }

        impl TextStyle {
            $(
                $(#[$meta])*
                #[inline]
                pub fn $name(mut self, value: impl Into<$ty>) -> Self {
                    self.span.$name = Some(value.into());
                    self
                }
            )+
        }
    };
}

span_setters! {
    /// Sets the fill paint.
    fill: Paint,
    /// Sets the stroke paint.
    stroke: Paint,
    /// Sets the stroke width.
    stroke_width: f64,
    /// Sets the font.
    font: FontDescriptor,
    /// Sets the kerning mode.
    font_kerning: FontKerning,
    /// Sets the width variant.
    font_stretch: FontStretch,
    /// Sets the uniform scale.
    scale: f64,
    /// Sets the vertical offset.
    top: Length,
    /// Sets the shadow blur radius.
    shadow_blur: f64,
    /// Sets the shadow color.
    shadow_color: Color,
    /// Sets the horizontal shadow offset.
    shadow_offset_x: f64,
    /// Sets the vertical shadow offset.
    shadow_offset_y: f64,
}

impl SpanStyle {
    /// Creates a style that overrides nothing.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextStyle {
    /// Creates a style that sets nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the alignment.
    #[inline]
    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = Some(align);
        self
    }

    /// Sets the baseline.
    #[inline]
    pub fn baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = Some(baseline);
        self
    }

    /// Sets the direction.
    #[inline]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Sets the line height.
    #[inline]
    pub fn line_height(mut self, line_height: impl Into<Length>) -> Self {
        self.line_height = Some(line_height.into());
        self
    }
}

impl From<SpanStyle> for TextStyle {
    fn from(span: SpanStyle) -> Self {
        Self {
            span,
            ..Self::default()
        }
    }
}
