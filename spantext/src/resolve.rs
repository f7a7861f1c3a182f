// Copyright 2025 the Spantext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partial→total style resolution.
//!
//! Each property resolves through an ordered list of sources, first defined wins:
//!
//! 1. the span's own [`SpanStyle`] (span properties only),
//! 2. the document [`TextStyle`],
//! 3. the ambient [`SurfaceState`] of the drawing surface, where the surface has an equivalent,
//! 4. a fixed default.
//!
//! `scale`, `top` and `line_height` have no surface equivalent. A surface whose direction is
//! [`DirectionSetting::Inherit`] defers to its host; see [`resolve_style`].

use peniko::Color;

use crate::error::{Error, Property};
use crate::style::{
    Direction, DirectionSetting, FontDescriptor, FontKerning, FontStretch, Length, Paint,
    SpanStyle, TextAlign, TextBaseline, TextStyle,
};
use crate::surface::SurfaceState;

/// The default line height: the em box of the line.
pub const DEFAULT_LINE_HEIGHT: Length = Length::Percent(100.0);

/// A resolved text shadow.
#[derive(Clone, Debug, PartialEq)]
pub struct Shadow {
    /// Blur radius.
    pub blur: f64,
    /// Shadow color.
    pub color: Color,
    /// Horizontal offset.
    pub offset_x: f64,
    /// Vertical offset.
    pub offset_y: f64,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            blur: 0.0,
            color: Color::from_rgba8(0, 0, 0, 0),
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

/// A span style with every property set.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedSpanStyle {
    /// Fill paint.
    pub fill: Paint,
    /// Stroke paint.
    pub stroke: Paint,
    /// Stroke width.
    pub stroke_width: f64,
    /// Font.
    pub font: FontDescriptor,
    /// Kerning mode.
    pub font_kerning: FontKerning,
    /// Width variant.
    pub font_stretch: FontStretch,
    /// Uniform scale.
    pub scale: f64,
    /// Vertical offset.
    pub top: Length,
    /// Shadow.
    pub shadow: Shadow,
}

impl Default for ResolvedSpanStyle {
    fn default() -> Self {
        Self {
            fill: Paint::from(Color::from_rgba8(0, 0, 0, 255)),
            stroke: Paint::None,
            stroke_width: 0.0,
            font: FontDescriptor::default(),
            font_kerning: FontKerning::Auto,
            font_stretch: FontStretch::Normal,
            scale: 1.0,
            top: Length::ZERO,
            shadow: Shadow::default(),
        }
    }
}

impl ResolvedSpanStyle {
    /// Whether glyphs in this style get stroked.
    ///
    /// False when the stroke paint can never be visible or the stroke width isn't positive.
    pub fn has_stroke(&self) -> bool {
        !self.stroke.is_invisible() && self.stroke_width > 0.0
    }

    /// Applies the overrides of `style` on top of this style.
    pub fn with_overrides(&self, style: &SpanStyle) -> Self {
        Self {
            fill: style.fill.clone().unwrap_or_else(|| self.fill.clone()),
            stroke: style.stroke.clone().unwrap_or_else(|| self.stroke.clone()),
            stroke_width: style.stroke_width.unwrap_or(self.stroke_width),
            font: style.font.clone().unwrap_or_else(|| self.font.clone()),
            font_kerning: style.font_kerning.unwrap_or(self.font_kerning),
            font_stretch: style.font_stretch.unwrap_or(self.font_stretch),
            scale: style.scale.unwrap_or(self.scale),
            top: style.top.unwrap_or(self.top),
            shadow: Shadow {
                blur: style.shadow_blur.unwrap_or(self.shadow.blur),
                color: style.shadow_color.unwrap_or(self.shadow.color),
                offset_x: style.shadow_offset_x.unwrap_or(self.shadow.offset_x),
                offset_y: style.shadow_offset_y.unwrap_or(self.shadow.offset_y),
            },
        }
    }
}

/// A document style with every property set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedStyle {
    /// Span properties for spans that don't override them.
    pub base: ResolvedSpanStyle,
    /// Alignment.
    pub align: TextAlign,
    /// Baseline.
    pub baseline: TextBaseline,
    /// Direction.
    pub direction: Direction,
    /// Line height.
    pub line_height: Length,
}

impl ResolvedStyle {
    /// Resolves the style of one span against this document style.
    pub fn span(&self, style: Option<&SpanStyle>) -> ResolvedSpanStyle {
        match style {
            Some(style) => self.base.with_overrides(style),
            None => self.base.clone(),
        }
    }
}

/// Returns the first value present in `sources`, or a [`MissingValue`] error naming `property`.
///
/// [`MissingValue`]: crate::ErrorKind::MissingValue
pub fn chase<T>(
    property: Property,
    sources: impl IntoIterator<Item = Option<T>>,
) -> Result<T, Error> {
    sources
        .into_iter()
        .flatten()
        .next()
        .ok_or(Error::missing_value(property))
}

/// Resolves a document style.
///
/// `ambient` is the state of the surface the text will be measured or drawn on, and
/// `host_direction` the effective direction of the element hosting that surface, when there is
/// one (see [`Surface::host_direction`](crate::Surface::host_direction)).
///
/// # Errors
///
/// Fails with [`UnresolvedDirection`](crate::ErrorKind::UnresolvedDirection) if the document style
/// doesn't set a direction, the ambient direction is
/// [`Inherit`](DirectionSetting::Inherit), and there is no host direction.
pub fn resolve_style(
    style: Option<&TextStyle>,
    ambient: Option<&SurfaceState>,
    host_direction: Option<Direction>,
) -> Result<ResolvedStyle, Error> {
    let span = style.map(|style| &style.span);
    let defaults = ResolvedSpanStyle::default();

    let direction = match (style.and_then(|s| s.direction), ambient) {
        (Some(direction), _) => direction,
        (None, Some(ambient)) => match ambient.direction {
            DirectionSetting::Inherit => host_direction.ok_or(Error::unresolved_direction())?,
            explicit => explicit.explicit().unwrap_or_default(),
        },
        (None, None) => Direction::default(),
    };

    let base = ResolvedSpanStyle {
        fill: chase(
            Property::Fill,
            [
                span.and_then(|s| s.fill.clone()),
                ambient.map(|a| a.fill.clone()),
                Some(defaults.fill),
            ],
        )?,
        stroke: chase(
            Property::Stroke,
            [
                span.and_then(|s| s.stroke.clone()),
                ambient.map(|a| a.stroke.clone()),
                Some(defaults.stroke),
            ],
        )?,
        stroke_width: chase(
            Property::StrokeWidth,
            [
                span.and_then(|s| s.stroke_width),
                ambient.map(|a| a.line_width),
                Some(defaults.stroke_width),
            ],
        )?,
        font: chase(
            Property::Font,
            [
                span.and_then(|s| s.font.clone()),
                ambient.map(|a| a.font.clone()),
                Some(defaults.font),
            ],
        )?,
        font_kerning: chase(
            Property::FontKerning,
            [
                span.and_then(|s| s.font_kerning),
                ambient.map(|a| a.font_kerning),
                Some(defaults.font_kerning),
            ],
        )?,
        font_stretch: chase(
            Property::FontStretch,
            [
                span.and_then(|s| s.font_stretch),
                ambient.map(|a| a.font_stretch),
                Some(defaults.font_stretch),
            ],
        )?,
        scale: chase(
            Property::Scale,
            [span.and_then(|s| s.scale), Some(defaults.scale)],
        )?,
        top: chase(Property::Top, [span.and_then(|s| s.top), Some(defaults.top)])?,
        shadow: Shadow {
            blur: chase(
                Property::ShadowBlur,
                [
                    span.and_then(|s| s.shadow_blur),
                    ambient.map(|a| a.shadow_blur),
                    Some(defaults.shadow.blur),
                ],
            )?,
            color: chase(
                Property::ShadowColor,
                [
                    span.and_then(|s| s.shadow_color),
                    ambient.map(|a| a.shadow_color),
                    Some(defaults.shadow.color),
                ],
            )?,
            offset_x: chase(
                Property::ShadowOffsetX,
                [
                    span.and_then(|s| s.shadow_offset_x),
                    ambient.map(|a| a.shadow_offset_x),
                    Some(defaults.shadow.offset_x),
                ],
            )?,
            offset_y: chase(
                Property::ShadowOffsetY,
                [
                    span.and_then(|s| s.shadow_offset_y),
                    ambient.map(|a| a.shadow_offset_y),
                    Some(defaults.shadow.offset_y),
                ],
            )?,
        },
    };

    Ok(ResolvedStyle {
        base,
        align: chase(
            Property::Align,
            [
                style.and_then(|s| s.align),
                ambient.map(|a| a.text_align),
                Some(TextAlign::default()),
            ],
        )?,
        baseline: chase(
            Property::Baseline,
            [
                style.and_then(|s| s.baseline),
                ambient.map(|a| a.text_baseline),
                Some(TextBaseline::default()),
            ],
        )?,
        direction,
        line_height: chase(
            Property::LineHeight,
            [style.and_then(|s| s.line_height), Some(DEFAULT_LINE_HEIGHT)],
        )?,
    })
}
