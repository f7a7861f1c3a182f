// Copyright 2025 the Spantext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::{String, ToString};
use core::fmt;

/// Rich error type for style resolution and rendering.
///
/// Carries a non-exhaustive [`ErrorKind`] plus the style [`Property`] involved and, for parse
/// failures, the rejected input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// The style property the error is about, if any.
    property: Option<Property>,

    /// The rejected input, for parse failures.
    value: Option<String>,
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The style property the error is about, if any.
    pub fn property(&self) -> Option<Property> {
        self.property
    }

    /// The rejected input, if this error came from parsing.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub(crate) fn missing_value(property: Property) -> Self {
        Self {
            kind: ErrorKind::MissingValue,
            property: Some(property),
            value: None,
        }
    }

    pub(crate) fn invalid_value(property: Property, value: &str) -> Self {
        Self {
            kind: ErrorKind::InvalidValue,
            property: Some(property),
            value: Some(value.to_string()),
        }
    }

    pub(crate) fn unresolved_direction() -> Self {
        Self {
            kind: ErrorKind::UnresolvedDirection,
            property: Some(Property::Direction),
            value: None,
        }
    }

    /// Creates an error for a surface that failed to provide an offscreen target.
    ///
    /// This is meant for [`Surface`](crate::Surface) implementations.
    pub fn offscreen_unavailable() -> Self {
        Self {
            kind: ErrorKind::OffscreenUnavailable,
            property: None,
            value: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let property = self.property.map(Property::as_str).unwrap_or("<none>");
        match self.kind {
            ErrorKind::MissingValue => write!(f, "missing value for property '{property}'"),
            ErrorKind::InvalidValue => match &self.value {
                Some(value) => write!(f, "invalid value '{value}' for property '{property}'"),
                None => write!(f, "invalid value for property '{property}'"),
            },
            ErrorKind::UnresolvedDirection => f.write_str(
                "surface direction is 'inherit' but it has no host to inherit from; \
                 try setting a direction manually",
            ),
            ErrorKind::OffscreenUnavailable => f.write_str("failed to create an offscreen surface"),
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// No source provided a value for a property.
    MissingValue,

    /// A keyword or value could not be recognized.
    InvalidValue,

    /// The ambient direction is `inherit` and there is no host element to read it from.
    UnresolvedDirection,

    /// An offscreen render target could not be created or resized.
    OffscreenUnavailable,
}

/// A property of a style record.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    /// The fill paint.
    Fill,
    /// The stroke paint.
    Stroke,
    /// The stroke width.
    StrokeWidth,
    /// The font descriptor.
    Font,
    /// The font kerning mode.
    FontKerning,
    /// The font stretch mode.
    FontStretch,
    /// The uniform span scale.
    Scale,
    /// The vertical span offset.
    Top,
    /// The shadow blur radius.
    ShadowBlur,
    /// The shadow color.
    ShadowColor,
    /// The horizontal shadow offset.
    ShadowOffsetX,
    /// The vertical shadow offset.
    ShadowOffsetY,
    /// The line height.
    LineHeight,
    /// The text alignment.
    Align,
    /// The text baseline.
    Baseline,
    /// The text direction.
    Direction,
}

impl Property {
    /// Returns the property name as it appears in error messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Stroke => "stroke",
            Self::StrokeWidth => "strokeWidth",
            Self::Font => "font",
            Self::FontKerning => "fontKerning",
            Self::FontStretch => "fontStretch",
            Self::Scale => "scale",
            Self::Top => "top",
            Self::ShadowBlur => "shadowBlur",
            Self::ShadowColor => "shadowColor",
            Self::ShadowOffsetX => "shadowOffsetX",
            Self::ShadowOffsetY => "shadowOffsetY",
            Self::LineHeight => "lineHeight",
            Self::Align => "align",
            Self::Baseline => "baseline",
            Self::Direction => "direction",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
