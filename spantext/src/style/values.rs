// Copyright 2025 the Spantext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::str::FromStr;

use peniko::{Brush, Color};

use crate::error::{Error, Property};

/// A length in pixels, or a percentage of a reference extent.
///
/// For a span's `top` offset, percentages resolve against the span's own ink extent
/// (ascent + descent). For `line_height`, they resolve against the line's em box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    /// An absolute length in pixels.
    Px(f64),
    /// A percentage of the reference extent.
    Percent(f64),
}

impl Length {
    /// Zero pixels.
    pub const ZERO: Self = Self::Px(0.0);

    /// Resolves this length to pixels against `extent`.
    #[inline]
    pub fn to_px(self, extent: f64) -> f64 {
        match self {
            Self::Px(px) => px,
            Self::Percent(pct) => pct / 100.0 * extent,
        }
    }

    /// Parses a length.
    ///
    /// Supported syntax (after trimming ASCII whitespace): a bare number (pixels), a number
    /// followed by `px`, or a number followed by `%`.
    ///
    /// ```
    /// use spantext::Length;
    ///
    /// assert_eq!(Length::parse("12"), Some(Length::Px(12.0)));
    /// assert_eq!(Length::parse("12px"), Some(Length::Px(12.0)));
    /// assert_eq!(Length::parse("50%"), Some(Length::Percent(50.0)));
    /// assert_eq!(Length::parse("1em"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(pct) = s.strip_suffix('%') {
            return Some(Self::Percent(pct.trim_end().parse().ok()?));
        }
        let px = s.strip_suffix("px").map(str::trim_end).unwrap_or(s);
        Some(Self::Px(px.parse().ok()?))
    }
}

impl Default for Length {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<f64> for Length {
    fn from(px: f64) -> Self {
        Self::Px(px)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(px) => write!(f, "{px}px"),
            Self::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

/// Defines a keyword enum with canvas spellings, `as_str`, [`FromStr`] and [`fmt::Display`].
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $property:path {
            $($(#[$vmeta:meta])* $variant:ident => $keyword:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            $(
                #[doc = concat!("`", $keyword, "`.")]
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Returns the keyword spelling of this value.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $keyword,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($keyword => Ok(Self::$variant),)+
                    other => Err(Error::invalid_value($property, other)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

keyword_enum! {
    /// Logical or physical horizontal text alignment.
    TextAlign, Property::Align {
        #[default]
        Start => "start",
        End => "end",
        Left => "left",
        Right => "right",
        Center => "center",
    }
}

keyword_enum! {
    /// The baseline that the vertical draw position refers to.
    TextBaseline, Property::Baseline {
        Top => "top",
        Hanging => "hanging",
        Middle => "middle",
        #[default]
        Alphabetic => "alphabetic",
        Ideographic => "ideographic",
        Bottom => "bottom",
    }
}

keyword_enum! {
    /// A resolved text direction.
    Direction, Property::Direction {
        #[default]
        Ltr => "ltr",
        Rtl => "rtl",
    }
}

keyword_enum! {
    /// A surface's direction setting, which may defer to its host.
    DirectionSetting, Property::Direction {
        Ltr => "ltr",
        Rtl => "rtl",
        #[default]
        Inherit => "inherit",
    }
}

keyword_enum! {
    /// Whether kerning information stored in the font is used.
    FontKerning, Property::FontKerning {
        #[default]
        Auto => "auto",
        Normal => "normal",
        None => "none",
    }
}

keyword_enum! {
    /// The width variant of the font.
    FontStretch, Property::FontStretch {
        UltraCondensed => "ultra-condensed",
        ExtraCondensed => "extra-condensed",
        Condensed => "condensed",
        SemiCondensed => "semi-condensed",
        #[default]
        Normal => "normal",
        SemiExpanded => "semi-expanded",
        Expanded => "expanded",
        ExtraExpanded => "extra-expanded",
        UltraExpanded => "ultra-expanded",
    }
}

/// A physical horizontal alignment, after direction has been applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhysicalAlign {
    /// Text starts at the draw position.
    Left,
    /// Text is centered on the draw position.
    Center,
    /// Text ends at the draw position.
    Right,
}

impl TextAlign {
    /// Maps logical alignments (`start`, `end`) to physical ones using `direction`.
    pub const fn to_physical(self, direction: Direction) -> PhysicalAlign {
        match (self, direction) {
            (Self::Left, _) | (Self::Start, Direction::Ltr) | (Self::End, Direction::Rtl) => {
                PhysicalAlign::Left
            }
            (Self::Right, _) | (Self::End, Direction::Ltr) | (Self::Start, Direction::Rtl) => {
                PhysicalAlign::Right
            }
            (Self::Center, _) => PhysicalAlign::Center,
        }
    }
}

impl TextBaseline {
    /// Whether positions for this baseline are expressed relative to the top edge of the block
    /// (`top`, `middle`, `bottom`) rather than to a glyph baseline.
    pub const fn is_edge_relative(self) -> bool {
        matches!(self, Self::Top | Self::Middle | Self::Bottom)
    }
}

impl DirectionSetting {
    /// Returns the explicit direction, or `None` for [`DirectionSetting::Inherit`].
    pub const fn explicit(self) -> Option<Direction> {
        match self {
            Self::Ltr => Some(Direction::Ltr),
            Self::Rtl => Some(Direction::Rtl),
            Self::Inherit => None,
        }
    }
}

impl From<Direction> for DirectionSetting {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Ltr => Self::Ltr,
            Direction::Rtl => Self::Rtl,
        }
    }
}

/// A fill or stroke paint.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Paint {
    /// Nothing is painted.
    #[default]
    None,
    /// Paint with a brush.
    Brush(Brush),
}

impl Paint {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::Brush(Brush::Solid(Color::from_rgba8(0, 0, 0, 0)));

    /// Whether painting with this paint can never produce visible output.
    ///
    /// This is the case for [`Paint::None`] and for solid colors with zero alpha.
    pub fn is_invisible(&self) -> bool {
        match self {
            Self::None => true,
            Self::Brush(Brush::Solid(color)) => color.components[3] <= 0.0,
            Self::Brush(_) => false,
        }
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Self::Brush(Brush::Solid(color))
    }
}

impl From<Brush> for Paint {
    fn from(brush: Brush) -> Self {
        Self::Brush(brush)
    }
}
