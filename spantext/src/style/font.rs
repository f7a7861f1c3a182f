// Copyright 2025 the Spantext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;
use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Property};

/// Font size, in pixels, that relative units (`em`, `rem`, `%`) resolve against.
const ROOT_FONT_SIZE_PX: f64 = 16.0;

/// A font, as given by a CSS `font` shorthand such as `"bold 12px Arimo, sans-serif"`.
///
/// The canonical source string is retained and handed to the surface unchanged; the nominal size
/// is extracted because the em box used for line heights is derived from it.
///
/// See: <https://www.w3.org/TR/css-fonts-4/#font-prop>
#[derive(Clone, Debug, PartialEq)]
pub struct FontDescriptor {
    source: Arc<str>,
    size_px: f64,
    family_start: usize,
}

impl FontDescriptor {
    /// Parses a CSS `font` shorthand.
    ///
    /// Supported syntax:
    /// `[style] [variant] [weight] [stretch] <size>[/<line-height>] <family>[, <family>]*`.
    ///
    /// Sizes may use `px`, `pt`, `pc`, `in`, `cm`, `mm`, `q`, `em`, `rem` or `%` (the relative
    /// units resolve against 16px), or one of the absolute size keywords `xx-small` through
    /// `xxx-large`.
    ///
    /// ```
    /// use spantext::FontDescriptor;
    ///
    /// let font = FontDescriptor::parse("italic bold 16px 'Noto Sans', serif").unwrap();
    /// assert_eq!(font.size_px(), 16.0);
    /// assert_eq!(font.family(), "'Noto Sans', serif");
    /// assert!(FontDescriptor::parse("sans-serif").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, Error> {
        let source = s.trim();
        let invalid = || Error::invalid_value(Property::Font, source);

        let mut rest = source;
        loop {
            let token_end = rest
                .find(|c: char| c.is_ascii_whitespace())
                .unwrap_or(rest.len());
            let token = &rest[..token_end];
            if token.is_empty() {
                return Err(invalid());
            }
            let (size_token, _line_height) = match token.split_once('/') {
                Some((size, line_height)) => (size, Some(line_height)),
                None => (token, None),
            };
            if let Some(size_px) = parse_font_size(size_token) {
                let after = &rest[token_end..];
                let family = after.trim_start();
                if family.is_empty() {
                    return Err(invalid());
                }
                return Ok(Self {
                    source: Arc::from(source),
                    size_px,
                    family_start: source.len() - family.len(),
                });
            }
            if !is_prefix_keyword(token) {
                return Err(invalid());
            }
            rest = rest[token_end..].trim_start();
        }
    }

    /// Returns the shorthand as given (without surrounding whitespace).
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns the nominal font size in pixels.
    #[inline]
    pub fn size_px(&self) -> f64 {
        self.size_px
    }

    /// Returns the font family list, as written.
    #[inline]
    pub fn family(&self) -> &str {
        &self.source[self.family_start..]
    }
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            source: Arc::from("10px sans-serif"),
            size_px: 10.0,
            family_start: 5,
        }
    }
}

impl FromStr for FontDescriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for FontDescriptor {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Keywords that may precede the size in the shorthand.
fn is_prefix_keyword(token: &str) -> bool {
    const KEYWORDS: &[&str] = &[
        "normal",
        "italic",
        "oblique",
        "small-caps",
        "bold",
        "bolder",
        "lighter",
        "ultra-condensed",
        "extra-condensed",
        "condensed",
        "semi-condensed",
        "semi-expanded",
        "expanded",
        "extra-expanded",
        "ultra-expanded",
    ];
    if KEYWORDS.contains(&token) {
        return true;
    }
    // Numeric weights.
    matches!(token.parse::<f64>(), Ok(weight) if (1.0..=1000.0).contains(&weight))
}

fn parse_font_size(token: &str) -> Option<f64> {
    let keyword = match token {
        "xx-small" => Some(9.0),
        "x-small" => Some(10.0),
        "small" => Some(13.0),
        "medium" => Some(16.0),
        "large" => Some(18.0),
        "x-large" => Some(24.0),
        "xx-large" => Some(32.0),
        "xxx-large" => Some(48.0),
        _ => None,
    };
    if keyword.is_some() {
        return keyword;
    }

    let split = token
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '+' || c == '-'))
        .filter(|&i| i > 0)?;
    let (number, unit) = token.split_at(split);
    let value: f64 = number.parse().ok()?;
    if value < 0.0 {
        return None;
    }
    let px_per_unit = match unit.to_ascii_lowercase().as_str() {
        "px" => 1.0,
        "pt" => 96.0 / 72.0,
        "pc" => 16.0,
        "in" => 96.0,
        "cm" => 96.0 / 2.54,
        "mm" => 96.0 / 25.4,
        "q" => 96.0 / 101.6,
        "em" | "rem" => ROOT_FONT_SIZE_PX,
        "%" => ROOT_FONT_SIZE_PX / 100.0,
        _ => return None,
    };
    Some(value * px_per_unit)
}
