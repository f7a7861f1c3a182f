// Copyright 2025 the Spantext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Styled text input and its normalization into spans and lines.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::style::SpanStyle;

/// A run of text sharing one style.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Span {
    /// The text of the span. May contain line breaks until normalized.
    pub text: String,
    /// Properties this span overrides, if any.
    pub style: Option<SpanStyle>,
}

impl Span {
    /// Creates a span with a style.
    pub fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
        }
    }

    /// Creates a span that overrides nothing.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    fn fragment(&self, text: &str) -> Self {
        Self {
            text: text.into(),
            style: self.style.clone(),
        }
    }
}

impl From<&str> for Span {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for Span {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

/// One item of a [`StyledText::Sequence`].
#[derive(Clone, Debug, PartialEq)]
pub enum SpanInput {
    /// Bare text.
    Text(String),
    /// A styled span.
    Span(Box<Span>),
}

impl From<&str> for SpanInput {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

impl From<String> for SpanInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Span> for SpanInput {
    fn from(span: Span) -> Self {
        Self::Span(Box::new(span))
    }
}

/// Text to measure or draw: bare text, a single span, or a sequence of either.
///
/// Sequence order is the visual left-to-right composition order, independent of the text
/// direction (which only affects alignment).
#[derive(Clone, Debug, PartialEq)]
pub enum StyledText {
    /// Bare text in the base style.
    Text(String),
    /// A single styled span.
    Span(Box<Span>),
    /// Strings and spans, composed left to right.
    Sequence(Vec<SpanInput>),
}

impl StyledText {
    /// Flattens this text into a sequence of spans. Bare text becomes a span without overrides.
    ///
    /// Line breaks are kept; see [`split_lines`].
    pub fn spans(&self) -> Vec<Span> {
        match self {
            Self::Text(text) => vec![Span::plain(text.as_str())],
            Self::Span(span) => vec![Span::clone(span)],
            Self::Sequence(items) => items
                .iter()
                .map(|item| match item {
                    SpanInput::Text(text) => Span::plain(text.as_str()),
                    SpanInput::Span(span) => Span::clone(span),
                })
                .collect(),
        }
    }
}

impl Default for StyledText {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for StyledText {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

impl From<String> for StyledText {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Span> for StyledText {
    fn from(span: Span) -> Self {
        Self::Span(Box::new(span))
    }
}

impl From<Vec<SpanInput>> for StyledText {
    fn from(items: Vec<SpanInput>) -> Self {
        Self::Sequence(items)
    }
}

impl From<Vec<Span>> for StyledText {
    fn from(spans: Vec<Span>) -> Self {
        Self::Sequence(spans.into_iter().map(SpanInput::from).collect())
    }
}

impl<const N: usize> From<[SpanInput; N]> for StyledText {
    fn from(items: [SpanInput; N]) -> Self {
        Self::Sequence(items.into())
    }
}

/// Flattens `text` into spans. Equivalent to [`StyledText::spans`].
pub fn normalize(text: &StyledText) -> Vec<Span> {
    text.spans()
}

/// Splits spans into lines at every line break (`\r\n`, `\r` or `\n`).
///
/// A span that crosses a line break is split into fragments that all keep the span's style.
/// Every line break starts a new line, so text ending in a line break produces a trailing line
/// holding a single empty span. An empty span sequence produces no lines.
pub fn split_lines(spans: &[Span]) -> Vec<Vec<Span>> {
    let mut lines = Vec::new();
    let mut line = Vec::new();
    for span in spans {
        for (i, fragment) in LineBreaks::new(&span.text).enumerate() {
            if i > 0 {
                lines.push(core::mem::take(&mut line));
            }
            line.push(span.fragment(fragment));
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Iterator over the pieces of a string between line breaks.
///
/// Always yields at least one (possibly empty) piece.
#[derive(Clone, Debug)]
struct LineBreaks<'a> {
    rest: Option<&'a str>,
}

impl<'a> LineBreaks<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: Some(text) }
    }
}

impl<'a> Iterator for LineBreaks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        match rest.find(['\r', '\n']) {
            Some(i) => {
                let break_len = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
                self.rest = Some(&rest[i + break_len..]);
                Some(&rest[..i])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}
