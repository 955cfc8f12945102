// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the vertical geometry used by visibility tracking:
//! region bounds in document space, the scrolled viewport, CSS-style root
//! margins and the intersection ratio between a region and the
//! margin-adjusted viewport.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Vertical extent of a rendered region, in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub top: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// The visible window onto the document.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Document offset of the viewport's top edge.
    pub scroll_top: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(scroll_top: f32, width: f32, height: f32) -> Self {
        Self {
            scroll_top,
            width,
            height,
        }
    }

    /// The detection window after applying `margin` to the viewport edges.
    ///
    /// Negative margins shrink the window. The result may be empty or
    /// inverted; see [`intersect`] for how that case is handled.
    pub fn root_window(&self, margin: &RootMargin) -> Span {
        Span {
            start: self.scroll_top - margin.top.resolve(self.height),
            end: self.scroll_top + self.height + margin.bottom.resolve(self.height),
        }
    }
}

/// Windows thinner than this are treated as a line. A `-50%` band over a
/// fractional viewport height leaves a sliver of rounding error, not a
/// real window.
const MIN_WINDOW_HEIGHT: f32 = 0.5;

/// A vertical interval in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub start: f32,
    pub end: f32,
}

impl Span {
    pub fn is_degenerate(&self) -> bool {
        self.end - self.start < MIN_WINDOW_HEIGHT
    }
}

/// Intersection ratio of `target` within `window`, or `None` if they do not
/// touch at all.
///
/// A degenerate window (zero, negative or sub-pixel height) collapses to the
/// line at its midpoint; a target containing that line is fully
/// intersecting.
pub fn intersect(target: Bounds, window: Span) -> Option<f32> {
    if window.is_degenerate() {
        let line = (window.start + window.end) / 2.0;
        return (target.top <= line && line < target.bottom()).then_some(1.0);
    }

    if target.bottom() < window.start || target.top > window.end {
        return None;
    }

    // Zero-area targets count as fully visible once they touch the window
    if target.height <= 0.0 {
        return Some(1.0);
    }

    let overlap = target.bottom().min(window.end) - target.top.max(window.start);
    Some((overlap / target.height).clamp(0.0, 1.0))
}

/// A single margin length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f32),
    Percent(f32),
}

impl Length {
    /// Resolve to pixels; percentages are relative to `extent`.
    pub fn resolve(&self, extent: f32) -> f32 {
        match self {
            Length::Px(px) => *px,
            Length::Percent(pct) => extent * pct / 100.0,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(px) => write!(f, "{}px", px),
            Length::Percent(pct) => write!(f, "{}%", pct),
        }
    }
}

impl FromStr for Length {
    type Err = MarginParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let invalid = || MarginParseError::InvalidLength(token.to_string());

        if token == "0" {
            return Ok(Length::Px(0.0));
        }
        if let Some(value) = token.strip_suffix("px") {
            return value.parse().map(Length::Px).map_err(|_| invalid());
        }
        if let Some(value) = token.strip_suffix('%') {
            return value.parse().map(Length::Percent).map_err(|_| invalid());
        }
        Err(invalid())
    }
}

/// Errors produced while parsing a root margin string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarginParseError {
    #[error("root margin is empty")]
    Empty,
    #[error("root margin takes at most 4 values, got {0}")]
    TooManyValues(usize),
    #[error("invalid margin length '{0}' (expected px, % or 0)")]
    InvalidLength(String),
}

/// Offsets applied to the viewport edges before intersection, written the
/// way CSS `margin` shorthand is (`"-50px"`, `"-50% 0px"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootMargin {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl RootMargin {
    pub const ZERO: RootMargin = RootMargin::uniform(Length::Px(0.0));

    pub const fn uniform(length: Length) -> Self {
        Self {
            top: length,
            right: length,
            bottom: length,
            left: length,
        }
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::ZERO
    }
}

impl FromStr for RootMargin {
    type Err = MarginParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<Length>, _>>()?;

        match values.as_slice() {
            [] => Err(MarginParseError::Empty),
            [all] => Ok(Self::uniform(*all)),
            [vertical, horizontal] => Ok(Self {
                top: *vertical,
                right: *horizontal,
                bottom: *vertical,
                left: *horizontal,
            }),
            [top, horizontal, bottom] => Ok(Self {
                top: *top,
                right: *horizontal,
                bottom: *bottom,
                left: *horizontal,
            }),
            [top, right, bottom, left] => Ok(Self {
                top: *top,
                right: *right,
                bottom: *bottom,
                left: *left,
            }),
            more => Err(MarginParseError::TooManyValues(more.len())),
        }
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

impl TryFrom<String> for RootMargin {
    type Error = MarginParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RootMargin> for String {
    fn from(margin: RootMargin) -> Self {
        margin.to_string()
    }
}
