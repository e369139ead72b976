use serde::{Deserialize, Serialize};

use crate::error::{ClipError, ClipResult};

/// Pixel dimensions of the plot body.
///
/// Only the width participates in sampling (auto resolution); the height is
/// carried so renderers can share one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotSize {
    pub width: u32,
    pub height: u32,
}

impl PlotSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn validate(self) -> ClipResult<Self> {
        if !self.is_valid() {
            return Err(ClipError::InvalidPlotSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// Half-open description of a requested x-interval, `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "XRangeRepr")]
pub struct XRange {
    start: f64,
    end: f64,
}

impl XRange {
    pub fn new(start: f64, end: f64) -> ClipResult<Self> {
        if !start.is_finite() || !end.is_finite() || start >= end {
            return Err(ClipError::InvalidRange {
                axis: "x",
                min: start,
                max: end,
            });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn end(self) -> f64 {
        self.end
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.end - self.start
    }
}

/// Immutable value-space window that curves and points are clipped against.
///
/// `allow_overflow` disables clipping entirely: data passes through
/// unmodified and renderers are allowed to draw beyond the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ViewportRepr")]
pub struct Viewport {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    allow_overflow: bool,
}

impl Viewport {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> ClipResult<Self> {
        validate_axis("x", x_min, x_max)?;
        validate_axis("y", y_min, y_max)?;
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
            allow_overflow: false,
        })
    }

    #[must_use]
    pub fn with_overflow(mut self, allow_overflow: bool) -> Self {
        self.allow_overflow = allow_overflow;
        self
    }

    #[must_use]
    pub fn x_bounds(self) -> (f64, f64) {
        (self.x_min, self.x_max)
    }

    #[must_use]
    pub fn y_bounds(self) -> (f64, f64) {
        (self.y_min, self.y_max)
    }

    #[must_use]
    pub fn x_span(self) -> f64 {
        self.x_max - self.x_min
    }

    #[must_use]
    pub fn allow_overflow(self) -> bool {
        self.allow_overflow
    }

    /// Inclusive containment on both axes. NaN is never contained.
    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        self.contains_x(x) && self.contains_y(y)
    }

    #[must_use]
    pub fn contains_x(self, x: f64) -> bool {
        x >= self.x_min && x <= self.x_max
    }

    #[must_use]
    pub fn contains_y(self, y: f64) -> bool {
        y >= self.y_min && y <= self.y_max
    }

    /// Clamps `y` onto `[y_min, y_max]`.
    #[must_use]
    pub fn clamp_y(self, y: f64) -> f64 {
        y.clamp(self.y_min, self.y_max)
    }

    /// Returns the y-edge nearest to an out-of-window value.
    ///
    /// `None` for in-window or non-finite values, since neither has an edge
    /// to cross toward.
    #[must_use]
    pub fn exceeded_y_edge(self, y: f64) -> Option<f64> {
        if y > self.y_max {
            Some(self.y_max)
        } else if y < self.y_min {
            Some(self.y_min)
        } else {
            None
        }
    }

    /// Truncates `range` to `[x_min, x_max]`.
    ///
    /// Returns `None` when the two intervals do not overlap with a
    /// positive width.
    #[must_use]
    pub fn clamp_x_range(self, range: XRange) -> Option<XRange> {
        let start = range.start.max(self.x_min);
        let end = range.end.min(self.x_max);
        if start < end {
            Some(XRange { start, end })
        } else {
            None
        }
    }
}

/// Unchecked wire form; deserialization goes through `XRange::new`.
#[derive(Deserialize)]
struct XRangeRepr {
    start: f64,
    end: f64,
}

impl TryFrom<XRangeRepr> for XRange {
    type Error = ClipError;

    fn try_from(repr: XRangeRepr) -> ClipResult<Self> {
        Self::new(repr.start, repr.end)
    }
}

#[derive(Deserialize)]
struct ViewportRepr {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    #[serde(default)]
    allow_overflow: bool,
}

impl TryFrom<ViewportRepr> for Viewport {
    type Error = ClipError;

    fn try_from(repr: ViewportRepr) -> ClipResult<Self> {
        Ok(Self::new(repr.x_min, repr.x_max, repr.y_min, repr.y_max)?
            .with_overflow(repr.allow_overflow))
    }
}

fn validate_axis(axis: &'static str, min: f64, max: f64) -> ClipResult<()> {
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(ClipError::InvalidRange { axis, min, max });
    }
    Ok(())
}
