use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::core::Viewport;

/// Output of a plotted function at one x.
///
/// `Pair` describes the area between two curves: `bottom` and `top`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CurveValue {
    Single(f64),
    Pair { bottom: f64, top: f64 },
}

impl CurveValue {
    #[must_use]
    pub fn is_finite(self) -> bool {
        match self {
            Self::Single(y) => y.is_finite(),
            Self::Pair { bottom, top } => bottom.is_finite() && top.is_finite(),
        }
    }

    #[must_use]
    pub fn to_values(self) -> SmallVec<[f64; 2]> {
        match self {
            Self::Single(y) => smallvec![y],
            Self::Pair { bottom, top } => smallvec![bottom, top],
        }
    }
}

impl From<f64> for CurveValue {
    fn from(value: f64) -> Self {
        Self::Single(value)
    }
}

impl From<(f64, f64)> for CurveValue {
    fn from((bottom, top): (f64, f64)) -> Self {
        Self::Pair { bottom, top }
    }
}

impl From<[f64; 2]> for CurveValue {
    fn from([bottom, top]: [f64; 2]) -> Self {
        Self::Pair { bottom, top }
    }
}

/// A plottable function of x.
///
/// Implemented for every closure returning `f64`, `(f64, f64)` or `[f64; 2]`.
pub trait Evaluate {
    fn evaluate(&self, x: f64) -> CurveValue;
}

impl<F, V> Evaluate for F
where
    F: Fn(f64) -> V,
    V: Into<CurveValue>,
{
    fn evaluate(&self, x: f64) -> CurveValue {
        self(x).into()
    }
}

/// One sampled x with its dependent values (one for a line, two for an area).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub values: SmallVec<[f64; 2]>,
}

impl Sample {
    #[must_use]
    pub fn line(x: f64, y: f64) -> Self {
        Self {
            x,
            values: smallvec![y],
        }
    }

    #[must_use]
    pub fn area(x: f64, bottom: f64, top: f64) -> Self {
        Self {
            x,
            values: smallvec![bottom, top],
        }
    }

    #[must_use]
    pub fn from_value(x: f64, value: CurveValue) -> Self {
        Self {
            x,
            values: value.to_values(),
        }
    }

    /// First dependent value; the line value or the area bottom.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.values.first().copied().unwrap_or(f64::NAN)
    }

    #[must_use]
    pub fn is_area(&self) -> bool {
        self.values.len() == 2
    }

    /// Inclusive containment of x and every dependent value.
    #[must_use]
    pub fn is_within(&self, viewport: Viewport) -> bool {
        !self.values.is_empty()
            && viewport.contains_x(self.x)
            && self.values.iter().all(|value| viewport.contains_y(*value))
    }
}

/// Contiguous renderable sequence of samples.
///
/// With overflow disabled every sample lies inside the viewport; a run
/// never spans a window exit and re-entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub samples: Vec<Sample>,
}

impl Run {
    #[must_use]
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Inclusive x-extent of the run.
    #[must_use]
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        Some((self.first()?.x, self.last()?.x))
    }
}
