use serde::{Deserialize, Serialize};

use crate::error::{ClipError, ClipResult};

/// Default `|f(x) - edge|` accepted as a hit.
pub const DEFAULT_CROSSING_TOLERANCE: f64 = 1e-6;
/// Default probe budget per search.
pub const DEFAULT_CROSSING_MAX_ITERATIONS: usize = 100;

/// Tuning controls for the boundary-crossing search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverTuning {
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for SolverTuning {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_CROSSING_TOLERANCE,
            max_iterations: DEFAULT_CROSSING_MAX_ITERATIONS,
        }
    }
}

impl SolverTuning {
    pub fn validate(self) -> ClipResult<Self> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(ClipError::InvalidData(
                "crossing tolerance must be finite and > 0".to_owned(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(ClipError::InvalidData(
                "crossing iteration cap must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Locates where a function meets a horizontal window edge between two probes.
///
/// The search walks from the midpoint toward the edge value, following the
/// local slope between the last two probes, and halves its step only after a
/// probe lands on the other side of the edge. It does not assume the function
/// is monotonic over `[x1, x2]`, so it is a heuristic: a `None` result means
/// "draw without an exact crossing point", not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundaryCrossingSolver {
    tuning: SolverTuning,
}

impl BoundaryCrossingSolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tuning(tuning: SolverTuning) -> ClipResult<Self> {
        Ok(Self {
            tuning: tuning.validate()?,
        })
    }

    #[must_use]
    pub fn tuning(&self) -> SolverTuning {
        self.tuning
    }

    /// Returns `x` in `[x1, x2]` with `|f(x) - edge| < tolerance`.
    ///
    /// `x1` and `x2` may be given in either order.
    pub fn find_crossing<F>(&self, f: &F, x1: f64, x2: f64, edge: f64) -> Option<f64>
    where
        F: Fn(f64) -> f64 + ?Sized,
    {
        if !x1.is_finite() || !x2.is_finite() || !edge.is_finite() {
            return None;
        }
        let (lo, hi) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let tolerance = self.tuning.tolerance;

        let y_lo = f(lo);
        let y_hi = f(hi);
        if !y_lo.is_finite() || !y_hi.is_finite() {
            return None;
        }
        if (y_lo - edge).abs() < tolerance {
            return Some(lo);
        }
        if (y_hi - edge).abs() < tolerance {
            return Some(hi);
        }
        if side(y_lo, edge) == side(y_hi, edge) {
            return None;
        }

        let slack = (hi - lo) * 1e-9;
        let mut step = (hi - lo) * 0.5;
        let mut prev_x = lo;
        let mut prev_y = y_lo;
        let mut x = lo + step;

        for _ in 0..self.tuning.max_iterations {
            let y = f(x);
            if !y.is_finite() {
                return None;
            }
            if (y - edge).abs() < tolerance {
                return Some(x);
            }

            if side(y, edge) != side(prev_y, edge) {
                step *= 0.5;
            }
            let increasing = (y - prev_y) * (x - prev_x) > 0.0;
            let direction = if (y < edge) == increasing { 1.0 } else { -1.0 };

            prev_x = x;
            prev_y = y;
            x += direction * step;
            if x < lo - slack || x > hi + slack {
                return None;
            }
            // Rounding in `lo + step + step` may land one ulp past `hi`.
            x = x.clamp(lo, hi);
        }

        None
    }
}

fn side(y: f64, edge: f64) -> bool {
    y > edge
}
