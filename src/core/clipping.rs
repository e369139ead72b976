use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{BoundaryCrossingSolver, CurveValue, Evaluate, Run, Sample, Viewport};
use crate::error::{ClipError, ClipResult};

/// Shortest run the assembler emits.
pub const DEFAULT_MIN_RUN_LEN: usize = 2;

/// Tuning controls for run assembly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipTuning {
    /// Runs with fewer samples than this are dropped.
    pub min_run_len: usize,
}

impl Default for ClipTuning {
    fn default() -> Self {
        Self {
            min_run_len: DEFAULT_MIN_RUN_LEN,
        }
    }
}

impl ClipTuning {
    pub fn validate(self) -> ClipResult<Self> {
        if self.min_run_len == 0 {
            return Err(ClipError::InvalidData(
                "minimum run length must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Splits a sample sequence into contiguous in-window runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClippingAssembler {
    viewport: Viewport,
    solver: BoundaryCrossingSolver,
    tuning: ClipTuning,
}

impl ClippingAssembler {
    #[must_use]
    pub fn new(viewport: Viewport, solver: BoundaryCrossingSolver) -> Self {
        Self {
            viewport,
            solver,
            tuning: ClipTuning::default(),
        }
    }

    pub fn with_tuning(mut self, tuning: ClipTuning) -> ClipResult<Self> {
        self.tuning = tuning.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Clips discrete samples; runs are cut at the last in-window sample.
    #[must_use]
    pub fn clip(&self, samples: &[Sample]) -> Vec<Run> {
        self.assemble(samples, None)
    }

    /// Clips samples drawn from `f`, splicing exact edge crossings into
    /// run boundaries wherever the solver finds one.
    #[must_use]
    pub fn clip_with<F>(&self, samples: &[Sample], f: &F) -> Vec<Run>
    where
        F: Evaluate + ?Sized,
    {
        let scalar: &dyn Fn(f64) -> f64 = &|x| match f.evaluate(x) {
            CurveValue::Single(y) => y,
            CurveValue::Pair { .. } => f64::NAN,
        };
        self.assemble(samples, Some(scalar))
    }

    fn assemble(&self, samples: &[Sample], f: Option<&dyn Fn(f64) -> f64>) -> Vec<Run> {
        if samples.is_empty() {
            return Vec::new();
        }
        if self.viewport.allow_overflow() {
            return vec![Run::new(samples.to_vec())];
        }

        let mut runs = Vec::new();
        let mut open: Vec<Sample> = Vec::new();
        let mut prev: Option<(&Sample, bool)> = None;

        for sample in samples {
            let fitted = self.fit(sample);
            let in_range = fitted.is_some();

            match (prev, fitted) {
                (Some((before, false)), Some(current)) => {
                    if let Some(entry) = self.crossing(f, before, sample) {
                        open.push(entry);
                    }
                    open.push(current);
                }
                (_, Some(current)) => open.push(current),
                (Some((before, true)), None) => {
                    if let Some(exit) = self.crossing(f, before, sample) {
                        open.push(exit);
                    }
                    self.close(&mut open, &mut runs);
                }
                (_, None) => {}
            }

            prev = Some((sample, in_range));
        }
        self.close(&mut open, &mut runs);

        trace!(
            input_count = samples.len(),
            run_count = runs.len(),
            "assembled clipped runs"
        );
        runs
    }

    /// In-window form of `sample`, or `None` when it falls outside.
    ///
    /// An area sample with exactly one bound outside the y-range is clamped
    /// onto the nearest edge and kept if it still has positive height.
    fn fit(&self, sample: &Sample) -> Option<Sample> {
        let viewport = self.viewport;
        if !viewport.contains_x(sample.x) {
            return None;
        }

        match sample.values.as_slice() {
            [y] => viewport.contains_y(*y).then(|| sample.clone()),
            [bottom, top] => {
                let bottom_in = viewport.contains_y(*bottom);
                let top_in = viewport.contains_y(*top);
                if bottom_in && top_in {
                    return Some(sample.clone());
                }
                if bottom_in == top_in || !bottom.is_finite() || !top.is_finite() {
                    return None;
                }
                let bottom = viewport.clamp_y(*bottom);
                let top = viewport.clamp_y(*top);
                (top > bottom).then(|| Sample::area(sample.x, bottom, top))
            }
            _ => None,
        }
    }

    /// Exact point where the line between `from` and `to` meets the edge the
    /// out-of-window one of them exceeds.
    fn crossing(
        &self,
        f: Option<&dyn Fn(f64) -> f64>,
        from: &Sample,
        to: &Sample,
    ) -> Option<Sample> {
        let f = f?;
        if from.is_area() || to.is_area() {
            return None;
        }

        let (inside, outside) = if self.viewport.contains_y(from.y()) {
            (from, to)
        } else {
            (to, from)
        };
        let edge = self.viewport.exceeded_y_edge(outside.y())?;

        match self.solver.find_crossing(f, from.x, to.x, edge) {
            // A hit on the in-window endpoint is already part of the run.
            Some(x) if x == inside.x => None,
            Some(x) if self.viewport.contains_x(x) => Some(Sample::line(x, edge)),
            Some(_) => None,
            None => {
                trace!(x1 = from.x, x2 = to.x, edge, "no boundary crossing found");
                None
            }
        }
    }

    fn close(&self, open: &mut Vec<Sample>, runs: &mut Vec<Run>) {
        let samples = std::mem::take(open);
        if samples.len() >= self.tuning.min_run_len {
            runs.push(Run::new(samples));
        }
    }
}
