use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Evaluate, LinearScale, PlotSize, Sample, Viewport, XRange};
use crate::error::{ClipError, ClipResult};

/// Default horizontal distance between automatic samples.
pub const DEFAULT_PIXEL_SPACING_PX: f64 = 20.0;
/// Fewest samples a curve is ever drawn with.
pub const MIN_SAMPLE_COUNT: usize = 2;
/// Most samples a single call may produce.
pub const MAX_SAMPLE_COUNT: usize = 1_000_000;
/// Drift under which the final sample is snapped onto the range end.
pub const END_SNAP_EPSILON: f64 = 1e-5;

/// Tuning controls for uniform curve sampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplerTuning {
    pub pixel_spacing_px: f64,
    pub min_samples: usize,
    pub snap_epsilon: f64,
}

impl Default for SamplerTuning {
    fn default() -> Self {
        Self {
            pixel_spacing_px: DEFAULT_PIXEL_SPACING_PX,
            min_samples: MIN_SAMPLE_COUNT,
            snap_epsilon: END_SNAP_EPSILON,
        }
    }
}

impl SamplerTuning {
    pub fn validate(self) -> ClipResult<Self> {
        if !self.pixel_spacing_px.is_finite() || self.pixel_spacing_px <= 0.0 {
            return Err(ClipError::InvalidData(
                "sampler pixel spacing must be finite and > 0".to_owned(),
            ));
        }
        if self.min_samples < MIN_SAMPLE_COUNT {
            return Err(ClipError::InvalidData(format!(
                "sampler min samples must be >= {MIN_SAMPLE_COUNT}"
            )));
        }
        if !self.snap_epsilon.is_finite() || self.snap_epsilon < 0.0 {
            return Err(ClipError::InvalidData(
                "sampler snap epsilon must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Samples a function at uniform x-increments across a clamped range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSampler {
    viewport: Viewport,
    plot_size: PlotSize,
    x_scale: LinearScale,
    tuning: SamplerTuning,
}

impl CurveSampler {
    pub fn new(viewport: Viewport, plot_size: PlotSize) -> ClipResult<Self> {
        Self::with_tuning(viewport, plot_size, SamplerTuning::default())
    }

    pub fn with_tuning(
        viewport: Viewport,
        plot_size: PlotSize,
        tuning: SamplerTuning,
    ) -> ClipResult<Self> {
        let plot_size = plot_size.validate()?;
        let (x_min, x_max) = viewport.x_bounds();
        Ok(Self {
            viewport,
            plot_size,
            x_scale: LinearScale::new(x_min, x_max)?,
            tuning: tuning.validate()?,
        })
    }

    #[must_use]
    pub fn tuning(&self) -> SamplerTuning {
        self.tuning
    }

    /// Number of samples used for `range` when the caller does not pick one.
    ///
    /// One sample per `pixel_spacing_px` of the clamped range's on-screen
    /// width, never fewer than `min_samples`.
    pub fn auto_resolution(&self, range: XRange) -> ClipResult<usize> {
        let clamped = self.clamp(range)?;
        let width_px = self
            .x_scale
            .span_to_pixels(clamped.start(), clamped.end(), self.plot_size)?;
        Ok(resolution_for_width(width_px, self.tuning))
    }

    /// Samples `f` over `range` clamped to the viewport.
    ///
    /// `resolution` overrides the automatic sample count; it is still subject
    /// to the `min_samples` floor.
    pub fn sample<F>(
        &self,
        f: &F,
        range: XRange,
        resolution: Option<usize>,
    ) -> ClipResult<Vec<Sample>>
    where
        F: Evaluate + ?Sized,
    {
        let clamped = self.clamp(range)?;

        let first = f.evaluate(clamped.start());
        if !first.is_finite() {
            return Err(ClipError::InvalidFunction { x: clamped.start() });
        }

        let count = match resolution {
            Some(requested) => requested.max(self.tuning.min_samples),
            None => self.auto_resolution(clamped)?,
        };
        if count > MAX_SAMPLE_COUNT {
            return Err(ClipError::InvalidData(format!(
                "sample count {count} exceeds {MAX_SAMPLE_COUNT}"
            )));
        }
        let increment = clamped.span() / (count - 1) as f64;

        let mut samples = Vec::with_capacity(count);
        samples.push(Sample::from_value(clamped.start(), first));
        for index in 1..count {
            let mut x = clamped.start() + increment * index as f64;
            if index == count - 1 && (clamped.end() - x).abs() < self.tuning.snap_epsilon {
                x = clamped.end();
            }
            samples.push(Sample::from_value(x, f.evaluate(x)));
        }

        trace!(
            start = clamped.start(),
            end = clamped.end(),
            count,
            "sampled curve"
        );
        Ok(samples)
    }

    fn clamp(&self, range: XRange) -> ClipResult<XRange> {
        self.viewport.clamp_x_range(range).ok_or_else(|| {
            ClipError::EmptyInput(format!(
                "x-range [{}, {}] does not overlap the viewport",
                range.start(),
                range.end()
            ))
        })
    }
}

fn resolution_for_width(width_px: f64, tuning: SamplerTuning) -> usize {
    if !width_px.is_finite() || width_px <= 0.0 {
        return tuning.min_samples;
    }
    let raw = (width_px / tuning.pixel_spacing_px).floor() as usize;
    raw.max(tuning.min_samples)
}
