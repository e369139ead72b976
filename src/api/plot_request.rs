use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{Evaluate, Run, XRange};

/// Function handle shared between a plot request and its planned output.
pub type SharedCurveFn = Arc<dyn Evaluate + Send + Sync>;

/// How a renderer connects consecutive samples of a run.
///
/// Planning never interprets this tag; it is carried through verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Interpolation {
    #[default]
    Linear,
    Smooth,
    Step,
    StepBefore,
    StepAfter,
}

/// Geometry a planned curve describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CurveKind {
    /// Polyline through one value per sample.
    Line,
    /// Filled region between a bottom and a top value per sample.
    Area,
    /// Unconnected markers; runs carry the in-window points only.
    Points,
}

/// Request to plot a continuous function.
#[derive(Clone)]
pub struct FunctionPlot {
    pub id: String,
    pub function: SharedCurveFn,
    /// Defaults to the full viewport x-range.
    pub x_range: Option<XRange>,
    /// Defaults to the sampler's automatic resolution.
    pub resolution: Option<usize>,
    pub interpolation: Interpolation,
    pub style: Option<String>,
}

impl FunctionPlot {
    #[must_use]
    pub fn new<F>(id: impl Into<String>, function: F) -> Self
    where
        F: Evaluate + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            function: Arc::new(function),
            x_range: None,
            resolution: None,
            interpolation: Interpolation::default(),
            style: None,
        }
    }

    #[must_use]
    pub fn with_x_range(mut self, x_range: XRange) -> Self {
        self.x_range = Some(x_range);
        self
    }

    #[must_use]
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = Some(resolution);
        self
    }

    #[must_use]
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }
}

impl fmt::Debug for FunctionPlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionPlot")
            .field("id", &self.id)
            .field("x_range", &self.x_range)
            .field("resolution", &self.resolution)
            .field("interpolation", &self.interpolation)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

/// Clipped output for one logical curve or series, ready for a renderer.
#[derive(Clone)]
pub struct PlannedCurve {
    pub id: String,
    pub kind: CurveKind,
    pub interpolation: Interpolation,
    pub style: Option<String>,
    pub runs: Vec<Run>,
    /// Originating function; `None` for discrete series.
    pub source: Option<SharedCurveFn>,
}

impl PlannedCurve {
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.runs.iter().map(Run::len).sum()
    }

    /// `true` when nothing of the curve is inside the window.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

impl fmt::Debug for PlannedCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlannedCurve")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("interpolation", &self.interpolation)
            .field("style", &self.style)
            .field("runs", &self.runs)
            .field("has_source", &self.source.is_some())
            .finish()
    }
}
