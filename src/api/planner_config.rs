use serde::{Deserialize, Serialize};

use crate::core::{ClipTuning, PlotSize, SamplerTuning, SolverTuning, Viewport};
use crate::error::{ClipError, ClipResult};

/// Planner bootstrap configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPlannerConfig {
    pub viewport: Viewport,
    pub plot_size: PlotSize,
    #[serde(default)]
    pub sampler_tuning: SamplerTuning,
    #[serde(default)]
    pub solver_tuning: SolverTuning,
    #[serde(default)]
    pub clip_tuning: ClipTuning,
}

impl PlotPlannerConfig {
    /// Creates a config with default sampling, solver and clipping tuning.
    #[must_use]
    pub fn new(viewport: Viewport, plot_size: PlotSize) -> Self {
        Self {
            viewport,
            plot_size,
            sampler_tuning: SamplerTuning::default(),
            solver_tuning: SolverTuning::default(),
            clip_tuning: ClipTuning::default(),
        }
    }

    /// Sets whether curves may be drawn beyond the viewport.
    #[must_use]
    pub fn with_overflow(mut self, allow_overflow: bool) -> Self {
        self.viewport = self.viewport.with_overflow(allow_overflow);
        self
    }

    /// Sets the on-screen distance between automatic samples.
    #[must_use]
    pub fn with_pixel_spacing(mut self, pixel_spacing_px: f64) -> Self {
        self.sampler_tuning.pixel_spacing_px = pixel_spacing_px;
        self
    }

    #[must_use]
    pub fn with_sampler_tuning(mut self, tuning: SamplerTuning) -> Self {
        self.sampler_tuning = tuning;
        self
    }

    #[must_use]
    pub fn with_solver_tuning(mut self, tuning: SolverTuning) -> Self {
        self.solver_tuning = tuning;
        self
    }

    #[must_use]
    pub fn with_clip_tuning(mut self, tuning: ClipTuning) -> Self {
        self.clip_tuning = tuning;
        self
    }

    /// Checks plot size and every tuning block.
    ///
    /// The viewport needs no check here: it is validated on construction and
    /// on deserialization.
    pub fn validate(self) -> ClipResult<Self> {
        self.plot_size.validate()?;
        self.sampler_tuning.validate()?;
        self.solver_tuning.validate()?;
        self.clip_tuning.validate()?;
        Ok(self)
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> ClipResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ClipError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ClipResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ClipError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()
    }
}
