use indexmap::IndexMap;
use tracing::debug;

#[cfg(feature = "parallel-planning")]
use rayon::prelude::*;

use crate::core::{
    BoundaryCrossingSolver, ClippingAssembler, CurveSampler, Run, Sample, SeriesAggregator,
    SeriesPoint, Viewport, XRange,
};
use crate::error::ClipResult;

use super::{CurveKind, FunctionPlot, Interpolation, PlannedCurve, PlotPlannerConfig};

/// Decides what to draw for functions and discrete series inside one viewport.
///
/// The planner owns no data: each call takes its inputs and returns freshly
/// allocated curves, so one planner can serve any number of threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPlanner {
    config: PlotPlannerConfig,
    sampler: CurveSampler,
    assembler: ClippingAssembler,
    aggregator: SeriesAggregator,
}

impl PlotPlanner {
    pub fn new(config: PlotPlannerConfig) -> ClipResult<Self> {
        let config = config.validate()?;
        let sampler =
            CurveSampler::with_tuning(config.viewport, config.plot_size, config.sampler_tuning)?;
        let solver = BoundaryCrossingSolver::with_tuning(config.solver_tuning)?;
        let assembler =
            ClippingAssembler::new(config.viewport, solver).with_tuning(config.clip_tuning)?;

        Ok(Self {
            config,
            sampler,
            assembler,
            aggregator: SeriesAggregator::new(assembler),
        })
    }

    #[must_use]
    pub fn config(&self) -> PlotPlannerConfig {
        self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    #[must_use]
    pub fn sampler(&self) -> &CurveSampler {
        &self.sampler
    }

    #[must_use]
    pub fn assembler(&self) -> &ClippingAssembler {
        &self.assembler
    }

    /// Samples and clips one function.
    pub fn plan_function(&self, plot: &FunctionPlot) -> ClipResult<PlannedCurve> {
        let x_range = match plot.x_range {
            Some(range) => range,
            None => {
                let (x_min, x_max) = self.config.viewport.x_bounds();
                XRange::new(x_min, x_max)?
            }
        };

        let samples = self
            .sampler
            .sample(plot.function.as_ref(), x_range, plot.resolution)?;
        let kind = if samples.first().is_some_and(|sample| sample.is_area()) {
            CurveKind::Area
        } else {
            CurveKind::Line
        };
        let runs = self.assembler.clip_with(&samples, plot.function.as_ref());

        debug!(
            id = %plot.id,
            sample_count = samples.len(),
            run_count = runs.len(),
            "planned function curve"
        );
        Ok(PlannedCurve {
            id: plot.id.clone(),
            kind,
            interpolation: plot.interpolation,
            style: plot.style.clone(),
            runs,
            source: Some(plot.function.clone()),
        })
    }

    /// Plans several functions; results keep the input order.
    pub fn plan_functions(&self, plots: &[FunctionPlot]) -> ClipResult<Vec<PlannedCurve>> {
        plots.iter().map(|plot| self.plan_function(plot)).collect()
    }

    /// Same output as [`Self::plan_functions`], planned on the rayon pool.
    #[cfg(feature = "parallel-planning")]
    pub fn plan_functions_parallel(
        &self,
        plots: &[FunctionPlot],
    ) -> ClipResult<Vec<PlannedCurve>> {
        let planned: Vec<ClipResult<PlannedCurve>> = plots
            .par_iter()
            .map(|plot| self.plan_function(plot))
            .collect();
        planned.into_iter().collect()
    }

    /// Merges, sorts and clips discrete points into one line curve per series.
    ///
    /// Curves come out in first-seen series order; the series name becomes
    /// both the curve id and its style tag.
    pub fn plan_points(
        &self,
        points: &[SeriesPoint],
        interpolation: Interpolation,
    ) -> ClipResult<Vec<PlannedCurve>> {
        let runs_by_series: IndexMap<String, _> = self.aggregator.aggregate(points)?;
        Ok(runs_by_series
            .into_iter()
            .map(|(series, runs)| PlannedCurve {
                style: Some(series.clone()),
                id: series,
                kind: CurveKind::Line,
                interpolation,
                runs,
                source: None,
            })
            .collect())
    }

    /// Merges discrete points into one marker curve per series.
    ///
    /// Out-of-window points are dropped and nothing is connected, so each
    /// non-empty series yields a single run regardless of gaps.
    pub fn plan_scatter(&self, points: &[SeriesPoint]) -> ClipResult<Vec<PlannedCurve>> {
        let viewport = self.config.viewport;
        let merged = self.aggregator.merge(points)?;
        Ok(merged
            .into_iter()
            .map(|(series, group)| {
                let samples: Vec<Sample> = group
                    .iter()
                    .filter(|point| viewport.allow_overflow() || viewport.contains(point.x, point.y))
                    .map(|point| Sample::line(point.x, point.y))
                    .collect();
                let runs = if samples.is_empty() {
                    Vec::new()
                } else {
                    vec![Run::new(samples)]
                };
                PlannedCurve {
                    style: Some(series.clone()),
                    id: series,
                    kind: CurveKind::Points,
                    interpolation: Interpolation::default(),
                    runs,
                    source: None,
                }
            })
            .collect())
    }
}
