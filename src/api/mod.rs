mod planner;
mod planner_config;
mod plot_request;
mod snapshot_controller;

pub use planner::PlotPlanner;
pub use planner_config::PlotPlannerConfig;
pub use plot_request::{CurveKind, FunctionPlot, Interpolation, PlannedCurve, SharedCurveFn};
pub use snapshot_controller::{CurveSnapshot, PlanSnapshot};
