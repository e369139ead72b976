//! curve-clip: value-space sampling and clipping core for charts.
//!
//! Given a continuous function or discrete point series and a rectangular
//! value-space window, this crate decides what a renderer should draw:
//! uniformly sampled curves, exact edge-crossing points and the in-window
//! runs between them. Rendering, scales-to-DOM and styling stay with the
//! caller.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{FunctionPlot, PlannedCurve, PlotPlanner, PlotPlannerConfig};
pub use error::{ClipError, ClipResult};
