use serde::{Deserialize, Serialize};

use crate::core::{PlotSize, Run, Viewport};
use crate::error::{ClipError, ClipResult};

use super::{CurveKind, Interpolation, PlannedCurve, PlotPlanner};

/// Serializable view of one planned curve, without its function handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSnapshot {
    pub id: String,
    pub kind: CurveKind,
    pub interpolation: Interpolation,
    pub style: Option<String>,
    pub from_function: bool,
    pub runs: Vec<Run>,
}

/// Deterministic dump of a planning pass for fixture-based regression checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSnapshot {
    pub viewport: Viewport,
    pub plot_size: PlotSize,
    pub curves: Vec<CurveSnapshot>,
}

impl PlotPlanner {
    #[must_use]
    pub fn snapshot(&self, curves: &[PlannedCurve]) -> PlanSnapshot {
        PlanSnapshot {
            viewport: self.config().viewport,
            plot_size: self.config().plot_size,
            curves: curves
                .iter()
                .map(|curve| CurveSnapshot {
                    id: curve.id.clone(),
                    kind: curve.kind,
                    interpolation: curve.interpolation,
                    style: curve.style.clone(),
                    from_function: curve.source.is_some(),
                    runs: curve.runs.clone(),
                })
                .collect(),
        }
    }

    /// Serializes a snapshot as pretty JSON.
    pub fn snapshot_json_pretty(&self, curves: &[PlannedCurve]) -> ClipResult<String> {
        let snapshot = self.snapshot(curves);
        serde_json::to_string_pretty(&snapshot)
            .map_err(|e| ClipError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
