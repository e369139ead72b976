use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{ClippingAssembler, Run, Sample};
use crate::error::{ClipError, ClipResult};

/// Discrete `(x, y)` observation belonging to a named series.
///
/// `weight` counts how many original observations were averaged into this
/// point; freshly created points carry a weight of 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub series: String,
    pub x: f64,
    pub y: f64,
    pub weight: u32,
}

impl SeriesPoint {
    #[must_use]
    pub fn new(series: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            series: series.into(),
            x,
            y,
            weight: 1,
        }
    }

    /// Builds a point keyed by UNIX seconds from a timestamp and decimal value.
    pub fn from_decimal_time(
        series: impl Into<String>,
        time: DateTime<Utc>,
        value: Decimal,
    ) -> ClipResult<Self> {
        let y = value.to_f64().ok_or_else(|| {
            ClipError::InvalidData("value cannot be represented as f64".to_owned())
        })?;
        let x = time.timestamp_millis() as f64 / 1000.0;
        Ok(Self::new(series, x, y))
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Folds `other` into `self` as a weighted running mean.
    fn absorb(&mut self, other: &SeriesPoint) {
        let own = f64::from(self.weight);
        let incoming = f64::from(other.weight.max(1));
        self.y = (self.y * own + other.y * incoming) / (own + incoming);
        self.weight = self.weight.saturating_add(other.weight.max(1));
    }
}

/// Groups discrete points by series, averages duplicate x-coordinates and
/// turns each series into clipped runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesAggregator {
    assembler: ClippingAssembler,
}

impl SeriesAggregator {
    #[must_use]
    pub fn new(assembler: ClippingAssembler) -> Self {
        Self { assembler }
    }

    /// Per-series merged points in ascending x, series in first-seen order.
    ///
    /// Points with a non-finite coordinate are dropped.
    pub fn merge(
        &self,
        points: &[SeriesPoint],
    ) -> ClipResult<IndexMap<String, Vec<SeriesPoint>>> {
        if points.is_empty() {
            return Err(ClipError::EmptyInput("no series points".to_owned()));
        }

        let mut groups: IndexMap<String, Vec<&SeriesPoint>> = IndexMap::new();
        let mut filtered_count = 0_usize;
        for point in points {
            if !point.is_finite() {
                filtered_count += 1;
                continue;
            }
            groups.entry(point.series.clone()).or_default().push(point);
        }
        if filtered_count > 0 {
            warn!(filtered_count, "dropped non-finite series points");
        }

        let merged = groups
            .into_iter()
            .map(|(series, mut group)| {
                group.sort_by_key(|point| OrderedFloat(point.x));
                (series, merge_sorted(&group))
            })
            .collect();
        Ok(merged)
    }

    /// Runs per series, series in first-seen order.
    ///
    /// A series left with fewer than two merged points has nothing to
    /// connect and maps to an empty run list.
    pub fn aggregate(&self, points: &[SeriesPoint]) -> ClipResult<IndexMap<String, Vec<Run>>> {
        let merged = self.merge(points)?;
        let runs: IndexMap<String, Vec<Run>> = merged
            .into_iter()
            .map(|(series, group)| {
                let runs = if group.len() < 2 {
                    Vec::new()
                } else {
                    let samples: Vec<Sample> = group
                        .iter()
                        .map(|point| Sample::line(point.x, point.y))
                        .collect();
                    self.assembler.clip(&samples)
                };
                (series, runs)
            })
            .collect();

        debug!(
            input_count = points.len(),
            series_count = runs.len(),
            run_count = runs.values().map(Vec::len).sum::<usize>(),
            "aggregated series points"
        );
        Ok(runs)
    }
}

fn merge_sorted(group: &[&SeriesPoint]) -> Vec<SeriesPoint> {
    let mut merged: Vec<SeriesPoint> = Vec::with_capacity(group.len());
    for point in group {
        match merged.last_mut() {
            Some(last) if last.x == point.x => last.absorb(point),
            _ => {
                let mut entry = (*point).clone();
                entry.weight = entry.weight.max(1);
                merged.push(entry);
            }
        }
    }
    merged
}
