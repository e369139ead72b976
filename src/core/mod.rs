pub mod aggregation;
pub mod clipping;
pub mod crossing;
pub mod sample;
pub mod sampler;
pub mod scale;
pub mod types;

pub use aggregation::{SeriesAggregator, SeriesPoint};
pub use clipping::{ClipTuning, ClippingAssembler};
pub use crossing::{BoundaryCrossingSolver, SolverTuning};
pub use sample::{CurveValue, Evaluate, Run, Sample};
pub use sampler::{CurveSampler, MAX_SAMPLE_COUNT, SamplerTuning};
pub use scale::LinearScale;
pub use types::{PlotSize, Viewport, XRange};
