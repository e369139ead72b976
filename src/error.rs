use thiserror::Error;

pub type ClipResult<T> = Result<T, ClipError>;

#[derive(Debug, Error)]
pub enum ClipError {
    #[error("invalid {axis} range: min={min}, max={max}")]
    InvalidRange {
        axis: &'static str,
        min: f64,
        max: f64,
    },

    #[error("function did not yield a finite value at x={x}")]
    InvalidFunction { x: f64 },

    #[error("empty input: {0}")]
    EmptyInput(String),

    #[error("invalid plot size: width={width}, height={height}")]
    InvalidPlotSize { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
