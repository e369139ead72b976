use crate::core::types::PlotSize;
use crate::error::{ClipError, ClipResult};

/// Linear value-to-pixel mapping along the horizontal plot axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ClipResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ClipError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64, plot_size: PlotSize) -> ClipResult<f64> {
        let plot_size = plot_size.validate()?;
        if !value.is_finite() {
            return Err(ClipError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(normalized * f64::from(plot_size.width))
    }

    pub fn pixel_to_domain(self, pixel: f64, plot_size: PlotSize) -> ClipResult<f64> {
        let plot_size = plot_size.validate()?;
        if !pixel.is_finite() {
            return Err(ClipError::InvalidData("pixel must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = pixel / f64::from(plot_size.width);
        Ok(self.domain_start + normalized * span)
    }

    /// Pixel distance covered by the value interval `[start, end]`.
    pub fn span_to_pixels(self, start: f64, end: f64, plot_size: PlotSize) -> ClipResult<f64> {
        let left = self.domain_to_pixel(start, plot_size)?;
        let right = self.domain_to_pixel(end, plot_size)?;
        Ok((right - left).abs())
    }
}
