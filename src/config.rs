use crate::errors::RangeError;

pub const DEFAULT_CEILING: f64 = 10.0;
pub const DEFAULT_MAX_TICKS: usize = 100;
pub const MAX_SAMPLES: usize = 100_000;

/// Overridable parameters of a plot request.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Samples across the domain, between 2 and [`MAX_SAMPLES`]. `None` means one
    /// per horizontal pixel, and never fewer than 2 even on a 1-pixel viewport.
    pub sample_count: Option<usize>,
    /// Largest |y| shown; the detected range and every plotted point are clamped to it.
    pub display_y_ceiling: f64,
    pub tick_half_length: f64,
    /// Offset of an x tick label from the tick's axis crossing.
    pub x_label_offset: (f64, f64),
    pub y_label_offset: (f64, f64),
    pub max_ticks: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            sample_count: None,
            display_y_ceiling: DEFAULT_CEILING,
            tick_half_length: 5.0,
            x_label_offset: (-10.0, 20.0),
            y_label_offset: (10.0, 5.0),
            max_ticks: DEFAULT_MAX_TICKS,
        }
    }
}

impl PlotConfig {
    /// Layout for character grids, where one pixel is one terminal cell.
    pub fn cells() -> Self {
        PlotConfig {
            tick_half_length: 0.0,
            x_label_offset: (0.0, 1.0),
            y_label_offset: (2.0, 0.0),
            ..PlotConfig::default()
        }
    }

    pub fn with_sample_count(mut self, sample_count: Option<usize>) -> Self {
        self.sample_count = sample_count;
        self
    }

    pub fn with_ceiling(mut self, ceiling: f64) -> Self {
        self.display_y_ceiling = ceiling;
        self
    }

    pub fn with_max_ticks(mut self, max_ticks: usize) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn validate(&self) -> Result<(), RangeError> {
        if !(self.display_y_ceiling.is_finite() && self.display_y_ceiling > 0.0) {
            return Err(RangeError::InvalidCeiling(self.display_y_ceiling));
        }
        match self.sample_count {
            Some(count) if count < 2 => Err(RangeError::TooFewSamples(count)),
            Some(count) if count > MAX_SAMPLES => Err(RangeError::TooManySamples(count)),
            _ => Ok(()),
        }
    }

    /// Sample count for a viewport `width` pixels wide.
    pub fn samples_for(&self, width: u32) -> usize {
        self.sample_count.unwrap_or((width as usize).max(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PlotConfig::default();
        assert_eq!(config.display_y_ceiling, 10.0);
        assert_eq!(config.samples_for(640), 640);
        assert_eq!(config.samples_for(1), 2);
        assert_eq!(config.with_sample_count(Some(50)).samples_for(640), 50);
    }

    #[test]
    fn validation() {
        assert!(PlotConfig::default().validate().is_ok());
        assert_eq!(
            PlotConfig::default().with_ceiling(-1.0).validate(),
            Err(RangeError::InvalidCeiling(-1.0))
        );
        assert_eq!(
            PlotConfig::cells().with_sample_count(Some(1)).validate(),
            Err(RangeError::TooFewSamples(1))
        );
        assert!(PlotConfig::default().with_sample_count(Some(MAX_SAMPLES)).validate().is_ok());
        assert_eq!(
            PlotConfig::default().with_sample_count(Some(1_000_000_000)).validate(),
            Err(RangeError::TooManySamples(1_000_000_000))
        );
    }
}
