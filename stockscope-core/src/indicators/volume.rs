//! Volume average and relative volume.
//!
//! volume_sma = mean(volume, period); volume_ratio = latest volume / volume_sma,
//! or 1.0 when the average is zero. Requires `period` bars.

use super::sma::mean;
use super::Calculator;
use crate::domain::PriceBar;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeStats {
    pub volume: f64,
    pub volume_sma: f64,
    pub volume_ratio: f64,
}

#[derive(Debug, Clone)]
pub struct VolumeAverage {
    period: usize,
}

impl VolumeAverage {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "volume period must be >= 1");
        Self { period }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Default for VolumeAverage {
    fn default() -> Self {
        Self::new(20)
    }
}

impl Calculator for VolumeAverage {
    type Output = VolumeStats;

    fn name(&self) -> &'static str {
        "Volume"
    }

    fn required_bars(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[PriceBar]) -> Result<VolumeStats, EngineError> {
        self.ensure_len(bars)?;
        let window: Vec<f64> = bars[bars.len() - self.period..]
            .iter()
            .map(|b| b.volume)
            .collect();
        let volume = window[window.len() - 1];
        let volume_sma = mean(&window);

        let volume_ratio = if volume_sma == 0.0 {
            warn!(period = self.period, "zero average volume, reporting ratio 1.0");
            1.0
        } else {
            volume / volume_sma
        };

        Ok(VolumeStats {
            volume,
            volume_sma,
            volume_ratio,
        })
    }
}
