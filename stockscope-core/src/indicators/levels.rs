//! Support and resistance levels from local extrema.
//!
//! Within the trailing `lookback` window, a low is a support candidate when it
//! is strictly lower than the `neighborhood` lows on each side of it; highs are
//! resistance candidates by the symmetric rule. Candidates closer than
//! `tolerance_pct` percent are merged into one level represented by an
//! observed value (the lowest support / highest resistance of the cluster),
//! so no level ever falls outside the window's high/low range. The
//! `max_levels` levels nearest to the current close are returned, ascending.

use super::Calculator;
use crate::config::LevelConfig;
use crate::domain::PriceBar;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportResistance {
    pub support: Vec<f64>,
    pub resistance: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Support,
    Resistance,
}

#[derive(Debug, Clone)]
pub struct LevelFinder {
    lookback: usize,
    neighborhood: usize,
    tolerance: f64,
    max_levels: usize,
}

impl LevelFinder {
    pub fn new(lookback: usize, neighborhood: usize, tolerance_pct: f64, max_levels: usize) -> Self {
        assert!(neighborhood >= 1, "level neighborhood must be >= 1");
        assert!(
            lookback > 2 * neighborhood,
            "level lookback must exceed twice the neighborhood"
        );
        assert!(tolerance_pct >= 0.0, "level tolerance must be >= 0");
        Self {
            lookback,
            neighborhood,
            tolerance: tolerance_pct / 100.0,
            max_levels,
        }
    }

    pub fn from_config(config: &LevelConfig) -> Self {
        Self::new(
            config.lookback,
            config.neighborhood,
            config.tolerance_pct,
            config.max_levels,
        )
    }

    fn candidates(&self, values: &[f64], side: Side) -> Vec<f64> {
        let k = self.neighborhood;
        if values.len() < 2 * k + 1 {
            return Vec::new();
        }
        (k..values.len() - k)
            .filter(|&i| {
                let v = values[i];
                values[i - k..i]
                    .iter()
                    .chain(&values[i + 1..=i + k])
                    .all(|&other| match side {
                        Side::Support => v < other,
                        Side::Resistance => v > other,
                    })
            })
            .map(|i| values[i])
            .collect()
    }

    /// Merge candidates within the tolerance band, keeping one observed value
    /// per cluster. Output is ascending.
    fn cluster(&self, mut candidates: Vec<f64>, side: Side) -> Vec<f64> {
        candidates.sort_by(f64::total_cmp);

        let mut levels: Vec<f64> = Vec::new();
        let mut clusters: Vec<Vec<f64>> = Vec::new();
        for value in candidates {
            match clusters.last_mut() {
                Some(cluster) if value - cluster[0] <= cluster[0].abs() * self.tolerance => {
                    cluster.push(value)
                }
                _ => clusters.push(vec![value]),
            }
        }
        for cluster in clusters {
            let representative = match side {
                Side::Support => cluster[0],
                Side::Resistance => cluster[cluster.len() - 1],
            };
            levels.push(representative);
        }
        levels
    }

    fn nearest(&self, mut levels: Vec<f64>, current: f64) -> Vec<f64> {
        levels.sort_by(|a, b| {
            let da = (a - current).abs();
            let db = (b - current).abs();
            da.total_cmp(&db).then_with(|| a.total_cmp(b))
        });
        levels.truncate(self.max_levels);
        levels.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        levels
    }

    fn levels(&self, window: &[PriceBar], current: f64, side: Side) -> Vec<f64> {
        let values: Vec<f64> = window
            .iter()
            .map(|b| match side {
                Side::Support => b.low,
                Side::Resistance => b.high,
            })
            .collect();
        let clustered = self.cluster(self.candidates(&values, side), side);
        self.nearest(clustered, current)
    }
}

impl Default for LevelFinder {
    fn default() -> Self {
        Self::from_config(&LevelConfig::default())
    }
}

impl Calculator for LevelFinder {
    type Output = SupportResistance;

    fn name(&self) -> &'static str {
        "SupportResistance"
    }

    fn required_bars(&self) -> usize {
        2 * self.neighborhood + 1
    }

    fn compute(&self, bars: &[PriceBar]) -> Result<SupportResistance, EngineError> {
        self.ensure_len(bars)?;
        let window = &bars[bars.len().saturating_sub(self.lookback)..];
        let current = window[window.len() - 1].close;

        Ok(SupportResistance {
            support: self.levels(window, current, Side::Support),
            resistance: self.levels(window, current, Side::Resistance),
        })
    }
}
