//! Engine configuration.
//!
//! Every indicator period and multiplier, the support/resistance finder
//! parameters and the display settings. Stored as TOML; every section and
//! field is optional and falls back to the industry-standard defaults:
//!
//! ```toml
//! [moving_averages]
//! sma_short = 20
//! sma_long = 50
//!
//! [macd]
//! fast = 12
//! slow = 26
//! signal = 9
//!
//! [levels]
//! lookback = 20
//! neighborhood = 2
//! tolerance_pct = 0.5
//! max_levels = 3
//! ```

use crate::validate::Requirement;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading or validating an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("{field} must be >= 1")]
    ZeroPeriod { field: &'static str },

    #[error("{field} must be a positive finite number, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("MACD fast period ({fast}) must be shorter than slow period ({slow})")]
    MacdOrder { fast: usize, slow: usize },

    #[error("levels.lookback ({lookback}) must exceed twice levels.neighborhood ({neighborhood})")]
    LevelWindow { lookback: usize, neighborhood: usize },

    #[error("display.decimals ({decimals}) must be at most {}", MAX_DECIMALS)]
    Decimals { decimals: usize },
}

/// Upper bound on `display.decimals`.
pub const MAX_DECIMALS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovingAverageConfig {
    pub sma_short: usize,
    pub sma_long: usize,
}

impl Default for MovingAverageConfig {
    fn default() -> Self {
        Self {
            sma_short: 20,
            sma_long: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiConfig {
    pub period: usize,
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// MACD periods. The fast and slow periods also drive the snapshot's
/// `ema_12` / `ema_26` fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdConfig {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BollingerConfig {
    pub period: usize,
    pub multiplier: f64,
}

impl Default for BollingerConfig {
    fn default() -> Self {
        Self {
            period: 20,
            multiplier: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StochasticConfig {
    pub k_period: usize,
    pub d_period: usize,
}

impl Default for StochasticConfig {
    fn default() -> Self {
        Self {
            k_period: 14,
            d_period: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtrConfig {
    pub period: usize,
}

impl Default for AtrConfig {
    fn default() -> Self {
        Self { period: 14 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    pub period: usize,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// Support/resistance finder parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Trailing bars scanned for local extrema.
    pub lookback: usize,
    /// Bars on each side a candidate must strictly beat.
    pub neighborhood: usize,
    /// Candidates closer than this percentage are merged.
    pub tolerance_pct: f64,
    /// Levels kept per side, nearest to the current price first.
    pub max_levels: usize,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            lookback: 20,
            neighborhood: 2,
            tolerance_pct: 0.5,
            max_levels: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Currency symbol used when the symbol trades on the domestic market.
    pub domestic_symbol: String,
    pub decimals: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            domestic_symbol: "₹".into(),
            decimals: 2,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub moving_averages: MovingAverageConfig,
    pub rsi: RsiConfig,
    pub macd: MacdConfig,
    pub bollinger: BollingerConfig,
    pub stochastic: StochasticConfig,
    pub atr: AtrConfig,
    pub volume: VolumeConfig,
    pub levels: LevelConfig,
    pub display: DisplayConfig,
}

impl EngineConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            ("moving_averages.sma_short", self.moving_averages.sma_short),
            ("moving_averages.sma_long", self.moving_averages.sma_long),
            ("rsi.period", self.rsi.period),
            ("macd.fast", self.macd.fast),
            ("macd.slow", self.macd.slow),
            ("macd.signal", self.macd.signal),
            ("bollinger.period", self.bollinger.period),
            ("stochastic.k_period", self.stochastic.k_period),
            ("stochastic.d_period", self.stochastic.d_period),
            ("atr.period", self.atr.period),
            ("volume.period", self.volume.period),
            ("levels.lookback", self.levels.lookback),
            ("levels.neighborhood", self.levels.neighborhood),
            ("levels.max_levels", self.levels.max_levels),
        ];
        for (field, value) in periods {
            if value == 0 {
                return Err(ConfigError::ZeroPeriod { field });
            }
        }

        let positives = [
            ("bollinger.multiplier", self.bollinger.multiplier),
            ("levels.tolerance_pct", self.levels.tolerance_pct),
        ];
        for (field, value) in positives {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.macd.fast >= self.macd.slow {
            return Err(ConfigError::MacdOrder {
                fast: self.macd.fast,
                slow: self.macd.slow,
            });
        }

        if self.levels.lookback <= 2 * self.levels.neighborhood {
            return Err(ConfigError::LevelWindow {
                lookback: self.levels.lookback,
                neighborhood: self.levels.neighborhood,
            });
        }

        if self.display.decimals > MAX_DECIMALS {
            return Err(ConfigError::Decimals {
                decimals: self.display.decimals,
            });
        }

        Ok(())
    }

    /// Bars each indicator needs, in snapshot order.
    pub fn requirements(&self) -> Vec<Requirement> {
        vec![
            Requirement::new("SMA", self.moving_averages.sma_short),
            Requirement::new("SMA", self.moving_averages.sma_long),
            Requirement::new("EMA", self.macd.fast.max(self.macd.slow)),
            Requirement::new("RSI", self.rsi.period + 1),
            Requirement::new("MACD", self.macd.slow + self.macd.signal),
            Requirement::new("Bollinger", self.bollinger.period),
            Requirement::new(
                "Stochastic",
                (self.stochastic.k_period + self.stochastic.d_period).saturating_sub(1),
            ),
            Requirement::new("ATR", self.atr.period),
            Requirement::new("Volume", self.volume.period),
            Requirement::new("PriceChange", 6),
            Requirement::new("SupportResistance", 2 * self.levels.neighborhood + 1),
            Requirement::new("Pivot", 1),
        ]
    }

    /// The longest lookback across all indicators. On a tie the indicator
    /// listed first in [`requirements`](Self::requirements) is named.
    pub fn required_bars(&self) -> Requirement {
        self.requirements()
            .into_iter()
            .fold(Requirement::new("Pivot", 1), |best, req| {
                if req.bars > best.bars {
                    req
                } else {
                    best
                }
            })
    }

    /// Deterministic BLAKE3 hash of the canonical JSON form.
    pub fn fingerprint(&self) -> String {
        // Struct fields serialize in declaration order, so the JSON is stable
        let canonical = serde_json::to_string(self).unwrap_or_default();
        blake3::hash(canonical.as_bytes()).to_hex().to_string()
    }
}
