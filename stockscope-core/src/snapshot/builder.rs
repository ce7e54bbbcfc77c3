//! Snapshot builder — validates a series once and runs every calculator.
//!
//! Any calculator failure aborts the whole snapshot; there are no partial
//! results. Every numeric output is checked for finiteness before it is
//! stored, so a NaN can only surface as a `Computation` error.

use super::format::DisplayFormatter;
use super::{DisplayValues, TechnicalSnapshot};
use crate::config::{ConfigError, EngineConfig};
use crate::domain::{PriceBar, PriceSeries};
use crate::error::{ensure_finite, EngineError};
use crate::indicators::{
    Atr, Bollinger, Calculator, Ema, LevelFinder, Macd, Pivot, PriceChange, Rsi, Sma, Stochastic,
    VolumeAverage,
};
use crate::validate::{validate_series, Requirement};
use std::time::Instant;
use tracing::debug;

/// Builds [`TechnicalSnapshot`]s from a validated configuration.
///
/// Holds only calculator parameters, so one builder can be shared across
/// threads and reused for any number of series.
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    config: EngineConfig,
    requirement: Requirement,
    sma_short: Sma,
    sma_long: Sma,
    ema_fast: Ema,
    ema_slow: Ema,
    rsi: Rsi,
    macd: Macd,
    bollinger: Bollinger,
    stochastic: Stochastic,
    atr: Atr,
    volume: VolumeAverage,
    change_1d: PriceChange,
    change_5d: PriceChange,
    levels: LevelFinder,
    pivot: Pivot,
}

impl SnapshotBuilder {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    /// Calculator constructors assert on their parameters, so `config` must
    /// already have passed [`EngineConfig::validate`].
    fn from_validated(config: EngineConfig) -> Self {
        Self {
            requirement: config.required_bars(),
            sma_short: Sma::new(config.moving_averages.sma_short),
            sma_long: Sma::new(config.moving_averages.sma_long),
            ema_fast: Ema::new(config.macd.fast),
            ema_slow: Ema::new(config.macd.slow),
            rsi: Rsi::new(config.rsi.period),
            macd: Macd::new(config.macd.fast, config.macd.slow, config.macd.signal),
            bollinger: Bollinger::new(config.bollinger.period, config.bollinger.multiplier),
            stochastic: Stochastic::new(config.stochastic.k_period, config.stochastic.d_period),
            atr: Atr::new(config.atr.period),
            volume: VolumeAverage::new(config.volume.period),
            change_1d: PriceChange::new(1),
            change_5d: PriceChange::new(5),
            levels: LevelFinder::from_config(&config.levels),
            pivot: Pivot,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Minimum series length and the indicator that imposes it.
    pub fn requirement(&self) -> Requirement {
        self.requirement
    }

    /// Compute every indicator at the latest bar of `series`.
    pub fn build(
        &self,
        series: &PriceSeries,
        symbol: &str,
        is_domestic_market: bool,
        currency: &str,
    ) -> Result<TechnicalSnapshot, EngineError> {
        let started = Instant::now();
        let bars = series.bars();
        validate_series(bars, self.requirement)?;

        let snapshot = self.assemble(bars, symbol, is_domestic_market, currency)?;

        debug!(
            symbol = %snapshot.symbol,
            bars = bars.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "snapshot built"
        );
        Ok(snapshot)
    }

    fn assemble(
        &self,
        bars: &[PriceBar],
        symbol: &str,
        is_domestic_market: bool,
        currency: &str,
    ) -> Result<TechnicalSnapshot, EngineError> {
        let last = *bars.last().ok_or(EngineError::InsufficientData {
            indicator: self.requirement.indicator,
            required: self.requirement.bars,
            actual: 0,
        })?;

        let rsi = checked(&self.rsi, bars, |v| vec![("rsi", *v)])?;
        let sma_20 = checked(&self.sma_short, bars, |v| vec![("sma_20", *v)])?;
        let sma_50 = checked(&self.sma_long, bars, |v| vec![("sma_50", *v)])?;
        let ema_12 = checked(&self.ema_fast, bars, |v| vec![("ema_12", *v)])?;
        let ema_26 = checked(&self.ema_slow, bars, |v| vec![("ema_26", *v)])?;
        let macd = checked(&self.macd, bars, |m| {
            vec![
                ("macd", m.line),
                ("macd_signal", m.signal),
                ("macd_histogram", m.histogram),
            ]
        })?;
        let bollinger = checked(&self.bollinger, bars, |b| {
            vec![
                ("bollinger.upper", b.upper),
                ("bollinger.middle", b.middle),
                ("bollinger.lower", b.lower),
            ]
        })?;
        let stochastic = checked(&self.stochastic, bars, |s| {
            vec![("stochastic.k", s.k), ("stochastic.d", s.d)]
        })?;
        let atr = checked(&self.atr, bars, |v| vec![("atr", *v)])?;
        let volume = checked(&self.volume, bars, |v| {
            vec![
                ("volume", v.volume),
                ("volume_sma_20", v.volume_sma),
                ("volume_ratio", v.volume_ratio),
            ]
        })?;
        let price_change_1d = checked(&self.change_1d, bars, |v| vec![("price_change_1d", *v)])?;
        let price_change_5d = checked(&self.change_5d, bars, |v| vec![("price_change_5d", *v)])?;
        let levels = checked(&self.levels, bars, |l| {
            l.support
                .iter()
                .map(|v| ("support_levels", *v))
                .chain(l.resistance.iter().map(|v| ("resistance_levels", *v)))
                .collect()
        })?;
        let pivot_points = checked(&self.pivot, bars, |p| {
            vec![
                ("pivot", p.pivot),
                ("r1", p.r1),
                ("r2", p.r2),
                ("s1", p.s1),
                ("s2", p.s2),
            ]
        })?;

        let fmt = DisplayFormatter::new(&self.config.display, is_domestic_market, currency);
        let display = DisplayValues {
            current_price: fmt.price(last.close),
            rsi: fmt.number(rsi),
            macd: fmt.number(macd.line),
            macd_signal: fmt.number(macd.signal),
            macd_histogram: fmt.number(macd.histogram),
            sma_20: fmt.price(sma_20),
            sma_50: fmt.price(sma_50),
            ema_12: fmt.price(ema_12),
            ema_26: fmt.price(ema_26),
            bollinger_upper: fmt.price(bollinger.upper),
            bollinger_middle: fmt.price(bollinger.middle),
            bollinger_lower: fmt.price(bollinger.lower),
            stochastic_k: fmt.number(stochastic.k),
            stochastic_d: fmt.number(stochastic.d),
            atr: fmt.price(atr),
            volume: fmt.volume(volume.volume),
            volume_sma_20: fmt.volume(volume.volume_sma),
            volume_ratio: fmt.ratio(volume.volume_ratio),
            price_change_1d: fmt.percent(price_change_1d),
            price_change_5d: fmt.percent(price_change_5d),
            support_levels: levels.support.iter().map(|v| fmt.price(*v)).collect(),
            resistance_levels: levels.resistance.iter().map(|v| fmt.price(*v)).collect(),
            pivot: fmt.price(pivot_points.pivot),
            r1: fmt.price(pivot_points.r1),
            r2: fmt.price(pivot_points.r2),
            s1: fmt.price(pivot_points.s1),
            s2: fmt.price(pivot_points.s2),
        };

        Ok(TechnicalSnapshot {
            symbol: symbol.trim().to_uppercase(),
            current_price: last.close,
            currency: currency.to_uppercase(),
            is_domestic_market,
            last_updated: last.timestamp,
            rsi,
            macd: macd.line,
            macd_signal: macd.signal,
            macd_histogram: macd.histogram,
            sma_20,
            sma_50,
            ema_12,
            ema_26,
            bollinger,
            stochastic,
            atr,
            volume: volume.volume,
            volume_sma_20: volume.volume_sma,
            volume_ratio: volume.volume_ratio,
            price_change_1d,
            price_change_5d,
            support_levels: levels.support,
            resistance_levels: levels.resistance,
            pivot_points,
            display,
        })
    }
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::from_validated(EngineConfig::default())
    }
}

/// Run `calc` and check every value `fields` extracts for finiteness.
fn checked<C, F>(calc: &C, bars: &[PriceBar], fields: F) -> Result<C::Output, EngineError>
where
    C: Calculator,
    F: FnOnce(&C::Output) -> Vec<(&'static str, f64)>,
{
    let output = calc.compute(bars)?;
    for (field, value) in fields(&output) {
        ensure_finite(calc.name(), field, value)?;
    }
    Ok(output)
}

/// Build a snapshot with the default configuration.
pub fn compute_snapshot(
    series: &PriceSeries,
    symbol: &str,
    is_domestic_market: bool,
    currency: &str,
) -> Result<TechnicalSnapshot, EngineError> {
    SnapshotBuilder::default().build(series, symbol, is_domestic_market, currency)
}
