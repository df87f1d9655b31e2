//! Engine configuration.
//!
//! One immutable object passed into the engine at construction. Every
//! number here is tunable policy; the defaults are one reasonable
//! weighting, and deployments override them through the `[engine]` and
//! `[weights]` config sections.

use crate::domain::error::PickError;
use crate::ports::config_port::ConfigPort;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Ticker whose series drives the regime detector.
    pub benchmark: String,
    /// How many instruments to buy.
    pub pick_count: usize,
    /// How many ranked candidates to show.
    pub shown_count: usize,
    /// Minimum bars an instrument needs to be evaluated at all.
    pub min_history: usize,
    /// Daily-return window for pairwise correlation.
    pub correlation_window: usize,
    /// Pairwise correlation ceiling during selection.
    pub correlation_threshold: f64,
    /// Days-remaining threshold for late-month mode.
    pub late_window: u32,
    /// Defensive/broad-market proxies that stay eligible in risk-off.
    pub defensive: Vec<String>,
    /// Exclude instruments whose 10-day return has decayed below 35% of
    /// a positive 20-day return.
    pub fade_guard: bool,
    pub weights: ScoreWeights,
}

#[derive(Debug, Clone)]
pub struct ScoreWeights {
    pub ret_60d: f64,
    pub ret_20d: f64,
    pub trend_bonus: f64,
    pub vol_penalty_risk_on: f64,
    pub vol_penalty_risk_off: f64,
    pub vol_penalty_late: f64,
    pub rel_strength: f64,
    pub surge_slope: f64,
    pub surge_cap: f64,
    /// ATR% at which the multiplicative damping would reach zero
    /// (clamped at `atr_floor`).
    pub atr_scale: f64,
    pub atr_floor: f64,
    pub staleness: f64,
    pub staleness_cap: u32,
    pub short_off_mult: f64,
    pub stickiness: f64,
    /// Optional penalty per unit of (RSI-70)/30 above 70. Off at 0.
    pub rsi_overbought: f64,
    /// Optional penalty per unit of trailing max drawdown. Off at 0.
    pub drawdown: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            ret_60d: 0.45,
            ret_20d: 0.25,
            trend_bonus: 0.06,
            vol_penalty_risk_on: 0.30,
            vol_penalty_risk_off: 0.55,
            vol_penalty_late: 0.20,
            rel_strength: 0.20,
            surge_slope: 0.04,
            surge_cap: 0.06,
            atr_scale: 0.20,
            atr_floor: 0.5,
            staleness: 0.01,
            staleness_cap: 5,
            short_off_mult: 0.75,
            stickiness: 0.02,
            rsi_overbought: 0.0,
            drawdown: 0.0,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            benchmark: "SPY".to_string(),
            pick_count: 4,
            shown_count: 10,
            min_history: 220,
            correlation_window: 60,
            correlation_threshold: 0.85,
            late_window: 7,
            defensive: ["SPY", "QQQ", "IWM", "DIA", "XLV"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            fade_guard: true,
            weights: ScoreWeights::default(),
        }
    }
}

/// Read an integer key that must fit the target unsigned type. A
/// negative value is a config error, never a silent wrap.
fn get_unsigned<T>(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: T,
) -> Result<T, PickError>
where
    T: TryFrom<i64> + Into<i64> + Copy,
{
    let raw = config.get_int(section, key, default.into());
    T::try_from(raw).map_err(|_| PickError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: format!("must not be negative (got {})", raw),
    })
}

fn get_count(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: usize,
) -> Result<usize, PickError> {
    let raw = config.get_int(section, key, default as i64);
    usize::try_from(raw).map_err(|_| PickError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: format!("must not be negative (got {})", raw),
    })
}

/// Build an [`EngineConfig`] from the `[engine]` and `[weights]`
/// sections, falling back to defaults for absent keys, then validate.
pub fn load_engine_config(config: &dyn ConfigPort) -> Result<EngineConfig, PickError> {
    let defaults = EngineConfig::default();
    let dw = &defaults.weights;

    let engine = EngineConfig {
        benchmark: config
            .get_string("engine", "benchmark")
            .map(|s| s.to_uppercase())
            .unwrap_or(defaults.benchmark),
        pick_count: get_count(config, "engine", "pick_count", defaults.pick_count)?,
        shown_count: get_count(config, "engine", "shown_count", defaults.shown_count)?,
        min_history: get_count(config, "engine", "min_history", defaults.min_history)?,
        correlation_window: get_count(
            config,
            "engine",
            "correlation_window",
            defaults.correlation_window,
        )?,
        correlation_threshold: config.get_double(
            "engine",
            "correlation_threshold",
            defaults.correlation_threshold,
        ),
        late_window: get_unsigned(config, "engine", "late_window", defaults.late_window)?,
        defensive: config
            .get_list("engine", "defensive")
            .unwrap_or(defaults.defensive),
        fade_guard: config.get_bool("engine", "fade_guard", defaults.fade_guard),
        weights: ScoreWeights {
            ret_60d: config.get_double("weights", "ret_60d", dw.ret_60d),
            ret_20d: config.get_double("weights", "ret_20d", dw.ret_20d),
            trend_bonus: config.get_double("weights", "trend_bonus", dw.trend_bonus),
            vol_penalty_risk_on: config.get_double(
                "weights",
                "vol_penalty_risk_on",
                dw.vol_penalty_risk_on,
            ),
            vol_penalty_risk_off: config.get_double(
                "weights",
                "vol_penalty_risk_off",
                dw.vol_penalty_risk_off,
            ),
            vol_penalty_late: config.get_double(
                "weights",
                "vol_penalty_late",
                dw.vol_penalty_late,
            ),
            rel_strength: config.get_double("weights", "rel_strength", dw.rel_strength),
            surge_slope: config.get_double("weights", "surge_slope", dw.surge_slope),
            surge_cap: config.get_double("weights", "surge_cap", dw.surge_cap),
            atr_scale: config.get_double("weights", "atr_scale", dw.atr_scale),
            atr_floor: config.get_double("weights", "atr_floor", dw.atr_floor),
            staleness: config.get_double("weights", "staleness", dw.staleness),
            staleness_cap: get_unsigned(config, "weights", "staleness_cap", dw.staleness_cap)?,
            short_off_mult: config.get_double("weights", "short_off_mult", dw.short_off_mult),
            stickiness: config.get_double("weights", "stickiness", dw.stickiness),
            rsi_overbought: config.get_double("weights", "rsi_overbought", dw.rsi_overbought),
            drawdown: config.get_double("weights", "drawdown", dw.drawdown),
        },
    };

    validate_engine_config(&engine)?;
    Ok(engine)
}

pub fn validate_engine_config(config: &EngineConfig) -> Result<(), PickError> {
    fn invalid(key: &str, reason: &str) -> PickError {
        PickError::ConfigInvalid {
            section: "engine".to_string(),
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    if config.benchmark.trim().is_empty() {
        return Err(invalid("benchmark", "must not be empty"));
    }
    if config.pick_count == 0 {
        return Err(invalid("pick_count", "must be at least 1"));
    }
    if config.shown_count < config.pick_count {
        return Err(invalid("shown_count", "must be >= pick_count"));
    }
    if config.min_history < crate::domain::regime::MIN_BARS {
        return Err(invalid(
            "min_history",
            "must be >= 210 (regime detector history requirement)",
        ));
    }
    if config.correlation_window == 0 {
        return Err(invalid("correlation_window", "must be at least 1"));
    }
    if config.correlation_threshold <= 0.0 || config.correlation_threshold > 1.0 {
        return Err(invalid("correlation_threshold", "must be in (0, 1]"));
    }
    if config.weights.atr_scale <= 0.0 {
        return Err(PickError::ConfigInvalid {
            section: "weights".to_string(),
            key: "atr_scale".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    if !(0.0..=1.0).contains(&config.weights.atr_floor) {
        return Err(PickError::ConfigInvalid {
            section: "weights".to_string(),
            key: "atr_floor".to_string(),
            reason: "must be in [0, 1]".to_string(),
        });
    }
    if config.weights.short_off_mult <= 0.0 || config.weights.short_off_mult > 1.0 {
        return Err(PickError::ConfigInvalid {
            section: "weights".to_string(),
            key: "short_off_mult".to_string(),
            reason: "must be in (0, 1]".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    #[test]
    fn defaults_validate() {
        assert!(validate_engine_config(&EngineConfig::default()).is_ok());
    }

    #[test]
    fn load_from_empty_config_yields_defaults() {
        let adapter = FileConfigAdapter::from_string("[engine]\n").unwrap();
        let config = load_engine_config(&adapter).unwrap();
        assert_eq!(config.benchmark, "SPY");
        assert_eq!(config.pick_count, 4);
        assert_eq!(config.min_history, 220);
        assert_eq!(config.weights.ret_60d, 0.45);
        assert!(config.fade_guard);
    }

    #[test]
    fn load_overrides() {
        let content = r#"
[engine]
benchmark = qqq
pick_count = 3
shown_count = 8
correlation_threshold = 0.9
defensive = SPY, XLU, GLD
fade_guard = false

[weights]
ret_60d = 0.5
stickiness = 0.03
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        let config = load_engine_config(&adapter).unwrap();
        assert_eq!(config.benchmark, "QQQ");
        assert_eq!(config.pick_count, 3);
        assert_eq!(config.shown_count, 8);
        assert_eq!(config.correlation_threshold, 0.9);
        assert_eq!(config.defensive, vec!["SPY", "XLU", "GLD"]);
        assert!(!config.fade_guard);
        assert_eq!(config.weights.ret_60d, 0.5);
        assert_eq!(config.weights.stickiness, 0.03);
        // untouched weights keep their defaults
        assert_eq!(config.weights.ret_20d, 0.25);
    }

    #[test]
    fn zero_pick_count_rejected() {
        let adapter = FileConfigAdapter::from_string("[engine]\npick_count = 0\n").unwrap();
        let err = load_engine_config(&adapter).unwrap_err();
        assert!(matches!(err, PickError::ConfigInvalid { key, .. } if key == "pick_count"));
    }

    #[test]
    fn negative_pick_count_rejected_not_wrapped() {
        let adapter = FileConfigAdapter::from_string("[engine]\npick_count = -1\n").unwrap();
        let err = load_engine_config(&adapter).unwrap_err();
        assert!(matches!(err, PickError::ConfigInvalid { key, .. } if key == "pick_count"));
    }

    #[test]
    fn negative_counts_together_still_rejected() {
        // both negative: neither may slip through as a huge wrapped value
        let adapter =
            FileConfigAdapter::from_string("[engine]\npick_count = -1\nshown_count = -1\n")
                .unwrap();
        let err = load_engine_config(&adapter).unwrap_err();
        assert!(matches!(err, PickError::ConfigInvalid { .. }));
    }

    #[test]
    fn negative_window_keys_rejected() {
        for content in [
            "[engine]\nmin_history = -5\n",
            "[engine]\ncorrelation_window = -60\n",
            "[engine]\nlate_window = -7\n",
            "[weights]\nstaleness_cap = -3\n",
        ] {
            let adapter = FileConfigAdapter::from_string(content).unwrap();
            assert!(
                matches!(
                    load_engine_config(&adapter),
                    Err(PickError::ConfigInvalid { .. })
                ),
                "accepted {:?}",
                content
            );
        }
    }

    #[test]
    fn min_history_below_regime_floor_rejected() {
        let adapter = FileConfigAdapter::from_string("[engine]\nmin_history = 100\n").unwrap();
        let err = load_engine_config(&adapter).unwrap_err();
        assert!(matches!(err, PickError::ConfigInvalid { key, .. } if key == "min_history"));
    }

    #[test]
    fn correlation_threshold_out_of_range_rejected() {
        let adapter =
            FileConfigAdapter::from_string("[engine]\ncorrelation_threshold = 1.5\n").unwrap();
        assert!(load_engine_config(&adapter).is_err());
    }
}
