use crate::error::{SatResult, SaturationError};
use serde::{Deserialize, Serialize};

// ── Capacity model thresholds ──────────────────────────────────────

/// Upper bounds (inclusive) of the capacity-model tiers, on the index scale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CapacityThresholds {
    pub healthy_max:   f64,
    pub attention_max: f64,
}

impl Default for CapacityThresholds {
    fn default() -> Self {
        Self {
            healthy_max:   0.8,
            attention_max: 1.0,
        }
    }
}

// ── Real (percent) model ───────────────────────────────────────────

/// Upper bounds (inclusive) of the percent-model tiers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PercentThresholds {
    pub low_max:    f64,
    pub medium_max: f64,
    pub high_max:   f64,
}

impl Default for PercentThresholds {
    fn default() -> Self {
        Self {
            low_max:    70.0,
            medium_max: 100.0,
            high_max:   150.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RealModelConfig {
    /// Fixed weekly denominator. Not derived from productivity.
    pub fixed_weekly_hours:  f64,
    /// Percentage points added per overdue item.
    pub overdue_penalty_pct: f64,
    /// Ceiling on the total penalty. `None` leaves it unbounded.
    #[serde(default)]
    pub overdue_penalty_cap_pct: Option<f64>,
}

impl Default for RealModelConfig {
    fn default() -> Self {
        Self {
            fixed_weekly_hours:      40.0,
            overdue_penalty_pct:     20.0,
            overdue_penalty_cap_pct: None,
        }
    }
}

// ── Input defaults ─────────────────────────────────────────────────

/// Applied when a consultant row omits its own capacity figures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CapacityDefaults {
    pub weekly_available_hours: f64,
    pub productivity_factor:    f64,
}

impl Default for CapacityDefaults {
    fn default() -> Self {
        Self {
            weekly_available_hours: 40.0,
            productivity_factor:    0.70,
        }
    }
}

/// One week. Longer intervals are rejected by `validate`.
pub const MAX_REFRESH_INTERVAL_SECS: u64 = 7 * 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefreshConfig {
    pub interval_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { interval_secs: 300 }
    }
}

// ── Presentation labels ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusLabels {
    pub healthy:    String,
    pub attention:  String,
    pub bottleneck: String,
    pub low:        String,
    pub medium:     String,
    pub high:       String,
    pub critical:   String,
}

impl Default for StatusLabels {
    fn default() -> Self {
        Self {
            healthy:    "Saudável".into(),
            attention:  "Atenção".into(),
            bottleneck: "Gargalo".into(),
            low:        "Baixa".into(),
            medium:     "Média".into(),
            high:       "Alta".into(),
            critical:   "Crítica".into(),
        }
    }
}

// ── Top level ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SaturationConfig {
    #[serde(default)]
    pub capacity_thresholds: CapacityThresholds,
    #[serde(default)]
    pub percent_thresholds:  PercentThresholds,
    #[serde(default)]
    pub real_model:          RealModelConfig,
    #[serde(default)]
    pub defaults:            CapacityDefaults,
    #[serde(default)]
    pub refresh:             RefreshConfig,
    #[serde(default)]
    pub labels:              StatusLabels,
}

impl SaturationConfig {
    /// Load from `{data_dir}/saturation_config.json`.
    /// Sections missing from the file fall back to their defaults.
    /// In tests, use `SaturationConfig::default()`.
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/saturation_config.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: SaturationConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject threshold tables that are not strictly ascending, and
    /// constants that would make either model divide by zero.
    pub fn validate(&self) -> SatResult<()> {
        let c = &self.capacity_thresholds;
        ascending("capacity_thresholds", &[c.healthy_max, c.attention_max])?;

        let p = &self.percent_thresholds;
        ascending("percent_thresholds", &[p.low_max, p.medium_max, p.high_max])?;

        let r = &self.real_model;
        if !(r.fixed_weekly_hours.is_finite() && r.fixed_weekly_hours > 0.0) {
            return Err(invalid(format!(
                "real_model.fixed_weekly_hours must be > 0, got {}",
                r.fixed_weekly_hours
            )));
        }
        if !(r.overdue_penalty_pct.is_finite() && r.overdue_penalty_pct >= 0.0) {
            return Err(invalid(format!(
                "real_model.overdue_penalty_pct must be >= 0, got {}",
                r.overdue_penalty_pct
            )));
        }
        if let Some(cap) = r.overdue_penalty_cap_pct {
            if !(cap.is_finite() && cap >= 0.0) {
                return Err(invalid(format!(
                    "real_model.overdue_penalty_cap_pct must be >= 0, got {cap}"
                )));
            }
        }

        let secs = self.refresh.interval_secs;
        if secs == 0 || secs > MAX_REFRESH_INTERVAL_SECS {
            return Err(SaturationError::InvalidRefreshInterval(secs));
        }

        let d = &self.defaults;
        if !(d.weekly_available_hours.is_finite() && d.weekly_available_hours > 0.0) {
            return Err(invalid(format!(
                "defaults.weekly_available_hours must be > 0, got {}",
                d.weekly_available_hours
            )));
        }
        if !(d.productivity_factor > 0.0 && d.productivity_factor <= 1.0) {
            return Err(invalid(format!(
                "defaults.productivity_factor must be in (0, 1], got {}",
                d.productivity_factor
            )));
        }
        Ok(())
    }
}

fn ascending(section: &str, bounds: &[f64]) -> SatResult<()> {
    if bounds.iter().any(|b| !b.is_finite()) {
        return Err(invalid(format!("{section} must be finite, got {bounds:?}")));
    }
    if bounds.windows(2).any(|w| w[0] >= w[1]) {
        return Err(invalid(format!("{section} must be strictly ascending, got {bounds:?}")));
    }
    Ok(())
}

fn invalid(reason: String) -> SaturationError {
    SaturationError::InvalidThresholds { reason }
}
