//! Analytics configuration
//!
//! Constants the analytics engine would otherwise hard-code: tracked-year
//! boundaries, the year-end safety ceiling, per-analysis anomaly
//! sensitivities and the recurring-expense strictness flag.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Explicit path, or the override in the data dir (~/.local/share/tally/config.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analytics.toml");

/// Settings injected into the analytics engine at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// First day of the tracked year
    pub year_start: NaiveDate,
    /// Last day of the tracked year
    pub year_end: NaiveDate,
    /// Share of a budget limit at which a category is flagged WARNING
    pub warning_ratio: f64,
    /// Anomaly k for the budget-alert report
    pub budget_anomaly_sensitivity: f64,
    /// Year-end spending ceiling
    pub safety_ceiling: f64,
    /// k above which variable expenses are excluded from the daily average
    pub outlier_sensitivity: f64,
    /// Anomaly k for the annual projection report
    pub projection_anomaly_sensitivity: f64,
    /// Recurring expenses must repeat with identical amounts
    pub strict_recurring_amounts: bool,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self::for_year(2026)
    }
}

impl AnalyticsConfig {
    /// Defaults with the tracked year set to Jan 1 – Dec 31 of `year`
    pub fn for_year(year: i32) -> Self {
        Self {
            year_start: NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or_default(),
            year_end: NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or_default(),
            warning_ratio: 0.8,
            budget_anomaly_sensitivity: 1.5,
            safety_ceiling: 40_000.0,
            outlier_sensitivity: 1.5,
            projection_anomaly_sensitivity: 2.0,
            strict_recurring_amounts: false,
        }
    }

    /// Calendar year of the tracked period
    pub fn year(&self) -> i32 {
        self.year_start.year()
    }

    /// Load configuration (explicit path or data-dir override, then embedded default)
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let content = match override_path {
            Some(path) => {
                // An explicit path must exist; a missing default override is fine
                let content = fs::read_to_string(path).map_err(|e| {
                    Error::InvalidData(format!(
                        "Failed to read config {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                debug!(path = %path.display(), "Loaded analytics config");
                content
            }
            None => match default_config_path() {
                Some(path) if path.exists() => {
                    debug!(path = %path.display(), "Loaded analytics config override");
                    fs::read_to_string(&path).map_err(|e| {
                        Error::InvalidData(format!("Failed to read config: {}", e))
                    })?
                }
                _ => DEFAULT_CONFIG.to_string(),
            },
        };

        parse_config(&content)
    }

    /// Reject settings that would make the analyses meaningless
    pub fn validate(&self) -> Result<()> {
        if self.year_end < self.year_start {
            return Err(Error::InvalidData(format!(
                "Year end {} is before year start {}",
                self.year_end, self.year_start
            )));
        }
        // Month filters and comparisons resolve months against a single year
        if self.year_end.year() != self.year_start.year() {
            return Err(Error::InvalidData(format!(
                "Tracked year must fall within one calendar year, got {} to {}",
                self.year_start, self.year_end
            )));
        }
        if !(self.warning_ratio > 0.0 && self.warning_ratio <= 1.0) {
            return Err(Error::InvalidData(format!(
                "warning_ratio must be in (0, 1], got {}",
                self.warning_ratio
            )));
        }
        if !(self.safety_ceiling.is_finite() && self.safety_ceiling >= 0.0) {
            return Err(Error::InvalidData(format!(
                "safety_ceiling must be non-negative, got {}",
                self.safety_ceiling
            )));
        }
        for (name, k) in [
            ("budget.anomaly_sensitivity", self.budget_anomaly_sensitivity),
            ("projection.outlier_sensitivity", self.outlier_sensitivity),
            ("projection.anomaly_sensitivity", self.projection_anomaly_sensitivity),
        ] {
            if !(k.is_finite() && k >= 0.0) {
                return Err(Error::InvalidData(format!(
                    "{} must be non-negative, got {}",
                    name, k
                )));
            }
        }
        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    year: Option<RawYear>,
    budget: Option<RawBudget>,
    projection: Option<RawProjection>,
    recurring: Option<RawRecurring>,
}

#[derive(Debug, Deserialize)]
struct RawYear {
    start: Option<String>,
    end: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawBudget {
    warning_ratio: Option<f64>,
    anomaly_sensitivity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawProjection {
    safety_ceiling: Option<f64>,
    outlier_sensitivity: Option<f64>,
    anomaly_sensitivity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawRecurring {
    strict_amounts: Option<bool>,
}

fn parse_config_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| Error::InvalidData(format!("Invalid {} {:?}: {}", field, value, e)))
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<AnalyticsConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::InvalidData(format!("Invalid config TOML: {}", e)))?;

    let mut config = AnalyticsConfig::default();

    if let Some(year) = raw.year {
        if let Some(start) = year.start {
            config.year_start = parse_config_date("year.start", &start)?;
            // A lone start moves the whole tracked year
            config.year_end = NaiveDate::from_ymd_opt(config.year_start.year(), 12, 31)
                .unwrap_or(config.year_end);
        }
        if let Some(end) = year.end {
            config.year_end = parse_config_date("year.end", &end)?;
        }
    }

    if let Some(budget) = raw.budget {
        if let Some(ratio) = budget.warning_ratio {
            config.warning_ratio = ratio;
        }
        if let Some(k) = budget.anomaly_sensitivity {
            config.budget_anomaly_sensitivity = k;
        }
    }

    if let Some(projection) = raw.projection {
        if let Some(ceiling) = projection.safety_ceiling {
            config.safety_ceiling = ceiling;
        }
        if let Some(k) = projection.outlier_sensitivity {
            config.outlier_sensitivity = k;
        }
        if let Some(k) = projection.anomaly_sensitivity {
            config.projection_anomaly_sensitivity = k;
        }
    }

    if let Some(recurring) = raw.recurring {
        if let Some(strict) = recurring.strict_amounts {
            config.strict_recurring_amounts = strict;
        }
    }

    config.validate()?;
    Ok(config)
}
