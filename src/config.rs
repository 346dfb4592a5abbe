//! Simulation settings.
//!
//! Settings are plain data passed into each call. They can be built in code or loaded
//! from a JSON file, where every field is optional:
//!
//! ```json
//! { "maxMonths": 600, "freedPayment": "referenceMinimum" }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// One hundred years.
pub const DEFAULT_MAX_MONTHS: u32 = 1200;

/// How the minimum payments of paid-off debts are rolled into the extra payment pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FreedPaymentRule {
    /// Each paid-off debt adds its own minimum payment to the pool.
    #[default]
    EliminatedMinimums,
    /// Each paid-off debt adds the minimum payment of the first debt in priority order,
    /// whatever its own minimum was. Debts that start at a zero balance still lead the
    /// ordering and count as paid off after the first month. Kept for compatibility with
    /// existing payoff plans.
    ReferenceMinimum,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationConfig {
    /// Months to simulate before giving up on a plan that never pays off.
    pub max_months: u32,
    pub freed_payment: FreedPaymentRule,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_months: DEFAULT_MAX_MONTHS,
            freed_payment: FreedPaymentRule::default(),
        }
    }
}

impl SimulationConfig {
    pub fn with_max_months(mut self, max_months: u32) -> Self {
        self.max_months = max_months;
        self
    }

    pub fn with_freed_payment(mut self, rule: FreedPaymentRule) -> Self {
        self.freed_payment = rule;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_months == 0 {
            bail!("maxMonths must be at least 1");
        }
        Ok(())
    }

    /// Parses and validates settings from a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: SimulationConfig =
            serde_json::from_str(raw).context("Parsing simulation settings JSON")?;
        config.validate()?;
        Ok(config)
    }
}

/// Loads settings from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SimulationConfig> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading settings file: {}", path.display()))?;
    let config = SimulationConfig::from_json_str(&raw)
        .with_context(|| format!("Loading settings from {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        max_months = config.max_months,
        freed_payment = ?config.freed_payment,
        "Loaded simulation settings"
    );
    Ok(config)
}

/// Loads settings from `path` when one is given, otherwise returns the defaults.
pub fn load_optional_config(path: Option<&Path>) -> Result<SimulationConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(SimulationConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_settings(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "debt_payoff_{}_{}.json",
            name,
            std::process::id()
        ));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.max_months, 1200);
        assert_eq!(config.freed_payment, FreedPaymentRule::EliminatedMinimums);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = SimulationConfig::from_json_str(r#"{"maxMonths": 360}"#).unwrap();
        assert_eq!(config.max_months, 360);
        assert_eq!(config.freed_payment, FreedPaymentRule::EliminatedMinimums);

        let config = SimulationConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_reference_minimum_rule_parses() {
        let config =
            SimulationConfig::from_json_str(r#"{"freedPayment": "referenceMinimum"}"#).unwrap();
        assert_eq!(config.freed_payment, FreedPaymentRule::ReferenceMinimum);
    }

    #[test]
    fn test_zero_max_months_is_rejected() {
        let err = SimulationConfig::from_json_str(r#"{"maxMonths": 0}"#).unwrap_err();
        assert!(err.to_string().contains("maxMonths"));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(SimulationConfig::from_json_str("{ not json").is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let path = temp_settings(
            "load",
            r#"{"maxMonths": 240, "freedPayment": "referenceMinimum"}"#,
        );
        let config = load_config(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(
            config,
            SimulationConfig::default()
                .with_max_months(240)
                .with_freed_payment(FreedPaymentRule::ReferenceMinimum)
        );
    }

    #[test]
    fn test_load_config_missing_file_names_path() {
        let err = load_config("/nonexistent/debt_payoff_settings.json").unwrap_err();
        assert!(format!("{err:#}").contains("debt_payoff_settings.json"));
    }

    #[test]
    fn test_load_optional_config_without_path() {
        assert_eq!(load_optional_config(None).unwrap(), SimulationConfig::default());
    }
}
