//! Runner configuration from environment variables.

use core::str::FromStr;

use churn_model::TileVariant;
use eyre::{WrapErr, bail};

pub const VARIANT_VAR: &str = "CHURN_VARIANT";
pub const MAX_CYCLES_VAR: &str = "CHURN_MAX_CYCLES";
pub const HEADLESS_VAR: &str = "CHURN_HEADLESS";
pub const OUTPUT_VAR: &str = "CHURN_OUTPUT";

/// Cycles a headless run performs when no limit is given.
pub const DEFAULT_HEADLESS_CYCLES: u64 = 10;

/// How status snapshots are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable status line through the log.
    #[default]
    Text,
    /// One JSON object per line on stdout.
    Json,
}

impl FromStr for OutputFormat {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => bail!("unknown output format '{other}' (expected 'text' or 'json')"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub variant: TileVariant,
    /// Quit after this many completed cycles.
    pub max_cycles: Option<u64>,
    /// Start immediately and skip the keyboard thread.
    pub headless: bool,
    pub output: OutputFormat,
}

impl RunnerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let variant = match lookup(VARIANT_VAR) {
            Some(raw) => raw
                .parse::<TileVariant>()
                .wrap_err_with(|| format!("invalid {VARIANT_VAR}"))?,
            None => TileVariant::default(),
        };

        let max_cycles = match lookup(MAX_CYCLES_VAR) {
            Some(raw) => {
                Some(parse_cycles(&raw).wrap_err_with(|| format!("invalid {MAX_CYCLES_VAR}"))?)
            }
            None => None,
        };

        let headless = match lookup(HEADLESS_VAR) {
            Some(raw) => parse_flag(&raw).wrap_err_with(|| format!("invalid {HEADLESS_VAR}"))?,
            None => false,
        };

        let output = match lookup(OUTPUT_VAR) {
            Some(raw) => raw
                .parse::<OutputFormat>()
                .wrap_err_with(|| format!("invalid {OUTPUT_VAR}"))?,
            None => OutputFormat::default(),
        };

        let max_cycles = if headless {
            Some(max_cycles.unwrap_or(DEFAULT_HEADLESS_CYCLES))
        } else {
            max_cycles
        };

        Ok(Self {
            variant,
            max_cycles,
            headless,
            output,
        })
    }
}

fn parse_cycles(raw: &str) -> eyre::Result<u64> {
    let cycles: u64 = raw.trim().parse()?;
    if cycles == 0 {
        bail!("cycle limit must be at least 1");
    }
    Ok(cycles)
}

fn parse_flag(raw: &str) -> eyre::Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> eyre::Result<RunnerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        RunnerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.variant, TileVariant::Plain);
        assert_eq!(config.max_cycles, None);
        assert!(!config.headless);
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn test_full_config() {
        let config = config_from(&[
            (VARIANT_VAR, "notifying"),
            (MAX_CYCLES_VAR, "25"),
            (HEADLESS_VAR, "true"),
            (OUTPUT_VAR, "JSON"),
        ])
        .unwrap();

        assert_eq!(config.variant, TileVariant::Notifying);
        assert_eq!(config.max_cycles, Some(25));
        assert!(config.headless);
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn test_headless_defaults_cycle_limit() {
        let config = config_from(&[(HEADLESS_VAR, "1")]).unwrap();
        assert_eq!(config.max_cycles, Some(DEFAULT_HEADLESS_CYCLES));
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(config_from(&[(VARIANT_VAR, "weak")]).is_err());
        assert!(config_from(&[(MAX_CYCLES_VAR, "0")]).is_err());
        assert!(config_from(&[(MAX_CYCLES_VAR, "many")]).is_err());
        assert!(config_from(&[(HEADLESS_VAR, "maybe")]).is_err());
        assert!(config_from(&[(OUTPUT_VAR, "xml")]).is_err());
    }

    #[test]
    fn test_error_names_variable() {
        let error = config_from(&[(MAX_CYCLES_VAR, "0")]).unwrap_err();
        assert!(error.to_string().contains(MAX_CYCLES_VAR));
    }
}
