//! Layered simulation configuration
//!
//! Configuration is resolved in three layers: built-in defaults, an
//! optional `dining` config file in the working directory, and `DINING_*`
//! environment overrides (e.g. `DINING_TIMING__MAX_EAT_MS=50`).

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::utils::errors::{Result, SimError};

/// The classic (anachronistic) table of eight.
pub const DEFAULT_NAMES: [&str; 8] = [
    "Descartes",
    "Plato",
    "Kant",
    "Hegel",
    "Socrates",
    "Nietzsche",
    "Russell",
    "Aristotle",
];

/// Top-level simulation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SimConfig {
    /// Who sits at the table
    pub table: TableConfig,

    /// Think/eat pause bounds
    pub timing: TimingConfig,

    /// Reporting cadence and shutdown grace
    pub supervisor: SupervisorConfig,
}

/// Seating configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    /// One seat per name. The name doubles as the fork-owner identity, so
    /// duplicates are rejected.
    pub names: Vec<String>,
}

/// Bounds for the random think/eat pauses
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TimingConfig {
    /// Exclusive upper bound on the think pause, in milliseconds
    pub max_think_ms: u64,

    /// Exclusive upper bound on the eat pause, in milliseconds
    pub max_eat_ms: u64,
}

/// Reporting cadence and shutdown grace for the driver
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SupervisorConfig {
    /// Pause between status reports, in milliseconds
    pub report_interval_ms: u64,

    /// Number of status reports before the table is stopped
    pub report_rounds: u32,

    /// Quiet time between stopping the table and polling for stuck seats,
    /// in milliseconds. There is no "correct" value: a seat that is merely
    /// slow will be misreported as stuck if this is too short.
    pub grace_delay_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            table: TableConfig {
                names: DEFAULT_NAMES.iter().map(|name| name.to_string()).collect(),
            },
            timing: TimingConfig {
                max_think_ms: 25,
                max_eat_ms: 200,
            },
            supervisor: SupervisorConfig {
                report_interval_ms: 2_000,
                report_rounds: 10,
                grace_delay_ms: 2_000,
            },
        }
    }
}

impl SimConfig {
    /// Load configuration from defaults, file, and environment
    pub fn load() -> Result<Self> {
        let source = Config::builder()
            .set_default("table.names", DEFAULT_NAMES.to_vec())?
            .set_default("timing.max_think_ms", 25u64)?
            .set_default("timing.max_eat_ms", 200u64)?
            .set_default("supervisor.report_interval_ms", 2_000u64)?
            .set_default("supervisor.report_rounds", 10u64)?
            .set_default("supervisor.grace_delay_ms", 2_000u64)?
            .add_source(File::with_name("dining").required(false))
            .add_source(Environment::with_prefix("DINING").separator("__"))
            .build()?;

        let config: SimConfig = source.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.table.names.is_empty() {
            return Err(SimError::InvalidConfig(
                "at least one philosopher must be seated".to_string(),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for name in &self.table.names {
            if !seen.insert(name.as_str()) {
                return Err(SimError::InvalidConfig(format!(
                    "duplicate philosopher name '{}'",
                    name
                )));
            }
        }

        if self.supervisor.report_interval_ms == 0 {
            return Err(SimError::InvalidConfig(
                "report interval cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_table() {
        let config = SimConfig::default();

        assert_eq!(config.table.names.len(), 8);
        assert_eq!(config.table.names[0], "Descartes");
        assert_eq!(config.timing.max_think_ms, 25);
        assert_eq!(config.timing.max_eat_ms, 200);
        assert_eq!(config.supervisor.report_interval_ms, 2_000);
        assert_eq!(config.supervisor.report_rounds, 10);
        assert_eq!(config.supervisor.grace_delay_ms, 2_000);

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_table_rejected() {
        let mut config = SimConfig::default();
        config.table.names.clear();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut config = SimConfig::default();
        config.table.names.push("Plato".to_string());

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_report_interval_rejected() {
        let mut config = SimConfig::default();
        config.supervisor.report_interval_ms = 0;

        assert!(config.validate().is_err());
    }
}
