//! # Configuration Management
//!
//! Loads prediction settings from a `tide-config.toml` file: the labels
//! attached to extremes, which nodal correction to apply, and the spacing of
//! generated timelines.
//!
//! ```toml
//! [extremes]
//! high = "High"
//! low = "Low"
//!
//! [nodes]
//! corrections = "schureman"
//!
//! [timeline]
//! step_minutes = 6
//! ```
//!
//! Every field has a default, so a partial file is fine.

use crate::error::{Result, TideError};
use crate::node_factor::{NoCorrection, NodeFactorProvider, SchuremanLunar};
use crate::prediction::ExtremeLabels;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Default config file name, relative to the working directory.
pub const CONFIG_FILE: &str = "tide-config.toml";

/// Prediction configuration loaded from tide-config.toml
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Labels for high and low water records
    pub extremes: ExtremeLabels,
    /// Nodal correction settings
    pub nodes: NodeConfig,
    /// Generated timeline settings
    pub timeline: TimelineConfig,
}

/// Which bundled node factor provider to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Corrections {
    /// `u = 0`, `f = 1`
    #[default]
    None,
    /// Schureman's lunar formulas per species
    Schureman,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeConfig {
    pub corrections: Corrections,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Spacing between generated instants
    pub step_minutes: i64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self { step_minutes: 10 }
    }
}

impl Config {
    /// Load configuration from tide-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::try_load_from_path(path) {
            Ok(config) => {
                info!(path = %path.display(), "loaded prediction config");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "using default prediction config");
                Self::default()
            }
        }
    }

    /// Load configuration, surfacing read and parse failures.
    pub fn try_load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Labels to pass to [`crate::prediction::Prediction::with_labels`].
    pub fn extreme_labels(&self) -> ExtremeLabels {
        self.extremes.clone()
    }

    /// The configured node factor provider.
    pub fn node_factors(&self) -> Box<dyn NodeFactorProvider> {
        match self.nodes.corrections {
            Corrections::None => Box::new(NoCorrection),
            Corrections::Schureman => Box::new(SchuremanLunar),
        }
    }

    /// Step for [`crate::timeline::Timeline::span`].
    ///
    /// # Errors
    /// [`TideError::InvalidStep`] if `step_minutes` does not fit a [`Duration`].
    pub fn timeline_step(&self) -> Result<Duration> {
        Duration::try_minutes(self.timeline.step_minutes).ok_or(TideError::InvalidStep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node_factor::{NodeArguments, Species};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args() -> NodeArguments {
        NodeArguments {
            n: 0.0,
            equator_inclination: 28.6,
            xi: 1.0,
            nu: 2.0,
            nu_prime: 0.0,
            nu_double_prime: 0.0,
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.extremes.high, "High");
        assert_eq!(config.extremes.low, "Low");
        assert_eq!(config.nodes.corrections, Corrections::None);
        assert_eq!(config.timeline_step().unwrap(), Duration::minutes(10));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config {
            nodes: NodeConfig {
                corrections: Corrections::Schureman,
            },
            ..Config::default()
        };
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[extremes]\nhigh = \"HW\"\n\n[nodes]\ncorrections = \"schureman\"").unwrap();

        let config = Config::try_load_from_path(file.path()).unwrap();
        assert_eq!(config.extremes.high, "HW");
        assert_eq!(config.extremes.low, "Low");
        assert_eq!(config.timeline.step_minutes, 10);

        let factor = config.node_factors().node_factor(Species::Semidiurnal, &args());
        assert!(factor.f < 1.0);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[nodes]\ncorrections = \"tabulated\"").unwrap();

        assert!(Config::try_load_from_path(file.path()).is_err());
        assert_eq!(Config::load_from_path(file.path()), Config::default());
    }

    #[test]
    fn test_oversized_step_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[timeline]\nstep_minutes = 9000000000000000000").unwrap();

        let config = Config::try_load_from_path(file.path()).unwrap();
        assert!(matches!(config.timeline_step(), Err(TideError::InvalidStep)));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        assert_eq!(config, Config::default());
        assert!(Config::try_load_from_path("/nonexistent/path").is_err());
    }
}
