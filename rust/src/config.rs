//! Configuration types for the scheduling and projection engines.

use pyo3::prelude::*;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while interpreting configuration values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown cycle policy: {0} (expected \"tolerate\" or \"reject\")")]
    UnknownCyclePolicy(String),
    #[error("Unknown view mode: {0} (expected \"real\" or \"percentual\")")]
    UnknownViewMode(String),
}

/// What the scheduler does when the predecessor graph contains a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePolicy {
    /// Keep going; an activity revisited while still in progress contributes
    /// a provisional value (0 going forward, the project finish going backward).
    #[default]
    Tolerate,
    /// Fail with `CriticalPathError::CircularDependency`.
    Reject,
}

impl FromStr for CyclePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tolerate" => Ok(Self::Tolerate),
            "reject" => Ok(Self::Reject),
            other => Err(ConfigError::UnknownCyclePolicy(other.to_string())),
        }
    }
}

/// Unit of the S-curve series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Monetary amounts as entered.
    #[default]
    Real,
    /// Every amount as a percentage of the final cumulative planned total.
    Percent,
}

impl FromStr for ViewMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "real" => Ok(Self::Real),
            "percentual" => Ok(Self::Percent),
            other => Err(ConfigError::UnknownViewMode(other.to_string())),
        }
    }
}

/// Configuration for the critical path engine.
#[pyclass]
#[derive(Clone, Debug)]
pub struct ScheduleConfig {
    /// Cycle handling: "tolerate" or "reject"
    #[pyo3(get, set)]
    pub cycle_policy: String,
    /// Verbosity level: 0=silent, 1=summary, 2=passes, 3=trace.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            cycle_policy: "tolerate".to_string(),
            verbosity: 0,
        }
    }
}

impl ScheduleConfig {
    pub fn policy(&self) -> Result<CyclePolicy, ConfigError> {
        self.cycle_policy.parse()
    }
}

#[pymethods]
impl ScheduleConfig {
    #[new]
    #[pyo3(signature = (cycle_policy=None, verbosity=0))]
    fn new(cycle_policy: Option<String>, verbosity: u8) -> PyResult<Self> {
        let defaults = Self::default();
        let config = Self {
            cycle_policy: cycle_policy.unwrap_or(defaults.cycle_policy),
            verbosity,
        };
        config
            .policy()
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;
        Ok(config)
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleConfig(cycle_policy={:?}, verbosity={})",
            self.cycle_policy, self.verbosity
        )
    }
}

/// Configuration for the S-curve projector.
#[pyclass]
#[derive(Clone, Debug)]
pub struct CurveConfig {
    /// Series unit: "real" (money) or "percentual"
    #[pyo3(get, set)]
    pub view_mode: String,
    /// Whether actual/paid values after the display cutoff are suppressed
    #[pyo3(get, set)]
    pub apply_cutoff: bool,
    /// Verbosity level: 0=silent, 1=summary, 2=passes, 3=trace.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            view_mode: "real".to_string(),
            apply_cutoff: true,
            verbosity: 0,
        }
    }
}

impl CurveConfig {
    pub fn mode(&self) -> Result<ViewMode, ConfigError> {
        self.view_mode.parse()
    }
}

#[pymethods]
impl CurveConfig {
    #[new]
    #[pyo3(signature = (view_mode=None, apply_cutoff=true, verbosity=0))]
    fn new(view_mode: Option<String>, apply_cutoff: bool, verbosity: u8) -> PyResult<Self> {
        let defaults = Self::default();
        let config = Self {
            view_mode: view_mode.unwrap_or(defaults.view_mode),
            apply_cutoff,
            verbosity,
        };
        config
            .mode()
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;
        Ok(config)
    }

    fn __repr__(&self) -> String {
        format!(
            "CurveConfig(view_mode={:?}, apply_cutoff={})",
            self.view_mode, self.apply_cutoff
        )
    }
}
