use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::schedule::slot_utils::{FIXED_SLOTS_PER_BLOCK, FREE_SLOTS_PER_BLOCK, MAX_SLOTS_PER_BLOCK};

/// Tunables of the slot solver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Slot indices tried for mentors with a fixed day and half-day
    pub fixed_slots_per_block: u8,
    /// Slot indices tried for mentors the solver places itself
    pub free_slots_per_block: u8,
    /// Attempts per stage = budget_factor * n^2
    pub budget_factor: usize,
    /// Threads used for independent attempts (1 = sequential)
    pub workers: usize,
    /// Fixed RNG seed. Runs only repeat exactly with `workers == 1`; with more
    /// workers the winning attempt depends on thread timing.
    pub seed: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            fixed_slots_per_block: FIXED_SLOTS_PER_BLOCK,
            free_slots_per_block: FREE_SLOTS_PER_BLOCK,
            budget_factor: 2,
            workers: 1,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    SlotsOutOfRange { name: &'static str, value: u8 },
    NoWorkers,
    NoBudget,
    InvalidValue { key: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::SlotsOutOfRange { name, value } => write!(
                f,
                "{} must be between 1 and {}, got {}",
                name, MAX_SLOTS_PER_BLOCK, value
            ),
            ConfigError::NoWorkers => write!(f, "workers must be at least 1"),
            ConfigError::NoBudget => write!(f, "budget_factor must be at least 1"),
            ConfigError::InvalidValue { key, value } => write!(f, "invalid value '{}' for {}", value, key),
        }
    }
}

impl std::error::Error for ConfigError {}

fn env_value<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key: key.to_string(), value: raw }),
        _ => Ok(None),
    }
}

impl SchedulerConfig {
    /// Defaults overridden by SCHEDULER_* environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(v) = env_value("SCHEDULER_FIXED_SLOTS")? {
            config.fixed_slots_per_block = v;
        }
        if let Some(v) = env_value("SCHEDULER_FREE_SLOTS")? {
            config.free_slots_per_block = v;
        }
        if let Some(v) = env_value("SCHEDULER_BUDGET_FACTOR")? {
            config.budget_factor = v;
        }
        if let Some(v) = env_value("SCHEDULER_WORKERS")? {
            config.workers = v;
        }
        config.seed = env_value("SCHEDULER_SEED")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("fixed_slots_per_block", self.fixed_slots_per_block),
            ("free_slots_per_block", self.free_slots_per_block),
        ] {
            if value == 0 || value > MAX_SLOTS_PER_BLOCK {
                return Err(ConfigError::SlotsOutOfRange { name, value });
            }
        }
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if self.budget_factor == 0 {
            return Err(ConfigError::NoBudget);
        }
        Ok(())
    }
}
