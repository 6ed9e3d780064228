//! Configuration loading for the reaction engine.
//!
//! All engine settings are loaded from a TOML configuration file.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::policy::ScalingDirection;

/// Complete engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// General engine settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Arm-chance policy settings
    #[serde(default)]
    pub policy: PolicyConfig,
    /// Reward pool settings
    #[serde(default)]
    pub rewards: RewardConfig,
    /// Scheduler timing settings
    #[serde(default)]
    pub timing: TimingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            policy: PolicyConfig::default(),
            rewards: RewardConfig::default(),
            timing: TimingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::TomlError)
    }

    /// Returns the configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, TomlSerializeError> {
        toml::to_string_pretty(self).map_err(TomlSerializeError)
    }

    /// Clamps out-of-range values into their working ranges.
    ///
    /// The engine applies this on construction and reload, so a bad file
    /// degrades rather than panics: probabilities land in [0, 1] and
    /// durations at >= 0. A non-positive value ceiling is kept as-is (it
    /// yields an empty reward pool) but logged, since it usually means a
    /// misconfigured file.
    pub fn normalized(mut self) -> Self {
        self.policy.base_chance = self.policy.base_chance.clamp(0.0, 1.0);
        self.timing.grace_seconds = self.timing.grace_seconds.max(0.0);
        self.timing.max_armed_wait_seconds = self.timing.max_armed_wait_seconds.max(0.0);
        if self.rewards.value_ceiling <= 0 {
            tracing::warn!(
                "value_ceiling is {}; no item can enter the reward pool",
                self.rewards.value_ceiling
            );
        }
        self
    }
}

/// General engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Master switch. A disabled engine ignores triggers and cancels any
    /// pending reaction on the next tick.
    pub enabled: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Arm-chance policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Chance at relationship level 0
    pub base_chance: f32,
    /// Chance adjustment per relationship level
    pub per_level_delta: f32,
    /// Whether levels raise or lower the chance
    pub direction: ScalingDirection,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            base_chance: 0.01,
            per_level_delta: 0.005,
            direction: ScalingDirection::Bonus,
        }
    }
}

/// Reward pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Items valued above this never enter the pool
    pub value_ceiling: i32,
    /// Category tags that never enter the pool
    pub excluded_categories: HashSet<String>,
    /// Sound cue played on a successful payout
    pub payout_sound: String,
}

impl Default for RewardConfig {
    fn default() -> Self {
        let mut excluded_categories = HashSet::new();
        excluded_categories.insert("quest".to_string());
        Self {
            value_ceiling: 500,
            excluded_categories,
            payout_sound: "coin".to_string(),
        }
    }
}

/// Scheduler timing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Seconds to wait after the blocking dialogue closes
    pub grace_seconds: f64,
    /// Seconds an armed reaction may wait for a dialogue before giving up
    pub max_armed_wait_seconds: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            grace_seconds: 0.5,
            max_armed_wait_seconds: 5.0,
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file
    IoError(std::io::Error),
    /// Error parsing TOML config
    TomlError(toml::de::Error),
}

/// Error that can occur during TOML serialization.
#[derive(Debug)]
pub struct TomlSerializeError(pub toml::ser::Error);

impl std::fmt::Display for TomlSerializeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TOML serialize error: {}", self.0)
    }
}

impl std::error::Error for TomlSerializeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::TomlError(e) => write!(f, "TOML parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::TomlError(e) => Some(e),
        }
    }
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Reaction Engine Configuration

[general]
enabled = true

[policy]
base_chance = 0.01
per_level_delta = 0.005
direction = "bonus"

[rewards]
value_ceiling = 500
excluded_categories = ["quest"]
payout_sound = "coin"

[timing]
grace_seconds = 0.5
max_armed_wait_seconds = 5.0
"#
    .to_string()
}
