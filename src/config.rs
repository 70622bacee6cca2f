//! Configuration loading for YatraNav

use crate::error::{Result, YatraError};
use crate::sequencer::{FailurePolicy, SequencerConfig};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Clone, Debug, Deserialize)]
pub struct YatraConfig {
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub tour: TourConfig,
}

/// Navigation service client settings
#[derive(Clone, Debug, Deserialize)]
pub struct NavigationConfig {
    /// Activation wait deadline in seconds; 0 waits forever (default: 30)
    #[serde(default = "default_activation_timeout")]
    pub activation_timeout_secs: f32,

    /// Sleep between completion polls in milliseconds (default: 20)
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

/// Waypoint tour settings
#[derive(Clone, Debug, Deserialize)]
pub struct TourConfig {
    /// Policy for Aborted/Canceled waypoints: continue, abort, retry
    /// (default: continue)
    #[serde(default)]
    pub on_failure: FailurePolicy,

    /// Extra attempts per waypoint under the retry policy (default: 2)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Per-goal completion deadline in seconds; 0 waits forever (default: 0)
    #[serde(default)]
    pub goal_timeout_secs: f32,
}

fn default_activation_timeout() -> f32 {
    30.0
}
fn default_poll_interval() -> u64 {
    20
}
fn default_max_retries() -> u32 {
    2
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            activation_timeout_secs: default_activation_timeout(),
            poll_interval_ms: default_poll_interval(),
        }
    }
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            on_failure: FailurePolicy::default(),
            max_retries: default_max_retries(),
            goal_timeout_secs: 0.0,
        }
    }
}

impl Default for YatraConfig {
    fn default() -> Self {
        Self {
            navigation: NavigationConfig::default(),
            tour: TourConfig::default(),
        }
    }
}

impl YatraConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| YatraError::Config(format!("Failed to read config file: {}", e)))?;
        let config: YatraConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Activation wait deadline; `None` means wait forever.
    pub fn activation_timeout(&self) -> Option<Duration> {
        if self.navigation.activation_timeout_secs > 0.0 {
            Some(Duration::from_secs_f32(
                self.navigation.activation_timeout_secs,
            ))
        } else {
            None
        }
    }

    /// Sequencer settings derived from the tour section.
    pub fn sequencer_config(&self) -> SequencerConfig {
        SequencerConfig {
            on_failure: self.tour.on_failure,
            max_retries: self.tour.max_retries,
            poll_interval: Duration::from_millis(self.navigation.poll_interval_ms),
            goal_timeout: if self.tour.goal_timeout_secs > 0.0 {
                Some(Duration::from_secs_f32(self.tour.goal_timeout_secs))
            } else {
                None
            },
        }
    }
}
