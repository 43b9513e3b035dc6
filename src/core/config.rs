//! Oracle configuration with documented constants
//!
//! Demon tuning values mirror the game's observed behavior. Changing them
//! makes the predictor model a different ruleset, so recorded sessions will
//! stop validating.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Archer tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcherConfig {
    /// Distance to the player the archer tries to reach or hold
    pub perfect_radius: u32,
    /// Closest distance an arrow can hit from
    pub min_range: u32,
    /// Farthest distance an arrow can hit from
    pub max_range: u32,
}

impl Default for ArcherConfig {
    fn default() -> Self {
        Self {
            perfect_radius: 3,
            min_range: 2,
            max_range: 5,
        }
    }
}

/// Wizard tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    pub perfect_radius: u32,
    pub max_range: u32,
    /// How far from the wizard the bolt keeps travelling past the player
    ///
    /// Any demon standing between the player and this distance would be hit,
    /// so a wizard never shoots along such a line.
    pub bolt_reach: u32,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            perfect_radius: 3,
            max_range: 5,
            bolt_reach: 5,
        }
    }
}

/// Demolitionist tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BomberConfig {
    pub perfect_radius: u32,
    /// Player must be within this distance for a throw to be considered
    pub trigger_radius: u32,
    /// Farthest cell a bomb can land on, measured from the demolitionist
    pub throw_range: u32,
    /// Turns without a bomb after a throw
    pub cooldown_after_bomb: u8,
}

impl Default for BomberConfig {
    fn default() -> Self {
        Self {
            perfect_radius: 3,
            trigger_radius: 4,
            throw_range: 3,
            cooldown_after_bomb: 2,
        }
    }
}

/// Conflict resolution engine limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound on joint action-combinations per turn (None = unbounded)
    ///
    /// Many demons contesting one cell is exponential in the worst case.
    /// Hitting the bound is reported as an error carrying the partial result.
    pub max_combinations: Option<usize>,

    /// Minimum number of admissible orderings before using parallel processing
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_combinations: Some(100_000),
            parallel_threshold: 8,
        }
    }
}

/// Complete oracle configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub archer: ArcherConfig,
    pub wizard: WizardConfig,
    pub bomber: BomberConfig,
    pub engine: EngineConfig,
}

impl OracleConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text, then validate it
    pub fn from_toml(contents: &str) -> Result<Self, String> {
        let config: OracleConfig =
            toml::from_str(contents).map_err(|e| format!("Failed to parse oracle TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {:?}: {}", path, e))?;
        Self::from_toml(&contents)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.archer.min_range > self.archer.max_range {
            return Err(format!(
                "archer.min_range ({}) should be <= archer.max_range ({})",
                self.archer.min_range, self.archer.max_range
            ));
        }

        if self.wizard.bolt_reach < self.wizard.max_range {
            return Err(format!(
                "wizard.bolt_reach ({}) should be >= wizard.max_range ({})",
                self.wizard.bolt_reach, self.wizard.max_range
            ));
        }

        if self.archer.perfect_radius == 0
            || self.wizard.perfect_radius == 0
            || self.bomber.perfect_radius == 0
        {
            return Err("Perfect radii must be positive".into());
        }

        if self.engine.max_combinations == Some(0) {
            return Err("engine.max_combinations must be positive when set".into());
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

static CONFIG: OnceLock<OracleConfig> = OnceLock::new();

/// Get the global oracle config (initializes with defaults if not set)
pub fn config() -> &'static OracleConfig {
    CONFIG.get_or_init(OracleConfig::default)
}

/// Set the global oracle config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: OracleConfig) -> Result<(), OracleConfig> {
    CONFIG.set(config)
}
