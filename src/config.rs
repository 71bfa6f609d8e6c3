//! Engine configuration loaded from TOML.
//!
//! ```toml
//! seed = 7
//! think_delay_ms = 500
//! human_side = "A"
//!
//! [variants.tic-tac-toe]
//! strategy = { kind = "minimax" }
//!
//! [variants.chess]
//! strategy = { kind = "minimax", max_depth = 2 }
//! sliding_occlusion = true
//! ```

use crate::games::{Side, VariantKind};
use crate::search::{Strategy, minimax::WIN_SCORE};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "ARCADE_CONFIG";

/// Settings for sessions, search and the terminal front-end.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Base seed; every session forks its own generator from it.
    #[serde(default)]
    seed: u64,

    /// Pause before the terminal front-end shows a computer reply.
    #[serde(default = "default_think_delay_ms")]
    think_delay_ms: u64,

    /// Side the human plays unless overridden on the command line.
    #[serde(default = "default_human_side")]
    human_side: Side,

    /// Two humans share the keyboard instead of playing the computer.
    #[serde(default)]
    hot_seat: bool,

    /// Per-variant settings keyed by variant name (`tic-tac-toe`, ...).
    #[serde(default)]
    variants: BTreeMap<String, VariantConfig>,
}

/// Settings for one variant.
#[derive(Debug, Clone, Default, PartialEq, Getters, Serialize, Deserialize)]
pub struct VariantConfig {
    /// Opponent strategy; the variant default when absent.
    #[serde(default)]
    strategy: Option<Strategy>,

    /// Chess only: rooks, bishops and queens may not jump.
    #[serde(default)]
    sliding_occlusion: bool,
}

fn default_think_delay_ms() -> u64 {
    500
}

fn default_human_side() -> Side {
    Side::A
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            think_delay_ms: default_think_delay_ms(),
            human_side: default_human_side(),
            hot_seat: false,
            variants: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(seed = config.seed, variants = config.variants.len(), "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        // Keys are matched case-insensitively; store them under the canonical name.
        let mut variants = BTreeMap::new();
        for (name, settings) in std::mem::take(&mut config.variants) {
            let kind = name
                .parse::<VariantKind>()
                .map_err(|_| ConfigError::new(format!("Unknown variant '{}'", name)))?;
            if let Some(strategy) = settings.strategy {
                check_strategy(kind, strategy)?;
            }
            if variants.insert(kind.to_string(), settings).is_some() {
                return Err(ConfigError::new(format!(
                    "Variant '{}' configured more than once",
                    kind
                )));
            }
        }
        config.variants = variants;
        Ok(config)
    }

    /// Loads from `path`, else from `$ARCADE_CONFIG`, else defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match std::env::var(CONFIG_ENV) {
                Ok(env_path) => Self::from_file(env_path),
                Err(_) => {
                    debug!("No config file given, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    fn variant(&self, variant: VariantKind) -> Option<&VariantConfig> {
        self.variants.get(&variant.to_string())
    }

    /// Opponent strategy for a variant.
    pub fn strategy_for(&self, variant: VariantKind) -> Strategy {
        self.variant(variant)
            .and_then(|v| v.strategy)
            .unwrap_or_else(|| Strategy::default_for(variant))
    }

    /// Whether chess sliders are blocked by pieces in between.
    pub fn sliding_occlusion(&self) -> bool {
        self.variant(VariantKind::Chess)
            .is_some_and(|v| v.sliding_occlusion)
    }

    /// Replaces the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replaces the human side.
    pub fn with_human_side(mut self, side: Side) -> Self {
        self.human_side = side;
        self
    }

    /// Turns hot-seat play on or off.
    pub fn with_hot_seat(mut self, hot_seat: bool) -> Self {
        self.hot_seat = hot_seat;
        self
    }

    /// Overrides the strategy for one variant.
    pub fn with_strategy(mut self, variant: VariantKind, strategy: Strategy) -> Self {
        self.variants.entry(variant.to_string()).or_default().strategy = Some(strategy);
        self
    }
}

/// Rejects minimax searches that cannot finish or that outrun depth scoring.
fn check_strategy(variant: VariantKind, strategy: Strategy) -> Result<(), ConfigError> {
    match strategy {
        Strategy::Minimax { max_depth: None } if variant != VariantKind::TicTacToe => {
            Err(ConfigError::new(format!(
                "Exhaustive minimax is only available for tic-tac-toe; set max_depth for {}",
                variant
            )))
        }
        Strategy::Minimax {
            max_depth: Some(depth),
        } if depth == 0 || depth >= WIN_SCORE.unsigned_abs() => Err(ConfigError::new(format!(
            "max_depth for {} must be between 1 and {}, got {}",
            variant,
            WIN_SCORE - 1,
            depth
        ))),
        _ => Ok(()),
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
