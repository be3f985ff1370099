//! Main application configuration
//!
//! This module defines the primary configuration structures for the
//! matchmaking engine and simulator, including file and environment variable
//! loading with validation.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::matchmaking::balancer::{ExhaustiveBalancer, GreedyBalancer, TeamBalancer};
use crate::matchmaking::controller::MatchmakerConfig;
use crate::utils::duration_from_secs_f64;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub engine: EngineSettings,
    pub simulation: SimulationSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Engine-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Maximum rating spread allowed inside a committed match
    pub max_spread: i32,
    /// Team balancing policy
    pub balance_policy: BalancePolicyKind,
}

/// Settings for the synthetic player simulator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Number of players to generate
    pub players: usize,
    /// Arrivals are spread uniformly over this many seconds
    pub duration_seconds: f64,
    /// Lowest generated rating (inclusive)
    pub rating_min: i32,
    /// Highest generated rating (inclusive)
    pub rating_max: i32,
    /// Lowest generated net wins (inclusive)
    pub net_wins_min: i32,
    /// Highest generated net wins (inclusive)
    pub net_wins_max: i32,
    /// RNG seed; omit for a fresh population every run
    pub seed: Option<u64>,
}

/// Which team balancing policy the engine uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalancePolicyKind {
    #[default]
    Greedy,
    Exhaustive,
}

impl BalancePolicyKind {
    /// Instantiate the policy this kind names
    pub fn create_balancer(&self) -> Arc<dyn TeamBalancer> {
        match self {
            BalancePolicyKind::Greedy => Arc::new(GreedyBalancer::new()),
            BalancePolicyKind::Exhaustive => Arc::new(ExhaustiveBalancer::new()),
        }
    }
}

impl std::fmt::Display for BalancePolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BalancePolicyKind::Greedy => write!(f, "greedy"),
            BalancePolicyKind::Exhaustive => write!(f, "exhaustive"),
        }
    }
}

impl FromStr for BalancePolicyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "greedy" => Ok(BalancePolicyKind::Greedy),
            "exhaustive" => Ok(BalancePolicyKind::Exhaustive),
            _ => Err(anyhow!(
                "Invalid balance policy: {} (expected 'greedy' or 'exhaustive')",
                s
            )),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "ready-room".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_spread: 200, // rating points
            balance_policy: BalancePolicyKind::Greedy,
        }
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            players: 50,
            duration_seconds: 300.0, // 5 minutes of arrivals
            rating_min: 1000,
            rating_max: 3000,
            net_wins_min: -10,
            net_wins_max: 10,
            seed: None,
        }
    }
}

impl EngineSettings {
    /// Engine configuration in the form the matchmaker takes
    pub fn matchmaker_config(&self) -> MatchmakerConfig {
        MatchmakerConfig {
            max_spread: self.max_spread,
        }
    }
}

impl SimulationSettings {
    /// Get the arrival window as a Duration
    pub fn duration(&self) -> Duration {
        duration_from_secs_f64(self.duration_seconds)
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }

        // Engine settings
        if let Ok(spread) = env::var("MAX_SPREAD") {
            config.engine.max_spread = spread
                .parse()
                .map_err(|_| anyhow!("Invalid MAX_SPREAD value: {}", spread))?;
        }
        if let Ok(policy) = env::var("BALANCE_POLICY") {
            config.engine.balance_policy = policy.parse()?;
        }

        // Simulation settings
        if let Ok(players) = env::var("SIM_PLAYERS") {
            config.simulation.players = players
                .parse()
                .map_err(|_| anyhow!("Invalid SIM_PLAYERS value: {}", players))?;
        }
        if let Ok(duration) = env::var("SIM_DURATION_SECONDS") {
            config.simulation.duration_seconds = duration
                .parse()
                .map_err(|_| anyhow!("Invalid SIM_DURATION_SECONDS value: {}", duration))?;
        }
        if let Ok(min) = env::var("SIM_RATING_MIN") {
            config.simulation.rating_min = min
                .parse()
                .map_err(|_| anyhow!("Invalid SIM_RATING_MIN value: {}", min))?;
        }
        if let Ok(max) = env::var("SIM_RATING_MAX") {
            config.simulation.rating_max = max
                .parse()
                .map_err(|_| anyhow!("Invalid SIM_RATING_MAX value: {}", max))?;
        }
        if let Ok(min) = env::var("SIM_NET_WINS_MIN") {
            config.simulation.net_wins_min = min
                .parse()
                .map_err(|_| anyhow!("Invalid SIM_NET_WINS_MIN value: {}", min))?;
        }
        if let Ok(max) = env::var("SIM_NET_WINS_MAX") {
            config.simulation.net_wins_max = max
                .parse()
                .map_err(|_| anyhow!("Invalid SIM_NET_WINS_MAX value: {}", max))?;
        }
        if let Ok(seed) = env::var("SIM_SEED") {
            config.simulation.seed = Some(
                seed.parse()
                    .map_err(|_| anyhow!("Invalid SIM_SEED value: {}", seed))?,
            );
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Parse configuration from TOML text; missing keys take their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        validate_config(&config)?;
        Ok(config)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    // Validate engine settings
    config.engine.matchmaker_config().validate()?;

    // Validate simulation settings
    if config.simulation.players == 0 {
        return Err(anyhow!("Simulation must generate at least one player"));
    }
    if !config.simulation.duration_seconds.is_finite() || config.simulation.duration_seconds <= 0.0
    {
        return Err(anyhow!("Simulation duration must be positive"));
    }
    if config.simulation.rating_min > config.simulation.rating_max {
        return Err(anyhow!(
            "Rating range is inverted: {} > {}",
            config.simulation.rating_min,
            config.simulation.rating_max
        ));
    }
    if config.simulation.net_wins_min > config.simulation.net_wins_max {
        return Err(anyhow!(
            "Net wins range is inverted: {} > {}",
            config.simulation.net_wins_min,
            config.simulation.net_wins_max
        ));
    }

    Ok(())
}
