use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

const DEFAULT_CONFIG_FILE: &str = "faqbot.toml";
const CONFIG_PATH_VAR: &str = "FAQBOT_CONFIG";
const ENV_PREFIX: &str = "FAQBOT_";

/// Process-level settings. Bot settings edited from the console live in
/// `BotConfig`, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub simulator: SimulatorConfig,
    pub api_probe: ApiProbeConfig,
    pub deployment: DeploymentConfig,
    /// Load the demo FAQs and templates on startup.
    pub seed_sample_data: bool,
    /// Fixed seed for every random draw; entropy when absent.
    pub rng_seed: Option<u64>,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
    /// Where saved exports are written.
    pub export_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Artificial typing delay of the chat simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiProbeConfig {
    pub delay_ms: u64,
    pub success_probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentConfig {
    pub delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            simulator: SimulatorConfig::default(),
            api_probe: ApiProbeConfig::default(),
            deployment: DeploymentConfig::default(),
            seed_sample_data: true,
            rng_seed: None,
            log_filter: "info".to_string(),
            export_dir: PathBuf::from("exports"),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 1000,
            max_delay_ms: 3000,
        }
    }
}

impl Default for ApiProbeConfig {
    fn default() -> Self {
        Self {
            delay_ms: 2000,
            success_probability: 0.8,
        }
    }
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self { delay_ms: 5000 }
    }
}

impl ApiProbeConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl DeploymentConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Validation result for configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl AppConfig {
    /// Validate configuration values
    pub fn validate(&self) -> ConfigValidation {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if self.simulator.min_delay_ms > self.simulator.max_delay_ms {
            errors.push("Simulator min_delay_ms must not exceed max_delay_ms".to_string());
        }
        if self.simulator.max_delay_ms > 10_000 {
            warnings.push("Simulator delays over 10 seconds make testing tedious".to_string());
        }

        if !(0.0..=1.0).contains(&self.api_probe.success_probability) {
            errors.push(format!(
                "API probe success_probability must be within 0..=1, got {}",
                self.api_probe.success_probability
            ));
        }

        if self.server.host.trim().is_empty() {
            errors.push("Server host must not be empty".to_string());
        }
        if self.server.port == 0 {
            warnings.push("Server port 0 binds a random port".to_string());
        }

        ConfigValidation {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Loads `AppConfig` from defaults, an optional TOML file and `FAQBOT_*`
/// environment variables, in that order of precedence.
pub struct ConfigService;

impl ConfigService {
    /// Reads `.env`, then the file named by `FAQBOT_CONFIG` (default
    /// `faqbot.toml`).
    pub fn load() -> Result<AppConfig> {
        dotenvy::dotenv().ok();
        let path = std::env::var(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<AppConfig> {
        let config: AppConfig = Self::figment(path).extract()?;

        let validation = config.validate();
        for warning in &validation.warnings {
            tracing::warn!(warning = %warning, "Configuration warning");
        }
        if !validation.valid {
            return Err(AppError::ConfigError(validation.errors.join("; ")));
        }
        Ok(config)
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__").ignore(&["config"]))
    }
}
