// src/core/config_manager.rs
//! Configuration loading: YAML file sections plus environment overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: EnvironmentConfig,
    pub auth: AuthSettings,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub database_path: PathBuf,
    pub uploads_path: PathBuf,
    pub log_path: PathBuf,
    pub cors_origin: String,
    pub max_upload_mib: u64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("data/candidates.db"),
            uploads_path: PathBuf::from("uploads"),
            log_path: PathBuf::from("logs/candidate-profiles.log"),
            cors_origin: "http://localhost:3000".to_string(),
            max_upload_mib: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: Option<FileSection>,
    #[serde(default)]
    production: Option<FileSection>,
}

#[derive(Debug, Default, Deserialize)]
struct FileSection {
    #[serde(flatten)]
    environment: EnvironmentConfig,
    #[serde(default)]
    token_ttl_minutes: Option<i64>,
}

impl ConfigManager {
    /// Load configuration from `config_path` (if it exists) and the process environment.
    pub fn load(config_path: &Path) -> Result<Self> {
        let env = Self::environment_name();
        info!("Loading configuration for environment: {}", env);

        let section = Self::load_section(config_path, &env)?;
        let base_dir = std::env::current_dir().context("Failed to get current directory")?;

        let jwt_secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;
        if jwt_secret.trim().is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        let port = match std::env::var("ROCKET_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number"))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            environment: section.environment.resolved_against(&base_dir),
            auth: AuthSettings {
                jwt_secret,
                token_ttl_minutes: section.token_ttl_minutes.unwrap_or(60),
            },
            port,
        })
    }

    fn environment_name() -> String {
        std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string())
    }

    fn load_section(config_path: &Path, env: &str) -> Result<FileSection> {
        if !config_path.exists() {
            info!(
                "{} not found, using built-in defaults",
                config_path.display()
            );
            return Ok(FileSection::default());
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        Self::parse_section(&content, env)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    fn parse_section(content: &str, env: &str) -> Result<FileSection> {
        let file: ConfigFile = serde_yaml::from_str(content)?;
        let section = match env {
            "production" => file.production,
            _ => file.local,
        };
        Ok(section.unwrap_or_default())
    }

    /// Ensure the upload, log and database directories exist
    pub async fn ensure_directories(&self) -> Result<()> {
        use crate::core::FsOps;

        FsOps::ensure_dir_exists(&self.environment.uploads_path).await?;

        for file in [&self.environment.database_path, &self.environment.log_path] {
            if let Some(parent) = file.parent() {
                FsOps::ensure_dir_exists(parent).await?;
            }
        }

        Ok(())
    }
}

impl EnvironmentConfig {
    pub fn resolved_against(self, base_dir: &Path) -> Self {
        let resolve = |path: PathBuf| {
            if path.is_absolute() {
                path
            } else {
                base_dir.join(path)
            }
        };

        Self {
            database_path: resolve(self.database_path),
            uploads_path: resolve(self.uploads_path),
            log_path: resolve(self.log_path),
            ..self
        }
    }
}
