use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::types::Tier;
use crate::utils::error::{EnvSyncError, Result};

/// How the external Convex CLI is launched.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub program: String,
    pub base_args: Vec<String>,
    pub default_preview_name: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            program: "npx".to_string(),
            base_args: vec!["convex".to_string()],
            default_preview_name: "preview".to_string(),
        }
    }
}

/// Local env file paths, one per tier.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub development: String,
    pub production: String,
    pub preview: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            development: ".env.convex.development".to_string(),
            production: ".env.convex.production".to_string(),
            preview: ".env.convex.preview".to_string(),
        }
    }
}

/// Deployment-identifying credential files handed to the CLI via --env-file.
/// Development uses the default deployment and needs none.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub production_env_file: String,
    pub preview_env_file: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            production_env_file: ".env.production".to_string(),
            preview_env_file: ".env.preview".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub remote: RemoteConfig,
    pub paths: PathsConfig,
    pub credentials: CredentialsConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        let Some(config_path) = Self::find_config_file() else {
            return Ok(Config::default());
        };

        let content = fs::read_to_string(&config_path).map_err(|e| {
            EnvSyncError::Config(format!(
                "Failed to read config {}: {}",
                config_path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content)?;

        config.validate()?;
        Ok(config)
    }

    /// ENVSYNC_CONFIG beats the project-local file, which beats the user one.
    fn find_config_file() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("ENVSYNC_CONFIG") {
            return Some(PathBuf::from(path));
        }

        let local = PathBuf::from("envsync.toml");
        if local.exists() {
            return Some(local);
        }

        let user = dirs::config_dir()?.join("envsync/config.toml");
        if user.exists() { Some(user) } else { None }
    }

    pub fn env_file_path(&self, tier: &Tier) -> PathBuf {
        let raw = match tier {
            Tier::Development => &self.paths.development,
            Tier::Production => &self.paths.production,
            Tier::Preview { .. } => &self.paths.preview,
        };
        expand(raw)
    }

    pub fn credentials_file(&self, tier: &Tier) -> Option<PathBuf> {
        match tier {
            Tier::Development => None,
            Tier::Production => Some(expand(&self.credentials.production_env_file)),
            Tier::Preview { .. } => Some(expand(&self.credentials.preview_env_file)),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.remote.program.is_empty() {
            return Err(EnvSyncError::Config(
                "remote.program cannot be empty".to_string(),
            ));
        }
        if self.remote.default_preview_name.is_empty() {
            return Err(EnvSyncError::Config(
                "remote.default_preview_name cannot be empty".to_string(),
            ));
        }

        let paths = [
            ("paths.development", &self.paths.development),
            ("paths.production", &self.paths.production),
            ("paths.preview", &self.paths.preview),
            (
                "credentials.production_env_file",
                &self.credentials.production_env_file,
            ),
            (
                "credentials.preview_env_file",
                &self.credentials.preview_env_file,
            ),
        ];
        for (name, value) in paths {
            if value.is_empty() {
                return Err(EnvSyncError::Config(format!("{} cannot be empty", name)));
            }
        }

        Ok(())
    }
}

fn expand(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}
