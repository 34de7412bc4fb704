use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

/// Environment variable consulted before the config file.
pub const TOKEN_ENV_VAR: &str = "FORECA_API_TOKEN";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_token = "..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Foreca API token appended to every outgoing request.
    pub api_token: Option<String>,
}

impl Config {
    /// Resolve the effective token: environment first, then the config file.
    /// Empty and whitespace-only values count as absent.
    pub fn resolve_token(&self) -> Option<String> {
        self.resolve_token_with(env::var(TOKEN_ENV_VAR).ok())
    }

    /// Resolution against an explicit environment value, so the order can be
    /// checked without touching process state.
    fn resolve_token_with(&self, env_value: Option<String>) -> Option<String> {
        normalize_token(env_value.as_deref())
            .or_else(|| normalize_token(self.api_token.as_deref()))
    }

    pub fn set_api_token(&mut self, token: String) {
        self.api_token = Some(token);
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "foreca", "foreca-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

fn normalize_token(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
