//! Shell configuration management

use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Shell configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Last opened file path
    pub last_file: Option<String>,
    /// Recently opened files, most recent first
    pub recent_files: Vec<String>,
    /// Shell behavior settings
    pub shell: ShellConfig,
}

/// Shell-specific settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// How many recent files to keep
    pub max_recent: usize,
    /// Refuse to discard unsaved changes unless forced
    pub confirm_discard: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            last_file: None,
            recent_files: Vec::new(),
            shell: ShellConfig::default(),
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            max_recent: 10,
            confirm_discard: true,
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "docframe", "Docframe")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Add a file to the recent list
    pub fn add_recent_file(&mut self, path: String) {
        self.recent_files.retain(|p| p != &path);
        self.recent_files.insert(0, path.clone());
        self.recent_files.truncate(self.shell.max_recent);
        self.last_file = Some(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_recent_file_dedupes_and_truncates() {
        let mut config = AppConfig::default();
        config.shell.max_recent = 3;

        for name in ["a", "b", "c", "a", "d"] {
            config.add_recent_file(name.to_string());
        }

        assert_eq!(config.recent_files, vec!["d", "a", "c"]);
        assert_eq!(config.last_file.as_deref(), Some("d"));
    }
}
