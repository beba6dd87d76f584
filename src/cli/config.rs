// ABOUTME: Configuration management for the pgprovision service
// ABOUTME: Loads YAML configuration from standard locations and applies environment overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::provision::WorkspaceLayout;
use crate::runner::shell::{ShellRunner, DEFAULT_SHELL};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub runner: RunnerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Workspace directories, relative to the process working directory unless absolute
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub templates_dir: PathBuf,
    pub terraform_dir: PathBuf,
    pub ansible_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub shell: String,
    pub env: HashMap<String, String>,
    /// No limit when unset
    pub command_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        let layout = WorkspaceLayout::default();
        Self {
            templates_dir: layout.templates_dir,
            terraform_dir: layout.terraform_dir,
            ansible_dir: layout.ansible_dir,
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            shell: DEFAULT_SHELL.to_string(),
            env: HashMap::new(),
            command_timeout_seconds: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl ServerConfig {
    /// `host` must be an IP address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}

impl PathsConfig {
    pub fn layout(&self) -> WorkspaceLayout {
        WorkspaceLayout::new(
            self.templates_dir.clone(),
            self.terraform_dir.clone(),
            self.ansible_dir.clone(),
        )
    }
}

impl RunnerConfig {
    pub fn shell_runner(&self) -> ShellRunner {
        ShellRunner::new(self.shell.clone())
            .with_env(self.env.clone())
            .with_timeout(self.command_timeout_seconds.map(Duration::from_secs))
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::find_config_file(),
        };

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Invalid configuration in {}", config_path.display()))?
        } else {
            Config::default()
        };

        config.merge_env()?;
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> PathBuf {
        let possible_paths = vec![
            PathBuf::from("pgprovision.yaml"),
            PathBuf::from("pgprovision.yml"),
            PathBuf::from(".pgprovision.yaml"),
            PathBuf::from(".pgprovision.yml"),
        ];

        for path in possible_paths {
            if path.exists() {
                return path;
            }
        }

        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".pgprovision").join("config.yaml");
            if home_config.exists() {
                return home_config;
            }
        }

        // Default path (may not exist)
        PathBuf::from("pgprovision.yaml")
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) -> Result<()> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    fn merge_vars<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("PGPROVISION_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PGPROVISION_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("Invalid PGPROVISION_PORT: {}", port))?;
        }

        if let Some(dir) = lookup("PGPROVISION_TEMPLATES_DIR") {
            self.paths.templates_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("PGPROVISION_TERRAFORM_DIR") {
            self.paths.terraform_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("PGPROVISION_ANSIBLE_DIR") {
            self.paths.ansible_dir = PathBuf::from(dir);
        }

        if let Some(shell) = lookup("PGPROVISION_SHELL") {
            self.runner.shell = shell;
        }
        if let Some(secs) = lookup("PGPROVISION_COMMAND_TIMEOUT") {
            self.runner.command_timeout_seconds = Some(
                secs.parse()
                    .with_context(|| format!("Invalid PGPROVISION_COMMAND_TIMEOUT: {}", secs))?,
            );
        }

        if let Some(level) = lookup("PGPROVISION_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("PGPROVISION_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.paths.layout(), WorkspaceLayout::default());
        assert_eq!(config.runner.shell, "/bin/sh");
        assert_eq!(config.runner.command_timeout_seconds, None);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("pgprovision.yaml");

        let config_content = r#"
server:
  host: 0.0.0.0
  port: 8080
paths:
  templates_dir: /etc/pgprovision/templates
  terraform_dir: /var/lib/pgprovision/terraform
  ansible_dir: /var/lib/pgprovision/ansible
runner:
  shell: /bin/bash
  command_timeout_seconds: 1800
logging:
  level: debug
  format: json
"#;
        fs::write(&config_path, config_content).unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(
            config.paths.terraform_dir,
            PathBuf::from("/var/lib/pgprovision/terraform")
        );
        assert_eq!(config.runner.shell, "/bin/bash");
        assert!(config.runner.env.is_empty());
        assert_eq!(config.runner.command_timeout_seconds, Some(1800));
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("partial.yaml");
        fs::write(&config_path, "logging:\n  level: warn\n  format: compact\n").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.paths.templates_dir, PathBuf::from("templates"));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PGPROVISION_PORT", "9000"),
            ("PGPROVISION_TERRAFORM_DIR", "/tmp/tf"),
            ("PGPROVISION_COMMAND_TIMEOUT", "60"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .merge_vars(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.paths.terraform_dir, PathBuf::from("/tmp/tf"));
        assert_eq!(config.runner.command_timeout_seconds, Some(60));
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_invalid_env_port() {
        let mut config = Config::default();
        let result = config.merge_vars(|key| {
            (key == "PGPROVISION_PORT").then(|| "not-a-port".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 5000,
        };
        assert_eq!(config.socket_addr().unwrap().port(), 5000);

        let bad = ServerConfig {
            host: "not a host".to_string(),
            port: 5000,
        };
        assert!(bad.socket_addr().is_err());
    }
}
