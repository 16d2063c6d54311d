//! Configuration loading from TOML files

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use shelfload_openlibrary::{AuthorGate, DEFAULT_WORK_LINE_LIMIT, LoadConfig, WorkOptions};

/// Global configuration for shelfload
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub dumps: DumpsConfig,
    pub store: StoreConfig,
    pub works: WorksConfig,
    pub run: RunConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DumpsConfig {
    #[serde(deserialize_with = "deserialize_env_path")]
    pub authors: PathBuf,
    #[serde(deserialize_with = "deserialize_env_path")]
    pub works: PathBuf,
}

impl Default for DumpsConfig {
    fn default() -> Self {
        let defaults = LoadConfig::default();
        Self {
            authors: defaults.authors_dump,
            works: defaults.works_dump,
        }
    }
}

/// Store backend selectable from config and CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// One JSON document per record under `store.dir`
    #[default]
    Json,
    /// Process-local maps, discarded on exit
    Memory,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Memory => "memory",
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub kind: StoreKind,
    #[serde(deserialize_with = "deserialize_env_path")]
    pub dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kind: StoreKind::default(),
            dir: PathBuf::from("./shelfload-db"),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct WorksConfig {
    pub line_limit: usize,
    #[serde(deserialize_with = "deserialize_gate")]
    pub author_gate: AuthorGate,
}

impl Default for WorksConfig {
    fn default() -> Self {
        Self {
            line_limit: DEFAULT_WORK_LINE_LIMIT,
            author_gate: AuthorGate::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Skip the work phase when the author phase fails
    pub strict_phases: bool,
}

/// Deserialize a path that may be an environment variable reference like ${VAR}
fn deserialize_env_path<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    expand_env_var(&raw)
        .map(PathBuf::from)
        .ok_or_else(|| serde::de::Error::custom(format!("environment variable not set: {raw}")))
}

fn deserialize_gate<'de, D>(deserializer: D) -> Result<AuthorGate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    AuthorGate::from_name(&name).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "unknown author_gate `{name}` (expected `authors` or `covers`)"
        ))
    })
}

/// Expand ${VAR} to environment variable value
fn expand_env_var(s: &str) -> Option<String> {
    if let Some(var_name) = s.strip_prefix("${").and_then(|s| s.strip_suffix('}')) {
        std::env::var(var_name).ok()
    } else {
        Some(s.to_string())
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./shelfload.toml (current directory)
    /// 2. ~/.config/shelfload/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("shelfload.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "shelfload") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loader settings derived from this config
    pub fn load_config(&self) -> LoadConfig {
        LoadConfig {
            authors_dump: self.dumps.authors.clone(),
            works_dump: self.dumps.works.clone(),
            works: WorkOptions {
                line_limit: self.works.line_limit,
                author_gate: self.works.author_gate,
            },
            strict_phases: self.run.strict_phases,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.store.kind, StoreKind::Json);
        assert_eq!(config.works.line_limit, 50);
        assert_eq!(config.works.author_gate, AuthorGate::Authors);
        assert!(!config.run.strict_phases);
        assert_eq!(
            config.dumps.authors,
            PathBuf::from("ol_dump_authors.txt.gz")
        );
    }

    #[test]
    fn expand_env_var_simple() {
        std::env::set_var("SHELFLOAD_TEST_DUMPS", "/data/ol");
        assert_eq!(
            expand_env_var("${SHELFLOAD_TEST_DUMPS}"),
            Some("/data/ol".to_string())
        );
        std::env::remove_var("SHELFLOAD_TEST_DUMPS");
    }

    #[test]
    fn expand_env_var_literal() {
        assert_eq!(expand_env_var("literal"), Some("literal".to_string()));
    }

    #[test]
    fn expand_env_var_missing() {
        assert_eq!(expand_env_var("${NONEXISTENT_VAR_12345}"), None);
    }

    #[test]
    fn parse_config_toml() {
        let toml = r#"
[dumps]
authors = "/tmp/authors.txt"
works = "/tmp/works.txt.gz"

[store]
kind = "memory"

[works]
line_limit = 500
author_gate = "covers"

[run]
strict_phases = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.dumps.works, PathBuf::from("/tmp/works.txt.gz"));
        assert_eq!(config.store.kind, StoreKind::Memory);
        assert_eq!(config.store.dir, PathBuf::from("./shelfload-db"));

        let load = config.load_config();
        assert_eq!(load.works.line_limit, 500);
        assert_eq!(load.works.author_gate, AuthorGate::Covers);
        assert!(load.strict_phases);
    }

    #[test]
    fn unknown_gate_is_rejected() {
        let err = toml::from_str::<Config>("[works]\nauthor_gate = \"titles\"").unwrap_err();
        assert!(err.to_string().contains("unknown author_gate"));
    }

    #[test]
    fn unset_env_path_is_rejected() {
        let toml = "[store]\ndir = \"${NONEXISTENT_VAR_12345}\"";
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shelfload.toml");
        std::fs::write(&path, "[store]\ndir = \"/srv/shelf\"\n").unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.store.dir, PathBuf::from("/srv/shelf"));
        assert_eq!(config.store.kind, StoreKind::Json);
    }
}
