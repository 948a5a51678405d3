//! Configuration for chapterhouse paths and ingestion.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (CHAPTERHOUSE_HOME, CHAPTERHOUSE_DATA)
//! 2. Config file (.chapterhouse/config.yaml)
//! 3. Defaults (~/.chapterhouse)
//!
//! Config file discovery:
//! - Searches current directory and parents for .chapterhouse/config.yaml
//! - Paths in config file are relative to the config file's parent directory

pub mod labels;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Default glob for work and chapter documents
pub const DEFAULT_DOCUMENT_PATTERN: &str = "*.json";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub ingest: Option<IngestConfig>,
    #[serde(default)]
    pub catalogue: Option<CatalogueConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory holding the saved catalogue (relative to .chapterhouse/)
    pub home: Option<String>,
    /// Data directory containing books/ (relative to config file)
    pub data: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    pub document_pattern: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogueConfig {
    pub default_status: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to chapterhouse home (saved catalogue)
    pub home: PathBuf,
    /// Absolute path to the data directory
    pub data: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Ingestion settings
    pub ingest: IngestSettings,
}

#[derive(Debug, Clone)]
pub struct IngestSettings {
    /// Glob applied to file names inside information/ and chapters/
    pub document_pattern: String,
    /// Status given to works whose document omits one
    pub default_status: String,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            document_pattern: DEFAULT_DOCUMENT_PATTERN.to_string(),
            default_status: labels::STATUS_ONGOING.to_string(),
        }
    }
}

impl ResolvedConfig {
    /// Root of the work tree (`<data>/books`)
    pub fn books_root(&self) -> PathBuf {
        self.data.join("books")
    }

    /// Saved catalogue snapshot (`<home>/catalogue.json`)
    pub fn catalogue_path(&self) -> PathBuf {
        self.home.join("catalogue.json")
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".chapterhouse").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's parent
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Merge a parsed config file over the defaults
fn ingest_settings(config: &ConfigFile) -> IngestSettings {
    let defaults = IngestSettings::default();

    IngestSettings {
        document_pattern: config
            .ingest
            .as_ref()
            .and_then(|i| i.document_pattern.clone())
            .unwrap_or(defaults.document_pattern),
        default_status: config
            .catalogue
            .as_ref()
            .and_then(|c| c.default_status.clone())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.default_status),
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".chapterhouse");

    let config_file = find_config_file();

    let (home, data, ingest) = if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;

        // Base directory is the parent of .chapterhouse/ (i.e., grandparent of config.yaml)
        let base_dir = config_path
            .parent()
            .and_then(|p| p.parent())
            .unwrap_or(Path::new("."));

        let home = if let Ok(env_home) = std::env::var("CHAPTERHOUSE_HOME") {
            PathBuf::from(env_home)
        } else if let Some(ref home_path) = config.paths.home {
            // home is relative to .chapterhouse/ directory
            let state_dir = config_path.parent().unwrap_or(Path::new("."));
            resolve_path(state_dir, home_path)
        } else {
            default_home.clone()
        };

        let data = if let Ok(env_data) = std::env::var("CHAPTERHOUSE_DATA") {
            PathBuf::from(env_data)
        } else if let Some(ref data_path) = config.paths.data {
            resolve_path(base_dir, data_path)
        } else {
            home.join("data")
        };

        (home, data, ingest_settings(&config))
    } else {
        let home = std::env::var("CHAPTERHOUSE_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_home.clone());

        let data = std::env::var("CHAPTERHOUSE_DATA")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join("data"));

        (home, data, IngestSettings::default())
    };

    Ok(ResolvedConfig {
        home,
        data,
        config_file,
        ingest,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Get the saved catalogue path ($CHAPTERHOUSE_HOME/catalogue.json)
pub fn catalogue_path() -> Result<PathBuf> {
    Ok(config()?.catalogue_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let state_dir = temp.path().join(".chapterhouse");
        std::fs::create_dir_all(&state_dir).unwrap();

        let config_path = state_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
version: "1.0"
paths:
  home: ./
  data: ../resources/data
ingest:
  document_pattern: "*.jsn"
catalogue:
  default_status: Hiatus
"#
        )
        .unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.paths.home, Some("./".to_string()));
        assert_eq!(config.paths.data, Some("../resources/data".to_string()));

        let settings = ingest_settings(&config);
        assert_eq!(settings.document_pattern, "*.jsn");
        assert_eq!(settings.default_status, "Hiatus");
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: ConfigFile = serde_yaml::from_str("version: \"1.0\"\n").unwrap();
        let settings = ingest_settings(&config);
        assert_eq!(settings.document_pattern, DEFAULT_DOCUMENT_PATTERN);
        assert_eq!(settings.default_status, labels::STATUS_ONGOING);
    }

    #[test]
    fn test_derived_paths() {
        let config = ResolvedConfig {
            home: PathBuf::from("/test/.chapterhouse"),
            data: PathBuf::from("/test/data"),
            config_file: None,
            ingest: IngestSettings::default(),
        };

        assert_eq!(config.books_root(), PathBuf::from("/test/data/books"));
        assert_eq!(
            config.catalogue_path(),
            PathBuf::from("/test/.chapterhouse/catalogue.json")
        );
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "./subdir"),
            PathBuf::from("/home/user/project/subdir")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
    }
}
