use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use shelf_core::DecodePolicy;

pub const DB_FILE_NAME: &str = "media-tracker.db";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelfConfig {
    pub library: LibrarySection,
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub log: LogSection,
    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibrarySection {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StorageSection {
    /// Fail reads on malformed list columns instead of substituting `[]`
    #[serde(default)]
    pub strict_decoding: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LogSection {
    /// `tracing` filter directive, e.g. "info" or "shelf_core=debug"
    pub level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSection {
    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for UiSection {
    fn default() -> Self {
        Self { unicode: true }
    }
}

fn default_true() -> bool {
    true
}

impl ShelfConfig {
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            library: LibrarySection {
                path: db_path.to_string_lossy().to_string(),
            },
            storage: StorageSection::default(),
            log: LogSection::default(),
            ui: UiSection::default(),
        }
    }

    /// Config used when no file exists yet.
    pub fn with_defaults() -> anyhow::Result<Self> {
        Ok(Self::new(default_db_path()?))
    }

    pub fn decode_policy(&self) -> DecodePolicy {
        if self.storage.strict_decoding {
            DecodePolicy::Strict
        } else {
            DecodePolicy::Lenient
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_db_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join(DB_FILE_NAME))
}

pub fn read_config(path: &Path) -> anyhow::Result<ShelfConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

/// Read the config if present, otherwise fall back to defaults.
pub fn load_config(path: &Path) -> anyhow::Result<ShelfConfig> {
    if path.exists() {
        read_config(path)
    } else {
        ShelfConfig::with_defaults()
    }
}

pub fn write_config(path: &Path, config: &ShelfConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("shelf"));
        }
    }
    Ok(home_dir()?.join(".config").join("shelf"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("shelf"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("shelf"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_fills_defaults() {
        let config: ShelfConfig = toml::from_str("[library]\npath = \"/tmp/lib.db\"\n").unwrap();
        assert_eq!(config.library.path, "/tmp/lib.db");
        assert!(!config.storage.strict_decoding);
        assert!(config.log.level.is_none());
        assert!(config.ui.unicode);
        assert_eq!(config.decode_policy(), DecodePolicy::Lenient);
    }

    #[test]
    fn test_strict_decoding_maps_to_policy() {
        let config: ShelfConfig = toml::from_str(
            "[library]\npath = \"x.db\"\n\n[storage]\nstrict_decoding = true\n\n[log]\nlevel = \"debug\"\n",
        )
        .unwrap();
        assert_eq!(config.decode_policy(), DecodePolicy::Strict);
        assert_eq!(config.log.level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = ShelfConfig::new(dir.path().join(DB_FILE_NAME));

        write_config(&path, &config).unwrap();
        assert_eq!(read_config(&path).unwrap(), config);
    }
}
