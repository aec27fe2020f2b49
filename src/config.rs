use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE: &str = "receipts.db";
pub const DEFAULT_EXTRACTOR: &str = "stub";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ReceiptsConfig {
    /// SQLite database file
    pub database: Option<String>,
    /// Folder scanned for receipts
    pub input: Option<String>,
    /// Extractor name, see `extractor::default_registry`
    pub extractor: Option<String>,
}

impl ReceiptsConfig {
    /// Database path: flag, then config, then default
    pub fn database_path(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.database.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
    }

    /// Input folder: flag, then config. There is no default.
    pub fn input_dir(&self, flag: Option<&Path>) -> anyhow::Result<PathBuf> {
        flag.map(Path::to_path_buf)
            .or_else(|| self.input.as_ref().map(PathBuf::from))
            .ok_or_else(|| anyhow::anyhow!("no input folder given (use --input or set `input` in the config)"))
    }

    /// Extractor name: flag, then config, then default
    pub fn extractor_name(&self, flag: Option<&str>) -> String {
        flag.map(str::to_string)
            .or_else(|| self.extractor.clone())
            .unwrap_or_else(|| DEFAULT_EXTRACTOR.to_string())
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("receipts.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<ReceiptsConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: ReceiptsConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &ReceiptsConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}
