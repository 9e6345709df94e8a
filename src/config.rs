use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::storage::SchemaVariant;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KennelConfig {
    pub database: Option<String>,
    pub schema: Option<SchemaVariant>,
}

impl KennelConfig {
    /// Database path, falling back to the default when unset
    pub fn database_path(&self) -> PathBuf {
        self.database
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path)
    }

    pub fn schema_variant(&self) -> SchemaVariant {
        self.schema.unwrap_or_default()
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("kennel.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("kennel.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<KennelConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: KennelConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &KennelConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
