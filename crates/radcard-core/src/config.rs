use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::content::Modality;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

/// Number of strongest matches surfaced next to relevance scores.
pub const DEFAULT_TOP_MATCH_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadcardConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Directory holding pathology JSON documents.
    pub content_dir: PathBuf,
    pub default_modality: Modality,
    /// Added in v1.
    pub top_match_limit: usize,
}

impl Default for RadcardConfig {
    fn default() -> Self {
        let content_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("radcard")
            .join("content");
        Self {
            config_version: CURRENT_VERSION,
            content_dir,
            default_modality: Modality::Ct,
            top_match_limit: DEFAULT_TOP_MATCH_LIMIT,
        }
    }
}

/// `<config dir>/radcard/config.json`, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join("radcard").join("config.json"))
}

pub fn load_config_from(path: &Path) -> Result<RadcardConfig, CoreError> {
    let contents = std::fs::read_to_string(path)?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: RadcardConfig = serde_json::from_value(migrated)?;
    if config.top_match_limit == 0 {
        return Err(CoreError::InvalidConfig(
            "top_match_limit must be at least 1".to_string(),
        ));
    }
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
pub fn migrate(
    mut json: serde_json::Value,
    from_version: u32,
) -> Result<serde_json::Value, CoreError> {
    if from_version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedConfigVersion {
            found: from_version,
            supported: CURRENT_VERSION,
        });
    }

    // v0 → v1: add top_match_limit
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| CoreError::InvalidConfig("config is not a JSON object".to_string()))?;
        obj.entry("top_match_limit")
            .or_insert(serde_json::Value::Number(DEFAULT_TOP_MATCH_LIMIT.into()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added top_match_limit)");
    }

    Ok(json)
}

pub fn save_config_to(path: &Path, config: &RadcardConfig) -> Result<(), CoreError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a sibling temp file then rename over the target.
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
