//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{TexAtlasError, TexAtlasResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// What the importer generates and where.
    pub import: ImportSettings,

    /// JSON keys used when reading atlas descriptors.
    pub keys: KeyMapping,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Importer behaviour switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Create one material instance per frame.
    pub generate_material_instances: bool,

    /// Create one UI (slate) texture per frame.
    pub generate_slate_textures: bool,

    /// Object path of the parent material every frame material derives from.
    pub frame_material: String,

    /// Sub-path (below the atlas package) for the imported atlas image.
    pub textures_subdir: String,

    /// Sub-path (below the atlas package) for per-frame assets.
    pub frames_subdir: String,
}

/// Key names used to read a descriptor document.
///
/// Defaults follow the TexturePacker JSON exporters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyMapping {
    /// Top-level metadata object.
    pub meta: String,
    /// Atlas image filename inside `meta`.
    pub image: String,
    /// Atlas size object inside `meta`.
    pub size: String,
    /// Width key inside size objects.
    pub width: String,
    /// Height key inside size objects.
    pub height: String,
    /// Top-level frames collection (array or object).
    pub frames: String,
    /// Source filename inside a frame entry.
    pub filename: String,
    /// Pixel rectangle inside a frame entry.
    pub frame: String,
    /// Left edge key inside rectangles.
    pub x: String,
    /// Top edge key inside rectangles.
    pub y: String,
    /// Rectangle width key.
    pub rect_width: String,
    /// Rectangle height key.
    pub rect_height: String,
    /// Optional packer name inside `meta`.
    pub app: String,
    /// Optional packer version inside `meta`.
    pub version: String,
    /// Optional pixel format inside `meta`.
    pub format: String,
    /// Optional export scale inside `meta`.
    pub scale: String,
    /// Optional rotation flag inside a frame entry.
    pub rotated: String,
    /// Optional trim flag inside a frame entry.
    pub trimmed: String,
    /// Optional trimmed-area rectangle inside a frame entry.
    pub sprite_source_size: String,
    /// Optional untrimmed size inside a frame entry.
    pub source_size: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "texatlas_import=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path. Logs go to stderr when unset.
    pub file: Option<PathBuf>,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            generate_material_instances: true,
            generate_slate_textures: true,
            frame_material: "/TexAtlas/Materials/M_AtlasFrame.M_AtlasFrame".to_string(),
            textures_subdir: "Textures".to_string(),
            frames_subdir: "Frames".to_string(),
        }
    }
}

impl Default for KeyMapping {
    fn default() -> Self {
        Self {
            meta: "meta".to_string(),
            image: "image".to_string(),
            size: "size".to_string(),
            width: "w".to_string(),
            height: "h".to_string(),
            frames: "frames".to_string(),
            filename: "filename".to_string(),
            frame: "frame".to_string(),
            x: "x".to_string(),
            y: "y".to_string(),
            rect_width: "w".to_string(),
            rect_height: "h".to_string(),
            app: "app".to_string(),
            version: "version".to_string(),
            format: "format".to_string(),
            scale: "scale".to_string(),
            rotated: "rotated".to_string(),
            trimmed: "trimmed".to_string(),
            sprite_source_size: "spriteSourceSize".to_string(),
            source_size: "sourceSize".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load config from an explicit file. Unlike [`AppConfig::load`] this
    /// reports every failure to the caller.
    pub fn load_from(path: impl AsRef<Path>) -> TexAtlasResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TexAtlasError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| TexAtlasError::config(format!("{}: {e}", path.display())))
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("texatlas").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_takes_defaults() {
        let json = r#"{ "import": { "generate_slate_textures": false }, "keys": { "frames": "sprites" } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert!(config.import.generate_material_instances);
        assert!(!config.import.generate_slate_textures);
        assert_eq!(config.import.frames_subdir, "Frames");
        assert_eq!(config.keys.frames, "sprites");
        assert_eq!(config.keys.meta, "meta");
        assert_eq!(config.keys.sprite_source_size, "spriteSourceSize");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, None);
    }

    #[test]
    fn test_optional_keys_are_configurable() {
        let json = r#"{ "keys": { "trimmed": "isTrimmed", "source_size": "original" } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.keys.trimmed, "isTrimmed");
        assert_eq!(config.keys.source_size, "original");
        assert_eq!(config.keys.rotated, "rotated");
        assert_eq!(config.keys.app, "app");
    }

    #[test]
    fn test_load_from_missing_file() {
        let path = std::env::temp_dir().join("texatlas_test_no_such_config.json");
        let _ = std::fs::remove_file(&path);
        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, TexAtlasError::FileNotFound { .. }));
    }

    #[test]
    fn test_load_from_rejects_invalid_json() {
        let path = std::env::temp_dir().join("texatlas_test_bad_config.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, TexAtlasError::Config { .. }));
        std::fs::remove_file(&path).ok();
    }
}
