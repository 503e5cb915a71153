use crate::error::{Result, TrackerError};
use crate::storage::DEFAULT_STORAGE_KEY;
use crate::view::DEFAULT_SUMMARY_WIDTH;
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "PROJTRACK_DATA_DIR";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            key: default_storage_key(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_summary_width")]
    pub summary_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            summary_width: default_summary_width(),
        }
    }
}

/// Settings after flags, environment, and config file are combined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub config: TrackerConfig,
    pub data_dir: PathBuf,
    pub resolved_output: String,
}

/// Default location of the user config file.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("projtrack/config.toml"))
}

/// Parse the config at `path`; a missing file yields defaults.
pub fn load_config(path: &Path) -> Result<TrackerConfig> {
    if !path.exists() {
        return Ok(TrackerConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| TrackerError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    toml::from_str::<TrackerConfig>(&content).map_err(|e| TrackerError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the user config from its default location.
pub fn load_user_config() -> Result<TrackerConfig> {
    default_config_path().map_or_else(|| Ok(TrackerConfig::default()), |path| load_config(&path))
}

pub fn resolve_config(cli_data_dir: Option<&Path>, cli_json: bool) -> Result<EffectiveConfig> {
    let config = load_user_config()?;
    let env_dir = env::var_os(DATA_DIR_ENV).map(PathBuf::from);
    let data_dir = resolve_data_dir(cli_data_dir, env_dir, config.storage.dir.clone());

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(cli_json, config.output.clone(), env_format);

    Ok(EffectiveConfig {
        config,
        data_dir,
        resolved_output,
    })
}

fn resolve_data_dir(
    cli_dir: Option<&Path>,
    env_dir: Option<PathBuf>,
    config_dir: Option<PathBuf>,
) -> PathBuf {
    if let Some(dir) = cli_dir {
        return dir.to_path_buf();
    }
    if let Some(dir) = env_dir.filter(|d| !d.as_os_str().is_empty()) {
        return dir;
    }
    if let Some(dir) = config_dir {
        return dir;
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("projtrack")
}

fn resolve_output(cli_json: bool, user_output: Option<String>, env_format: Option<String>) -> String {
    fn normalize_output_mode(raw: &str) -> Option<&'static str> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" | "human" => Some("pretty"),
            "text" | "table" => Some("text"),
            "json" => Some("json"),
            _ => None,
        }
    }

    if cli_json {
        return "json".to_string();
    }

    if let Some(mode) = env_format.as_deref().and_then(normalize_output_mode) {
        return mode.to_string();
    }

    if let Some(mode) = user_output.as_deref().and_then(normalize_output_mode) {
        return mode.to_string();
    }

    if std::io::stdout().is_terminal() {
        "pretty".to_string()
    } else {
        "text".to_string()
    }
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

const fn default_summary_width() -> usize {
    DEFAULT_SUMMARY_WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&dir.path().join("config.toml")).expect("load should succeed");
        assert!(cfg.output.is_none());
        assert!(cfg.storage.dir.is_none());
        assert_eq!(cfg.storage.key, "design-arena.projects.v1");
        assert_eq!(cfg.display.summary_width, 160);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
output = "json"

[storage]
dir = "/tmp/projtrack-data"
"#,
        )
        .expect("write config");

        let cfg = load_config(&path).expect("parse");
        assert_eq!(cfg.output.as_deref(), Some("json"));
        assert_eq!(cfg.storage.dir, Some(PathBuf::from("/tmp/projtrack-data")));
        assert_eq!(cfg.storage.key, "design-arena.projects.v1");
        assert_eq!(cfg.display.summary_width, 160);
    }

    #[test]
    fn malformed_config_is_a_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display]\nsummary_width = \"wide\"\n").expect("write");

        let err = load_config(&path).expect_err("must fail");
        assert!(matches!(err, TrackerError::Config { .. }));
    }

    #[test]
    fn cli_json_overrides_env_and_config() {
        let output = resolve_output(true, Some("pretty".to_string()), Some("text".to_string()));
        assert_eq!(output, "json");
    }

    #[test]
    fn env_beats_config_and_aliases_normalize() {
        let text = resolve_output(false, Some("human".to_string()), Some("table".to_string()));
        assert_eq!(text, "text");

        let pretty = resolve_output(false, Some("human".to_string()), Some("bogus".to_string()));
        assert_eq!(pretty, "pretty");
    }

    #[test]
    fn data_dir_precedence() {
        let cli = PathBuf::from("/cli");
        let env_dir = Some(PathBuf::from("/env"));
        let cfg_dir = Some(PathBuf::from("/cfg"));

        assert_eq!(
            resolve_data_dir(Some(&cli), env_dir.clone(), cfg_dir.clone()),
            cli
        );
        assert_eq!(
            resolve_data_dir(None, env_dir, cfg_dir.clone()),
            PathBuf::from("/env")
        );
        assert_eq!(
            resolve_data_dir(None, Some(PathBuf::new()), cfg_dir),
            PathBuf::from("/cfg")
        );
        assert!(resolve_data_dir(None, None, None).ends_with("projtrack"));
    }
}
