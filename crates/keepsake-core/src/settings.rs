//! File-based configuration layer.
//!
//! A project may commit a `keepsake.json` next to its `Cargo.toml`:
//!
//! ```json
//! {
//!   "snapshot_dir": "testdata/snapshots",
//!   "file_extension": ".snap",
//!   "update_env_var": "UPDATE",
//!   "fail_on_update": true
//! }
//! ```
//!
//! Every field is optional. Present fields become [`Override`]s, so a settings
//! file is just one more layer on top of [`Config::default`](crate::Config).

use crate::config::Override;
use crate::error::{CoreError, CoreResult};
use keepsake_dump::DumpMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Conventional settings file name.
pub const SETTINGS_FILE_NAME: &str = "keepsake.json";

/// Serializable subset of [`Config`](crate::Config).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Snapshot directory, relative to the working directory of the test.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_dir: Option<PathBuf>,

    /// Suffix appended to snapshot file names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_extension: Option<String>,

    /// Environment variable that switches on update mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_env_var: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_on_update: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_new_automatically: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fatal_on_mismatch: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dump_mode: Option<DumpMode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub equivalent_modes: Option<Vec<DumpMode>>,
}

impl Settings {
    /// Load settings from `path`.
    ///
    /// Returns `None` if the file does not exist.
    pub fn load(path: &Path) -> CoreResult<Option<Self>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No settings file");
                return Ok(None);
            }
            Err(source) => {
                return Err(CoreError::SettingsIo {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let settings = serde_json::from_str(&content).map_err(|source| {
            CoreError::SettingsParse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        debug!(path = %path.display(), "Loaded settings");
        Ok(Some(settings))
    }

    /// Load `keepsake.json` from `dir`.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Option<Self>> {
        Self::load(&dir.join(SETTINGS_FILE_NAME))
    }

    /// Convert present fields into overrides, in a fixed order.
    pub fn into_overrides(self) -> Vec<Override> {
        let mut overrides = Vec::new();

        if let Some(dir) = self.snapshot_dir {
            overrides.push(Override::SnapshotDir(dir));
        }
        if let Some(ext) = self.file_extension {
            overrides.push(Override::FileExtension(ext));
        }
        if let Some(name) = self.update_env_var {
            overrides.push(Override::EnvVariable(name));
        }
        if let Some(fail) = self.fail_on_update {
            overrides.push(Override::FailOnUpdate(fail));
        }
        if let Some(create) = self.create_new_automatically {
            overrides.push(Override::CreateNewAutomatically(create));
        }
        if let Some(fatal) = self.fatal_on_mismatch {
            overrides.push(Override::FatalOnMismatch(fatal));
        }
        if let Some(mode) = self.dump_mode {
            overrides.push(Override::DumpMode(mode));
        }
        if let Some(modes) = self.equivalent_modes {
            overrides.push(Override::EquivalentModes(modes));
        }

        overrides
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempdir().unwrap();
        assert_eq!(Settings::load_from_dir(dir.path()).unwrap(), None);
    }

    #[test]
    fn test_load_and_apply() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE_NAME),
            r#"{
                "snapshot_dir": "testdata",
                "file_extension": ".snap",
                "fail_on_update": false,
                "dump_mode": "structured",
                "equivalent_modes": []
            }"#,
        )
        .unwrap();

        let settings = Settings::load_from_dir(dir.path()).unwrap().unwrap();
        let config = Config::default().with_settings(settings);

        assert_eq!(config.snapshot_dir(), Path::new("testdata"));
        assert_eq!(config.file_extension(), ".snap");
        assert!(!config.fail_on_update());
        assert!(config.create_new_automatically());
        assert_eq!(config.dump_mode(), DumpMode::Structured);
        assert!(config.equivalent_modes().is_empty());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, r#"{ "snapshot_directory": "typo" }"#).unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, CoreError::SettingsParse { .. }));
        assert!(err.to_string().starts_with("Invalid settings"));
    }

    #[test]
    fn test_empty_settings_change_nothing() {
        assert!(Settings::default().into_overrides().is_empty());
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert_eq!(json, "{}");
    }
}
