//! Snapshot configuration.
//!
//! A [`Config`] is an immutable value. Every change produces a new value,
//! either through the consuming `with_*` builders or through
//! [`Config::with_overrides`], which clones before applying anything. A check
//! that overrides settings for itself therefore never affects another check
//! that is reading the same default concurrently.

use crate::settings::Settings;
use keepsake_dump::DumpMode;
use keepsake_storage::FileStore;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Directory snapshots are stored in unless overridden.
pub const DEFAULT_SNAPSHOT_DIR: &str = ".snapshots";

/// Environment variable that switches on update mode unless overridden.
pub const DEFAULT_UPDATE_ENV_VAR: &str = "UPDATE_SNAPSHOTS";

/// Decides, on every check, whether mismatching baselines get overwritten.
pub type UpdatePredicate = Arc<dyn Fn() -> bool + Send + Sync>;

/// Snapshot configuration.
#[derive(Clone)]
pub struct Config {
    snapshot_dir: PathBuf,
    file_extension: String,
    should_update: UpdatePredicate,
    fail_on_update: bool,
    create_new_automatically: bool,
    fatal_on_mismatch: bool,
    dump_mode: DumpMode,
    equivalent_modes: Vec<DumpMode>,
}

/// Update predicate that checks whether `name` is set in the environment.
///
/// Only presence matters; an empty value still counts as set.
pub fn env_variable_set(name: impl Into<String>) -> UpdatePredicate {
    let name = name.into();
    Arc::new(move || std::env::var_os(&name).is_some())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot_dir: PathBuf::from(DEFAULT_SNAPSHOT_DIR),
            file_extension: String::new(),
            should_update: env_variable_set(DEFAULT_UPDATE_ENV_VAR),
            fail_on_update: true,
            create_new_automatically: true,
            fatal_on_mismatch: false,
            dump_mode: DumpMode::Raw,
            equivalent_modes: vec![DumpMode::Structured],
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("snapshot_dir", &self.snapshot_dir)
            .field("file_extension", &self.file_extension)
            .field("fail_on_update", &self.fail_on_update)
            .field("create_new_automatically", &self.create_new_automatically)
            .field("fatal_on_mismatch", &self.fatal_on_mismatch)
            .field("dump_mode", &self.dump_mode)
            .field("equivalent_modes", &self.equivalent_modes)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Derive a new configuration with `overrides` applied in order.
    pub fn with_overrides<I>(&self, overrides: I) -> Config
    where
        I: IntoIterator<Item = Override>,
    {
        overrides
            .into_iter()
            .fold(self.clone(), |config, o| o.apply(config))
    }

    /// Derive a new configuration with every field present in `settings`.
    pub fn with_settings(&self, settings: Settings) -> Config {
        self.with_overrides(settings.into_overrides())
    }

    /// Store snapshots under `dir` instead of `.snapshots`.
    pub fn with_snapshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.snapshot_dir = dir.into();
        self
    }

    /// Append `extension` to every snapshot file name, e.g. `.snap`.
    pub fn with_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extension = extension.into();
        self
    }

    /// Enter update mode when the environment variable `name` is set.
    pub fn with_env_variable(self, name: impl Into<String>) -> Self {
        self.with_update_predicate(env_variable_set(name))
    }

    /// Decide update mode with custom logic.
    pub fn with_should_update<F>(self, f: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.with_update_predicate(Arc::new(f))
    }

    pub fn with_update_predicate(mut self, predicate: UpdatePredicate) -> Self {
        self.should_update = predicate;
        self
    }

    /// Whether writing a baseline is itself reported as a failure.
    pub fn with_fail_on_update(mut self, fail: bool) -> Self {
        self.fail_on_update = fail;
        self
    }

    /// Whether a missing baseline is recorded instead of reported.
    pub fn with_create_new_automatically(mut self, create: bool) -> Self {
        self.create_new_automatically = create;
        self
    }

    /// Whether the test adapter aborts the test instead of recording a failure.
    pub fn with_fatal_on_mismatch(mut self, fatal: bool) -> Self {
        self.fatal_on_mismatch = fatal;
        self
    }

    pub fn with_dump_mode(mut self, mode: DumpMode) -> Self {
        self.dump_mode = mode;
        self
    }

    /// Older dump modes whose output still counts as a match.
    pub fn with_equivalent_modes(mut self, modes: impl Into<Vec<DumpMode>>) -> Self {
        self.equivalent_modes = modes.into();
        self
    }

    pub fn snapshot_dir(&self) -> &Path {
        &self.snapshot_dir
    }

    pub fn file_extension(&self) -> &str {
        &self.file_extension
    }

    /// Evaluate the update predicate. Not cached.
    pub fn should_update(&self) -> bool {
        (self.should_update)()
    }

    pub fn fail_on_update(&self) -> bool {
        self.fail_on_update
    }

    pub fn create_new_automatically(&self) -> bool {
        self.create_new_automatically
    }

    pub fn fatal_on_mismatch(&self) -> bool {
        self.fatal_on_mismatch
    }

    pub fn dump_mode(&self) -> DumpMode {
        self.dump_mode
    }

    pub fn equivalent_modes(&self) -> &[DumpMode] {
        &self.equivalent_modes
    }

    /// File storage at this configuration's location.
    pub fn file_store(&self) -> FileStore {
        FileStore::new(self.snapshot_dir.clone()).with_extension(self.file_extension.clone())
    }
}

/// One configuration change, applied by [`Config::with_overrides`].
#[derive(Clone)]
pub enum Override {
    SnapshotDir(PathBuf),
    FileExtension(String),
    EnvVariable(String),
    ShouldUpdate(UpdatePredicate),
    FailOnUpdate(bool),
    CreateNewAutomatically(bool),
    FatalOnMismatch(bool),
    DumpMode(DumpMode),
    EquivalentModes(Vec<DumpMode>),
}

impl Override {
    /// Wrap a closure as an update predicate override.
    pub fn should_update<F>(f: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Override::ShouldUpdate(Arc::new(f))
    }

    pub fn apply(self, config: Config) -> Config {
        match self {
            Override::SnapshotDir(dir) => config.with_snapshot_dir(dir),
            Override::FileExtension(ext) => config.with_file_extension(ext),
            Override::EnvVariable(name) => config.with_env_variable(name),
            Override::ShouldUpdate(predicate) => config.with_update_predicate(predicate),
            Override::FailOnUpdate(fail) => config.with_fail_on_update(fail),
            Override::CreateNewAutomatically(create) => {
                config.with_create_new_automatically(create)
            }
            Override::FatalOnMismatch(fatal) => config.with_fatal_on_mismatch(fatal),
            Override::DumpMode(mode) => config.with_dump_mode(mode),
            Override::EquivalentModes(modes) => config.with_equivalent_modes(modes),
        }
    }
}

impl fmt::Debug for Override {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Override::SnapshotDir(dir) => f.debug_tuple("SnapshotDir").field(dir).finish(),
            Override::FileExtension(ext) => f.debug_tuple("FileExtension").field(ext).finish(),
            Override::EnvVariable(name) => f.debug_tuple("EnvVariable").field(name).finish(),
            Override::ShouldUpdate(_) => f.write_str("ShouldUpdate(..)"),
            Override::FailOnUpdate(v) => f.debug_tuple("FailOnUpdate").field(v).finish(),
            Override::CreateNewAutomatically(v) => {
                f.debug_tuple("CreateNewAutomatically").field(v).finish()
            }
            Override::FatalOnMismatch(v) => f.debug_tuple("FatalOnMismatch").field(v).finish(),
            Override::DumpMode(mode) => f.debug_tuple("DumpMode").field(mode).finish(),
            Override::EquivalentModes(modes) => {
                f.debug_tuple("EquivalentModes").field(modes).finish()
            }
        }
    }
}
