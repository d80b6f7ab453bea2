//! Process-wide default configuration.
//!
//! The default is only ever replaced as a whole. Readers get an `Arc` to the
//! value current at the time of the call and never see a partial change.
//! Replacing the default from a test that runs in parallel with others is
//! last-writer-wins; prefer [`Snapshotter::with_overrides`] for settings that
//! only concern one test.
//!
//! [`Snapshotter::with_overrides`]: crate::Snapshotter::with_overrides

use keepsake_core::{Config, Override, Settings};
use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

static GLOBAL: Lazy<RwLock<Arc<Config>>> = Lazy::new(|| RwLock::new(Arc::new(initial())));

/// Defaults layered with `keepsake.json` from the working directory, if any.
fn initial() -> Config {
    match Settings::load_from_dir(Path::new(".")) {
        Ok(Some(settings)) => {
            debug!("Applying keepsake.json to the default configuration");
            Config::default().with_settings(settings)
        }
        Ok(None) => Config::default(),
        Err(e) => {
            warn!(error = %e, "Ignoring unreadable settings file");
            Config::default()
        }
    }
}

/// The current default.
pub fn get() -> Arc<Config> {
    GLOBAL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Install `config` as the default and return the previous one.
pub fn replace(config: Config) -> Arc<Config> {
    let mut global = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *global, Arc::new(config))
}

/// Derive a new default from the current one.
///
/// `f` runs without the lock held, so it may call [`get`].
pub fn update<F>(f: F) -> Arc<Config>
where
    F: FnOnce(&Config) -> Config,
{
    let next = Arc::new(f(&get()));
    let mut global = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
    *global = next.clone();
    next
}

/// Apply `overrides` to the current default.
pub fn apply<I>(overrides: I) -> Arc<Config>
where
    I: IntoIterator<Item = Override>,
{
    update(|config| config.with_overrides(overrides))
}

/// Restore the initial default.
pub fn reset() -> Arc<Config> {
    update(|_| initial())
}
