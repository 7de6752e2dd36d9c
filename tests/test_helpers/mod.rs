//! Shared helpers for integration tests that touch process state.

use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, OnceLock};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Scoped override of `GATEHOUSE_*` environment variables.
///
/// Holding the guard also serialises every test that reads the settings
/// variables, so assertions on effective settings cannot race.
pub struct EnvVarGuard {
    restore: Vec<(&'static str, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Sets (`Some`) or clears (`None`) each variable until the guard drops.
    pub fn apply(changes: &[(&'static str, Option<&str>)]) -> Self {
        let lock = ENV_MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let restore = changes
            .iter()
            .map(|(name, value)| {
                let prior = env::var_os(name);
                write_var(name, value.map(OsString::from));
                (*name, prior)
            })
            .collect();
        Self {
            restore,
            _lock: lock,
        }
    }

    /// Clears every listed variable until the guard drops.
    pub fn cleared(names: &[&'static str]) -> Self {
        let changes: Vec<_> = names.iter().map(|name| (*name, None)).collect();
        Self::apply(&changes)
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (name, prior) in self.restore.drain(..).rev() {
            write_var(name, prior);
        }
    }
}

fn write_var(name: &str, value: Option<OsString>) {
    unsafe {
        // SAFETY: ENV_MUTEX is held by the live guard for every mutation.
        match value {
            Some(set) => env::set_var(name, set),
            None => env::remove_var(name),
        }
    }
}
