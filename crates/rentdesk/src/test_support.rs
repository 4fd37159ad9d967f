use std::sync::{Mutex, MutexGuard, OnceLock};

/// Serializes tests that read or write process environment variables.
pub(crate) fn env_guard() -> MutexGuard<'static, ()> {
    static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
    GUARD
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
