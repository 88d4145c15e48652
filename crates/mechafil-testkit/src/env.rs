//! Environment isolation utilities for testing
//!
//! Tests that read `MECHAFIL_*` variables serialize on [`ENV_LOCK`] so
//! parallel tests do not observe each other's values.

use std::sync::Mutex;

/// Static mutex to serialize tests that modify environment variables
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Run `f` with the given variables set (`Some`) or removed (`None`)
///
/// Previous values are restored afterwards, even if they were unset.
///
/// # Examples
///
/// ```rust
/// use mechafil_testkit::with_env_vars;
///
/// let url = with_env_vars(&[("MECHAFIL_SERVER_URL", Some("http://sim:1"))], || {
///     std::env::var("MECHAFIL_SERVER_URL").unwrap()
/// });
/// assert_eq!(url, "http://sim:1");
/// ```
pub fn with_env_vars<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| {
        // Recover from poisoned mutex
        // Environment variables remain valid after a panic; the lock only
        // serializes access.
        poisoned.into_inner()
    });

    let originals: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
        .collect();

    // SAFETY: We hold ENV_LOCK, ensuring no other test is modifying env vars concurrently.
    unsafe {
        for (key, value) in vars {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }

    let result = f();

    // SAFETY: We still hold ENV_LOCK, ensuring exclusive access to env vars.
    unsafe {
        for (key, value) in originals {
            match value {
                Some(value) => std::env::set_var(&key, value),
                None => std::env::remove_var(&key),
            }
        }
    }

    result
}
