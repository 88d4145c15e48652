//! Mock server infrastructure for testing
//!
//! This module provides a shared mockito server standing in for
//! mechafil-server. Using a single shared server lets parallel tests reuse one
//! listener instead of each binding their own port.

use lazy_static::lazy_static;
use mockito::{Server, ServerGuard};
use std::sync::Mutex;

lazy_static! {
    /// Global shared mockito server for all tests
    ///
    /// Initialized once and shared across all test threads.
    pub static ref SHARED_MOCK_SERVER: Mutex<ServerGuard> = Mutex::new(Server::new());
}

/// Get reference to shared mock server
///
/// The server is protected by a Mutex to ensure thread-safe access when
/// creating/removing mocks. Must not be called from inside an async runtime;
/// async tests should use `mockito::Server::new_async` instead.
///
/// # Best Practices for Avoiding Mock Collisions
///
/// 1. **Use unique paths per test**: mount the fake service under a distinct
///    prefix (e.g. `/doctor-ok/health`) and point the client's base URL there
/// 2. **Mock cleanup is automatic**: mocks are removed when the Mock object drops
/// 3. **Lock scope matters**: hold the lock only during mock setup
///
/// # Examples
///
/// ```no_run
/// use mechafil_testkit::get_shared_mock_server;
///
/// // Example test function (not executed in doctest)
/// fn test_with_shared_server() {
///     let (mock, base_url) = {
///         let mut server = get_shared_mock_server();
///         let mock = server
///             .mock("GET", "/unique-prefix/health")
///             .with_status(200)
///             .create();
///         (mock, format!("{}/unique-prefix", server.url()))
///     }; // Lock released here
///
///     // Point the client at `base_url` and run the test...
///     drop(mock);
/// }
/// ```
pub fn get_shared_mock_server() -> std::sync::MutexGuard<'static, ServerGuard> {
    SHARED_MOCK_SERVER.lock().unwrap_or_else(|poisoned| {
        // Recover from poisoned mutex
        // The mockito server remains functional after a panic and test
        // isolation is kept through unique mock paths.
        poisoned.into_inner()
    })
}

/// Base URL of the shared server with `prefix` appended
pub fn shared_mock_url(prefix: &str) -> String {
    let server = get_shared_mock_server();
    format!("{}/{}", server.url(), prefix.trim_matches('/'))
}

// Note: Poison recovery tests live in integration tests
// See crates/mechafil-testkit/tests/poison_recovery.rs
