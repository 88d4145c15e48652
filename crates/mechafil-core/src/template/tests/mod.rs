//! Tests for the include resolver
//!
//! Organized by concern: plain substitution, the markdown fallback and
//! error paths.

use super::*;

// Test helper functions
mod helpers;

// Rendering tests
mod render_basic;
