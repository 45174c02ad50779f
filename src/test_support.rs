//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::time::Duration;

use crate::core::state::App;

/// Creates a test App with no thinking delay.
pub fn test_app() -> App {
    App::new(Duration::ZERO)
}
