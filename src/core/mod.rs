//! # Core Application Logic
//!
//! This module contains Atlas's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Reply generator      │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                         ┌──────┴──────┐
//!                         │     TUI     │
//!                         │   Adapter   │
//!                         │  (ratatui)  │
//!                         └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all session state in one place
//! - [`action`]: The `Action` enum and `update()` reducer
//! - [`reply`]: The deterministic reply generator
//! - [`topic`]: Topic ids and keyword detection
//! - [`config`]: Settings and their override hierarchy

pub mod action;
pub mod config;
pub mod reply;
pub mod state;
pub mod topic;
