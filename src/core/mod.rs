//! # Core Module
//!
//! Ambient services shared by the editing components.
//!
//! ## Key Components
//! - `config`: `EditorConfig`, the serde-backed editor settings
//! - `logging`: the injected `SharedLogger` and the `log_to!` macro that writes through it

pub mod config;
pub mod logging;
