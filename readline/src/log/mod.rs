// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Logging is **disabled** by default. [`crate::Readline`] emits [`tracing`] events at
//! `debug` and `trace` level, and nothing is recorded unless a subscriber is installed,
//! eg: with [`try_initialize_logging_global`].
//!
//! Keep in mind that the editor owns the terminal while it runs, so logging to
//! [`DisplayPreference::Stdout`] garbles the prompt. Log to a file instead.

// Attach sources.
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod tracing_init;

// Re-export.
pub use tracing_config::*;
pub use tracing_init::*;
