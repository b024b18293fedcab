// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Optional `tracing` subscriber setup. The engines only emit events, they never
//! install a subscriber themselves. Since a prompt owns the terminal while it runs,
//! logging to a file is what you want most of the time.

// Attach sources.
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod tracing_setup;

// Re-export.
pub use tracing_config::*;
pub use tracing_setup::*;
