// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod ansi_commands;
pub mod display_width;
pub mod input_device;
pub mod output_device;
pub mod raw_mode;
pub mod terminal_io_type_aliases;

// Re-export.
pub use ansi_commands::*;
pub use display_width::*;
pub use input_device::*;
pub use output_device::*;
pub use raw_mode::*;
pub use terminal_io_type_aliases::*;
