// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod item_formatter;
pub mod prompt_line;
pub mod theme_impl;

// Re-export.
pub use item_formatter::*;
pub use prompt_line::*;
pub use theme_impl::*;
