// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod line_editor_impl;
pub mod reload_spinner;
pub mod text_buffer;

// Re-export.
pub use line_editor_impl::*;
pub use reload_spinner::*;
pub use text_buffer::*;
