// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod list_item;
pub mod list_navigator_impl;
pub mod list_render;
pub mod list_state;

// Re-export.
pub use list_item::*;
pub use list_navigator_impl::*;
pub use list_render::*;
pub use list_state::*;
