// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod active_engine;
pub mod answers;
pub mod ask_error;
pub mod question;
pub mod session;

// Re-export.
pub use active_engine::*;
pub use answers::*;
pub use ask_error::*;
pub use question::*;
pub use session::*;
