// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # Introduction
//!
//! This is a test fixtures library that provides reusable components for testing the
//! `r3bl_ask` interactive prompt crate. It is meant to be used as a
//! [`dev-dependency`](https://doc.rust-lang.org/cargo/reference/specifying-dependencies.html#dev-dependencies).
//!
//! It provides fixtures to test async byte streams and stdout. This allows the prompt
//! engines to be tested "end to end", without a real terminal.
//! 1. The input stream fixtures script the chunks of bytes a terminal would deliver, one
//!    chunk per `read()`, optionally with delays between them.
//! 2. The stdout fixtures capture everything the engines paint so that tests can assert
//!    on the exact control sequences, or on the plain text with ANSI stripped.
//!
//! # `input_device_fixtures`
//!
//! Here's an example of how create a stream of `T` from a `Vec<T>`.
//!
//! ```
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! use futures_util::StreamExt;
//! use r3bl_test_fixtures::gen_input_stream;
//!
//! let mut input_stream = gen_input_stream(vec![1, 2, 3]);
//! for _ in 1..=3 {
//!     input_stream.next().await;
//! }
//! assert_eq!(input_stream.next().await, None);
//! # }
//! ```
//!
//! # `output_device_fixtures`
//!
//! ```
//! use std::io::Write;
//! use r3bl_test_fixtures::StdoutMock;
//!
//! let mut stdout_mock = StdoutMock::default();
//! let stdout_mock_clone = stdout_mock.clone(); // Points to the same inner buffer.
//!
//! stdout_mock.write_all(b"\x1b[31mhello\x1b[0m").unwrap();
//! assert_eq!(stdout_mock_clone.get_copy_of_buffer_as_string_strip_ansi(), "hello");
//! ```

// Attach sources.
pub mod input_device_fixtures;
pub mod output_device_fixtures;

// Re-export.
pub use input_device_fixtures::*;
pub use output_device_fixtures::*;
