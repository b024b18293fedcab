// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{pin::Pin, sync::Arc};

use futures_core::Stream;
use smallvec::SmallVec;

pub type StdMutex<T> = std::sync::Mutex<T>;

pub type SendRawTerminal = dyn std::io::Write + Send;

pub type SafeRawTerminal = Arc<StdMutex<SendRawTerminal>>;

pub type SafeBool = Arc<StdMutex<bool>>;

/// Input is injected as a stream so that tests can script it.
pub type PinnedInputStream<T> = Pin<Box<dyn Stream<Item = T>>>;

/// Max number of bytes taken from the terminal in one read. One read is one key event.
pub const READ_BUFFER_SIZE: usize = 8;

/// The bytes delivered by a single read. An empty chunk means the stream is closed.
pub type ByteChunk = SmallVec<[u8; READ_BUFFER_SIZE]>;

pub type ByteChunkResult = std::io::Result<ByteChunk>;
