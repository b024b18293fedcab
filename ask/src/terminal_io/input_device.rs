// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use futures_util::StreamExt as _;
use miette::IntoDiagnostic as _;
use tokio::io::AsyncReadExt as _;

use crate::{ByteChunk, ByteChunkResult, PinnedInputStream, RawModeController,
            READ_BUFFER_SIZE};

/// This struct represents an input device that the prompt engines read key presses
/// from, one chunk of bytes per read.
#[allow(missing_debug_implementations)]
pub struct InputDevice {
    pub resource: PinnedInputStream<ByteChunkResult>,
    pub raw_mode: RawModeController,
    /// Bytes of an earlier read that were not decoded yet. Served before the next read
    /// from `resource`, so typeahead survives from one question to the next.
    unread: ByteChunk,
}

impl InputDevice {
    /// Reads stdin in chunks of at most [`READ_BUFFER_SIZE`] bytes. The stream yields an
    /// empty chunk, then ends, once stdin is closed.
    #[must_use]
    pub fn new_stdin() -> InputDevice {
        let it = async_stream::stream! {
            let mut stdin = tokio::io::stdin();
            loop {
                let mut buffer = [0_u8; READ_BUFFER_SIZE];
                match stdin.read(&mut buffer).await {
                    Ok(count) => {
                        yield Ok(ByteChunk::from_slice(&buffer[..count]));
                        if count == 0 {
                            break;
                        }
                    }
                    Err(error) => {
                        yield Err(error);
                        break;
                    }
                }
            }
        };
        InputDevice {
            resource: Box::pin(it),
            raw_mode: RawModeController::new_terminal(),
            unread: ByteChunk::new(),
        }
    }

    #[must_use]
    pub fn new_mock(resource: PinnedInputStream<ByteChunkResult>) -> InputDevice {
        InputDevice {
            resource,
            raw_mode: RawModeController::new_mock(),
            unread: ByteChunk::new(),
        }
    }

    /// Each item becomes one read.
    #[must_use]
    pub fn new_mock_from_chunks<T>(chunks: Vec<T>) -> InputDevice
    where
        T: AsRef<[u8]> + 'static,
    {
        let it = async_stream::stream! {
            for chunk in chunks {
                yield ByteChunkResult::Ok(ByteChunk::from_slice(chunk.as_ref()));
            }
        };
        Self::new_mock(Box::pin(it))
    }
}

impl InputDevice {
    /// Returns the unread bytes if there are any, otherwise suspends until the next
    /// chunk arrives. The end of the underlying stream is reported the same way as a
    /// zero-length read: an empty chunk.
    ///
    /// # Errors
    ///
    /// If the underlying read fails.
    pub async fn read_chunk(&mut self) -> miette::Result<ByteChunk> {
        if !self.unread.is_empty() {
            return Ok(std::mem::take(&mut self.unread));
        }
        match self.resource.next().await {
            Some(it) => it.into_diagnostic(),
            None => Ok(ByteChunk::new()),
        }
    }
}

impl InputDevice {
    /// Puts bytes back, in front of anything already unread. They are returned by the
    /// next [`Self::read_chunk`] without touching the underlying stream.
    pub fn unread(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        let mut acc = ByteChunk::from_slice(bytes);
        acc.extend_from_slice(&self.unread);
        self.unread = acc;
    }

    #[must_use]
    pub fn has_unread(&self) -> bool { !self.unread.is_empty() }
}
