// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

use tokio::time::Instant;

use super::{DecodedInput, InterruptSignal, InterruptSwitch, KeyDecoder, KeyEvent,
            control_char};
use crate::InputDevice;

/// The ways a question can end without an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Cancellation {
    /// Bare `ESC`, or a single Ctrl-C that wasn't repeated in time.
    Interrupted,
    /// Zero-length read, or Ctrl-D.
    EndOfStream,
    /// Two Ctrl-C inside the interrupt window.
    ForcedTermination,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadKey {
    Key(KeyEvent),
    Cancelled(Cancellation),
}

/// Decodes one key at a time from the [`InputDevice`], and applies the
/// cancellation rules that every engine shares. One reader lives for one engine run.
#[allow(missing_debug_implementations)]
pub struct KeyReader<'a> {
    input_device: &'a mut InputDevice,
    decoder: KeyDecoder,
    interrupt_switch: InterruptSwitch,
}

impl<'a> KeyReader<'a> {
    pub fn new(input_device: &'a mut InputDevice, interrupt_window: Duration) -> Self {
        Self {
            input_device,
            decoder: KeyDecoder::new(),
            interrupt_switch: InterruptSwitch::new(interrupt_window),
        }
    }

    /// Suspends until a key the engine has to handle arrives, or the question is
    /// cancelled. A first Ctrl-C is swallowed and arms the interrupt switch; keys typed
    /// while it is armed are still delivered.
    ///
    /// # Errors
    ///
    /// If reading from the input device fails.
    pub async fn read_key(&mut self) -> miette::Result<ReadKey> {
        loop {
            let chunk = match self.interrupt_switch.deadline() {
                Some(deadline) => tokio::select! {
                    // This branch is cancel safe because the stream keeps its own state
                    // between polls.
                    it = self.input_device.read_chunk() => it?,
                    () = tokio::time::sleep_until(deadline) => {
                        self.interrupt_switch.disarm();
                        tracing::debug!("interrupt window elapsed");
                        return Ok(ReadKey::Cancelled(Cancellation::Interrupted));
                    }
                },
                None => self.input_device.read_chunk().await?,
            };

            let event = match self.decoder.decode(&chunk) {
                DecodedInput::EndOfStream => {
                    return Ok(ReadKey::Cancelled(Cancellation::EndOfStream));
                }
                DecodedInput::Key { event, consumed } => {
                    // The rest of the read (typeahead, paste, piped input) is decoded
                    // on the next call, one event at a time.
                    self.input_device.unread(chunk.get(consumed..).unwrap_or_default());
                    event
                }
            };

            match event {
                KeyEvent::ControlChar(control_char::CTRL_C) => {
                    match self.interrupt_switch.press(Instant::now()) {
                        InterruptSignal::Armed => continue,
                        InterruptSignal::Forced => {
                            return Ok(ReadKey::Cancelled(
                                Cancellation::ForcedTermination,
                            ));
                        }
                    }
                }
                KeyEvent::ControlChar(control_char::CTRL_D) => {
                    return Ok(ReadKey::Cancelled(Cancellation::EndOfStream));
                }
                KeyEvent::ControlChar(control_char::ESCAPE) => {
                    return Ok(ReadKey::Cancelled(Cancellation::Interrupted));
                }
                other => return Ok(ReadKey::Key(other)),
            }
        }
    }
}
