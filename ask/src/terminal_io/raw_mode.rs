// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io::{IsTerminal as _, Write as _},
          sync::{Arc, PoisonError}};

use crossterm::QueueableCommand as _;

use crate::{InputDevice, OutputDevice, SafeBool, ShowCursor, StdMutex};

/// Toggles raw mode for the terminal that an [`InputDevice`] reads from.
///
/// Enabling raw mode is best effort: when stdin isn't a terminal (piped input, CI) or
/// the terminal refuses, the failure is logged and the prompt keeps working with
/// whatever line discipline the device has.
#[derive(Debug, Clone)]
pub enum RawModeController {
    Terminal,
    /// Tracks the requested state in memory, so tests can check that raw mode was
    /// released.
    Mock { safe_is_raw: SafeBool },
}

impl RawModeController {
    #[must_use]
    pub fn new_terminal() -> Self { Self::Terminal }

    #[must_use]
    pub fn new_mock() -> Self {
        Self::Mock {
            safe_is_raw: Arc::new(StdMutex::new(false)),
        }
    }

    /// Returns `true` if raw mode is now on.
    pub fn try_enable(&self) -> bool {
        match self {
            Self::Terminal => {
                if !std::io::stdin().is_terminal() {
                    tracing::debug!("stdin is not a terminal, raw mode not enabled");
                    return false;
                }
                match crossterm::terminal::enable_raw_mode() {
                    Ok(()) => true,
                    Err(error) => {
                        tracing::warn!(%error, "failed to enable raw mode");
                        false
                    }
                }
            }
            Self::Mock { safe_is_raw } => {
                *safe_is_raw.lock().unwrap_or_else(PoisonError::into_inner) = true;
                true
            }
        }
    }

    pub fn disable(&self) {
        match self {
            Self::Terminal => {
                if let Err(error) = crossterm::terminal::disable_raw_mode() {
                    tracing::warn!(%error, "failed to disable raw mode");
                }
            }
            Self::Mock { safe_is_raw } => {
                *safe_is_raw.lock().unwrap_or_else(PoisonError::into_inner) = false;
            }
        }
    }

    #[must_use]
    pub fn is_raw(&self) -> bool {
        match self {
            Self::Terminal => crossterm::terminal::is_raw_mode_enabled().unwrap_or(false),
            Self::Mock { safe_is_raw } => {
                *safe_is_raw.lock().unwrap_or_else(PoisonError::into_inner)
            }
        }
    }
}

/// Holds the terminal in raw mode for the lifetime of one engine run. Dropping it shows
/// the cursor and leaves raw mode, whichever way the run ends.
#[allow(missing_debug_implementations)]
pub struct RawModeGuard {
    raw_mode: RawModeController,
    output_device: OutputDevice,
    pub is_raw: bool,
}

impl RawModeGuard {
    #[must_use]
    pub fn acquire(input_device: &InputDevice, output_device: &OutputDevice) -> Self {
        let raw_mode = input_device.raw_mode.clone();
        let is_raw = raw_mode.try_enable();
        Self {
            raw_mode,
            output_device: output_device.clone(),
            is_raw,
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        {
            let writer = lock_output_device_as_mut!(self.output_device);
            // We don't care about the result of this operation.
            writer.queue(ShowCursor).ok();
            writer.flush().ok();
        }
        if self.is_raw {
            self.raw_mode.disable();
        }
    }
}

#[cfg(test)]
mod tests {
    use r3bl_test_fixtures::StdoutMock;

    use super::*;

    #[test]
    fn test_guard_releases_raw_mode_and_shows_cursor() {
        let stdout_mock = StdoutMock::default();
        let output_device = OutputDevice::new_mock(stdout_mock.clone());
        let input_device = InputDevice::new_mock_from_chunks(Vec::<&str>::new());

        {
            let guard = RawModeGuard::acquire(&input_device, &output_device);
            assert!(guard.is_raw);
            assert!(input_device.raw_mode.is_raw());
        }

        assert!(!input_device.raw_mode.is_raw());
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "\x1b[?25h");
    }
}
