// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

use tokio::time::Instant;

pub const DEFAULT_INTERRUPT_WINDOW: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum InterruptSignal {
    /// First press. Becomes a plain interrupt once the window elapses.
    Armed,
    /// Second press inside the window.
    Forced,
}

/// Dead-man's switch for Ctrl-C: one press arms it, a second press before the window
/// closes escalates to forced termination.
#[derive(Debug, Clone)]
pub struct InterruptSwitch {
    window: Duration,
    maybe_armed_at: Option<Instant>,
}

impl Default for InterruptSwitch {
    fn default() -> Self { Self::new(DEFAULT_INTERRUPT_WINDOW) }
}

impl InterruptSwitch {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            maybe_armed_at: None,
        }
    }

    pub fn press(&mut self, now: Instant) -> InterruptSignal {
        match self.maybe_armed_at {
            Some(armed_at) if now.saturating_duration_since(armed_at) < self.window => {
                self.maybe_armed_at = None;
                InterruptSignal::Forced
            }
            _ => {
                self.maybe_armed_at = Some(now);
                InterruptSignal::Armed
            }
        }
    }

    /// When an armed switch turns into a plain interrupt.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.maybe_armed_at.map(|armed_at| armed_at + self.window)
    }

    #[must_use]
    pub fn is_armed(&self) -> bool { self.maybe_armed_at.is_some() }

    pub fn disarm(&mut self) { self.maybe_armed_at = None; }
}
