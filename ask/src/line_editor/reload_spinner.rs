// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{future::Future, sync::Arc, time::Duration};

use crossterm::style::Print;
use futures_util::future::BoxFuture;
use tokio::{sync::oneshot, time::interval};

use crate::{CarriageReturn, CursorForward, OutputDevice, as_u16, execute_commands};

/// What a reload side effect reports back. It decides the glyph that replaces the
/// spinner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum ReloadOutcome {
    Success,
    Failure,
    NoOpinion,
}

/// Caller supplied side effect for Ctrl-R. It receives the current text of the line and
/// must not write to the terminal.
pub type ReloadHook = Arc<dyn Fn(String) -> BoxFuture<'static, ReloadOutcome> + Send + Sync>;

/// Animates the question's indicator glyph while a reload side effect is in flight.
///
/// The spinner loop and the side effect run concurrently on the current task (no
/// spawn). When the side effect settles it sends on a oneshot shutdown channel; the
/// spinner loop exits on that signal, and [`Self::spin_until_settled`] only returns
/// after both have finished. So no frame can be painted after the caller repaints the
/// final glyph.
#[allow(missing_debug_implementations)]
pub struct ReloadSpinner {
    pub output_device: OutputDevice,
    pub frames: Vec<String>,
    pub tick_delay: Duration,
    /// Zero based column of the indicator glyph.
    pub indicator_column: usize,
    /// Zero based column the cursor is returned to after each frame.
    pub cursor_column: usize,
}

impl ReloadSpinner {
    /// # Errors
    ///
    /// If painting a frame fails. The side effect still runs to completion first.
    pub async fn spin_until_settled(
        &self,
        side_effect: impl Future<Output = ReloadOutcome>,
    ) -> miette::Result<ReloadOutcome> {
        let (shutdown_sender, mut shutdown_receiver) = oneshot::channel::<()>();

        let spinner_loop = async {
            let mut interval = interval(self.tick_delay);
            let mut count = 0;
            loop {
                tokio::select! {
                    // This branch is cancel safe because the receiver is polled by
                    // reference.
                    _ = &mut shutdown_receiver => break,
                    // This branch is cancel safe because tick is cancel safe.
                    _ = interval.tick() => {
                        self.paint_frame(count)?;
                        count += 1;
                    }
                }
            }
            Ok::<(), miette::Report>(())
        };

        let settle = async move {
            let outcome = side_effect.await;
            // We don't care about the result of this operation.
            shutdown_sender.send(()).ok();
            outcome
        };

        let (spinner_result, outcome) = tokio::join!(spinner_loop, settle);
        spinner_result?;
        Ok(outcome)
    }

    fn paint_frame(&self, count: usize) -> miette::Result<()> {
        if self.frames.is_empty() {
            return Ok(());
        }
        let frame = &self.frames[count % self.frames.len()];
        execute_commands!(
            &self.output_device,
            CarriageReturn,
            CursorForward(as_u16(self.indicator_column)),
            Print(frame),
            CarriageReturn,
            CursorForward(as_u16(self.cursor_column)),
        );
        Ok(())
    }
}
