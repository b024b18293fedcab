// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Shorthand for `Ok(())` or `Ok(value)`.
#[macro_export]
macro_rules! ok {
    () => {
        Ok(())
    };
    ($value:expr) => {
        Ok($value)
    };
}

/// Locks the [`crate::OutputDevice`] and evaluates to a `&mut dyn Write`. Don't call this
/// again in the same scope while the returned reference is alive, it will deadlock!
#[macro_export]
macro_rules! lock_output_device_as_mut {
    ($device:expr) => {
        &mut *$device.lock()
    };
}

/// Queue commands to the output device without flushing. Each command locks the device
/// for the span of the queue operation.
#[macro_export]
macro_rules! queue_commands {
    ($output_device:expr $(, $command:expr)* $(,)?) => {{
        use miette::IntoDiagnostic as _;
        $(
            ::crossterm::QueueableCommand::queue(
                $crate::lock_output_device_as_mut!($output_device),
                $command
            ).into_diagnostic()?;
        )*
    }}
}

/// Same as [`queue_commands!`], then flushes the output device. Use this at the end of
/// a render cycle so the frame is visible before the next key is read.
#[macro_export]
macro_rules! execute_commands {
    ($output_device:expr $(, $command:expr)* $(,)?) => {{
        use miette::IntoDiagnostic as _;
        $(
            ::crossterm::QueueableCommand::queue(
                $crate::lock_output_device_as_mut!($output_device),
                $command
            ).into_diagnostic()?;
        )*
        ::std::io::Write::flush($crate::lock_output_device_as_mut!($output_device))
            .into_diagnostic()?;
    }}
}
