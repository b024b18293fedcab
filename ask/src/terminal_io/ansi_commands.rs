// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Terminal control primitives, emitted as literal VT sequences. These are crossterm
//! [`Command`]s so they can be queued on an [`crate::OutputDevice`] with
//! [`crate::queue_commands!`] alongside [`crossterm::style::Print`].
//!
//! Crossterm's own cursor commands encode some of these differently (eg: `MoveUp(1)` is
//! `\x1b[1A`), and the prompt engines depend on the exact bytes below.

use std::fmt;

use crossterm::Command;

macro_rules! fixed_sequence_command {
    ($(#[$meta:meta])* $name:ident, $sequence:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name;

        impl Command for $name {
            fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
                f.write_str($sequence)
            }

            #[cfg(windows)]
            fn execute_winapi(&self) -> std::io::Result<()> { Ok(()) }
        }
    };
}

macro_rules! counted_sequence_command {
    ($(#[$meta:meta])* $name:ident, $final_byte:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub u16);

        impl Command for $name {
            fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
                // Terminals treat a count of 0 as 1.
                if self.0 == 0 {
                    return Ok(());
                }
                write!(f, concat!("\x1b[{}", $final_byte), self.0)
            }

            #[cfg(windows)]
            fn execute_winapi(&self) -> std::io::Result<()> { Ok(()) }
        }
    };
}

fixed_sequence_command!(
    /// `\r`
    CarriageReturn,
    "\r"
);

fixed_sequence_command!(
    /// `\n`
    NewLine,
    "\n"
);

fixed_sequence_command!(
    /// `\x1b[K`, clear from the cursor to the end of the line.
    ClearToLineEnd,
    "\x1b[K"
);

fixed_sequence_command!(
    /// `\x1b[A`
    CursorUp,
    "\x1b[A"
);

fixed_sequence_command!(
    /// `\x1b[?25l`
    HideCursor,
    "\x1b[?25l"
);

fixed_sequence_command!(
    /// `\x1b[?25h`
    ShowCursor,
    "\x1b[?25h"
);

counted_sequence_command!(
    /// `\x1b[<n>C`, nothing when `n` is 0.
    CursorForward,
    "C"
);

counted_sequence_command!(
    /// `\x1b[<n>D`, nothing when `n` is 0.
    CursorBackward,
    "D"
);

counted_sequence_command!(
    /// `\x1b[<n>G`, where `n` is the 1-based column.
    CursorToColumn,
    "G"
);
