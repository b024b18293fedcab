// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::Cancellation;

/// How one run of a prompt engine (line editor, list navigator, yes/no) ended. All of
/// these are terminal, an engine never resumes after returning one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineOutcome<T> {
    Submitted(T),
    Interrupted,
    EndOfStream,
    ForcedTermination,
}

impl<T> From<Cancellation> for EngineOutcome<T> {
    fn from(cancellation: Cancellation) -> Self {
        match cancellation {
            Cancellation::Interrupted => EngineOutcome::Interrupted,
            Cancellation::EndOfStream => EngineOutcome::EndOfStream,
            Cancellation::ForcedTermination => EngineOutcome::ForcedTermination,
        }
    }
}

impl<T> EngineOutcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> EngineOutcome<U> {
        match self {
            EngineOutcome::Submitted(it) => EngineOutcome::Submitted(f(it)),
            EngineOutcome::Interrupted => EngineOutcome::Interrupted,
            EngineOutcome::EndOfStream => EngineOutcome::EndOfStream,
            EngineOutcome::ForcedTermination => EngineOutcome::ForcedTermination,
        }
    }
}

/// What applying one key to an engine's state asks the event loop to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventLoopResult<T> {
    Continue,
    ContinueAndRerender,
    ExitWithResult(T),
}
