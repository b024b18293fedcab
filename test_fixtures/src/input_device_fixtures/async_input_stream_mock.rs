// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{pin::Pin, time::Duration};

use async_stream::stream;
use futures_core::Stream;

/// Same shape as the input stream owned by `r3bl_ask::InputDevice`, so the generated
/// streams can be handed to it directly.
pub type PinnedInputStream<T> = Pin<Box<dyn Stream<Item = T>>>;

/// Yields every item of `generator_vec` in order, then ends.
pub fn gen_input_stream<T>(generator_vec: Vec<T>) -> PinnedInputStream<T>
where
    T: 'static,
{
    let it = stream! {
        for item in generator_vec {
            yield item;
        }
    };
    Box::pin(it)
}

/// Sleeps `delay` before yielding each item.
pub fn gen_input_stream_with_delay<T>(
    generator_vec: Vec<T>,
    delay: Duration,
) -> PinnedInputStream<T>
where
    T: 'static,
{
    let it = stream! {
        for item in generator_vec {
            tokio::time::sleep(delay).await;
            yield item;
        }
    };
    Box::pin(it)
}

/// Each item carries its own delay, measured from the previous item. Handy with
/// `#[tokio::test(start_paused = true)]` to script keystrokes on a virtual clock.
pub fn gen_input_stream_with_delays<T>(
    generator_vec: Vec<(Duration, T)>,
) -> PinnedInputStream<T>
where
    T: 'static,
{
    let it = stream! {
        for (delay, item) in generator_vec {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            yield item;
        }
    };
    Box::pin(it)
}
