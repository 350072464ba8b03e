//! Debounce gate for the search input.
//!
//! Values pushed into a [`DebounceInput`] reach the [`DebounceOutput`] only after no newer
//! value has arrived for the configured delay. Every push restarts the timer and the last
//! value wins. When the input side is dropped, a pending value is flushed immediately and
//! the output then yields `None`.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use crate::error::{AppError, AppResult};

/// Sending half of the gate
#[derive(Debug, Clone)]
pub struct DebounceInput<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> DebounceInput<T> {
    pub fn push(&self, value: T) -> AppResult<()> {
        self.tx
            .send(value)
            .map_err(|_| AppError::Internal("Debounce gate has shut down".to_string()))
    }
}

/// Receiving half of the gate, yields settled values
#[derive(Debug)]
pub struct DebounceOutput<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T> DebounceOutput<T> {
    pub async fn next(&mut self) -> Option<T> {
        self.rx.recv().await
    }
}

/// Spawns a debounce gate with the given quiet period
pub fn debounce<T: Send + 'static>(delay: Duration) -> (DebounceInput<T>, DebounceOutput<T>) {
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let (output_tx, output_rx) = mpsc::unbounded_channel();

    tokio::spawn(gate_loop(delay, input_rx, output_tx));

    (
        DebounceInput { tx: input_tx },
        DebounceOutput { rx: output_rx },
    )
}

async fn gate_loop<T>(
    delay: Duration,
    mut input_rx: mpsc::UnboundedReceiver<T>,
    output_tx: mpsc::UnboundedSender<T>,
) {
    let mut pending: Option<T> = None;

    loop {
        let next = if pending.is_some() {
            timeout(delay, input_rx.recv()).await
        } else {
            Ok(input_rx.recv().await)
        };

        match next {
            Ok(Some(value)) => pending = Some(value),
            Ok(None) => {
                if let Some(value) = pending.take() {
                    let _ = output_tx.send(value);
                }
                break;
            }
            Err(_elapsed) => {
                if let Some(value) = pending.take() {
                    if output_tx.send(value).is_err() {
                        break;
                    }
                }
            }
        }
    }

    tracing::debug!("Debounce gate stopped");
}
