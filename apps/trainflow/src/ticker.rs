//! # Generation Ticker
//!
//! Drives a [`GenerationTicker`] on a tokio interval until it finishes or
//! the run is cancelled. The progress is cosmetic; cancelling simply stops
//! the updates.

use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{MissedTickBehavior, interval};
use trainflow_core::{GenerationTicker, TickOutcome};

/// How a generation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The bar reached 100%.
    Finished,
    /// Cancelled at the given percent.
    Cancelled { percent: u8 },
}

/// Create a cancel handle for [`run_generation`].
///
/// Sending `true` cancels. Dropping the sender cancels as well.
#[must_use]
pub fn cancel_channel() -> (watch::Sender<bool>, watch::Receiver<bool>) {
    watch::channel(false)
}

/// Tick `ticker` every `period`, reporting each new percent to
/// `on_progress`.
pub async fn run_generation<F>(
    mut ticker: GenerationTicker,
    period: Duration,
    mut cancel: watch::Receiver<bool>,
    mut on_progress: F,
) -> GenerationOutcome
where
    F: FnMut(u8),
{
    if *cancel.borrow_and_update() {
        return GenerationOutcome::Cancelled {
            percent: ticker.percent(),
        };
    }

    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;

            changed = cancel.changed() => {
                if changed.is_err() || *cancel.borrow_and_update() {
                    tracing::debug!("generation cancelled at {}%", ticker.percent());
                    return GenerationOutcome::Cancelled { percent: ticker.percent() };
                }
            }

            _ = timer.tick() => match ticker.tick() {
                TickOutcome::Advanced(percent) => on_progress(percent),
                TickOutcome::Finished => return GenerationOutcome::Finished,
            },
        }
    }
}

/// Cancel through `sender` when Ctrl+C is pressed.
///
/// If the signal handler cannot be installed the sender is held until
/// every receiver is gone, so the run is never cancelled spuriously.
pub fn cancel_on_ctrl_c(sender: watch::Sender<bool>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Ctrl+C received, cancelling generation");
                let _ = sender.send(true);
            }
            Err(e) => {
                tracing::warn!("Cannot listen for Ctrl+C: {}", e);
                sender.closed().await;
            }
        }
    })
}
