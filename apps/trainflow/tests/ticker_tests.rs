//! Tests for the async generation ticker.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use std::time::Duration;
use trainflow::ticker::{GenerationOutcome, cancel_channel, run_generation};
use trainflow_core::GenerationTicker;

#[tokio::test(start_paused = true)]
async fn test_runs_to_completion() {
    let (_cancel_tx, cancel_rx) = cancel_channel();
    let mut seen = Vec::new();

    let outcome = run_generation(
        GenerationTicker::new(25),
        Duration::from_millis(100),
        cancel_rx,
        |p| seen.push(p),
    )
    .await;

    assert_eq!(outcome, GenerationOutcome::Finished);
    assert_eq!(seen, vec![25, 50, 75, 100]);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_before_start() {
    let (cancel_tx, cancel_rx) = cancel_channel();
    cancel_tx.send(true).unwrap();
    let mut seen = Vec::new();

    let outcome = run_generation(
        GenerationTicker::default(),
        Duration::from_millis(100),
        cancel_rx,
        |p| seen.push(p),
    )
    .await;

    assert_eq!(outcome, GenerationOutcome::Cancelled { percent: 0 });
    assert!(seen.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_midway_stops_updates() {
    let (cancel_tx, cancel_rx) = cancel_channel();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(450)).await;
        let _ = cancel_tx.send(true);
    });

    let mut seen = Vec::new();
    let outcome = run_generation(
        GenerationTicker::default(),
        Duration::from_millis(100),
        cancel_rx,
        |p| seen.push(p),
    )
    .await;

    match outcome {
        GenerationOutcome::Cancelled { percent } => {
            assert!(percent > 0 && percent < 100);
            assert_eq!(seen.last().copied(), Some(percent));
        }
        GenerationOutcome::Finished => panic!("expected cancellation"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_dropped_sender_cancels() {
    let (cancel_tx, cancel_rx) = cancel_channel();
    drop(cancel_tx);

    let outcome = run_generation(
        GenerationTicker::default(),
        Duration::from_millis(100),
        cancel_rx,
        |_| {},
    )
    .await;

    assert_eq!(outcome, GenerationOutcome::Cancelled { percent: 0 });
}
