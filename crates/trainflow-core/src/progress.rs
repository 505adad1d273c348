//! # Progress Module
//!
//! Progress values shown while a training is taken or content is generated.
//!
//! The generation ticker is purely visual. It gates nothing and stands for
//! no real work; the caller decides how often to tick it and stops ticking
//! when the owning view goes away.

use crate::TrainingId;
use crate::types::percent_round_half_up;
use serde::{Deserialize, Serialize};

/// Default percent added per generation tick.
pub const DEFAULT_TICK_STEP: u8 = 2;

// =============================================================================
// GENERATION TICKER
// =============================================================================

/// Result of one ticker step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The bar moved to this percent.
    Advanced(u8),
    /// The bar had reached 100 and has been reset.
    Finished,
}

/// A fake progress bar that fills by a fixed step per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationTicker {
    percent: u8,
    step: u8,
}

impl Default for GenerationTicker {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_STEP)
    }
}

impl GenerationTicker {
    /// Create a ticker at 0%. A zero step is raised to 1.
    #[must_use]
    pub fn new(step: u8) -> Self {
        Self {
            percent: 0,
            step: step.max(1),
        }
    }

    #[must_use]
    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Advance the bar. The tick after reaching 100 reports `Finished`.
    pub fn tick(&mut self) -> TickOutcome {
        if self.percent >= 100 {
            self.percent = 0;
            return TickOutcome::Finished;
        }
        self.percent = self.percent.saturating_add(self.step).min(100);
        TickOutcome::Advanced(self.percent)
    }

    /// Ticks needed from 0% until `Finished` is reported.
    #[must_use]
    pub fn ticks_to_finish(&self) -> u32 {
        (100u32).div_ceil(self.step as u32) + 1
    }
}

// =============================================================================
// TRAINING OUTLINE
// =============================================================================

/// One module of a training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingModule {
    pub id: u32,
    pub title: String,
    pub duration_minutes: u32,
    pub completed: bool,
}

impl TrainingModule {
    #[must_use]
    pub fn new(id: u32, title: impl Into<String>, duration_minutes: u32, completed: bool) -> Self {
        Self {
            id,
            title: title.into(),
            duration_minutes,
            completed,
        }
    }
}

/// The modules of a training as shown in the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingOutline {
    pub id: TrainingId,
    pub title: String,
    pub modules: Vec<TrainingModule>,
}

impl TrainingOutline {
    #[must_use]
    pub fn completed_modules(&self) -> usize {
        self.modules.iter().filter(|m| m.completed).count()
    }

    /// Share of completed modules, in percent, rounded half up.
    #[must_use]
    pub fn overall_progress(&self) -> u8 {
        percent_round_half_up(self.completed_modules(), self.modules.len())
    }

    #[must_use]
    pub fn total_minutes(&self) -> u32 {
        self.modules.iter().map(|m| m.duration_minutes).sum()
    }
}

// =============================================================================
// PLAYBACK CLOCK
// =============================================================================

/// Elapsed-time counter of the video player. Ticked once per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackClock {
    playing: bool,
    elapsed_secs: u64,
}

impl PlaybackClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Flip between playing and paused.
    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    /// One second passed. Only counts while playing.
    pub fn tick(&mut self) {
        if self.playing {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        }
    }

    /// Back to 0:00. Playing or paused state is kept.
    pub fn reset(&mut self) {
        self.elapsed_secs = 0;
    }

    /// Elapsed time as `m:ss`.
    #[must_use]
    pub fn display(&self) -> String {
        format_clock(self.elapsed_secs)
    }
}

/// Format seconds as `m:ss`.
#[must_use]
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_fills_then_finishes_and_resets() {
        let mut ticker = GenerationTicker::default();
        let mut advanced = 0;
        loop {
            match ticker.tick() {
                TickOutcome::Advanced(p) => {
                    advanced += 1;
                    assert!(p <= 100);
                }
                TickOutcome::Finished => break,
            }
        }
        assert_eq!(advanced, 50);
        assert_eq!(ticker.percent(), 0);
        assert_eq!(ticker.ticks_to_finish(), 51);
    }

    #[test]
    fn ticker_clamps_uneven_steps() {
        let mut ticker = GenerationTicker::new(30);
        assert_eq!(ticker.tick(), TickOutcome::Advanced(30));
        assert_eq!(ticker.tick(), TickOutcome::Advanced(60));
        assert_eq!(ticker.tick(), TickOutcome::Advanced(90));
        assert_eq!(ticker.tick(), TickOutcome::Advanced(100));
        assert_eq!(ticker.tick(), TickOutcome::Finished);
        assert_eq!(ticker.ticks_to_finish(), 5);
    }

    #[test]
    fn zero_step_still_progresses() {
        let mut ticker = GenerationTicker::new(0);
        assert_eq!(ticker.tick(), TickOutcome::Advanced(1));
    }

    #[test]
    fn outline_progress_rounds_half_up() {
        let outline = TrainingOutline {
            id: TrainingId(1),
            title: "t".to_string(),
            modules: vec![
                TrainingModule::new(1, "a", 15, true),
                TrainingModule::new(2, "b", 25, true),
                TrainingModule::new(3, "c", 30, false),
                TrainingModule::new(4, "d", 35, false),
                TrainingModule::new(5, "e", 15, false),
            ],
        };
        assert_eq!(outline.completed_modules(), 2);
        assert_eq!(outline.overall_progress(), 40);
        assert_eq!(outline.total_minutes(), 120);
    }

    #[test]
    fn empty_outline_has_no_progress() {
        let outline = TrainingOutline {
            id: TrainingId(9),
            title: "empty".to_string(),
            modules: vec![],
        };
        assert_eq!(outline.overall_progress(), 0);
    }

    #[test]
    fn clock_counts_only_while_playing() {
        let mut clock = PlaybackClock::new();
        clock.tick();
        assert_eq!(clock.elapsed_secs(), 0);

        clock.toggle();
        for _ in 0..75 {
            clock.tick();
        }
        clock.toggle();
        clock.tick();
        assert!(!clock.is_playing());
        assert_eq!(clock.display(), "1:15");
    }

    #[test]
    fn reset_rewinds_without_pausing() {
        let mut clock = PlaybackClock::new();
        clock.toggle();
        for _ in 0..42 {
            clock.tick();
        }
        assert_eq!(clock.display(), "0:42");

        clock.reset();
        assert_eq!(clock.elapsed_secs(), 0);
        assert!(clock.is_playing());
        clock.tick();
        assert_eq!(clock.display(), "0:01");
    }

    #[test]
    fn format_clock_pads_seconds() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(600), "10:00");
    }
}
