//! The corruption engine — per-tick mutation of integrity, countdown, and
//! per-record corruption, and the decision that the run is over.
//!
//! Two independent cadences drive it: the slow tick (data corruption, once
//! per simulated second) and the fast tick (cosmetic glitches, 5 Hz).
//! Surge passes — the end-game acceleration and the input-velocity
//! punishment — stack on top of the slow tick's base increment; every pass
//! is independently clamped by [`crate::types::MemoryRecord::corrupt_by`].

use tracing::debug;

use crate::config::CorruptionConfig;
use crate::events::{EventQueue, GlitchKind, RenderEvent};
use crate::rng::SimRng;
use crate::store::MemoryStore;
use crate::types::{MemoryId, SimulationState};

/// Countdown thresholds (seconds remaining) and their fixed banner copy,
/// in firing order.
const THRESHOLDS: [(u32, &str, &str); 4] = [
    (300, "HALFWAY POINT", "The internet is 50% dead"),
    (120, "CRITICAL STATE", "Less than 2 minutes remaining"),
    (30, "THE END IS NEAR", "Only 30 seconds left until digital death"),
    (10, "FINAL MOMENTS", "Internet integrity failing..."),
];

/// Tick-driven corruption of the store and the run state.
#[derive(Debug)]
pub struct CorruptionEngine {
    config: CorruptionConfig,
    next_threshold: usize,
}

impl CorruptionEngine {
    /// New engine with no thresholds fired yet.
    #[must_use]
    pub fn new(config: CorruptionConfig) -> Self {
        Self {
            config,
            next_threshold: 0,
        }
    }

    /// One slow tick: countdown, integrity decay, per-record corruption,
    /// the end-game acceleration pass, and threshold warnings.
    ///
    /// Returns whether the termination condition was reached on this tick.
    pub fn slow_tick(
        &mut self,
        state: &mut SimulationState,
        store: &mut MemoryStore,
        rng: &mut SimRng,
        events: &mut EventQueue,
    ) -> bool {
        if state.ended {
            return false;
        }

        state.time_remaining = state.time_remaining.saturating_sub(1);
        state.integrity = (state.integrity - self.config.integrity_decay_per_tick).max(0.0);

        let (lo, hi) = (self.config.base_increment_min, self.config.base_increment_max);
        for record in store.loaded_mut() {
            if record.saved || record.corruption_level >= 100.0 {
                continue;
            }
            let amount = rng.range_f32(lo, hi);
            if record.corrupt_by(amount) {
                events.push(RenderEvent::RecordCorrupted {
                    id: record.id,
                    tier: record.visual_tier(),
                });
            }
        }

        // The last stretch corrupts faster, on top of the base increment.
        if state.time_remaining < self.config.critical_threshold_secs {
            self.surge(
                store,
                rng,
                events,
                self.config.accel_increment_min,
                self.config.accel_increment_max,
            );
        }

        self.fire_thresholds(state, events);

        state.time_remaining == 0 || state.integrity <= 0.0
    }

    /// One fast tick: the glitch lotteries. Purely cosmetic — no record or
    /// state data changes here.
    pub fn fast_tick(
        &self,
        state: &SimulationState,
        store: &MemoryStore,
        visible: &[MemoryId],
        rng: &mut SimRng,
        events: &mut EventQueue,
    ) {
        if state.ended {
            return;
        }

        if rng.chance(self.config.global_glitch_chance) {
            let kind = rng
                .pick(&GlitchKind::GLOBAL)
                .copied()
                .unwrap_or(GlitchKind::Scanlines);
            let duration_ms = rng.range_u64(
                self.config.global_glitch_min_ms,
                self.config.global_glitch_max_ms,
            );
            events.push(RenderEvent::GlobalGlitch { kind, duration_ms });
        }

        for id in visible {
            // Revealed-but-unmounted (or stale) ids are a valid transient.
            let Some(record) = store.record(*id) else {
                continue;
            };
            if record.saved || !rng.chance(self.config.record_glitch_chance) {
                continue;
            }
            let kind = rng
                .pick(&GlitchKind::RECORD)
                .copied()
                .unwrap_or(GlitchKind::Text);
            let duration_ms = rng.range_u64(
                self.config.record_glitch_min_ms,
                self.config.record_glitch_max_ms,
            );
            events.push(RenderEvent::RecordGlitch {
                id: *id,
                kind,
                duration_ms,
            });
        }
    }

    /// One extra corruption pass over every unsaved loaded record, each
    /// drawing an independent increment from `[lo, hi)`. Used by the
    /// end-game acceleration and by input-velocity punishment.
    pub fn surge(
        &self,
        store: &mut MemoryStore,
        rng: &mut SimRng,
        events: &mut EventQueue,
        lo: f32,
        hi: f32,
    ) {
        for record in store.loaded_mut() {
            if record.saved {
                continue;
            }
            let amount = rng.range_f32(lo, hi);
            if record.corrupt_by(amount) {
                events.push(RenderEvent::RecordCorrupted {
                    id: record.id,
                    tier: record.visual_tier(),
                });
            }
        }
    }

    /// Force every unsaved loaded record to full corruption (the final
    /// wave at termination).
    pub fn final_corruption(&self, store: &mut MemoryStore, events: &mut EventQueue) {
        for record in store.loaded_mut() {
            if record.corrupt_by(100.0) {
                events.push(RenderEvent::RecordCorrupted {
                    id: record.id,
                    tier: record.visual_tier(),
                });
            }
        }
    }

    /// How many threshold warnings have fired so far.
    #[must_use]
    pub fn thresholds_fired(&self) -> usize {
        self.next_threshold
    }

    fn fire_thresholds(&mut self, state: &SimulationState, events: &mut EventQueue) {
        // Each threshold fires exactly once, in descending order, even if
        // the countdown skips straight past one.
        while self.next_threshold < THRESHOLDS.len() {
            let (secs, title, message) = THRESHOLDS[self.next_threshold];
            if state.time_remaining > secs {
                break;
            }
            debug!(secs, title, "countdown threshold crossed");
            events.push(RenderEvent::ThresholdWarning { title, message });
            self.next_threshold += 1;
        }
    }
}
