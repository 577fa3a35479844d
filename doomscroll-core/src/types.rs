//! Core type definitions for the doomscroll simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::RunConfig;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Stable integer identifier for a memory record, unique within a session.
///
/// Ids come from the catalog and never change while the process runs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct MemoryId(pub u32);

impl fmt::Display for MemoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Memory records
// ---------------------------------------------------------------------------

/// One unit of decaying content in the feed, analogous to a social post.
///
/// `content`, `kind`, `author`, and `year` are immutable display data;
/// `corruption_level` only ever rises (clamped to `[0, 100]`) and freezes
/// permanently the moment the record is saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryRecord {
    /// Catalog-assigned identifier.
    pub id: MemoryId,
    /// Content category shown on the card ("tweet", "forum_post", ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Original text. The immutable source of truth for corruption
    /// rendering; the core never rewrites it.
    pub content: String,
    /// Handle of whoever posted it, without the leading `@`.
    pub author: String,
    /// Year the content was posted.
    pub year: i32,
    /// Decay metric in `[0, 100]`. Drives visual degradation.
    #[serde(default)]
    pub corruption_level: f32,
    /// Whether the reader spent a save on this record. Irreversible.
    #[serde(default)]
    pub saved: bool,
}

impl MemoryRecord {
    /// Raise the corruption level by `amount`, clamped to `[0, 100]`.
    ///
    /// Saved records and records already at full corruption are left
    /// untouched. Returns whether the record was mutated, which is what
    /// decides if a corruption event is worth emitting.
    pub fn corrupt_by(&mut self, amount: f32) -> bool {
        if self.saved || self.corruption_level >= 100.0 {
            return false;
        }
        self.corruption_level = (self.corruption_level + amount).clamp(0.0, 100.0);
        true
    }

    /// Visual degradation tier in `0..=10` (one step per 10 corruption
    /// points), consumed by the render layer.
    #[must_use]
    pub fn visual_tier(&self) -> u8 {
        (self.corruption_level / 10.0).floor() as u8
    }
}

// ---------------------------------------------------------------------------
// Simulation state
// ---------------------------------------------------------------------------

/// Process-wide run state. One per [`crate::Session`], reset only by a
/// restart command.
///
/// Monotonicity: `integrity`, `time_remaining`, and `saves_remaining` never
/// increase; `ended` flips false→true exactly once and stays true.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationState {
    /// Global health metric in `[0, 100]`. Reaching 0 ends the run.
    pub integrity: f32,
    /// Seconds left on the countdown. Reaching 0 ends the run.
    pub time_remaining: u32,
    /// How many saves the reader has left.
    pub saves_remaining: u32,
    /// Terminal flag. Once true, all timers are dead and the state is
    /// frozen for the end-of-run summary.
    pub ended: bool,
    /// Wheel damping factor, `>= 1`, derived from integrity every slow
    /// tick.
    pub scroll_resistance: f32,
}

impl SimulationState {
    /// Fresh state from the run constants.
    #[must_use]
    pub fn new(run: &RunConfig) -> Self {
        Self {
            integrity: run.initial_integrity,
            time_remaining: run.initial_time_secs,
            saves_remaining: run.save_budget,
            ended: false,
            scroll_resistance: 1.0,
        }
    }

    /// Recompute wheel damping: scrolling gets harder as integrity drains.
    pub fn update_scroll_resistance(&mut self, per_point: f32) {
        self.scroll_resistance = (1.0 + (100.0 - self.integrity) * per_point).max(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(level: f32, saved: bool) -> MemoryRecord {
        MemoryRecord {
            id: MemoryId(1),
            kind: "tweet".to_string(),
            content: "hello".to_string(),
            author: "someone".to_string(),
            year: 2020,
            corruption_level: level,
            saved,
        }
    }

    #[test]
    fn corrupt_by_clamps_to_100() {
        let mut r = record(95.0, false);
        assert!(r.corrupt_by(20.0));
        assert_eq!(r.corruption_level, 100.0);
    }

    #[test]
    fn saved_record_never_corrupts() {
        let mut r = record(40.0, true);
        assert!(!r.corrupt_by(5.0));
        assert_eq!(r.corruption_level, 40.0);
    }

    #[test]
    fn fully_corrupted_record_is_left_alone() {
        let mut r = record(100.0, false);
        assert!(!r.corrupt_by(1.0));
    }

    #[test]
    fn visual_tier_steps_every_ten_points() {
        assert_eq!(record(0.0, false).visual_tier(), 0);
        assert_eq!(record(9.9, false).visual_tier(), 0);
        assert_eq!(record(10.0, false).visual_tier(), 1);
        assert_eq!(record(55.0, false).visual_tier(), 5);
        assert_eq!(record(100.0, false).visual_tier(), 10);
    }

    #[test]
    fn wire_format_uses_camel_case_and_type() {
        let json = r#"{
            "id": 3,
            "type": "forum_post",
            "content": "remember dial-up?",
            "author": "old_timer",
            "year": 1998,
            "corruptionLevel": 12.5,
            "saved": false
        }"#;
        let r: MemoryRecord = serde_json::from_str(json).expect("parse");
        assert_eq!(r.id, MemoryId(3));
        assert_eq!(r.kind, "forum_post");
        assert_eq!(r.corruption_level, 12.5);
    }

    #[test]
    fn wire_format_defaults_missing_decay_fields() {
        let json = r#"{"id": 1, "type": "tweet", "content": "x", "author": "a", "year": 2024}"#;
        let r: MemoryRecord = serde_json::from_str(json).expect("parse");
        assert_eq!(r.corruption_level, 0.0);
        assert!(!r.saved);
    }

    #[test]
    fn scroll_resistance_tracks_integrity() {
        let mut state = SimulationState::new(&RunConfig::default());
        state.update_scroll_resistance(0.05);
        assert_eq!(state.scroll_resistance, 1.0);

        state.integrity = 60.0;
        state.update_scroll_resistance(0.05);
        assert!((state.scroll_resistance - 3.0).abs() < 1e-6);
    }
}
