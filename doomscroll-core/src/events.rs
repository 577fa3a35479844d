//! The render-facing event stream.
//!
//! The core never touches a display. Every externally visible change is
//! pushed onto an [`EventQueue`] as a [`RenderEvent`], and a presentation
//! layer drains the queue after driving the session. Transient events
//! (glitches, ghost annotations, warnings) carry their own visibility
//! windows; expiring them is the consumer's job.

use serde::Serialize;

use crate::ghost::GhostAction;
use crate::types::{MemoryId, MemoryRecord};

/// Visual glitch flavors, split between whole-surface and per-card use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GlitchKind {
    /// Scrambled-text overlay.
    Text,
    /// RGB channel separation.
    Rgb,
    /// Static noise burst.
    Static,
    /// VHS tracking distortion.
    VhsDistort,
    /// Whole-surface scanlines.
    Scanlines,
}

impl GlitchKind {
    /// Kinds applicable to a single card.
    pub const RECORD: [Self; 4] = [Self::Text, Self::Rgb, Self::Static, Self::VhsDistort];
    /// Kinds applicable to the whole surface.
    pub const GLOBAL: [Self; 2] = [Self::Scanlines, Self::VhsDistort];
}

/// One step of the apocalypse, as seen by the render layer.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    /// A new record entered the feed. Carries a snapshot so the card can
    /// be built without a store lookup.
    RecordRevealed {
        /// The record as it was at reveal time.
        record: MemoryRecord,
    },
    /// A record's corruption level moved; re-style its card.
    RecordCorrupted {
        /// Which record.
        id: MemoryId,
        /// Its new visual tier (`0..=10`).
        tier: u8,
    },
    /// Transient whole-surface glitch.
    GlobalGlitch {
        /// Flavor to apply.
        kind: GlitchKind,
        /// How long it stays visible.
        duration_ms: u64,
    },
    /// Transient glitch on one card.
    RecordGlitch {
        /// Which record.
        id: MemoryId,
        /// Flavor to apply.
        kind: GlitchKind,
        /// How long it stays visible.
        duration_ms: u64,
    },
    /// Countdown threshold crossed. Each fires at most once per run.
    ThresholdWarning {
        /// Banner headline.
        title: &'static str,
        /// Banner body copy.
        message: &'static str,
    },
    /// The reader saved a record; freeze its card.
    RecordSaved {
        /// Which record.
        id: MemoryId,
        /// Saves left after this one.
        saves_remaining: u32,
    },
    /// A ghost did something cosmetic to a card.
    GhostActivity {
        /// Which record.
        id: MemoryId,
        /// The ghost's username.
        username: String,
        /// What it appeared to do.
        action: GhostAction,
        /// How long the annotation stays visible.
        duration_ms: u64,
    },
    /// The run is over; show the tally.
    RunEnded {
        /// Records the reader preserved.
        saved_count: usize,
        /// Records lost to the collapse (catalog total minus saved).
        lost_count: usize,
    },
}

/// FIFO queue of pending render events.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<RenderEvent>,
}

impl EventQueue {
    /// New empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn push(&mut self, event: RenderEvent) {
        self.events.push(event);
    }

    /// Number of pending events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether anything is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take everything pending, in emission order.
    pub fn drain(&mut self) -> Vec<RenderEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_in_order() {
        let mut queue = EventQueue::new();
        queue.push(RenderEvent::RecordCorrupted {
            id: MemoryId(1),
            tier: 2,
        });
        queue.push(RenderEvent::RecordCorrupted {
            id: MemoryId(2),
            tier: 3,
        });

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert!(queue.is_empty());
        assert!(matches!(
            drained[0],
            RenderEvent::RecordCorrupted {
                id: MemoryId(1),
                ..
            }
        ));
    }

    #[test]
    fn glitch_kind_pools_do_not_drift() {
        assert_eq!(GlitchKind::RECORD.len(), 4);
        assert_eq!(GlitchKind::GLOBAL.len(), 2);
        assert!(GlitchKind::GLOBAL.contains(&GlitchKind::Scanlines));
        assert!(!GlitchKind::RECORD.contains(&GlitchKind::Scanlines));
    }
}
