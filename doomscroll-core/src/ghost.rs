//! Ghost users — simulated other survivors haunting the feed.
//!
//! Ghosts are narrative flavor, not state: nothing they do touches a
//! [`crate::MemoryRecord`] or the run state. Each firing of the ghost
//! timer *may* produce one transient annotation on one card, and each
//! ghost keeps a private save budget so its "saves" eventually dry up.

use serde::Serialize;
use tracing::debug;

use crate::config::GhostConfig;
use crate::events::{EventQueue, RenderEvent};
use crate::rng::SimRng;
use crate::store::MemoryStore;
use crate::types::MemoryId;

/// Usernames for the simulated other survivors.
const GHOST_NAMES: [&str; 10] = [
    "digital_refugee_2847",
    "memory_keeper_lost",
    "AnonymousArchiver",
    "last_librarian",
    "data_shepherd_99",
    "CyberNostalgia",
    "forgotten_username",
    "archive_angel",
    "bit_preserver",
    "echo_in_the_void",
];

/// An ephemeral simulated actor. Created once at run start, never
/// persisted.
#[derive(Debug, Clone)]
pub struct GhostUser {
    /// Display handle.
    pub username: String,
    /// Private save budget; a ghost with 0 left goes quiet.
    pub saves_remaining: u32,
    /// Simulated instant of this ghost's last action.
    pub last_action_ms: u64,
}

/// What a ghost appeared to do to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GhostAction {
    /// "X saved this memory" — costs the ghost one budgeted save.
    Saved,
    /// "X tried to save this but ran out of saves."
    FailedSave,
    /// "X is viewing this memory."
    Viewing,
}

impl GhostAction {
    const ALL: [Self; 3] = [Self::Saved, Self::FailedSave, Self::Viewing];

    /// How long the annotation stays visible on the card.
    #[must_use]
    pub fn visibility_ms(self) -> u64 {
        match self {
            Self::Saved => 3_000,
            Self::FailedSave => 4_000,
            Self::Viewing => 2_000,
        }
    }
}

/// The ghost cast and its firing logic.
#[derive(Debug)]
pub struct GhostSimulator {
    config: GhostConfig,
    ghosts: Vec<GhostUser>,
}

impl GhostSimulator {
    /// Spawn the full cast with randomized private budgets.
    #[must_use]
    pub fn new(config: GhostConfig, rng: &mut SimRng) -> Self {
        let ghosts = GHOST_NAMES
            .iter()
            .map(|name| GhostUser {
                username: (*name).to_string(),
                saves_remaining: rng.range_u32_inclusive(config.budget_min, config.budget_max),
                last_action_ms: 0,
            })
            .collect();
        Self { config, ghosts }
    }

    /// The delay until the next firing — re-randomized every time, so the
    /// cadence never settles into a rhythm.
    pub fn next_period_ms(&self, rng: &mut SimRng) -> u64 {
        rng.range_u64(self.config.min_period_ms, self.config.max_period_ms)
    }

    /// One firing of the ghost timer.
    ///
    /// Most firings do nothing. When one lands, it targets a single
    /// lightly-corrupted unsaved record; a broke ghost drops the firing
    /// silently — no retry, no event.
    pub fn tick(
        &mut self,
        store: &MemoryStore,
        rng: &mut SimRng,
        events: &mut EventQueue,
        now_ms: u64,
    ) {
        if !rng.chance(self.config.action_chance) {
            return;
        }

        let eligible: Vec<MemoryId> = store
            .loaded()
            .iter()
            .filter(|r| !r.saved && r.corruption_level < self.config.eligible_corruption_max)
            .map(|r| r.id)
            .collect();
        let Some(target) = rng.pick(&eligible).copied() else {
            return;
        };
        let Some(ghost_idx) = rng.pick_index(self.ghosts.len()) else {
            return;
        };
        if self.ghosts[ghost_idx].saves_remaining == 0 {
            return;
        }

        let action = rng
            .pick(&GhostAction::ALL)
            .copied()
            .unwrap_or(GhostAction::Viewing);
        let ghost = &mut self.ghosts[ghost_idx];
        if action == GhostAction::Saved {
            ghost.saves_remaining -= 1;
        }
        ghost.last_action_ms = now_ms;

        debug!(username = %ghost.username, ?action, target = %target, "ghost activity");
        events.push(RenderEvent::GhostActivity {
            id: target,
            username: ghost.username.clone(),
            action,
            duration_ms: action.visibility_ms(),
        });
    }

    /// The cast, for inspection.
    #[must_use]
    pub fn ghosts(&self) -> &[GhostUser] {
        &self.ghosts
    }
}
