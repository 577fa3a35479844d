//! The session — one complete run from the first reveal to the terminal
//! state.
//!
//! A [`Session`] owns every subsystem and drives them from a single
//! simulated event loop: timer firings and input callbacks run to
//! completion one at a time, so no locking is ever needed. Embedders call
//! [`Session::advance_by`] to move time forward, feed it input reports and
//! commands, and drain the render-event stream after each step.

use tracing::info;

use crate::catalog;
use crate::config::DoomscrollConfig;
use crate::engine::CorruptionEngine;
use crate::error::SaveError;
use crate::events::{EventQueue, RenderEvent};
use crate::feed::FeedPaginator;
use crate::ghost::{GhostSimulator, GhostUser};
use crate::input::{ScrollController, ScrollOutcome, ViewportMetrics, WheelOutcome};
use crate::rng::SimRng;
use crate::scheduler::{Firing, Scheduler, TaskKind};
use crate::store::MemoryStore;
use crate::types::{MemoryId, MemoryRecord, SimulationState};

/// One run of the apocalypse: state, store, timers, ghosts, and the event
/// stream, behind the command surface the render layer talks to.
#[derive(Debug)]
pub struct Session {
    config: DoomscrollConfig,
    /// Pristine catalog copy, kept for restarts.
    catalog: Vec<MemoryRecord>,
    state: SimulationState,
    store: MemoryStore,
    engine: CorruptionEngine,
    feed: FeedPaginator,
    ghosts: GhostSimulator,
    scroll: ScrollController,
    scheduler: Scheduler,
    rng: SimRng,
    events: EventQueue,
    summary_emitted: bool,
}

impl Session {
    /// Start a run over `catalog` with the given config and RNG seed.
    ///
    /// An empty catalog is replaced by the built-in fallback record, so a
    /// session always has something to corrupt.
    #[must_use]
    pub fn new(catalog: Vec<MemoryRecord>, config: DoomscrollConfig, seed: u64) -> Self {
        let catalog = if catalog.is_empty() {
            catalog::fallback_catalog()
        } else {
            catalog
        };

        let mut rng = SimRng::new(seed);
        let mut events = EventQueue::new();
        let mut store = MemoryStore::new(catalog.clone());
        let state = SimulationState::new(&config.run);
        let engine = CorruptionEngine::new(config.corruption.clone());
        let feed = FeedPaginator::new(config.feed.clone());
        let ghosts = GhostSimulator::new(config.ghosts.clone(), &mut rng);
        let scroll = ScrollController::new(config.scroll.clone());
        let mut scheduler = Scheduler::new();

        feed.initial_load(&mut store, &mut rng, &mut events);
        scheduler.schedule_in(config.corruption.slow_tick_ms, TaskKind::SlowTick);
        scheduler.schedule_in(config.corruption.fast_tick_ms, TaskKind::FastTick);
        let ghost_delay = ghosts.next_period_ms(&mut rng);
        scheduler.schedule_in(ghost_delay, TaskKind::GhostTick);

        info!(seed, records = store.total(), "run started");

        Self {
            config,
            catalog,
            state,
            store,
            engine,
            feed,
            ghosts,
            scroll,
            scheduler,
            rng,
            events,
            summary_emitted: false,
        }
    }

    // -----------------------------------------------------------------
    // Time
    // -----------------------------------------------------------------

    /// Advance simulated time by `ms`, firing due timers in deterministic
    /// order.
    pub fn advance_by(&mut self, ms: u64) {
        let target = self.scheduler.now_ms().saturating_add(ms);
        self.advance_to(target);
    }

    /// Advance simulated time to the absolute instant `target_ms`.
    pub fn advance_to(&mut self, target_ms: u64) {
        while let Some(firing) = self.scheduler.pop_due(target_ms) {
            self.dispatch(firing);
        }
        self.scheduler.advance_to(target_ms);
    }

    /// Keep advancing until the end-of-run summary has been emitted, or
    /// until `max_ms` of simulated time has passed — whichever comes
    /// first.
    pub fn run_to_completion(&mut self, max_ms: u64) {
        let deadline = self.scheduler.now_ms().saturating_add(max_ms);
        while !self.summary_emitted {
            match self.scheduler.pop_due(deadline) {
                Some(firing) => self.dispatch(firing),
                None => break,
            }
        }
    }

    fn dispatch(&mut self, firing: Firing) {
        match firing.kind {
            TaskKind::SlowTick => self.on_slow_tick(),
            TaskKind::FastTick => self.on_fast_tick(),
            TaskKind::GhostTick => self.on_ghost_tick(firing.at_ms),
            TaskKind::RunComplete => self.on_run_complete(),
        }
    }

    // -----------------------------------------------------------------
    // Tick handlers
    // -----------------------------------------------------------------

    fn on_slow_tick(&mut self) {
        if self.state.ended {
            return;
        }
        let terminal = self.engine.slow_tick(
            &mut self.state,
            &mut self.store,
            &mut self.rng,
            &mut self.events,
        );
        self.state
            .update_scroll_resistance(self.config.scroll.resistance_per_integrity_point);

        if terminal {
            self.end_run();
        } else {
            self.scheduler
                .schedule_in(self.config.corruption.slow_tick_ms, TaskKind::SlowTick);
        }
    }

    fn on_fast_tick(&mut self) {
        if self.state.ended {
            return;
        }
        self.engine.fast_tick(
            &self.state,
            &self.store,
            self.scroll.visible(),
            &mut self.rng,
            &mut self.events,
        );
        self.scheduler
            .schedule_in(self.config.corruption.fast_tick_ms, TaskKind::FastTick);
    }

    fn on_ghost_tick(&mut self, at_ms: u64) {
        if self.state.ended {
            return;
        }
        self.ghosts
            .tick(&self.store, &mut self.rng, &mut self.events, at_ms);
        let delay = self.ghosts.next_period_ms(&mut self.rng);
        self.scheduler.schedule_in(delay, TaskKind::GhostTick);
    }

    /// The one-shot terminal transition: freeze state, kill the timers,
    /// run the final corruption wave, and queue the summary after the
    /// dramatic pause.
    fn end_run(&mut self) {
        if self.state.ended {
            return;
        }
        self.state.ended = true;
        self.scheduler.cancel_periodic();
        self.engine
            .final_corruption(&mut self.store, &mut self.events);
        self.scheduler.schedule_in(
            self.config.corruption.end_screen_delay_ms,
            TaskKind::RunComplete,
        );
        info!(
            saved = self.store.saved_count(),
            lost = self.store.lost_count(),
            integrity = self.state.integrity,
            time_remaining = self.state.time_remaining,
            "the internet has died"
        );
    }

    fn on_run_complete(&mut self) {
        self.summary_emitted = true;
        self.events.push(RenderEvent::RunEnded {
            saved_count: self.store.saved_count(),
            lost_count: self.store.lost_count(),
        });
    }

    // -----------------------------------------------------------------
    // Commands from the render layer
    // -----------------------------------------------------------------

    /// Save a revealed record, spending one from the budget. Irreversible.
    ///
    /// # Errors
    /// [`SaveError::RunEnded`] after termination,
    /// [`SaveError::NoSavesRemaining`] once the budget is spent, and the
    /// store's own [`SaveError::NotFound`] / [`SaveError::AlreadySaved`].
    pub fn request_save(&mut self, id: MemoryId) -> Result<(), SaveError> {
        if self.state.ended {
            return Err(SaveError::RunEnded);
        }
        if self.state.saves_remaining == 0 {
            return Err(SaveError::NoSavesRemaining);
        }
        self.store.mark_saved(id)?;
        self.state.saves_remaining -= 1;
        self.events.push(RenderEvent::RecordSaved {
            id,
            saves_remaining: self.state.saves_remaining,
        });
        Ok(())
    }

    /// Explicit pagination trigger. Returns how many records were
    /// revealed (0 once the catalog is exhausted or the run is over).
    pub fn request_more_records(&mut self) -> usize {
        if self.state.ended {
            return 0;
        }
        self.feed
            .load_more(&mut self.store, &mut self.rng, &mut self.events)
    }

    /// Tear everything down and start a fresh run from the constants,
    /// over the same catalog, with a new seed.
    pub fn request_restart(&mut self, seed: u64) {
        let catalog = std::mem::take(&mut self.catalog);
        let config = self.config.clone();
        info!(seed, "restarting run");
        *self = Session::new(catalog, config, seed);
    }

    /// Scroll-position report from the render layer. Applies ratchet
    /// correction, velocity punishment, and pagination as side effects;
    /// the returned outcome tells the view what to do.
    pub fn handle_scroll(&mut self, metrics: ViewportMetrics) -> ScrollOutcome {
        if self.state.ended {
            return ScrollOutcome::default();
        }
        let outcome = self.scroll.on_scroll(metrics);
        if outcome.velocity_surge {
            self.velocity_surge();
        }
        if outcome.load_more {
            self.feed
                .load_more(&mut self.store, &mut self.rng, &mut self.events);
        }
        outcome
    }

    /// Wheel report from the render layer. The returned outcome carries
    /// the resistance-damped delta the view should apply.
    pub fn handle_wheel(&mut self, delta_y: f32) -> WheelOutcome {
        if self.state.ended {
            return WheelOutcome {
                effective_delta: delta_y,
                velocity_surge: false,
            };
        }
        let outcome = self.scroll.on_wheel(delta_y, &self.state);
        if outcome.velocity_surge {
            self.velocity_surge();
        }
        outcome
    }

    /// Report which cards are currently on screen (feeds the per-record
    /// glitch lottery).
    pub fn observe_visible(&mut self, ids: &[MemoryId]) {
        self.scroll.observe_visible(ids);
    }

    fn velocity_surge(&mut self) {
        self.engine.surge(
            &mut self.store,
            &mut self.rng,
            &mut self.events,
            self.config.scroll.velocity_increment_min,
            self.config.scroll.velocity_increment_max,
        );
    }

    // -----------------------------------------------------------------
    // Observation
    // -----------------------------------------------------------------

    /// Take every pending render event, in emission order.
    pub fn drain_events(&mut self) -> Vec<RenderEvent> {
        self.events.drain()
    }

    /// The run state.
    #[must_use]
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// The record store.
    #[must_use]
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// The ghost cast.
    #[must_use]
    pub fn ghost_users(&self) -> &[GhostUser] {
        self.ghosts.ghosts()
    }

    /// Current simulated time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// The seed this run was started (or restarted) with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Whether the end-of-run summary has been emitted.
    #[must_use]
    pub fn finished(&self) -> bool {
        self.summary_emitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MemoryId;

    fn catalog(n: u32) -> Vec<MemoryRecord> {
        (1..=n)
            .map(|i| MemoryRecord {
                id: MemoryId(i),
                kind: "tweet".to_string(),
                content: format!("memory {i}"),
                author: format!("user_{i}"),
                year: 2000 + i as i32,
                corruption_level: 0.0,
                saved: false,
            })
            .collect()
    }

    #[test]
    fn startup_reveals_the_initial_batch_and_schedules_ticks() {
        let mut session = Session::new(catalog(30), DoomscrollConfig::default(), 42);
        assert_eq!(session.store().revealed_count(), 10);

        let events = session.drain_events();
        let revealed = events
            .iter()
            .filter(|e| matches!(e, RenderEvent::RecordRevealed { .. }))
            .count();
        assert_eq!(revealed, 10);
    }

    #[test]
    fn empty_catalog_falls_back_to_the_builtin_record() {
        let session = Session::new(Vec::new(), DoomscrollConfig::default(), 42);
        assert_eq!(session.store().total(), 1);
        assert_eq!(session.store().loaded()[0].author, "digital_mourner");
    }

    #[test]
    fn restart_reinitializes_from_constants() {
        let mut session = Session::new(catalog(30), DoomscrollConfig::default(), 42);
        session.advance_by(30_000);
        session.request_save(MemoryId(1)).expect("save");
        assert!(session.state().integrity < 100.0);

        session.request_restart(7);
        assert_eq!(session.state().integrity, 100.0);
        assert_eq!(session.state().time_remaining, 600);
        assert_eq!(session.state().saves_remaining, 15);
        assert!(!session.state().ended);
        assert_eq!(session.now_ms(), 0);
        assert_eq!(session.seed(), 7);
        assert_eq!(session.store().saved_count(), 0);
        assert!(!session.store().loaded().iter().any(|r| r.saved));
    }
}
