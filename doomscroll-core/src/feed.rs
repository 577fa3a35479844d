//! Feed pagination — incremental reveal of catalog records.
//!
//! The paginator never decides *when* to load; that comes from the scroll
//! controller's near-bottom detection or an explicit command. It only
//! decides *how much*: a capped initial batch at startup, then a fixed
//! batch per trigger until the catalog runs dry.

use crate::config::FeedConfig;
use crate::events::{EventQueue, GlitchKind, RenderEvent};
use crate::rng::SimRng;
use crate::store::MemoryStore;

/// Batch-reveal policy over the memory store.
#[derive(Debug)]
pub struct FeedPaginator {
    config: FeedConfig,
}

impl FeedPaginator {
    /// New paginator with the given batch sizes.
    #[must_use]
    pub fn new(config: FeedConfig) -> Self {
        Self { config }
    }

    /// Startup reveal: `min(initial_batch, catalog size)` records.
    pub fn initial_load(
        &self,
        store: &mut MemoryStore,
        rng: &mut SimRng,
        events: &mut EventQueue,
    ) -> usize {
        self.reveal(store, rng, events, self.config.initial_batch)
    }

    /// Reveal the next fixed-size batch. Safe to call repeatedly: once the
    /// catalog is exhausted this reveals nothing and emits nothing.
    pub fn load_more(
        &self,
        store: &mut MemoryStore,
        rng: &mut SimRng,
        events: &mut EventQueue,
    ) -> usize {
        self.reveal(store, rng, events, self.config.batch_size)
    }

    fn reveal(
        &self,
        store: &mut MemoryStore,
        rng: &mut SimRng,
        events: &mut EventQueue,
        n: usize,
    ) -> usize {
        let revealed: Vec<_> = store.reveal(n).to_vec();
        for record in &revealed {
            events.push(RenderEvent::RecordRevealed {
                record: record.clone(),
            });
            // A little arrival static, for variety.
            if rng.chance(self.config.reveal_glitch_chance) {
                let kind = rng
                    .pick(&GlitchKind::RECORD)
                    .copied()
                    .unwrap_or(GlitchKind::Text);
                let duration_ms = rng.range_u64(
                    self.config.reveal_glitch_min_ms,
                    self.config.reveal_glitch_max_ms,
                );
                events.push(RenderEvent::RecordGlitch {
                    id: record.id,
                    kind,
                    duration_ms,
                });
            }
        }
        revealed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MemoryId, MemoryRecord};

    fn store_of(n: u32) -> MemoryStore {
        MemoryStore::new(
            (1..=n)
                .map(|i| MemoryRecord {
                    id: MemoryId(i),
                    kind: "tweet".to_string(),
                    content: format!("memory {i}"),
                    author: "someone".to_string(),
                    year: 2010,
                    corruption_level: 0.0,
                    saved: false,
                })
                .collect(),
        )
    }

    #[test]
    fn initial_load_is_capped_by_catalog_size() {
        let paginator = FeedPaginator::new(FeedConfig::default());
        let mut rng = SimRng::new(1);
        let mut events = EventQueue::new();

        let mut small = store_of(3);
        assert_eq!(paginator.initial_load(&mut small, &mut rng, &mut events), 3);

        let mut large = store_of(30);
        assert_eq!(
            paginator.initial_load(&mut large, &mut rng, &mut events),
            10
        );
    }

    #[test]
    fn load_more_reveals_batches_of_five_until_dry() {
        let paginator = FeedPaginator::new(FeedConfig::default());
        let mut rng = SimRng::new(1);
        let mut events = EventQueue::new();
        let mut store = store_of(12);

        paginator.initial_load(&mut store, &mut rng, &mut events);
        assert_eq!(paginator.load_more(&mut store, &mut rng, &mut events), 2);
        assert_eq!(paginator.load_more(&mut store, &mut rng, &mut events), 0);
        assert_eq!(paginator.load_more(&mut store, &mut rng, &mut events), 0);
        assert_eq!(store.revealed_count(), 12);
    }

    #[test]
    fn every_reveal_emits_a_revealed_event() {
        let paginator = FeedPaginator::new(FeedConfig {
            reveal_glitch_chance: 0.0,
            ..FeedConfig::default()
        });
        let mut rng = SimRng::new(1);
        let mut events = EventQueue::new();
        let mut store = store_of(7);

        paginator.initial_load(&mut store, &mut rng, &mut events);
        let revealed = events
            .drain()
            .into_iter()
            .filter(|e| matches!(e, RenderEvent::RecordRevealed { .. }))
            .count();
        assert_eq!(revealed, 7);
    }

    #[test]
    fn reveal_glitch_rides_along_when_the_lottery_hits() {
        let paginator = FeedPaginator::new(FeedConfig {
            reveal_glitch_chance: 1.0,
            ..FeedConfig::default()
        });
        let mut rng = SimRng::new(1);
        let mut events = EventQueue::new();
        let mut store = store_of(2);

        paginator.initial_load(&mut store, &mut rng, &mut events);
        let glitches = events
            .drain()
            .into_iter()
            .filter(|e| matches!(e, RenderEvent::RecordGlitch { .. }))
            .count();
        assert_eq!(glitches, 2);
    }
}
