//! The feed view — per-card visual state driven by the core's render
//! events.
//!
//! [`FeedView`] is the headless stand-in for the DOM: it applies each
//! [`RenderEvent`] to card state, tracks transient overlays with their
//! expiry instants, and exposes the vault listing and end-screen tally.
//! Events naming a card that is not materialized are silently dropped —
//! revealed-but-unmounted is a valid transient, not an error.

use serde::Serialize;

use doomscroll_core::events::GlitchKind;
use doomscroll_core::{MemoryId, MemoryRecord, RenderEvent};

use crate::display;

/// A transient glitch overlay and when it stops being visible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Overlay {
    /// Glitch flavor.
    pub kind: GlitchKind,
    /// Simulated instant the overlay disappears.
    pub expires_at_ms: u64,
}

/// A transient ghost annotation on a card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GhostNote {
    /// Ready-to-display copy.
    pub message: String,
    /// Simulated instant the note disappears.
    pub expires_at_ms: u64,
}

/// Visual state of one card in the feed.
#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    /// Snapshot of the record (kept current for `saved`).
    pub record: MemoryRecord,
    /// Last reported corruption tier (`0..=10`).
    pub tier: u8,
    /// Active glitch overlays.
    pub glitches: Vec<Overlay>,
    /// Active ghost annotations.
    pub ghost_notes: Vec<GhostNote>,
}

/// The threshold banner currently on screen, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WarningBanner {
    /// Headline ("HALFWAY POINT", ...).
    pub title: &'static str,
    /// Body copy.
    pub message: &'static str,
    /// Simulated instant the banner disappears.
    pub expires_at_ms: u64,
}

/// How long a threshold banner stays up.
const BANNER_VISIBILITY_MS: u64 = 3_000;

/// The end-of-run tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EndScreen {
    /// Records the reader preserved.
    pub saved_count: usize,
    /// Records lost to the collapse.
    pub lost_count: usize,
}

/// Headless view state over the whole feed.
#[derive(Debug, Default)]
pub struct FeedView {
    /// Cards in reveal order.
    pub cards: Vec<CardView>,
    /// Saved records in save order.
    pub vault: Vec<MemoryRecord>,
    /// Last reported remaining save budget, once any save happened.
    pub saves_remaining: Option<u32>,
    /// Active whole-surface glitches.
    pub global_glitches: Vec<Overlay>,
    /// Threshold banner currently showing.
    pub banner: Option<WarningBanner>,
    /// Present once the run summary arrived.
    pub end_screen: Option<EndScreen>,
}

impl FeedView {
    /// New empty view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one render event observed at simulated time `now_ms`.
    pub fn apply(&mut self, now_ms: u64, event: &RenderEvent) {
        match event {
            RenderEvent::RecordRevealed { record } => {
                self.cards.push(CardView {
                    record: record.clone(),
                    tier: record.visual_tier(),
                    glitches: Vec::new(),
                    ghost_notes: Vec::new(),
                });
            }
            RenderEvent::RecordCorrupted { id, tier } => {
                if let Some(card) = self.card_mut(*id) {
                    card.tier = *tier;
                }
            }
            RenderEvent::GlobalGlitch { kind, duration_ms } => {
                self.global_glitches.push(Overlay {
                    kind: *kind,
                    expires_at_ms: now_ms + duration_ms,
                });
            }
            RenderEvent::RecordGlitch {
                id,
                kind,
                duration_ms,
            } => {
                if let Some(card) = self.card_mut(*id) {
                    card.glitches.push(Overlay {
                        kind: *kind,
                        expires_at_ms: now_ms + duration_ms,
                    });
                }
            }
            RenderEvent::ThresholdWarning { title, message } => {
                self.banner = Some(WarningBanner {
                    title,
                    message,
                    expires_at_ms: now_ms + BANNER_VISIBILITY_MS,
                });
            }
            RenderEvent::RecordSaved {
                id,
                saves_remaining,
            } => {
                self.saves_remaining = Some(*saves_remaining);
                if let Some(card) = self.card_mut(*id) {
                    card.record.saved = true;
                    let snapshot = card.record.clone();
                    self.vault.push(snapshot);
                }
            }
            RenderEvent::GhostActivity {
                id,
                username,
                action,
                duration_ms,
            } => {
                if let Some(card) = self.card_mut(*id) {
                    card.ghost_notes.push(GhostNote {
                        message: display::ghost_message(username, *action),
                        expires_at_ms: now_ms + duration_ms,
                    });
                }
            }
            RenderEvent::RunEnded {
                saved_count,
                lost_count,
            } => {
                self.end_screen = Some(EndScreen {
                    saved_count: *saved_count,
                    lost_count: *lost_count,
                });
            }
        }
    }

    /// Apply a batch of events observed at the same instant.
    pub fn apply_all(&mut self, now_ms: u64, events: &[RenderEvent]) {
        for event in events {
            self.apply(now_ms, event);
        }
    }

    /// Drop every transient overlay, note, and banner that has expired by
    /// `now_ms`.
    pub fn expire(&mut self, now_ms: u64) {
        self.global_glitches.retain(|o| o.expires_at_ms > now_ms);
        for card in &mut self.cards {
            card.glitches.retain(|o| o.expires_at_ms > now_ms);
            card.ghost_notes.retain(|n| n.expires_at_ms > now_ms);
        }
        if self
            .banner
            .as_ref()
            .is_some_and(|b| b.expires_at_ms <= now_ms)
        {
            self.banner = None;
        }
    }

    /// Look up a card by record id.
    #[must_use]
    pub fn card(&self, id: MemoryId) -> Option<&CardView> {
        self.cards.iter().find(|c| c.record.id == id)
    }

    fn card_mut(&mut self, id: MemoryId) -> Option<&mut CardView> {
        self.cards.iter_mut().find(|c| c.record.id == id)
    }

    /// The vault listing, one line per saved record — or the empty-vault
    /// copy when nothing was preserved.
    #[must_use]
    pub fn vault_lines(&self) -> Vec<String> {
        if self.vault.is_empty() {
            return vec![
                "Your vault is empty.".to_string(),
                "No memories have been preserved.".to_string(),
            ];
        }
        self.vault
            .iter()
            .map(|record| {
                format!(
                    "[{}] {} — {}",
                    record.kind,
                    record.content,
                    display::card_byline(record)
                )
            })
            .collect()
    }

    /// One-line end-of-run summary, once the run is over.
    #[must_use]
    pub fn end_summary(&self) -> Option<String> {
        self.end_screen.map(|end| {
            format!(
                "{} memories saved · {} lost forever",
                end.saved_count, end.lost_count
            )
        })
    }
}
