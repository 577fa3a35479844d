//! Scroll and wheel input — the one-way ratchet, resistance damping, and
//! velocity-driven corruption triggers.
//!
//! The controller is pure bookkeeping: it turns raw input reports into
//! plain outcome values (snap here, surge now, load more) and leaves the
//! actual mutation to the session. It also remembers which cards the
//! render layer last reported on screen, which is what the fast tick's
//! per-record glitch lottery draws from.

use crate::config::ScrollConfig;
use crate::types::{MemoryId, SimulationState};

/// Viewport geometry reported by the render layer alongside a scroll
/// event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMetrics {
    /// Current scroll position, px from the top.
    pub scroll_y: f32,
    /// Viewport height, px.
    pub viewport_height: f32,
    /// Total rendered content height, px.
    pub content_height: f32,
}

/// What the session should do in response to a scroll report.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOutcome {
    /// Position the view must snap back to — the one-way ratchet caught an
    /// upward scroll.
    pub corrected_to: Option<f32>,
    /// The scroll moved fast enough to punish with a corruption surge.
    pub velocity_surge: bool,
    /// The viewport is near the bottom; reveal more records.
    pub load_more: bool,
}

/// What the session should do in response to a wheel event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelOutcome {
    /// The delta after resistance damping — what the view should actually
    /// scroll by.
    pub effective_delta: f32,
    /// The wheel moved fast enough to punish with a corruption surge.
    pub velocity_surge: bool,
}

/// Input bookkeeping for one run.
#[derive(Debug)]
pub struct ScrollController {
    config: ScrollConfig,
    last_scroll_y: f32,
    visible: Vec<MemoryId>,
}

impl ScrollController {
    /// New controller at the top of the feed.
    #[must_use]
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            last_scroll_y: 0.0,
            visible: Vec::new(),
        }
    }

    /// Handle a scroll-position report.
    ///
    /// Positions above the high-water mark are corrected straight back (a
    /// one-way journey); forward motion updates the mark and may trigger a
    /// velocity surge and/or pagination.
    pub fn on_scroll(&mut self, metrics: ViewportMetrics) -> ScrollOutcome {
        if metrics.scroll_y < self.last_scroll_y {
            return ScrollOutcome {
                corrected_to: Some(self.last_scroll_y),
                ..ScrollOutcome::default()
            };
        }

        let delta = metrics.scroll_y - self.last_scroll_y;
        self.last_scroll_y = metrics.scroll_y;

        ScrollOutcome {
            corrected_to: None,
            velocity_surge: delta > self.config.scroll_velocity_threshold,
            load_more: metrics.scroll_y
                > metrics.content_height
                    - metrics.viewport_height * self.config.lookahead_viewports,
        }
    }

    /// Handle a wheel event: damp the delta by the current resistance and
    /// flag high-velocity input.
    pub fn on_wheel(&self, delta_y: f32, state: &SimulationState) -> WheelOutcome {
        let effective_delta = if state.scroll_resistance > 1.0 {
            delta_y / state.scroll_resistance
        } else {
            delta_y
        };
        WheelOutcome {
            effective_delta,
            velocity_surge: delta_y.abs() > self.config.wheel_velocity_threshold,
        }
    }

    /// Record which cards the render layer currently has on screen.
    /// Ids that are unknown or unmounted are tolerated; the consumers
    /// skip them.
    pub fn observe_visible(&mut self, ids: &[MemoryId]) {
        self.visible.clear();
        self.visible.extend_from_slice(ids);
    }

    /// The last reported on-screen card ids.
    #[must_use]
    pub fn visible(&self) -> &[MemoryId] {
        &self.visible
    }

    /// The forward-only high-water mark.
    #[must_use]
    pub fn last_scroll_y(&self) -> f32 {
        self.last_scroll_y
    }
}
