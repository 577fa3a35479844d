//! Configuration for the doomscroll simulation.
//!
//! Maps directly to `doomscroll.toml`. Every knob defaults to the stock
//! apocalypse: 10 minutes, 100% integrity, 15 saves, and the original
//! corruption cadence.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DoomscrollConfig {
    /// Run constants (countdown, integrity, save budget).
    #[serde(default)]
    pub run: RunConfig,
    /// Corruption engine cadence and magnitudes.
    #[serde(default)]
    pub corruption: CorruptionConfig,
    /// Feed pagination batches.
    #[serde(default)]
    pub feed: FeedConfig,
    /// Ghost activity tuning.
    #[serde(default)]
    pub ghosts: GhostConfig,
    /// Scroll/wheel input tuning.
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl DoomscrollConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Constants a fresh run starts from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Starting integrity percentage.
    #[serde(default = "default_initial_integrity")]
    pub initial_integrity: f32,
    /// Countdown length in seconds.
    #[serde(default = "default_initial_time_secs")]
    pub initial_time_secs: u32,
    /// How many records the reader may save.
    #[serde(default = "default_save_budget")]
    pub save_budget: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            initial_integrity: 100.0,
            initial_time_secs: 600,
            save_budget: 15,
        }
    }
}

/// Corruption engine cadence and magnitudes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorruptionConfig {
    /// Slow (data) tick period in milliseconds.
    #[serde(default = "default_slow_tick_ms")]
    pub slow_tick_ms: u64,
    /// Fast (visual) tick period in milliseconds.
    #[serde(default = "default_fast_tick_ms")]
    pub fast_tick_ms: u64,
    /// Integrity lost per slow tick.
    #[serde(default = "default_integrity_decay")]
    pub integrity_decay_per_tick: f32,
    /// Lower bound of the per-record increment each slow tick.
    #[serde(default = "default_base_increment_min")]
    pub base_increment_min: f32,
    /// Upper bound (exclusive) of the per-record increment each slow tick.
    #[serde(default = "default_base_increment_max")]
    pub base_increment_max: f32,
    /// Seconds remaining below which the extra acceleration pass kicks in.
    #[serde(default = "default_critical_threshold_secs")]
    pub critical_threshold_secs: u32,
    /// Lower bound of the acceleration-pass increment.
    #[serde(default = "default_accel_increment_min")]
    pub accel_increment_min: f32,
    /// Upper bound (exclusive) of the acceleration-pass increment.
    #[serde(default = "default_accel_increment_max")]
    pub accel_increment_max: f32,
    /// Probability of a global glitch per fast tick.
    #[serde(default = "default_global_glitch_chance")]
    pub global_glitch_chance: f64,
    /// Probability of a per-record glitch per visible record per fast tick.
    #[serde(default = "default_record_glitch_chance")]
    pub record_glitch_chance: f64,
    /// Global glitch visibility lower bound, milliseconds.
    #[serde(default = "default_global_glitch_min_ms")]
    pub global_glitch_min_ms: u64,
    /// Global glitch visibility upper bound (exclusive), milliseconds.
    #[serde(default = "default_global_glitch_max_ms")]
    pub global_glitch_max_ms: u64,
    /// Record glitch visibility lower bound, milliseconds.
    #[serde(default = "default_record_glitch_min_ms")]
    pub record_glitch_min_ms: u64,
    /// Record glitch visibility upper bound (exclusive), milliseconds.
    #[serde(default = "default_record_glitch_max_ms")]
    pub record_glitch_max_ms: u64,
    /// Dramatic pause between the final corruption wave and the end-of-run
    /// summary, milliseconds.
    #[serde(default = "default_end_screen_delay_ms")]
    pub end_screen_delay_ms: u64,
}

impl Default for CorruptionConfig {
    fn default() -> Self {
        Self {
            slow_tick_ms: 1_000,
            fast_tick_ms: 200,
            integrity_decay_per_tick: 0.5,
            base_increment_min: 0.5,
            base_increment_max: 1.0,
            critical_threshold_secs: 120,
            accel_increment_min: 1.0,
            accel_increment_max: 3.0,
            global_glitch_chance: 0.1,
            record_glitch_chance: 0.05,
            global_glitch_min_ms: 100,
            global_glitch_max_ms: 400,
            record_glitch_min_ms: 200,
            record_glitch_max_ms: 1_000,
            end_screen_delay_ms: 2_000,
        }
    }
}

/// Feed pagination batches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Records revealed on startup (capped by catalog size).
    #[serde(default = "default_initial_batch")]
    pub initial_batch: usize,
    /// Records revealed per pagination trigger.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Probability that a freshly revealed card arrives with a cosmetic
    /// glitch.
    #[serde(default = "default_reveal_glitch_chance")]
    pub reveal_glitch_chance: f64,
    /// Reveal glitch visibility lower bound, milliseconds.
    #[serde(default = "default_record_glitch_min_ms")]
    pub reveal_glitch_min_ms: u64,
    /// Reveal glitch visibility upper bound (exclusive), milliseconds.
    #[serde(default = "default_record_glitch_max_ms")]
    pub reveal_glitch_max_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            initial_batch: 10,
            batch_size: 5,
            reveal_glitch_chance: 0.1,
            reveal_glitch_min_ms: 200,
            reveal_glitch_max_ms: 1_000,
        }
    }
}

/// Ghost activity tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GhostConfig {
    /// Shortest delay between ghost timer firings, milliseconds.
    #[serde(default = "default_ghost_min_period_ms")]
    pub min_period_ms: u64,
    /// Longest delay (exclusive) between ghost timer firings, milliseconds.
    #[serde(default = "default_ghost_max_period_ms")]
    pub max_period_ms: u64,
    /// Probability that a firing produces an action at all.
    #[serde(default = "default_ghost_action_chance")]
    pub action_chance: f64,
    /// Records at or above this corruption level are no longer interesting
    /// to ghosts.
    #[serde(default = "default_ghost_eligible_corruption_max")]
    pub eligible_corruption_max: f32,
    /// Smallest private save budget a ghost spawns with.
    #[serde(default = "default_ghost_budget_min")]
    pub budget_min: u32,
    /// Largest private save budget a ghost spawns with (inclusive).
    #[serde(default = "default_ghost_budget_max")]
    pub budget_max: u32,
}

impl Default for GhostConfig {
    fn default() -> Self {
        Self {
            min_period_ms: 3_000,
            max_period_ms: 10_000,
            action_chance: 0.3,
            eligible_corruption_max: 80.0,
            budget_min: 5,
            budget_max: 24,
        }
    }
}

/// Scroll/wheel input tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Resistance gained per point of integrity lost.
    #[serde(default = "default_resistance_per_point")]
    pub resistance_per_integrity_point: f32,
    /// Absolute wheel delta above which a corruption surge triggers.
    #[serde(default = "default_wheel_velocity_threshold")]
    pub wheel_velocity_threshold: f32,
    /// Scroll-position delta (px) above which a corruption surge triggers.
    #[serde(default = "default_scroll_velocity_threshold")]
    pub scroll_velocity_threshold: f32,
    /// Lower bound of the velocity-surge increment.
    #[serde(default = "default_velocity_increment_min")]
    pub velocity_increment_min: f32,
    /// Upper bound (exclusive) of the velocity-surge increment.
    #[serde(default = "default_velocity_increment_max")]
    pub velocity_increment_max: f32,
    /// How many viewport heights of unread feed remain before pagination
    /// triggers.
    #[serde(default = "default_lookahead_viewports")]
    pub lookahead_viewports: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            resistance_per_integrity_point: 0.05,
            wheel_velocity_threshold: 100.0,
            scroll_velocity_threshold: 50.0,
            velocity_increment_min: 1.0,
            velocity_increment_max: 3.0,
            lookahead_viewports: 2.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_initial_integrity() -> f32 {
    100.0
}
fn default_initial_time_secs() -> u32 {
    600
}
fn default_save_budget() -> u32 {
    15
}
fn default_slow_tick_ms() -> u64 {
    1_000
}
fn default_fast_tick_ms() -> u64 {
    200
}
fn default_integrity_decay() -> f32 {
    0.5
}
fn default_base_increment_min() -> f32 {
    0.5
}
fn default_base_increment_max() -> f32 {
    1.0
}
fn default_critical_threshold_secs() -> u32 {
    120
}
fn default_accel_increment_min() -> f32 {
    1.0
}
fn default_accel_increment_max() -> f32 {
    3.0
}
fn default_global_glitch_chance() -> f64 {
    0.1
}
fn default_record_glitch_chance() -> f64 {
    0.05
}
fn default_global_glitch_min_ms() -> u64 {
    100
}
fn default_global_glitch_max_ms() -> u64 {
    400
}
fn default_record_glitch_min_ms() -> u64 {
    200
}
fn default_record_glitch_max_ms() -> u64 {
    1_000
}
fn default_end_screen_delay_ms() -> u64 {
    2_000
}
fn default_initial_batch() -> usize {
    10
}
fn default_batch_size() -> usize {
    5
}
fn default_reveal_glitch_chance() -> f64 {
    0.1
}
fn default_ghost_min_period_ms() -> u64 {
    3_000
}
fn default_ghost_max_period_ms() -> u64 {
    10_000
}
fn default_ghost_action_chance() -> f64 {
    0.3
}
fn default_ghost_eligible_corruption_max() -> f32 {
    80.0
}
fn default_ghost_budget_min() -> u32 {
    5
}
fn default_ghost_budget_max() -> u32 {
    24
}
fn default_resistance_per_point() -> f32 {
    0.05
}
fn default_wheel_velocity_threshold() -> f32 {
    100.0
}
fn default_scroll_velocity_threshold() -> f32 {
    50.0
}
fn default_velocity_increment_min() -> f32 {
    1.0
}
fn default_velocity_increment_max() -> f32 {
    3.0
}
fn default_lookahead_viewports() -> f32 {
    2.0
}
