//! Display formatting — the header widgets, card stage classes, save
//! control, and ghost annotation copy.

use doomscroll_core::ghost::GhostAction;
use doomscroll_core::MemoryRecord;

/// Format seconds remaining as `M:SS`.
#[must_use]
pub fn format_countdown(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Integrity as the rounded percentage shown in the header.
#[must_use]
pub fn format_integrity(integrity: f32) -> String {
    format!("{}%", integrity.round() as i64)
}

/// How urgently the countdown should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownUrgency {
    /// Plenty of time.
    Normal,
    /// Under three minutes.
    Elevated,
    /// Under one minute; pulse.
    Critical,
}

/// Urgency tier for a countdown value.
#[must_use]
pub fn countdown_urgency(secs: u32) -> CountdownUrgency {
    if secs < 60 {
        CountdownUrgency::Critical
    } else if secs < 180 {
        CountdownUrgency::Elevated
    } else {
        CountdownUrgency::Normal
    }
}

/// The state of a card's save control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveControl {
    /// Clickable.
    Available,
    /// Already spent on this card; terminal.
    Saved,
    /// The record rotted past the point of rescue.
    TooCorrupted,
    /// The global budget is gone.
    Exhausted,
}

/// Decide the save-control state for one card.
///
/// `Saved` wins over everything; a dead budget only matters for records
/// that could otherwise still be saved.
#[must_use]
pub fn save_control(record: &MemoryRecord, saves_remaining: u32) -> SaveControl {
    if record.saved {
        SaveControl::Saved
    } else if record.corruption_level > 80.0 {
        SaveControl::TooCorrupted
    } else if saves_remaining == 0 {
        SaveControl::Exhausted
    } else {
        SaveControl::Available
    }
}

/// Label shown on the save control.
#[must_use]
pub fn save_control_label(control: SaveControl) -> &'static str {
    match control {
        SaveControl::Available => "💾 Save",
        SaveControl::Saved => "✅ Saved",
        SaveControl::TooCorrupted => "💀 Too corrupted",
        SaveControl::Exhausted => "❌ No saves left",
    }
}

/// Stage classes for a card, from its corruption tier and saved flag.
///
/// Mirrors the styling contract: a `corrupted-N` base class, extra classes
/// past the 60 and 90 marks, and a freeze class for saved cards.
#[must_use]
pub fn card_stages(record: &MemoryRecord) -> Vec<String> {
    let mut stages = vec![format!("corrupted-{}", record.visual_tier())];
    if record.saved {
        stages.push("saved-memory".to_string());
        return stages;
    }
    if record.corruption_level > 60.0 {
        stages.push("critical-corruption".to_string());
    }
    if record.corruption_level > 90.0 {
        stages.push("death-throes".to_string());
    }
    stages
}

/// Annotation copy for a ghost action on a card.
#[must_use]
pub fn ghost_message(username: &str, action: GhostAction) -> String {
    match action {
        GhostAction::Saved => format!("💾 {username} saved this memory"),
        GhostAction::FailedSave => {
            format!("💀 {username} tried to save this but ran out of saves")
        }
        GhostAction::Viewing => format!("👁️ {username} is viewing this memory"),
    }
}

/// One line of the card footer: author and year.
#[must_use]
pub fn card_byline(record: &MemoryRecord) -> String {
    format!("@{} · {}", record.author, record.year)
}
