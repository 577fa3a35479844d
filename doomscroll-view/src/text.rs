//! Corrupted-text rendering.
//!
//! The original content string is never mutated; corruption is re-rendered
//! from it every time, so a card's text can rot gradually while a saved
//! card re-renders clean forever.

use doomscroll_core::SimRng;

/// Block glyphs substituted into decaying content.
const CORRUPTION_CHARS: [char; 8] = ['█', '▓', '▒', '░', '▄', '▀', '■', '□'];

/// Render `content` with per-character corruption proportional to `level`
/// (a `[0, 100]` corruption level).
///
/// Each character is replaced with probability `level / 100 × 0.3`, so
/// even a fully corrupted record keeps fragments of the original text
/// legible through the noise.
#[must_use]
pub fn corrupt_text(content: &str, level: f32, rng: &mut SimRng) -> String {
    let rate = f64::from((level / 100.0).clamp(0.0, 1.0)) * 0.3;
    if rate <= 0.0 {
        return content.to_string();
    }
    content
        .chars()
        .map(|c| {
            if rng.chance(rate) {
                rng.pick(&CORRUPTION_CHARS).copied().unwrap_or('█')
            } else {
                c
            }
        })
        .collect()
}
