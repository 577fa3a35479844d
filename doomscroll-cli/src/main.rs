//! Headless driver for the doomscroll simulation.
//!
//! Drives a seeded [`Session`] with a scripted reader — steady scrolling,
//! the occasional doomscroll burst, saves spent on whatever looks worth
//! keeping — and renders the run through the view crate. `run` finishes
//! instantly on the simulated clock; `watch` paces it against wall time.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use doomscroll_core::catalog;
use doomscroll_core::input::ViewportMetrics;
use doomscroll_core::{DoomscrollConfig, MemoryId, RenderEvent, Session};
use doomscroll_view::display;
use doomscroll_view::FeedView;

const CARD_HEIGHT_PX: f32 = 600.0;
const VIEWPORT_HEIGHT_PX: f32 = 900.0;

fn print_usage() {
    println!("doomscroll <command>");
    println!("commands:");
    println!("  run [catalog.json] [seed]");
    println!("    simulate a full run instantly and print the tally");
    println!("  watch [catalog.json] [seed]");
    println!("    same, paced at one simulated second per wall-clock second");
    println!("    default seed: 42; without a catalog the built-in record is used");
}

fn parse_seed(value: Option<&String>) -> Result<u64, String> {
    match value {
        None => Ok(42),
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| format!("invalid seed: {raw}")),
    }
}

fn load_records(path: Option<&String>) -> Vec<doomscroll_core::MemoryRecord> {
    match path {
        Some(p) => catalog::load_catalog(Path::new(p)),
        None => {
            let default = PathBuf::from("memories.json");
            catalog::load_catalog(&default)
        }
    }
}

/// The scripted reader: one simulated second of behavior.
struct Reader {
    scroll_y: f32,
}

impl Reader {
    fn new() -> Self {
        Self { scroll_y: 0.0 }
    }

    fn step(&mut self, session: &mut Session) {
        let elapsed_secs = session.now_ms() / 1_000;
        let content_height = session.store().revealed_count() as f32 * CARD_HEIGHT_PX;

        // Steady reading pace, with a doomscroll burst every seventh second.
        let delta = if elapsed_secs % 7 == 0 { 160.0 } else { 40.0 };
        self.scroll_y = (self.scroll_y + delta).min(content_height);

        let outcome = session.handle_scroll(ViewportMetrics {
            scroll_y: self.scroll_y,
            viewport_height: VIEWPORT_HEIGHT_PX,
            content_height,
        });
        if let Some(corrected) = outcome.corrected_to {
            self.scroll_y = corrected;
        }

        // Report what is on screen.
        let first = (self.scroll_y / CARD_HEIGHT_PX).floor() as usize;
        let last = ((self.scroll_y + VIEWPORT_HEIGHT_PX) / CARD_HEIGHT_PX).ceil() as usize;
        let visible: Vec<MemoryId> = session
            .store()
            .loaded()
            .iter()
            .skip(first)
            .take(last.saturating_sub(first))
            .map(|r| r.id)
            .collect();
        session.observe_visible(&visible);

        // Every forty seconds, rescue the most corrupted visible record.
        if elapsed_secs % 40 == 0 && session.state().saves_remaining > 0 {
            let candidate = session
                .store()
                .loaded()
                .iter()
                .filter(|r| !r.saved && visible.contains(&r.id))
                .max_by(|a, b| {
                    a.corruption_level
                        .partial_cmp(&b.corruption_level)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .map(|r| r.id);
            if let Some(id) = candidate {
                if session.request_save(id).is_ok() {
                    info!(%id, "reader saved a memory");
                }
            }
        }
    }
}

fn consume_events(session: &mut Session, view: &mut FeedView) {
    let now = session.now_ms();
    for event in session.drain_events() {
        match &event {
            RenderEvent::ThresholdWarning { title, message } => {
                println!("*** {title} — {message}");
            }
            RenderEvent::GhostActivity {
                username, action, ..
            } => {
                info!("{}", display::ghost_message(username, *action));
            }
            RenderEvent::RunEnded { .. } => {
                println!("--- connection lost ---");
            }
            _ => {}
        }
        view.apply(now, &event);
    }
    view.expire(now);
}

fn print_hud(session: &Session) {
    let state = session.state();
    println!(
        "t={} integrity={} saves={} loaded={}",
        display::format_countdown(state.time_remaining),
        display::format_integrity(state.integrity),
        state.saves_remaining,
        session.store().revealed_count(),
    );
}

fn print_tally(session: &Session, view: &FeedView) {
    if let Some(summary) = view.end_summary() {
        println!("{summary}");
    }
    println!("vault:");
    for line in view.vault_lines() {
        println!("  {line}");
    }
}

fn load_config() -> DoomscrollConfig {
    let path = Path::new("doomscroll.toml");
    if !path.exists() {
        return DoomscrollConfig::default();
    }
    match DoomscrollConfig::from_file(path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("warning: {err}; using defaults");
            DoomscrollConfig::default()
        }
    }
}

async fn drive(catalog_path: Option<&String>, seed: u64, paced: bool) -> Result<()> {
    let records = load_records(catalog_path);
    let mut session = Session::new(records, load_config(), seed);
    let mut view = FeedView::new();
    let mut reader = Reader::new();

    consume_events(&mut session, &mut view);
    print_hud(&session);

    while !session.finished() {
        session.advance_by(1_000);
        reader.step(&mut session);
        consume_events(&mut session, &mut view);

        let elapsed_secs = session.now_ms() / 1_000;
        if elapsed_secs % 30 == 0 {
            print_hud(&session);
        }
        if paced {
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
    }

    consume_events(&mut session, &mut view);
    print_tally(&session, &view);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str);

    match command {
        Some("run") | Some("watch") => {
            let seed = match parse_seed(args.get(3)) {
                Ok(seed) => seed,
                Err(err) => {
                    eprintln!("error: {err}");
                    print_usage();
                    std::process::exit(2);
                }
            };
            drive(args.get(2), seed, command == Some("watch")).await
        }
        _ => {
            print_usage();
            Ok(())
        }
    }
}
