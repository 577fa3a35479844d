//! Error types for the doomscroll core.
//!
//! Nothing in this system is fatal: save rejections are rendered as
//! disabled controls, catalog failures fall back to a built-in record set,
//! and the terminal `ended` state is a designed success path.

use thiserror::Error;

use crate::types::MemoryId;

/// Why a save command was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveError {
    /// The global save budget is spent.
    #[error("no saves remaining")]
    NoSavesRemaining,

    /// The record was already saved; saves are irreversible, not stackable.
    #[error("memory {0} is already saved")]
    AlreadySaved(MemoryId),

    /// The id is unknown, or the record has not been revealed yet.
    #[error("memory {0} is unknown or not yet revealed")]
    NotFound(MemoryId),

    /// The run is over; the vault is sealed.
    #[error("the run has ended")]
    RunEnded,
}

/// Catalog loading failure. Recovered locally by falling back to the
/// built-in record set — never surfaced as a user-facing failure.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("catalog read failed: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file was not valid JSON in the expected shape.
    #[error("catalog parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    /// The source parsed but contained no records.
    #[error("catalog is empty")]
    Empty,
}

/// Configuration loading failure.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("config read failed: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML did not parse into the config shape.
    #[error("invalid config: {0}")]
    Parse(String),
}
