//! Error types.
//!
//! Two families: recoverable parse/validation failures (`GridError`,
//! `SnapshotError`) that the caller reports and retries, and fatal engine
//! conditions (`RobotError`) that abort a simulation run. Search misses are
//! never errors; the engine's BFS helpers return `Option` and the decision
//! cascade falls through to its next strategy.

use thiserror::Error;

/// Map construction and parse errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("map text is empty")]
    EmptyMap,

    #[error("map is not rectangular: row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("invalid map character '{ch}' in row {row}")]
    InvalidChar { ch: char, row: usize },

    #[error("unvisited tile marker '?' in row {row} is not allowed here")]
    UnvisitedNotAllowed { row: usize },

    #[error("map must contain exactly one charger, found {count}")]
    ChargerCount { count: usize },

    #[error("tile index {index} out of bounds for grid of {size} cells")]
    OutOfBounds { index: usize, size: usize },
}

/// Fatal robot engine conditions.
///
/// These indicate a corrupted memory state or an impossible order; the
/// current tick is aborted and the caller decides whether to halt the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RobotError {
    #[error("robot is on an invalid tile (index {index})")]
    InvalidTile { index: usize },

    #[error("robot cannot reach tile {index}")]
    UnreachableTile { index: usize },

    #[error("robot cannot return to charger")]
    ChargerUnreachable,
}

/// Robot snapshot deserialization errors.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("snapshot ended before field '{field}'")]
    Truncated { field: &'static str },

    #[error("snapshot field '{field}' is not a number: '{value}'")]
    BadNumber { field: &'static str, value: String },

    #[error("snapshot position {position} out of range for grid of {size} cells")]
    PositionOutOfRange { position: usize, size: usize },

    #[error("snapshot charger index {charger} out of range for grid of {size} cells")]
    ChargerOutOfRange { charger: usize, size: usize },

    #[error("snapshot mode value {value} is not a valid mode")]
    BadMode { value: u32 },

    #[error("snapshot has {found} revisit flags, expected {expected}")]
    FlagCountMismatch { found: usize, expected: usize },

    #[error("snapshot path index {index} out of range for grid of {size} cells")]
    PathIndexOutOfRange { index: usize, size: usize },
}

/// Simulation shell errors.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Robot(#[from] RobotError),

    #[error("tile {index} is not a floor tile")]
    NotAFloor { index: usize },

    #[error("robot and map disagree: {reason}")]
    Inconsistent { reason: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for SimError {
    fn from(e: toml::de::Error) -> Self {
        SimError::Config(e.to_string())
    }
}
