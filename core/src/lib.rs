#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Radioactive Froggies engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values carrying tagged
//! outcomes. Systems consume event streams and immutable snapshots only; they
//! never reach into the world directly.

mod config;
mod outcome;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use config::{ConfigError, EngineConfig, MAX_GRID_SIZE};
pub use outcome::{MegaProbeOutcome, MegaProbeReport, PowerupOutcome, ProbeOutcome, Rejection};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str =
    "Welcome to Radioactive Froggies. Probe the forest and catch every frog before your moves run out.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Probes a single cell, capturing a frog there or scaring nearby frogs away.
    Probe {
        /// Cell targeted by the probe.
        cell: CellCoord,
    },
    /// Resolves the 3×3 block centred on the provided cell in a single move.
    MegaProbe {
        /// Centre of the block resolved by the mega-probe.
        cell: CellCoord,
    },
    /// Consumes one powerup of the provided kind from the inventory.
    UsePowerup {
        /// Kind of powerup to consume.
        kind: PowerupKind,
    },
    /// Makes every active frog hop once without a scare origin.
    ScatterFrogs,
    /// Rebuilds the session from its current seed, reproducing the original layout.
    Reset,
    /// Starts a new session, drawing a fresh seed when none is provided.
    NewGame {
        /// Seed for the new session; `None` requests a freshly generated seed.
        seed: Option<Seed>,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Reports the resolution of a single-cell probe.
    ProbeResolved {
        /// Tagged result of the probe.
        outcome: ProbeOutcome,
    },
    /// Reports the resolution of a mega-probe.
    MegaProbeResolved {
        /// Tagged result of the mega-probe.
        outcome: MegaProbeOutcome,
    },
    /// Reports the result of a powerup activation.
    PowerupUsed {
        /// Tagged result of the activation.
        outcome: PowerupOutcome,
    },
    /// Announces that one or more frogs relocated during a hopping pass.
    FrogsScattered {
        /// Relocations committed by the pass, in frog order.
        moves: Vec<FrogMove>,
    },
    /// Announces that a fresh layout was generated from the provided seed.
    GameStarted {
        /// Seed that produced the layout.
        seed: Seed,
    },
    /// Announces that the session reached a terminal state.
    GameEnded {
        /// Whether every frog was captured.
        won: bool,
        /// Moves consumed when the session ended.
        moves: u32,
    },
}

/// Location of a single board cell expressed as x and y coordinates.
///
/// Coordinates are signed so that off-board requests can be represented and
/// rejected by the world rather than by the type system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    x: i32,
    y: i32,
}

impl CellCoord {
    /// Creates a new board cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Returns the cell displaced by the provided offsets.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Integer that fully determines a session's random stream and therefore its layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed(i64);

impl Seed {
    /// Wraps the provided integer as a seed.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Retrieves the integer representation of the seed.
    #[must_use]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06}", self.0)
    }
}

/// Behaviour variant assigned to a frog when the layout is generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrogKind {
    /// Ordinary frog with unit radiation and single-cell hops.
    Normal,
    /// Emits twice the ordinary radiation.
    Toxic,
    /// Hops two cells when scared.
    Jumpy,
    /// Emits half the ordinary radiation.
    Ninja,
}

impl FrogKind {
    /// Every frog kind in declaration order.
    pub const ALL: [FrogKind; 4] = [
        FrogKind::Normal,
        FrogKind::Toxic,
        FrogKind::Jumpy,
        FrogKind::Ninja,
    ];

    /// Maps a uniform roll in `[0, 1)` onto the kind distribution
    /// (40% normal, 30% toxic, 20% jumpy, 10% ninja).
    #[must_use]
    pub fn from_roll(roll: f64) -> Self {
        if roll < 0.4 {
            FrogKind::Normal
        } else if roll < 0.7 {
            FrogKind::Toxic
        } else if roll < 0.9 {
            FrogKind::Jumpy
        } else {
            FrogKind::Ninja
        }
    }

    /// Multiplier applied to the frog's radiation contribution.
    #[must_use]
    pub const fn radiation_multiplier(self) -> f32 {
        match self {
            FrogKind::Toxic => 2.0,
            FrogKind::Ninja => 0.5,
            FrogKind::Normal | FrogKind::Jumpy => 1.0,
        }
    }

    /// Manhattan length of every hop the frog performs.
    #[must_use]
    pub const fn hop_distance(self) -> u32 {
        match self {
            FrogKind::Jumpy => 2,
            FrogKind::Normal | FrogKind::Toxic | FrogKind::Ninja => 1,
        }
    }

    /// Lowercase label used in messages and logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            FrogKind::Normal => "normal",
            FrogKind::Toxic => "toxic",
            FrogKind::Jumpy => "jumpy",
            FrogKind::Ninja => "ninja",
        }
    }
}

/// Consumable inventory item granting a special action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerupKind {
    /// Reveals the current position of every active frog.
    Radar,
    /// Arms a 3×3 area probe.
    MegaProbe,
}

impl PowerupKind {
    /// Candidate kinds a hidden powerup may resolve into, in draw order.
    pub const REVEAL_TABLE: [PowerupKind; 2] = [PowerupKind::Radar, PowerupKind::MegaProbe];

    /// Lowercase label used in messages and logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            PowerupKind::Radar => "radar",
            PowerupKind::MegaProbe => "mega-probe",
        }
    }
}

/// Direction of the latest radiation reading relative to the one before it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trend {
    /// Fewer than two moves have been made.
    Neutral,
    /// The latest reading is higher than the previous one.
    Hotter,
    /// The latest reading is lower than the previous one.
    Colder,
    /// The latest reading equals the previous one.
    Same,
}

/// Entry of the append-only capture log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapturedFrog {
    /// Cell where the frog was captured.
    pub cell: CellCoord,
    /// Behaviour variant of the captured frog.
    pub kind: FrogKind,
}

/// Relocation of a single frog committed by a hopping pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrogMove {
    /// Cell the frog occupied before the pass.
    pub from: CellCoord,
    /// Cell the frog occupies after the pass.
    pub to: CellCoord,
    /// Behaviour variant of the frog that moved.
    pub kind: FrogKind,
}

/// Read-only projection of the session state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Seed that produced the current layout.
    pub seed: Seed,
    /// Moves consumed so far.
    pub moves: u32,
    /// Move budget of the session.
    pub max_moves: u32,
    /// Frogs captured so far.
    pub caught: u32,
    /// Frogs placed when the layout was generated.
    pub total: u32,
    /// Latest radiation reading.
    pub radiation: f32,
    /// Latest reading scaled into `0.0..=1.0` for meters.
    pub normalized_radiation: f32,
    /// Direction of the latest reading relative to the previous one.
    pub trend: Trend,
    /// Whether the session reached a terminal state.
    pub game_over: bool,
    /// Whether every frog was captured.
    pub game_won: bool,
    /// Moves left before the budget is exhausted.
    pub moves_remaining: u32,
    /// Powerup inventory in acquisition order.
    pub powerups: Vec<PowerupKind>,
}

impl GameSnapshot {
    /// Reports whether any powerup is held.
    #[must_use]
    pub fn has_powerup(&self) -> bool {
        !self.powerups.is_empty()
    }

    /// Counts held powerups of the provided kind.
    #[must_use]
    pub fn powerup_count(&self, kind: PowerupKind) -> usize {
        self.powerups.iter().filter(|held| **held == kind).count()
    }
}
