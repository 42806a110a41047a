use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::CellCoord;

/// Largest board edge an engine will build.
pub const MAX_GRID_SIZE: u32 = 1024;

/// Tunable constants governing board size, budgets and the radiation field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of cells along each edge of the square board.
    pub grid_size: u32,
    /// Number of frogs placed when a layout is generated.
    pub frog_count: u32,
    /// Moves available before the session is lost.
    pub max_moves: u32,
    /// Manhattan radius within which a frog contributes radiation.
    pub radiation_range: u32,
    /// Manhattan radius within which a missed probe scares frogs into hopping.
    pub scare_radius: u32,
    /// Reading at which the normalized meter saturates; near three ordinary frogs.
    pub max_radiation: f32,
    /// Candidate offsets sampled per frog before it gives up and stays put.
    pub max_hop_attempts: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: 10,
            frog_count: 5,
            max_moves: 50,
            radiation_range: 5,
            scare_radius: 2,
            max_radiation: 18.0,
            max_hop_attempts: 20,
        }
    }
}

impl EngineConfig {
    /// Checks that the configuration describes a playable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge {
                grid_size: self.grid_size,
                limit: MAX_GRID_SIZE,
            });
        }
        let reach = self.grid_size * 2;
        if self.radiation_range > reach {
            return Err(ConfigError::RadiationRangeTooLarge {
                radiation_range: self.radiation_range,
                limit: reach,
            });
        }
        if self.scare_radius > reach {
            return Err(ConfigError::ScareRadiusTooLarge {
                scare_radius: self.scare_radius,
                limit: reach,
            });
        }
        if self.frog_count == 0 {
            return Err(ConfigError::NoFrogs);
        }
        if u64::from(self.frog_count) >= self.cell_count() {
            return Err(ConfigError::TooManyFrogs {
                frog_count: self.frog_count,
                cells: self.cell_count(),
            });
        }
        if self.max_moves == 0 {
            return Err(ConfigError::NoMoves);
        }
        if self.max_radiation.is_nan() || self.max_radiation <= 0.0 {
            return Err(ConfigError::RadiationCeiling {
                max_radiation: self.max_radiation,
            });
        }
        if self.max_hop_attempts == 0 {
            return Err(ConfigError::NoHopAttempts);
        }
        Ok(())
    }

    /// Total number of cells on the board.
    #[must_use]
    pub fn cell_count(&self) -> u64 {
        u64::from(self.grid_size) * u64::from(self.grid_size)
    }

    /// Reports whether the cell lies on the board.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        let within = |value: i32| u32::try_from(value).map_or(false, |value| value < self.grid_size);
        within(cell.x()) && within(cell.y())
    }
}

/// Reasons an [`EngineConfig`] cannot describe a playable board.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The board has no cells.
    #[error("grid size must be at least 1")]
    EmptyGrid,
    /// The board edge exceeds [`MAX_GRID_SIZE`].
    #[error("grid size {grid_size} exceeds the limit of {limit}")]
    GridTooLarge {
        /// Requested edge length.
        grid_size: u32,
        /// Largest accepted edge length.
        limit: u32,
    },
    /// Radiation would reach further than any two cells on the board are apart.
    #[error("radiation range {radiation_range} exceeds twice the grid size ({limit})")]
    RadiationRangeTooLarge {
        /// Requested range.
        radiation_range: u32,
        /// Largest accepted range for this board.
        limit: u32,
    },
    /// Probes would scare frogs further away than the board spans.
    #[error("scare radius {scare_radius} exceeds twice the grid size ({limit})")]
    ScareRadiusTooLarge {
        /// Requested radius.
        scare_radius: u32,
        /// Largest accepted radius for this board.
        limit: u32,
    },
    /// No frogs would be placed.
    #[error("frog count must be at least 1")]
    NoFrogs,
    /// Frogs would leave no free cell for the hidden powerup.
    #[error("{frog_count} frogs do not fit on a board of {cells} cells with room for a powerup")]
    TooManyFrogs {
        /// Requested number of frogs.
        frog_count: u32,
        /// Cells available on the board.
        cells: u64,
    },
    /// The session would end before the first move.
    #[error("move budget must be at least 1")]
    NoMoves,
    /// The meter ceiling cannot normalize readings.
    #[error("radiation ceiling must be positive, got {max_radiation}")]
    RadiationCeiling {
        /// Requested ceiling.
        max_radiation: f32,
    },
    /// Scared frogs would never move.
    #[error("hop attempts must be at least 1")]
    NoHopAttempts,
}
