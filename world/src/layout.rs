//! Deterministic layout generation.
//!
//! Call order on the stream is part of the contract: one full shuffle of the
//! board, one `next` per placed frog in shuffle order, then one full shuffle
//! of the remaining free cells for the hidden powerup.

use froggies_core::{CellCoord, EngineConfig, FrogKind};

use crate::{random::SeededRandom, Frog};

#[derive(Debug)]
pub(crate) struct Layout {
    pub(crate) frogs: Vec<Frog>,
    pub(crate) hidden_powerup: Option<CellCoord>,
}

pub(crate) fn generate(config: &EngineConfig, rng: &mut SeededRandom) -> Layout {
    let cells = board_cells(config.grid_size);
    let frog_count = usize::try_from(config.frog_count).unwrap_or(usize::MAX);

    let frogs: Vec<Frog> = rng
        .shuffle(&cells)
        .into_iter()
        .take(frog_count)
        .map(|cell| Frog {
            cell,
            kind: FrogKind::from_roll(rng.next()),
        })
        .collect();

    let free_cells: Vec<CellCoord> = cells
        .into_iter()
        .filter(|cell| frogs.iter().all(|frog| frog.cell != *cell))
        .collect();
    let hidden_powerup = rng.shuffle(&free_cells).first().copied();

    Layout {
        frogs,
        hidden_powerup,
    }
}

/// Enumerates every cell column-major: x outer, y inner.
fn board_cells(grid_size: u32) -> Vec<CellCoord> {
    let size = i32::try_from(grid_size).unwrap_or(i32::MAX);
    let capacity = usize::try_from(u64::from(grid_size) * u64::from(grid_size)).unwrap_or(0);
    let mut cells = Vec::with_capacity(capacity);
    for x in 0..size {
        for y in 0..size {
            cells.push(CellCoord::new(x, y));
        }
    }
    cells
}
