//! Plain-text presentation of the board and the radiation meter.

use std::fmt::Write as _;

use froggies_core::{CellCoord, FrogKind, GameSnapshot, Trend};
use froggies_world::{query, World};

const UNPROBED: char = '.';
const REVEALED_FROG: char = '@';
const METER_WIDTH: usize = 20;

/// Renders the grid, marking radar-revealed frogs with `@`.
///
/// Probed cells show the current reading at that cell, capped at 9; captured
/// cells show the glyph of the frog caught there.
pub(crate) fn render(world: &World, revealed: &[CellCoord]) -> String {
    let size = i32::try_from(query::config(world).grid_size).unwrap_or(i32::MAX);
    let mut out = String::new();

    out.push_str("   ");
    for x in 0..size {
        let _ = write!(out, "{:>2}", x % 10);
    }
    out.push('\n');

    for y in 0..size {
        let _ = write!(out, "{y:>2} ");
        for x in 0..size {
            let cell = CellCoord::new(x, y);
            let _ = write!(out, " {}", cell_glyph(world, cell, revealed));
        }
        out.push('\n');
    }

    out
}

fn cell_glyph(world: &World, cell: CellCoord, revealed: &[CellCoord]) -> char {
    if revealed.contains(&cell) {
        return REVEALED_FROG;
    }
    if let Some(capture) = query::captures(world)
        .iter()
        .rev()
        .find(|capture| capture.cell == cell)
    {
        return kind_glyph(capture.kind);
    }
    if query::is_probed(world, cell) {
        let reading = query::radiation_at(world, cell).round().clamp(0.0, 9.0) as u32;
        return char::from_digit(reading, 10).unwrap_or('9');
    }
    UNPROBED
}

/// Single-character marker for a captured frog of the provided kind.
pub(crate) const fn kind_glyph(kind: FrogKind) -> char {
    match kind {
        FrogKind::Normal => 'N',
        FrogKind::Toxic => 'T',
        FrogKind::Jumpy => 'J',
        FrogKind::Ninja => 'X',
    }
}

/// Summarises the meter, counters and inventory on one line each.
pub(crate) fn status_lines(snapshot: &GameSnapshot) -> String {
    let filled = (snapshot.normalized_radiation * METER_WIDTH as f32).round() as usize;
    let filled = filled.min(METER_WIDTH);
    let reading = if snapshot.radiation == 0.0 {
        "NO SIGNAL".to_owned()
    } else {
        format!("{} RAD", snapshot.radiation.round())
    };
    let trend = match snapshot.trend {
        Trend::Neutral => "",
        Trend::Hotter => " HOTTER",
        Trend::Colder => " COLDER",
        Trend::Same => " SAME",
    };
    let powerups = if snapshot.powerups.is_empty() {
        "none".to_owned()
    } else {
        snapshot
            .powerups
            .iter()
            .map(|kind| kind.label())
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "[{}{}] {reading}{trend}\nseed {}  moves {}/{} ({} left)  caught {}/{}  powerups: {powerups}",
        "#".repeat(filled),
        " ".repeat(METER_WIDTH - filled),
        snapshot.seed,
        snapshot.moves,
        snapshot.max_moves,
        snapshot.moves_remaining,
        snapshot.caught,
        snapshot.total,
    )
}

/// Headline describing the session state.
pub(crate) fn status_message(snapshot: &GameSnapshot) -> &'static str {
    if snapshot.game_won {
        "All frogs captured! Mission complete!"
    } else if snapshot.game_over {
        "Time expired! The frogs have dried up from radiation."
    } else if snapshot.radiation == 0.0 && snapshot.moves > 0 {
        "No radiation detected. Keep searching..."
    } else if snapshot.radiation > 0.0 {
        let intensity = snapshot.normalized_radiation;
        if intensity > 0.75 {
            "EXTREME RADIATION! A frog is very close!"
        } else if intensity > 0.5 {
            "High radiation detected. Getting warm..."
        } else if intensity > 0.25 {
            "Moderate radiation. You're on the right track."
        } else {
            "Low radiation detected. Keep searching."
        }
    } else {
        "Probe the forest to detect radioactive frogs. They hop when scared!"
    }
}
