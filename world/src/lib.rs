#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative simulation state for Radioactive Froggies.
//!
//! The [`World`] owns the board, the frogs, the powerup inventory and the
//! seeded generator that drives every random decision. It is mutated only by
//! [`apply`] and read only through [`query`].

mod hopping;
mod layout;
mod radiation;
pub mod random;

use froggies_core::{
    CapturedFrog, CellCoord, Command, ConfigError, EngineConfig, Event, FrogKind, FrogMove,
    MegaProbeOutcome, MegaProbeReport, PowerupKind, PowerupOutcome, ProbeOutcome, Rejection, Seed,
    Trend,
};
use log::{debug, info};
use rand::Rng;

use crate::{
    hopping::{hop_pass, HopTrigger},
    random::SeededRandom,
};

const FRESH_SEED_CEILING: i64 = 1_000_000;

/// Draws a seed from ambient entropy for sessions started without one.
#[must_use]
pub fn fresh_seed() -> Seed {
    Seed::new(rand::thread_rng().gen_range(1..FRESH_SEED_CEILING))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Frog {
    cell: CellCoord,
    kind: FrogKind,
}

/// Represents the authoritative Radioactive Froggies session state.
#[derive(Debug)]
pub struct World {
    config: EngineConfig,
    seed: Seed,
    rng: SeededRandom,
    frogs: Vec<Frog>,
    total_frogs: u32,
    probed: Vec<CellCoord>,
    captures: Vec<CapturedFrog>,
    hidden_powerup: Option<CellCoord>,
    powerups: Vec<PowerupKind>,
    moves: u32,
    caught: u32,
    last_radiation: f32,
    previous_radiation: f32,
    game_over: bool,
    game_won: bool,
}

impl World {
    /// Creates a session on the default 10×10 board from the provided seed.
    #[must_use]
    pub fn new(seed: Seed) -> Self {
        Self::build(EngineConfig::default(), seed)
    }

    /// Creates a session using custom tuning, rejecting unplayable configurations.
    pub fn with_config(config: EngineConfig, seed: Seed) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    fn build(config: EngineConfig, seed: Seed) -> Self {
        let mut world = Self {
            rng: SeededRandom::new(seed.get()),
            config,
            seed,
            frogs: Vec::new(),
            total_frogs: 0,
            probed: Vec::new(),
            captures: Vec::new(),
            hidden_powerup: None,
            powerups: Vec::new(),
            moves: 0,
            caught: 0,
            last_radiation: 0.0,
            previous_radiation: 0.0,
            game_over: false,
            game_won: false,
        };
        world.reset_layout();
        world
    }

    fn reset_layout(&mut self) {
        self.rng = SeededRandom::new(self.seed.get());
        let generated = layout::generate(&self.config, &mut self.rng);
        self.total_frogs = u32::try_from(generated.frogs.len()).unwrap_or(u32::MAX);
        self.frogs = generated.frogs;
        self.hidden_powerup = generated.hidden_powerup;
        self.probed.clear();
        self.captures.clear();
        self.powerups = vec![PowerupKind::Radar];
        self.moves = 0;
        self.caught = 0;
        self.last_radiation = 0.0;
        self.previous_radiation = 0.0;
        self.game_over = false;
        self.game_won = false;
        debug!(
            "seed {} placed {} frogs, powerup hidden at {:?}",
            self.seed, self.total_frogs, self.hidden_powerup
        );
    }

    fn admit(&self, cell: CellCoord) -> Result<(), Rejection> {
        if !self.config.contains(cell) {
            return Err(Rejection::OutOfBounds { cell });
        }
        if self.game_over {
            return Err(Rejection::GameOver);
        }
        Ok(())
    }

    fn frog_index(&self, cell: CellCoord) -> Option<usize> {
        self.frogs.iter().position(|frog| frog.cell == cell)
    }

    fn radiation_at(&self, cell: CellCoord) -> f32 {
        radiation::radiation_at(&self.config, &self.frogs, cell)
    }

    fn reveal_powerup(&mut self, cell: CellCoord) -> Option<PowerupKind> {
        if self.hidden_powerup != Some(cell) {
            return None;
        }
        let kind = self
            .rng
            .choice(&PowerupKind::REVEAL_TABLE)
            .copied()
            .unwrap_or(PowerupKind::Radar);
        self.powerups.push(kind);
        self.hidden_powerup = None;
        info!("found hidden {} at {cell}", kind.label());
        Some(kind)
    }

    fn capture_at(&mut self, cell: CellCoord) -> Option<FrogKind> {
        let index = self.frog_index(cell)?;
        let frog = self.frogs.remove(index);
        self.caught += 1;
        self.captures.push(CapturedFrog {
            cell,
            kind: frog.kind,
        });
        Some(frog.kind)
    }

    fn record_reading(&mut self, reading: f32) {
        self.previous_radiation = self.last_radiation;
        self.last_radiation = reading;
    }

    fn check_win(&mut self) {
        if self.caught >= self.total_frogs {
            self.game_won = true;
            self.game_over = true;
        }
    }

    /// Applies win and budget checks after a miss or a mega-probe.
    fn settle(&mut self) {
        self.check_win();
        if !self.game_won && self.moves >= self.config.max_moves {
            self.game_over = true;
        }
    }

    fn game_lost(&self) -> bool {
        self.game_over && !self.game_won
    }

    fn hop(&mut self, trigger: HopTrigger) -> Vec<FrogMove> {
        let relocated = hop_pass(
            &self.config,
            &self.frogs,
            trigger,
            self.hidden_powerup,
            &mut self.rng,
        );
        let moves: Vec<FrogMove> = self
            .frogs
            .iter()
            .zip(&relocated)
            .filter(|(before, after)| before.cell != after.cell)
            .map(|(before, after)| FrogMove {
                from: before.cell,
                to: after.cell,
                kind: after.kind,
            })
            .collect();
        self.frogs = relocated;
        moves
    }

    fn probe(&mut self, cell: CellCoord) -> (ProbeOutcome, Vec<FrogMove>) {
        if let Err(reason) = self.admit(cell) {
            debug!("probe at {cell} rejected: {reason}");
            return (ProbeOutcome::Rejected { reason }, Vec::new());
        }

        let found_powerup = self.reveal_powerup(cell);

        if let Some(kind) = self.capture_at(cell) {
            self.probed.push(cell);
            self.moves += 1;
            self.record_reading(0.0);
            self.check_win();
            info!(
                "caught {} frog at {cell} ({}/{})",
                kind.label(),
                self.caught,
                self.total_frogs
            );
            let outcome = ProbeOutcome::Captured {
                cell,
                kind,
                found_powerup,
                caught: self.caught,
                total: self.total_frogs,
                game_won: self.game_won,
                game_lost: self.game_lost(),
            };
            return (outcome, Vec::new());
        }

        let initial_radiation = self.radiation_at(cell);
        self.probed.push(cell);
        self.moves += 1;
        let hops = self.hop(HopTrigger::Scare(cell));
        let final_radiation = self.radiation_at(cell);
        self.record_reading(final_radiation);
        self.settle();

        let outcome = ProbeOutcome::Missed {
            cell,
            initial_radiation,
            final_radiation,
            found_powerup,
            game_lost: self.game_lost(),
        };
        (outcome, hops)
    }

    fn mega_probe(&mut self, center: CellCoord) -> MegaProbeOutcome {
        if let Err(reason) = self.admit(center) {
            debug!("mega-probe at {center} rejected: {reason}");
            return MegaProbeOutcome::Rejected { reason };
        }

        let found_powerup = self.reveal_powerup(center);

        let mut captured = Vec::new();
        let mut probed = Vec::with_capacity(9);
        for dx in -1..=1 {
            for dy in -1..=1 {
                let cell = center.offset(dx, dy);
                if !self.config.contains(cell) {
                    continue;
                }
                probed.push(cell);
                if let Some(kind) = self.capture_at(cell) {
                    captured.push(CapturedFrog { cell, kind });
                }
            }
        }

        self.probed.extend(probed.iter().copied());
        self.moves += 1;
        self.record_reading(0.0);
        self.settle();
        info!(
            "mega-probe at {center} captured {} frogs ({}/{})",
            captured.len(),
            self.caught,
            self.total_frogs
        );

        MegaProbeOutcome::Resolved(MegaProbeReport {
            center,
            captured,
            probed,
            found_powerup,
            caught: self.caught,
            total: self.total_frogs,
            game_won: self.game_won,
            game_lost: self.game_lost(),
        })
    }

    fn use_powerup(&mut self, kind: PowerupKind) -> PowerupOutcome {
        let Some(index) = self.powerups.iter().position(|held| *held == kind) else {
            debug!("no {} in inventory", kind.label());
            return PowerupOutcome::Rejected {
                reason: Rejection::PowerupUnavailable { kind },
            };
        };
        let _ = self.powerups.remove(index);

        match kind {
            PowerupKind::Radar => PowerupOutcome::Radar {
                frogs: self.frogs.iter().map(|frog| frog.cell).collect(),
            },
            PowerupKind::MegaProbe => PowerupOutcome::MegaProbeArmed,
        }
    }

    fn trend(&self) -> Trend {
        if self.moves < 2 {
            return Trend::Neutral;
        }
        let difference = self.last_radiation - self.previous_radiation;
        if difference > 0.0 {
            Trend::Hotter
        } else if difference < 0.0 {
            Trend::Colder
        } else {
            Trend::Same
        }
    }

    fn normalized_radiation(&self) -> f32 {
        (self.last_radiation / self.config.max_radiation).min(1.0)
    }

    fn debug_assert_invariants(&self) {
        debug_assert_eq!(
            self.frogs.len() + self.caught as usize,
            self.total_frogs as usize,
            "active and captured frogs must account for every placed frog"
        );
        debug_assert!(
            self.frogs.iter().all(|frog| self.config.contains(frog.cell)),
            "frog left the board"
        );
        debug_assert!(
            self.frogs
                .iter()
                .enumerate()
                .all(|(index, frog)| self.frogs[..index].iter().all(|other| other.cell != frog.cell)),
            "two frogs share a cell"
        );
        debug_assert!(
            self.hidden_powerup
                .map_or(true, |cell| self.frog_index(cell).is_none()),
            "hidden powerup shares a cell with a frog"
        );
        debug_assert!(!self.game_won || self.game_over, "win must end the game");
    }

    /// Replaces the frogs with the provided layout for deterministic scenarios.
    ///
    /// The placed frogs become the complete remaining set; a hidden powerup on
    /// one of their cells is discarded.
    #[cfg(any(test, feature = "scaffolding"))]
    pub fn place_frogs(&mut self, frogs: &[(CellCoord, FrogKind)]) {
        self.frogs = frogs
            .iter()
            .map(|(cell, kind)| Frog {
                cell: *cell,
                kind: *kind,
            })
            .collect();
        self.total_frogs = self.caught + u32::try_from(self.frogs.len()).unwrap_or(u32::MAX);
        if let Some(cell) = self.hidden_powerup {
            if self.frog_index(cell).is_some() {
                self.hidden_powerup = None;
            }
        }
        self.debug_assert_invariants();
    }

    /// Moves or removes the hidden powerup for deterministic scenarios.
    #[cfg(any(test, feature = "scaffolding"))]
    pub fn place_hidden_powerup(&mut self, cell: Option<CellCoord>) {
        self.hidden_powerup = cell;
        self.debug_assert_invariants();
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Exactly one outcome event is pushed per probe, mega-probe or powerup
/// command; relocations and terminal transitions follow it.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    let was_over = world.game_over;

    match command {
        Command::Probe { cell } => {
            let (outcome, hops) = world.probe(cell);
            out_events.push(Event::ProbeResolved { outcome });
            if !hops.is_empty() {
                out_events.push(Event::FrogsScattered { moves: hops });
            }
        }
        Command::MegaProbe { cell } => {
            let outcome = world.mega_probe(cell);
            out_events.push(Event::MegaProbeResolved { outcome });
        }
        Command::UsePowerup { kind } => {
            let outcome = world.use_powerup(kind);
            out_events.push(Event::PowerupUsed { outcome });
        }
        Command::ScatterFrogs => {
            let hops = world.hop(HopTrigger::Scatter);
            if !hops.is_empty() {
                out_events.push(Event::FrogsScattered { moves: hops });
            }
        }
        Command::Reset => {
            world.reset_layout();
            out_events.push(Event::GameStarted { seed: world.seed });
        }
        Command::NewGame { seed } => {
            world.seed = seed.unwrap_or_else(fresh_seed);
            world.reset_layout();
            info!("new game with seed {}", world.seed);
            out_events.push(Event::GameStarted { seed: world.seed });
        }
    }

    if !was_over && world.game_over {
        info!(
            "game over after {} moves: {}",
            world.moves,
            if world.game_won { "won" } else { "lost" }
        );
        out_events.push(Event::GameEnded {
            won: world.game_won,
            moves: world.moves,
        });
    }

    world.debug_assert_invariants();
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use froggies_core::{CapturedFrog, CellCoord, EngineConfig, FrogKind, GameSnapshot, Seed};

    use super::World;

    /// Provides read-only access to the tuning the world was built with.
    #[must_use]
    pub fn config(world: &World) -> &EngineConfig {
        &world.config
    }

    /// Seed that produced the current layout.
    #[must_use]
    pub fn seed(world: &World) -> Seed {
        world.seed
    }

    /// Captures a copy of the session counters, meter and inventory.
    #[must_use]
    pub fn snapshot(world: &World) -> GameSnapshot {
        GameSnapshot {
            seed: world.seed,
            moves: world.moves,
            max_moves: world.config.max_moves,
            caught: world.caught,
            total: world.total_frogs,
            radiation: world.last_radiation,
            normalized_radiation: world.normalized_radiation(),
            trend: world.trend(),
            game_over: world.game_over,
            game_won: world.game_won,
            moves_remaining: world.config.max_moves.saturating_sub(world.moves),
            powerups: world.powerups.clone(),
        }
    }

    /// Computes the radiation reading at any cell without mutating the world.
    #[must_use]
    pub fn radiation_at(world: &World, cell: CellCoord) -> f32 {
        world.radiation_at(cell)
    }

    /// Reports whether the cell has been probed at least once.
    #[must_use]
    pub fn is_probed(world: &World, cell: CellCoord) -> bool {
        world.probed.contains(&cell)
    }

    /// Every probed cell in probe order, repeats included.
    #[must_use]
    pub fn probed_cells(world: &World) -> &[CellCoord] {
        &world.probed
    }

    /// Append-only log of captured frogs.
    #[must_use]
    pub fn captures(world: &World) -> &[CapturedFrog] {
        &world.captures
    }

    /// Reports whether a frog was captured at the cell.
    #[must_use]
    pub fn is_captured_at(world: &World, cell: CellCoord) -> bool {
        world.captures.iter().any(|capture| capture.cell == cell)
    }

    /// Captures a read-only view of the active frogs in placement order.
    #[must_use]
    pub fn frogs(world: &World) -> Vec<FrogSnapshot> {
        world
            .frogs
            .iter()
            .map(|frog| FrogSnapshot {
                cell: frog.cell,
                kind: frog.kind,
            })
            .collect()
    }

    /// Location of the outstanding hidden powerup, if any.
    #[must_use]
    pub fn hidden_powerup(world: &World) -> Option<CellCoord> {
        world.hidden_powerup
    }

    /// Immutable representation of a single active frog.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct FrogSnapshot {
        /// Cell currently occupied by the frog.
        pub cell: CellCoord,
        /// Behaviour variant assigned at generation.
        pub kind: FrogKind,
    }
}
