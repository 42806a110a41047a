use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use froggies_core::{CellCoord, Command, Event, PowerupKind, ProbeOutcome, Seed};
use froggies_world::{self as world, query, World};

#[test]
fn identical_seed_and_script_replay_bit_for_bit() {
    let script = probe_sweep();
    let first = replay(Seed::new(12345), &script);
    let second = replay(Seed::new(12345), &script);

    assert_eq!(first, second, "replay diverged");
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert!(!first.outcomes.is_empty());
}

#[test]
fn different_seeds_produce_different_sessions() {
    let script = probe_sweep();
    let first = replay(Seed::new(12345), &script);
    let second = replay(Seed::new(54321), &script);

    assert_ne!(first.fingerprint(), second.fingerprint());
}

#[test]
fn reset_replays_the_same_session() {
    let mut script = probe_sweep();
    script.truncate(12);
    script.push(Command::Reset);
    script.extend(probe_sweep().into_iter().take(12));

    let outcome = replay(Seed::new(2024), &script);
    let reset_at = outcome
        .outcomes
        .iter()
        .position(|line| line.starts_with("started"))
        .expect("reset emits a start event");

    let before: Vec<&String> = outcome.outcomes[..reset_at].iter().collect();
    let after: Vec<&String> = outcome.outcomes[reset_at + 1..]
        .iter()
        .take(before.len())
        .collect();
    assert!(!before.is_empty());
    assert_eq!(before, after);
}

fn replay(seed: Seed, script: &[Command]) -> ReplayOutcome {
    let mut world = World::new(seed);
    let mut outcomes = Vec::new();

    for command in script {
        let mut events = Vec::new();
        world::apply(&mut world, *command, &mut events);
        outcomes.extend(events.iter().map(describe));
    }

    let snapshot = query::snapshot(&world);
    ReplayOutcome {
        outcomes,
        frogs: query::frogs(&world)
            .into_iter()
            .map(|frog| (frog.cell, frog.kind.label()))
            .collect(),
        moves: snapshot.moves,
        caught: snapshot.caught,
        radiation_bits: snapshot.radiation.to_bits(),
    }
}

fn describe(event: &Event) -> String {
    match event {
        Event::ProbeResolved { outcome } => match outcome {
            ProbeOutcome::Missed {
                cell,
                initial_radiation,
                final_radiation,
                ..
            } => format!(
                "miss {cell} {:#x} {:#x}",
                initial_radiation.to_bits(),
                final_radiation.to_bits()
            ),
            other => format!("{other:?}"),
        },
        Event::GameStarted { seed } => format!("started {seed}"),
        other => format!("{other:?}"),
    }
}

fn probe_sweep() -> Vec<Command> {
    let mut script = vec![Command::UsePowerup {
        kind: PowerupKind::Radar,
    }];
    script.push(Command::ScatterFrogs);
    for step in 0..40 {
        let x = (step * 3) % 10;
        let y = (step * 7) % 10;
        script.push(Command::Probe {
            cell: CellCoord::new(x, y),
        });
    }
    script
}

#[derive(Debug, PartialEq, Eq)]
struct ReplayOutcome {
    outcomes: Vec<String>,
    frogs: Vec<(CellCoord, &'static str)>,
    moves: u32,
    caught: u32,
    radiation_bits: u32,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.outcomes.hash(&mut hasher);
        self.frogs.hash(&mut hasher);
        self.moves.hash(&mut hasher);
        self.caught.hash(&mut hasher);
        self.radiation_bits.hash(&mut hasher);
        hasher.finish()
    }
}
