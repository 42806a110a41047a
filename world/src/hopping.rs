//! Evasion passes that relocate frogs after a missed probe or a radar ping.
//!
//! Every destination in a pass is chosen against the pre-pass positions and
//! the destinations already committed earlier in the same pass; the new list
//! replaces the old one atomically, so no frog can chain off another's hop.

use froggies_core::{CellCoord, EngineConfig};

use crate::{random::SeededRandom, Frog};

/// What triggered a hopping pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HopTrigger {
    /// A missed probe scares frogs within the scare radius, excluding the probed cell itself.
    Scare(CellCoord),
    /// Every frog hops with no scare origin.
    Scatter,
}

impl HopTrigger {
    fn scares(self, config: &EngineConfig, frog: &Frog) -> bool {
        match self {
            HopTrigger::Scare(origin) => {
                let distance = origin.manhattan_distance(frog.cell);
                distance > 0 && distance <= config.scare_radius
            }
            HopTrigger::Scatter => true,
        }
    }

    fn forbids(self, cell: CellCoord) -> bool {
        matches!(self, HopTrigger::Scare(origin) if origin == cell)
    }
}

/// Computes the post-pass frog list, preserving frog order and kinds.
///
/// `reserved` marks a cell no frog may land on (the outstanding hidden powerup).
pub(crate) fn hop_pass(
    config: &EngineConfig,
    frogs: &[Frog],
    trigger: HopTrigger,
    reserved: Option<CellCoord>,
    rng: &mut SeededRandom,
) -> Vec<Frog> {
    let mut relocated: Vec<Frog> = Vec::with_capacity(frogs.len());

    for (index, frog) in frogs.iter().enumerate() {
        if !trigger.scares(config, frog) {
            relocated.push(*frog);
            continue;
        }

        let hop = i64::from(frog.kind.hop_distance());
        let mut destination = frog.cell;
        for _ in 0..config.max_hop_attempts {
            let candidate = sample_offset(frog.cell, hop, rng);
            let accepted = config.contains(candidate)
                && !trigger.forbids(candidate)
                && reserved != Some(candidate)
                && relocated.iter().all(|placed| placed.cell != candidate)
                && frogs
                    .iter()
                    .enumerate()
                    .all(|(other, original)| other == index || original.cell != candidate);
            if accepted {
                destination = candidate;
                break;
            }
        }

        relocated.push(Frog {
            cell: destination,
            kind: frog.kind,
        });
    }

    relocated
}

/// Samples a point on the diamond of Manhattan radius `hop` around `from`.
///
/// Draws `dx` in `[-hop, hop]`, sets `|dy| = hop - |dx|`, then draws the sign of `dy`;
/// the sign is drawn even when `dy` is zero.
fn sample_offset(from: CellCoord, hop: i64, rng: &mut SeededRandom) -> CellCoord {
    let dx = rng.next_int(-hop, hop);
    let dy = hop - dx.abs();
    let sign = if rng.next_int(0, 1) == 0 { -1 } else { 1 };
    from.offset(dx as i32, (dy * sign) as i32)
}

#[cfg(test)]
mod tests {
    use super::{hop_pass, sample_offset, HopTrigger};
    use crate::{random::SeededRandom, Frog};
    use froggies_core::{CellCoord, EngineConfig, FrogKind};

    fn frog(x: i32, y: i32, kind: FrogKind) -> Frog {
        Frog {
            cell: CellCoord::new(x, y),
            kind,
        }
    }

    #[test]
    fn sampled_offsets_lie_on_the_diamond_perimeter() {
        let mut rng = SeededRandom::new(31);
        let origin = CellCoord::new(5, 5);
        for hop in 1..=3 {
            for _ in 0..200 {
                let sample = sample_offset(origin, hop, &mut rng);
                assert_eq!(i64::from(origin.manhattan_distance(sample)), hop);
            }
        }
    }

    #[test]
    fn scared_frog_hops_exactly_its_kind_distance() {
        let config = EngineConfig::default();
        for (seed, kind) in (1..40).zip(FrogKind::ALL.iter().cycle()) {
            let frogs = [frog(5, 5, *kind)];
            let mut rng = SeededRandom::new(seed);
            let moved = hop_pass(
                &config,
                &frogs,
                HopTrigger::Scare(CellCoord::new(5, 6)),
                None,
                &mut rng,
            );
            let distance = moved[0].cell.manhattan_distance(frogs[0].cell);
            assert!(
                distance == kind.hop_distance() || distance == 0,
                "seed {seed}: {kind:?} moved {distance}"
            );
            assert_ne!(moved[0].cell, CellCoord::new(5, 6));
            assert_eq!(moved[0].kind, *kind);
        }
    }

    #[test]
    fn frogs_outside_scare_radius_and_on_origin_stay_put() {
        let config = EngineConfig::default();
        let frogs = [frog(3, 3, FrogKind::Normal), frog(0, 0, FrogKind::Normal)];
        let mut rng = SeededRandom::new(5);
        let moved = hop_pass(
            &config,
            &frogs,
            HopTrigger::Scare(CellCoord::new(3, 3)),
            None,
            &mut rng,
        );
        assert_eq!(moved, frogs.to_vec());
        assert_eq!(rng, SeededRandom::new(5), "unscared frogs must not draw");
    }

    #[test]
    fn cornered_frog_stays_when_every_candidate_is_blocked() {
        let config = EngineConfig::default();
        // Frog in the corner: its only neighbours are the probe and another frog.
        let frogs = [frog(0, 0, FrogKind::Normal), frog(1, 0, FrogKind::Normal)];
        let mut rng = SeededRandom::new(77);
        let moved = hop_pass(
            &config,
            &frogs,
            HopTrigger::Scare(CellCoord::new(0, 1)),
            None,
            &mut rng,
        );
        assert_eq!(moved[0].cell, CellCoord::new(0, 0));
        assert!(config.contains(moved[1].cell));
        assert_ne!(moved[1].cell, moved[0].cell);
    }

    #[test]
    fn frogs_never_land_on_reserved_or_shared_cells() {
        let config = EngineConfig::default();
        let reserved = CellCoord::new(4, 4);
        for seed in 1..100 {
            let frogs = [
                frog(4, 5, FrogKind::Normal),
                frog(5, 4, FrogKind::Jumpy),
                frog(3, 4, FrogKind::Toxic),
                frog(4, 3, FrogKind::Ninja),
            ];
            let mut rng = SeededRandom::new(seed);
            let moved = hop_pass(&config, &frogs, HopTrigger::Scatter, Some(reserved), &mut rng);

            let mut cells: Vec<CellCoord> = moved.iter().map(|frog| frog.cell).collect();
            assert!(!cells.contains(&reserved), "seed {seed}");
            assert!(cells.iter().all(|cell| config.contains(*cell)));
            cells.sort();
            cells.dedup();
            assert_eq!(cells.len(), frogs.len(), "seed {seed} stacked frogs");
        }
    }
}
