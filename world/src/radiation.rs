use froggies_core::{CellCoord, EngineConfig};

use crate::Frog;

/// Sums the decaying contribution of every frog within range of `cell`.
///
/// A frog at distance `d <= range` contributes `(range + 1 - d)` scaled by its
/// kind multiplier; contributions add linearly without clamping.
pub(crate) fn radiation_at(config: &EngineConfig, frogs: &[Frog], cell: CellCoord) -> f32 {
    let range = config.radiation_range;
    frogs
        .iter()
        .filter_map(|frog| {
            let distance = cell.manhattan_distance(frog.cell);
            (distance <= range)
                .then(|| ((range - distance) as f32 + 1.0) * frog.kind.radiation_multiplier())
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::radiation_at;
    use crate::Frog;
    use froggies_core::{CellCoord, EngineConfig, FrogKind};

    fn frog(x: i32, y: i32, kind: FrogKind) -> Frog {
        Frog {
            cell: CellCoord::new(x, y),
            kind,
        }
    }

    #[test]
    fn reading_peaks_on_the_frog_and_decays_with_distance() {
        let config = EngineConfig::default();
        let frogs = [frog(5, 5, FrogKind::Normal)];

        let at_frog = radiation_at(&config, &frogs, CellCoord::new(5, 5));
        let adjacent = radiation_at(&config, &frogs, CellCoord::new(5, 6));
        let two_away = radiation_at(&config, &frogs, CellCoord::new(5, 7));

        assert_eq!(at_frog, (config.radiation_range + 1) as f32);
        assert!(at_frog > adjacent);
        assert!(adjacent > two_away);
    }

    #[test]
    fn reading_is_zero_beyond_range() {
        let config = EngineConfig::default();
        let frogs = [frog(0, 0, FrogKind::Toxic)];
        assert_eq!(radiation_at(&config, &frogs, CellCoord::new(9, 9)), 0.0);
        assert_eq!(radiation_at(&config, &frogs, CellCoord::new(3, 3)), 0.0);
        assert_eq!(radiation_at(&config, &frogs, CellCoord::new(2, 3)), 2.0);
    }

    #[test]
    fn kind_multipliers_scale_contribution() {
        let config = EngineConfig::default();
        let probe = CellCoord::new(4, 4);
        let reading = |kind| radiation_at(&config, &[frog(4, 5, kind)], probe);

        assert_eq!(reading(FrogKind::Normal), 5.0);
        assert_eq!(reading(FrogKind::Jumpy), 5.0);
        assert_eq!(reading(FrogKind::Toxic), 10.0);
        assert_eq!(reading(FrogKind::Ninja), 2.5);
    }

    #[test]
    fn contributions_from_several_frogs_add_up() {
        let config = EngineConfig::default();
        let frogs = [frog(5, 5, FrogKind::Normal), frog(5, 6, FrogKind::Normal)];
        let reading = radiation_at(&config, &frogs, CellCoord::new(5, 5));
        assert_eq!(reading, 6.0 + 5.0);
        assert!(reading > (config.radiation_range + 1) as f32);
    }
}
