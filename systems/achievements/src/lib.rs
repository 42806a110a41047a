#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure achievements system that folds finished games into lifetime stats.
//!
//! The system observes world events only. Powerups found or used, mega-probe
//! captures and opening-probe catches land in [`AchievementStats`] as they
//! happen. Probe and capture counts are tallied per game and folded in when the
//! world reports the game ended; a fresh `GameStarted` discards that tally.

use std::collections::BTreeSet;

use froggies_core::{Event, MegaProbeOutcome, ProbeOutcome};
use log::info;
use serde::{Deserialize, Serialize};

const SHARPSHOOTER_MOVES: u32 = 15;
const MEGA_HUNTER_CAPTURES: u32 = 3;
const HOT_STREAK_WINS: u32 = 3;
const DEDICATION_GAMES: u32 = 10;
const POWER_USER_USES: u32 = 5;
const EFFICIENCY_ACCURACY: u32 = 90;
const EXPLORER_FINDS: u32 = 5;

/// Milestones unlocked once their condition over the lifetime stats first holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Achievement {
    /// Catch a frog.
    FirstBlood,
    /// Win a game in fifteen moves or fewer.
    Sharpshooter,
    /// Catch three or more frogs with a single mega-probe.
    MegaHunter,
    /// Win without a single missed probe.
    PerfectGame,
    /// Win three games in a row.
    HotStreak,
    /// Finish ten games.
    Dedication,
    /// Use five powerups.
    PowerUser,
    /// Catch a frog with the first probe of a game.
    LuckyShot,
    /// Win with at least ninety percent accuracy.
    EfficiencyExpert,
    /// Find five hidden powerups.
    Explorer,
}

impl Achievement {
    /// Every achievement in unlock-check order.
    pub const ALL: [Achievement; 10] = [
        Achievement::FirstBlood,
        Achievement::Sharpshooter,
        Achievement::MegaHunter,
        Achievement::PerfectGame,
        Achievement::HotStreak,
        Achievement::Dedication,
        Achievement::PowerUser,
        Achievement::LuckyShot,
        Achievement::EfficiencyExpert,
        Achievement::Explorer,
    ];

    /// Display name of the achievement.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Achievement::FirstBlood => "First Blood",
            Achievement::Sharpshooter => "Sharpshooter",
            Achievement::MegaHunter => "Mega Hunter",
            Achievement::PerfectGame => "Perfect Game",
            Achievement::HotStreak => "Hot Streak",
            Achievement::Dedication => "Dedication",
            Achievement::PowerUser => "Power User",
            Achievement::LuckyShot => "Lucky Shot",
            Achievement::EfficiencyExpert => "Efficiency Expert",
            Achievement::Explorer => "Explorer",
        }
    }

    /// One-line description of the unlock condition.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Achievement::FirstBlood => "Catch your first frog",
            Achievement::Sharpshooter => "Win a game in 15 moves or less",
            Achievement::MegaHunter => "Catch 3+ frogs with one mega-probe",
            Achievement::PerfectGame => "Win without missing a single probe",
            Achievement::HotStreak => "Win 3 games in a row",
            Achievement::Dedication => "Play 10 games",
            Achievement::PowerUser => "Use 5 powerups",
            Achievement::LuckyShot => "Catch a frog on your first probe",
            Achievement::EfficiencyExpert => "Win with 90% accuracy or better",
            Achievement::Explorer => "Find 5 hidden powerups",
        }
    }

    fn is_earned(self, stats: &AchievementStats) -> bool {
        match self {
            Achievement::FirstBlood => stats.total_frogs_caught >= 1,
            Achievement::Sharpshooter => stats
                .best_moves
                .map_or(false, |moves| moves <= SHARPSHOOTER_MOVES),
            Achievement::MegaHunter => stats.max_mega_probe_capture >= MEGA_HUNTER_CAPTURES,
            Achievement::PerfectGame => stats.perfect_games >= 1,
            Achievement::HotStreak => stats.max_win_streak >= HOT_STREAK_WINS,
            Achievement::Dedication => stats.total_games >= DEDICATION_GAMES,
            Achievement::PowerUser => stats.powerups_used >= POWER_USER_USES,
            Achievement::LuckyShot => stats.first_probe_catches >= 1,
            Achievement::EfficiencyExpert => stats.best_accuracy >= EFFICIENCY_ACCURACY,
            Achievement::Explorer => stats.powerups_found >= EXPLORER_FINDS,
        }
    }
}

/// Lifetime statistics accumulated across games.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AchievementStats {
    /// Games that reached a win or a loss.
    pub total_games: u32,
    /// Games won.
    pub total_wins: u32,
    /// Frogs captured across every finished game.
    pub total_frogs_caught: u32,
    /// Fewest moves spent on a win, if any game was won.
    pub best_moves: Option<u32>,
    /// Highest rounded capture-per-probe percentage over won games.
    pub best_accuracy: u32,
    /// Largest number of frogs captured by one mega-probe, recorded as it happens.
    pub max_mega_probe_capture: u32,
    /// Games won with zero missed probes.
    pub perfect_games: u32,
    /// Consecutive wins ending with the latest game.
    pub current_win_streak: u32,
    /// Longest run of consecutive wins.
    pub max_win_streak: u32,
    /// Powerups consumed, recorded as they are used.
    pub powerups_used: u32,
    /// Hidden powerups revealed by probing, recorded as they are found.
    pub powerups_found: u32,
    /// Games whose opening probe caught a frog, recorded on that probe.
    pub first_probe_catches: u32,
}

/// Serializable record of stats and unlocked achievements; storage is up to the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementProgress {
    /// Lifetime statistics.
    pub stats: AchievementStats,
    /// Achievements already unlocked, in check order.
    pub unlocked: Vec<Achievement>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct GameTally {
    probes: u32,
    misses: u32,
    caught: u32,
}

impl GameTally {
    fn accuracy(&self) -> u32 {
        if self.probes == 0 {
            return 0;
        }
        (f64::from(self.caught) / f64::from(self.probes) * 100.0).round() as u32
    }
}

/// Pure system that converts world events into unlocked achievements.
#[derive(Debug, Default)]
pub struct Achievements {
    stats: AchievementStats,
    unlocked: BTreeSet<Achievement>,
    tally: GameTally,
}

impl Achievements {
    /// Creates a system with empty stats and nothing unlocked.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a system from previously saved progress.
    #[must_use]
    pub fn from_progress(progress: AchievementProgress) -> Self {
        Self {
            stats: progress.stats,
            unlocked: progress.unlocked.into_iter().collect(),
            tally: GameTally::default(),
        }
    }

    /// Captures the stats and unlocks for persistence.
    #[must_use]
    pub fn progress(&self) -> AchievementProgress {
        AchievementProgress {
            stats: self.stats.clone(),
            unlocked: self.unlocked.iter().copied().collect(),
        }
    }

    /// Lifetime statistics recorded so far.
    #[must_use]
    pub fn stats(&self) -> &AchievementStats {
        &self.stats
    }

    /// Reports whether the achievement has been unlocked.
    #[must_use]
    pub fn is_unlocked(&self, achievement: Achievement) -> bool {
        self.unlocked.contains(&achievement)
    }

    /// Iterates unlocked achievements in check order.
    pub fn unlocked(&self) -> impl Iterator<Item = Achievement> + '_ {
        self.unlocked.iter().copied()
    }

    /// Consumes world events, appending achievements unlocked by them to `out`.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Achievement>) {
        for event in events {
            match event {
                Event::ProbeResolved { outcome } => {
                    if self.record_probe(outcome) {
                        self.unlock_earned(out);
                    }
                }
                Event::MegaProbeResolved { outcome } => {
                    if self.record_mega_probe(outcome) {
                        self.unlock_earned(out);
                    }
                }
                Event::PowerupUsed { outcome } => {
                    if outcome.is_valid() {
                        self.stats.powerups_used += 1;
                        self.unlock_earned(out);
                    }
                }
                Event::GameStarted { .. } => self.tally = GameTally::default(),
                Event::GameEnded { won, moves } => {
                    self.finish_game(*won, *moves);
                    self.unlock_earned(out);
                }
                Event::FrogsScattered { .. } => {}
            }
        }
    }

    /// Tallies a probe; returns whether a lifetime stat changed.
    fn record_probe(&mut self, outcome: &ProbeOutcome) -> bool {
        if !outcome.is_valid() {
            return false;
        }
        let mut changed = false;
        self.tally.probes += 1;
        if outcome.is_capture() {
            self.tally.caught += 1;
            if self.tally.probes == 1 {
                self.stats.first_probe_catches += 1;
                changed = true;
            }
        } else {
            self.tally.misses += 1;
        }
        if outcome.found_powerup().is_some() {
            self.stats.powerups_found += 1;
            changed = true;
        }
        changed
    }

    /// Tallies a mega-probe; returns whether a lifetime stat changed.
    fn record_mega_probe(&mut self, outcome: &MegaProbeOutcome) -> bool {
        let Some(report) = outcome.report() else {
            return false;
        };
        let captured = u32::try_from(report.capture_count()).unwrap_or(u32::MAX);
        self.tally.probes += 1;
        self.tally.caught += captured;

        let mut changed = false;
        if captured > self.stats.max_mega_probe_capture {
            self.stats.max_mega_probe_capture = captured;
            changed = true;
        }
        if report.found_powerup.is_some() {
            self.stats.powerups_found += 1;
            changed = true;
        }
        changed
    }

    fn finish_game(&mut self, won: bool, moves: u32) {
        let tally = std::mem::take(&mut self.tally);
        let stats = &mut self.stats;

        stats.total_games += 1;
        stats.total_frogs_caught += tally.caught;

        if won {
            stats.total_wins += 1;
            stats.current_win_streak += 1;
            stats.max_win_streak = stats.max_win_streak.max(stats.current_win_streak);
            stats.best_moves = Some(stats.best_moves.map_or(moves, |best| best.min(moves)));
            stats.best_accuracy = stats.best_accuracy.max(tally.accuracy());
            if tally.misses == 0 {
                stats.perfect_games += 1;
            }
        } else {
            stats.current_win_streak = 0;
        }
    }

    fn unlock_earned(&mut self, out: &mut Vec<Achievement>) {
        for achievement in Achievement::ALL {
            if self.unlocked.contains(&achievement) || !achievement.is_earned(&self.stats) {
                continue;
            }
            let _ = self.unlocked.insert(achievement);
            info!("achievement unlocked: {}", achievement.name());
            out.push(achievement);
        }
    }
}
