#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Daily challenge seeds and the ledger of daily attempts and completions.
//!
//! Every player derives the same seed from the same calendar date, so a daily
//! board is shared without any coordination. The ledger never reads the clock;
//! callers pass the date they consider to be today.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use froggies_core::{Event, Seed};
use log::info;
use serde::{Deserialize, Serialize};

/// Days inspected when counting a completion streak.
const STREAK_LOOKBACK_DAYS: u32 = 365;

/// Derives the shared seed for the provided calendar date.
///
/// The `YYYY-MM-DD` rendering of the date is folded with the 31-multiplier
/// string hash in wrapping 32-bit arithmetic; the magnitude is the seed.
#[must_use]
pub fn seed_for_date(date: NaiveDate) -> Seed {
    let rendered = date.format("%Y-%m-%d").to_string();
    let hash = rendered.encode_utf16().fold(0_i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    });
    Seed::new(i64::from(hash).abs())
}

/// Attempts and completions recorded for one calendar day.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyRecord {
    /// Daily games started.
    pub attempts: u32,
    /// Daily games won.
    pub completions: u32,
    /// Fewest moves spent on a win.
    pub best_moves: Option<u32>,
}

/// Summary of a single day's challenge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DailyStats {
    /// Day the summary describes.
    pub date: NaiveDate,
    /// Seed shared by every player on that day.
    pub seed: Seed,
    /// Daily games started on that day.
    pub attempts: u32,
    /// Daily games won on that day.
    pub completions: u32,
    /// Fewest moves spent on a win that day.
    pub best_moves: Option<u32>,
}

/// Serializable record of daily challenge activity keyed by date.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLedger {
    days: BTreeMap<NaiveDate, DailyRecord>,
}

impl DailyLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that a daily game was started on `date`.
    pub fn record_attempt(&mut self, date: NaiveDate) {
        self.days.entry(date).or_default().attempts += 1;
    }

    /// Records a daily win on `date` that took `moves` moves.
    pub fn record_completion(&mut self, date: NaiveDate, moves: u32) {
        let record = self.days.entry(date).or_default();
        record.completions += 1;
        record.best_moves = Some(record.best_moves.map_or(moves, |best| best.min(moves)));
        info!("daily challenge {date} completed in {moves} moves");
    }

    /// Records completions for every won game reported in `events`.
    pub fn handle(&mut self, date: NaiveDate, events: &[Event]) {
        for event in events {
            if let Event::GameEnded { won: true, moves } = event {
                self.record_completion(date, *moves);
            }
        }
    }

    /// Reports whether at least one daily game was won on `date`.
    #[must_use]
    pub fn has_completed(&self, date: NaiveDate) -> bool {
        self.days
            .get(&date)
            .map_or(false, |record| record.completions > 0)
    }

    /// Counts consecutive completed days ending at `today`.
    ///
    /// An unfinished `today` does not break the streak; any earlier gap does.
    #[must_use]
    pub fn streak(&self, today: NaiveDate) -> u32 {
        let mut streak = 0;
        let mut day = today;
        for offset in 0..STREAK_LOOKBACK_DAYS {
            if self.has_completed(day) {
                streak += 1;
            } else if offset > 0 {
                break;
            }
            match day.pred_opt() {
                Some(previous) => day = previous,
                None => break,
            }
        }
        streak
    }

    /// Number of distinct days with at least one completion.
    #[must_use]
    pub fn total_days_completed(&self) -> usize {
        self.days
            .values()
            .filter(|record| record.completions > 0)
            .count()
    }

    /// Summarises the challenge for `date`, including days never played.
    #[must_use]
    pub fn stats_for(&self, date: NaiveDate) -> DailyStats {
        let record = self.days.get(&date).copied().unwrap_or_default();
        DailyStats {
            date,
            seed: seed_for_date(date),
            attempts: record.attempts,
            completions: record.completions,
            best_moves: record.best_moves,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{seed_for_date, DailyLedger};
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn seed_matches_string_hash_of_iso_date() {
        assert_eq!(seed_for_date(date(2025, 10, 24)).get(), 275_055_844);
        assert_eq!(seed_for_date(date(2026, 1, 1)).get(), 1_161_665_730);
        assert_eq!(seed_for_date(date(2024, 2, 29)).get(), 613_311_771);
    }

    #[test]
    fn distinct_dates_yield_distinct_seeds() {
        let first = seed_for_date(date(2025, 3, 1));
        let second = seed_for_date(date(2025, 3, 2));
        assert_ne!(first, second);
        assert_eq!(first, seed_for_date(date(2025, 3, 1)));
    }

    #[test]
    fn best_moves_keeps_the_minimum() {
        let mut ledger = DailyLedger::new();
        let today = date(2025, 5, 5);
        ledger.record_completion(today, 20);
        ledger.record_completion(today, 12);
        ledger.record_completion(today, 30);

        let stats = ledger.stats_for(today);
        assert_eq!(stats.completions, 3);
        assert_eq!(stats.best_moves, Some(12));
    }

    #[test]
    fn unfinished_today_does_not_break_streak() {
        let mut ledger = DailyLedger::new();
        let today = date(2025, 3, 10);
        ledger.record_completion(date(2025, 3, 9), 10);
        ledger.record_completion(date(2025, 3, 8), 10);
        ledger.record_attempt(today);

        assert_eq!(ledger.streak(today), 2);

        ledger.record_completion(today, 9);
        assert_eq!(ledger.streak(today), 3);
    }

    #[test]
    fn earlier_gap_breaks_streak() {
        let mut ledger = DailyLedger::new();
        let today = date(2025, 3, 10);
        ledger.record_completion(today, 10);
        ledger.record_completion(date(2025, 3, 8), 10);
        ledger.record_completion(date(2025, 3, 7), 10);

        assert_eq!(ledger.streak(today), 1);
        assert_eq!(ledger.total_days_completed(), 3);
    }

    #[test]
    fn streak_crosses_month_and_year_boundaries() {
        let mut ledger = DailyLedger::new();
        for day in [date(2024, 12, 31), date(2025, 1, 1), date(2025, 1, 2)] {
            ledger.record_completion(day, 15);
        }
        assert_eq!(ledger.streak(date(2025, 1, 2)), 3);
        assert_eq!(ledger.streak(date(2025, 1, 3)), 3);
        assert_eq!(ledger.streak(date(2025, 1, 4)), 0);
    }

    #[test]
    fn attempts_alone_are_not_completions() {
        let mut ledger = DailyLedger::new();
        let today = date(2025, 6, 1);
        ledger.record_attempt(today);
        ledger.record_attempt(today);

        assert!(!ledger.has_completed(today));
        assert_eq!(ledger.stats_for(today).attempts, 2);
        assert_eq!(ledger.total_days_completed(), 0);
        assert_eq!(ledger.stats_for(date(2025, 6, 2)).attempts, 0);
    }
}
