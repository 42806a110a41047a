use std::fmt::Write as _;

use chrono::NaiveDate;
use froggies_core::{CellCoord, Command, Event, MegaProbeOutcome, PowerupKind, PowerupOutcome};
use froggies_system_achievements::{Achievement, Achievements};
use froggies_system_daily_challenge::{seed_for_date, DailyLedger};
use froggies_world::{self as world, query, World};
use log::debug;

use crate::{
    board,
    input::{PlayerAction, HELP},
    share_code::ShareCode,
};

/// Radar pings make every frog hop this many times after the reveal.
const RADAR_SCATTER_PASSES: usize = 2;

/// Result of performing one player action.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue(String),
    Quit,
}

/// Owns one game together with the progress systems that observe it.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    achievements: Achievements,
    ledger: DailyLedger,
    daily: Option<NaiveDate>,
    mega_armed: bool,
}

impl Session {
    /// Starts a session around the provided world.
    ///
    /// When `daily` is set and the world was built from that day's seed, the
    /// game counts as a daily attempt.
    pub(crate) fn new(
        world: World,
        achievements: Achievements,
        ledger: DailyLedger,
        daily: Option<NaiveDate>,
    ) -> Self {
        let daily = daily.filter(|date| seed_for_date(*date) == query::seed(&world));
        let mut session = Self {
            world,
            achievements,
            ledger,
            daily,
            mega_armed: false,
        };
        session.record_daily_attempt();
        session
    }

    /// Read-only access to the running game.
    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Lifetime achievement progress.
    pub(crate) fn achievements(&self) -> &Achievements {
        &self.achievements
    }

    /// Daily challenge ledger.
    pub(crate) fn ledger(&self) -> &DailyLedger {
        &self.ledger
    }

    /// Reports whether the next probe will be resolved as a mega-probe.
    pub(crate) fn is_mega_armed(&self) -> bool {
        self.mega_armed
    }

    /// Board, meter and headline for the current state.
    pub(crate) fn describe(&self) -> String {
        let snapshot = query::snapshot(&self.world);
        let mut out = board::render(&self.world, &[]);
        out.push_str(&board::status_lines(&snapshot));
        out.push('\n');
        out.push_str(board::status_message(&snapshot));
        if self.mega_armed {
            out.push_str("\nMega probe armed. Choose a target.");
        }
        if let Some(date) = self.daily {
            let _ = write!(
                out,
                "\nDaily challenge {date}: streak {}",
                self.ledger.streak(date)
            );
        }
        out
    }

    /// Performs one action and reports what the player should see.
    pub(crate) fn perform(&mut self, action: PlayerAction) -> Flow {
        debug!("performing {action:?}");
        let text = match action {
            PlayerAction::Probe(cell) if self.mega_armed => self.fire_mega_probe(cell),
            PlayerAction::Probe(cell) => self.probe(cell),
            PlayerAction::MegaProbe(cell) => {
                if !self.mega_armed {
                    let armed = self.arm_mega_probe();
                    if !self.mega_armed {
                        return Flow::Continue(armed);
                    }
                }
                self.fire_mega_probe(cell)
            }
            PlayerAction::ArmMegaProbe => self.arm_mega_probe(),
            PlayerAction::Radar => self.radar(),
            PlayerAction::ShowState => self.describe(),
            PlayerAction::Reset => self.restart(Command::Reset),
            PlayerAction::NewGame(seed) => self.restart(Command::NewGame { seed }),
            PlayerAction::Share => {
                let code = ShareCode::new(query::seed(&self.world), query::config(&self.world));
                format!("Share this code to replay the board: {}", code.encode())
            }
            PlayerAction::Help => HELP.to_owned(),
            PlayerAction::Quit => return Flow::Quit,
        };
        Flow::Continue(text)
    }

    fn dispatch(&mut self, command: Command) -> (Vec<Event>, Vec<Achievement>) {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);

        let mut unlocked = Vec::new();
        self.achievements.handle(&events, &mut unlocked);
        if let Some(date) = self.daily {
            self.ledger.handle(date, &events);
        }
        (events, unlocked)
    }

    fn probe(&mut self, cell: CellCoord) -> String {
        let (events, unlocked) = self.dispatch(Command::Probe { cell });
        self.narrate(&events, &unlocked)
    }

    fn fire_mega_probe(&mut self, cell: CellCoord) -> String {
        let (events, unlocked) = self.dispatch(Command::MegaProbe { cell });
        let resolved = events.iter().any(|event| {
            matches!(
                event,
                Event::MegaProbeResolved {
                    outcome: MegaProbeOutcome::Resolved(_)
                }
            )
        });
        if resolved {
            self.mega_armed = false;
        }
        self.narrate(&events, &unlocked)
    }

    fn arm_mega_probe(&mut self) -> String {
        if self.mega_armed {
            return "Mega probe already armed. Choose a target.".to_owned();
        }
        let (events, unlocked) = self.dispatch(Command::UsePowerup {
            kind: PowerupKind::MegaProbe,
        });
        self.mega_armed = events.iter().any(|event| {
            matches!(
                event,
                Event::PowerupUsed {
                    outcome: PowerupOutcome::MegaProbeArmed
                }
            )
        });
        self.narrate(&events, &unlocked)
    }

    fn radar(&mut self) -> String {
        let (events, unlocked) = self.dispatch(Command::UsePowerup {
            kind: PowerupKind::Radar,
        });
        let mut text = self.narrate(&events, &unlocked);

        let revealed = events.iter().find_map(|event| match event {
            Event::PowerupUsed {
                outcome: PowerupOutcome::Radar { frogs },
            } => Some(frogs.clone()),
            _ => None,
        });
        if let Some(frogs) = revealed {
            text.push('\n');
            text.push_str(&board::render(&self.world, &frogs));
            for _ in 0..RADAR_SCATTER_PASSES {
                let _ = self.dispatch(Command::ScatterFrogs);
            }
        }
        text
    }

    /// Rebuilds the board; the daily attempt carries over only while the seed is the day's.
    fn restart(&mut self, command: Command) -> String {
        self.mega_armed = false;
        let (events, _) = self.dispatch(command);
        let seed = query::seed(&self.world);
        self.daily = self.daily.filter(|date| seed_for_date(*date) == seed);
        self.record_daily_attempt();

        let mut text = String::new();
        for event in &events {
            if let Event::GameStarted { seed } = event {
                let _ = writeln!(text, "New board from seed {seed}.");
            }
        }
        text.push_str(&self.describe());
        text
    }

    fn record_daily_attempt(&mut self) {
        if let Some(date) = self.daily {
            self.ledger.record_attempt(date);
        }
    }

    fn narrate(&self, events: &[Event], unlocked: &[Achievement]) -> String {
        let mut lines = Vec::new();
        for event in events {
            match event {
                Event::ProbeResolved { outcome } => {
                    lines.push(outcome.message());
                    if let Some(kind) = outcome.found_powerup() {
                        lines.push(format!("Found a hidden {}!", kind.label()));
                    }
                }
                Event::MegaProbeResolved { outcome } => {
                    lines.push(outcome.message());
                    if let Some(kind) = outcome.report().and_then(|report| report.found_powerup) {
                        lines.push(format!("Found a hidden {}!", kind.label()));
                    }
                }
                Event::PowerupUsed { outcome } => lines.push(outcome.message()),
                Event::FrogsScattered { moves } => {
                    lines.push(format!("{} frog(s) hopped away.", moves.len()));
                }
                Event::GameEnded { won, moves } => {
                    let verdict = if *won { "won" } else { "lost" };
                    lines.push(format!("Game {verdict} after {moves} moves."));
                }
                Event::GameStarted { .. } => {}
            }
        }
        for achievement in unlocked {
            lines.push(format!(
                "Achievement unlocked: {} ({})",
                achievement.name(),
                achievement.description()
            ));
        }
        lines.push(self.describe());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use froggies_core::{EngineConfig, FrogKind, Seed};

    fn scripted_session(frogs: &[(CellCoord, FrogKind)]) -> Session {
        let mut world = World::new(Seed::new(12345));
        world.place_hidden_powerup(None);
        world.place_frogs(frogs);
        Session::new(world, Achievements::new(), DailyLedger::new(), None)
    }

    fn text(flow: Flow) -> String {
        match flow {
            Flow::Continue(text) => text,
            Flow::Quit => panic!("session quit unexpectedly"),
        }
    }

    #[test]
    fn capture_reports_progress_and_unlocks() {
        let mut session = scripted_session(&[(CellCoord::new(2, 3), FrogKind::Normal)]);

        let reply = text(session.perform(PlayerAction::Probe(CellCoord::new(2, 3))));

        assert!(reply.contains("Caught a frog! 1/1"));
        assert!(reply.contains("Game won after 1 moves."));
        assert!(reply.contains("Achievement unlocked: First Blood"));
        assert!(reply.contains("All frogs captured!"));
        assert!(session.achievements().is_unlocked(Achievement::LuckyShot));
    }

    #[test]
    fn radar_reveals_then_scatters_twice() {
        let mut session = scripted_session(&[
            (CellCoord::new(5, 5), FrogKind::Normal),
            (CellCoord::new(1, 8), FrogKind::Jumpy),
        ]);

        let reply = text(session.perform(PlayerAction::Radar));

        assert!(reply.contains("Radar pinged 2 frogs. They are scattering!"));
        assert_eq!(reply.matches('@').count(), 2);
        let snapshot = query::snapshot(session.world());
        assert_eq!(snapshot.moves, 0);
        assert!(!snapshot.has_powerup());

        let again = text(session.perform(PlayerAction::Radar));
        assert!(again.contains("Powerup not available"));
    }

    #[test]
    fn arming_without_mega_probe_is_refused() {
        let mut session = scripted_session(&[(CellCoord::new(5, 5), FrogKind::Normal)]);

        let reply = text(session.perform(PlayerAction::ArmMegaProbe));
        assert!(reply.contains("Powerup not available"));
        assert!(!session.is_mega_armed());

        let reply = text(session.perform(PlayerAction::MegaProbe(CellCoord::new(5, 5))));
        assert!(reply.contains("Powerup not available"));
        assert_eq!(query::snapshot(session.world()).moves, 0);
    }

    #[test]
    fn armed_probe_resolves_as_mega_probe() {
        let mut world = World::new(Seed::new(12345));
        world.place_frogs(&[
            (CellCoord::new(4, 4), FrogKind::Normal),
            (CellCoord::new(5, 5), FrogKind::Toxic),
            (CellCoord::new(9, 0), FrogKind::Ninja),
        ]);
        world.place_hidden_powerup(Some(CellCoord::new(0, 9)));
        let mut session = Session::new(world, Achievements::new(), DailyLedger::new(), None);

        // Seed 12345 reveals its hidden powerup as a mega-probe.
        let reply = text(session.perform(PlayerAction::Probe(CellCoord::new(0, 9))));
        assert!(reply.contains("Found a hidden mega-probe!"));
        assert_eq!(
            query::snapshot(session.world()).powerup_count(PowerupKind::MegaProbe),
            1
        );

        let reply = text(session.perform(PlayerAction::ArmMegaProbe));
        assert!(reply.contains("Mega probe armed"));
        assert!(session.is_mega_armed());

        let reply = text(session.perform(PlayerAction::Probe(CellCoord::new(4, 4))));
        assert!(!session.is_mega_armed());
        assert!(reply.contains("Mega probe captured"));
        assert_eq!(query::snapshot(session.world()).moves, 2);
    }

    #[test]
    fn out_of_bounds_mega_probe_stays_armed() {
        let mut world = World::new(Seed::new(12345));
        world.place_hidden_powerup(None);
        world.place_frogs(&[(CellCoord::new(4, 4), FrogKind::Normal)]);
        let mut session = Session::new(world, Achievements::new(), DailyLedger::new(), None);
        session.mega_armed = true;

        let reply = text(session.perform(PlayerAction::Probe(CellCoord::new(10, 10))));

        assert!(reply.contains("Invalid position"));
        assert!(session.is_mega_armed());
    }

    #[test]
    fn share_code_rebuilds_the_same_board() {
        let config = EngineConfig {
            frog_count: 4,
            ..EngineConfig::default()
        };
        let world = World::with_config(config, Seed::new(98_765)).expect("valid config");
        let mut session = Session::new(world, Achievements::new(), DailyLedger::new(), None);

        let reply = text(session.perform(PlayerAction::Share));
        let code = reply.rsplit(' ').next().expect("code at end of reply");
        let decoded = ShareCode::decode(code).expect("share code decodes");

        let rebuilt = World::with_config(decoded.apply_to(EngineConfig::default()), decoded.seed)
            .expect("valid config");
        assert_eq!(query::frogs(&rebuilt), query::frogs(session.world()));
    }

    #[test]
    fn daily_sessions_record_attempts_and_completions() {
        let today = NaiveDate::from_ymd_opt(2025, 10, 24).expect("valid date");
        let config = EngineConfig {
            frog_count: 1,
            ..EngineConfig::default()
        };
        let world = World::with_config(config, seed_for_date(today)).expect("valid config");
        let target = query::frogs(&world)[0].cell;
        let mut session = Session::new(world, Achievements::new(), DailyLedger::new(), Some(today));

        let reply = text(session.perform(PlayerAction::Probe(target)));

        assert!(reply.contains("Daily challenge 2025-10-24: streak 1"));
        let stats = session.ledger().stats_for(today);
        assert_eq!(stats.attempts, 1);
        assert_eq!(stats.completions, 1);

        let _ = session.perform(PlayerAction::NewGame(Some(Seed::new(1))));
        assert_eq!(session.ledger().stats_for(today).attempts, 1);
        assert!(!session.describe().contains("Daily challenge"));
    }

    #[test]
    fn reset_and_quit() {
        let mut session = scripted_session(&[(CellCoord::new(5, 5), FrogKind::Normal)]);
        let _ = session.perform(PlayerAction::Probe(CellCoord::new(9, 9)));

        let reply = text(session.perform(PlayerAction::Reset));

        assert!(reply.contains("New board from seed 012345."));
        assert_eq!(query::snapshot(session.world()).moves, 0);
        assert_eq!(session.perform(PlayerAction::Quit), Flow::Quit);
    }
}
