use thiserror::Error;

use crate::{CapturedFrog, CellCoord, FrogKind, PowerupKind};

/// Reasons the world refuses a command without mutating any state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The targeted cell lies outside the board.
    #[error("Invalid position")]
    OutOfBounds {
        /// Cell requested by the command.
        cell: CellCoord,
    },
    /// The session already reached a terminal state.
    #[error("Game is over")]
    GameOver,
    /// The inventory holds no powerup of the requested kind.
    #[error("Powerup not available")]
    PowerupUnavailable {
        /// Kind requested by the command.
        kind: PowerupKind,
    },
}

/// Result of a single-cell probe.
#[derive(Clone, Debug, PartialEq)]
pub enum ProbeOutcome {
    /// The probe was refused and consumed no move.
    Rejected {
        /// Why the probe was refused.
        reason: Rejection,
    },
    /// A frog occupied the probed cell and was captured.
    Captured {
        /// Cell that was probed.
        cell: CellCoord,
        /// Behaviour variant of the captured frog.
        kind: FrogKind,
        /// Powerup revealed at the probed cell, if any.
        found_powerup: Option<PowerupKind>,
        /// Frogs captured so far, including this one.
        caught: u32,
        /// Frogs placed when the layout was generated.
        total: u32,
        /// Whether this capture completed the board.
        game_won: bool,
        /// Whether the move budget ran out without completing the board.
        game_lost: bool,
    },
    /// No frog occupied the probed cell.
    Missed {
        /// Cell that was probed.
        cell: CellCoord,
        /// Reading at the probed cell before nearby frogs hopped away.
        initial_radiation: f32,
        /// Reading at the probed cell after nearby frogs hopped away.
        final_radiation: f32,
        /// Powerup revealed at the probed cell, if any.
        found_powerup: Option<PowerupKind>,
        /// Whether the move budget ran out with this probe.
        game_lost: bool,
    },
}

impl ProbeOutcome {
    /// Reports whether the probe was accepted.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !matches!(self, ProbeOutcome::Rejected { .. })
    }

    /// Reports whether the probe captured a frog.
    #[must_use]
    pub fn is_capture(&self) -> bool {
        matches!(self, ProbeOutcome::Captured { .. })
    }

    /// Powerup revealed by the probe, if any.
    #[must_use]
    pub fn found_powerup(&self) -> Option<PowerupKind> {
        match self {
            ProbeOutcome::Rejected { .. } => None,
            ProbeOutcome::Captured { found_powerup, .. }
            | ProbeOutcome::Missed { found_powerup, .. } => *found_powerup,
        }
    }

    /// Reports whether the probe completed the board.
    #[must_use]
    pub fn game_won(&self) -> bool {
        matches!(self, ProbeOutcome::Captured { game_won: true, .. })
    }

    /// Reports whether the probe exhausted the move budget without a win.
    #[must_use]
    pub fn game_lost(&self) -> bool {
        match self {
            ProbeOutcome::Rejected { .. } => false,
            ProbeOutcome::Captured { game_lost, .. } | ProbeOutcome::Missed { game_lost, .. } => {
                *game_lost
            }
        }
    }

    /// Human-readable status line describing the outcome.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            ProbeOutcome::Rejected { reason } => reason.to_string(),
            ProbeOutcome::Captured { caught, total, .. } => {
                format!("Caught a frog! {caught}/{total}")
            }
            ProbeOutcome::Missed {
                final_radiation, ..
            } => {
                if *final_radiation > 0.0 {
                    "Detecting radiation...".to_owned()
                } else {
                    "No radiation detected".to_owned()
                }
            }
        }
    }
}

/// Summary of a resolved mega-probe.
#[derive(Clone, Debug, PartialEq)]
pub struct MegaProbeReport {
    /// Centre of the resolved block.
    pub center: CellCoord,
    /// Frogs captured inside the block, in scan order.
    pub captured: Vec<CapturedFrog>,
    /// In-bounds cells of the block, in scan order.
    pub probed: Vec<CellCoord>,
    /// Powerup revealed at the centre cell, if any.
    pub found_powerup: Option<PowerupKind>,
    /// Frogs captured so far across the session.
    pub caught: u32,
    /// Frogs placed when the layout was generated.
    pub total: u32,
    /// Whether the mega-probe completed the board.
    pub game_won: bool,
    /// Whether the move budget ran out without completing the board.
    pub game_lost: bool,
}

impl MegaProbeReport {
    /// Number of frogs captured by this mega-probe.
    #[must_use]
    pub fn capture_count(&self) -> usize {
        self.captured.len()
    }
}

/// Result of a mega-probe.
#[derive(Clone, Debug, PartialEq)]
pub enum MegaProbeOutcome {
    /// The mega-probe was refused and consumed no move.
    Rejected {
        /// Why the mega-probe was refused.
        reason: Rejection,
    },
    /// The block was resolved.
    Resolved(MegaProbeReport),
}

impl MegaProbeOutcome {
    /// Reports whether the mega-probe was accepted.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, MegaProbeOutcome::Resolved(_))
    }

    /// Report of the resolved block, if accepted.
    #[must_use]
    pub fn report(&self) -> Option<&MegaProbeReport> {
        match self {
            MegaProbeOutcome::Rejected { .. } => None,
            MegaProbeOutcome::Resolved(report) => Some(report),
        }
    }

    /// Human-readable status line describing the outcome.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            MegaProbeOutcome::Rejected { reason } => reason.to_string(),
            MegaProbeOutcome::Resolved(report) => match report.capture_count() {
                0 => "No frogs in mega probe area".to_owned(),
                1 => format!(
                    "Mega probe captured 1 frog! {}/{}",
                    report.caught, report.total
                ),
                count => format!(
                    "Mega probe captured {count} frogs! {}/{}",
                    report.caught, report.total
                ),
            },
        }
    }
}

/// Result of a powerup activation.
#[derive(Clone, Debug, PartialEq)]
pub enum PowerupOutcome {
    /// The activation was refused and the inventory is unchanged.
    Rejected {
        /// Why the activation was refused.
        reason: Rejection,
    },
    /// A radar was consumed; positions are a point-in-time snapshot.
    Radar {
        /// Cells of every active frog at activation time.
        frogs: Vec<CellCoord>,
    },
    /// A mega-probe was consumed; the caller supplies the target next.
    MegaProbeArmed,
}

impl PowerupOutcome {
    /// Reports whether the activation was accepted.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !matches!(self, PowerupOutcome::Rejected { .. })
    }

    /// Human-readable status line describing the outcome.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            PowerupOutcome::Rejected { reason } => reason.to_string(),
            PowerupOutcome::Radar { frogs } => match frogs.len() {
                1 => "Radar pinged 1 frog. They are scattering!".to_owned(),
                count => format!("Radar pinged {count} frogs. They are scattering!"),
            },
            PowerupOutcome::MegaProbeArmed => "Mega probe armed. Choose a target.".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MegaProbeOutcome, MegaProbeReport, ProbeOutcome, Rejection};
    use crate::{CapturedFrog, CellCoord, FrogKind, PowerupKind};

    #[test]
    fn rejection_messages_match_status_lines() {
        let outcome = ProbeOutcome::Rejected {
            reason: Rejection::OutOfBounds {
                cell: CellCoord::new(-1, 0),
            },
        };
        assert!(!outcome.is_valid());
        assert_eq!(outcome.message(), "Invalid position");
        assert_eq!(Rejection::GameOver.to_string(), "Game is over");
        assert_eq!(
            Rejection::PowerupUnavailable {
                kind: PowerupKind::Radar
            }
            .to_string(),
            "Powerup not available"
        );
    }

    #[test]
    fn miss_message_depends_on_final_reading() {
        let mut outcome = ProbeOutcome::Missed {
            cell: CellCoord::new(1, 1),
            initial_radiation: 4.0,
            final_radiation: 0.0,
            found_powerup: None,
            game_lost: false,
        };
        assert_eq!(outcome.message(), "No radiation detected");

        if let ProbeOutcome::Missed {
            final_radiation, ..
        } = &mut outcome
        {
            *final_radiation = 3.0;
        }
        assert_eq!(outcome.message(), "Detecting radiation...");
    }

    #[test]
    fn mega_probe_message_pluralises_captures() {
        let frog = CapturedFrog {
            cell: CellCoord::new(2, 2),
            kind: FrogKind::Normal,
        };
        let mut report = MegaProbeReport {
            center: CellCoord::new(2, 2),
            captured: vec![frog],
            probed: Vec::new(),
            found_powerup: None,
            caught: 1,
            total: 5,
            game_won: false,
            game_lost: false,
        };
        assert_eq!(
            MegaProbeOutcome::Resolved(report.clone()).message(),
            "Mega probe captured 1 frog! 1/5"
        );

        report.captured.push(frog);
        report.caught = 2;
        assert_eq!(
            MegaProbeOutcome::Resolved(report).message(),
            "Mega probe captured 2 frogs! 2/5"
        );
    }
}
