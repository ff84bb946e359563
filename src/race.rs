//! Round and series bookkeeping around the motion model.
//!
//! A [`Race`] is only ever changed through [`Race::start_round`] and
//! [`Race::tick`]. The tick takes its randomness as an argument, so the
//! scheduler that calls it holds no state of its own.

use crate::entropy::Entropy;
use crate::motion::{self, Kinematics, Position, END_X, MOVEMENT_SPEED, START_X};
use crate::tally::{ROUNDS_PER_SERIES, Side, Tally};
use crate::trail::Trail;

/// Upper bound on ticks in a round; the marker always reaches the finish
/// line well within it.
const MAX_ROUND_TICKS: u32 = ((END_X - START_X) / MOVEMENT_SPEED) as u32 + 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    Waiting,
    Playing,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Start {
    Began { round: u32, new_series: bool },
    /// A round is already in flight.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub winner: Side,
    /// 1-based number of the round that just finished.
    pub round: u32,
    /// Set when this round completed the series.
    pub final_result: Option<Side>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing changed.
    Idle,
    Moved,
    Resolved(Resolution),
}

#[derive(Debug, Clone)]
pub struct Race {
    kinematics: Kinematics,
    trail: Trail,
    status: RoundStatus,
    winner: Option<Side>,
    tally: Tally,
    final_result: Option<Side>,
}

impl Default for Race {
    fn default() -> Self {
        Self::new()
    }
}

impl Race {
    pub fn new() -> Self {
        Self {
            kinematics: Kinematics::AT_START,
            trail: Trail::new(),
            status: RoundStatus::Waiting,
            winner: None,
            tally: Tally::new(),
            final_result: None,
        }
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn position(&self) -> Position {
        self.kinematics.position
    }

    pub fn momentum(&self) -> f64 {
        self.kinematics.momentum
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Resolved rounds in the current series.
    pub fn rounds(&self) -> u32 {
        self.tally.total()
    }

    pub fn rounds_remaining(&self) -> u32 {
        ROUNDS_PER_SERIES - self.rounds()
    }

    pub fn final_result(&self) -> Option<Side> {
        self.final_result
    }

    pub fn series_complete(&self) -> bool {
        self.rounds() >= ROUNDS_PER_SERIES
    }

    /// Put the marker back on the start line and begin a round. Starting
    /// after a completed series clears the tally first.
    pub fn start_round(&mut self) -> Start {
        if self.status == RoundStatus::Playing {
            tracing::debug!(round = self.rounds() + 1, "start ignored, round in flight");
            return Start::Ignored;
        }

        let new_series = self.series_complete();
        if new_series {
            self.tally.reset();
            self.final_result = None;
        }

        self.kinematics = Kinematics::AT_START;
        self.trail.clear();
        self.winner = None;
        self.status = RoundStatus::Playing;

        let round = self.rounds() + 1;
        tracing::info!(round, new_series, "round started");
        Start::Began { round, new_series }
    }

    pub fn tick<E: Entropy + ?Sized>(&mut self, entropy: &mut E) -> TickOutcome {
        if self.status != RoundStatus::Playing {
            return TickOutcome::Idle;
        }

        let before = self.kinematics.position;
        self.kinematics = motion::step(self.kinematics, entropy);
        self.trail.push(before);

        let position = self.kinematics.position;
        if position.crossed_finish() {
            TickOutcome::Resolved(self.resolve(position.side()))
        } else {
            TickOutcome::Moved
        }
    }

    fn resolve(&mut self, winner: Side) -> Resolution {
        self.status = RoundStatus::Finished;
        self.winner = Some(winner);
        self.tally.record(winner);

        let round = self.rounds();
        tracing::info!(
            round,
            %winner,
            red = self.tally.red(),
            blue = self.tally.blue(),
            "round resolved"
        );

        if round == ROUNDS_PER_SERIES {
            let result = self.tally.majority();
            self.final_result = Some(result);
            tracing::info!(
                %result,
                red = self.tally.red(),
                blue = self.tally.blue(),
                tied = self.tally.red() == self.tally.blue(),
                "series decided"
            );
        }

        Resolution {
            winner,
            round,
            final_result: self.final_result,
        }
    }

    /// Start a round and tick it to completion without a scheduler.
    ///
    /// Returns `None` if a round was already in flight.
    pub fn run_round<E: Entropy + ?Sized>(&mut self, entropy: &mut E) -> Option<Resolution> {
        if self.start_round() == Start::Ignored {
            return None;
        }
        for _ in 0..MAX_ROUND_TICKS {
            if let TickOutcome::Resolved(resolution) = self.tick(entropy) {
                return Some(resolution);
            }
        }
        None
    }
}

/// Outcome of a full series played without a UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesReport {
    pub winners: Vec<Side>,
    pub tally: Tally,
    pub result: Side,
}

/// Play a fresh series of [`ROUNDS_PER_SERIES`] rounds back to back.
pub fn play_series<E: Entropy + ?Sized>(entropy: &mut E) -> SeriesReport {
    let mut race = Race::new();
    let mut winners = Vec::with_capacity(ROUNDS_PER_SERIES as usize);
    while !race.series_complete() {
        if let Some(resolution) = race.run_round(entropy) {
            winners.push(resolution.winner);
        }
    }
    SeriesReport {
        winners,
        tally: race.tally(),
        result: race.tally().majority(),
    }
}
