use std::time::{Duration, Instant};

use crate::entropy::Entropy;
use crate::race::{Race, Resolution, RoundStatus, Start, TickOutcome};

/// Period of one motion tick (~60 per second).
pub const TICK_PERIOD: Duration = Duration::from_millis(16);

/// Ticks owed beyond this are dropped instead of replayed in a burst.
const MAX_CATCH_UP: u32 = 4;

/// Fixed-period tick source polled from the main loop.
///
/// It only produces ticks while armed. Arm it when a round starts and
/// cancel it as soon as the round stops playing.
#[derive(Debug, Clone)]
pub struct FixedStep {
    period: Duration,
    next_due: Option<Instant>,
}

impl FixedStep {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// Schedule the first tick one period after `now`.
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        if self.next_due.take().is_some() {
            tracing::debug!("tick schedule cancelled");
        }
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Number of ticks that have come due by `now`.
    pub fn due(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next_due else {
            return 0;
        };

        let mut ticks = 0;
        while next <= now {
            ticks += 1;
            next += self.period;
            if ticks == MAX_CATCH_UP {
                if next <= now {
                    next = now + self.period;
                }
                break;
            }
        }
        self.next_due = Some(next);
        ticks
    }

    /// Start a round on `race` and schedule its ticks if it began.
    pub fn start(&mut self, race: &mut Race, now: Instant) -> Start {
        let started = race.start_round();
        if let Start::Began { .. } = started {
            self.arm(now);
        }
        started
    }

    /// Run every tick due by `now` against `race`.
    ///
    /// The schedule is cancelled as soon as the race stops playing, so no
    /// stale tick reaches a finished round.
    pub fn drive<E: Entropy + ?Sized>(
        &mut self,
        race: &mut Race,
        now: Instant,
        entropy: &mut E,
    ) -> Option<Resolution> {
        if !self.is_armed() {
            return None;
        }
        if race.status() != RoundStatus::Playing {
            self.cancel();
            return None;
        }

        let mut resolved = None;
        for _ in 0..self.due(now) {
            if let TickOutcome::Resolved(resolution) = race.tick(entropy) {
                resolved = Some(resolution);
            }
            if race.status() != RoundStatus::Playing {
                self.cancel();
                break;
            }
        }
        resolved
    }

    /// Time left until the next tick, if armed.
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|next| next.saturating_duration_since(now))
    }
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::Scripted;

    #[test]
    fn idle_until_armed() {
        let mut step = FixedStep::default();
        let t0 = Instant::now();
        assert_eq!(step.due(t0 + Duration::from_secs(1)), 0);
        assert!(!step.is_armed());
        assert_eq!(step.until_next(t0), None);
    }

    #[test]
    fn yields_one_tick_per_period() {
        let mut step = FixedStep::default();
        let t0 = Instant::now();
        step.arm(t0);
        assert_eq!(step.due(t0 + Duration::from_millis(15)), 0);
        assert_eq!(step.due(t0 + Duration::from_millis(16)), 1);
        assert_eq!(step.due(t0 + Duration::from_millis(31)), 0);
        assert_eq!(step.due(t0 + Duration::from_millis(48)), 2);
    }

    #[test]
    fn catch_up_is_bounded() {
        let mut step = FixedStep::default();
        let t0 = Instant::now();
        step.arm(t0);
        let late = t0 + Duration::from_secs(2);
        assert_eq!(step.due(late), MAX_CATCH_UP);
        assert_eq!(step.due(late), 0);
        assert_eq!(step.until_next(late), Some(TICK_PERIOD));
    }

    #[test]
    fn start_arms_only_when_round_begins() {
        let mut step = FixedStep::default();
        let mut race = Race::new();
        let t0 = Instant::now();

        assert!(matches!(step.start(&mut race, t0), Start::Began { .. }));
        assert!(step.is_armed());

        step.cancel();
        assert_eq!(step.start(&mut race, t0), Start::Ignored);
        assert!(!step.is_armed());
    }

    #[test]
    fn drive_ticks_race_and_cancels_on_finish() {
        let mut step = FixedStep::default();
        let mut race = Race::new();
        let mut calm = Scripted::calm();
        let mut now = Instant::now();
        step.start(&mut race, now);

        let mut resolved = None;
        let mut drives = 0;
        while resolved.is_none() {
            now += TICK_PERIOD;
            resolved = step.drive(&mut race, now, &mut calm);
            drives += 1;
            assert!(drives <= 500, "round never resolved");
        }

        assert_eq!(drives, 467);
        assert_eq!(race.status(), RoundStatus::Finished);
        assert!(!step.is_armed());
        assert_eq!(step.until_next(now), None);

        let end = race.position();
        assert_eq!(step.drive(&mut race, now + TICK_PERIOD * 10, &mut calm), None);
        assert_eq!(race.position(), end);
        assert_eq!(race.rounds(), 1);
    }

    #[test]
    fn drive_stops_mid_burst_when_round_resolves() {
        let mut step = FixedStep::default();
        let mut race = Race::new();
        let mut calm = Scripted::calm();
        let t0 = Instant::now();
        step.start(&mut race, t0);

        // walk up to one tick short of the finish line
        let mut now = t0;
        for _ in 0..466 {
            now += TICK_PERIOD;
            assert_eq!(step.drive(&mut race, now, &mut calm), None);
        }
        assert_eq!(race.position().x, 749.0);

        // four ticks are due but only one is needed to finish
        let resolution = step.drive(&mut race, now + TICK_PERIOD * 4, &mut calm);
        assert!(resolution.is_some());
        assert_eq!(race.position().x, 750.5);
        assert!(!step.is_armed());
    }

    #[test]
    fn drive_cancels_if_race_is_not_playing() {
        let mut step = FixedStep::default();
        let mut race = Race::new();
        let t0 = Instant::now();
        step.arm(t0);
        assert_eq!(
            step.drive(&mut race, t0 + TICK_PERIOD, &mut Scripted::calm()),
            None
        );
        assert!(!step.is_armed());
        assert_eq!(race.status(), RoundStatus::Waiting);
    }

    #[test]
    fn cancel_stops_ticks() {
        let mut step = FixedStep::default();
        let t0 = Instant::now();
        step.arm(t0);
        step.cancel();
        assert_eq!(step.due(t0 + Duration::from_millis(100)), 0);
    }
}
