//! A two-sided random-walk race in the terminal.
//!
//! A ballot box drifts from the start line toward the finish line on a
//! damped random walk. Where it crosses the finish decides the round: above
//! the center line is a red win, on or below it a blue one. Ten rounds make
//! a series, and the majority of the series is the "prediction".
//!
//! The simulation ([`race`], [`motion`], [`tally`], [`trail`]) is free of
//! timers and terminal I/O: randomness comes in through [`entropy::Entropy`]
//! and time through [`scheduler::FixedStep`], so a seeded generator replays
//! a series exactly.

pub mod audio;
pub mod config;
pub mod entropy;
pub mod hud;
pub mod motion;
pub mod pixel;
pub mod race;
pub mod scene;
pub mod scheduler;
pub mod tally;
pub mod trail;
pub mod view;

pub use entropy::{Entropy, Scripted};
pub use motion::Position;
pub use race::{Race, Resolution, RoundStatus, SeriesReport, Start, TickOutcome, play_series};
pub use tally::{ROUNDS_PER_SERIES, Side, Tally};
