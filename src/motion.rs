//! Damped random walk that moves the marker across the field.
//!
//! All coordinates are logical canvas units: the field is 800 × 500 with
//! `y` growing downward, so "above the center line" means `y < CENTER_Y`.

use crate::entropy::Entropy;
use crate::tally::Side;

pub const CANVAS_WIDTH: f64 = 800.0;
pub const CANVAS_HEIGHT: f64 = 500.0;
pub const START_X: f64 = 50.0;
pub const END_X: f64 = 750.0;
pub const CENTER_Y: f64 = CANVAS_HEIGHT / 2.0;
pub const MOVEMENT_SPEED: f64 = 1.5;
pub const MAX_VERTICAL_SPEED: f64 = 12.0;
pub const MOMENTUM_FACTOR: f64 = 0.92;
pub const VOLATILITY: f64 = 0.7;
pub const SHOCK_CHANCE: f64 = 0.2;
pub const VERTICAL_MARGIN: f64 = 50.0;

pub const MIN_Y: f64 = VERTICAL_MARGIN;
pub const MAX_Y: f64 = CANVAS_HEIGHT - VERTICAL_MARGIN;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const START: Position = Position {
        x: START_X,
        y: CENTER_Y,
    };

    /// The half-plane this point falls in.
    pub fn side(self) -> Side {
        if self.y < CENTER_Y { Side::Red } else { Side::Blue }
    }

    pub fn crossed_finish(self) -> bool {
        self.x >= END_X
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub position: Position,
    pub momentum: f64,
}

impl Kinematics {
    pub const AT_START: Kinematics = Kinematics {
        position: Position::START,
        momentum: 0.0,
    };
}

/// Advance the marker by one tick.
///
/// Draws from `entropy` in a fixed order: volatility gate, impulse, shock
/// gate, shock. The last three are only drawn when the gate before them
/// passes.
pub fn step<E: Entropy + ?Sized>(from: Kinematics, entropy: &mut E) -> Kinematics {
    let x = from.position.x + MOVEMENT_SPEED;
    let mut momentum = from.momentum;

    if entropy.unit() < VOLATILITY {
        momentum += (entropy.unit() - 0.5) * MAX_VERTICAL_SPEED * 2.0;
        if entropy.unit() < SHOCK_CHANCE {
            momentum += (entropy.unit() - 0.5) * MAX_VERTICAL_SPEED * 3.0;
        }
    }

    momentum *= MOMENTUM_FACTOR;
    let momentum = momentum.clamp(-MAX_VERTICAL_SPEED, MAX_VERTICAL_SPEED);
    let y = (from.position.y + momentum).clamp(MIN_Y, MAX_Y);

    Kinematics {
        position: Position { x, y },
        momentum,
    }
}
