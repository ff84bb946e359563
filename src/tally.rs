use std::fmt;

pub const ROUNDS_PER_SERIES: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Red,
    Blue,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::Red => "RED",
            Side::Blue => "BLUE",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-side round wins within the current series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    red: u32,
    blue: u32,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, side: Side) {
        match side {
            Side::Red => self.red += 1,
            Side::Blue => self.blue += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Red => self.red,
            Side::Blue => self.blue,
        }
    }

    pub fn red(&self) -> u32 {
        self.red
    }

    pub fn blue(&self) -> u32 {
        self.blue
    }

    /// Rounds resolved so far.
    pub fn total(&self) -> u32 {
        self.red + self.blue
    }

    /// Red only when strictly ahead; a tie goes to blue.
    pub fn majority(&self) -> Side {
        if self.red > self.blue { Side::Red } else { Side::Blue }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
