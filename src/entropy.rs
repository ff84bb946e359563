use rand::Rng;

/// Uniform samples in `[0, 1)` consumed by the motion model.
///
/// Every `rand` generator is an `Entropy` source, so a seeded
/// [`rand::rngs::StdRng`] replays the exact same trajectory.
pub trait Entropy {
    fn unit(&mut self) -> f64;
}

impl<R: Rng> Entropy for R {
    fn unit(&mut self) -> f64 {
        self.gen_range(0.0..1.0)
    }
}

/// Sample returned by an empty script; it never passes the volatility gate.
const CALM: f64 = 0.99;

/// Replays a fixed sequence of samples, wrapping around when exhausted.
#[derive(Debug, Clone)]
pub struct Scripted {
    samples: Vec<f64>,
    cursor: usize,
}

impl Scripted {
    pub fn new(samples: impl Into<Vec<f64>>) -> Self {
        Self {
            samples: samples.into(),
            cursor: 0,
        }
    }

    /// A script under which the marker never receives an impulse.
    pub fn calm() -> Self {
        Self::new(vec![CALM])
    }

    /// Number of samples handed out so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl Entropy for Scripted {
    fn unit(&mut self) -> f64 {
        if self.samples.is_empty() {
            return CALM;
        }
        let sample = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        sample
    }
}
