//! Short sound cues for round and series results.
//!
//! Synthesis and playback need the `sound` feature; without it every cue is
//! silently dropped.

use crate::race::Resolution;
use crate::tally::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    RoundWon(Side),
    SeriesDecided(Side),
}

impl Cue {
    pub fn for_resolution(resolution: &Resolution) -> Cue {
        match resolution.final_result {
            Some(result) => Cue::SeriesDecided(result),
            None => Cue::RoundWon(resolution.winner),
        }
    }

    /// Start frequency, end frequency and length in seconds of the sweep.
    #[cfg_attr(not(feature = "sound"), allow(dead_code))]
    fn sweep(self) -> (f32, f32, f32) {
        match self {
            Cue::RoundWon(Side::Red) => (440.0, 880.0, 0.25),
            Cue::RoundWon(Side::Blue) => (880.0, 440.0, 0.25),
            Cue::SeriesDecided(Side::Red) => (330.0, 990.0, 0.8),
            Cue::SeriesDecided(Side::Blue) => (990.0, 330.0, 0.8),
        }
    }
}

pub struct Audio {
    #[cfg(feature = "sound")]
    output: Option<backend::Output>,
}

impl Audio {
    pub fn open(enabled: bool) -> Self {
        #[cfg(feature = "sound")]
        {
            let output = if enabled {
                match backend::Output::open() {
                    Ok(output) => Some(output),
                    Err(err) => {
                        tracing::warn!("Audio unavailable, muting: {err}");
                        None
                    }
                }
            } else {
                None
            };
            Self { output }
        }

        #[cfg(not(feature = "sound"))]
        {
            if enabled {
                tracing::debug!("built without the sound feature, cues are muted");
            }
            Self {}
        }
    }

    pub fn play(&self, cue: Cue) {
        tracing::debug!(?cue, "sound cue");
        #[cfg(feature = "sound")]
        if let Some(output) = &self.output {
            output.play(backend::synth(cue));
        }
    }
}

#[cfg(feature = "sound")]
mod backend {
    use fundsp::prelude::*;
    use rodio::{OutputStream, OutputStreamBuilder, Sink, StreamError, buffer::SamplesBuffer};

    use super::Cue;

    const SAMPLE_RATE: u32 = 44_100;

    pub struct Output {
        stream: OutputStream,
    }

    impl Output {
        pub fn open() -> Result<Self, StreamError> {
            let mut stream = OutputStreamBuilder::open_default_stream()?;
            stream.log_on_drop(false);
            Ok(Self { stream })
        }

        pub fn play(&self, samples: Vec<f32>) {
            let sink = Sink::connect_new(self.stream.mixer());
            sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
            sink.detach(); // Play in background
        }
    }

    /// Sine sweep with a linear fade-out.
    pub fn synth(cue: Cue) -> Vec<f32> {
        let (from, to, secs) = cue.sweep();
        let freq = lfo(move |t: f32| lerp(from, to, (t / secs).min(1.0)));
        let gain = lfo(move |t: f32| lerp(0.15, 0.0, (t / secs).min(1.0)));
        let mut sound = (freq >> sine::<f32>()) * gain;
        sound.set_sample_rate(SAMPLE_RATE as f64);

        let len = (SAMPLE_RATE as f32 * secs) as usize;
        (0..len).map(|_| sound.get_mono()).collect()
    }
}
