// Voice - One triggered tone

use super::oscillator::{Oscillator, SimpleOscillator, WaveformType};
use crate::messaging::command::ToneParams;

/// Gain level the decay ramp ends at. A voice whose ramp has reached the
/// floor is inaudible and its slot can be reused.
const GAIN_FLOOR: f32 = 0.01;

/// A one-shot tone: an oscillator shaped by an exponential gain ramp that
/// falls from the trigger volume to [`GAIN_FLOOR`] over the tone duration.
/// There is no sustain; every trigger plays out and frees its slot.
pub struct Voice {
    oscillator: SimpleOscillator,
    gain: f32,
    decay_per_sample: f32,
    remaining_samples: u64,
    sample_rate: f32,
    /// Age counter for voice stealing priority (higher = newer)
    age: u64,
}

impl Voice {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            oscillator: SimpleOscillator::new(WaveformType::Sine, sample_rate),
            gain: 0.0,
            decay_per_sample: 1.0,
            remaining_samples: 0,
            sample_rate,
            age: 0,
        }
    }

    /// Start playing a tone. Any tone already in this slot is replaced.
    pub fn start(&mut self, tone: &ToneParams, age: u64) {
        let total_samples = (tone.duration * self.sample_rate).max(1.0) as u64;

        self.oscillator = SimpleOscillator::new(tone.waveform, self.sample_rate);
        self.oscillator.set_frequency(tone.frequency);

        self.gain = tone.volume.clamp(0.0, 1.0);
        // Per-sample multiplier k such that gain * k^total = GAIN_FLOOR
        self.decay_per_sample = if self.gain > GAIN_FLOOR {
            (GAIN_FLOOR / self.gain).powf(1.0 / total_samples as f32)
        } else {
            1.0
        };
        self.remaining_samples = total_samples;
        self.age = age;
    }

    pub fn is_active(&self) -> bool {
        self.remaining_samples > 0
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn next_sample(&mut self) -> f32 {
        if self.remaining_samples == 0 {
            return 0.0;
        }

        let sample = self.oscillator.next_sample() * self.gain;
        self.gain *= self.decay_per_sample;
        self.remaining_samples -= 1;

        sample
    }
}
