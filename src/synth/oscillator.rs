// Oscillateurs - Générateurs de formes d'onde

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

pub trait Oscillator {
    fn next_sample(&mut self) -> f32;
    fn set_frequency(&mut self, freq: f32);
    fn reset(&mut self);
}

/// Waveform of an instrument lane. Serialized lowercase because the stored
/// song format carries the names as plain strings ("sine", "square", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveformType {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

impl WaveformType {
    pub fn label(&self) -> &'static str {
        match self {
            WaveformType::Sine => "sine",
            WaveformType::Square => "square",
            WaveformType::Triangle => "triangle",
            WaveformType::Sawtooth => "sawtooth",
        }
    }
}

impl std::fmt::Display for WaveformType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Phase-accumulator oscillator. Phase runs in [0, 1) and advances by
/// frequency / sample_rate per sample.
pub struct SimpleOscillator {
    waveform: WaveformType,
    phase: f32,
    phase_increment: f32,
    sample_rate: f32,
}

impl SimpleOscillator {
    pub fn new(waveform: WaveformType, sample_rate: f32) -> Self {
        Self {
            waveform,
            phase: 0.0,
            phase_increment: 0.0,
            sample_rate,
        }
    }

    pub fn waveform(&self) -> WaveformType {
        self.waveform
    }
}

impl Oscillator for SimpleOscillator {
    fn next_sample(&mut self) -> f32 {
        let sample = match self.waveform {
            WaveformType::Sine => (self.phase * 2.0 * PI).sin(),
            WaveformType::Square => {
                if self.phase < 0.5 { 1.0 } else { -1.0 }
            }
            WaveformType::Triangle => 1.0 - 4.0 * (self.phase - 0.5).abs(),
            WaveformType::Sawtooth => (self.phase * 2.0) - 1.0,
        };

        self.phase += self.phase_increment;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        sample
    }

    fn set_frequency(&mut self, freq: f32) {
        self.phase_increment = freq / self.sample_rate;
    }

    fn reset(&mut self) {
        self.phase = 0.0;
    }
}
