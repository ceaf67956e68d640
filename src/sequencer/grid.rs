// Grid - Instrument lanes and their step patterns

use serde::{Deserialize, Serialize};

use crate::synth::oscillator::WaveformType;

/// Number of steps in every track's pattern. The grid is never resized; the
/// array type makes that structural.
pub const GRID_SIZE: usize = 16;

/// One instrument lane: a fixed tone (waveform + frequency) and an on/off
/// flag per grid step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub waveform: WaveformType,
    /// Pitch of the lane in Hz, always positive
    pub frequency: f32,
    pub steps: [bool; GRID_SIZE],
}

impl Track {
    pub fn new(waveform: WaveformType, frequency: f32) -> Self {
        debug_assert!(frequency > 0.0, "track frequency must be positive");
        Self {
            waveform,
            frequency,
            steps: [false; GRID_SIZE],
        }
    }

    /// Display label, e.g. "sine 440Hz"
    pub fn label(&self) -> String {
        format!("{} {}Hz", self.waveform, self.frequency)
    }

    /// Reset every step to off
    pub fn clear(&mut self) {
        self.steps = [false; GRID_SIZE];
    }

    pub fn has_active_steps(&self) -> bool {
        self.steps.iter().any(|&on| on)
    }
}

/// The seven-lane default kit: paired sine, square and triangle lanes one
/// octave apart, plus a sawtooth bass.
pub fn default_kit() -> Vec<Track> {
    vec![
        Track::new(WaveformType::Sine, 880.0),
        Track::new(WaveformType::Sine, 440.0),
        Track::new(WaveformType::Square, 330.0),
        Track::new(WaveformType::Square, 220.0),
        Track::new(WaveformType::Triangle, 165.0),
        Track::new(WaveformType::Triangle, 110.0),
        Track::new(WaveformType::Sawtooth, 55.0),
    ]
}
