// Command types - Communication sequencer → audio

use crate::synth::oscillator::WaveformType;

/// One tone request: everything the audio side needs to sound a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneParams {
    /// Pitch in Hz, always positive
    pub frequency: f32,
    pub waveform: WaveformType,
    /// How long the tone rings, in seconds
    pub duration: f32,
    /// Master volume at trigger time (0.0 to 1.0)
    pub volume: f32,
}

#[derive(Debug, Clone, Copy)]
pub enum Command {
    Trigger(ToneParams),
}
