// Synth module - Tone generation primitives

pub mod oscillator;
pub mod voice;
pub mod voice_pool;

pub use oscillator::{Oscillator, SimpleOscillator, WaveformType};
pub use voice::Voice;
pub use voice_pool::VoicePool;
