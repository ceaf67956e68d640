// Audio module - the cpal output engine behind the tone-trigger seam

pub mod engine;

pub use engine::{AudioEngine, AudioToneSink};
