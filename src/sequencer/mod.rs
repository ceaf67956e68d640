// Sequencer module - the step grid, tempo, and playback transport

pub mod grid;
pub mod tempo;
pub mod transport;

pub use grid::{GRID_SIZE, Track, default_kit};
pub use tempo::{MAX_BPM, MIN_BPM, Tempo};
pub use transport::{
    STEP_TONE_DURATION, SharedTransportState, ToneSink, Transport, TransportState,
};
