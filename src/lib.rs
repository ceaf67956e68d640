// Bitboard - Step-sequencer engine library exports

pub mod audio;
pub mod library;
pub mod messaging;
pub mod sequencer;
pub mod session;
pub mod soundboard;
pub mod synth;

// Re-export commonly used types for convenience
pub use audio::engine::{AudioEngine, AudioToneSink};
pub use library::manager::{LibraryError, STORAGE_KEY, SaveOutcome, SongLibrary};
pub use library::storage::{FileStore, MemoryStore, SongStore};
pub use library::types::Song;
pub use messaging::channels::{create_command_channel, create_notification_channel};
pub use messaging::command::{Command, ToneParams};
pub use messaging::notification::{Notification, NotificationCategory, NotificationLevel};
pub use sequencer::grid::{GRID_SIZE, Track, default_kit};
pub use sequencer::tempo::{MAX_BPM, MIN_BPM, Tempo};
pub use sequencer::transport::{
    STEP_TONE_DURATION, SharedTransportState, ToneSink, Transport, TransportState,
};
pub use session::Session;
pub use soundboard::Soundboard;
pub use synth::oscillator::{Oscillator, SimpleOscillator, WaveformType};
