// Song persistence - named snapshots of the grid in a key-value string store

pub mod manager;
pub mod storage;
pub mod types;

pub use manager::{LibraryError, STORAGE_KEY, SaveOutcome, SongLibrary};
pub use storage::{FileStore, MemoryStore, SongStore};
pub use types::Song;
