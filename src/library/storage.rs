// Storage backends - the key-value string store songs persist through

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

/// Key-value string store the song collection persists through. The board
/// reads each key at most once, at startup, and writes the whole value back
/// after every successful mutation.
pub trait SongStore {
    /// The stored value, or None when the key has never been written
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// In-memory store for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SongStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store: one `<key>.json` file per key under a data directory.
/// The directory is created on first write.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under the platform data directory (e.g. `~/.local/share/bitboard`)
    pub fn default_location() -> io::Result<Self> {
        let dir = dirs::data_dir()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no platform data directory"))?
            .join("bitboard");
        Ok(Self::new(dir))
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SongStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("songs"), None);

        store.set("songs", "[]").unwrap();
        assert_eq!(store.get("songs").as_deref(), Some("[]"));

        store.set("songs", "[1]").unwrap();
        assert_eq!(store.get("songs").as_deref(), Some("[1]"));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("library"));

        // Missing key and missing directory both read as absent
        assert_eq!(store.get("songs"), None);

        store.set("songs", "{\"a\":1}").unwrap();
        assert_eq!(store.get("songs").as_deref(), Some("{\"a\":1}"));

        // A second store over the same directory sees the same data
        let reopened = FileStore::new(dir.path().join("library"));
        assert_eq!(reopened.get("songs").as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn test_file_store_keys_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        store.set("first", "1").unwrap();
        store.set("second", "2").unwrap();

        assert_eq!(store.get("first").as_deref(), Some("1"));
        assert_eq!(store.get("second").as_deref(), Some("2"));
    }
}
