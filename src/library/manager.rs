// Song library - the saved-song collection and its backing store

use crate::library::storage::SongStore;
use crate::library::types::Song;
use crate::sequencer::grid::Track;

/// Fixed key the whole song collection lives under in the store
pub const STORAGE_KEY: &str = "beatbox-songs";

/// Library error types
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("song title cannot be blank")]
    BlankTitle,

    #[error("a song named \"{0}\" already exists")]
    DuplicateTitle(String),

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LibraryError {
    /// Validation errors are user-correctable; storage errors are not
    pub fn is_validation(&self) -> bool {
        matches!(self, LibraryError::BlankTitle | LibraryError::DuplicateTitle(_))
    }
}

/// Whether a successful save created a new entry or replaced one in place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

/// The ordered collection of saved songs, persisted wholesale after every
/// successful mutation.
pub struct SongLibrary<S: SongStore> {
    store: S,
    songs: Vec<Song>,
}

impl<S: SongStore> SongLibrary<S> {
    /// Open the library, reading the collection once. Absent or unparsable
    /// data degrades to an empty collection rather than failing.
    pub fn open(store: S) -> Self {
        let songs = store
            .get(STORAGE_KEY)
            .and_then(|data| serde_json::from_str(&data).ok())
            .unwrap_or_default();

        Self { store, songs }
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Song> {
        self.songs.get(index)
    }

    /// Save a snapshot under `title`. When `editing` names an existing entry
    /// that entry is replaced in place; otherwise the song is appended. The
    /// duplicate check is case-sensitive and skips the entry being edited,
    /// so re-saving a song under its own name succeeds.
    pub fn save(
        &mut self,
        title: &str,
        tracks: Vec<Track>,
        bpm: u32,
        editing: Option<usize>,
    ) -> Result<SaveOutcome, LibraryError> {
        if title.trim().is_empty() {
            return Err(LibraryError::BlankTitle);
        }

        let duplicate = self
            .songs
            .iter()
            .enumerate()
            .any(|(i, song)| song.title == title && Some(i) != editing);
        if duplicate {
            return Err(LibraryError::DuplicateTitle(title.to_string()));
        }

        let mut song = Song::new(title.to_string(), tracks, bpm);

        let outcome = match editing {
            Some(index) if index < self.songs.len() => {
                // Keep the first-saved stamp across updates
                song.created = self.songs[index].created.clone();
                self.songs[index] = song;
                SaveOutcome::Updated
            }
            _ => {
                self.songs.push(song);
                SaveOutcome::Created
            }
        };

        self.persist()?;
        Ok(outcome)
    }

    /// Remove the entry at `index`, preserving the order of the rest.
    /// Returns the removed song. An out-of-range index is a caller bug.
    pub fn delete(&mut self, index: usize) -> Result<Song, LibraryError> {
        debug_assert!(index < self.songs.len(), "song index out of range");
        let song = self.songs.remove(index);
        self.persist()?;
        Ok(song)
    }

    fn persist(&mut self) -> Result<(), LibraryError> {
        let json = serde_json::to_string_pretty(&self.songs)?;
        self.store.set(STORAGE_KEY, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::storage::MemoryStore;
    use crate::sequencer::grid::default_kit;

    fn library() -> SongLibrary<MemoryStore> {
        SongLibrary::open(MemoryStore::new())
    }

    #[test]
    fn test_open_empty_store() {
        assert!(library().is_empty());
    }

    #[test]
    fn test_open_with_corrupt_data() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "not json at all {{{").unwrap();

        // Unparsable data degrades to an empty collection, no error
        let library = SongLibrary::open(store);
        assert!(library.is_empty());
    }

    #[test]
    fn test_save_appends_and_persists() {
        let mut library = library();
        library.save("Intro", default_kit(), 100, None).unwrap();
        assert_eq!(library.len(), 1);
        assert_eq!(library.get(0).unwrap().title, "Intro");

        // The store now holds the collection: a reopened library sees it
        let stored = library.store.get(STORAGE_KEY).unwrap();
        let reloaded: Vec<Song> = serde_json::from_str(&stored).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].bpm, 100);
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut library = library();

        let err = library.save("", default_kit(), 120, None).unwrap_err();
        assert!(matches!(err, LibraryError::BlankTitle));

        let err = library.save("   ", default_kit(), 120, None).unwrap_err();
        assert!(matches!(err, LibraryError::BlankTitle));

        assert!(library.is_empty(), "failed save must not mutate the collection");
    }

    #[test]
    fn test_duplicate_title_rejected() {
        let mut library = library();
        library.save("Intro", default_kit(), 100, None).unwrap();

        let err = library.save("Intro", default_kit(), 140, None).unwrap_err();
        assert!(matches!(err, LibraryError::DuplicateTitle(ref t) if t == "Intro"));
        assert_eq!(library.len(), 1);
        assert_eq!(library.get(0).unwrap().bpm, 100, "collection must be untouched");
    }

    #[test]
    fn test_duplicate_check_is_case_sensitive() {
        let mut library = library();
        library.save("Intro", default_kit(), 100, None).unwrap();

        library.save("intro", default_kit(), 100, None).unwrap();
        assert_eq!(library.len(), 2);
    }

    #[test]
    fn test_save_own_title_while_editing() {
        let mut library = library();
        library.save("Intro", default_kit(), 100, None).unwrap();

        // Re-saving the edited song under its own name is not a duplicate
        let outcome = library.save("Intro", default_kit(), 160, Some(0)).unwrap();
        assert_eq!(outcome, SaveOutcome::Updated);
        assert_eq!(library.len(), 1);
        assert_eq!(library.get(0).unwrap().bpm, 160);
    }

    #[test]
    fn test_editing_save_replaces_in_place() {
        let mut library = library();
        library.save("First", default_kit(), 100, None).unwrap();
        library.save("Second", default_kit(), 110, None).unwrap();
        library.save("Third", default_kit(), 120, None).unwrap();

        library.save("Renamed", default_kit(), 90, Some(1)).unwrap();

        assert_eq!(library.len(), 3);
        let titles: Vec<_> = library.songs().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["First", "Renamed", "Third"]);
    }

    #[test]
    fn test_editing_against_other_title_still_duplicate() {
        let mut library = library();
        library.save("First", default_kit(), 100, None).unwrap();
        library.save("Second", default_kit(), 110, None).unwrap();

        // Renaming the song at index 1 to index 0's title must fail
        let err = library
            .save("First", default_kit(), 110, Some(1))
            .unwrap_err();
        assert!(matches!(err, LibraryError::DuplicateTitle(_)));
    }

    #[test]
    fn test_update_keeps_created_stamp() {
        let mut library = library();
        library.save("Intro", default_kit(), 100, None).unwrap();
        let created = library.get(0).unwrap().created.clone();

        library.save("Intro", default_kit(), 120, Some(0)).unwrap();
        assert_eq!(library.get(0).unwrap().created, created);
    }

    #[test]
    fn test_delete_preserves_order() {
        let mut library = library();
        for (title, bpm) in [("A", 100), ("B", 110), ("C", 120), ("D", 130)] {
            library.save(title, default_kit(), bpm, None).unwrap();
        }

        let removed = library.delete(1).unwrap();
        assert_eq!(removed.title, "B");

        let titles: Vec<_> = library.songs().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["A", "C", "D"]);
    }

    #[test]
    fn test_delete_persists() {
        let mut library = library();
        library.save("A", default_kit(), 100, None).unwrap();
        library.save("B", default_kit(), 110, None).unwrap();
        library.delete(0).unwrap();

        let stored = library.store.get(STORAGE_KEY).unwrap();
        let reloaded: Vec<Song> = serde_json::from_str(&stored).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].title, "B");
    }

    #[test]
    fn test_stale_editing_index_appends() {
        let mut library = library();
        library.save("Only", default_kit(), 100, None).unwrap();

        // An editing index past the end (e.g. after an external delete)
        // falls back to appending rather than panicking
        let outcome = library.save("New", default_kit(), 100, Some(5)).unwrap();
        assert_eq!(outcome, SaveOutcome::Created);
        assert_eq!(library.len(), 2);
    }
}
