// Edge case tests for the board's user-level operations
// Each test walks one scenario a user can actually reach from the shell

use std::sync::{Arc, Mutex};

use bitboard::{
    LibraryError, MemoryStore, SaveOutcome, Soundboard, ToneParams, ToneSink, Track, WaveformType,
    create_notification_channel,
};

struct NullSink;

impl ToneSink for NullSink {
    fn trigger(&mut self, _tone: ToneParams) {}
}

fn board() -> Soundboard<MemoryStore, NullSink> {
    let (tx, _rx) = create_notification_channel(64);
    Soundboard::new(MemoryStore::new(), NullSink, Arc::new(Mutex::new(tx)))
}

#[test]
fn test_save_then_duplicate_save() {
    // Saving "Intro" twice without editing: second save fails, one entry
    let mut board = board();
    board.set_song_title("Intro");
    board.set_bpm(100);
    assert_eq!(board.save_song().unwrap(), SaveOutcome::Created);
    assert_eq!(board.songs().len(), 1);

    board.set_song_title("Intro");
    let err = board.save_song().unwrap_err();
    assert!(matches!(err, LibraryError::DuplicateTitle(ref t) if t == "Intro"));
    assert_eq!(board.songs().len(), 1);
    assert_eq!(board.songs()[0].bpm, 100);
}

#[test]
fn test_blank_and_whitespace_titles() {
    let mut board = board();

    assert!(matches!(
        board.save_song().unwrap_err(),
        LibraryError::BlankTitle
    ));

    board.set_song_title("   \t ");
    assert!(matches!(
        board.save_song().unwrap_err(),
        LibraryError::BlankTitle
    ));

    assert!(board.songs().is_empty());
}

#[test]
fn test_delete_while_editing_then_save_creates_new_entry() {
    let mut board = board();
    board.set_song_title("Keeper");
    board.save_song().unwrap();
    board.set_song_title("Doomed");
    board.save_song().unwrap();

    board.load_song(1);
    board.delete_song(1).unwrap();
    assert_eq!(board.songs().len(), 1);

    // The edit session is closed, so saving again appends instead of
    // updating a removed entry
    board.set_song_title("Doomed");
    assert_eq!(board.save_song().unwrap(), SaveOutcome::Created);
    assert_eq!(board.songs().len(), 2);
}

#[test]
fn test_load_save_round_trip_keeps_collection_size() {
    let mut board = board();
    for title in ["A", "B", "C"] {
        board.set_song_title(title);
        board.save_song().unwrap();
    }

    board.load_song(1);
    board.toggle_step(0, 0);
    board.save_song().unwrap();

    assert_eq!(board.songs().len(), 3);
    assert!(board.songs()[1].tracks[0].steps[0]);
    assert!(!board.songs()[0].tracks[0].steps[0]);
}

#[test]
fn test_clear_grid_forgets_edit_session() {
    let mut board = board();
    board.set_song_title("Original");
    board.save_song().unwrap();

    board.load_song(0);
    board.clear_grid();

    // After a clear, saving under a fresh title is a new song
    board.set_song_title("After clear");
    assert_eq!(board.save_song().unwrap(), SaveOutcome::Created);
    assert_eq!(board.songs().len(), 2);
}

#[test]
fn test_rename_while_editing() {
    let mut board = board();
    board.set_song_title("Working title");
    board.save_song().unwrap();

    board.load_song(0);
    board.set_song_title("Final title");
    assert_eq!(board.save_song().unwrap(), SaveOutcome::Updated);

    assert_eq!(board.songs().len(), 1);
    assert_eq!(board.songs()[0].title, "Final title");
}

#[test]
fn test_load_replaces_working_copy_wholesale() {
    let mut board = board();
    board.toggle_step(0, 0);
    board.toggle_step(5, 9);
    board.set_song_title("Sparse");
    board.save_song().unwrap();

    // Scribble over the working copy, then load the snapshot back
    for step in 0..16 {
        board.toggle_step(2, step);
    }
    board.set_bpm(300);
    board.load_song(0);

    let session = board.session();
    let session = session.lock().unwrap();
    assert!(session.tracks[0].steps[0]);
    assert!(session.tracks[5].steps[9]);
    assert!(!session.tracks[2].steps[3], "loaded copy must replace edits");
    assert_eq!(session.tempo.bpm(), 120);
}

#[test]
fn test_bpm_clamped_at_bounds() {
    let mut board = board();
    board.set_bpm(10_000);
    board.set_song_title("Fast");
    board.save_song().unwrap();
    assert_eq!(board.songs()[0].bpm, 300);

    board.set_bpm(1);
    board.set_song_title("Slow");
    board.save_song().unwrap();
    assert_eq!(board.songs()[1].bpm, 60);
}

#[test]
fn test_two_track_song_round_trip() {
    // Songs are not tied to the default kit size
    let mut tracks = vec![
        Track::new(WaveformType::Sine, 440.0),
        Track::new(WaveformType::Square, 110.0),
    ];
    tracks[0].steps[0] = true;
    tracks[1].steps[15] = true;

    let (tx, _rx) = create_notification_channel(8);
    let mut board: Soundboard<MemoryStore, NullSink> =
        Soundboard::new(MemoryStore::new(), NullSink, Arc::new(Mutex::new(tx)));

    {
        let session = board.session();
        session.lock().unwrap().tracks = tracks;
    }
    board.set_song_title("Duo");
    board.set_bpm(100);
    board.save_song().unwrap();

    // Mutate, then restore from the snapshot
    board.toggle_step(0, 3);
    board.load_song(0);

    let session = board.session();
    let session = session.lock().unwrap();
    assert_eq!(session.tracks.len(), 2);
    assert!(session.tracks[0].steps[0]);
    assert!(!session.tracks[0].steps[3]);
    assert!(session.tracks[1].steps[15]);
}
