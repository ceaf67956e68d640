// Session - Central mutable state of the board
//
// This is the working copy the user edits: it may diverge from any saved
// song until the next save or load. It is shared behind a mutex between the
// control surface and the clock thread; the transport's playing flag and
// cursor live in SharedTransportState instead, since they are written from
// the clock thread on every tick.

use crate::sequencer::grid::{GRID_SIZE, Track, default_kit};
use crate::sequencer::tempo::Tempo;

pub const DEFAULT_VOLUME: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct Session {
    /// Working copy of the instrument lanes
    pub tracks: Vec<Track>,
    pub tempo: Tempo,
    /// Master volume (0.0 to 1.0), passed to the sink on every trigger
    pub volume: f32,
    /// Candidate title for the next save
    pub song_title: String,
    /// Index of the saved song currently open for editing, None when the
    /// grid holds new/unsaved work
    pub editing: Option<usize>,
}

impl Session {
    /// Fresh session seeded with the default kit, all steps off
    pub fn new() -> Self {
        Self {
            tracks: default_kit(),
            tempo: Tempo::default(),
            volume: DEFAULT_VOLUME,
            song_title: String::new(),
            editing: None,
        }
    }

    /// Flip one step flag. Indices outside the kit or the grid are a caller
    /// bug, not a user-reachable state.
    pub fn toggle_step(&mut self, track: usize, step: usize) {
        debug_assert!(track < self.tracks.len(), "track index out of range");
        debug_assert!(step < GRID_SIZE, "step index out of range");
        self.tracks[track].steps[step] = !self.tracks[track].steps[step];
    }

    /// Reset every step of every track and leave any edit session
    pub fn clear_grid(&mut self) {
        for track in &mut self.tracks {
            track.clear();
        }
        self.editing = None;
        self.song_title.clear();
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
