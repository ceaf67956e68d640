// Soundboard - top-level controller
//
// Owns the session, the transport and the song library. Every user-level
// operation goes through here: it mutates state, keeps the clock in step
// with tempo changes, and pushes one notification per user-visible event
// for the host shell to present.

use std::sync::{Arc, Mutex};

use ringbuf::traits::Producer;

use crate::library::manager::{LibraryError, SaveOutcome, SongLibrary};
use crate::library::storage::SongStore;
use crate::library::types::Song;
use crate::messaging::channels::NotificationProducer;
use crate::messaging::notification::{Notification, NotificationCategory};
use crate::sequencer::transport::{ToneSink, Transport, TransportState};
use crate::session::Session;

pub struct Soundboard<S: SongStore, T: ToneSink + 'static> {
    session: Arc<Mutex<Session>>,
    transport: Transport<T>,
    library: SongLibrary<S>,
    /// Shared with the audio engine's error callback
    notifications: Arc<Mutex<NotificationProducer>>,
}

impl<S: SongStore, T: ToneSink + 'static> Soundboard<S, T> {
    /// Build the board: a fresh session with the default kit, a stopped
    /// transport wired to `sink`, and the song collection read from `store`.
    pub fn new(store: S, sink: T, notifications: Arc<Mutex<NotificationProducer>>) -> Self {
        let session = Arc::new(Mutex::new(Session::new()));
        let transport = Transport::new(Arc::clone(&session), sink);

        Self {
            session,
            transport,
            library: SongLibrary::open(store),
            notifications,
        }
    }

    /// Shared session handle, for hosts that render the grid
    pub fn session(&self) -> Arc<Mutex<Session>> {
        Arc::clone(&self.session)
    }

    pub fn transport(&self) -> &Transport<T> {
        &self.transport
    }

    pub fn songs(&self) -> &[Song] {
        self.library.songs()
    }

    pub fn is_playing(&self) -> bool {
        self.transport.state().is_running()
    }

    /// Current step cursor, for playhead display
    pub fn cursor(&self) -> usize {
        self.transport.cursor()
    }

    fn notify(&mut self, notification: Notification) {
        // Fire-and-forget: a full ring buffer drops the notification
        if let Ok(mut tx) = self.notifications.lock() {
            let _ = tx.try_push(notification);
        }
    }

    fn session_mut(&self) -> std::sync::MutexGuard<'_, Session> {
        self.session.lock().expect("session lock poisoned")
    }

    // --- grid & playback -------------------------------------------------

    pub fn toggle_step(&mut self, track: usize, step: usize) {
        self.session_mut().toggle_step(track, step);
    }

    /// Single play/stop control. Announces the start; stopping is silent,
    /// matching the host shell's toast behavior.
    pub fn toggle_play(&mut self) -> TransportState {
        let state = self.transport.toggle();
        if state.is_running() {
            self.notify(Notification::info(
                NotificationCategory::Transport,
                "Playback started",
                "Click cells to create your beat pattern",
            ));
        }
        state
    }

    pub fn clear_grid(&mut self) {
        self.session_mut().clear_grid();
        self.notify(Notification::info(
            NotificationCategory::Grid,
            "Grid cleared",
            "All steps have been reset",
        ));
    }

    /// Change tempo. Takes effect immediately: a running clock is re-armed
    /// with the new period.
    pub fn set_bpm(&mut self, bpm: u32) {
        self.session_mut().tempo.set_bpm(bpm);
        self.transport.rearm();
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.session_mut().set_volume(volume);
    }

    pub fn set_song_title(&mut self, title: &str) {
        self.session_mut().song_title = title.to_string();
    }

    // --- song library ----------------------------------------------------

    /// Save the working copy under the candidate title. On success the edit
    /// session is closed and the title field cleared, ready for the next
    /// song; on a validation error nothing changes and the error is also
    /// surfaced as a notification.
    pub fn save_song(&mut self) -> Result<SaveOutcome, LibraryError> {
        let (title, tracks, bpm, editing) = {
            let session = self.session_mut();
            (
                session.song_title.clone(),
                session.tracks.clone(),
                session.tempo.bpm(),
                session.editing,
            )
        };

        match self.library.save(&title, tracks, bpm, editing) {
            Ok(outcome) => {
                let detail = match outcome {
                    SaveOutcome::Created => {
                        format!("\"{title}\" has been saved to your library")
                    }
                    SaveOutcome::Updated => format!("\"{title}\" has been updated"),
                };
                let headline = match outcome {
                    SaveOutcome::Created => "Song saved",
                    SaveOutcome::Updated => "Song updated",
                };
                self.notify(Notification::info(
                    NotificationCategory::Library,
                    headline,
                    detail,
                ));

                let mut session = self.session_mut();
                session.song_title.clear();
                session.editing = None;

                Ok(outcome)
            }
            Err(err) => {
                self.notify(Notification::error(
                    NotificationCategory::Library,
                    "Error",
                    err.to_string(),
                ));
                Err(err)
            }
        }
    }

    /// Replace the working copy with the song at `index` and open it for
    /// editing. The clock is re-armed in case the tempo changed mid-play.
    pub fn load_song(&mut self, index: usize) {
        let Some(song) = self.library.get(index).cloned() else {
            debug_assert!(false, "song index out of range");
            return;
        };

        {
            let mut session = self.session_mut();
            session.tracks = song.tracks;
            session.tempo.set_bpm(song.bpm);
            session.song_title = song.title.clone();
            session.editing = Some(index);
        }
        self.transport.rearm();

        self.notify(Notification::info(
            NotificationCategory::Library,
            "Song loaded",
            format!("\"{}\" has been loaded for editing", song.title),
        ));
    }

    /// Remove the song at `index`. Deleting the song open for editing closes
    /// the edit session (a later save becomes a new entry); deleting an
    /// earlier entry shifts the editing index down so it keeps tracking the
    /// same song.
    pub fn delete_song(&mut self, index: usize) -> Result<(), LibraryError> {
        let song = self.library.delete(index)?;

        {
            let mut session = self.session_mut();
            session.editing = match session.editing {
                Some(editing) if editing == index => None,
                Some(editing) if editing > index => Some(editing - 1),
                other => other,
            };
        }

        self.notify(Notification::info(
            NotificationCategory::Library,
            "Song deleted",
            format!("\"{}\" has been removed from your library", song.title),
        ));
        Ok(())
    }

    /// Stop playback and release the clock thread
    pub fn shutdown(mut self) {
        self.transport.stop();
    }
}
