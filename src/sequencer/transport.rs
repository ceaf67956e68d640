// Transport - Playback control and the step clock
//
// The transport is a two-state machine (Stopped/Running). While Running it
// owns a clock thread that fires one tick per step period: the tick triggers
// every armed track at the cursor position, then advances the cursor modulo
// the grid size. Stopping cancels the pending tick synchronously and joins
// the thread; the cursor keeps its position so playback resumes where it
// left off.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use super::grid::GRID_SIZE;
use crate::messaging::command::ToneParams;
use crate::session::Session;

/// How long each triggered step tone rings, in seconds
pub const STEP_TONE_DURATION: f32 = 0.1;

/// Transport state (play/stop)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportState {
    #[default]
    Stopped,
    Running,
}

impl TransportState {
    pub fn is_running(&self) -> bool {
        matches!(self, TransportState::Running)
    }
}

/// Outbound seam to whatever renders tones. Fire-and-forget: the transport
/// consumes no error channel from its sink.
pub trait ToneSink: Send {
    fn trigger(&mut self, tone: ToneParams);
}

/// Shared transport state
/// Thread-safe via atomics so observers can read without locking
#[derive(Debug)]
pub struct SharedTransportState {
    running: AtomicBool,
    cursor: AtomicUsize,
}

impl SharedTransportState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            running: AtomicBool::new(false),
            cursor: AtomicUsize::new(0),
        })
    }

    pub fn state(&self) -> TransportState {
        if self.running.load(Ordering::Relaxed) {
            TransportState::Running
        } else {
            TransportState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::Relaxed);
    }

    /// Current step cursor (0..GRID_SIZE)
    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }

    pub fn set_cursor(&self, step: usize) {
        debug_assert!(step < GRID_SIZE);
        self.cursor.store(step, Ordering::Relaxed);
    }

    /// Advance the cursor one step, wrapping at the end of the grid.
    /// Returns the new position.
    pub fn advance_cursor(&self) -> usize {
        let next = (self.cursor.load(Ordering::Relaxed) + 1) % GRID_SIZE;
        self.cursor.store(next, Ordering::Relaxed);
        next
    }
}

/// One playback pass at the current cursor, then one cursor advance.
/// A poisoned lock skips the trigger pass; the cursor still advances so the
/// grid position stays honest.
fn run_tick<S: ToneSink>(
    shared: &SharedTransportState,
    session: &Mutex<Session>,
    sink: &Mutex<S>,
) {
    let step = shared.cursor();

    if let (Ok(session), Ok(mut sink)) = (session.lock(), sink.lock()) {
        for track in session.tracks.iter().filter(|t| t.steps[step]) {
            sink.trigger(ToneParams {
                frequency: track.frequency,
                waveform: track.waveform,
                duration: STEP_TONE_DURATION,
                volume: session.volume,
            });
        }
    }

    shared.advance_cursor();
}

enum ClockCtrl {
    /// Replace the step period and restart the countdown to the next tick
    Retime(Duration),
    Cancel,
}

/// Cancellable repeating step timer. Owns the thread that drives ticks.
struct StepClock {
    ctrl: Sender<ClockCtrl>,
    handle: JoinHandle<()>,
}

impl StepClock {
    fn spawn<S: ToneSink + 'static>(
        period: Duration,
        shared: Arc<SharedTransportState>,
        session: Arc<Mutex<Session>>,
        sink: Arc<Mutex<S>>,
    ) -> Self {
        let (ctrl_tx, ctrl_rx) = mpsc::channel();
        let handle =
            std::thread::spawn(move || clock_loop(period, ctrl_rx, shared, session, sink));
        Self {
            ctrl: ctrl_tx,
            handle,
        }
    }

    fn retime(&self, period: Duration) {
        let _ = self.ctrl.send(ClockCtrl::Retime(period));
    }

    /// Cancel the pending tick and wait for the thread to exit. After this
    /// returns no further tick can fire.
    fn cancel(self) {
        let _ = self.ctrl.send(ClockCtrl::Cancel);
        let _ = self.handle.join();
    }
}

fn clock_loop<S: ToneSink>(
    mut period: Duration,
    ctrl: Receiver<ClockCtrl>,
    shared: Arc<SharedTransportState>,
    session: Arc<Mutex<Session>>,
    sink: Arc<Mutex<S>>,
) {
    // The first tick fires immediately so the step under the cursor sounds
    // the moment playback starts.
    let mut next_tick = Instant::now();

    loop {
        let now = Instant::now();
        if now >= next_tick {
            run_tick(&shared, &session, &sink);
            next_tick += period;
            continue;
        }

        match ctrl.recv_timeout(next_tick - now) {
            Ok(ClockCtrl::Retime(new_period)) => {
                period = new_period;
                next_tick = Instant::now() + period;
            }
            Ok(ClockCtrl::Cancel) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }
    }
}

/// Transport controller
/// Owns the clock thread while Running and the seam to the tone sink
pub struct Transport<S: ToneSink> {
    shared: Arc<SharedTransportState>,
    session: Arc<Mutex<Session>>,
    sink: Arc<Mutex<S>>,
    clock: Option<StepClock>,
}

impl<S: ToneSink + 'static> Transport<S> {
    pub fn new(session: Arc<Mutex<Session>>, sink: S) -> Self {
        Self {
            shared: SharedTransportState::new(),
            session,
            sink: Arc::new(Mutex::new(sink)),
            clock: None,
        }
    }

    /// Get shared state (for observers: UI playhead, tests)
    pub fn shared_state(&self) -> Arc<SharedTransportState> {
        Arc::clone(&self.shared)
    }

    pub fn state(&self) -> TransportState {
        self.shared.state()
    }

    pub fn cursor(&self) -> usize {
        self.shared.cursor()
    }

    /// Stopped → Running. The step period is computed fresh from the session
    /// tempo; the cursor keeps whatever position the last stop left behind.
    pub fn start(&mut self) {
        if self.shared.is_running() {
            return;
        }

        let period = self.step_interval();
        self.shared.set_running(true);
        self.clock = Some(StepClock::spawn(
            period,
            Arc::clone(&self.shared),
            Arc::clone(&self.session),
            Arc::clone(&self.sink),
        ));
    }

    /// Running → Stopped. Joins the clock thread: no tick can fire after
    /// this returns. The cursor is preserved, not reset.
    pub fn stop(&mut self) {
        if let Some(clock) = self.clock.take() {
            clock.cancel();
        }
        self.shared.set_running(false);
    }

    /// Single play/stop toggle control. Returns the state after the switch.
    pub fn toggle(&mut self) -> TransportState {
        if self.shared.is_running() {
            self.stop();
        } else {
            self.start();
        }
        self.state()
    }

    /// Re-arm the clock with the current session tempo. Called after any
    /// tempo change; a stopped transport picks the new period up on the next
    /// start anyway.
    pub fn rearm(&mut self) {
        if let Some(clock) = &self.clock {
            clock.retime(self.step_interval());
        }
    }

    fn step_interval(&self) -> Duration {
        self.session
            .lock()
            .map(|s| s.tempo.step_interval())
            .unwrap_or_else(|_| crate::sequencer::tempo::Tempo::default().step_interval())
    }
}

impl<S: ToneSink> Drop for Transport<S> {
    fn drop(&mut self) {
        if let Some(clock) = self.clock.take() {
            clock.cancel();
        }
    }
}
