// Tempo - beats per minute and the step period derived from it

use std::fmt;
use std::time::Duration;

/// Slowest tempo the board accepts
pub const MIN_BPM: u32 = 60;
/// Fastest tempo the board accepts
pub const MAX_BPM: u32 = 300;

/// Tempo in BPM (Beats Per Minute). One grid step lasts one beat, so the
/// step period is 60,000 / bpm milliseconds. Values outside
/// [`MIN_BPM`, `MAX_BPM`] are clamped; the UI slider enforces the same range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Tempo {
    bpm: u32,
}

impl Tempo {
    pub fn new(bpm: u32) -> Self {
        Self {
            bpm: bpm.clamp(MIN_BPM, MAX_BPM),
        }
    }

    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    pub fn set_bpm(&mut self, bpm: u32) {
        self.bpm = bpm.clamp(MIN_BPM, MAX_BPM);
    }

    /// Interval between grid steps at this tempo
    pub fn step_interval(&self) -> Duration {
        Duration::from_secs_f64(60.0 / self.bpm as f64)
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self::new(120)
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} BPM", self.bpm)
    }
}
