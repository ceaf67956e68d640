// Voice pool - Polyphony handling

use super::voice::Voice;
use crate::messaging::command::ToneParams;

const MAX_VOICES: usize = 16;

/// Fixed pool of pre-allocated voices. A trigger takes the first idle slot;
/// when every slot is busy the oldest tone is stolen, since it is the one
/// furthest down its decay ramp.
pub struct VoicePool {
    voices: [Voice; MAX_VOICES],
    /// Incremented on each trigger, used as stealing priority
    age_counter: u64,
}

impl VoicePool {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            voices: std::array::from_fn(|_| Voice::new(sample_rate)),
            age_counter: 0,
        }
    }

    pub fn trigger(&mut self, tone: &ToneParams) {
        self.age_counter = self.age_counter.wrapping_add(1);
        let age = self.age_counter;

        if let Some(voice) = self.voices.iter_mut().find(|v| !v.is_active()) {
            voice.start(tone, age);
            return;
        }

        let victim = self
            .voices
            .iter()
            .enumerate()
            .min_by_key(|(_, voice)| voice.age())
            .map(|(index, _)| index)
            .unwrap_or(0);
        self.voices[victim].start(tone, age);
    }

    /// Mix all active voices into one sample. The divisor leaves headroom so
    /// a full pool does not clip.
    pub fn next_sample(&mut self) -> f32 {
        self.voices.iter_mut().map(|v| v.next_sample()).sum::<f32>() / 4.0
    }

    pub fn active_voice_count(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }
}
