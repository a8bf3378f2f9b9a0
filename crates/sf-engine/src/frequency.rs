//! MIDI-pitch to frequency lookup.

use alloc::vec::Vec;
use sf_ir::{ConfigError, MAX_MIDI_PITCH};

/// Convert a MIDI note number to its 12-TET frequency in Hz.
///
/// A4 = MIDI 69 = 440 Hz.
pub fn midi_to_frequency(pitch: u8) -> f64 {
    440.0 * libm::pow(2.0, (pitch as f64 - 69.0) / 12.0)
}

/// Precomputed pitch → frequency lookup for a contiguous MIDI range.
///
/// Built once when the pitch range is fixed and immutable afterwards;
/// frequencies are strictly increasing in pitch. Rebuilding is only
/// needed if the pitch range configuration changes.
#[derive(Clone, Debug, PartialEq)]
pub struct FrequencyTable {
    min_pitch: u8,
    freqs: Vec<f64>,
}

impl FrequencyTable {
    /// Build the table for pitches in `min_pitch..=max_pitch`.
    pub fn build(min_pitch: u8, max_pitch: u8) -> Result<Self, ConfigError> {
        if min_pitch > max_pitch || max_pitch > MAX_MIDI_PITCH {
            return Err(ConfigError::InvalidPitchRange {
                min: min_pitch,
                max: max_pitch,
            });
        }
        let freqs = (min_pitch..=max_pitch).map(midi_to_frequency).collect();
        Ok(Self { min_pitch, freqs })
    }

    /// O(1) frequency lookup; fails for pitches outside the built range.
    pub fn lookup(&self, pitch: u8) -> Result<f64, ConfigError> {
        self.get(pitch).ok_or(ConfigError::PitchOutOfRange(pitch))
    }

    /// Infallible variant of [`lookup`](Self::lookup) for the render path.
    pub fn get(&self, pitch: u8) -> Option<f64> {
        let index = pitch.checked_sub(self.min_pitch)? as usize;
        self.freqs.get(index).copied()
    }

    pub fn min_pitch(&self) -> u8 {
        self.min_pitch
    }

    pub fn max_pitch(&self) -> u8 {
        self.min_pitch + (self.freqs.len() as u8 - 1)
    }
}
