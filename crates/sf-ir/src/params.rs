//! Engine configuration parameters.

use crate::error::ConfigError;
use crate::oscillator::Oscillator;
use crate::scale::Scale;

/// Lowest MIDI note number.
pub const MIN_MIDI_PITCH: u8 = 0;
/// Highest MIDI note number.
pub const MAX_MIDI_PITCH: u8 = 127;
/// Lowest accepted tempo. 0 itself never validates — it would divide by
/// zero when computing note durations.
pub const MIN_BPM: u16 = 0;
/// Highest accepted tempo.
pub const MAX_BPM: u16 = 999;
/// Minimum output gain.
pub const MIN_LEVEL: f64 = 0.0;
/// Maximum output gain.
pub const MAX_LEVEL: f64 = 1.0;

/// The full parameter set a play session is started with.
///
/// The control surface mutates a `EngineParams` value freely while the
/// controller is idle; at `start()` it is validated and becomes immutable
/// for the whole session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineParams {
    /// Output gain in [0, 1], applied uniformly to every sample.
    pub level: f64,
    /// Low end of the destination pitch range.
    pub min_pitch: u8,
    /// High end of the destination pitch range.
    pub max_pitch: u8,
    /// Notes per minute.
    pub tempo_bpm: u16,
    pub oscillator: Oscillator,
    pub scale: Scale,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            level: 0.5,
            min_pitch: 48,
            max_pitch: 72,
            tempo_bpm: 120,
            oscillator: Oscillator::None,
            scale: Scale::Chromatic,
        }
    }
}

impl EngineParams {
    /// Check every range constraint.
    ///
    /// A zero tempo is reported separately from an out-of-range one so the
    /// control surface can distinguish "never valid" from "slider limit".
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tempo_bpm == 0 {
            return Err(ConfigError::ZeroTempo);
        }
        if self.tempo_bpm > MAX_BPM {
            return Err(ConfigError::TempoOutOfRange(self.tempo_bpm));
        }
        if self.min_pitch > self.max_pitch || self.max_pitch > MAX_MIDI_PITCH {
            return Err(ConfigError::InvalidPitchRange {
                min: self.min_pitch,
                max: self.max_pitch,
            });
        }
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.level) {
            return Err(ConfigError::LevelOutOfRange(self.level));
        }
        Ok(())
    }
}
