//! Configuration error type.

use core::fmt;

/// A configuration problem that prevents a play session from starting.
///
/// Reported synchronously to the control context when the offending
/// parameter is applied or when `start()` is invoked; the controller
/// stays idle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// Tempo of 0 would divide by zero when deriving note durations.
    ZeroTempo,
    /// Tempo above the accepted limit.
    TempoOutOfRange(u16),
    /// Destination pitch range is inverted or exceeds the MIDI range.
    InvalidPitchRange { min: u8, max: u8 },
    /// Output gain outside [0, 1].
    LevelOutOfRange(f64),
    /// The amount range has zero width; the affine mapping is undefined.
    DegenerateAmountRange,
    /// The selected series has no amounts to play.
    EmptySeries,
    /// No oscillator selected; playback stays disabled.
    NoOscillator,
    /// A pitch fell outside the built frequency-table range.
    PitchOutOfRange(u8),
    /// Parameter change while a session is playing; controls are locked
    /// until the controller returns to idle.
    PlaybackActive,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroTempo => write!(f, "tempo must be greater than zero"),
            ConfigError::TempoOutOfRange(bpm) => write!(f, "tempo {} bpm out of range", bpm),
            ConfigError::InvalidPitchRange { min, max } => {
                write!(f, "invalid pitch range: {}..={}", min, max)
            }
            ConfigError::LevelOutOfRange(level) => {
                write!(f, "level {} outside [0, 1]", level)
            }
            ConfigError::DegenerateAmountRange => {
                write!(f, "amount range has zero width")
            }
            ConfigError::EmptySeries => write!(f, "series has no amounts"),
            ConfigError::NoOscillator => write!(f, "no oscillator selected"),
            ConfigError::PitchOutOfRange(pitch) => {
                write!(f, "pitch {} outside the frequency table range", pitch)
            }
            ConfigError::PlaybackActive => {
                write!(f, "parameters are locked while playing")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
