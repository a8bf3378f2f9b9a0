//! Scheduled note type.

/// A scheduled (pitch, duration) unit of playback.
///
/// Created by the sequence builder with a fixed duration; during
/// playback the scheduler decrements `remaining` once per rendered
/// sample and drops the note when it reaches zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Note {
    /// MIDI note number (0-127).
    pub pitch: u8,
    /// Samples left to sound.
    pub remaining: u32,
}

impl Note {
    /// Create a note with the given duration in samples.
    pub const fn new(pitch: u8, duration_in_samples: u32) -> Self {
        Self {
            pitch,
            remaining: duration_in_samples,
        }
    }
}
