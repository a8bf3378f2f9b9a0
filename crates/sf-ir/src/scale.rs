//! Musical scales for pitch quantization.

/// Number of pitch classes in an octave.
pub const NUM_PITCH_CLASSES: i32 = 12;

/// A pitch-class set used to quantize mapped pitches.
///
/// `Chromatic` admits every pitch class; the other scales own a fixed,
/// ordered subset of the twelve pitch classes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scale {
    #[default]
    Chromatic,
    Diatonic,
    Pentatonic,
    WholeTone,
}

impl Scale {
    /// The pitch classes admitted by this scale, or `None` for chromatic
    /// (where every pitch class is admitted).
    pub fn pitch_classes(self) -> Option<&'static [i32]> {
        match self {
            Scale::Chromatic => None,
            Scale::Diatonic => Some(&[0, 2, 4, 5, 7, 9, 11]),
            Scale::Pentatonic => Some(&[0, 2, 4, 7, 9]),
            Scale::WholeTone => Some(&[0, 2, 4, 6, 8, 10]),
        }
    }

    /// Does this scale admit the given pitch class?
    pub fn contains(self, pitch_class: i32) -> bool {
        match self.pitch_classes() {
            None => true,
            Some(set) => set.contains(&pitch_class),
        }
    }
}
