//! Oscillator kinds.

/// The waveform an engine session renders with.
///
/// `None` is the startup state: the control surface keeps playback
/// disabled until a waveform has been chosen, and the generator emits
/// silence for it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Oscillator {
    #[default]
    None,
    Sine,
    Square,
    Triangle,
    Saw,
}
