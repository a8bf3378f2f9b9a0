//! Amount-to-pitch mapping and scale quantization.

use sf_ir::{Scale, NUM_PITCH_CLASSES};

/// Affine rescale of `amount` from `[src_low, src_high]` into
/// `[dst_low, dst_high]`.
///
/// A zero-width source range is guarded: it yields the midpoint of the
/// destination range instead of dividing by zero. Callers reject
/// zero-width ranges as [`ConfigError::DegenerateAmountRange`] before a
/// session starts, so the guard is never reached during playback.
///
/// [`ConfigError::DegenerateAmountRange`]: sf_ir::ConfigError::DegenerateAmountRange
pub fn map_amount(amount: f64, src_low: f64, src_high: f64, dst_low: f64, dst_high: f64) -> f64 {
    let src_range = src_high - src_low;
    if src_range == 0.0 {
        return dst_low + (dst_high - dst_low) * 0.5;
    }
    dst_low + (dst_high - dst_low) * ((amount - src_low) / src_range)
}

/// Quantize a mapped pitch onto a scale.
///
/// Truncates to the nearest integer below, then walks down one semitone
/// at a time until the pitch class is admitted by the scale — ties always
/// round toward the lower pitch, never up. Chromatic returns the floor
/// unchanged. Terminates because every pitch-class set is non-empty and
/// contains 0, so the walk can never pass below MIDI note 0.
pub fn quantize(pitch: f64, scale: Scale) -> i32 {
    let mut note = libm::floor(pitch) as i32;
    if scale.pitch_classes().is_none() {
        return note;
    }
    while !scale.contains(note.rem_euclid(NUM_PITCH_CLASSES)) {
        note -= 1;
    }
    note
}
