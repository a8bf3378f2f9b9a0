//! Note queue construction from a data series.

use alloc::vec::Vec;
use sf_ir::{ConfigError, EngineParams, Note};

use crate::pitch;

/// FIFO of scheduled notes for one play session.
///
/// Built entirely in the control context before playback starts, then
/// owned by the scheduler. During playback it is consumed via a cursor
/// that advances without removing elements, so the realtime path never
/// allocates or shifts memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoteQueue {
    notes: Vec<Note>,
    /// Index of the currently sounding note (advances during playback).
    cursor: usize,
}

impl NoteQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a note. Setup phase only — never called once playback starts.
    pub fn push(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// The currently sounding note.
    pub fn front(&self) -> Option<&Note> {
        self.notes.get(self.cursor)
    }

    pub fn front_mut(&mut self) -> Option<&mut Note> {
        self.notes.get_mut(self.cursor)
    }

    /// Drop the front note by advancing the cursor (no deallocation).
    pub fn advance(&mut self) {
        if self.cursor < self.notes.len() {
            self.cursor += 1;
        }
    }

    /// Index of the currently sounding note; equals `len()` once exhausted.
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.notes.len()
    }

    /// Total number of notes, including already-played ones.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn clear(&mut self) {
        self.notes.clear();
        self.cursor = 0;
    }
}

/// Minimum and maximum over a resolved amount sequence, in a single pass.
///
/// Returns `None` for an empty sequence. The range used for mapping must
/// come from the same sequence that is later mapped, so the pitch spread
/// always reflects the actual data.
pub fn amount_range(amounts: &[f64]) -> Option<(f64, f64)> {
    let mut iter = amounts.iter().copied();
    let first = iter.next()?;
    let mut min = first;
    let mut max = first;
    for amount in iter {
        if amount < min {
            min = amount;
        }
        if amount > max {
            max = amount;
        }
    }
    Some((min, max))
}

/// Samples per note at the given tempo: `ceil(sample_rate / (bpm / 60))`.
///
/// Integer ceiling, identical for every note of a session (tempo is
/// constant across a single play session).
pub fn note_duration_samples(tempo_bpm: u16, sample_rate: u32) -> Result<u32, ConfigError> {
    if tempo_bpm == 0 {
        return Err(ConfigError::ZeroTempo);
    }
    let numer = sample_rate as u64 * 60;
    let bpm = tempo_bpm as u64;
    Ok(((numer + bpm - 1) / bpm) as u32)
}

/// Build the note queue for a play session.
///
/// Every amount (in input order) is affine-mapped into the destination
/// pitch range and quantized onto the scale; output order preserves input
/// order and determines playback order. `min_amount`/`max_amount` must
/// span the actual data (see [`amount_range`]); a zero-width span is a
/// configuration error rather than a silent NaN.
pub fn build_notes(
    amounts: &[f64],
    min_amount: f64,
    max_amount: f64,
    params: &EngineParams,
    sample_rate: u32,
) -> Result<NoteQueue, ConfigError> {
    params.validate()?;
    if amounts.is_empty() {
        return Err(ConfigError::EmptySeries);
    }
    if max_amount == min_amount {
        return Err(ConfigError::DegenerateAmountRange);
    }
    let duration = note_duration_samples(params.tempo_bpm, sample_rate)?;

    let mut queue = NoteQueue::new();
    for &amount in amounts {
        let mapped = pitch::map_amount(
            amount,
            min_amount,
            max_amount,
            params.min_pitch as f64,
            params.max_pitch as f64,
        );
        let quantized = pitch::quantize(mapped, params.scale);
        queue.push(Note::new(quantized.clamp(0, 127) as u8, duration));
    }
    Ok(queue)
}
