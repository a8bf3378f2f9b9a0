//! Realtime playback engine for the sonify data-sonification engine.
//!
//! Maps a numeric data series to quantized musical pitches, schedules
//! the resulting notes with sample-accurate durations, and renders the
//! waveform one sample at a time. Everything on the per-sample path is
//! allocation-free.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod engine;
mod frequency;
pub mod pitch;
mod scheduler;
pub mod sequence;
pub mod waveform;

pub use engine::Engine;
pub use frequency::{midi_to_frequency, FrequencyTable};
pub use scheduler::{NoteScheduler, SchedulerState};
pub use sequence::NoteQueue;
pub use waveform::{Phasor, WaveformGenerator};
