//! Core data model for the sonify data-sonification engine.
//!
//! This crate defines the types shared between the control surface,
//! the playback controller, and the realtime engine: scales,
//! oscillator kinds, notes, data series, and the engine configuration.
//!
//! Designed to be `no_std` compatible with the `alloc` crate.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod error;
mod note;
mod oscillator;
mod params;
mod scale;
mod series;

pub use error::ConfigError;
pub use note::Note;
pub use oscillator::Oscillator;
pub use params::{
    EngineParams, MAX_BPM, MAX_LEVEL, MAX_MIDI_PITCH, MIN_BPM, MIN_LEVEL, MIN_MIDI_PITCH,
};
pub use scale::{Scale, NUM_PITCH_CLASSES};
pub use series::Series;
