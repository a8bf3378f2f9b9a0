//! The per-session playback engine.

use alloc::vec::Vec;

use sf_ir::{ConfigError, EngineParams, Oscillator, MAX_MIDI_PITCH, MIN_MIDI_PITCH};

use crate::frequency::FrequencyTable;
use crate::scheduler::{NoteScheduler, SchedulerState};
use crate::sequence::NoteQueue;
use crate::waveform::WaveformGenerator;

/// Renders one play session: a loaded note queue, a waveform generator,
/// and the playing/idle flag the render callback observes.
///
/// An `Engine` is built and loaded in the control context; once playback
/// starts it is owned exclusively by the render context. Everything in
/// `render_frame` is allocation- and lock-free.
pub struct Engine {
    table: FrequencyTable,
    scheduler: NoteScheduler,
    generator: WaveformGenerator,
    oscillator: Oscillator,
    level: f64,
    playing: bool,
}

impl Engine {
    /// Create an engine for the given session parameters.
    ///
    /// The frequency table spans the full MIDI range: scale quantization
    /// rounds down and may land below `min_pitch`, and those pitches must
    /// still resolve.
    pub fn new(params: &EngineParams, sample_rate: u32) -> Result<Self, ConfigError> {
        params.validate()?;
        let table = FrequencyTable::build(MIN_MIDI_PITCH, MAX_MIDI_PITCH)?;
        Ok(Self {
            table,
            scheduler: NoteScheduler::new(sample_rate),
            generator: WaveformGenerator::default(),
            oscillator: params.oscillator,
            level: params.level,
            playing: false,
        })
    }

    /// Hand a fully built note queue to the engine. Control context only;
    /// no note is ever appended once playback has started.
    pub fn load(&mut self, queue: NoteQueue) -> Result<(), ConfigError> {
        self.scheduler.load(queue, &self.table)?;
        self.generator.reset();
        Ok(())
    }

    /// Begin rendering the loaded queue.
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Stop immediately and drop any remaining notes.
    pub fn stop(&mut self) {
        self.playing = false;
        self.scheduler.clear();
        self.generator.reset();
    }

    /// Generate one mono sample.
    ///
    /// Emits silence while idle. When the scheduler reports the sequence
    /// finished, the engine returns itself to idle — observably identical
    /// to a manual stop.
    pub fn render_frame(&mut self) -> f32 {
        if !self.playing {
            return 0.0;
        }
        if self.scheduler.state() == SchedulerState::Empty {
            self.playing = false;
            return 0.0;
        }
        let value =
            self.generator
                .next_sample(self.oscillator, self.scheduler.phase_delta(), self.level);
        if self.scheduler.tick(&self.table) {
            self.playing = false;
        }
        value as f32
    }

    /// Fill an interleaved buffer of `channels`-wide frames, writing the
    /// same mono sample to every channel of a frame.
    ///
    /// This is the render/audio-device boundary: the buffer is filled
    /// while playing and zero-filled from the point the session ends or
    /// the engine is idle.
    pub fn render_buffer(&mut self, data: &mut [f32], channels: usize) {
        for frame in data.chunks_mut(channels.max(1)) {
            let value = self.render_frame();
            for sample in frame.iter_mut() {
                *sample = value;
            }
        }
    }

    /// Render `count` mono samples into a fresh buffer (offline use only).
    pub fn render_frames(&mut self, count: usize) -> Vec<f32> {
        let mut frames = Vec::with_capacity(count);
        for _ in 0..count {
            frames.push(self.render_frame());
        }
        frames
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// True once the queue is exhausted (or was never loaded).
    pub fn is_finished(&self) -> bool {
        self.scheduler.state() == SchedulerState::Empty
    }

    /// Index of the currently sounding note.
    pub fn position(&self) -> usize {
        self.scheduler.position()
    }

    /// Frequency of the currently sounding note, in Hz.
    pub fn frequency(&self) -> f64 {
        self.scheduler.frequency()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_ir::{Note, Scale};

    fn engine(oscillator: Oscillator, level: f64) -> Engine {
        let params = EngineParams {
            level,
            oscillator,
            scale: Scale::Chromatic,
            ..Default::default()
        };
        Engine::new(&params, 48000).unwrap()
    }

    fn queue(notes: &[(u8, u32)]) -> NoteQueue {
        let mut queue = NoteQueue::new();
        for &(pitch, duration) in notes {
            queue.push(Note::new(pitch, duration));
        }
        queue
    }

    #[test]
    fn idle_engine_renders_silence() {
        let mut engine = engine(Oscillator::Square, 1.0);
        for _ in 0..64 {
            assert_eq!(engine.render_frame(), 0.0);
        }
    }

    #[test]
    fn output_bounded_by_level() {
        let level = 0.3;
        for oscillator in [
            Oscillator::Sine,
            Oscillator::Square,
            Oscillator::Triangle,
            Oscillator::Saw,
        ] {
            let mut engine = engine(oscillator, level);
            engine.load(queue(&[(60, 512), (72, 512)])).unwrap();
            engine.play();
            for _ in 0..1024 {
                let value = engine.render_frame();
                assert!(value.abs() <= level as f32 + 1e-6);
            }
        }
    }

    #[test]
    fn playback_ends_after_total_duration() {
        let mut engine = engine(Oscillator::Saw, 1.0);
        engine.load(queue(&[(60, 4), (62, 2)])).unwrap();
        engine.play();

        for _ in 0..6 {
            assert!(engine.is_playing());
            engine.render_frame();
        }
        assert!(!engine.is_playing());
        assert!(engine.is_finished());
        assert_eq!(engine.render_frame(), 0.0);
    }

    #[test]
    fn buffer_goes_silent_after_sequence_ends() {
        let mut engine = engine(Oscillator::Square, 1.0);
        engine.load(queue(&[(60, 3)])).unwrap();
        engine.play();

        let mut data = [1.0f32; 16];
        engine.render_buffer(&mut data, 2);
        // 3 samples × 2 channels of signal, then zeros to the end.
        for &sample in &data[..6] {
            assert_eq!(sample.abs(), 1.0);
        }
        for &sample in &data[6..] {
            assert_eq!(sample, 0.0);
        }
    }

    #[test]
    fn every_channel_gets_the_same_sample() {
        let mut engine = engine(Oscillator::Saw, 0.7);
        engine.load(queue(&[(69, 256)])).unwrap();
        engine.play();

        let mut data = [0.0f32; 32];
        engine.render_buffer(&mut data, 4);
        for frame in data.chunks(4) {
            for &sample in frame {
                assert_eq!(sample, frame[0]);
            }
        }
    }

    #[test]
    fn stop_clears_queue_and_silences() {
        let mut engine = engine(Oscillator::Sine, 1.0);
        engine.load(queue(&[(60, 48000)])).unwrap();
        engine.play();
        engine.render_frame();
        engine.stop();
        assert!(!engine.is_playing());
        assert!(engine.is_finished());
        assert_eq!(engine.render_frame(), 0.0);
    }

    #[test]
    fn play_without_queue_finishes_immediately() {
        let mut engine = engine(Oscillator::Sine, 1.0);
        engine.play();
        assert_eq!(engine.render_frame(), 0.0);
        assert!(!engine.is_playing());
    }

    #[test]
    fn play_while_playing_does_not_restart() {
        let mut engine = engine(Oscillator::Saw, 1.0);
        engine.load(queue(&[(60, 4), (62, 4)])).unwrap();
        engine.play();
        for _ in 0..4 {
            engine.render_frame();
        }
        assert_eq!(engine.position(), 1);
        let frequency = engine.frequency();

        // A second play mid-session leaves the queue and tuning alone.
        engine.play();
        assert!(engine.is_playing());
        assert_eq!(engine.position(), 1);
        assert_eq!(engine.frequency(), frequency);

        // The remainder of the queue plays out unchanged.
        for _ in 0..4 {
            engine.render_frame();
        }
        assert!(!engine.is_playing());
        assert!(engine.is_finished());
    }

    #[test]
    fn position_tracks_current_note() {
        let mut engine = engine(Oscillator::Saw, 1.0);
        engine.load(queue(&[(60, 4), (62, 4)])).unwrap();
        engine.play();
        assert_eq!(engine.position(), 0);
        for _ in 0..4 {
            engine.render_frame();
        }
        assert_eq!(engine.position(), 1);
    }

    #[test]
    fn invalid_params_are_rejected_at_construction() {
        let params = EngineParams {
            tempo_bpm: 0,
            ..Default::default()
        };
        assert!(matches!(
            Engine::new(&params, 48000),
            Err(ConfigError::ZeroTempo)
        ));
    }
}
