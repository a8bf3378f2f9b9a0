//! Headless playback controller for the sonify data-sonification engine.
//!
//! Owns the selected data series and the engine parameters, validates
//! configuration, and manages the audio thread for realtime playback.
//! The control surface talks to it through [`Command`]s; the render side
//! is reached only through the one-shot queue handoff at session start
//! and a pair of atomics afterwards.

mod command;

use sf_audio::{AudioOutput, CpalOutput};
use sf_engine::{sequence, Engine};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

pub use command::{Command, CommandBus};
// Re-export common types so callers don't need sf-ir/sf-engine directly.
pub use sf_ir::{ConfigError, EngineParams, Oscillator, Scale, Series};

/// Playback controller — a small Idle ↔ Playing state machine.
///
/// While Playing, every parameter-mutating command is rejected with
/// [`ConfigError::PlaybackActive`]; controls unlock when the controller
/// returns to Idle (by manual stop or queue exhaustion — the two are
/// observably identical).
pub struct Controller {
    series: Series,
    params: EngineParams,
    playback: Option<PlaybackHandle>,
}

struct PlaybackHandle {
    stop_signal: Arc<AtomicBool>,
    note_index: Arc<AtomicU64>,
    finished: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl Controller {
    pub fn new() -> Self {
        Self {
            series: Series::default(),
            params: EngineParams::default(),
            playback: None,
        }
    }

    // --- Series and parameters ---

    pub fn series(&self) -> &Series {
        &self.series
    }

    /// Select the series to sonify. Rejected while a session is playing.
    pub fn set_series(&mut self, series: Series) -> Result<(), ConfigError> {
        if self.is_playing() {
            return Err(ConfigError::PlaybackActive);
        }
        self.series = series;
        Ok(())
    }

    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    /// Apply one control-surface command.
    ///
    /// Parameter changes validate the resulting configuration before
    /// committing it, so a bad value is reported when it is set, not at
    /// `start()`. `Play` while already playing is a no-op.
    pub fn apply(&mut self, command: Command) -> Result<(), ConfigError> {
        match command {
            Command::Play => self.start(),
            Command::Stop => {
                self.stop();
                Ok(())
            }
            _ if self.is_playing() => Err(ConfigError::PlaybackActive),
            Command::SetLevel(level) => self.update_params(|p| p.level = level),
            Command::SetPitchRange(min, max) => self.update_params(|p| {
                p.min_pitch = min;
                p.max_pitch = max;
            }),
            Command::SetTempo(bpm) => self.update_params(|p| p.tempo_bpm = bpm),
            Command::SetOscillator(oscillator) => {
                self.update_params(|p| p.oscillator = oscillator)
            }
            Command::SetScale(scale) => self.update_params(|p| p.scale = scale),
        }
    }

    /// Drain pending commands from the bus, stopping at the first
    /// configuration error. Returns the number of commands applied.
    pub fn process_commands(
        &mut self,
        bus: &CommandBus,
        max_commands: usize,
    ) -> Result<usize, ConfigError> {
        let mut count = 0;
        while count < max_commands {
            let Ok(command) = bus.try_receive() else {
                break;
            };
            self.apply(command)?;
            count += 1;
        }
        Ok(count)
    }

    fn update_params(&mut self, f: impl FnOnce(&mut EngineParams)) -> Result<(), ConfigError> {
        let mut next = self.params;
        f(&mut next);
        next.validate()?;
        self.params = next;
        Ok(())
    }

    // --- Real-time playback ---

    /// Start a play session on the audio device.
    ///
    /// Validates the full configuration and the amount range, builds
    /// nothing on failure, and leaves the controller Idle. Calling
    /// `start` while already Playing is a no-op.
    pub fn start(&mut self) -> Result<(), ConfigError> {
        if self.is_playing() {
            return Ok(());
        }
        self.stop(); // reap a finished session's thread handle

        let (amounts, min_amount, max_amount) = self.session_amounts()?;
        let params = self.params;

        let stop_signal = Arc::new(AtomicBool::new(false));
        let note_index = Arc::new(AtomicU64::new(0));
        let finished = Arc::new(AtomicBool::new(false));

        let stop = stop_signal.clone();
        let index = note_index.clone();
        let done = finished.clone();

        let thread = std::thread::spawn(move || {
            audio_thread(params, amounts, min_amount, max_amount, stop, index, done);
        });

        self.playback = Some(PlaybackHandle {
            stop_signal,
            note_index,
            finished,
            thread: Some(thread),
        });
        Ok(())
    }

    /// Stop playback at any time; silence is produced no later than the
    /// device's next callback.
    pub fn stop(&mut self) {
        if let Some(mut pb) = self.playback.take() {
            pb.stop_signal.store(true, Ordering::Relaxed);
            if let Some(handle) = pb.thread.take() {
                let _ = handle.join();
            }
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playback
            .as_ref()
            .is_some_and(|p| !p.finished.load(Ordering::Relaxed))
    }

    pub fn is_finished(&self) -> bool {
        self.playback
            .as_ref()
            .is_some_and(|p| p.finished.load(Ordering::Relaxed))
    }

    /// Index of the currently sounding note, for position display.
    pub fn position(&self) -> Option<usize> {
        let pb = self.playback.as_ref()?;
        if pb.finished.load(Ordering::Relaxed) {
            return None;
        }
        Some(pb.note_index.load(Ordering::Relaxed) as usize)
    }

    // --- Offline rendering ---

    /// Render a whole session to an in-memory sample buffer, without an
    /// audio device. Same validation as [`start`](Self::start).
    pub fn render_frames(
        &self,
        sample_rate: u32,
        max_frames: usize,
    ) -> Result<Vec<f32>, ConfigError> {
        let (amounts, min_amount, max_amount) = self.session_amounts()?;
        let queue =
            sequence::build_notes(&amounts, min_amount, max_amount, &self.params, sample_rate)?;

        let mut engine = Engine::new(&self.params, sample_rate)?;
        engine.load(queue)?;
        engine.play();

        let mut frames = Vec::with_capacity(max_frames);
        while engine.is_playing() && frames.len() < max_frames {
            frames.push(engine.render_frame());
        }
        Ok(frames)
    }

    /// Resolve the series and validate everything a session needs.
    fn session_amounts(&self) -> Result<(Vec<f64>, f64, f64), ConfigError> {
        self.params.validate()?;
        if self.params.oscillator == Oscillator::None {
            return Err(ConfigError::NoOscillator);
        }
        let amounts = self.series.resolve();
        let (min_amount, max_amount) =
            sequence::amount_range(&amounts).ok_or(ConfigError::EmptySeries)?;
        if max_amount == min_amount {
            return Err(ConfigError::DegenerateAmountRange);
        }
        Ok((amounts, min_amount, max_amount))
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.stop();
    }
}

fn audio_thread(
    params: EngineParams,
    amounts: Vec<f64>,
    min_amount: f64,
    max_amount: f64,
    stop_signal: Arc<AtomicBool>,
    note_index: Arc<AtomicU64>,
    finished: Arc<AtomicBool>,
) {
    let Ok((mut output, consumer)) = CpalOutput::new() else {
        finished.store(true, Ordering::Relaxed);
        return;
    };

    let sample_rate = output.sample_rate();
    let session = sequence::build_notes(&amounts, min_amount, max_amount, &params, sample_rate)
        .and_then(|queue| {
            let mut engine = Engine::new(&params, sample_rate)?;
            engine.load(queue)?;
            Ok(engine)
        });
    let Ok(mut engine) = session else {
        finished.store(true, Ordering::Relaxed);
        return;
    };
    engine.play();

    if output.build_stream(consumer).is_err() {
        finished.store(true, Ordering::Relaxed);
        return;
    }
    let _ = output.start();

    run_session(&mut output, &mut engine, &stop_signal, &note_index);

    finished.store(true, Ordering::Relaxed);
}

/// Feed rendered samples to the output until the queue plays out or a
/// stop is requested.
///
/// A manual stop silences the output immediately: `stop()` clears the
/// backend's running flag and the device callback zero-fills from its
/// next invocation, so samples still queued in the transport buffer are
/// never heard. Only when the queue exhausts on its own is a silent tail
/// written first, letting the buffered end of the session reach the
/// device before teardown.
fn run_session<O: AudioOutput>(
    output: &mut O,
    engine: &mut Engine,
    stop_signal: &AtomicBool,
    note_index: &AtomicU64,
) {
    let sample_rate = output.sample_rate();
    let index_interval = (sample_rate / 100).max(1) as u64;
    let mut frame_count: u64 = 0;

    while engine.is_playing() && !stop_signal.load(Ordering::Relaxed) {
        if output.write(&[engine.render_frame()]).is_err() {
            break;
        }
        frame_count += 1;
        if frame_count % index_interval == 0 {
            note_index.store(engine.position() as u64, Ordering::Relaxed);
        }
    }

    if !stop_signal.load(Ordering::Relaxed) {
        let silence = [0.0f32; 64];
        let mut remaining = sample_rate as usize / 10;
        while remaining > 0 {
            let count = remaining.min(silence.len());
            if output.write(&silence[..count]).is_err() {
                break;
            }
            remaining -= count;
        }
    }
    let _ = output.stop();
}
