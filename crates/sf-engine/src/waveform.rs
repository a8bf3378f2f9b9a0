//! Per-sample waveform generation.

use core::f64::consts::PI;

use sf_ir::Oscillator;

const TWO_PI: f64 = 2.0 * PI;

/// Periodic phase accumulator in [0, 1).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Phasor {
    phase: f64,
}

impl Phasor {
    /// Return the current phase, then advance by `delta` (wrapping mod 1).
    ///
    /// The pre-advance value is what the waveform functions sample;
    /// `delta` is `frequency / sample_rate` and must be recomputed by the
    /// scheduler whenever the frequency changes.
    pub fn advance(&mut self, delta: f64) -> f64 {
        let phase = self.phase;
        self.phase = libm::fmod(self.phase + delta, 1.0);
        phase
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

/// One waveform sample as a function of the pre-advance phase.
///
/// All outputs are bounded in `[-gain, +gain]`. `Oscillator::None`
/// produces silence.
pub fn sample(oscillator: Oscillator, phase: f64, gain: f64) -> f64 {
    match oscillator {
        Oscillator::None => 0.0,
        Oscillator::Sine => gain * libm::sin(TWO_PI * phase),
        Oscillator::Square => {
            if phase <= 0.5 {
                -gain
            } else {
                gain
            }
        }
        Oscillator::Triangle => {
            if phase <= 0.5 {
                // [0, 0.5] → [-1, 1]
                gain * (4.0 * phase - 1.0)
            } else {
                // (0.5, 1) → (1, -1)
                gain * (4.0 * (0.5 - phase) + 1.0)
            }
        }
        Oscillator::Saw => gain * (2.0 * phase - 1.0),
    }
}

/// Owns the phase accumulator for a play session.
///
/// Phase continuity across a note transition is not guaranteed; the
/// resulting minor discontinuity is accepted.
#[derive(Clone, Copy, Debug, Default)]
pub struct WaveformGenerator {
    phasor: Phasor,
}

impl WaveformGenerator {
    /// Produce one sample and advance the phase accumulator.
    pub fn next_sample(&mut self, oscillator: Oscillator, phase_delta: f64, gain: f64) -> f64 {
        let phase = self.phasor.advance(phase_delta);
        sample(oscillator, phase, gain)
    }

    pub fn phase(&self) -> f64 {
        self.phasor.phase()
    }

    pub fn reset(&mut self) {
        self.phasor.reset();
    }
}
