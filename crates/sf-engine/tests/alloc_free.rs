//! Allocation-free render path tests.
//!
//! Verify that `Engine::render_frame()` and `Engine::render_buffer()` do
//! not allocate during the realtime phase. Sessions are rendered for
//! several seconds, across every oscillator kind and through note
//! transitions and queue exhaustion, to catch allocations hiding behind
//! specific state changes.

use assert_no_alloc::{assert_no_alloc, AllocDisabler};

#[cfg(debug_assertions)]
#[global_allocator]
static A: AllocDisabler = AllocDisabler;

use sf_engine::{sequence, Engine};
use sf_ir::{EngineParams, Oscillator, Scale, Series};

const SAMPLE_RATE: u32 = 48000;

fn session(oscillator: Oscillator, scale: Scale) -> Engine {
    let params = EngineParams {
        oscillator,
        scale,
        tempo_bpm: 480, // fast tempo → many note transitions per second
        ..Default::default()
    };
    let series = Series::new(
        "ramp",
        (0..200).map(|i| Some(i as f64 * 3.7)).collect(),
    );
    let amounts = series.resolve();
    let (min, max) = sequence::amount_range(&amounts).unwrap();
    let queue = sequence::build_notes(&amounts, min, max, &params, SAMPLE_RATE).unwrap();

    let mut engine = Engine::new(&params, SAMPLE_RATE).unwrap();
    engine.load(queue).unwrap();
    engine.play();
    engine
}

fn assert_render_alloc_free(mut engine: Engine, duration_frames: usize) {
    assert_no_alloc(|| {
        for _ in 0..duration_frames {
            engine.render_frame();
        }
    });
}

#[test]
fn sine_render_alloc_free() {
    assert_render_alloc_free(session(Oscillator::Sine, Scale::Chromatic), SAMPLE_RATE as usize * 5);
}

#[test]
fn square_render_alloc_free() {
    assert_render_alloc_free(session(Oscillator::Square, Scale::Diatonic), SAMPLE_RATE as usize * 5);
}

#[test]
fn triangle_render_alloc_free() {
    assert_render_alloc_free(session(Oscillator::Triangle, Scale::Pentatonic), SAMPLE_RATE as usize * 5);
}

#[test]
fn saw_render_alloc_free() {
    assert_render_alloc_free(session(Oscillator::Saw, Scale::WholeTone), SAMPLE_RATE as usize * 5);
}

#[test]
fn buffer_render_alloc_free_through_exhaustion() {
    // 200 notes at 480 bpm = 25 seconds; render past the end so the
    // exhaustion transition itself is covered.
    let mut engine = session(Oscillator::Square, Scale::Chromatic);
    let mut data = [0.0f32; 1024];
    assert_no_alloc(|| {
        while engine.is_playing() {
            engine.render_buffer(&mut data, 2);
        }
        engine.render_buffer(&mut data, 2);
    });
    assert!(engine.is_finished());
}
