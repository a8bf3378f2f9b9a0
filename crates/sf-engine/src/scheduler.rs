//! Sample-accurate note scheduling.

use sf_ir::ConfigError;

use crate::frequency::FrequencyTable;
use crate::sequence::NoteQueue;

/// Scheduler lifecycle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SchedulerState {
    /// No notes loaded (or the queue has been exhausted).
    #[default]
    Empty,
    /// Notes remain to be played.
    Advancing,
}

/// Walks a note queue one rendered sample at a time.
///
/// Durations are counted down per sample rather than against a wall
/// clock, which makes note boundaries sample-exact regardless of the
/// device buffer size and the schedule deterministic.
#[derive(Clone, Debug, Default)]
pub struct NoteScheduler {
    queue: NoteQueue,
    state: SchedulerState,
    frequency: f64,
    phase_delta: f64,
    sample_rate: u32,
}

impl NoteScheduler {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            ..Default::default()
        }
    }

    /// Take ownership of a fully built queue and prime the first note.
    ///
    /// Every queued pitch is validated against the table up front so the
    /// render path never has to handle a missing frequency. Control
    /// context only.
    pub fn load(&mut self, queue: NoteQueue, table: &FrequencyTable) -> Result<(), ConfigError> {
        for note in queue.notes() {
            table.lookup(note.pitch)?;
        }
        match queue.front() {
            Some(front) => {
                self.set_frequency(table.lookup(front.pitch)?);
                self.state = SchedulerState::Advancing;
            }
            None => {
                self.set_frequency(0.0);
                self.state = SchedulerState::Empty;
            }
        }
        self.queue = queue;
        Ok(())
    }

    /// Advance by one rendered sample.
    ///
    /// Returns `true` exactly when the sequence has finished: on the tick
    /// that exhausts the queue, and on every tick while `Empty` (a no-op).
    /// This is the only way playback ends on its own.
    pub fn tick(&mut self, table: &FrequencyTable) -> bool {
        if self.state == SchedulerState::Empty {
            return true;
        }
        let Some(front) = self.queue.front_mut() else {
            self.state = SchedulerState::Empty;
            return true;
        };
        front.remaining = front.remaining.saturating_sub(1);
        if front.remaining == 0 {
            self.queue.advance();
            match self.queue.front() {
                Some(next) => {
                    // Pitches were validated at load; keep the previous
                    // frequency on the impossible miss.
                    if let Some(freq) = table.get(next.pitch) {
                        self.set_frequency(freq);
                    }
                }
                None => {
                    self.state = SchedulerState::Empty;
                    return true;
                }
            }
        }
        false
    }

    fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
        self.phase_delta = if self.sample_rate == 0 {
            0.0
        } else {
            frequency / self.sample_rate as f64
        };
    }

    /// Drop any remaining notes and return to `Empty`.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.set_frequency(0.0);
        self.state = SchedulerState::Empty;
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Frequency of the currently sounding note, in Hz.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Phase increment per sample for the current frequency.
    pub fn phase_delta(&self) -> f64 {
        self.phase_delta
    }

    /// Index of the currently sounding note (for position display).
    pub fn position(&self) -> usize {
        self.queue.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_ir::Note;

    fn table() -> FrequencyTable {
        FrequencyTable::build(0, 127).unwrap()
    }

    fn queue(notes: &[(u8, u32)]) -> NoteQueue {
        let mut queue = NoteQueue::new();
        for &(pitch, duration) in notes {
            queue.push(Note::new(pitch, duration));
        }
        queue
    }

    #[test]
    fn load_primes_first_note() {
        let table = table();
        let mut scheduler = NoteScheduler::new(48000);
        scheduler.load(queue(&[(69, 4)]), &table).unwrap();
        assert_eq!(scheduler.state(), SchedulerState::Advancing);
        assert_eq!(scheduler.frequency(), 440.0);
        assert_eq!(scheduler.phase_delta(), 440.0 / 48000.0);
    }

    #[test]
    fn note_transition_after_exact_duration() {
        let table = table();
        let mut scheduler = NoteScheduler::new(48000);
        scheduler.load(queue(&[(60, 4), (62, 2)]), &table).unwrap();

        let first_freq = scheduler.frequency();
        for _ in 0..3 {
            assert!(!scheduler.tick(&table));
            assert_eq!(scheduler.frequency(), first_freq);
        }
        // Fourth tick pops the first note and retunes to pitch 62.
        assert!(!scheduler.tick(&table));
        assert_eq!(scheduler.position(), 1);
        assert_eq!(scheduler.frequency(), crate::frequency::midi_to_frequency(62));
    }

    #[test]
    fn finishes_on_exhaustion_and_stays_finished() {
        let table = table();
        let mut scheduler = NoteScheduler::new(48000);
        scheduler.load(queue(&[(60, 4), (62, 2)]), &table).unwrap();

        for _ in 0..5 {
            assert!(!scheduler.tick(&table));
        }
        // Sixth tick exhausts the queue.
        assert!(scheduler.tick(&table));
        assert_eq!(scheduler.state(), SchedulerState::Empty);
        // Ticking while Empty is an idempotent finished no-op.
        for _ in 0..8 {
            assert!(scheduler.tick(&table));
        }
    }

    #[test]
    fn empty_queue_loads_as_empty() {
        let table = table();
        let mut scheduler = NoteScheduler::new(48000);
        scheduler.load(NoteQueue::new(), &table).unwrap();
        assert_eq!(scheduler.state(), SchedulerState::Empty);
        assert!(scheduler.tick(&table));
    }

    #[test]
    fn load_rejects_out_of_range_pitch() {
        let small = FrequencyTable::build(48, 72).unwrap();
        let mut scheduler = NoteScheduler::new(48000);
        let result = scheduler.load(queue(&[(60, 4), (90, 4)]), &small);
        assert_eq!(result, Err(ConfigError::PitchOutOfRange(90)));
    }

    #[test]
    fn clear_returns_to_empty() {
        let table = table();
        let mut scheduler = NoteScheduler::new(48000);
        scheduler.load(queue(&[(60, 100)]), &table).unwrap();
        scheduler.clear();
        assert_eq!(scheduler.state(), SchedulerState::Empty);
        assert_eq!(scheduler.frequency(), 0.0);
        assert!(scheduler.tick(&table));
    }
}
