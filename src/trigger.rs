//! Trigger sources
//!
//! The sequencer samples one boolean per tick. Debouncing a physical line is
//! outside the core; these sources produce the clean, single-tick pulses the
//! core expects, for scripted runs and tests.

/// Per-tick trigger input.
pub trait TriggerSource {
    /// Level of the trigger line for the given tick.
    fn sample(&mut self, tick: u64) -> bool;
}

/// Never fires.
#[derive(Clone, Copy, Debug, Default)]
pub struct Idle;

impl TriggerSource for Idle {
    fn sample(&mut self, _tick: u64) -> bool {
        false
    }
}

/// Deterministic pulse train.
#[derive(Clone, Debug)]
pub enum TriggerSchedule {
    /// One pulse every `period` ticks, first pulse at tick `start`.
    Periodic { start: u64, period: u64 },
    /// Pulses at exactly these ticks (sorted ascending).
    At(Vec<u64>),
}

impl TriggerSchedule {
    pub fn periodic(start: u64, period: u64) -> Self {
        TriggerSchedule::Periodic {
            start,
            period: period.max(1),
        }
    }

    pub fn at(ticks: impl IntoIterator<Item = u64>) -> Self {
        let mut ticks: Vec<u64> = ticks.into_iter().collect();
        ticks.sort_unstable();
        ticks.dedup();
        TriggerSchedule::At(ticks)
    }
}

impl TriggerSource for TriggerSchedule {
    fn sample(&mut self, tick: u64) -> bool {
        match self {
            TriggerSchedule::Periodic { start, period } => {
                tick >= *start && (tick - *start) % *period == 0
            }
            TriggerSchedule::At(ticks) => ticks.binary_search(&tick).is_ok(),
        }
    }
}

impl<F: FnMut(u64) -> bool> TriggerSource for F {
    fn sample(&mut self, tick: u64) -> bool {
        self(tick)
    }
}
