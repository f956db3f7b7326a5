//! Sequencer - the clocked control state machine
//!
//! All state lives in one [`Registers`] value. A tick computes the successor
//! with [`Registers::next`], a pure function of the committed registers and
//! the trigger line, and then swaps it in whole. Nothing is visible
//! half-updated.
//!
//! ```text
//! Populate --(16 ticks)--> AwaitTrigger --trigger--> Sample --(8 ticks)--> Update
//!                               ^                       ^                    |
//!                               |                       +---- index < 15 ----+
//!                               +-------------------------- index == 15 -----+
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::RingConfig;
use crate::error::ConfigError;
use crate::lfsr::{Lfsr, LFSR_MASK};
use crate::observer::{RingEvent, RingObserver};
use crate::ring::{Spin, SpinRing, RING_SIZE};
use crate::rule::{decide, Neighborhood};
use crate::trigger::TriggerSource;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ticks spent in `Populate` (4-bit counter).
pub const POPULATE_TICKS: u8 = 16;

/// Fresh bits shifted in per sample (3-bit counter).
pub const SAMPLE_BITS: u8 = 8;

/// Ticks from an accepted trigger back to `AwaitTrigger`.
pub const SWEEP_TICKS: u64 = 1 + RING_SIZE as u64 * (SAMPLE_BITS as u64 + 1);

const POPULATE_MASK: u8 = POPULATE_TICKS - 1;
const SAMPLE_MASK: u8 = SAMPLE_BITS - 1;
const SWEEP_MASK: u8 = RING_SIZE as u8 - 1;

/// Control phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    Populate,
    AwaitTrigger,
    Sample,
    Update,
}

/// Outcome of an `Update` tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpinDecision {
    pub index: usize,
    pub sample: u8,
    pub neighborhood: Neighborhood,
    pub value: Spin,
}

/// Every stateful element of the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Registers {
    pub phase: Phase,
    pub lfsr: Lfsr,
    /// Committed, externally visible spins.
    pub ring: SpinRing,
    /// Staging buffer for the current sweep.
    pub temp: SpinRing,
    /// Position being updated, 0..=15.
    pub sweep_index: u8,
    /// Bits sampled for the current position, 0..=7.
    pub sample_index: u8,
    /// Populate progress, 0..=15.
    pub populate_count: u8,
}

impl Registers {
    /// Reset state: `Populate` with the given seed and empty buffers.
    pub fn reset(seed: u32) -> Self {
        Self {
            phase: Phase::Populate,
            lfsr: Lfsr::new(seed),
            ring: SpinRing::new(),
            temp: SpinRing::new(),
            sweep_index: 0,
            sample_index: 0,
            populate_count: 0,
        }
    }

    /// Registers parked in `Update` for the given position.
    ///
    /// Used to stage a single decision against a chosen ring and sample.
    pub fn staged_update(ring: SpinRing, temp: SpinRing, lfsr: Lfsr, sweep_index: u8) -> Self {
        Self {
            phase: Phase::Update,
            lfsr,
            ring,
            temp,
            sweep_index: sweep_index & SWEEP_MASK,
            sample_index: 0,
            populate_count: 0,
        }
    }

    /// The decision an `Update` tick would make from these registers.
    pub fn decision(&self, config: &RingConfig) -> Option<SpinDecision> {
        (self.phase == Phase::Update).then(|| self.decide_current(config))
    }

    fn decide_current(&self, config: &RingConfig) -> SpinDecision {
        let index = self.sweep_index as usize;
        let neighborhood = Neighborhood::classify(self.ring.left(index), self.ring.right(index));
        let sample = self.lfsr.low_byte();
        SpinDecision {
            index,
            sample,
            neighborhood,
            value: decide(neighborhood, sample, config),
        }
    }

    /// Successor registers for one tick.
    pub fn next(&self, trigger: bool, config: &RingConfig) -> Registers {
        self.step(trigger, config).0
    }

    /// Successor registers plus the decision made on an `Update` tick.
    pub fn step(&self, trigger: bool, config: &RingConfig) -> (Registers, Option<SpinDecision>) {
        let mut next = *self;
        let mut decision = None;

        match self.phase {
            Phase::Populate => {
                next.lfsr = self.lfsr.peek_next();
                if self.populate_count == POPULATE_MASK {
                    next.ring = SpinRing::from_bits(next.lfsr.low16());
                    next.temp = next.ring;
                    next.populate_count = 0;
                    next.phase = Phase::AwaitTrigger;
                } else {
                    next.populate_count = (self.populate_count + 1) & POPULATE_MASK;
                }
            }
            Phase::AwaitTrigger => {
                if trigger {
                    next.sweep_index = 0;
                    next.sample_index = 0;
                    next.phase = Phase::Sample;
                }
            }
            Phase::Sample => {
                next.lfsr = self.lfsr.peek_next();
                if self.sample_index == SAMPLE_MASK {
                    next.sample_index = 0;
                    next.phase = Phase::Update;
                } else {
                    next.sample_index = (self.sample_index + 1) & SAMPLE_MASK;
                }
            }
            Phase::Update => {
                let d = self.decide_current(config);
                next.temp = self.temp.with(d.index, d.value);
                decision = Some(d);

                if self.sweep_index == SWEEP_MASK {
                    // Position 15 stays staged; the next sweep's first fold publishes it.
                    next.sweep_index = 0;
                    next.phase = Phase::AwaitTrigger;
                } else {
                    next.ring = next.temp;
                    next.sample_index = 0;
                    next.sweep_index = (self.sweep_index + 1) & SWEEP_MASK;
                    next.phase = Phase::Sample;
                }
            }
        }

        (next, decision)
    }

    /// Counters within their declared widths and the LFSR off its lock-up state.
    pub fn in_bounds(&self) -> bool {
        self.check().is_ok()
    }

    /// Reject counters outside their widths and a locked-up LFSR.
    pub fn check(&self) -> Result<(), ConfigError> {
        let counters = [
            ("sweep_index", self.sweep_index, RING_SIZE as u8),
            ("sample_index", self.sample_index, SAMPLE_BITS),
            ("populate_count", self.populate_count, POPULATE_TICKS),
        ];
        for (name, value, limit) in counters {
            if value >= limit {
                return Err(ConfigError::RegisterOutOfRange { name, value, limit });
            }
        }
        if self.lfsr.is_locked_up() {
            return Err(ConfigError::LockupRegister {
                state: self.lfsr.state(),
            });
        }
        Ok(())
    }
}

/// The clocked Ising ring core.
///
/// Owns the registers exclusively and advances them one tick at a time.
/// Observers are notified after each commit.
#[derive(Clone)]
pub struct Sequencer {
    regs: Registers,
    config: RingConfig,
    tick_count: u64,
    sweeps_started: u64,
    sweeps_completed: u64,
    observers: Vec<Arc<dyn RingObserver>>,
}

impl Sequencer {
    /// Create a sequencer in reset state.
    pub fn new(config: RingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_registers_unchecked(Registers::reset(config.seed), config))
    }

    /// Create a sequencer from explicit registers.
    ///
    /// Fails if the config is invalid, a counter is outside its width, or
    /// the LFSR holds its lock-up state.
    pub fn from_registers(regs: Registers, config: RingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        regs.check()?;
        Ok(Self::with_registers_unchecked(regs, config))
    }

    fn with_registers_unchecked(regs: Registers, config: RingConfig) -> Self {
        Self {
            regs,
            config,
            tick_count: 0,
            sweeps_started: 0,
            sweeps_completed: 0,
            observers: Vec::new(),
        }
    }

    /// Subscribe an observer to ring events.
    pub fn subscribe(&mut self, observer: Arc<dyn RingObserver>) {
        self.observers.push(observer);
    }

    // =========================================================================
    // TIME ADVANCEMENT
    // =========================================================================

    /// Advance one tick with the given trigger level.
    pub fn tick(&mut self, trigger: bool) {
        let prev = self.regs;
        let (next, decision) = prev.step(trigger, &self.config);
        debug_assert!(next.in_bounds(), "register out of bounds: {:?}", next);

        self.regs = next;
        self.tick_count += 1;

        match (prev.phase, next.phase) {
            (Phase::Populate, Phase::AwaitTrigger) => {
                debug!(
                    snapshot = next.ring.snapshot(),
                    tick = self.tick_count,
                    "ring populated"
                );
                self.emit(RingEvent::Populated {
                    snapshot: next.ring.snapshot(),
                    tick: self.tick_count,
                });
            }
            (Phase::AwaitTrigger, Phase::Sample) => {
                self.sweeps_started += 1;
                debug!(sweep = self.sweeps_started, tick = self.tick_count, "sweep started");
                self.emit(RingEvent::SweepStarted {
                    sweep: self.sweeps_started,
                    tick: self.tick_count,
                });
            }
            _ => {}
        }

        if let Some(d) = decision {
            trace!(
                index = d.index,
                sample = d.sample,
                neighborhood = ?d.neighborhood,
                value = ?d.value,
                "spin decided"
            );
            self.emit(RingEvent::SpinDecided {
                index: d.index,
                sample: d.sample,
                neighborhood: d.neighborhood,
                value: d.value,
            });

            if next.phase == Phase::AwaitTrigger {
                self.sweeps_completed += 1;
                debug!(
                    sweep = self.sweeps_completed,
                    snapshot = next.ring.snapshot(),
                    tick = self.tick_count,
                    "sweep completed"
                );
                self.emit(RingEvent::SweepCompleted {
                    sweep: self.sweeps_completed,
                    snapshot: next.ring.snapshot(),
                    tick: self.tick_count,
                });
            }
        }
    }

    /// Advance multiple ticks with the trigger held low.
    pub fn tick_n(&mut self, n: usize) {
        for _ in 0..n {
            self.tick(false);
        }
    }

    /// Advance `ticks` ticks, sampling the trigger from `source`.
    pub fn run<S: TriggerSource + ?Sized>(&mut self, source: &mut S, ticks: u64) {
        for _ in 0..ticks {
            let trigger = source.sample(self.tick_count);
            self.tick(trigger);
        }
    }

    /// Finish `Populate` if still running. Returns ticks spent.
    pub fn populate(&mut self) -> u64 {
        let start = self.tick_count;
        while self.regs.phase == Phase::Populate {
            self.tick(false);
        }
        self.tick_count - start
    }

    /// Pulse the trigger once and run until the sweep finishes.
    ///
    /// Completes `Populate` first if needed. If a sweep is already in
    /// progress it is finished instead of starting a new one. Returns the
    /// committed snapshot once the sequencer is idle again.
    pub fn sweep(&mut self) -> u16 {
        self.populate();
        if self.regs.phase == Phase::AwaitTrigger {
            self.tick(true);
        }
        while self.regs.phase != Phase::AwaitTrigger {
            self.tick(false);
        }
        self.snapshot()
    }

    // =========================================================================
    // READING
    // =========================================================================

    /// Committed 16-bit spin configuration.
    pub fn snapshot(&self) -> u16 {
        self.regs.ring.snapshot()
    }

    pub fn ring(&self) -> &SpinRing {
        &self.regs.ring
    }

    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    pub fn phase(&self) -> Phase {
        self.regs.phase
    }

    pub fn lfsr(&self) -> &Lfsr {
        &self.regs.lfsr
    }

    pub fn sweep_index(&self) -> u8 {
        self.regs.sweep_index
    }

    pub fn sample_index(&self) -> u8 {
        self.regs.sample_index
    }

    pub fn config(&self) -> &RingConfig {
        &self.config
    }

    /// Total ticks elapsed.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn sweeps_completed(&self) -> u64 {
        self.sweeps_completed
    }

    fn emit(&self, event: RingEvent) {
        if let Some((last, rest)) = self.observers.split_last() {
            for observer in rest {
                observer.on_event(event.clone());
            }
            last.on_event(event);
        }
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        let config = RingConfig::default();
        Self::with_registers_unchecked(Registers::reset(config.seed), config)
    }
}

impl fmt::Debug for Sequencer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequencer")
            .field("regs", &self.regs)
            .field("config", &self.config)
            .field("tick_count", &self.tick_count)
            .field("sweeps_completed", &self.sweeps_completed)
            .field("observers", &self.observers.len())
            .finish()
    }
}
