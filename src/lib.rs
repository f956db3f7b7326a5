//! Ising Ring - a clocked 16-spin ring under a stochastic Ising update
//!
//! One trigger, one sweep. Sixteen spins, updated in place.
//!
//! # Core Types
//!
//! - **Lfsr**: 31-bit XNOR shift register, one fresh bit per tick
//! - **SpinRing**: 16 binary spins with wrap-around neighbors
//! - **Sequencer**: four-phase control machine that owns all state
//!
//! # Phases
//!
//! 1. **Populate** - 16 ticks of LFSR output seed the ring (once, at reset)
//! 2. **AwaitTrigger** - everything held until a trigger pulse arrives
//! 3. **Sample** - 8 ticks shift a fresh byte into the LFSR's low end
//! 4. **Update** - one tick decides the spin at the current sweep position
//!
//! Sample and Update alternate sixteen times per sweep, then the machine
//! idles again.
//!
//! # Update Rule
//!
//! | neighbors | sample `r` | new spin |
//! |---|---|---|
//! | both UP | `r < 186` / `r >= 186` | UP / DOWN |
//! | both DOWN | `r < 186` / `r >= 186` | DOWN / UP |
//! | mixed | `r >= 127` / `r < 127` | UP / DOWN |
//!
//! Decided spins are staged in a buffer that is folded back into the ring
//! on every update except the last, so later positions in a sweep see the
//! fresh values of earlier ones. Position 15's value is published by the
//! first fold of the following sweep.
//!
//! # Example
//!
//! ```rust
//! use ising_ring::{RingConfig, Sequencer, TriggerSchedule};
//!
//! let mut seq = Sequencer::new(RingConfig::default()).unwrap();
//!
//! // Ring is seeded after 16 ticks.
//! seq.populate();
//! let seeded = seq.snapshot();
//! assert_eq!(seeded, seq.lfsr().low16());
//!
//! // One pulse, one sweep.
//! let after = seq.sweep();
//! assert_eq!(seq.sweeps_completed(), 1);
//!
//! // Scripted pulses from a schedule.
//! let mut triggers = TriggerSchedule::periodic(seq.tick_count(), 200);
//! seq.run(&mut triggers, 1000);
//! assert_eq!(seq.sweeps_completed(), 6);
//! # let _ = after;
//! ```

mod config;
mod error;
mod lfsr;
mod observer;
mod ring;
mod rule;
mod sequencer;
mod trigger;

pub use config::{
    RingConfig, DEFAULT_ALIGNED_THRESHOLD, DEFAULT_MIXED_THRESHOLD, DEFAULT_SEED,
};
pub use error::ConfigError;
pub use lfsr::{Lfsr, LFSR_BITS, LFSR_MASK};
pub use observer::{ChannelObserver, FnObserver, RingEvent, RingObserver};
pub use ring::{Spin, SpinRing, RING_SIZE};
pub use rule::{decide, Neighborhood};
pub use sequencer::{
    Phase, Registers, Sequencer, SpinDecision, POPULATE_TICKS, SAMPLE_BITS, SWEEP_TICKS,
};
pub use trigger::{Idle, TriggerSchedule, TriggerSource};
