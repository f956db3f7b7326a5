//! Configuration errors

use thiserror::Error;

/// Reasons a [`RingConfig`](crate::RingConfig) is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("seed must be non-zero")]
    ZeroSeed,

    #[error("seed {seed:#x} does not fit in {bits} bits")]
    SeedTooWide { seed: u32, bits: u32 },

    /// All-ones is the fixed point of XNOR feedback.
    #[error("seed {seed:#x} is the LFSR lock-up state")]
    LockupSeed { seed: u32 },

    #[error("{name} threshold must be non-zero")]
    ZeroThreshold { name: &'static str },

    #[error("register {name} = {value} is outside 0..{limit}")]
    RegisterOutOfRange {
        name: &'static str,
        value: u8,
        limit: u8,
    },

    #[error("LFSR register {state:#x} is the lock-up state")]
    LockupRegister { state: u32 },
}
