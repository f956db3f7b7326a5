//! Ring configuration

use crate::error::ConfigError;
use crate::lfsr::{LFSR_BITS, LFSR_MASK};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reset value loaded into the LFSR.
pub const DEFAULT_SEED: u32 = 0x5A5A_5A5A & LFSR_MASK;

/// Reinforcement threshold when both neighbors agree (186/256 ≈ 0.727).
pub const DEFAULT_ALIGNED_THRESHOLD: u8 = 186;

/// Threshold for the mixed-neighbor case (127/256 ≈ 0.496).
pub const DEFAULT_MIXED_THRESHOLD: u8 = 127;

/// Configuration for an Ising ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RingConfig {
    /// Initial LFSR state (31 bits, non-zero, not all-ones).
    pub seed: u32,

    /// Sampled bytes below this keep an aligned neighborhood's value.
    pub aligned_threshold: u8,

    /// Sampled bytes at or above this set a mixed-neighborhood spin UP.
    pub mixed_threshold: u8,
}

impl RingConfig {
    /// Create a configuration with the given seed and default thresholds.
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn with_thresholds(mut self, aligned: u8, mixed: u8) -> Self {
        self.aligned_threshold = aligned;
        self.mixed_threshold = mixed;
        self
    }

    /// Probability that an aligned neighborhood is reinforced.
    pub fn aligned_probability(&self) -> f32 {
        self.aligned_threshold as f32 / 256.0
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seed == 0 {
            return Err(ConfigError::ZeroSeed);
        }
        if self.seed > LFSR_MASK {
            return Err(ConfigError::SeedTooWide {
                seed: self.seed,
                bits: LFSR_BITS,
            });
        }
        if self.seed == LFSR_MASK {
            return Err(ConfigError::LockupSeed { seed: self.seed });
        }
        if self.aligned_threshold == 0 {
            return Err(ConfigError::ZeroThreshold { name: "aligned" });
        }
        if self.mixed_threshold == 0 {
            return Err(ConfigError::ZeroThreshold { name: "mixed" });
        }
        Ok(())
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            aligned_threshold: DEFAULT_ALIGNED_THRESHOLD,
            mixed_threshold: DEFAULT_MIXED_THRESHOLD,
        }
    }
}
