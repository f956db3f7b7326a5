//! Per-spin update rule
//!
//! Aligned neighbors favor their own value (the ground state) with
//! probability `aligned_threshold / 256`. Mixed neighbors have no preferred
//! value and choose UP with probability `(256 - mixed_threshold) / 256`.

use crate::config::RingConfig;
use crate::ring::Spin;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Alignment of a position's two neighbors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Neighborhood {
    /// Both neighbors hold this value.
    Aligned(Spin),
    /// One neighbor UP, one DOWN.
    Mixed,
}

impl Neighborhood {
    pub fn classify(left: Spin, right: Spin) -> Self {
        if left == right {
            Neighborhood::Aligned(left)
        } else {
            Neighborhood::Mixed
        }
    }
}

/// New spin value for a position given its neighborhood and a sampled byte.
pub fn decide(neighborhood: Neighborhood, sample: u8, config: &RingConfig) -> Spin {
    match neighborhood {
        Neighborhood::Aligned(ground) => {
            if sample < config.aligned_threshold {
                ground
            } else {
                ground.flipped()
            }
        }
        Neighborhood::Mixed => {
            if sample >= config.mixed_threshold {
                Spin::Up
            } else {
                Spin::Down
            }
        }
    }
}
