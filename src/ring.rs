//! Spin ring - 16 binary cells with circular indexing
//!
//! Bit `i` of the packed `u16` is the spin at position `i`. The same type
//! backs both the committed ring and the staging buffer a sweep writes into.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of positions on the ring.
pub const RING_SIZE: usize = 16;

/// A single binary spin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Spin {
    Down = 0,
    Up = 1,
}

impl Spin {
    #[inline]
    pub fn from_bit(bit: u16) -> Self {
        if bit & 1 == 1 {
            Spin::Up
        } else {
            Spin::Down
        }
    }

    #[inline]
    pub fn bit(self) -> u16 {
        self as u16
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Spin::Down => Spin::Up,
            Spin::Up => Spin::Down,
        }
    }

    /// Display glyph.
    pub fn glyph(self) -> char {
        match self {
            Spin::Down => '▼',
            Spin::Up => '▲',
        }
    }
}

/// Sixteen spins arranged in a ring (index 0 follows index 15).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpinRing {
    bits: u16,
}

impl SpinRing {
    /// All spins DOWN.
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    /// Create from a packed snapshot.
    pub fn from_bits(bits: u16) -> Self {
        Self { bits }
    }

    /// Spin at `idx` (already reduced modulo 16).
    #[inline]
    pub fn get(&self, idx: usize) -> Spin {
        debug_assert!(idx < RING_SIZE, "ring index {} out of range", idx);
        Spin::from_bit(self.bits >> idx)
    }

    /// Set spin at `idx` (already reduced modulo 16).
    #[inline]
    pub fn set(&mut self, idx: usize, spin: Spin) {
        debug_assert!(idx < RING_SIZE, "ring index {} out of range", idx);
        self.bits = (self.bits & !(1 << idx)) | (spin.bit() << idx);
    }

    /// Copy of the ring with one position replaced.
    #[inline]
    pub fn with(mut self, idx: usize, spin: Spin) -> Self {
        self.set(idx, spin);
        self
    }

    /// Neighbor at `(idx + 15) mod 16`.
    #[inline]
    pub fn left(&self, idx: usize) -> Spin {
        self.get((idx + RING_SIZE - 1) % RING_SIZE)
    }

    /// Neighbor at `(idx + 1) mod 16`.
    #[inline]
    pub fn right(&self, idx: usize) -> Spin {
        self.get((idx + 1) % RING_SIZE)
    }

    /// Packed 16-bit snapshot.
    #[inline]
    pub fn snapshot(&self) -> u16 {
        self.bits
    }

    /// Iterate spins from position 0 to 15.
    pub fn iter(&self) -> impl Iterator<Item = Spin> + '_ {
        (0..RING_SIZE).map(move |i| self.get(i))
    }

    /// Count of UP spins.
    pub fn up_count(&self) -> u32 {
        self.bits.count_ones()
    }

    /// UP count minus DOWN count, in [-16, 16].
    pub fn magnetization(&self) -> i32 {
        2 * self.up_count() as i32 - RING_SIZE as i32
    }

    /// Number of disagreeing adjacent pairs, including the 15-0 bond.
    pub fn bond_energy(&self) -> u32 {
        (self.bits ^ self.bits.rotate_left(1)).count_ones()
    }
}

impl fmt::Display for SpinRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for spin in self.iter() {
            write!(f, "{}", spin.glyph())?;
        }
        Ok(())
    }
}
