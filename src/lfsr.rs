//! Random bit source - 31-bit XNOR linear feedback shift register
//!
//! Each advance feeds `bit[27] XNOR bit[30]` into bit 0 and shifts everything
//! else up by one. Bit 0 is the most recently shifted bit, so after eight
//! advances the low byte is entirely fresh.
//!
//! With XNOR feedback the all-ones state maps to itself; every other state
//! lies on the single maximal cycle of length 2^31 - 1.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Register width.
pub const LFSR_BITS: u32 = 31;

/// Mask of the live register bits.
pub const LFSR_MASK: u32 = (1 << LFSR_BITS) - 1;

const TAP_A: u32 = 27;
const TAP_B: u32 = 30;

/// A 31-bit Fibonacci LFSR with XNOR feedback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Lfsr {
    state: u32,
}

impl Lfsr {
    /// Create from a seed. Bits above bit 30 are discarded.
    ///
    /// The lock-up state is not rejected here; `RingConfig::validate` and
    /// `Registers::check` do that.
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed & LFSR_MASK,
        }
    }

    /// True for the all-ones state, which XNOR feedback never leaves.
    #[inline]
    pub fn is_locked_up(&self) -> bool {
        self.state == LFSR_MASK
    }

    /// The next bit that `advance` would shift in.
    #[inline]
    pub fn feedback(&self) -> u32 {
        !((self.state >> TAP_A) ^ (self.state >> TAP_B)) & 1
    }

    /// Successor state, without mutating.
    #[inline]
    pub fn peek_next(&self) -> Self {
        Self {
            state: ((self.state << 1) | self.feedback()) & LFSR_MASK,
        }
    }

    /// Shift in one new bit.
    #[inline]
    pub fn advance(&mut self) {
        *self = self.peek_next();
        debug_assert_ne!(self.state, LFSR_MASK, "LFSR reached lock-up state");
    }

    /// Full 31-bit state.
    #[inline]
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Least-significant 8 bits.
    #[inline]
    pub fn low_byte(&self) -> u8 {
        (self.state & 0xFF) as u8
    }

    /// Least-significant 16 bits.
    #[inline]
    pub fn low16(&self) -> u16 {
        (self.state & 0xFFFF) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Inverse of `advance`: bit 30 is the only bit lost by the shift and
    /// it is recoverable from the feedback bit and tap 27.
    fn rewind(next: u32) -> u32 {
        let fed = next & 1;
        let tap_a = (next >> (TAP_A + 1)) & 1;
        let lost = !(fed ^ tap_a) & 1;
        (next >> 1) | (lost << TAP_B)
    }

    #[test]
    fn test_feedback_is_xnor() {
        // Taps clear: 0 XNOR 0 = 1.
        let mut lfsr = Lfsr::new(0b10);
        lfsr.advance();
        assert_eq!(lfsr.state(), 0b101);

        // Only tap 27 set: 1 XNOR 0 = 0.
        let mut lfsr = Lfsr::new(1 << 27);
        lfsr.advance();
        assert_eq!(lfsr.state(), 1 << 28);

        // Both taps set: 1 XNOR 1 = 1, bit 30 falls off.
        let mut lfsr = Lfsr::new((1 << 30) | (1 << 27));
        lfsr.advance();
        assert_eq!(lfsr.state(), (1 << 28) | 1);
    }

    #[test]
    fn test_zero_is_not_fixed_point() {
        let mut lfsr = Lfsr::new(0);
        lfsr.advance();
        assert_eq!(lfsr.state(), 1);
    }

    #[test]
    fn test_lockup_is_fixed_point() {
        let lfsr = Lfsr::new(LFSR_MASK);
        assert!(lfsr.is_locked_up());
        assert_eq!(lfsr.peek_next(), lfsr);
        assert!(!Lfsr::new(1).is_locked_up());
    }

    #[test]
    fn test_low_views() {
        let lfsr = Lfsr::new(0x1234_5678 & LFSR_MASK);
        assert_eq!(lfsr.low_byte(), 0x78);
        assert_eq!(lfsr.low16(), 0x5678);
    }

    #[test]
    fn test_eight_advances_refresh_low_byte() {
        let mut lfsr = Lfsr::new(0x5A5A_5A5A & LFSR_MASK);
        let before = lfsr.state();
        for _ in 0..8 {
            lfsr.advance();
        }
        // Old bits 0..22 now sit at 8..30.
        assert_eq!(lfsr.state() >> 8, before & (LFSR_MASK >> 8));
    }

    #[test]
    fn test_never_locks_up_from_default_seed() {
        let mut lfsr = Lfsr::new(crate::config::DEFAULT_SEED);
        for _ in 0..100_000 {
            lfsr.advance();
            assert_ne!(lfsr.state(), LFSR_MASK);
        }
    }

    proptest! {
        #[test]
        fn prop_advance_is_bijective(state in 0u32..LFSR_MASK) {
            let next = Lfsr::new(state).peek_next().state();
            prop_assert_eq!(rewind(next), state);
        }

        #[test]
        fn prop_state_stays_in_width(state in 0u32..LFSR_MASK, steps in 0usize..64) {
            let mut lfsr = Lfsr::new(state);
            for _ in 0..steps {
                lfsr.advance();
            }
            prop_assert!(lfsr.state() <= LFSR_MASK);
            prop_assert_ne!(lfsr.state(), LFSR_MASK);
        }
    }
}
