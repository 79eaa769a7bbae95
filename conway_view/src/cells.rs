// cells.rs - Decoding the engine's packed cell bits

use crate::engine::Engine;

/// True when bit `n` of `bits` is set, counting from the low bit of byte 0.
///
/// # Panics
///
/// Panics if `n / 8` is past the end of `bits`.
#[inline]
pub fn bit_is_set(n: usize, bits: &[u8]) -> bool {
    let byte = n / 8;
    let mask = 1u8 << (n % 8);
    bits[byte] & mask == mask
}

/// Borrowed view over an engine's packed state.
///
/// The borrow ties the view to one draw; take a new one after the engine
/// has stepped or toggled anything.
#[derive(Debug, Clone, Copy)]
pub struct StateView<'a> {
    bits: &'a [u8],
}

impl<'a> StateView<'a> {
    pub fn new(bits: &'a [u8]) -> Self {
        Self { bits }
    }

    pub fn of<E: Engine + ?Sized>(engine: &'a E) -> Self {
        Self::new(engine.state_buffer())
    }

    /// Number of addressable cells, padding included.
    pub fn capacity(&self) -> usize {
        self.bits.len() * 8
    }

    #[inline]
    pub fn is_set(&self, index: usize) -> bool {
        bit_is_set(index, self.bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_low_bit_first() {
        let bits = [0b0000_0101, 0b1000_0000];
        assert!(bit_is_set(0, &bits));
        assert!(!bit_is_set(1, &bits));
        assert!(bit_is_set(2, &bits));
        assert!(bit_is_set(15, &bits));
        assert!(!bit_is_set(8, &bits));
    }

    #[test]
    fn only_the_chosen_bit_decodes_as_set() {
        for target in 0..24 {
            let mut bits = [0u8; 3];
            bits[target / 8] = 1 << (target % 8);
            let view = StateView::new(&bits);
            for n in 0..view.capacity() {
                assert_eq!(view.is_set(n), n == target, "target {target}, bit {n}");
            }
        }
    }

    #[test]
    #[should_panic]
    fn decoding_past_the_buffer_panics() {
        let bits = [0xFFu8];
        bit_is_set(8, &bits);
    }
}
