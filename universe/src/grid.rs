// grid.rs - Packed cell storage for the universe

/// Upper bound on `width * height` accepted by `Universe::new`.
pub const MAX_CELLS: usize = 1 << 26;

/// Number of bytes needed to hold one bit per cell.
pub const fn packed_len(cells: usize) -> usize {
    cells.div_ceil(8)
}

/// One bit per cell, low bit of byte `n / 8` first.
///
/// Bits past `len` stay zero so hashing and population counts never see padding.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PackedCells {
    bits: Vec<u8>,
    len: usize,
}

impl PackedCells {
    pub fn new(len: usize) -> Self {
        Self {
            bits: vec![0; packed_len(len)],
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn get(&self, n: usize) -> bool {
        debug_assert!(n < self.len, "cell {n} out of range ({})", self.len);
        self.bits[n / 8] & (1 << (n % 8)) != 0
    }

    #[inline]
    pub fn set(&mut self, n: usize, alive: bool) {
        debug_assert!(n < self.len, "cell {n} out of range ({})", self.len);
        let mask = 1 << (n % 8);
        if alive {
            self.bits[n / 8] |= mask;
        } else {
            self.bits[n / 8] &= !mask;
        }
    }

    #[inline]
    pub fn toggle(&mut self, n: usize) {
        debug_assert!(n < self.len, "cell {n} out of range ({})", self.len);
        self.bits[n / 8] ^= 1 << (n % 8);
    }

    pub fn clear(&mut self) {
        self.bits.fill(0);
    }

    pub fn count_ones(&self) -> usize {
        self.bits.iter().map(|byte| byte.count_ones() as usize).sum()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }
}
