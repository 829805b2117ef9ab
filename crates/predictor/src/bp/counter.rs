//! Tables of 2-bit saturating counters.

/// Upper bound of a 2-bit counter.
pub const COUNTER_MAX: u8 = 3;

/// Initial value of every counter: weakly not-taken (or weakly prefer global).
pub const WEAKLY_NOT_TAKEN: u8 = 1;

/// Moves a 2-bit counter one step toward `up`, clamping at 0 and 3.
#[inline(always)]
pub fn saturate(counter: u8, up: bool) -> u8 {
    if up {
        (counter + 1).min(COUNTER_MAX)
    } else {
        counter.saturating_sub(1)
    }
}

/// Array of `2^B` 2-bit saturating counters.
///
/// 0 = Strongly Not Taken, 1 = Weakly Not Taken,
/// 2 = Weakly Taken, 3 = Strongly Taken.
///
/// Every index is masked to `B` bits before use, so lookups never leave
/// the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaturatingCounterTable {
    counters: Vec<u8>,
    mask: usize,
}

impl SaturatingCounterTable {
    /// Allocates `2^index_bits` counters set to [`WEAKLY_NOT_TAKEN`].
    pub fn new(index_bits: u32) -> Self {
        let size = 1usize << index_bits;
        Self {
            counters: vec![WEAKLY_NOT_TAKEN; size],
            mask: size - 1,
        }
    }

    /// Number of counters.
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Always false; a table holds at least one counter.
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Raw counter value at `index`.
    #[inline(always)]
    pub fn get(&self, index: usize) -> u8 {
        self.counters[index & self.mask]
    }

    /// Direction held at `index`: the counter's top bit.
    #[inline(always)]
    pub fn predict(&self, index: usize) -> bool {
        self.get(index) & 0b10 != 0
    }

    /// Nudges the counter at `index` toward taken (`up`) or not-taken.
    #[inline(always)]
    pub fn update(&mut self, index: usize, up: bool) {
        let slot = &mut self.counters[index & self.mask];
        *slot = saturate(*slot, up);
    }

    /// All counters, in index order.
    pub fn counters(&self) -> &[u8] {
        &self.counters
    }
}
