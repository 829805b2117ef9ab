//! Branch outcome history registers.

/// Returns a mask covering the low `width` bits.
///
/// A width of 0 yields an empty mask and widths of 32 or more cover the
/// whole register.
#[inline(always)]
pub fn low_mask(width: u32) -> u32 {
    u32::MAX.checked_shr(32u32.saturating_sub(width)).unwrap_or(0)
}

/// Shifts `taken` into the low bit of `history`, keeping `width` bits.
#[inline(always)]
pub fn shift_in(history: u32, taken: bool, width: u32) -> u32 {
    ((history << 1) | taken as u32) & low_mask(width)
}

/// Fixed-width shift register of the most recent branch outcomes.
///
/// Bit 0 holds the newest outcome. Only the low `width` bits are ever set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRegister {
    bits: u32,
    width: u32,
}

impl HistoryRegister {
    /// Creates an all-not-taken register of `width` bits.
    pub fn new(width: u32) -> Self {
        Self { bits: 0, width }
    }

    /// Current contents.
    #[inline(always)]
    pub fn value(&self) -> u32 {
        self.bits
    }

    /// Register width in bits.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Contents truncated to the low `width` bits.
    #[inline(always)]
    pub fn masked(&self, width: u32) -> u32 {
        self.bits & low_mask(width)
    }

    /// Outcome recorded `age` branches ago (0 is the newest).
    #[inline(always)]
    pub fn bit(&self, age: u32) -> bool {
        (self.bits >> age) & 1 != 0
    }

    /// Records a resolved outcome.
    #[inline(always)]
    pub fn push(&mut self, taken: bool) {
        self.bits = shift_in(self.bits, taken, self.width);
    }
}
