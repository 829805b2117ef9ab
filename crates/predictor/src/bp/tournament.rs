//! Tournament (hybrid) branch predictor.
//!
//! Two base predictors run side by side:
//!
//! - **Global:** a counter table indexed by the global history register.
//! - **Local:** a per-address history table (BHT) indexed by program-counter
//!   bits, whose pattern in turn indexes a local counter table.
//!
//! A choice table, indexed by the same global history as the global counters,
//! selects which base prediction to use. Its counters move toward "local"
//! (top bit set) when only the local predictor was right, and toward
//! "global" when only the global predictor was right. When both base
//! predictors agree the choice counter is left untouched, whether or not
//! the shared prediction was correct.

use super::{
    BranchPredictor,
    counter::SaturatingCounterTable,
    history::{HistoryRegister, low_mask, shift_in},
};
use crate::config::PredictorConfig;

/// Per-address local history registers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalHistoryTable {
    patterns: Vec<u32>,
    slot_mask: u32,
    width: u32,
}

impl LocalHistoryTable {
    /// Allocates `2^pc_index_bits` all-not-taken registers of `width` bits.
    pub fn new(pc_index_bits: u32, width: u32) -> Self {
        Self {
            patterns: vec![0; 1usize << pc_index_bits],
            slot_mask: low_mask(pc_index_bits),
            width,
        }
    }

    /// Table slot for a program counter.
    #[inline(always)]
    pub fn slot(&self, pc: u32) -> usize {
        (pc & self.slot_mask) as usize
    }

    /// History pattern at `slot`, masked to the local history width.
    #[inline(always)]
    pub fn pattern(&self, slot: usize) -> u32 {
        self.patterns[slot & self.slot_mask as usize] & low_mask(self.width)
    }

    /// Shifts `taken` into the register at `slot`.
    #[inline(always)]
    pub fn push(&mut self, slot: usize, taken: bool) {
        let entry = &mut self.patterns[slot & self.slot_mask as usize];
        *entry = shift_in(*entry, taken, self.width);
    }

    /// Number of registers.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Always false; the table holds at least one register.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// All registers, in slot order.
    pub fn patterns(&self) -> &[u32] {
        &self.patterns
    }
}

/// State captured by [`TournamentPredictor::predict_branch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TournamentLookup {
    global_index: usize,
    local_slot: usize,
    local_index: usize,
    global_taken: bool,
    local_taken: bool,
}

impl TournamentLookup {
    /// Index shared by the global and choice tables.
    pub fn global_index(&self) -> usize {
        self.global_index
    }

    /// Local history table slot.
    pub fn local_slot(&self) -> usize {
        self.local_slot
    }

    /// Local counter table index (the masked local pattern).
    pub fn local_index(&self) -> usize {
        self.local_index
    }

    /// Global predictor's direction.
    pub fn global_taken(&self) -> bool {
        self.global_taken
    }

    /// Local predictor's direction.
    pub fn local_taken(&self) -> bool {
        self.local_taken
    }
}

pub struct TournamentPredictor {
    ghr: HistoryRegister,
    global_bits: u32,

    global_pht: SaturatingCounterTable,
    local_history_table: LocalHistoryTable,
    local_pht: SaturatingCounterTable,

    // Top bit set selects the local predictor.
    choice_pht: SaturatingCounterTable,
}

impl TournamentPredictor {
    pub fn new(config: &PredictorConfig) -> Self {
        log::debug!(
            "tournament: {} global/choice counters, {} local histories of {} bits, {} local counters",
            1usize << config.ghistory_bits,
            1usize << config.pc_index_bits,
            config.lhistory_bits,
            1usize << config.lhistory_bits
        );

        Self {
            ghr: HistoryRegister::new(config.ghistory_bits),
            global_bits: config.ghistory_bits,

            global_pht: SaturatingCounterTable::new(config.ghistory_bits),
            local_history_table: LocalHistoryTable::new(
                config.pc_index_bits,
                config.lhistory_bits,
            ),
            local_pht: SaturatingCounterTable::new(config.lhistory_bits),

            choice_pht: SaturatingCounterTable::new(config.ghistory_bits),
        }
    }

    /// Global history register.
    pub fn history(&self) -> &HistoryRegister {
        &self.ghr
    }

    /// Global pattern history table.
    pub fn global_counters(&self) -> &SaturatingCounterTable {
        &self.global_pht
    }

    /// Local pattern history table.
    pub fn local_counters(&self) -> &SaturatingCounterTable {
        &self.local_pht
    }

    /// Choice (meta) table.
    pub fn choice_counters(&self) -> &SaturatingCounterTable {
        &self.choice_pht
    }

    /// Per-address local history table.
    pub fn local_histories(&self) -> &LocalHistoryTable {
        &self.local_history_table
    }
}

impl BranchPredictor for TournamentPredictor {
    type Lookup = TournamentLookup;

    fn predict_branch(&self, pc: u32) -> (bool, TournamentLookup) {
        let global_index = self.ghr.masked(self.global_bits) as usize;
        let use_local = self.choice_pht.predict(global_index);

        let local_slot = self.local_history_table.slot(pc);
        let local_index = self.local_history_table.pattern(local_slot) as usize;
        let local_taken = self.local_pht.predict(local_index);

        let global_taken = self.global_pht.predict(global_index);

        let taken = if use_local { local_taken } else { global_taken };

        (
            taken,
            TournamentLookup {
                global_index,
                local_slot,
                local_index,
                global_taken,
                local_taken,
            },
        )
    }

    fn update_branch(&mut self, lookup: TournamentLookup, taken: bool) {
        self.global_pht.update(lookup.global_index, taken);
        self.local_pht.update(lookup.local_index, taken);

        if lookup.local_taken != lookup.global_taken {
            // Exactly one of the two was right; lean toward it.
            self.choice_pht
                .update(lookup.global_index, lookup.local_taken == taken);
        }

        self.local_history_table.push(lookup.local_slot, taken);
        self.ghr.push(taken);
    }
}
