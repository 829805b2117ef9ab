use super::{BranchPredictor, counter::SaturatingCounterTable, history::HistoryRegister};
use crate::bp::history::low_mask;

/// Counter index captured by [`GSharePredictor::predict_branch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GShareLookup {
    index: usize,
}

impl GShareLookup {
    /// Counter table index the prediction was read from.
    pub fn index(&self) -> usize {
        self.index
    }
}

pub struct GSharePredictor {
    ghr: HistoryRegister,
    // 2-bit saturating counters, one per (history ^ pc) pattern.
    pht: SaturatingCounterTable,
    index_mask: u32,
}

impl GSharePredictor {
    /// Builds a predictor with `ghistory_bits` of history and a `2^ghistory_bits` counter table.
    pub fn new(ghistory_bits: u32) -> Self {
        log::debug!(
            "gshare: {} history bits, {} counters",
            ghistory_bits,
            1usize << ghistory_bits
        );
        Self {
            ghr: HistoryRegister::new(ghistory_bits),
            pht: SaturatingCounterTable::new(ghistory_bits),
            index_mask: low_mask(ghistory_bits),
        }
    }

    fn index(&self, pc: u32) -> usize {
        // GShare Index = (PC ^ GlobalHistory) % TableSize
        let pc_part = pc & self.index_mask;
        let ghr_part = self.ghr.value() & self.index_mask;
        (pc_part ^ ghr_part) as usize
    }

    /// Pattern history table.
    pub fn counters(&self) -> &SaturatingCounterTable {
        &self.pht
    }

    /// Global history register.
    pub fn history(&self) -> &HistoryRegister {
        &self.ghr
    }
}

impl BranchPredictor for GSharePredictor {
    type Lookup = GShareLookup;

    fn predict_branch(&self, pc: u32) -> (bool, GShareLookup) {
        let index = self.index(pc);
        (self.pht.predict(index), GShareLookup { index })
    }

    fn update_branch(&mut self, lookup: GShareLookup, taken: bool) {
        self.pht.update(lookup.index, taken);
        self.ghr.push(taken);
    }
}
