use super::{BranchPredictor, history::HistoryRegister, history::low_mask};
use crate::config::PerceptronConfig;

/// Largest magnitude a weight or bias may reach.
pub const WEIGHT_LIMIT: i8 = 127;

const INITIAL_BIAS: i8 = 1;

/// State captured by [`PerceptronPredictor::predict_branch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PerceptronLookup {
    row: usize,
    sum: i32,
    history: u32,
}

impl PerceptronLookup {
    /// Perceptron the prediction was computed from.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Perceptron output; taken iff non-negative.
    pub fn sum(&self) -> i32 {
        self.sum
    }
}

/// Perceptron predictor indexed by program counter over global history.
///
/// Each row of the table holds a bias followed by one weight per history
/// bit. Weights saturate at +/-127 instead of wrapping.
#[derive(Clone, Debug)]
pub struct PerceptronPredictor {
    ghr: HistoryRegister,
    table: Vec<i8>,
    history_length: usize,
    row_mask: u32,
    row_size: usize,
    threshold: i32,
}

impl PerceptronPredictor {
    pub fn new(config: &PerceptronConfig) -> Self {
        let table_entries = 1usize << config.table_bits;
        let hist_len = config.history_length as usize;
        let row_size = hist_len + 1;
        let threshold = config.threshold();

        let mut table = vec![0; table_entries * row_size];
        for row in table.chunks_exact_mut(row_size) {
            row[0] = INITIAL_BIAS;
        }

        log::debug!(
            "perceptron: {} perceptrons x {} weights, theta {}",
            table_entries,
            hist_len,
            threshold
        );

        Self {
            ghr: HistoryRegister::new(config.history_length),
            table,
            history_length: hist_len,
            row_mask: low_mask(config.table_bits),
            row_size,
            threshold,
        }
    }

    fn row(&self, pc: u32) -> usize {
        (pc & self.row_mask) as usize
    }

    fn output(&self, row: usize, history: u32) -> i32 {
        let base = row * self.row_size;
        let mut y = self.table[base] as i32;

        for i in 0..self.history_length {
            let w = self.table[base + 1 + i] as i32;
            if (history >> i) & 1 != 0 {
                y += w;
            } else {
                y -= w;
            }
        }
        y
    }

    /// Training threshold (theta).
    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    /// Global history register.
    pub fn history(&self) -> &HistoryRegister {
        &self.ghr
    }

    /// Number of perceptrons.
    pub fn rows(&self) -> usize {
        self.table.len() / self.row_size
    }

    /// Bias of perceptron `row`.
    pub fn bias(&self, row: usize) -> i8 {
        self.table[(row & self.row_mask as usize) * self.row_size]
    }

    /// Weights of perceptron `row`; element `i` pairs with history bit `i`.
    pub fn weights(&self, row: usize) -> &[i8] {
        let base = (row & self.row_mask as usize) * self.row_size;
        &self.table[base + 1..base + self.row_size]
    }
}

/// Moves a weight or bias one step up or down, clamping at +/-[`WEIGHT_LIMIT`].
pub fn nudge(w: i8, up: bool) -> i8 {
    if up {
        if w < WEIGHT_LIMIT { w + 1 } else { w }
    } else if w > -WEIGHT_LIMIT {
        w - 1
    } else {
        w
    }
}

impl BranchPredictor for PerceptronPredictor {
    type Lookup = PerceptronLookup;

    fn predict_branch(&self, pc: u32) -> (bool, PerceptronLookup) {
        let row = self.row(pc);
        let history = self.ghr.value();
        let sum = self.output(row, history);
        (sum >= 0, PerceptronLookup { row, sum, history })
    }

    fn update_branch(&mut self, lookup: PerceptronLookup, taken: bool) {
        let predicted = lookup.sum >= 0;

        if predicted != taken || lookup.sum.abs() <= self.threshold {
            let base = lookup.row * self.row_size;
            self.table[base] = nudge(self.table[base], taken);

            for i in 0..self.history_length {
                let bit = (lookup.history >> i) & 1 != 0;
                let w_idx = base + 1 + i;
                self.table[w_idx] = nudge(self.table[w_idx], bit == taken);
            }
        }

        self.ghr.push(taken);
    }
}
