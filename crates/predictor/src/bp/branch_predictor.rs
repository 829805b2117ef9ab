/// The interface that all direction predictors implement.
///
/// Prediction and training are split so that the state a model needs to
/// train (the addressed counter, the perceptron output) travels from
/// `predict_branch` to `update_branch` as an explicit lookup token rather
/// than through shared mutable state.
pub trait BranchPredictor {
    /// Bookkeeping captured by a prediction and consumed by training.
    type Lookup: Copy + std::fmt::Debug;

    /// Returns (Predicted Taken?, Lookup token for the paired update).
    fn predict_branch(&self, pc: u32) -> (bool, Self::Lookup);

    /// Trains the tables addressed by `lookup` with the resolved outcome,
    /// then records the outcome in history.
    fn update_branch(&mut self, lookup: Self::Lookup, taken: bool);
}
