use super::BranchPredictor;

/// Always predicts taken and never trains.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticPredictor;

impl StaticPredictor {
    pub fn new() -> Self {
        Self
    }
}

impl BranchPredictor for StaticPredictor {
    type Lookup = ();

    fn predict_branch(&self, _pc: u32) -> (bool, ()) {
        (true, ())
    }

    fn update_branch(&mut self, _lookup: (), _taken: bool) {}
}
