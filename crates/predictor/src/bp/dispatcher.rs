//! Predictor selection and predict-then-train sequencing.
//!
//! The [`Dispatcher`] is the only piece the trace-replay loop talks to. It
//! owns one predictor, chosen at construction, and holds the lookup token of
//! the most recent prediction until the matching `train` call consumes it.

use super::{
    BranchPredictor,
    gshare::{GShareLookup, GSharePredictor},
    perceptron::{PerceptronLookup, PerceptronPredictor},
    static_bp::StaticPredictor,
    tournament::{TournamentLookup, TournamentPredictor},
};
use crate::config::{BpType, PredictorConfig};

/// The active predictor model.
pub enum Predictor {
    /// Always taken.
    Static(StaticPredictor),
    /// Global history XOR pc.
    GShare(GSharePredictor),
    /// Global/local hybrid with a choice table.
    Tournament(TournamentPredictor),
    /// Perceptron over global history.
    Perceptron(PerceptronPredictor),
    /// Unknown mode; always not-taken.
    Unrecognized,
}

impl Predictor {
    /// Builds the model selected by `config.bp_type`.
    ///
    /// The widths in `config` are expected to have passed
    /// [`PredictorConfig::validate`].
    pub fn new(config: &PredictorConfig) -> Self {
        match config.bp_type {
            BpType::Static => Predictor::Static(StaticPredictor::new()),
            BpType::GShare => Predictor::GShare(GSharePredictor::new(config.ghistory_bits)),
            BpType::Tournament => Predictor::Tournament(TournamentPredictor::new(config)),
            BpType::Custom => Predictor::Perceptron(PerceptronPredictor::new(&config.perceptron)),
            BpType::Unrecognized => {
                log::warn!("unrecognized predictor type, predicting not-taken");
                Predictor::Unrecognized
            }
        }
    }
}

/// Lookup token held between `predict` and `train`.
#[derive(Clone, Copy, Debug)]
enum Pending {
    Static,
    GShare(GShareLookup),
    Tournament(TournamentLookup),
    Perceptron(PerceptronLookup),
    Unrecognized,
}

/// Routes `predict`/`train` calls to the configured predictor.
///
/// Callers must alternate: exactly one `predict` per branch, followed by
/// exactly one `train` with that branch's resolved outcome.
pub struct Dispatcher {
    bp_type: BpType,
    predictor: Predictor,
    pending: Option<Pending>,
}

impl Dispatcher {
    /// Allocates and initializes the tables of the configured predictor.
    pub fn new(config: &PredictorConfig) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "predictor configuration must be validated before use"
        );
        Self {
            bp_type: config.bp_type,
            predictor: Predictor::new(config),
            pending: None,
        }
    }

    /// Active predictor type.
    pub fn bp_type(&self) -> BpType {
        self.bp_type
    }

    /// Display name of the active predictor.
    pub fn name(&self) -> &'static str {
        self.bp_type.name()
    }

    /// The active model, for inspection.
    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    /// Predicts the direction of the branch at `pc`.
    ///
    /// A second `predict` before `train` discards the earlier lookup.
    pub fn predict(&mut self, pc: u32) -> bool {
        let (taken, pending) = match &self.predictor {
            Predictor::Static(bp) => {
                let (taken, ()) = bp.predict_branch(pc);
                (taken, Pending::Static)
            }
            Predictor::GShare(bp) => {
                let (taken, lookup) = bp.predict_branch(pc);
                (taken, Pending::GShare(lookup))
            }
            Predictor::Tournament(bp) => {
                let (taken, lookup) = bp.predict_branch(pc);
                (taken, Pending::Tournament(lookup))
            }
            Predictor::Perceptron(bp) => {
                let (taken, lookup) = bp.predict_branch(pc);
                (taken, Pending::Perceptron(lookup))
            }
            Predictor::Unrecognized => (false, Pending::Unrecognized),
        };
        self.pending = Some(pending);
        taken
    }

    /// Trains the predictor with the resolved outcome of the last predicted branch.
    pub fn train(&mut self, taken: bool) {
        let Some(pending) = self.pending.take() else {
            log::warn!("train called without a preceding predict; ignored");
            return;
        };

        match (&mut self.predictor, pending) {
            (Predictor::Static(bp), Pending::Static) => bp.update_branch((), taken),
            (Predictor::GShare(bp), Pending::GShare(lookup)) => bp.update_branch(lookup, taken),
            (Predictor::Tournament(bp), Pending::Tournament(lookup)) => {
                bp.update_branch(lookup, taken)
            }
            (Predictor::Perceptron(bp), Pending::Perceptron(lookup)) => {
                bp.update_branch(lookup, taken)
            }
            (Predictor::Unrecognized, Pending::Unrecognized) => {}
            (_, pending) => unreachable!("lookup {:?} from a different predictor", pending),
        }
    }
}

/// Replays `(pc, taken)` pairs in predict-then-train order.
///
/// Returns the prediction made for each branch.
pub fn replay<I>(dispatcher: &mut Dispatcher, branches: I) -> Vec<bool>
where
    I: IntoIterator<Item = (u32, bool)>,
{
    branches
        .into_iter()
        .map(|(pc, taken)| {
            let prediction = dispatcher.predict(pc);
            dispatcher.train(taken);
            prediction
        })
        .collect()
}
