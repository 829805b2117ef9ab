pub use self::branch_predictor::BranchPredictor;
pub use self::dispatcher::{Dispatcher, Predictor, replay};

pub mod branch_predictor;
pub mod counter;
pub mod dispatcher;
pub mod gshare;
pub mod history;
pub mod perceptron;
pub mod static_bp;
pub mod tournament;
