//! End-to-end predict-then-train scenarios through the dispatcher.

use bpsim::Dispatcher;
use bpsim::bp::Predictor;
use bpsim::config::{BpType, PredictorConfig};
use pretty_assertions::assert_eq;

use crate::common::{gshare_config, tournament_config};

fn gshare(dispatcher: &Dispatcher) -> &bpsim::bp::gshare::GSharePredictor {
    match dispatcher.predictor() {
        Predictor::GShare(bp) => bp,
        _ => panic!("expected gshare"),
    }
}

/// One history bit: the second taken branch trains a different counter,
/// and only the third prediction sees a taken counter.
#[test]
fn gshare_single_history_bit() {
    let mut dispatcher = Dispatcher::new(&gshare_config(1));

    assert!(!dispatcher.predict(0));
    assert_eq!(gshare(&dispatcher).counters().get(0), 1);
    dispatcher.train(true);
    assert_eq!(gshare(&dispatcher).counters().get(0), 2);
    assert_eq!(gshare(&dispatcher).history().value(), 1);

    // history 1 ^ pc bit 0 -> index 1, still weakly not-taken
    assert!(!dispatcher.predict(0));
    dispatcher.train(true);
    assert_eq!(gshare(&dispatcher).counters().get(1), 2);
    assert_eq!(gshare(&dispatcher).history().value(), 1);

    assert!(dispatcher.predict(0));
}

#[test]
fn gshare_two_history_bits_start_not_taken() {
    let mut dispatcher = Dispatcher::new(&gshare_config(2));
    assert_eq!(gshare(&dispatcher).counters().counters(), &[1, 1, 1, 1]);
    for pc in [0, 1, 2, 3, 0xdead_beef] {
        assert!(!dispatcher.predict(pc));
    }
}

#[test]
fn tournament_initial_state() {
    let dispatcher = Dispatcher::new(&tournament_config(9, 10, 10));
    let Predictor::Tournament(bp) = dispatcher.predictor() else {
        panic!("expected tournament");
    };
    assert!(bp.global_counters().counters().iter().all(|&c| c == 1));
    assert!(bp.local_counters().counters().iter().all(|&c| c == 1));
    assert!(bp.local_histories().patterns().iter().all(|&h| h == 0));
    assert!(bp.choice_counters().counters().iter().all(|&c| c == 1));
    assert_eq!(bp.global_counters().len(), 512);
    assert_eq!(bp.local_histories().len(), 1024);
    assert_eq!(bp.local_counters().len(), 1024);
}

#[test]
fn perceptron_through_dispatcher() {
    let mut dispatcher = Dispatcher::new(&PredictorConfig::with_type(BpType::Custom));
    assert!(dispatcher.predict(0x400));
    dispatcher.train(false);

    let Predictor::Perceptron(bp) = dispatcher.predictor() else {
        panic!("expected perceptron");
    };
    assert_eq!(bp.bias(0), 0);
    assert_eq!(bp.weights(0), &[1; 15]);
    assert_eq!(bp.history().value(), 0);
}

/// A nested loop: the inner branch is taken three times then falls through,
/// the outer branch is always taken. Every model except static should
/// predict the steady state perfectly.
#[test]
fn nested_loop_steady_state() {
    let mut trace = Vec::new();
    for _ in 0..200 {
        for i in 0..4 {
            trace.push((0x0040_1000, i != 3));
        }
        trace.push((0x0040_1010, true));
    }

    let configs = [
        gshare_config(10),
        tournament_config(10, 10, 10),
        PredictorConfig::with_type(BpType::Custom),
    ];
    for config in configs {
        let mut dispatcher = Dispatcher::new(&config);
        let predictions = bpsim::replay(&mut dispatcher, trace.iter().copied());
        let tail = trace.len() - 50;
        let misses = predictions[tail..]
            .iter()
            .zip(&trace[tail..])
            .filter(|&(&p, &(_, taken))| p != taken)
            .count();
        assert_eq!(misses, 0, "{} mispredicted the steady state", dispatcher.name());
    }
}
