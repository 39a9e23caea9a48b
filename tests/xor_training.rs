use rand::{rngs::StdRng, SeedableRng};
use xornet::data::{generate_xor, parse_csv};
use xornet::train::evaluate;
use xornet::{
    ActivationFunction, Dataset, NetError, Network, RunConfig, Topology, TrainConfig,
    TrainingLoop, TrainingReport, TrainingState,
};

fn train_truth_table(seed: u64, hidden: ActivationFunction, epochs: usize) -> TrainingReport {
    let mut rng = StdRng::seed_from_u64(seed);
    let network = Network::new(Topology::xor(), hidden, ActivationFunction::Sigmoid, &mut rng).unwrap();
    let config = TrainConfig::new(0.5, epochs, 0.01);
    let mut run = TrainingLoop::new(network, Dataset::xor_truth_table(), config).unwrap();
    run.run().unwrap()
}

fn window_means(history: &[f64], windows: usize) -> Vec<f64> {
    let size = (history.len() / windows).max(1);
    history.chunks_exact(size)
        .map(|w| w.iter().sum::<f64>() / w.len() as f64)
        .collect()
}

#[test]
fn sigmoid_network_learns_xor_within_5000_epochs() {
    let report = train_truth_table(0, ActivationFunction::Sigmoid, 5_000);
    assert_eq!(report.outcome, TrainingState::Converged);
    assert!(report.epoch <= 5_000);
    assert!(report.mse <= 0.01);
    assert_eq!(report.accuracy, Some(1.0));
    assert_eq!(report.history.len(), report.epoch);
}

#[test]
fn most_sigmoid_initializations_learn_xor() {
    // A few initializations sit on a plateau for good.
    let reports: Vec<TrainingReport> = (0..12)
        .map(|seed| train_truth_table(seed, ActivationFunction::Sigmoid, 5_000))
        .collect();

    let converged: Vec<&TrainingReport> = reports.iter()
        .filter(|r| r.outcome == TrainingState::Converged)
        .collect();
    assert!(converged.len() >= 9, "only {} of 12 runs converged", converged.len());

    for report in converged {
        assert!(report.epoch <= 5_000);
        assert_eq!(report.accuracy, Some(1.0));
    }
    for report in reports.iter().filter(|r| r.outcome == TrainingState::Exhausted) {
        assert_eq!(report.epoch, 5_000);
        assert!(report.mse > 0.01);
    }
}

#[test]
fn bounded_relu_network_terminates_and_sometimes_learns_xor() {
    let hidden = ActivationFunction::bounded_relu(10.0).unwrap();
    let reports: Vec<TrainingReport> = (0..40)
        .map(|seed| train_truth_table(seed, hidden, 5_000))
        .collect();

    assert!(reports.iter().all(|r| r.outcome != TrainingState::Running));
    let converged: Vec<&TrainingReport> = reports.iter()
        .filter(|r| r.outcome == TrainingState::Converged)
        .collect();
    assert!(!converged.is_empty());
    for report in converged {
        assert_eq!(report.accuracy, Some(1.0));
    }
}

#[test]
fn mse_trends_down_on_learnable_data() {
    let report = (0..12)
        .map(|seed| train_truth_table(seed, ActivationFunction::Sigmoid, 5_000))
        .find(|r| r.outcome == TrainingState::Converged)
        .expect("at least one seed converges");

    let means = window_means(&report.history, 10);
    for pair in means.windows(2) {
        assert!(pair[1] <= pair[0] + 1e-3, "window mean rose from {} to {}", pair[0], pair[1]);
    }
    assert!(means.last().unwrap() < means.first().unwrap());
}

#[test]
fn fully_flipped_labels_still_terminate() {
    let mut rng = StdRng::seed_from_u64(8);
    let data = generate_xor(100, 1.0, &mut rng).unwrap();
    let network = Network::new(Topology::xor(), ActivationFunction::Sigmoid, ActivationFunction::Sigmoid, &mut rng).unwrap();

    let mut run = TrainingLoop::new(network, data, TrainConfig::new(0.5, 300, 0.01)).unwrap();
    let report = run.run().unwrap();
    assert_ne!(report.outcome, TrainingState::Running);
    assert!(report.epoch <= 300);
    assert!(report.mse.is_finite());
}

#[test]
fn identical_runs_are_bit_identical() {
    let a = train_truth_table(17, ActivationFunction::Sigmoid, 300);
    let b = train_truth_table(17, ActivationFunction::Sigmoid, 300);
    assert_eq!(a.outcome, b.outcome);
    assert_eq!(a.epoch, b.epoch);
    let bits = |h: &[f64]| h.iter().map(|m| m.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&a.history), bits(&b.history));
    assert_eq!(a.accuracy.map(f64::to_bits), b.accuracy.map(f64::to_bits));
}

#[test]
fn wrong_arity_dataset_never_touches_the_network() {
    let data = parse_csv("a,b,c,y\n0,0,1,0\n1,0,1,1\n", 1).unwrap();
    let network = Network::new(
        Topology::xor(),
        ActivationFunction::Sigmoid,
        ActivationFunction::Sigmoid,
        &mut StdRng::seed_from_u64(0),
    ).unwrap();
    let snapshot = network.clone();

    assert!(matches!(
        network.forward(data.examples()[0].inputs()),
        Err(NetError::ShapeMismatch { .. })
    ));
    assert_eq!(network, snapshot);

    let res = TrainingLoop::new(network, data, TrainConfig::new(0.5, 10, 0.01));
    assert!(matches!(res, Err(NetError::ShapeMismatch { expected: 2, actual: 3, .. })));
}

#[test]
fn config_file_drives_a_full_run() {
    let config = RunConfig::from_json(
        r#"{"layers": [2, 2, 1], "learning_rate": 0.5, "epochs": 200,
            "target_mse": 0.0, "seed": 3, "report_every": 50}"#,
    ).unwrap();
    let data = parse_csv("x1,x2,y\n0,0,0\n0,1,1\n1,0,1\n1,1,0\n", config.layers.output_size).unwrap();

    let network = config.build_network(&mut config.rng()).unwrap();
    let mut run = TrainingLoop::new(network, data, config.train_config()).unwrap();
    let report = run.run().unwrap();

    assert_eq!(report.outcome, TrainingState::Exhausted);
    assert_eq!(report.epoch, 200);
    let after = evaluate(run.network(), run.dataset()).unwrap();
    assert_eq!(after.seen(), 4);
}
