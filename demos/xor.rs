use rand::{rngs::StdRng, SeedableRng};
use xornet::{ActivationFunction, Dataset, Network, Topology, TrainConfig, TrainingLoop};

fn main() -> xornet::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let data = Dataset::xor_truth_table();
    let hidden_choices = [
        ("sigmoid/sigmoid", ActivationFunction::Sigmoid),
        ("relu_k/sigmoid", ActivationFunction::bounded_relu(10.0)?),
    ];

    for (name, hidden) in hidden_choices {
        let mut rng = StdRng::seed_from_u64(42);
        let network = Network::new(Topology::xor(), hidden, ActivationFunction::Sigmoid, &mut rng)?;
        let config = TrainConfig::new(0.5, 20_000, 0.01).with_report_every(2_000);

        let mut run = TrainingLoop::new(network, data.clone(), config)?;
        let report = run.run()?;
        println!("{name}: {:?} after {} epochs (mse {:.6})", report.outcome, report.epoch, report.mse);
        if let Some(stats) = run.last_stats() {
            println!("  final accuracy {:?}", stats.accuracy);
        }

        let trained = run.into_network();
        for example in &data {
            let output = trained.predict(example.inputs())?[0];
            println!("  {:?} -> {output:.4}", example.inputs());
        }
    }

    Ok(())
}
