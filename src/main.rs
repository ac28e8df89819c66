use anyhow::Context;
use perceptron::Matrix;
use perceptron::Perceptron;

const TD_INPUTS: [f64; 3 * 4] = [
    0.0, 0.0, 1.0, //
    1.0, 1.0, 1.0, //
    1.0, 0.0, 1.0, //
    0.0, 1.0, 1.0, //
];

const TD_OUTPUTS: [f64; 4] = [0.0, 1.0, 1.0, 0.0];

const SEED: u64 = 1;
const ITERATIONS: usize = 10_000;
const REPORT_EVERY: usize = 2_500;

fn main() -> anyhow::Result<()> {
    let inputs = Matrix::with_items(TD_INPUTS, 4, 3).context("building training inputs")?;
    let outputs = Matrix::with_items(TD_OUTPUTS, 4, 1).context("building training outputs")?;
    let mut network: Perceptron<f64> = Perceptron::with_seed(inputs.columns, SEED);

    println!("seed: {}", network.seed);
    println!("weights before training:\n{:.5}", network.weights);

    for done in (0..ITERATIONS).step_by(REPORT_EVERY) {
        let step = REPORT_EVERY.min(ITERATIONS - done);
        network.train(&inputs, &outputs, step).context("training")?;

        let cost = network.cost(&inputs, &outputs)?;
        println!("iteration {}: cost {cost:.6}", done + step);
    }

    println!("weights after training:\n{:.5}", network.weights);

    let novel = Matrix::from_rows(vec![vec![1.0, 0.0, 0.0]])?;
    let answer = network.think(&novel).context("thinking about new data")?;

    println!("thinking about new data:\n{novel}");
    println!("answers to new data:\n{answer:.5}");

    Ok(())
}
