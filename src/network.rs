use num::Float;
use rand::distributions::uniform::SampleUniform;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::activation::Activation;
use crate::activation::ActivationVariant;
use crate::matrix::dot_product;
use crate::matrix::Matrix;
use crate::matrix::MatrixError;
use crate::matrix::MatrixItem;
use crate::matrix::Result;
use crate::matrix::Shape;

pub trait NetworkItem: MatrixItem + Float + SampleUniform {}
impl NetworkItem for f32 {}
impl NetworkItem for f64 {}

/// An artificial neural network that can be trained on a set of examples and
/// then queried on new inputs.
pub trait Ann<T: NetworkItem> {
    type Output;

    /// Fit the network to `outputs` by running exactly `iterations` passes over `inputs`.
    fn train(&mut self, inputs: &Matrix<T>, outputs: &Matrix<T>, iterations: usize) -> Result<()>;

    /// Run the network on `inputs`.
    fn think(&self, inputs: &Matrix<T>) -> Result<Self::Output>;
}

/// A single neuron: one shared weight row followed by an activation function.
///
/// Every input row is combined with the same `1 x columns` weight vector, so
/// the number of training examples is independent of the network size.
#[derive(Debug, Clone)]
pub struct Perceptron<T, U = ActivationVariant<T>>
where
    T: NetworkItem,
    U: Activation<T>,
{
    /// Seed of the generator the initial weights were drawn from.
    pub seed: u64,
    pub weights: Matrix<T>,
    activation: U,
}

impl<T> Perceptron<T, ActivationVariant<T>>
where
    T: NetworkItem,
{
    /// Create a sigmoid neuron with `columns` inputs and a fresh random seed.
    pub fn new(columns: usize) -> Self {
        Self::with_seed(columns, rand::thread_rng().gen())
    }

    /// Create a sigmoid neuron whose weights are reproducible from `seed`.
    pub fn with_seed(columns: usize, seed: u64) -> Self {
        Self::with_activation(columns, seed, ActivationVariant::Sigmoid)
    }
}

impl<T, U> Perceptron<T, U>
where
    T: NetworkItem,
    U: Activation<T>,
{
    pub fn with_activation(columns: usize, seed: u64, activation: U) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut weights = Matrix::new(1, columns);
        weights.randomize(&mut rng);

        Self {
            seed,
            weights,
            activation,
        }
    }

    /// Inputs must have one column per weight.
    fn check_inputs(&self, inputs: &Matrix<T>, op: &'static str) -> Result<()> {
        inputs.validate()?;
        self.weights.validate()?;

        if inputs.columns != self.weights.columns {
            return Err(MatrixError::shape(
                op,
                Shape::new(inputs.rows, self.weights.columns),
                inputs.shape(),
            ));
        }

        Ok(())
    }

    /// Activation of every input row, as an `inputs.rows x 1` matrix.
    pub fn think(&self, inputs: &Matrix<T>) -> Result<Matrix<T>> {
        self.check_inputs(inputs, "think")?;

        let mut thoughts = Matrix::new(inputs.rows, 1);
        for (thought, row) in thoughts.data.iter_mut().zip(inputs.data.iter()) {
            for (weights, item) in self.weights.data.iter().zip(thought.iter_mut()) {
                *item = self.activation.activate(dot_product(row, weights)?);
            }
        }

        Ok(thoughts)
    }

    /// Gradient descent with an implicit step size of one.
    ///
    /// Weights updated by earlier iterations are kept if a later one fails.
    pub fn train(&mut self, inputs: &Matrix<T>, outputs: &Matrix<T>, iterations: usize) -> Result<()> {
        self.check_inputs(inputs, "train")?;
        outputs.validate()?;

        if outputs.shape() != Shape::new(inputs.rows, 1) {
            return Err(MatrixError::shape(
                "train",
                Shape::new(inputs.rows, 1),
                outputs.shape(),
            ));
        }

        let inputs_transposed = inputs.transpose()?;

        for _ in 0..iterations {
            let prediction = self.think(inputs)?;

            let mut error = outputs.clone();
            error.subtract_tensor(&prediction)?;

            for (row, predicted) in error.data.iter_mut().zip(prediction.data.iter()) {
                row[0] = row[0] * self.activation.differentiate(predicted[0]);
            }

            let adjustment = inputs_transposed.multiply_tensor(&error)?;
            let delta = adjustment.get_column(0)?;

            for weights in self.weights.data.iter_mut() {
                for (weight, &d) in weights.iter_mut().zip(delta.iter()) {
                    *weight += d;
                }
            }
        }

        Ok(())
    }

    /// Mean squared error of the current predictions against `outputs`.
    pub fn cost(&self, inputs: &Matrix<T>, outputs: &Matrix<T>) -> Result<T> {
        let mut diff = self.think(inputs)?;
        diff.subtract_tensor(outputs)?;

        let mut result = T::zero();
        for &item in diff.data.iter().flatten() {
            result += item * item;
        }

        if diff.rows == 0 {
            return Ok(result);
        }

        Ok(result / T::from(diff.rows).unwrap_or_else(T::one))
    }
}

impl<T, U> Ann<T> for Perceptron<T, U>
where
    T: NetworkItem,
    U: Activation<T>,
{
    type Output = Matrix<T>;

    fn train(&mut self, inputs: &Matrix<T>, outputs: &Matrix<T>, iterations: usize) -> Result<()> {
        Perceptron::train(self, inputs, outputs, iterations)
    }

    fn think(&self, inputs: &Matrix<T>) -> Result<Self::Output> {
        Perceptron::think(self, inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_inputs_rejects_wrong_column_count() {
        let perceptron = Perceptron::<f64>::with_seed(3, 1);
        let inputs = Matrix::new(4, 2);

        let err = perceptron.check_inputs(&inputs, "think").unwrap_err();

        assert_eq!(
            err,
            MatrixError::Shape {
                op: "think",
                expected: Shape::new(4, 3),
                actual: Shape::new(4, 2),
            }
        );
    }

    #[test]
    fn train_reports_its_own_name_for_narrow_inputs() {
        let mut perceptron = Perceptron::<f64>::with_seed(3, 1);
        let inputs = Matrix::new(4, 2);
        let outputs = Matrix::new(4, 1);

        let err = perceptron.train(&inputs, &outputs, 1).unwrap_err();

        assert_eq!(
            err,
            MatrixError::Shape {
                op: "train",
                expected: Shape::new(4, 3),
                actual: Shape::new(4, 2),
            }
        );
    }
}
