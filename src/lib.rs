//! A small dense matrix engine and a single-neuron perceptron trained on top of it.

pub mod activation;
pub mod matrix;
pub mod network;

pub use activation::{Activation, ActivationVariant};
pub use matrix::{dot_product, Matrix, MatrixError, MatrixItem, Shape};
pub use network::{Ann, NetworkItem, Perceptron};
