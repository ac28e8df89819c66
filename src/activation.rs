use crate::network::NetworkItem;

/// Implement this trait to your struct to have custom activation functions.
pub trait Activation<T: NetworkItem> {
    fn activate(&self, x: T) -> T;

    /// Derivative expressed in terms of the activation output `y = activate(x)`.
    fn differentiate(&self, y: T) -> T;
}

/// Builtin activation function options.
#[derive(Default, Debug, Clone, Copy)]
pub enum ActivationVariant<T> {
    #[default]
    Sigmoid,
    Identity,
    Custom {
        f: fn(T) -> T,
        d: fn(T) -> T,
    },
}

impl<T> Activation<T> for ActivationVariant<T>
where
    T: NetworkItem,
{
    fn activate(&self, x: T) -> T {
        use ActivationVariant::*;

        match *self {
            Sigmoid => T::one() / (T::one() + (-x).exp()),
            Identity => x,
            Custom { f, .. } => f(x),
        }
    }

    fn differentiate(&self, y: T) -> T {
        use ActivationVariant::*;

        match *self {
            Sigmoid => y * (T::one() - y),
            Identity => T::one(),
            Custom { d, .. } => d(y),
        }
    }
}
