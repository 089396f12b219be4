//! The logistic recurrence x(t+1) = r·x(t)·(1 - x(t)).
//!
//! Nothing here validates r or x: values outside (0,4] and [0,1] are passed
//! through, and overflow or NaN propagates silently.

use crate::error::{LogisticError, Result};
use crate::traits::{DynamicalSystem, Scalar};

/// Default resolution of the map parabola drawn under the cobweb.
pub const DEFAULT_CURVE_SAMPLES: usize = 50;

/// One step of the logistic map.
pub fn logistic<T: Scalar>(r: T, x: T) -> T {
    r * x * (T::one() - x)
}

/// Derivative of the logistic map with respect to x: r - 2·r·x.
pub fn logistic_derivative<T: Scalar>(r: T, x: T) -> T {
    let two = T::one() + T::one();
    r - two * r * x
}

/// Elementwise logistic step over conformant slices.
///
/// A length-1 slice broadcasts against the other operand; any other length
/// mismatch is rejected.
pub fn logistic_elementwise<T: Scalar>(r: &[T], x: &[T]) -> Result<Vec<T>> {
    match (r.len(), x.len()) {
        (a, b) if a == b => Ok(r.iter().zip(x).map(|(&r, &x)| logistic(r, x)).collect()),
        (1, _) => Ok(x.iter().map(|&x| logistic(r[0], x)).collect()),
        (_, 1) => Ok(r.iter().map(|&r| logistic(r, x[0])).collect()),
        (a, b) => Err(LogisticError::invalid(format!(
            "Cannot broadcast growth rates of length {} against states of length {}.",
            a, b
        ))),
    }
}

/// `count` evenly spaced values from `min` to `max`, both endpoints exact.
///
/// Interpolates instead of stepping so that `max - min` may exceed `f64::MAX`.
pub fn linspace(min: f64, max: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let last = (count - 1) as f64;
            let mut values: Vec<f64> = (0..count)
                .map(|i| {
                    let t = i as f64 / last;
                    min * (1.0 - t) + max * t
                })
                .collect();
            values[0] = min;
            values[count - 1] = max;
            values
        }
    }
}

/// Samples (t, logistic(r, t)) over t in [0,1].
pub fn map_curve(r: f64, samples: usize) -> Vec<[f64; 2]> {
    linspace(0.0, 1.0, samples)
        .into_iter()
        .map(|t| [t, logistic(r, t)])
        .collect()
}

/// Applies a single growth rate to every state component.
#[derive(Debug, Clone, Copy)]
pub struct LogisticMap<T: Scalar> {
    pub r: T,
    dim: usize,
}

impl<T: Scalar> LogisticMap<T> {
    pub fn new(r: T, dim: usize) -> Self {
        Self { r, dim }
    }
}

impl<T: Scalar> DynamicalSystem<T> for LogisticMap<T> {
    fn dimension(&self) -> usize {
        self.dim
    }

    fn apply(&self, _t: T, x: &[T], out: &mut [T]) {
        for (o, &v) in out.iter_mut().zip(x) {
            *o = logistic(self.r, v);
        }
    }
}

/// Component i evolves under growth rate `rates[i]`.
#[derive(Debug, Clone)]
pub struct LogisticSweep {
    pub rates: Vec<f64>,
}

impl LogisticSweep {
    pub fn new(rates: Vec<f64>) -> Self {
        Self { rates }
    }
}

impl DynamicalSystem<f64> for LogisticSweep {
    fn dimension(&self) -> usize {
        self.rates.len()
    }

    fn apply(&self, _t: f64, x: &[f64], out: &mut [f64]) {
        for ((o, &r), &v) in out.iter_mut().zip(&self.rates).zip(x) {
            *o = logistic(r, v);
        }
    }
}
