use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// A trait for types that can be used as scalars by the recurrence engine.
/// Must support basic arithmetic, debug printing, and conversion from f64.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// Represents a discrete-time dynamical system x(t+1) = f(x(t)).
pub trait DynamicalSystem<T: Scalar> {
    /// Returns the dimension of the state space.
    fn dimension(&self) -> usize;

    /// Evaluates the map.
    /// t: current iteration
    /// x: current state
    /// out: buffer receiving x(t+1)
    fn apply(&self, t: T, x: &[T], out: &mut [T]);
}

/// A trait for steppers that advance a system by one iteration.
pub trait Steppable<T: Scalar> {
    /// t: current iteration (updated after step)
    /// state: current state (updated after step)
    /// dt: increment applied to t
    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T);
}
