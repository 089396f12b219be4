use crate::traits::{DynamicalSystem, Scalar, Steppable};

/// Discrete Map Stepper
/// Evaluates x_{n+1} = f(x_n) once per step and tracks t as t + dt.
pub struct DiscreteMap<T: Scalar> {
    tmp: Vec<T>,
}

impl<T: Scalar> DiscreteMap<T> {
    pub fn new(dim: usize) -> Self {
        Self {
            tmp: vec![T::zero(); dim],
        }
    }
}

impl<T: Scalar> Steppable<T> for DiscreteMap<T> {
    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T) {
        if self.tmp.len() != state.len() {
            self.tmp.resize(state.len(), T::zero());
        }

        system.apply(*t, state, &mut self.tmp);
        state.copy_from_slice(&self.tmp);

        // For maps, dt is usually 1.
        *t = *t + dt;
    }
}
