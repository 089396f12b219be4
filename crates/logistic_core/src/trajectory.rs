//! Cobweb trajectories of the logistic map from a single initial condition.

use crate::error::{LogisticError, Result};
use crate::map::LogisticMap;
use crate::solvers::DiscreteMap;
use crate::traits::Steppable;
use serde::{Deserialize, Serialize};

/// Longest cobweb run accepted from an interactive request.
pub const COBWEB_ITERATION_LIMIT: usize = 1_000_000;

/// Inputs of a cobweb run. Defaults are the initial values of the interactive view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CobwebParams {
    pub r: f64,
    pub x0: f64,
    pub iterations: usize,
}

impl Default for CobwebParams {
    fn default() -> Self {
        Self {
            r: 2.5,
            x0: 0.5,
            iterations: 10,
        }
    }
}

/// A 2-point line segment of the cobweb diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CobwebSegment {
    pub start: [f64; 2],
    pub end: [f64; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub index: usize,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    /// Two segments per iteration: vertical (x,x)-(x,y), then horizontal (x,y)-(y,y).
    pub segments: Vec<CobwebSegment>,
    /// (i, x(i+1)) for i in 0..n.
    pub time_series: Vec<TrajectoryPoint>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.time_series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_series.is_empty()
    }

    /// Marker opacity for iteration `index`, rising linearly to 1 at the last step.
    /// An empty trajectory has nothing to draw, so every index maps to 0.
    pub fn opacity(&self, index: usize) -> f64 {
        let n = self.len();
        if n == 0 {
            return 0.0;
        }
        ((index + 1) as f64 / n as f64).min(1.0)
    }

    pub fn final_value(&self) -> Option<f64> {
        self.time_series.last().map(|p| p.value)
    }
}

/// Iterates the logistic map `n` times from `x0`.
///
/// r and x0 are not validated; non-finite values propagate.
pub fn generate_trajectory(r: f64, x0: f64, n: usize) -> Trajectory {
    let system = LogisticMap::new(r, 1);
    let mut stepper = DiscreteMap::new(1);
    let mut state = [x0];
    let mut t = 0.0;

    let reserve = n.min(COBWEB_ITERATION_LIMIT);
    let mut segments = Vec::with_capacity(reserve * 2);
    let mut time_series = Vec::with_capacity(reserve);

    for index in 0..n {
        let x = state[0];
        stepper.step(&system, &mut t, &mut state, 1.0);
        let y = state[0];

        segments.push(CobwebSegment {
            start: [x, x],
            end: [x, y],
        });
        segments.push(CobwebSegment {
            start: [x, y],
            end: [y, y],
        });
        time_series.push(TrajectoryPoint { index, value: y });
    }

    Trajectory {
        segments,
        time_series,
    }
}

impl CobwebParams {
    /// Only the run length is checked; r and x0 pass through unvalidated.
    pub fn validate(&self) -> Result<()> {
        if self.iterations > COBWEB_ITERATION_LIMIT {
            return Err(LogisticError::invalid(format!(
                "Cobweb of {} iterations exceeds the limit of {}.",
                self.iterations, COBWEB_ITERATION_LIMIT
            )));
        }
        Ok(())
    }

    pub fn run(&self) -> Trajectory {
        generate_trajectory(self.r, self.x0, self.iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::logistic;

    #[test]
    fn single_step_matches_logistic_value() {
        let trajectory = generate_trajectory(2.5, 0.5, 1);
        assert_eq!(
            trajectory.time_series,
            vec![TrajectoryPoint {
                index: 0,
                value: 0.625
            }]
        );
        assert_eq!(
            trajectory.segments,
            vec![
                CobwebSegment {
                    start: [0.5, 0.5],
                    end: [0.5, 0.625]
                },
                CobwebSegment {
                    start: [0.5, 0.625],
                    end: [0.625, 0.625]
                },
            ]
        );
    }

    #[test]
    fn zero_iterations_yield_empty_trajectory() {
        let trajectory = generate_trajectory(3.0, 0.2, 0);
        assert!(trajectory.is_empty());
        assert!(trajectory.segments.is_empty());
        assert_eq!(trajectory.opacity(0), 0.0);
        assert_eq!(trajectory.final_value(), None);
    }

    #[test]
    fn lengths_and_recurrence_hold() {
        let (r, x0, n) = (3.7, 0.31, 40);
        let trajectory = generate_trajectory(r, x0, n);
        assert_eq!(trajectory.len(), n);
        assert_eq!(trajectory.segments.len(), 2 * n);

        let mut previous = x0;
        for (i, point) in trajectory.time_series.iter().enumerate() {
            assert_eq!(point.index, i);
            assert_eq!(point.value, logistic(r, previous));
            previous = point.value;
        }
    }

    #[test]
    fn segments_chain_through_the_diagonal() {
        let trajectory = generate_trajectory(3.2, 0.1, 5);
        for pair in trajectory.segments.chunks(2) {
            let (vertical, horizontal) = (pair[0], pair[1]);
            assert_eq!(vertical.start[0], vertical.start[1]);
            assert_eq!(vertical.end, horizontal.start);
            assert_eq!(horizontal.end[0], horizontal.end[1]);
        }
        let steps: Vec<&[CobwebSegment]> = trajectory.segments.chunks(2).collect();
        for window in steps.windows(2) {
            assert_eq!(window[0][1].end, window[1][0].start);
        }
    }

    #[test]
    fn repeated_calls_are_identical() {
        let a = generate_trajectory(3.9, 0.42, 100);
        let b = generate_trajectory(3.9, 0.42, 100);
        assert_eq!(a, b);
    }

    #[test]
    fn r_two_converges_to_one_half() {
        for &x0 in &[0.05, 0.3, 0.5, 0.77, 0.95] {
            let trajectory = generate_trajectory(2.0, x0, 50);
            let last = trajectory.final_value().expect("non-empty");
            assert!((last - 0.5).abs() < 1e-12, "x0 = {x0} ended at {last}");
        }
    }

    #[test]
    fn opacity_rises_to_one() {
        let trajectory = generate_trajectory(2.5, 0.5, 4);
        assert_eq!(trajectory.opacity(0), 0.25);
        assert_eq!(trajectory.opacity(3), 1.0);
        assert_eq!(trajectory.opacity(10), 1.0);
    }

    #[test]
    fn out_of_domain_inputs_pass_through() {
        let trajectory = generate_trajectory(5.0, 0.5, 3);
        assert_eq!(trajectory.time_series[0].value, 1.25);
        assert!(trajectory.time_series[2].value < 0.0);

        let trajectory = generate_trajectory(f64::NAN, 0.5, 2);
        assert!(trajectory.time_series.iter().all(|p| p.value.is_nan()));
    }

    #[test]
    fn params_have_interactive_defaults() {
        let params = CobwebParams::default();
        let trajectory = params.run();
        assert_eq!(trajectory.len(), 10);
        assert_eq!(trajectory.time_series[0].value, 0.625);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn params_reject_oversized_runs() {
        let params = CobwebParams {
            iterations: u32::MAX as usize,
            ..CobwebParams::default()
        };
        let err = params.validate().expect_err("oversized run");
        assert!(matches!(err, LogisticError::InvalidParameter(_)));
        assert!(err.to_string().contains("exceeds the limit"));

        let at_limit = CobwebParams {
            iterations: COBWEB_ITERATION_LIMIT,
            ..CobwebParams::default()
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn runs_past_the_reservation_still_complete() {
        let n = COBWEB_ITERATION_LIMIT + 3;
        let trajectory = generate_trajectory(2.0, 0.3, n);
        assert_eq!(trajectory.len(), n);
        assert_eq!(trajectory.segments.len(), 2 * n);
    }
}
