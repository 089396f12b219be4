//! Bifurcation diagram and Lyapunov exponent estimates over a sweep of growth rates.
//!
//! Every r-value in the sweep starts from the same small positive x and is
//! iterated in lockstep. The running sum of ln|f'(x)| is normalized by the
//! iteration count once the sweep finishes; the x-values visited during the
//! final `last_window` iterations form the bifurcation point cloud.

use crate::error::{LogisticError, Result};
use crate::map::{linspace, logistic_derivative, LogisticSweep};
use crate::solvers::DiscreteMap;
use crate::traits::Steppable;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Starting population for every r-value. Keeps clear of the x = 0 fixed point.
pub const INITIAL_STATE: f64 = 1e-5;

/// Upper bound on `sample_count × iterations` accepted by default.
pub const DEFAULT_WORK_LIMIT: u64 = 200_000_000;

/// Upper bound on recorded x-values, `sample_count × last_window` (80 MB of f64).
pub const RECORD_LIMIT: u64 = 10_000_000;

fn default_work_limit() -> u64 {
    DEFAULT_WORK_LIMIT
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BifurcationParams {
    pub sample_count: usize,
    pub r_min: f64,
    pub r_max: f64,
    pub iterations: usize,
    pub last_window: usize,
    /// Set by the host only; never read from deserialized requests.
    #[serde(skip, default = "default_work_limit")]
    pub work_limit: u64,
}

impl Default for BifurcationParams {
    fn default() -> Self {
        Self {
            sample_count: 1000,
            r_min: 2.5,
            r_max: 4.0,
            iterations: 1000,
            last_window: 100,
            work_limit: DEFAULT_WORK_LIMIT,
        }
    }
}

impl BifurcationParams {
    /// Total number of recurrence evaluations the sweep performs.
    pub fn work(&self) -> u64 {
        (self.sample_count as u64).saturating_mul(self.iterations as u64)
    }

    /// Number of x-values the sweep records for the scatter.
    pub fn recorded_len(&self) -> u64 {
        (self.sample_count as u64).saturating_mul(self.last_window as u64)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.r_min.is_finite() || !self.r_max.is_finite() {
            return Err(LogisticError::invalid("Sweep bounds must be finite."));
        }
        if self.r_min >= self.r_max {
            return Err(LogisticError::invalid(format!(
                "r_min ({}) must be less than r_max ({}).",
                self.r_min, self.r_max
            )));
        }
        if self.last_window > self.iterations {
            return Err(LogisticError::invalid(format!(
                "last_window ({}) exceeds iterations ({}).",
                self.last_window, self.iterations
            )));
        }
        if self.work() > self.work_limit {
            return Err(LogisticError::invalid(format!(
                "Sweep of {} samples × {} iterations exceeds the work limit of {}.",
                self.sample_count, self.iterations, self.work_limit
            )));
        }
        if self.recorded_len() > RECORD_LIMIT {
            return Err(LogisticError::invalid(format!(
                "Recording {} samples × {} iterations exceeds the record limit of {} values.",
                self.sample_count, self.last_window, RECORD_LIMIT
            )));
        }
        Ok(())
    }
}

/// Progress payload for batched sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisProgress {
    pub done: bool,
    pub current_step: usize,
    pub max_steps: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BifurcationDiagram {
    pub r_values: Vec<f64>,
    /// Row-major: one group of `r_values.len()` x-values per recorded iteration.
    pub recorded: Vec<f64>,
    pub recorded_groups: usize,
    /// Time-averaged Lyapunov exponent per r-value.
    pub lyapunov: Vec<f64>,
}

impl BifurcationDiagram {
    pub fn groups(&self) -> impl Iterator<Item = &[f64]> + '_ {
        let width = self.r_values.len().max(1);
        self.recorded.chunks(width)
    }

    /// (r, x) pairs of the bifurcation scatter, in recording order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.groups()
            .flat_map(move |group| self.r_values.iter().copied().zip(group.iter().copied()))
    }

    pub fn lyapunov_series(&self) -> LyapunovSeries {
        LyapunovSeries::partition(&self.r_values, &self.lyapunov)
    }

    /// r-values whose exponent estimate is NaN or infinite.
    pub fn numeric_anomalies(&self) -> Vec<f64> {
        self.r_values
            .iter()
            .zip(&self.lyapunov)
            .filter(|(_, value)| !value.is_finite())
            .map(|(&r, _)| r)
            .collect()
    }
}

/// Lyapunov estimates split for display: negative is stable, non-negative is chaotic.
/// NaN estimates land in `undefined`, so every r-value appears exactly once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LyapunovSeries {
    pub stable: Vec<[f64; 2]>,
    pub chaotic: Vec<[f64; 2]>,
    pub undefined: Vec<f64>,
}

impl LyapunovSeries {
    pub fn partition(r_values: &[f64], exponents: &[f64]) -> Self {
        let mut series = LyapunovSeries::default();
        for (&r, &lambda) in r_values.iter().zip(exponents) {
            if lambda.is_nan() {
                series.undefined.push(r);
            } else if lambda < 0.0 {
                series.stable.push([r, lambda]);
            } else {
                series.chaotic.push([r, lambda]);
            }
        }
        series
    }
}

/// Owns one sweep's state and advances it in caller-sized batches.
pub struct BifurcationRunner {
    params: BifurcationParams,
    sweep: LogisticSweep,
    stepper: DiscreteMap<f64>,
    state: Vec<f64>,
    lyapunov: Vec<f64>,
    recorded: Vec<f64>,
    recorded_groups: usize,
    t: f64,
    steps_done: usize,
    done: bool,
}

impl BifurcationRunner {
    pub fn new(params: BifurcationParams) -> Result<Self> {
        params.validate()?;

        let n = params.sample_count;
        let r_values = linspace(params.r_min, params.r_max, n);
        debug!(
            "Starting bifurcation sweep: {} samples in [{}, {}], {} iterations, recording last {}",
            n, params.r_min, params.r_max, params.iterations, params.last_window
        );

        Ok(Self {
            params,
            sweep: LogisticSweep::new(r_values),
            stepper: DiscreteMap::new(n),
            state: vec![INITIAL_STATE; n],
            lyapunov: vec![0.0; n],
            recorded: Vec::new(),
            recorded_groups: 0,
            t: 0.0,
            steps_done: 0,
            done: params.iterations == 0,
        })
    }

    pub fn params(&self) -> &BifurcationParams {
        &self.params
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn progress(&self) -> AnalysisProgress {
        AnalysisProgress {
            done: self.done,
            current_step: self.steps_done,
            max_steps: self.params.iterations,
        }
    }

    pub fn run_steps(&mut self, batch_size: usize) -> AnalysisProgress {
        let iterations = self.params.iterations;
        let record_from = iterations - self.params.last_window;

        for _ in 0..batch_size {
            if self.steps_done >= iterations {
                break;
            }

            self.stepper.step(&self.sweep, &mut self.t, &mut self.state, 1.0);

            for ((sum, &r), &x) in self
                .lyapunov
                .iter_mut()
                .zip(&self.sweep.rates)
                .zip(&self.state)
            {
                *sum += logistic_derivative(r, x).abs().ln();
            }

            if self.steps_done >= record_from {
                self.recorded.extend_from_slice(&self.state);
                self.recorded_groups += 1;
            }

            self.steps_done += 1;
        }

        if self.steps_done >= iterations {
            self.done = true;
        }

        self.progress()
    }

    /// Runs any remaining iterations, then normalizes the exponent sums.
    pub fn finish(mut self) -> BifurcationDiagram {
        let remaining = self.params.iterations - self.steps_done;
        self.run_steps(remaining);

        let mut lyapunov = self.lyapunov;
        if self.params.iterations > 0 {
            let scale = self.params.iterations as f64;
            for value in &mut lyapunov {
                *value /= scale;
            }
        }

        let diagram = BifurcationDiagram {
            r_values: self.sweep.rates,
            recorded: self.recorded,
            recorded_groups: self.recorded_groups,
            lyapunov,
        };

        let anomalies = diagram.numeric_anomalies();
        if !anomalies.is_empty() {
            warn!(
                "{} of {} Lyapunov estimates are not finite (first at r = {})",
                anomalies.len(),
                diagram.r_values.len(),
                anomalies[0]
            );
        }
        debug!(
            "Bifurcation sweep finished: {} recorded groups",
            diagram.recorded_groups
        );

        diagram
    }
}

/// Runs a full sweep with freshly allocated state.
pub fn analyze_bifurcation(params: BifurcationParams) -> Result<BifurcationDiagram> {
    Ok(BifurcationRunner::new(params)?.finish())
}
