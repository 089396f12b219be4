pub mod bifurcation;
pub mod error;
pub mod map;
pub mod solvers;
/// The `logistic_core` crate provides the numeric engine behind the logistic map explorer.
/// Every operation is a pure computation over freshly allocated state; rendering and user
/// interaction live outside this crate.
///
/// Key components:
/// - **Map**: the recurrence `r·x·(1-x)`, its derivative, and the single-rate and sweep systems.
/// - **Trajectory**: cobweb segments and the time series from one initial condition.
/// - **Bifurcation**: a lockstep sweep over growth rates producing the attractor point cloud
///   and time-averaged Lyapunov exponents, runnable in batches.
/// - **Traits / Solvers**: `DynamicalSystem`, `Steppable` and the `DiscreteMap` stepper.
pub mod traits;
pub mod trajectory;

pub use bifurcation::{
    analyze_bifurcation, AnalysisProgress, BifurcationDiagram, BifurcationParams,
    BifurcationRunner, LyapunovSeries,
};
pub use error::{LogisticError, Result};
pub use map::{logistic, logistic_derivative, logistic_elementwise, map_curve};
pub use trajectory::{
    generate_trajectory, CobwebParams, CobwebSegment, Trajectory, TrajectoryPoint,
};
