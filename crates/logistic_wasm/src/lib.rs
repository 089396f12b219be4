//! WASM bindings exposing the logistic map core to the browser UI.
//!
//! The UI collects parameters and renders; every number it draws comes from here.

mod analysis;
mod trajectory;

pub use analysis::{
    analyze_bifurcation, compute_bifurcation, WasmBifurcationDiagram, WasmBifurcationRunner,
};
pub use trajectory::{generate_trajectory, logistic, logistic_elementwise, map_curve, run_cobweb};
