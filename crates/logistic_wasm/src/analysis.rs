//! Bifurcation/Lyapunov analysis bindings and the batched sweep runner.

use js_sys::Float64Array;
use logistic_core::bifurcation::{
    analyze_bifurcation as core_bifurcation, BifurcationDiagram, BifurcationParams,
    BifurcationRunner, LyapunovSeries,
};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
pub(crate) struct BifurcationPayload {
    r_values: Vec<f64>,
    recorded: Vec<f64>,
    recorded_groups: usize,
    lyapunov: Vec<f64>,
    series: LyapunovSeries,
    anomalies: Vec<f64>,
}

impl From<BifurcationDiagram> for BifurcationPayload {
    fn from(diagram: BifurcationDiagram) -> Self {
        let series = diagram.lyapunov_series();
        let anomalies = diagram.numeric_anomalies();
        Self {
            r_values: diagram.r_values,
            recorded: diagram.recorded,
            recorded_groups: diagram.recorded_groups,
            lyapunov: diagram.lyapunov,
            series,
            anomalies,
        }
    }
}

/// Runs a whole sweep. `params` may be partial; missing fields take their defaults.
#[wasm_bindgen]
pub fn analyze_bifurcation(params: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let params: BifurcationParams = if params.is_undefined() || params.is_null() {
        BifurcationParams::default()
    } else {
        from_value(params).map_err(|e| JsValue::from_str(&format!("Invalid params: {}", e)))?
    };
    let diagram = core_bifurcation(params)
        .map_err(|e| JsValue::from_str(&format!("Bifurcation analysis failed: {}", e)))?;

    to_value(&BifurcationPayload::from(diagram))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// A finished sweep kept on the Rust side; bulk arrays are copied out as typed arrays.
#[wasm_bindgen]
pub struct WasmBifurcationDiagram {
    diagram: BifurcationDiagram,
}

#[wasm_bindgen]
impl WasmBifurcationDiagram {
    pub fn r_values(&self) -> Float64Array {
        Float64Array::from(self.diagram.r_values.as_slice())
    }

    /// Row-major, `recorded_groups()` rows of `r_values().length` x-values.
    pub fn recorded(&self) -> Float64Array {
        Float64Array::from(self.diagram.recorded.as_slice())
    }

    pub fn recorded_groups(&self) -> usize {
        self.diagram.recorded_groups
    }

    pub fn lyapunov(&self) -> Float64Array {
        Float64Array::from(self.diagram.lyapunov.as_slice())
    }

    pub fn anomalies(&self) -> Float64Array {
        Float64Array::from(self.diagram.numeric_anomalies().as_slice())
    }

    pub fn series(&self) -> Result<JsValue, JsValue> {
        to_value(&self.diagram.lyapunov_series())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

fn sweep_params(
    sample_count: u32,
    r_min: f64,
    r_max: f64,
    iterations: u32,
    last_window: u32,
) -> BifurcationParams {
    BifurcationParams {
        sample_count: sample_count as usize,
        r_min,
        r_max,
        iterations: iterations as usize,
        last_window: last_window as usize,
        ..BifurcationParams::default()
    }
}

/// Runs a whole sweep and keeps the result in Rust memory.
#[wasm_bindgen]
pub fn compute_bifurcation(
    sample_count: u32,
    r_min: f64,
    r_max: f64,
    iterations: u32,
    last_window: u32,
) -> Result<WasmBifurcationDiagram, JsValue> {
    let params = sweep_params(sample_count, r_min, r_max, iterations, last_window);
    let diagram = core_bifurcation(params)
        .map_err(|e| JsValue::from_str(&format!("Bifurcation analysis failed: {}", e)))?;
    Ok(WasmBifurcationDiagram { diagram })
}

#[wasm_bindgen]
pub struct WasmBifurcationRunner {
    state: Option<BifurcationRunner>,
}

#[wasm_bindgen]
impl WasmBifurcationRunner {
    #[wasm_bindgen(constructor)]
    pub fn new(
        sample_count: u32,
        r_min: f64,
        r_max: f64,
        iterations: u32,
        last_window: u32,
    ) -> Result<WasmBifurcationRunner, JsValue> {
        #[cfg(target_arch = "wasm32")]
        console_error_panic_hook::set_once();

        let params = sweep_params(sample_count, r_min, r_max, iterations, last_window);
        let runner = BifurcationRunner::new(params)
            .map_err(|e| JsValue::from_str(&format!("Bifurcation analysis failed: {}", e)))?;

        Ok(WasmBifurcationRunner {
            state: Some(runner),
        })
    }

    pub fn is_done(&self) -> bool {
        self.state.as_ref().map_or(true, |state| state.is_done())
    }

    pub fn run_steps(&mut self, batch_size: u32) -> Result<JsValue, JsValue> {
        let state = self
            .state
            .as_mut()
            .ok_or_else(|| JsValue::from_str("Runner not initialized"))?;
        let progress = state.run_steps(batch_size as usize);
        to_value(&progress).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn get_progress(&self) -> Result<JsValue, JsValue> {
        let state = self
            .state
            .as_ref()
            .ok_or_else(|| JsValue::from_str("Runner not initialized"))?;
        to_value(&state.progress())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Finishes the sweep and hands back the diagram. The runner is spent afterwards.
    pub fn get_result(&mut self) -> Result<JsValue, JsValue> {
        let state = self
            .state
            .take()
            .ok_or_else(|| JsValue::from_str("Runner not initialized"))?;
        to_value(&BifurcationPayload::from(state.finish()))
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Like `get_result`, but returns a handle whose arrays come out as `Float64Array`s.
    pub fn finish(&mut self) -> Result<WasmBifurcationDiagram, JsValue> {
        let state = self
            .state
            .take()
            .ok_or_else(|| JsValue::from_str("Runner not initialized"))?;
        Ok(WasmBifurcationDiagram {
            diagram: state.finish(),
        })
    }
}
