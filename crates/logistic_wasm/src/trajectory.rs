//! Recurrence and cobweb bindings.

use js_sys::Float64Array;
use logistic_core::map::{self, DEFAULT_CURVE_SAMPLES};
use logistic_core::trajectory::{self as core_trajectory, CobwebParams, Trajectory};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn logistic(r: f64, x: f64) -> f64 {
    map::logistic(r, x)
}

#[wasm_bindgen]
pub fn logistic_elementwise(r: Vec<f64>, x: Vec<f64>) -> Result<Float64Array, JsValue> {
    let values = map::logistic_elementwise(&r, &x)
        .map_err(|e| JsValue::from_str(&format!("Logistic evaluation failed: {}", e)))?;
    Ok(Float64Array::from(values.as_slice()))
}

/// Flattened (t, f(t)) pairs over [0,1]; `samples = 0` selects the default resolution.
#[wasm_bindgen]
pub fn map_curve(r: f64, samples: u32) -> Float64Array {
    let samples = if samples == 0 {
        DEFAULT_CURVE_SAMPLES
    } else {
        samples as usize
    };
    let flat: Vec<f64> = map::map_curve(r, samples).into_iter().flatten().collect();
    Float64Array::from(flat.as_slice())
}

#[wasm_bindgen]
pub fn generate_trajectory(r: f64, x0: f64, iterations: u32) -> Result<JsValue, JsValue> {
    run_checked(CobwebParams {
        r,
        x0,
        iterations: iterations as usize,
    })
}

/// Same as `generate_trajectory`, taking a (possibly partial) `CobwebParams` object.
#[wasm_bindgen]
pub fn run_cobweb(params: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let params: CobwebParams = if params.is_undefined() || params.is_null() {
        CobwebParams::default()
    } else {
        from_value(params).map_err(|e| JsValue::from_str(&format!("Invalid params: {}", e)))?
    };
    run_checked(params)
}

fn run_checked(params: CobwebParams) -> Result<JsValue, JsValue> {
    params
        .validate()
        .map_err(|e| JsValue::from_str(&format!("Cobweb generation failed: {}", e)))?;
    to_value(&TrajectoryPayload::from(params.run()))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[derive(Serialize)]
pub(crate) struct TrajectoryPayload {
    segments: Vec<[f64; 4]>,
    time: Vec<usize>,
    values: Vec<f64>,
    opacity: Vec<f64>,
}

impl From<Trajectory> for TrajectoryPayload {
    fn from(trajectory: Trajectory) -> Self {
        let opacity = (0..trajectory.len())
            .map(|i| trajectory.opacity(i))
            .collect();
        Self {
            segments: trajectory
                .segments
                .iter()
                .map(|s| [s.start[0], s.start[1], s.end[0], s.end[1]])
                .collect(),
            time: trajectory.time_series.iter().map(|p| p.index).collect(),
            values: trajectory.time_series.iter().map(|p| p.value).collect(),
            opacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_flattens_segments_in_order() {
        let payload = TrajectoryPayload::from(core_trajectory::generate_trajectory(2.5, 0.5, 2));
        assert_eq!(payload.segments.len(), 4);
        assert_eq!(payload.segments[0], [0.5, 0.5, 0.5, 0.625]);
        assert_eq!(payload.segments[1], [0.5, 0.625, 0.625, 0.625]);
        assert_eq!(payload.time, vec![0, 1]);
        assert_eq!(payload.values[0], 0.625);
        assert_eq!(payload.opacity, vec![0.5, 1.0]);
    }

    #[test]
    fn payload_for_zero_iterations_is_empty() {
        let payload = TrajectoryPayload::from(core_trajectory::generate_trajectory(3.0, 0.5, 0));
        assert!(payload.segments.is_empty());
        assert!(payload.values.is_empty());
        assert!(payload.opacity.is_empty());
    }

    #[test]
    fn logistic_binding_forwards_to_core() {
        assert_eq!(logistic(2.5, 0.5), 0.625);
    }

    #[cfg(target_arch = "wasm32")]
    mod wasm {
        use super::super::*;
        use wasm_bindgen_test::wasm_bindgen_test;

        #[wasm_bindgen_test]
        fn elementwise_rejects_mismatched_lengths() {
            let result = logistic_elementwise(vec![1.0, 2.0], vec![0.1, 0.2, 0.3]);
            let message = result
                .err()
                .and_then(|err| err.as_string())
                .unwrap_or_default();
            assert!(message.contains("broadcast"));
        }

        #[wasm_bindgen_test]
        fn map_curve_defaults_to_fifty_samples() {
            assert_eq!(map_curve(3.0, 0).length(), 2 * 50);
            assert_eq!(map_curve(3.0, 3).to_vec(), vec![0.0, 0.0, 0.5, 0.75, 1.0, 0.0]);
        }

        #[wasm_bindgen_test]
        fn generate_trajectory_rejects_oversized_runs() {
            let message = generate_trajectory(3.0, 0.5, u32::MAX)
                .err()
                .and_then(|err| err.as_string())
                .unwrap_or_default();
            assert!(message.contains("exceeds the limit"));
        }

        #[wasm_bindgen_test]
        fn run_cobweb_accepts_missing_params() {
            let value = run_cobweb(JsValue::UNDEFINED).expect("default cobweb");
            assert!(value.is_object());
        }
    }
}
