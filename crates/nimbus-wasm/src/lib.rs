//! WASM bindings for the nimbus weather-model demo.
//!
//! This crate provides WebAssembly bindings for use in browsers: decode NPY
//! buffers handed over from JavaScript, run the model through the tract
//! backend, and report timing and output shapes.

use wasm_bindgen::prelude::*;

use nimbus_core::pipeline;
use nimbus_core::{npy, ForecastReport, SessionOptions, TractBackend};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Decode an NPY buffer and return its header facts (version, shape,
/// element count) without keeping the payload.
#[wasm_bindgen]
pub fn inspect_npy(bytes: &[u8]) -> Result<JsValue, JsValue> {
    let info = npy::inspect(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;

    #[derive(serde::Serialize)]
    struct InspectResult {
        version: String,
        shape: Vec<usize>,
        element_count: usize,
    }

    serde_wasm_bindgen::to_value(&InspectResult {
        version: format!("{}.{}", info.major, info.minor),
        shape: info.shape,
        element_count: info.element_count,
    })
    .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Weather demo session for browser use.
///
/// Holds a tract-backed model; each call to [`WeatherDemo::run`] decodes the
/// two NPY buffers, binds them to the model's declared inputs in order
/// (surface first, upper second), and runs inference.
#[wasm_bindgen]
pub struct WeatherDemo {
    backend: TractBackend,
}

#[wasm_bindgen]
impl WeatherDemo {
    /// Load a model from bytes. Tract needs each input pinned to a concrete
    /// shape; pass the surface and upper input shapes up front.
    #[wasm_bindgen(constructor)]
    pub fn new(
        model_bytes: &[u8],
        surface_shape: Vec<u32>,
        upper_shape: Vec<u32>,
    ) -> Result<WeatherDemo, JsValue> {
        let shapes = vec![to_usize(&surface_shape), to_usize(&upper_shape)];

        let backend = TractBackend::from_bytes(model_bytes, &shapes, &SessionOptions::default())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(WeatherDemo { backend })
    }

    /// Input names declared by the model.
    #[wasm_bindgen]
    pub fn input_names(&self) -> Vec<String> {
        use nimbus_core::InferenceBackend;
        self.backend.input_names().to_vec()
    }

    /// Decode both NPY buffers and run inference.
    ///
    /// Returns `{ run_ms, inputs: [...], outputs: [...] }` where each entry
    /// carries the tensor name, shape, and element count.
    #[wasm_bindgen]
    pub fn run(&self, surface_bytes: &[u8], upper_bytes: &[u8]) -> Result<JsValue, JsValue> {
        let started = js_sys::Date::now();

        let surface = npy::decode(surface_bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let upper = npy::decode(upper_bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let report = pipeline::infer(&self.backend, vec![surface, upper])
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        #[derive(serde::Serialize)]
        struct TimedReport {
            run_ms: f64,
            #[serde(flatten)]
            report: ForecastReport,
        }

        serde_wasm_bindgen::to_value(&TimedReport {
            run_ms: js_sys::Date::now() - started,
            report,
        })
        .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

fn to_usize(dims: &[u32]) -> Vec<usize> {
    dims.iter().map(|&d| d as usize).collect()
}
