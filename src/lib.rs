#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod geom;
pub mod icicle;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use icicle::{EdgeInput, IcicleConfig, PreviewSilhouette, RunDiagnostics};

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {}

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

#[derive(Debug, Serialize)]
struct MeshExport<'a> {
    anchor: [f64; 3],
    vertices: &'a [[f64; 3]],
    faces: &'a [Vec<u32>],
}

#[derive(Debug, Serialize)]
struct GenerateResponse<'a> {
    seed: u64,
    meshes: Vec<MeshExport<'a>>,
    diagnostics: &'a RunDiagnostics,
    report: Vec<String>,
}

/// Public entry point for JavaScript consumers.
///
/// Holds the current settings and an optional seed; edges are passed per
/// call as `[{ id, endpoints: [[x, y, z], [x, y, z]], selected }]`.
#[wasm_bindgen]
pub struct IcicleEngine {
    config: IcicleConfig,
    seed: Option<u64>,
    last_diagnostics: Option<RunDiagnostics>,
}

impl Default for IcicleEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl IcicleEngine {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> IcicleEngine {
        IcicleEngine {
            config: IcicleConfig::default(),
            seed: None,
            last_diagnostics: None,
        }
    }

    /// Replaces the settings. Missing fields take their defaults.
    #[wasm_bindgen]
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: IcicleConfig = serde_wasm_bindgen::from_value(config).map_err(to_js_error)?;
        debug_log!("icicle config updated: {:?}", config);
        self.config = config;
        Ok(())
    }

    #[wasm_bindgen]
    pub fn get_config(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.config).map_err(to_js_error)
    }

    /// Fixes the seed for following runs.
    #[wasm_bindgen]
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = Some(seed);
    }

    /// Goes back to a fresh random seed per run.
    #[wasm_bindgen]
    pub fn clear_seed(&mut self) {
        self.seed = None;
    }

    /// Generates icicles for `edges` and returns the cone meshes together
    /// with the run diagnostics.
    #[wasm_bindgen]
    pub fn generate(&mut self, edges: JsValue) -> Result<JsValue, JsValue> {
        let edges: Vec<EdgeInput> = serde_wasm_bindgen::from_value(edges).map_err(to_js_error)?;
        let seed = self.seed.unwrap_or_else(rand::random);
        let outcome = icicle::run_seeded(&edges, &self.config, seed);

        let response = GenerateResponse {
            seed,
            meshes: outcome
                .cones
                .iter()
                .map(|cone| MeshExport {
                    anchor: cone.anchor,
                    vertices: &cone.mesh.positions,
                    faces: &cone.mesh.faces,
                })
                .collect(),
            diagnostics: &outcome.diagnostics,
            report: outcome.diagnostics.report_lines(),
        };
        let value = serde_wasm_bindgen::to_value(&response).map_err(to_js_error)?;
        self.last_diagnostics = Some(outcome.diagnostics);
        Ok(value)
    }

    /// Smallest and largest cone outline per eligible edge.
    #[wasm_bindgen]
    pub fn preview(&self, edges: JsValue) -> Result<JsValue, JsValue> {
        let edges: Vec<EdgeInput> = serde_wasm_bindgen::from_value(edges).map_err(to_js_error)?;
        let silhouettes: Vec<PreviewSilhouette> =
            icicle::preview_silhouettes(&edges, &self.config);
        serde_wasm_bindgen::to_value(&silhouettes).map_err(to_js_error)
    }

    /// Diagnostics of the last `generate` call as readable text.
    #[wasm_bindgen]
    pub fn last_report(&self) -> Option<String> {
        self.last_diagnostics.as_ref().map(ToString::to_string)
    }
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
