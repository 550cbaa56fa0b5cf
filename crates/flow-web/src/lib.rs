#![cfg(target_arch = "wasm32")]
//! Browser bindings.
//!
//! The page owns the camera, the hand detector and the WebGL scene. It feeds
//! detector results into a [`FlowSession`], calls [`FlowSession::frame`] once
//! per animation frame and uploads the returned buffers. Gesture
//! interpretation, shape sampling and particle motion all run in `flow-core`.

use flow_core::{
    DetectorControl, DetectorFrame, DetectorStatus, FlowError, Gradient, Handedness,
    RendererControl, SessionConfig, SessionController, Shape,
};
use js_sys::{Array, Float32Array, Function};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("flow-web loaded");
}

fn js_error(e: FlowError) -> JsError {
    JsError::new(&e.to_string())
}

/// Names accepted by [`FlowSession::set_shape`], in picker order.
#[wasm_bindgen(js_name = shapeNames)]
pub fn shape_names() -> Array {
    Shape::SELECTABLE
        .iter()
        .map(|s| JsValue::from_str(s.name()))
        .collect()
}

/// `[id, name]` pairs for the gradient picker.
#[wasm_bindgen(js_name = gradientPalettes)]
pub fn gradient_palettes() -> Array {
    Gradient::palettes()
        .into_iter()
        .map(|g| {
            let pair = Array::new();
            pair.push(&JsValue::from_str(&g.id));
            pair.push(&JsValue::from_str(&g.name));
            JsValue::from(pair)
        })
        .collect()
}

/// A page callback standing in for the detector or renderer on teardown.
struct JsHook<'a> {
    what: &'static str,
    callback: &'a Function,
}

impl JsHook<'_> {
    fn invoke(&self) {
        if let Err(e) = self.callback.call0(&JsValue::NULL) {
            log::error!("[session] {} teardown failed: {:?}", self.what, e);
        }
    }
}

impl DetectorControl for JsHook<'_> {
    fn stop(&mut self) {
        self.invoke();
    }
}

impl RendererControl for JsHook<'_> {
    fn release(&mut self) {
        self.invoke();
    }
}

#[wasm_bindgen]
pub struct FlowSession {
    inner: SessionController,
}

#[wasm_bindgen]
impl FlowSession {
    /// `shape` and `gradient` fall back to fireworks and golden when absent.
    #[wasm_bindgen(constructor)]
    pub fn new(
        particle_count: u32,
        shape: Option<String>,
        gradient: Option<String>,
        seed: Option<u32>,
    ) -> Result<FlowSession, JsError> {
        let mut config = SessionConfig {
            particle_count: particle_count as usize,
            seed: seed.map(u64::from),
            ..SessionConfig::default()
        };
        if let Some(name) = shape {
            config.base_shape = name.parse().map_err(js_error)?;
        }
        if let Some(id) = gradient {
            config.gradient = Gradient::by_id(&id).map_err(js_error)?;
        }
        let inner = SessionController::new(config).map_err(js_error)?;
        Ok(FlowSession { inner })
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> u32 {
        u32::try_from(self.inner.particle_count()).unwrap_or(u32::MAX)
    }

    /// Detector result: `63` floats per hand and one `"Left"`/`"Right"`
    /// label per hand, in detector order. A frame the detector flags as
    /// invalid counts as having no hands.
    #[wasm_bindgen(js_name = onHands)]
    pub fn on_hands(&mut self, landmarks: &[f32], handedness: Array, frame_valid: bool) {
        let labels: Vec<Handedness> = handedness
            .iter()
            .map(|v| {
                v.as_string()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_default()
            })
            .collect();
        let frame = DetectorFrame::from_flat(landmarks, &labels, frame_valid);
        self.inner.on_detector_frame(&frame);
    }

    /// A single detector call failed; counts as a frame with no hands.
    #[wasm_bindgen(js_name = onDetectorError)]
    pub fn on_detector_error(&mut self, message: &str) {
        self.inner
            .on_detector_error(&FlowError::Detector(message.to_string()));
    }

    #[wasm_bindgen(js_name = detectorReady)]
    pub fn detector_ready(&mut self) {
        self.inner.detector_ready();
    }

    /// Camera or model unavailable. Particles keep animating on idle defaults.
    #[wasm_bindgen(js_name = detectorFailed)]
    pub fn detector_failed(&mut self, message: &str) {
        self.inner
            .detector_failed(&FlowError::DetectorUnavailable(message.to_string()));
    }

    /// True until the detector reports ready or failed.
    #[wasm_bindgen(js_name = isLoading)]
    pub fn is_loading(&self) -> bool {
        self.inner.is_loading()
    }

    #[wasm_bindgen(js_name = detectorError)]
    pub fn detector_error(&self) -> Option<String> {
        match self.inner.detector_status() {
            DetectorStatus::Failed(msg) => Some(msg.clone()),
            _ => None,
        }
    }

    /// Advance one animation frame at `now_ms` (the rAF timestamp). Returns
    /// false once the session is disposed.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        self.inner.frame_at(now_ms / 1000.0).is_some()
    }

    /// `N * 3` positions after the last frame.
    pub fn positions(&self) -> Float32Array {
        Float32Array::from(self.inner.snapshot().positions_flat())
    }

    /// `N * 3` RGB colors after the last frame, flicker applied.
    pub fn colors(&self) -> Float32Array {
        Float32Array::from(self.inner.snapshot().colors_flat())
    }

    #[wasm_bindgen(js_name = rotationY)]
    pub fn rotation_y(&self) -> f32 {
        self.inner.snapshot().rotation_y
    }

    /// Shape on screen, e.g. `heart` or `text("HELLO")`.
    #[wasm_bindgen(js_name = activeShape)]
    pub fn active_shape(&self) -> String {
        self.inner.control().active_shape.to_string()
    }

    #[wasm_bindgen(js_name = setShape)]
    pub fn set_shape(&mut self, name: &str) -> Result<(), JsError> {
        let shape: Shape = name.parse().map_err(js_error)?;
        self.inner.set_shape(shape);
        Ok(())
    }

    #[wasm_bindgen(js_name = setGradient)]
    pub fn set_gradient(&mut self, id: &str) -> Result<(), JsError> {
        let gradient = Gradient::by_id(id).map_err(js_error)?;
        self.inner.set_gradient(gradient);
        Ok(())
    }

    /// Stop frames and detector updates, then call `stop_detector` and
    /// `release_renderer` once each. Later calls do nothing.
    pub fn dispose(&mut self, stop_detector: &Function, release_renderer: &Function) {
        let mut detector = JsHook {
            what: "detector",
            callback: stop_detector,
        };
        let mut renderer = JsHook {
            what: "renderer",
            callback: release_renderer,
        };
        self.inner.shutdown(&mut detector, &mut renderer);
    }
}
