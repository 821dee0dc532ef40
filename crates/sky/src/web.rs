//! Browser host: DOM renderer, `requestAnimationFrame` loop and JS bindings.
//!
//! Input wiring (sliders, buttons) stays in page script and calls into `WebSky`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::config::SkyConfig;
use crate::registry::CloudParams;
use crate::render::{Renderer, VisualSpec};
use crate::{Sky, SkyError};

/// Draws each cloud as a blurred `div.cloud` inside a container element.
#[derive(Debug)]
pub struct DomRenderer {
    document: Document,
    container: Element,
}

impl DomRenderer {
    pub fn new(container_id: &str) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| JsValue::from_str(&format!("container #{container_id} not found")))?;
        Ok(Self { document, container })
    }

    fn build(&self, spec: &VisualSpec) -> Result<HtmlElement, JsValue> {
        let element: HtmlElement = self.document.create_element("div")?.dyn_into()?;
        element.set_class_name("cloud");
        let style = element.style();
        style.set_property("width", &format!("{}px", spec.width_px))?;
        style.set_property("height", &format!("{}px", spec.height_px))?;
        style.set_property("filter", &format!("blur({}px)", spec.blur_px))?;
        style.set_property("opacity", &spec.opacity.to_string())?;
        style.set_property("transform", &translate(spec.x, spec.y))?;
        self.container.append_child(&element)?;
        Ok(element)
    }
}

fn translate(x: f64, y: f64) -> String {
    format!("translate3d({x}vw, {y}vh, 0)")
}

impl Renderer for DomRenderer {
    /// `None` when the element could not be created; the cloud still moves.
    type Handle = Option<HtmlElement>;

    fn create_visual(&mut self, spec: &VisualSpec) -> Self::Handle {
        match self.build(spec) {
            Ok(element) => Some(element),
            Err(err) => {
                log::warn!("failed to create cloud element: {err:?}");
                None
            }
        }
    }

    fn update_position(&mut self, handle: &Self::Handle, x: f64, y: f64) {
        let Some(element) = handle else { return };
        if let Err(err) = element.style().set_property("transform", &translate(x, y)) {
            log::warn!("failed to move cloud element: {err:?}");
        }
    }
}

type FrameCallback = Closure<dyn FnMut()>;

/// Running `requestAnimationFrame` loop. `stop()` or dropping it cancels the
/// pending frame and releases the callback.
#[derive(Debug)]
struct AnimationLoop {
    callback: Rc<RefCell<Option<FrameCallback>>>,
    pending: Rc<Cell<Option<i32>>>,
}

impl AnimationLoop {
    fn start(sky: Rc<RefCell<Sky<DomRenderer>>>) -> Self {
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let next = Rc::clone(&callback);
        let next_pending = Rc::clone(&pending);
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            sky.borrow_mut().tick();
            next_pending.set(next.borrow().as_ref().and_then(request_frame));
        }) as Box<dyn FnMut()>));

        pending.set(callback.borrow().as_ref().and_then(request_frame));
        Self { callback, pending }
    }

    fn stop(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(window) = web_sys::window() {
                if let Err(err) = window.cancel_animation_frame(id) {
                    log::warn!("cancel_animation_frame failed: {err:?}");
                }
            }
        }
        self.callback.borrow_mut().take();
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(callback: &FrameCallback) -> Option<i32> {
    let window = web_sys::window()?;
    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(err) => {
            log::warn!("request_animation_frame failed: {err:?}");
            None
        }
    }
}

fn init_logging() {
    console_error_panic_hook::set_once();
    // Already initialised when a second sky is created on the same page.
    let _ = console_log::init_with_level(log::Level::Info);
}

fn to_js(err: &SkyError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn viewport_width() -> Option<f64> {
    web_sys::window()?.inner_width().ok()?.as_f64()
}

#[wasm_bindgen]
#[derive(Debug)]
pub struct WebSky {
    sky: Rc<RefCell<Sky<DomRenderer>>>,
    animation: Option<AnimationLoop>,
}

impl WebSky {
    fn build(container_id: &str, config: &SkyConfig) -> Result<WebSky, JsValue> {
        init_logging();
        let renderer = DomRenderer::new(container_id)?;
        let sky = Sky::new(config, renderer).map_err(|e| to_js(&e))?;
        Ok(WebSky {
            sky: Rc::new(RefCell::new(sky)),
            animation: None,
        })
    }
}

#[wasm_bindgen]
impl WebSky {
    /// Default wind and the opening scene, sized to the current window.
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str) -> Result<WebSky, JsValue> {
        let mut config = SkyConfig::default();
        if let Some(width) = viewport_width() {
            config.viewport_width_px = width;
        }
        Self::build(container_id, &config)
    }

    /// Build from a TOML document. The configured viewport width is used as is.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(container_id: &str, toml: &str) -> Result<WebSky, JsValue> {
        let config = SkyConfig::from_toml_str(toml).map_err(|e| to_js(&e))?;
        Self::build(container_id, &config)
    }

    #[wasm_bindgen(js_name = setWindSpeed)]
    pub fn set_wind_speed(&self, value: f64) {
        self.sky.borrow_mut().set_wind_speed(value);
    }

    #[wasm_bindgen(js_name = setWindDirection)]
    pub fn set_wind_direction(&self, degrees: f64) {
        self.sky.borrow_mut().set_wind_direction(degrees);
    }

    /// Unknown size or thickness names fall back to `md` / `thick`.
    #[wasm_bindgen(js_name = addCloud)]
    pub fn add_cloud(&self, x: f64, y: f64, size: &str, thickness: &str) {
        let params = CloudParams::from_names(x, y, size, thickness);
        self.sky.borrow_mut().create(&params);
    }

    #[wasm_bindgen(js_name = addRandomCloud)]
    pub fn add_random_cloud(&self) {
        self.sky.borrow_mut().add_random_cloud(&mut rand::thread_rng());
    }

    pub fn tick(&self) {
        self.sky.borrow_mut().tick();
    }

    /// Start ticking once per animation frame. No-op if already running.
    pub fn start(&mut self) {
        if self.animation.is_none() {
            self.animation = Some(AnimationLoop::start(Rc::clone(&self.sky)));
        }
    }

    pub fn stop(&mut self) {
        if let Some(animation) = self.animation.take() {
            animation.stop();
        }
    }

    #[wasm_bindgen(js_name = cloudCount)]
    pub fn cloud_count(&self) -> usize {
        self.sky.borrow().clouds().len()
    }
}
