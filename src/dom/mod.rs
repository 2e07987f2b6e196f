//! Browser host: a `web-sys` render surface and a `gloo-timers` scheduler.

mod scheduler;
mod surface;

pub use scheduler::{ControllerSlot, DomScheduler, DomTimer};
pub use surface::DomSurface;

use std::rc::Weak;

use log::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;

use crate::controller::SliderController;
use crate::error::SliderError;
use crate::shared::SharedSlider;

pub type DomController = SliderController<DomSurface, DomScheduler>;
pub type DomSlider = SharedSlider<DomSurface, DomScheduler>;

/// Find the first element matching `selector` in the document.
pub fn query(selector: &str) -> Result<Element, SliderError> {
    gloo_utils::document()
        .query_selector(selector)
        .ok()
        .flatten()
        .ok_or_else(|| SliderError::SelectorNotFound(selector.to_string()))
}

/// Accept either an element or a selector string.
pub fn resolve_container(handle: &JsValue) -> Result<Element, SliderError> {
    if let Some(element) = handle.dyn_ref::<Element>() {
        return Ok(element.clone());
    }
    match handle.as_string() {
        Some(selector) => query(&selector),
        None => Err(SliderError::InvalidContainer),
    }
}

/// Run `f` against the slider if it is still alive and not mid-operation.
pub(crate) fn with_slider(slider: &Weak<DomSlider>, f: impl FnOnce(&mut DomController)) {
    let Some(slider) = slider.upgrade() else {
        return;
    };
    if let Err(err) = slider.update(f) {
        warn!("{}", err);
    }
}

pub(crate) fn log_js_error<T>(context: &str, result: Result<T, JsValue>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("{} failed: {:?}", context, err);
            None
        }
    }
}
