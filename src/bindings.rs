//! JavaScript entry point.
//!
//! `new SyncSliders(container, options)` resolves the markup, builds the
//! controller and wires the DOM triggers (buttons, dots, resize, image
//! load) into it. Dropping the handle detaches every listener it added and
//! stops its timers.

use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget};

use crate::config::{SliderOptions, DOT_INDEX_ATTR};
use crate::controller::SliderController;
use crate::dom::{
    log_js_error, query, resolve_container, with_slider, ControllerSlot, DomScheduler, DomSlider,
    DomSurface,
};
use crate::error::SliderError;
use crate::events::{EventKind, ListenerId, SliderEvent};
use crate::shared::SharedSlider;

/// A DOM event listener removed again on drop.
struct DomListener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl DomListener {
    fn attach(
        target: EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Self {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        log_js_error(
            "addEventListener",
            target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()),
        );
        Self {
            target,
            event,
            closure,
        }
    }
}

impl Drop for DomListener {
    fn drop(&mut self) {
        log_js_error(
            "removeEventListener",
            self.target
                .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref()),
        );
    }
}

/// Index carried by the dot button an event originated from.
fn dot_index(event: &Event) -> Option<usize> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let dot = target
        .closest(&format!("[{}]", DOT_INDEX_ATTR))
        .ok()
        .flatten()?;
    dot.get_attribute(DOT_INDEX_ATTR)?.parse().ok()
}

fn parse_options(options: JsValue) -> Result<SliderOptions, SliderError> {
    if options.is_undefined() || options.is_null() {
        return Ok(SliderOptions::default());
    }
    let options: SliderOptions = serde_wasm_bindgen::from_value(options)
        .map_err(|e| SliderError::InvalidOptions(e.to_string()))?;
    options.validate()?;
    Ok(options)
}

fn call_listener(callback: &js_sys::Function, this: &JsValue, event: &SliderEvent) {
    let result = match *event {
        SliderEvent::BeforeChange { previous, next } => callback.call2(
            this,
            &JsValue::from(previous as u32),
            &JsValue::from(next as u32),
        ),
        SliderEvent::AfterChange { current, previous } => callback.call2(
            this,
            &JsValue::from(current as u32),
            &JsValue::from(previous as u32),
        ),
        SliderEvent::HeightSet { height } => callback.call1(this, &JsValue::from_f64(height)),
        SliderEvent::DotsDestroyed => callback.call0(this),
    };
    if let Err(err) = result {
        warn!("'{}' listener threw: {:?}", event.kind(), err);
    }
}

#[wasm_bindgen]
pub struct SyncSliders {
    // Detached on drop, before the slider goes away.
    _listeners: Vec<DomListener>,
    slider: Rc<DomSlider>,
}

impl SyncSliders {
    /// Mount a slider on an already-resolved container.
    pub fn mount(container: Element, options: SliderOptions) -> Result<Self, SliderError> {
        options.validate()?;
        let surface = DomSurface::resolve(container, &options)?;
        let prev_button = resolve_optional(&options.prev_button)?;
        let next_button = resolve_optional(&options.next_button)?;

        let slot = ControllerSlot::default();
        let controller = SliderController::new(surface, DomScheduler::new(slot.clone()), options)?;
        let slider = Rc::new(SharedSlider::new(controller));
        let weak = Rc::downgrade(&slider);
        if slot.set(weak.clone()).is_err() {
            debug!("Controller slot was already filled");
        }

        let mut listeners = Vec::new();

        if let Some(button) = prev_button {
            let weak = weak.clone();
            listeners.push(DomListener::attach(button.into(), "click", move |_| {
                with_slider(&weak, |c| c.prev());
            }));
        }
        if let Some(button) = next_button {
            let weak = weak.clone();
            listeners.push(DomListener::attach(button.into(), "click", move |_| {
                with_slider(&weak, |c| c.next());
            }));
        }

        let dots_host = slider.read(|c| c.surface().dots_host().cloned())?;
        if let Some(host) = dots_host {
            let weak = weak.clone();
            listeners.push(DomListener::attach(host.into(), "click", move |event| {
                let Some(index) = dot_index(&event) else {
                    return;
                };
                with_slider(&weak, |c| {
                    if let Err(err) = c.go_to(index) {
                        warn!("Dot click ignored: {}", err);
                    }
                });
            }));
        }

        {
            let weak = weak.clone();
            listeners.push(DomListener::attach(
                gloo_utils::window().into(),
                "resize",
                move |_| with_slider(&weak, |c| c.handle_resize()),
            ));
        }

        // Every load of the first image re-measures, e.g. a srcset swap.
        let first_image = slider.read(|c| c.surface().first_image())?;
        let measure_now = first_image.as_ref().map_or(true, |image| image.complete());
        if let Some(image) = first_image {
            listeners.push(DomListener::attach(image.into(), "load", move |_| {
                with_slider(&weak, |c| c.update_height());
            }));
        }
        if measure_now {
            slider.update(|c| c.update_height())?;
        }

        Ok(Self {
            _listeners: listeners,
            slider,
        })
    }

    /// Register a Rust listener for one notification kind.
    ///
    /// Listeners run once the triggering operation has finished, so they may
    /// read or drive this slider.
    pub fn subscribe(
        &self,
        kind: EventKind,
        callback: impl FnMut(&SliderEvent) + 'static,
    ) -> Result<ListenerId, SliderError> {
        self.slider.subscribe(kind, callback)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> Result<bool, SliderError> {
        self.slider.unsubscribe(id)
    }
}

fn resolve_optional(selector: &str) -> Result<Option<Element>, SliderError> {
    if selector.is_empty() {
        Ok(None)
    } else {
        query(selector).map(Some)
    }
}

#[wasm_bindgen]
impl SyncSliders {
    /// `container` is an element or a selector; `options` a plain object
    /// using the camelCase option names, or `undefined` for the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(container: JsValue, options: JsValue) -> Result<SyncSliders, JsError> {
        let options = parse_options(options)?;
        let container = resolve_container(&container)?;
        Ok(Self::mount(container, options)?)
    }

    pub fn next(&self) -> Result<(), JsError> {
        self.slider.update(|c| c.next())?;
        Ok(())
    }

    pub fn prev(&self) -> Result<(), JsError> {
        self.slider.update(|c| c.prev())?;
        Ok(())
    }

    #[wasm_bindgen(js_name = slideTo)]
    pub fn slide_to(&self, index: usize) -> Result<(), JsError> {
        self.slider.update(|c| c.go_to(index))??;
        Ok(())
    }

    pub fn pause(&self) -> Result<(), JsError> {
        self.slider.update(|c| c.pause())?;
        Ok(())
    }

    pub fn resume(&self) -> Result<(), JsError> {
        self.slider.update(|c| c.resume())?;
        Ok(())
    }

    #[wasm_bindgen(js_name = handleResize)]
    pub fn handle_resize(&self) -> Result<(), JsError> {
        self.slider.update(|c| c.handle_resize())?;
        Ok(())
    }

    #[wasm_bindgen(js_name = activeIndex)]
    pub fn active_index(&self) -> Result<usize, JsError> {
        Ok(self.slider.read(|c| c.active_index())?)
    }

    /// Index shown by the second track, `undefined` while merged.
    #[wasm_bindgen(js_name = secondaryIndex)]
    pub fn secondary_index(&self) -> Result<Option<u32>, JsError> {
        Ok(self
            .slider
            .read(|c| c.secondary_index().map(|index| index as u32))?)
    }

    #[wasm_bindgen(js_name = totalSlides)]
    pub fn total_slides(&self) -> Result<usize, JsError> {
        Ok(self.slider.read(|c| c.total_slides())?)
    }

    #[wasm_bindgen(js_name = isMerged)]
    pub fn is_merged(&self) -> Result<bool, JsError> {
        Ok(self.slider.read(|c| c.is_merged())?)
    }

    /// Listen for `beforeChange`, `afterChange`, `set height` or
    /// `destroy dots`. The callback runs with `this_arg` as `this`, or
    /// `undefined` when it is omitted. Returns an id for
    /// [`SyncSliders::off`].
    pub fn on(
        &self,
        event: &str,
        callback: js_sys::Function,
        this_arg: JsValue,
    ) -> Result<u32, JsError> {
        let kind: EventKind = event.parse()?;
        let id = self.subscribe(kind, move |e| call_listener(&callback, &this_arg, e))?;
        debug!(
            "Listener {} added for '{}' ({} registered)",
            id.as_u32(),
            kind,
            self.slider.listener_count()
        );
        Ok(id.as_u32())
    }

    pub fn off(&self, id: u32) -> Result<bool, JsError> {
        Ok(self.unsubscribe(ListenerId::from_u32(id))?)
    }
}
