use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlImageElement};

use super::{log_js_error, query};
use crate::config::{
    SliderOptions, DOTS_LIST_CLASS, DOT_ACTIVE_CLASS, DOT_INDEX_ATTR, MERGED_CLASS,
    SLIDER_SELECTOR, TRACK_SELECTOR, TRANSITION_CLASS,
};
use crate::error::SliderError;
use crate::surface::{RenderSurface, TrackId, TrackOffset};

fn slot(track: TrackId) -> usize {
    match track {
        TrackId::Primary => 0,
        TrackId::Secondary => 1,
    }
}

/// Render surface backed by the `.sync-slider` markup inside a container.
pub struct DomSurface {
    container: Element,
    sliders: [HtmlElement; 2],
    tracks: [HtmlElement; 2],
    offsets: [Option<TrackOffset>; 2],
    dots_host: Option<Element>,
    dots_list: Option<Element>,
}

impl DomSurface {
    /// Locate both tracks and the dots host, failing fast on missing markup.
    pub fn resolve(container: Element, options: &SliderOptions) -> Result<Self, SliderError> {
        let found = container
            .query_selector_all(SLIDER_SELECTOR)
            .map_err(|_| SliderError::SelectorNotFound(SLIDER_SELECTOR.to_string()))?;
        if found.length() < 2 {
            return Err(SliderError::MissingTracks {
                found: found.length() as usize,
            });
        }

        let slider_at = |i: u32| -> Result<HtmlElement, SliderError> {
            found
                .item(i)
                .and_then(|node| node.dyn_into::<HtmlElement>().ok())
                .ok_or(SliderError::MissingTracks { found: i as usize })
        };
        let track_in = |slider: &HtmlElement| -> Result<HtmlElement, SliderError> {
            slider
                .query_selector(TRACK_SELECTOR)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                .ok_or_else(|| SliderError::SelectorNotFound(TRACK_SELECTOR.to_string()))
        };

        let first = slider_at(0)?;
        let second = slider_at(1)?;
        let tracks = [track_in(&first)?, track_in(&second)?];

        let dots_host = if options.has_dots() {
            Some(query(&options.dots_selector)?)
        } else {
            None
        };

        Ok(Self {
            container,
            sliders: [first, second],
            tracks,
            offsets: [None, None],
            dots_host,
            dots_list: None,
        })
    }

    pub fn dots_host(&self) -> Option<&Element> {
        self.dots_host.as_ref()
    }

    /// First image of the primary track; each of its loads re-measures the height.
    pub fn first_image(&self) -> Option<HtmlImageElement> {
        self.tracks[0]
            .query_selector("img")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
    }

    fn track(&self, track: TrackId) -> &HtmlElement {
        &self.tracks[slot(track)]
    }
}

impl RenderSurface for DomSurface {
    type Slide = Element;

    fn slide_count(&self, track: TrackId) -> usize {
        self.track(track).children().length() as usize
    }

    fn slides(&self, track: TrackId) -> Vec<Element> {
        let children = self.track(track).children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .collect()
    }

    fn move_slides(&mut self, slides: &[Element], to: TrackId) {
        let target = self.track(to);
        for slide in slides {
            log_js_error("appendChild", target.append_child(slide));
        }
    }

    fn track_offset(&self, track: TrackId) -> Option<TrackOffset> {
        self.offsets[slot(track)]
    }

    fn set_track_offset(&mut self, track: TrackId, offset: TrackOffset) {
        log_js_error(
            "set transform",
            self.track(track)
                .style()
                .set_property("transform", &offset.to_css()),
        );
        self.offsets[slot(track)] = Some(offset);
    }

    fn set_track_visible(&mut self, track: TrackId, visible: bool) {
        let style = self.sliders[slot(track)].style();
        if visible {
            log_js_error("show track", style.remove_property("display"));
        } else {
            log_js_error("hide track", style.set_property("display", "none"));
        }
    }

    fn set_transitions_enabled(&mut self, enabled: bool) {
        for track in &self.tracks {
            log_js_error(
                "toggle transition class",
                track.class_list().toggle_with_force(TRANSITION_CLASS, enabled),
            );
        }
    }

    fn set_merged_marker(&mut self, merged: bool) {
        log_js_error(
            "toggle merged class",
            self.container
                .class_list()
                .toggle_with_force(MERGED_CLASS, merged),
        );
    }

    fn viewport_width(&self) -> u32 {
        gloo_utils::window()
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .map(|w| w.max(0.0) as u32)
            .unwrap_or(0)
    }

    fn measure_slide_height(&self) -> Option<f64> {
        let slide = self.tracks[0].first_element_child()?;
        let style = gloo_utils::window().get_computed_style(&slide).ok()??;
        let raw = style.get_property_value("height").ok()?;
        let height = raw.trim().trim_end_matches("px").parse::<f64>().ok();
        if height.is_none() {
            debug!("Unparseable slide height '{}'", raw);
        }
        height
    }

    fn set_height(&mut self, height: f64) {
        let value = format!("{}px", height);
        for slider in &self.sliders {
            log_js_error("set height", slider.style().set_property("height", &value));
        }
    }

    fn render_dots(&mut self, count: usize) {
        let Some(host) = self.dots_host.as_ref() else {
            return;
        };
        let document = gloo_utils::document();
        let Some(list) = log_js_error("create ul", document.create_element("ul")) else {
            return;
        };
        log_js_error("add dots class", list.class_list().add_1(DOTS_LIST_CLASS));

        for i in 0..count {
            let (Some(item), Some(button)) = (
                log_js_error("create li", document.create_element("li")),
                log_js_error("create button", document.create_element("button")),
            ) else {
                continue;
            };
            button.set_text_content(Some(&(i + 1).to_string()));
            log_js_error(
                "set dot index",
                button.set_attribute(DOT_INDEX_ATTR, &i.to_string()),
            );
            log_js_error("append button", item.append_child(&button));
            log_js_error("append li", list.append_child(&item));
        }

        log_js_error("append dots", host.append_child(&list));
        self.dots_list = Some(list);
    }

    fn set_active_dot(&mut self, previous: Option<usize>, current: usize) {
        let Some(list) = self.dots_list.as_ref() else {
            return;
        };
        let items = list.children();
        if let Some(prev) = previous.and_then(|p| items.item(p as u32)) {
            log_js_error("clear active dot", prev.class_list().remove_1(DOT_ACTIVE_CLASS));
        }
        if let Some(item) = items.item(current as u32) {
            log_js_error("mark active dot", item.class_list().add_1(DOT_ACTIVE_CLASS));
        }
    }

    fn clear_dots(&mut self) {
        if let Some(list) = self.dots_list.take() {
            list.remove();
        }
    }
}
