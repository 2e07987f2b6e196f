//! Demo page for the synchronized sliders, rendered with Yew.
//! The slider is mounted on the rendered markup once the page is in the DOM.

use log::{info, warn, LevelFilter};
use sync_sliders::{logger, EventKind, SliderEvent, SliderOptions, SyncSliders};
use web_sys::Element;
use yew::prelude::*;

const DEMO_OPTIONS: &str = r##"{
    "autoplaySpeed": 4000,
    "prevButton": "#sync-prev",
    "nextButton": "#sync-next",
    "dotsSelector": "#sync-dots"
}"##;

// (title, caption) per slide
const FRONT_SLIDES: &[(&str, &str)] = &[
    ("Harbour", "Morning fog over the piers"),
    ("Ridge", "Trail above the tree line"),
    ("Market", "Saturday stalls at noon"),
    ("Station", "Last train of the evening"),
];
const BACK_SLIDES: &[(&str, &str)] = &[
    ("Lanterns", "Night market, east gate"),
    ("Summit", "Cairn at the top of the ridge"),
    ("Dock", "Ferries unloading at dawn"),
    ("Platform", "Commuters under the clock"),
];

#[derive(Properties, PartialEq)]
struct TrackProps {
    panel: &'static str,
    slides: &'static [(&'static str, &'static str)],
}

#[function_component(SlideTrack)]
fn slide_track(props: &TrackProps) -> Html {
    html! {
        <div class={classes!("sync-slider", props.panel)}>
            <div class="sync-slider-track">
                { props.slides.iter().map(|(title, caption)| html! {
                    <div class="sync-slide" key={*title}>
                        <h2>{ *title }</h2>
                        <p>{ *caption }</p>
                    </div>
                }).collect::<Html>() }
            </div>
        </div>
    }
}

/// Renders both tracks and mounts the slider on first render. The slider
/// handle lives as long as the component.
#[function_component(Showcase)]
fn showcase() -> Html {
    let container = use_node_ref();
    let mount_error = use_state(|| None::<String>);

    {
        let container = container.clone();
        let mount_error = mount_error.clone();
        use_effect_with((), move |_| {
            let mounted = container
                .cast::<Element>()
                .ok_or_else(|| "slider container not rendered".to_string())
                .and_then(|element| {
                    let raw = element.get_attribute("data-options").unwrap_or_default();
                    let options = SliderOptions::from_json(&raw).map_err(|e| e.to_string())?;
                    SyncSliders::mount(element, options).map_err(|e| e.to_string())
                });

            let slider = match mounted {
                Ok(slider) => {
                    let logged = slider.subscribe(EventKind::AfterChange, |event| {
                        if let SliderEvent::AfterChange { current, previous } = event {
                            info!("Slide {} -> {}", previous, current);
                        }
                    });
                    if let Err(err) = logged {
                        warn!("Slide change logging unavailable: {}", err);
                    }
                    Some(slider)
                }
                Err(err) => {
                    mount_error.set(Some(err));
                    None
                }
            };
            move || drop(slider)
        });
    }

    html! {
        <main class="showcase">
            <div class="sync-sliders" ref={container} data-options={DEMO_OPTIONS}>
                <SlideTrack panel="front" slides={FRONT_SLIDES} />
                <SlideTrack panel="back" slides={BACK_SLIDES} />
            </div>
            <nav class="sync-controls">
                <button id="sync-prev">{ "Previous" }</button>
                <div id="sync-dots"></div>
                <button id="sync-next">{ "Next" }</button>
            </nav>
            if let Some(err) = (*mount_error).clone() {
                <p class="mount-error">{ err }</p>
            }
        </main>
    }
}

#[function_component]
pub fn App() -> Html {
    html! { <Showcase /> }
}

/// Entry point: installs the panic hook and console logger, then renders the demo.
fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = logger::init(LevelFilter::Debug) {
        web_sys::console::warn_1(&format!("Console logger not installed: {}", err).into());
    }
    yew::Renderer::<App>::new().render();
}
