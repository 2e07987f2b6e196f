//! Synchronized dual-track slider.
//!
//! Two slide tracks advance in lockstep: the primary track shows slide `i`,
//! the secondary track shows slide `total - 1 - i`. Below a viewport
//! breakpoint both tracks are merged into one; above it they are split
//! again. [`SliderController`] holds that state machine and talks to the
//! page only through the [`RenderSurface`] and [`Scheduler`] traits;
//! [`SyncSliders`] wires it to the browser DOM.

pub mod bindings;
pub mod config;
pub mod controller;
pub mod dom;
pub mod dots;
pub mod error;
pub mod events;
pub mod logger;
pub mod shared;
pub mod surface;
pub mod topology;

#[cfg(test)]
mod testing;

pub use bindings::SyncSliders;
pub use config::SliderOptions;
pub use controller::SliderController;
pub use error::SliderError;
pub use events::{EventKind, ListenerId, SliderEvent};
pub use shared::SharedSlider;
pub use surface::{Axis, RenderSurface, Scheduler, TrackId, TrackOffset};
pub use topology::{Autoplay, Topology};
