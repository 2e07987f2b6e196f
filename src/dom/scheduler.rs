use std::cell::OnceCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::{Interval, Timeout};

use super::{with_slider, DomController, DomSlider};
use crate::surface::Scheduler;

/// Weak link to the slider, filled in once it has been wrapped in an `Rc`.
/// Timers created while the controller is still being built resolve it when
/// they fire.
pub type ControllerSlot = Rc<OnceCell<Weak<DomSlider>>>;

/// A browser timer. Dropping it clears the timer.
pub enum DomTimer {
    Interval(Interval),
    Timeout(Timeout),
}

pub struct DomScheduler {
    controller: ControllerSlot,
}

impl DomScheduler {
    pub fn new(controller: ControllerSlot) -> Self {
        Self { controller }
    }
}

fn fire(slot: &ControllerSlot, f: impl FnOnce(&mut DomController)) {
    if let Some(slider) = slot.get() {
        with_slider(slider, f);
    }
}

impl Scheduler for DomScheduler {
    type Handle = DomTimer;

    fn start_autoplay(&mut self, period_ms: u32) -> DomTimer {
        let slot = self.controller.clone();
        DomTimer::Interval(Interval::new(period_ms, move || {
            fire(&slot, |c| c.on_autoplay_tick());
        }))
    }

    fn schedule_transition_restore(&mut self, delay_ms: u32) -> DomTimer {
        let slot = self.controller.clone();
        DomTimer::Timeout(Timeout::new(delay_ms, move || {
            fire(&slot, |c| c.restore_transitions());
        }))
    }

    fn cancel(&mut self, handle: DomTimer) {
        drop(handle);
    }
}
