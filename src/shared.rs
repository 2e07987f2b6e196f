//! Shared ownership of a controller together with its listeners.
//!
//! Host callbacks (buttons, timers, JS methods) reach the controller through
//! a [`SharedSlider`]. Each operation runs with the controller borrowed, then
//! the queued notifications are delivered with every borrow released. A
//! listener can therefore read the slider, navigate it, or (un)subscribe.

use std::cell::{Cell, RefCell};

use log::debug;

use crate::controller::SliderController;
use crate::error::SliderError;
use crate::events::{EventKind, ListenerId, Listeners, SliderEvent};
use crate::surface::{RenderSurface, Scheduler};

pub struct SharedSlider<S: RenderSurface, T: Scheduler> {
    controller: RefCell<SliderController<S, T>>,
    listeners: RefCell<Listeners>,
    dispatching: Cell<bool>,
}

impl<S: RenderSurface, T: Scheduler> SharedSlider<S, T> {
    /// Take ownership of `controller`. Notifications from construction had
    /// no audience and are discarded.
    pub fn new(mut controller: SliderController<S, T>) -> Self {
        let dropped = controller.drain_events().len();
        debug!("Discarded {} construction notifications", dropped);
        Self {
            controller: RefCell::new(controller),
            listeners: RefCell::new(Listeners::default()),
            dispatching: Cell::new(false),
        }
    }

    /// Run `f` against the controller, then deliver what it emitted.
    pub fn update<R>(
        &self,
        f: impl FnOnce(&mut SliderController<S, T>) -> R,
    ) -> Result<R, SliderError> {
        let result = {
            let mut controller = self
                .controller
                .try_borrow_mut()
                .map_err(|_| SliderError::Busy)?;
            f(&mut controller)
        };
        self.dispatch();
        Ok(result)
    }

    pub fn read<R>(&self, f: impl FnOnce(&SliderController<S, T>) -> R) -> Result<R, SliderError> {
        let controller = self.controller.try_borrow().map_err(|_| SliderError::Busy)?;
        Ok(f(&controller))
    }

    pub fn subscribe(
        &self,
        kind: EventKind,
        callback: impl FnMut(&SliderEvent) + 'static,
    ) -> Result<ListenerId, SliderError> {
        let mut listeners = self.listeners.try_borrow_mut().map_err(|_| SliderError::Busy)?;
        Ok(listeners.subscribe(kind, callback))
    }

    pub fn unsubscribe(&self, id: ListenerId) -> Result<bool, SliderError> {
        let mut listeners = self.listeners.try_borrow_mut().map_err(|_| SliderError::Busy)?;
        Ok(listeners.unsubscribe(id))
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.try_borrow().map(|l| l.len()).unwrap_or(0)
    }

    // Nested operations started by a listener only queue their events; the
    // outermost call delivers them after the batch in progress.
    fn dispatch(&self) {
        if self.dispatching.replace(true) {
            return;
        }
        loop {
            let events = match self.controller.try_borrow_mut() {
                Ok(mut controller) => controller.drain_events(),
                Err(_) => break,
            };
            if events.is_empty() {
                break;
            }
            for event in &events {
                Listeners::dispatch(&self.listeners, event);
            }
        }
        self.dispatching.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SliderOptions;
    use crate::testing::{FakeScheduler, FakeSurface};
    use pretty_assertions::assert_eq;
    use std::rc::{Rc, Weak};

    type FakeSlider = SharedSlider<FakeSurface, FakeScheduler>;

    fn shared(primary: usize, secondary: usize, viewport: u32) -> Rc<FakeSlider> {
        let options = SliderOptions {
            autoplay: false,
            ..SliderOptions::default()
        };
        let surface = FakeSurface::new(primary, secondary, viewport);
        let controller = SliderController::new(surface, FakeScheduler::default(), options).unwrap();
        Rc::new(SharedSlider::new(controller))
    }

    fn read_index(slider: &Weak<FakeSlider>) -> Option<usize> {
        slider.upgrade()?.read(|c| c.active_index()).ok()
    }

    #[test]
    fn listener_reads_finished_state() {
        let slider = shared(4, 4, 1024);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (handle, sink) = (Rc::downgrade(&slider), seen.clone());
        slider
            .subscribe(EventKind::BeforeChange, move |_| {
                sink.borrow_mut().push(read_index(&handle));
            })
            .unwrap();

        slider.update(|c| c.next()).unwrap();
        slider.update(|c| c.go_to(3)).unwrap().unwrap();

        assert_eq!(*seen.borrow(), vec![Some(1), Some(3)]);
    }

    #[test]
    fn listener_reads_total_after_remount() {
        let slider = shared(3, 2, 1024);
        let totals = Rc::new(RefCell::new(Vec::new()));
        let (handle, sink) = (Rc::downgrade(&slider), totals.clone());
        slider
            .subscribe(EventKind::AfterChange, move |_| {
                let total = handle.upgrade().and_then(|s| s.read(|c| c.total_slides()).ok());
                sink.borrow_mut().push(total);
            })
            .unwrap();

        slider.update(|c| c.apply_viewport(500)).unwrap();

        assert_eq!(*totals.borrow(), vec![Some(5)]);
    }

    #[test]
    fn navigation_from_a_listener_is_delivered_after_the_batch() {
        let slider = shared(5, 5, 1024);
        let log = Rc::new(RefCell::new(Vec::new()));

        let (handle, sink) = (Rc::downgrade(&slider), log.clone());
        slider
            .subscribe(EventKind::AfterChange, move |e| {
                sink.borrow_mut().push(*e);
                if let SliderEvent::AfterChange { current: 1, .. } = e {
                    if let Some(slider) = handle.upgrade() {
                        slider.update(|c| c.next()).unwrap();
                    }
                }
            })
            .unwrap();

        slider.update(|c| c.next()).unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                SliderEvent::AfterChange { current: 1, previous: 0 },
                SliderEvent::AfterChange { current: 2, previous: 1 },
            ]
        );
        assert_eq!(slider.read(|c| c.active_index()), Ok(2));
    }

    #[test]
    fn unsubscribe_from_inside_a_listener() {
        let slider = shared(3, 3, 1024);
        let hits = Rc::new(Cell::new(0));
        let own_id = Rc::new(Cell::new(None));

        let (handle, counter, id_cell) = (Rc::downgrade(&slider), hits.clone(), own_id.clone());
        let id = slider
            .subscribe(EventKind::AfterChange, move |_| {
                counter.set(counter.get() + 1);
                if let (Some(slider), Some(id)) = (handle.upgrade(), id_cell.get()) {
                    assert_eq!(slider.unsubscribe(id), Ok(true));
                }
            })
            .unwrap();
        own_id.set(Some(id));

        slider.update(|c| c.next()).unwrap();
        slider.update(|c| c.next()).unwrap();

        assert_eq!(hits.get(), 1);
        assert_eq!(slider.listener_count(), 0);
    }

    #[test]
    fn construction_events_are_not_replayed() {
        let slider = shared(3, 3, 1024);
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        slider
            .subscribe(EventKind::AfterChange, move |_| counter.set(counter.get() + 1))
            .unwrap();

        slider.update(|c| c.pause()).unwrap();

        assert_eq!(hits.get(), 0);
    }
}
