//! Typed notifications emitted by the slider controller.
//!
//! The controller exposes a small fixed set of notification kinds instead of
//! an open-ended emitter. Listeners register for one [`EventKind`] and receive
//! every matching [`SliderEvent`] in registration order.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use log::warn;

use crate::error::SliderError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliderEvent {
    /// Emitted before the tracks move.
    BeforeChange { previous: usize, next: usize },
    /// Emitted after the tracks moved and the active index was updated.
    AfterChange { current: usize, previous: usize },
    /// Emitted every time the slide height has been measured and applied.
    HeightSet { height: f64 },
    /// Emitted when the dot indicators are torn down before a rebuild.
    DotsDestroyed,
}

impl SliderEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SliderEvent::BeforeChange { .. } => EventKind::BeforeChange,
            SliderEvent::AfterChange { .. } => EventKind::AfterChange,
            SliderEvent::HeightSet { .. } => EventKind::HeightSet,
            SliderEvent::DotsDestroyed => EventKind::DotsDestroyed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    BeforeChange,
    AfterChange,
    HeightSet,
    DotsDestroyed,
}

impl EventKind {
    /// Name used by the JavaScript `on()` surface.
    pub fn name(self) -> &'static str {
        match self {
            EventKind::BeforeChange => "beforeChange",
            EventKind::AfterChange => "afterChange",
            EventKind::HeightSet => "set height",
            EventKind::DotsDestroyed => "destroy dots",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventKind {
    type Err = SliderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beforeChange" => Ok(EventKind::BeforeChange),
            "afterChange" => Ok(EventKind::AfterChange),
            "set height" => Ok(EventKind::HeightSet),
            "destroy dots" => Ok(EventKind::DotsDestroyed),
            other => Err(SliderError::UnknownEvent(other.to_string())),
        }
    }
}

/// Handle returned by [`Listeners::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

impl ListenerId {
    pub fn as_u32(self) -> u32 {
        self.0
    }

    pub fn from_u32(raw: u32) -> Self {
        ListenerId(raw)
    }
}

type Callback = Rc<RefCell<dyn FnMut(&SliderEvent)>>;

/// Registry of notification callbacks.
///
/// Callbacks are invoked through [`Listeners::dispatch`] with the registry
/// itself released, so a callback may subscribe or unsubscribe while it runs.
#[derive(Default)]
pub struct Listeners {
    next_id: u32,
    entries: Vec<(ListenerId, EventKind, Callback)>,
}

impl Listeners {
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&SliderEvent) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries
            .push((id, kind, Rc::new(RefCell::new(callback)) as Callback));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _, _)| *entry_id != id);
        self.entries.len() != before
    }

    fn matching(&self, kind: EventKind) -> Vec<Callback> {
        self.entries
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, callback)| callback.clone())
            .collect()
    }

    /// Deliver `event` to every listener registered for its kind at the
    /// time of the call, in registration order.
    pub fn dispatch(registry: &RefCell<Self>, event: &SliderEvent) {
        let callbacks = match registry.try_borrow() {
            Ok(listeners) => listeners.matching(event.kind()),
            Err(_) => {
                warn!("Dropped '{}' notification: {}", event.kind(), SliderError::Busy);
                return;
            }
        };
        for callback in callbacks {
            match callback.try_borrow_mut() {
                Ok(mut callback) => (&mut *callback)(event),
                Err(_) => warn!("'{}' listener is already running", event.kind()),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.len())
            .finish()
    }
}
