//! Dot indicator decoration.

use crate::events::SliderEvent;
use crate::surface::RenderSurface;

/// Tracks the rendered indicator set and which dot is active.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DotIndicators {
    count: usize,
    active: Option<usize>,
}

impl DotIndicators {
    pub fn build<S: RenderSurface>(surface: &mut S, count: usize) -> Self {
        surface.render_dots(count);
        Self {
            count,
            active: None,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Keep exactly one dot marked active after every change.
    pub fn observe<S: RenderSurface>(&mut self, event: &SliderEvent, surface: &mut S) {
        if let SliderEvent::AfterChange { current, .. } = *event {
            if current >= self.count {
                return;
            }
            surface.set_active_dot(self.active, current);
            self.active = Some(current);
        }
    }

    pub fn destroy<S: RenderSurface>(self, surface: &mut S) {
        surface.clear_dots();
    }
}
