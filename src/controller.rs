//! The slider state machine.
//!
//! `SliderController` keeps the two tracks coupled (forward index on the
//! primary track, inverted index on the secondary one), drives autoplay and
//! merges/splits the tracks when the viewport crosses the breakpoint. All
//! rendering goes through a [`RenderSurface`], all timing through a
//! [`Scheduler`].
//!
//! Notifications are queued rather than delivered in place. The owner drains
//! them with [`SliderController::drain_events`] once the operation returned,
//! so listeners always observe the finished state.

use log::{debug, info, warn};

use crate::config::{SliderOptions, TRANSITION_RESTORE_MS};
use crate::dots::DotIndicators;
use crate::error::SliderError;
use crate::events::SliderEvent;
use crate::surface::{RenderSurface, Scheduler, TrackId, TrackOffset};
use crate::topology::{Autoplay, Topology};

pub struct SliderController<S: RenderSurface, T: Scheduler> {
    surface: S,
    scheduler: T,
    options: SliderOptions,
    active_index: usize,
    total_slides: usize,
    topology: Topology<S::Slide>,
    autoplay: Autoplay<T::Handle>,
    pending_restore: Option<T::Handle>,
    transitions_enabled: bool,
    dots: Option<DotIndicators>,
    outbox: Vec<SliderEvent>,
}

impl<S: RenderSurface, T: Scheduler> SliderController<S, T> {
    /// Build a controller over an already-resolved surface.
    ///
    /// Jumps to the first slide without animation and mounts the merged
    /// layout right away when the viewport is already at or below the
    /// breakpoint. Autoplay stays unarmed until [`Self::update_height`]
    /// succeeds once.
    pub fn new(surface: S, scheduler: T, options: SliderOptions) -> Result<Self, SliderError> {
        options.validate()?;

        let total_slides = surface.slide_count(TrackId::Primary);
        if total_slides == 0 {
            return Err(SliderError::EmptyTrack);
        }

        let mut controller = Self {
            surface,
            scheduler,
            autoplay: Autoplay::from_enabled(options.autoplay),
            options,
            active_index: 0,
            total_slides,
            topology: Topology::Split,
            pending_restore: None,
            transitions_enabled: false,
            dots: None,
            outbox: Vec::new(),
        };

        if controller.options.has_dots() {
            controller.dots = Some(DotIndicators::build(&mut controller.surface, total_slides));
        }
        controller.transition(0, true);

        let width = controller.surface.viewport_width();
        controller.apply_viewport(width);

        info!(
            "Slider ready: {} slides, breakpoint {}px, autoplay {}",
            controller.total_slides, controller.options.breakpoint, controller.options.autoplay
        );
        Ok(controller)
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Index shown by the secondary track. `None` while merged.
    pub fn secondary_index(&self) -> Option<usize> {
        match self.topology {
            Topology::Split => Some(self.inverted(self.active_index)),
            Topology::Merged(_) => None,
        }
    }

    pub fn total_slides(&self) -> usize {
        self.total_slides
    }

    pub fn is_merged(&self) -> bool {
        self.topology.is_merged()
    }

    pub fn is_autoplay_running(&self) -> bool {
        self.autoplay.is_running()
    }

    pub fn dots(&self) -> Option<&DotIndicators> {
        self.dots.as_ref()
    }

    /// Offset currently applied to `track`.
    pub fn track_offset(&self, track: TrackId) -> Option<TrackOffset> {
        self.surface.track_offset(track)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }

    /// Take the notifications queued since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<SliderEvent> {
        std::mem::take(&mut self.outbox)
    }

    /// Move both tracks to `index`.
    ///
    /// Out-of-range indices are rejected and leave the slider untouched.
    /// Autoplay is not paused; use [`Self::go_to`] for user-driven jumps.
    pub fn slide_to(&mut self, index: usize, suppress_transition: bool) -> Result<(), SliderError> {
        self.check_index(index)?;
        self.transition(index, suppress_transition);
        Ok(())
    }

    /// Jump to `index` with autoplay paused around the change (dot click).
    pub fn go_to(&mut self, index: usize) -> Result<(), SliderError> {
        self.check_index(index)?;
        self.pause();
        self.transition(index, false);
        self.resume();
        Ok(())
    }

    pub fn next(&mut self) {
        let next = (self.active_index + 1) % self.total_slides;
        self.pause();
        self.transition(next, false);
        self.resume();
    }

    pub fn prev(&mut self) {
        let prev = if self.active_index == 0 {
            self.total_slides - 1
        } else {
            self.active_index - 1
        };
        self.pause();
        self.transition(prev, false);
        self.resume();
    }

    /// Advance on an autoplay tick. The firing timer is left running, which
    /// is equivalent to restarting it at the moment it fired.
    pub fn on_autoplay_tick(&mut self) {
        if !self.autoplay.is_running() {
            debug!("Ignoring autoplay tick while not running");
            return;
        }
        let next = (self.active_index + 1) % self.total_slides;
        self.transition(next, false);
    }

    pub fn pause(&mut self) {
        match std::mem::replace(&mut self.autoplay, Autoplay::Stopped) {
            Autoplay::Running(handle) => self.scheduler.cancel(handle),
            other => self.autoplay = other,
        }
    }

    pub fn resume(&mut self) {
        if let Autoplay::Stopped = self.autoplay {
            let handle = self.scheduler.start_autoplay(self.options.autoplay_speed);
            self.autoplay = Autoplay::Running(handle);
        }
    }

    /// Re-enable transition styling after an unanimated jump.
    ///
    /// The restore handle is kept until the next jump replaces it, so the
    /// timer firing this call is never dropped from inside its own callback.
    pub fn restore_transitions(&mut self) {
        if !self.transitions_enabled {
            self.surface.set_transitions_enabled(true);
            self.transitions_enabled = true;
        }
    }

    /// Measure the slide height and apply it to both tracks. The first
    /// successful measurement enables transitions and starts autoplay.
    pub fn update_height(&mut self) {
        let Some(height) = self.surface.measure_slide_height() else {
            debug!("Slide height not measurable yet");
            return;
        };
        self.surface.set_height(height);
        self.emit(SliderEvent::HeightSet { height });

        if let Autoplay::Unarmed = self.autoplay {
            self.autoplay = Autoplay::Stopped;
            self.restore_transitions();
            self.resume();
        }
    }

    /// Resize handler: re-measure, then merge or split for the new width.
    pub fn handle_resize(&mut self) {
        self.update_height();
        let width = self.surface.viewport_width();
        self.apply_viewport(width);
    }

    /// Merge at or below the breakpoint, split above it.
    pub fn apply_viewport(&mut self, width: u32) {
        if width <= self.options.breakpoint {
            self.mount_merged();
        } else {
            self.unmount_merged();
        }
    }

    fn mount_merged(&mut self) {
        if self.topology.is_merged() {
            return;
        }
        self.pause();
        let detached = self.surface.slides(TrackId::Secondary);
        self.surface.move_slides(&detached, TrackId::Primary);
        self.surface.set_track_visible(TrackId::Secondary, false);
        self.surface.set_merged_marker(true);
        info!("Merged tracks: {} slides moved to the primary track", detached.len());
        self.topology = Topology::Merged(detached);
        self.remount();
        self.resume();
    }

    fn unmount_merged(&mut self) {
        let detached = match std::mem::replace(&mut self.topology, Topology::Split) {
            Topology::Merged(detached) => detached,
            Topology::Split => return,
        };
        self.pause();
        self.surface.move_slides(&detached, TrackId::Secondary);
        self.surface.set_track_visible(TrackId::Secondary, true);
        self.surface.set_merged_marker(false);
        info!("Split tracks: {} slides restored to the secondary track", detached.len());
        self.remount();
        self.resume();
    }

    /// Recount slides, rebuild dots and jump back to the first slide.
    fn remount(&mut self) {
        self.total_slides = self.surface.slide_count(TrackId::Primary);
        if let Some(dots) = self.dots.take() {
            dots.destroy(&mut self.surface);
            self.emit(SliderEvent::DotsDestroyed);
            self.dots = Some(DotIndicators::build(&mut self.surface, self.total_slides));
        }
        self.transition(0, true);
    }

    fn transition(&mut self, index: usize, suppress_transition: bool) {
        let previous = self.active_index;
        self.emit(SliderEvent::BeforeChange {
            previous,
            next: index,
        });

        if suppress_transition {
            self.suppress_transitions();
        }

        let axis = self.topology.axis();
        self.surface
            .set_track_offset(TrackId::Primary, TrackOffset::for_slide(axis, index));
        if !self.topology.is_merged() {
            let inverted = self.inverted(index);
            self.surface
                .set_track_offset(TrackId::Secondary, TrackOffset::for_slide(axis, inverted));
        }
        self.active_index = index;
        debug!("Slide {} -> {} of {}", previous, index, self.total_slides);

        if suppress_transition {
            self.pending_restore = Some(
                self.scheduler
                    .schedule_transition_restore(TRANSITION_RESTORE_MS),
            );
        }

        self.emit(SliderEvent::AfterChange {
            current: index,
            previous,
        });
    }

    fn suppress_transitions(&mut self) {
        if let Some(pending) = self.pending_restore.take() {
            self.scheduler.cancel(pending);
        }
        self.surface.set_transitions_enabled(false);
        self.transitions_enabled = false;
    }

    fn emit(&mut self, event: SliderEvent) {
        if let Some(dots) = self.dots.as_mut() {
            dots.observe(&event, &mut self.surface);
        }
        self.outbox.push(event);
    }

    fn inverted(&self, index: usize) -> usize {
        self.total_slides - 1 - index
    }

    fn check_index(&self, index: usize) -> Result<(), SliderError> {
        if index >= self.total_slides {
            warn!(
                "Rejected slide index {} (slider has {} slides)",
                index, self.total_slides
            );
            return Err(SliderError::IndexOutOfRange {
                index,
                total: self.total_slides,
            });
        }
        Ok(())
    }
}
