//! Capabilities the controller needs from its host.
//!
//! The controller never touches a rendering API directly. A [`RenderSurface`]
//! owns the two tracks and their slides, a [`Scheduler`] owns timers. The DOM
//! host implements both on top of `web-sys`; unit tests use in-memory fakes.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackId {
    Primary,
    Secondary,
}

/// Axis a track moves along. Split tracks scroll vertically, the merged
/// track scrolls horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// Offset of a track, as a percentage of one slide along `axis`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackOffset {
    pub axis: Axis,
    pub percent: f64,
}

impl TrackOffset {
    pub fn for_slide(axis: Axis, index: usize) -> Self {
        Self {
            axis,
            percent: index as f64 * 100.0,
        }
    }

    /// CSS `transform` value moving the track back by `percent`.
    pub fn to_css(&self) -> String {
        let func = match self.axis {
            Axis::Vertical => "translateY",
            Axis::Horizontal => "translateX",
        };
        format!("{}(-{}%)", func, self.percent)
    }
}

impl fmt::Display for TrackOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

pub trait RenderSurface {
    /// Opaque slide handle. Identity is preserved across moves.
    type Slide: Clone;

    fn slide_count(&self, track: TrackId) -> usize;
    /// Slides currently in `track`, in order.
    fn slides(&self, track: TrackId) -> Vec<Self::Slide>;
    /// Append `slides` to the end of `to`, removing them from wherever they were.
    fn move_slides(&mut self, slides: &[Self::Slide], to: TrackId);

    fn track_offset(&self, track: TrackId) -> Option<TrackOffset>;
    fn set_track_offset(&mut self, track: TrackId, offset: TrackOffset);
    fn set_track_visible(&mut self, track: TrackId, visible: bool);
    fn set_transitions_enabled(&mut self, enabled: bool);
    fn set_merged_marker(&mut self, merged: bool);

    fn viewport_width(&self) -> u32;
    /// Height of the first primary slide, `None` if it cannot be measured yet.
    fn measure_slide_height(&self) -> Option<f64>;
    /// Apply `height` to both track containers.
    fn set_height(&mut self, height: f64);

    /// Create `count` dot indicators, labelled from 1.
    fn render_dots(&mut self, count: usize);
    fn set_active_dot(&mut self, previous: Option<usize>, current: usize);
    fn clear_dots(&mut self);
}

/// Timer capability. The host calls back into the controller when a timer
/// fires: [`crate::SliderController::on_autoplay_tick`] for autoplay and
/// [`crate::SliderController::restore_transitions`] for the restore delay.
pub trait Scheduler {
    /// Dropping or cancelling the handle stops the timer.
    type Handle;

    fn start_autoplay(&mut self, period_ms: u32) -> Self::Handle;
    fn schedule_transition_restore(&mut self, delay_ms: u32) -> Self::Handle;
    fn cancel(&mut self, handle: Self::Handle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_transform_follows_axis() {
        assert_eq!(
            TrackOffset::for_slide(Axis::Vertical, 3).to_css(),
            "translateY(-300%)"
        );
        assert_eq!(
            TrackOffset::for_slide(Axis::Horizontal, 0).to_css(),
            "translateX(-0%)"
        );
    }
}
