//! In-memory render surface and scheduler for unit tests.

use crate::surface::{RenderSurface, Scheduler, TrackId, TrackOffset};

fn slot(track: TrackId) -> usize {
    match track {
        TrackId::Primary => 0,
        TrackId::Secondary => 1,
    }
}

/// Slides are plain ids: the primary track starts with `0..n`, the
/// secondary one with `100..100 + m`.
#[derive(Debug)]
pub struct FakeSurface {
    tracks: [Vec<u32>; 2],
    offsets: [Option<TrackOffset>; 2],
    pub secondary_visible: bool,
    pub merged_marker: bool,
    pub transitions_enabled: bool,
    pub viewport: u32,
    pub slide_height: Option<f64>,
    pub applied_height: Option<f64>,
    pub dots: Vec<bool>,
    pub dot_renders: usize,
    pub moves: usize,
}

impl FakeSurface {
    pub fn new(primary: usize, secondary: usize, viewport: u32) -> Self {
        Self {
            tracks: [
                (0..primary as u32).collect(),
                (100..100 + secondary as u32).collect(),
            ],
            offsets: [None, None],
            secondary_visible: true,
            merged_marker: false,
            transitions_enabled: false,
            viewport,
            slide_height: Some(240.0),
            applied_height: None,
            dots: Vec::new(),
            dot_renders: 0,
            moves: 0,
        }
    }

    pub fn track(&self, track: TrackId) -> &[u32] {
        &self.tracks[slot(track)]
    }

    pub fn active_dots(&self) -> Vec<usize> {
        self.dots
            .iter()
            .enumerate()
            .filter(|(_, active)| **active)
            .map(|(i, _)| i)
            .collect()
    }
}

impl RenderSurface for FakeSurface {
    type Slide = u32;

    fn slide_count(&self, track: TrackId) -> usize {
        self.tracks[slot(track)].len()
    }

    fn slides(&self, track: TrackId) -> Vec<u32> {
        self.tracks[slot(track)].clone()
    }

    fn move_slides(&mut self, slides: &[u32], to: TrackId) {
        self.moves += 1;
        for track in self.tracks.iter_mut() {
            track.retain(|s| !slides.contains(s));
        }
        self.tracks[slot(to)].extend_from_slice(slides);
    }

    fn track_offset(&self, track: TrackId) -> Option<TrackOffset> {
        self.offsets[slot(track)]
    }

    fn set_track_offset(&mut self, track: TrackId, offset: TrackOffset) {
        self.offsets[slot(track)] = Some(offset);
    }

    fn set_track_visible(&mut self, track: TrackId, visible: bool) {
        if track == TrackId::Secondary {
            self.secondary_visible = visible;
        }
    }

    fn set_transitions_enabled(&mut self, enabled: bool) {
        self.transitions_enabled = enabled;
    }

    fn set_merged_marker(&mut self, merged: bool) {
        self.merged_marker = merged;
    }

    fn viewport_width(&self) -> u32 {
        self.viewport
    }

    fn measure_slide_height(&self) -> Option<f64> {
        self.slide_height
    }

    fn set_height(&mut self, height: f64) {
        self.applied_height = Some(height);
    }

    fn render_dots(&mut self, count: usize) {
        self.dot_renders += 1;
        self.dots = vec![false; count];
    }

    fn set_active_dot(&mut self, previous: Option<usize>, current: usize) {
        if let Some(dot) = previous.and_then(|p| self.dots.get_mut(p)) {
            *dot = false;
        }
        if let Some(dot) = self.dots.get_mut(current) {
            *dot = true;
        }
    }

    fn clear_dots(&mut self) {
        self.dots.clear();
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum FakeTimer {
    Interval(u32),
    Restore(u32),
}

/// Records timers instead of running them; tests fire callbacks by hand.
#[derive(Debug, Default)]
pub struct FakeScheduler {
    next_id: u32,
    live_intervals: Vec<u32>,
    pending_restores: Vec<u32>,
    intervals_started: usize,
    restores_cancelled: usize,
    last_period: Option<u32>,
}

impl FakeScheduler {
    pub fn live_intervals(&self) -> usize {
        self.live_intervals.len()
    }

    pub fn pending_restores(&self) -> usize {
        self.pending_restores.len()
    }

    pub fn intervals_started(&self) -> usize {
        self.intervals_started
    }

    pub fn restores_cancelled(&self) -> usize {
        self.restores_cancelled
    }

    pub fn last_period(&self) -> Option<u32> {
        self.last_period
    }

    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl Scheduler for FakeScheduler {
    type Handle = FakeTimer;

    fn start_autoplay(&mut self, period_ms: u32) -> FakeTimer {
        let id = self.next_id();
        self.intervals_started += 1;
        self.last_period = Some(period_ms);
        self.live_intervals.push(id);
        FakeTimer::Interval(id)
    }

    fn schedule_transition_restore(&mut self, _delay_ms: u32) -> FakeTimer {
        let id = self.next_id();
        self.pending_restores.push(id);
        FakeTimer::Restore(id)
    }

    fn cancel(&mut self, handle: FakeTimer) {
        match handle {
            FakeTimer::Interval(id) => self.live_intervals.retain(|&i| i != id),
            FakeTimer::Restore(id) => {
                self.restores_cancelled += 1;
                self.pending_restores.retain(|&i| i != id);
            }
        }
    }
}
