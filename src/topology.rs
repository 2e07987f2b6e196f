//! Tagged states replacing fields that only exist some of the time.

use crate::surface::Axis;

/// Layout of the two tracks.
#[derive(Debug, Clone, PartialEq)]
pub enum Topology<S> {
    /// Two tracks, indices inversely coupled.
    Split,
    /// One track holding every slide. Keeps the slides taken from the
    /// secondary track, in their original order, for the way back.
    Merged(Vec<S>),
}

impl<S> Topology<S> {
    pub fn is_merged(&self) -> bool {
        matches!(self, Topology::Merged(_))
    }

    pub fn axis(&self) -> Axis {
        match self {
            Topology::Split => Axis::Vertical,
            Topology::Merged(_) => Axis::Horizontal,
        }
    }
}

/// Autoplay lifecycle.
#[derive(Debug, PartialEq)]
pub enum Autoplay<H> {
    /// `autoplay: false`; no timer is ever created.
    Disabled,
    /// Waiting for the first height measurement.
    Unarmed,
    Stopped,
    Running(H),
}

impl<H> Autoplay<H> {
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            Autoplay::Unarmed
        } else {
            Autoplay::Disabled
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Autoplay::Running(_))
    }
}
