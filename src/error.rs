use std::fmt;

/// Errors raised by the slider controller and its DOM host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SliderError {
    /// Fewer than two slide tracks were found inside the container.
    MissingTracks { found: usize },
    /// A configured selector matched no element.
    SelectorNotFound(String),
    /// The container handle was neither an element nor a selector string.
    InvalidContainer,
    /// The primary track has no slides.
    EmptyTrack,
    /// The options record could not be parsed or failed validation.
    InvalidOptions(String),
    IndexOutOfRange { index: usize, total: usize },
    /// `on()` was called with an event name the slider never emits.
    UnknownEvent(String),
    /// A host callback fired while the slider was already mid-operation.
    Busy,
}

impl fmt::Display for SliderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliderError::MissingTracks { found } => write!(
                f,
                "Expected two slide tracks inside the container, found {}",
                found
            ),
            SliderError::SelectorNotFound(selector) => {
                write!(f, "Selector '{}' did not match any element", selector)
            }
            SliderError::InvalidContainer => {
                write!(f, "Container must be an element or a selector string")
            }
            SliderError::EmptyTrack => write!(f, "The first slide track has no slides"),
            SliderError::InvalidOptions(reason) => write!(f, "Invalid slider options: {}", reason),
            SliderError::IndexOutOfRange { index, total } => write!(
                f,
                "Slide index {} is out of range (slider has {} slides)",
                index, total
            ),
            SliderError::UnknownEvent(name) => write!(f, "Unknown slider event '{}'", name),
            SliderError::Busy => write!(f, "Slider is busy with another operation"),
        }
    }
}

impl std::error::Error for SliderError {}
