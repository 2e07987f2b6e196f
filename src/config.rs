//! Slider configuration: defaults and the caller-facing options record.

use serde::Deserialize;

use crate::error::SliderError;

// Option defaults
pub const DEFAULT_AUTOPLAY: bool = true;
pub const DEFAULT_AUTOPLAY_SPEED_MS: u32 = 3000;
pub const DEFAULT_BREAKPOINT_PX: u32 = 768;

// Delay before transitions are re-enabled after an unanimated jump
pub const TRANSITION_RESTORE_MS: u32 = 10;

// Markup convention
pub const SLIDER_SELECTOR: &str = ".sync-slider";
pub const TRACK_SELECTOR: &str = ".sync-slider-track";
pub const TRANSITION_CLASS: &str = "transition-active";
pub const MERGED_CLASS: &str = "sync-sliders-merged";
pub const DOTS_LIST_CLASS: &str = "sync-sliders-dots";
pub const DOT_ACTIVE_CLASS: &str = "active";
pub const DOT_INDEX_ATTR: &str = "data-index";

/// Options merged over the documented defaults.
///
/// Keys follow the JavaScript naming (`autoplaySpeed`, `dotsSelector`, ...)
/// so a plain JS object or a JSON string deserializes directly. Missing keys
/// keep their default value. Empty selector strings mean "not configured".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SliderOptions {
    pub autoplay: bool,
    pub autoplay_speed: u32,
    pub prev_button: String,
    pub next_button: String,
    pub dots_selector: String,
    pub breakpoint: u32,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            autoplay: DEFAULT_AUTOPLAY,
            autoplay_speed: DEFAULT_AUTOPLAY_SPEED_MS,
            prev_button: String::new(),
            next_button: String::new(),
            dots_selector: String::new(),
            breakpoint: DEFAULT_BREAKPOINT_PX,
        }
    }
}

impl SliderOptions {
    /// Parse options from a JSON object string, e.g. a `data-options` attribute.
    pub fn from_json(input: &str) -> Result<Self, SliderError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let options: Self = serde_json::from_str(trimmed)
            .map_err(|e| SliderError::InvalidOptions(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Reject option combinations the controller cannot run with.
    pub fn validate(&self) -> Result<(), SliderError> {
        if self.autoplay && self.autoplay_speed == 0 {
            return Err(SliderError::InvalidOptions(
                "autoplaySpeed must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn has_dots(&self) -> bool {
        !self.dots_selector.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let options = SliderOptions::from_json(r#"{"autoplay": false}"#).unwrap();
        assert_eq!(
            options,
            SliderOptions {
                autoplay: false,
                ..SliderOptions::default()
            }
        );
        assert_eq!(options.autoplay_speed, 3000);
        assert_eq!(options.breakpoint, 768);
    }

    #[test]
    fn camel_case_keys_are_honoured() {
        let options = SliderOptions::from_json(
            r##"{"autoplaySpeed": 1500, "dotsSelector": "#dots", "prevButton": ".prev", "breakpoint": 600}"##,
        )
        .unwrap();
        assert_eq!(options.autoplay_speed, 1500);
        assert_eq!(options.breakpoint, 600);
        assert!(options.has_dots());
        assert_eq!(options.prev_button, ".prev");
        assert!(options.next_button.is_empty());
    }

    #[test]
    fn blank_input_means_defaults() {
        assert_eq!(SliderOptions::from_json("  ").unwrap(), SliderOptions::default());
    }

    #[test]
    fn zero_speed_is_rejected_only_with_autoplay() {
        let err = SliderOptions::from_json(r#"{"autoplaySpeed": 0}"#).unwrap_err();
        assert!(matches!(err, SliderError::InvalidOptions(_)));

        let ok = SliderOptions::from_json(r#"{"autoplay": false, "autoplaySpeed": 0}"#);
        assert!(ok.is_ok());
    }

    #[test]
    fn malformed_json_is_an_options_error() {
        let err = SliderOptions::from_json("{autoplay").unwrap_err();
        assert!(matches!(err, SliderError::InvalidOptions(_)));
    }
}
