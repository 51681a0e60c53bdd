use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Optional hardware capabilities exposed through the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    DisplayModes,
    FingerprintNavigation,
    AlertSlider,
    TouchscreenGestures,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::DisplayModes,
        Feature::FingerprintNavigation,
        Feature::AlertSlider,
        Feature::TouchscreenGestures,
    ];

    /// Bit reported for this feature in the legacy support bitmask.
    pub fn bit(self) -> u32 {
        match self {
            Feature::DisplayModes => 0x1,
            Feature::FingerprintNavigation => 0x2,
            Feature::AlertSlider => 0x4,
            Feature::TouchscreenGestures => 0x8,
        }
    }

    /// Symbolic constant name, used by preference constraints and the CLI.
    pub fn name(self) -> &'static str {
        match self {
            Feature::DisplayModes => "FEATURE_DISPLAY_MODES",
            Feature::FingerprintNavigation => "FEATURE_FINGERPRINT_NAVIGATION",
            Feature::AlertSlider => "FEATURE_ALERT_SLIDER",
            Feature::TouchscreenGestures => "FEATURE_TOUCHSCREEN_GESTURES",
        }
    }

    /// Resolves a symbolic constant name back to its feature.
    ///
    /// Names must carry the `FEATURE_` prefix; anything else fails closed
    /// with `None` rather than an error.
    pub fn from_name(name: &str) -> Option<Feature> {
        if !name.starts_with("FEATURE_") {
            return None;
        }
        FEATURE_CATALOG.get(name).copied()
    }

    /// Whether the feature has a simple enable/disable control shape.
    pub fn is_boolean(self) -> bool {
        matches!(self, Feature::FingerprintNavigation)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static FEATURE_CATALOG: Lazy<HashMap<&'static str, Feature>> =
    Lazy::new(|| Feature::ALL.iter().map(|f| (f.name(), *f)).collect());

/// A display color/calibration profile as reported by the display engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMode {
    pub id: i32,
    pub name: String,
}

impl DisplayMode {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A touchscreen gesture advertised by the touch capability provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouchscreenGesture {
    pub keycode: i32,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    Down,
    Up,
}

/// Tri-state key event consumed and re-emitted by the alert slider handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key_code: i32,
    pub action: KeyAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_round_trips_every_feature() {
        for feature in Feature::ALL {
            assert_eq!(Feature::from_name(feature.name()), Some(feature));
        }
    }

    #[test]
    fn test_from_name_requires_prefix() {
        assert_eq!(Feature::from_name("DISPLAY_MODES"), None);
        assert_eq!(Feature::from_name("feature_display_modes"), None);
        assert_eq!(Feature::from_name(""), None);
    }

    #[test]
    fn test_from_name_rejects_unknown_names() {
        assert_eq!(Feature::from_name("FEATURE_WARP_DRIVE"), None);
    }

    #[test]
    fn test_bits_are_one_hot() {
        let mut seen = 0u32;
        for feature in Feature::ALL {
            let bit = feature.bit();
            assert_eq!(bit.count_ones(), 1);
            assert_eq!(seen & bit, 0, "{} reuses a bit", feature);
            seen |= bit;
        }
    }

    #[test]
    fn test_boolean_capable_set() {
        assert!(Feature::FingerprintNavigation.is_boolean());
        assert!(!Feature::DisplayModes.is_boolean());
        assert!(!Feature::AlertSlider.is_boolean());
        assert!(!Feature::TouchscreenGestures.is_boolean());
    }
}
