pub mod alert_slider;
pub mod display_engine;
pub mod fingerprint_navigation;

pub use alert_slider::{AlertSliderController, StubAlertSlider};
pub use display_engine::{DisplayEngineController, StubDisplayEngine};
pub use fingerprint_navigation::{FingerprintNavigationController, StubFingerprintNavigation};
