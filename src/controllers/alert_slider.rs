use crate::types::KeyEvent;
use async_trait::async_trait;

/// Alert slider controller seam for the legacy path.
///
/// Devices with a tri-state key report readiness once the system is up and
/// translate raw key events into the events other components act on.
#[async_trait]
pub trait AlertSliderController: Send + Sync {
    fn is_supported(&self) -> bool;

    async fn tri_state_ready(&self) -> bool;
    async fn handle_tri_state_event(&self, event: KeyEvent) -> Option<KeyEvent>;
}

/// Placeholder for devices without an alert slider.
pub struct StubAlertSlider;

#[async_trait]
impl AlertSliderController for StubAlertSlider {
    fn is_supported(&self) -> bool {
        false
    }

    async fn tri_state_ready(&self) -> bool {
        false
    }

    async fn handle_tri_state_event(&self, _event: KeyEvent) -> Option<KeyEvent> {
        None
    }
}
