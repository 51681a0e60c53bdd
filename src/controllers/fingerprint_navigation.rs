use async_trait::async_trait;

/// Fingerprint navigation controller seam for the legacy path.
///
/// Lets the sensor drive navigation while the software navigation bar is
/// disabled; `can_use` carries that bar state.
#[async_trait]
pub trait FingerprintNavigationController: Send + Sync {
    fn is_supported(&self) -> bool;

    async fn set_enabled(&self, can_use: bool) -> bool;
}

/// Placeholder for devices without fingerprint navigation.
pub struct StubFingerprintNavigation;

#[async_trait]
impl FingerprintNavigationController for StubFingerprintNavigation {
    fn is_supported(&self) -> bool {
        false
    }

    async fn set_enabled(&self, _can_use: bool) -> bool {
        false
    }
}
