use crate::error::Result;
use crate::types::{DisplayMode, Feature, KeyEvent, TouchscreenGesture};
use async_trait::async_trait;
use std::sync::Arc;

/// Display engine capability provider.
#[async_trait]
pub trait DisplayModesProvider: Send + Sync {
    async fn modes(&self) -> Result<Vec<DisplayMode>>;
    async fn current_mode(&self) -> Result<DisplayMode>;
    async fn default_mode(&self) -> Result<DisplayMode>;
    async fn set_mode(&self, id: i32, make_default: bool) -> Result<bool>;
}

/// Fingerprint navigation capability provider.
#[async_trait]
pub trait FingerprintNavigationProvider: Send + Sync {
    async fn is_enabled(&self) -> Result<bool>;
    async fn set_enabled(&self, enable: bool) -> Result<bool>;
}

/// Touchscreen gesture capability provider.
#[async_trait]
pub trait TouchscreenGesturesProvider: Send + Sync {
    async fn gestures(&self) -> Result<Vec<TouchscreenGesture>>;
    async fn set_gesture_enabled(&self, gesture: &TouchscreenGesture, enable: bool)
        -> Result<bool>;
}

/// A resolved handle to one feature's capability provider.
///
/// The alert slider has no provider variant; it is reachable through the
/// legacy transport only.
#[derive(Clone)]
pub enum CapabilityHandle {
    DisplayModes(Arc<dyn DisplayModesProvider>),
    FingerprintNavigation(Arc<dyn FingerprintNavigationProvider>),
    TouchscreenGestures(Arc<dyn TouchscreenGesturesProvider>),
}

impl CapabilityHandle {
    pub fn feature(&self) -> Feature {
        match self {
            CapabilityHandle::DisplayModes(_) => Feature::DisplayModes,
            CapabilityHandle::FingerprintNavigation(_) => Feature::FingerprintNavigation,
            CapabilityHandle::TouchscreenGestures(_) => Feature::TouchscreenGestures,
        }
    }
}

/// Looks up the capability provider for a feature.
///
/// The lookup may block on the underlying transport. `None` means the
/// feature is unsupported via the capability path; the registry caches that
/// outcome for the process lifetime.
#[async_trait]
pub trait CapabilityResolver: Send + Sync {
    async fn resolve(&self, feature: Feature) -> Option<CapabilityHandle>;
}

/// Resolver for devices with no registered capability services. Every
/// feature falls back to the legacy bitmask path.
pub struct NullResolver;

#[async_trait]
impl CapabilityResolver for NullResolver {
    async fn resolve(&self, _feature: Feature) -> Option<CapabilityHandle> {
        None
    }
}

/// The legacy binder-style service surface.
///
/// Every method maps an IPC failure to `HardwareError::Transport`; callers
/// at the dispatch boundary convert those to safe defaults.
#[async_trait]
pub trait HardwareTransport: Send + Sync {
    async fn supported_features(&self) -> Result<u32>;

    async fn get(&self, feature: Feature) -> Result<bool>;
    async fn set(&self, feature: Feature, enable: bool) -> Result<bool>;

    async fn display_modes(&self) -> Result<Vec<DisplayMode>>;
    async fn current_display_mode(&self) -> Result<Option<DisplayMode>>;
    async fn default_display_mode(&self) -> Result<Option<DisplayMode>>;
    async fn set_display_mode(&self, id: i32, make_default: bool) -> Result<bool>;

    async fn set_fingerprint_navigation(&self, enable: bool) -> Result<bool>;

    async fn tri_state_ready(&self) -> Result<bool>;
    async fn handle_tri_state_event(&self, event: KeyEvent) -> Result<Option<KeyEvent>>;

    async fn touchscreen_gestures(&self) -> Result<Vec<TouchscreenGesture>>;
    async fn set_touchscreen_gesture_enabled(
        &self,
        gesture: &TouchscreenGesture,
        enable: bool,
    ) -> Result<bool>;
}
