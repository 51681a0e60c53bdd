use crate::controllers::{
    AlertSliderController, DisplayEngineController, FingerprintNavigationController,
};
use crate::error::{HardwareError, Result};
use crate::providers::HardwareTransport;
use crate::types::{DisplayMode, Feature, KeyEvent, TouchscreenGesture};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info};

/// Identity attached to each service entry point call.
#[derive(Debug, Clone)]
pub struct CallerIdentity {
    pub uid: u32,
    pub permissions: Vec<String>,
}

impl CallerIdentity {
    pub fn new(uid: u32, permissions: Vec<String>) -> Self {
        Self { uid, permissions }
    }

    pub fn holds(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

/// Authorization check applied before any provider work.
pub trait AccessPolicy: Send + Sync {
    fn check_access(&self, caller: &CallerIdentity, permission: &str) -> Result<()>;
}

/// Default policy: the caller must hold the configured permission.
pub struct PermissionPolicy;

impl AccessPolicy for PermissionPolicy {
    fn check_access(&self, caller: &CallerIdentity, permission: &str) -> Result<()> {
        if caller.holds(permission) {
            Ok(())
        } else {
            Err(HardwareError::PermissionDenied(permission.to_string()))
        }
    }
}

/// Legacy hardware backend assembled from the platform controllers.
///
/// The supported bitmask is computed once at construction from each
/// controller's exported support flag.
pub struct LegacyHardware {
    display_engine: Arc<dyn DisplayEngineController>,
    fingerprint_navigation: Arc<dyn FingerprintNavigationController>,
    alert_slider: Arc<dyn AlertSliderController>,
    supported_features: u32,
}

impl LegacyHardware {
    pub fn new(
        display_engine: Arc<dyn DisplayEngineController>,
        fingerprint_navigation: Arc<dyn FingerprintNavigationController>,
        alert_slider: Arc<dyn AlertSliderController>,
    ) -> Self {
        let mut supported_features = 0;
        if display_engine.is_supported() {
            supported_features |= Feature::DisplayModes.bit();
        }
        if fingerprint_navigation.is_supported() {
            supported_features |= Feature::FingerprintNavigation.bit();
        }
        if alert_slider.is_supported() {
            supported_features |= Feature::AlertSlider.bit();
        }
        Self {
            display_engine,
            fingerprint_navigation,
            alert_slider,
            supported_features,
        }
    }
}

#[async_trait]
impl HardwareTransport for LegacyHardware {
    async fn supported_features(&self) -> Result<u32> {
        Ok(self.supported_features)
    }

    // The legacy backend has no generic boolean controls.
    async fn get(&self, _feature: Feature) -> Result<bool> {
        Ok(false)
    }

    async fn set(&self, _feature: Feature, _enable: bool) -> Result<bool> {
        Ok(false)
    }

    async fn display_modes(&self) -> Result<Vec<DisplayMode>> {
        Ok(self.display_engine.available_modes().await)
    }

    async fn current_display_mode(&self) -> Result<Option<DisplayMode>> {
        Ok(self.display_engine.current_mode().await)
    }

    async fn default_display_mode(&self) -> Result<Option<DisplayMode>> {
        Ok(self.display_engine.default_mode().await)
    }

    async fn set_display_mode(&self, id: i32, make_default: bool) -> Result<bool> {
        Ok(self.display_engine.set_mode(id, make_default).await)
    }

    async fn set_fingerprint_navigation(&self, enable: bool) -> Result<bool> {
        Ok(self.fingerprint_navigation.set_enabled(enable).await)
    }

    async fn tri_state_ready(&self) -> Result<bool> {
        Ok(self.alert_slider.tri_state_ready().await)
    }

    async fn handle_tri_state_event(&self, event: KeyEvent) -> Result<Option<KeyEvent>> {
        Ok(self.alert_slider.handle_tri_state_event(event).await)
    }

    // No legacy controller exists for touchscreen gestures.
    async fn touchscreen_gestures(&self) -> Result<Vec<TouchscreenGesture>> {
        Ok(Vec::new())
    }

    async fn set_touchscreen_gesture_enabled(
        &self,
        _gesture: &TouchscreenGesture,
        _enable: bool,
    ) -> Result<bool> {
        Ok(false)
    }
}

/// Initialization signal published once the device has finished booting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadyEvent;

/// Service-side entry points.
///
/// Every call passes the permission gate first (a denial aborts the call
/// with no partial side effects), then the feature-availability gate
/// (unsupported hardware logs and returns the safe default), and only then
/// reaches the backend.
pub struct HardwareService {
    backend: Arc<dyn HardwareTransport>,
    policy: Arc<dyn AccessPolicy>,
    access_permission: String,
    ready_tx: broadcast::Sender<ReadyEvent>,
}

impl HardwareService {
    pub fn new(
        backend: Arc<dyn HardwareTransport>,
        policy: Arc<dyn AccessPolicy>,
        access_permission: String,
    ) -> Self {
        let (ready_tx, _) = broadcast::channel(4);
        Self {
            backend,
            policy,
            access_permission,
            ready_tx,
        }
    }

    fn check_access(&self, caller: &CallerIdentity) -> Result<()> {
        self.policy.check_access(caller, &self.access_permission)
    }

    async fn feature_supported(&self, feature: Feature) -> bool {
        match self.backend.supported_features().await {
            Ok(mask) => mask & feature.bit() == feature.bit(),
            Err(e) => {
                error!(error = %e, "supported features query failed");
                false
            }
        }
    }

    pub async fn supported_features(&self, caller: &CallerIdentity) -> Result<u32> {
        self.check_access(caller)?;
        Ok(self.backend.supported_features().await.unwrap_or_else(|e| {
            error!(error = %e, "supported features query failed");
            0
        }))
    }

    pub async fn get(&self, caller: &CallerIdentity, feature: Feature) -> Result<bool> {
        self.check_access(caller)?;
        if !self.feature_supported(feature).await {
            error!(feature = %feature, "feature is not supported");
            return Ok(false);
        }
        Ok(self.backend.get(feature).await.unwrap_or_else(|e| {
            error!(feature = %feature, error = %e, "boolean get failed");
            false
        }))
    }

    pub async fn set(
        &self,
        caller: &CallerIdentity,
        feature: Feature,
        enable: bool,
    ) -> Result<bool> {
        self.check_access(caller)?;
        if !self.feature_supported(feature).await {
            error!(feature = %feature, "feature is not supported");
            return Ok(false);
        }
        Ok(self.backend.set(feature, enable).await.unwrap_or_else(|e| {
            error!(feature = %feature, error = %e, "boolean set failed");
            false
        }))
    }

    pub async fn display_modes(&self, caller: &CallerIdentity) -> Result<Vec<DisplayMode>> {
        self.check_access(caller)?;
        if !self.feature_supported(Feature::DisplayModes).await {
            error!("display modes are not supported");
            return Ok(Vec::new());
        }
        Ok(self.backend.display_modes().await.unwrap_or_else(|e| {
            error!(error = %e, "display mode list query failed");
            Vec::new()
        }))
    }

    pub async fn current_display_mode(
        &self,
        caller: &CallerIdentity,
    ) -> Result<Option<DisplayMode>> {
        self.check_access(caller)?;
        if !self.feature_supported(Feature::DisplayModes).await {
            error!("display modes are not supported");
            return Ok(None);
        }
        Ok(self
            .backend
            .current_display_mode()
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "current display mode query failed");
                None
            }))
    }

    pub async fn default_display_mode(
        &self,
        caller: &CallerIdentity,
    ) -> Result<Option<DisplayMode>> {
        self.check_access(caller)?;
        if !self.feature_supported(Feature::DisplayModes).await {
            error!("display modes are not supported");
            return Ok(None);
        }
        Ok(self
            .backend
            .default_display_mode()
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "default display mode query failed");
                None
            }))
    }

    pub async fn set_display_mode(
        &self,
        caller: &CallerIdentity,
        id: i32,
        make_default: bool,
    ) -> Result<bool> {
        self.check_access(caller)?;
        if !self.feature_supported(Feature::DisplayModes).await {
            error!("display modes are not supported");
            return Ok(false);
        }
        Ok(self
            .backend
            .set_display_mode(id, make_default)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "set display mode failed");
                false
            }))
    }

    pub async fn set_fingerprint_navigation(
        &self,
        caller: &CallerIdentity,
        enable: bool,
    ) -> Result<bool> {
        self.check_access(caller)?;
        if !self.feature_supported(Feature::FingerprintNavigation).await {
            error!("fingerprint navigation is not supported");
            return Ok(false);
        }
        Ok(self
            .backend
            .set_fingerprint_navigation(enable)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "set fingerprint navigation failed");
                false
            }))
    }

    pub async fn tri_state_ready(&self, caller: &CallerIdentity) -> Result<bool> {
        self.check_access(caller)?;
        if !self.feature_supported(Feature::AlertSlider).await {
            error!("alert slider is not supported");
            return Ok(false);
        }
        Ok(self.backend.tri_state_ready().await.unwrap_or_else(|e| {
            error!(error = %e, "tri-state ready query failed");
            false
        }))
    }

    pub async fn handle_tri_state_event(
        &self,
        caller: &CallerIdentity,
        event: KeyEvent,
    ) -> Result<Option<KeyEvent>> {
        self.check_access(caller)?;
        if !self.feature_supported(Feature::AlertSlider).await {
            error!("alert slider is not supported");
            return Ok(None);
        }
        Ok(self
            .backend
            .handle_tri_state_event(event)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "tri-state event handling failed");
                None
            }))
    }

    pub async fn touchscreen_gestures(
        &self,
        caller: &CallerIdentity,
    ) -> Result<Vec<TouchscreenGesture>> {
        self.check_access(caller)?;
        if !self.feature_supported(Feature::TouchscreenGestures).await {
            error!("touchscreen gestures are not supported");
            return Ok(Vec::new());
        }
        Ok(self
            .backend
            .touchscreen_gestures()
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "touchscreen gesture list query failed");
                Vec::new()
            }))
    }

    pub async fn set_touchscreen_gesture_enabled(
        &self,
        caller: &CallerIdentity,
        gesture: &TouchscreenGesture,
        enable: bool,
    ) -> Result<bool> {
        self.check_access(caller)?;
        if !self.feature_supported(Feature::TouchscreenGestures).await {
            error!("touchscreen gestures are not supported");
            return Ok(false);
        }
        Ok(self
            .backend
            .set_touchscreen_gesture_enabled(gesture, enable)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "set touchscreen gesture failed");
                false
            }))
    }

    /// Publishes the one-shot initialization signal consumed by other
    /// components once the device has finished booting. Having no
    /// subscribers is not an error.
    pub fn announce_ready(&self) {
        let receivers = self.ready_tx.send(ReadyEvent).unwrap_or(0);
        info!(receivers, "device hardware service ready");
    }

    pub fn subscribe_ready(&self) -> broadcast::Receiver<ReadyEvent> {
        self.ready_tx.subscribe()
    }
}

/// In-process bridge from a gateway's legacy path to a `HardwareService`.
///
/// Intended for callers that already hold the access permission; a denial
/// surfaces as a transport failure and therefore degrades to defaults at
/// the gateway.
pub struct ServiceTransport {
    service: Arc<HardwareService>,
    caller: CallerIdentity,
}

impl ServiceTransport {
    pub fn new(service: Arc<HardwareService>, caller: CallerIdentity) -> Self {
        Self { service, caller }
    }
}

#[async_trait]
impl HardwareTransport for ServiceTransport {
    async fn supported_features(&self) -> Result<u32> {
        self.service.supported_features(&self.caller).await
    }

    async fn get(&self, feature: Feature) -> Result<bool> {
        self.service.get(&self.caller, feature).await
    }

    async fn set(&self, feature: Feature, enable: bool) -> Result<bool> {
        self.service.set(&self.caller, feature, enable).await
    }

    async fn display_modes(&self) -> Result<Vec<DisplayMode>> {
        self.service.display_modes(&self.caller).await
    }

    async fn current_display_mode(&self) -> Result<Option<DisplayMode>> {
        self.service.current_display_mode(&self.caller).await
    }

    async fn default_display_mode(&self) -> Result<Option<DisplayMode>> {
        self.service.default_display_mode(&self.caller).await
    }

    async fn set_display_mode(&self, id: i32, make_default: bool) -> Result<bool> {
        self.service
            .set_display_mode(&self.caller, id, make_default)
            .await
    }

    async fn set_fingerprint_navigation(&self, enable: bool) -> Result<bool> {
        self.service
            .set_fingerprint_navigation(&self.caller, enable)
            .await
    }

    async fn tri_state_ready(&self) -> Result<bool> {
        self.service.tri_state_ready(&self.caller).await
    }

    async fn handle_tri_state_event(&self, event: KeyEvent) -> Result<Option<KeyEvent>> {
        self.service
            .handle_tri_state_event(&self.caller, event)
            .await
    }

    async fn touchscreen_gestures(&self) -> Result<Vec<TouchscreenGesture>> {
        self.service.touchscreen_gestures(&self.caller).await
    }

    async fn set_touchscreen_gesture_enabled(
        &self,
        gesture: &TouchscreenGesture,
        enable: bool,
    ) -> Result<bool> {
        self.service
            .set_touchscreen_gesture_enabled(&self.caller, gesture, enable)
            .await
    }
}
