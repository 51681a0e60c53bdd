use crate::error::{HardwareError, Result};
use crate::providers::{CapabilityHandle, HardwareTransport};
use crate::registry::FeatureRegistry;
use crate::remap::DisplayModeMap;
use crate::types::{DisplayMode, Feature, KeyEvent, TouchscreenGesture};
use std::sync::Arc;
use tracing::{debug, warn};

/// Client-facing dispatch surface for device hardware features.
///
/// Each operation routes through the capability provider resolved for the
/// feature when one exists, and otherwise falls back to the legacy
/// transport. Transport and provider failures degrade to safe defaults;
/// only authorization and argument-shape errors surface to the caller.
pub struct HardwareGateway {
    registry: FeatureRegistry,
    transport: Option<Arc<dyn HardwareTransport>>,
    modes: DisplayModeMap,
}

impl HardwareGateway {
    pub fn new(
        registry: FeatureRegistry,
        transport: Option<Arc<dyn HardwareTransport>>,
        modes: DisplayModeMap,
    ) -> Self {
        Self {
            registry,
            transport,
            modes,
        }
    }

    /// True if a capability provider resolves for the feature, or the
    /// legacy bitmask reports its bit.
    pub async fn is_supported(&self, feature: Feature) -> bool {
        self.registry.is_resolved(feature).await || self.is_supported_legacy(feature).await
    }

    /// Symbolic-name variant for preference constraints. Unknown names and
    /// names without the `FEATURE_` prefix fail closed.
    pub async fn is_supported_name(&self, name: &str) -> bool {
        match Feature::from_name(name) {
            Some(feature) => self.is_supported(feature).await,
            None => {
                debug!(name, "unknown feature name");
                false
            }
        }
    }

    async fn is_supported_legacy(&self, feature: Feature) -> bool {
        let Some(transport) = self.transport() else {
            return false;
        };
        match transport.supported_features().await {
            Ok(mask) => mask & feature.bit() == feature.bit(),
            Err(e) => {
                warn!(error = %e, "supported features query failed");
                false
            }
        }
    }

    /// Reads a boolean feature's enabled state.
    ///
    /// Only valid for boolean-capable features; anything else is a
    /// `NotBoolean` error. An unavailable or failing backing path yields
    /// `Ok(false)`, never an error.
    pub async fn get(&self, feature: Feature) -> Result<bool> {
        if !feature.is_boolean() {
            return Err(HardwareError::NotBoolean(feature));
        }

        if let Some(handle) = self.registry.handle(feature).await {
            let enabled = match handle {
                CapabilityHandle::FingerprintNavigation(nav) => {
                    nav.is_enabled().await.unwrap_or_else(|e| {
                        warn!(feature = %feature, error = %e, "boolean get failed");
                        false
                    })
                }
                // A mismatched handle shape has nothing to read.
                _ => false,
            };
            return Ok(enabled);
        }

        if let Some(transport) = self.transport() {
            return Ok(transport.get(feature).await.unwrap_or_else(|e| {
                warn!(feature = %feature, error = %e, "boolean get failed");
                false
            }));
        }
        Ok(false)
    }

    /// Enables or disables a boolean feature. Same shape rules and failure
    /// policy as `get`.
    pub async fn set(&self, feature: Feature, enable: bool) -> Result<bool> {
        if !feature.is_boolean() {
            return Err(HardwareError::NotBoolean(feature));
        }

        if let Some(handle) = self.registry.handle(feature).await {
            let applied = match handle {
                CapabilityHandle::FingerprintNavigation(nav) => {
                    nav.set_enabled(enable).await.unwrap_or_else(|e| {
                        warn!(feature = %feature, error = %e, "boolean set failed");
                        false
                    })
                }
                _ => false,
            };
            return Ok(applied);
        }

        if let Some(transport) = self.transport() {
            return Ok(transport.set(feature, enable).await.unwrap_or_else(|e| {
                warn!(feature = %feature, error = %e, "boolean set failed");
                false
            }));
        }
        Ok(false)
    }

    /// Available display modes after renaming/filtering. Empty when the
    /// feature is unavailable or the backing path fails.
    pub async fn display_modes(&self) -> Vec<DisplayMode> {
        let raw = if let Some(CapabilityHandle::DisplayModes(dm)) =
            self.registry.handle(Feature::DisplayModes).await
        {
            dm.modes().await.unwrap_or_else(|e| {
                warn!(error = %e, "display mode list query failed");
                Vec::new()
            })
        } else if let Some(transport) = self.transport() {
            transport.display_modes().await.unwrap_or_else(|e| {
                warn!(error = %e, "display mode list query failed");
                Vec::new()
            })
        } else {
            Vec::new()
        };
        self.modes.remap_all(raw)
    }

    /// The currently active display mode, remapped. May be `None` even when
    /// a raw mode exists, if filtering hides it.
    pub async fn current_display_mode(&self) -> Option<DisplayMode> {
        let mode = if let Some(CapabilityHandle::DisplayModes(dm)) =
            self.registry.handle(Feature::DisplayModes).await
        {
            match dm.current_mode().await {
                Ok(mode) => Some(mode),
                Err(e) => {
                    warn!(error = %e, "current display mode query failed");
                    None
                }
            }
        } else if let Some(transport) = self.transport() {
            transport.current_display_mode().await.unwrap_or_else(|e| {
                warn!(error = %e, "current display mode query failed");
                None
            })
        } else {
            None
        };
        mode.and_then(|m| self.modes.remap(&m))
    }

    /// The display mode applied at boot, remapped.
    pub async fn default_display_mode(&self) -> Option<DisplayMode> {
        let mode = if let Some(CapabilityHandle::DisplayModes(dm)) =
            self.registry.handle(Feature::DisplayModes).await
        {
            match dm.default_mode().await {
                Ok(mode) => Some(mode),
                Err(e) => {
                    warn!(error = %e, "default display mode query failed");
                    None
                }
            }
        } else if let Some(transport) = self.transport() {
            transport.default_display_mode().await.unwrap_or_else(|e| {
                warn!(error = %e, "default display mode query failed");
                None
            })
        } else {
            None
        };
        mode.and_then(|m| self.modes.remap(&m))
    }

    /// Selects a display mode by its raw id. Remapping never changes ids,
    /// so the id of any previously returned mode is valid here.
    pub async fn set_display_mode(&self, id: i32, make_default: bool) -> bool {
        if let Some(CapabilityHandle::DisplayModes(dm)) =
            self.registry.handle(Feature::DisplayModes).await
        {
            return dm.set_mode(id, make_default).await.unwrap_or_else(|e| {
                warn!(error = %e, "set display mode failed");
                false
            });
        }
        if let Some(transport) = self.transport() {
            return transport
                .set_display_mode(id, make_default)
                .await
                .unwrap_or_else(|e| {
                    warn!(error = %e, "set display mode failed");
                    false
                });
        }
        false
    }

    pub async fn set_fingerprint_navigation(&self, enable: bool) -> bool {
        if let Some(CapabilityHandle::FingerprintNavigation(nav)) = self
            .registry
            .handle(Feature::FingerprintNavigation)
            .await
        {
            return nav.set_enabled(enable).await.unwrap_or_else(|e| {
                warn!(error = %e, "set fingerprint navigation failed");
                false
            });
        }
        if let Some(transport) = self.transport() {
            return transport
                .set_fingerprint_navigation(enable)
                .await
                .unwrap_or_else(|e| {
                    warn!(error = %e, "set fingerprint navigation failed");
                    false
                });
        }
        false
    }

    /// Whether the alert slider handler can be used. Legacy path only.
    pub async fn tri_state_ready(&self) -> bool {
        if let Some(transport) = self.transport() {
            return transport.tri_state_ready().await.unwrap_or_else(|e| {
                warn!(error = %e, "tri-state ready query failed");
                false
            });
        }
        false
    }

    /// Hands a tri-state key event to the slider handler. Legacy path only.
    pub async fn handle_tri_state_event(&self, event: KeyEvent) -> Option<KeyEvent> {
        if let Some(transport) = self.transport() {
            return transport
                .handle_tri_state_event(event)
                .await
                .unwrap_or_else(|e| {
                    warn!(error = %e, "tri-state event handling failed");
                    None
                });
        }
        None
    }

    pub async fn touchscreen_gestures(&self) -> Vec<TouchscreenGesture> {
        if let Some(CapabilityHandle::TouchscreenGestures(touch)) = self
            .registry
            .handle(Feature::TouchscreenGestures)
            .await
        {
            return touch.gestures().await.unwrap_or_else(|e| {
                warn!(error = %e, "touchscreen gesture list query failed");
                Vec::new()
            });
        }
        if let Some(transport) = self.transport() {
            return transport.touchscreen_gestures().await.unwrap_or_else(|e| {
                warn!(error = %e, "touchscreen gesture list query failed");
                Vec::new()
            });
        }
        Vec::new()
    }

    pub async fn set_touchscreen_gesture_enabled(
        &self,
        gesture: &TouchscreenGesture,
        enable: bool,
    ) -> bool {
        if let Some(CapabilityHandle::TouchscreenGestures(touch)) = self
            .registry
            .handle(Feature::TouchscreenGestures)
            .await
        {
            return touch
                .set_gesture_enabled(gesture, enable)
                .await
                .unwrap_or_else(|e| {
                    warn!(error = %e, "set touchscreen gesture failed");
                    false
                });
        }
        if let Some(transport) = self.transport() {
            return transport
                .set_touchscreen_gesture_enabled(gesture, enable)
                .await
                .unwrap_or_else(|e| {
                    warn!(error = %e, "set touchscreen gesture failed");
                    false
                });
        }
        false
    }

    fn transport(&self) -> Option<&Arc<dyn HardwareTransport>> {
        if self.transport.is_none() {
            warn!("not connected to the device hardware service");
        }
        self.transport.as_ref()
    }
}
