//! Full-stack wiring: fake platform controllers -> legacy backend ->
//! service gate -> in-process transport -> client gateway.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use devicehw::controllers::{
    AlertSliderController, DisplayEngineController, FingerprintNavigationController,
    StubFingerprintNavigation,
};
use devicehw::gateway::HardwareGateway;
use devicehw::providers::{HardwareTransport, NullResolver};
use devicehw::registry::FeatureRegistry;
use devicehw::remap::DisplayModeMap;
use devicehw::service::{
    CallerIdentity, HardwareService, LegacyHardware, PermissionPolicy, ServiceTransport,
};
use devicehw::types::{DisplayMode, Feature, KeyAction, KeyEvent};

const PERMISSION: &str = "DEVICE_HARDWARE_ACCESS";

struct FakeDisplayEngine;

#[async_trait]
impl DisplayEngineController for FakeDisplayEngine {
    fn is_supported(&self) -> bool {
        true
    }

    async fn available_modes(&self) -> Vec<DisplayMode> {
        vec![DisplayMode::new(1, "vivid"), DisplayMode::new(2, "natural")]
    }

    async fn current_mode(&self) -> Option<DisplayMode> {
        Some(DisplayMode::new(1, "vivid"))
    }

    async fn default_mode(&self) -> Option<DisplayMode> {
        Some(DisplayMode::new(1, "vivid"))
    }

    async fn set_mode(&self, id: i32, _make_default: bool) -> bool {
        id == 1 || id == 2
    }
}

struct FakeAlertSlider;

#[async_trait]
impl AlertSliderController for FakeAlertSlider {
    fn is_supported(&self) -> bool {
        true
    }

    async fn tri_state_ready(&self) -> bool {
        true
    }

    async fn handle_tri_state_event(&self, event: KeyEvent) -> Option<KeyEvent> {
        Some(event)
    }
}

fn build_stack(caller: CallerIdentity) -> (Arc<HardwareService>, HardwareGateway) {
    let backend = Arc::new(LegacyHardware::new(
        Arc::new(FakeDisplayEngine),
        Arc::new(StubFingerprintNavigation),
        Arc::new(FakeAlertSlider),
    ));
    let service = Arc::new(HardwareService::new(
        backend,
        Arc::new(PermissionPolicy),
        PERMISSION.to_string(),
    ));
    let transport: Arc<dyn HardwareTransport> =
        Arc::new(ServiceTransport::new(service.clone(), caller));
    let gateway = HardwareGateway::new(
        FeatureRegistry::new(Arc::new(NullResolver)),
        Some(transport),
        DisplayModeMap::new(&["vivid:Vivid".to_string()], false),
    );
    (service, gateway)
}

fn authorized() -> CallerIdentity {
    CallerIdentity::new(1000, vec![PERMISSION.to_string()])
}

#[tokio::test]
async fn test_supported_controllers_surface_through_the_whole_stack() -> Result<()> {
    let (service, gateway) = build_stack(authorized());

    let mask = service.supported_features(&authorized()).await?;
    assert_eq!(
        mask,
        Feature::DisplayModes.bit() | Feature::AlertSlider.bit()
    );

    assert!(gateway.is_supported(Feature::DisplayModes).await);
    assert!(gateway.is_supported(Feature::AlertSlider).await);
    assert!(!gateway.is_supported(Feature::FingerprintNavigation).await);

    // Remap runs client-side: the service hands out raw names.
    let raw = service.display_modes(&authorized()).await?;
    assert_eq!(raw[0].name, "vivid");
    let remapped = gateway.display_modes().await;
    assert_eq!(remapped[0].name, "Vivid");
    assert_eq!(remapped[0].id, raw[0].id);

    assert!(gateway.set_display_mode(remapped[0].id, false).await);

    assert!(gateway.tri_state_ready().await);
    let event = KeyEvent {
        key_code: 601,
        action: KeyAction::Down,
    };
    assert_eq!(gateway.handle_tri_state_event(event).await, Some(event));
    Ok(())
}

#[tokio::test]
async fn test_unauthorized_caller_degrades_at_the_gateway() -> Result<()> {
    // The service rejects the caller; the gateway treats that as an
    // unavailable transport and falls back to defaults.
    let (service, gateway) = build_stack(CallerIdentity::new(10042, Vec::new()));

    assert!(service
        .supported_features(&CallerIdentity::new(10042, Vec::new()))
        .await
        .is_err());

    assert!(!gateway.is_supported(Feature::DisplayModes).await);
    assert!(gateway.display_modes().await.is_empty());
    assert!(!gateway.tri_state_ready().await);
    Ok(())
}

#[tokio::test]
async fn test_fingerprint_navigation_stays_gated_off() -> Result<()> {
    let (service, gateway) = build_stack(authorized());

    // Stub controller: the bit is unset, so the service logs and defaults.
    assert!(!service
        .set_fingerprint_navigation(&authorized(), true)
        .await?);
    assert!(!gateway.set_fingerprint_navigation(true).await);
    assert!(!gateway.get(Feature::FingerprintNavigation).await?);
    Ok(())
}
