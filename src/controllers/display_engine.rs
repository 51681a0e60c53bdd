use crate::types::DisplayMode;
use async_trait::async_trait;

/// Display engine controller seam for the legacy path.
///
/// Device trees with a vendor display engine implement this. Real
/// implementations must return true from `is_supported`.
#[async_trait]
pub trait DisplayEngineController: Send + Sync {
    fn is_supported(&self) -> bool;

    async fn available_modes(&self) -> Vec<DisplayMode>;
    async fn current_mode(&self) -> Option<DisplayMode>;
    async fn default_mode(&self) -> Option<DisplayMode>;
    async fn set_mode(&self, id: i32, make_default: bool) -> bool;
}

/// Placeholder for devices without a display engine.
pub struct StubDisplayEngine;

#[async_trait]
impl DisplayEngineController for StubDisplayEngine {
    fn is_supported(&self) -> bool {
        false
    }

    async fn available_modes(&self) -> Vec<DisplayMode> {
        Vec::new()
    }

    async fn current_mode(&self) -> Option<DisplayMode> {
        None
    }

    async fn default_mode(&self) -> Option<DisplayMode> {
        None
    }

    async fn set_mode(&self, _id: i32, _make_default: bool) -> bool {
        false
    }
}
