use crate::providers::{CapabilityHandle, CapabilityResolver};
use crate::types::Feature;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

/// Feature -> capability handle table with once-per-feature lazy resolution.
///
/// Resolution goes through the injected resolver at most once per feature;
/// a failed lookup is cached as absent for the process lifetime. Handles are
/// never invalidated, so hot-swapped hardware is not picked up.
pub struct FeatureRegistry {
    resolver: Arc<dyn CapabilityResolver>,
    cells: HashMap<Feature, OnceCell<Option<CapabilityHandle>>>,
}

impl FeatureRegistry {
    pub fn new(resolver: Arc<dyn CapabilityResolver>) -> Self {
        let cells = Feature::ALL
            .iter()
            .map(|f| (*f, OnceCell::new()))
            .collect();
        Self { resolver, cells }
    }

    /// Returns the cached capability handle for `feature`, resolving on
    /// first use. Concurrent first callers resolve exactly once.
    pub async fn handle(&self, feature: Feature) -> Option<CapabilityHandle> {
        let cell = self.cells.get(&feature)?;
        cell.get_or_init(|| async {
            let handle = self.resolver.resolve(feature).await;
            if handle.is_none() {
                debug!(feature = %feature, "no capability provider resolved");
            }
            handle
        })
        .await
        .clone()
    }

    pub async fn is_resolved(&self, feature: Feature) -> bool {
        self.handle(feature).await.is_some()
    }
}
