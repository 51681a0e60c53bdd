use crate::config::GatewayConfig;
use crate::types::DisplayMode;
use std::collections::HashMap;
use tracing::debug;

/// Configuration-driven rename/filter stage for display mode names.
///
/// Built once from the device configuration and immutable afterwards. The
/// mode id is never touched, so callers can hand a remapped mode's id back
/// to `set_display_mode` unchanged.
#[derive(Debug, Clone, Default)]
pub struct DisplayModeMap {
    mappings: HashMap<String, String>,
    filter_unmapped: bool,
}

impl DisplayModeMap {
    /// Parses `"rawName:displayName"` pairs. Pairs that do not split into
    /// exactly two non-empty parts are skipped.
    pub fn new(pairs: &[String], filter_unmapped: bool) -> Self {
        let mut mappings = HashMap::new();
        for pair in pairs {
            let split: Vec<&str> = pair.split(':').collect();
            match split.as_slice() {
                [raw, display] if !raw.is_empty() && !display.is_empty() => {
                    mappings.insert((*raw).to_string(), (*display).to_string());
                }
                _ => debug!(mapping = %pair, "skipping malformed display mode mapping"),
            }
        }
        Self {
            mappings,
            filter_unmapped,
        }
    }

    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(&config.display_mode_mappings, config.filter_display_modes)
    }

    /// Renames a mode per the mapping table, passes it through unchanged
    /// when filtering is disabled, or hides it entirely.
    pub fn remap(&self, mode: &DisplayMode) -> Option<DisplayMode> {
        if let Some(display) = self.mappings.get(&mode.name) {
            return Some(DisplayMode::new(mode.id, display.clone()));
        }
        if !self.filter_unmapped {
            return Some(mode.clone());
        }
        None
    }

    /// Applies `remap` to every element, dropping hidden modes.
    pub fn remap_all(&self, modes: Vec<DisplayMode>) -> Vec<DisplayMode> {
        modes.iter().filter_map(|m| self.remap(m)).collect()
    }
}
