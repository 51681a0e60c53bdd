use crate::error::{HardwareError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Static device configuration, read once at gateway startup.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Ordered `"rawName:displayName"` pairs for display mode renaming.
    #[serde(default)]
    pub display_mode_mappings: Vec<String>,

    /// When true, raw modes without a mapping entry are hidden from callers.
    #[serde(default)]
    pub filter_display_modes: bool,

    /// Permission every service entry point enforces on the caller.
    #[serde(default = "default_access_permission")]
    pub access_permission: String,
}

fn default_access_permission() -> String {
    "DEVICE_HARDWARE_ACCESS".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            display_mode_mappings: Vec::new(),
            filter_display_modes: false,
            access_permission: default_access_permission(),
        }
    }
}

impl GatewayConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            HardwareError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: GatewayConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
display_mode_mappings = ["vivid:Vivid", "srgb:Natural"]
filter_display_modes = true
access_permission = "HW_ACCESS"
"#
        )
        .unwrap();

        let config = GatewayConfig::load(file.path()).unwrap();
        assert_eq!(config.display_mode_mappings.len(), 2);
        assert!(config.filter_display_modes);
        assert_eq!(config.access_permission, "HW_ACCESS");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "filter_display_modes = false").unwrap();

        let config = GatewayConfig::load(file.path()).unwrap();
        assert!(config.display_mode_mappings.is_empty());
        assert_eq!(config.access_permission, "DEVICE_HARDWARE_ACCESS");
    }

    #[test]
    fn test_missing_file_is_a_config_error() {
        let err = GatewayConfig::load("/nonexistent/devicehw.toml").unwrap_err();
        assert!(matches!(err, HardwareError::Config(_)));
    }
}
