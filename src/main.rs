use clap::{Parser, Subcommand};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use devicehw::config::GatewayConfig;
use devicehw::controllers::{StubAlertSlider, StubDisplayEngine, StubFingerprintNavigation};
use devicehw::gateway::HardwareGateway;
use devicehw::providers::{HardwareTransport, NullResolver};
use devicehw::registry::FeatureRegistry;
use devicehw::remap::DisplayModeMap;
use devicehw::service::{
    CallerIdentity, HardwareService, LegacyHardware, PermissionPolicy, ServiceTransport,
};
use devicehw::types::Feature;

#[derive(Parser)]
#[command(name = "devicehwd")]
#[command(about = "Device hardware feature gateway")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the gateway configuration file
    #[arg(long, default_value = "devicehw.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show support status for every hardware feature
    Status,
    /// Read a boolean feature by symbolic name (e.g. FEATURE_FINGERPRINT_NAVIGATION)
    Get {
        feature: String,
    },
    /// Enable or disable a boolean feature by symbolic name
    Set {
        feature: String,
        #[arg(long)]
        enable: bool,
    },
    /// List display modes after renaming/filtering
    Modes,
    /// Select a display mode by its raw id
    SetMode {
        id: i32,
        /// Also make this the mode applied at boot
        #[arg(long)]
        make_default: bool,
    },
    /// Check whether the alert slider handler is ready
    SliderReady,
}

fn load_config(path: &str) -> GatewayConfig {
    if Path::new(path).exists() {
        match GatewayConfig::load(path) {
            Ok(config) => return config,
            Err(e) => warn!("Failed to load config '{}': {}", path, e),
        }
    } else {
        info!("No config file at '{}', using defaults", path);
    }
    GatewayConfig::default()
}

/// Wires the stub controllers into a service and a gateway pointed at it.
/// Device trees with real vendor controllers swap in their implementations
/// and capability resolver here.
fn build_gateway(config: &GatewayConfig) -> (Arc<HardwareService>, HardwareGateway) {
    let backend = Arc::new(LegacyHardware::new(
        Arc::new(StubDisplayEngine),
        Arc::new(StubFingerprintNavigation),
        Arc::new(StubAlertSlider),
    ));
    let service = Arc::new(HardwareService::new(
        backend,
        Arc::new(PermissionPolicy),
        config.access_permission.clone(),
    ));

    let system = CallerIdentity::new(0, vec![config.access_permission.clone()]);
    let transport: Arc<dyn HardwareTransport> =
        Arc::new(ServiceTransport::new(service.clone(), system));
    let gateway = HardwareGateway::new(
        FeatureRegistry::new(Arc::new(NullResolver)),
        Some(transport),
        DisplayModeMap::from_config(config),
    );
    (service, gateway)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    devicehw::logging::init_logging();

    let cli = Cli::parse();
    let config = load_config(&cli.config);
    let (service, gateway) = build_gateway(&config);
    service.announce_ready();

    match cli.command {
        Commands::Status => {
            println!("Feature support:");
            for feature in Feature::ALL {
                let supported = gateway.is_supported(feature).await;
                println!(
                    "   {:<32} {}",
                    feature.name(),
                    if supported { "supported" } else { "not supported" }
                );
            }
        }
        Commands::Get { feature } => match Feature::from_name(&feature) {
            Some(f) => match gateway.get(f).await {
                Ok(enabled) => println!("{} = {}", f.name(), enabled),
                Err(e) => println!("⚠️  {}", e),
            },
            None => println!("⚠️  Unknown feature: {}", feature),
        },
        Commands::Set { feature, enable } => match Feature::from_name(&feature) {
            Some(f) => match gateway.set(f, enable).await {
                Ok(true) => println!("✅ {} set to {}", f.name(), enable),
                Ok(false) => println!("⚠️  {} could not be set", f.name()),
                Err(e) => println!("⚠️  {}", e),
            },
            None => println!("⚠️  Unknown feature: {}", feature),
        },
        Commands::Modes => {
            let modes = gateway.display_modes().await;
            if modes.is_empty() {
                println!("No display modes available");
            } else {
                println!("Display modes:");
                for mode in &modes {
                    println!("   [{}] {}", mode.id, mode.name);
                }
            }
            match gateway.current_display_mode().await {
                Some(mode) => println!("Current: [{}] {}", mode.id, mode.name),
                None => println!("Current: none"),
            }
            match gateway.default_display_mode().await {
                Some(mode) => println!("Default: [{}] {}", mode.id, mode.name),
                None => println!("Default: none"),
            }
        }
        Commands::SetMode { id, make_default } => {
            if gateway.set_display_mode(id, make_default).await {
                println!("✅ Display mode {} applied", id);
            } else {
                println!("⚠️  Display mode {} could not be applied", id);
            }
        }
        Commands::SliderReady => {
            println!("Alert slider ready: {}", gateway.tri_state_ready().await);
        }
    }
    Ok(())
}
