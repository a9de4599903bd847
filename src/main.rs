//! UIPlugin Operator
//!
//! Renders the deployable descriptor for a UIPlugin manifest and reports
//! whether its status conditions would need to be written back.
//!
//! ```text
//! manifest ──▶ build_plugin_info ──▶ (LokiStack discovery) ──▶ descriptor (stdout)
//!                                                        └───▶ Reconciled condition
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use uiplugin_operator::config::DEFAULT_NAMESPACE;
use uiplugin_operator::status::{reconciled_condition, resource_discovery_condition};
use uiplugin_operator::{
    build_plugin_info, discover_loki_services, generated_resource_name, load_plugin_manifest,
    Error, KubeServiceLister, OperatorConfig, PluginInfo, Result, ServiceListerRef, UIPlugin,
    UIPluginType,
};

// =============================================================================
// CLI Arguments
// =============================================================================

/// UIPlugin Operator - console plugin descriptor synthesis
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the UIPlugin manifest
    #[arg(long, env = "UIPLUGIN_MANIFEST")]
    plugin: PathBuf,

    /// Namespace for generated plugin resources
    #[arg(long, env = "OPERATOR_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// Dashboards plugin image
    #[arg(long, env = "DASHBOARDS_IMAGE")]
    dashboards_image: Option<String>,

    /// Distributed tracing plugin image
    #[arg(long, env = "DISTRIBUTED_TRACING_IMAGE")]
    distributed_tracing_image: Option<String>,

    /// Troubleshooting panel plugin image
    #[arg(long, env = "TROUBLESHOOTING_PANEL_IMAGE")]
    troubleshooting_panel_image: Option<String>,

    /// Feature flags passed to the plugin (comma separated)
    #[arg(long, env = "PLUGIN_FEATURES", value_delimiter = ',')]
    features: Vec<String>,

    /// Namespaces to search for LokiStack gateways (requires cluster access)
    #[arg(long = "lokistack-namespace", env = "LOKISTACK_NAMESPACES", value_delimiter = ',')]
    lokistack_namespaces: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);

    info!("Starting UIPlugin Operator");
    info!("  Version: {}", uiplugin_operator::VERSION);
    info!("  Manifest: {}", args.plugin.display());
    info!("  Namespace: {}", args.namespace);

    let config = operator_config(&args);
    let plugin = load_plugin_manifest(&args.plugin)?;
    let generation = plugin.generation();

    let outcome = render(&plugin, &config, &args.lokistack_namespaces).await;

    let mut status = plugin.status.clone().unwrap_or_default();
    let mut changed = status.set_condition(reconciled_condition(generation, &outcome));
    if let Ok(descriptor) = &outcome {
        if !args.lokistack_namespaces.is_empty() {
            changed |= status.set_condition(resource_discovery_condition(
                generation,
                descriptor.loki_service_names.len(),
            ));
        }
    }

    if changed {
        info!(
            plugin = plugin.name(),
            conditions = status.conditions.len(),
            "Status update required"
        );
    } else {
        debug!(plugin = plugin.name(), "Status unchanged");
    }

    let descriptor = outcome?;
    print!("{}", serde_yaml::to_string(&descriptor)?);

    Ok(())
}

fn operator_config(args: &Args) -> OperatorConfig {
    OperatorConfig {
        namespace: args.namespace.clone(),
        ..Default::default()
    }
    .with_image(UIPluginType::Dashboards, args.dashboards_image.clone())
    .with_image(UIPluginType::DistributedTracing, args.distributed_tracing_image.clone())
    .with_image(UIPluginType::TroubleshootingPanel, args.troubleshooting_panel_image.clone())
    .with_features(UIPluginType::DistributedTracing, args.features.clone())
    .with_features(UIPluginType::TroubleshootingPanel, args.features.clone())
}

async fn render(
    plugin: &UIPlugin,
    config: &OperatorConfig,
    lokistack_namespaces: &[String],
) -> Result<PluginInfo> {
    let plugin_type = plugin.spec.r#type;
    let image = config.image_for(plugin_type)?;

    let descriptor = build_plugin_info(
        plugin,
        &config.namespace,
        &generated_resource_name(plugin)?,
        image,
        config.features_for(plugin_type),
    )?;

    if lokistack_namespaces.is_empty() {
        return Ok(descriptor);
    }

    let client = kube::Client::try_default()
        .await
        .map_err(|e| Error::Configuration(format!("Kubernetes client unavailable: {}", e)))?;
    let lister: ServiceListerRef = Arc::new(KubeServiceLister::new(client));
    let services = discover_loki_services(lister.as_ref(), lokistack_namespaces).await?;
    if services.is_empty() {
        warn!(namespaces = ?lokistack_namespaces, "No LokiStack gateway found");
    }

    Ok(descriptor.with_loki_services(services))
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{},kube=info,hyper=warn,tower=warn", level))
    });

    // Descriptor goes to stdout, logs to stderr
    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
