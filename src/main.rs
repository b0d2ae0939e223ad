//! # Kubernetes Image Puller
//!
//! Resolves the image puller configuration from environment variables at startup.
//!
//! ## Overview
//!
//! The image puller keeps a set of container images cached on every node by
//! running a DaemonSet. This binary is the startup step:
//!
//! 1. **Read the environment** - `IMAGES`, `CACHING_INTERVAL_HOURS` and the optional settings
//! 2. **Validate and default** - malformed values are logged and defaulted where allowed
//! 3. **Fail fast** - a missing required variable or invalid JSON terminates with exit code 1
//!
//! ## Usage
//!
//! ```bash
//! IMAGES="web=quay.io/app/web:1;db=quay.io/app/db:2" CACHING_INTERVAL_HOURS=1 \
//!     kubernetes-image-puller --print-config
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use kubernetes_image_puller::config::{ConfigError, ProcessEnvironment};
use kubernetes_image_puller::runtime::{initialize, LogFormat};
use kubernetes_image_puller::workload;
use tracing::error;

/// Kubernetes Image Puller
#[derive(Debug, Parser)]
#[command(name = "kubernetes-image-puller")]
#[command(about = "Resolve Kubernetes Image Puller configuration from the environment", long_about = None)]
struct Cli {
    /// Print the resolved configuration as JSON on stdout
    #[arg(long)]
    print_config: bool,

    /// Log output format (text or json)
    #[arg(long, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let init_result = match initialize(ProcessEnvironment, cli.log_format) {
        Ok(result) => result,
        Err(e) => {
            // Configuration errors are logged where they occur
            if e.downcast_ref::<ConfigError>().is_none() {
                error!("{:#}", e);
            }
            std::process::exit(1);
        }
    };

    if cli.print_config {
        let output = serde_json::json!({
            "config": init_result.config,
            "containers": workload::image_containers(&init_result.config)
                .iter()
                .map(|c| serde_json::json!({ "name": c.name, "image": c.image }))
                .collect::<Vec<_>>(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialize configuration")?
        );
    }

    Ok(())
}
