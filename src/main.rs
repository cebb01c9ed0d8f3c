mod config;
mod error;
mod logging;
mod probe;
mod report;
mod schema;
mod validator;
mod wait;

use clap::Parser;
use tracing::{error, info};
use url::Url;

use config::{CliArgs, ProbeConfig};
use validator::ContractChecker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let _guard = logging::init_tracing(args.log_file.as_deref())?;

    info!("Starting dashprobe v{}", env!("CARGO_PKG_VERSION"));
    info!("Base URL: {}", args.base_url);

    // Validate base URL
    let base_url = match Url::parse(&args.base_url) {
        Ok(url) => url,
        Err(e) => {
            error!("Invalid base URL {:?}: {}", args.base_url, e);
            std::process::exit(1);
        }
    };

    // Validate plugin selection
    for plugin in &args.plugins {
        if schema::schema_for(plugin).is_none() {
            error!(
                "Unknown plugin {:?} (builtin: {})",
                plugin,
                schema::builtin_names().join(", ")
            );
            std::process::exit(1);
        }
    }

    let config = ProbeConfig::from_args(args, base_url);
    let checker = ContractChecker::from_config(&config)?;

    if config.wait_secs > 0 {
        info!("Waiting up to {}s for the backend", config.wait_secs);
        let addr = wait::backend_addr(&config.base_url);
        if !wait::wait_for_backend(&checker, addr, config.wait_secs).await {
            error!("Backend did not become ready within {}s", config.wait_secs);
            std::process::exit(1);
        }
    }

    let report = probe::run_suite(&config, &checker).await;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }

    if !report.all_passed() {
        std::process::exit(1);
    }

    Ok(())
}
