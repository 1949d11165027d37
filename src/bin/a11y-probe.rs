use a11y_probe::{probe::ProbeConfig, protocol::BUS_ADDRESS_ENV};
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// a11y-probe: lists the applications registered with the AT-SPI registry.
///
/// Connects to the accessibility bus, walks a short idle-driven workflow
/// and prints the registry's children to stdout. Logs go to stderr.
#[derive(Parser, Debug)]
#[command(name = "a11y-probe", version, about)]
struct Cli {
    /// Accessibility bus address; skips asking the session bus launcher.
    #[arg(long, env = BUS_ADDRESS_ENV)]
    bus_address: Option<String>,

    /// Accepted for compatibility and ignored.
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    _rest: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config =
        ProbeConfig::from_bus_address(cli.bus_address.as_deref()).context("invalid --bus-address")?;

    a11y_probe::probe::run(config).await
}
