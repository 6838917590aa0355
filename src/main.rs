use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use qrexport::{pipeline, render};

fn init_logger() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("qrexport=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// Version and location of the running binary.
fn runtime_banner() -> String {
    let exe = std::env::current_exe()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    format!("qrexport {} ({})", env!("CARGO_PKG_VERSION"), exe)
}

fn main() -> anyhow::Result<()> {
    init_logger();
    tracing::info!("{}", runtime_banner());

    let config = pipeline::Config::default();
    let symbol = pipeline::run(&config).context("qrexport failed")?;

    print!("{}", render::to_terminal_string(&symbol));
    for target in &config.targets {
        println!("Saved {}", target.path.display());
    }
    Ok(())
}
