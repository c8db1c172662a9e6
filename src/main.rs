use anyhow::Context;
use clap::Parser;
use clipkeep_lib::bootstrap::{cli::Cli, config::resolve_config, run::run_app, tracing::init_tracing_subscriber};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    init_tracing_subscriber().context("Failed to initialize tracing")?;
    tracing::info!(?config, "Configuration loaded");

    // 单线程协作式调度
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    runtime.block_on(run_app(config, !cli.no_capture))
}
