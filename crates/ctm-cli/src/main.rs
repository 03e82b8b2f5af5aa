//! `ctm` binary: one traceability run from a configuration file

use anyhow::Context;
use ctm_cli::{init_logging, run, CliArgs, Config};

fn main() -> anyhow::Result<()> {
    let log = init_logging();
    let args = CliArgs::parse();

    tracing::info!("Continuous Traceability Monitor {}", ctm_cli::VERSION);

    let mut config = Config::load(&args.config)
        .with_context(|| format!("failed to load configuration {}", args.config.display()))?;
    if let Some(delivery_file) = &args.delivery_file {
        config
            .apply_delivery_file(delivery_file)
            .with_context(|| format!("failed to read delivery file {}", delivery_file.display()))?;
    }
    args.apply_overrides(&mut config);
    log.set_level(&config.log.level);

    let summary = run(&config, args.run_options()).context("traceability run failed")?;
    tracing::info!(
        traces = summary.traces.len(),
        delivery = summary.delivery.len(),
        "Done, wrote {} reports to {}",
        summary.written.len(),
        config.output_dir.display()
    );

    Ok(())
}
