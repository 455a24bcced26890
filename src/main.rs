use anyhow::Context;
use clap::Parser;
use pr_turnaround::utils::{logger, validation::Validate};
use pr_turnaround::{CliConfig, EtlEngine, LocalStorage, TurnaroundError, TurnaroundPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose, cli.json_logs);
    tracing::info!("Starting pr-turnaround");

    let config = match cli.into_run_config().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => fail(e),
    };
    tracing::debug!("Run config: {:?}", config);

    if let Some(start_date) = config.start_date {
        tracing::info!("Counting pull requests created on or after {}", start_date);
    }

    let pipeline = match TurnaroundPipeline::new(LocalStorage::default(), config) {
        Ok(pipeline) => pipeline,
        Err(e) => fail(e),
    };

    let summary = match EtlEngine::new(pipeline).run().await {
        Ok(summary) => summary,
        Err(e) => fail(e),
    };

    if !summary.degenerate.is_empty() {
        tracing::warn!(
            "{} repositories could not be analyzed: {}",
            summary.degenerate.len(),
            summary.degenerate.join(", ")
        );
    }

    let output = std::fs::canonicalize(&summary.output_path)
        .with_context(|| format!("results were not written to {}", summary.output_path))?;
    println!(
        "Analysis complete: {} repositories, results saved to {}",
        summary.reports.len(),
        output.display()
    );

    Ok(())
}

fn fail(e: TurnaroundError) -> ! {
    tracing::error!("{} (severity: {:?})", e, e.severity());
    tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("Error: {}", e.user_friendly_message());
    eprintln!("Hint: {}", e.recovery_suggestion());

    std::process::exit(e.exit_code().max(1))
}
