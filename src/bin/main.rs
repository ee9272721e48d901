use anyhow::Context;
use plzen_data_export::{
    config::Config,
    domain::{
        export::{
            ExportSummary, RunOptions, log_summary, print_run_summary, run_kind, setup_logging,
        },
        normalize::RowErrorPolicy,
        pipelines::PipelineKind,
    },
};
use std::time::Instant;
use tracing::error;

fn selected_pipelines(args: &[String]) -> anyhow::Result<Vec<PipelineKind>> {
    let mut kinds = Vec::new();
    for arg in args.iter().filter(|arg| !arg.starts_with("--")) {
        let kind = PipelineKind::from_name(arg).with_context(|| {
            format!(
                "Unknown pipeline '{}'. Expected one of: crime, streetlights, districts",
                arg
            )
        })?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    if kinds.is_empty() {
        kinds.extend(PipelineKind::ALL);
    }
    Ok(kinds)
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let dry_run = args.iter().any(|arg| arg == "--dry-run" || arg == "--dr");
    let skip_invalid = args.iter().any(|arg| arg == "--skip-invalid");
    let kinds = selected_pipelines(&args)?;
    let config =
        Config::from_env().context("Failed to load configuration from environment variables")?;

    setup_logging(&config, dry_run)?;

    let options = RunOptions {
        policy: if skip_invalid {
            RowErrorPolicy::SkipInvalid
        } else {
            RowErrorPolicy::FailFast
        },
        dry_run,
    };
    let start_time = Instant::now();
    let mut runs = Vec::new();
    let mut failed_pipelines: Vec<(String, String)> = Vec::new();
    for kind in kinds {
        match run_kind(kind, &config, &options) {
            Ok(run) => {
                print_run_summary(&run);
                runs.push(run);
            }
            Err(e) => {
                error!("{} pipeline failed: {:#}", kind, e);
                failed_pipelines.push((kind.to_string(), format!("{:#}", e)));
            }
        }
    }

    let summary = ExportSummary {
        runs,
        failed_pipelines,
        total_runtime_secs: start_time.elapsed().as_secs_f64(),
    };
    log_summary(&summary);

    if !summary.failed_pipelines.is_empty() {
        let names: Vec<&str> = summary
            .failed_pipelines
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        anyhow::bail!("Export failed for: {}", names.join(", "));
    }
    Ok(())
}
