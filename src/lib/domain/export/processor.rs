use crate::{
    config::Config,
    domain::{
        export::summary::{RunSummary, format_number},
        models::Grid,
        normalize::RowErrorPolicy,
        pipelines::{
            CrimeRates, DistrictStatistics, Pipeline, PipelineKind, StreetLights, prepare,
        },
    },
    inbound::file::Reader,
    outbound::file::Writer,
};
use anyhow::Context;
use std::{path::Path, time::Instant};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub policy: RowErrorPolicy,
    pub dry_run: bool,
}

/// Loads the pipeline's input, converts it and writes the asset.
pub fn run_pipeline<P: Pipeline>(
    config: &Config,
    options: &RunOptions,
) -> anyhow::Result<RunSummary> {
    let start = Instant::now();
    let input_path = config.input_dir.join(P::INPUT_FILE);
    info!("Processing {} pipeline: {:?}", P::NAME, input_path);

    let grid = Reader::load_grid(&input_path, P::HAS_HEADER)
        .with_context(|| format!("Failed to load input for {} pipeline", P::NAME))?;
    info!(
        "Loaded {} rows from '{}'",
        format_number(grid.row_count()),
        grid.name()
    );
    let output_path = config.output_dir.join(P::OUTPUT_FILE);
    let mut summary = export_grid::<P>(&grid, &output_path, options)?;
    summary.runtime_secs = start.elapsed().as_secs_f64();
    Ok(summary)
}

/// Converts an already loaded grid and writes it to `output_path`.
///
/// Nothing is written unless every step before the write succeeded.
pub fn export_grid<P: Pipeline>(
    grid: &Grid,
    output_path: &Path,
    options: &RunOptions,
) -> anyhow::Result<RunSummary> {
    let start = Instant::now();
    let prepared = prepare::<P>(grid, options.policy)
        .with_context(|| format!("Failed to convert '{}'", grid.name()))?;
    if !prepared.dropped.is_empty() {
        let rows: Vec<String> = prepared
            .dropped
            .iter()
            .map(|d| d.source_row.to_string())
            .collect();
        warn!(
            "Dropped {} rows with missing values from '{}': [{}]",
            prepared.dropped.len(),
            grid.name(),
            rows.join(", ")
        );
    }
    for failure in &prepared.failed {
        warn!("Skipped invalid row {}: {}", failure.source_row, failure.error);
    }

    let output = if options.dry_run {
        info!("Dry run: not writing {:?}", output_path);
        None
    } else {
        Writer::write_atomic(output_path, &prepared.contents)
            .with_context(|| format!("Failed to save {} pipeline output", P::NAME))?;
        info!(
            "Wrote {} records to {:?}",
            format_number(prepared.records.len()),
            output_path
        );
        Some(output_path.to_path_buf())
    };

    Ok(RunSummary {
        pipeline: P::NAME,
        records: prepared.records.len(),
        dropped: prepared.dropped.len(),
        failed: prepared.failed.len(),
        output,
        highlights: P::highlights(&prepared.records),
        runtime_secs: start.elapsed().as_secs_f64(),
    })
}

pub fn run_kind(
    kind: PipelineKind,
    config: &Config,
    options: &RunOptions,
) -> anyhow::Result<RunSummary> {
    match kind {
        PipelineKind::Crime => run_pipeline::<CrimeRates>(config, options),
        PipelineKind::Streetlights => run_pipeline::<StreetLights>(config, options),
        PipelineKind::Districts => run_pipeline::<DistrictStatistics>(config, options),
    }
}
