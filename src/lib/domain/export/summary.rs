use colored::Colorize;
use std::path::PathBuf;
use tracing::{info, warn};

pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();
    for (i, &ch) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(ch);
    }
    result
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub pipeline: &'static str,
    pub records: usize,
    pub dropped: usize,
    pub failed: usize,
    /// `None` on a dry run.
    pub output: Option<PathBuf>,
    pub highlights: Vec<String>,
    pub runtime_secs: f64,
}

pub struct ExportSummary {
    pub runs: Vec<RunSummary>,
    pub failed_pipelines: Vec<(String, String)>,
    pub total_runtime_secs: f64,
}

/// Human-readable report for one pipeline, printed straight to the console.
pub fn print_run_summary(run: &RunSummary) {
    let destination = match &run.output {
        Some(path) => format!("saved to {}", path.display()),
        None => "dry run, nothing written".to_string(),
    };
    println!(
        "{} {}: {} records, {}",
        "✔".green().bold(),
        run.pipeline.bold(),
        format_number(run.records),
        destination
    );
    if run.dropped > 0 {
        println!(
            "  {} {} rows dropped for missing values",
            "!".yellow().bold(),
            format_number(run.dropped)
        );
    }
    if run.failed > 0 {
        println!(
            "  {} {} rows skipped as invalid",
            "✘".red().bold(),
            format_number(run.failed)
        );
    }
    for line in &run.highlights {
        println!("  {}", line);
    }
}

pub fn log_summary(summary: &ExportSummary) {
    let total_records: usize = summary.runs.iter().map(|r| r.records).sum();
    let total_dropped: usize = summary.runs.iter().map(|r| r.dropped).sum();
    let total_failed: usize = summary.runs.iter().map(|r| r.failed).sum();
    info!("=== Export Summary ===");
    info!("Pipelines completed: {}", summary.runs.len());
    info!("Records exported: {}", format_number(total_records));
    info!("Rows dropped (missing values): {}", format_number(total_dropped));
    info!("Rows skipped (invalid values): {}", format_number(total_failed));
    for run in &summary.runs {
        info!("  {}: {:.2}s", run.pipeline, run.runtime_secs);
    }
    info!("Total runtime: {:.2}s", summary.total_runtime_secs);
    if !summary.failed_pipelines.is_empty() {
        warn!("Pipelines that failed: {}", summary.failed_pipelines.len());
        for (pipeline, reason) in &summary.failed_pipelines {
            warn!("  {}: {}", pipeline, reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separators() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(22265), "22,265");
        assert_eq!(format_number(1234567), "1,234,567");
    }
}
