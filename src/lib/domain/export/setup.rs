use crate::config::Config;
use anyhow::Context;
use chrono::Utc;
use std::fs::OpenOptions;
use tracing::info;
use tracing_subscriber::{
    Registry, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

pub fn setup_logging(config: &Config, dry_run: bool) -> anyhow::Result<()> {
    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("Failed to create log directory: {:?}", config.log_dir))?;
    let timestamp_str = Utc::now().format("%Y-%m-%d_%H-%M-%S");
    let log_file_path = config
        .log_dir
        .join(format!("export_{}.log", timestamp_str));
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_file_path)
        .with_context(|| format!("Failed to open log file: {:?}", log_file_path))?;
    Registry::default()
        .with(LevelFilter::from_level(config.log_level))
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(std::sync::Mutex::new(log_file))
                .with_ansi(false),
        )
        .with(tracing_subscriber::fmt::Layer::default().with_writer(std::io::stdout))
        .init();
    info!("Starting Plzeň data export");
    if dry_run {
        info!("Dry-run mode: output files will not be written");
    }
    info!(
        "Reading from {:?}, writing to {:?}",
        config.input_dir, config.output_dir
    );
    Ok(())
}
