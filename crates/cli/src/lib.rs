//! Command-line driver for the order workflow engine.
//!
//! Builds the sample catalog and order, runs the processing workflow and
//! prints its report, with structured logging (tracing) and Prometheus
//! metrics.

pub mod config;
pub mod error;

use std::io::Write;

use domain::ProductCatalog;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use workflow::{OrderProcessingService, WorkflowReport};

pub use config::{Config, LogFormat};
pub use error::CliError;

/// Installs the global tracing subscriber.
pub fn init_tracing(config: &Config) -> Result<(), CliError> {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let json = config.log_format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .try_init()?;
    Ok(())
}

/// Installs the global Prometheus metrics recorder.
pub fn init_metrics() -> Result<PrometheusHandle, CliError> {
    Ok(PrometheusBuilder::new().install_recorder()?)
}

/// Runs the sample order through the processing workflow.
pub fn run(config: &Config) -> Result<WorkflowReport, CliError> {
    let catalog = ProductCatalog::with_products(OrderProcessingService::create_sample_products());
    let mut service = OrderProcessingService::new(config.workflow_config(), catalog);

    let order_id = service.create_sample_order();
    let report = service.process_order_workflow(&order_id)?;
    Ok(report)
}

/// Writes the report as pretty-printed JSON.
pub fn write_report(out: &mut impl Write, report: &WorkflowReport) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

/// Full driver: logging, metrics, workflow run and report output.
pub fn execute(config: &Config) -> Result<(), CliError> {
    init_tracing(config)?;
    let metrics_handle = init_metrics()?;

    tracing::info!(?config, "starting order workflow");
    let report = run(config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &report)?;
    if config.print_metrics {
        write!(out, "{}", metrics_handle.render())?;
    }

    tracing::info!("order workflow completed");
    Ok(())
}
