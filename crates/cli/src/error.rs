//! Driver error types.

use thiserror::Error;
use workflow::WorkflowError;

/// Errors that can end a driver run.
#[derive(Debug, Error)]
pub enum CliError {
    /// The order workflow failed.
    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    /// Writing the report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The report could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The tracing subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    /// The Prometheus recorder could not be installed.
    #[error("Metrics setup failed: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}
