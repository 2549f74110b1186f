//! Metrics collection.
//!
//! # Metrics
//! - `quest_api_requests_total` (counter): routes API calls by endpoint, outcome
//! - `quest_points_visited_total` (counter): successful point visits
//! - `quest_visit_rejections_total` (counter): visits refused, by reason
//! - `quest_completions_total` (counter): completion attempts by outcome
//! - `quest_admin_logins_total` (counter): admin logins by outcome
//! - `quest_route_saves_total` (counter): editor saves by outcome
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; without an installed recorder
//!   every call is a no-op
//! - A CLI run is too short to scrape, so when `observability.metrics_path`
//!   is set a Prometheus recorder is installed and its text exposition is
//!   written to that file at exit (node_exporter textfile collector format)
//! - Labels are static strings to keep cardinality bounded

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::schema::ObservabilityConfig;

/// Installed Prometheus recorder plus the file its snapshot goes to.
pub struct MetricsSink {
    handle: PrometheusHandle,
    path: PathBuf,
}

impl MetricsSink {
    pub fn new(handle: PrometheusHandle, path: impl Into<PathBuf>) -> Self {
        Self {
            handle,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current exposition text, replacing the previous snapshot.
    pub fn flush(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, self.handle.render())
    }
}

/// Install the global recorder when a snapshot path is configured.
pub fn init_metrics(config: &ObservabilityConfig) -> Option<MetricsSink> {
    if config.metrics_path.is_empty() {
        return None;
    }
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            tracing::debug!(path = %config.metrics_path, "Metrics recorder installed");
            Some(MetricsSink::new(handle, &config.metrics_path))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics recorder");
            None
        }
    }
}

pub fn record_api_request(endpoint: &'static str, outcome: &'static str) {
    counter!("quest_api_requests_total", "endpoint" => endpoint, "outcome" => outcome)
        .increment(1);
}

pub fn record_point_visited() {
    counter!("quest_points_visited_total").increment(1);
}

pub fn record_visit_rejected(reason: &'static str) {
    counter!("quest_visit_rejections_total", "reason" => reason).increment(1);
}

pub fn record_completion(outcome: &'static str) {
    counter!("quest_completions_total", "outcome" => outcome).increment(1);
}

pub fn record_admin_login(outcome: &'static str) {
    counter!("quest_admin_logins_total", "outcome" => outcome).increment(1);
}

pub fn record_route_save(outcome: &'static str) {
    counter!("quest_route_saves_total", "outcome" => outcome).increment(1);
}
