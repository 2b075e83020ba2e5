//! Logging and in-process metrics for Retrievix
//!
//! - Structured logging with `tracing`, filtered by `RUST_LOG` or the
//!   configured level
//! - A per-process session id attached to the first log line and to metric
//!   exports, for correlating a CLI run with service logs
//! - Counters, gauges and histograms with percentile summaries

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use uuid::Uuid;

/// Metric names recorded by the match service.
pub mod names {
    /// Wall time of one dashboard load, in milliseconds
    pub const DASHBOARD_MS: &str = "match.dashboard_ms";
    /// Number of suggestions produced by the last dashboard load
    pub const SUGGESTIONS: &str = "match.suggestions";
    /// Store fetches that failed or timed out
    pub const FETCH_FAILURES: &str = "store.fetch_failures";
}

static METRICS: Lazy<MetricsRegistry> = Lazy::new(MetricsRegistry::new);

static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub log_level: String,
    pub format: LogFormat,
    pub show_target: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Compact,
            show_target: false,
        }
    }
}

impl TelemetryConfig {
    /// Debug-level logging for the Retrievix crates, warnings elsewhere
    pub fn verbose() -> Self {
        Self {
            log_level: "warn,retrievix=debug,retrievix_match=debug,retrievix_store=debug,retrievix_api_client=debug".to_string(),
            show_target: true,
            ..Self::default()
        }
    }
}

/// Initialize logging with defaults
pub fn init() -> anyhow::Result<()> {
    init_with_config(TelemetryConfig::default())
}

/// Initialize logging; logs go to stderr so command output stays parseable
pub fn init_with_config(config: TelemetryConfig) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(config.show_target)
                    .compact(),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(config.show_target)
                    .json(),
            )
            .try_init(),
    };
    result.map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {e}"))?;

    tracing::info!(
        session_id = %session_id(),
        version = env!("CARGO_PKG_VERSION"),
        "Telemetry initialized"
    );

    Ok(())
}

/// Per-process correlation id
pub fn session_id() -> &'static str {
    &SESSION_ID
}

/// Get the global metrics registry
pub fn metrics() -> &'static MetricsRegistry {
    &METRICS
}

/// Counters, gauges and histograms keyed by name
#[derive(Debug)]
pub struct MetricsRegistry {
    counters: RwLock<HashMap<String, u64>>,
    gauges: RwLock<HashMap<String, u64>>,
    histograms: RwLock<HashMap<String, Vec<f64>>>,
    start_time: Instant,
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRegistry {
    /// A registry separate from the global one
    pub fn new() -> Self {
        Self {
            counters: RwLock::new(HashMap::new()),
            gauges: RwLock::new(HashMap::new()),
            histograms: RwLock::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Increment a counter
    pub fn increment(&self, name: &str) {
        self.increment_by(name, 1);
    }

    /// Increment a counter by a specific amount
    pub fn increment_by(&self, name: &str, value: u64) {
        let mut counters = self.counters.write().unwrap_or_else(PoisonError::into_inner);
        *counters.entry(name.to_string()).or_insert(0) += value;
    }

    /// Set a gauge value
    pub fn gauge(&self, name: &str, value: u64) {
        self.gauges
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), value);
    }

    /// Record a histogram value
    pub fn histogram(&self, name: &str, value: f64) {
        self.histograms
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    /// Current counter value (0 if never incremented)
    pub fn counter_value(&self, name: &str) -> u64 {
        self.counters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .copied()
            .unwrap_or(0)
    }

    /// Current gauge value
    pub fn gauge_value(&self, name: &str) -> Option<u64> {
        self.gauges
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .copied()
    }

    /// Summary of a histogram, if anything was recorded
    pub fn histogram_stats(&self, name: &str) -> Option<HistogramStats> {
        self.histograms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map(|values| HistogramStats::from_values(values))
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Export metrics as JSON
    pub fn export_json(&self) -> serde_json::Value {
        let counters = self.counters.read().unwrap_or_else(PoisonError::into_inner).clone();
        let gauges = self.gauges.read().unwrap_or_else(PoisonError::into_inner).clone();
        let histograms: HashMap<String, HistogramStats> = self
            .histograms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(k, v)| (k.clone(), HistogramStats::from_values(v)))
            .collect();

        serde_json::json!({
            "session_id": session_id(),
            "uptime_secs": self.uptime_secs(),
            "counters": counters,
            "gauges": gauges,
            "histograms": histograms,
        })
    }
}

/// Histogram statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
}

impl HistogramStats {
    fn from_values(values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        if count == 0 {
            return Self {
                count,
                min: 0.0,
                max: 0.0,
                mean: 0.0,
                p50: 0.0,
                p95: 0.0,
                p99: 0.0,
            };
        }

        Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean: sorted.iter().sum::<f64>() / count as f64,
            p50: percentile(&sorted, 50.0),
            p95: percentile(&sorted, 95.0),
            p99: percentile(&sorted, 99.0),
        }
    }
}

// Nearest-rank on a sorted, non-empty slice
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let idx = ((p / 100.0) * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

/// Records elapsed milliseconds into a histogram exactly once, on `stop` or
/// when dropped
#[derive(Debug)]
pub struct Timer<'a> {
    name: String,
    start: Instant,
    registry: &'a MetricsRegistry,
    recorded: bool,
}

impl Timer<'static> {
    /// Start a timer against the global registry
    pub fn start(name: impl Into<String>) -> Self {
        Timer::start_in(metrics(), name)
    }
}

impl<'a> Timer<'a> {
    /// Start a timer against a specific registry
    pub fn start_in(registry: &'a MetricsRegistry, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
            registry,
            recorded: false,
        }
    }

    /// Stop the timer and record the duration
    pub fn stop(mut self) -> Duration {
        self.record()
    }

    fn record(&mut self) -> Duration {
        let duration = self.start.elapsed();
        if !self.recorded {
            self.recorded = true;
            self.registry
                .histogram(&self.name, duration.as_secs_f64() * 1000.0);
            tracing::debug!(
                metric = %self.name,
                duration_ms = duration.as_millis(),
                "Timer completed"
            );
        }
        duration
    }
}

impl Drop for Timer<'_> {
    fn drop(&mut self) {
        self.record();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_counter() {
        let registry = MetricsRegistry::new();
        registry.increment(names::FETCH_FAILURES);
        registry.increment(names::FETCH_FAILURES);
        registry.increment_by(names::FETCH_FAILURES, 3);

        assert_eq!(registry.counter_value(names::FETCH_FAILURES), 5);
        assert_eq!(registry.counter_value("never.touched"), 0);
    }

    #[test]
    fn test_metrics_gauge() {
        let registry = MetricsRegistry::new();
        registry.gauge(names::SUGGESTIONS, 4);
        registry.gauge(names::SUGGESTIONS, 2);

        assert_eq!(registry.gauge_value(names::SUGGESTIONS), Some(2));
    }

    #[test]
    fn test_histogram_stats() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let stats = HistogramStats::from_values(&values);

        assert_eq!(stats.count, 10);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 10.0);
        assert_eq!(stats.mean, 5.5);
        assert_eq!(stats.p99, 10.0);
    }

    #[test]
    fn test_timer_records_once() {
        let registry = MetricsRegistry::new();
        let timer = Timer::start_in(&registry, names::DASHBOARD_MS);
        std::thread::sleep(Duration::from_millis(5));
        let duration = timer.stop();

        assert!(duration.as_millis() >= 5);
        let stats = registry.histogram_stats(names::DASHBOARD_MS).unwrap();
        assert_eq!(stats.count, 1);
    }

    #[test]
    fn test_timer_records_on_drop() {
        let registry = MetricsRegistry::new();
        {
            let _timer = Timer::start_in(&registry, "scoped");
        }
        assert_eq!(registry.histogram_stats("scoped").unwrap().count, 1);
    }

    #[test]
    fn test_export_json() {
        let registry = MetricsRegistry::new();
        registry.increment(names::FETCH_FAILURES);
        registry.histogram(names::DASHBOARD_MS, 12.0);

        let json = registry.export_json();
        assert_eq!(json["counters"][names::FETCH_FAILURES], 1);
        assert_eq!(json["histograms"][names::DASHBOARD_MS]["count"], 1);
        assert!(Uuid::parse_str(json["session_id"].as_str().unwrap()).is_ok());
    }
}
