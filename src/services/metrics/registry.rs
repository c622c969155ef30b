use prometheus::{
    Counter, CounterVec, Encoder, Gauge, Histogram, HistogramOpts, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

/// Central metrics registry for the monitoring engine
pub struct MetricsRegistry {
    registry: Registry,

    // Probe Metrics
    pub probes_total: CounterVec,
    pub probe_duration_seconds: Histogram,
    pub probe_failures_total: Counter,

    // Persistence Metrics
    pub results_saved_total: Counter,
    pub results_dropped_total: Counter,

    // Scheduler Metrics
    pub active_site_tasks: Gauge,
}

impl MetricsRegistry {
    pub fn new() -> Result<Arc<Self>, prometheus::Error> {
        let registry = Registry::new();

        let probes_total = CounterVec::new(
            Opts::new("probes_total", "Completed site checks").namespace("site_monitor"),
            &["status_code"],
        )?;
        registry.register(Box::new(probes_total.clone()))?;

        let probe_duration_seconds = Histogram::with_opts(
            HistogramOpts::new("probe_duration_seconds", "Site check response time")
                .namespace("site_monitor")
                .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        )?;
        registry.register(Box::new(probe_duration_seconds.clone()))?;

        let probe_failures_total = Counter::with_opts(
            Opts::new("probe_failures_total", "Site checks that failed to connect")
                .namespace("site_monitor"),
        )?;
        registry.register(Box::new(probe_failures_total.clone()))?;

        let results_saved_total = Counter::with_opts(
            Opts::new("results_saved_total", "Monitoring results written to storage")
                .namespace("site_monitor"),
        )?;
        registry.register(Box::new(results_saved_total.clone()))?;

        let results_dropped_total = Counter::with_opts(
            Opts::new("results_dropped_total", "Monitoring results lost on a failed write")
                .namespace("site_monitor"),
        )?;
        registry.register(Box::new(results_dropped_total.clone()))?;

        let active_site_tasks = Gauge::with_opts(
            Opts::new("active_site_tasks", "Site tasks currently running").namespace("site_monitor"),
        )?;
        registry.register(Box::new(active_site_tasks.clone()))?;

        Ok(Arc::new(Self {
            registry,
            probes_total,
            probe_duration_seconds,
            probe_failures_total,
            results_saved_total,
            results_dropped_total,
            active_site_tasks,
        }))
    }

    pub fn record_probe(&self, status_code: u16, response_time: f64) {
        self.probes_total
            .with_label_values(&[status_code.to_string().as_str()])
            .inc();
        self.probe_duration_seconds.observe(response_time);
    }

    /// Export metrics in Prometheus text format
    pub fn export(&self) -> Result<String, Box<dyn std::error::Error>> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
