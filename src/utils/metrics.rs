use once_cell::sync::Lazy;
use prometheus::{Counter, CounterVec, Histogram, HistogramOpts, Opts, Registry, TextEncoder};

pub struct BilldeskMetrics {
    pub api_requests: CounterVec,
    pub api_errors: Counter,
    pub cache_hits: Counter,
    pub cache_misses: Counter,
    pub request_duration: Histogram,
    registry: Registry,
}

impl BilldeskMetrics {
    fn new() -> Self {
        let registry = Registry::new();

        let api_requests = CounterVec::new(
            Opts::new("billdesk_api_requests_total", "Billing API requests sent"),
            &["method"],
        )
        .expect("valid api_requests metric");
        let api_errors = Counter::new(
            "billdesk_api_errors_total",
            "Billing API requests that failed or returned non-2xx",
        )
        .expect("valid api_errors metric");
        let cache_hits = Counter::new("billdesk_cache_hits_total", "Query cache hits")
            .expect("valid cache_hits metric");
        let cache_misses = Counter::new("billdesk_cache_misses_total", "Query cache misses")
            .expect("valid cache_misses metric");
        let request_duration = Histogram::with_opts(
            HistogramOpts::new(
                "billdesk_api_request_duration_seconds",
                "Billing API round-trip duration",
            )
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]),
        )
        .expect("valid request_duration metric");

        for collector in [
            Box::new(api_requests.clone()) as Box<dyn prometheus::core::Collector>,
            Box::new(api_errors.clone()),
            Box::new(cache_hits.clone()),
            Box::new(cache_misses.clone()),
            Box::new(request_duration.clone()),
        ] {
            registry
                .register(collector)
                .expect("metric registered once");
        }

        Self {
            api_requests,
            api_errors,
            cache_hits,
            cache_misses,
            request_duration,
            registry,
        }
    }

    pub fn encode(&self) -> String {
        let encoder = TextEncoder::new();
        let families = self.registry.gather();
        encoder.encode_to_string(&families).unwrap_or_default()
    }
}

pub static METRICS: Lazy<BilldeskMetrics> = Lazy::new(BilldeskMetrics::new);

pub async fn metrics_handler() -> String {
    METRICS.encode()
}
