use lazy_static::lazy_static;
use prometheus::{Counter, Histogram, register_counter, register_histogram};


lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("httplog_requests_total", "Total number of api requests").unwrap();
    pub static ref ENDPOINTS_CREATED: Counter =
        register_counter!("httplog_endpoints_created_total", "Total endpoints created").unwrap();
    pub static ref ENDPOINT_HITS: Counter =
        register_counter!("httplog_endpoint_hits_total", "Fetches that found an endpoint").unwrap();
    pub static ref ENDPOINT_MISSES: Counter =
        register_counter!("httplog_endpoint_misses_total", "Fetches for unknown keys").unwrap();
    pub static ref LOG_QUERIES: Counter =
        register_counter!("httplog_log_queries_total", "Total log listing requests").unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "httplog_request_latency_seconds",
        "Api request latency in seconds"
    )
    .unwrap();
}
