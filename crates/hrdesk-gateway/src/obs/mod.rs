//! Lightweight in-process metrics (dependency-free).
//!
//! Counters are stored as atomics and rendered in Prometheus text format by
//! the binary on shutdown.

pub mod metrics;

pub use metrics::DeskMetrics;
