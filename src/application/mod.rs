// Application layer - Use cases and the seams they depend on
pub mod host_metrics;
pub mod label_service;
pub mod monitor_service;
pub mod stats_service;
