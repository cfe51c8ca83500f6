// Host telemetry to severity-colored strip labels
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
