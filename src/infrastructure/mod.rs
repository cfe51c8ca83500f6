// Infrastructure layer - External dependencies and adapters
pub mod command_temperature;
pub mod config;
pub mod sysinfo_host;
pub mod temperature;
