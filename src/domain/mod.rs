// Domain layer - Snapshots, severity colors and labels
pub mod color;
pub mod label;
pub mod stats;
