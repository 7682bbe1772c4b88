// Threshold analysis over collected samples
pub mod memory;

pub use memory::{analyze_memory_usage, classify, record_sample, ClassifySettings};
