pub mod aggregator;
pub mod classifier;
pub mod fetcher;
pub mod formatter;
pub mod range;
pub mod report;
