pub mod detail_aggregator;

pub use detail_aggregator::{DetailAggregator, links_to_pairs};
