use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::catalog::types::{ProviderEntry, ProviderMap};

// Watch providers
#[derive(Debug, Deserialize)]
pub struct WatchProvidersResponse {
    /// Region token to a bucket holding a `link` plus one array per offer category
    #[serde(default)]
    pub results: HashMap<String, Map<String, Value>>,
}

impl WatchProvidersResponse {
    /// Keep only the category arrays of a region bucket; malformed entries are skipped
    pub fn into_region_map(self) -> HashMap<String, ProviderMap> {
        self.results
            .into_iter()
            .map(|(region, bucket)| (region, Self::categories(bucket)))
            .collect()
    }

    fn categories(bucket: Map<String, Value>) -> ProviderMap {
        bucket
            .into_iter()
            .filter_map(|(category, value)| match value {
                Value::Array(entries) => Some((
                    category,
                    entries
                        .into_iter()
                        .filter_map(|e| serde_json::from_value::<ProviderEntry>(e).ok())
                        .collect(),
                )),
                _ => None,
            })
            .collect()
    }
}
