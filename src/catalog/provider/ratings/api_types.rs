use serde::Deserialize;

use crate::catalog::types::LinkMap;

#[derive(Debug, Deserialize)]
pub struct LinksResponse {
    #[serde(default)]
    pub links: LinkMap,
}
