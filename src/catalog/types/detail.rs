use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// Provider category (`flatrate`, `rent`, `buy`, ...) to the providers offering it
pub type ProviderMap = BTreeMap<String, Vec<ProviderEntry>>;

/// Watch-provider availability keyed by region token
pub type RegionProviders = HashMap<String, ProviderMap>;

/// Raw provider-name to URL mapping returned by the ratings API, in upstream order
pub type LinkMap = Map<String, Value>;

/// A genre attached to a movie or show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// One streaming, rental or purchase offer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEntry {
    pub provider_id: i64,
    pub provider_name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub display_priority: i64,
}

/// A link to the same title on a secondary ratings site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLink {
    pub provider: String,
    pub url: String,
}

/// Identifiers of the entity in other catalogs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalIds {
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub tvdb_id: Option<i64>,
    #[serde(default)]
    pub wikidata_id: Option<String>,
}

impl ExternalIds {
    /// Id used to look the entity up in the ratings API
    #[must_use]
    pub fn cross_catalog_id(&self) -> Option<&str> {
        self.imdb_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// Season listed on a show's detail record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub id: i64,
    pub season_number: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub episode_count: u32,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// Full detail record of a movie or show, enriched with providers and external links.
///
/// Upstream fields without a typed counterpart are kept in `extra` and
/// serialized back at the top level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub genres: Vec<Genre>,

    // Movie only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,

    // TV only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_seasons: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_episodes: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub seasons: Vec<SeasonSummary>,

    // Enrichment
    #[serde(default)]
    pub providers: ProviderMap,
    #[serde(default, rename = "externalLinks")]
    pub external_links: Vec<ExternalLink>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DetailRecord {
    pub const PROVIDERS_KEY: &'static str = "providers";
    pub const EXTERNAL_LINKS_KEY: &'static str = "externalLinks";

    /// Attach enrichment data under the reserved keys
    pub fn enrich(&mut self, providers: ProviderMap, external_links: Vec<ExternalLink>) {
        self.extra.remove(Self::PROVIDERS_KEY);
        self.extra.remove(Self::EXTERNAL_LINKS_KEY);
        self.providers = providers;
        self.external_links = external_links;
    }

    /// Title for movies, name for shows
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .or(self.first_air_date.as_deref())
            .and_then(|d| d.split('-').next())
            .and_then(|y| y.parse().ok())
    }

    /// Seasons a viewer can pick from; season 0 holds specials and is skipped
    pub fn selectable_seasons(&self) -> impl Iterator<Item = &SeasonSummary> {
        self.seasons.iter().filter(|s| s.season_number > 0)
    }
}

/// One episode of a season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: i64,
    pub episode_number: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub still_path: Option<String>,
}

/// Episodes of one season, fetched when the season is selected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonDetail {
    pub id: i64,
    pub season_number: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}
