mod detail;
mod media;

pub use detail::{
    DetailRecord, Episode, ExternalIds, ExternalLink, Genre, LinkMap, ProviderEntry, ProviderMap,
    RegionProviders, SeasonDetail, SeasonSummary,
};
pub use media::{MediaItem, MediaKind, SearchPage};
