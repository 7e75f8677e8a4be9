use crate::catalog::{Language, MediaItem};
use crate::client::SearchRequest;

/// How the last fetch ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Success,
    Error,
    Cancelled,
}

/// Lifecycle of the current search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Debouncing,
    InFlight,
    Settled(Settlement),
}

impl SearchPhase {
    /// Nothing is pending or running
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Idle | Self::Settled(_))
    }
}

/// What a view of the search page renders
#[derive(Debug, Clone, Default)]
pub struct SearchSnapshot {
    pub phase: SearchPhase,
    /// Latest request the user asked for; mirrors the URL
    pub request: Option<SearchRequest>,
    pub results: Vec<MediaItem>,
    pub total_results: u64,
    /// Localized error message, if the last fetch genuinely failed
    pub error: Option<String>,
    pub language: Language,
    /// Fetches actually sent to the search API
    pub fetches_dispatched: u64,
    /// In-flight fetches superseded or torn down before resolving
    pub fetches_cancelled: u64,
}

impl SearchSnapshot {
    /// URL query reflecting the current request
    #[must_use]
    pub fn url_query(&self) -> Option<String> {
        self.request.as_ref().map(SearchRequest::to_query_string)
    }
}
