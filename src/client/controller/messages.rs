use tokio::sync::oneshot;

use crate::catalog::{Language, MediaKind, SearchPage};
use crate::client::{ClientError, SearchRequest};

/// Commands accepted by the search actor; each is acknowledged once applied
pub enum ControllerMessage {
    /// The search box or kind toggle changed
    Input {
        query: String,
        kind: MediaKind,
        reply: oneshot::Sender<()>,
    },
    /// The page URL changed; carries its query string
    Navigate {
        url_query: String,
        reply: oneshot::Sender<()>,
    },
    /// The user picked another interface language
    SetLanguage {
        language: Language,
        reply: oneshot::Sender<()>,
    },
    /// Tear down: drop the pending debounce and cancel the in-flight fetch
    Shutdown { reply: oneshot::Sender<()> },
}

/// Result of a spawned fetch, tagged with the generation that started it
pub(crate) struct FetchOutcome {
    pub generation: u64,
    pub request: SearchRequest,
    pub result: Result<SearchPage, ClientError>,
}
