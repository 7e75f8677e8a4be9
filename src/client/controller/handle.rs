use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};

use super::messages::ControllerMessage;
use super::runner::SearchActor;
use super::state::SearchSnapshot;
use crate::catalog::{Language, MediaKind};
use crate::client::{ClientError, LanguageContext, SearchApi};

/// Delay coalescing rapid input changes into one search
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Handle to the search controller of one search page.
///
/// Cheap to clone. Once every handle is dropped the actor cancels whatever
/// is pending or running and stops.
#[derive(Clone)]
pub struct SearchController {
    sender: mpsc::Sender<ControllerMessage>,
    snapshot: watch::Receiver<SearchSnapshot>,
}

impl SearchController {
    /// Spawn the actor with the default debounce delay
    pub fn spawn(api: Arc<dyn SearchApi>, language: LanguageContext) -> Self {
        Self::spawn_with_debounce(api, language, DEFAULT_DEBOUNCE)
    }

    pub fn spawn_with_debounce(
        api: Arc<dyn SearchApi>,
        language: LanguageContext,
        debounce: Duration,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let initial = SearchSnapshot {
            language: language.language(),
            ..Default::default()
        };
        let (snapshot_tx, snapshot) = watch::channel(initial);

        let actor = SearchActor::new(api, receiver, snapshot_tx, language, debounce);
        tokio::spawn(actor.run());

        Self { sender, snapshot }
    }

    /// The search box text or kind changed
    pub async fn input(&self, query: impl Into<String>, kind: MediaKind) -> Result<(), ClientError> {
        let query = query.into();
        self.request(|reply| ControllerMessage::Input { query, kind, reply })
            .await
    }

    /// The page URL changed, e.g. `q=dune&type=movie&lang=en-US`
    pub async fn navigate(&self, url_query: impl Into<String>) -> Result<(), ClientError> {
        let url_query = url_query.into();
        self.request(|reply| ControllerMessage::Navigate { url_query, reply })
            .await
    }

    /// Switch and persist the interface language; re-runs the current search
    pub async fn set_language(&self, language: Language) -> Result<(), ClientError> {
        self.request(|reply| ControllerMessage::SetLanguage { language, reply })
            .await
    }

    /// Cancel everything and stop the actor
    pub async fn shutdown(&self) -> Result<(), ClientError> {
        self.request(|reply| ControllerMessage::Shutdown { reply })
            .await
    }

    /// Current state
    #[must_use]
    pub fn snapshot(&self) -> SearchSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Wait until nothing is pending or in flight
    pub async fn settled(&self) -> SearchSnapshot {
        let mut rx = self.snapshot.clone();
        loop {
            {
                let snapshot = rx.borrow_and_update();
                if snapshot.phase.is_settled() {
                    return snapshot.clone();
                }
            }
            if rx.changed().await.is_err() {
                return rx.borrow().clone();
            }
        }
    }

    async fn request(
        &self,
        message: impl FnOnce(oneshot::Sender<()>) -> ControllerMessage,
    ) -> Result<(), ClientError> {
        let (reply, rx) = oneshot::channel();
        self.sender
            .send(message(reply))
            .await
            .map_err(|_| ClientError::ControllerClosed)?;
        rx.await.map_err(|_| ClientError::ControllerClosed)
    }
}
