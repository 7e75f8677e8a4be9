use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::messages::{ControllerMessage, FetchOutcome};
use super::state::{SearchPhase, SearchSnapshot, Settlement};
use crate::catalog::Language;
use crate::client::{LanguageContext, SearchApi, SearchKey, SearchRequest};

/// Request waiting for its debounce delay to elapse
struct Pending {
    request: SearchRequest,
    deadline: Instant,
}

/// Fetch currently running on the search API
struct InFlight {
    generation: u64,
    request: SearchRequest,
    token: CancellationToken,
}

/// Search actor; the only owner of the controller's mutable state
pub struct SearchActor {
    api: Arc<dyn SearchApi>,
    receiver: mpsc::Receiver<ControllerMessage>,
    snapshot: watch::Sender<SearchSnapshot>,
    outcome_tx: mpsc::UnboundedSender<FetchOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<FetchOutcome>,
    language: LanguageContext,
    debounce: Duration,
    pending: Option<Pending>,
    in_flight: Option<InFlight>,
    /// Key of the last fetch whose results are on display
    last_completed: Option<SearchKey>,
    generation: u64,
}

impl SearchActor {
    pub fn new(
        api: Arc<dyn SearchApi>,
        receiver: mpsc::Receiver<ControllerMessage>,
        snapshot: watch::Sender<SearchSnapshot>,
        language: LanguageContext,
        debounce: Duration,
    ) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            api,
            receiver,
            snapshot,
            outcome_tx,
            outcome_rx,
            language,
            debounce,
            pending: None,
            in_flight: None,
            last_completed: None,
            generation: 0,
        }
    }

    /// Run the actor loop until shutdown or until every handle is dropped
    pub async fn run(mut self) {
        debug!("Search controller started");

        loop {
            let deadline = self.pending.as_ref().map(|p| p.deadline);

            tokio::select! {
                msg = self.receiver.recv() => {
                    let Some(msg) = msg else {
                        self.teardown();
                        break;
                    };
                    if self.handle_message(msg).is_break() {
                        break;
                    }
                }
                Some(outcome) = self.outcome_rx.recv() => self.handle_outcome(outcome),
                () = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.dispatch();
                }
            }
        }

        debug!("Search controller stopped");
    }

    fn handle_message(&mut self, msg: ControllerMessage) -> ControlFlow<()> {
        match msg {
            ControllerMessage::Input { query, kind, reply } => {
                let request = SearchRequest::new(query, kind, self.language.language());
                self.on_input(request);
                let _ = reply.send(());
            }

            ControllerMessage::Navigate { url_query, reply } => {
                // Only a URL carrying a query starts a search
                if let Some(request) =
                    SearchRequest::from_query_string(&url_query, self.language.language())
                {
                    self.on_input(request);
                }
                let _ = reply.send(());
            }

            ControllerMessage::SetLanguage { language, reply } => {
                self.on_language(language);
                let _ = reply.send(());
            }

            ControllerMessage::Shutdown { reply } => {
                self.teardown();
                let _ = reply.send(());
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    }

    fn on_language(&mut self, language: Language) {
        self.language.set_language(language);
        self.publish(|s| s.language = language);

        let current = self.snapshot.borrow().request.clone();
        if let Some(request) = current.filter(|r| !r.is_blank()) {
            self.on_input(request.with_language(language));
        }
    }

    /// Idle/Settled/InFlight -> Debouncing, or back to Idle for a blank query
    fn on_input(&mut self, request: SearchRequest) {
        if request.is_blank() {
            self.pending = None;
            let cancelled = self.cancel_in_flight();
            self.publish(|s| {
                s.phase = SearchPhase::Idle;
                s.request = Some(request);
                s.results.clear();
                s.total_results = 0;
                s.error = None;
                s.fetches_cancelled += u64::from(cancelled);
            });
            return;
        }

        let key = request.key();
        let same_as_running = self
            .in_flight
            .as_ref()
            .is_some_and(|flight| flight.request.key() == key);
        if self.pending.is_none() && same_as_running {
            debug!("Search for '{}' already in flight", request.query);
            self.publish(|s| s.request = Some(request));
            return;
        }

        let cancelled = self.cancel_in_flight();
        if cancelled {
            debug!("Superseding in-flight search with '{}'", request.query);
        }

        self.pending = Some(Pending {
            request: request.clone(),
            deadline: Instant::now() + self.debounce,
        });
        self.publish(|s| {
            s.phase = SearchPhase::Debouncing;
            s.request = Some(request);
            s.fetches_cancelled += u64::from(cancelled);
        });
    }

    /// Debouncing -> InFlight once the delay elapsed, unless the key was just fetched
    fn dispatch(&mut self) {
        let Some(Pending { request, .. }) = self.pending.take() else {
            return;
        };

        let key = request.key();
        if self.last_completed.as_ref() == Some(&key) {
            debug!("Skipping duplicate search for '{}'", request.query);
            self.publish(|s| s.phase = SearchPhase::Settled(Settlement::Success));
            return;
        }

        self.generation += 1;
        let generation = self.generation;
        let token = CancellationToken::new();

        let api = Arc::clone(&self.api);
        let outcome_tx = self.outcome_tx.clone();
        let task_token = token.clone();
        let task_request = request.clone();
        tokio::spawn(async move {
            let result = api.search(&task_request, &task_token).await;
            let _ = outcome_tx.send(FetchOutcome {
                generation,
                request: task_request,
                result,
            });
        });

        debug!("Dispatched search #{generation} for '{}'", request.query);
        self.in_flight = Some(InFlight {
            generation,
            request,
            token,
        });
        self.publish(|s| {
            s.phase = SearchPhase::InFlight;
            s.error = None;
            s.fetches_dispatched += 1;
        });
    }

    /// InFlight -> Settled, discarding anything that is no longer current
    fn handle_outcome(&mut self, outcome: FetchOutcome) {
        let is_current = self
            .in_flight
            .as_ref()
            .is_some_and(|flight| flight.generation == outcome.generation);
        if !is_current {
            debug!(
                "Discarding stale result of search #{} for '{}'",
                outcome.generation, outcome.request.query
            );
            return;
        }
        self.in_flight = None;

        match outcome.result {
            Ok(page) => {
                self.last_completed = Some(outcome.request.key());
                self.publish(|s| {
                    s.phase = SearchPhase::Settled(Settlement::Success);
                    s.total_results = page.total_results;
                    s.results = page.results;
                    s.error = None;
                });
            }
            Err(e) if e.is_cancelled() => {
                self.publish(|s| s.phase = SearchPhase::Settled(Settlement::Cancelled));
            }
            Err(e) => {
                warn!("Search for '{}' failed: {e}", outcome.request.query);
                // The displayed state no longer matches the last successful key
                self.last_completed = None;
                let message = e.user_message(self.language.language()).map(str::to_string);
                self.publish(|s| {
                    s.phase = SearchPhase::Settled(Settlement::Error);
                    s.results.clear();
                    s.total_results = 0;
                    s.error = message;
                });
            }
        }
    }

    fn cancel_in_flight(&mut self) -> bool {
        match self.in_flight.take() {
            Some(flight) => {
                flight.token.cancel();
                true
            }
            None => false,
        }
    }

    fn teardown(&mut self) {
        let had_pending = self.pending.take().is_some();
        let cancelled = self.cancel_in_flight();

        self.publish(|s| {
            if cancelled {
                s.phase = SearchPhase::Settled(Settlement::Cancelled);
                s.fetches_cancelled += 1;
            } else if had_pending {
                s.phase = SearchPhase::Idle;
            }
        });
    }

    fn publish(&self, update: impl FnOnce(&mut SearchSnapshot)) {
        self.snapshot.send_modify(update);
    }
}
