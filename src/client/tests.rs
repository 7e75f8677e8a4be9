//! Search controller scenario tests

#[cfg(test)]
mod controller_tests {
    use crate::catalog::{Language, MediaItem, MediaKind, SearchPage};
    use crate::client::{
        ClientError, LANGUAGE_KEY, LanguageContext, MemoryStore, MessageKey, PreferenceStore,
        SearchApi, SearchController, SearchPhase, SearchRequest, Settlement, message,
    };
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::sleep;
    use tokio_util::sync::CancellationToken;

    #[derive(Clone, Copy)]
    enum Failure {
        RateLimited,
        Status(u16),
    }

    #[derive(Default)]
    struct FakeApi {
        calls: Mutex<Vec<SearchRequest>>,
        delays: HashMap<&'static str, Duration>,
        failures: HashMap<&'static str, Failure>,
        honor_cancel: bool,
        cancelled: AtomicUsize,
    }

    impl FakeApi {
        fn with_delay(mut self, query: &'static str, millis: u64) -> Self {
            self.delays.insert(query, Duration::from_millis(millis));
            self
        }

        fn failing(mut self, query: &'static str, failure: Failure) -> Self {
            self.failures.insert(query, failure);
            self
        }

        fn honoring_cancel(mut self) -> Self {
            self.honor_cancel = true;
            self
        }

        fn calls(&self) -> Vec<SearchRequest> {
            self.calls.lock().clone()
        }
    }

    fn item(title: &str) -> MediaItem {
        serde_json::from_value(json!({
            "id": 1,
            "title": title,
            "release_date": "2021-09-15",
            "overview": "",
            "vote_average": 7.8,
            "vote_count": 10
        }))
        .unwrap()
    }

    #[async_trait]
    impl SearchApi for FakeApi {
        async fn search(
            &self,
            request: &SearchRequest,
            cancel: &CancellationToken,
        ) -> Result<SearchPage, ClientError> {
            self.calls.lock().push(request.clone());
            let delay = self
                .delays
                .get(request.query.as_str())
                .copied()
                .unwrap_or(Duration::from_millis(50));

            if self.honor_cancel {
                tokio::select! {
                    () = cancel.cancelled() => {
                        self.cancelled.fetch_add(1, Ordering::SeqCst);
                        return Err(ClientError::Cancelled);
                    }
                    () = sleep(delay) => {}
                }
            } else {
                sleep(delay).await;
            }

            match self.failures.get(request.query.as_str()) {
                Some(Failure::RateLimited) => Err(ClientError::RateLimited),
                Some(Failure::Status(code)) => Err(ClientError::Status(*code)),
                None => Ok(SearchPage {
                    page: 1,
                    results: vec![item(&request.query)],
                    total_pages: 1,
                    total_results: 1,
                }),
            }
        }
    }

    fn spawn(api: &Arc<FakeApi>) -> SearchController {
        spawn_with_store(api, Arc::new(MemoryStore::default()))
    }

    fn spawn_with_store(api: &Arc<FakeApi>, store: Arc<MemoryStore>) -> SearchController {
        let api: Arc<dyn SearchApi> = api.clone();
        SearchController::spawn(api, LanguageContext::load(store))
    }

    fn titles(controller: &SearchController) -> Vec<String> {
        controller
            .snapshot()
            .results
            .iter()
            .map(|i| i.display_title().to_string())
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_identical_inputs_within_window_fetch_once() {
        let api = Arc::new(FakeApi::default());
        let controller = spawn(&api);

        controller.input("dune", MediaKind::Movie).await.unwrap();
        sleep(Duration::from_millis(100)).await;
        controller.input("dune", MediaKind::Movie).await.unwrap();

        let snapshot = controller.settled().await;
        assert_eq!(snapshot.phase, SearchPhase::Settled(Settlement::Success));
        assert_eq!(snapshot.fetches_dispatched, 1);
        assert_eq!(api.calls().len(), 1);
        assert_eq!(titles(&controller), ["dune"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_typing_fetches_only_last_input() {
        let api = Arc::new(FakeApi::default());
        let controller = spawn(&api);

        for partial in ["d", "du", "dun", "dune"] {
            controller.input(partial, MediaKind::Movie).await.unwrap();
            sleep(Duration::from_millis(100)).await;
        }

        controller.settled().await;
        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].query, "dune");
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeat_of_completed_search_is_suppressed() {
        let api = Arc::new(FakeApi::default());
        let controller = spawn(&api);

        controller.input("dune", MediaKind::Movie).await.unwrap();
        controller.settled().await;

        controller.input("dune ", MediaKind::Movie).await.unwrap();
        let snapshot = controller.settled().await;

        assert_eq!(snapshot.fetches_dispatched, 1);
        assert_eq!(snapshot.phase, SearchPhase::Settled(Settlement::Success));
        assert_eq!(titles(&controller), ["dune"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_query_other_kind_fetches_again() {
        let api = Arc::new(FakeApi::default());
        let controller = spawn(&api);

        controller.input("dune", MediaKind::Movie).await.unwrap();
        controller.settled().await;
        controller.input("dune", MediaKind::Tv).await.unwrap();
        let snapshot = controller.settled().await;

        assert_eq!(snapshot.fetches_dispatched, 2);
        assert_eq!(api.calls()[1].kind, MediaKind::Tv);
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_result_of_superseded_search_is_discarded() {
        // The slow fetch ignores cancellation, so its result does arrive late
        let api = Arc::new(FakeApi::default().with_delay("alien", 1000).with_delay("aliens", 100));
        let controller = spawn(&api);

        controller.input("alien", MediaKind::Movie).await.unwrap();
        sleep(Duration::from_millis(350)).await;
        assert_eq!(controller.snapshot().phase, SearchPhase::InFlight);

        controller.input("aliens", MediaKind::Movie).await.unwrap();
        let snapshot = controller.settled().await;
        assert_eq!(titles(&controller), ["aliens"]);
        assert_eq!(snapshot.fetches_cancelled, 1);

        sleep(Duration::from_secs(2)).await;
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.phase, SearchPhase::Settled(Settlement::Success));
        assert_eq!(snapshot.fetches_dispatched, 2);
        assert_eq!(titles(&controller), ["aliens"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_search_is_cancelled_silently() {
        let api = Arc::new(
            FakeApi::default()
                .with_delay("alien", 1000)
                .honoring_cancel(),
        );
        let controller = spawn(&api);

        controller.input("alien", MediaKind::Movie).await.unwrap();
        sleep(Duration::from_millis(350)).await;
        controller.input("aliens", MediaKind::Movie).await.unwrap();

        let snapshot = controller.settled().await;
        assert_eq!(api.cancelled.load(Ordering::SeqCst), 1);
        assert!(snapshot.error.is_none());
        assert_eq!(snapshot.phase, SearchPhase::Settled(Settlement::Success));
        assert_eq!(titles(&controller), ["aliens"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_shows_localized_message() {
        let api = Arc::new(
            FakeApi::default()
                .failing("boom", Failure::RateLimited)
                .failing("crash", Failure::Status(502)),
        );
        let store = Arc::new(MemoryStore::default());
        store.set(LANGUAGE_KEY, "en").unwrap();
        let controller = spawn_with_store(&api, store);

        controller.input("dune", MediaKind::Movie).await.unwrap();
        controller.settled().await;

        controller.input("boom", MediaKind::Movie).await.unwrap();
        let snapshot = controller.settled().await;
        assert_eq!(snapshot.phase, SearchPhase::Settled(Settlement::Error));
        assert_eq!(
            snapshot.error.as_deref(),
            Some(message(Language::En, MessageKey::RateLimited))
        );
        assert!(snapshot.results.is_empty());

        controller.input("crash", MediaKind::Movie).await.unwrap();
        let snapshot = controller.settled().await;
        assert_eq!(
            snapshot.error.as_deref(),
            Some(message(Language::En, MessageKey::SearchFailed))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_search_can_be_retried() {
        let api = Arc::new(FakeApi::default().failing("boom", Failure::Status(500)));
        let controller = spawn(&api);

        controller.input("boom", MediaKind::Movie).await.unwrap();
        controller.settled().await;
        controller.input("boom", MediaKind::Movie).await.unwrap();
        let snapshot = controller.settled().await;

        assert_eq!(snapshot.fetches_dispatched, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_input_returns_to_idle() {
        let api = Arc::new(FakeApi::default());
        let controller = spawn(&api);

        controller.input("dune", MediaKind::Movie).await.unwrap();
        controller.input("   ", MediaKind::Movie).await.unwrap();
        sleep(Duration::from_secs(1)).await;

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.phase, SearchPhase::Idle);
        assert_eq!(snapshot.fetches_dispatched, 0);
        assert!(api.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigation_drives_search_and_url_state() {
        let api = Arc::new(FakeApi::default());
        let controller = spawn(&api);

        controller
            .navigate("q=breaking%20bad&type=tv&lang=en-US")
            .await
            .unwrap();
        let snapshot = controller.settled().await;

        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].kind, MediaKind::Tv);
        assert_eq!(calls[0].language, Language::En);
        assert_eq!(
            snapshot.url_query().as_deref(),
            Some("q=breaking%20bad&type=tv&lang=en-US")
        );
        // URL language applies to the request only
        assert_eq!(snapshot.language, Language::It);
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigation_without_query_is_ignored() {
        let api = Arc::new(FakeApi::default());
        let controller = spawn(&api);

        controller.navigate("type=tv").await.unwrap();
        sleep(Duration::from_secs(1)).await;

        assert_eq!(controller.snapshot().phase, SearchPhase::Idle);
        assert!(api.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_language_change_persists_and_refetches() {
        let api = Arc::new(FakeApi::default());
        let store = Arc::new(MemoryStore::default());
        let controller = spawn_with_store(&api, store.clone());

        controller.input("dune", MediaKind::Movie).await.unwrap();
        controller.settled().await;

        controller.set_language(Language::De).await.unwrap();
        let snapshot = controller.settled().await;

        assert_eq!(store.get(LANGUAGE_KEY).as_deref(), Some("de"));
        assert_eq!(snapshot.language, Language::De);
        assert_eq!(snapshot.fetches_dispatched, 2);
        assert_eq!(api.calls()[1].locale(), "de-DE");
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_in_flight_fetch() {
        let api = Arc::new(
            FakeApi::default()
                .with_delay("alien", 1000)
                .honoring_cancel(),
        );
        let controller = spawn(&api);

        controller.input("alien", MediaKind::Movie).await.unwrap();
        sleep(Duration::from_millis(350)).await;
        controller.shutdown().await.unwrap();
        sleep(Duration::from_millis(10)).await;

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.phase, SearchPhase::Settled(Settlement::Cancelled));
        assert_eq!(api.cancelled.load(Ordering::SeqCst), 1);
        assert!(matches!(
            controller.input("alien", MediaKind::Movie).await,
            Err(ClientError::ControllerClosed)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_clears_pending_debounce() {
        let api = Arc::new(FakeApi::default());
        let controller = spawn(&api);

        controller.input("dune", MediaKind::Movie).await.unwrap();
        controller.shutdown().await.unwrap();
        sleep(Duration::from_secs(1)).await;

        assert!(api.calls().is_empty());
        assert_eq!(controller.snapshot().phase, SearchPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_last_handle_cancels_fetch() {
        let api = Arc::new(
            FakeApi::default()
                .with_delay("alien", 1000)
                .honoring_cancel(),
        );
        let controller = spawn(&api);

        controller.input("alien", MediaKind::Movie).await.unwrap();
        sleep(Duration::from_millis(350)).await;
        drop(controller);
        sleep(Duration::from_millis(10)).await;

        assert_eq!(api.cancelled.load(Ordering::SeqCst), 1);
    }
}
