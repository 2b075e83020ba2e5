//! Dashboard and item-detail use cases: fetch from the store, then run the
//! match engine on what came back.

use crate::error::{Result, StoreError};
use crate::session::Session;
use crate::store::ItemStore;
use retrievix_match::{
    Item, ItemType, MatchConfig, MatchSuggestion, find_similar_with, match_score, percent,
    rank_suggestions_with,
};
use retrievix_telemetry::{MetricsRegistry, Timer, metrics, names};
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// Upper bound for a single store fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything the dashboard shows for one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub my_lost: Vec<Item>,
    pub my_found: Vec<Item>,
    pub suggestions: Vec<MatchSuggestion>,
}

/// An opposite-type item related to the one being viewed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarItem {
    pub item: Item,
    pub percent: u8,
}

/// Item detail with its "you might be interested in" panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemDetail {
    pub item: Item,
    pub similar: Vec<SimilarItem>,
}

/// Runs the match engine over items fetched from a store.
pub struct MatchService<S> {
    store: S,
    config: MatchConfig,
    fetch_timeout: Duration,
    metrics: &'static MetricsRegistry,
}

impl<S: ItemStore> MatchService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: MatchConfig::default(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            metrics: metrics(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Record into a registry other than the global one.
    #[must_use]
    pub fn with_metrics(mut self, registry: &'static MetricsRegistry) -> Self {
        self.metrics = registry;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Await a store call with the fetch timeout; any failure counts as the
    /// data being unavailable.
    async fn fetch<T>(&self, what: &str, call: impl Future<Output = Result<T>>) -> Result<T> {
        let outcome = match tokio::time::timeout(self.fetch_timeout, call).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(StoreError::Unavailable(reason))) => reason,
            Ok(Err(other)) => return Err(other),
            Err(_) => format!("timed out after {}ms", self.fetch_timeout.as_millis()),
        };

        self.metrics.increment(names::FETCH_FAILURES);
        warn!(what, reason = %outcome, "store fetch failed");
        Err(StoreError::Unavailable(format!("{what}: {outcome}")))
    }

    /// The user's own reports plus match suggestions for their lost items.
    ///
    /// Resolved reports are listed but never suggested.
    pub async fn dashboard(&self, session: &Session) -> Result<Dashboard> {
        let timer = Timer::start_in(self.metrics, names::DASHBOARD_MS);

        let (my_lost, my_found, all_found) = tokio::try_join!(
            self.fetch(
                "your lost items",
                self.store.list_by_user(&session.user_id, ItemType::Lost)
            ),
            self.fetch(
                "your found items",
                self.store.list_by_user(&session.user_id, ItemType::Found)
            ),
            self.fetch("found items", self.store.list(Some(ItemType::Found))),
        )?;

        let open_lost: Vec<Item> = my_lost.iter().filter(|i| i.is_active()).cloned().collect();
        let open_found: Vec<Item> = all_found.into_iter().filter(Item::is_active).collect();
        let suggestions = rank_suggestions_with(&open_lost, &open_found, &self.config);

        self.metrics
            .gauge(names::SUGGESTIONS, suggestions.len() as u64);
        let elapsed = timer.stop();
        info!(
            user = %session.user_id,
            suggestions = suggestions.len(),
            elapsed_ms = elapsed.as_millis(),
            "dashboard loaded"
        );

        Ok(Dashboard {
            my_lost,
            my_found,
            suggestions,
        })
    }

    /// Dashboard suggestions only.
    pub async fn suggestions(&self, session: &Session) -> Result<Vec<MatchSuggestion>> {
        Ok(self.dashboard(session).await?.suggestions)
    }

    /// An item together with similar open items of the opposite type.
    pub async fn similar_to(&self, item_id: &str) -> Result<ItemDetail> {
        let item = self.fetch("item", self.store.get(item_id)).await?;
        let pool = self
            .fetch(
                "candidate items",
                self.store.list(Some(item.item_type.opposite())),
            )
            .await?;
        let pool: Vec<Item> = pool.into_iter().filter(Item::is_active).collect();

        let similar = find_similar_with(&item, &pool, &self.config)
            .into_iter()
            .map(|candidate| SimilarItem {
                percent: percent(match_score(&item, candidate)),
                item: candidate.clone(),
            })
            .collect();

        Ok(ItemDetail { item, similar })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::submission::NewItem;
    use retrievix_match::ItemStatus;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn registry() -> &'static MetricsRegistry {
        Box::leak(Box::new(MetricsRegistry::new()))
    }

    fn item(id: &str, item_type: ItemType, owner: &str, category: &str, title: &str) -> Item {
        Item::new(id, item_type)
            .with_owner(owner)
            .with_category(category)
            .with_title(title)
    }

    fn seeded() -> MemoryStore {
        MemoryStore::with_items(vec![
            item("L-1", ItemType::Lost, "alice", "Electronics", "iPhone 14")
                .with_description("black phone with case"),
            item("L-2", ItemType::Lost, "bob", "Keys", "Car keys"),
            item("F-1", ItemType::Found, "bob", "Electronics", "iPhone")
                .with_description("black phone found near station"),
            item("F-2", ItemType::Found, "carol", "Books", "Atlas"),
            item("F-3", ItemType::Found, "alice", "Keys", "Keys"),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn test_dashboard() {
        let metrics = registry();
        let service = MatchService::new(seeded()).with_metrics(metrics);

        let dashboard = service.dashboard(&Session::new("alice")).await.unwrap();

        assert_eq!(dashboard.my_lost.len(), 1);
        assert_eq!(dashboard.my_found.len(), 1);
        assert_eq!(dashboard.suggestions.len(), 1);
        assert_eq!(dashboard.suggestions[0].item.id, "F-1");
        assert_eq!(dashboard.suggestions[0].percent, 82);
        assert_eq!(dashboard.suggestions[0].source_lost_item_id, "L-1");

        assert_eq!(metrics.gauge_value(names::SUGGESTIONS), Some(1));
        assert_eq!(metrics.histogram_stats(names::DASHBOARD_MS).unwrap().count, 1);
    }

    #[tokio::test]
    async fn test_resolved_items_are_not_suggested() {
        let store = seeded();
        store.resolve("F-1", &Session::new("bob")).await.unwrap();
        let service = MatchService::new(store).with_metrics(registry());

        let dashboard = service.dashboard(&Session::new("alice")).await.unwrap();
        assert!(dashboard.suggestions.is_empty());
        assert_eq!(dashboard.my_lost.len(), 1);

        let detail = service.similar_to("L-1").await.unwrap();
        assert!(detail.similar.is_empty());
    }

    #[tokio::test]
    async fn test_user_without_items() {
        let service = MatchService::new(seeded()).with_metrics(registry());
        let dashboard = service.dashboard(&Session::new("nobody")).await.unwrap();
        assert!(dashboard.my_lost.is_empty());
        assert!(dashboard.suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_similar_to() {
        let service = MatchService::new(seeded()).with_metrics(registry());

        let detail = service.similar_to("L-2").await.unwrap();
        assert_eq!(detail.item.id, "L-2");
        let ids: Vec<&str> = detail.similar.iter().map(|s| s.item.id.as_str()).collect();
        assert_eq!(ids, ["F-3"]);
        assert_eq!(detail.similar[0].percent, 70);

        assert!(matches!(
            service.similar_to("missing").await,
            Err(StoreError::NotFound(_))
        ));
    }

    /// A store that never answers list calls.
    struct StalledStore {
        calls: AtomicUsize,
    }

    impl ItemStore for StalledStore {
        async fn insert(&self, _item: NewItem, _session: &Session) -> Result<Item> {
            Err(StoreError::Unavailable("read only".into()))
        }

        async fn list(&self, _item_type: Option<ItemType>) -> Result<Vec<Item>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::future::pending().await
        }

        async fn delete(&self, _id: &str, _session: &Session) -> Result<()> {
            Ok(())
        }

        async fn resolve(&self, id: &str, _session: &Session) -> Result<Item> {
            let mut item = Item::new(id, ItemType::Lost);
            item.status = ItemStatus::Resolved;
            Ok(item)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_timeout_reports_unavailable() {
        let metrics = registry();
        let service = MatchService::new(StalledStore {
            calls: AtomicUsize::new(0),
        })
        .with_fetch_timeout(Duration::from_secs(2))
        .with_metrics(metrics);

        let err = service.dashboard(&Session::new("alice")).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert!(metrics.counter_value(names::FETCH_FAILURES) >= 1);
        assert!(service.store().calls.load(Ordering::SeqCst) >= 1);
    }
}
