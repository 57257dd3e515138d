//! Catalog view-model, the orchestration core.
//!
//! Owns the observable catalog state and drives everything around it:
//! pagination, cache-versus-network resolution per connectivity status,
//! favorites persistence, detail fetch de-duplication, and the
//! reload-on-reconnect trigger. All collaborators are injected, so the
//! whole state machine runs against test doubles.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use tokio::task::JoinHandle;

use crate::config::{Config, LOAD_MORE_THRESHOLD};
use crate::error::CatalogError;
use crate::events::{CatalogEvent, CatalogEventHandler, EventBus, SimpleEventBus};
use crate::models::{Favorites, ItemDetail, ListItem};
use crate::services::{CacheStore, CatalogApi, ConnectivityMonitor};

/// Observable catalog state, snapshotted for shells via
/// [`CatalogViewModel::state`].
///
/// `is_loading` (refresh) and `is_loading_more` are never both true.
/// `items` never contains two entries with the same slug.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    /// Items in pagination order.
    pub items: Vec<ListItem>,
    /// A full refresh is in flight.
    pub is_loading: bool,
    /// An incremental page load is in flight.
    pub is_loading_more: bool,
    /// The most recent load failure, if any.
    pub last_error: Option<CatalogError>,
    /// Favorited slugs.
    pub favorites: Favorites,
}

/// Pagination bookkeeping that shells never see.
struct Inner {
    state: CatalogState,
    current_offset: usize,
    can_load_more: bool,
}

/// In-flight detail fetch, shareable across concurrent callers.
type DetailFlight = Shared<BoxFuture<'static, Result<ItemDetail, CatalogError>>>;

/// The view-model coordinating catalog fetches, caching, and favorites.
///
/// Construct one per session and share it behind an `Arc`; all methods take
/// `&self`. State-mutating operations are `async` and are awaited (or
/// spawned) by the embedding shell.
pub struct CatalogViewModel {
    api: Arc<dyn CatalogApi>,
    cache: Arc<dyn CacheStore>,
    connectivity: Arc<ConnectivityMonitor>,
    page_size: usize,
    inner: Mutex<Inner>,
    bus: Mutex<SimpleEventBus>,
    detail_flights: Mutex<HashMap<String, DetailFlight>>,
    reload_task: Mutex<Option<JoinHandle<()>>>,
}

impl CatalogViewModel {
    /// Create a view-model over the injected services.
    ///
    /// Favorites are restored from the cache store immediately; the item
    /// list stays empty until the shell runs
    /// [`load_list`](Self::load_list).
    pub fn new(
        api: Arc<dyn CatalogApi>,
        cache: Arc<dyn CacheStore>,
        connectivity: Arc<ConnectivityMonitor>,
        config: &Config,
    ) -> Self {
        let favorites = cache.load_favorites();
        tracing::debug!(favorites = favorites.len(), "restoring favorites from cache");
        Self {
            api,
            cache,
            connectivity,
            page_size: config.page_size,
            inner: Mutex::new(Inner {
                state: CatalogState {
                    favorites,
                    ..CatalogState::default()
                },
                current_offset: 0,
                can_load_more: true,
            }),
            bus: Mutex::new(SimpleEventBus::new()),
            detail_flights: Mutex::new(HashMap::new()),
            reload_task: Mutex::new(None),
        }
    }

    /// Arm the reload-on-reconnect trigger. Idempotent; must be called from
    /// within a Tokio runtime.
    ///
    /// When connectivity transitions to connected while the item list is
    /// empty, the spawned listener runs `load_list(refresh: true)` once per
    /// transition. The listener holds only a weak reference and dies with
    /// the view-model.
    pub fn start(self: &Arc<Self>) {
        let mut task = self.reload_task.lock().unwrap();
        if task.is_some() {
            return;
        }
        let weak = Arc::downgrade(self);
        let mut receiver = self.connectivity.subscribe();
        *task = Some(tokio::spawn(async move {
            while receiver.changed().await.is_ok() {
                let connected = *receiver.borrow();
                let Some(view_model) = weak.upgrade() else {
                    break;
                };
                if connected && view_model.state().items.is_empty() {
                    tracing::info!("connectivity restored with empty catalog, reloading");
                    view_model.load_list(true).await;
                }
            }
        }));
    }

    /// Load the list: a full refresh or the next page.
    ///
    /// Refresh resets the pagination cursor and replaces the sequence;
    /// load-more appends the next page. A refresh while any list load is in
    /// flight is ignored, as is a load-more while one is in flight or once
    /// the server reports no further pages. When offline, a refresh adopts
    /// the cached list if one exists; otherwise the call fails with
    /// [`CatalogError::NoInternetConnection`]. Loading flags are cleared on
    /// every path.
    pub async fn load_list(&self, refresh: bool) {
        let connected = self.connectivity.is_connected();
        let fetch_offset = {
            let mut inner = self.inner.lock().unwrap();
            if refresh {
                if inner.state.is_loading || inner.state.is_loading_more {
                    tracing::debug!("refresh ignored: a list load is already in flight");
                    return;
                }
                inner.state.is_loading = true;
                inner.current_offset = 0;
                inner.can_load_more = true;
            } else {
                if inner.state.is_loading || inner.state.is_loading_more || !inner.can_load_more {
                    return;
                }
                inner.state.is_loading_more = true;
            }
            inner.state.last_error = None;
            inner.current_offset
        };
        self.publish(CatalogEvent::LoadingChanged {
            refresh,
            active: true,
        });

        if !connected {
            if refresh {
                if let Some(cached) = self.cache.load_list() {
                    tracing::info!(count = cached.len(), "offline, serving cached list");
                    let count = cached.len();
                    {
                        let mut inner = self.inner.lock().unwrap();
                        inner.state.items = cached;
                        inner.state.is_loading = false;
                    }
                    self.publish(CatalogEvent::ListUpdated { count });
                    self.publish(CatalogEvent::LoadingChanged {
                        refresh,
                        active: false,
                    });
                    return;
                }
            }
            self.finish_with_error(refresh, CatalogError::NoInternetConnection);
            return;
        }

        match self.api.fetch_page(fetch_offset, self.page_size).await {
            Ok(page) => {
                let (count, snapshot) = {
                    let mut inner = self.inner.lock().unwrap();
                    if refresh {
                        inner.state.items = page.items;
                    } else {
                        // The server guarantees non-overlapping pages; drop
                        // anything that violates it rather than duplicating.
                        for item in page.items {
                            if !inner.state.items.contains(&item) {
                                inner.state.items.push(item);
                            }
                        }
                    }
                    inner.current_offset += self.page_size;
                    inner.can_load_more = page.has_next;
                    inner.state.is_loading = false;
                    inner.state.is_loading_more = false;
                    (inner.state.items.len(), inner.state.items.clone())
                };
                self.cache.save_list(&snapshot);
                self.publish(CatalogEvent::ListUpdated { count });
                self.publish(CatalogEvent::LoadingChanged {
                    refresh,
                    active: false,
                });
            }
            Err(error) => {
                tracing::warn!(%error, offset = fetch_offset, "catalog page load failed");
                self.finish_with_error(refresh, error);
            }
        }
    }

    /// Request the next page when `current` is rendered within the last
    /// [`LOAD_MORE_THRESHOLD`] positions of the sequence. An item that is no
    /// longer in the sequence triggers nothing.
    pub async fn load_more_if_needed(&self, current: &ListItem) {
        let near_end = {
            let inner = self.inner.lock().unwrap();
            let items = &inner.state.items;
            items
                .iter()
                .position(|item| item == current)
                .is_some_and(|index| index + LOAD_MORE_THRESHOLD >= items.len())
        };
        if near_end {
            self.load_list(false).await;
        }
    }

    /// Resolve one item's detail record, cache-first.
    ///
    /// A cached detail is returned without touching the network. Otherwise
    /// the fetch requires connectivity, persists its result to the cache,
    /// and is de-duplicated: concurrent calls for the same id share a
    /// single request.
    pub async fn fetch_detail(&self, id: &str) -> Result<ItemDetail, CatalogError> {
        if let Some(cached) = self.cache.load_detail(id) {
            tracing::debug!(id, "detail served from cache");
            return Ok(cached);
        }
        if !self.connectivity.is_connected() {
            return Err(CatalogError::NoInternetConnection);
        }

        let (flight, created) = {
            let mut flights = self.detail_flights.lock().unwrap();
            match flights.get(id) {
                Some(existing) => (existing.clone(), false),
                None => {
                    let api = Arc::clone(&self.api);
                    let cache = Arc::clone(&self.cache);
                    let owned_id = id.to_string();
                    let flight = async move {
                        let detail = api.fetch_detail(&owned_id).await?;
                        cache.save_detail(&owned_id, &detail);
                        Ok(detail)
                    }
                    .boxed()
                    .shared();
                    flights.insert(id.to_string(), flight.clone());
                    (flight, true)
                }
            }
        };

        let result = flight.await;
        self.detail_flights.lock().unwrap().remove(id);
        if created && result.is_ok() {
            self.publish(CatalogEvent::DetailFetched { id: id.to_string() });
        }
        result
    }

    /// Flip `id`'s favorite membership and persist the full set.
    pub fn toggle_favorite(&self, id: &str) {
        let (snapshot, count) = {
            let mut inner = self.inner.lock().unwrap();
            let now_favorite = inner.state.favorites.toggle(id);
            tracing::debug!(id, now_favorite, "favorite toggled");
            (inner.state.favorites.clone(), inner.state.favorites.len())
        };
        self.cache.save_favorites(&snapshot);
        self.publish(CatalogEvent::FavoritesChanged { count });
    }

    /// Whether `id` is currently favorited.
    pub fn is_favorite(&self, id: &str) -> bool {
        self.inner.lock().unwrap().state.favorites.contains(id)
    }

    /// Clear the favorites set, in memory and persisted.
    pub fn remove_all_favorites(&self) {
        self.inner.lock().unwrap().state.favorites.clear();
        self.cache.clear_favorites();
        self.publish(CatalogEvent::FavoritesChanged { count: 0 });
    }

    /// The current sequence, optionally narrowed to favorites.
    ///
    /// Pure and recomputed per call; the favorites subsequence keeps list
    /// order.
    pub fn filtered_items(&self, show_favorites: bool) -> Vec<ListItem> {
        let inner = self.inner.lock().unwrap();
        if show_favorites {
            inner
                .state
                .items
                .iter()
                .filter(|item| inner.state.favorites.contains(&item.slug))
                .cloned()
                .collect()
        } else {
            inner.state.items.clone()
        }
    }

    /// A snapshot of the observable state.
    pub fn state(&self) -> CatalogState {
        self.inner.lock().unwrap().state.clone()
    }

    /// Register a handler for state-change events.
    pub fn subscribe(&self, handler: CatalogEventHandler) {
        self.bus.lock().unwrap().subscribe(handler);
    }

    fn publish(&self, event: CatalogEvent) {
        self.bus.lock().unwrap().publish(event);
    }

    fn finish_with_error(&self, refresh: bool, error: CatalogError) {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.state.is_loading = false;
            inner.state.is_loading_more = false;
            inner.state.last_error = Some(error.clone());
        }
        self.publish(CatalogEvent::LoadFailed { error });
        self.publish(CatalogEvent::LoadingChanged {
            refresh,
            active: false,
        });
    }
}

impl Drop for CatalogViewModel {
    fn drop(&mut self) {
        if let Some(task) = self.reload_task.lock().unwrap().take() {
            task.abort();
        }
    }
}
