//! Shared test doubles and fixture builders.
//!
//! Used by the unit tests in this crate and by the integration scenarios
//! under `tests/`; shells can also use them to exercise their rendering
//! against a scripted core.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::CatalogError;
use crate::models::catalog::artwork_url;
use crate::models::{Favorites, ItemDetail, ListItem, Page};
use crate::services::{CacheStore, CatalogApi, MemoryCacheStore};

const TEST_SPRITES: &str = "https://sprites.test/artwork";

/// A list item with a numeric slug, matching what ingestion would produce.
pub fn item(slug: &str) -> ListItem {
    ListItem {
        name: format!("pokemon-{slug}"),
        slug: slug.to_string(),
        image_url: artwork_url(TEST_SPRITES, slug),
    }
}

/// A detail record for a numeric id.
pub fn detail(id: u32) -> ItemDetail {
    ItemDetail {
        id,
        name: format!("pokemon-{id}"),
        base_experience: 100 + id,
        height: 7,
        weight: 69,
        image_url: artwork_url(TEST_SPRITES, &id.to_string()),
    }
}

/// A page of `count` items with slugs `first..first + count`.
pub fn numbered_page(first: u32, count: u32, has_next: bool) -> Page {
    Page {
        items: (first..first + count)
            .map(|n| item(&n.to_string()))
            .collect(),
        has_next,
    }
}

/// Scripted [`CatalogApi`] double: pages keyed by offset, details keyed by
/// id, with call counters and an optional per-request delay for concurrency
/// tests.
#[derive(Default)]
pub struct ScriptedCatalogApi {
    pages: Mutex<HashMap<usize, Result<Page, CatalogError>>>,
    details: Mutex<HashMap<String, Result<ItemDetail, CatalogError>>>,
    page_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    delay: Mutex<Option<Duration>>,
}

impl ScriptedCatalogApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the page returned for `offset`.
    pub fn with_page(self, offset: usize, page: Page) -> Self {
        self.pages.lock().unwrap().insert(offset, Ok(page));
        self
    }

    /// Script a failure for the page at `offset`.
    pub fn with_page_error(self, offset: usize, error: CatalogError) -> Self {
        self.pages.lock().unwrap().insert(offset, Err(error));
        self
    }

    /// Script the detail returned for `id`.
    pub fn with_detail(self, id: &str, detail: ItemDetail) -> Self {
        self.details.lock().unwrap().insert(id.to_string(), Ok(detail));
        self
    }

    /// Script a failure for the detail of `id`.
    pub fn with_detail_error(self, id: &str, error: CatalogError) -> Self {
        self.details.lock().unwrap().insert(id.to_string(), Err(error));
        self
    }

    /// Delay every response, so tests can overlap requests deterministically.
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.lock().unwrap() = Some(delay);
        self
    }

    /// Re-script the page at `offset` after construction.
    pub fn set_page(&self, offset: usize, result: Result<Page, CatalogError>) {
        self.pages.lock().unwrap().insert(offset, result);
    }

    /// Re-script the detail for `id` after construction.
    pub fn set_detail(&self, id: &str, result: Result<ItemDetail, CatalogError>) {
        self.details.lock().unwrap().insert(id.to_string(), result);
    }

    /// Number of `fetch_page` calls observed.
    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    /// Number of `fetch_detail` calls observed.
    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    async fn maybe_delay(&self) {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl CatalogApi for ScriptedCatalogApi {
    async fn fetch_page(&self, offset: usize, _limit: usize) -> Result<Page, CatalogError> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_delay().await;
        self.pages
            .lock()
            .unwrap()
            .get(&offset)
            .cloned()
            .unwrap_or(Err(CatalogError::Unknown))
    }

    async fn fetch_detail(&self, id: &str) -> Result<ItemDetail, CatalogError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_delay().await;
        self.details
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or(Err(CatalogError::Unknown))
    }
}

/// [`CacheStore`] double that counts operations on top of an in-memory
/// store, so tests can assert write-per-call and zero-read properties.
#[derive(Default)]
pub struct RecordingCacheStore {
    inner: MemoryCacheStore,
    list_saves: AtomicUsize,
    detail_saves: AtomicUsize,
    favorites_saves: AtomicUsize,
    favorites_clears: AtomicUsize,
}

impl RecordingCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_saves(&self) -> usize {
        self.list_saves.load(Ordering::SeqCst)
    }

    pub fn detail_saves(&self) -> usize {
        self.detail_saves.load(Ordering::SeqCst)
    }

    pub fn favorites_saves(&self) -> usize {
        self.favorites_saves.load(Ordering::SeqCst)
    }

    pub fn favorites_clears(&self) -> usize {
        self.favorites_clears.load(Ordering::SeqCst)
    }
}

impl CacheStore for RecordingCacheStore {
    fn save_list(&self, items: &[ListItem]) {
        self.list_saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save_list(items);
    }

    fn load_list(&self) -> Option<Vec<ListItem>> {
        self.inner.load_list()
    }

    fn save_detail(&self, id: &str, detail: &ItemDetail) {
        self.detail_saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save_detail(id, detail);
    }

    fn load_detail(&self, id: &str) -> Option<ItemDetail> {
        self.inner.load_detail(id)
    }

    fn save_favorites(&self, favorites: &Favorites) {
        self.favorites_saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save_favorites(favorites);
    }

    fn load_favorites(&self) -> Favorites {
        self.inner.load_favorites()
    }

    fn clear_favorites(&self) {
        self.favorites_clears.fetch_add(1, Ordering::SeqCst);
        self.inner.clear_favorites();
    }
}
