//! Cache store service.
//!
//! Durable key-value persistence for three independent datasets: the list
//! snapshot, per-item detail snapshots, and the favorites set. Persistence
//! is best-effort: every read or write failure degrades to a cache miss or
//! a dropped write with a warning, never an error the caller must handle.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::models::{Favorites, ItemDetail, ListItem};

const LIST_FILE: &str = "list.json";
const DETAILS_FILE: &str = "details.json";
const FAVORITES_FILE: &str = "favorites.json";

/// Durable persistence for list, detail, and favorites snapshots.
///
/// All operations are synchronous and infallible from the caller's
/// perspective. Snapshots are last-write-wins; there is no merging.
pub trait CacheStore: Send + Sync {
    /// Replace the stored list snapshot.
    fn save_list(&self, items: &[ListItem]);

    /// The stored list snapshot, or `None` if absent or undecodable.
    fn load_list(&self) -> Option<Vec<ListItem>>;

    /// Store one detail snapshot under `id`, overwriting any previous one.
    fn save_detail(&self, id: &str, detail: &ItemDetail);

    /// The stored detail for `id`, or `None` if absent or undecodable.
    fn load_detail(&self, id: &str) -> Option<ItemDetail>;

    /// Replace the stored favorites set.
    fn save_favorites(&self, favorites: &Favorites);

    /// The stored favorites set; empty if absent or undecodable.
    fn load_favorites(&self) -> Favorites;

    /// Drop the stored favorites set.
    fn clear_favorites(&self);
}

/// File-backed store: one JSON document per dataset under a directory.
pub struct FileCacheStore {
    dir: PathBuf,
}

impl FileCacheStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, file: &str) -> Option<T> {
        let path = self.path(file);
        let bytes = fs::read(&path).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "discarding undecodable cache entry");
                None
            }
        }
    }

    fn write_json<T: serde::Serialize>(&self, file: &str, value: &T) {
        if let Err(error) = fs::create_dir_all(&self.dir) {
            tracing::warn!(dir = %self.dir.display(), %error, "cache write dropped");
            return;
        }
        let path = self.path(file);
        let encoded = match serde_json::to_vec(value) {
            Ok(encoded) => encoded,
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "cache encode failed");
                return;
            }
        };
        if let Err(error) = fs::write(&path, encoded) {
            tracing::warn!(path = %path.display(), %error, "cache write dropped");
        }
    }

    fn remove(&self, file: &str) {
        let path = self.path(file);
        if let Err(error) = fs::remove_file(&path) {
            if error.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), %error, "cache remove failed");
            }
        }
    }

    fn load_details(&self) -> HashMap<String, ItemDetail> {
        self.read_json(DETAILS_FILE).unwrap_or_default()
    }
}

impl CacheStore for FileCacheStore {
    fn save_list(&self, items: &[ListItem]) {
        self.write_json(LIST_FILE, &items);
    }

    fn load_list(&self) -> Option<Vec<ListItem>> {
        self.read_json(LIST_FILE)
    }

    fn save_detail(&self, id: &str, detail: &ItemDetail) {
        let mut details = self.load_details();
        details.insert(id.to_string(), detail.clone());
        self.write_json(DETAILS_FILE, &details);
    }

    fn load_detail(&self, id: &str) -> Option<ItemDetail> {
        self.load_details().remove(id)
    }

    fn save_favorites(&self, favorites: &Favorites) {
        self.write_json(FAVORITES_FILE, favorites);
    }

    fn load_favorites(&self) -> Favorites {
        self.read_json(FAVORITES_FILE).unwrap_or_default()
    }

    fn clear_favorites(&self) {
        self.remove(FAVORITES_FILE);
    }
}

/// In-memory store for tests and ephemeral shells.
#[derive(Default)]
pub struct MemoryCacheStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    list: Option<Vec<ListItem>>,
    details: HashMap<String, ItemDetail>,
    favorites: Option<Favorites>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryCacheStore {
    fn save_list(&self, items: &[ListItem]) {
        self.inner.lock().unwrap().list = Some(items.to_vec());
    }

    fn load_list(&self) -> Option<Vec<ListItem>> {
        self.inner.lock().unwrap().list.clone()
    }

    fn save_detail(&self, id: &str, detail: &ItemDetail) {
        self.inner
            .lock()
            .unwrap()
            .details
            .insert(id.to_string(), detail.clone());
    }

    fn load_detail(&self, id: &str) -> Option<ItemDetail> {
        self.inner.lock().unwrap().details.get(id).cloned()
    }

    fn save_favorites(&self, favorites: &Favorites) {
        self.inner.lock().unwrap().favorites = Some(favorites.clone());
    }

    fn load_favorites(&self) -> Favorites {
        self.inner
            .lock()
            .unwrap()
            .favorites
            .clone()
            .unwrap_or_default()
    }

    fn clear_favorites(&self) {
        self.inner.lock().unwrap().favorites = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::artwork_url;

    fn item(slug: &str) -> ListItem {
        ListItem {
            name: format!("pokemon-{slug}"),
            slug: slug.to_string(),
            image_url: artwork_url("https://sprites.test", slug),
        }
    }

    fn detail(id: u32) -> ItemDetail {
        ItemDetail {
            id,
            name: format!("pokemon-{id}"),
            base_experience: 100 + id,
            height: 7,
            weight: 69,
            image_url: artwork_url("https://sprites.test", &id.to_string()),
        }
    }

    #[test]
    fn file_store_should_round_trip_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCacheStore::new(dir.path());

        assert!(store.load_list().is_none());

        let items = vec![item("1"), item("2")];
        store.save_list(&items);
        assert_eq!(store.load_list(), Some(items));
    }

    #[test]
    fn file_store_list_should_be_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCacheStore::new(dir.path());

        store.save_list(&[item("1"), item("2")]);
        store.save_list(&[item("3")]);
        assert_eq!(store.load_list(), Some(vec![item("3")]));
    }

    #[test]
    fn file_store_should_keep_details_independent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCacheStore::new(dir.path());

        store.save_detail("25", &detail(25));
        store.save_detail("7", &detail(7));

        assert_eq!(store.load_detail("25"), Some(detail(25)));
        assert_eq!(store.load_detail("7"), Some(detail(7)));
        assert!(store.load_detail("151").is_none());
    }

    #[test]
    fn file_store_detail_refetch_should_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCacheStore::new(dir.path());

        store.save_detail("25", &detail(25));
        let mut refreshed = detail(25);
        refreshed.base_experience = 999;
        store.save_detail("25", &refreshed);

        assert_eq!(store.load_detail("25"), Some(refreshed));
    }

    #[test]
    fn corrupt_files_should_read_as_cache_miss() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCacheStore::new(dir.path());

        fs::write(dir.path().join(LIST_FILE), b"not json").unwrap();
        fs::write(dir.path().join(DETAILS_FILE), b"{\"25\": 42}").unwrap();
        fs::write(dir.path().join(FAVORITES_FILE), b"[1, 2]").unwrap();

        assert!(store.load_list().is_none());
        assert!(store.load_detail("25").is_none());
        assert!(store.load_favorites().is_empty());
    }

    #[test]
    fn favorites_should_round_trip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCacheStore::new(dir.path());

        assert!(store.load_favorites().is_empty());

        let mut favorites = Favorites::new();
        favorites.toggle("25");
        favorites.toggle("7");
        store.save_favorites(&favorites);
        assert_eq!(store.load_favorites(), favorites);

        store.clear_favorites();
        assert!(store.load_favorites().is_empty());
    }

    #[test]
    fn write_failures_should_be_swallowed() {
        // A directory whose parent is a regular file can never be created.
        let store = FileCacheStore::new("/dev/null/kantodex-cache");

        store.save_list(&[item("1")]);
        store.save_detail("1", &detail(1));
        store.save_favorites(&Favorites::new());
        store.clear_favorites();

        assert!(store.load_list().is_none());
        assert!(store.load_detail("1").is_none());
    }

    #[test]
    fn memory_store_should_round_trip_everything() {
        let store = MemoryCacheStore::new();

        store.save_list(&[item("1")]);
        assert_eq!(store.load_list(), Some(vec![item("1")]));

        store.save_detail("25", &detail(25));
        assert_eq!(store.load_detail("25"), Some(detail(25)));

        let mut favorites = Favorites::new();
        favorites.toggle("25");
        store.save_favorites(&favorites);
        assert_eq!(store.load_favorites(), favorites);

        store.clear_favorites();
        assert!(store.load_favorites().is_empty());
    }
}
