//! Visited-country storage, keyed by user.
//!
//! The render pipeline never touches a store. Callers resolve a user's
//! countries into a [`VisitedSet`] first and hand that over, so rendering
//! stays free of shared state.
//!
//! On disk, [`JsonFileStore`] keeps the whole map as one pretty-printed
//! JSON object: `{ "<user id>": ["Country", ...] }`.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::visited::VisitedSet;

pub type UserId = i64;

type UserMap = BTreeMap<UserId, Vec<String>>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("store data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-user list of visited countries.
pub trait VisitedStore {
    /// Countries for `user` in insertion order. Unknown users have none.
    fn countries(&self, user: UserId) -> Vec<String>;

    /// Record a visit. Returns `false` if nothing changed (empty name or
    /// already recorded).
    fn add(&self, user: UserId, country: &str) -> Result<bool, StoreError>;

    /// Forget a visit. Returns `false` if it wasn't recorded.
    fn remove(&self, user: UserId, country: &str) -> Result<bool, StoreError>;

    /// The user's countries as a set ready for rendering.
    fn visited(&self, user: UserId) -> VisitedSet {
        self.countries(user).into_iter().collect()
    }
}

fn lock(map: &Mutex<UserMap>) -> MutexGuard<'_, UserMap> {
    // Changes are committed by a single assignment, so a poisoned map is still whole.
    map.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn add_to(map: &mut UserMap, user: UserId, country: &str) -> bool {
    if country.is_empty() {
        return false;
    }
    let countries = map.entry(user).or_default();
    if countries.iter().any(|c| c == country) {
        return false;
    }
    countries.push(country.to_string());
    true
}

fn remove_from(map: &mut UserMap, user: UserId, country: &str) -> bool {
    let Some(countries) = map.get_mut(&user) else {
        return false;
    };
    let before = countries.len();
    countries.retain(|c| c != country);
    countries.len() != before
}

// ============================================================================
// IN-MEMORY
// ============================================================================

/// Store that lives and dies with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: Mutex<UserMap>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VisitedStore for MemoryStore {
    fn countries(&self, user: UserId) -> Vec<String> {
        lock(&self.map).get(&user).cloned().unwrap_or_default()
    }

    fn add(&self, user: UserId, country: &str) -> Result<bool, StoreError> {
        Ok(add_to(&mut lock(&self.map), user, country))
    }

    fn remove(&self, user: UserId, country: &str) -> Result<bool, StoreError> {
        Ok(remove_from(&mut lock(&self.map), user, country))
    }
}

// ============================================================================
// JSON FILE
// ============================================================================

/// Store backed by a JSON file, rewritten after every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    map: Mutex<UserMap>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let map = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "store file not found, starting empty");
                UserMap::new()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        Ok(Self {
            path,
            map: Mutex::new(map),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, map: &UserMap) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(map)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), users = map.len(), "store saved");
        Ok(())
    }

    /// Apply `op` to a copy and only commit it once the copy is on disk.
    fn mutate(
        &self,
        op: impl FnOnce(&mut UserMap) -> bool,
    ) -> Result<bool, StoreError> {
        let mut map = lock(&self.map);
        let mut next = map.clone();
        if !op(&mut next) {
            return Ok(false);
        }
        self.save(&next)?;
        *map = next;
        Ok(true)
    }
}

impl VisitedStore for JsonFileStore {
    fn countries(&self, user: UserId) -> Vec<String> {
        lock(&self.map).get(&user).cloned().unwrap_or_default()
    }

    fn add(&self, user: UserId, country: &str) -> Result<bool, StoreError> {
        self.mutate(|map| add_to(map, user, country))
    }

    fn remove(&self, user: UserId, country: &str) -> Result<bool, StoreError> {
        self.mutate(|map| remove_from(map, user, country))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("visited-map-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn memory_add_list_remove() {
        let store = MemoryStore::new();
        assert!(store.add(789, "France").unwrap());
        assert!(store.add(789, "Japan").unwrap());
        assert_eq!(store.countries(789), vec!["France", "Japan"]);

        assert!(store.remove(789, "France").unwrap());
        assert_eq!(store.countries(789), vec!["Japan"]);
        assert!(!store.remove(789, "France").unwrap());
    }

    #[test]
    fn unknown_user_has_no_countries() {
        let store = MemoryStore::new();
        assert!(store.countries(1).is_empty());
        assert!(store.visited(1).is_empty());
        assert!(!store.remove(1, "Chile").unwrap());
    }

    #[test]
    fn duplicates_and_empty_names_are_ignored() {
        let store = MemoryStore::new();
        assert!(store.add(5, "Peru").unwrap());
        assert!(!store.add(5, "Peru").unwrap());
        assert!(!store.add(5, "").unwrap());
        assert_eq!(store.countries(5), vec!["Peru"]);
    }

    #[test]
    fn users_are_independent() {
        let store = MemoryStore::new();
        store.add(1, "Kenya").unwrap();
        store.add(2, "Nepal").unwrap();
        assert!(store.visited(1).contains("Kenya"));
        assert!(!store.visited(1).contains("Nepal"));
    }

    #[test]
    fn json_store_persists_across_opens() {
        let path = temp_path("persist");
        let _ = fs::remove_file(&path);

        {
            let store = JsonFileStore::open(&path).unwrap();
            store.add(42, "Iceland").unwrap();
            store.add(42, "Norway").unwrap();
            store.remove(42, "Iceland").unwrap();
        }

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.countries(42), vec!["Norway"]);

        let raw: serde_json::Value =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["42"], serde_json::json!(["Norway"]));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn json_store_missing_file_is_empty() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.path(), path.as_path());
        assert!(store.countries(7).is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn failed_save_leaves_store_unchanged() {
        // A regular file where the store's directory should be.
        let blocker = temp_path("blocker");
        let _ = fs::remove_file(&blocker);
        let store = JsonFileStore::open(blocker.join("visited.json")).unwrap();
        fs::write(&blocker, "not a directory").unwrap();

        let first = store.add(9, "Chile");
        let second = store.add(9, "Chile");
        let countries = store.countries(9);
        let on_disk = blocker.join("visited.json").exists();
        fs::remove_file(&blocker).ok();

        assert!(matches!(first, Err(StoreError::Io { .. })));
        assert!(matches!(second, Err(StoreError::Io { .. })));
        assert!(countries.is_empty());
        assert!(!on_disk);
    }

    #[test]
    fn retry_after_failed_save_persists() {
        let blocker = temp_path("retry-blocker");
        let _ = fs::remove_dir_all(&blocker);
        let _ = fs::remove_file(&blocker);
        let path = blocker.join("visited.json");
        let store = JsonFileStore::open(&path).unwrap();

        fs::write(&blocker, "not a directory").unwrap();
        assert!(store.add(9, "Chile").is_err());

        fs::remove_file(&blocker).unwrap();
        assert!(store.add(9, "Chile").unwrap());
        let reopened = JsonFileStore::open(&path).unwrap();
        fs::remove_dir_all(&blocker).ok();

        assert_eq!(store.countries(9), vec!["Chile"]);
        assert_eq!(reopened.countries(9), vec!["Chile"]);
    }

    #[test]
    fn json_store_rejects_garbage() {
        let path = temp_path("garbage");
        fs::write(&path, "not json at all").unwrap();
        let result = JsonFileStore::open(&path);
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(StoreError::Json(_))));
    }
}
