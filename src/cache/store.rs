//! Bucketed TTL cache persisted as one JSON blob
//!
//! The whole store lives in a single file (`store.json` under the XDG cache
//! directory): a map from bucket name to a map from entity key (channel id) to
//! an entry carrying an epoch-millisecond timestamp and an arbitrary JSON
//! payload. An entry is valid iff `now - ts <= TTL`; stale entries are ignored
//! on read and eventually overwritten, never deleted.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Default entry lifetime in hours.
pub const DEFAULT_TTL_HOURS: u64 = 12;

/// File name of the serialized store inside the cache directory.
const STORE_FILE: &str = "store.json";

/// The fixed set of cache partitions, one per kind of fetched entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// Uploads-playlist id per channel
    UploadsPlaylist,
    /// Newest uploads per channel
    Latest,
    /// Top-viewed videos per channel
    Top,
    /// Featured playlists per channel
    Playlists,
}

impl Bucket {
    /// Storage key for the bucket.
    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::UploadsPlaylist => "uploadsPl",
            Bucket::Latest => "latest",
            Bucket::Top => "top",
            Bucket::Playlists => "pls",
        }
    }
}

/// One cached record: write timestamp plus the serialized payload.
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    /// Epoch milliseconds at write time
    ts: i64,
    /// The cached payload
    data: serde_json::Value,
}

type StoreData = HashMap<String, HashMap<String, CacheEntry>>;

/// Persistent bucketed cache with staleness-on-read semantics.
///
/// Every operation is fail-soft: a missing, corrupt, or unwritable store file
/// behaves as an empty cache and never surfaces an error to the caller.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Path of the single serialized blob
    path: PathBuf,
    /// Entry lifetime in milliseconds
    ttl_ms: i64,
}

impl CacheStore {
    /// Opens the store at the XDG-compliant cache location
    /// (`~/.cache/tubedeck/store.json` on Linux).
    ///
    /// Returns `None` if the cache directory cannot be determined.
    pub fn new(ttl_hours: u64) -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "tubedeck")?;
        let path = project_dirs.cache_dir().join(STORE_FILE);
        Some(Self::with_path(path, ttl_hours))
    }

    /// Opens a store backed by an explicit file path. Useful for tests.
    pub fn with_path(path: PathBuf, ttl_hours: u64) -> Self {
        Self {
            path,
            ttl_ms: (ttl_hours as i64) * 3600 * 1000,
        }
    }

    /// Returns the cached payload for `(bucket, key)` if an entry exists and is
    /// no older than the TTL. Expired entries are ignored, not removed.
    pub fn get<T: DeserializeOwned>(&self, bucket: Bucket, key: &str) -> Option<T> {
        self.get_at(bucket, key, Utc::now().timestamp_millis())
    }

    /// Returns the last written payload regardless of age. Used as the fallback
    /// when a fetch fails and stale data is better than an empty row.
    pub fn get_stale<T: DeserializeOwned>(&self, bucket: Bucket, key: &str) -> Option<T> {
        let store = self.load();
        let entry = store.get(bucket.as_str())?.get(key)?;
        serde_json::from_value(entry.data.clone()).ok()
    }

    /// Upserts `(bucket, key)` with a fresh timestamp, auto-creating the bucket,
    /// and persists the full store synchronously. Failures are silent no-ops.
    pub fn set<T: Serialize>(&self, bucket: Bucket, key: &str, payload: &T) {
        let data = match serde_json::to_value(payload) {
            Ok(value) => value,
            Err(_) => return,
        };
        let mut store = self.load();
        store.entry(bucket.as_str().to_string()).or_default().insert(
            key.to_string(),
            CacheEntry {
                ts: Utc::now().timestamp_millis(),
                data,
            },
        );
        self.save(&store);
    }

    /// TTL check against an explicit clock, shared by `get` and the tests.
    fn get_at<T: DeserializeOwned>(&self, bucket: Bucket, key: &str, now_ms: i64) -> Option<T> {
        let store = self.load();
        let entry = store.get(bucket.as_str())?.get(key)?;
        if now_ms - entry.ts > self.ttl_ms {
            return None;
        }
        serde_json::from_value(entry.data.clone()).ok()
    }

    /// Reads the blob from disk; anything unreadable or unparseable is an
    /// empty store.
    fn load(&self) -> StoreData {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Writes the blob back, creating the parent directory if needed. Quota or
    /// permission errors are swallowed: the cache degrades to a no-op.
    fn save(&self, store: &StoreData) {
        let json = match serde_json::to_string(store) {
            Ok(json) => json,
            Err(_) => return,
        };
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let _ = fs::write(&self.path, json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (CacheStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = CacheStore::with_path(temp_dir.path().join(STORE_FILE), DEFAULT_TTL_HOURS);
        (store, temp_dir)
    }

    #[test]
    fn test_set_then_get_returns_payload() {
        let (store, _temp_dir) = create_test_store();

        store.set(Bucket::Latest, "UCabc", &vec!["v1".to_string(), "v2".to_string()]);

        let got: Option<Vec<String>> = store.get(Bucket::Latest, "UCabc");
        assert_eq!(got, Some(vec!["v1".to_string(), "v2".to_string()]));
    }

    #[test]
    fn test_get_unknown_bucket_or_key_is_absent() {
        let (store, _temp_dir) = create_test_store();

        store.set(Bucket::Top, "UCabc", &42u32);

        assert_eq!(store.get::<u32>(Bucket::Latest, "UCabc"), None);
        assert_eq!(store.get::<u32>(Bucket::Top, "UCother"), None);
    }

    #[test]
    fn test_entry_past_ttl_is_absent_but_not_deleted() {
        let (store, _temp_dir) = create_test_store();
        store.set(Bucket::UploadsPlaylist, "UCabc", &"UUabc".to_string());

        let now = Utc::now().timestamp_millis();
        let past_ttl = now + store.ttl_ms + 1;

        let stale: Option<String> = store.get_at(Bucket::UploadsPlaylist, "UCabc", past_ttl);
        assert_eq!(stale, None, "expired entry must read as absent");

        // The entry itself survives for stale fallback.
        let fallback: Option<String> = store.get_stale(Bucket::UploadsPlaylist, "UCabc");
        assert_eq!(fallback, Some("UUabc".to_string()));
    }

    #[test]
    fn test_entry_within_ttl_is_present() {
        let (store, _temp_dir) = create_test_store();
        store.set(Bucket::UploadsPlaylist, "UCabc", &"UUabc".to_string());

        let now = Utc::now().timestamp_millis();
        let within = now + store.ttl_ms - 1000;

        let got: Option<String> = store.get_at(Bucket::UploadsPlaylist, "UCabc", within);
        assert_eq!(got, Some("UUabc".to_string()));
    }

    #[test]
    fn test_corrupt_blob_reads_as_empty() {
        let (store, temp_dir) = create_test_store();
        fs::write(temp_dir.path().join(STORE_FILE), "not json {{{").expect("prime store");

        let got: Option<String> = store.get(Bucket::Latest, "UCabc");
        assert_eq!(got, None);
    }

    #[test]
    fn test_set_over_corrupt_blob_recovers() {
        let (store, temp_dir) = create_test_store();
        fs::write(temp_dir.path().join(STORE_FILE), "garbage").expect("prime store");

        store.set(Bucket::Latest, "UCabc", &1u8);

        let got: Option<u8> = store.get(Bucket::Latest, "UCabc");
        assert_eq!(got, Some(1));
    }

    #[test]
    fn test_overwrite_replaces_entry() {
        let (store, _temp_dir) = create_test_store();
        store.set(Bucket::Top, "UCabc", &"first".to_string());
        store.set(Bucket::Top, "UCabc", &"second".to_string());

        let got: Option<String> = store.get(Bucket::Top, "UCabc");
        assert_eq!(got, Some("second".to_string()));
    }

    #[test]
    fn test_buckets_are_independent() {
        let (store, _temp_dir) = create_test_store();
        store.set(Bucket::Latest, "UCabc", &"l".to_string());
        store.set(Bucket::Top, "UCabc", &"t".to_string());

        assert_eq!(store.get::<String>(Bucket::Latest, "UCabc"), Some("l".into()));
        assert_eq!(store.get::<String>(Bucket::Top, "UCabc"), Some("t".into()));
    }

    #[test]
    fn test_set_creates_parent_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested = temp_dir.path().join("nested").join("cache").join(STORE_FILE);
        let store = CacheStore::with_path(nested.clone(), DEFAULT_TTL_HOURS);

        store.set(Bucket::Playlists, "UCabc", &0u8);

        assert!(nested.exists(), "store blob should be created");
    }

    #[test]
    fn test_set_to_unwritable_path_is_silent() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        // A directory where the file should be: writes cannot succeed.
        let path = temp_dir.path().join(STORE_FILE);
        fs::create_dir_all(&path).expect("occupy path with a directory");
        let store = CacheStore::with_path(path, DEFAULT_TTL_HOURS);

        store.set(Bucket::Latest, "UCabc", &1u8); // must not panic
        assert_eq!(store.get::<u8>(Bucket::Latest, "UCabc"), None);
    }

    #[test]
    fn test_single_blob_holds_all_buckets() {
        let (store, temp_dir) = create_test_store();
        store.set(Bucket::Latest, "UCabc", &1u8);
        store.set(Bucket::Playlists, "UCabc", &2u8);

        let content =
            fs::read_to_string(temp_dir.path().join(STORE_FILE)).expect("read store blob");
        assert!(content.contains("latest"));
        assert!(content.contains("pls"));
    }
}
