//! JSON-backed subscriber and watchlist stores.
//!
//! Same durability model as the quote cache: load once at startup,
//! flush the whole file on every mutation, start empty on a missing or
//! corrupt file.

use idx_core::error::{SignalError, SignalResult};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

fn load_json<T: serde::de::DeserializeOwned + Default>(path: &PathBuf, what: &str) -> T {
    match fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "{what} file corrupt, starting empty");
                T::default()
            }
        },
        Err(_) => T::default(),
    }
}

fn flush_json<T: serde::Serialize>(path: &PathBuf, value: &T) -> SignalResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let raw = serde_json::to_string_pretty(value)
        .map_err(|e| SignalError::Serialization(e.to_string()))?;
    fs::write(path, raw)?;
    Ok(())
}

/// Chats subscribed to the periodic volatility alerts.
pub struct SubscriberStore {
    chat_ids: Vec<i64>,
    path: PathBuf,
}

impl SubscriberStore {
    pub fn open(path: PathBuf) -> Self {
        let chat_ids: Vec<i64> = load_json(&path, "subscriber");
        debug!(count = chat_ids.len(), "subscribers loaded");
        Self { chat_ids, path }
    }

    pub fn chat_ids(&self) -> &[i64] {
        &self.chat_ids
    }

    pub fn contains(&self, chat_id: i64) -> bool {
        self.chat_ids.contains(&chat_id)
    }

    /// Add a subscriber; returns false if already subscribed.
    pub fn add(&mut self, chat_id: i64) -> SignalResult<bool> {
        if self.contains(chat_id) {
            return Ok(false);
        }
        self.chat_ids.push(chat_id);
        flush_json(&self.path, &self.chat_ids)?;
        Ok(true)
    }

    /// Remove a subscriber; returns false if it was not subscribed.
    pub fn remove(&mut self, chat_id: i64) -> SignalResult<bool> {
        let before = self.chat_ids.len();
        self.chat_ids.retain(|&id| id != chat_id);
        if self.chat_ids.len() == before {
            return Ok(false);
        }
        flush_json(&self.path, &self.chat_ids)?;
        Ok(true)
    }

    /// Drop every chat in `chat_ids` (bots blocked during a broadcast).
    pub fn prune(&mut self, chat_ids: &[i64]) -> SignalResult<()> {
        if chat_ids.is_empty() {
            return Ok(());
        }
        self.chat_ids.retain(|id| !chat_ids.contains(id));
        flush_json(&self.path, &self.chat_ids)
    }

    pub fn len(&self) -> usize {
        self.chat_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chat_ids.is_empty()
    }
}

/// Per-chat ticker watchlists, keyed by chat id.
pub struct WatchlistStore {
    lists: HashMap<i64, Vec<String>>,
    path: PathBuf,
}

/// Hard cap per chat so a single list cannot dominate a scan.
const MAX_WATCHLIST_LEN: usize = 20;

/// Outcome of a watchlist mutation, for user feedback.
#[derive(Debug, PartialEq, Eq)]
pub enum WatchlistChange {
    Added,
    AlreadyPresent,
    Removed,
    NotPresent,
    Full,
}

impl WatchlistStore {
    pub fn open(path: PathBuf) -> Self {
        let lists: HashMap<i64, Vec<String>> = load_json(&path, "watchlist");
        debug!(chats = lists.len(), "watchlists loaded");
        Self { lists, path }
    }

    /// The codes a chat watches, in insertion order.
    pub fn codes(&self, chat_id: i64) -> &[String] {
        self.lists.get(&chat_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn add(&mut self, chat_id: i64, code: &str) -> SignalResult<WatchlistChange> {
        let code = code.to_uppercase();
        let list = self.lists.entry(chat_id).or_default();
        if list.iter().any(|c| *c == code) {
            return Ok(WatchlistChange::AlreadyPresent);
        }
        if list.len() >= MAX_WATCHLIST_LEN {
            return Ok(WatchlistChange::Full);
        }
        list.push(code);
        flush_json(&self.path, &self.lists)?;
        Ok(WatchlistChange::Added)
    }

    pub fn remove(&mut self, chat_id: i64, code: &str) -> SignalResult<WatchlistChange> {
        let code = code.to_uppercase();
        let Some(list) = self.lists.get_mut(&chat_id) else {
            return Ok(WatchlistChange::NotPresent);
        };
        let before = list.len();
        list.retain(|c| *c != code);
        if list.len() == before {
            return Ok(WatchlistChange::NotPresent);
        }
        if list.is_empty() {
            self.lists.remove(&chat_id);
        }
        flush_json(&self.path, &self.lists)?;
        Ok(WatchlistChange::Removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("idx-{tag}-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_subscribe_unsubscribe_roundtrip() {
        let path = scratch_path("subs");
        let mut store = SubscriberStore::open(path.clone());

        assert!(store.add(42).unwrap());
        assert!(!store.add(42).unwrap());
        assert_eq!(store.chat_ids(), &[42]);

        assert!(store.remove(42).unwrap());
        assert!(!store.remove(42).unwrap());
        assert!(store.is_empty());

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_subscribers_survive_reopen() {
        let path = scratch_path("subs");
        {
            let mut store = SubscriberStore::open(path.clone());
            store.add(1).unwrap();
            store.add(2).unwrap();
        }

        let store = SubscriberStore::open(path.clone());
        assert_eq!(store.chat_ids(), &[1, 2]);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_prune_removes_blocked_chats() {
        let path = scratch_path("subs");
        let mut store = SubscriberStore::open(path.clone());
        store.add(1).unwrap();
        store.add(2).unwrap();
        store.add(3).unwrap();

        store.prune(&[1, 3]).unwrap();
        assert_eq!(store.chat_ids(), &[2]);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_watchlist_add_remove() {
        let path = scratch_path("watch");
        let mut store = WatchlistStore::open(path.clone());

        assert_eq!(store.add(7, "bbca").unwrap(), WatchlistChange::Added);
        assert_eq!(store.add(7, "BBCA").unwrap(), WatchlistChange::AlreadyPresent);
        assert_eq!(store.add(7, "GOTO").unwrap(), WatchlistChange::Added);
        assert_eq!(store.codes(7), &["BBCA".to_string(), "GOTO".to_string()]);

        assert_eq!(store.remove(7, "bbca").unwrap(), WatchlistChange::Removed);
        assert_eq!(store.remove(7, "BBCA").unwrap(), WatchlistChange::NotPresent);
        assert_eq!(store.codes(7), &["GOTO".to_string()]);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_watchlists_are_per_chat() {
        let path = scratch_path("watch");
        let mut store = WatchlistStore::open(path.clone());
        store.add(1, "BBCA").unwrap();
        store.add(2, "TLKM").unwrap();

        assert_eq!(store.codes(1), &["BBCA".to_string()]);
        assert_eq!(store.codes(2), &["TLKM".to_string()]);
        assert!(store.codes(3).is_empty());

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_watchlist_cap() {
        let path = scratch_path("watch");
        let mut store = WatchlistStore::open(path.clone());
        for i in 0..MAX_WATCHLIST_LEN {
            assert_eq!(store.add(7, &format!("S{i}")).unwrap(), WatchlistChange::Added);
        }
        assert_eq!(store.add(7, "ONEMORE").unwrap(), WatchlistChange::Full);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_watchlist_survives_reopen() {
        let path = scratch_path("watch");
        {
            let mut store = WatchlistStore::open(path.clone());
            store.add(7, "BBCA").unwrap();
        }
        let store = WatchlistStore::open(path.clone());
        assert_eq!(store.codes(7), &["BBCA".to_string()]);

        fs::remove_file(path).ok();
    }
}
