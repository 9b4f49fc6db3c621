//! Persistent token storage
//!
//! Exactly two opaque strings are persisted: the admin auth token and the
//! customer session token. Values are read at request time, so whichever
//! writer stored last wins.

use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ClientResult;

/// Token file name inside the storage directory
pub const TOKEN_FILE: &str = "tokens.json";

/// Which token a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenSlot {
    /// Restaurant admin / kitchen staff login
    Admin,
    /// Customer table session
    Session,
}

impl TokenSlot {
    pub const ALL: [TokenSlot; 2] = [Self::Admin, Self::Session];

    /// Storage key
    pub fn key(self) -> &'static str {
        match self {
            Self::Admin => "authToken",
            Self::Session => "sessionToken",
        }
    }
}

/// Token storage backend
pub trait TokenStore: Send + Sync + fmt::Debug {
    fn get(&self, slot: TokenSlot) -> Option<String>;
    fn set(&self, slot: TokenSlot, value: &str) -> ClientResult<()>;
    fn remove(&self, slot: TokenSlot) -> ClientResult<()>;

    /// Drop both tokens (logout)
    fn clear(&self) -> ClientResult<()> {
        for slot in TokenSlot::ALL {
            self.remove(slot)?;
        }
        Ok(())
    }
}

/// JSON file token store
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileTokenStore {
    /// Store tokens in `{dir}/tokens.json`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(TOKEN_FILE),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, String> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(_) => return BTreeMap::new(),
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), "Ignoring unreadable token file: {e}");
            BTreeMap::new()
        })
    }

    fn save(&self, tokens: &BTreeMap<String, String>) -> ClientResult<()> {
        if tokens.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path)?;
            }
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(tokens)?)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, slot: TokenSlot) -> Option<String> {
        self.load().remove(slot.key())
    }

    fn set(&self, slot: TokenSlot, value: &str) -> ClientResult<()> {
        let _guard = self.write_lock.lock();
        let mut tokens = self.load();
        tokens.insert(slot.key().to_string(), value.to_string());
        self.save(&tokens)
    }

    fn remove(&self, slot: TokenSlot) -> ClientResult<()> {
        let _guard = self.write_lock.lock();
        let mut tokens = self.load();
        if tokens.remove(slot.key()).is_some() {
            self.save(&tokens)?;
        }
        Ok(())
    }
}

/// In-process token store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<HashMap<TokenSlot, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, slot: TokenSlot) -> Option<String> {
        self.tokens.lock().get(&slot).cloned()
    }

    fn set(&self, slot: TokenSlot, value: &str) -> ClientResult<()> {
        self.tokens.lock().insert(slot, value.to_string());
        Ok(())
    }

    fn remove(&self, slot: TokenSlot) -> ClientResult<()> {
        self.tokens.lock().remove(&slot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(temp_dir.path().join("nested"));

        assert!(store.get(TokenSlot::Admin).is_none());

        store.set(TokenSlot::Admin, "admin-token").unwrap();
        store.set(TokenSlot::Session, "session-token").unwrap();
        assert_eq!(store.get(TokenSlot::Admin).as_deref(), Some("admin-token"));

        // A second handle on the same file sees the latest write
        let other = FileTokenStore::new(temp_dir.path().join("nested"));
        other.set(TokenSlot::Admin, "newer").unwrap();
        assert_eq!(store.get(TokenSlot::Admin).as_deref(), Some("newer"));

        store.remove(TokenSlot::Admin).unwrap();
        assert!(store.get(TokenSlot::Admin).is_none());
        assert_eq!(store.get(TokenSlot::Session).as_deref(), Some("session-token"));

        store.clear().unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_ignores_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(temp_dir.path());
        fs::write(store.path(), "not json").unwrap();

        assert!(store.get(TokenSlot::Session).is_none());
        store.set(TokenSlot::Session, "fresh").unwrap();
        assert_eq!(store.get(TokenSlot::Session).as_deref(), Some("fresh"));
    }

    #[test]
    fn test_memory_store_clear() {
        let store = MemoryTokenStore::new();
        store.set(TokenSlot::Admin, "a").unwrap();
        store.set(TokenSlot::Session, "s").unwrap();
        store.clear().unwrap();
        assert!(store.get(TokenSlot::Admin).is_none());
        assert!(store.get(TokenSlot::Session).is_none());
    }
}
