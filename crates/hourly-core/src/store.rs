use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::constants::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use crate::error::TokenStoreError;

/// Key-value string store holding the session credentials.
///
/// Implementations must be cheap to call from async code; the client never
/// holds a store call across an `.await`.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, TokenStoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), TokenStoreError>;
    fn remove(&self, key: &str) -> Result<(), TokenStoreError>;
    fn clear(&self) -> Result<(), TokenStoreError>;

    fn access_token(&self) -> Result<Option<String>, TokenStoreError> {
        self.get(ACCESS_TOKEN_KEY)
    }

    fn refresh_token(&self) -> Result<Option<String>, TokenStoreError> {
        self.get(REFRESH_TOKEN_KEY)
    }

    fn store_credentials(&self, access: &str, refresh: &str) -> Result<(), TokenStoreError> {
        self.set(ACCESS_TOKEN_KEY, access)?;
        self.set(REFRESH_TOKEN_KEY, refresh)
    }
}

#[derive(Default)]
pub struct MemoryTokenStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(access: Option<&str>, refresh: Option<&str>) -> Self {
        let mut values = HashMap::new();
        if let Some(access) = access {
            values.insert(ACCESS_TOKEN_KEY.to_string(), access.to_string());
        }
        if let Some(refresh) = refresh {
            values.insert(REFRESH_TOKEN_KEY.to_string(), refresh.to_string());
        }
        Self {
            values: Mutex::new(values),
        }
    }

    fn values(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, TokenStoreError> {
        self.values
            .lock()
            .map_err(|_| TokenStoreError::Unavailable("failed to lock token store".to_string()))
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, TokenStoreError> {
        Ok(self.values()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TokenStoreError> {
        self.values()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), TokenStoreError> {
        self.values()?.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        self.values()?.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() -> Result<(), TokenStoreError> {
        let store = MemoryTokenStore::new();
        assert_eq!(store.access_token()?, None);
        store.store_credentials("access", "refresh")?;
        assert_eq!(store.access_token()?.as_deref(), Some("access"));
        assert_eq!(store.refresh_token()?.as_deref(), Some("refresh"));
        store.remove(ACCESS_TOKEN_KEY)?;
        assert_eq!(store.access_token()?, None);
        assert_eq!(store.refresh_token()?.as_deref(), Some("refresh"));
        store.clear()?;
        assert_eq!(store.refresh_token()?, None);
        Ok(())
    }

    #[test]
    fn with_credentials_skips_missing_values() -> Result<(), TokenStoreError> {
        let store = MemoryTokenStore::with_credentials(Some("T1"), None);
        assert_eq!(store.access_token()?.as_deref(), Some("T1"));
        assert_eq!(store.refresh_token()?, None);
        Ok(())
    }
}
