#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::{Mutex, OnceLock};
#[cfg(test)]
use tokio::sync::Mutex as TokioMutex;
use tracing::debug;
#[cfg(not(test))]
use tracing::warn;

use hourly_core::{
    SessionTerminator, TerminationReason, TokenStore, TokenStoreError, ACCESS_TOKEN_KEY,
    REFRESH_TOKEN_KEY,
};

fn keyring_key(kind: &str, context_name: &str) -> String {
    format!("{kind}::{context_name}")
}

#[cfg(test)]
fn keyring_store() -> &'static Mutex<HashMap<String, String>> {
    static STORE: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();
    STORE.get_or_init(|| Mutex::new(HashMap::new()))
}

#[cfg(test)]
static KEYRING_TEST_LOCK: OnceLock<TokioMutex<()>> = OnceLock::new();

#[cfg(test)]
pub(crate) fn lock_keyring_tests_sync() -> tokio::sync::MutexGuard<'static, ()> {
    KEYRING_TEST_LOCK
        .get_or_init(|| TokioMutex::new(()))
        .blocking_lock()
}

#[cfg(test)]
pub(crate) async fn lock_keyring_tests_async() -> tokio::sync::MutexGuard<'static, ()> {
    KEYRING_TEST_LOCK
        .get_or_init(|| TokioMutex::new(()))
        .lock()
        .await
}

#[cfg(test)]
pub(crate) fn clear_keyring_mock() {
    if let Ok(mut map) = keyring_store().lock() {
        map.clear();
    }
}

#[cfg(not(test))]
fn keyring_entry(kind: &str, context_name: &str) -> Result<keyring::Entry, TokenStoreError> {
    let key = keyring_key(kind, context_name);
    keyring::Entry::new("hourly-cli", &key)
        .map_err(|err| TokenStoreError::Unavailable(format!("failed to access keyring: {err}")))
}

#[cfg(not(test))]
fn keyring_set(kind: &str, context_name: &str, value: &str) -> Result<(), TokenStoreError> {
    let entry = keyring_entry(kind, context_name)?;
    entry
        .set_password(value)
        .map_err(|err| TokenStoreError::Write {
            key: kind.to_string(),
            message: err.to_string(),
        })
}

#[cfg(not(test))]
fn keyring_get(kind: &str, context_name: &str) -> Result<Option<String>, TokenStoreError> {
    let entry = keyring_entry(kind, context_name)?;
    match entry.get_password() {
        Ok(value) => Ok(Some(value)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(err) => Err(TokenStoreError::Read {
            key: kind.to_string(),
            message: format!("keychain lookup for context '{context_name}' failed: {err}"),
        }),
    }
}

#[cfg(not(test))]
fn keyring_delete(kind: &str, context_name: &str) -> Result<(), TokenStoreError> {
    let entry = keyring_entry(kind, context_name)?;
    match entry.delete_password() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(err) => {
            warn!(context = %context_name, "failed to delete {kind}: {err}");
            Ok(())
        }
    }
}

#[cfg(test)]
fn keyring_set(kind: &str, context_name: &str, value: &str) -> Result<(), TokenStoreError> {
    let key = keyring_key(kind, context_name);
    let mut store = keyring_store()
        .lock()
        .map_err(|_| TokenStoreError::Unavailable("failed to lock keyring store".to_string()))?;
    store.insert(key, value.to_string());
    Ok(())
}

#[cfg(test)]
fn keyring_get(kind: &str, context_name: &str) -> Result<Option<String>, TokenStoreError> {
    let key = keyring_key(kind, context_name);
    let store = keyring_store()
        .lock()
        .map_err(|_| TokenStoreError::Unavailable("failed to lock keyring store".to_string()))?;
    Ok(store.get(&key).cloned())
}

#[cfg(test)]
fn keyring_delete(kind: &str, context_name: &str) -> Result<(), TokenStoreError> {
    let key = keyring_key(kind, context_name);
    let mut store = keyring_store()
        .lock()
        .map_err(|_| TokenStoreError::Unavailable("failed to lock keyring store".to_string()))?;
    store.remove(&key);
    Ok(())
}

/// Session tokens of one context, kept in the OS keychain.
pub(crate) struct KeyringTokenStore {
    context_name: String,
}

impl KeyringTokenStore {
    pub(crate) fn new(context_name: &str) -> Self {
        Self {
            context_name: context_name.to_string(),
        }
    }
}

impl TokenStore for KeyringTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, TokenStoreError> {
        keyring_get(key, &self.context_name)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TokenStoreError> {
        keyring_set(key, &self.context_name, value)?;
        debug!(context = %self.context_name, key, "stored token in keyring");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), TokenStoreError> {
        keyring_delete(key, &self.context_name)
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        keyring_delete(ACCESS_TOKEN_KEY, &self.context_name)?;
        keyring_delete(REFRESH_TOKEN_KEY, &self.context_name)
    }
}

pub(crate) struct CliTerminator {
    context_name: String,
}

impl CliTerminator {
    pub(crate) fn new(context_name: &str) -> Self {
        Self {
            context_name: context_name.to_string(),
        }
    }
}

impl SessionTerminator for CliTerminator {
    fn terminate(&self, reason: &TerminationReason) {
        if *reason == TerminationReason::Logout {
            debug!(context = %self.context_name, "session closed by logout");
            return;
        }
        eprintln!(
            "Session for context '{}' ended ({reason}); run `hourly login`",
            self.context_name
        );
    }
}
