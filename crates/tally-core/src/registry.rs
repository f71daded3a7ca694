//! Session token to menu mapping.
//!
//! Every session owns an independent [`MenuStore`]. The registry's own lock
//! only guards the token map: handles are cloned out and the lock released
//! before any item operation, so resolving a session never waits on item
//! updates in another session.
//!
//! Unknown tokens are provisioned lazily on first access. Sessions live for
//! the lifetime of the process.

use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use rand::distr::Alphanumeric;
use tokio::sync::RwLock;
use tracing::info;

use crate::store::MenuStore;

/// Length of generated session tokens unless configured otherwise.
pub const DEFAULT_TOKEN_LENGTH: usize = 8;

/// Maps opaque session tokens to their menus.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<MenuStore>>>,
    token_length: usize,
}

impl SessionRegistry {
    /// Create an empty registry generating tokens of [`DEFAULT_TOKEN_LENGTH`].
    pub fn new() -> Self {
        Self::with_token_length(DEFAULT_TOKEN_LENGTH)
    }

    /// Create an empty registry generating tokens of `token_length`
    /// characters. A length of zero falls back to the default.
    pub fn with_token_length(token_length: usize) -> Self {
        let token_length = if token_length == 0 {
            DEFAULT_TOKEN_LENGTH
        } else {
            token_length
        };
        Self {
            sessions: RwLock::new(HashMap::new()),
            token_length,
        }
    }

    /// Register a session and return its token and menu.
    ///
    /// Without a token a fresh random one is generated; collisions are not
    /// checked. A supplied token that is already registered returns the
    /// existing menu untouched.
    pub async fn create(&self, token: Option<String>) -> (String, Arc<MenuStore>) {
        let token = token.unwrap_or_else(|| generate_token(self.token_length));
        let mut sessions = self.sessions.write().await;
        let store = Arc::clone(
            sessions
                .entry(token.clone())
                .or_insert_with(|| Arc::new(MenuStore::new())),
        );
        let total = sessions.len();
        drop(sessions);

        info!(session = %token, total, "session created");
        (token, store)
    }

    /// The menu for `token`, provisioning an empty one if it is unknown.
    pub async fn resolve(&self, token: &str) -> Arc<MenuStore> {
        if let Some(store) = self.get(token).await {
            return store;
        }

        let mut sessions = self.sessions.write().await;
        // Another task may have provisioned it between the two locks.
        if let Some(store) = sessions.get(token) {
            return Arc::clone(store);
        }
        let store = Arc::new(MenuStore::new());
        sessions.insert(token.to_owned(), Arc::clone(&store));
        let total = sessions.len();
        drop(sessions);

        info!(session = %token, total, "session provisioned on first access");
        store
    }

    /// The menu for `token` if it is registered.
    pub async fn get(&self, token: &str) -> Option<Arc<MenuStore>> {
        self.sessions.read().await.get(token).cloned()
    }

    /// Number of registered sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether no session has been registered yet.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a random alphanumeric token of `len` characters.
pub fn generate_token(len: usize) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
