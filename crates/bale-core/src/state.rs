//! Per-user conversation state, kept apart from the wire objects.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{domain::UserId, Result};

/// Storage for one piece of state per user.
///
/// Handlers receive a store instead of hanging state off [`crate::types::User`].
#[async_trait]
pub trait StateStore<S>: Send + Sync
where
    S: Send + 'static,
{
    async fn get(&self, user: UserId) -> Result<Option<S>>;

    async fn set(&self, user: UserId, state: S) -> Result<()>;

    /// Returns the state that was removed, if any.
    async fn clear(&self, user: UserId) -> Result<Option<S>>;
}

/// Process-local store; state is lost on restart.
#[derive(Debug)]
pub struct MemoryStateStore<S> {
    inner: Mutex<HashMap<UserId, S>>,
}

impl<S> Default for MemoryStateStore<S> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }
}

impl<S> MemoryStateStore<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}

#[async_trait]
impl<S> StateStore<S> for MemoryStateStore<S>
where
    S: Clone + Send + Sync + 'static,
{
    async fn get(&self, user: UserId) -> Result<Option<S>> {
        Ok(self.inner.lock().await.get(&user).cloned())
    }

    async fn set(&self, user: UserId, state: S) -> Result<()> {
        self.inner.lock().await.insert(user, state);
        tracing::debug!(%user, "user state set");
        Ok(())
    }

    async fn clear(&self, user: UserId) -> Result<Option<S>> {
        let removed = self.inner.lock().await.remove(&user);
        if removed.is_some() {
            tracing::debug!(%user, "user state cleared");
        }
        Ok(removed)
    }
}
