//! In-memory session store: one document and one template selection per
//! editing session. The only shared mutable state in the process.
//!
//! Locks are held for the synchronous core call only. Anything that awaits
//! external I/O works on a cloned snapshot. Sessions left unmutated past the
//! configured idle limit are evicted by a background sweeper.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::info;
use uuid::Uuid;

use crate::document::Document;
use crate::templates::TemplateId;

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub template: TemplateId,
    pub document: Document,
}

impl Session {
    fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            template: TemplateId::default(),
            document: Document::new(),
        }
    }
}

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> Session {
        let session = Session::new();
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        session
    }

    pub async fn get(&self, id: Uuid) -> Option<Session> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Runs `f` against the session's document and returns its result along
    /// with the updated session.
    pub async fn with_document<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Document) -> R,
    ) -> Option<(R, Session)> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id)?;
        let result = f(&mut session.document);
        session.updated_at = Utc::now();
        Some((result, session.clone()))
    }

    /// Changes the template selection only; the document is left as is.
    pub async fn set_template(&self, id: Uuid, template: TemplateId) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id)?;
        session.template = template;
        session.updated_at = Utc::now();
        Some(session.clone())
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    /// Drops sessions whose last mutation is older than `max_idle`.
    /// Returns how many were dropped.
    pub async fn evict_idle(&self, max_idle: chrono::Duration) -> usize {
        let cutoff = Utc::now() - max_idle;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.updated_at >= cutoff);
        before - sessions.len()
    }

    /// Runs `evict_idle` every `every` until the runtime shuts down.
    pub fn spawn_idle_sweeper(&self, max_idle: chrono::Duration, every: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let evicted = store.evict_idle(max_idle).await;
                if evicted > 0 {
                    info!(evicted, "Idle sessions evicted");
                }
            }
        })
    }
}
