use anyhow::Result;
use async_trait::async_trait;
use shared::domain::SessionId;
use tokio::sync::OnceCell;

pub mod cache;
pub mod cart;
pub mod dispatch;
pub mod error;
pub mod page;
pub mod types;
pub mod voice;

pub use cache::{Invalidation, SharedQueryCache};
pub use cart::CartClient;
pub use dispatch::{ListeningFlag, NavigationDispatcher, SearchDispatcher, SearchState};
pub use error::CartError;
pub use page::{CartHandle, HeaderAction, HeaderView, HomePage, PageView, Section, VoiceBindings};
pub use types::{CartOutcome, Notice, NoticeVariant, ScrollBehavior, ScrollBlock, ScrollOptions};
pub use voice::VoiceCommand;

/// Process-wide query cache that dependent views observe for staleness.
pub trait QueryCache: Send + Sync {
    fn invalidate(&self, key: &str);
}

/// Toast/notification surface.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Client-side router.
pub trait Router: Send + Sync {
    fn navigate_to(&self, path: &str);
}

pub trait Viewport: Send + Sync {
    /// Returns `false` when the section is not part of the rendered tree.
    fn scroll_into_view(&self, section: &str, options: ScrollOptions) -> bool;
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn session_id(&self) -> Result<SessionId>;
}

pub struct StaticSession(SessionId);

impl StaticSession {
    pub fn new(session_id: SessionId) -> Self {
        Self(session_id)
    }
}

impl Default for StaticSession {
    fn default() -> Self {
        Self(SessionId::placeholder())
    }
}

#[async_trait]
impl SessionProvider for StaticSession {
    async fn session_id(&self) -> Result<SessionId> {
        Ok(self.0.clone())
    }
}

/// Mints a random session id on first use and keeps it for its own lifetime.
#[derive(Default)]
pub struct GeneratedSession {
    session_id: OnceCell<SessionId>,
}

impl GeneratedSession {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionProvider for GeneratedSession {
    async fn session_id(&self) -> Result<SessionId> {
        let session_id = self
            .session_id
            .get_or_init(|| async {
                let session_id = SessionId::generate();
                tracing::debug!(session_id = %session_id, "generated shopping session");
                session_id
            })
            .await;
        Ok(session_id.clone())
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
