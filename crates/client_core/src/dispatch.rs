use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, PoisonError, RwLock,
};

use crate::{Notice, Notifier, Router, ScrollOptions, Viewport};

/// Anchor of the section listing products and search results.
pub const PRODUCTS_SECTION: &str = "featured-products";

/// Current search text. Empty means no active search.
#[derive(Debug, Clone, Default)]
pub struct SearchState(Arc<RwLock<String>>);

impl SearchState {
    pub fn query(&self) -> String {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_active(&self) -> bool {
        !self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    fn replace(&self, query: &str) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = query.to_string();
    }
}

/// Whether the voice overlay is capturing audio.
#[derive(Debug, Clone, Default)]
pub struct ListeningFlag(Arc<AtomicBool>);

impl ListeningFlag {
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub(crate) fn set(&self, listening: bool) {
        self.0.store(listening, Ordering::Relaxed);
    }
}

#[derive(Clone)]
pub struct SearchDispatcher {
    state: SearchState,
    notifier: Arc<dyn Notifier>,
    viewport: Arc<dyn Viewport>,
}

impl SearchDispatcher {
    pub fn new(
        state: SearchState,
        notifier: Arc<dyn Notifier>,
        viewport: Arc<dyn Viewport>,
    ) -> Self {
        Self {
            state,
            notifier,
            viewport,
        }
    }

    pub fn search(&self, query: &str) {
        self.state.replace(query);
        self.notifier
            .notify(Notice::new("Searching", format!("Searching for: {query}")));
        if !self
            .viewport
            .scroll_into_view(PRODUCTS_SECTION, ScrollOptions::smooth_to_start())
        {
            tracing::debug!(
                section = PRODUCTS_SECTION,
                "results section not rendered; skipping scroll"
            );
        }
    }
}

#[derive(Clone)]
pub struct NavigationDispatcher {
    router: Arc<dyn Router>,
}

impl NavigationDispatcher {
    pub fn new(router: Arc<dyn Router>) -> Self {
        Self { router }
    }

    /// Routes to `/{path}`. An already rooted path ends up with two slashes;
    /// voice tokens arrive without one.
    pub fn navigate(&self, path: &str) {
        let target = format!("/{path}");
        tracing::debug!(%target, "navigating");
        self.router.navigate_to(&target);
    }
}

#[cfg(test)]
#[path = "tests/dispatch_tests.rs"]
mod tests;
