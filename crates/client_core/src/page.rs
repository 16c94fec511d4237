//! Composition of the storefront home page: owned state, bound handlers and
//! the view description handed to a renderer.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use shared::domain::ProductId;
use tokio::task::JoinSet;

use crate::{
    dispatch::PRODUCTS_SECTION, CartClient, CartOutcome, ListeningFlag, NavigationDispatcher,
    Notifier, Router, SearchDispatcher, SearchState, Viewport, VoiceCommand,
};

pub const DEFAULT_BRAND: &str = "Shopport";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderAction {
    InstallPrompt,
    CartDrawer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub brand: String,
    pub actions: Vec<HeaderAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    Hero,
    Products {
        anchor: String,
        heading: String,
        search_query: String,
    },
    VoiceControl {
        listening: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub header: HeaderView,
    pub main: Vec<Section>,
}

impl PageView {
    pub fn products_heading(&self) -> Option<&str> {
        self.main.iter().find_map(|section| match section {
            Section::Products { heading, .. } => Some(heading.as_str()),
            _ => None,
        })
    }
}

type PageTasks = Arc<Mutex<JoinSet<CartOutcome>>>;

/// Add-to-cart callback handed to the product grid.
///
/// Each call runs as its own task owned by the page; rapid repeated clicks
/// issue independent requests.
#[derive(Clone)]
pub struct CartHandle {
    cart: Arc<CartClient>,
    tasks: PageTasks,
}

impl CartHandle {
    pub fn add(&self, product_id: ProductId) {
        let cart = Arc::clone(&self.cart);
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        // Finished clicks are reaped here so a page that is never settled stays bounded.
        while tasks.try_join_next().is_some() {}
        tasks.spawn(async move { cart.add_to_cart(product_id).await });
        tracing::debug!(product_id = product_id.0, in_flight = tasks.len(), "queued add to cart");
    }
}

/// Callbacks and listening-flag accessors given to the voice-control overlay.
#[derive(Clone)]
pub struct VoiceBindings {
    search: SearchDispatcher,
    navigation: NavigationDispatcher,
    listening: ListeningFlag,
}

impl VoiceBindings {
    pub fn on_search(&self, query: &str) {
        self.search.search(query);
    }

    pub fn on_navigate(&self, path: &str) {
        self.navigation.navigate(path);
    }

    pub fn is_listening(&self) -> bool {
        self.listening.get()
    }

    pub fn set_listening(&self, listening: bool) {
        self.listening.set(listening);
    }

    pub fn dispatch(&self, command: VoiceCommand) {
        match command {
            VoiceCommand::Search(query) => self.on_search(&query),
            VoiceCommand::Navigate(path) => self.on_navigate(&path),
        }
    }
}

pub struct HomePage {
    brand: String,
    search_state: SearchState,
    listening: ListeningFlag,
    cart: CartHandle,
    search: SearchDispatcher,
    navigation: NavigationDispatcher,
}

impl HomePage {
    pub fn new(
        cart: CartClient,
        notifier: Arc<dyn Notifier>,
        router: Arc<dyn Router>,
        viewport: Arc<dyn Viewport>,
    ) -> Self {
        let search_state = SearchState::default();
        Self {
            brand: DEFAULT_BRAND.to_string(),
            search: SearchDispatcher::new(search_state.clone(), notifier, viewport),
            navigation: NavigationDispatcher::new(router),
            search_state,
            listening: ListeningFlag::default(),
            cart: CartHandle {
                cart: Arc::new(cart),
                tasks: Arc::new(Mutex::new(JoinSet::new())),
            },
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    pub fn search_query(&self) -> String {
        self.search_state.query()
    }

    pub fn heading(&self) -> String {
        if self.search_state.is_active() {
            format!("Search Results: {}", self.search_state.query())
        } else {
            "Featured Products".to_string()
        }
    }

    pub fn search(&self, query: &str) {
        self.search.search(query);
    }

    pub fn navigate(&self, path: &str) {
        self.navigation.navigate(path);
    }

    /// Must be called from within a tokio runtime.
    pub fn add_to_cart(&self, product_id: ProductId) {
        self.cart.add(product_id);
    }

    pub fn cart_handle(&self) -> CartHandle {
        self.cart.clone()
    }

    pub fn voice_bindings(&self) -> VoiceBindings {
        VoiceBindings {
            search: self.search.clone(),
            navigation: self.navigation.clone(),
            listening: self.listening.clone(),
        }
    }

    pub fn render(&self) -> PageView {
        PageView {
            header: HeaderView {
                brand: self.brand.clone(),
                actions: vec![HeaderAction::InstallPrompt, HeaderAction::CartDrawer],
            },
            main: vec![
                Section::Hero,
                Section::Products {
                    anchor: PRODUCTS_SECTION.to_string(),
                    heading: self.heading(),
                    search_query: self.search_state.query(),
                },
                Section::VoiceControl {
                    listening: self.listening.get(),
                },
            ],
        }
    }

    /// Waits for the add-to-cart tasks the page still tracks. Tasks already
    /// reaped by a later click are not reported again.
    pub async fn settle(&self) -> Vec<CartOutcome> {
        let mut tasks = self.take_tasks();
        let mut outcomes = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => tracing::warn!("add to cart task did not complete: {err}"),
            }
        }
        outcomes
    }

    /// Drops the page's pending requests; their outcomes are never reported.
    pub fn unmount(&self) {
        let mut tasks = self.take_tasks();
        if !tasks.is_empty() {
            tracing::debug!(tasks = tasks.len(), "aborting add to cart tasks on unmount");
        }
        tasks.abort_all();
    }

    fn take_tasks(&self) -> JoinSet<CartOutcome> {
        let mut guard = self
            .cart
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *guard)
    }
}

impl Drop for HomePage {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
