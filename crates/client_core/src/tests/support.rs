use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router as HttpRouter};
use shared::{
    domain::{ProductId, SessionId},
    protocol::{CartLineRequest, CART_ROUTE},
};
use tokio::{net::TcpListener, sync::mpsc};
use url::Url;

use crate::{
    CartClient, Notice, Notifier, QueryCache, Router, ScrollOptions, SessionProvider, Viewport,
};

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notices lock").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().expect("notices lock").push(notice);
    }
}

#[derive(Default)]
pub struct RecordingCache {
    pub keys: Mutex<Vec<String>>,
}

impl RecordingCache {
    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().expect("keys lock").clone()
    }
}

impl QueryCache for RecordingCache {
    fn invalidate(&self, key: &str) {
        self.keys.lock().expect("keys lock").push(key.to_string());
    }
}

#[derive(Default)]
pub struct RecordingRouter {
    pub paths: Mutex<Vec<String>>,
}

impl RecordingRouter {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().expect("paths lock").clone()
    }
}

impl Router for RecordingRouter {
    fn navigate_to(&self, path: &str) {
        self.paths.lock().expect("paths lock").push(path.to_string());
    }
}

pub struct RecordingViewport {
    rendered: bool,
    pub scrolls: Mutex<Vec<(String, ScrollOptions)>>,
}

impl RecordingViewport {
    pub fn rendered() -> Self {
        Self {
            rendered: true,
            scrolls: Mutex::new(Vec::new()),
        }
    }

    pub fn detached() -> Self {
        Self {
            rendered: false,
            scrolls: Mutex::new(Vec::new()),
        }
    }

    pub fn scrolls(&self) -> Vec<(String, ScrollOptions)> {
        self.scrolls.lock().expect("scrolls lock").clone()
    }
}

impl Viewport for RecordingViewport {
    fn scroll_into_view(&self, section: &str, options: ScrollOptions) -> bool {
        self.scrolls
            .lock()
            .expect("scrolls lock")
            .push((section.to_string(), options));
        self.rendered
    }
}

pub struct FailingSession;

#[async_trait]
impl SessionProvider for FailingSession {
    async fn session_id(&self) -> Result<SessionId> {
        Err(anyhow!("no authenticated session"))
    }
}

/// Fake cart API: replies per product id, defaulting to 201.
#[derive(Clone, Default)]
pub struct CartServerConfig {
    pub statuses: HashMap<i64, StatusCode>,
    pub delay: Option<Duration>,
}

#[derive(Clone)]
struct CartServerState {
    config: CartServerConfig,
    received: mpsc::UnboundedSender<CartLineRequest>,
}

async fn handle_add_line(
    State(state): State<CartServerState>,
    Json(line): Json<CartLineRequest>,
) -> StatusCode {
    let status = state
        .config
        .statuses
        .get(&line.product_id.0)
        .copied()
        .unwrap_or(StatusCode::CREATED);
    let _ = state.received.send(line);
    if let Some(delay) = state.config.delay {
        tokio::time::sleep(delay).await;
    }
    status
}

pub async fn spawn_cart_server(
    config: CartServerConfig,
) -> Result<(Url, mpsc::UnboundedReceiver<CartLineRequest>)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (received, rx) = mpsc::unbounded_channel();
    let app = HttpRouter::new()
        .route(CART_ROUTE, post(handle_add_line))
        .with_state(CartServerState { config, received });
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((Url::parse(&format!("http://{addr}"))?, rx))
}

/// Base URL of a port nothing listens on.
pub async fn unreachable_base() -> Result<Url> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(Url::parse(&format!("http://{addr}"))?)
}

pub struct Harness {
    pub cart: CartClient,
    pub cache: Arc<RecordingCache>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn cart_harness(api_base: &Url, session: Arc<dyn SessionProvider>) -> Harness {
    let cache = Arc::new(RecordingCache::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let cart = CartClient::new(api_base, session, cache.clone(), notifier.clone())
        .expect("cart client");
    Harness {
        cart,
        cache,
        notifier,
    }
}

pub fn product(id: i64) -> ProductId {
    ProductId(id)
}
