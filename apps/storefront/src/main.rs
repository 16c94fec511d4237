use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{
    CartClient, GeneratedSession, HomePage, SessionProvider, SharedQueryCache,
    StaticSession, VoiceCommand,
};
use shared::domain::{ProductId, SessionId};
use tracing_subscriber::EnvFilter;

mod config;
mod terminal;

use config::{load_settings, Settings, DEFAULT_CONFIG_PATH};
use terminal::{drain_cart_drawer, TerminalNotifier, TerminalRouter, TerminalViewport};

#[derive(Parser, Debug)]
#[command(name = "storefront", version, about = "Storefront home page client")]
struct Cli {
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[arg(long, global = true, help = "Cart API origin, e.g. http://127.0.0.1:5000")]
    api_base: Option<String>,
    #[arg(long, global = true, help = "Shopping session id sent with cart requests")]
    session_id: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add one unit of each product; requests run concurrently.
    AddToCart {
        #[arg(required = true)]
        product_ids: Vec<i64>,
    },
    Search {
        query: String,
    },
    Navigate {
        path: String,
    },
    /// Dispatch a recognized voice transcript, e.g. "search for socks".
    Voice {
        transcript: String,
    },
    /// Print the composed page as JSON.
    Render,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(&cli.config);
    if let Some(v) = cli.api_base {
        settings.api_base = v;
    }
    if let Some(v) = cli.session_id {
        settings.session_id = v;
        settings.generate_session = false;
    }

    let cache = Arc::new(SharedQueryCache::new());
    let mut cart_drawer = cache.subscribe();
    let page = build_page(&settings, cache)?;

    match cli.command {
        Command::AddToCart { product_ids } => {
            let requested = product_ids.len();
            for product_id in product_ids {
                page.add_to_cart(ProductId(product_id));
            }
            page.settle().await;
            // settle() only reports tasks not yet reaped by a later click; the
            // drawer sees one signal per added item.
            let drawer = drain_cart_drawer(&mut cart_drawer);
            for key in &drawer.refreshed {
                println!("cart drawer: '{key}' is stale, refetching");
            }
            if drawer.missed > 0 {
                println!("cart drawer: missed {} refresh signals", drawer.missed);
            }
            let added = drawer.total() as usize;
            tracing::info!(
                added,
                failed = requested.saturating_sub(added),
                "add to cart finished"
            );
        }
        Command::Search { query } => {
            page.search(&query);
            println!("{}", serde_json::to_string_pretty(&page.render())?);
        }
        Command::Navigate { path } => page.navigate(&path),
        Command::Voice { transcript } => {
            let voice = page.voice_bindings();
            voice.set_listening(true);
            match VoiceCommand::from_transcript(&transcript) {
                Some(command) => voice.dispatch(command),
                None => tracing::warn!(%transcript, "unrecognized voice command"),
            }
            voice.set_listening(false);
            println!("{}", page.heading());
        }
        Command::Render => println!("{}", serde_json::to_string_pretty(&page.render())?),
    }

    Ok(())
}

fn build_page(settings: &Settings, cache: Arc<SharedQueryCache>) -> Result<HomePage> {
    let api_base = settings.api_base_url()?;
    let session: Arc<dyn SessionProvider> = if settings.generate_session {
        Arc::new(GeneratedSession::new())
    } else {
        Arc::new(StaticSession::new(SessionId::new(&settings.session_id)))
    };
    let notifier = Arc::new(TerminalNotifier);
    let http = reqwest::Client::builder()
        .timeout(settings.request_timeout())
        .build()?;
    let cart =
        CartClient::new(&api_base, session, cache, notifier.clone())?.with_http_client(http);
    tracing::debug!(cart_url = %cart.cart_url(), "cart client ready");

    Ok(HomePage::new(
        cart,
        notifier,
        Arc::new(TerminalRouter),
        Arc::new(TerminalViewport),
    )
    .with_brand(&settings.brand))
}
