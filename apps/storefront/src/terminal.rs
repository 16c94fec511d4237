//! Terminal stand-ins for the page's rendering collaborators.

use client_core::{Invalidation, Notice, Notifier, Router, ScrollOptions, Viewport};
use tokio::sync::broadcast::{error::TryRecvError, Receiver};

pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        if notice.is_destructive() {
            eprintln!("[{}] {}", notice.title, notice.description);
        } else {
            println!("[{}] {}", notice.title, notice.description);
        }
    }
}

pub struct TerminalRouter;

impl Router for TerminalRouter {
    fn navigate_to(&self, path: &str) {
        println!("navigate -> {path}");
    }
}

/// The whole page is printed, so every section counts as rendered.
pub struct TerminalViewport;

impl Viewport for TerminalViewport {
    fn scroll_into_view(&self, section: &str, options: ScrollOptions) -> bool {
        tracing::debug!(section, ?options, "scroll into view");
        true
    }
}

/// What the cart drawer saw while the page was busy.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DrawerReport {
    pub refreshed: Vec<String>,
    /// Signals overwritten before the drawer read them.
    pub missed: u64,
}

impl DrawerReport {
    pub fn total(&self) -> u64 {
        self.refreshed.len() as u64 + self.missed
    }
}

/// Reads every queued invalidation. A lagging receiver skips ahead and keeps going.
pub fn drain_cart_drawer(drawer: &mut Receiver<Invalidation>) -> DrawerReport {
    let mut report = DrawerReport::default();
    loop {
        match drawer.try_recv() {
            Ok(invalidation) => report.refreshed.push(invalidation.key),
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "cart drawer fell behind");
                report.missed += skipped;
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
    report
}

#[cfg(test)]
#[path = "tests/terminal_tests.rs"]
mod tests;
