use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Client;
use shared::{
    domain::ProductId,
    protocol::{CartLineRequest, CART_QUERY_KEY, CART_ROUTE},
};
use tracing::{error, info};
use url::Url;

use crate::{CartError, CartOutcome, Notice, Notifier, QueryCache, SessionProvider};

const SUCCESS_DESCRIPTION: &str = "Item added to cart successfully";
const FAILURE_DESCRIPTION: &str = "Failed to add item to cart";

pub struct CartClient {
    http: Client,
    cart_url: Url,
    session: Arc<dyn SessionProvider>,
    cache: Arc<dyn QueryCache>,
    notifier: Arc<dyn Notifier>,
}

impl CartClient {
    pub fn new(
        api_base: &Url,
        session: Arc<dyn SessionProvider>,
        cache: Arc<dyn QueryCache>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let cart_url = api_base
            .join(CART_ROUTE)
            .with_context(|| format!("cannot derive cart endpoint from '{api_base}'"))?;
        Ok(Self {
            http: Client::new(),
            cart_url,
            session,
            cache,
            notifier,
        })
    }

    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn cart_url(&self) -> &Url {
        &self.cart_url
    }

    /// Sends one line to the cart API. Only the status is inspected.
    pub async fn submit_line(&self, line: &CartLineRequest) -> Result<(), CartError> {
        let response = self
            .http
            .post(self.cart_url.clone())
            .json(line)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CartError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    /// Adds one unit of `product_id` and reports the result to the shopper.
    ///
    /// Every failure is absorbed here: it is logged and surfaced as a single
    /// destructive notice. The cart query is invalidated only on success.
    pub async fn add_to_cart(&self, product_id: ProductId) -> CartOutcome {
        match self.try_add(product_id).await {
            Ok(()) => {
                info!(product_id = product_id.0, "added item to cart");
                self.cache.invalidate(CART_QUERY_KEY);
                self.notifier
                    .notify(Notice::new("Success", SUCCESS_DESCRIPTION));
                CartOutcome::Added
            }
            Err(err) => {
                error!(product_id = product_id.0, "error adding to cart: {err}");
                self.notifier
                    .notify(Notice::destructive("Error", FAILURE_DESCRIPTION));
                CartOutcome::Failed
            }
        }
    }

    async fn try_add(&self, product_id: ProductId) -> Result<(), CartError> {
        let session_id = self
            .session
            .session_id()
            .await
            .map_err(CartError::Session)?;
        self.submit_line(&CartLineRequest::single(product_id, session_id))
            .await
    }
}

#[cfg(test)]
#[path = "tests/cart_tests.rs"]
mod tests;
