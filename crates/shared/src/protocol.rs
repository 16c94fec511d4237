use serde::{Deserialize, Serialize};

use crate::domain::{ProductId, SessionId};

pub const CART_ROUTE: &str = "/api/cart";

/// Query-cache key whose invalidation tells cart views to refetch.
pub const CART_QUERY_KEY: &str = "cart";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineRequest {
    pub product_id: ProductId,
    pub quantity: u32,
    pub session_id: SessionId,
}

impl CartLineRequest {
    /// The home page always adds exactly one unit per click.
    pub fn single(product_id: ProductId, session_id: SessionId) -> Self {
        Self {
            product_id,
            quantity: 1,
            session_id,
        }
    }
}
