//! Checkout redirects for the shop basket.
//!
//! The basket is posted to the payment provider's order-creation endpoint,
//! which answers with the URL the user must be sent to. Checkout never
//! modifies the basket.

use std::fmt;

use serde::Deserialize;
use serde_json::json;

use crate::basket::Basket;
use crate::config;
use crate::error::{LostFoundError, Result};
use crate::transport::Transport;

/// Supported payment providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutProvider {
    Stripe,
    Paypal,
}

impl CheckoutProvider {
    pub fn path(&self) -> &'static str {
        match self {
            CheckoutProvider::Stripe => config::STRIPE_CHECKOUT_PATH,
            CheckoutProvider::Paypal => config::PAYPAL_CHECKOUT_PATH,
        }
    }
}

impl fmt::Display for CheckoutProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutProvider::Stripe => write!(f, "Stripe"),
            CheckoutProvider::Paypal => write!(f, "PayPal"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct CheckoutResponse {
    url: Option<String>,
    approve_url: Option<String>,
}

impl CheckoutResponse {
    fn redirect(self, provider: CheckoutProvider) -> Option<String> {
        let url = match provider {
            CheckoutProvider::Stripe => self.url,
            CheckoutProvider::Paypal => self.approve_url,
        };
        url.filter(|u| !u.is_empty())
    }
}

/// Checkout interface borrowing the client's basket and transport.
pub struct Checkout<'a> {
    basket: Basket<'a>,
    transport: &'a dyn Transport,
}

impl<'a> Checkout<'a> {
    pub fn new(basket: Basket<'a>, transport: &'a dyn Transport) -> Self {
        Self { basket, transport }
    }

    /// Create an order with `provider` and return the redirect URL.
    pub fn begin(&self, provider: CheckoutProvider) -> Result<String> {
        let items = self.basket.lines()?;
        if items.is_empty() {
            return Err(LostFoundError::Validation("Basket is empty.".to_string()));
        }

        let body = json!({ "items": serde_json::to_value(&items)? });
        let reply = self.transport.post_json(provider.path(), None, &body)?;
        if !reply.is_success() {
            tracing::warn!(%provider, status = reply.status, "checkout rejected");
            return Err(LostFoundError::CheckoutFailed(format!(
                "{} init failed",
                provider
            )));
        }

        let data: CheckoutResponse = reply.json().unwrap_or_default();
        match data.redirect(provider) {
            Some(url) => {
                tracing::info!(%provider, %url, "checkout redirect");
                Ok(url)
            }
            None => Err(LostFoundError::CheckoutFailed(format!(
                "{} init failed",
                provider
            ))),
        }
    }
}
