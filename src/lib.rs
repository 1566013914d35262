//! Lost & Found client for Rust.
//!
//! Holds the local state of a marketplace user (auth token, shop basket,
//! active search and its result page) and keeps it in sync with the
//! marketplace backend and a durable per-origin key-value store.
//!
//! # Quick start
//!
//! ```no_run
//! use lostfound_client::LostFoundClient;
//! use lostfound_client::query::QuickSearchType;
//!
//! let client = LostFoundClient::builder()
//!     .base_url("https://lost.example.com")
//!     .build()
//!     .unwrap();
//!
//! client.session().login("jane@example.com", "hunter2").unwrap();
//!
//! // Search for lost wallets
//! let page = client.search().quick_search("wallet", QuickSearchType::Lost).unwrap();
//!
//! // Fill the basket and check out
//! client.basket().add("TAG-01", "Smart tag", 9.99).unwrap();
//! let redirect = client
//!     .checkout()
//!     .begin(lostfound_client::CheckoutProvider::Stripe)
//!     .unwrap();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod basket;
pub mod checkout;
pub mod config;
pub mod error;
pub mod models;
pub mod pagination;
pub mod query;
pub mod search;
pub mod session;
pub mod storage;
pub mod transport;

#[cfg(feature = "async")]
pub use async_client::AsyncLostFoundClient;
pub use basket::{Basket, BasketState};
pub use checkout::{Checkout, CheckoutProvider};
pub use error::{LostFoundError, Result};
pub use pagination::{PageLink, Pagination};
pub use query::{SearchParams, SearchParamsBuilder};
pub use search::{Search, SearchState};
pub use session::{RegistrationForm, Session};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use transport::{HttpReply, HttpTransport, Transport};

use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// LostFoundClientBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`LostFoundClient`].
///
/// Use [`LostFoundClient::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](LostFoundClientBuilder::build).
pub struct LostFoundClientBuilder {
    base_url: String,
    storage_dir: Option<PathBuf>,
    timeout: Duration,
    storage: Option<Box<dyn KeyValueStore>>,
    transport: Option<Box<dyn Transport>>,
}

impl Default for LostFoundClientBuilder {
    fn default() -> Self {
        Self {
            base_url: config::DEFAULT_BASE_URL.to_string(),
            storage_dir: None,
            timeout: config::DEFAULT_TIMEOUT,
            storage: None,
            transport: None,
        }
    }
}

impl LostFoundClientBuilder {
    /// Set the backend origin. Defaults to `http://localhost:5000`.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Set a custom storage directory.
    ///
    /// If not set, a per-origin directory under the platform's local data
    /// directory is used (e.g. `~/.local/share/lostfound-client/<origin>` on
    /// Linux).
    pub fn storage_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a custom key-value store instead of the file store.
    pub fn storage(mut self, storage: Box<dyn KeyValueStore>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Use a custom transport instead of the `reqwest` one.
    pub fn transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client, opening the storage directory if needed.
    ///
    /// No network traffic happens here.
    pub fn build(self) -> Result<LostFoundClient> {
        let storage = match self.storage {
            Some(storage) => storage,
            None => {
                let dir = self
                    .storage_dir
                    .unwrap_or_else(|| config::default_storage_dir(&self.base_url));
                Box::new(FileStore::new(dir)?)
            }
        };
        let transport = match self.transport {
            Some(transport) => transport,
            None => Box::new(HttpTransport::new(&self.base_url, self.timeout)),
        };
        Ok(LostFoundClient {
            base_url: self.base_url,
            storage,
            transport,
            search: RefCell::new(SearchState::default()),
        })
    }
}

// ---------------------------------------------------------------------------
// LostFoundClient
// ---------------------------------------------------------------------------

/// The main entry point.
///
/// Owns the storage, the transport and the search state, and exposes
/// domain interfaces as lightweight borrowing wrappers.
///
/// Created via [`LostFoundClient::builder()`].
pub struct LostFoundClient {
    base_url: String,
    storage: Box<dyn KeyValueStore>,
    transport: Box<dyn Transport>,
    search: RefCell<SearchState>,
}

impl LostFoundClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> LostFoundClientBuilder {
        LostFoundClientBuilder::default()
    }

    /// Access the session gate and token bookkeeping.
    pub fn session(&self) -> Session<'_> {
        Session::new(self.storage.as_ref(), self.transport.as_ref())
    }

    /// Access the persisted shop basket.
    pub fn basket(&self) -> Basket<'_> {
        Basket::new(self.storage.as_ref(), self.session())
    }

    /// Access search submission, pagination and the held result page.
    pub fn search(&self) -> Search<'_> {
        Search::new(self.session(), self.transport.as_ref(), &self.search)
    }

    /// Access checkout for the current basket.
    pub fn checkout(&self) -> Checkout<'_> {
        Checkout::new(self.basket(), self.transport.as_ref())
    }

    /// Backend origin this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Return a reference to the underlying key-value store.
    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for LostFoundClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LostFoundClient(base_url={}, session_active={})",
            self.base_url,
            self.session().is_active()
        )
    }
}
