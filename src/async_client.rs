//! Async wrapper around [`LostFoundClient`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all client operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free. The
//! client sits behind a [`Mutex`], so operations never interleave: a page
//! change issued after a search always observes that search's result.
//!
//! # Example
//!
//! ```no_run
//! use lostfound_client::AsyncLostFoundClient;
//! use lostfound_client::query::QuickSearchType;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = AsyncLostFoundClient::builder()
//!         .base_url("https://lost.example.com")
//!         .build()
//!         .await
//!         .unwrap();
//!
//!     let page = client
//!         .run(|c| c.search().quick_search("keys", QuickSearchType::Found))
//!         .await
//!         .unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config;
use crate::error::{LostFoundError, Result};
use crate::models::SearchResultPage;
use crate::LostFoundClient;

// ---------------------------------------------------------------------------
// AsyncLostFoundClientBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncLostFoundClient`].
pub struct AsyncLostFoundClientBuilder {
    base_url: String,
    storage_dir: Option<PathBuf>,
    timeout: Duration,
}

impl Default for AsyncLostFoundClientBuilder {
    fn default() -> Self {
        Self {
            base_url: config::DEFAULT_BASE_URL.to_string(),
            storage_dir: None,
            timeout: config::DEFAULT_TIMEOUT,
        }
    }
}

impl AsyncLostFoundClientBuilder {
    /// Set the backend origin.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Set a custom storage directory.
    pub fn storage_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the async client on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncLostFoundClient> {
        tokio::task::spawn_blocking(move || {
            let mut builder = LostFoundClient::builder()
                .base_url(&self.base_url)
                .timeout(self.timeout);
            if let Some(dir) = self.storage_dir {
                builder = builder.storage_dir(dir);
            }
            Ok(AsyncLostFoundClient::from_client(builder.build()?))
        })
        .await
        .map_err(|e| LostFoundError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncLostFoundClient
// ---------------------------------------------------------------------------

/// Async wrapper around [`LostFoundClient`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying client is protected by a
/// [`Mutex`] since it uses `RefCell` internally.
#[derive(Clone)]
pub struct AsyncLostFoundClient {
    inner: Arc<Mutex<LostFoundClient>>,
}

impl AsyncLostFoundClient {
    /// Create a new builder for configuring the async client.
    pub fn builder() -> AsyncLostFoundClientBuilder {
        AsyncLostFoundClientBuilder::default()
    }

    /// Wrap an already configured client.
    pub fn from_client(client: LostFoundClient) -> Self {
        Self {
            inner: Arc::new(Mutex::new(client)),
        }
    }

    /// Run a sync client operation on the blocking thread pool.
    ///
    /// The closure receives a `&LostFoundClient` and returns a `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&LostFoundClient) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let client = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = client
                .lock()
                .map_err(|_| LostFoundError::InvalidArgument("Client lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| LostFoundError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Whether a usable auth token is stored.
    pub async fn is_session_active(&self) -> Result<bool> {
        self.run(|c| Ok(c.session().is_active())).await
    }

    /// Move the active search to `page`.
    pub async fn go_to_page(&self, page: u32) -> Result<bool> {
        self.run(move |c| c.search().go_to_page(page)).await
    }

    /// The currently held result page.
    pub async fn results(&self) -> Result<SearchResultPage> {
        self.run(|c| Ok(c.search().results())).await
    }

    /// Add one unit of a product to the basket.
    pub async fn add_to_basket(&self, code: &str, name: &str, price: f64) -> Result<u32> {
        let code = code.to_string();
        let name = name.to_string();
        self.run(move |c| c.basket().add(&code, &name, price)).await
    }
}
