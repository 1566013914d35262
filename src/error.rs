#[derive(Debug, thiserror::Error)]
pub enum LostFoundError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Login required")]
    LoginRequired,

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Search failed with HTTP status {status}")]
    SearchFailed { status: u16 },

    #[error("Checkout failed: {0}")]
    CheckoutFailed(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl LostFoundError {
    /// True when the caller should route the user to the login flow.
    pub fn is_login_required(&self) -> bool {
        matches!(self, LostFoundError::LoginRequired)
    }
}

pub type Result<T> = std::result::Result<T, LostFoundError>;
