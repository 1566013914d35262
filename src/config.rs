use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// Endpoints, relative to the base URL
pub const SEARCH_PATH: &str = "/api/v1/search";
pub const LOGIN_PATH: &str = "/api/v1/auth/login";
pub const LOGOUT_PATH: &str = "/api/v1/auth/logout";
pub const REGISTER_PATH: &str = "/api/v1/auth/register";
pub const CURRENT_USER_PATH: &str = "/api/v1/users/me";
pub const STRIPE_CHECKOUT_PATH: &str = "/api/checkout/stripe";
pub const PAYPAL_CHECKOUT_PATH: &str = "/api/paypal/create-order";

// Storage keys
pub const BASKET_KEY: &str = "lf_basket";
pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Pages shown on each side of the current page in the pagination window.
pub const PAGE_WINDOW_RADIUS: u32 = 2;

/// Turn a base URL into a filesystem-safe directory name, so every origin
/// gets its own storage scope.
pub fn origin_dir_name(base_url: &str) -> String {
    let stripped = base_url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');
    stripped
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect()
}

pub fn default_storage_dir(base_url: &str) -> PathBuf {
    let origin = origin_dir_name(base_url);
    if let Some(data) = dirs::data_local_dir() {
        data.join("lostfound-client").join(origin)
    } else {
        PathBuf::from(".lostfound-client").join(origin)
    }
}
