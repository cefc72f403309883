use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Base URL of the storefront REST API, e.g. `"https://api.example.com"`.
    pub api_url: String,
    pub env: Environment,
    pub log_level: String,
    /// File backing the persisted cart.
    pub cart_path: PathBuf,
    /// ISO 4217 code sent with every order, e.g. `"INR"`.
    pub currency: String,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    /// Script the payment widget is loaded from.
    pub payment_script_url: String,
    /// Merchant name shown inside the payment widget.
    pub store_name: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_url", &redact_userinfo(&self.api_url))
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("cart_path", &self.cart_path)
            .field("currency", &self.currency)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("payment_script_url", &self.payment_script_url)
            .field("store_name", &self.store_name)
            .finish()
    }
}

/// Masks `user:pass@` credentials embedded in a URL.
fn redact_userinfo(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_owned();
    };
    let host_end = rest.find('/').unwrap_or(rest.len());
    match rest[..host_end].rfind('@') {
        Some(at) => format!("{scheme}://[redacted]@{}", &rest[at + 1..]),
        None => url.to_owned(),
    }
}
