/// Coordinates and credentials for the store-search endpoint.
#[derive(Clone, PartialEq)]
pub struct StoreSearchSettings {
    pub url: String,
    pub api_user: String,
    pub api_token: String,
    pub user_ip: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
}

/// Anonymizing route through a local SOCKS5 proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySettings {
    pub enabled: bool,
    /// `host:port` of the SOCKS5 listener.
    pub host: String,
    /// Base username; the per-request identity token becomes the password.
    pub user: String,
    pub timeout_secs: u64,
}

/// Retry policy knobs. `max_attempts == 0` means "until success".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub backoff_base_ms: u64,
    pub max_delay_ms: u64,
    pub deadline_secs: Option<u64>,
}

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub user_agent: String,
    pub offers_url: String,
    pub api_key: String,
    pub store_search: StoreSearchSettings,
    pub proxy: ProxySettings,
    pub direct_timeout_secs: u64,
    pub retry: RetrySettings,
}

impl std::fmt::Debug for StoreSearchSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreSearchSettings")
            .field("url", &self.url)
            .field("api_user", &self.api_user)
            .field("api_token", &"[redacted]")
            .field("user_ip", &self.user_ip)
            .field("latitude", &self.latitude)
            .field("longitude", &self.longitude)
            .field("radius_km", &self.radius_km)
            .finish()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("user_agent", &self.user_agent)
            .field("offers_url", &self.offers_url)
            .field("api_key", &"[redacted]")
            .field("store_search", &self.store_search)
            .field("proxy", &self.proxy)
            .field("direct_timeout_secs", &self.direct_timeout_secs)
            .field("retry", &self.retry)
            .finish()
    }
}
