//! Anonymizing route: a local SOCKS5 proxy whose credential changes on
//! every request, so the remote side sees a fresh circuit per attempt.

use std::time::Duration;

use chrono::Timelike;
use offerfeed_core::ProxySettings;
use reqwest::{Client, Proxy};

use crate::error::FeedError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRoute {
    host: String,
    user: String,
    timeout: Duration,
}

impl ProxyRoute {
    #[must_use]
    pub fn new(host: &str, user: &str, timeout_secs: u64) -> Self {
        Self {
            host: host.to_owned(),
            user: user.to_owned(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// `None` when the route is disabled in configuration.
    #[must_use]
    pub fn from_settings(settings: &ProxySettings) -> Option<Self> {
        settings
            .enabled
            .then(|| Self::new(&settings.host, &settings.user, settings.timeout_secs))
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Per-request identity token: minute and second of `at`, `MMSS`.
    #[must_use]
    pub fn identity_token(at: &impl Timelike) -> String {
        format!("{:02}{:02}", at.minute(), at.second())
    }

    /// Proxy URL carrying the identity token for a request issued at `at`.
    #[must_use]
    pub fn proxy_url_at(&self, at: &impl Timelike) -> String {
        format!(
            "socks5://{}:try{}@{}",
            self.user,
            Self::identity_token(at),
            self.host
        )
    }

    /// Builds a one-shot client bound to a fresh identity.
    pub(super) fn client_for_attempt(&self, user_agent: &str) -> Result<Client, FeedError> {
        let proxy_url = self.proxy_url_at(&chrono::Local::now());
        let proxy = Proxy::all(&proxy_url).map_err(|source| FeedError::ClientBuild { source })?;
        Client::builder()
            .http1_only()
            .timeout(self.timeout)
            .user_agent(user_agent)
            .proxy(proxy)
            .build()
            .map_err(|source| FeedError::ClientBuild { source })
    }
}
