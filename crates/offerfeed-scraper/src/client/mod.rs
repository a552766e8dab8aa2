//! HTTP client for the offers and store-search endpoints.

mod route;

use std::time::Duration;

use offerfeed_core::StoreSearchSettings;
use reqwest::{Client, StatusCode, Url};

use crate::cancel::CancelToken;
use crate::error::FeedError;
use crate::retry::{retry_until_success, RetryPolicy};

pub use route::ProxyRoute;

const API_KEY_HEADER: &str = "x-netto-api-key";

/// A successful (HTTP 200) response body.
#[derive(Debug, Clone)]
pub struct FeedResponse {
    pub status: u16,
    pub body: String,
    /// Number of attempts it took, including the successful one.
    pub attempts: u32,
}

/// Fetches feed endpoints, reissuing each request until it returns 200 or
/// the [`RetryPolicy`] gives up.
///
/// With a [`ProxyRoute`] configured every attempt goes through a freshly
/// built client carrying a new identity token; otherwise one direct client
/// is reused.
pub struct FeedClient {
    direct: Client,
    user_agent: String,
    proxy: Option<ProxyRoute>,
    policy: RetryPolicy,
    cancel: CancelToken,
}

impl FeedClient {
    /// Creates a direct client with the unbounded default retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::ClientBuild`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(user_agent: &str, direct_timeout_secs: u64) -> Result<Self, FeedError> {
        let direct = Client::builder()
            .http1_only()
            .timeout(Duration::from_secs(direct_timeout_secs))
            .user_agent(user_agent)
            .build()
            .map_err(|source| FeedError::ClientBuild { source })?;
        Ok(Self {
            direct,
            user_agent: user_agent.to_owned(),
            proxy: None,
            policy: RetryPolicy::unbounded(),
            cancel: CancelToken::new(),
        })
    }

    #[must_use]
    pub fn with_proxy(mut self, route: Option<ProxyRoute>) -> Self {
        self.proxy = route;
        self
    }

    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    #[must_use]
    pub fn uses_proxy(&self) -> bool {
        self.proxy.is_some()
    }

    /// GETs `url` with `headers` until the server answers 200.
    ///
    /// Each attempt's status is logged. Timeouts and connection failures count
    /// as failed attempts.
    ///
    /// # Errors
    ///
    /// - [`FeedError::RetriesExhausted`], [`FeedError::DeadlineExceeded`] or
    ///   [`FeedError::Cancelled`] when the policy or caller stops the loop.
    /// - [`FeedError::ClientBuild`] if the proxied client cannot be built.
    pub async fn fetch(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<FeedResponse, FeedError> {
        let endpoint = strip_query(url);

        retry_until_success(&self.policy, &self.cancel, |attempt| {
            let endpoint = endpoint.clone();
            async move {
                let client = match &self.proxy {
                    Some(route) => route.client_for_attempt(&self.user_agent)?,
                    None => self.direct.clone(),
                };

                let mut request = client.get(url);
                for (name, value) in headers {
                    request = request.header(*name, *value);
                }

                let response = match request.send().await {
                    Ok(response) => response,
                    Err(err) => {
                        tracing::warn!(
                            attempt,
                            endpoint = %endpoint,
                            timeout = err.is_timeout(),
                            error = %err,
                            "request failed"
                        );
                        return Err(err.into());
                    }
                };

                let status = response.status();
                tracing::info!(
                    attempt,
                    endpoint = %endpoint,
                    status = status.as_u16(),
                    "Status-Code: {}",
                    status.as_u16()
                );

                if status != StatusCode::OK {
                    return Err(FeedError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: endpoint,
                    });
                }

                let body = response.text().await?;
                Ok(FeedResponse {
                    status: status.as_u16(),
                    body,
                    attempts: attempt,
                })
            }
        })
        .await
    }

    /// Fetches the current offers feed for one store.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::InvalidUrl`] if `offers_url` does not parse, and
    /// otherwise anything [`Self::fetch`] returns.
    pub async fn fetch_offers(
        &self,
        offers_url: &str,
        store_id: &str,
        api_key: &str,
    ) -> Result<FeedResponse, FeedError> {
        let url = Self::offers_url(offers_url, store_id)?;
        self.fetch(&url, &[(API_KEY_HEADER, api_key)]).await
    }

    /// Fetches the store-search listing around the configured coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::InvalidUrl`] if the configured endpoint does not
    /// parse, and otherwise anything [`Self::fetch`] returns.
    pub async fn fetch_store_search(
        &self,
        settings: &StoreSearchSettings,
    ) -> Result<FeedResponse, FeedError> {
        let url = Self::store_search_url(settings)?;
        self.fetch(&url, &[]).await
    }

    fn offers_url(base: &str, store_id: &str) -> Result<String, FeedError> {
        let mut url = parse_endpoint(base)?;
        url.query_pairs_mut().append_pair("store_id", store_id);
        Ok(url.to_string())
    }

    fn store_search_url(settings: &StoreSearchSettings) -> Result<String, FeedError> {
        let mut url = parse_endpoint(&settings.url)?;
        url.query_pairs_mut()
            .append_pair("latitude", &format!("{:.15}", settings.latitude))
            .append_pair("longitude", &format!("{:.15}", settings.longitude))
            .append_pair("dist", &format!("{:.8}", settings.radius_km))
            .append_pair("api_user", &settings.api_user)
            .append_pair("api_token", &settings.api_token)
            .append_pair("user_ip", &settings.user_ip);
        Ok(url.to_string())
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, FeedError> {
    Url::parse(raw).map_err(|e| FeedError::InvalidUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })
}

/// Drops the query string so credentials never reach the logs.
fn strip_query(url: &str) -> String {
    url.split_once('?')
        .map_or(url, |(endpoint, _)| endpoint)
        .to_owned()
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
