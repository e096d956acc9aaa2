//! `FootballClient` - API-Football client implementation.

use anyhow::{Context, Result, bail};
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::instrument;
use url::Url;

use super::api::LocalFootballApi;
use super::key::ApiKey;
use super::params::FixtureQuery;
use super::types::{ApiResponse, FixtureEntry, FixtureId, TeamLineup};

/// Default base URL for API-Football v3.
const DEFAULT_BASE_URL: &str = "https://v3.football.api-sports.io/";

/// Default value of the host header.
const DEFAULT_API_HOST: &str = "v3.football.api-sports.io";

/// Header carrying the API host.
const HOST_HEADER: &str = "x-rapidapi-host";

/// Header carrying the API key.
const KEY_HEADER: &str = "x-rapidapi-key";

/// API-Football client.
///
/// Issues exactly one request per call. There is no retry, backoff or
/// client-side timeout.
#[derive(Debug)]
pub struct FootballClient {
    /// HTTP client with the auth headers preset.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Host header value.
    api_host: String,
}

/// Builder for `FootballClient`.
#[derive(Debug)]
pub struct FootballClientBuilder {
    base_url: Option<Url>,
    api_key: Option<ApiKey>,
    api_host: Option<String>,
    user_agent: Option<String>,
}

impl FootballClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            api_host: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<ApiKey>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Overrides the host header (default: `v3.football.api-sports.io`).
    #[must_use]
    pub fn api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = Some(host.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set or blank.
    /// - `user_agent` is not set.
    /// - the key or host cannot be used as a header value.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<FootballClient> {
        let api_key = self.api_key.context("api_key is required")?;
        if api_key.is_blank() {
            bail!("api_key is required");
        }
        let user_agent = self.user_agent.context("user_agent is required")?;
        let api_host = self
            .api_host
            .unwrap_or_else(|| String::from(DEFAULT_API_HOST));

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let mut key_value =
            HeaderValue::from_str(api_key.expose()).context("api_key is not a valid header value")?;
        key_value.set_sensitive(true);
        let host_value =
            HeaderValue::from_str(&api_host).context("api_host is not a valid header value")?;

        let mut headers = HeaderMap::new();
        headers.insert(HOST_HEADER, host_value);
        headers.insert(KEY_HEADER, key_value);

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .default_headers(headers)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(FootballClient {
            http_client,
            base_url,
            api_host,
        })
    }
}

impl FootballClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> FootballClientBuilder {
        FootballClientBuilder::new()
    }

    /// Returns the host header value in use.
    #[must_use]
    pub fn api_host(&self) -> &str {
        &self.api_host
    }

    /// Sends an authenticated GET request and decodes the JSON body.
    #[instrument(skip_all)]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let request = self
            .http_client
            .get(url)
            .query(query)
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        tracing::debug!(url = %request.url(), "API-Football request");

        let result = self.http_client.execute(request).await;
        let response = result.with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            bail!("API-Football error (HTTP {status}): {body}");
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;
        tracing::debug!(bytes = body.len(), "API-Football response");

        let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
        let parsed =
            raw_result.with_context(|| format!("failed to decode JSON response: {path}"))?;
        Ok(parsed)
    }
}

impl LocalFootballApi for FootballClient {
    #[instrument(skip_all, fields(team = query.team, league = query.league, season = query.season))]
    async fn latest_fixtures(&self, query: &FixtureQuery) -> Result<ApiResponse<FixtureEntry>> {
        self.get_json("fixtures/", &query.to_latest_query()).await
    }

    #[instrument(skip_all, fields(fixture_id = fixture_id))]
    async fn fixture_by_id(&self, fixture_id: FixtureId) -> Result<ApiResponse<FixtureEntry>> {
        let query = [("id", fixture_id.to_string())];
        self.get_json("fixtures/", &query).await
    }

    #[instrument(skip_all, fields(fixture_id = fixture_id))]
    async fn fixture_lineups(&self, fixture_id: FixtureId) -> Result<ApiResponse<TeamLineup>> {
        let query = [("fixture", fixture_id.to_string())];
        self.get_json("fixtures/lineups", &query).await
    }
}
