//! [`DataSource`] backed by the dashboard's JSON API over HTTP.
//!
//! Works natively (CLI) and on `wasm32` (browser fetch). The request timeout
//! is enforced on both: natively by reqwest, in the browser by racing each
//! request against a timer.

use async_trait::async_trait;
use futures::future::{self, Either};
use log::{debug, warn};
use mdash_core::{ChartData, DataSource, FetchError, FetchResult, KpiMap, Route, Year, YearSet};
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme and host of the backend, e.g. `http://localhost:5000`.
    /// Empty means same-origin relative paths.
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct HttpSource {
    client: Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl HttpSource {
    pub fn new(config: ClientConfig) -> FetchResult<Self> {
        let base_url = normalize_base(&config.base_url)?;

        let client = with_timeout(Client::builder(), config.timeout)
            .build()
            .map_err(|e| FetchError::InvalidUrl {
                url: base_url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url,
            timeout: config.timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn url(&self, route: Route<'_>) -> String {
        format!("{}{}", self.base_url, route.path())
    }

    async fn get<T: DeserializeOwned>(&self, route: Route<'_>) -> FetchResult<T> {
        let path = route.path();
        match self.timeout {
            Some(limit) => within(&path, self.fetch(route), timer(limit)).await,
            None => self.fetch(route).await,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, route: Route<'_>) -> FetchResult<T> {
        let path = route.path();
        let url = self.url(route);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| request_error(&path, e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| request_error(&path, e))?;
        decode(&path, status, &body)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn with_timeout(builder: ClientBuilder, timeout: Option<Duration>) -> ClientBuilder {
    match timeout {
        Some(timeout) => builder.timeout(timeout),
        None => builder,
    }
}

#[cfg(target_arch = "wasm32")]
fn with_timeout(builder: ClientBuilder, _timeout: Option<Duration>) -> ClientBuilder {
    builder
}

/// Resolves once `limit` has elapsed. Natively the client's own timeout
/// fires first, so this never does.
#[cfg(not(target_arch = "wasm32"))]
fn timer(_limit: Duration) -> future::Pending<()> {
    future::pending()
}

#[cfg(target_arch = "wasm32")]
fn timer(limit: Duration) -> gloo_timers::future::TimeoutFuture {
    let millis = u32::try_from(limit.as_millis()).unwrap_or(u32::MAX);
    gloo_timers::future::TimeoutFuture::new(millis)
}

/// Race `request` against `deadline`; a deadline that fires first is a
/// [`FetchError::Timeout`] and drops the request.
async fn within<T, R, D>(path: &str, request: R, deadline: D) -> FetchResult<T>
where
    R: Future<Output = FetchResult<T>>,
    D: Future<Output = ()>,
{
    futures::pin_mut!(request, deadline);
    match future::select(request, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => {
            warn!("{} timed out", path);
            Err(FetchError::Timeout {
                path: path.to_string(),
            })
        }
    }
}

/// Strip trailing slashes and reject anything that is not an http(s) origin.
fn normalize_base(base: &str) -> FetchResult<String> {
    let base = base.trim().trim_end_matches('/');
    if base.is_empty() || base.starts_with("http://") || base.starts_with("https://") {
        Ok(base.to_string())
    } else {
        Err(FetchError::InvalidUrl {
            url: base.to_string(),
            message: "expected an http:// or https:// origin".to_string(),
        })
    }
}

fn request_error(path: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            path: path.to_string(),
        }
    } else {
        FetchError::network(path, e)
    }
}

/// Turn a raw response into a typed value or the matching [`FetchError`].
fn decode<T: DeserializeOwned>(path: &str, status: StatusCode, body: &str) -> FetchResult<T> {
    if !status.is_success() {
        warn!("{} returned {}", path, status);
        return Err(FetchError::Status {
            path: path.to_string(),
            status: status.as_u16(),
        });
    }
    serde_json::from_str(body).map_err(|e| FetchError::parse(path, e))
}

#[async_trait(?Send)]
impl DataSource for HttpSource {
    async fn sectors(&self) -> FetchResult<Vec<String>> {
        self.get(Route::Sectors).await
    }

    async fn subsectors(&self, sector: &str) -> FetchResult<Vec<String>> {
        self.get(Route::Subsectors(sector)).await
    }

    async fn components(&self, sector: &str, subsector: &str) -> FetchResult<Vec<String>> {
        self.get(Route::Components(sector, subsector)).await
    }

    async fn units(
        &self,
        sector: &str,
        subsector: &str,
        component: &str,
    ) -> FetchResult<Vec<String>> {
        self.get(Route::Units(sector, subsector, component)).await
    }

    async fn years(&self) -> FetchResult<YearSet> {
        self.get(Route::Years).await
    }

    async fn kpis(&self, sector: &str, subsector: &str, year: Year) -> FetchResult<KpiMap> {
        self.get(Route::Kpis(sector, subsector, year)).await
    }

    async fn chart_data(
        &self,
        sector: &str,
        subsector: &str,
        component: &str,
        unit: &str,
    ) -> FetchResult<ChartData> {
        self.get(Route::ChartData(sector, subsector, component, unit))
            .await
    }
}
