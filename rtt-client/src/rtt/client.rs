//! RTT HTTP client.
//!
//! Provides async methods for querying the Realtime Trains JSON API.
//! Handles basic authentication, bounded concurrency, and conversion to
//! domain types.

use std::fmt;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{NaiveDate, NaiveTime};
use futures::future::try_join_all;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Service, ServiceUid, today};

use super::convert::{convert_search, convert_service};
use super::error::RttError;
use super::types::{SearchResponse, ServiceResponse};
use super::url::{DEFAULT_BASE_URL, QueryBuilder};

/// Default endpoint tag.
const DEFAULT_ENDPOINT: &str = "v1";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Station used to probe whether credentials are accepted.
const AUTH_PROBE_STATION: &str = "HKC";

/// Configuration for the RTT client.
#[derive(Clone)]
pub struct RttConfig {
    /// API username
    pub username: String,
    /// API password
    pub password: String,
    /// Endpoint tag: "v1" by default, "v2" for freight where enabled
    pub endpoint: String,
    /// Base URL for the API (defaults to production RTT)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RttConfig {
    /// Create a new config with the given credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Read credentials from `RTT_USERNAME` and `RTT_PASSWORD`, and the
    /// endpoint tag from `RTT_ENDPOINT` if set.
    pub fn from_env() -> Result<Self, RttError> {
        let var = |name: &str| {
            std::env::var(name).map_err(|_| RttError::Configuration(format!("{name} not set")))
        };

        let mut config = Self::new(var("RTT_USERNAME")?, var("RTT_PASSWORD")?);
        if let Ok(endpoint) = std::env::var("RTT_ENDPOINT") {
            config = config.with_endpoint(endpoint);
        }
        Ok(config)
    }

    /// Set the endpoint tag.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl fmt::Debug for RttConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RttConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("base_url", &self.base_url)
            .field("max_concurrent", &self.max_concurrent)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// RTT API client.
///
/// Credentials are fixed at construction. Cloning is cheap and clones share
/// the connection pool and the request semaphore.
#[derive(Debug, Clone)]
pub struct RttClient {
    http: reqwest::Client,
    query: QueryBuilder,
    semaphore: Arc<Semaphore>,
}

impl RttClient {
    /// Create a new RTT client with the given configuration.
    ///
    /// Fails with [`RttError::Configuration`] if either credential is blank.
    pub fn new(config: RttConfig) -> Result<Self, RttError> {
        if config.username.is_empty() || config.password.is_empty() {
            return Err(RttError::Configuration(
                "username and password must both be set".to_string(),
            ));
        }
        if config.max_concurrent == 0 {
            return Err(RttError::Configuration(
                "max_concurrent must be at least 1".to_string(),
            ));
        }

        let credentials = STANDARD.encode(format!("{}:{}", config.username, config.password));
        let mut auth = HeaderValue::from_str(&format!("Basic {credentials}"))
            .map_err(|_| RttError::Configuration("invalid credential characters".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            query: QueryBuilder::new(&config.base_url, &config.endpoint),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// The path builder this client requests with.
    pub fn query(&self) -> &QueryBuilder {
        &self.query
    }

    /// Create an empty service to pass to [`populate`](Self::populate).
    /// A `None` date means today.
    pub fn service(&self, uid: ServiceUid, date: Option<NaiveDate>) -> Service {
        Service::new(uid, date)
    }

    /// Check that the credentials are accepted.
    pub async fn check_auth(&self) -> Result<(), RttError> {
        let url = self.query.station_search_path(AUTH_PROBE_STATION, None, None, None);
        self.get_json::<SearchResponse>(&url).await?;
        Ok(())
    }

    /// Fetch the raw service document (for debugging/testing).
    pub async fn get_service_raw(
        &self,
        uid: &ServiceUid,
        date: NaiveDate,
    ) -> Result<ServiceResponse, RttError> {
        let url = self.query.service_lookup_path(uid, Some(date));
        self.get_json(&url).await
    }

    /// Fetch and normalize a service's calling pattern into `service`.
    ///
    /// All timetable fields are replaced together. On error `service` is
    /// left as it was.
    pub async fn populate(&self, service: &mut Service) -> Result<(), RttError> {
        let response = self.get_service_raw(service.uid(), service.date()).await?;
        let data = convert_service(&response, service.date())?;
        debug!(
            uid = %service.uid(),
            calling_points = data.calling_points.len(),
            running = data.running,
            "populated service"
        );
        service.apply(data);
        Ok(())
    }

    /// Search for services at a station.
    ///
    /// # Arguments
    ///
    /// * `station` - Station code to search from (not validated locally)
    /// * `date` - Date to search; `None` means today
    /// * `to_station` - Only services that go on to call here
    /// * `at_time` - Search around this time rather than now
    /// * `full_details` - Populate every returned service before returning
    ///
    /// With `full_details`, service lookups run concurrently up to the
    /// configured limit. Results keep the order the API returned them in,
    /// and the first failed lookup fails the whole search.
    pub async fn search(
        &self,
        station: &str,
        date: Option<NaiveDate>,
        to_station: Option<&str>,
        at_time: Option<NaiveTime>,
        full_details: bool,
    ) -> Result<Vec<Service>, RttError> {
        let date = date.unwrap_or_else(today);
        let url = self.query.station_search_path(station, Some(date), to_station, at_time);

        let response: SearchResponse = self.get_json(&url).await?;
        let services = convert_search(&response, date)?;
        debug!(station, count = services.len(), "search returned services");

        if !full_details {
            return Ok(services);
        }

        try_join_all(services.into_iter().map(|mut service| async move {
            self.populate(&mut service).await?;
            Ok::<_, RttError>(service)
        }))
        .await
    }

    /// GET `url` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RttError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| RttError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        debug!(url, "GET");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        debug!(url, status = status.as_u16(), "response");

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(RttError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RttError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| RttError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}
