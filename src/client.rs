//! Weathered client
//!
//! [`Client`] composes the options, URL builders and response normalizer
//! into the public query operations. Every call is a single GET; nothing
//! is retried and pages are never followed automatically.

use crate::cache::Cache;
use crate::defaults;
use crate::error::{Error, Result};
use crate::options::{ClientOptions, OptionsUpdate};
use crate::request::{self, ObservationQuery};
use crate::response::{self, ApiResponse};
use crate::types::{Observation, ObservationCollection, Station};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use url::Url;

/// Client for the api.weather.gov station endpoints
#[derive(Debug)]
pub struct Client {
    options: ClientOptions,
    http_client: HttpClient,
    stations: RwLock<Cache<Station>>,
}

impl Client {
    /// Create a client with default options
    pub fn new() -> Result<Self> {
        Self::with_options(ClientOptions::default())
    }

    /// Create a client with the given options
    pub fn with_options(options: ClientOptions) -> Result<Self> {
        let http_client = HttpClient::builder()
            .build()
            .map_err(|e| Error::configuration("Failed to build HTTP client").with_source(e))?;

        log::info!("Initialized weathered client for {}", options.base_url);
        Ok(Self {
            options,
            http_client,
            stations: RwLock::new(Cache::new()),
        })
    }

    /// Current options snapshot
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Shallow-merge `update` into the current options.
    ///
    /// Changing the base URL empties the station cache, since cached
    /// stations belong to the previous host.
    pub fn set_options(&mut self, update: OptionsUpdate) {
        let previous_base = self.options.base_url.clone();
        self.options.merge(update);

        if self.options.base_url != previous_base {
            log::debug!(
                "Base URL changed from {} to {}, clearing station cache",
                previous_base,
                self.options.base_url
            );
            self.stations.get_mut().clear();
        }
    }

    /// Fetch station metadata, e.g. for `KSEA`.
    ///
    /// Successful lookups are memoized per client under the id as given.
    /// An unknown station comes back as [`ApiResponse::Failure`] with
    /// status 404.
    pub async fn get_station_by_station_id(&self, station_id: &str) -> Result<ApiResponse<Station>> {
        let url = request::station_url(&self.options.base_url, station_id)?;

        if let Some(station) = self.stations.read().await.get(station_id) {
            log::debug!("Station cache hit for {}", station_id);
            return Ok(ApiResponse::Success(station.clone()));
        }

        let response: ApiResponse<Station> = self.get_json(url).await?;
        if let ApiResponse::Success(station) = &response {
            self.stations.write().await.set(station_id, station.clone());
        }
        Ok(response)
    }

    /// Fetch one page of observations for a station.
    ///
    /// To page through results, read
    /// [`ObservationCollection::next_cursor`] from the returned page and
    /// pass it back with [`ObservationQuery::with_cursor`]. Issue pages one
    /// after another; concurrent page requests have no ordering guarantee.
    pub async fn get_station_observations(
        &self,
        station_id: &str,
        query: &ObservationQuery,
    ) -> Result<ApiResponse<ObservationCollection>> {
        let url = request::observations_url(&self.options.base_url, station_id, query)?;
        self.get_json(url).await
    }

    /// Fetch the most recent observation for a station
    pub async fn get_latest_observation(&self, station_id: &str) -> Result<ApiResponse<Observation>> {
        let url = request::latest_observation_url(&self.options.base_url, station_id)?;
        self.get_json(url).await
    }

    /// Drop every memoized station
    pub async fn clear_station_cache(&self) {
        self.stations.write().await.clear();
    }

    /// Number of memoized stations
    pub async fn cached_station_count(&self) -> usize {
        self.stations.read().await.len()
    }

    /// Send a GET and normalize the answer
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<ApiResponse<T>> {
        log::debug!("GET {}", url);

        let http_response = self
            .http_client
            .get(url.clone())
            .header(USER_AGENT, &self.options.user_agent)
            .header(ACCEPT, defaults::ACCEPT)
            .timeout(self.options.timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(e, &url))?;

        let status = http_response.status().as_u16();
        let body = http_response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e, &url))?;

        response::normalize(status, &body).map_err(|e| e.with_context(format!("Decoding {}", url)))
    }

    fn transport_error(&self, err: reqwest::Error, url: &Url) -> Error {
        let error = if err.is_timeout() {
            Error::timeout(self.options.timeout.as_secs()).with_source(err)
        } else {
            Error::from(err)
        };
        error.with_context(format!("GET {}", url))
    }
}
