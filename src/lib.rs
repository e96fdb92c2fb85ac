//! # weathered
//!
//! A typed async client for the [api.weather.gov](https://www.weather.gov/documentation/services-web-api)
//! station and observation endpoints.
//!
//! ## Features
//!
//! - **Station metadata** lookups, memoized per client
//! - **Observation queries** with `start`/`end` filtering and cursor pagination
//! - **Problem responses as values**: a 404 for an unknown station is an
//!   [`ApiResponse::Failure`], not an error
//! - **Configurable user agent**, base URL and timeout
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use weathered::{ApiResponse, Client, ObservationQuery, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::new()?;
//!
//!     match client.get_station_by_station_id("KSEA").await? {
//!         ApiResponse::Success(station) => println!("{}", station.properties.name),
//!         ApiResponse::Failure(problem) => println!("lookup failed: {}", problem),
//!     }
//!
//!     let query = ObservationQuery::new().with_start("2024-03-01T00:00:00Z");
//!     if let ApiResponse::Success(page) = client.get_station_observations("KSEA", &query).await? {
//!         println!("{} observations", page.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pagination
//!
//! Pages are requested one at a time by the caller. The cursor for the next
//! page is read from the previous page and passed back verbatim:
//!
//! ```rust,no_run
//! use std::num::NonZeroU32;
//! use weathered::{Client, ObservationQuery, Result};
//!
//! # async fn run() -> Result<()> {
//! let client = Client::new()?;
//! let mut query = ObservationQuery::new().with_limit(NonZeroU32::new(5).unwrap());
//!
//! for _ in 0..3 {
//!     let page = match client.get_station_observations("KSEA", &query).await?.success() {
//!         Some(page) => page,
//!         None => break,
//!     };
//!     println!("{} observations", page.len());
//!
//!     match page.next_cursor() {
//!         Some(cursor) => query = query.with_cursor(cursor),
//!         None => break,
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Operations return `Result<ApiResponse<T>, Error>`. The outer `Err` means
//! the request could not be made or its success body could not be decoded;
//! the API's own refusals arrive inside `Ok`:
//!
//! ```rust,no_run
//! use weathered::{ApiResponse, Client, Error, ErrorKind};
//!
//! # async fn run() -> Result<(), Error> {
//! let client = Client::new()?;
//! match client.get_station_by_station_id("INVALID_STATION").await {
//!     Ok(ApiResponse::Success(station)) => println!("found {}", station.id),
//!     Ok(ApiResponse::Failure(problem)) if problem.is_not_found() => println!("no such station"),
//!     Ok(ApiResponse::Failure(problem)) => println!("API error: {}", problem),
//!     Err(Error { kind: ErrorKind::Timeout { .. }, .. }) => println!("timed out"),
//!     Err(err) => println!("request failed: {}", err),
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod error;
pub mod options;
pub mod request;
pub mod response;
pub mod types;

pub use cache::Cache;
pub use client::Client;
pub use error::{Error, ErrorKind, Result};
pub use options::{ClientOptions, OptionsUpdate};
pub use request::ObservationQuery;
pub use response::{ApiProblem, ApiResponse};
pub use types::{
    Observation, ObservationCollection, ObservationProperties, Pagination, PointGeometry,
    QuantitativeValue, Station, StationProperties,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    /// Default API root
    pub const BASE_URL: &str = "https://api.weather.gov";

    /// Default `User-Agent` header
    pub const USER_AGENT: &str = "weathered package";

    /// Default request timeout
    pub const TIMEOUT: Duration = Duration::from_secs(30);

    /// `Accept` header sent on every request
    pub const ACCEPT: &str = "application/geo+json";
}

/// Initialize logging from `RUST_LOG`
///
/// Call this once at the start of your application to see the client's
/// request and cache logs.
///
/// # Example
///
/// ```rust
/// weathered::init_logging();
/// ```
pub fn init_logging() {
    env_logger::init();
}

/// Get the crate version
pub fn version() -> &'static str {
    VERSION
}

/// Get the crate name
pub fn name() -> &'static str {
    NAME
}
