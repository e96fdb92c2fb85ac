//! URL construction for station and observation endpoints.

use crate::error::{Error, Result};
use std::num::NonZeroU32;
use url::Url;

/// Filters for a station observations request.
///
/// Every field is optional and omitted from the query string when unset.
/// Values are forwarded as given; `start`/`end` ordering is left for the
/// server to judge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservationQuery {
    /// ISO-8601 lower bound, sent verbatim
    pub start: Option<String>,
    /// ISO-8601 upper bound, sent verbatim
    pub end: Option<String>,
    /// Maximum number of features per page
    pub limit: Option<NonZeroU32>,
    /// Opaque pagination token from a previous page's `next` link
    pub cursor: Option<String>,
}

impl ObservationQuery {
    /// A query with no filters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start timestamp
    pub fn with_start<S: Into<String>>(mut self, start: S) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Set the end timestamp
    pub fn with_end<S: Into<String>>(mut self, end: S) -> Self {
        self.end = Some(end.into());
        self
    }

    /// Set the page size
    pub fn with_limit(mut self, limit: NonZeroU32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the pagination cursor
    pub fn with_cursor<S: Into<String>>(mut self, cursor: S) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Whether no filter is set
    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }

    /// Query parameters in wire order, skipping unset fields
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(start) = &self.start {
            pairs.push(("start", start.clone()));
        }
        if let Some(end) = &self.end {
            pairs.push(("end", end.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(cursor) = &self.cursor {
            pairs.push(("cursor", cursor.clone()));
        }
        pairs
    }
}

/// `{base}/stations/{station_id}`
pub fn station_url(base: &Url, station_id: &str) -> Result<Url> {
    let station_id = require_station_id(station_id)?;
    endpoint(base, &["stations", station_id])
}

/// `{base}/stations/{station_id}/observations?{query}`
pub fn observations_url(base: &Url, station_id: &str, query: &ObservationQuery) -> Result<Url> {
    let station_id = require_station_id(station_id)?;
    let mut url = endpoint(base, &["stations", station_id, "observations"])?;

    let pairs = query.query_pairs();
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }
    Ok(url)
}

/// `{base}/stations/{station_id}/observations/latest`
pub fn latest_observation_url(base: &Url, station_id: &str) -> Result<Url> {
    let station_id = require_station_id(station_id)?;
    endpoint(base, &["stations", station_id, "observations", "latest"])
}

/// Pull the `cursor` parameter out of a `next` page link.
///
/// Returns `None` if the link does not parse or carries no cursor.
pub fn cursor_from_next(next: &str) -> Option<String> {
    let url = match Url::parse(next) {
        Ok(url) => url,
        Err(err) => {
            log::warn!("Ignoring malformed pagination link {:?}: {}", next, err);
            return None;
        }
    };

    url.query_pairs()
        .find(|(key, _)| key == "cursor")
        .map(|(_, value)| value.into_owned())
}

/// Station ids are single path segments. `.` and `..` are dot-segments
/// that URL normalization removes, so they are refused.
fn require_station_id(station_id: &str) -> Result<&str> {
    let message = if station_id.trim().is_empty() {
        "station id must not be empty"
    } else if matches!(station_id, "." | "..") {
        "station id must not be a dot-segment"
    } else {
        return Ok(station_id);
    };

    Err(Error::validation(
        message,
        Some("station_id".to_string()),
        Some(station_id.to_string()),
    ))
}

/// Append escaped path segments to `base`, dropping any query or fragment.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| Error::configuration(format!("Base URL cannot carry a path: {}", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::error::ErrorKind;

    fn base() -> Url {
        Url::parse("https://api.weather.gov").unwrap()
    }

    fn limit(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_station_url() {
        let url = station_url(&base(), "KSEA").unwrap();
        assert_eq!(url.as_str(), "https://api.weather.gov/stations/KSEA");
    }

    #[test]
    fn test_station_id_is_escaped() {
        let url = station_url(&base(), "K/SEA?x").unwrap();
        assert_eq!(url.as_str(), "https://api.weather.gov/stations/K%2FSEA%3Fx");

        let url = station_url(&base(), "INVALID STATION").unwrap();
        assert_eq!(url.path(), "/stations/INVALID%20STATION");
    }

    #[test]
    fn test_base_url_with_path_prefix() {
        let base = Url::parse("http://localhost:1234/proxy/nws/").unwrap();
        let url = station_url(&base, "KSEA").unwrap();
        assert_eq!(url.as_str(), "http://localhost:1234/proxy/nws/stations/KSEA");
    }

    #[test]
    fn test_empty_station_id_rejected() {
        let err = station_url(&base(), "  ").unwrap_err();
        assert_matches!(err.kind, ErrorKind::Validation { field: Some(ref f), .. } if f == "station_id");
    }

    #[test]
    fn test_dot_segment_station_ids_rejected() {
        for id in [".", ".."] {
            let err = station_url(&base(), id).unwrap_err();
            assert_matches!(err.kind, ErrorKind::Validation { value: Some(ref v), .. } if v == id);

            let err = observations_url(&base(), id, &ObservationQuery::new()).unwrap_err();
            assert_matches!(err.kind, ErrorKind::Validation { .. });

            assert!(latest_observation_url(&base(), id).is_err());
        }
    }

    #[test]
    fn test_ids_containing_dots_are_kept() {
        let url = station_url(&base(), "K.SEA").unwrap();
        assert_eq!(url.path(), "/stations/K.SEA");

        let url = station_url(&base(), "...").unwrap();
        assert_eq!(url.path(), "/stations/...");
    }

    #[test]
    fn test_cannot_be_a_base_rejected() {
        let base = Url::parse("mailto:weather@example.com").unwrap();
        let err = station_url(&base, "KSEA").unwrap_err();
        assert_matches!(err.kind, ErrorKind::Configuration { .. });
    }

    #[test]
    fn test_observations_url_without_filters_has_no_query() {
        let url = observations_url(&base(), "KSEA", &ObservationQuery::new()).unwrap();
        assert_eq!(url.as_str(), "https://api.weather.gov/stations/KSEA/observations");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_observations_url_with_all_filters() {
        let query = ObservationQuery::new()
            .with_start("2024-03-01T00:00:00.000Z")
            .with_end("2024-03-01T23:59:59.999Z")
            .with_limit(limit(5))
            .with_cursor("MTcwOTI1");
        let url = observations_url(&base(), "KSEA", &query).unwrap();

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("start".to_string(), "2024-03-01T00:00:00.000Z".to_string()),
                ("end".to_string(), "2024-03-01T23:59:59.999Z".to_string()),
                ("limit".to_string(), "5".to_string()),
                ("cursor".to_string(), "MTcwOTI1".to_string()),
            ]
        );
    }

    #[test]
    fn test_observations_url_omits_unset_filters() {
        let query = ObservationQuery::new().with_limit(limit(10));
        let url = observations_url(&base(), "KSEA", &query).unwrap();
        assert_eq!(url.query(), Some("limit=10"));
    }

    #[test]
    fn test_offset_timestamps_survive_encoding() {
        let query = ObservationQuery::new().with_start("2024-03-01T00:00:00+05:30");
        let url = observations_url(&base(), "KSEA", &query).unwrap();
        assert_eq!(url.query(), Some("start=2024-03-01T00%3A00%3A00%2B05%3A30"));

        let start = url.query_pairs().find(|(k, _)| k == "start").unwrap().1;
        assert_eq!(start, "2024-03-01T00:00:00+05:30");
    }

    #[test]
    fn test_reversed_bounds_pass_through() {
        let query = ObservationQuery::new()
            .with_start("2024-03-02T00:00:00Z")
            .with_end("2024-03-01T00:00:00Z");
        let url = observations_url(&base(), "KSEA", &query).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0].1, "2024-03-02T00:00:00Z");
        assert_eq!(pairs[1].1, "2024-03-01T00:00:00Z");
    }

    #[test]
    fn test_latest_observation_url() {
        let url = latest_observation_url(&base(), "KSEA").unwrap();
        assert_eq!(url.as_str(), "https://api.weather.gov/stations/KSEA/observations/latest");
    }

    #[test]
    fn test_cursor_from_next() {
        let next = "https://api.weather.gov/stations/KSEA/observations?limit=5&cursor=eyJzIjoxNzA5%3D";
        assert_eq!(cursor_from_next(next), Some("eyJzIjoxNzA5=".to_string()));
    }

    #[test]
    fn test_cursor_from_next_missing_or_malformed() {
        assert_eq!(cursor_from_next("https://api.weather.gov/stations/KSEA/observations?limit=5"), None);
        assert_eq!(cursor_from_next("::not a url::"), None);
    }

    #[test]
    fn test_query_is_empty() {
        assert!(ObservationQuery::new().is_empty());
        assert!(!ObservationQuery::new().with_cursor("abc").is_empty());
    }
}
