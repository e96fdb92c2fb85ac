//! Normalization of HTTP responses into typed results.
//!
//! A non-2xx answer from the API is an ordinary outcome (unknown station,
//! bad filter) and comes back as [`ApiResponse::Failure`]. Only a 2xx body
//! that fails to decode is raised as an [`Error`](crate::Error).

use crate::error::Result;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Title used when neither the body nor the status code supplies one
pub const GENERIC_TITLE: &str = "HTTP Error";

/// Problem details returned by the API for a non-2xx status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{status} {title}: {detail}")]
pub struct ApiProblem {
    /// HTTP status code
    pub status: u16,
    /// Short summary, e.g. `Not Found`
    pub title: String,
    /// Human-readable explanation
    pub detail: String,
    /// Problem type URI
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub problem_type: Option<String>,
    /// Request instance URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// Server correlation id, useful when reporting issues upstream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

impl ApiProblem {
    /// A problem carrying only what the status code implies
    pub fn from_status(status: u16) -> Self {
        Self {
            status,
            title: canonical_title(status).to_string(),
            detail: format!("Request failed with status {}", status),
            problem_type: None,
            instance: None,
            correlation_id: None,
        }
    }

    /// Build from an error body, filling gaps from the status code.
    ///
    /// The body does not have to be JSON; plain text becomes the detail.
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        let mut problem = Self::from_status(status);

        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(fields)) => {
                if let Some(code) = fields
                    .get("status")
                    .and_then(Value::as_u64)
                    .and_then(|code| u16::try_from(code).ok())
                {
                    problem.status = code;
                }
                if let Some(title) = non_empty_str(fields.get("title")) {
                    problem.title = title;
                }
                if let Some(detail) = non_empty_str(fields.get("detail")) {
                    problem.detail = detail;
                }
                problem.problem_type = non_empty_str(fields.get("type"));
                problem.instance = non_empty_str(fields.get("instance"));
                problem.correlation_id = non_empty_str(fields.get("correlationId"));
            }
            Ok(_) => {}
            Err(_) => {
                let text = String::from_utf8_lossy(body);
                let text = text.trim();
                if !text.is_empty() {
                    problem.detail = text.to_string();
                }
            }
        }

        problem
    }

    /// Whether this is a 404
    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND.as_u16()
    }
}

/// Either the decoded success payload or the API's problem report
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    /// 2xx response decoded into `T`
    Success(T),
    /// Non-2xx response
    Failure(ApiProblem),
}

impl<T> ApiResponse<T> {
    /// Whether the API answered with a 2xx status
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success(_))
    }

    /// Whether the API answered with a non-2xx status
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The payload, if successful
    pub fn success(self) -> Option<T> {
        match self {
            ApiResponse::Success(value) => Some(value),
            ApiResponse::Failure(_) => None,
        }
    }

    /// The problem report, if the request failed
    pub fn problem(&self) -> Option<&ApiProblem> {
        match self {
            ApiResponse::Success(_) => None,
            ApiResponse::Failure(problem) => Some(problem),
        }
    }

    /// Convert into a standard `Result`
    pub fn into_result(self) -> std::result::Result<T, ApiProblem> {
        match self {
            ApiResponse::Success(value) => Ok(value),
            ApiResponse::Failure(problem) => Err(problem),
        }
    }

    /// Map the success payload
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiResponse<U> {
        match self {
            ApiResponse::Success(value) => ApiResponse::Success(f(value)),
            ApiResponse::Failure(problem) => ApiResponse::Failure(problem),
        }
    }
}

/// Interpret a status code and raw body.
///
/// 2xx bodies are decoded as `T` with no reshaping; a decode failure is a
/// serialization fault. Every other status yields [`ApiResponse::Failure`].
pub fn normalize<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<ApiResponse<T>> {
    if (200..300).contains(&status) {
        let payload = serde_json::from_slice(body)?;
        return Ok(ApiResponse::Success(payload));
    }

    let problem = ApiProblem::from_body(status, body);
    log::warn!(
        "API answered {} {}: {}",
        problem.status,
        problem.title,
        problem.detail
    );
    Ok(ApiResponse::Failure(problem))
}

fn canonical_title(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or(GENERIC_TITLE)
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use assert_matches::assert_matches;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Payload {
        name: String,
    }

    #[test]
    fn test_success_is_decoded() {
        let response: ApiResponse<Payload> = normalize(200, br#"{"name":"KSEA"}"#).unwrap();
        assert_eq!(
            response,
            ApiResponse::Success(Payload {
                name: "KSEA".to_string()
            })
        );
    }

    #[test]
    fn test_malformed_success_body_is_a_fault() {
        let err = normalize::<Payload>(200, b"<html>oops</html>").unwrap_err();
        assert_matches!(err.kind, ErrorKind::Serialization { .. });
    }

    #[test]
    fn test_problem_fields_taken_from_body() {
        let body = br#"{
            "correlationId": "1a2b3c",
            "title": "Not Found",
            "type": "https://api.weather.gov/problems/NotFound",
            "status": 404,
            "detail": "Observation station not found",
            "instance": "https://api.weather.gov/requests/1a2b3c"
        }"#;
        let response: ApiResponse<Payload> = normalize(404, body).unwrap();
        let problem = response.problem().unwrap();

        assert_eq!(problem.status, 404);
        assert_eq!(problem.title, "Not Found");
        assert_eq!(problem.detail, "Observation station not found");
        assert_eq!(problem.correlation_id.as_deref(), Some("1a2b3c"));
        assert_eq!(
            problem.problem_type.as_deref(),
            Some("https://api.weather.gov/problems/NotFound")
        );
        assert!(problem.is_not_found());
    }

    #[test]
    fn test_problem_synthesized_from_status() {
        let response: ApiResponse<Payload> = normalize(503, b"{}").unwrap();
        assert_eq!(
            response.problem(),
            Some(&ApiProblem {
                status: 503,
                title: "Service Unavailable".to_string(),
                detail: "Request failed with status 503".to_string(),
                problem_type: None,
                instance: None,
                correlation_id: None,
            })
        );
    }

    #[test]
    fn test_problem_from_plain_text_body() {
        let response: ApiResponse<Payload> = normalize(502, b"  upstream connect error \n").unwrap();
        let problem = response.problem().unwrap();
        assert_eq!(problem.title, "Bad Gateway");
        assert_eq!(problem.detail, "upstream connect error");
    }

    #[test]
    fn test_problem_with_unknown_status() {
        let problem = ApiProblem::from_body(599, b"");
        assert_eq!(problem.status, 599);
        assert_eq!(problem.title, GENERIC_TITLE);
        assert_eq!(problem.detail, "Request failed with status 599");
    }

    #[test]
    fn test_partial_body_keeps_fallbacks() {
        let problem = ApiProblem::from_body(400, br#"{"title":"","detail":"Parameter \"limit\" is invalid"}"#);
        assert_eq!(problem.status, 400);
        assert_eq!(problem.title, "Bad Request");
        assert_eq!(problem.detail, "Parameter \"limit\" is invalid");
    }

    #[test]
    fn test_non_success_redirect_is_a_problem() {
        let response: ApiResponse<Payload> = normalize(301, b"").unwrap();
        assert!(response.is_failure());
        assert_eq!(response.problem().map(|p| p.status), Some(301));
    }

    #[test]
    fn test_into_result_and_map() {
        let ok: ApiResponse<u32> = ApiResponse::Success(2);
        assert_eq!(ok.map(|v| v * 2).into_result(), Ok(4));

        let failed: ApiResponse<u32> = ApiResponse::Failure(ApiProblem::from_status(404));
        let err = failed.into_result().unwrap_err();
        assert_eq!(err.to_string(), "404 Not Found: Request failed with status 404");
    }
}
