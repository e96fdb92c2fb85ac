//! Faults raised by the weathered client.
//!
//! A request that reaches the API and gets a non-2xx answer is not a fault;
//! that comes back as [`ApiResponse::Failure`](crate::response::ApiResponse).
//! What lands here is everything that stopped us from asking or from
//! understanding a successful answer.

use std::fmt;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// A client fault, with optional context and underlying cause
#[derive(Debug)]
pub struct Error {
    /// What went wrong
    pub kind: ErrorKind,
    /// Which operation was running, e.g. `GET https://api.weather.gov/stations/KSEA`
    pub context: Option<String>,
    /// The reqwest, serde_json or url error behind this one
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

/// Fault categories
#[derive(Error, Debug)]
pub enum ErrorKind {
    /// The request never produced a usable answer: DNS, refused or reset
    /// connection, or a body that broke off mid-read
    #[error("network failure{}", .status_code.map(|code| format!(" after HTTP {}", code)).unwrap_or_default())]
    Network {
        /// Status line already received when the failure hit, if any
        status_code: Option<u16>,
    },

    /// No answer within the configured timeout
    #[error("request timed out after {timeout_seconds}s")]
    Timeout {
        /// The timeout that elapsed, in whole seconds
        timeout_seconds: u64,
    },

    /// A station id or other argument refused before sending anything
    #[error("invalid input: {message}")]
    Validation {
        /// Argument name, e.g. `station_id`
        field: Option<String>,
        /// The rejected value
        value: Option<String>,
        message: String,
    },

    /// A 2xx body that is not the JSON shape we asked for
    #[error("could not decode response: {message}")]
    Serialization { message: String },

    /// Unusable base URL or HTTP client setup
    #[error("invalid configuration: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Wrap a kind with no context or cause
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
            source: None,
        }
    }

    /// Prefix the message with the operation that failed
    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Record the underlying cause
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn network(status_code: Option<u16>) -> Self {
        Self::new(ErrorKind::Network { status_code })
    }

    pub fn timeout(timeout_seconds: u64) -> Self {
        Self::new(ErrorKind::Timeout { timeout_seconds })
    }

    pub fn validation<S: Into<String>>(
        message: S,
        field: Option<String>,
        value: Option<String>,
    ) -> Self {
        Self::new(ErrorKind::Validation {
            field,
            value,
            message: message.into(),
        })
    }

    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorKind::Serialization {
            message: message.into(),
        })
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorKind::Configuration {
            message: message.into(),
        })
    }

    /// Whether the same call might succeed if the caller tries again.
    ///
    /// The client itself makes exactly one attempt.
    pub fn is_retryable(&self) -> bool {
        match &self.kind {
            ErrorKind::Network { status_code } => {
                matches!(status_code, None | Some(408) | Some(500..=599))
            }
            ErrorKind::Timeout { .. } => true,
            _ => false,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "{}: ", context)?;
        }

        let kind = self.kind.to_string();
        f.write_str(&kind)?;

        // serde_json and url causes are usually already spelled out in the kind
        if let Some(source) = &self.source {
            let cause = source.to_string();
            if !kind.contains(&cause) {
                write!(f, " (caused by: {})", cause)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let error = if err.is_timeout() {
            Self::timeout(crate::defaults::TIMEOUT.as_secs())
        } else if err.is_builder() {
            Self::configuration("could not build HTTP request")
        } else {
            Self::network(err.status().map(|status| status.as_u16()))
        };
        error.with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string()).with_source(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::configuration(format!("bad URL: {}", err)).with_source(err)
    }
}
