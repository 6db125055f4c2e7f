//! Wire-level error types for the provider adapters in this crate.
//!
//! Adapters speak HTTP and provider-specific fault payloads; this module
//! classifies those failures and converts them into the crate-agnostic
//! [`ServiceError`](pura_model::error::ServiceError) every [`Service`](pura_model::Service)
//! implementation must return.

use pura_model::error::ServiceError;

/// Error type for adapter-internal HTTP/parsing failures, before
/// classification into [`ServiceError`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An HTTP transport error from `reqwest`.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A structured fault returned by the provider (e.g. `PUGREST.BadRequest`).
    #[error("API fault: {code} - {message}")]
    ApiFault { code: String, message: String },

    /// A non-success HTTP status code with the response body.
    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// A JSON deserialization error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Whether a wire-level failure should be retried by the resolver, or is a
/// programming/configuration error that should propagate immediately.
///
/// Not-found is deliberately absent: a clean miss is `Ok(vec![])`, not a
/// variant of this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultClass {
    Transient,
    Client,
}

impl Error {
    /// Classify a PubChem `Fault.Code` string per the provider's fault
    /// taxonomy. Unrecognized codes are treated as transient, matching the
    /// original service's `ServerError`/`Unknown` fallback.
    pub fn classify_pubchem_fault(code: &str) -> FaultClass {
        match code {
            "PUGREST.BadRequest" | "PUGREST.NotAllowed" | "PUGREST.Unimplemented" => {
                FaultClass::Client
            }
            "PUGREST.Timeout" | "PUGREST.ServerBusy" | "PUGREST.ServerError"
            | "PUGREST.Unknown" => FaultClass::Transient,
            _ => FaultClass::Transient,
        }
    }

    /// Convert this error into the classified [`ServiceError`] a [`Service`](pura_model::Service)
    /// adapter returns, tagging it with `service` for logs.
    pub fn into_service_error(self, service: &'static str) -> ServiceError {
        match self {
            Error::Http(e) => ServiceError::transient(service, e.to_string()),
            Error::HttpStatus { status, body } if (500..600).contains(&status) => {
                ServiceError::transient(service, format!("HTTP {status}: {body}"))
            }
            Error::HttpStatus { status, body } => {
                ServiceError::client(service, format!("HTTP {status}: {body}"))
            }
            Error::ApiFault { code, message } => match Self::classify_pubchem_fault(&code) {
                FaultClass::Transient => {
                    ServiceError::transient(service, format!("{code}: {message}"))
                }
                FaultClass::Client => ServiceError::client(service, format!("{code}: {message}")),
            },
            Error::Json(e) => ServiceError::client(service, format!("malformed response: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_not_in_fault_class() {
        // PUGREST.NotFound is handled upstream as Ok(vec![]), never reaches
        // classification; nonetheless confirm every other documented code
        // classifies as expected.
        assert_eq!(
            Error::classify_pubchem_fault("PUGREST.BadRequest"),
            FaultClass::Client
        );
        assert_eq!(
            Error::classify_pubchem_fault("PUGREST.NotAllowed"),
            FaultClass::Client
        );
        assert_eq!(
            Error::classify_pubchem_fault("PUGREST.Unimplemented"),
            FaultClass::Client
        );
        assert_eq!(
            Error::classify_pubchem_fault("PUGREST.Timeout"),
            FaultClass::Transient
        );
        assert_eq!(
            Error::classify_pubchem_fault("PUGREST.ServerBusy"),
            FaultClass::Transient
        );
        assert_eq!(
            Error::classify_pubchem_fault("PUGREST.ServerError"),
            FaultClass::Transient
        );
        assert_eq!(
            Error::classify_pubchem_fault("PUGREST.Unknown"),
            FaultClass::Transient
        );
    }

    #[test]
    fn http_5xx_classifies_transient() {
        let err = Error::HttpStatus {
            status: 503,
            body: String::new(),
        };
        assert!(matches!(
            err.into_service_error("pubchem"),
            ServiceError::Transient { .. }
        ));
    }

    #[test]
    fn http_4xx_classifies_client() {
        let err = Error::HttpStatus {
            status: 400,
            body: String::new(),
        };
        assert!(matches!(
            err.into_service_error("pubchem"),
            ServiceError::ClientError { .. }
        ));
    }
}
