//! Error types shared by the resolution engine and its service adapters.
//!
//! Defines the classified error taxonomy from the engine's error handling
//! design: [`ServiceError`] (what an adapter may fail with) and
//! [`ResolverError`] (what the resolver core may fail with in strict mode).
//! Error behavior can be controlled via environment variables:
//!
//! - `PURA_PANIC_ON_ERR=1` — panic instead of returning errors.
//! - `PURA_BACKTRACE_IN_ERR=1` — capture a backtrace in error messages.

mod err_string;

pub use err_string::ErrString;
use std::env;
use std::sync::LazyLock;
use thiserror::Error;

use crate::compound::{CompoundIdentifier, CompoundIdentifierKind};

enum ErrorStrategy {
    Panic,
    WithBacktrace,
    Normal,
}

static ERROR_STRATEGY: LazyLock<ErrorStrategy> = LazyLock::new(|| {
    if env::var("PURA_PANIC_ON_ERR").as_deref() == Ok("1") {
        ErrorStrategy::Panic
    } else if env::var("PURA_BACKTRACE_IN_ERR").as_deref() == Ok("1") {
        ErrorStrategy::WithBacktrace
    } else {
        ErrorStrategy::Normal
    }
});

/// A type alias for `Result<T, ServiceError>`.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// The error a [`Service`](crate::service::Service) adapter may fail with.
///
/// Not-found is deliberately absent: per the service interface contract, a
/// clean "no match" answer is `Ok(vec![])`, never an error.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Connection failures, timeouts, TLS handshake failures, HTTP 5xx, or a
    /// provider-specific "server busy" payload. Retriable by the resolver.
    #[error("transient failure from {service}: {reason}")]
    Transient { service: ErrString, reason: ErrString },

    /// The input kind is unsupported by this service, the desired-kind
    /// intersection is empty, or the provider answered with a malformed-
    /// request class of error (HTTP 4xx other than not-found). Never
    /// retried.
    #[error("client/configuration error from {service}: {reason}")]
    ClientError { service: ErrString, reason: ErrString },
}

impl ServiceError {
    pub fn transient(service: impl Into<ErrString>, reason: impl Into<ErrString>) -> Self {
        Self::Transient {
            service: service.into(),
            reason: reason.into(),
        }
    }

    pub fn client(service: impl Into<ErrString>, reason: impl Into<ErrString>) -> Self {
        Self::ClientError {
            service: service.into(),
            reason: reason.into(),
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}

/// A type alias for `Result<T, ResolverError>`.
pub type ResolverResult<T> = std::result::Result<T, ResolverError>;

/// The error the resolver core may raise in strict (non-silent) mode.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// A service adapter failed with a non-retriable client/configuration
    /// error and the resolver is not running in silent mode.
    #[error("resolution of {input:?} failed: {source}")]
    Client {
        input: CompoundIdentifier,
        #[source]
        source: ServiceError,
    },

    /// Fewer than `quorum` services produced a usable candidate, or no
    /// non-empty intersection existed among those that did.
    #[error(
        "quorum not reached for {input:?}: {agreement_count} of {quorum} services agreed on a candidate in {desired_kinds:?}"
    )]
    QuorumNotReached {
        input: CompoundIdentifier,
        desired_kinds: Vec<CompoundIdentifierKind>,
        quorum: usize,
        agreement_count: usize,
        collected: Vec<Vec<CompoundIdentifier>>,
    },
}
