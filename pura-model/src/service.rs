//! The abstract `Service` capability and the transport session it runs over.

use async_trait::async_trait;

use crate::compound::{CompoundIdentifier, CompoundIdentifierKind};
use crate::error::ServiceResult;

/// The shared transport handle passed to every adapter call within a batch.
///
/// One `Session` is created per batch and shared read-only by every task in
/// that batch; it is released at end-of-batch. Wraps a pooled
/// [`reqwest::Client`] — the connection pool is the only mutable state
/// shared between tasks, and it is managed entirely by `reqwest`.
#[derive(Debug, Clone)]
pub struct Session {
    client: reqwest::Client,
}

impl Session {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

/// Capability exposed by every chemistry-data provider adapter.
///
/// Service descriptors are immutable once constructed and freely shared
/// across tasks (`Send + Sync`); no adapter holds process-wide mutable
/// state.
#[async_trait]
pub trait Service: Send + Sync {
    /// A short identity used in logs and error messages.
    fn name(&self) -> &str;

    /// The identifier kinds this service accepts as input.
    fn supported_inputs(&self) -> &[CompoundIdentifierKind];

    /// The identifier kinds this service can produce as output.
    fn supported_outputs(&self) -> &[CompoundIdentifierKind];

    /// Resolve `input` to zero or more identifiers among `desired_kinds`.
    ///
    /// `input.kind` must be one `supported_inputs()` contains, and
    /// `desired_kinds` must intersect `supported_outputs()` — otherwise this
    /// fails synchronously with [`ServiceError::ClientError`](crate::error::ServiceError::ClientError),
    /// never retried. A clean "no match" answer from the provider is
    /// `Ok(vec![])`, not an error.
    async fn resolve_compound(
        &self,
        session: &Session,
        input: &CompoundIdentifier,
        desired_kinds: &[CompoundIdentifierKind],
    ) -> ServiceResult<Vec<CompoundIdentifier>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_default_builds_a_client() {
        let session = Session::default();
        // Merely exercising construction; reqwest::Client has no public
        // introspection beyond this.
        let _ = session.client();
    }
}
