//! The NIH Chemical Identifier Resolver (CIR) adapter.
//!
//! A second, much simpler [`Service`] than [`PubChemService`](crate::client::PubChemService):
//! one plain-text GET per requested representation, no batching, no
//! autocomplete. Demonstrates that the `Service` contract generalizes across
//! adapters of very different shapes.

use async_trait::async_trait;
use pura_model::compound::{CompoundIdentifier, CompoundIdentifierKind};
use pura_model::error::{ServiceError, ServiceResult};
use pura_model::service::{Service, Session};
use std::sync::OnceLock;

pub const CIR_BASE: &str = "https://cactus.nci.nih.gov/chemical/structure";

const SERVICE_NAME: &str = "cir";

const SUPPORTED_KINDS: &[CompoundIdentifierKind] = &[
    CompoundIdentifierKind::Name,
    CompoundIdentifierKind::Smiles,
    CompoundIdentifierKind::Inchi,
    CompoundIdentifierKind::InchiKey,
];

/// Output kind → CIR representation string.
fn representation(kind: CompoundIdentifierKind) -> Option<&'static str> {
    match kind {
        CompoundIdentifierKind::Smiles => Some("smiles"),
        CompoundIdentifierKind::Inchi => Some("stdinchi"),
        CompoundIdentifierKind::InchiKey => Some("stdinchikey"),
        CompoundIdentifierKind::Name => Some("names"),
        _ => None,
    }
}

/// The CIR adapter. CIR autodetects the input structure type from the raw
/// value, so unlike PubChem there is no input-namespace translation table.
#[derive(Debug, Clone)]
pub struct CirService {
    base: String,
}

impl Default for CirService {
    fn default() -> Self {
        Self {
            base: CIR_BASE.to_string(),
        }
    }
}

static DEFAULT_CIR_SERVICE: OnceLock<CirService> = OnceLock::new();

impl CirService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the process-wide default-configured adapter.
    ///
    /// A secondary convenience only, mirroring the teacher's own
    /// `PubChemClient::global_default()` — `Resolver` never reaches for this
    /// itself, every internal construction goes through an explicit
    /// `Vec<Arc<dyn Service>>` passed to `Resolver::new`/`with_config`.
    pub fn global_default() -> &'static CirService {
        DEFAULT_CIR_SERVICE.get_or_init(CirService::default)
    }

    /// Override the base URL, pointing this adapter at a mock server instead
    /// of the real CIR endpoint — see the `wiremock`-backed tests in this
    /// module's `tests` submodule.
    #[doc(hidden)]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    async fn query_representation(
        &self,
        session: &Session,
        value: &str,
        representation: &str,
        kind: CompoundIdentifierKind,
    ) -> ServiceResult<Vec<CompoundIdentifier>> {
        let url = format!(
            "{}/{}/{representation}",
            self.base,
            urlencode(value)
        );
        log::debug!("GET {url}");

        let response = session
            .client()
            .get(&url)
            .send()
            .await
            .map_err(|e| ServiceError::transient(SERVICE_NAME, e.to_string()))?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        let text = response
            .text()
            .await
            .map_err(|e| ServiceError::transient(SERVICE_NAME, e.to_string()))?;
        if status.is_server_error() {
            return Err(ServiceError::transient(
                SERVICE_NAME,
                format!("HTTP {status}: {text}"),
            ));
        }
        if !status.is_success() {
            return Err(ServiceError::client(
                SERVICE_NAME,
                format!("HTTP {status}: {text}"),
            ));
        }

        Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| CompoundIdentifier::new(kind, line))
            .collect())
    }
}

/// Minimal percent-encoding for a structure identifier in a URL path
/// segment — CIR identifiers may contain characters such as `/` (SMILES) or
/// spaces (names) that must not be interpreted as path separators.
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[async_trait]
impl Service for CirService {
    fn name(&self) -> &str {
        SERVICE_NAME
    }

    fn supported_inputs(&self) -> &[CompoundIdentifierKind] {
        SUPPORTED_KINDS
    }

    fn supported_outputs(&self) -> &[CompoundIdentifierKind] {
        SUPPORTED_KINDS
    }

    async fn resolve_compound(
        &self,
        session: &Session,
        input: &CompoundIdentifier,
        desired_kinds: &[CompoundIdentifierKind],
    ) -> ServiceResult<Vec<CompoundIdentifier>> {
        if !SUPPORTED_KINDS.contains(&input.kind) {
            return Err(ServiceError::client(
                SERVICE_NAME,
                format!("unsupported input kind {:?}", input.kind),
            ));
        }
        let requested: Vec<CompoundIdentifierKind> = desired_kinds
            .iter()
            .copied()
            .filter(|k| SUPPORTED_KINDS.contains(k))
            .collect();
        if requested.is_empty() {
            return Err(ServiceError::client(
                SERVICE_NAME,
                "no desired kind is supported by this service",
            ));
        }

        let mut out = Vec::new();
        for kind in requested {
            let rep = representation(kind).expect("filtered to SUPPORTED_KINDS above");
            out.extend(
                self.query_representation(session, &input.value, rep, kind)
                    .await?,
            );
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn representation_maps_documented_kinds() {
        assert_eq!(representation(CompoundIdentifierKind::Smiles), Some("smiles"));
        assert_eq!(representation(CompoundIdentifierKind::Inchi), Some("stdinchi"));
        assert_eq!(
            representation(CompoundIdentifierKind::InchiKey),
            Some("stdinchikey")
        );
        assert_eq!(representation(CompoundIdentifierKind::Name), Some("names"));
        assert_eq!(representation(CompoundIdentifierKind::Title), None);
    }

    #[test]
    fn urlencode_preserves_unreserved_and_escapes_the_rest() {
        assert_eq!(urlencode("aspirin"), "aspirin");
        assert_eq!(urlencode("CC(=O)O"), "CC%28%3DO%29O");
        assert_eq!(urlencode("a b"), "a%20b");
    }

    #[test]
    fn service_descriptor_reports_identity_and_kinds() {
        let svc = CirService::new();
        assert_eq!(svc.name(), "cir");
        assert_eq!(svc.supported_inputs(), SUPPORTED_KINDS);
        assert_eq!(svc.supported_outputs(), SUPPORTED_KINDS);
    }

    #[test]
    fn global_default_returns_the_same_instance_on_every_call() {
        let a = CirService::global_default() as *const CirService;
        let b = CirService::global_default() as *const CirService;
        assert_eq!(a, b);
    }

    use pura_model::service::Session;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn resolve_compound_parses_a_plain_text_match() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/aspirin/smiles"))
            .respond_with(ResponseTemplate::new(200).set_body_string("CC(=O)OC1=CC=CC=C1C(=O)O\n"))
            .mount(&server)
            .await;

        let svc = CirService::new().with_base(server.uri());
        let session = Session::default();
        let input = CompoundIdentifier::new(CompoundIdentifierKind::Name, "aspirin");
        let result = svc
            .resolve_compound(&session, &input, &[CompoundIdentifierKind::Smiles])
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].kind, CompoundIdentifierKind::Smiles);
        assert_eq!(result[0].value, "CC(=O)OC1=CC=CC=C1C(=O)O");
    }

    #[tokio::test]
    async fn resolve_compound_treats_404_as_a_clean_no_match() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/nonexistent/smiles"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let svc = CirService::new().with_base(server.uri());
        let session = Session::default();
        let input = CompoundIdentifier::new(CompoundIdentifierKind::Name, "nonexistent");
        let result = svc
            .resolve_compound(&session, &input, &[CompoundIdentifierKind::Smiles])
            .await
            .unwrap();

        assert!(result.is_empty());
    }
}
