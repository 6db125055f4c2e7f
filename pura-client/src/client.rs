//! The PubChem PUG REST [`Service`] adapter — the reference implementation
//! every other adapter in this crate is held to the same shape as.

use std::collections::VecDeque;
use std::sync::OnceLock;

use async_trait::async_trait;
use pura_model::compound::{CompoundIdentifier, CompoundIdentifierKind};
use pura_model::error::{ServiceError, ServiceResult};
use pura_model::service::{Service, Session};
use serde::Deserialize;

use crate::error::Error;
use crate::pubchem_properties::PropertyTableResponse;

pub const PUBCHEM_API_BASE: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug";
pub const PUBCHEM_AUTOCOMPLETE_BASE: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/autocomplete";

const SERVICE_NAME: &str = "pubchem";

/// Input kind → PubChem namespace string (spec §4.2).
fn input_namespace(kind: CompoundIdentifierKind) -> Option<&'static str> {
    match kind {
        CompoundIdentifierKind::Smiles => Some("smiles"),
        CompoundIdentifierKind::Inchi => Some("InChI"),
        CompoundIdentifierKind::IupacName => Some("IUPACName"),
        CompoundIdentifierKind::InchiKey => Some("InChIKey"),
        CompoundIdentifierKind::Name => Some("name"),
        CompoundIdentifierKind::PubchemCid => Some("cid"),
        _ => None,
    }
}

/// Output kind → PubChem property name string (spec §4.2).
fn output_property(kind: CompoundIdentifierKind) -> Option<&'static str> {
    match kind {
        CompoundIdentifierKind::Smiles => Some("CanonicalSMILES"),
        CompoundIdentifierKind::Inchi => Some("InChI"),
        CompoundIdentifierKind::IupacName => Some("IUPACName"),
        CompoundIdentifierKind::InchiKey => Some("InChIKey"),
        CompoundIdentifierKind::Title => Some("Title"),
        CompoundIdentifierKind::PubchemCid => Some("CID"),
        CompoundIdentifierKind::IsomericSmiles => Some("IsomericSMILES"),
        _ => None,
    }
}

fn property_kind(name: &str) -> Option<CompoundIdentifierKind> {
    match name {
        "CanonicalSMILES" => Some(CompoundIdentifierKind::Smiles),
        "InChI" => Some(CompoundIdentifierKind::Inchi),
        "IUPACName" => Some(CompoundIdentifierKind::IupacName),
        "InChIKey" => Some(CompoundIdentifierKind::InchiKey),
        "Title" => Some(CompoundIdentifierKind::Title),
        "IsomericSMILES" => Some(CompoundIdentifierKind::IsomericSmiles),
        _ => None,
    }
}

const SUPPORTED_INPUTS: &[CompoundIdentifierKind] = &[
    CompoundIdentifierKind::Smiles,
    CompoundIdentifierKind::Inchi,
    CompoundIdentifierKind::IupacName,
    CompoundIdentifierKind::InchiKey,
    CompoundIdentifierKind::Name,
    CompoundIdentifierKind::PubchemCid,
];

const SUPPORTED_OUTPUTS: &[CompoundIdentifierKind] = &[
    CompoundIdentifierKind::Smiles,
    CompoundIdentifierKind::Inchi,
    CompoundIdentifierKind::IupacName,
    CompoundIdentifierKind::InchiKey,
    CompoundIdentifierKind::Title,
    CompoundIdentifierKind::PubchemCid,
    CompoundIdentifierKind::IsomericSmiles,
];

#[derive(Debug, Deserialize)]
struct FaultWrapper {
    #[serde(rename = "Fault")]
    fault: FaultInner,
}

#[derive(Debug, Deserialize)]
struct FaultInner {
    #[serde(rename = "Code")]
    code: String,
    #[serde(rename = "Message")]
    message: String,
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    #[serde(default)]
    dictionary_terms: DictionaryTerms,
}

#[derive(Debug, Default, Deserialize)]
struct DictionaryTerms {
    #[serde(default)]
    compound: Vec<String>,
}

/// The PubChem PUG REST adapter.
///
/// When `autocomplete` is enabled, a property query that returns no rows
/// falls back to PubChem's autocomplete endpoint at most once per
/// resolution, trying each suggested name in turn (spec §4.2 step 5).
#[derive(Debug, Clone)]
pub struct PubChemService {
    api_base: String,
    autocomplete_base: String,
    autocomplete: bool,
    autocomplete_limit: u32,
}

impl Default for PubChemService {
    fn default() -> Self {
        Self {
            api_base: PUBCHEM_API_BASE.to_string(),
            autocomplete_base: PUBCHEM_AUTOCOMPLETE_BASE.to_string(),
            autocomplete: true,
            autocomplete_limit: 5,
        }
    }
}

/// Process-wide shared default-configured adapter.
static DEFAULT_PUBCHEM_SERVICE: OnceLock<PubChemService> = OnceLock::new();

impl PubChemService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the process-wide default-configured adapter.
    ///
    /// A secondary convenience only, mirroring the teacher's own
    /// `PubChemClient::global_default()` — `Resolver` never reaches for this
    /// itself, every internal construction goes through an explicit
    /// `Vec<Arc<dyn Service>>` passed to `Resolver::new`/`with_config`.
    pub fn global_default() -> &'static PubChemService {
        DEFAULT_PUBCHEM_SERVICE.get_or_init(PubChemService::default)
    }

    pub fn with_autocomplete(mut self, enabled: bool) -> Self {
        self.autocomplete = enabled;
        self
    }

    pub fn with_autocomplete_limit(mut self, limit: u32) -> Self {
        self.autocomplete_limit = limit;
        self
    }

    /// Override the API bases, pointing this adapter at a mock server
    /// instead of the real PubChem endpoints — see the `wiremock`-backed
    /// tests in this module's `tests` submodule.
    #[doc(hidden)]
    pub fn with_bases(mut self, api_base: impl Into<String>, autocomplete_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self.autocomplete_base = autocomplete_base.into();
        self
    }

    /// Run one property query: `POST {api_base}/compound/{namespace}/property/{props}/JSON`.
    async fn query_properties(
        &self,
        session: &Session,
        namespace: &str,
        value: &str,
        url_properties: &[&str],
        desired_kinds: &[CompoundIdentifierKind],
    ) -> Result<Vec<CompoundIdentifier>, Error> {
        let url = format!(
            "{}/compound/{namespace}/property/{}/JSON",
            self.api_base,
            url_properties.join(",")
        );
        log::debug!("POST {url} body={namespace}={value}");

        let response = session
            .client()
            .post(&url)
            .form(&[(namespace, value)])
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if let Ok(wrapper) = serde_json::from_str::<FaultWrapper>(&text) {
            if wrapper.fault.code == "PUGREST.NotFound" {
                return Ok(Vec::new());
            }
            return Err(Error::ApiFault {
                code: wrapper.fault.code,
                message: wrapper.fault.message,
            });
        }
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: PropertyTableResponse = serde_json::from_str(&text)?;
        Ok(rows_to_identifiers(&parsed, desired_kinds))
    }

    async fn autocomplete(&self, session: &Session, value: &str) -> Result<Vec<String>, Error> {
        let url = format!(
            "{}/compound/{}/JSON?limit={}",
            self.autocomplete_base, value, self.autocomplete_limit
        );
        log::debug!("GET {url}");

        let response = session.client().get(&url).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: text,
            });
        }
        let parsed: AutocompleteResponse = serde_json::from_str(&text)?;
        Ok(parsed.dictionary_terms.compound)
    }
}

/// Extract every `(kind, value)` a response row carries among `desired_kinds`.
fn rows_to_identifiers(
    response: &PropertyTableResponse,
    desired_kinds: &[CompoundIdentifierKind],
) -> Vec<CompoundIdentifier> {
    let mut out = Vec::new();
    for row in &response.property_table.properties {
        if desired_kinds.contains(&CompoundIdentifierKind::PubchemCid) {
            out.push(CompoundIdentifier::new(
                CompoundIdentifierKind::PubchemCid,
                row.cid.to_string(),
            ));
        }
        let fields: &[(Option<&String>, &str)] = &[
            (row.canonical_smiles.as_ref(), "CanonicalSMILES"),
            (row.isomeric_smiles.as_ref(), "IsomericSMILES"),
            (row.inchi.as_ref(), "InChI"),
            (row.inchikey.as_ref(), "InChIKey"),
            (row.iupac_name.as_ref(), "IUPACName"),
            (row.title.as_ref(), "Title"),
        ];
        for (value, name) in fields {
            let Some(kind) = property_kind(name) else {
                continue;
            };
            if !desired_kinds.contains(&kind) {
                continue;
            }
            if let Some(value) = value {
                out.push(CompoundIdentifier::new(kind, (*value).clone()));
            }
        }
    }
    out
}

#[async_trait]
impl Service for PubChemService {
    fn name(&self) -> &str {
        SERVICE_NAME
    }

    fn supported_inputs(&self) -> &[CompoundIdentifierKind] {
        SUPPORTED_INPUTS
    }

    fn supported_outputs(&self) -> &[CompoundIdentifierKind] {
        SUPPORTED_OUTPUTS
    }

    async fn resolve_compound(
        &self,
        session: &Session,
        input: &CompoundIdentifier,
        desired_kinds: &[CompoundIdentifierKind],
    ) -> ServiceResult<Vec<CompoundIdentifier>> {
        let namespace = input_namespace(input.kind).ok_or_else(|| {
            ServiceError::client(SERVICE_NAME, format!("unsupported input kind {:?}", input.kind))
        })?;

        let mut url_properties: Vec<&str> = Vec::new();
        for &kind in desired_kinds {
            if kind == CompoundIdentifierKind::PubchemCid {
                continue; // CID rides along in every row, never requested.
            }
            if let Some(name) = output_property(kind)
                && !url_properties.contains(&name)
            {
                url_properties.push(name);
            }
        }
        if url_properties.is_empty() {
            if desired_kinds.contains(&CompoundIdentifierKind::PubchemCid) {
                // CID-only request: ask for a harmless property so PubChem
                // still returns a row to read CID off of.
                url_properties.push("Title");
            } else {
                return Err(ServiceError::client(
                    SERVICE_NAME,
                    "no desired kind is supported by this service",
                ));
            }
        }

        let mut queue: VecDeque<String> = VecDeque::new();
        queue.push_back(input.value.clone());
        let mut tried_autocomplete = false;

        loop {
            let value = queue
                .pop_front()
                .expect("queue is seeded with the input value before the loop starts");
            let results = self
                .query_properties(session, namespace, &value, &url_properties, desired_kinds)
                .await
                .map_err(|e| e.into_service_error(SERVICE_NAME))?;
            if !results.is_empty() {
                return Ok(results);
            }
            if self.autocomplete && !tried_autocomplete && queue.is_empty() {
                tried_autocomplete = true;
                let suggestions = self
                    .autocomplete(session, &value)
                    .await
                    .map_err(|e| e.into_service_error(SERVICE_NAME))?;
                queue.extend(suggestions);
            }
            if queue.is_empty() {
                return Ok(Vec::new());
            }
        }
    }
}
