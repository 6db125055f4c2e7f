//! End-to-end resolution against the real PubChem and CIR adapters.
//!
//! Requires network access, so these are `#[ignore]`d by default; run with
//! `cargo test -- --ignored` to exercise them.

use std::sync::Arc;

use pura_client::{CirService, PubChemService};
use pura_model::{CompoundIdentifier, CompoundIdentifierKind};
use pura_resolver::Resolver;

#[tokio::test]
#[ignore = "requires network access to PubChem and CIR"]
async fn resolves_aspirin_name_to_smiles_via_pubchem() {
    let resolver = Resolver::new(vec![Arc::new(PubChemService::new())]);
    let result = resolver
        .resolve_names(&["aspirin"], CompoundIdentifierKind::Smiles)
        .await;
    assert_eq!(result.len(), 1);
    assert!(!result[0].is_empty());
}

#[tokio::test]
#[ignore = "requires network access to PubChem and CIR"]
async fn quorum_of_two_across_pubchem_and_cir() {
    let resolver = Resolver::with_config(
        vec![Arc::new(PubChemService::new()), Arc::new(CirService::new())],
        pura_resolver::ResolverConfig {
            quorum: 2,
            ..Default::default()
        },
    );
    let input = CompoundIdentifier::new(CompoundIdentifierKind::Name, "water");
    let result = resolver
        .resolve(&[input], &[CompoundIdentifierKind::InchiKey])
        .await;
    assert_eq!(result.len(), 1);
    assert!(!result[0].is_empty());
}

#[tokio::test]
#[ignore = "requires network access to PubChem"]
async fn autocomplete_fallback_resolves_a_misspelled_name() {
    let resolver = Resolver::new(vec![Arc::new(PubChemService::new())]);
    let result = resolver
        .resolve_names(&["asprin"], CompoundIdentifierKind::Smiles)
        .await;
    assert_eq!(result.len(), 1);
    assert!(!result[0].is_empty());
}
