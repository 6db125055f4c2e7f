//! # pura-client
//!
//! Concrete [`Service`](pura_model::Service) adapters for the
//! compound-identifier resolution engine: [`PubChemService`](client::PubChemService),
//! the reference adapter bit-exact to the PubChem PUG REST API, and
//! [`CirService`](cir::CirService), a second, much simpler adapter over
//! NIH's Chemical Identifier Resolver.
//!
//! This crate has no knowledge of batching, retry policy, or the agreement
//! algorithm — those belong to the resolver core. Each adapter here does
//! exactly one thing: translate between the abstract identifier model and
//! one provider's wire format.

pub mod cir;
pub mod client;
pub mod error;
pub mod pubchem_properties;

pub use cir::CirService;
pub use client::PubChemService;
