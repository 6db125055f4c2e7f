//! # pura-model
//!
//! Core data model and algorithms for the compound-identifier resolution
//! engine: the [`CompoundIdentifier`](compound::CompoundIdentifier) value
//! type, the abstract [`Service`](service::Service) capability that every
//! provider adapter implements, the [`agree`](agreement::agree) quorum
//! algorithm, and the shared [`error`] taxonomy.
//!
//! This crate has no knowledge of any particular provider's wire format —
//! that lives in adapter crates such as `pura-client` — and no knowledge of
//! batching or retry policy, which belongs to the resolver core.

pub mod agreement;
pub mod compound;
pub mod error;
pub mod service;
pub mod standardize;

pub use agreement::agree;
pub use compound::{CompoundIdentifier, CompoundIdentifierKind};
pub use error::{ResolverError, ServiceError};
pub use service::{Service, Session};
pub use standardize::{NoopStandardizer, Standardizer};
