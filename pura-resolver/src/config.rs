//! Tunables for a [`Resolver`](crate::resolver::Resolver) instance.

/// Configuration for a [`Resolver`](crate::resolver::Resolver), mirroring the
/// shape of the adapter crate's own `ClientConfig`: a plain `Default`-able
/// struct threaded through the constructor, never a global.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Number of services that must agree on a candidate before it is
    /// accepted. `1` accepts the first responding service's answer outright.
    pub quorum: usize,

    /// Inputs per batch. `None` means `min(100, n)` for a call of `n`
    /// inputs, recomputed per call.
    pub batch_size: Option<usize>,

    /// Attempts per service before a transient failure is treated as an
    /// empty response for agreement purposes.
    pub max_retries: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            quorum: 1,
            batch_size: None,
            max_retries: 7,
        }
    }
}
