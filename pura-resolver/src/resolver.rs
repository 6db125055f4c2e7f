//! The resolver core: batching, per-input retry/agreement, result assembly.

use std::sync::Arc;
use std::time::Duration;

use pura_model::agreement::agree;
use pura_model::compound::{CompoundIdentifier, CompoundIdentifierKind};
use pura_model::error::{ResolverError, ResolverResult};
use pura_model::service::{Service, Session};
use pura_model::standardize::{NoopStandardizer, Standardizer};
use tokio_util::sync::CancellationToken;

use crate::config::ResolverConfig;

/// Batched, quorum-based compound-identifier resolver.
///
/// Holds no process-wide state; every tunable is threaded through the
/// constructor. Construct once per set of configured services and reuse it
/// across calls — it is cheap to clone internally (an `Arc<Vec<_>>` of
/// services) and safe to share across tasks.
pub struct Resolver {
    services: Arc<Vec<Arc<dyn Service>>>,
    config: ResolverConfig,
    standardizer: Arc<dyn Standardizer>,
}

impl Resolver {
    /// Build a resolver over `services`, visited in the order given —
    /// service order is resolution priority (spec §4.4).
    pub fn new(services: Vec<Arc<dyn Service>>) -> Self {
        Self::with_config(services, ResolverConfig::default())
    }

    pub fn with_config(services: Vec<Arc<dyn Service>>, config: ResolverConfig) -> Self {
        Self {
            services: Arc::new(services),
            config,
            standardizer: Arc::new(NoopStandardizer),
        }
    }

    /// Install a normalization callback applied to every identifier a
    /// service returns, before it is used in agreement. Default is a no-op.
    pub fn with_standardizer(mut self, standardizer: Arc<dyn Standardizer>) -> Self {
        self.standardizer = standardizer;
        self
    }

    /// Resolve every input, silently. A service failure or an unreached
    /// quorum contributes an empty list for that input rather than failing
    /// the whole call; see [`Self::try_resolve`] for the strict variant.
    pub async fn resolve(
        &self,
        inputs: &[CompoundIdentifier],
        output_kinds: &[CompoundIdentifierKind],
    ) -> Vec<Vec<CompoundIdentifier>> {
        self.resolve_with_cancellation(inputs, output_kinds, &CancellationToken::new())
            .await
    }

    /// As [`Self::resolve`], but cooperating with an externally-held
    /// cancellation token: once cancelled, no new request is issued, no new
    /// retry sleep is begun, and every in-flight task returns promptly with
    /// whatever candidate it had reduced so far.
    pub async fn resolve_with_cancellation(
        &self,
        inputs: &[CompoundIdentifier],
        output_kinds: &[CompoundIdentifierKind],
        cancel: &CancellationToken,
    ) -> Vec<Vec<CompoundIdentifier>> {
        self.run(inputs, output_kinds, true, cancel)
            .await
            .expect("silent mode never returns Err")
    }

    /// Resolve every input, strictly. The first service client-error or
    /// unreached quorum aborts the whole call and propagates a
    /// [`ResolverError`].
    pub async fn try_resolve(
        &self,
        inputs: &[CompoundIdentifier],
        output_kinds: &[CompoundIdentifierKind],
    ) -> ResolverResult<Vec<Vec<CompoundIdentifier>>> {
        self.run(inputs, output_kinds, false, &CancellationToken::new())
            .await
    }

    /// Convenience wrapper: resolve plain names to `output_kind`, silently.
    pub async fn resolve_names(
        &self,
        names: &[&str],
        output_kind: CompoundIdentifierKind,
    ) -> Vec<Vec<CompoundIdentifier>> {
        let inputs: Vec<CompoundIdentifier> = names
            .iter()
            .map(|name| CompoundIdentifier::new(CompoundIdentifierKind::Name, *name))
            .collect();
        self.resolve(&inputs, &[output_kind]).await
    }

    async fn run(
        &self,
        inputs: &[CompoundIdentifier],
        output_kinds: &[CompoundIdentifierKind],
        silent: bool,
        cancel: &CancellationToken,
    ) -> ResolverResult<Vec<Vec<CompoundIdentifier>>> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }
        let batch_size = self
            .config
            .batch_size
            .unwrap_or_else(|| inputs.len().min(100))
            .max(1);

        let mut out = Vec::with_capacity(inputs.len());
        for batch in inputs.chunks(batch_size) {
            if cancel.is_cancelled() {
                out.extend(batch.iter().map(|_| Vec::new()));
                continue;
            }
            let session = Session::default();
            let mut handles = Vec::with_capacity(batch.len());
            for input in batch {
                let services = Arc::clone(&self.services);
                let standardizer = Arc::clone(&self.standardizer);
                let config = self.config.clone();
                let input = input.clone();
                let desired_kinds = output_kinds.to_vec();
                let session = session.clone();
                let cancel = cancel.clone();
                handles.push(tokio::spawn(async move {
                    resolve_one(
                        &services,
                        &session,
                        standardizer.as_ref(),
                        &config,
                        &cancel,
                        &input,
                        &desired_kinds,
                        silent,
                    )
                    .await
                }));
            }
            for handle in handles {
                let result = handle
                    .await
                    .expect("resolution task panicked rather than returning an error")?;
                out.push(result);
            }
        }
        Ok(out)
    }
}

/// Resolve one input against `services`, in declaration order, per spec
/// §4.4: retry each service up to `max_retries` times with `2^attempt`
/// second exponential backoff, standardize every returned identifier,
/// recompute agreement after every service that has responded (including
/// with an empty list — `agreement_count` is incremented once per
/// responding service, not once per non-empty response; this matches the
/// source algorithm exactly, anomaly included), and short-circuit as soon
/// as quorum is met with a non-empty reduced candidate list.
#[allow(clippy::too_many_arguments)]
async fn resolve_one(
    services: &[Arc<dyn Service>],
    session: &Session,
    standardizer: &dyn Standardizer,
    config: &ResolverConfig,
    cancel: &CancellationToken,
    input: &CompoundIdentifier,
    desired_kinds: &[CompoundIdentifierKind],
    silent: bool,
) -> ResolverResult<Vec<CompoundIdentifier>> {
    let mut agreement_count = 0usize;
    let mut collected: Vec<Vec<CompoundIdentifier>> = Vec::new();
    let mut latest_reduced: Vec<CompoundIdentifier> = Vec::new();

    'services: for service in services {
        let mut answers: Option<Vec<CompoundIdentifier>> = None;

        for attempt in 0..config.max_retries {
            if cancel.is_cancelled() {
                break 'services;
            }

            let call = service.resolve_compound(session, input, desired_kinds);
            let result = tokio::select! {
                _ = cancel.cancelled() => break 'services,
                r = call => r,
            };

            match result {
                Ok(ids) => {
                    answers = Some(
                        ids.into_iter()
                            .map(|id| standardizer.standardize(id))
                            .collect(),
                    );
                    break;
                }
                Err(e) if e.is_transient() => {
                    if attempt + 1 < config.max_retries {
                        let backoff = Duration::from_secs(1u64 << attempt);
                        tokio::select! {
                            _ = cancel.cancelled() => break 'services,
                            _ = tokio::time::sleep(backoff) => {}
                        }
                    }
                    continue;
                }
                Err(e) => {
                    if silent {
                        log::error!("{} failed for {input}: {e}", service.name());
                        return Ok(Vec::new());
                    }
                    return Err(ResolverError::Client {
                        input: input.clone(),
                        source: e,
                    });
                }
            }
        }

        // A service that exhausted its retries is treated as having
        // answered empty, for agreement purposes.
        let answers = answers.unwrap_or_default();
        collected.push(answers);

        if !collected.is_empty() {
            latest_reduced = if collected.len() >= 2 {
                agree(&collected, config.quorum)
            } else {
                collected[0].clone()
            };
            agreement_count += 1;
        }

        if agreement_count >= config.quorum && !latest_reduced.is_empty() {
            return Ok(latest_reduced);
        }
    }

    if silent {
        // Reaching here means the short-circuit above never fired, i.e.
        // quorum was never reached; contribute an empty/partial result
        // rather than failing the whole call.
        Ok(latest_reduced)
    } else {
        Err(ResolverError::QuorumNotReached {
            input: input.clone(),
            desired_kinds: desired_kinds.to_vec(),
            quorum: config.quorum,
            agreement_count,
            collected,
        })
    }
}
