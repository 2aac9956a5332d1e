//! The optional LLM-enrichment seam.
//!
//! Out of scope: no enrichment backend ships in this crate, and no network
//! code is written here. `EnrichmentBackend` exists only so a caller can
//! plug one in; `NullEnrichment` is the default and always defers to the
//! rule-based scorer. An enrichment backend's result is advisory and must
//! never replace a rule-scorer `RiskResponse` -- only `Dispatcher` decides
//! what gets persisted as `last_risk`.

use async_trait::async_trait;

use crate::types::RiskResponse;

/// A best-effort overlay on top of the rule-based scorers. Implementations
/// must be resilient to their own failure: any `Err` here is treated as
/// "no enrichment available," never as a reason to fail the request.
#[async_trait]
pub trait EnrichmentBackend: Send + Sync {
    /// Attempts to enrich a rule-scorer result with additional context. A
    /// `None` return means "nothing to add," not an error.
    async fn enrich(
        &self,
        module: &str,
        rule_result: &RiskResponse,
    ) -> anyhow::Result<Option<RiskResponse>>;
}

/// The shipped default: always defers to the rule scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEnrichment;

#[async_trait]
impl EnrichmentBackend for NullEnrichment {
    async fn enrich(
        &self,
        _module: &str,
        _rule_result: &RiskResponse,
    ) -> anyhow::Result<Option<RiskResponse>> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorers::callguard;

    #[tokio::test]
    async fn null_enrichment_never_overrides_the_rule_scorer() {
        let rule_result = callguard::assess(&[]);
        let result = NullEnrichment.enrich("callguard", &rule_result).await.unwrap();
        assert!(result.is_none());
    }
}
