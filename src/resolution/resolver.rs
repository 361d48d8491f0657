use std::sync::Arc;

use crate::index::VolumeIndex;
use crate::resolution::strategy::{FallbackPolicy, FallbackStrategy};
use crate::types::*;

/// Maps candidate citations onto record numbers using the volume index.
///
/// Resolution is a pure function of the index and the fallback strategy,
/// so one resolver can be shared across worker threads.
pub struct CitationResolver<'a> {
    index: &'a VolumeIndex,
    strategy: Arc<dyn FallbackStrategy>,
}

impl<'a> CitationResolver<'a> {
    /// Creates a resolver using the default (`first_below`) fallback.
    pub fn new(index: &'a VolumeIndex) -> Self {
        Self::with_policy(index, FallbackPolicy::default())
    }

    pub fn with_policy(index: &'a VolumeIndex, policy: FallbackPolicy) -> Self {
        Self::with_strategy(index, policy.strategy())
    }

    pub fn with_strategy(index: &'a VolumeIndex, strategy: Arc<dyn FallbackStrategy>) -> Self {
        Self { index, strategy }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Resolves one candidate citation.
    ///
    /// Steps are tried in order:
    /// 1. **Exact match** -- the candidate's `(volume, page)` is a record
    ///    number in the corpus.
    /// 2. **Fallback** -- the fallback strategy picks one of the cited
    ///    volume's starting pages; the result is `Approximate`.
    ///
    /// Returns `Unresolved` when the cited volume is outside the indexed
    /// range or the strategy finds no qualifying page.
    pub fn resolve(&self, candidate: &CandidateCitation) -> Resolution {
        let number = candidate.as_number();
        if self.index.contains(&number) {
            return Resolution::Exact(number);
        }

        let Some(pages) = self.index.pages(candidate.volume) else {
            return Resolution::Unresolved;
        };

        match self.strategy.select(candidate.page, pages) {
            Some(page) => Resolution::Approximate(CaseNumber::new(candidate.volume, page)),
            None => Resolution::Unresolved,
        }
    }

    /// Resolves a batch of candidates, preserving order.
    pub fn resolve_all(&self, candidates: &[CandidateCitation]) -> Vec<Resolution> {
        candidates.iter().map(|c| self.resolve(c)).collect()
    }
}
