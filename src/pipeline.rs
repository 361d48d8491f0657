use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use crate::config::CiteGraphConfig;
use crate::corpus::{canonical_key, Corpus};
use crate::errors::Result;
use crate::extraction::{CitationExtractor, UsReportsExtractor};
use crate::index::VolumeIndex;
use crate::metrics::{CitationMetrics, MetricsReport};
use crate::resolution::{CitationResolver, FallbackStrategy};
use crate::types::*;
use crate::validation::{CitingText, NameValidator, Validation};

/// Records between progress log lines.
const PROGRESS_EVERY: usize = 100;

/// Drives one resolution pass over a corpus: extraction, resolution and
/// validation for every record, plus the run's metrics.
pub struct CitationPipeline {
    config: CiteGraphConfig,
    extractor: Box<dyn CitationExtractor>,
    strategy: Arc<dyn FallbackStrategy>,
}

/// Result of a full pipeline pass.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// One output record per input record.
    pub records: Vec<CitedRecord>,
    /// Counters summed over every record.
    pub metrics: CitationMetrics,
    /// Time taken in milliseconds.
    pub duration_ms: u64,
}

impl PipelineOutput {
    pub fn report(&self) -> MetricsReport {
        self.metrics.report()
    }
}

/// Read-only state shared by every record of a pass.
struct PassContext<'a> {
    resolver: CitationResolver<'a>,
    validator: NameValidator<'a>,
    processed: AtomicUsize,
    total_records: usize,
}

impl CitationPipeline {
    pub fn new(config: CiteGraphConfig) -> Self {
        let strategy = config.fallback.strategy();
        Self {
            config,
            extractor: Box::new(UsReportsExtractor::new()),
            strategy,
        }
    }

    /// Replaces the citation extractor.
    pub fn with_extractor(mut self, extractor: Box<dyn CitationExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Replaces the fallback strategy chosen by the configuration's
    /// `fallback` policy.
    pub fn with_strategy(mut self, strategy: Arc<dyn FallbackStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn config(&self) -> &CiteGraphConfig {
        &self.config
    }

    /// Runs one pass over `corpus`.
    ///
    /// The volume index and name map are rebuilt on every call, so repeated
    /// runs over the same corpus produce identical output. Unresolved and
    /// uncorroborated citations only show up in the metrics; the pass fails
    /// only when some text cannot be interpreted.
    pub fn run(&self, corpus: &Corpus) -> Result<PipelineOutput> {
        let start = Instant::now();
        let records = corpus.records();

        let index = VolumeIndex::build(records);
        let ctx = PassContext {
            resolver: CitationResolver::with_strategy(&index, Arc::clone(&self.strategy)),
            validator: NameValidator::new(records),
            processed: AtomicUsize::new(0),
            total_records: records.len(),
        };

        tracing::info!(
            records = records.len(),
            max_volume = index.max_volume(),
            reporter = self.extractor.reporter(),
            fallback = ctx.resolver.strategy_name(),
            parallel = self.config.parallel,
            "citation pass started"
        );

        let results: Vec<(CitedRecord, CitationMetrics)> = if self.config.parallel {
            records
                .par_iter()
                .map(|record| self.process_record(record, &ctx))
                .collect::<Result<_>>()?
        } else {
            records
                .iter()
                .map(|record| self.process_record(record, &ctx))
                .collect::<Result<_>>()?
        };

        let (mut cited, per_record): (Vec<CitedRecord>, Vec<CitationMetrics>) =
            results.into_iter().unzip();
        let metrics: CitationMetrics = per_record.into_iter().sum();

        if self.config.sort_output {
            cited.sort_by_key(|r| canonical_key(&r.number, r.date.as_ref()));
        }

        let output = PipelineOutput {
            records: cited,
            metrics,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        tracing::info!(
            total = metrics.total,
            exact = metrics.exact,
            modified = metrics.modified,
            validated = metrics.validated,
            errors = metrics.errors(),
            duration_ms = output.duration_ms,
            "citation pass finished: {}",
            output.report()
        );

        Ok(output)
    }

    /// Extracts, resolves and validates the citations of one record.
    fn process_record(
        &self,
        record: &Record,
        ctx: &PassContext<'_>,
    ) -> Result<(CitedRecord, CitationMetrics)> {
        let candidates = self.extractor.extract_all(&record.text).inspect_err(|e| {
            tracing::error!(record = %record.number, error = %e, "citation extraction failed");
        })?;

        let citing = CitingText::from_record(record);
        let mut metrics = CitationMetrics::default();
        let mut citations: Vec<CaseNumber> = Vec::new();

        for candidate in &candidates {
            metrics.total += 1;

            let resolution = ctx.resolver.resolve(candidate);
            let Some(target) = resolution.target() else {
                metrics.unresolved += 1;
                tracing::trace!(record = %record.number, ?candidate, "unresolved citation");
                continue;
            };

            if *target == record.number {
                metrics.self_citations += 1;
                continue;
            }

            if resolution.is_modified() {
                metrics.modified += 1;
            } else {
                metrics.exact += 1;
            }

            let validation = ctx.validator.validate(target, &citing);
            tracing::trace!(
                record = %record.number,
                target = %target,
                resolution = resolution.as_str(),
                validation = validation.as_str(),
                "citation resolved"
            );

            match validation {
                Validation::Corroborated => metrics.validated += 1,
                Validation::Uncorroborated => metrics.uncorroborated += 1,
                Validation::Dangling => {
                    metrics.dangling += 1;
                    tracing::warn!(
                        record = %record.number,
                        target = %target,
                        "citation resolved to a number no record carries"
                    );
                    continue;
                }
            }

            // Uncorroborated citations are still plausible references.
            if !citations.contains(target) {
                citations.push(target.clone());
            }
        }

        let done = ctx.processed.fetch_add(1, Ordering::Relaxed) + 1;
        if done % PROGRESS_EVERY == 0 {
            tracing::debug!("record block: {}/{}", done, ctx.total_records);
        }

        let cited = CitedRecord {
            name: record.name.clone(),
            url: record.url.clone(),
            text: self.config.keep_text.then(|| record.text.clone()),
            number: record.number.clone(),
            citations,
            vol: record.vol,
            date: record.date.clone(),
        };

        Ok((cited, metrics))
    }
}
