/// Citation extraction from opinion text.
///
/// Extractors scan free text for reporter citations and produce ordered
/// candidate `(volume, page)` pairs. They never consult the corpus.
mod us_reports;

pub use us_reports::UsReportsExtractor;

use crate::errors::Result;
use crate::types::CandidateCitation;

/// Trait for reporter-specific citation extractors.
pub trait CitationExtractor: Send + Sync {
    /// Human-readable reporter name, e.g. `"U. S."`.
    fn reporter(&self) -> &str;

    /// Extract candidate citations from one block of text, in text order.
    ///
    /// Fails only when a span matched the citation pattern but its volume or
    /// page could not be lifted out of it.
    fn extract(&self, text: &str) -> Result<Vec<CandidateCitation>>;

    /// Extract from every segment and flatten, preserving segment order.
    fn extract_all(&self, segments: &[String]) -> Result<Vec<CandidateCitation>> {
        let mut all = Vec::new();
        for segment in segments {
            all.extend(self.extract(segment)?);
        }
        Ok(all)
    }
}

/// Extracts U. S. Reports citations from `text` with the default extractor.
pub fn extract_citations(text: &str) -> Result<Vec<CandidateCitation>> {
    UsReportsExtractor::new().extract(text)
}
