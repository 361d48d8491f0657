use std::sync::LazyLock;

use regex::Regex;

use super::CitationExtractor;
use crate::errors::{CiteGraphError, Result};
use crate::types::CandidateCitation;

/// `<volume> U. S. <page>`, with an optional space inside the abbreviation
/// and an optional leading space that is trimmed before decomposition.
static CITATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ?\b\d{1,3} U\. ?S\. \d{1,4}").expect("valid citation pattern"));

static VOLUME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3})").expect("valid volume pattern"));

static PAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" (\d{1,4})$").expect("valid page pattern"));

/// Tokens that mark internal pagination ("Page 12 U. S. 4") rather than a
/// citation of another opinion.
const PAGINATION_MARKERS: &[&str] = &["Page", "P."];

/// Extractor for citations to the United States Reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsReportsExtractor;

impl UsReportsExtractor {
    pub fn new() -> Self {
        Self
    }

    /// True when the text right before the volume digits (ignoring a single
    /// space) ends in a pagination marker.
    fn is_pagination(text: &str, digits_start: usize) -> bool {
        let before = &text[..digits_start];
        let before = before.strip_suffix(' ').unwrap_or(before);
        PAGINATION_MARKERS
            .iter()
            .any(|marker| before.ends_with(marker))
    }

    fn decompose(span: &str) -> Result<CandidateCitation> {
        let malformed = || CiteGraphError::MalformedCitation {
            span: span.to_string(),
        };

        let volume = VOLUME_PATTERN
            .captures(span)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .ok_or_else(malformed)?;
        let page = PAGE_PATTERN
            .captures(span)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .ok_or_else(malformed)?;

        Ok(CandidateCitation { volume, page })
    }
}

impl CitationExtractor for UsReportsExtractor {
    fn reporter(&self) -> &str {
        "U. S."
    }

    fn extract(&self, text: &str) -> Result<Vec<CandidateCitation>> {
        let mut citations = Vec::new();

        for m in CITATION_PATTERN.find_iter(text) {
            let raw = m.as_str();
            let span = raw.trim();
            let digits_start = m.start() + (raw.len() - raw.trim_start().len());

            if Self::is_pagination(text, digits_start) {
                tracing::trace!(citation = span, "skipping pagination reference");
                continue;
            }

            citations.push(Self::decompose(span)?);
        }

        Ok(citations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decompose_reads_volume_and_page() {
        let c = UsReportsExtractor::decompose("347 U. S. 483").unwrap();
        assert_eq!(c, CandidateCitation { volume: 347, page: 483 });
    }

    #[test]
    fn decompose_rejects_span_without_page() {
        let err = UsReportsExtractor::decompose("347 U. S.").unwrap_err();
        assert!(matches!(err, CiteGraphError::MalformedCitation { .. }));
    }

    #[test]
    fn pagination_marker_detection() {
        let text = "Page 45 U. S. 12";
        assert!(UsReportsExtractor::is_pagination(text, 5));
        let text = "see 45 U. S. 12";
        assert!(!UsReportsExtractor::is_pagination(text, 4));
    }
}
