/// Citation resolution module.
///
/// Resolves candidate citations (from text extraction) into record numbers
/// by matching them against the volume index, exactly or through a
/// pluggable fallback strategy.
mod resolver;
mod strategy;

pub use resolver::CitationResolver;
pub use strategy::{FallbackPolicy, FallbackStrategy, FirstBelow, GreatestBelow};
