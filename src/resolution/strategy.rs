use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::types::Page;

/// Picks a starting page for a cited page that matched no record exactly.
///
/// `pages` is one volume's starting pages in index order. Implementations
/// must be pure: the same inputs always yield the same page. A page that is
/// not one of `pages` is accepted and later reported as dangling.
pub trait FallbackStrategy: Send + Sync {
    /// Stable identifier, used in logs and configuration.
    fn name(&self) -> &'static str;

    fn select(&self, cited_page: u32, pages: &[Page]) -> Option<Page>;
}

/// Returns the first starting page, in index order, that lies below the
/// cited page.
///
/// This reproduces the behavior existing citation datasets were built with.
/// For a volume whose smallest numbered page is below the cited page it
/// always returns that smallest page, not the nearest one.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstBelow;

impl FallbackStrategy for FirstBelow {
    fn name(&self) -> &'static str {
        "first_below"
    }

    fn select(&self, cited_page: u32, pages: &[Page]) -> Option<Page> {
        pages
            .iter()
            .find(|c| c.leading_number().is_some_and(|n| cited_page > n))
            .cloned()
    }
}

/// Returns the greatest starting page strictly below the cited page, i.e.
/// the record the cited page most plausibly falls inside.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreatestBelow;

impl FallbackStrategy for GreatestBelow {
    fn name(&self) -> &'static str {
        "greatest_below"
    }

    fn select(&self, cited_page: u32, pages: &[Page]) -> Option<Page> {
        // Pages without digits sort first and never qualify; the rest are
        // ordered by their leading number, so qualifying pages form a run
        // ending right before the partition point.
        let end = pages.partition_point(|c| c.leading_number().map_or(true, |n| n < cited_page));
        pages[..end]
            .last()
            .filter(|c| c.leading_number().is_some())
            .cloned()
    }
}

/// Configurable choice of [`FallbackStrategy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    #[default]
    FirstBelow,
    GreatestBelow,
}

impl FallbackPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstBelow => "first_below",
            Self::GreatestBelow => "greatest_below",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "first_below" | "first-below" => Some(Self::FirstBelow),
            "greatest_below" | "greatest-below" => Some(Self::GreatestBelow),
            _ => None,
        }
    }

    pub fn strategy(&self) -> Arc<dyn FallbackStrategy> {
        match self {
            Self::FirstBelow => Arc::new(FirstBelow),
            Self::GreatestBelow => Arc::new(GreatestBelow),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(nums: &[u32]) -> Vec<Page> {
        nums.iter().copied().map(Page::Number).collect()
    }

    #[test]
    fn first_below_takes_first_qualifying_entry() {
        let pages = pages(&[1, 50, 120]);
        assert_eq!(FirstBelow.select(100, &pages), Some(Page::Number(1)));
    }

    #[test]
    fn greatest_below_takes_predecessor() {
        let pages = pages(&[1, 50, 120]);
        assert_eq!(GreatestBelow.select(100, &pages), Some(Page::Number(50)));
        assert_eq!(GreatestBelow.select(50, &pages), Some(Page::Number(1)));
        assert_eq!(GreatestBelow.select(1, &pages), None);
    }

    #[test]
    fn tokens_without_digits_never_qualify() {
        let pages = vec![Page::Token("orig".into()), Page::Number(10)];
        assert_eq!(FirstBelow.select(5, &pages), None);
        assert_eq!(GreatestBelow.select(5, &pages), None);
        assert_eq!(GreatestBelow.select(11, &pages), Some(Page::Number(10)));
    }
}
