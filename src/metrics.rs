use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Added to the total before computing ratios so an empty run reports
/// zeros instead of dividing by zero.
pub const RATIO_EPSILON: f64 = 0.001;

/// Counters describing how the candidate citations of a run were handled.
///
/// Every candidate lands in exactly one of `exact`, `modified`,
/// `self_citations` or `unresolved`. Non-self resolutions are further split
/// into `validated`, `uncorroborated` and `dangling`. Counters from
/// different records combine with `+`, so per-record tallies can be reduced
/// in any order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationMetrics {
    pub total: usize,
    pub exact: usize,
    pub modified: usize,
    pub self_citations: usize,
    pub unresolved: usize,
    pub validated: usize,
    pub uncorroborated: usize,
    pub dangling: usize,
}

impl CitationMetrics {
    /// Candidates that produced no usable, corroborated citation.
    pub fn errors(&self) -> usize {
        self.unresolved + self.dangling + self.uncorroborated
    }

    /// Checks the bookkeeping identities every run must satisfy.
    pub fn is_consistent(&self) -> bool {
        self.exact + self.modified + self.unresolved + self.self_citations == self.total
            && self.validated + self.uncorroborated + self.dangling == self.exact + self.modified
    }

    pub fn report(&self) -> MetricsReport {
        let denominator = self.total as f64 + RATIO_EPSILON;
        MetricsReport {
            total: self.total,
            modified_ratio: self.modified as f64 / denominator,
            validated_ratio: self.validated as f64 / denominator,
            error_ratio: self.errors() as f64 / denominator,
        }
    }
}

impl Add for CitationMetrics {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            total: self.total + rhs.total,
            exact: self.exact + rhs.exact,
            modified: self.modified + rhs.modified,
            self_citations: self.self_citations + rhs.self_citations,
            unresolved: self.unresolved + rhs.unresolved,
            validated: self.validated + rhs.validated,
            uncorroborated: self.uncorroborated + rhs.uncorroborated,
            dangling: self.dangling + rhs.dangling,
        }
    }
}

impl AddAssign for CitationMetrics {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for CitationMetrics {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Summary handed to the caller: total candidates and the modified,
/// validated and error counts as fractions of that total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub total: usize,
    pub modified_ratio: f64,
    pub validated_ratio: f64,
    pub error_ratio: f64,
}

impl MetricsReport {
    pub fn as_array(&self) -> [f64; 4] {
        [
            self.total as f64,
            self.modified_ratio,
            self.validated_ratio,
            self.error_ratio,
        ]
    }
}

impl fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Total, Modified, Validated, Err] -> [{}, {:.4}, {:.4}, {:.4}]",
            self.total, self.modified_ratio, self.validated_ratio, self.error_ratio
        )
    }
}
