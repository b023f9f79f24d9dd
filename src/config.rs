//! Knobs shared by every search.

use derive_more::Display;

/// How a freshly generated node is compared against the frontier.
#[derive(Copy, Clone, Debug, Default, Display, PartialEq, Eq, clap::ValueEnum)]
pub enum DuplicatePolicy {
    /// Skip the node if its state is already in the frontier.
    ///
    /// Breadth-first and depth-first search always use this.
    #[display("by-state")]
    ByState,
    /// Skip the node only if the frontier holds its state at the very same
    /// cost. A state may sit in the frontier several times and be expanded
    /// more than once, there's no decrease-key.
    #[default]
    #[display("by-state-and-cost")]
    ByStateAndCost,
    /// Keep a single frontier entry per state, re-ranking it when a cheaper
    /// path shows up.
    #[display("replace")]
    Replace,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Abort after expanding this many nodes.
    pub max_expansions: Option<usize>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Only honoured by the priority-ordered searches.
    pub duplicates: DuplicatePolicy,
    pub limits: SearchLimits,
}

impl SearchConfig {
    #[must_use]
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    #[must_use]
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.limits.max_expansions = Some(max_expansions);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.duplicates, DuplicatePolicy::ByStateAndCost);
        assert_eq!(config.limits.max_expansions, None);
    }

    #[test]
    fn builder() {
        let config = SearchConfig::default()
            .with_duplicates(DuplicatePolicy::Replace)
            .with_max_expansions(12);
        assert_eq!(config.duplicates, DuplicatePolicy::Replace);
        assert_eq!(config.limits.max_expansions, Some(12));
        assert_eq!(config.duplicates.to_string(), "replace");
    }
}
