use thiserror::Error;

/// Failures while searching.
///
/// Exhausting the frontier is not an error, searches report it as `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// `Problem::actions` offered an action that `Problem::result` can't apply.
    #[error("Action {action} has no result at state {state}")]
    UndefinedTransition { state: String, action: String },
    #[error("Search aborted after expanding {expansions} nodes (limit: {limit})")]
    Aborted { expansions: usize, limit: usize },
}

impl SearchError {
    pub(crate) fn undefined_transition<St: std::fmt::Debug, A: std::fmt::Debug>(
        s: &St,
        a: &A,
    ) -> Self {
        Self::UndefinedTransition {
            state: format!("{s:?}"),
            action: format!("{a:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = SearchError::undefined_transition(&3u8, &"left");
        assert_eq!(e.to_string(), "Action \"left\" has no result at state 3");

        let e = SearchError::Aborted {
            expansions: 10,
            limit: 10,
        };
        assert_eq!(
            e.to_string(),
            "Search aborted after expanding 10 nodes (limit: 10)"
        );
    }
}
