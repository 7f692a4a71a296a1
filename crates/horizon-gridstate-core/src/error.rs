//! Error types for Horizon GridState.
//!
//! The engines recover from every data-shaped edge case locally (clamping,
//! input coercion), so the only errors surfaced here are programming-contract
//! violations in how a host wires its view scope.

/// Result type alias for GridState operations.
pub type Result<T> = std::result::Result<T, GridStateError>;

/// Errors that can occur wiring the GridState engines.
#[derive(Debug, thiserror::Error)]
pub enum GridStateError {
    /// A context was consumed from a [`crate::ViewScope`] that never
    /// provided it. Silently defaulting here would mask a wiring bug in the
    /// host view, so this fails loudly instead.
    #[error("no '{context}' provided in this view scope")]
    MissingContext { context: &'static str },

    /// A context was provided twice in the same [`crate::ViewScope`]. Each
    /// list view owns exactly one instance of each engine.
    #[error("'{context}' already provided in this view scope")]
    ContextAlreadyProvided { context: &'static str },
}

impl GridStateError {
    /// The type name of the context involved.
    pub fn context(&self) -> &'static str {
        match self {
            Self::MissingContext { context } => context,
            Self::ContextAlreadyProvided { context } => context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_the_context() {
        let err = GridStateError::MissingContext {
            context: "Pagination",
        };
        assert_eq!(err.to_string(), "no 'Pagination' provided in this view scope");
        assert_eq!(err.context(), "Pagination");
    }
}
