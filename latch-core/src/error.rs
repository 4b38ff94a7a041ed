//! Error types for the propagation engine.
//!
//! Ordinary use of controllers and combinators cannot fail. The one
//! detectable failure is a runaway reentrancy loop, where an entry handler
//! keeps requesting transitions on the node it is reacting to.

use thiserror::Error;

use crate::reactive::NodeId;

/// Errors reported by [`Controller::try_set`](crate::reactive::Controller::try_set)
/// and [`Controller::try_reset`](crate::reactive::Controller::try_reset).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReactiveError {
    /// A node drained more queued transitions in one call than its
    /// configuration allows. The remaining queue was discarded.
    #[error("{node} exceeded {limit} chained transitions; pending transitions discarded")]
    TransitionLimit {
        /// The node whose queue overflowed.
        node: NodeId,
        /// The configured limit.
        limit: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ReactiveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_limit_message_names_node_and_limit() {
        let node = NodeId::new();
        let err = ReactiveError::TransitionLimit { node, limit: 8 };

        let message = err.to_string();
        assert!(message.contains(&node.to_string()));
        assert!(message.contains("8 chained transitions"));
    }
}
