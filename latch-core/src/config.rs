//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Default bound on transitions drained by a single outermost call.
pub const DEFAULT_MAX_CHAINED_TRANSITIONS: usize = 10_000;

/// Tunables shared by a controller and every observable derived from it.
///
/// # Example
///
/// ```rust
/// use latch_core::{Controller, ReactiveConfig};
///
/// let config = ReactiveConfig {
///     max_chained_transitions: 64,
/// };
/// let controller: Controller<u32> = Controller::with_config(config);
/// assert_eq!(controller.config().max_chained_transitions, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactiveConfig {
    /// Maximum number of queued transitions a node may run while draining
    /// one outermost `set`/`reset`. A handler that unconditionally sets its
    /// own controller would otherwise never terminate.
    pub max_chained_transitions: usize,
}

impl Default for ReactiveConfig {
    fn default() -> Self {
        Self {
            max_chained_transitions: DEFAULT_MAX_CHAINED_TRANSITIONS,
        }
    }
}
