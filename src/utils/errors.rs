//! Error types for the simulator
//!
//! Fork conflicts are recoverable and handled at the philosopher that hit
//! them; nothing propagates past the table. A deadlocked table is not an
//! error value at all: it is a steady state that only the liveness poll
//! and the process exit status make visible.

use thiserror::Error;

use crate::sim::fork::ForkId;

pub type Result<T> = std::result::Result<T, SimError>;

/// Errors that can occur in the simulation
#[derive(Debug, Error)]
pub enum SimError {
    /// A fork's check-and-set found an existing holder.
    #[error("fork {fork} already in use by {held_by} (requested by {requested_by})")]
    ForkInUse {
        fork: ForkId,
        held_by: String,
        requested_by: String,
    },

    /// The configuration deserialized but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configuration source could not be read or deserialized.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fork_in_use_display_names_everyone() {
        let err = SimError::ForkInUse {
            fork: 3,
            held_by: "Kant".to_string(),
            requested_by: "Hegel".to_string(),
        };

        let message = err.to_string();
        assert!(message.contains("fork 3"));
        assert!(message.contains("Kant"));
        assert!(message.contains("Hegel"));
    }
}
