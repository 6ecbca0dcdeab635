//! Dining-philosophers deadlock simulator
//!
//! Simulates N philosophers seated at a ring-shaped table, each needing the
//! two forks adjacent to their seat before they can eat. Every seat uses
//! the same naive pickup order (left fork, then right fork), which is
//! exactly what allows the classic circular-wait deadlock: a full table
//! where everyone holds their left fork and waits forever on their right.
//!
//! The deadlock is not prevented; it is detected after the fact. The table
//! is asked to stop, given quiet time, and then polled for seats whose
//! dining task never terminated.
//!
//! # Architecture
//!
//! The crate is structured into a few key modules:
//!
//! - **sim**: forks, philosophers, and the table that wires and runs them
//! - **observability**: tracing and logging initialization
//! - **utils**: configuration loading and error types

// Public module exports
pub mod observability;
pub mod sim;
pub mod utils;

// Re-export commonly used types
pub use sim::fork::{Fork, ForkId};
pub use sim::philosopher::Philosopher;
pub use sim::table::{SeatReport, Table};
pub use utils::config::SimConfig;
pub use utils::errors::{Result, SimError};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
