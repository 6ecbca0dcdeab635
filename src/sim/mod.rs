//! The dining simulation
//!
//! This module provides the simulation core:
//!
//! - **Fork**: an exclusive-use resource with an owner and a pickup lock
//! - **Philosopher**: plain seat state plus the think/pickup/eat loop
//! - **Table**: wires seats and forks into a ring and runs the lifecycle
//!
//! # Architecture
//!
//! ```text
//! ... -- fork i -- seat i -- fork i+1 -- seat i+1 -- ...   (indices mod N)
//! ```
//!
//! Seat i holds fork i in its left hand and fork (i+1) mod N in its right,
//! so every fork is shared by exactly two neighboring seats. Every seat
//! picks up left before right, so a full table can close the wait cycle
//! and deadlock. That is the point: the table detects the wreckage
//! afterwards rather than preventing it.

pub mod fork;
pub mod philosopher;
pub mod table;

// Re-export commonly used types
pub use fork::{Fork, ForkId};
pub use philosopher::Philosopher;
pub use table::{SeatReport, Table};
