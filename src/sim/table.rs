//! The table: seats, forks, and the dining lifecycle
//!
//! The table owns the full set of forks and philosophers, wires them into
//! a closed ring, and runs the concurrent lifecycle: spawn one dining task
//! per seat, snapshot counters for reporting, ask everyone to leave, and,
//! after a caller-supplied grace delay, poll which tasks never came back.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::sim::fork::Fork;
use crate::sim::philosopher::Philosopher;
use crate::utils::config::SimConfig;
use crate::utils::errors::Result;

/// Per-seat counter snapshot
///
/// Counters are read with relaxed ordering and no cross-seat coordination;
/// a value may lag an in-flight increment. Monitoring-grade, not control.
#[derive(Debug, Clone)]
pub struct SeatReport {
    pub name: String,
    pub meals_eaten: u64,
    pub think_cycles: u64,
}

/// The dining table
pub struct Table {
    forks: Vec<Arc<Fork>>,
    philosophers: Vec<Arc<Philosopher>>,
    tasks: Vec<JoinHandle<()>>,
}

impl Table {
    /// Lay the table for the configured seats.
    ///
    /// Fork ids come from a sequence owned here. Fork i becomes seat i's
    /// left fork and seat (i-1) mod N's right fork, which is the sole
    /// mechanism closing the ring.
    pub fn new(config: &SimConfig) -> Result<Self> {
        config.validate()?;

        let names = &config.table.names;
        let forks: Vec<Arc<Fork>> = (0..names.len())
            .map(|id| Arc::new(Fork::new(id)))
            .collect();

        let philosophers: Vec<Arc<Philosopher>> = names
            .iter()
            .enumerate()
            .map(|(seat, name)| {
                let left = Arc::clone(&forks[seat]);
                let right = Arc::clone(&forks[(seat + 1) % names.len()]);

                debug!(
                    "{} seated with left fork {} and right fork {}",
                    name,
                    left.id(),
                    right.id()
                );

                Arc::new(Philosopher::new(name.clone(), left, right, config.timing))
            })
            .collect();

        Ok(Self {
            forks,
            philosophers,
            tasks: Vec::new(),
        })
    }

    /// Start one dining task per seat. Returns immediately.
    pub fn start(&mut self) {
        for philosopher in &self.philosophers {
            let philosopher = Arc::clone(philosopher);
            self.tasks
                .push(tokio::spawn(async move { philosopher.dine().await }));
        }

        info!("dining started with {} seats", self.philosophers.len());
    }

    /// Snapshot every seat's counters
    pub fn report(&self) -> Vec<SeatReport> {
        self.philosophers
            .iter()
            .map(|philosopher| SeatReport {
                name: philosopher.name().to_string(),
                meals_eaten: philosopher.meals_eaten(),
                think_cycles: philosopher.think_cycles(),
            })
            .collect()
    }

    /// Ask every philosopher to leave after its current iteration.
    ///
    /// Tasks already parked on a fork handle are not interrupted; there is
    /// no mechanism that could unpark them.
    pub fn stop(&self) {
        for philosopher in &self.philosophers {
            philosopher.leave_table();
        }

        info!("dining stopped");
    }

    /// Names of the seats whose dining task is still running.
    ///
    /// This is a liveness poll, not a wait-for-graph: a running task is
    /// evidence of permanent blocking only after [`Table::stop`] has been
    /// given enough quiet time for every unblocked seat to finish its
    /// iteration and exit. The caller owns that grace delay; a seat that
    /// is merely slow will be misreported if the grace is too short.
    pub fn detect_stuck(&self) -> Vec<String> {
        self.philosophers
            .iter()
            .zip(&self.tasks)
            .filter(|(_, task)| !task.is_finished())
            .map(|(philosopher, _)| philosopher.name().to_string())
            .collect()
    }

    pub fn seats(&self) -> &[Arc<Philosopher>] {
        &self.philosophers
    }

    pub fn forks(&self) -> &[Arc<Fork>] {
        &self.forks
    }
}
