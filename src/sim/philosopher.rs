//! Philosophers and their dining loop
//!
//! A philosopher is plain seat state: name, two forks, a participation
//! flag, and counters. The loop itself runs inside whatever task the table
//! spawns for it, so the concurrency wrapper can change without touching
//! the dining logic.
//!
//! Every seat uses the same pickup order: left fork, then right fork. Fork
//! i is seat i's left and seat (i-1)'s right, so a full table where every
//! seat holds its left handle is a closed wait cycle with no way out.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, warn};

use crate::sim::fork::Fork;
use crate::utils::config::TimingConfig;
use crate::utils::errors::Result;

/// A seat at the table
pub struct Philosopher {
    /// Display name; also the identity recorded in fork ownership
    name: String,

    /// Fork to the philosopher's left
    left: Arc<Fork>,

    /// Fork to the philosopher's right
    right: Arc<Fork>,

    /// Cleared to ask the philosopher to leave after the current
    /// iteration. Never unparks a pickup already in progress.
    seated: AtomicBool,

    /// Completed meals
    meals_eaten: AtomicU64,

    /// Completed think pauses
    think_cycles: AtomicU64,

    /// Pause bounds for thinking and eating
    timing: TimingConfig,
}

impl Philosopher {
    pub(crate) fn new(name: String, left: Arc<Fork>, right: Arc<Fork>, timing: TimingConfig) -> Self {
        Self {
            name,
            left,
            right,
            seated: AtomicBool::new(true),
            meals_eaten: AtomicU64::new(0),
            think_cycles: AtomicU64::new(0),
            timing,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn left_fork(&self) -> &Arc<Fork> {
        &self.left
    }

    pub fn right_fork(&self) -> &Arc<Fork> {
        &self.right
    }

    /// Meals completed so far. Relaxed read; monitoring only.
    pub fn meals_eaten(&self) -> u64 {
        self.meals_eaten.load(Ordering::Relaxed)
    }

    /// Think pauses completed so far. Relaxed read; monitoring only.
    pub fn think_cycles(&self) -> u64 {
        self.think_cycles.load(Ordering::Relaxed)
    }

    pub fn is_seated(&self) -> bool {
        self.seated.load(Ordering::Relaxed)
    }

    /// Ask the philosopher to leave once the current iteration finishes
    pub fn leave_table(&self) {
        self.seated.store(false, Ordering::Relaxed);
    }

    /// The dining loop: think, pick up the left fork then the right, eat,
    /// and put both down. Runs until [`Philosopher::leave_table`], or
    /// until a pickup parks forever.
    pub async fn dine(&self) {
        while self.is_seated() {
            self.think().await;

            // Same nesting order at every seat: my left, then my right.
            let _left_held = self.left.pickup().await;

            // A table of one has the same fork on both sides; its handle is
            // already in hand and the lock is not reentrant.
            let _right_held = if Arc::ptr_eq(&self.left, &self.right) {
                None
            } else {
                Some(self.right.pickup().await)
            };

            self.eat().await;
        }

        debug!("{} left the table", self.name);
    }

    /// Think for a bounded random pause
    async fn think(&self) {
        self.think_cycles.fetch_add(1, Ordering::Relaxed);
        tokio::time::sleep(self.random_pause(self.timing.max_think_ms)).await;
    }

    /// Claim ownership of both forks, eat, and put them back.
    ///
    /// Both handles are already in hand here, so an ownership conflict
    /// means someone bypassed the pickup discipline (or the table has a
    /// single seat sharing one fork). Either way the meal is abandoned and
    /// the conflict logged; the task never crashes over it.
    async fn eat(&self) {
        match self.claim_forks() {
            Ok(()) => {
                self.meals_eaten.fetch_add(1, Ordering::Relaxed);
                tokio::time::sleep(self.random_pause(self.timing.max_eat_ms)).await;
            }
            Err(err) => {
                warn!("{}: {}, abandoning the meal", self.name, err);
            }
        }

        // Right first, then left. A no-op for anything never claimed.
        self.right.release(&self.name);
        self.left.release(&self.name);
    }

    fn claim_forks(&self) -> Result<()> {
        self.left.acquire(&self.name)?;
        self.right.acquire(&self.name)?;
        Ok(())
    }

    fn random_pause(&self, max_ms: u64) -> Duration {
        if max_ms == 0 {
            return Duration::ZERO;
        }

        Duration::from_millis(rand::thread_rng().gen_range(0..max_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_timing() -> TimingConfig {
        TimingConfig {
            max_think_ms: 1,
            max_eat_ms: 1,
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_uncontended_philosopher_eats_and_thinks() {
        let left = Arc::new(Fork::new(0));
        let right = Arc::new(Fork::new(1));
        let philosopher = Arc::new(Philosopher::new(
            "Socrates".to_string(),
            Arc::clone(&left),
            Arc::clone(&right),
            fast_timing(),
        ));

        let task = {
            let philosopher = Arc::clone(&philosopher);
            tokio::spawn(async move { philosopher.dine().await })
        };

        tokio::time::sleep(Duration::from_millis(100)).await;
        philosopher.leave_table();
        task.await.unwrap();

        assert!(philosopher.meals_eaten() >= 1);
        // Every meal is preceded by a think pause
        assert!(philosopher.think_cycles() >= philosopher.meals_eaten());

        // Both forks are back on the table
        assert!(left.is_free());
        assert!(right.is_free());
    }

    #[tokio::test]
    async fn test_unseated_philosopher_exits_immediately() {
        let philosopher = Philosopher::new(
            "Plato".to_string(),
            Arc::new(Fork::new(0)),
            Arc::new(Fork::new(1)),
            fast_timing(),
        );

        philosopher.leave_table();
        philosopher.dine().await;

        assert_eq!(philosopher.meals_eaten(), 0);
        assert_eq!(philosopher.think_cycles(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_single_seat_never_eats_but_never_blocks() {
        // One seat, one fork on both sides: the second ownership claim
        // always conflicts with the first, so the meal is abandoned every
        // cycle, but the loop keeps running and exits on request.
        let fork = Arc::new(Fork::new(0));
        let philosopher = Arc::new(Philosopher::new(
            "Diogenes".to_string(),
            Arc::clone(&fork),
            Arc::clone(&fork),
            fast_timing(),
        ));

        let task = {
            let philosopher = Arc::clone(&philosopher);
            tokio::spawn(async move { philosopher.dine().await })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        philosopher.leave_table();
        task.await.unwrap();

        assert_eq!(philosopher.meals_eaten(), 0);
        assert!(philosopher.think_cycles() >= 1);
        assert!(fork.is_free());
    }
}
