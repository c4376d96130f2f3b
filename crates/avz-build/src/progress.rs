//! Build progress accounting.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::orchestrator::UnitOutcome;

/// Units finished so far out of the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub finished: usize,
    pub total: usize,
}

impl Progress {
    /// Whole percentage of units finished; 100 once every unit is done.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.finished.min(self.total) * 100) / self.total) as u8
    }
}

/// Shared counter of finished units.
///
/// Incrementing is the only mutation, so every value handed out is strictly
/// larger than the one before it.
#[derive(Debug)]
pub struct ProgressCounter {
    finished: AtomicUsize,
    total: usize,
}

impl ProgressCounter {
    pub fn new(total: usize) -> Self {
        Self {
            finished: AtomicUsize::new(0),
            total,
        }
    }

    /// Record one finished unit.
    pub fn advance(&self) -> Progress {
        let finished = self.finished.fetch_add(1, Ordering::SeqCst) + 1;
        Progress {
            finished,
            total: self.total,
        }
    }

    pub fn current(&self) -> Progress {
        Progress {
            finished: self.finished.load(Ordering::SeqCst),
            total: self.total,
        }
    }
}

/// Notified after each unit finishes, successfully or not.
pub trait BuildObserver: Send + Sync {
    fn on_unit_finished(&self, progress: Progress, outcome: &UnitOutcome);
}

impl<F> BuildObserver for F
where
    F: Fn(Progress, &UnitOutcome) + Send + Sync,
{
    fn on_unit_finished(&self, progress: Progress, outcome: &UnitOutcome) {
        self(progress, outcome)
    }
}
