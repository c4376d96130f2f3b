//! Fractional progress reporting

/// Receives progress as a fraction in `0.0..=1.0`.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, fraction: f64);
}

impl<F> ProgressObserver for F
where
    F: Fn(f64) + Send + Sync,
{
    fn on_progress(&self, fraction: f64) {
        self(fraction)
    }
}
