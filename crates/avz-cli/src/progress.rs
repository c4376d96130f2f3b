//! Terminal progress bars.

use std::sync::Arc;

use avz_build::{Progress, UnitOutcome};
use avz_tools::ProgressObserver;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

fn percent_bar(prefix: &str) -> ProgressBar {
    let bar = ProgressBar::new(100);
    let style = ProgressStyle::with_template("{prefix:>12.cyan.bold} [{bar:30}] {pos:>3}% {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    bar.set_style(style);
    bar.set_prefix(prefix.to_string());
    bar
}

/// Bar fed by download progress fractions.
///
/// Stays hidden until the first report so it does not draw over prompts.
pub fn download_bar(prefix: &str) -> (ProgressBar, Arc<dyn ProgressObserver>) {
    let bar = percent_bar(prefix);
    bar.set_draw_target(ProgressDrawTarget::hidden());
    let handle = bar.clone();
    let observer: Arc<dyn ProgressObserver> = Arc::new(move |fraction: f64| {
        if handle.is_hidden() {
            handle.set_draw_target(ProgressDrawTarget::stderr());
        }
        handle.set_position((fraction.clamp(0.0, 1.0) * 100.0).round() as u64);
    });
    (bar, observer)
}

/// Bar fed by finished compile units.
pub fn build_bar() -> ProgressBar {
    percent_bar("Compiling")
}

/// Update `bar` after a unit finishes.
pub fn on_unit(bar: &ProgressBar, progress: Progress, outcome: &UnitOutcome) {
    let name = outcome
        .unit()
        .source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    bar.set_position(u64::from(progress.percent()));
    bar.set_message(format!("{}/{} {}", progress.finished, progress.total, name));
}

/// Clear `bar` and hand back `result` unchanged, so an error propagated with
/// `?` afterwards is not printed under a stale bar line.
pub fn cleared<T>(bar: &ProgressBar, result: T) -> T {
    bar.finish_and_clear();
    result
}
