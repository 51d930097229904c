use log::info;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Track progress of team score fetching across workers
pub struct ScoreProgress {
    total: usize,
    fetched: AtomicUsize,
    failed: AtomicUsize,
}

impl ScoreProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            fetched: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
        }
    }

    pub fn record_fetched(&self) {
        self.fetched.fetch_add(1, Ordering::SeqCst);
        print_marker();
        self.log_progress();
    }

    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::SeqCst);
        self.log_progress();
    }

    pub fn fetched(&self) -> usize {
        self.fetched.load(Ordering::SeqCst)
    }

    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    pub fn current_count(&self) -> usize {
        self.fetched() + self.failed()
    }

    /// Terminate the marker line.
    pub fn finish(&self) {
        println!();
    }

    fn log_progress(&self) {
        let current = self.current_count();
        if should_log(current, self.total) {
            info!(
                "  → Scores: {}/{} ({} fetched, {} failed)",
                current,
                self.total,
                self.fetched(),
                self.failed()
            );
        }
    }
}

fn print_marker() {
    let mut stdout = std::io::stdout();
    let _ = write!(stdout, ".");
    let _ = stdout.flush();
}

fn should_log(current: usize, total: usize) -> bool {
    is_milestone(current) || is_complete(current, total)
}

fn is_milestone(count: usize) -> bool {
    count % 10 == 0
}

fn is_complete(current: usize, total: usize) -> bool {
    current == total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let progress = ScoreProgress::new(3);
        progress.record_fetched();
        progress.record_fetched();
        progress.record_failed();

        assert_eq!(progress.fetched(), 2);
        assert_eq!(progress.failed(), 1);
        assert_eq!(progress.current_count(), 3);
    }

    #[test]
    fn test_should_log() {
        assert!(should_log(10, 25));
        assert!(should_log(25, 25));
        assert!(!should_log(7, 25));
    }
}
