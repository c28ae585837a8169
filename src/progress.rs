// src/progress.rs
/// Lightweight progress reporting for a run.
/// Frontends implement this to surface per-source status to users.
pub trait Progress {
    /// Called at the start with the number of used-answers sources.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// A source was fetched and yielded `words` valid words.
    fn item_done(&mut self, _name: &str, _words: usize) {}

    /// A source failed and was dropped.
    fn item_failed(&mut self, _name: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// Routes progress through the log macros (CLI).
#[derive(Default)]
pub struct LogProgress {
    total: usize,
    done: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn log(&mut self, msg: &str) {
        logf!("{msg}");
    }

    fn item_done(&mut self, name: &str, words: usize) {
        self.done += 1;
        logf!("[{}/{}] {name}: {words} words", self.done, self.total);
    }

    fn item_failed(&mut self, name: &str, reason: &str) {
        self.done += 1;
        logw!("[{}/{}] {name} dropped: {reason}", self.done, self.total);
    }
}
