// src/progress.rs
/// Progress reporting for the fetch/export steps.
/// The CLI implements this with a spinner; library callers can pass `NullProgress`.
pub trait Progress {
    /// A new step starts; `total` is the item count when known.
    fn begin(&mut self, _step: &str, _total: Option<usize>) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One item of the current step finished (`done` counted from 1).
    fn item_done(&mut self, _label: &str, _done: usize) {}

    /// Something the user should look at, without failing the run.
    fn warn(&mut self, _msg: &str) {}

    /// The current step ended successfully.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Collects every call; handy in tests.
#[derive(Default, Debug)]
pub struct RecordingProgress {
    pub events: Vec<String>,
}

impl Progress for RecordingProgress {
    fn begin(&mut self, step: &str, total: Option<usize>) {
        self.events.push(match total {
            Some(n) => format!("begin {step} ({n})"),
            None => format!("begin {step}"),
        });
    }
    fn log(&mut self, msg: &str) {
        self.events.push(format!("log {msg}"));
    }
    fn item_done(&mut self, label: &str, done: usize) {
        self.events.push(format!("done {label} #{done}"));
    }
    fn warn(&mut self, msg: &str) {
        self.events.push(format!("warn {msg}"));
    }
    fn finish(&mut self) {
        self.events.push("finish".to_string());
    }
}
