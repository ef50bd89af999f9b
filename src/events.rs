//! Structured events the core reports to its caller.
//!
//! The executor and dispatcher have exactly one output obligation: emit
//! [`RunEvent`]s over the channel supplied at setup. Presentation (console,
//! tests, anything else) lives entirely on the receiving side.

use std::time::Duration;

/// Outcome of one HTTP attempt within a repeat loop. Never mutated after
/// creation.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Response status, absent on transport failure.
    pub status: Option<u16>,
    pub elapsed: Duration,
    pub size_bytes: u64,
    /// Response body, pretty-printed when it parses as JSON, truncated to
    /// 200 characters.
    pub body_preview: String,
    /// Transport failure description; `None` on any completed exchange,
    /// whatever its status code.
    pub error: Option<String>,
}

impl RunResult {
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Per-send slot lifecycle. Finished is reached whether iterations
/// succeeded or failed; there is no aborted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPhase {
    Idle,
    Sending,
    Running { iteration: u32, total: u32 },
    Finished,
}

impl std::fmt::Display for SlotPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotPhase::Idle => f.write_str("Idle"),
            SlotPhase::Sending => f.write_str("Sending..."),
            SlotPhase::Running { iteration, total } => {
                write!(f, "Running ({}/{})", iteration, total)
            }
            SlotPhase::Finished => f.write_str("Finished."),
        }
    }
}

#[derive(Debug, Clone)]
pub enum RunEvent {
    /// Free-text log line, already slot-labelled.
    Log { slot: usize, line: String },
    /// Slot state transition.
    Phase { slot: usize, phase: SlotPhase },
    /// One repeat-loop iteration completed (successfully or not).
    Result {
        slot: usize,
        iteration: u32,
        total: u32,
        result: RunResult,
    },
}

/// Millisecond rendering with two decimals, e.g. `12.34`.
#[must_use]
pub fn format_elapsed_ms(elapsed: Duration) -> String {
    let micros = elapsed.as_micros();
    let whole = micros / 1000;
    let frac = (micros % 1000) / 10;
    format!("{}.{:02}", whole, frac)
}
