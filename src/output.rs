//! Console rendering of the core's event stream.

use chrono::Local;
use tokio::sync::mpsc;

use crate::events::{RunEvent, SlotPhase};

/// Drains the event channel and prints timestamped lines until every
/// sender is gone.
pub async fn print_events(mut events_rx: mpsc::Receiver<RunEvent>) {
    while let Some(event) = events_rx.recv().await {
        match event {
            RunEvent::Log { line, .. } => print_line(&line),
            RunEvent::Phase { slot, phase } => {
                // Idle is the initial state; only transitions are worth a line.
                if phase != SlotPhase::Idle {
                    print_line(&format!("[slot {}] status: {}", slot, phase));
                }
            }
            RunEvent::Result { .. } => {
                // Results are already mirrored as log lines by the repeat
                // loop; structured values are for programmatic consumers.
            }
        }
    }
}

fn print_line(line: &str) {
    println!("{} {}", Local::now().format("%H:%M:%S%.3f"), line);
}
