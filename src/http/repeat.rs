use std::time::Duration;

use reqwest::Client;
use tokio::sync::mpsc;
use tokio::time::sleep;

use crate::events::{RunEvent, SlotPhase, format_elapsed_ms};

use super::executor::execute;
use super::request::RequestSpec;

#[derive(Debug, Clone, Copy)]
pub struct RepeatPlan {
    pub repeat_count: u32,
    pub delay: Duration,
}

/// Fires `spec` `repeat_count` times sequentially, sleeping `delay`
/// between iterations only (never after the last). Fire-and-continue: a
/// failed iteration is reported and the loop moves on. Events go out on
/// `events_tx`; a closed receiver does not stop the loop.
pub async fn run_repeat(
    client: &Client,
    spec: &RequestSpec,
    plan: RepeatPlan,
    slot: usize,
    events_tx: &mpsc::Sender<RunEvent>,
) {
    for iteration in 1..=plan.repeat_count {
        emit(
            events_tx,
            RunEvent::Phase {
                slot,
                phase: SlotPhase::Running {
                    iteration,
                    total: plan.repeat_count,
                },
            },
        )
        .await;

        let result = execute(client, spec).await;
        let prefix = format!("[slot {}] Run {}/{}", slot, iteration, plan.repeat_count);

        match result.error.as_deref() {
            None => {
                let status = result.status.unwrap_or(0);
                emit(
                    events_tx,
                    RunEvent::Log {
                        slot,
                        line: format!(
                            "{} > status: {}, time: {}ms, size: {} bytes",
                            prefix,
                            status,
                            format_elapsed_ms(result.elapsed),
                            result.size_bytes
                        ),
                    },
                )
                .await;
                if !result.body_preview.is_empty() {
                    emit(
                        events_tx,
                        RunEvent::Log {
                            slot,
                            line: format!("{} > body preview: {}", prefix, result.body_preview),
                        },
                    )
                    .await;
                }
            }
            Some(error) => {
                emit(
                    events_tx,
                    RunEvent::Log {
                        slot,
                        line: format!("{} !!! request failed: {}", prefix, error),
                    },
                )
                .await;
            }
        }

        emit(
            events_tx,
            RunEvent::Result {
                slot,
                iteration,
                total: plan.repeat_count,
                result,
            },
        )
        .await;

        if iteration < plan.repeat_count && !plan.delay.is_zero() {
            sleep(plan.delay).await;
        }
    }
}

async fn emit(events_tx: &mpsc::Sender<RunEvent>, event: RunEvent) {
    drop(events_tx.send(event).await);
}
