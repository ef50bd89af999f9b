//! Per-slot send dispatch and completion signalling.
//!
//! Each request slot owns its state and is served by at most one worker
//! task at a time. Dispatching a send spawns that worker and returns a
//! [`SendHandle`] whose oneshot resolves when the repeat loop finishes;
//! callers wait on the handle instead of polling.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::Client;
use tokio::sync::{mpsc, oneshot};

use crate::args::HttpMethod;
use crate::config::SessionConfig;
use crate::error::{AppError, AppResult, ValidationError};
use crate::events::{RunEvent, SlotPhase};
use crate::http::{RepeatPlan, RequestSpec, run_repeat};

#[cfg(test)]
mod tests;

/// One configured request definition with its repeat/delay settings.
#[derive(Debug, Clone)]
pub struct SlotDefinition {
    pub method: HttpMethod,
    pub url: String,
    pub params_text: String,
    pub headers_text: String,
    pub body: String,
    pub plan: RepeatPlan,
}

impl SlotDefinition {
    /// Session defaults applied to one URL from the list.
    #[must_use]
    pub fn from_session(session: &SessionConfig, url: String) -> Self {
        Self {
            method: session.method,
            url,
            params_text: session.params_text.clone(),
            headers_text: session.headers_text.clone(),
            body: session.body.clone(),
            plan: RepeatPlan {
                repeat_count: session.repeat_count,
                delay: session.delay,
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SendOutcome {
    pub slot: usize,
    pub runs: u32,
}

/// Completion signal for one dispatched send.
#[derive(Debug)]
pub struct SendHandle {
    pub slot: usize,
    done: oneshot::Receiver<SendOutcome>,
}

impl SendHandle {
    /// Resolves when the slot's repeat loop has finished. `None` only if
    /// the worker was torn down without reporting (runtime shutdown).
    pub async fn wait(self) -> Option<SendOutcome> {
        self.done.await.ok()
    }
}

struct SlotState {
    definition: SlotDefinition,
    busy: Arc<AtomicBool>,
}

/// Owns the slots and hands each send to a dedicated worker task.
pub struct Dispatcher {
    client: Client,
    events_tx: mpsc::Sender<RunEvent>,
    slots: Vec<SlotState>,
}

impl Dispatcher {
    #[must_use]
    pub const fn new(client: Client, events_tx: mpsc::Sender<RunEvent>) -> Self {
        Self {
            client,
            events_tx,
            slots: Vec::new(),
        }
    }

    pub fn add_slot(&mut self, definition: SlotDefinition) -> usize {
        let id = self.slots.len();
        self.slots.push(SlotState {
            definition,
            busy: Arc::new(AtomicBool::new(false)),
        });
        id
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Dispatches one send for `slot`.
    ///
    /// Serializes sends per slot: while the slot's worker is active a
    /// second dispatch fails with `SlotBusy`. Build warnings (malformed
    /// key/value fragments, non-JSON body) are emitted as log events
    /// before the worker starts.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown slot or one that is already
    /// sending.
    pub async fn send(&self, slot: usize) -> AppResult<SendHandle> {
        let state = self
            .slots
            .get(slot)
            .ok_or_else(|| AppError::validation(ValidationError::UnknownSlot { slot }))?;

        if state
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(AppError::validation(ValidationError::SlotBusy { slot }));
        }

        let definition = &state.definition;
        let (spec, issues) = RequestSpec::build(
            definition.method,
            &definition.url,
            &definition.params_text,
            &definition.headers_text,
            &definition.body,
            &definition.url,
        );

        for issue in &issues {
            self.emit(RunEvent::Log {
                slot,
                line: format!("[slot {}] WARNING: {}", slot, issue),
            })
            .await;
        }

        self.emit(RunEvent::Phase {
            slot,
            phase: SlotPhase::Sending,
        })
        .await;
        self.emit(RunEvent::Log {
            slot,
            line: format!(
                "[slot {}] Begin {} request to {} ({}x)",
                slot, spec.method, spec.url, definition.plan.repeat_count
            ),
        })
        .await;

        let (done_tx, done_rx) = oneshot::channel();
        let client = self.client.clone();
        let events_tx = self.events_tx.clone();
        let busy = Arc::clone(&state.busy);
        let plan = definition.plan;

        tokio::spawn(async move {
            run_repeat(&client, &spec, plan, slot, &events_tx).await;

            drop(
                events_tx
                    .send(RunEvent::Phase {
                        slot,
                        phase: SlotPhase::Finished,
                    })
                    .await,
            );
            drop(
                events_tx
                    .send(RunEvent::Log {
                        slot,
                        line: format!(
                            "[slot {}] --- Finished all {} runs ---",
                            slot, plan.repeat_count
                        ),
                    })
                    .await,
            );

            busy.store(false, Ordering::Release);
            drop(done_tx.send(SendOutcome {
                slot,
                runs: plan.repeat_count,
            }));
        });

        Ok(SendHandle {
            slot,
            done: done_rx,
        })
    }

    async fn emit(&self, event: RunEvent) {
        drop(self.events_tx.send(event).await);
    }
}
