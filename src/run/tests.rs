use std::future::Future;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use tokio::sync::mpsc;

use super::*;
use crate::events::{RunEvent, SlotPhase};
use crate::http::build_client;

fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

/// Answers `count` connections with 200 OK, then refuses the rest.
fn spawn_limited_server(count: usize) -> Result<String, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    thread::spawn(move || {
        for _ in 0..count {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut buffer = [0u8; 2048];
            if stream.read(&mut buffer).is_err() {
                return;
            }
            if stream
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK")
                .is_err()
            {
                return;
            }
            drop(stream.flush());
        }
    });
    Ok(format!("http://{}", addr))
}

fn definition(url: String, repeat_count: u32) -> SlotDefinition {
    SlotDefinition {
        method: HttpMethod::Get,
        url,
        params_text: String::new(),
        headers_text: String::new(),
        body: String::new(),
        plan: RepeatPlan {
            repeat_count,
            delay: Duration::ZERO,
        },
    }
}

#[test]
fn unknown_slot_is_rejected() -> Result<(), String> {
    run_async_test(async {
        let client = build_client(Duration::from_secs(2)).map_err(|err| format!("{}", err))?;
        let (events_tx, _events_rx) = mpsc::channel(16);
        let dispatcher = Dispatcher::new(client, events_tx);
        if dispatcher.send(0).await.is_err() {
            Ok(())
        } else {
            Err("Expected unknown slot to be rejected".to_owned())
        }
    })
}

#[test]
fn completion_is_signalled_once_per_send() -> Result<(), String> {
    run_async_test(async {
        let client = build_client(Duration::from_secs(5)).map_err(|err| format!("{}", err))?;
        let url = spawn_limited_server(2)?;
        let (events_tx, mut events_rx) = mpsc::channel(128);
        let mut dispatcher = Dispatcher::new(client, events_tx);
        let slot = dispatcher.add_slot(definition(url, 2));

        let drain = tokio::spawn(async move {
            let mut events = Vec::new();
            while let Some(event) = events_rx.recv().await {
                events.push(event);
            }
            events
        });

        let handle = dispatcher
            .send(slot)
            .await
            .map_err(|err| format!("send: {}", err))?;
        let outcome = handle.wait().await.ok_or("Completion never signalled")?;
        if outcome.runs != 2 || outcome.slot != slot {
            return Err(format!("Unexpected outcome: {:?}", outcome));
        }

        drop(dispatcher);
        let events = drain.await.map_err(|err| format!("join: {}", err))?;

        let mut saw_sending = false;
        let mut saw_finished = false;
        let mut results = 0u32;
        for event in events {
            match event {
                RunEvent::Phase { phase, .. } => match phase {
                    SlotPhase::Sending => saw_sending = true,
                    SlotPhase::Finished => saw_finished = true,
                    SlotPhase::Idle | SlotPhase::Running { .. } => {}
                },
                RunEvent::Result { .. } => results = results.saturating_add(1),
                RunEvent::Log { .. } => {}
            }
        }
        if !saw_sending || !saw_finished {
            return Err("Missing Sending/Finished phase events".to_owned());
        }
        if results == 2 {
            Ok(())
        } else {
            Err(format!("Expected 2 results, got {}", results))
        }
    })
}

#[test]
fn busy_slot_rejects_second_send() -> Result<(), String> {
    run_async_test(async {
        let client = build_client(Duration::from_secs(5)).map_err(|err| format!("{}", err))?;
        let url = spawn_limited_server(4)?;
        let (events_tx, mut events_rx) = mpsc::channel(128);
        let mut dispatcher = Dispatcher::new(client, events_tx);
        // Long enough delay to keep the worker alive while we re-dispatch.
        let mut slow = definition(url, 2);
        slow.plan.delay = Duration::from_millis(300);
        let slot = dispatcher.add_slot(slow);

        let drain = tokio::spawn(async move { while events_rx.recv().await.is_some() {} });

        let handle = dispatcher
            .send(slot)
            .await
            .map_err(|err| format!("send: {}", err))?;
        if dispatcher.send(slot).await.is_ok() {
            return Err("Second send on a busy slot must fail".to_owned());
        }

        if handle.wait().await.is_none() {
            return Err("Completion never signalled".to_owned());
        }
        // After completion the slot accepts a new send.
        let second = dispatcher
            .send(slot)
            .await
            .map_err(|err| format!("re-send: {}", err))?;
        if second.wait().await.is_none() {
            return Err("Second completion never signalled".to_owned());
        }

        drop(dispatcher);
        drop(drain.await);
        Ok(())
    })
}

#[test]
fn mid_loop_failure_still_runs_remaining_iterations() -> Result<(), String> {
    run_async_test(async {
        let client = build_client(Duration::from_secs(2)).map_err(|err| format!("{}", err))?;
        // One good answer, then connection refused for runs 2 and 3.
        let url = spawn_limited_server(1)?;
        let (events_tx, mut events_rx) = mpsc::channel(128);
        let mut dispatcher = Dispatcher::new(client, events_tx);
        let slot = dispatcher.add_slot(definition(url, 3));

        let drain = tokio::spawn(async move {
            let mut results = Vec::new();
            while let Some(event) = events_rx.recv().await {
                if let RunEvent::Result {
                    iteration, result, ..
                } = event
                {
                    results.push((iteration, result.error.is_some()));
                }
            }
            results
        });

        let handle = dispatcher
            .send(slot)
            .await
            .map_err(|err| format!("send: {}", err))?;
        if handle.wait().await.is_none() {
            return Err("Completion never signalled".to_owned());
        }
        drop(dispatcher);

        let results = drain.await.map_err(|err| format!("join: {}", err))?;
        match results.as_slice() {
            [(1, false), (2, true), (3, true)] => Ok(()),
            other => Err(format!("Unexpected result sequence: {:?}", other)),
        }
    })
}
