use clap::Parser;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::args::VolleyArgs;
use crate::config::{load_config, resolve_session};
use crate::error::AppResult;
use crate::http::build_client;
use crate::output::print_events;
use crate::run::{Dispatcher, SlotDefinition};
use crate::urls::seed_urls;

const EVENT_CHANNEL_CAPACITY: usize = 256;

pub(crate) fn run() -> AppResult<()> {
    let args = VolleyArgs::parse();

    crate::logger::init_logging(args.verbose);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

async fn run_async(args: VolleyArgs) -> AppResult<()> {
    let config_file = match load_config(args.config.as_deref()) {
        Ok(file) => file,
        Err(err) => {
            warn!("{}; falling back to built-in defaults.", err);
            None
        }
    };
    let session = resolve_session(&args, config_file.as_ref());

    // An explicit --url means exactly one slot; otherwise the URL list
    // seeds one slot per line.
    let urls = if args.url.is_some() {
        vec![session.url.clone()]
    } else {
        seed_urls(args.urls_file.as_deref(), &session.url)
    };

    let client = build_client(session.timeout)?;
    let (events_tx, events_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let printer = tokio::spawn(print_events(events_rx));

    let mut dispatcher = Dispatcher::new(client, events_tx);
    for url in urls {
        dispatcher.add_slot(SlotDefinition::from_session(&session, url));
    }

    let mut handles = Vec::with_capacity(dispatcher.slot_count());
    for slot in 0..dispatcher.slot_count() {
        handles.push(dispatcher.send(slot).await?);
    }

    let mut completed = 0usize;
    for handle in handles {
        let slot = handle.slot;
        if handle.wait().await.is_some() {
            completed = completed.saturating_add(1);
        } else {
            warn!("Slot {} worker ended without reporting.", slot);
        }
    }

    // Dropping the dispatcher closes the event channel; the printer exits
    // once it has drained the remaining events.
    drop(dispatcher);
    drop(printer.await);

    info!("All sends complete ({} slots).", completed);
    Ok(())
}
