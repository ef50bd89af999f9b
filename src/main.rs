mod args;
mod config;
mod entry;
mod error;
mod events;
mod http;
mod kv;
mod logger;
mod output;
mod run;
mod urls;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
