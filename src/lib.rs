//! Core library for the `volley` CLI.
//!
//! This crate provides the internal building blocks used by the binary:
//! CLI argument types, configuration resolution, key/value text parsing,
//! request building and execution, the repeat loop, and the per-slot send
//! dispatcher. The primary user-facing interface is the `volley`
//! command-line application; library APIs may evolve as the CLI grows.
pub mod args;
pub mod config;
pub mod error;
pub mod events;
pub mod http;
pub mod kv;
pub mod run;
pub mod urls;
