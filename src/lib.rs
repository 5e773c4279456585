#![doc(test(attr(deny(warnings))))]

//! FocusFund offers the savings-goal ledger, lifetime statistics, and
//! persistence primitives that power the FocusFund tracker and its CLI.

pub mod app;
pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("FocusFund tracing initialized.");
    });
}
