#![doc(test(attr(deny(warnings))))]

//! Obligation Core keeps payable/receivable obligations consistent with a
//! cash-movement ledger: settlement synchronization, cascading deletion,
//! derived status, and the filter/sort/select engine behind list views.

pub mod cascade;
pub mod clock;
pub mod config;
pub mod domain;
pub mod errors;
pub mod format;
pub mod query;
pub mod status;
pub mod storage;
pub mod store;
pub mod sync;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("obligation_core=info".parse().unwrap());
        fmt().with_env_filter(filter).init();
        tracing::info!("Obligation Core tracing initialized.");
    });
}
