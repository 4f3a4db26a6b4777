#![doc(test(attr(deny(warnings))))]

//! Batch Entry drives the batch data-entry wizard: batch creation, template
//! selection and editing, and data entry against a persisted batch.

pub mod cli;
pub mod errors;
pub mod settings;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Batch Entry tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
