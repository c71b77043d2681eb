#![doc(test(attr(deny(warnings))))]

//! Assist Form drives a three-step financial assistance application: field
//! validation, step navigation, debounced local auto-save, AI writing
//! suggestions and submission, plus a line-oriented shell on top.

pub mod cli;
pub mod errors;
pub mod i18n;
pub mod navigation;
pub mod persistence;
pub mod session;
pub mod submission;
pub mod suggestion;
pub mod utils;

pub use assist_config as config;
pub use assist_core as core;
pub use assist_domain as domain;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Assist Form tracing initialized.");
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
