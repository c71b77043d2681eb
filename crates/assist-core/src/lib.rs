//! assist-core
//!
//! Validation rules, step completeness, and the in-memory form store.
//! Depends on assist-domain. No async, no terminal I/O, no concrete storage.

pub mod completeness;
pub mod error;
pub mod i18n;
pub mod storage;
pub mod store;
pub mod validation;

pub use completeness::*;
pub use error::CoreError;
pub use i18n::*;
pub use storage::SlotStorage;
pub use store::*;
pub use validation::*;
