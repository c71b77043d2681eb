//! assist-domain
//!
//! Pure data model for the assistance application form (fields, steps,
//! records, submission receipts). No I/O, no validation rules, no storage.

pub mod field;
pub mod locale;
pub mod record;
pub mod step;
pub mod submission;

pub use field::*;
pub use locale::*;
pub use record::*;
pub use step::*;
pub use submission::*;
