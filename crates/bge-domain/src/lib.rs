//! bge-domain
//!
//! Pure domain models for batch data entry (Batch, Template, FieldRow, Entry).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod batch;
pub mod common;
pub mod entry;
pub mod template;

pub use batch::*;
pub use common::*;
pub use entry::*;
pub use template::*;
