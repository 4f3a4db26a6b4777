//! bge-core
//!
//! Screen controllers and gateway contract for the batch entry wizard.
//! Depends on bge-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod batch_creator;
pub mod batch_selector;
pub mod catalog;
pub mod entry_sheet;
pub mod error;
pub mod gateway;
pub mod memory;
pub mod notify;
pub mod settings;
pub mod template_editor;
pub mod template_selector;
pub mod wizard;

pub use batch_creator::*;
pub use batch_selector::*;
pub use catalog::Catalog;
pub use entry_sheet::*;
pub use error::CoreError;
pub use gateway::*;
pub use memory::InMemoryGateway;
pub use notify::*;
pub use settings::WizardSettings;
pub use template_editor::*;
pub use template_selector::*;
pub use wizard::*;

#[cfg(test)]
mod tests;
