use thiserror::Error;

use bge_domain::DomainError;

use crate::gateway::GatewayError;
use crate::template_editor::RequiredFieldReport;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("{0}")]
    RequiredFields(RequiredFieldReport),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Row {0} does not exist")]
    RowOutOfRange(usize),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}
