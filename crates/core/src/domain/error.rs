// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Invalid position: {0} (positions start at 1)")]
    InvalidPosition(i64),

    #[error("Invalid service class: {0} (expected 'N' or 'P')")]
    InvalidClass(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
