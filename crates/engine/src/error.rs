//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidAmount`] thrown when an amount is not acceptable for the record.
//! - [`InvalidSplit`] thrown when a custom split is negative or exceeds the amount.
//! - [`InvalidParty`] thrown when a name or identity is not one of the two parties.
//! - [`KeyNotFound`] thrown when a record key is not in the current snapshot.
//! - [`WrongKind`] thrown when an operation targets a record of another kind.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidSplit`]: EngineError::InvalidSplit
//!  [`InvalidParty`]: EngineError::InvalidParty
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`WrongKind`]: EngineError::WrongKind
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid split: {0}")]
    InvalidSplit(String),
    #[error("Invalid party: {0}")]
    InvalidParty(String),
    #[error("Invalid settlement: {0}")]
    InvalidSettlement(String),
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Wrong record kind: {0}")]
    WrongKind(String),
    #[error("Incomplete engine: {0}")]
    Incomplete(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidSplit(a), Self::InvalidSplit(b)) => a == b,
            (Self::InvalidParty(a), Self::InvalidParty(b)) => a == b,
            (Self::InvalidSettlement(a), Self::InvalidSettlement(b)) => a == b,
            (Self::InvalidPeriod(a), Self::InvalidPeriod(b)) => a == b,
            (Self::InvalidRecord(a), Self::InvalidRecord(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::WrongKind(a), Self::WrongKind(b)) => a == b,
            (Self::Incomplete(a), Self::Incomplete(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
