use thiserror::Error;

use crate::models::RequestStatus;

/// Typed failures surfaced by the adoption and billing services. The
/// boundary layer maps these onto status codes; nothing inside the core
/// formats client-facing responses.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("animal is not available for adoption")]
    AnimalUnavailable,
    #[error("an active adoption request already exists for this animal and adopter")]
    DuplicateActiveRequest,
    #[error("adoption request not found")]
    RequestNotFound,
    #[error("illegal transition from {from} to {to}")]
    IllegalTransition {
        from: RequestStatus,
        to: RequestStatus,
    },
    #[error("caller does not own this adoption request")]
    NotOwner,
    #[error("request is no longer pending")]
    InvalidState,
    #[error("animal has already been adopted")]
    AnimalAlreadyAdopted,
    #[error("amount must be positive")]
    InvalidAmount,
    #[error("payer not found")]
    PayerNotFound,
    #[error("animal not found")]
    AnimalNotFound,
    #[error("invoice not found")]
    InvoiceNotFound,
    #[error("invoice is closed")]
    InvoiceClosed,
    #[error("invoice has already been paid")]
    AlreadyPaid,
    #[error("invoice has recorded payments")]
    HasPayments,
    #[error("caller is not authorized for this operation")]
    Forbidden,
    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}

/// Fault raised by a store implementation. Always aborts the surrounding
/// transaction; the caller sees it as a generic server failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Backend(String),
}
