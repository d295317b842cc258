pub mod audit;
pub mod context;
pub mod error;
pub mod models;
pub mod storage;

pub use audit::{AuditAction, AuditEvent};
pub use context::{CallerContext, Role};
pub use error::{DomainError, StoreError};
pub use models::{
    AdoptionRequest, Animal, AnimalStatus, Invoice, InvoiceStatus, Payment, PaymentMethod,
    RequestStatus, TransactionType,
};
pub use storage::{AdoptionStore, BillingStore, InvoicePatch, RequestFilter, RequestPatch};
