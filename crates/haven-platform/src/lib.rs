pub mod audit_bus;
pub mod config;
pub mod contracts;
pub mod db;

pub use audit_bus::AuditBus;
pub use config::ServiceConfig;
pub use contracts::{
    CreateAdoptionRequest, IssueInvoiceRequest, ProcessAdoptionRequest, RecordPaymentRequest,
};
pub use db::connect_database;
