use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{
    AdoptionRequest, Animal, AnimalStatus, Invoice, InvoiceStatus, Payment, RequestStatus,
};

/// Field patch applied to an adoption request in one update. `None` leaves
/// the column untouched.
#[derive(Debug, Clone, Default)]
pub struct RequestPatch {
    pub status: Option<RequestStatus>,
    pub processed_by: Option<Uuid>,
    pub staff_comments: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct InvoicePatch {
    pub status: Option<InvoiceStatus>,
    pub deleted: Option<bool>,
}

/// Typed selection criteria each store translates into a parameterized
/// query.
#[derive(Debug, Clone, Default)]
pub struct RequestFilter {
    pub animal_id: Option<Uuid>,
    pub adopter_id: Option<Uuid>,
    pub active_only: bool,
}

/// Storage surface of the adoption lifecycle. An implementation is scoped to
/// a single transaction: every method sees the same snapshot, and nothing is
/// durable until the owner commits.
#[async_trait]
pub trait AdoptionStore: Send {
    async fn animal(&mut self, id: Uuid) -> Result<Option<Animal>, StoreError>;

    async fn set_animal_status(&mut self, id: Uuid, status: AnimalStatus)
    -> Result<(), StoreError>;

    async fn insert_request(&mut self, request: &AdoptionRequest) -> Result<(), StoreError>;

    async fn request(&mut self, id: Uuid) -> Result<Option<AdoptionRequest>, StoreError>;

    async fn requests(&mut self, filter: &RequestFilter)
    -> Result<Vec<AdoptionRequest>, StoreError>;

    async fn update_request(&mut self, id: Uuid, patch: &RequestPatch) -> Result<(), StoreError>;
}

/// Storage surface of the billing ledger, same transactional scoping as
/// [`AdoptionStore`].
#[async_trait]
pub trait BillingStore: Send {
    async fn user_exists(&mut self, id: Uuid) -> Result<bool, StoreError>;

    async fn animal_exists(&mut self, id: Uuid) -> Result<bool, StoreError>;

    async fn insert_invoice(&mut self, invoice: &Invoice) -> Result<(), StoreError>;

    async fn invoice(&mut self, id: Uuid) -> Result<Option<Invoice>, StoreError>;

    async fn update_invoice(&mut self, id: Uuid, patch: &InvoicePatch) -> Result<(), StoreError>;

    async fn insert_payment(&mut self, payment: &Payment) -> Result<(), StoreError>;

    async fn payments_total(&mut self, invoice_id: Uuid) -> Result<Decimal, StoreError>;

    async fn payment_count(&mut self, invoice_id: Uuid) -> Result<i64, StoreError>;
}
