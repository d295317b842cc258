use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use haven_core::{
    AdoptionRequest, AdoptionStore, Animal, AnimalStatus, BillingStore, Invoice, InvoicePatch,
    Payment, RequestFilter, RequestPatch, StoreError,
};

/// Map-backed implementation of both store traits. Backs the domain crates'
/// tests; it applies writes immediately, so it exercises the services' rule
/// ordering but not rollback.
#[derive(Default)]
pub struct MemoryStore {
    pub animals: HashMap<Uuid, Animal>,
    pub requests: HashMap<Uuid, AdoptionRequest>,
    pub invoices: HashMap<Uuid, Invoice>,
    pub payments: HashMap<Uuid, Payment>,
    pub users: HashSet<Uuid>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_animal(&mut self, status: AnimalStatus) -> Uuid {
        let id = Uuid::new_v4();
        self.animals.insert(id, Animal { id, status });
        id
    }

    pub fn add_user(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        self.users.insert(id);
        id
    }
}

fn missing(entity: &str, id: Uuid) -> StoreError {
    StoreError::Backend(format!("no {entity} row for {id}"))
}

#[async_trait]
impl AdoptionStore for MemoryStore {
    async fn animal(&mut self, id: Uuid) -> Result<Option<Animal>, StoreError> {
        Ok(self.animals.get(&id).cloned())
    }

    async fn set_animal_status(
        &mut self,
        id: Uuid,
        status: AnimalStatus,
    ) -> Result<(), StoreError> {
        let animal = self.animals.get_mut(&id).ok_or_else(|| missing("animal", id))?;
        animal.status = status;
        Ok(())
    }

    async fn insert_request(&mut self, request: &AdoptionRequest) -> Result<(), StoreError> {
        self.requests.insert(request.id, request.clone());
        Ok(())
    }

    async fn request(&mut self, id: Uuid) -> Result<Option<AdoptionRequest>, StoreError> {
        Ok(self.requests.get(&id).cloned())
    }

    async fn requests(
        &mut self,
        filter: &RequestFilter,
    ) -> Result<Vec<AdoptionRequest>, StoreError> {
        let mut matched: Vec<AdoptionRequest> = self
            .requests
            .values()
            .filter(|request| {
                filter
                    .animal_id
                    .is_none_or(|animal_id| request.animal_id == animal_id)
                    && filter
                        .adopter_id
                        .is_none_or(|adopter_id| request.adopter_id == adopter_id)
                    && (!filter.active_only || request.status.is_active())
            })
            .cloned()
            .collect();
        matched.sort_by_key(|request| (request.requested_at, request.id));
        Ok(matched)
    }

    async fn update_request(&mut self, id: Uuid, patch: &RequestPatch) -> Result<(), StoreError> {
        let request = self
            .requests
            .get_mut(&id)
            .ok_or_else(|| missing("adoption request", id))?;
        if let Some(status) = patch.status {
            request.status = status;
        }
        if let Some(processed_by) = patch.processed_by {
            request.processed_by = Some(processed_by);
        }
        if let Some(comments) = &patch.staff_comments {
            request.staff_comments = Some(comments.clone());
        }
        request.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl BillingStore for MemoryStore {
    async fn user_exists(&mut self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.users.contains(&id))
    }

    async fn animal_exists(&mut self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.animals.contains_key(&id))
    }

    async fn insert_invoice(&mut self, invoice: &Invoice) -> Result<(), StoreError> {
        self.invoices.insert(invoice.id, invoice.clone());
        Ok(())
    }

    async fn invoice(&mut self, id: Uuid) -> Result<Option<Invoice>, StoreError> {
        Ok(self.invoices.get(&id).cloned())
    }

    async fn update_invoice(&mut self, id: Uuid, patch: &InvoicePatch) -> Result<(), StoreError> {
        let invoice = self
            .invoices
            .get_mut(&id)
            .ok_or_else(|| missing("invoice", id))?;
        if let Some(status) = patch.status {
            invoice.status = status;
        }
        if let Some(deleted) = patch.deleted {
            invoice.deleted = deleted;
        }
        invoice.updated_at = Utc::now();
        Ok(())
    }

    async fn insert_payment(&mut self, payment: &Payment) -> Result<(), StoreError> {
        self.payments.insert(payment.id, payment.clone());
        Ok(())
    }

    async fn payments_total(&mut self, invoice_id: Uuid) -> Result<Decimal, StoreError> {
        Ok(self
            .payments
            .values()
            .filter(|payment| payment.invoice_id == invoice_id)
            .map(|payment| payment.amount)
            .sum())
    }

    async fn payment_count(&mut self, invoice_id: Uuid) -> Result<i64, StoreError> {
        Ok(self
            .payments
            .values()
            .filter(|payment| payment.invoice_id == invoice_id)
            .count() as i64)
    }
}
