use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opens an adoption request. `adopter_id` defaults to the caller; the core
/// rejects a mismatch, so staff cannot file on an adopter's behalf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAdoptionRequest {
    pub animal_id: Uuid,
    pub adopter_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessAdoptionRequest {
    pub status: String,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueInvoiceRequest {
    pub payer_id: Uuid,
    pub transaction_type: String,
    pub total_amount: Decimal,
    pub related_animal_id: Option<Uuid>,
    pub related_request_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    pub invoice_id: Uuid,
    pub amount_paid: Decimal,
    pub payment_method: String,
    pub reference_number: Option<String>,
}
