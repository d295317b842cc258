use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shelter resident. Owned by the intake CRUD service; the adoption core
/// only reads it and writes `status` when a completion commits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animal {
    pub id: Uuid,
    pub status: AnimalStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimalStatus {
    Available,
    Adopted,
    InTreatment,
    Quarantine,
    Deceased,
    Reclaimed,
}

impl AnimalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AnimalStatus::Available => "AVAILABLE",
            AnimalStatus::Adopted => "ADOPTED",
            AnimalStatus::InTreatment => "IN_TREATMENT",
            AnimalStatus::Quarantine => "QUARANTINE",
            AnimalStatus::Deceased => "DECEASED",
            AnimalStatus::Reclaimed => "RECLAIMED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "AVAILABLE" => Some(AnimalStatus::Available),
            "ADOPTED" => Some(AnimalStatus::Adopted),
            "IN_TREATMENT" => Some(AnimalStatus::InTreatment),
            "QUARANTINE" => Some(AnimalStatus::Quarantine),
            "DECEASED" => Some(AnimalStatus::Deceased),
            "RECLAIMED" => Some(AnimalStatus::Reclaimed),
            _ => None,
        }
    }
}

impl std::fmt::Display for AnimalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdoptionRequest {
    pub id: Uuid,
    pub animal_id: Uuid,
    pub adopter_id: Uuid,
    pub status: RequestStatus,
    pub requested_at: DateTime<Utc>,
    pub processed_by: Option<Uuid>,
    pub staff_comments: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    InterviewScheduled,
    Approved,
    Rejected,
    Completed,
    Cancelled,
}

impl RequestStatus {
    /// A request still competing for its animal.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            RequestStatus::Pending | RequestStatus::InterviewScheduled | RequestStatus::Approved
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RequestStatus::Rejected | RequestStatus::Completed | RequestStatus::Cancelled
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::InterviewScheduled => "INTERVIEW_SCHEDULED",
            RequestStatus::Approved => "APPROVED",
            RequestStatus::Rejected => "REJECTED",
            RequestStatus::Completed => "COMPLETED",
            RequestStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(RequestStatus::Pending),
            "INTERVIEW_SCHEDULED" => Some(RequestStatus::InterviewScheduled),
            "APPROVED" => Some(RequestStatus::Approved),
            "REJECTED" => Some(RequestStatus::Rejected),
            "COMPLETED" => Some(RequestStatus::Completed),
            "CANCELLED" => Some(RequestStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub payer_id: Uuid,
    pub issued_by: Uuid,
    pub transaction_type: TransactionType,
    pub total_amount: Decimal,
    pub status: InvoiceStatus,
    pub related_animal_id: Option<Uuid>,
    pub related_request_id: Option<Uuid>,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    AdoptionFee,
    ReclaimFee,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::AdoptionFee => "ADOPTION_FEE",
            TransactionType::ReclaimFee => "RECLAIM_FEE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ADOPTION_FEE" => Some(TransactionType::AdoptionFee),
            "RECLAIM_FEE" => Some(TransactionType::ReclaimFee),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Unpaid,
    Paid,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            InvoiceStatus::Unpaid => "UNPAID",
            InvoiceStatus::Paid => "PAID",
            InvoiceStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "UNPAID" => Some(InvoiceStatus::Unpaid),
            "PAID" => Some(InvoiceStatus::Paid),
            "CANCELLED" => Some(InvoiceStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append-only ledger row. Never mutated or deleted once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub invoice_id: Uuid,
    pub received_by: Uuid,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub paid_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    GCash,
    BankTransfer,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::GCash => "GCASH",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "CASH" => Some(PaymentMethod::Cash),
            "GCASH" => Some(PaymentMethod::GCash),
            "BANK_TRANSFER" => Some(PaymentMethod::BankTransfer),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
