use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use haven_core::{Invoice, InvoiceStatus, TransactionType};

/// Outstanding amount on an invoice. Negative once overpaid.
pub fn balance(total_amount: Decimal, amount_paid: Decimal) -> Decimal {
    (total_amount - amount_paid).round_dp(2)
}

/// An invoice is Paid exactly when its ledger covers the total.
pub fn is_covered(total_amount: Decimal, amount_paid: Decimal) -> bool {
    amount_paid >= total_amount
}

/// Invoice projection handed to callers: the row plus the derived ledger
/// figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceView {
    pub id: Uuid,
    pub payer_id: Uuid,
    pub issued_by: Uuid,
    pub transaction_type: TransactionType,
    pub total_amount: Decimal,
    pub status: InvoiceStatus,
    pub related_animal_id: Option<Uuid>,
    pub related_request_id: Option<Uuid>,
    pub amount_paid: Decimal,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InvoiceView {
    pub fn project(invoice: &Invoice, amount_paid: Decimal) -> Self {
        Self {
            id: invoice.id,
            payer_id: invoice.payer_id,
            issued_by: invoice.issued_by,
            transaction_type: invoice.transaction_type,
            total_amount: invoice.total_amount,
            status: invoice.status,
            related_animal_id: invoice.related_animal_id,
            related_request_id: invoice.related_request_id,
            amount_paid: amount_paid.round_dp(2),
            balance: balance(invoice.total_amount, amount_paid),
            created_at: invoice.created_at,
            updated_at: invoice.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_subtracts_the_ledger_total() {
        let total = Decimal::new(100000, 2); // 1000.00
        assert_eq!(balance(total, Decimal::ZERO), total);
        assert_eq!(balance(total, Decimal::new(60000, 2)), Decimal::new(40000, 2));
        assert_eq!(balance(total, total), Decimal::ZERO);
    }

    #[test]
    fn overpayment_drives_the_balance_negative() {
        let total = Decimal::new(50000, 2);
        let paid = Decimal::new(65000, 2);
        assert_eq!(balance(total, paid), Decimal::new(-15000, 2));
        assert!(is_covered(total, paid));
    }

    #[test]
    fn coverage_flips_exactly_at_the_total() {
        let total = Decimal::new(50000, 2);
        assert!(!is_covered(total, Decimal::new(49999, 2)));
        assert!(is_covered(total, total));
    }
}
