use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use haven_core::{
    BillingStore, CallerContext, DomainError, Invoice, InvoicePatch, InvoiceStatus, Payment,
    PaymentMethod, Role, TransactionType,
};

use crate::ledger::{InvoiceView, is_covered};

#[derive(Debug, Clone)]
pub struct IssueInvoice {
    pub payer_id: Uuid,
    pub transaction_type: TransactionType,
    pub total_amount: Decimal,
    pub related_animal_id: Option<Uuid>,
    pub related_request_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct RecordPayment {
    pub invoice_id: Uuid,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub payment_id: Uuid,
    pub invoice: InvoiceView,
}

pub async fn issue_invoice<S: BillingStore>(
    store: &mut S,
    ctx: &CallerContext,
    cmd: IssueInvoice,
) -> Result<Invoice, DomainError> {
    ctx.require_staff()?;

    if cmd.total_amount <= Decimal::ZERO {
        return Err(DomainError::InvalidAmount);
    }
    if !store.user_exists(cmd.payer_id).await? {
        return Err(DomainError::PayerNotFound);
    }
    if let Some(animal_id) = cmd.related_animal_id
        && !store.animal_exists(animal_id).await?
    {
        return Err(DomainError::AnimalNotFound);
    }

    let now = Utc::now();
    let invoice = Invoice {
        id: Uuid::new_v4(),
        payer_id: cmd.payer_id,
        issued_by: ctx.user_id,
        transaction_type: cmd.transaction_type,
        total_amount: cmd.total_amount.round_dp(2),
        status: InvoiceStatus::Unpaid,
        related_animal_id: cmd.related_animal_id,
        related_request_id: cmd.related_request_id,
        deleted: false,
        created_at: now,
        updated_at: now,
    };
    store.insert_invoice(&invoice).await?;

    Ok(invoice)
}

/// Append a payment and re-derive the invoice status from the ledger sum,
/// all inside the caller's transaction. Overpayment is accepted; the
/// returned balance goes negative rather than blocking the cashier.
pub async fn record_payment<S: BillingStore>(
    store: &mut S,
    ctx: &CallerContext,
    cmd: RecordPayment,
) -> Result<PaymentReceipt, DomainError> {
    ctx.require_staff()?;

    if cmd.amount <= Decimal::ZERO {
        return Err(DomainError::InvalidAmount);
    }
    let Some(invoice) = store.invoice(cmd.invoice_id).await? else {
        return Err(DomainError::InvoiceNotFound);
    };
    if invoice.status != InvoiceStatus::Unpaid {
        return Err(DomainError::InvoiceClosed);
    }

    let payment = Payment {
        id: Uuid::new_v4(),
        invoice_id: cmd.invoice_id,
        received_by: ctx.user_id,
        amount: cmd.amount.round_dp(2),
        method: cmd.method,
        reference: cmd.reference,
        paid_at: Utc::now(),
    };
    store.insert_payment(&payment).await?;

    let amount_paid = store.payments_total(cmd.invoice_id).await?;
    if is_covered(invoice.total_amount, amount_paid) {
        store
            .update_invoice(
                cmd.invoice_id,
                &InvoicePatch {
                    status: Some(InvoiceStatus::Paid),
                    ..InvoicePatch::default()
                },
            )
            .await?;
    }

    let invoice = store
        .invoice(cmd.invoice_id)
        .await?
        .ok_or(DomainError::InvoiceNotFound)?;

    Ok(PaymentReceipt {
        payment_id: payment.id,
        invoice: InvoiceView::project(&invoice, amount_paid),
    })
}

/// Void an invoice nothing has been paid against. Paid invoices and
/// invoices with any ledger rows stay untouched.
pub async fn cancel_invoice<S: BillingStore>(
    store: &mut S,
    ctx: &CallerContext,
    invoice_id: Uuid,
) -> Result<Invoice, DomainError> {
    ctx.require_staff()?;

    let Some(invoice) = store.invoice(invoice_id).await? else {
        return Err(DomainError::InvoiceNotFound);
    };
    if invoice.status == InvoiceStatus::Paid {
        return Err(DomainError::AlreadyPaid);
    }
    if store.payment_count(invoice_id).await? > 0 {
        return Err(DomainError::HasPayments);
    }

    store
        .update_invoice(
            invoice_id,
            &InvoicePatch {
                status: Some(InvoiceStatus::Cancelled),
                deleted: Some(true),
            },
        )
        .await?;

    store
        .invoice(invoice_id)
        .await?
        .ok_or(DomainError::InvoiceNotFound)
}

/// Outstanding amount on an invoice. Pure read shared with reporting.
pub async fn compute_balance<S: BillingStore>(
    store: &mut S,
    invoice_id: Uuid,
) -> Result<Decimal, DomainError> {
    let Some(invoice) = store.invoice(invoice_id).await? else {
        return Err(DomainError::InvoiceNotFound);
    };
    let amount_paid = store.payments_total(invoice_id).await?;
    Ok(crate::ledger::balance(invoice.total_amount, amount_paid))
}

/// Read an invoice with its derived ledger figures. Staff see everything;
/// adopters only invoices made out to them.
pub async fn invoice_view<S: BillingStore>(
    store: &mut S,
    ctx: &CallerContext,
    invoice_id: Uuid,
) -> Result<InvoiceView, DomainError> {
    let Some(invoice) = store.invoice(invoice_id).await? else {
        return Err(DomainError::InvoiceNotFound);
    };
    if ctx.role == Role::Adopter && invoice.payer_id != ctx.user_id {
        return Err(DomainError::Forbidden);
    }
    let amount_paid = store.payments_total(invoice_id).await?;
    Ok(InvoiceView::project(&invoice, amount_paid))
}
