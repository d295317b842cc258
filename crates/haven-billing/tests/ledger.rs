use rust_decimal::Decimal;
use uuid::Uuid;

use haven_billing::{
    IssueInvoice, RecordPayment, cancel_invoice, compute_balance, invoice_view, issue_invoice,
    record_payment,
};
use haven_core::{
    AnimalStatus, BillingStore, CallerContext, DomainError, InvoiceStatus, PaymentMethod, Role,
    TransactionType,
};
use haven_memstore::MemoryStore;

fn staff() -> CallerContext {
    CallerContext::new(Uuid::new_v4(), Role::Staff)
}

fn pesos(value: i64) -> Decimal {
    Decimal::new(value * 100, 2)
}

async fn open_invoice(store: &mut MemoryStore, total: Decimal) -> haven_core::Invoice {
    let payer_id = store.add_user();
    issue_invoice(
        store,
        &staff(),
        IssueInvoice {
            payer_id,
            transaction_type: TransactionType::AdoptionFee,
            total_amount: total,
            related_animal_id: None,
            related_request_id: None,
        },
    )
    .await
    .expect("invoice should be issued")
}

fn payment_of(invoice_id: Uuid, amount: Decimal, method: PaymentMethod) -> RecordPayment {
    RecordPayment {
        invoice_id,
        amount,
        method,
        reference: None,
    }
}

#[tokio::test]
async fn issue_invoice_starts_unpaid() {
    let mut store = MemoryStore::new();
    let invoice = open_invoice(&mut store, pesos(1500)).await;

    assert_eq!(invoice.status, InvoiceStatus::Unpaid);
    assert_eq!(invoice.total_amount, pesos(1500));
    assert!(!invoice.deleted);
}

#[tokio::test]
async fn issue_invoice_validates_amount_payer_and_animal() {
    let mut store = MemoryStore::new();
    let payer_id = store.add_user();
    let ctx = staff();

    let base = IssueInvoice {
        payer_id,
        transaction_type: TransactionType::AdoptionFee,
        total_amount: pesos(500),
        related_animal_id: None,
        related_request_id: None,
    };

    let err = issue_invoice(
        &mut store,
        &ctx,
        IssueInvoice {
            total_amount: Decimal::ZERO,
            ..base.clone()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DomainError::InvalidAmount));

    let err = issue_invoice(
        &mut store,
        &ctx,
        IssueInvoice {
            payer_id: Uuid::new_v4(),
            ..base.clone()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DomainError::PayerNotFound));

    let err = issue_invoice(
        &mut store,
        &ctx,
        IssueInvoice {
            related_animal_id: Some(Uuid::new_v4()),
            ..base.clone()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DomainError::AnimalNotFound));

    let animal_id = store.add_animal(AnimalStatus::Available);
    issue_invoice(
        &mut store,
        &ctx,
        IssueInvoice {
            related_animal_id: Some(animal_id),
            ..base
        },
    )
    .await
    .expect("known animal reference is fine");
}

#[tokio::test]
async fn partial_then_final_payment_flips_the_invoice_to_paid() {
    let mut store = MemoryStore::new();
    let invoice = open_invoice(&mut store, pesos(1000)).await;
    let ctx = staff();

    let receipt = record_payment(
        &mut store,
        &ctx,
        payment_of(invoice.id, pesos(600), PaymentMethod::Cash),
    )
    .await
    .expect("partial payment");
    assert_eq!(receipt.invoice.status, InvoiceStatus::Unpaid);
    assert_eq!(receipt.invoice.amount_paid, pesos(600));
    assert_eq!(receipt.invoice.balance, pesos(400));

    let receipt = record_payment(
        &mut store,
        &ctx,
        payment_of(invoice.id, pesos(400), PaymentMethod::GCash),
    )
    .await
    .expect("final payment");
    assert_eq!(receipt.invoice.status, InvoiceStatus::Paid);
    assert_eq!(receipt.invoice.amount_paid, pesos(1000));
    assert_eq!(receipt.invoice.balance, Decimal::ZERO);

    assert_eq!(
        compute_balance(&mut store, invoice.id).await.unwrap(),
        Decimal::ZERO
    );
}

#[tokio::test]
async fn overpayment_is_accepted_and_reported_as_negative_balance() {
    let mut store = MemoryStore::new();
    let invoice = open_invoice(&mut store, pesos(1000)).await;

    let receipt = record_payment(
        &mut store,
        &staff(),
        payment_of(invoice.id, pesos(1250), PaymentMethod::BankTransfer),
    )
    .await
    .expect("overpayment is allowed");

    assert_eq!(receipt.invoice.status, InvoiceStatus::Paid);
    assert_eq!(receipt.invoice.balance, pesos(-250));
}

#[tokio::test]
async fn identical_payments_append_distinct_ledger_rows() {
    let mut store = MemoryStore::new();
    let invoice = open_invoice(&mut store, pesos(1000)).await;
    let ctx = staff();

    let first = record_payment(
        &mut store,
        &ctx,
        payment_of(invoice.id, pesos(300), PaymentMethod::Cash),
    )
    .await
    .expect("first payment");
    let second = record_payment(
        &mut store,
        &ctx,
        payment_of(invoice.id, pesos(300), PaymentMethod::Cash),
    )
    .await
    .expect("second identical payment");

    assert_ne!(first.payment_id, second.payment_id);
    assert_eq!(second.invoice.amount_paid, pesos(600));
    assert_eq!(store.payment_count(invoice.id).await.unwrap(), 2);
}

#[tokio::test]
async fn closed_invoices_take_no_further_payments() {
    let mut store = MemoryStore::new();
    let ctx = staff();

    let paid = open_invoice(&mut store, pesos(100)).await;
    record_payment(
        &mut store,
        &ctx,
        payment_of(paid.id, pesos(100), PaymentMethod::Cash),
    )
    .await
    .expect("full payment");
    let err = record_payment(
        &mut store,
        &ctx,
        payment_of(paid.id, pesos(10), PaymentMethod::Cash),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DomainError::InvoiceClosed));

    let cancelled = open_invoice(&mut store, pesos(100)).await;
    cancel_invoice(&mut store, &ctx, cancelled.id)
        .await
        .expect("cancel clean invoice");
    let err = record_payment(
        &mut store,
        &ctx,
        payment_of(cancelled.id, pesos(10), PaymentMethod::Cash),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DomainError::InvoiceClosed));
}

#[tokio::test]
async fn payment_validation_rejects_bad_input() {
    let mut store = MemoryStore::new();
    let invoice = open_invoice(&mut store, pesos(100)).await;
    let ctx = staff();

    let err = record_payment(
        &mut store,
        &ctx,
        payment_of(invoice.id, Decimal::ZERO, PaymentMethod::Cash),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DomainError::InvalidAmount));

    let err = record_payment(
        &mut store,
        &ctx,
        payment_of(Uuid::new_v4(), pesos(10), PaymentMethod::Cash),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DomainError::InvoiceNotFound));

    let adopter = CallerContext::new(Uuid::new_v4(), Role::Adopter);
    let err = record_payment(
        &mut store,
        &adopter,
        payment_of(invoice.id, pesos(10), PaymentMethod::Cash),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden));
}

#[tokio::test]
async fn cancellation_guard_protects_paid_and_partially_paid_invoices() {
    let mut store = MemoryStore::new();
    let ctx = staff();

    let partially_paid = open_invoice(&mut store, pesos(500)).await;
    record_payment(
        &mut store,
        &ctx,
        payment_of(partially_paid.id, pesos(50), PaymentMethod::Cash),
    )
    .await
    .expect("partial payment");
    let err = cancel_invoice(&mut store, &ctx, partially_paid.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::HasPayments));
    let untouched = store.invoice(partially_paid.id).await.unwrap().unwrap();
    assert_eq!(untouched.status, InvoiceStatus::Unpaid);
    assert!(!untouched.deleted);

    let paid = open_invoice(&mut store, pesos(100)).await;
    record_payment(
        &mut store,
        &ctx,
        payment_of(paid.id, pesos(100), PaymentMethod::Cash),
    )
    .await
    .expect("full payment");
    let err = cancel_invoice(&mut store, &ctx, paid.id).await.unwrap_err();
    assert!(matches!(err, DomainError::AlreadyPaid));

    let clean = open_invoice(&mut store, pesos(100)).await;
    let cancelled = cancel_invoice(&mut store, &ctx, clean.id)
        .await
        .expect("clean invoice cancels");
    assert_eq!(cancelled.status, InvoiceStatus::Cancelled);
    assert!(cancelled.deleted);
}

#[tokio::test]
async fn invoice_view_is_scoped_to_the_payer() {
    let mut store = MemoryStore::new();
    let invoice = open_invoice(&mut store, pesos(800)).await;

    let payer = CallerContext::new(invoice.payer_id, Role::Adopter);
    let view = invoice_view(&mut store, &payer, invoice.id)
        .await
        .expect("payer reads their invoice");
    assert_eq!(view.balance, pesos(800));

    let stranger = CallerContext::new(Uuid::new_v4(), Role::Adopter);
    let err = invoice_view(&mut store, &stranger, invoice.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden));

    invoice_view(&mut store, &staff(), invoice.id)
        .await
        .expect("staff read any invoice");
}
