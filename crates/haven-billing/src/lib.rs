pub mod ledger;
pub mod service;

pub use ledger::{InvoiceView, balance, is_covered};
pub use service::{
    IssueInvoice, PaymentReceipt, RecordPayment, cancel_invoice, compute_balance, invoice_view,
    issue_invoice, record_payment,
};
