use std::net::SocketAddr;

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Row, Transaction, postgres::PgRow};
use tracing::{error, info};
use uuid::Uuid;

use haven_adoptions as adoptions;
use haven_billing as billing;
use haven_billing::{InvoiceView, IssueInvoice, PaymentReceipt, RecordPayment};
use haven_core::{
    AdoptionRequest, AdoptionStore, Animal, AnimalStatus, AuditAction, AuditEvent, BillingStore,
    CallerContext, DomainError, Invoice, InvoicePatch, InvoiceStatus, Payment, PaymentMethod,
    RequestFilter, RequestPatch, RequestStatus, Role, StoreError, TransactionType,
};
use haven_platform::{
    AuditBus, CreateAdoptionRequest, IssueInvoiceRequest, ProcessAdoptionRequest,
    RecordPaymentRequest, ServiceConfig, connect_database,
};

#[derive(Clone)]
struct AppState {
    pool: PgPool,
    audit: AuditBus,
}

#[tokio::main]
async fn main() -> AnyResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "haven_gateway=info".to_string()),
        )
        .init();

    let config = ServiceConfig::from_env("0.0.0.0:8080")?;
    let pool = connect_database(&config.database_url).await?;
    let audit = AuditBus::connect(&config.redis_url, &config.audit_channel)?;

    let state = AppState { pool, audit };
    let router = Router::new()
        .route("/healthz", get(healthz))
        .route("/adoptions", post(create_adoption))
        .route("/adoptions/{request_id}", get(get_adoption))
        .route("/adoptions/{request_id}/process", put(process_adoption))
        .route("/adoptions/{request_id}/cancel", put(cancel_adoption))
        .route("/invoices", post(issue_invoice))
        .route("/invoices/{invoice_id}", get(get_invoice))
        .route("/invoices/{invoice_id}/cancel", put(cancel_invoice))
        .route("/payments", post(record_payment))
        .with_state(state);

    let addr: SocketAddr = config.http_addr.parse()?;
    info!("gateway listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn create_adoption(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateAdoptionRequest>,
) -> Result<(StatusCode, Json<AdoptionRequest>), (StatusCode, String)> {
    let ctx = caller_from_headers(&headers)?;
    let adopter_id = payload.adopter_id.unwrap_or(ctx.user_id);

    let mut store = PgStore::begin(&state.pool).await.map_err(internal_error)?;
    let request = adoptions::create_request(&mut store, &ctx, payload.animal_id, adopter_id)
        .await
        .map_err(domain_error)?;
    store.commit().await.map_err(internal_error)?;

    record_audit(
        &state,
        ctx.user_id,
        AuditAction::AdoptionRequestCreated,
        format!(
            "adoption request {} opened for animal {}",
            request.id, request.animal_id
        ),
    )
    .await;

    Ok((StatusCode::CREATED, Json(request)))
}

async fn get_adoption(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(request_id): Path<Uuid>,
) -> Result<Json<AdoptionRequest>, (StatusCode, String)> {
    let ctx = caller_from_headers(&headers)?;

    let mut store = PgStore::begin(&state.pool).await.map_err(internal_error)?;
    let request = adoptions::get_request(&mut store, &ctx, request_id)
        .await
        .map_err(domain_error)?;
    store.commit().await.map_err(internal_error)?;

    Ok(Json(request))
}

async fn process_adoption(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(request_id): Path<Uuid>,
    Json(payload): Json<ProcessAdoptionRequest>,
) -> Result<Json<AdoptionRequest>, (StatusCode, String)> {
    let ctx = caller_from_headers(&headers)?;
    let new_status = normalize_process_status(&payload.status).map_err(invalid_request)?;
    let comments = payload
        .comments
        .as_deref()
        .map(str::trim)
        .filter(|comments| !comments.is_empty())
        .map(str::to_string);

    let mut store = PgStore::begin(&state.pool).await.map_err(internal_error)?;
    let outcome = adoptions::process_request(&mut store, &ctx, request_id, new_status, comments)
        .await
        .map_err(domain_error)?;
    store.commit().await.map_err(internal_error)?;

    record_audit(
        &state,
        ctx.user_id,
        AuditAction::AdoptionRequestProcessed,
        format!(
            "adoption request {} moved to {}; {} competing request(s) auto-rejected",
            request_id,
            outcome.request.status,
            outcome.rejected_request_ids.len()
        ),
    )
    .await;

    Ok(Json(outcome.request))
}

async fn cancel_adoption(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(request_id): Path<Uuid>,
) -> Result<Json<AdoptionRequest>, (StatusCode, String)> {
    let ctx = caller_from_headers(&headers)?;

    let mut store = PgStore::begin(&state.pool).await.map_err(internal_error)?;
    let request = adoptions::cancel_request(&mut store, &ctx, request_id)
        .await
        .map_err(domain_error)?;
    store.commit().await.map_err(internal_error)?;

    record_audit(
        &state,
        ctx.user_id,
        AuditAction::AdoptionRequestCancelled,
        format!("adoption request {request_id} cancelled by adopter"),
    )
    .await;

    Ok(Json(request))
}

async fn issue_invoice(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<IssueInvoiceRequest>,
) -> Result<(StatusCode, Json<Invoice>), (StatusCode, String)> {
    let ctx = caller_from_headers(&headers)?;
    let transaction_type =
        normalize_transaction_type(&payload.transaction_type).map_err(invalid_request)?;

    let mut store = PgStore::begin(&state.pool).await.map_err(internal_error)?;
    let invoice = billing::issue_invoice(
        &mut store,
        &ctx,
        IssueInvoice {
            payer_id: payload.payer_id,
            transaction_type,
            total_amount: payload.total_amount,
            related_animal_id: payload.related_animal_id,
            related_request_id: payload.related_request_id,
        },
    )
    .await
    .map_err(domain_error)?;
    store.commit().await.map_err(internal_error)?;

    record_audit(
        &state,
        ctx.user_id,
        AuditAction::InvoiceIssued,
        format!(
            "invoice {} for {} issued to payer {}",
            invoice.id, invoice.total_amount, invoice.payer_id
        ),
    )
    .await;

    Ok((StatusCode::CREATED, Json(invoice)))
}

async fn get_invoice(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(invoice_id): Path<Uuid>,
) -> Result<Json<InvoiceView>, (StatusCode, String)> {
    let ctx = caller_from_headers(&headers)?;

    let mut store = PgStore::begin(&state.pool).await.map_err(internal_error)?;
    let view = billing::invoice_view(&mut store, &ctx, invoice_id)
        .await
        .map_err(domain_error)?;
    store.commit().await.map_err(internal_error)?;

    Ok(Json(view))
}

async fn record_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<RecordPaymentRequest>,
) -> Result<(StatusCode, Json<PaymentReceipt>), (StatusCode, String)> {
    let ctx = caller_from_headers(&headers)?;
    let method = normalize_payment_method(&payload.payment_method).map_err(invalid_request)?;
    let reference = payload
        .reference_number
        .as_deref()
        .map(str::trim)
        .filter(|reference| !reference.is_empty())
        .map(str::to_string);

    let mut store = PgStore::begin(&state.pool).await.map_err(internal_error)?;
    let receipt = billing::record_payment(
        &mut store,
        &ctx,
        RecordPayment {
            invoice_id: payload.invoice_id,
            amount: payload.amount_paid,
            method,
            reference,
        },
    )
    .await
    .map_err(domain_error)?;
    store.commit().await.map_err(internal_error)?;

    record_audit(
        &state,
        ctx.user_id,
        AuditAction::PaymentRecorded,
        format!(
            "payment {} of {} recorded against invoice {}; balance now {}",
            receipt.payment_id, payload.amount_paid, payload.invoice_id, receipt.invoice.balance
        ),
    )
    .await;

    Ok((StatusCode::CREATED, Json(receipt)))
}

async fn cancel_invoice(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(invoice_id): Path<Uuid>,
) -> Result<Json<Invoice>, (StatusCode, String)> {
    let ctx = caller_from_headers(&headers)?;

    let mut store = PgStore::begin(&state.pool).await.map_err(internal_error)?;
    let invoice = billing::cancel_invoice(&mut store, &ctx, invoice_id)
        .await
        .map_err(domain_error)?;
    store.commit().await.map_err(internal_error)?;

    record_audit(
        &state,
        ctx.user_id,
        AuditAction::InvoiceCancelled,
        format!("invoice {invoice_id} cancelled before any payment"),
    )
    .await;

    Ok(Json(invoice))
}

async fn record_audit(state: &AppState, user_id: Uuid, action: AuditAction, description: String) {
    state
        .audit
        .record(AuditEvent::new(user_id, action, description))
        .await;
}

fn caller_from_headers(headers: &HeaderMap) -> Result<CallerContext, (StatusCode, String)> {
    let user_id = headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value.trim()).ok())
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                "x-user-id header is required".to_string(),
            )
        })?;
    let role = headers
        .get("x-user-role")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Role::parse(&value.trim().to_ascii_uppercase()))
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                "x-user-role header must be one of ADMIN, STAFF, ADOPTER".to_string(),
            )
        })?;

    Ok(CallerContext::new(user_id, role))
}

fn normalize_process_status(value: &str) -> AnyResult<RequestStatus> {
    let normalized = value.trim().to_ascii_uppercase();
    match RequestStatus::parse(&normalized) {
        Some(
            status @ (RequestStatus::InterviewScheduled
            | RequestStatus::Approved
            | RequestStatus::Rejected
            | RequestStatus::Completed),
        ) => Ok(status),
        _ => anyhow::bail!(
            "status must be one of INTERVIEW_SCHEDULED, APPROVED, REJECTED, COMPLETED"
        ),
    }
}

fn normalize_transaction_type(value: &str) -> AnyResult<TransactionType> {
    let normalized = value.trim().to_ascii_uppercase();
    TransactionType::parse(&normalized)
        .ok_or_else(|| anyhow::anyhow!("transaction_type must be ADOPTION_FEE or RECLAIM_FEE"))
}

fn normalize_payment_method(value: &str) -> AnyResult<PaymentMethod> {
    let normalized = value.trim().to_ascii_uppercase();
    PaymentMethod::parse(&normalized).ok_or_else(|| {
        anyhow::anyhow!("payment_method must be one of CASH, GCASH, BANK_TRANSFER")
    })
}

fn invalid_request(err: anyhow::Error) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, err.to_string())
}

fn internal_error<E: std::fmt::Display>(err: E) -> (StatusCode, String) {
    error!("transaction failed: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal storage failure".to_string(),
    )
}

fn domain_error(err: DomainError) -> (StatusCode, String) {
    let status = match &err {
        DomainError::Storage(inner) => return internal_error(inner),
        DomainError::AnimalUnavailable
        | DomainError::DuplicateActiveRequest
        | DomainError::IllegalTransition { .. }
        | DomainError::InvalidState
        | DomainError::InvalidAmount => StatusCode::BAD_REQUEST,
        DomainError::NotOwner | DomainError::Forbidden => StatusCode::FORBIDDEN,
        DomainError::RequestNotFound
        | DomainError::AnimalNotFound
        | DomainError::PayerNotFound
        | DomainError::InvoiceNotFound => StatusCode::NOT_FOUND,
        DomainError::AnimalAlreadyAdopted
        | DomainError::InvoiceClosed
        | DomainError::AlreadyPaid
        | DomainError::HasPayments => StatusCode::CONFLICT,
    };

    (status, err.to_string())
}

/// Store implementation scoped to one Postgres transaction. Dropping it
/// without `commit` rolls everything back, which is how a domain error
/// leaves no partial state behind.
struct PgStore {
    tx: Transaction<'static, Postgres>,
}

impl PgStore {
    async fn begin(pool: &PgPool) -> Result<Self, StoreError> {
        let tx = pool.begin().await.map_err(store_error)?;
        Ok(Self { tx })
    }

    async fn commit(self) -> Result<(), StoreError> {
        self.tx.commit().await.map_err(store_error)
    }
}

fn store_error(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

fn request_from_row(row: &PgRow) -> Result<AdoptionRequest, StoreError> {
    let status: String = row.try_get("status").map_err(store_error)?;
    Ok(AdoptionRequest {
        id: row.try_get("id").map_err(store_error)?,
        animal_id: row.try_get("animal_id").map_err(store_error)?,
        adopter_id: row.try_get("adopter_id").map_err(store_error)?,
        status: RequestStatus::parse(&status)
            .ok_or_else(|| StoreError::Backend(format!("unknown request status {status}")))?,
        requested_at: row.try_get("requested_at").map_err(store_error)?,
        processed_by: row.try_get("processed_by").map_err(store_error)?,
        staff_comments: row.try_get("staff_comments").map_err(store_error)?,
        updated_at: row.try_get("updated_at").map_err(store_error)?,
    })
}

fn invoice_from_row(row: &PgRow) -> Result<Invoice, StoreError> {
    let status: String = row.try_get("status").map_err(store_error)?;
    let transaction_type: String = row.try_get("transaction_type").map_err(store_error)?;
    Ok(Invoice {
        id: row.try_get("id").map_err(store_error)?,
        payer_id: row.try_get("payer_id").map_err(store_error)?,
        issued_by: row.try_get("issued_by").map_err(store_error)?,
        transaction_type: TransactionType::parse(&transaction_type).ok_or_else(|| {
            StoreError::Backend(format!("unknown transaction type {transaction_type}"))
        })?,
        total_amount: row.try_get("total_amount").map_err(store_error)?,
        status: InvoiceStatus::parse(&status)
            .ok_or_else(|| StoreError::Backend(format!("unknown invoice status {status}")))?,
        related_animal_id: row.try_get("related_animal_id").map_err(store_error)?,
        related_request_id: row.try_get("related_request_id").map_err(store_error)?,
        deleted: row.try_get("deleted").map_err(store_error)?,
        created_at: row.try_get("created_at").map_err(store_error)?,
        updated_at: row.try_get("updated_at").map_err(store_error)?,
    })
}

#[async_trait]
impl AdoptionStore for PgStore {
    async fn animal(&mut self, id: Uuid) -> Result<Option<Animal>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, status
            FROM animals
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(store_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let status: String = row.try_get("status").map_err(store_error)?;
        Ok(Some(Animal {
            id: row.try_get("id").map_err(store_error)?,
            status: AnimalStatus::parse(&status)
                .ok_or_else(|| StoreError::Backend(format!("unknown animal status {status}")))?,
        }))
    }

    async fn set_animal_status(
        &mut self,
        id: Uuid,
        status: AnimalStatus,
    ) -> Result<(), StoreError> {
        let updated = sqlx::query("UPDATE animals SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .bind(Utc::now())
            .execute(&mut *self.tx)
            .await
            .map_err(store_error)?;

        if updated.rows_affected() == 0 {
            return Err(StoreError::Backend(format!("no animal row updated for {id}")));
        }
        Ok(())
    }

    async fn insert_request(&mut self, request: &AdoptionRequest) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO adoption_requests (
                id, animal_id, adopter_id, status, requested_at, processed_by,
                staff_comments, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(request.id)
        .bind(request.animal_id)
        .bind(request.adopter_id)
        .bind(request.status.as_str())
        .bind(request.requested_at)
        .bind(request.processed_by)
        .bind(request.staff_comments.as_deref())
        .bind(request.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(store_error)?;

        Ok(())
    }

    async fn request(&mut self, id: Uuid) -> Result<Option<AdoptionRequest>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, animal_id, adopter_id, status, requested_at, processed_by,
                   staff_comments, updated_at
            FROM adoption_requests
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(store_error)?;

        row.as_ref().map(request_from_row).transpose()
    }

    async fn requests(
        &mut self,
        filter: &RequestFilter,
    ) -> Result<Vec<AdoptionRequest>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, animal_id, adopter_id, status, requested_at, processed_by,
                   staff_comments, updated_at
            FROM adoption_requests
            WHERE ($1::uuid IS NULL OR animal_id = $1)
              AND ($2::uuid IS NULL OR adopter_id = $2)
              AND (NOT $3 OR status IN ('PENDING', 'INTERVIEW_SCHEDULED', 'APPROVED'))
            ORDER BY requested_at ASC, id ASC
            FOR UPDATE
            "#,
        )
        .bind(filter.animal_id)
        .bind(filter.adopter_id)
        .bind(filter.active_only)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(store_error)?;

        rows.iter().map(request_from_row).collect()
    }

    async fn update_request(&mut self, id: Uuid, patch: &RequestPatch) -> Result<(), StoreError> {
        let updated = sqlx::query(
            r#"
            UPDATE adoption_requests
            SET status = COALESCE($2::text, status),
                processed_by = COALESCE($3::uuid, processed_by),
                staff_comments = COALESCE($4::text, staff_comments),
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.status.map(|status| status.as_str()))
        .bind(patch.processed_by)
        .bind(patch.staff_comments.as_deref())
        .bind(Utc::now())
        .execute(&mut *self.tx)
        .await
        .map_err(store_error)?;

        if updated.rows_affected() == 0 {
            return Err(StoreError::Backend(format!(
                "no adoption request row updated for {id}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl BillingStore for PgStore {
    async fn user_exists(&mut self, id: Uuid) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(store_error)
    }

    async fn animal_exists(&mut self, id: Uuid) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM animals WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(store_error)
    }

    async fn insert_invoice(&mut self, invoice: &Invoice) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, payer_id, issued_by, transaction_type, total_amount, status,
                related_animal_id, related_request_id, deleted, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(invoice.id)
        .bind(invoice.payer_id)
        .bind(invoice.issued_by)
        .bind(invoice.transaction_type.as_str())
        .bind(invoice.total_amount)
        .bind(invoice.status.as_str())
        .bind(invoice.related_animal_id)
        .bind(invoice.related_request_id)
        .bind(invoice.deleted)
        .bind(invoice.created_at)
        .bind(invoice.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(store_error)?;

        Ok(())
    }

    async fn invoice(&mut self, id: Uuid) -> Result<Option<Invoice>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, payer_id, issued_by, transaction_type, total_amount, status,
                   related_animal_id, related_request_id, deleted, created_at, updated_at
            FROM invoices
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(store_error)?;

        row.as_ref().map(invoice_from_row).transpose()
    }

    async fn update_invoice(&mut self, id: Uuid, patch: &InvoicePatch) -> Result<(), StoreError> {
        let updated = sqlx::query(
            r#"
            UPDATE invoices
            SET status = COALESCE($2::text, status),
                deleted = COALESCE($3::boolean, deleted),
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.status.map(|status| status.as_str()))
        .bind(patch.deleted)
        .bind(Utc::now())
        .execute(&mut *self.tx)
        .await
        .map_err(store_error)?;

        if updated.rows_affected() == 0 {
            return Err(StoreError::Backend(format!("no invoice row updated for {id}")));
        }
        Ok(())
    }

    async fn insert_payment(&mut self, payment: &Payment) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id, invoice_id, received_by, amount, method, reference, paid_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(payment.id)
        .bind(payment.invoice_id)
        .bind(payment.received_by)
        .bind(payment.amount)
        .bind(payment.method.as_str())
        .bind(payment.reference.as_deref())
        .bind(payment.paid_at)
        .execute(&mut *self.tx)
        .await
        .map_err(store_error)?;

        Ok(())
    }

    async fn payments_total(&mut self, invoice_id: Uuid) -> Result<Decimal, StoreError> {
        sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(amount), 0)::numeric
            FROM payments
            WHERE invoice_id = $1
            "#,
        )
        .bind(invoice_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(store_error)
    }

    async fn payment_count(&mut self, invoice_id: Uuid) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM payments WHERE invoice_id = $1")
            .bind(invoice_id)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(store_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(user_id: &str, role: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", HeaderValue::from_str(user_id).unwrap());
        headers.insert("x-user-role", HeaderValue::from_str(role).unwrap());
        headers
    }

    #[test]
    fn caller_is_built_from_identity_headers() {
        let user_id = Uuid::new_v4();
        let ctx = caller_from_headers(&headers(&user_id.to_string(), "staff")).unwrap();
        assert_eq!(ctx.user_id, user_id);
        assert_eq!(ctx.role, Role::Staff);
    }

    #[test]
    fn missing_or_malformed_identity_is_unauthorized() {
        let (status, _) = caller_from_headers(&HeaderMap::new()).unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) =
            caller_from_headers(&headers("not-a-uuid", "STAFF")).unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) =
            caller_from_headers(&headers(&Uuid::new_v4().to_string(), "JANITOR")).unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn process_status_normalization_accepts_staff_targets_only() {
        assert_eq!(
            normalize_process_status(" completed ").unwrap(),
            RequestStatus::Completed
        );
        assert_eq!(
            normalize_process_status("interview_scheduled").unwrap(),
            RequestStatus::InterviewScheduled
        );
        assert!(normalize_process_status("PENDING").is_err());
        assert!(normalize_process_status("CANCELLED").is_err());
        assert!(normalize_process_status("FINISHED").is_err());
    }

    #[test]
    fn payment_method_normalization_matches_the_ledger_enum() {
        assert_eq!(normalize_payment_method("gcash").unwrap(), PaymentMethod::GCash);
        assert_eq!(
            normalize_payment_method("Bank_Transfer").unwrap(),
            PaymentMethod::BankTransfer
        );
        assert!(normalize_payment_method("CHEQUE").is_err());
    }

    #[test]
    fn domain_errors_map_onto_the_documented_status_codes() {
        assert_eq!(
            domain_error(DomainError::DuplicateActiveRequest).0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            domain_error(DomainError::IllegalTransition {
                from: RequestStatus::Pending,
                to: RequestStatus::Approved,
            })
            .0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(domain_error(DomainError::NotOwner).0, StatusCode::FORBIDDEN);
        assert_eq!(
            domain_error(DomainError::InvoiceNotFound).0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            domain_error(DomainError::HasPayments).0,
            StatusCode::CONFLICT
        );
        assert_eq!(
            domain_error(DomainError::AnimalAlreadyAdopted).0,
            StatusCode::CONFLICT
        );
    }
}
