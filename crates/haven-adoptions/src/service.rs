use chrono::Utc;
use uuid::Uuid;

use haven_core::{
    AdoptionRequest, AdoptionStore, AnimalStatus, CallerContext, DomainError, RequestFilter,
    RequestPatch, RequestStatus, Role,
};

use crate::transitions::{CASCADE_REJECTION_COMMENT, transition_allowed};

/// Result of a staff decision on a request, including the fallout of a
/// completion.
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub request: AdoptionRequest,
    pub rejected_request_ids: Vec<Uuid>,
    pub animal_adopted: bool,
}

/// Open a Pending request for an available animal. The caller must be the
/// adopter; one active request per (animal, adopter) pair.
pub async fn create_request<S: AdoptionStore>(
    store: &mut S,
    ctx: &CallerContext,
    animal_id: Uuid,
    adopter_id: Uuid,
) -> Result<AdoptionRequest, DomainError> {
    if adopter_id != ctx.user_id {
        return Err(DomainError::NotOwner);
    }

    let available = matches!(
        store.animal(animal_id).await?,
        Some(animal) if animal.status == AnimalStatus::Available
    );
    if !available {
        return Err(DomainError::AnimalUnavailable);
    }

    let duplicates = store
        .requests(&RequestFilter {
            animal_id: Some(animal_id),
            adopter_id: Some(adopter_id),
            active_only: true,
        })
        .await?;
    if !duplicates.is_empty() {
        return Err(DomainError::DuplicateActiveRequest);
    }

    let now = Utc::now();
    let request = AdoptionRequest {
        id: Uuid::new_v4(),
        animal_id,
        adopter_id,
        status: RequestStatus::Pending,
        requested_at: now,
        processed_by: None,
        staff_comments: None,
        updated_at: now,
    };
    store.insert_request(&request).await?;

    Ok(request)
}

/// Staff decision on a request. Completion additionally claims the animal
/// and force-rejects every competing active request; all of it lands in the
/// caller's single transaction or not at all.
pub async fn process_request<S: AdoptionStore>(
    store: &mut S,
    ctx: &CallerContext,
    request_id: Uuid,
    new_status: RequestStatus,
    comments: Option<String>,
) -> Result<ProcessOutcome, DomainError> {
    ctx.require_staff()?;

    let Some(request) = store.request(request_id).await? else {
        return Err(DomainError::RequestNotFound);
    };
    if !transition_allowed(request.status, new_status) {
        return Err(DomainError::IllegalTransition {
            from: request.status,
            to: new_status,
        });
    }

    let completing = new_status == RequestStatus::Completed;
    if completing {
        // The winner's animal may have been claimed by a racing completion
        // since this request went active; the store holds the row lock here.
        let Some(animal) = store.animal(request.animal_id).await? else {
            return Err(DomainError::AnimalNotFound);
        };
        if animal.status != AnimalStatus::Available {
            return Err(DomainError::AnimalAlreadyAdopted);
        }
    }

    store
        .update_request(
            request_id,
            &RequestPatch {
                status: Some(new_status),
                processed_by: Some(ctx.user_id),
                staff_comments: comments,
            },
        )
        .await?;

    let mut rejected_request_ids = Vec::new();
    if completing {
        store
            .set_animal_status(request.animal_id, AnimalStatus::Adopted)
            .await?;

        let competing = store
            .requests(&RequestFilter {
                animal_id: Some(request.animal_id),
                adopter_id: None,
                active_only: true,
            })
            .await?;
        for other in competing {
            if other.id == request_id {
                continue;
            }
            store
                .update_request(
                    other.id,
                    &RequestPatch {
                        status: Some(RequestStatus::Rejected),
                        processed_by: Some(ctx.user_id),
                        staff_comments: Some(CASCADE_REJECTION_COMMENT.to_string()),
                    },
                )
                .await?;
            rejected_request_ids.push(other.id);
        }
    }

    let request = store
        .request(request_id)
        .await?
        .ok_or(DomainError::RequestNotFound)?;

    Ok(ProcessOutcome {
        request,
        rejected_request_ids,
        animal_adopted: completing,
    })
}

/// Adopter withdraws their own request. Only a still-Pending request can be
/// withdrawn.
pub async fn cancel_request<S: AdoptionStore>(
    store: &mut S,
    ctx: &CallerContext,
    request_id: Uuid,
) -> Result<AdoptionRequest, DomainError> {
    let Some(request) = store.request(request_id).await? else {
        return Err(DomainError::RequestNotFound);
    };
    if request.adopter_id != ctx.user_id {
        return Err(DomainError::NotOwner);
    }
    if request.status != RequestStatus::Pending {
        return Err(DomainError::InvalidState);
    }

    store
        .update_request(
            request_id,
            &RequestPatch {
                status: Some(RequestStatus::Cancelled),
                ..RequestPatch::default()
            },
        )
        .await?;

    store
        .request(request_id)
        .await?
        .ok_or(DomainError::RequestNotFound)
}

/// Read a single request. Staff see everything; adopters only their own.
pub async fn get_request<S: AdoptionStore>(
    store: &mut S,
    ctx: &CallerContext,
    request_id: Uuid,
) -> Result<AdoptionRequest, DomainError> {
    let Some(request) = store.request(request_id).await? else {
        return Err(DomainError::RequestNotFound);
    };
    if ctx.role == Role::Adopter && request.adopter_id != ctx.user_id {
        return Err(DomainError::NotOwner);
    }
    Ok(request)
}
