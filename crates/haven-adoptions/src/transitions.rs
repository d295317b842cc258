use haven_core::RequestStatus;

/// Comment stamped on competing requests rejected when another applicant
/// completes the adoption.
pub const CASCADE_REJECTION_COMMENT: &str = "Animal has been adopted by another applicant";

/// Staff-driven transition table. The happy path walks
/// Pending -> InterviewScheduled -> Approved -> Completed; staff may jump
/// any non-terminal request straight to Rejected or Completed. Cancellation
/// is owner-only and handled outside this table.
pub fn transition_allowed(from: RequestStatus, to: RequestStatus) -> bool {
    match (from, to) {
        (RequestStatus::Pending, RequestStatus::InterviewScheduled) => true,
        (RequestStatus::InterviewScheduled, RequestStatus::Approved) => true,
        (from, RequestStatus::Rejected | RequestStatus::Completed) => !from.is_terminal(),
        _ => false,
    }
}
