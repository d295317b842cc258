pub mod service;
pub mod transitions;

pub use service::{
    ProcessOutcome, cancel_request, create_request, get_request, process_request,
};
pub use transitions::{CASCADE_REJECTION_COMMENT, transition_allowed};
