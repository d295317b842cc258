use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Staff,
    Adopter,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Staff => "STAFF",
            Role::Adopter => "ADOPTER",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ADMIN" => Some(Role::Admin),
            "STAFF" => Some(Role::Staff),
            "ADOPTER" => Some(Role::Adopter),
            _ => None,
        }
    }
}

/// Authenticated identity supplied by the boundary with every call.
/// Authentication itself happens upstream; the core only checks role and
/// ownership.
#[derive(Debug, Clone, Copy)]
pub struct CallerContext {
    pub user_id: Uuid,
    pub role: Role,
}

impl CallerContext {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_staff(&self) -> bool {
        matches!(self.role, Role::Admin | Role::Staff)
    }

    pub fn require_staff(&self) -> Result<(), DomainError> {
        if self.is_staff() {
            Ok(())
        } else {
            Err(DomainError::Forbidden)
        }
    }
}
