use crate::domain::shared::errors::DomainError;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Allowed,
    Denied,
}

/// Only the recorded owner may mutate or delete a resource.
///
/// `actor_id` is taken at face value. Whether it came from a client argument
/// or a verified session is decided by the transport layer.
pub fn authorize(actor_id: Uuid, owner_id: Uuid) -> Authorization {
    if actor_id == owner_id {
        Authorization::Allowed
    } else {
        Authorization::Denied
    }
}

pub fn ensure_owner(actor_id: Uuid, owner_id: Uuid) -> Result<(), DomainError> {
    match authorize(actor_id, owner_id) {
        Authorization::Allowed => Ok(()),
        Authorization::Denied => Err(DomainError::unauthorized(
            "userId",
            "User not authorized",
        )),
    }
}
