//! Fresh identifier generation for entities created without one.

use uuid::Uuid;

/// Build a fresh unique id of the form `{prefix}-{uuid}`.
pub fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

/// `true` when an entity still needs an id assigned.
pub fn is_unassigned(id: &str) -> bool {
    id.trim().is_empty()
}
