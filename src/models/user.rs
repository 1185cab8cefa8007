//! User profile model for storage and API.

use serde::{Deserialize, Serialize};

/// User profile stored in Firestore.
///
/// The subject id issued by the identity provider serves as both the
/// document ID and the `id` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Identity subject id (also used as document ID)
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address (not unique at this layer; the identity provider
    /// deduplicates accounts by email)
    pub email: String,
}
