//! Interview record model for storage and API.

use serde::{Deserialize, Serialize};

/// A generated interview stored in Firestore.
///
/// Records are written once by the ingestion path and never updated.
/// Only `finalized` records show up in cross-user discovery listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interview {
    /// Document ID (UUID v4, assigned at ingestion)
    pub id: String,
    /// Owning user's subject id
    pub user_id: String,
    /// Target role, e.g. "Frontend Engineer"
    pub role: String,
    /// Interview kind: technical, behavioural or mixed
    #[serde(rename = "type")]
    pub kind: String,
    /// Seniority level, e.g. "Junior", "Senior"
    pub level: String,
    /// Technologies covered, in the order the requester listed them
    pub techstack: Vec<String>,
    /// Generated questions, in the order the model produced them
    pub questions: Vec<String>,
    /// Number of questions originally requested. May differ from
    /// `questions.len()` when the model returned fewer; the mismatch is
    /// kept observable rather than reconciled.
    pub amount: u32,
    /// Whether the interview is eligible for cross-user discovery
    pub finalized: bool,
    /// Cover image reference
    pub cover_image: String,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}
