use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoteResponse {
    /// Note ID
    pub id: i64,
    /// Note title
    pub title: String,
    /// Note content
    pub content: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    /// Note title
    pub title: String,
    /// Note content
    pub content: String,
}

/// Partial update: a field left out of the payload keeps its stored value.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    /// New title, if any
    #[serde(default)]
    pub title: Option<String>,
    /// New content, if any
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListNotesParams {
    /// Number of notes to skip
    #[serde(default)]
    pub skip: i64,
    /// Maximum number of notes to return
    #[serde(default = "default_limit")]
    pub limit: i64,
}

const fn default_limit() -> i64 {
    100
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}
