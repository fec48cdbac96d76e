//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Context for the current authenticated request.
///
/// Built by the auth extractor from a validated access token and passed
/// into service methods so every operation knows who is acting.
#[derive(Debug, Clone, Serialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context for `user_id`.
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            request_time: Utc::now(),
        }
    }

    /// Whether the caller is `user_id`.
    pub fn is_self(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}
