use chrono::{DateTime, Utc};
use juniper::GraphQLObject;
use serde::{Deserialize, Serialize};

use crate::domains::matching::models::CollaborationMatch;

/// CollaborationMatch GraphQL data type
#[derive(Debug, Clone, Serialize, Deserialize, GraphQLObject)]
#[graphql(description = "A candidate pairing between a supervision request and a physician")]
pub struct CollaborationMatchData {
    /// Unique identifier
    pub id: String,

    /// The request this match was created for
    pub request_id: String,

    /// The candidate physician's profile
    pub physician_profile_id: String,

    /// pending, accepted, or declined
    pub status: String,

    /// Fit score, 0-100
    pub match_score: i32,

    /// Contributing factors in scoring order, each with its point value
    pub match_reasons: Vec<String>,

    /// When the physician responded (set atomically with the terminal status)
    pub responded_at: Option<DateTime<Utc>>,

    /// When the match was created
    pub created_at: DateTime<Utc>,
}

impl From<CollaborationMatch> for CollaborationMatchData {
    fn from(m: CollaborationMatch) -> Self {
        Self {
            id: m.id.to_string(),
            request_id: m.request_id.to_string(),
            physician_profile_id: m.physician_profile_id.to_string(),
            status: m.status,
            match_score: m.match_score,
            match_reasons: m.match_reasons,
            responded_at: m.responded_at,
            created_at: m.created_at,
        }
    }
}
