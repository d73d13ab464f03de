use chrono::{DateTime, Utc};
use juniper::{GraphQLInputObject, GraphQLObject};
use serde::{Deserialize, Serialize};

use crate::domains::matching::data::CollaborationMatchData;
use crate::domains::requests::activities::CreatedRequest;
use crate::domains::requests::models::CollaborationRequest;

/// CollaborationRequest GraphQL data type
#[derive(Debug, Clone, Serialize, Deserialize, GraphQLObject)]
#[graphql(description = "A practitioner's standing ask for collaborative supervision")]
pub struct CollaborationRequestData {
    /// Unique identifier
    pub id: String,

    /// Owning practitioner's user id
    pub practitioner_user_id: String,

    /// np or pa
    pub profession_type: String,

    /// Two-letter codes of states where supervision is needed
    pub states_requested: Vec<String>,

    /// Requested specialty
    pub specialty: String,

    /// telehealth, in_person, or hybrid
    pub practice_model: String,

    /// First day supervision is needed (ISO date)
    pub expected_start_date: String,

    /// Preferred supervision model, if any
    pub preferred_supervision_model: Option<String>,

    /// open, matched, or closed
    pub status: String,

    /// When the request was submitted
    pub created_at: DateTime<Utc>,
}

impl From<CollaborationRequest> for CollaborationRequestData {
    fn from(request: CollaborationRequest) -> Self {
        Self {
            id: request.id.to_string(),
            practitioner_user_id: request.practitioner_user_id.to_string(),
            profession_type: request.profession_type,
            states_requested: request.states_requested,
            specialty: request.specialty,
            practice_model: request.practice_model,
            expected_start_date: request.expected_start_date.to_string(),
            preferred_supervision_model: request.preferred_supervision_model,
            status: request.status,
            created_at: request.created_at,
        }
    }
}

/// Input for submitting a collaboration request
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct SubmitRequestInput {
    /// np or pa
    pub profession_type: String,

    /// Two-letter state codes (at least one)
    pub states_requested: Vec<String>,

    /// Requested specialty
    pub specialty: String,

    /// telehealth, in_person, or hybrid
    pub practice_model: String,

    /// ISO date (YYYY-MM-DD), strictly in the future
    pub expected_start_date: String,

    /// Preferred supervision model, if any
    pub preferred_supervision_model: Option<String>,
}

/// Result of submitting a request: the request plus its ranked matches
#[derive(Debug, Clone, GraphQLObject)]
pub struct SubmitRequestResult {
    pub request: CollaborationRequestData,

    /// Matches created for the request, best score first
    pub matches: Vec<CollaborationMatchData>,
}

impl From<CreatedRequest> for SubmitRequestResult {
    fn from(created: CreatedRequest) -> Self {
        Self {
            request: created.request.into(),
            matches: created.matches.into_iter().map(Into::into).collect(),
        }
    }
}
