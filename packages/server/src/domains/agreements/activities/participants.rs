//! Shared lookup of the two parties behind a match.

use crate::common::{CollaborationMatchId, ServiceError, ServiceResult, UserId};
use crate::domains::matching::models::CollaborationMatch;
use crate::domains::physicians::models::PhysicianProfile;
use crate::domains::requests::models::CollaborationRequest;
use sqlx::PgPool;

/// The match plus the user ids of its physician and practitioner sides.
#[derive(Debug, Clone)]
pub struct MatchParticipants {
    pub collaboration_match: CollaborationMatch,
    pub physician_user_id: UserId,
    pub practitioner_user_id: UserId,
}

impl MatchParticipants {
    pub fn includes(&self, user_id: UserId) -> bool {
        self.physician_user_id == user_id || self.practitioner_user_id == user_id
    }
}

/// Resolve a match to its participants.
///
/// The profile and request rows are FK-guaranteed; a missing one is treated
/// as the match not existing rather than leaking a half-deleted state.
pub async fn load_participants(
    match_id: CollaborationMatchId,
    pool: &PgPool,
) -> ServiceResult<MatchParticipants> {
    let collaboration_match = CollaborationMatch::find_by_id(match_id, pool)
        .await?
        .ok_or(ServiceError::NotFound("collaboration match"))?;

    let profile = PhysicianProfile::find_by_id(collaboration_match.physician_profile_id, pool)
        .await?
        .ok_or(ServiceError::NotFound("collaboration match"))?;

    let request = CollaborationRequest::find_by_id(collaboration_match.request_id, pool)
        .await?
        .ok_or(ServiceError::NotFound("collaboration match"))?;

    Ok(MatchParticipants {
        collaboration_match,
        physician_user_id: profile.user_id,
        practitioner_user_id: request.practitioner_user_id,
    })
}
