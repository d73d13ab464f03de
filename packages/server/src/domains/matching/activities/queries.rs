//! Match reads scoped to the actors who may see them.

use crate::common::{Actor, CollaborationRequestId, ServiceError, ServiceResult};
use crate::domains::matching::models::CollaborationMatch;
use crate::domains::physicians::models::PhysicianProfile;
use crate::domains::requests::models::CollaborationRequest;
use crate::kernel::ServerDeps;

/// Matches for a request, visible to the requesting practitioner and admins.
pub async fn list_matches_for_request(
    actor: &Actor,
    request_id: CollaborationRequestId,
    deps: &ServerDeps,
) -> ServiceResult<Vec<CollaborationMatch>> {
    let request = CollaborationRequest::find_by_id(request_id, &deps.db_pool)
        .await?
        .ok_or(ServiceError::NotFound("collaboration request"))?;

    if request.practitioner_user_id != actor.user_id && !actor.is_admin() {
        return Err(ServiceError::NotFound("collaboration request"));
    }

    CollaborationMatch::find_by_request(request_id, &deps.db_pool)
        .await
        .map_err(Into::into)
}

/// Pending matches awaiting the calling physician's response.
pub async fn list_pending_matches(
    actor: &Actor,
    deps: &ServerDeps,
) -> ServiceResult<Vec<CollaborationMatch>> {
    let profile = PhysicianProfile::find_by_user(actor.user_id, &deps.db_pool)
        .await?
        .ok_or(ServiceError::NotFound("physician profile"))?;

    CollaborationMatch::find_pending_for_physician(profile.id, &deps.db_pool)
        .await
        .map_err(Into::into)
}
