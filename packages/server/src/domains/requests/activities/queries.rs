//! Request reads with owner-or-admin visibility.

use crate::common::{Actor, CollaborationRequestId, ServiceError, ServiceResult};
use crate::domains::requests::models::CollaborationRequest;
use crate::kernel::ServerDeps;

/// Fetch one request. Visible to its practitioner and to admins; everyone
/// else gets the same NotFound an absent row would produce.
pub async fn get_request(
    actor: &Actor,
    request_id: CollaborationRequestId,
    deps: &ServerDeps,
) -> ServiceResult<CollaborationRequest> {
    let request = CollaborationRequest::find_by_id(request_id, &deps.db_pool)
        .await?
        .ok_or(ServiceError::NotFound("collaboration request"))?;

    if request.practitioner_user_id != actor.user_id && !actor.is_admin() {
        return Err(ServiceError::NotFound("collaboration request"));
    }

    Ok(request)
}

/// All requests submitted by the calling practitioner, newest first.
pub async fn list_own_requests(
    actor: &Actor,
    deps: &ServerDeps,
) -> ServiceResult<Vec<CollaborationRequest>> {
    CollaborationRequest::find_by_practitioner(actor.user_id, &deps.db_pool)
        .await
        .map_err(Into::into)
}
