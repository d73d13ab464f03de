//! Close request activity.

use tracing::info;

use crate::common::{Actor, Capability, CollaborationRequestId, ServiceError, ServiceResult};
use crate::domains::requests::models::CollaborationRequest;
use crate::kernel::ServerDeps;

/// Close a collaboration request.
///
/// Only the owning practitioner may close; closing twice is a conflict, not
/// a silent success. Matches and agreements already created from the request
/// are unaffected.
pub async fn close_request(
    actor: &Actor,
    request_id: CollaborationRequestId,
    deps: &ServerDeps,
) -> ServiceResult<CollaborationRequest> {
    actor.require(Capability::CloseRequest)?;

    let request = CollaborationRequest::find_by_id(request_id, &deps.db_pool)
        .await?
        .ok_or(ServiceError::NotFound("collaboration request"))?;

    if request.practitioner_user_id != actor.user_id {
        // Opaque to non-owners: same answer as a request that does not exist.
        return Err(ServiceError::NotFound("collaboration request"));
    }

    let closed = CollaborationRequest::close(request_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ServiceError::conflict("request is already closed"))?;

    info!(request_id = %closed.id, "Collaboration request closed");

    Ok(closed)
}
