//! Land the external signature-capture result on an agreement.

use tracing::info;

use crate::common::{Actor, Capability, ServiceError, ServiceResult, SupervisionAgreementId};
use crate::domains::agreements::models::SupervisionAgreement;
use crate::kernel::ServerDeps;

/// Advance a draft agreement to pending_signature.
///
/// Signature capture happens in the e-signature collaborator; its callback
/// (authenticated as admin/system) reports completion here. Re-recording a
/// signature, or recording one on an already-active agreement, is a
/// conflict.
pub async fn record_signature(
    actor: &Actor,
    agreement_id: SupervisionAgreementId,
    deps: &ServerDeps,
) -> ServiceResult<SupervisionAgreement> {
    actor.require(Capability::RecordSignature)?;

    // Existence check first so absent and non-draft cases stay distinct.
    SupervisionAgreement::find_by_id(agreement_id, &deps.db_pool)
        .await?
        .ok_or(ServiceError::NotFound("supervision agreement"))?;

    let signed = SupervisionAgreement::mark_pending_signature(agreement_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ServiceError::conflict("agreement is not in draft"))?;

    info!(agreement_id = %signed.id, "Agreement signature recorded");

    Ok(signed)
}
