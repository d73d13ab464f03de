//! Reactivate a paused agreement.

use tracing::{error, info};

use super::participants::load_participants;
use crate::common::{Actor, Capability, ServiceError, ServiceResult, SupervisionAgreementId};
use crate::domains::agreements::models::SupervisionAgreement;
use crate::kernel::ServerDeps;

/// Resume a paused agreement (physician or admin).
pub async fn resume_agreement(
    actor: &Actor,
    agreement_id: SupervisionAgreementId,
    deps: &ServerDeps,
) -> ServiceResult<SupervisionAgreement> {
    actor.require(Capability::PauseAgreement)?;

    let agreement = SupervisionAgreement::find_by_id(agreement_id, &deps.db_pool)
        .await?
        .ok_or(ServiceError::NotFound("supervision agreement"))?;

    let participants =
        load_participants(agreement.collaboration_match_id, &deps.db_pool).await?;

    if !participants.includes(actor.user_id) && !actor.is_admin() {
        return Err(ServiceError::NotFound("supervision agreement"));
    }
    if participants.physician_user_id != actor.user_id && !actor.is_admin() {
        return Err(ServiceError::unauthorized(
            "only the supervising physician or an admin may resume the agreement",
        ));
    }

    let resumed = SupervisionAgreement::resume(agreement_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ServiceError::conflict("agreement is not paused"))?;

    info!(agreement_id = %resumed.id, "Agreement resumed");

    let payments = deps.payments.clone();
    let resumed_id = resumed.id;
    tokio::spawn(async move {
        if let Err(e) = payments.resume_subscription(resumed_id).await {
            error!(error = %e, agreement_id = %resumed_id, "Failed to resume subscription");
        }
    });

    Ok(resumed)
}
