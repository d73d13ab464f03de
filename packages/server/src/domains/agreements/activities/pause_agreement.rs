//! Pause an active agreement.

use tracing::{error, info};

use super::participants::load_participants;
use crate::common::{Actor, Capability, ServiceError, ServiceResult, SupervisionAgreementId};
use crate::domains::agreements::models::SupervisionAgreement;
use crate::kernel::ServerDeps;

/// Pause an active agreement (physician or admin).
///
/// Paused agreements keep their terms and can be resumed; billing stops via
/// the processor adapter after the transition commits.
pub async fn pause_agreement(
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
            "only the supervising physician or an admin may pause the agreement",
        ));
    }

    let paused = SupervisionAgreement::pause(agreement_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ServiceError::conflict("agreement is not active"))?;

    info!(agreement_id = %paused.id, "Agreement paused");

    let payments = deps.payments.clone();
    let paused_id = paused.id;
    tokio::spawn(async move {
        if let Err(e) = payments.pause_subscription(paused_id).await {
            error!(error = %e, agreement_id = %paused_id, "Failed to pause subscription");
        }
    });

    Ok(paused)
}
