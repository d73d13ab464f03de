//! Terminate an agreement. Terminal and absorbing.

use tracing::{error, info};

use super::participants::load_participants;
use crate::common::{Actor, Capability, ServiceError, ServiceResult, SupervisionAgreementId};
use crate::domains::agreements::models::SupervisionAgreement;
use crate::kernel::ServerDeps;

/// Terminate an agreement in any non-terminated state.
///
/// Either party (or an admin) may terminate, with a reason. Terminating
/// frees the physician's slot: the supervisee count only considers matches
/// whose agreement is absent or non-terminated.
pub async fn terminate_agreement(
    actor: &Actor,
    agreement_id: SupervisionAgreementId,
    reason: &str,
    deps: &ServerDeps,
) -> ServiceResult<SupervisionAgreement> {
    actor.require(Capability::TerminateAgreement)?;

    if reason.trim().is_empty() {
        return Err(ServiceError::validation(
            "termination_reason must not be empty",
        ));
    }

    let agreement = SupervisionAgreement::find_by_id(agreement_id, &deps.db_pool)
        .await?
        .ok_or(ServiceError::NotFound("supervision agreement"))?;

    let participants =
        load_participants(agreement.collaboration_match_id, &deps.db_pool).await?;

    if !participants.includes(actor.user_id) && !actor.is_admin() {
        return Err(ServiceError::NotFound("supervision agreement"));
    }

    let terminated = SupervisionAgreement::terminate(agreement_id, reason.trim(), &deps.db_pool)
        .await?
        .ok_or_else(|| ServiceError::conflict("agreement is already terminated"))?;

    info!(
        agreement_id = %terminated.id,
        reason = %reason.trim(),
        "Agreement terminated"
    );

    let payments = deps.payments.clone();
    let terminated_id = terminated.id;
    tokio::spawn(async move {
        if let Err(e) = payments.cancel_subscription(terminated_id).await {
            error!(error = %e, agreement_id = %terminated_id, "Failed to cancel subscription");
        }
    });

    Ok(terminated)
}
