//! Activate a signed agreement, gated on the external billing check.

use chrono::{Datelike, Utc};
use tracing::{error, info};

use super::participants::load_participants;
use crate::common::{Actor, Capability, ServiceError, ServiceResult, SupervisionAgreementId};
use crate::domains::agreements::models::{AgreementStatus, SupervisionAgreement};
use crate::kernel::ServerDeps;

/// Activate a pending-signature agreement.
///
/// Activation belongs to the practitioner side: the physician proposed the
/// terms, the practitioner turns them on. The physician's billing account
/// must be verified (checked against the billing collaborator at call time,
/// never cached). The billing anchor defaults to today's calendar day,
/// clamped to 28 so every month can bill.
pub async fn activate_agreement(
    actor: &Actor,
    agreement_id: SupervisionAgreementId,
    billing_anchor_day: Option<i32>,
    deps: &ServerDeps,
) -> ServiceResult<SupervisionAgreement> {
    actor.require(Capability::ActivateAgreement)?;

    let agreement = SupervisionAgreement::find_by_id(agreement_id, &deps.db_pool)
        .await?
        .ok_or(ServiceError::NotFound("supervision agreement"))?;

    let participants =
        load_participants(agreement.collaboration_match_id, &deps.db_pool).await?;

    if !participants.includes(actor.user_id) && !actor.is_admin() {
        return Err(ServiceError::NotFound("supervision agreement"));
    }
    if participants.practitioner_user_id != actor.user_id {
        return Err(ServiceError::unauthorized(
            "only the requesting practitioner may activate the agreement",
        ));
    }

    match agreement.status.parse::<AgreementStatus>()? {
        AgreementStatus::PendingSignature => {}
        AgreementStatus::Draft => {
            return Err(ServiceError::conflict("agreement has not been signed"));
        }
        _ => {
            return Err(ServiceError::conflict("agreement is not awaiting activation"));
        }
    }

    let anchor = match billing_anchor_day {
        Some(day) if (1..=28).contains(&day) => day,
        Some(day) => {
            return Err(ServiceError::validation(format!(
                "billing_anchor_day must be between 1 and 28, got {}",
                day
            )));
        }
        None => (Utc::now().day() as i32).min(28),
    };

    if !deps
        .billing
        .billing_capable(participants.physician_user_id)
        .await?
    {
        return Err(ServiceError::conflict(
            "physician billing account is not verified",
        ));
    }

    let activated = SupervisionAgreement::activate(agreement_id, anchor, &deps.db_pool)
        .await?
        .ok_or_else(|| ServiceError::conflict("agreement is not awaiting activation"))?;

    info!(
        agreement_id = %activated.id,
        billing_anchor_day = anchor,
        "Agreement activated"
    );

    // Subscription creation is a side effect of the committed transition,
    // not a precondition of it; failures reconcile out of band.
    let payments = deps.payments.clone();
    let activated_id = activated.id;
    tokio::spawn(async move {
        if let Err(e) = payments.start_subscription(activated_id).await {
            error!(error = %e, agreement_id = %activated_id, "Failed to start subscription");
        }
    });

    Ok(activated)
}
