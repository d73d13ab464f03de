//! Revise fee terms on an unsigned agreement.

use rust_decimal::Decimal;
use tracing::info;

use super::participants::load_participants;
use crate::common::{Actor, Capability, ServiceError, ServiceResult, SupervisionAgreementId};
use crate::domains::agreements::fees::{platform_fee_cents, validate_fee_inputs};
use crate::domains::agreements::models::{AgreementStatus, SupervisionAgreement};
use crate::kernel::ServerDeps;

/// Partial fee update; omitted fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct UpdateAgreementInput {
    pub monthly_fee_cents: Option<i64>,
    pub platform_fee_percent: Option<Decimal>,
}

/// Update the fee fields of a draft or pending-signature agreement.
///
/// The derived platform fee is recomputed from the merged inputs on every
/// update; once signed-and-activated the terms are immutable (pause or
/// terminate instead).
pub async fn update_agreement(
    actor: &Actor,
    agreement_id: SupervisionAgreementId,
    input: UpdateAgreementInput,
    deps: &ServerDeps,
) -> ServiceResult<SupervisionAgreement> {
    actor.require(Capability::DraftAgreement)?;

    let agreement = SupervisionAgreement::find_by_id(agreement_id, &deps.db_pool)
        .await?
        .ok_or(ServiceError::NotFound("supervision agreement"))?;

    let participants =
        load_participants(agreement.collaboration_match_id, &deps.db_pool).await?;

    if participants.physician_user_id != actor.user_id {
        return Err(ServiceError::NotFound("supervision agreement"));
    }

    let draft = AgreementStatus::Draft.to_string();
    let pending = AgreementStatus::PendingSignature.to_string();
    if agreement.status != draft && agreement.status != pending {
        return Err(ServiceError::conflict(
            "fee terms can only change before activation",
        ));
    }

    let monthly = input
        .monthly_fee_cents
        .unwrap_or(agreement.monthly_fee_cents);
    let percent = input
        .platform_fee_percent
        .unwrap_or(agreement.platform_fee_percent)
        .round_dp(2);
    validate_fee_inputs(monthly, percent)?;

    let updated = SupervisionAgreement::update_fees(
        agreement_id,
        monthly,
        percent,
        platform_fee_cents(monthly, percent),
        &deps.db_pool,
    )
    .await?
    .ok_or_else(|| ServiceError::conflict("fee terms can only change before activation"))?;

    info!(
        agreement_id = %updated.id,
        monthly_fee_cents = updated.monthly_fee_cents,
        platform_fee_cents = updated.platform_fee_cents,
        "Agreement fee terms updated"
    );

    Ok(updated)
}
