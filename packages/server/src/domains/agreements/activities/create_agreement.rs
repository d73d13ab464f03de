//! Draft a supervision agreement for an accepted match.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

use super::participants::load_participants;
use crate::common::{
    Actor, Capability, CollaborationMatchId, ServiceError, ServiceResult, SupervisionAgreementId,
};
use crate::domains::agreements::fees::{platform_fee_cents, validate_fee_inputs};
use crate::domains::agreements::models::{AgreementStatus, SupervisionAgreement};
use crate::domains::matching::models::MatchStatus;
use crate::kernel::ServerDeps;

/// Fee terms proposed by the physician. The platform fee percent falls back
/// to the configured default; the derived fee is never accepted as input.
#[derive(Debug, Clone)]
pub struct CreateAgreementInput {
    pub monthly_fee_cents: i64,
    pub platform_fee_percent: Option<Decimal>,
}

/// Create a draft agreement on an accepted match.
///
/// Only the match's physician may draft; a match carries at most one
/// agreement row, so a second create is a conflict whatever state the first
/// one reached.
pub async fn create_agreement(
    actor: &Actor,
    match_id: CollaborationMatchId,
    input: CreateAgreementInput,
    deps: &ServerDeps,
) -> ServiceResult<SupervisionAgreement> {
    actor.require(Capability::DraftAgreement)?;

    let participants = load_participants(match_id, &deps.db_pool).await?;

    if participants.physician_user_id != actor.user_id {
        return Err(ServiceError::NotFound("collaboration match"));
    }

    if participants.collaboration_match.status != MatchStatus::Accepted.to_string() {
        return Err(ServiceError::conflict(
            "match has not been accepted",
        ));
    }

    if SupervisionAgreement::find_by_match(match_id, &deps.db_pool)
        .await?
        .is_some()
    {
        return Err(ServiceError::conflict(
            "an agreement already exists for this match",
        ));
    }

    let percent = input
        .platform_fee_percent
        .unwrap_or(deps.platform_fee_percent)
        .round_dp(2);
    validate_fee_inputs(input.monthly_fee_cents, percent)?;

    let agreement = SupervisionAgreement {
        id: SupervisionAgreementId::new(),
        collaboration_match_id: match_id,
        status: AgreementStatus::Draft.to_string(),
        monthly_fee_cents: input.monthly_fee_cents,
        platform_fee_percent: percent,
        platform_fee_cents: platform_fee_cents(input.monthly_fee_cents, percent),
        billing_anchor_day: None,
        activated_at: None,
        paused_at: None,
        terminated_at: None,
        termination_reason: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let agreement = agreement.insert(&deps.db_pool).await?;

    info!(
        agreement_id = %agreement.id,
        match_id = %match_id,
        monthly_fee_cents = agreement.monthly_fee_cents,
        platform_fee_cents = agreement.platform_fee_cents,
        "Supervision agreement drafted"
    );

    Ok(agreement)
}
