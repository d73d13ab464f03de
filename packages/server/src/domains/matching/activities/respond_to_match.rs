//! Physician response to a match: the capacity-guarded accept, and decline.

use std::str::FromStr;
use tracing::info;

use crate::common::{Actor, Capability, CollaborationMatchId, ServiceError, ServiceResult};
use crate::domains::matching::models::{CollaborationMatch, MatchStatus};
use crate::domains::physicians::capacity::CapacitySnapshot;
use crate::domains::physicians::models::PhysicianProfile;
use crate::domains::requests::models::CollaborationRequest;
use crate::kernel::ServerDeps;

/// The physician's answer to a pending match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResponse {
    Accept,
    Decline,
}

impl FromStr for MatchResponse {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "accepted" => Ok(MatchResponse::Accept),
            "declined" => Ok(MatchResponse::Decline),
            _ => Err(anyhow::anyhow!("Invalid match response: {}", s)),
        }
    }
}

/// Accept or decline a pending match.
///
/// Only the physician owning the match's profile may respond, exactly once.
/// Acceptance re-checks capacity under a lock on the physician profile row,
/// so concurrent accepts for the same physician serialize and at most
/// `max_supervisees` can ever win. A full physician gets a conflict and the
/// match stays pending (a later decline is still possible).
pub async fn respond_to_match(
    actor: &Actor,
    match_id: CollaborationMatchId,
    response: MatchResponse,
    deps: &ServerDeps,
) -> ServiceResult<CollaborationMatch> {
    actor.require(Capability::RespondToMatch)?;

    let candidate_match = CollaborationMatch::find_by_id(match_id, &deps.db_pool)
        .await?
        .ok_or(ServiceError::NotFound("collaboration match"))?;

    let profile = PhysicianProfile::find_by_id(candidate_match.physician_profile_id, &deps.db_pool)
        .await?
        .ok_or(ServiceError::NotFound("physician profile"))?;

    if profile.user_id != actor.user_id {
        // Opaque to every physician but the named one.
        return Err(ServiceError::NotFound("collaboration match"));
    }

    if candidate_match.status != MatchStatus::Pending.to_string() {
        return Err(ServiceError::conflict(
            "match has already been responded to",
        ));
    }

    match response {
        MatchResponse::Decline => decline(candidate_match, deps).await,
        MatchResponse::Accept => accept(candidate_match, deps).await,
    }
}

async fn decline(
    candidate_match: CollaborationMatch,
    deps: &ServerDeps,
) -> ServiceResult<CollaborationMatch> {
    let declined = CollaborationMatch::mark_declined(candidate_match.id, &deps.db_pool)
        .await?
        .ok_or_else(|| ServiceError::conflict("match has already been responded to"))?;

    info!(match_id = %declined.id, "Match declined");

    Ok(declined)
}

async fn accept(
    candidate_match: CollaborationMatch,
    deps: &ServerDeps,
) -> ServiceResult<CollaborationMatch> {
    let mut tx = deps.db_pool.begin().await?;

    // Per-physician serialization point: everything below runs under the
    // profile row lock, so the capacity read cannot race another accept.
    let locked = PhysicianProfile::lock_by_id(candidate_match.physician_profile_id, &mut tx)
        .await?
        .ok_or(ServiceError::NotFound("physician profile"))?;

    let active =
        PhysicianProfile::active_supervisee_count(locked.id, &mut *tx).await?;
    let capacity = CapacitySnapshot::new(locked.is_active, locked.max_supervisees, active);

    if !capacity.has_capacity() {
        tx.rollback().await?;
        return Err(ServiceError::conflict("capacity reached"));
    }

    let accepted = CollaborationMatch::mark_accepted(candidate_match.id, &mut tx)
        .await?
        .ok_or_else(|| ServiceError::conflict("match has already been responded to"))?;

    CollaborationRequest::mark_matched(accepted.request_id, &mut tx).await?;

    tx.commit().await?;

    info!(
        match_id = %accepted.id,
        physician_profile_id = %accepted.physician_profile_id,
        supervisees = active + 1,
        "Match accepted"
    );

    Ok(accepted)
}
