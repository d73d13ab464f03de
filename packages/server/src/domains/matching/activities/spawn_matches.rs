//! Materialize ranked candidates as pending matches for a new request.

use tracing::{debug, info};

use crate::common::{CollaborationMatchId, ServiceResult};
use crate::domains::matching::engine::{self, EngineCandidate};
use crate::domains::matching::models::{CollaborationMatch, MatchStatus};
use crate::domains::physicians::models::PhysicianProfile;
use crate::domains::requests::models::CollaborationRequest;
use crate::kernel::ServerDeps;

/// Run the engine over the active physician pool and create one `pending`
/// match per candidate at or above the configured score floor, up to the
/// configured cap. Returns the created matches in rank order.
pub async fn spawn_matches_for_request(
    request: &CollaborationRequest,
    deps: &ServerDeps,
) -> ServiceResult<Vec<CollaborationMatch>> {
    let profiles = PhysicianProfile::find_active(&deps.db_pool).await?;
    let counts = PhysicianProfile::active_supervisee_counts(&deps.db_pool).await?;

    let candidates: Vec<EngineCandidate> = profiles
        .into_iter()
        .map(|profile| {
            let active = counts.get(&profile.id).copied().unwrap_or(0);
            EngineCandidate::new(profile, active)
        })
        .collect();

    let ranking = engine::rank(request, &candidates);
    debug!(
        request_id = %request.id,
        candidates = candidates.len(),
        ranked = ranking.len(),
        "Ranked supervision candidates"
    );

    let mut created = Vec::new();
    for ranked in ranking
        .into_iter()
        .filter(|ranked| ranked.score >= deps.matching.score_floor)
        .take(deps.matching.max_candidates)
    {
        let row = CollaborationMatch {
            id: CollaborationMatchId::new(),
            request_id: request.id,
            physician_profile_id: ranked.physician_profile_id,
            status: MatchStatus::Pending.to_string(),
            match_score: ranked.score,
            match_reasons: ranked.reasons,
            responded_at: None,
            created_at: request.created_at,
        };
        created.push(row.insert(&deps.db_pool).await?);
    }

    info!(
        request_id = %request.id,
        matches = created.len(),
        "Created pending matches for request"
    );

    Ok(created)
}
