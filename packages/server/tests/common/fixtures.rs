//! Test fixtures for creating test data.
//!
//! Fixtures use the model methods and activities directly, the same paths
//! production takes.

use anyhow::Result;
use chrono::{Duration, Utc};
use sqlx::PgPool;

use server_core::common::{Actor, PhysicianProfileId, UserId};
use server_core::domains::matching::activities::{respond_to_match, MatchResponse};
use server_core::domains::matching::models::CollaborationMatch;
use server_core::domains::physicians::models::PhysicianProfile;
use server_core::domains::requests::activities::{
    create_request, CreateRequestInput, CreatedRequest,
};
use server_core::kernel::ServerDeps;

/// A physician profile plus the actor who owns it.
pub struct PhysicianFixture {
    pub actor: Actor,
    pub profile: PhysicianProfile,
}

/// Create an active physician profile.
pub async fn create_physician(
    pool: &PgPool,
    licensed_states: &[&str],
    specialties: &[&str],
    supervision_model: &str,
    max_supervisees: i32,
) -> Result<PhysicianFixture> {
    let user_id = UserId::new();
    let profile = PhysicianProfile {
        id: PhysicianProfileId::new(),
        user_id,
        licensed_states: licensed_states.iter().map(|s| s.to_string()).collect(),
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        max_supervisees,
        supervision_model: supervision_model.to_string(),
        malpractice_confirmed: true,
        malpractice_policy_url: None,
        bio: None,
        is_active: true,
        billing_ready: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
    .insert(pool)
    .await?;

    Ok(PhysicianFixture {
        actor: Actor::physician(user_id),
        profile,
    })
}

/// A request payload 30 days out; override fields as needed.
pub fn request_input(states: &[&str], specialty: &str, practice_model: &str) -> CreateRequestInput {
    CreateRequestInput {
        profession_type: "np".to_string(),
        states_requested: states.iter().map(|s| s.to_string()).collect(),
        specialty: specialty.to_string(),
        practice_model: practice_model.to_string(),
        expected_start_date: Utc::now().date_naive() + Duration::days(30),
        preferred_supervision_model: None,
    }
}

/// Submit a request as a fresh practitioner; returns the actor too.
pub async fn submit_request(
    deps: &ServerDeps,
    states: &[&str],
    specialty: &str,
    practice_model: &str,
) -> Result<(Actor, CreatedRequest)> {
    let practitioner = Actor::practitioner(UserId::new());
    let created = create_request(
        &practitioner,
        request_input(states, specialty, practice_model),
        deps,
    )
    .await?;
    Ok((practitioner, created))
}

/// Drive a fresh request to an accepted match against the given physician.
///
/// The request is tailored to the physician so exactly one match spawns.
pub async fn accepted_match(
    deps: &ServerDeps,
    physician: &PhysicianFixture,
) -> Result<(Actor, CollaborationMatch)> {
    let states: Vec<&str> = physician
        .profile
        .licensed_states
        .iter()
        .map(String::as_str)
        .collect();
    let specialty = physician.profile.specialties[0].as_str();

    let (practitioner, created) =
        submit_request(deps, &states, specialty, "hybrid").await?;

    let spawned = created
        .matches
        .iter()
        .find(|m| m.physician_profile_id == physician.profile.id)
        .expect("request should match the tailored physician");

    let accepted =
        respond_to_match(&physician.actor, spawned.id, MatchResponse::Accept, deps).await?;

    Ok((practitioner, accepted))
}
