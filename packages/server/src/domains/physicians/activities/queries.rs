//! Physician profile reads with derived capacity fields populated.

use tracing::debug;

use crate::common::{Actor, PhysicianProfileId, ServiceError, ServiceResult};
use crate::domains::physicians::capacity::CapacitySnapshot;
use crate::domains::physicians::models::PhysicianProfile;
use crate::kernel::ServerDeps;

/// A profile together with its computed load, ready for presentation.
#[derive(Debug, Clone)]
pub struct ProfileWithLoad {
    pub profile: PhysicianProfile,
    pub active_supervisee_count: i64,
}

impl ProfileWithLoad {
    pub fn capacity(&self) -> CapacitySnapshot {
        CapacitySnapshot::new(
            self.profile.is_active,
            self.profile.max_supervisees,
            self.active_supervisee_count,
        )
    }
}

/// Fetch one profile by ID. Profiles are marketplace-visible to any
/// authenticated actor.
pub async fn get_profile(
    id: PhysicianProfileId,
    deps: &ServerDeps,
) -> ServiceResult<ProfileWithLoad> {
    let profile = PhysicianProfile::find_by_id(id, &deps.db_pool)
        .await?
        .ok_or(ServiceError::NotFound("physician profile"))?;

    let active_supervisee_count =
        PhysicianProfile::active_supervisee_count(profile.id, &deps.db_pool).await?;

    Ok(ProfileWithLoad {
        profile,
        active_supervisee_count,
    })
}

/// Fetch the calling physician's own profile.
pub async fn get_own_profile(actor: &Actor, deps: &ServerDeps) -> ServiceResult<ProfileWithLoad> {
    let profile = PhysicianProfile::find_by_user(actor.user_id, &deps.db_pool)
        .await?
        .ok_or(ServiceError::NotFound("physician profile"))?;

    debug!(profile_id = %profile.id, "Loaded own physician profile");

    let active_supervisee_count =
        PhysicianProfile::active_supervisee_count(profile.id, &deps.db_pool).await?;

    Ok(ProfileWithLoad {
        profile,
        active_supervisee_count,
    })
}
