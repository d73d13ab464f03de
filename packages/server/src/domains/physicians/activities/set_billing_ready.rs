//! Land the external billing-verification result on a profile.

use tracing::info;

use crate::common::{Actor, Capability, PhysicianProfileId, ServiceError, ServiceResult};
use crate::domains::physicians::models::PhysicianProfile;
use crate::kernel::ServerDeps;

/// Flip the externally verified billing flag on a physician profile.
///
/// Called by the billing-verification collaborator's callback (authenticated
/// as admin/system). The flag gates agreement activation; it never grants
/// capacity.
pub async fn set_billing_ready(
    actor: &Actor,
    profile_id: PhysicianProfileId,
    billing_ready: bool,
    deps: &ServerDeps,
) -> ServiceResult<PhysicianProfile> {
    actor.require(Capability::VerifyBilling)?;

    let profile = PhysicianProfile::set_billing_ready(profile_id, billing_ready, &deps.db_pool)
        .await?
        .ok_or(ServiceError::NotFound("physician profile"))?;

    info!(
        profile_id = %profile.id,
        billing_ready,
        "Updated physician billing verification flag"
    );

    Ok(profile)
}
