//! Agreement reads scoped to the match's participants.

use super::participants::load_participants;
use crate::common::{Actor, CollaborationMatchId, ServiceError, ServiceResult};
use crate::domains::agreements::models::SupervisionAgreement;
use crate::kernel::ServerDeps;

/// The agreement for a match, if one exists. Visible to the match's
/// physician and practitioner and to admins.
pub async fn get_agreement_for_match(
    actor: &Actor,
    match_id: CollaborationMatchId,
    deps: &ServerDeps,
) -> ServiceResult<Option<SupervisionAgreement>> {
    let participants = load_participants(match_id, &deps.db_pool).await?;

    if !participants.includes(actor.user_id) && !actor.is_admin() {
        return Err(ServiceError::NotFound("collaboration match"));
    }

    SupervisionAgreement::find_by_match(match_id, &deps.db_pool)
        .await
        .map_err(Into::into)
}
