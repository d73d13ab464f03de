//! Create request activity - validates, persists, and spawns ranked matches.

use chrono::{NaiveDate, Utc};
use std::str::FromStr;
use tracing::info;

use crate::common::clinical::normalize_state_code;
use crate::common::{Actor, Capability, CollaborationRequestId, ServiceResult};
use crate::common::ServiceError;
use crate::domains::matching::activities::spawn_matches_for_request;
use crate::domains::matching::models::CollaborationMatch;
use crate::domains::physicians::models::SupervisionModel;
use crate::domains::requests::models::{CollaborationRequest, PracticeModel, ProfessionType, RequestStatus};
use crate::kernel::ServerDeps;

/// Validated-on-entry payload for a new collaboration request.
#[derive(Debug, Clone)]
pub struct CreateRequestInput {
    pub profession_type: String,
    pub states_requested: Vec<String>,
    pub specialty: String,
    pub practice_model: String,
    pub expected_start_date: NaiveDate,
    pub preferred_supervision_model: Option<String>,
}

/// The created request plus the ranked matches materialized for it.
#[derive(Debug, Clone)]
pub struct CreatedRequest {
    pub request: CollaborationRequest,
    pub matches: Vec<CollaborationMatch>,
}

/// Create a collaboration request and spawn a pending match per ranked
/// candidate at or above the configured score floor.
///
/// Everything is validated before the first write; a validation failure
/// leaves no trace.
pub async fn create_request(
    actor: &Actor,
    input: CreateRequestInput,
    deps: &ServerDeps,
) -> ServiceResult<CreatedRequest> {
    actor.require(Capability::SubmitRequest)?;

    let states_requested = validate(&input)?;

    let request = CollaborationRequest {
        id: CollaborationRequestId::new(),
        practitioner_user_id: actor.user_id,
        profession_type: input.profession_type,
        states_requested,
        specialty: input.specialty.trim().to_string(),
        practice_model: input.practice_model,
        expected_start_date: input.expected_start_date,
        preferred_supervision_model: input.preferred_supervision_model,
        status: RequestStatus::Open.to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let request = request.insert(&deps.db_pool).await?;

    info!(
        request_id = %request.id,
        states = ?request.states_requested,
        specialty = %request.specialty,
        "Collaboration request created"
    );

    let matches = spawn_matches_for_request(&request, deps).await?;

    Ok(CreatedRequest { request, matches })
}

/// Field-level validation. Returns the normalized, deduplicated state set.
fn validate(input: &CreateRequestInput) -> Result<Vec<String>, ServiceError> {
    ProfessionType::from_str(&input.profession_type)
        .map_err(|_| ServiceError::validation("profession_type must be 'np' or 'pa'"))?;

    PracticeModel::from_str(&input.practice_model).map_err(|_| {
        ServiceError::validation("practice_model must be telehealth, in_person, or hybrid")
    })?;

    if let Some(preferred) = &input.preferred_supervision_model {
        SupervisionModel::from_str(preferred).map_err(|_| {
            ServiceError::validation(
                "preferred_supervision_model must be in_person, telehealth, or hybrid",
            )
        })?;
    }

    if input.specialty.trim().is_empty() {
        return Err(ServiceError::validation("specialty must not be blank"));
    }

    if input.states_requested.is_empty() {
        return Err(ServiceError::validation(
            "states_requested must contain at least one state",
        ));
    }

    let mut states = Vec::with_capacity(input.states_requested.len());
    for raw in &input.states_requested {
        let code = normalize_state_code(raw).ok_or_else(|| {
            ServiceError::validation(format!("'{}' is not a two-letter state code", raw))
        })?;
        if !states.contains(&code) {
            states.push(code);
        }
    }

    let today = Utc::now().date_naive();
    if input.expected_start_date <= today {
        return Err(ServiceError::validation(
            "expected_start_date must be strictly in the future",
        ));
    }

    Ok(states)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn valid_input() -> CreateRequestInput {
        CreateRequestInput {
            profession_type: "np".to_string(),
            states_requested: vec!["FL".to_string(), "GA".to_string()],
            specialty: "Family Medicine".to_string(),
            practice_model: "telehealth".to_string(),
            expected_start_date: Utc::now().date_naive() + Duration::days(30),
            preferred_supervision_model: None,
        }
    }

    #[test]
    fn accepts_valid_input() {
        assert_eq!(
            validate(&valid_input()).unwrap(),
            vec!["FL".to_string(), "GA".to_string()]
        );
    }

    #[test]
    fn normalizes_and_dedupes_states() {
        let mut input = valid_input();
        input.states_requested = vec!["fl".to_string(), "FL".to_string(), "ga".to_string()];
        assert_eq!(
            validate(&input).unwrap(),
            vec!["FL".to_string(), "GA".to_string()]
        );
    }

    #[test]
    fn rejects_empty_states() {
        let mut input = valid_input();
        input.states_requested.clear();
        assert!(matches!(
            validate(&input),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn rejects_unknown_state() {
        let mut input = valid_input();
        input.states_requested = vec!["Florida".to_string()];
        assert!(validate(&input).is_err());
    }

    #[test]
    fn rejects_today_as_start_date() {
        let mut input = valid_input();
        input.expected_start_date = Utc::now().date_naive();
        assert!(matches!(
            validate(&input),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn rejects_past_start_date() {
        let mut input = valid_input();
        input.expected_start_date = Utc::now().date_naive() - Duration::days(1);
        assert!(validate(&input).is_err());
    }

    #[test]
    fn rejects_unknown_profession_and_model() {
        let mut input = valid_input();
        input.profession_type = "md".to_string();
        assert!(validate(&input).is_err());

        let mut input = valid_input();
        input.practice_model = "remote".to_string();
        assert!(validate(&input).is_err());
    }

    #[test]
    fn rejects_blank_specialty() {
        let mut input = valid_input();
        input.specialty = "   ".to_string();
        assert!(validate(&input).is_err());
    }

    #[test]
    fn rejects_bad_preferred_model() {
        let mut input = valid_input();
        input.preferred_supervision_model = Some("weekend".to_string());
        assert!(validate(&input).is_err());
    }
}
