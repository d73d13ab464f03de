use chrono::{DateTime, Utc};
use juniper::GraphQLObject;
use serde::{Deserialize, Serialize};

use crate::domains::physicians::activities::ProfileWithLoad;

/// PhysicianProfile GraphQL data type
///
/// Public API representation of a supervising physician, with the derived
/// capacity fields populated.
#[derive(Debug, Clone, Serialize, Deserialize, GraphQLObject)]
#[graphql(description = "A supervising physician's eligibility and capacity record")]
pub struct PhysicianProfileData {
    /// Unique identifier
    pub id: String,

    /// Owning user account
    pub user_id: String,

    /// Two-letter codes of states the physician is licensed in
    pub licensed_states: Vec<String>,

    /// Specialty areas the physician supervises
    pub specialties: Vec<String>,

    /// Hard ceiling on concurrent supervisees (1-20)
    pub max_supervisees: i32,

    /// Supervision model offered: in_person, telehealth, or hybrid
    pub supervision_model: String,

    /// Whether malpractice coverage has been confirmed
    pub malpractice_confirmed: bool,

    /// Whether the profile is visible to matching
    pub is_active: bool,

    /// Externally verified billing readiness (gates agreement activation)
    pub billing_ready: bool,

    /// Count of currently accepted, non-terminated supervision matches
    pub active_supervisee_count: i32,

    /// Whether an open supervision slot exists right now
    pub has_capacity: bool,

    /// When the profile was created
    pub created_at: DateTime<Utc>,
}

impl From<ProfileWithLoad> for PhysicianProfileData {
    fn from(loaded: ProfileWithLoad) -> Self {
        let has_capacity = loaded.capacity().has_capacity();
        let ProfileWithLoad {
            profile,
            active_supervisee_count,
        } = loaded;

        Self {
            id: profile.id.to_string(),
            user_id: profile.user_id.to_string(),
            licensed_states: profile.licensed_states,
            specialties: profile.specialties,
            max_supervisees: profile.max_supervisees,
            supervision_model: profile.supervision_model,
            malpractice_confirmed: profile.malpractice_confirmed,
            is_active: profile.is_active,
            billing_ready: profile.billing_ready,
            active_supervisee_count: active_supervisee_count as i32,
            has_capacity,
            created_at: profile.created_at,
        }
    }
}
