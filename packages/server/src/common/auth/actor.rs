use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Capability;
use crate::common::{ServiceError, UserId};

/// Role carried in the verified auth token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Practitioner,
    Physician,
    Admin,
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorRole::Practitioner => write!(f, "practitioner"),
            ActorRole::Physician => write!(f, "physician"),
            ActorRole::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for ActorRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "practitioner" => Ok(ActorRole::Practitioner),
            "physician" => Ok(ActorRole::Physician),
            "admin" => Ok(ActorRole::Admin),
            _ => Err(anyhow::anyhow!("Invalid actor role: {}", s)),
        }
    }
}

/// An authenticated caller, as the activities see it.
///
/// The role was validated upstream when the token was issued; activities
/// trust it the same way the rest of the platform trusts signed claims.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub user_id: UserId,
    pub role: ActorRole,
}

impl Actor {
    pub fn new(user_id: UserId, role: ActorRole) -> Self {
        Self { user_id, role }
    }

    pub fn practitioner(user_id: UserId) -> Self {
        Self::new(user_id, ActorRole::Practitioner)
    }

    pub fn physician(user_id: UserId) -> Self {
        Self::new(user_id, ActorRole::Physician)
    }

    pub fn admin(user_id: UserId) -> Self {
        Self::new(user_id, ActorRole::Admin)
    }

    pub fn is_admin(&self) -> bool {
        self.role == ActorRole::Admin
    }

    /// True when this actor's role grants the capability.
    pub fn can(&self, capability: Capability) -> bool {
        use Capability::*;

        match self.role {
            ActorRole::Admin => matches!(
                capability,
                PauseAgreement | TerminateAgreement | RecordSignature | VerifyBilling
            ),
            ActorRole::Practitioner => matches!(
                capability,
                SubmitRequest | CloseRequest | ActivateAgreement | TerminateAgreement
            ),
            ActorRole::Physician => matches!(
                capability,
                RespondToMatch | DraftAgreement | PauseAgreement | TerminateAgreement
            ),
        }
    }

    /// Errors with `Unauthorized` unless the role grants the capability.
    pub fn require(&self, capability: Capability) -> Result<(), ServiceError> {
        if self.can(capability) {
            Ok(())
        } else {
            Err(ServiceError::unauthorized(format!(
                "role {} may not perform {:?}",
                self.role, capability
            )))
        }
    }
}
