use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{CollaborationMatchId, SupervisionAgreementId};

/// SupervisionAgreement - SQL persistence layer
///
/// The billing-bearing relationship created after a match is accepted.
/// Exactly one agreement row per match; `terminated` is absorbing. Every
/// guarded transition is a single conditional UPDATE so an entity losing a
/// race is left exactly as it was.
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct SupervisionAgreement {
    pub id: SupervisionAgreementId,
    pub collaboration_match_id: CollaborationMatchId,
    pub status: String, // 'draft', 'pending_signature', 'active', 'paused', 'terminated'
    pub monthly_fee_cents: i64,
    pub platform_fee_percent: Decimal,
    pub platform_fee_cents: i64,
    pub billing_anchor_day: Option<i32>,
    pub activated_at: Option<DateTime<Utc>>,
    pub paused_at: Option<DateTime<Utc>>,
    pub terminated_at: Option<DateTime<Utc>>,
    pub termination_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Agreement status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgreementStatus {
    Draft,
    PendingSignature,
    Active,
    Paused,
    Terminated,
}

impl std::fmt::Display for AgreementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgreementStatus::Draft => write!(f, "draft"),
            AgreementStatus::PendingSignature => write!(f, "pending_signature"),
            AgreementStatus::Active => write!(f, "active"),
            AgreementStatus::Paused => write!(f, "paused"),
            AgreementStatus::Terminated => write!(f, "terminated"),
        }
    }
}

impl std::str::FromStr for AgreementStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "draft" => Ok(AgreementStatus::Draft),
            "pending_signature" => Ok(AgreementStatus::PendingSignature),
            "active" => Ok(AgreementStatus::Active),
            "paused" => Ok(AgreementStatus::Paused),
            "terminated" => Ok(AgreementStatus::Terminated),
            _ => Err(anyhow::anyhow!("Invalid agreement status: {}", s)),
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl SupervisionAgreement {
    /// Find agreement by ID
    pub async fn find_by_id(id: SupervisionAgreementId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM supervision_agreements WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find the agreement for a match (at most one exists)
    pub async fn find_by_match(
        match_id: CollaborationMatchId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM supervision_agreements WHERE collaboration_match_id = $1",
        )
        .bind(match_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Insert new agreement (draft)
    pub async fn insert(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO supervision_agreements (
                id,
                collaboration_match_id,
                status,
                monthly_fee_cents,
                platform_fee_percent,
                platform_fee_cents
             )
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(self.id)
        .bind(self.collaboration_match_id)
        .bind(&self.status)
        .bind(self.monthly_fee_cents)
        .bind(self.platform_fee_percent)
        .bind(self.platform_fee_cents)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Replace the fee fields while the agreement is still unsigned.
    ///
    /// Returns None when the agreement has left draft/pending_signature.
    pub async fn update_fees(
        id: SupervisionAgreementId,
        monthly_fee_cents: i64,
        platform_fee_percent: Decimal,
        platform_fee_cents: i64,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE supervision_agreements
             SET monthly_fee_cents = $2,
                 platform_fee_percent = $3,
                 platform_fee_cents = $4,
                 updated_at = NOW()
             WHERE id = $1 AND status IN ('draft', 'pending_signature')
             RETURNING *",
        )
        .bind(id)
        .bind(monthly_fee_cents)
        .bind(platform_fee_percent)
        .bind(platform_fee_cents)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// draft → pending_signature (signature captured externally)
    pub async fn mark_pending_signature(
        id: SupervisionAgreementId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE supervision_agreements
             SET status = 'pending_signature', updated_at = NOW()
             WHERE id = $1 AND status = 'draft'
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// pending_signature → active, stamping the anchor day and activated_at
    pub async fn activate(
        id: SupervisionAgreementId,
        billing_anchor_day: i32,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE supervision_agreements
             SET status = 'active',
                 billing_anchor_day = $2,
                 activated_at = NOW(),
                 updated_at = NOW()
             WHERE id = $1 AND status = 'pending_signature'
             RETURNING *",
        )
        .bind(id)
        .bind(billing_anchor_day)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// active → paused
    pub async fn pause(id: SupervisionAgreementId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE supervision_agreements
             SET status = 'paused', paused_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND status = 'active'
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// paused → active
    pub async fn resume(id: SupervisionAgreementId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE supervision_agreements
             SET status = 'active', paused_at = NULL, updated_at = NOW()
             WHERE id = $1 AND status = 'paused'
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// any non-terminated state → terminated (absorbing)
    pub async fn terminate(
        id: SupervisionAgreementId,
        reason: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE supervision_agreements
             SET status = 'terminated',
                 terminated_at = NOW(),
                 termination_reason = $2,
                 updated_at = NOW()
             WHERE id = $1 AND status <> 'terminated'
             RETURNING *",
        )
        .bind(id)
        .bind(reason)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_round_trip() {
        for status in [
            AgreementStatus::Draft,
            AgreementStatus::PendingSignature,
            AgreementStatus::Active,
            AgreementStatus::Paused,
            AgreementStatus::Terminated,
        ] {
            assert_eq!(
                AgreementStatus::from_str(&status.to_string()).unwrap(),
                status
            );
        }
        assert!(AgreementStatus::from_str("expired").is_err());
    }
}
