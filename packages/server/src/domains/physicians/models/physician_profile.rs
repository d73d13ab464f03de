use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};
use std::collections::HashMap;

use crate::common::{PhysicianProfileId, UserId};

/// PhysicianProfile - SQL persistence layer
///
/// A supervising physician's capacity and eligibility facts. The profile is
/// maintained by the platform's profile service; this core reads it, counts
/// supervisees against it, and flips the externally verified billing flag.
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct PhysicianProfile {
    pub id: PhysicianProfileId,
    pub user_id: UserId,
    pub licensed_states: Vec<String>,
    pub specialties: Vec<String>,
    pub max_supervisees: i32,
    pub supervision_model: String, // 'in_person', 'telehealth', 'hybrid'
    pub malpractice_confirmed: bool,
    pub malpractice_policy_url: Option<String>,
    pub bio: Option<String>,
    pub is_active: bool,
    pub billing_ready: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Supervision model enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SupervisionModel {
    InPerson,
    Telehealth,
    Hybrid,
}

impl std::fmt::Display for SupervisionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SupervisionModel::InPerson => write!(f, "in_person"),
            SupervisionModel::Telehealth => write!(f, "telehealth"),
            SupervisionModel::Hybrid => write!(f, "hybrid"),
        }
    }
}

impl std::str::FromStr for SupervisionModel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "in_person" => Ok(SupervisionModel::InPerson),
            "telehealth" => Ok(SupervisionModel::Telehealth),
            "hybrid" => Ok(SupervisionModel::Hybrid),
            _ => Err(anyhow::anyhow!("Invalid supervision model: {}", s)),
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl PhysicianProfile {
    /// Find profile by ID
    pub async fn find_by_id(id: PhysicianProfileId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM physician_profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find the profile owned by a user (one profile per user)
    pub async fn find_by_user(user_id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM physician_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find all active profiles (the matching candidate pool)
    pub async fn find_active(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM physician_profiles WHERE is_active = true ORDER BY id",
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Lock the profile row for the duration of the transaction.
    ///
    /// Acceptance serializes on this lock so two concurrent accepts for the
    /// same physician cannot both pass the capacity check.
    pub async fn lock_by_id(
        id: PhysicianProfileId,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM physician_profiles WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(Into::into)
    }

    /// Count of accepted matches whose agreement is absent or non-terminated.
    ///
    /// Always computed, never stored; pass the transaction executor to read
    /// it under the profile row lock.
    pub async fn active_supervisee_count<'e, E>(id: PhysicianProfileId, executor: E) -> Result<i64>
    where
        E: PgExecutor<'e>,
    {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*)
             FROM collaboration_matches m
             LEFT JOIN supervision_agreements a ON a.collaboration_match_id = m.id
             WHERE m.physician_profile_id = $1
               AND m.status = 'accepted'
               AND (a.id IS NULL OR a.status <> 'terminated')",
        )
        .bind(id)
        .fetch_one(executor)
        .await?;
        Ok(count)
    }

    /// Active supervisee counts for every physician at once (for ranking).
    ///
    /// Profiles with zero accepted matches are absent from the map.
    pub async fn active_supervisee_counts(
        pool: &PgPool,
    ) -> Result<HashMap<PhysicianProfileId, i64>> {
        let rows: Vec<(PhysicianProfileId, i64)> = sqlx::query_as(
            "SELECT m.physician_profile_id, COUNT(*)
             FROM collaboration_matches m
             LEFT JOIN supervision_agreements a ON a.collaboration_match_id = m.id
             WHERE m.status = 'accepted'
               AND (a.id IS NULL OR a.status <> 'terminated')
             GROUP BY m.physician_profile_id",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().collect())
    }

    /// Insert new profile
    pub async fn insert(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO physician_profiles (
                id,
                user_id,
                licensed_states,
                specialties,
                max_supervisees,
                supervision_model,
                malpractice_confirmed,
                malpractice_policy_url,
                bio,
                is_active,
                billing_ready
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING *",
        )
        .bind(self.id)
        .bind(self.user_id)
        .bind(&self.licensed_states)
        .bind(&self.specialties)
        .bind(self.max_supervisees)
        .bind(&self.supervision_model)
        .bind(self.malpractice_confirmed)
        .bind(&self.malpractice_policy_url)
        .bind(&self.bio)
        .bind(self.is_active)
        .bind(self.billing_ready)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Flip the externally verified billing flag
    pub async fn set_billing_ready(
        id: PhysicianProfileId,
        billing_ready: bool,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE physician_profiles
             SET billing_ready = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(billing_ready)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }
}
