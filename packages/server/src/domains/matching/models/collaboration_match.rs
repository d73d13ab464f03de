use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::{CollaborationMatchId, CollaborationRequestId, PhysicianProfileId};

/// CollaborationMatch - SQL persistence layer
///
/// One candidate pairing between a request and a physician profile. Created
/// `pending` by the matching pipeline; only the named physician moves it to
/// a terminal state, exactly once.
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct CollaborationMatch {
    pub id: CollaborationMatchId,
    pub request_id: CollaborationRequestId,
    pub physician_profile_id: PhysicianProfileId,
    pub status: String, // 'pending', 'accepted', 'declined'
    pub match_score: i32,
    pub match_reasons: Vec<String>,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Match status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Pending,
    Accepted,
    Declined,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Pending => write!(f, "pending"),
            MatchStatus::Accepted => write!(f, "accepted"),
            MatchStatus::Declined => write!(f, "declined"),
        }
    }
}

impl std::str::FromStr for MatchStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(MatchStatus::Pending),
            "accepted" => Ok(MatchStatus::Accepted),
            "declined" => Ok(MatchStatus::Declined),
            _ => Err(anyhow::anyhow!("Invalid match status: {}", s)),
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl CollaborationMatch {
    /// Find match by ID
    pub async fn find_by_id(id: CollaborationMatchId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM collaboration_matches WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// All matches for a request, best score first
    pub async fn find_by_request(
        request_id: CollaborationRequestId,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM collaboration_matches
             WHERE request_id = $1
             ORDER BY match_score DESC, physician_profile_id ASC",
        )
        .bind(request_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Matches awaiting a response from a physician, best score first
    pub async fn find_pending_for_physician(
        physician_profile_id: PhysicianProfileId,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM collaboration_matches
             WHERE physician_profile_id = $1 AND status = 'pending'
             ORDER BY match_score DESC, created_at ASC",
        )
        .bind(physician_profile_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Insert new match
    pub async fn insert(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO collaboration_matches (
                id,
                request_id,
                physician_profile_id,
                status,
                match_score,
                match_reasons
             )
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(self.id)
        .bind(self.request_id)
        .bind(self.physician_profile_id)
        .bind(&self.status)
        .bind(self.match_score)
        .bind(&self.match_reasons)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Decline a pending match, stamping responded_at atomically.
    ///
    /// Returns None when the match was no longer pending.
    pub async fn mark_declined(id: CollaborationMatchId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE collaboration_matches
             SET status = 'declined', responded_at = NOW()
             WHERE id = $1 AND status = 'pending'
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Accept a pending match inside the acceptance transaction.
    ///
    /// The caller holds the physician profile row lock; the status guard
    /// here makes the pending → accepted transition itself single-shot.
    pub async fn mark_accepted(
        id: CollaborationMatchId,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE collaboration_matches
             SET status = 'accepted', responded_at = NOW()
             WHERE id = $1 AND status = 'pending'
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(Into::into)
    }
}
