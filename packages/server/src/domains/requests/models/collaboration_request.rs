use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::{CollaborationRequestId, UserId};

/// CollaborationRequest - SQL persistence layer
///
/// A practitioner's standing ask for collaborative supervision. The row is
/// owned by the requesting practitioner; matching reads it, acceptance may
/// flip it to `matched`, and only the owner may close it.
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct CollaborationRequest {
    pub id: CollaborationRequestId,
    pub practitioner_user_id: UserId,
    pub profession_type: String, // 'np', 'pa'
    pub states_requested: Vec<String>,
    pub specialty: String,
    pub practice_model: String, // 'telehealth', 'in_person', 'hybrid'
    pub expected_start_date: NaiveDate,
    pub preferred_supervision_model: Option<String>,
    pub status: String, // 'open', 'matched', 'closed'
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Enums for type-safe edges
// =============================================================================

/// Profession type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProfessionType {
    Np,
    Pa,
}

impl std::fmt::Display for ProfessionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfessionType::Np => write!(f, "np"),
            ProfessionType::Pa => write!(f, "pa"),
        }
    }
}

impl std::str::FromStr for ProfessionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "np" => Ok(ProfessionType::Np),
            "pa" => Ok(ProfessionType::Pa),
            _ => Err(anyhow::anyhow!("Invalid profession type: {}", s)),
        }
    }
}

/// Practice model enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PracticeModel {
    Telehealth,
    InPerson,
    Hybrid,
}

impl std::fmt::Display for PracticeModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PracticeModel::Telehealth => write!(f, "telehealth"),
            PracticeModel::InPerson => write!(f, "in_person"),
            PracticeModel::Hybrid => write!(f, "hybrid"),
        }
    }
}

impl std::str::FromStr for PracticeModel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "telehealth" => Ok(PracticeModel::Telehealth),
            "in_person" => Ok(PracticeModel::InPerson),
            "hybrid" => Ok(PracticeModel::Hybrid),
            _ => Err(anyhow::anyhow!("Invalid practice model: {}", s)),
        }
    }
}

/// Request status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Open,
    Matched,
    Closed,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Open => write!(f, "open"),
            RequestStatus::Matched => write!(f, "matched"),
            RequestStatus::Closed => write!(f, "closed"),
        }
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "open" => Ok(RequestStatus::Open),
            "matched" => Ok(RequestStatus::Matched),
            "closed" => Ok(RequestStatus::Closed),
            _ => Err(anyhow::anyhow!("Invalid request status: {}", s)),
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl CollaborationRequest {
    /// Find request by ID
    pub async fn find_by_id(id: CollaborationRequestId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM collaboration_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find all requests submitted by a practitioner, newest first
    pub async fn find_by_practitioner(user_id: UserId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM collaboration_requests
             WHERE practitioner_user_id = $1
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Insert new request
    pub async fn insert(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO collaboration_requests (
                id,
                practitioner_user_id,
                profession_type,
                states_requested,
                specialty,
                practice_model,
                expected_start_date,
                preferred_supervision_model,
                status
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
        .bind(self.id)
        .bind(self.practitioner_user_id)
        .bind(&self.profession_type)
        .bind(&self.states_requested)
        .bind(&self.specialty)
        .bind(&self.practice_model)
        .bind(self.expected_start_date)
        .bind(&self.preferred_supervision_model)
        .bind(&self.status)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Close the request. Returns None when it was already closed.
    pub async fn close(id: CollaborationRequestId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE collaboration_requests
             SET status = 'closed', updated_at = NOW()
             WHERE id = $1 AND status <> 'closed'
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Mark the request matched, if it is still open.
    ///
    /// Runs inside the acceptance transaction. An already-matched or closed
    /// request is left untouched (the accept itself still stands).
    pub async fn mark_matched(
        id: CollaborationRequestId,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<()> {
        sqlx::query(
            "UPDATE collaboration_requests
             SET status = 'matched', updated_at = NOW()
             WHERE id = $1 AND status = 'open'",
        )
        .bind(id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
