use chrono::{DateTime, Utc};
use juniper::{GraphQLInputObject, GraphQLObject};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::domains::agreements::models::SupervisionAgreement;

/// SupervisionAgreement GraphQL data type
#[derive(Debug, Clone, Serialize, Deserialize, GraphQLObject)]
#[graphql(description = "The billing-bearing agreement behind an accepted match")]
pub struct SupervisionAgreementData {
    /// Unique identifier
    pub id: String,

    /// The accepted match this agreement belongs to
    pub collaboration_match_id: String,

    /// draft, pending_signature, active, paused, or terminated
    pub status: String,

    /// Monthly supervision fee in integer cents
    pub monthly_fee_cents: i32,

    /// Percent of the monthly fee retained by the platform (0-100)
    pub platform_fee_percent: f64,

    /// Derived platform fee in integer cents, never settable by callers
    pub platform_fee_cents: i32,

    /// Day of month billing runs (1-28), set at activation
    pub billing_anchor_day: Option<i32>,

    /// When the agreement went active
    pub activated_at: Option<DateTime<Utc>>,

    /// When the agreement was paused
    pub paused_at: Option<DateTime<Utc>>,

    /// When the agreement was terminated
    pub terminated_at: Option<DateTime<Utc>>,

    /// Why the agreement was terminated
    pub termination_reason: Option<String>,

    /// When the agreement was drafted
    pub created_at: DateTime<Utc>,
}

impl From<SupervisionAgreement> for SupervisionAgreementData {
    fn from(agreement: SupervisionAgreement) -> Self {
        Self {
            id: agreement.id.to_string(),
            collaboration_match_id: agreement.collaboration_match_id.to_string(),
            status: agreement.status,
            monthly_fee_cents: agreement.monthly_fee_cents as i32,
            platform_fee_percent: agreement.platform_fee_percent.to_f64().unwrap_or(0.0),
            platform_fee_cents: agreement.platform_fee_cents as i32,
            billing_anchor_day: agreement.billing_anchor_day,
            activated_at: agreement.activated_at,
            paused_at: agreement.paused_at,
            terminated_at: agreement.terminated_at,
            termination_reason: agreement.termination_reason,
            created_at: agreement.created_at,
        }
    }
}

/// Input for drafting an agreement
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct CreateAgreementGqlInput {
    /// Monthly supervision fee in integer cents
    pub monthly_fee_cents: i32,

    /// Platform fee percent override (0-100); defaults to the platform rate
    pub platform_fee_percent: Option<f64>,
}

/// Input for revising fee terms on an unsigned agreement
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct UpdateAgreementGqlInput {
    /// New monthly fee in integer cents, if changing
    pub monthly_fee_cents: Option<i32>,

    /// New platform fee percent (0-100), if changing
    pub platform_fee_percent: Option<f64>,
}
