//! Server dependencies for domain activities (using traits for testability)
//!
//! This module provides the central dependency container handed to every
//! activity. External services sit behind trait objects so tests can swap
//! in the doubles from `test_dependencies`.

use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;

use crate::config::Config;
use crate::kernel::{BaseBillingService, BasePaymentProcessor};

/// Matching knobs injected into the request-creation pipeline.
#[derive(Debug, Clone, Copy)]
pub struct MatchingSettings {
    /// Candidates scoring below the floor are not materialized as matches.
    pub score_floor: i32,
    /// Upper bound on matches created per request.
    pub max_candidates: usize,
}

/// Server dependencies accessible to domain activities.
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub billing: Arc<dyn BaseBillingService>,
    pub payments: Arc<dyn BasePaymentProcessor>,
    /// Default platform fee percent for new agreements (0-100).
    pub platform_fee_percent: Decimal,
    pub matching: MatchingSettings,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        billing: Arc<dyn BaseBillingService>,
        payments: Arc<dyn BasePaymentProcessor>,
        platform_fee_percent: Decimal,
        matching: MatchingSettings,
    ) -> Self {
        Self {
            db_pool,
            billing,
            payments,
            platform_fee_percent,
            matching,
        }
    }

    /// Build deps from loaded configuration plus the wired collaborators.
    pub fn from_config(
        config: &Config,
        db_pool: PgPool,
        billing: Arc<dyn BaseBillingService>,
        payments: Arc<dyn BasePaymentProcessor>,
    ) -> Self {
        Self::new(
            db_pool,
            billing,
            payments,
            config.platform_fee_percent,
            MatchingSettings {
                score_floor: config.match_score_floor,
                max_candidates: config.match_max_candidates,
            },
        )
    }
}
