//! Default adapters for the kernel's infrastructure traits.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::common::{SupervisionAgreementId, UserId};
use crate::kernel::{BaseBillingService, BasePaymentProcessor};

/// Billing verifier backed by the profile's externally verified flag.
///
/// The billing platform verifies a physician's account out of band and lands
/// the result on `physician_profiles.billing_ready`; this adapter reads that
/// flag at check time. A user without a profile is never billing-capable.
pub struct ProfileBillingVerifier {
    pool: PgPool,
}

impl ProfileBillingVerifier {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseBillingService for ProfileBillingVerifier {
    async fn billing_capable(&self, physician_user_id: UserId) -> Result<bool> {
        let flag: Option<(bool,)> =
            sqlx::query_as("SELECT billing_ready FROM physician_profiles WHERE user_id = $1")
                .bind(physician_user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(flag.map(|(ready,)| ready).unwrap_or(false))
    }
}

/// Payment processor adapter that records intent in the logs.
///
/// Stands in until the processor integration is wired into the deployment;
/// the subscription ledger is reconciled from these events.
pub struct LoggingPaymentProcessor;

#[async_trait]
impl BasePaymentProcessor for LoggingPaymentProcessor {
    async fn start_subscription(&self, agreement_id: SupervisionAgreementId) -> Result<()> {
        info!(agreement_id = %agreement_id, "Subscription start requested");
        Ok(())
    }

    async fn pause_subscription(&self, agreement_id: SupervisionAgreementId) -> Result<()> {
        info!(agreement_id = %agreement_id, "Subscription pause requested");
        Ok(())
    }

    async fn resume_subscription(&self, agreement_id: SupervisionAgreementId) -> Result<()> {
        info!(agreement_id = %agreement_id, "Subscription resume requested");
        Ok(())
    }

    async fn cancel_subscription(&self, agreement_id: SupervisionAgreementId) -> Result<()> {
        info!(agreement_id = %agreement_id, "Subscription cancel requested");
        Ok(())
    }
}
