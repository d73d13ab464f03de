// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. The billing
// platform and payment processor live outside this service; the core only
// asks the questions and fires the notifications the lifecycle requires.
//
// Naming convention: Base* for trait names (e.g., BaseBillingService)

use anyhow::Result;
use async_trait::async_trait;

use crate::common::{SupervisionAgreementId, UserId};

// =============================================================================
// Billing Service Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseBillingService: Send + Sync {
    /// Whether the physician's billing account is verified and chargeable.
    ///
    /// Consulted at agreement activation; the answer is never cached by the
    /// core.
    async fn billing_capable(&self, physician_user_id: UserId) -> Result<bool>;
}

// =============================================================================
// Payment Processor Trait (Infrastructure)
// =============================================================================

/// Subscription-side effects of agreement transitions.
///
/// Invoked after the owning transition commits, off the request path; a
/// processor failure is logged and reconciled out of band, never unwound
/// into the agreement state.
#[async_trait]
pub trait BasePaymentProcessor: Send + Sync {
    async fn start_subscription(&self, agreement_id: SupervisionAgreementId) -> Result<()>;

    async fn pause_subscription(&self, agreement_id: SupervisionAgreementId) -> Result<()>;

    async fn resume_subscription(&self, agreement_id: SupervisionAgreementId) -> Result<()>;

    async fn cancel_subscription(&self, agreement_id: SupervisionAgreementId) -> Result<()>;
}
