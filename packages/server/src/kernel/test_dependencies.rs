//! In-memory doubles for the kernel's infrastructure traits.
//!
//! Used by unit tests and the integration harness; also the stand-in wiring
//! for local development until the real billing/payments adapters are
//! configured.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

use crate::common::{SupervisionAgreementId, UserId};
use crate::kernel::{BaseBillingService, BasePaymentProcessor};

/// Billing double backed by an explicit allow-list of capable physicians.
#[derive(Default)]
pub struct StaticBillingService {
    capable: Mutex<HashSet<UserId>>,
}

impl StaticBillingService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a physician's billing account as verified.
    pub fn mark_capable(&self, physician_user_id: UserId) {
        self.capable.lock().unwrap().insert(physician_user_id);
    }

    pub fn revoke(&self, physician_user_id: UserId) {
        self.capable.lock().unwrap().remove(&physician_user_id);
    }
}

#[async_trait]
impl BaseBillingService for StaticBillingService {
    async fn billing_capable(&self, physician_user_id: UserId) -> Result<bool> {
        Ok(self.capable.lock().unwrap().contains(&physician_user_id))
    }
}

/// A single call observed by [`RecordingPaymentProcessor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionCall {
    Start(SupervisionAgreementId),
    Pause(SupervisionAgreementId),
    Resume(SupervisionAgreementId),
    Cancel(SupervisionAgreementId),
}

/// Payment-processor double that records every call for assertions.
#[derive(Default)]
pub struct RecordingPaymentProcessor {
    calls: Mutex<Vec<SubscriptionCall>>,
}

impl RecordingPaymentProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<SubscriptionCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BasePaymentProcessor for RecordingPaymentProcessor {
    async fn start_subscription(&self, agreement_id: SupervisionAgreementId) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(SubscriptionCall::Start(agreement_id));
        Ok(())
    }

    async fn pause_subscription(&self, agreement_id: SupervisionAgreementId) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(SubscriptionCall::Pause(agreement_id));
        Ok(())
    }

    async fn resume_subscription(&self, agreement_id: SupervisionAgreementId) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(SubscriptionCall::Resume(agreement_id));
        Ok(())
    }

    async fn cancel_subscription(&self, agreement_id: SupervisionAgreementId) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(SubscriptionCall::Cancel(agreement_id));
        Ok(())
    }
}
