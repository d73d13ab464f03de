//! Test harness with testcontainers for integration testing.
//!
//! Uses one shared Postgres container across all tests in the binary;
//! migrations run once on first use. Each test gets its own pool and its
//! own billing/payments doubles.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use server_core::kernel::test_dependencies::{RecordingPaymentProcessor, StaticBillingService};
use server_core::kernel::{MatchingSettings, ServerDeps};

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Respect RUST_LOG when debugging tests; ignore double-init.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Test harness: a pool into the shared database plus per-test doubles.
pub struct TestHarness {
    pub db_pool: PgPool,
    pub deps: Arc<ServerDeps>,
    pub billing: Arc<StaticBillingService>,
    pub payments: Arc<RecordingPaymentProcessor>,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Pool drops with the harness
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        let billing = Arc::new(StaticBillingService::new());
        let payments = Arc::new(RecordingPaymentProcessor::new());

        let deps = Arc::new(ServerDeps::new(
            db_pool.clone(),
            billing.clone(),
            payments.clone(),
            Decimal::new(1500, 2), // 15.00%
            MatchingSettings {
                score_floor: 30,
                max_candidates: 25,
            },
        ));

        Ok(Self {
            db_pool,
            deps,
            billing,
            payments,
        })
    }

    /// Same harness with different matching knobs.
    pub fn with_matching(&self, matching: MatchingSettings) -> Arc<ServerDeps> {
        Arc::new(ServerDeps::new(
            self.db_pool.clone(),
            self.billing.clone(),
            self.payments.clone(),
            self.deps.platform_fee_percent,
            matching,
        ))
    }

    /// Wait for spawned side effects (payment processor calls) to land.
    pub async fn settle(&self) {
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    }
}
