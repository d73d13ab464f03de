use anyhow::{Context, Result};
use dotenvy::dotenv;
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;

/// Application configuration loaded from environment variables.
///
/// The matching and fee knobs live here rather than as literals so that
/// deployments (and tests) can tune them without code changes.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    /// Default platform fee percent applied to new agreements (0-100).
    pub platform_fee_percent: Decimal,
    /// Candidates scoring below this floor are not materialized as matches.
    pub match_score_floor: i32,
    /// Upper bound on matches created per request.
    pub match_max_candidates: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let platform_fee_percent = match env::var("PLATFORM_FEE_PERCENT") {
            Ok(raw) => Decimal::from_str(&raw).context("PLATFORM_FEE_PERCENT must be a decimal")?,
            Err(_) => Decimal::new(1500, 2), // 15.00
        };
        if platform_fee_percent < Decimal::ZERO || platform_fee_percent > Decimal::from(100) {
            anyhow::bail!("PLATFORM_FEE_PERCENT must be between 0 and 100");
        }

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER")
                .unwrap_or_else(|_| "bridgewell-identity".to_string()),
            platform_fee_percent,
            match_score_floor: env::var("MATCH_SCORE_FLOOR")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("MATCH_SCORE_FLOOR must be an integer")?,
            match_max_candidates: env::var("MATCH_MAX_CANDIDATES")
                .unwrap_or_else(|_| "25".to_string())
                .parse()
                .context("MATCH_MAX_CANDIDATES must be an integer")?,
        })
    }
}
