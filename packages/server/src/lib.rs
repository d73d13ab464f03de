// Bridgewell Collaboration API - core service
//
// Matches independent practitioners (NPs/PAs) with supervising physicians
// and drives the resulting supervision agreement through its billing-bearing
// lifecycle. Architecture follows domain-driven design: each domain owns its
// models (all SQL), activities (business operations), and data (GraphQL
// representations).

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::Config;
