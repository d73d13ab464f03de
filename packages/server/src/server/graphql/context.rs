use sqlx::PgPool;
use std::sync::Arc;

use crate::common::Actor;
use crate::kernel::ServerDeps;
use crate::server::middleware::AuthUser;

/// GraphQL request context
///
/// Shared resources plus the per-request authenticated user (if any).
#[derive(Clone)]
pub struct GraphQLContext {
    pub db_pool: PgPool,
    pub deps: Arc<ServerDeps>,
    pub auth_user: Option<AuthUser>,
}

impl juniper::Context for GraphQLContext {}

impl GraphQLContext {
    pub fn new(db_pool: PgPool, deps: Arc<ServerDeps>, auth_user: Option<AuthUser>) -> Self {
        Self {
            db_pool,
            deps,
            auth_user,
        }
    }

    /// The authenticated actor, or None for anonymous requests.
    pub fn actor(&self) -> Option<Actor> {
        self.auth_user.as_ref().map(AuthUser::actor)
    }
}
