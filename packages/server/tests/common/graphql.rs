//! Thin juniper execution helper for schema-level tests.

use juniper::{DefaultScalarValue, ExecutionError, Variables};
use sqlx::PgPool;
use std::sync::Arc;

use server_core::common::Actor;
use server_core::kernel::ServerDeps;
use server_core::server::graphql::{create_schema, GraphQLContext, Schema};
use server_core::server::middleware::AuthUser;

pub struct GraphQLClient {
    schema: Schema,
    context: GraphQLContext,
}

impl GraphQLClient {
    /// A client authenticated as the given actor (None = anonymous).
    pub fn new(pool: PgPool, deps: Arc<ServerDeps>, actor: Option<Actor>) -> Self {
        let auth_user = actor.map(|a| AuthUser {
            user_id: a.user_id,
            role: a.role,
        });
        Self {
            schema: create_schema(),
            context: GraphQLContext::new(pool, deps, auth_user),
        }
    }

    /// Execute and return the data as JSON; panics on resolver errors.
    pub async fn query(&self, query: &str) -> serde_json::Value {
        let (data, errors) = self.execute(query).await;
        assert!(errors.is_empty(), "GraphQL errors: {:?}", errors);
        serde_json::to_value(&data).expect("GraphQL data serializes to JSON")
    }

    /// Execute and return (data, errors) for error-path assertions.
    pub async fn execute(
        &self,
        query: &str,
    ) -> (
        juniper::Value<DefaultScalarValue>,
        Vec<ExecutionError<DefaultScalarValue>>,
    ) {
        juniper::execute(query, None, &self.schema, &Variables::new(), &self.context)
            .await
            .expect("GraphQL execution failed")
    }
}
