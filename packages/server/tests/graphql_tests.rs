//! Schema-level tests: resolvers, auth gating, and error extension codes.

mod common;

use crate::common::{create_physician, GraphQLClient, TestHarness};
use server_core::common::{Actor, UserId};
use test_context::test_context;

/// Submitting a request over GraphQL returns the request and ranked matches.
#[test_context(TestHarness)]
#[tokio::test]
async fn submit_request_mutation_returns_ranked_matches(ctx: &TestHarness) {
    create_physician(&ctx.db_pool, &["MD"], &["Family Medicine"], "telehealth", 3)
        .await
        .unwrap();

    let practitioner = Actor::practitioner(UserId::new());
    let client = GraphQLClient::new(ctx.db_pool.clone(), ctx.deps.clone(), Some(practitioner));

    let data = client
        .query(
            r#"
            mutation {
                submitCollaborationRequest(input: {
                    professionType: "np",
                    statesRequested: ["MD"],
                    specialty: "Family Medicine",
                    practiceModel: "telehealth",
                    expectedStartDate: "2030-06-01"
                }) {
                    request {
                        status
                        statesRequested
                    }
                    matches {
                        status
                        matchScore
                        matchReasons
                    }
                }
            }
            "#,
        )
        .await;

    let result = &data["submitCollaborationRequest"];
    assert_eq!(result["request"]["status"], "open");
    assert_eq!(result["request"]["statesRequested"][0], "MD");

    let matches = result["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["status"], "pending");
    assert_eq!(matches[0]["matchScore"].as_i64().unwrap(), 100);
    assert!(!matches[0]["matchReasons"].as_array().unwrap().is_empty());
}

/// Anonymous callers get an UNAUTHORIZED error, not data.
#[test_context(TestHarness)]
#[tokio::test]
async fn anonymous_requests_are_rejected(ctx: &TestHarness) {
    let client = GraphQLClient::new(ctx.db_pool.clone(), ctx.deps.clone(), None);

    let (_, errors) = client.execute("query { myRequests { id } }").await;
    assert_eq!(errors.len(), 1);
    assert!(format!("{:?}", errors[0]).contains("Authentication required"));
}

/// A physician sees pending matches through their own query.
#[test_context(TestHarness)]
#[tokio::test]
async fn physician_sees_pending_matches(ctx: &TestHarness) {
    let physician = create_physician(&ctx.db_pool, &["WV"], &["Family Medicine"], "telehealth", 3)
        .await
        .unwrap();

    let practitioner = Actor::practitioner(UserId::new());
    let submit = GraphQLClient::new(ctx.db_pool.clone(), ctx.deps.clone(), Some(practitioner));
    submit
        .query(
            r#"
            mutation {
                submitCollaborationRequest(input: {
                    professionType: "pa",
                    statesRequested: ["WV"],
                    specialty: "Family Medicine",
                    practiceModel: "telehealth",
                    expectedStartDate: "2030-06-01"
                }) {
                    request { id }
                }
            }
            "#,
        )
        .await;

    let client = GraphQLClient::new(
        ctx.db_pool.clone(),
        ctx.deps.clone(),
        Some(physician.actor),
    );
    let data = client
        .query("query { myPendingMatches { status matchScore } }")
        .await;

    let matches = data["myPendingMatches"].as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["status"], "pending");
}

/// Bad UUIDs surface as VALIDATION errors before touching the database.
#[test_context(TestHarness)]
#[tokio::test]
async fn malformed_ids_are_validation_errors(ctx: &TestHarness) {
    let client = GraphQLClient::new(
        ctx.db_pool.clone(),
        ctx.deps.clone(),
        Some(Actor::practitioner(UserId::new())),
    );

    let (_, errors) = client
        .execute(r#"query { collaborationRequest(id: "not-a-uuid") { id } }"#)
        .await;
    assert_eq!(errors.len(), 1);
    assert!(format!("{:?}", errors[0]).contains("must be a UUID"));
}
