//! GraphQL schema definition.

use chrono::NaiveDate;
use juniper::{graphql_value, EmptySubscription, FieldError, FieldResult, RootNode};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::warn;

use super::context::GraphQLContext;

// Common types
use crate::common::{
    Actor, CollaborationMatchId, CollaborationRequestId, Id, PhysicianProfileId, ServiceError,
    SupervisionAgreementId,
};

// Domain activities
use crate::domains::agreements::activities as agreement_activities;
use crate::domains::agreements::activities::{CreateAgreementInput, UpdateAgreementInput};
use crate::domains::matching::activities as matching_activities;
use crate::domains::matching::activities::MatchResponse;
use crate::domains::physicians::activities as physician_activities;
use crate::domains::requests::activities as request_activities;
use crate::domains::requests::activities::CreateRequestInput;

// Domain data types (GraphQL types)
use crate::domains::agreements::data::{
    CreateAgreementGqlInput, SupervisionAgreementData, UpdateAgreementGqlInput,
};
use crate::domains::matching::data::CollaborationMatchData;
use crate::domains::physicians::data::PhysicianProfileData;
use crate::domains::requests::data::{
    CollaborationRequestData, SubmitRequestInput, SubmitRequestResult,
};

// =============================================================================
// Resolver plumbing
// =============================================================================

/// Map a ServiceError onto a FieldError with a stable extensions code.
fn service_error(err: ServiceError) -> FieldError {
    if matches!(err, ServiceError::Database(_) | ServiceError::Internal(_)) {
        warn!(error = %err, "Resolver failed on infrastructure error");
    }
    FieldError::new(err.to_string(), graphql_value!({ "code": (err.code()) }))
}

/// The authenticated actor, or an UNAUTHORIZED field error.
fn require_actor(ctx: &GraphQLContext) -> Result<Actor, FieldError> {
    ctx.actor().ok_or_else(|| {
        FieldError::new(
            "Authentication required",
            graphql_value!({ "code": "UNAUTHORIZED" }),
        )
    })
}

/// Parse a client-supplied ID string into a typed ID.
fn parse_id<T>(raw: &str, label: &str) -> Result<Id<T>, FieldError> {
    Id::parse(raw).map_err(|_| {
        FieldError::new(
            format!("{} must be a UUID", label),
            graphql_value!({ "code": "VALIDATION" }),
        )
    })
}

fn parse_date(raw: &str) -> Result<NaiveDate, FieldError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        FieldError::new(
            "expected_start_date must be an ISO date (YYYY-MM-DD)",
            graphql_value!({ "code": "VALIDATION" }),
        )
    })
}

fn parse_percent(raw: f64) -> Result<Decimal, FieldError> {
    Decimal::try_from(raw)
        .map(|d| d.round_dp(2))
        .map_err(|_| {
            FieldError::new(
                "platform_fee_percent must be a valid decimal",
                graphql_value!({ "code": "VALIDATION" }),
            )
        })
}

// =============================================================================
// Query root
// =============================================================================

pub struct Query;

#[juniper::graphql_object(context = GraphQLContext)]
impl Query {
    /// The calling practitioner's collaboration requests, newest first
    async fn my_requests(ctx: &GraphQLContext) -> FieldResult<Vec<CollaborationRequestData>> {
        let actor = require_actor(ctx)?;
        let requests = request_activities::list_own_requests(&actor, &ctx.deps)
            .await
            .map_err(service_error)?;
        Ok(requests.into_iter().map(Into::into).collect())
    }

    /// One collaboration request (owner or admin)
    async fn collaboration_request(
        ctx: &GraphQLContext,
        id: String,
    ) -> FieldResult<CollaborationRequestData> {
        let actor = require_actor(ctx)?;
        let request_id: CollaborationRequestId = parse_id(&id, "id")?;
        let request = request_activities::get_request(&actor, request_id, &ctx.deps)
            .await
            .map_err(service_error)?;
        Ok(request.into())
    }

    /// Matches for a request, best score first (owner or admin)
    async fn matches_for_request(
        ctx: &GraphQLContext,
        request_id: String,
    ) -> FieldResult<Vec<CollaborationMatchData>> {
        let actor = require_actor(ctx)?;
        let request_id: CollaborationRequestId = parse_id(&request_id, "request_id")?;
        let matches =
            matching_activities::list_matches_for_request(&actor, request_id, &ctx.deps)
                .await
                .map_err(service_error)?;
        Ok(matches.into_iter().map(Into::into).collect())
    }

    /// Matches awaiting the calling physician's response
    async fn my_pending_matches(ctx: &GraphQLContext) -> FieldResult<Vec<CollaborationMatchData>> {
        let actor = require_actor(ctx)?;
        let matches = matching_activities::list_pending_matches(&actor, &ctx.deps)
            .await
            .map_err(service_error)?;
        Ok(matches.into_iter().map(Into::into).collect())
    }

    /// A physician profile with derived capacity fields
    async fn physician_profile(
        ctx: &GraphQLContext,
        id: String,
    ) -> FieldResult<PhysicianProfileData> {
        require_actor(ctx)?;
        let profile_id: PhysicianProfileId = parse_id(&id, "id")?;
        let loaded = physician_activities::get_profile(profile_id, &ctx.deps)
            .await
            .map_err(service_error)?;
        Ok(loaded.into())
    }

    /// The calling physician's own profile
    async fn my_physician_profile(ctx: &GraphQLContext) -> FieldResult<PhysicianProfileData> {
        let actor = require_actor(ctx)?;
        let loaded = physician_activities::get_own_profile(&actor, &ctx.deps)
            .await
            .map_err(service_error)?;
        Ok(loaded.into())
    }

    /// The agreement behind a match, if one exists (participants or admin)
    async fn agreement_for_match(
        ctx: &GraphQLContext,
        match_id: String,
    ) -> FieldResult<Option<SupervisionAgreementData>> {
        let actor = require_actor(ctx)?;
        let match_id: CollaborationMatchId = parse_id(&match_id, "match_id")?;
        let agreement =
            agreement_activities::get_agreement_for_match(&actor, match_id, &ctx.deps)
                .await
                .map_err(service_error)?;
        Ok(agreement.map(Into::into))
    }
}

// =============================================================================
// Mutation root
// =============================================================================

pub struct Mutation;

#[juniper::graphql_object(context = GraphQLContext)]
impl Mutation {
    /// Submit a collaboration request and receive its ranked matches
    async fn submit_collaboration_request(
        ctx: &GraphQLContext,
        input: SubmitRequestInput,
    ) -> FieldResult<SubmitRequestResult> {
        let actor = require_actor(ctx)?;
        let expected_start_date = parse_date(&input.expected_start_date)?;

        let created = request_activities::create_request(
            &actor,
            CreateRequestInput {
                profession_type: input.profession_type,
                states_requested: input.states_requested,
                specialty: input.specialty,
                practice_model: input.practice_model,
                expected_start_date,
                preferred_supervision_model: input.preferred_supervision_model,
            },
            &ctx.deps,
        )
        .await
        .map_err(service_error)?;

        Ok(created.into())
    }

    /// Close an owned collaboration request
    async fn close_collaboration_request(
        ctx: &GraphQLContext,
        id: String,
    ) -> FieldResult<CollaborationRequestData> {
        let actor = require_actor(ctx)?;
        let request_id: CollaborationRequestId = parse_id(&id, "id")?;
        let closed = request_activities::close_request(&actor, request_id, &ctx.deps)
            .await
            .map_err(service_error)?;
        Ok(closed.into())
    }

    /// Accept or decline a pending match ("accepted" or "declined")
    async fn respond_to_match(
        ctx: &GraphQLContext,
        match_id: String,
        response: String,
    ) -> FieldResult<CollaborationMatchData> {
        let actor = require_actor(ctx)?;
        let match_id: CollaborationMatchId = parse_id(&match_id, "match_id")?;
        let response = MatchResponse::from_str(&response).map_err(|_| {
            FieldError::new(
                "response must be 'accepted' or 'declined'",
                graphql_value!({ "code": "VALIDATION" }),
            )
        })?;

        let updated =
            matching_activities::respond_to_match(&actor, match_id, response, &ctx.deps)
                .await
                .map_err(service_error)?;
        Ok(updated.into())
    }

    /// Draft an agreement on an accepted match (physician)
    async fn create_agreement(
        ctx: &GraphQLContext,
        match_id: String,
        input: CreateAgreementGqlInput,
    ) -> FieldResult<SupervisionAgreementData> {
        let actor = require_actor(ctx)?;
        let match_id: CollaborationMatchId = parse_id(&match_id, "match_id")?;
        let platform_fee_percent = input.platform_fee_percent.map(parse_percent).transpose()?;

        let agreement = agreement_activities::create_agreement(
            &actor,
            match_id,
            CreateAgreementInput {
                monthly_fee_cents: i64::from(input.monthly_fee_cents),
                platform_fee_percent,
            },
            &ctx.deps,
        )
        .await
        .map_err(service_error)?;

        Ok(agreement.into())
    }

    /// Revise fee terms on an unsigned agreement (physician)
    async fn update_agreement(
        ctx: &GraphQLContext,
        agreement_id: String,
        input: UpdateAgreementGqlInput,
    ) -> FieldResult<SupervisionAgreementData> {
        let actor = require_actor(ctx)?;
        let agreement_id: SupervisionAgreementId = parse_id(&agreement_id, "agreement_id")?;
        let platform_fee_percent = input.platform_fee_percent.map(parse_percent).transpose()?;

        let agreement = agreement_activities::update_agreement(
            &actor,
            agreement_id,
            UpdateAgreementInput {
                monthly_fee_cents: input.monthly_fee_cents.map(i64::from),
                platform_fee_percent,
            },
            &ctx.deps,
        )
        .await
        .map_err(service_error)?;

        Ok(agreement.into())
    }

    /// Record an externally captured signature (admin/system callback)
    async fn record_agreement_signature(
        ctx: &GraphQLContext,
        agreement_id: String,
    ) -> FieldResult<SupervisionAgreementData> {
        let actor = require_actor(ctx)?;
        let agreement_id: SupervisionAgreementId = parse_id(&agreement_id, "agreement_id")?;
        let agreement =
            agreement_activities::record_signature(&actor, agreement_id, &ctx.deps)
                .await
                .map_err(service_error)?;
        Ok(agreement.into())
    }

    /// Activate a signed agreement (practitioner)
    async fn activate_agreement(
        ctx: &GraphQLContext,
        agreement_id: String,
        billing_anchor_day: Option<i32>,
    ) -> FieldResult<SupervisionAgreementData> {
        let actor = require_actor(ctx)?;
        let agreement_id: SupervisionAgreementId = parse_id(&agreement_id, "agreement_id")?;
        let agreement = agreement_activities::activate_agreement(
            &actor,
            agreement_id,
            billing_anchor_day,
            &ctx.deps,
        )
        .await
        .map_err(service_error)?;
        Ok(agreement.into())
    }

    /// Pause an active agreement (physician or admin)
    async fn pause_agreement(
        ctx: &GraphQLContext,
        agreement_id: String,
    ) -> FieldResult<SupervisionAgreementData> {
        let actor = require_actor(ctx)?;
        let agreement_id: SupervisionAgreementId = parse_id(&agreement_id, "agreement_id")?;
        let agreement = agreement_activities::pause_agreement(&actor, agreement_id, &ctx.deps)
            .await
            .map_err(service_error)?;
        Ok(agreement.into())
    }

    /// Resume a paused agreement (physician or admin)
    async fn resume_agreement(
        ctx: &GraphQLContext,
        agreement_id: String,
    ) -> FieldResult<SupervisionAgreementData> {
        let actor = require_actor(ctx)?;
        let agreement_id: SupervisionAgreementId = parse_id(&agreement_id, "agreement_id")?;
        let agreement = agreement_activities::resume_agreement(&actor, agreement_id, &ctx.deps)
            .await
            .map_err(service_error)?;
        Ok(agreement.into())
    }

    /// Terminate an agreement with a reason (either party or admin)
    async fn terminate_agreement(
        ctx: &GraphQLContext,
        agreement_id: String,
        reason: String,
    ) -> FieldResult<SupervisionAgreementData> {
        let actor = require_actor(ctx)?;
        let agreement_id: SupervisionAgreementId = parse_id(&agreement_id, "agreement_id")?;
        let agreement =
            agreement_activities::terminate_agreement(&actor, agreement_id, &reason, &ctx.deps)
                .await
                .map_err(service_error)?;
        Ok(agreement.into())
    }

    /// Flip a physician's externally verified billing flag (admin)
    async fn set_physician_billing_ready(
        ctx: &GraphQLContext,
        profile_id: String,
        billing_ready: bool,
    ) -> FieldResult<PhysicianProfileData> {
        let actor = require_actor(ctx)?;
        let profile_id: PhysicianProfileId = parse_id(&profile_id, "profile_id")?;

        physician_activities::set_billing_ready(&actor, profile_id, billing_ready, &ctx.deps)
            .await
            .map_err(service_error)?;

        // Return the profile with derived fields freshly populated.
        let loaded = physician_activities::get_profile(profile_id, &ctx.deps)
            .await
            .map_err(service_error)?;
        Ok(loaded.into())
    }
}

// =============================================================================
// Schema
// =============================================================================

pub type Schema = RootNode<'static, Query, Mutation, EmptySubscription<GraphQLContext>>;

pub fn create_schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}
