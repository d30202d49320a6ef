//! Subscription CRUD handlers.
//!
//! ```text
//! GET    /api/subscriptions
//! POST   /api/subscriptions      {"price":9.99,"billing_cycle":"monthly","next_billing_date":"2024-02-01"}
//! PUT    /api/subscriptions/{id} {"is_active":false}
//! DELETE /api/subscriptions/{id}
//! ```
//!
//! Every handler resolves the session user before decoding the body or
//! touching the store, so an anonymous request always answers 401 and never
//! reaches the store at all.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::domain::{Error, Subscription, SubscriptionId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorEnvelopeSchema, SubscriptionSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::subscription_payload::{
    decode_body, parse_new_subscription, parse_subscription_patch,
};

/// Body returned by delete.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
}

fn path_id(raw: String) -> Result<SubscriptionId, Error> {
    SubscriptionId::new(raw).map_err(|err| Error::invalid_request(err.to_string()))
}

/// List the signed-in user's subscriptions, soonest billing first.
#[utoipa::path(
    get,
    path = "/api/subscriptions",
    responses(
        (status = 200, description = "Subscriptions", body = [SubscriptionSchema]),
        (status = 400, description = "Store failure", body = ErrorEnvelopeSchema),
        (status = 401, description = "Not logged in", body = ErrorEnvelopeSchema)
    ),
    tags = ["subscriptions"],
    operation_id = "listSubscriptions"
)]
#[get("/subscriptions")]
pub async fn list_subscriptions(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Subscription>>> {
    let owner = session.require_user_id()?;
    let rows = state.subscriptions_query.list(&owner).await?;
    Ok(web::Json(rows))
}

/// Create a subscription owned by the signed-in user.
#[utoipa::path(
    post,
    path = "/api/subscriptions",
    request_body(content = Object, description = "Allow-listed subscription fields"),
    responses(
        (status = 200, description = "Created row", body = SubscriptionSchema),
        (status = 400, description = "Invalid body or store failure", body = ErrorEnvelopeSchema),
        (status = 401, description = "Not logged in", body = ErrorEnvelopeSchema)
    ),
    tags = ["subscriptions"],
    operation_id = "createSubscription"
)]
#[post("/subscriptions")]
pub async fn create_subscription(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Bytes,
) -> ApiResult<web::Json<Subscription>> {
    let owner = session.require_user_id()?;
    let new = parse_new_subscription(&decode_body(&payload)?)?;
    let row = state.subscriptions.create(&owner, new).await?;
    Ok(web::Json(row))
}

/// Patch a subscription owned by the signed-in user.
///
/// Answers `{}` when no owned row matches the id.
#[utoipa::path(
    put,
    path = "/api/subscriptions/{id}",
    params(("id" = String, Path, description = "Subscription identifier")),
    request_body(content = Object, description = "Allow-listed fields to change"),
    responses(
        (status = 200, description = "Updated row, or an empty object when nothing matched", body = SubscriptionSchema),
        (status = 400, description = "Invalid body or store failure", body = ErrorEnvelopeSchema),
        (status = 401, description = "Not logged in", body = ErrorEnvelopeSchema)
    ),
    tags = ["subscriptions"],
    operation_id = "updateSubscription"
)]
#[put("/subscriptions/{id}")]
pub async fn update_subscription(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Bytes,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = path_id(path.into_inner())?;
    let patch = parse_subscription_patch(&decode_body(&payload)?)?;
    let response = match state.subscriptions.update(&owner, &id, patch).await? {
        Some(row) => HttpResponse::Ok().json(row),
        None => HttpResponse::Ok().json(Map::<String, Value>::new()),
    };
    Ok(response)
}

/// Delete a subscription owned by the signed-in user.
#[utoipa::path(
    delete,
    path = "/api/subscriptions/{id}",
    params(("id" = String, Path, description = "Subscription identifier")),
    responses(
        (status = 200, description = "Deleted, or nothing matched", body = DeleteResponse),
        (status = 400, description = "Store failure", body = ErrorEnvelopeSchema),
        (status = 401, description = "Not logged in", body = ErrorEnvelopeSchema)
    ),
    tags = ["subscriptions"],
    operation_id = "deleteSubscription"
)]
#[delete("/subscriptions/{id}")]
pub async fn delete_subscription(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteResponse>> {
    let owner = session.require_user_id()?;
    let id = path_id(path.into_inner())?;
    state.subscriptions.delete(&owner, &id).await?;
    Ok(web::Json(DeleteResponse { success: true }))
}
