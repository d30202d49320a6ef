//! Spend statistics handler.
//!
//! ```text
//! GET /api/stats
//! ```

use actix_web::{get, web};

use crate::domain::SpendSummary;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorEnvelopeSchema, SpendSummarySchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Monthly and yearly spend across the signed-in user's active subscriptions.
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Spend totals", body = SpendSummarySchema),
        (status = 400, description = "Store failure", body = ErrorEnvelopeSchema),
        (status = 401, description = "Not logged in", body = ErrorEnvelopeSchema)
    ),
    tags = ["subscriptions"],
    operation_id = "spendStats"
)]
#[get("/stats")]
pub async fn spend_stats(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<SpendSummary>> {
    let owner = session.require_user_id()?;
    let summary = state.subscriptions_query.spend_summary(&owner).await?;
    Ok(web::Json(summary))
}
