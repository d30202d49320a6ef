//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`; the
//! wrappers here mirror their wire shape for documentation only.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No signed-in user.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The identity provider or table store rejected the call.
    #[schema(rename = "upstream_error")]
    UpstreamError,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Error body returned by every failing endpoint.
///
/// `401` responses carry only `error` and `code`.
#[derive(ToSchema)]
#[schema(as = ErrorEnvelope, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorEnvelopeSchema {
    /// Always `false`.
    success: Option<bool>,
    /// Human-readable message.
    #[schema(example = "Invalid login credentials")]
    error: String,
    /// Stable machine-readable error code.
    code: ErrorCodeSchema,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level validation details.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Subscription`].
///
/// Rows may carry additional store columns beyond those listed.
#[derive(ToSchema)]
#[schema(as = Subscription)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SubscriptionSchema {
    /// Store-assigned identifier; numeric ids are returned as numbers.
    #[schema(value_type = Object, example = 3)]
    id: serde_json::Value,
    /// Owner's identity-provider user id.
    user_id: String,
    #[schema(example = "Music streaming")]
    name: Option<String>,
    #[schema(value_type = f64, example = 9.99)]
    price: f64,
    #[schema(example = "monthly")]
    billing_cycle: String,
    #[schema(value_type = Option<String>, format = Date, example = "2024-02-01")]
    next_billing_date: Option<String>,
    is_active: bool,
}

/// OpenAPI schema for [`crate::domain::SpendSummary`].
#[derive(ToSchema)]
#[schema(as = SpendSummary)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SpendSummarySchema {
    /// Number of active subscriptions.
    #[schema(example = 3)]
    total_subscriptions: u64,
    /// Monthly-equivalent spend rounded to cents.
    #[schema(value_type = f64, example = 39.99)]
    monthly_total: f64,
    /// Twelve times the unrounded monthly spend, rounded to cents.
    #[schema(value_type = f64, example = 479.88)]
    yearly_total: f64,
}
