//! Account handlers.
//!
//! ```text
//! POST /api/register {"email":"ada@example.com","password":"..."}
//! POST /api/login    {"email":"ada@example.com","password":"..."}
//! POST /api/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Credentials, Error, REGISTRATION_CONFIRMATION};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorEnvelopeSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error};

const EMAIL: FieldName = FieldName::new("email");
const PASSWORD: FieldName = FieldName::new("password");

/// Credentials body shared by register and login.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct CredentialsRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "correct horse battery staple")]
    pub password: Option<String>,
}

impl TryFrom<CredentialsRequest> for Credentials {
    type Error = Error;

    fn try_from(value: CredentialsRequest) -> Result<Self, Self::Error> {
        let email = value.email.ok_or_else(|| missing_field_error(EMAIL))?;
        let password = value.password.ok_or_else(|| missing_field_error(PASSWORD))?;
        Ok(Credentials::new(email, password))
    }
}

/// Success body for account operations.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AccountResponse {
    fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }
}

/// Register a new account with the identity provider.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Sign-up accepted; confirmation email sent", body = AccountResponse),
        (status = 400, description = "Missing field or provider rejection", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error")
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<AccountResponse>> {
    let credentials = Credentials::try_from(payload.into_inner())?;
    state.accounts.register(&credentials).await?;
    Ok(web::Json(AccountResponse {
        success: true,
        message: Some(REGISTRATION_CONFIRMATION.to_owned()),
    }))
}

/// Sign in with email and password and establish a session.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Signed in", body = AccountResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Missing field or invalid credentials", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error")
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<AccountResponse>> {
    let credentials = Credentials::try_from(payload.into_inner())?;
    let user = state.accounts.login(&credentials).await?;
    session.persist_user(&user)?;
    Ok(web::Json(AccountResponse::ok()))
}

/// Clear the session. Safe to call when already signed out.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Signed out", body = AccountResponse)
    ),
    tags = ["accounts"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    if let Ok(Some(user_id)) = session.user_id() {
        info!(user_id = %user_id, "user signed out");
    }
    session.clear();
    HttpResponse::Ok().json(AccountResponse::ok())
}
